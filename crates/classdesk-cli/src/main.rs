//! Classdesk CLI: validate, upload and preview classroom attachments.
//!
//! Reads media host and backend settings from the environment (see
//! `ClientConfig::from_env`). `upload --submit` also needs CLASSDESK_TOKEN and
//! CLASSDESK_USER_ID for the backend session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use classdesk_api_client::{ApiClient, MediaHostClient, SessionService};
use classdesk_cli::{init_tracing, target_from_args, CheckReport, UrlReport};
use classdesk_core::models::{CandidateFile, UploadClassification};
use classdesk_core::{ClientConfig, ErrorMetadata};
use classdesk_processing::{AttachmentPipeline, DocumentViewer, RenderMode, UploadGate};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "classdesk", about = "Classdesk attachment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct TargetArgs {
    /// What the upload is for: profile, material or assignment
    #[arg(long, short = 'c')]
    classification: String,
    /// Classroom id (material and assignment uploads)
    #[arg(long)]
    classroom: Option<String>,
    /// Owner id (assignment uploads); defaults to the signed-in user
    #[arg(long)]
    owner: Option<String>,
    /// Assignment id the attachment is submitted to
    #[arg(long)]
    assignment: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the upload checks on a file without uploading it
    Check {
        /// Path to the file
        file: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Upload a file to the media host
    Upload {
        /// Path to the file
        file: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
        /// Record the upload with the classroom backend
        #[arg(long)]
        submit: bool,
        /// Material title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the inline (preview) variant of a delivery URL
    InlineUrl {
        url: String,
    },
    /// Print the download variant of a delivery URL
    DownloadUrl {
        url: String,
        /// Declared MIME type of the resource
        #[arg(long = "type")]
        content_type: Option<String>,
    },
    /// Print what the document viewer would do for a stored resource
    View {
        url: String,
        /// Declared MIME type of the resource
        #[arg(long = "type")]
        content_type: Option<String>,
        /// view or download
        #[arg(long, default_value = "view")]
        mode: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn load_config() -> anyhow::Result<ClientConfig> {
    ClientConfig::from_env().context("Failed to load config. Set MEDIA_HOST_CLOUD_NAME")
}

async fn read_candidate(path: &Path) -> anyhow::Result<CandidateFile> {
    CandidateFile::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, target } => {
            let config = load_config()?;
            let session = SessionService::from_env();
            let classification: UploadClassification = target.classification.parse()?;
            let upload_target =
                target_from_args(target.owner, target.classroom, target.assignment, &session);
            let candidate = read_candidate(&file).await?;

            match UploadGate::new().validate(candidate, classification, &upload_target) {
                Ok(approved) => print_json(&CheckReport::from_approved(
                    &approved,
                    &config.media_host.base_folder,
                ))?,
                Err(e) => {
                    print_json(&serde_json::json!({
                        "accepted": false,
                        "code": e.error_code(),
                        "message": e.client_message(),
                    }))?;
                    std::process::exit(1);
                }
            }
        }
        Commands::Upload {
            file,
            target,
            submit,
            title,
        } => {
            let config = load_config()?;
            let session = SessionService::from_env();
            let upload_target =
                target_from_args(target.owner, target.classroom, target.assignment, &session);
            let candidate = read_candidate(&file).await?;

            let uploader =
                MediaHostClient::new(&config).context("Failed to create media host client")?;
            let pipeline = AttachmentPipeline::new(Arc::new(uploader));
            let uploaded = pipeline
                .run_named(candidate, &target.classification, &upload_target)
                .await?;

            if submit {
                let client = ApiClient::new(&config, session)
                    .context("Failed to create API client")?;
                let submitted = client
                    .submit_uploaded(&uploaded, title.as_deref())
                    .await
                    .context("Upload succeeded but the backend rejected the submission")?;
                print_json(&serde_json::json!({
                    "resource": uploaded.descriptor,
                    "attachment": uploaded.record,
                    "submitted": submitted,
                }))?;
            } else {
                print_json(&serde_json::json!({
                    "resource": uploaded.descriptor,
                    "attachment": uploaded.record,
                }))?;
            }
        }
        Commands::InlineUrl { url } => {
            let config = load_config()?;
            print_json(&UrlReport::inline(&config.media_host, &url))?;
        }
        Commands::DownloadUrl { url, content_type } => {
            let config = load_config()?;
            print_json(&UrlReport::download(
                &config.media_host,
                &url,
                content_type.as_deref(),
            ))?;
        }
        Commands::View {
            url,
            content_type,
            mode,
        } => {
            let config = load_config()?;
            let mode: RenderMode = mode.parse().map_err(anyhow::Error::msg)?;
            let mut viewer = DocumentViewer::new(
                url,
                content_type,
                mode,
                config.media_host.url_deriver(),
                config.viewer.clone(),
            );
            let action = viewer.mount().await;
            print_json(&serde_json::json!({
                "mode": viewer.mode(),
                "action": action,
                "inline_url": viewer.inline_url(),
                "download_url": viewer.download_url(),
            }))?;
        }
    }

    Ok(())
}
