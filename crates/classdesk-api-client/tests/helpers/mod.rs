//! Shared fixtures for the HTTP client tests.

#![allow(dead_code)]

use bytes::Bytes;
use classdesk_api_client::{Identity, Role, SessionService};
use classdesk_core::models::CandidateFile;
use classdesk_core::ClientConfig;

pub const CLOUD: &str = "demo";

/// Config pointing both the media host and the backend at a mock server.
pub fn config_for(server_url: &str) -> ClientConfig {
    let mut config = ClientConfig::new(CLOUD);
    config.media_host.api_base = server_url.to_string();
    config.backend.api_url = server_url.to_string();
    config
}

/// A file of `size` bytes filled with ASCII so multipart bodies stay readable.
pub fn file_of(name: &str, content_type: &str, size: usize) -> CandidateFile {
    CandidateFile::new(name, content_type, Bytes::from(vec![b'x'; size]))
}

pub fn signed_in(user_id: &str, role: Role) -> SessionService {
    let session = SessionService::new();
    session.init(Identity {
        user_id: user_id.to_string(),
        name: "Test User".to_string(),
        role,
        token: "test-token".to_string(),
    });
    session
}

/// Upload response body as the host returns it.
pub fn host_response(secure_url: &str, resource_type: &str, format: Option<&str>) -> String {
    let mut body = serde_json::json!({
        "secure_url": secure_url,
        "public_id": "classdesk/sample",
        "resource_type": resource_type,
        "bytes": 1024,
        "created_at": "2026-01-05T10:00:00Z"
    });
    if let Some(format) = format {
        body["format"] = serde_json::Value::String(format.to_string());
    }
    body.to_string()
}
