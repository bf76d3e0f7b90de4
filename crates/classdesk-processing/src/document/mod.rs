//! Document presentation

pub mod viewer;

pub use viewer::{DocumentViewer, RenderMode, ViewerAction, ViewerState};
