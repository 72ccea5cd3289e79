//! Shared state for the web server.

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, Renderer};
use std::sync::Arc;

/// State injected into every handler.
///
/// Handlers reload `data.json` on each request so that CLI edits show up
/// without restarting the server.
pub struct AppState {
    pub repository: FileSystemRepository,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(repository: FileSystemRepository) -> Result<Self> {
        Ok(AppState {
            repository,
            renderer: Renderer::new()?,
        })
    }
}

pub type SharedState = Arc<AppState>;
