//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod session;
pub mod templates;

pub use config::Config;
pub use repository::{FileSystemRepository, MonitorRepository};
pub use session::Session;
pub use templates::Renderer;
