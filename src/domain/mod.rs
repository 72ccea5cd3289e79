//! Domain layer - Business logic and domain models

pub mod format;
pub mod listing;
pub mod news;
pub mod opd;
pub mod progress;
pub mod report;
pub mod settings;
pub mod state;
pub mod status;
pub mod summary;
pub mod template;
pub mod user;

pub use listing::Pagination;
pub use news::NewsItem;
pub use opd::Opd;
pub use progress::{Channel, ProgressData, ProgressUpdate};
pub use report::{ReportRow, ReportTotals};
pub use settings::SystemSettings;
pub use state::{AppData, SyncPayload, Update};
pub use status::StatusBand;
pub use summary::Summary;
pub use user::{Role, User};
