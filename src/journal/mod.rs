pub mod export;
pub mod filter;
pub mod pagination;
pub mod service;
pub mod stats;

pub use export::{ExportFile, ExportFormat};
pub use pagination::{paginate, PageRequest, PageResult};
pub use service::JournalService;
pub use stats::{BucketStats, DashboardStats, Dimension};
