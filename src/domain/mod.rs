pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{
    BatchEvent, BatchPhase, BatchResult, DownloadRequest, ItemOutcome, ItemResult, JobConfig,
    MediaType, QualityTier, SavedMedia,
};
