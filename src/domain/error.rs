use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("atleast enter one url")]
    EmptyRequest,

    #[error("Download failed: {0}")]
    Download(String),
}
