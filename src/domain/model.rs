use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Video,
    Audio,
}

impl MediaType {
    pub const ALL: &'static [MediaType] = &[MediaType::Video, MediaType::Audio];
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaType::Video => "mp4",
            MediaType::Audio => "mp3",
        })
    }
}

/// Resolution cap offered to the user. Ignored for audio jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTier {
    #[default]
    Best,
    P1080,
    P720,
    P480,
}

impl QualityTier {
    pub const ALL: &'static [QualityTier] = &[
        QualityTier::Best,
        QualityTier::P1080,
        QualityTier::P720,
        QualityTier::P480,
    ];

    /// Maximum frame height, `None` for uncapped.
    pub fn max_height(self) -> Option<u32> {
        match self {
            QualityTier::Best => None,
            QualityTier::P1080 => Some(1080),
            QualityTier::P720 => Some(720),
            QualityTier::P480 => Some(480),
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_height() {
            Some(height) => write!(f, "{}p", height),
            None => f.write_str("best quality"),
        }
    }
}

/// Settings shared by every URL of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub destination: PathBuf,
    pub media_type: MediaType,
    pub quality: QualityTier,
    pub normalize_loudness: bool,
}

/// URLs of one batch, in input order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    urls: Vec<String>,
}

impl DownloadRequest {
    /// Builds a request from the raw text of the URL box, one URL per line.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let urls: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if urls.is_empty() {
            return Err(AppError::EmptyRequest);
        }

        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

/// A file the downloader reported after all post-processing finished.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SavedMedia {
    #[serde(default)]
    pub title: String,
    pub filepath: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResult {
    Success { files: Vec<SavedMedia> },
    Failure { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// 1-based position in the batch.
    pub index: usize,
    pub url: String,
    pub result: ItemResult,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.result, ItemResult::Success { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchResult {
    /// Number of URLs tried, successful or not.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Messages sent from a running batch to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    ItemStarted {
        index: usize,
        total: usize,
        url: String,
    },
    ItemFinished(ItemOutcome),
    Finished(BatchResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_blank_lines() {
        let request =
            DownloadRequest::parse("https://example.com/a\n\n  https://example.com/b  \n").unwrap();
        assert_eq!(
            request.urls(),
            &["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let request = DownloadRequest::parse("b\na\nb\r\n").unwrap();
        assert_eq!(request.urls(), &["b", "a", "b"]);
        assert_eq!(request.len(), 3);
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert_eq!(DownloadRequest::parse(""), Err(AppError::EmptyRequest));
        assert_eq!(
            DownloadRequest::parse("   \n\t\n  "),
            Err(AppError::EmptyRequest)
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(MediaType::Video.to_string(), "mp4");
        assert_eq!(MediaType::Audio.to_string(), "mp3");
        assert_eq!(QualityTier::Best.to_string(), "best quality");
        assert_eq!(QualityTier::P720.to_string(), "720p");
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchResult {
            outcomes: vec![
                ItemOutcome {
                    index: 1,
                    url: "a".into(),
                    result: ItemResult::Success { files: vec![] },
                },
                ItemOutcome {
                    index: 2,
                    url: "b".into(),
                    result: ItemResult::Failure {
                        reason: "boom".into(),
                    },
                },
            ],
        };
        assert_eq!(result.attempted(), 2);
        assert_eq!(result.succeeded(), 1);
        assert_eq!(result.failed(), 1);
    }
}
