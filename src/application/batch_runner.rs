use std::future::Future;

use futures::channel::mpsc;
use futures::SinkExt;

use crate::{
    application::OptionsBuilder,
    domain::{
        AppError, BatchEvent, BatchResult, DownloadRequest, ItemOutcome, ItemResult, JobConfig,
        SavedMedia,
    },
    ytdlp::{ExternalToolConfig, YtDlpClient},
};

/// Performs one download-and-process step for a single URL.
pub trait MediaDownloader: Send + Sync {
    fn download(
        &self,
        url: &str,
        config: &ExternalToolConfig,
    ) -> impl Future<Output = Result<Vec<SavedMedia>, AppError>> + Send;
}

impl MediaDownloader for YtDlpClient {
    async fn download(
        &self,
        url: &str,
        config: &ExternalToolConfig,
    ) -> Result<Vec<SavedMedia>, AppError> {
        YtDlpClient::download(self, url, config)
            .await
            .map_err(|e| AppError::Download(e.to_string()))
    }
}

#[derive(Clone)]
pub struct BatchRunner<D> {
    downloader: D,
    options: OptionsBuilder,
}

impl<D: MediaDownloader> BatchRunner<D> {
    pub fn new(downloader: D, options: OptionsBuilder) -> Self {
        Self {
            downloader,
            options,
        }
    }

    /// Processes every URL in order. A failed URL is logged and skipped.
    ///
    /// `events` receives one `ItemStarted`/`ItemFinished` pair per URL and a
    /// single `Finished` at the end. A closed receiver does not stop the
    /// batch.
    pub async fn run(
        &self,
        request: DownloadRequest,
        job: JobConfig,
        mut events: mpsc::Sender<BatchEvent>,
    ) -> BatchResult {
        let total = request.len();
        let mut result = BatchResult::default();

        tracing::info!(
            total,
            destination = %job.destination.display(),
            media_type = %job.media_type,
            quality = %job.quality,
            normalize = job.normalize_loudness,
            "batch started"
        );

        for (position, url) in request.urls().iter().enumerate() {
            let index = position + 1;
            let _ = events
                .send(BatchEvent::ItemStarted {
                    index,
                    total,
                    url: url.clone(),
                })
                .await;

            let config = self.options.build(&job);
            if tracing::enabled!(tracing::Level::TRACE) {
                if let Ok(json) = serde_json::to_string(&config) {
                    tracing::trace!(%url, config = %json, "downloader options");
                }
            }

            tracing::info!(index, total, %url, "processing");
            let item = match self.downloader.download(url, &config).await {
                Ok(files) => {
                    for file in &files {
                        tracing::info!(%url, title = %file.title, path = %file.filepath.display(), "saved");
                    }
                    ItemResult::Success { files }
                }
                Err(e) => {
                    tracing::warn!(index, %url, error = %e, "download failed, skipping");
                    ItemResult::Failure {
                        reason: e.to_string(),
                    }
                }
            };

            let outcome = ItemOutcome {
                index,
                url: url.clone(),
                result: item,
            };
            result.outcomes.push(outcome.clone());
            let _ = events.send(BatchEvent::ItemFinished(outcome)).await;
        }

        tracing::info!(
            attempted = result.attempted(),
            succeeded = result.succeeded(),
            failed = result.failed(),
            "batch finished"
        );

        let _ = events.send(BatchEvent::Finished(result.clone())).await;
        result
    }
}
