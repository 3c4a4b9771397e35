use std::path::PathBuf;

use futures::channel::mpsc;
use futures::Stream;
use iced::{Task, Theme};

use crate::{
    application::{BatchRunner, OptionsBuilder},
    domain::{BatchEvent, BatchPhase, DownloadRequest, ItemResult, JobConfig},
    ui::{BatchView, StatusTone, ViewMessage},
    utils::DeploymentMode,
    ytdlp::{ToolNames, YtDlpClient},
};

pub struct BatchApp {
    view: BatchView,
    runner: BatchRunner<YtDlpClient>,
}

impl Default for BatchApp {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchApp {
    pub fn new() -> Self {
        let names = ToolNames::default();
        let mode = DeploymentMode::detect(&names);
        let tools = mode.tool_paths(&names);
        tracing::info!(
            ?mode,
            downloader = %tools.downloader.display(),
            transcoder = %tools.transcoder.display(),
            script_runtime = %tools.script_runtime.display(),
            "resolved external tools"
        );

        let client = YtDlpClient::new(tools.downloader.clone());
        Self {
            view: BatchView::default(),
            runner: BatchRunner::new(client, OptionsBuilder::new(tools)),
        }
    }

    fn job_config(&self) -> JobConfig {
        JobConfig {
            destination: PathBuf::from(self.view.folder.trim()),
            media_type: self.view.media_type,
            quality: self.view.quality,
            normalize_loudness: self.view.normalize_loudness,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(ViewMessage),
    /// `None` when the picker was cancelled
    FolderPicked(Option<PathBuf>),
    Batch(BatchEvent),
    DialogClosed,
}

pub fn update(app: &mut BatchApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                ViewMessage::BrowsePressed => {
                    let current = PathBuf::from(app.view.folder.trim());
                    return Task::perform(pick_folder(current), Message::FolderPicked);
                }
                ViewMessage::StartPressed => return start_batch(app),
                _ => {}
            }
        }
        Message::FolderPicked(picked) => {
            if let Some(folder) = picked {
                app.view.folder = folder.display().to_string();
            }
        }
        Message::Batch(event) => match event {
            BatchEvent::ItemStarted { index, total, .. } => {
                app.view.set_status(
                    format!("now downloading {}/{} videos...", index, total),
                    StatusTone::Running,
                );
            }
            BatchEvent::ItemFinished(outcome) => match &outcome.result {
                ItemResult::Success { files } => {
                    tracing::debug!(index = outcome.index, url = %outcome.url, files = files.len(), "item done");
                }
                ItemResult::Failure { reason } => {
                    tracing::debug!(index = outcome.index, url = %outcome.url, %reason, "item failed");
                }
            },
            BatchEvent::Finished(result) => {
                app.view.phase = BatchPhase::Idle;
                app.view
                    .set_status("All Downloading Tasks Finished!", StatusTone::Done);
                // Only the attempted count is reported, failures stay in the log
                return Task::perform(
                    show_message(
                        rfd::MessageLevel::Info,
                        "Finished",
                        format!("Complete {} downloading tasks", result.attempted()),
                    ),
                    |_| Message::DialogClosed,
                );
            }
        },
        Message::DialogClosed => {}
    }
    Task::none()
}

fn start_batch(app: &mut BatchApp) -> Task<Message> {
    if app.view.phase == BatchPhase::Running {
        return Task::none();
    }

    let request = match DownloadRequest::parse(&app.view.urls.text()) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "refusing to start an empty batch");
            return Task::perform(
                show_message(rfd::MessageLevel::Warning, "warning", e.to_string()),
                |_| Message::DialogClosed,
            );
        }
    };

    let job = app.job_config();
    app.view.phase = BatchPhase::Running;

    Task::run(
        batch_stream(app.runner.clone(), request, job),
        Message::Batch,
    )
}

/// Runs the batch on the background executor and forwards its events.
fn batch_stream(
    runner: BatchRunner<YtDlpClient>,
    request: DownloadRequest,
    job: JobConfig,
) -> impl Stream<Item = BatchEvent> {
    iced::stream::channel(16, move |events: mpsc::Sender<BatchEvent>| async move {
        runner.run(request, job, events).await;
    })
}

async fn pick_folder(start: PathBuf) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_directory(&start)
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn show_message(level: rfd::MessageLevel, title: &'static str, description: String) {
    let _ = rfd::AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show()
        .await;
}

pub fn view(app: &BatchApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn theme(_app: &BatchApp) -> Theme {
    Theme::Dark
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchResult, ItemOutcome};
    use iced::widget::text_editor;

    fn app_with_urls(raw: &str) -> BatchApp {
        let mut app = BatchApp::new();
        app.view.urls = text_editor::Content::with_text(raw);
        app
    }

    #[test]
    fn test_empty_input_stays_idle() {
        for raw in ["", "   \n\t\n "] {
            let mut app = app_with_urls(raw);
            let _ = update(&mut app, Message::UiMessage(ViewMessage::StartPressed));
            assert_eq!(app.view.phase, BatchPhase::Idle);
            assert_eq!(app.view.status_message, "wait for command...");
        }
    }

    #[test]
    fn test_start_enters_running_and_ignores_second_press() {
        let mut app = app_with_urls("https://example.com/a\n");
        let _ = update(&mut app, Message::UiMessage(ViewMessage::StartPressed));
        assert_eq!(app.view.phase, BatchPhase::Running);

        let _ = update(
            &mut app,
            Message::Batch(BatchEvent::ItemStarted {
                index: 1,
                total: 1,
                url: "https://example.com/a".to_string(),
            }),
        );
        assert_eq!(app.view.status_message, "now downloading 1/1 videos...");

        let _ = update(&mut app, Message::UiMessage(ViewMessage::StartPressed));
        assert_eq!(app.view.phase, BatchPhase::Running);
        assert_eq!(app.view.status_message, "now downloading 1/1 videos...");
    }

    #[test]
    fn test_finished_returns_to_idle_even_with_failures() {
        let mut app = app_with_urls("a\nb");
        let _ = update(&mut app, Message::UiMessage(ViewMessage::StartPressed));

        let result = BatchResult {
            outcomes: vec![
                ItemOutcome {
                    index: 1,
                    url: "a".to_string(),
                    result: ItemResult::Failure {
                        reason: "Video unavailable".to_string(),
                    },
                },
                ItemOutcome {
                    index: 2,
                    url: "b".to_string(),
                    result: ItemResult::Success { files: vec![] },
                },
            ],
        };
        let _ = update(&mut app, Message::Batch(BatchEvent::Finished(result)));

        assert_eq!(app.view.phase, BatchPhase::Idle);
        assert_eq!(app.view.status_message, "All Downloading Tasks Finished!");
        assert_eq!(app.view.status_tone, StatusTone::Done);
    }

    #[test]
    fn test_cancelled_folder_picker_keeps_path() {
        let mut app = BatchApp::new();
        app.view.folder = "/tmp/out".to_string();

        let _ = update(&mut app, Message::FolderPicked(None));
        assert_eq!(app.view.folder, "/tmp/out");

        let _ = update(&mut app, Message::FolderPicked(Some(PathBuf::from("/tmp/music"))));
        assert_eq!(app.view.folder, PathBuf::from("/tmp/music").display().to_string());
    }

    #[test]
    fn test_job_config_reflects_controls() {
        let mut app = BatchApp::new();
        app.view.folder = "  /tmp/out ".to_string();
        app.view.update(ViewMessage::MediaTypeSelected(crate::domain::MediaType::Audio));
        app.view.update(ViewMessage::NormalizeToggled(true));

        let job = app.job_config();
        assert_eq!(job.destination, PathBuf::from("/tmp/out"));
        assert_eq!(job.media_type, crate::domain::MediaType::Audio);
        assert!(job.normalize_loudness);
    }
}
