use std::path::PathBuf;

use iced::{
    widget::{
        button, checkbox, column, pick_list, row, text, text_editor, text_input, Space,
    },
    Alignment, Color, Element, Length,
};

use crate::domain::{BatchPhase, MediaType, QualityTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Running,
    Done,
}

impl StatusTone {
    fn color(self) -> Color {
        match self {
            StatusTone::Idle => Color::from_rgb(0.5, 0.5, 0.5),
            StatusTone::Running => Color::from_rgb(0.9, 0.8, 0.1),
            StatusTone::Done => Color::from_rgb(0.2, 0.75, 0.3),
        }
    }
}

/// Main view state
pub struct BatchView {
    pub urls: text_editor::Content,
    pub media_type: MediaType,
    pub quality: QualityTier,
    pub normalize_loudness: bool,
    pub folder: String,
    pub status_message: String,
    pub status_tone: StatusTone,
    pub phase: BatchPhase,
}

impl Default for BatchView {
    fn default() -> Self {
        let folder = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .display()
            .to_string();

        Self {
            urls: text_editor::Content::new(),
            media_type: MediaType::default(),
            quality: QualityTier::default(),
            normalize_loudness: false,
            folder,
            status_message: "wait for command...".to_string(),
            status_tone: StatusTone::Idle,
            phase: BatchPhase::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    UrlsEdited(text_editor::Action),
    MediaTypeSelected(MediaType),
    QualitySelected(QualityTier),
    NormalizeToggled(bool),
    FolderChanged(String),
    BrowsePressed,
    StartPressed,
}

impl BatchView {
    pub fn set_status(&mut self, message: impl Into<String>, tone: StatusTone) {
        self.status_message = message.into();
        self.status_tone = tone;
    }

    pub fn update(&mut self, message: ViewMessage) {
        match message {
            ViewMessage::UrlsEdited(action) => {
                self.urls.perform(action);
            }
            ViewMessage::MediaTypeSelected(media_type) => {
                self.media_type = media_type;
            }
            ViewMessage::QualitySelected(quality) => {
                self.quality = quality;
            }
            ViewMessage::NormalizeToggled(enabled) => {
                self.normalize_loudness = enabled;
            }
            ViewMessage::FolderChanged(folder) => {
                self.folder = folder;
            }
            ViewMessage::BrowsePressed | ViewMessage::StartPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, ViewMessage> {
        let start = button(text("start downloading").size(16))
            .on_press_maybe(
                (self.phase == BatchPhase::Idle).then_some(ViewMessage::StartPressed),
            )
            .padding([10, 20]);

        column![
            text("YouTube Downloader").size(24),
            Space::new().height(Length::Fixed(10.0)),
            text("Please enter URL (one per line):").size(14),
            text_editor(&self.urls)
                .placeholder("https://...")
                .on_action(ViewMessage::UrlsEdited)
                .height(Length::Fixed(120.0)),
            row![
                pick_list(
                    MediaType::ALL,
                    Some(self.media_type),
                    ViewMessage::MediaTypeSelected
                )
                .width(Length::Fixed(120.0)),
                pick_list(
                    QualityTier::ALL,
                    Some(self.quality),
                    ViewMessage::QualitySelected
                )
                .width(Length::Fixed(120.0)),
            ]
            .spacing(20),
            row![
                checkbox(self.normalize_loudness).on_toggle(ViewMessage::NormalizeToggled),
                text("Automatic volume unification (will increase processing time)").size(12),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
            row![
                text_input("Destination folder", &self.folder)
                    .on_input(ViewMessage::FolderChanged)
                    .padding(8)
                    .width(Length::Fixed(350.0)),
                button("change folder").on_press(ViewMessage::BrowsePressed),
            ]
            .spacing(5)
            .align_y(Alignment::Center),
            Space::new().height(Length::Fixed(10.0)),
            start,
            text(&self.status_message)
                .size(14)
                .color(self.status_tone.color()),
        ]
        .padding(20)
        .spacing(10)
        .align_x(Alignment::Center)
        .into()
    }
}
