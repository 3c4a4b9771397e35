mod app;
mod application;
mod domain;
mod ui;
mod utils;
mod ytdlp;

use iced::{window, Size};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yt_batch_downloader=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("starting v{}", env!("CARGO_PKG_VERSION"));

    let icon_data = include_bytes!("../assets/icon.png");

    let icon = match image::load_from_memory(icon_data) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            window::icon::from_rgba(rgba.into_raw(), width, height).ok()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not decode window icon");
            None
        }
    };

    iced::application(app::BatchApp::default, app::update, app::view)
        .title("YouTube Video/Music Downloader")
        .theme(app::theme)
        .window(window::Settings {
            size: Size::new(600.0, 550.0),
            icon,
            ..Default::default()
        })
        .run()
}
