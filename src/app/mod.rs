mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::gallery::Photo;
use crate::lyrics::LyricLine;
use iced::{Size, Theme, window};

/// Helper to launch the app with the loaded lyrics and photos.
pub fn run_app(config: AppConfig, lines: Vec<LyricLine>, photos: Vec<Photo>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Memory Book", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, lines, photos))
}
