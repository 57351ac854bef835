mod constants;
mod lyrics;

use crate::audio::AudioPlayback;
use crate::autoplay::{AutoplaySequencer, Player};
use crate::config::{AppConfig, ThemeMode};
use crate::countdown::{ParsedMilestone, parse_milestones};
use crate::gallery::{Carousel, Photo};
use crate::lyrics::{LyricLayout, LyricLine, LyricSynchronizer};
use chrono::{DateTime, Utc};
use iced::{Color, Task};
use std::path::PathBuf;

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use lyrics::{LyricsState, LyricsViewport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Gallery,
    Countdown,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Route::Home => "Our Song",
            Route::Gallery => "Photos",
            Route::Countdown => "Together",
        };
        write!(f, "{}", label)
    }
}

pub(in crate::app) struct AudioState {
    pub(in crate::app) playback: AudioPlayback,
    pub(in crate::app) sequencer: AutoplaySequencer,
}

pub(in crate::app) struct GalleryState {
    pub(in crate::app) photos: Vec<Photo>,
    pub(in crate::app) carousel: Carousel,
}

pub(in crate::app) struct CountdownState {
    pub(in crate::app) milestones: Vec<ParsedMilestone>,
    pub(in crate::app) now: DateTime<Utc>,
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) route: Route,
    pub(super) focused: bool,
    pub(super) window_opened: bool,
    pub(super) lyrics: LyricsState,
    pub(super) audio: AudioState,
    pub(super) gallery: GalleryState,
    pub(super) countdown: CountdownState,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        lines: Vec<LyricLine>,
        photos: Vec<Photo>,
    ) -> (App, Task<Message>) {
        let mut playback = AudioPlayback::new(PathBuf::from(&config.track_path));
        playback.set_volume(config.volume);

        let mut sync = LyricSynchronizer::new(config.sync_settings());
        sync.load(lines, None);

        let carousel = Carousel::new(photos.len());
        let milestones = parse_milestones(&config.milestones);

        let mut app = App {
            route: Route::Home,
            focused: true,
            window_opened: false,
            lyrics: LyricsState {
                sync,
                layout: LyricLayout::default(),
                viewport: LyricsViewport::default(),
                text_width: 0.0,
            },
            audio: AudioState {
                playback,
                sequencer: AutoplaySequencer::new(config.autoplay_settings()),
            },
            gallery: GalleryState { photos, carousel },
            countdown: CountdownState {
                milestones,
                now: Utc::now(),
            },
            config,
        };
        let width = Self::lyrics_text_width_for_window(app.config.window_width);
        app.relayout_lyrics(width);

        tracing::info!(
            lines = app.lyrics.sync.lines().len(),
            photos = app.gallery.photos.len(),
            milestones = app.countdown.milestones.len(),
            "Memory book ready"
        );

        (app, Task::done(Message::Startup))
    }

    /// Re-estimate lyric row geometry for a new text width.
    pub(super) fn relayout_lyrics(&mut self, text_width: f32) {
        let text_width = text_width.max(MIN_LYRICS_TEXT_WIDTH_PX);
        self.lyrics.text_width = text_width;
        self.lyrics.layout = LyricLayout::estimate(
            self.lyrics.sync.lines(),
            &self.config.layout_metrics(text_width),
        );
        self.lyrics.viewport.set_extents(
            self.config.lyrics_view_height,
            self.lyrics.layout.content_height(),
        );
        tracing::debug!(
            text_width,
            content_height = self.lyrics.layout.content_height(),
            "Re-estimated lyric layout"
        );
    }

    pub(super) fn lyrics_text_width_for_window(window_width: f32) -> f32 {
        window_width - 2.0 * PAGE_PADDING_PX - Self::lyrics_chrome_width()
    }

    pub(super) fn lyrics_chrome_width() -> f32 {
        2.0 * LYRICS_SIDE_PADDING_PX + SCROLLBAR_ALLOWANCE_PX
    }

    pub(super) fn highlight_color(&self) -> Color {
        let base = if matches!(self.config.theme, ThemeMode::Night) {
            self.config.night_highlight
        } else {
            self.config.day_highlight
        };
        Color {
            r: base.r,
            g: base.g,
            b: base.b,
            a: base.a,
        }
    }

    /// Whether per-frame ticks are needed for playback, scrolling or fades.
    pub(super) fn needs_frames(&self) -> bool {
        !self.audio.playback.is_paused()
            || self.lyrics.sync.is_animating()
            || self.audio.sequencer.needs_ticks()
    }
}
