use super::super::state::{App, Route};
use super::Effect;
use crate::autoplay::AutoplayPhase;
use crate::lyrics::Viewport;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_startup(&mut self, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        self.audio.sequencer.start(now, &mut self.audio.playback);
        if self.window_opened {
            // The window opened before the sequencer armed its visibility retry.
            self.audio
                .sequencer
                .on_visibility(true, now, &mut self.audio.playback);
        }
        self.resync_lyrics(now, effects);
    }

    pub(super) fn handle_navigate(&mut self, route: Route, effects: &mut Vec<Effect>) {
        if self.route == route {
            return;
        }
        info!(from = %self.route, to = %route, "Navigating");
        if self.route == Route::Home {
            // The scrollable leaves the tree; keep where the lyrics were headed.
            self.lyrics.sync.settle(&mut self.lyrics.viewport);
            self.lyrics.viewport.take_request();
        }
        self.route = route;
        match route {
            Route::Home => {
                // A fresh scrollable starts at the top; restore the tracked offset.
                let offset = self.lyrics.viewport.scroll_offset();
                if offset > 0.0 {
                    effects.push(Effect::ScrollLyrics(offset));
                }
            }
            Route::Countdown => {
                self.countdown.now = chrono::Utc::now();
            }
            Route::Gallery => {}
        }
    }

    /// Any user gesture may unlock playback that autoplay rules blocked.
    pub(super) fn note_interaction(&mut self, effects: &mut Vec<Effect>) {
        if !matches!(self.audio.sequencer.phase(), AutoplayPhase::Armed(_)) {
            return;
        }
        debug!("User interaction");
        let now = Instant::now();
        self.audio
            .sequencer
            .on_interaction(now, &mut self.audio.playback);
        self.resync_lyrics(now, effects);
    }
}
