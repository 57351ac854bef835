use super::super::state::{App, LyricsState, Route, SEEK_STEP};
use super::Effect;
use crate::autoplay::Player;
use crate::lyrics::{LineGeometry, Viewport};
use std::time::{Duration, Instant};
use tracing::{info, warn};

impl App {
    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let playing = self
            .audio
            .sequencer
            .toggle(now, &mut self.audio.playback);
        info!(playing, "Toggled playback");
        self.resync_lyrics(now, effects);
    }

    pub(super) fn handle_seek_to(&mut self, secs: f32, effects: &mut Vec<Effect>) {
        if !secs.is_finite() {
            return;
        }
        self.seek_playback(Duration::from_secs_f32(secs.max(0.0)), effects);
    }

    pub(super) fn handle_seek_forward(&mut self, effects: &mut Vec<Effect>) {
        let position = self.audio.playback.position(Instant::now());
        self.seek_playback(position + SEEK_STEP, effects);
    }

    pub(super) fn handle_seek_backward(&mut self, effects: &mut Vec<Effect>) {
        let position = self.audio.playback.position(Instant::now());
        self.seek_playback(position.saturating_sub(SEEK_STEP), effects);
    }

    fn seek_playback(&mut self, position: Duration, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        if let Err(err) = self.audio.playback.seek(position, now) {
            warn!("Seek failed: {err:#}");
            return;
        }
        let clock = self.audio.playback.position(now).as_secs_f64();
        let on_home = self.route == Route::Home;
        let LyricsState {
            sync,
            layout,
            viewport,
            ..
        } = &mut self.lyrics;
        let ready = on_home && viewport.is_ready() && !layout.is_empty();
        if ready {
            sync.on_seek(
                clock,
                now,
                Some(viewport as &mut dyn Viewport),
                Some(layout as &dyn LineGeometry),
            );
        } else {
            sync.on_seek(clock, now, None, None);
        }
        self.flush_lyrics_scroll(effects);
    }

    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.audio.sequencer.tick(now, &mut self.audio.playback);
        self.resync_lyrics(now, effects);
    }

    /// Feed the playback clock to the lyric synchronizer while audio runs,
    /// then advance any scroll animation.
    pub(super) fn resync_lyrics(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if !self.audio.playback.is_paused() {
            let clock = self.audio.playback.position(now).as_secs_f64();
            self.sync_lyrics_at(clock, now);
        }
        self.lyrics.sync.on_frame(now, &mut self.lyrics.viewport);
        self.flush_lyrics_scroll(effects);
    }

    /// Scroll steps wait while the lyrics are off screen.
    pub(super) fn sync_lyrics_at(&mut self, clock_secs: f64, now: Instant) -> Option<usize> {
        let on_home = self.route == Route::Home;
        let LyricsState {
            sync,
            layout,
            viewport,
            ..
        } = &mut self.lyrics;
        if on_home && viewport.is_ready() && !layout.is_empty() {
            sync.on_clock(
                clock_secs,
                now,
                Some(viewport as &mut dyn Viewport),
                Some(layout as &dyn LineGeometry),
            )
        } else {
            sync.on_clock(clock_secs, now, None, None)
        }
    }

    pub(super) fn flush_lyrics_scroll(&mut self, effects: &mut Vec<Effect>) {
        if let Some(offset) = self.lyrics.viewport.take_request() {
            effects.push(Effect::ScrollLyrics(offset));
        }
    }

    pub(in crate::app) fn playback_label(&self, now: Instant) -> String {
        let position = self.audio.playback.position(now);
        match self.audio.playback.duration() {
            Some(total) => format!("{} / {}", format_clock(position), format_clock(total)),
            None => format_clock(position),
        }
    }
}

fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
