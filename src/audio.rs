//! Track playback through `rodio`.
//!
//! The output device is opened lazily on the first play request, so a
//! machine without audio surfaces as a rejected play attempt rather than a
//! startup failure.

use crate::autoplay::Player;
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Elapsed playback time, advanced by wall-clock while running.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackClock {
    base: Duration,
    running_since: Option<Instant>,
}

impl PlaybackClock {
    pub fn start(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.base += now.saturating_duration_since(since);
        }
    }

    pub fn seek(&mut self, position: Duration, now: Instant) {
        self.base = position;
        if self.running_since.is_some() {
            self.running_since = Some(now);
        }
    }

    pub fn reset(&mut self) {
        self.base = Duration::ZERO;
        self.running_since = None;
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn position(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.base + now.saturating_duration_since(since),
            None => self.base,
        }
    }
}

struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
}

pub struct AudioPlayback {
    path: PathBuf,
    output: Option<AudioOutput>,
    clock: PlaybackClock,
    volume: f32,
    muted: bool,
    duration: Option<Duration>,
}

impl AudioPlayback {
    pub fn new(path: PathBuf) -> Self {
        let duration = track_duration(&path);
        info!(
            path = %path.display(),
            duration_secs = duration.map(|d| d.as_secs_f32()),
            "Prepared audio track"
        );
        Self {
            path,
            output: None,
            clock: PlaybackClock::default(),
            volume: 1.0,
            muted: false,
            duration,
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn position(&self, now: Instant) -> Duration {
        let position = self.clock.position(now);
        match self.duration {
            Some(total) => position.min(total),
            None => position,
        }
    }

    /// Whether the queued track has played out.
    pub fn is_finished(&self) -> bool {
        self.output
            .as_ref()
            .map(|output| output.sink.empty())
            .unwrap_or(false)
    }

    /// Jump to `position`, keeping the current play/pause state.
    pub fn seek(&mut self, position: Duration, now: Instant) -> Result<()> {
        let position = match self.duration {
            Some(total) => position.min(total),
            None => position,
        };
        self.clock.seek(position, now);
        let Some(output) = self.output.as_mut() else {
            return Ok(());
        };
        match output.sink.try_seek(position) {
            Ok(()) => {
                debug!(position_secs = position.as_secs_f32(), "Seeked audio track");
                return Ok(());
            }
            Err(err) => debug!("Sink seek unsupported, re-decoding: {err:?}"),
        }
        let was_paused = output.sink.is_paused();
        let sink = Sink::try_new(&output.handle).context("Creating sink")?;
        sink.append(open_decoder(&self.path)?.skip_duration(position));
        if was_paused {
            sink.pause();
        }
        output.sink.stop();
        output.sink = sink;
        self.apply_volume();
        debug!(position_secs = position.as_secs_f32(), "Seeked audio track");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(output) = self.output.take() {
            output.sink.stop();
        }
        self.clock.reset();
    }

    fn open_output(&self) -> Result<AudioOutput> {
        let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        sink.pause();
        let position = self.clock.position(Instant::now());
        sink.append(open_decoder(&self.path)?.skip_duration(position));
        Ok(AudioOutput {
            _stream: stream,
            handle,
            sink,
        })
    }

    fn apply_volume(&self) {
        if let Some(output) = &self.output {
            output
                .sink
                .set_volume(if self.muted { 0.0 } else { self.volume });
        }
    }
}

impl Player for AudioPlayback {
    fn try_play(&mut self) -> Result<()> {
        if self.is_finished() {
            debug!("Track finished; restarting from the beginning");
            self.stop();
        }
        if self.output.is_none() {
            self.output = Some(self.open_output()?);
        }
        self.apply_volume();
        if let Some(output) = &self.output {
            output.sink.play();
        }
        self.clock.start(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(output) = &self.output {
            output.sink.pause();
        }
        self.clock.pause(Instant::now());
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    fn is_paused(&self) -> bool {
        match &self.output {
            Some(output) => output.sink.is_paused() || output.sink.empty(),
            None => true,
        }
    }
}

impl Drop for AudioPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Opening {}", path.display()))?;
    Decoder::new(BufReader::new(file)).with_context(|| format!("Decoding {}", path.display()))
}

fn track_duration(path: &Path) -> Option<Duration> {
    open_decoder(path).ok().and_then(|d| d.total_duration())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: f32) -> Duration {
        Duration::from_secs_f32(n)
    }

    #[test]
    fn clock_accumulates_only_while_running() {
        let t0 = Instant::now();
        let mut clock = PlaybackClock::default();
        assert_eq!(clock.position(t0 + secs(5.0)), Duration::ZERO);

        clock.start(t0);
        assert_eq!(clock.position(t0 + secs(2.0)), secs(2.0));

        clock.pause(t0 + secs(2.0));
        assert!(!clock.is_running());
        assert_eq!(clock.position(t0 + secs(10.0)), secs(2.0));

        clock.start(t0 + secs(10.0));
        assert_eq!(clock.position(t0 + secs(11.0)), secs(3.0));
    }

    #[test]
    fn clock_seek_keeps_running_state() {
        let t0 = Instant::now();
        let mut clock = PlaybackClock::default();
        clock.start(t0);
        clock.seek(secs(30.0), t0 + secs(1.0));
        assert_eq!(clock.position(t0 + secs(2.0)), secs(31.0));

        clock.pause(t0 + secs(2.0));
        clock.seek(secs(5.0), t0 + secs(3.0));
        assert_eq!(clock.position(t0 + secs(9.0)), secs(5.0));
    }

    #[test]
    fn unopened_track_reports_paused() {
        let dir = tempfile::tempdir().expect("temp dir");
        let playback = AudioPlayback::new(dir.path().join("missing.mp3"));
        assert!(playback.is_paused());
        assert!(!playback.is_finished());
        assert_eq!(playback.duration(), None);
        assert_eq!(playback.position(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn seek_without_output_moves_the_clock() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut playback = AudioPlayback::new(dir.path().join("missing.mp3"));
        let now = Instant::now();
        playback.seek(secs(42.0), now).expect("seek");
        assert_eq!(playback.position(now + secs(3.0)), secs(42.0));
        assert!(playback.is_paused());
    }
}
