//! Maps playback time to the active lyric line and keeps that line in view.
//!
//! The synchronizer owns no widgets. Callers hand it a [`Viewport`] and a
//! [`LineGeometry`] on every update; either may be missing while the view is
//! still being laid out, in which case the scroll step is retried on the next
//! clock update.

use super::animation::ScrollAnimation;
use super::parser::LyricLine;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Pinned scrolling releases once the active line is more than this many
/// lines short of the last one.
pub const UNPIN_LINE_DISTANCE: usize = 2;

/// Targets within this distance of the maximum offset pin to the bottom.
const PIN_TOLERANCE: f32 = 1.0;

/// Scrollable area the lyrics live in.
pub trait Viewport {
    fn scroll_offset(&self) -> f32;
    fn set_scroll_offset(&mut self, offset: f32);
    fn content_extent(&self) -> f32;
    fn visible_extent(&self) -> f32;

    fn max_scroll_offset(&self) -> f32 {
        (self.content_extent() - self.visible_extent()).max(0.0)
    }
}

/// Vertical placement of one rendered line, relative to the content origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    pub top: f32,
    pub height: f32,
}

impl LineBounds {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Geometry of rendered lines; `None` means the line is not laid out yet.
pub trait LineGeometry {
    fn line_bounds(&self, idx: usize) -> Option<LineBounds>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSettings {
    /// Shifts the lyric timeline; added to the clock.
    pub offset_secs: f64,
    /// Subtracted from the clock; negative values activate lines early.
    pub lead_in_secs: f64,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub scroll_duration: Duration,
    /// Lower bound for a single scroll step.
    pub min_step: f32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            offset_secs: 0.0,
            lead_in_secs: -0.1,
            margin_top: 12.0,
            margin_bottom: 12.0,
            scroll_duration: Duration::from_millis(140),
            min_step: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Tracking,
    PinnedBottom,
}

/// Greatest index whose time is `<= t`, or `None` when `t` precedes every
/// line. `lines` must be sorted ascending by time.
pub fn active_index_at(lines: &[LyricLine], t: f64) -> Option<usize> {
    lines.partition_point(|line| line.time <= t).checked_sub(1)
}

pub struct LyricSynchronizer {
    lines: Vec<LyricLine>,
    settings: SyncSettings,
    state: SyncState,
    active: Option<usize>,
    last_scrolled: Option<usize>,
    scroll_pending: bool,
    animation: Option<ScrollAnimation>,
    next_animation_id: u64,
}

impl LyricSynchronizer {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            lines: Vec::new(),
            settings,
            state: SyncState::Idle,
            active: None,
            last_scrolled: None,
            scroll_pending: false,
            animation: None,
            next_animation_id: 1,
        }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    /// Replace the lyric source and return to `Idle` with the view at the top.
    pub fn load(&mut self, lines: Vec<LyricLine>, viewport: Option<&mut dyn Viewport>) {
        debug!(lines = lines.len(), "Loading lyric source");
        self.lines = lines;
        self.state = SyncState::Idle;
        self.active = None;
        self.last_scrolled = None;
        self.scroll_pending = false;
        self.cancel_animation();
        if let Some(viewport) = viewport {
            viewport.set_scroll_offset(0.0);
        }
    }

    /// Release per-view resources. The loaded lines are kept.
    pub fn teardown(&mut self) {
        self.cancel_animation();
        self.state = SyncState::Idle;
        self.active = None;
        self.last_scrolled = None;
        self.scroll_pending = false;
    }

    pub fn adjusted_time(&self, clock_secs: f64) -> f64 {
        clock_secs + self.settings.offset_secs - self.settings.lead_in_secs
    }

    /// Feed a clock reading; returns the active line after the update.
    pub fn on_clock(
        &mut self,
        clock_secs: f64,
        now: Instant,
        viewport: Option<&mut dyn Viewport>,
        geometry: Option<&dyn LineGeometry>,
    ) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        if self.state == SyncState::Idle {
            debug!("Lyric sync started tracking");
            self.state = SyncState::Tracking;
        }

        let idx = active_index_at(&self.lines, self.adjusted_time(clock_secs));

        if self.state == SyncState::PinnedBottom && self.far_from_end(idx) {
            debug!(?idx, "Active line moved away from the end; unpinning");
            self.state = SyncState::Tracking;
        }

        if idx != self.active {
            trace!(from = ?self.active, to = ?idx, clock_secs, "Active lyric line changed");
            self.active = idx;
            self.scroll_pending = idx.is_some();
        }

        if self.scroll_pending {
            if let Some(active) = self.active {
                self.scroll_pending = !self.update_scroll(active, now, viewport, geometry);
            }
        }

        self.active
    }

    /// A seek is an ordinary clock update that may move backwards.
    pub fn on_seek(
        &mut self,
        clock_secs: f64,
        now: Instant,
        viewport: Option<&mut dyn Viewport>,
        geometry: Option<&dyn LineGeometry>,
    ) -> Option<usize> {
        debug!(clock_secs, "Playback seeked");
        self.on_clock(clock_secs, now, viewport, geometry)
    }

    /// Advance the in-flight animation; returns whether one is still running.
    pub fn on_frame(&mut self, now: Instant, viewport: &mut dyn Viewport) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };
        let (offset, done) = animation.sample(now);
        viewport.set_scroll_offset(offset);
        if done {
            self.animation = None;
        }
        self.animation.is_some()
    }

    /// Stop any in-flight animation and jump straight to where it was headed.
    pub fn settle(&mut self, viewport: &mut dyn Viewport) {
        if let Some(animation) = self.animation.take() {
            trace!(id = animation.id(), to = animation.target(), "Settled lyric scroll animation");
            viewport.set_scroll_offset(animation.target());
        }
    }

    fn far_from_end(&self, idx: Option<usize>) -> bool {
        let last = self.lines.len().saturating_sub(1);
        let behind = match idx {
            Some(i) => last.saturating_sub(i),
            None => self.lines.len(),
        };
        behind > UNPIN_LINE_DISTANCE
    }

    /// Returns `false` when layout was not ready and the step must be retried.
    fn update_scroll(
        &mut self,
        active: usize,
        now: Instant,
        viewport: Option<&mut dyn Viewport>,
        geometry: Option<&dyn LineGeometry>,
    ) -> bool {
        let (Some(viewport), Some(geometry)) = (viewport, geometry) else {
            trace!(active, "Lyric viewport not ready; deferring scroll");
            return false;
        };
        let Some(bounds) = geometry.line_bounds(active) else {
            trace!(active, "Active line not laid out yet; deferring scroll");
            return false;
        };

        let max_offset = viewport.max_scroll_offset();

        if self.state == SyncState::PinnedBottom {
            self.cancel_animation();
            if viewport.scroll_offset() != max_offset {
                viewport.set_scroll_offset(max_offset);
            }
            self.last_scrolled = Some(active);
            return true;
        }

        if self.last_scrolled.is_none() && active == 0 {
            self.cancel_animation();
            viewport.set_scroll_offset(0.0);
            self.last_scrolled = Some(active);
            return true;
        }

        let view_top = viewport.scroll_offset();
        let view_bottom = view_top + viewport.visible_extent();
        let step = bounds.height.round().max(self.settings.min_step);

        let next_top = if bounds.top < view_top + self.settings.margin_top {
            (view_top - step).max(0.0)
        } else if bounds.bottom() > view_bottom - self.settings.margin_bottom {
            (view_top + step).min(max_offset)
        } else {
            view_top
        };

        if next_top != view_top {
            if next_top >= max_offset - PIN_TOLERANCE {
                debug!(active, max_offset, "Lyric scroll reached the end; pinning");
                self.state = SyncState::PinnedBottom;
                self.cancel_animation();
                viewport.set_scroll_offset(max_offset);
            } else {
                self.start_animation(view_top, next_top, now);
            }
        }

        self.last_scrolled = Some(active);
        true
    }

    fn start_animation(&mut self, from: f32, to: f32, now: Instant) {
        self.cancel_animation();
        if from == to {
            return;
        }
        let id = self.next_animation_id;
        self.next_animation_id = self.next_animation_id.wrapping_add(1);
        trace!(id, from, to, "Starting lyric scroll animation");
        self.animation = Some(ScrollAnimation::new(
            id,
            from,
            to,
            now,
            self.settings.scroll_duration,
        ));
    }

    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            trace!(id = animation.id(), "Cancelled lyric scroll animation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::parser::{TagPolicy, parse_lrc};

    const LINE_HEIGHT: f32 = 24.0;

    struct FakeViewport {
        offset: f32,
        content: f32,
        visible: f32,
    }

    impl Viewport for FakeViewport {
        fn scroll_offset(&self) -> f32 {
            self.offset
        }
        fn set_scroll_offset(&mut self, offset: f32) {
            self.offset = offset;
        }
        fn content_extent(&self) -> f32 {
            self.content
        }
        fn visible_extent(&self) -> f32 {
            self.visible
        }
    }

    struct UniformRows {
        count: usize,
    }

    impl LineGeometry for UniformRows {
        fn line_bounds(&self, idx: usize) -> Option<LineBounds> {
            (idx < self.count).then(|| LineBounds {
                top: idx as f32 * LINE_HEIGHT,
                height: LINE_HEIGHT,
            })
        }
    }

    fn lines_at(times: &[f64]) -> Vec<LyricLine> {
        times
            .iter()
            .enumerate()
            .map(|(i, &time)| LyricLine {
                time,
                text: format!("line {i}"),
            })
            .collect()
    }

    fn exact_settings() -> SyncSettings {
        SyncSettings {
            lead_in_secs: 0.0,
            ..SyncSettings::default()
        }
    }

    /// Twenty one-second lines, five visible rows, max offset 360.
    fn twenty_lines() -> (LyricSynchronizer, FakeViewport, UniformRows) {
        let mut sync = LyricSynchronizer::new(exact_settings());
        let times: Vec<f64> = (0..20).map(f64::from).collect();
        sync.load(lines_at(&times), None);
        let viewport = FakeViewport {
            offset: 0.0,
            content: 20.0 * LINE_HEIGHT,
            visible: 5.0 * LINE_HEIGHT,
        };
        (sync, viewport, UniformRows { count: 20 })
    }

    fn tick(
        sync: &mut LyricSynchronizer,
        clock: f64,
        now: Instant,
        viewport: &mut FakeViewport,
        rows: &UniformRows,
    ) -> Option<usize> {
        sync.on_clock(clock, now, Some(viewport), Some(rows))
    }

    #[test]
    fn resolves_active_index_at_boundaries() {
        let lines = lines_at(&[0.0, 2.5, 5.0]);
        assert_eq!(active_index_at(&lines, 1.0), Some(0));
        assert_eq!(active_index_at(&lines, 2.5), Some(1));
        assert_eq!(active_index_at(&lines, 4.999), Some(1));
        assert_eq!(active_index_at(&lines, 5.0), Some(2));
        assert_eq!(active_index_at(&lines, -1.0), None);
        assert_eq!(active_index_at(&[], 3.0), None);
    }

    #[test]
    fn active_index_never_decreases_as_time_advances() {
        let lines = lines_at(&[0.5, 0.5, 1.25, 3.0, 3.0, 7.75, 9.0]);
        let mut previous: Option<usize> = None;
        for step in -20..=200 {
            let idx = active_index_at(&lines, f64::from(step) * 0.05);
            assert!(idx >= previous, "index regressed at step {step}");
            previous = idx;
        }
        assert_eq!(previous, Some(6));
    }

    #[test]
    fn parsed_lyrics_follow_the_clock() {
        let lines = parse_lrc(
            "[00:01.00]Hello\n[00:03.50]World\n[bad]Ignored",
            TagPolicy::default(),
        );
        let mut sync = LyricSynchronizer::new(exact_settings());
        sync.load(lines, None);
        let now = Instant::now();
        assert_eq!(sync.on_clock(2.0, now, None, None), Some(0));
        assert_eq!(sync.on_clock(4.0, now, None, None), Some(1));
    }

    #[test]
    fn offset_and_lead_in_shift_the_timeline() {
        let mut sync = LyricSynchronizer::new(SyncSettings {
            offset_secs: 0.5,
            lead_in_secs: -0.25,
            ..SyncSettings::default()
        });
        sync.load(lines_at(&[0.0, 2.0]), None);
        assert_eq!(sync.adjusted_time(1.0), 1.75);
        assert_eq!(sync.on_clock(1.25, Instant::now(), None, None), Some(1));
    }

    #[test]
    fn empty_lyrics_stay_idle() {
        let mut sync = LyricSynchronizer::new(SyncSettings::default());
        assert_eq!(sync.on_clock(12.0, Instant::now(), None, None), None);
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn first_clock_update_starts_tracking() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        assert_eq!(sync.state(), SyncState::Idle);
        assert_eq!(
            tick(&mut sync, -3.0, Instant::now(), &mut viewport, &rows),
            None
        );
        assert_eq!(sync.state(), SyncState::Tracking);
    }

    #[test]
    fn first_activation_snaps_to_top() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        viewport.offset = 50.0;
        tick(&mut sync, 0.2, Instant::now(), &mut viewport, &rows);
        assert_eq!(viewport.offset, 0.0);
        assert!(!sync.is_animating());
    }

    #[test]
    fn line_inside_margin_band_does_not_scroll() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 3.0, now, &mut viewport, &rows);
        assert_eq!(viewport.offset, 0.0);
        assert!(!sync.is_animating());
    }

    #[test]
    fn line_below_band_scrolls_forward_by_one_line() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 4.0, now, &mut viewport, &rows);

        let animation = sync.animation().expect("scroll animation started");
        assert_eq!(animation.target(), LINE_HEIGHT);

        assert!(sync.on_frame(now + Duration::from_millis(70), &mut viewport));
        assert!(viewport.offset > 0.0 && viewport.offset < LINE_HEIGHT);
        assert!(!sync.on_frame(now + Duration::from_millis(200), &mut viewport));
        assert_eq!(viewport.offset, LINE_HEIGHT);
        assert!(!sync.is_animating());
    }

    #[test]
    fn line_above_band_scrolls_backward_by_one_line() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        viewport.offset = 240.0;
        tick(&mut sync, 10.0, now, &mut viewport, &rows);
        let animation = sync.animation().expect("backward animation");
        assert_eq!(animation.target(), 216.0);
    }

    #[test]
    fn new_animation_replaces_the_one_in_flight() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 4.0, now, &mut viewport, &rows);
        let first_id = sync.animation().expect("first animation").id();

        let later = now + Duration::from_millis(30);
        sync.on_frame(later, &mut viewport);
        tick(&mut sync, 5.0, later, &mut viewport, &rows);

        let second = sync.animation().expect("replacement animation");
        assert_ne!(second.id(), first_id);
        assert_eq!(second.target(), viewport.offset + LINE_HEIGHT);

        // Only the replacement is driven to completion.
        assert!(!sync.on_frame(later + Duration::from_millis(500), &mut viewport));
        assert!(sync.animation().is_none());
    }

    #[test]
    fn reaching_the_end_pins_without_animating() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        viewport.offset = 336.0;
        tick(&mut sync, 19.0, now, &mut viewport, &rows);
        assert_eq!(sync.state(), SyncState::PinnedBottom);
        assert_eq!(viewport.offset, 360.0);
        assert!(!sync.is_animating());
    }

    #[test]
    fn small_backward_seek_stays_pinned() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        viewport.offset = 336.0;
        tick(&mut sync, 19.0, now, &mut viewport, &rows);

        viewport.offset = 300.0;
        sync.on_seek(17.0, now, Some(&mut viewport), Some(&rows));
        assert_eq!(sync.state(), SyncState::PinnedBottom);
        assert_eq!(viewport.offset, 360.0);
    }

    #[test]
    fn large_backward_seek_unpins() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        viewport.offset = 336.0;
        tick(&mut sync, 19.0, now, &mut viewport, &rows);
        assert_eq!(sync.state(), SyncState::PinnedBottom);

        sync.on_seek(15.0, now, Some(&mut viewport), Some(&rows));
        assert_eq!(sync.state(), SyncState::Tracking);
        assert_eq!(sync.active_index(), Some(15));
    }

    #[test]
    fn missing_layout_defers_scroll_until_next_update() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);

        assert_eq!(sync.on_clock(4.0, now, Some(&mut viewport), None), Some(4));
        assert!(!sync.is_animating());

        tick(&mut sync, 4.1, now, &mut viewport, &rows);
        assert_eq!(
            sync.animation().expect("deferred scroll ran").target(),
            LINE_HEIGHT
        );
    }

    #[test]
    fn loading_new_lyrics_resets_everything() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 4.0, now, &mut viewport, &rows);
        sync.on_frame(now + Duration::from_millis(50), &mut viewport);
        assert!(sync.is_animating());

        sync.load(lines_at(&[1.0, 2.0]), Some(&mut viewport));
        assert_eq!(sync.state(), SyncState::Idle);
        assert_eq!(sync.active_index(), None);
        assert!(!sync.is_animating());
        assert_eq!(viewport.offset, 0.0);
    }

    #[test]
    fn teardown_cancels_animation() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 4.0, now, &mut viewport, &rows);
        sync.teardown();
        assert!(!sync.is_animating());
        assert!(!sync.on_frame(now + Duration::from_millis(10), &mut viewport));
        assert_eq!(sync.lines().len(), 20);
    }

    #[test]
    fn settle_jumps_to_the_animation_target() {
        let (mut sync, mut viewport, rows) = twenty_lines();
        let now = Instant::now();
        tick(&mut sync, 0.0, now, &mut viewport, &rows);
        tick(&mut sync, 4.0, now, &mut viewport, &rows);
        assert!(sync.is_animating());

        sync.settle(&mut viewport);
        assert!(!sync.is_animating());
        assert_eq!(viewport.offset, LINE_HEIGHT);
        assert_eq!(sync.active_index(), Some(4));

        // Nothing left to settle.
        viewport.offset = 100.0;
        sync.settle(&mut viewport);
        assert_eq!(viewport.offset, 100.0);
    }
}
