use crate::lyrics::{LyricLayout, LyricSynchronizer, Viewport};

/// Mirror of the lyrics scrollable, fed by its scroll callbacks.
///
/// Writes made by the synchronizer are queued as a request and turned into a
/// `scroll_to` task once the reducer step is over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(in crate::app) struct LyricsViewport {
    offset: f32,
    visible_height: f32,
    content_height: f32,
    requested: Option<f32>,
}

impl LyricsViewport {
    pub(in crate::app) fn observe(&mut self, offset: f32, visible_height: f32, content_height: f32) {
        let finite = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.visible_height = finite(visible_height);
        self.content_height = finite(content_height);
        self.offset = finite(offset).min(self.max_scroll_offset());
    }

    pub(in crate::app) fn set_extents(&mut self, visible_height: f32, content_height: f32) {
        self.observe(self.offset, visible_height, content_height);
    }

    pub(in crate::app) fn is_ready(&self) -> bool {
        self.visible_height > 0.0 && self.content_height > 0.0
    }

    pub(in crate::app) fn take_request(&mut self) -> Option<f32> {
        self.requested.take()
    }
}

impl Viewport for LyricsViewport {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
        self.requested = Some(self.offset);
    }

    fn content_extent(&self) -> f32 {
        self.content_height
    }

    fn visible_extent(&self) -> f32 {
        self.visible_height
    }
}

pub(in crate::app) struct LyricsState {
    pub(in crate::app) sync: LyricSynchronizer,
    pub(in crate::app) layout: LyricLayout,
    pub(in crate::app) viewport: LyricsViewport,
    pub(in crate::app) text_width: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_clamped_and_queued() {
        let mut viewport = LyricsViewport::default();
        assert!(!viewport.is_ready());

        viewport.observe(0.0, 100.0, 400.0);
        assert!(viewport.is_ready());
        viewport.set_scroll_offset(999.0);
        assert_eq!(viewport.scroll_offset(), 300.0);
        assert_eq!(viewport.take_request(), Some(300.0));
        assert_eq!(viewport.take_request(), None);
    }

    #[test]
    fn observed_offsets_do_not_queue_writes() {
        let mut viewport = LyricsViewport::default();
        viewport.observe(50.0, 100.0, 400.0);
        assert_eq!(viewport.scroll_offset(), 50.0);
        assert_eq!(viewport.take_request(), None);

        viewport.set_extents(100.0, 120.0);
        assert_eq!(viewport.scroll_offset(), 20.0);
    }
}
