use super::super::state::App;
use tracing::trace;

impl App {
    pub(super) fn handle_lyrics_scrolled(
        &mut self,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    ) {
        self.lyrics
            .viewport
            .observe(offset_y, viewport_height, content_height);

        if viewport_width.is_finite() && viewport_width > 0.0 {
            let text_width = viewport_width - Self::lyrics_chrome_width();
            if (text_width - self.lyrics.text_width).abs() >= 1.0 {
                self.relayout_lyrics(text_width);
                self.lyrics
                    .viewport
                    .observe(offset_y, viewport_height, content_height);
            }
        }
        trace!(
            offset_y,
            viewport_height, content_height, "Lyrics viewport changed"
        );
    }
}
