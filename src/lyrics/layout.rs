use super::parser::LyricLine;
use super::sync::{LineBounds, LineGeometry};

/// Inputs for estimating how tall each lyric row renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub font_size: f32,
    pub line_spacing: f32,
    /// Vertical padding applied above and below every row.
    pub row_padding: f32,
    pub available_width: f32,
}

impl LayoutMetrics {
    fn glyph_width(&self) -> f32 {
        (self.font_size * 0.55).max(1.0)
    }

    fn text_line_height(&self) -> f32 {
        (self.font_size * self.line_spacing.max(0.8)).max(1.0)
    }
}

/// Estimated geometry of every lyric row, stacked from the top.
///
/// The view renders rows at exactly these heights, so the estimate doubles
/// as the real layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricLayout {
    rows: Vec<LineBounds>,
}

impl LyricLayout {
    pub fn estimate(lines: &[LyricLine], metrics: &LayoutMetrics) -> Self {
        let mut top = 0.0f32;
        let rows = lines
            .iter()
            .map(|line| {
                let height = wrapped_rows(&line.text, metrics) as f32 * metrics.text_line_height()
                    + metrics.row_padding * 2.0;
                let bounds = LineBounds { top, height };
                top += height;
                bounds
            })
            .collect();
        Self { rows }
    }

    pub fn row_height(&self, idx: usize) -> Option<f32> {
        self.rows.get(idx).map(|row| row.height)
    }

    pub fn content_height(&self) -> f32 {
        self.rows.last().map(LineBounds::bottom).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl LineGeometry for LyricLayout {
    fn line_bounds(&self, idx: usize) -> Option<LineBounds> {
        self.rows.get(idx).copied()
    }
}

fn wrapped_rows(text: &str, metrics: &LayoutMetrics) -> usize {
    if metrics.available_width <= f32::EPSILON {
        return 1;
    }
    let max_units = (metrics.available_width / metrics.glyph_width()).max(8.0);

    let mut rows = 1usize;
    let mut units = 0.0f32;
    for ch in text.chars() {
        let width = if ch.is_whitespace() {
            0.45
        } else if ch.is_ascii_punctuation() {
            0.55
        } else if ch.is_ascii() {
            1.0
        } else {
            1.8
        };
        if units + width > max_units {
            rows += 1;
            units = width;
        } else {
            units += width;
        }
    }
    rows
}
