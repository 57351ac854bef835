use crate::lyrics::TagPolicy;

pub(crate) fn default_font_size() -> u32 {
    20
}

pub(crate) fn default_line_spacing() -> f32 {
    1.5
}

pub(crate) fn default_window_width() -> f32 {
    1024.0
}

pub(crate) fn default_window_height() -> f32 {
    768.0
}

pub(crate) fn default_day_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.85,
        g: 0.35,
        b: 0.45,
        a: 1.0,
    }
}

pub(crate) fn default_night_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.95,
        g: 0.65,
        b: 0.72,
        a: 1.0,
    }
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_lrc_path() -> String {
    "assets/song.lrc".to_string()
}

pub(crate) fn default_lyrics_offset_secs() -> f64 {
    0.0
}

pub(crate) fn default_lyrics_lead_in_secs() -> f64 {
    -0.1
}

pub(crate) fn default_tag_policy() -> TagPolicy {
    TagPolicy::EveryTag
}

pub(crate) fn default_scroll_margin() -> f32 {
    12.0
}

pub(crate) fn default_scroll_ms() -> u64 {
    140
}

pub(crate) fn default_min_scroll_step() -> f32 {
    8.0
}

pub(crate) fn default_lyric_row_padding() -> f32 {
    4.0
}

pub(crate) fn default_lyrics_view_height() -> f32 {
    288.0
}

pub(crate) fn default_track_path() -> String {
    "assets/song.mp3".to_string()
}

pub(crate) fn default_volume() -> f32 {
    1.0
}

pub(crate) fn default_fade_in_ms() -> u64 {
    2000
}

pub(crate) fn default_fade_steps() -> u32 {
    20
}

pub(crate) fn default_unmute_delay_ms() -> u64 {
    350
}

pub(crate) fn default_photos_dir() -> String {
    "photos".to_string()
}
