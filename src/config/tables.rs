use super::defaults;
use super::models::{AppConfig, HighlightColor, LogLevel, ThemeMode};
use crate::countdown::Milestone;
use crate::lyrics::TagPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    lyrics: LyricsConfig,
    #[serde(default)]
    audio: AudioConfig,
    #[serde(default)]
    gallery: GalleryConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    milestones: Vec<Milestone>,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            day_highlight: tables.appearance.day_highlight,
            night_highlight: tables.appearance.night_highlight,
            log_level: tables.logging.log_level,
            lrc_path: tables.lyrics.lrc_path,
            lyrics_offset_secs: tables.lyrics.offset_secs,
            lyrics_lead_in_secs: tables.lyrics.lead_in_secs,
            tag_policy: tables.lyrics.tag_policy,
            scroll_margin_top: tables.lyrics.margin_top,
            scroll_margin_bottom: tables.lyrics.margin_bottom,
            scroll_ms: tables.lyrics.scroll_ms,
            min_scroll_step: tables.lyrics.min_scroll_step,
            lyric_row_padding: tables.lyrics.row_padding,
            lyrics_view_height: tables.lyrics.view_height,
            track_path: tables.audio.track_path,
            track_label: tables.audio.label,
            volume: tables.audio.volume,
            fade_in_ms: tables.audio.fade_in_ms,
            fade_steps: tables.audio.fade_steps,
            unmute_delay_ms: tables.audio.unmute_delay_ms,
            photos_dir: tables.gallery.photos_dir,
            milestones: tables.milestones,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                window_width: config.window_width,
                window_height: config.window_height,
                day_highlight: config.day_highlight,
                night_highlight: config.night_highlight,
            },
            lyrics: LyricsConfig {
                lrc_path: config.lrc_path.clone(),
                offset_secs: config.lyrics_offset_secs,
                lead_in_secs: config.lyrics_lead_in_secs,
                tag_policy: config.tag_policy,
                margin_top: config.scroll_margin_top,
                margin_bottom: config.scroll_margin_bottom,
                scroll_ms: config.scroll_ms,
                min_scroll_step: config.min_scroll_step,
                row_padding: config.lyric_row_padding,
                view_height: config.lyrics_view_height,
            },
            audio: AudioConfig {
                track_path: config.track_path.clone(),
                label: config.track_label.clone(),
                volume: config.volume,
                fade_in_ms: config.fade_in_ms,
                fade_steps: config.fade_steps,
                unmute_delay_ms: config.unmute_delay_ms,
            },
            gallery: GalleryConfig {
                photos_dir: config.photos_dir.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            milestones: config.milestones.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_day_highlight")]
    day_highlight: HighlightColor,
    #[serde(default = "defaults::default_night_highlight")]
    night_highlight: HighlightColor,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            day_highlight: defaults::default_day_highlight(),
            night_highlight: defaults::default_night_highlight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LyricsConfig {
    #[serde(default = "defaults::default_lrc_path")]
    lrc_path: String,
    #[serde(default = "defaults::default_lyrics_offset_secs")]
    offset_secs: f64,
    #[serde(default = "defaults::default_lyrics_lead_in_secs")]
    lead_in_secs: f64,
    #[serde(default = "defaults::default_tag_policy")]
    tag_policy: TagPolicy,
    #[serde(default = "defaults::default_scroll_margin")]
    margin_top: f32,
    #[serde(default = "defaults::default_scroll_margin")]
    margin_bottom: f32,
    #[serde(default = "defaults::default_scroll_ms")]
    scroll_ms: u64,
    #[serde(default = "defaults::default_min_scroll_step")]
    min_scroll_step: f32,
    #[serde(default = "defaults::default_lyric_row_padding")]
    row_padding: f32,
    #[serde(default = "defaults::default_lyrics_view_height")]
    view_height: f32,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        LyricsConfig {
            lrc_path: defaults::default_lrc_path(),
            offset_secs: defaults::default_lyrics_offset_secs(),
            lead_in_secs: defaults::default_lyrics_lead_in_secs(),
            tag_policy: defaults::default_tag_policy(),
            margin_top: defaults::default_scroll_margin(),
            margin_bottom: defaults::default_scroll_margin(),
            scroll_ms: defaults::default_scroll_ms(),
            min_scroll_step: defaults::default_min_scroll_step(),
            row_padding: defaults::default_lyric_row_padding(),
            view_height: defaults::default_lyrics_view_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AudioConfig {
    #[serde(default = "defaults::default_track_path")]
    track_path: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default = "defaults::default_volume")]
    volume: f32,
    #[serde(default = "defaults::default_fade_in_ms")]
    fade_in_ms: u64,
    #[serde(default = "defaults::default_fade_steps")]
    fade_steps: u32,
    #[serde(default = "defaults::default_unmute_delay_ms")]
    unmute_delay_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            track_path: defaults::default_track_path(),
            label: None,
            volume: defaults::default_volume(),
            fade_in_ms: defaults::default_fade_in_ms(),
            fade_steps: defaults::default_fade_steps(),
            unmute_delay_ms: defaults::default_unmute_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct GalleryConfig {
    #[serde(default = "defaults::default_photos_dir")]
    photos_dir: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            photos_dir: defaults::default_photos_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
