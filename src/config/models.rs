use crate::autoplay::AutoplaySettings;
use crate::countdown::Milestone;
use crate::lyrics::{LayoutMetrics, SyncSettings, TagPolicy};
use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration, flattened from the sectioned TOML file.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_day_highlight")]
    pub day_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_night_highlight")]
    pub night_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_lrc_path")]
    pub lrc_path: String,
    #[serde(default = "crate::config::defaults::default_lyrics_offset_secs")]
    pub lyrics_offset_secs: f64,
    #[serde(default = "crate::config::defaults::default_lyrics_lead_in_secs")]
    pub lyrics_lead_in_secs: f64,
    #[serde(default = "crate::config::defaults::default_tag_policy")]
    pub tag_policy: TagPolicy,
    #[serde(default = "crate::config::defaults::default_scroll_margin")]
    pub scroll_margin_top: f32,
    #[serde(default = "crate::config::defaults::default_scroll_margin")]
    pub scroll_margin_bottom: f32,
    #[serde(default = "crate::config::defaults::default_scroll_ms")]
    pub scroll_ms: u64,
    #[serde(default = "crate::config::defaults::default_min_scroll_step")]
    pub min_scroll_step: f32,
    #[serde(default = "crate::config::defaults::default_lyric_row_padding")]
    pub lyric_row_padding: f32,
    #[serde(default = "crate::config::defaults::default_lyrics_view_height")]
    pub lyrics_view_height: f32,
    #[serde(default = "crate::config::defaults::default_track_path")]
    pub track_path: String,
    #[serde(default)]
    pub track_label: Option<String>,
    #[serde(default = "crate::config::defaults::default_volume")]
    pub volume: f32,
    #[serde(default = "crate::config::defaults::default_fade_in_ms")]
    pub fade_in_ms: u64,
    #[serde(default = "crate::config::defaults::default_fade_steps")]
    pub fade_steps: u32,
    #[serde(default = "crate::config::defaults::default_unmute_delay_ms")]
    pub unmute_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_photos_dir")]
    pub photos_dir: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Day,
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            day_highlight: crate::config::defaults::default_day_highlight(),
            night_highlight: crate::config::defaults::default_night_highlight(),
            log_level: crate::config::defaults::default_log_level(),
            lrc_path: crate::config::defaults::default_lrc_path(),
            lyrics_offset_secs: crate::config::defaults::default_lyrics_offset_secs(),
            lyrics_lead_in_secs: crate::config::defaults::default_lyrics_lead_in_secs(),
            tag_policy: crate::config::defaults::default_tag_policy(),
            scroll_margin_top: crate::config::defaults::default_scroll_margin(),
            scroll_margin_bottom: crate::config::defaults::default_scroll_margin(),
            scroll_ms: crate::config::defaults::default_scroll_ms(),
            min_scroll_step: crate::config::defaults::default_min_scroll_step(),
            lyric_row_padding: crate::config::defaults::default_lyric_row_padding(),
            lyrics_view_height: crate::config::defaults::default_lyrics_view_height(),
            track_path: crate::config::defaults::default_track_path(),
            track_label: None,
            volume: crate::config::defaults::default_volume(),
            fade_in_ms: crate::config::defaults::default_fade_in_ms(),
            fade_steps: crate::config::defaults::default_fade_steps(),
            unmute_delay_ms: crate::config::defaults::default_unmute_delay_ms(),
            photos_dir: crate::config::defaults::default_photos_dir(),
            milestones: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            offset_secs: self.lyrics_offset_secs,
            lead_in_secs: self.lyrics_lead_in_secs,
            margin_top: self.scroll_margin_top,
            margin_bottom: self.scroll_margin_bottom,
            scroll_duration: Duration::from_millis(self.scroll_ms),
            min_step: self.min_scroll_step,
        }
    }

    pub fn autoplay_settings(&self) -> AutoplaySettings {
        AutoplaySettings {
            unmute_delay: Duration::from_millis(self.unmute_delay_ms),
            fade_duration: Duration::from_millis(self.fade_in_ms),
            fade_steps: self.fade_steps,
            target_volume: self.volume,
        }
    }

    pub fn layout_metrics(&self, available_width: f32) -> LayoutMetrics {
        LayoutMetrics {
            font_size: self.font_size as f32,
            line_spacing: self.line_spacing,
            row_padding: self.lyric_row_padding,
            available_width,
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_settings_follow_config() {
        let config = AppConfig {
            lyrics_offset_secs: 0.3,
            scroll_ms: 200,
            fade_steps: 10,
            volume: 0.8,
            ..AppConfig::default()
        };

        let sync = config.sync_settings();
        assert_eq!(sync.offset_secs, 0.3);
        assert_eq!(sync.lead_in_secs, -0.1);
        assert_eq!(sync.scroll_duration, Duration::from_millis(200));

        let autoplay = config.autoplay_settings();
        assert_eq!(autoplay.fade_steps, 10);
        assert_eq!(autoplay.target_volume, 0.8);
        assert_eq!(autoplay.unmute_delay, Duration::from_millis(350));

        assert_eq!(config.layout_metrics(400.0).font_size, 20.0);
    }
}
