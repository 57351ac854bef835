use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            clamp_config(cfg)
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Parsing config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("Serializing config TOML")
}

/// Pull numeric settings back into ranges the UI can render.
fn clamp_config(mut config: AppConfig) -> AppConfig {
    config.font_size = config.font_size.clamp(10, 48);
    config.line_spacing = config.line_spacing.clamp(0.8, 2.5);
    config.window_width = config.window_width.max(320.0);
    config.window_height = config.window_height.max(240.0);
    config.scroll_margin_top = config.scroll_margin_top.max(0.0);
    config.scroll_margin_bottom = config.scroll_margin_bottom.max(0.0);
    config.scroll_ms = config.scroll_ms.min(2_000);
    config.min_scroll_step = config.min_scroll_step.max(1.0);
    config.lyric_row_padding = config.lyric_row_padding.max(0.0);
    config.lyrics_view_height = config.lyrics_view_height.max(48.0);
    config.volume = config.volume.clamp(0.0, 1.0);
    config.fade_steps = config.fade_steps.max(1);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};
    use crate::lyrics::TagPolicy;

    #[test]
    fn sectioned_toml_maps_onto_config() {
        let config = parse_config(
            r#"
            [appearance]
            theme = "night"
            font_size = 24

            [lyrics]
            lrc_path = "assets/us.lrc"
            offset_secs = 0.25
            tag_policy = "first-tag"

            [audio]
            track_path = "assets/us.mp3"
            label = "Our song"
            fade_steps = 8

            [logging]
            log_level = "debug"

            [[milestones]]
            label = "First message"
            at = "2024-10-07T21:10:00+01:00"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.theme, ThemeMode::Night);
        assert_eq!(config.font_size, 24);
        assert_eq!(config.lrc_path, "assets/us.lrc");
        assert_eq!(config.lyrics_offset_secs, 0.25);
        assert_eq!(config.lyrics_lead_in_secs, -0.1);
        assert_eq!(config.tag_policy, TagPolicy::FirstTag);
        assert_eq!(config.track_label.as_deref(), Some("Our song"));
        assert_eq!(config.fade_steps, 8);
        assert_eq!(config.unmute_delay_ms, 350);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.photos_dir, "photos");
        assert_eq!(config.milestones.len(), 1);
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = AppConfig {
            volume: 0.5,
            track_label: Some("Label".to_string()),
            ..AppConfig::default()
        };
        let text = serialize_config(&config).expect("serialize");
        assert!(text.contains("[lyrics]"));
        let parsed = parse_config(&text).expect("parse");
        assert_eq!(parsed.volume, 0.5);
        assert_eq!(parsed.track_label.as_deref(), Some("Label"));
        assert_eq!(parsed.scroll_ms, config.scroll_ms);
    }

    #[test]
    fn missing_or_invalid_files_use_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = load_config(&dir.path().join("nope.toml"));
        assert_eq!(missing.font_size, 20);

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[appearance\nfont_size = ").expect("write");
        assert_eq!(load_config(&bad).scroll_ms, 140);
    }

    #[test]
    fn loaded_values_are_clamped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[appearance]\nfont_size = 200\n[audio]\nvolume = 3.0\nfade_steps = 0\n",
        )
        .expect("write");
        let config = load_config(&path);
        assert_eq!(config.font_size, 48);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.fade_steps, 1);
    }
}
