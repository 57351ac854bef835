//! LRC time-tag parsing.
//!
//! Accepts lines of the form `[mm:ss]Text` or `[mm:ss.cc]Text`, optionally
//! with several leading tags. Anything else (metadata such as `[ar:...]`,
//! malformed tags, blank lines) is dropped without error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static LEADING_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*((?:\[\d{2}:\d{2}(?:\.\d{1,2})?\])+)(.*)$").unwrap());
static TIME_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{2}):(\d{2})(?:\.(\d{1,2}))?\]").unwrap());

/// One timed lyric line, in seconds from the start of the track.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    pub time: f64,
    pub text: String,
}

/// How a raw line carrying several time tags is expanded.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TagPolicy {
    /// Emit one entry per tag, all sharing the line's text.
    #[default]
    EveryTag,
    /// Only the first tag produces an entry.
    FirstTag,
}

impl std::fmt::Display for TagPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TagPolicy::EveryTag => "every-tag",
            TagPolicy::FirstTag => "first-tag",
        };
        write!(f, "{}", label)
    }
}

/// Parse LRC text into lines sorted ascending by time.
pub fn parse_lrc(lrc: &str, policy: TagPolicy) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    let mut dropped = 0usize;

    for raw in lrc.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let Some(caps) = LEADING_TAGS.captures(raw) else {
            if !raw.trim().is_empty() {
                dropped += 1;
            }
            continue;
        };

        let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if text.is_empty() {
            continue;
        }

        let tags = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let times = TIME_TAG.captures_iter(tags).filter_map(|tag| {
            tag_seconds(
                tag.get(1)?.as_str(),
                tag.get(2)?.as_str(),
                tag.get(3).map(|m| m.as_str()),
            )
        });

        match policy {
            TagPolicy::EveryTag => {
                for time in times {
                    lines.push(LyricLine {
                        time,
                        text: text.to_string(),
                    });
                }
            }
            TagPolicy::FirstTag => {
                if let Some(time) = times.into_iter().next() {
                    lines.push(LyricLine {
                        time,
                        text: text.to_string(),
                    });
                }
            }
        }
    }

    // Stable, so lines sharing a timestamp keep their authored order.
    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    debug!(
        parsed = lines.len(),
        dropped,
        %policy,
        "Parsed LRC lyrics"
    );
    lines
}

fn tag_seconds(minutes: &str, seconds: &str, fraction: Option<&str>) -> Option<f64> {
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    let fraction = match fraction {
        Some(digits) => format!("0.{digits}").parse::<f64>().ok()?,
        None => 0.0,
    };
    Some(f64::from(minutes) * 60.0 + f64::from(seconds) + fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(lines: &[LyricLine]) -> Vec<(f64, &str)> {
        lines.iter().map(|l| (l.time, l.text.as_str())).collect()
    }

    #[test]
    fn parses_tagged_lines_and_drops_malformed_ones() {
        let lines = parse_lrc("[00:01.00]Hello\n[00:03.50]World\n[bad]Ignored", TagPolicy::default());
        assert_eq!(pairs(&lines), vec![(1.0, "Hello"), (3.5, "World")]);
    }

    #[test]
    fn fraction_digits_are_a_decimal_fraction() {
        let lines = parse_lrc("[00:02.5]half\n[00:03.05]tiny\n[01:00]minute", TagPolicy::default());
        assert_eq!(
            pairs(&lines),
            vec![(2.5, "half"), (3.05, "tiny"), (60.0, "minute")]
        );
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let lines = parse_lrc("[00:09]c\r\n[00:01]a\r\n[00:05]b", TagPolicy::default());
        assert_eq!(pairs(&lines), vec![(1.0, "a"), (5.0, "b"), (9.0, "c")]);
        assert!(lines.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn empty_text_and_metadata_are_discarded() {
        let lrc = "[ar:Someone]\n[ti:Our Song]\n[00:01.00]   \n[00:02.00]\n\nplain text\n[00:04.00]  kept  ";
        let lines = parse_lrc(lrc, TagPolicy::default());
        assert_eq!(pairs(&lines), vec![(4.0, "kept")]);
        assert!(lines.iter().all(|l| !l.text.is_empty()));
    }

    #[test]
    fn every_tag_policy_repeats_text_per_tag() {
        let lines = parse_lrc("[00:10.00][00:30.00]Chorus\n[00:20.00]Verse", TagPolicy::EveryTag);
        assert_eq!(
            pairs(&lines),
            vec![(10.0, "Chorus"), (20.0, "Verse"), (30.0, "Chorus")]
        );
    }

    #[test]
    fn first_tag_policy_keeps_only_the_first_time() {
        let lines = parse_lrc("[00:10.00][00:30.00]Chorus\n[00:20.00]Verse", TagPolicy::FirstTag);
        assert_eq!(pairs(&lines), vec![(10.0, "Chorus"), (20.0, "Verse")]);
    }

    #[test]
    fn equal_times_keep_authored_order() {
        let lines = parse_lrc("[00:01]first\n[00:01]second", TagPolicy::default());
        assert_eq!(pairs(&lines), vec![(1.0, "first"), (1.0, "second")]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let lrc = "[00:03]b\n[00:01][00:05]a\nnoise\n[00:02.25]c";
        assert_eq!(
            parse_lrc(lrc, TagPolicy::EveryTag),
            parse_lrc(lrc, TagPolicy::EveryTag)
        );
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(parse_lrc("", TagPolicy::default()).is_empty());
    }
}
