//! Count-up timers since a list of milestones.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Tick cadence while the window has focus.
pub const FOCUSED_TICK: Duration = Duration::from_secs(1);
/// Tick cadence while the window is in the background.
pub const BACKGROUND_TICK: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Milestone {
    pub label: String,
    /// RFC 3339 timestamp with an explicit offset, e.g. `2024-10-07T21:10:00+01:00`.
    pub at: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A milestone whose timestamp parsed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMilestone {
    pub label: String,
    pub note: Option<String>,
    pub at: DateTime<FixedOffset>,
}

impl ParsedMilestone {
    pub fn elapsed(&self, now: DateTime<Utc>) -> ElapsedParts {
        ElapsedParts::between(self.at.with_timezone(&Utc), now)
    }

    /// Human-readable start date, e.g. `07 Oct 2024, 21:10`.
    pub fn since_label(&self) -> String {
        self.at.format("%d %b %Y, %H:%M").to_string()
    }
}

/// Parse every milestone, skipping the ones with unreadable timestamps.
pub fn parse_milestones(milestones: &[Milestone]) -> Vec<ParsedMilestone> {
    milestones
        .iter()
        .filter_map(|m| match DateTime::parse_from_rfc3339(&m.at) {
            Ok(at) => Some(ParsedMilestone {
                label: m.label.clone(),
                note: m.note.clone(),
                at,
            }),
            Err(err) => {
                warn!(label = %m.label, at = %m.at, "Skipping milestone with invalid timestamp: {err}");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedParts {
    /// Whole days, hours, minutes and seconds from `start` to `now`; zero when
    /// `start` lies in the future.
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (now - start).num_seconds().max(0) as u64;
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    /// `HH:MM:SS`, zero-padded.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
