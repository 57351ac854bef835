//! Autoplay unlock chain and volume fade-in.
//!
//! Playback is first attempted muted right away. If the output refuses, a
//! single set of triggers is armed (window visible, window focused, first
//! user interaction) and each one retries. Once any attempt succeeds every
//! trigger is disarmed, the track is unmuted after a short delay and the
//! volume fades in linearly.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Audio sink the sequencer drives.
pub trait Player {
    /// Start or resume playback with the current mute and volume state.
    fn try_play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn set_volume(&mut self, volume: f32);
    fn is_paused(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplaySettings {
    pub unmute_delay: Duration,
    pub fade_duration: Duration,
    pub fade_steps: u32,
    pub target_volume: f32,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            unmute_delay: Duration::from_millis(350),
            fade_duration: Duration::from_millis(2000),
            fade_steps: 20,
            target_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Visibility,
    Focus,
    Interaction,
}

/// The retry triggers currently listening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmedTriggers {
    visibility: bool,
    focus: bool,
    interaction: bool,
}

impl ArmedTriggers {
    pub fn all() -> Self {
        Self {
            visibility: true,
            focus: true,
            interaction: true,
        }
    }

    pub fn contains(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Visibility => self.visibility,
            Trigger::Focus => self.focus,
            Trigger::Interaction => self.interaction,
        }
    }

    fn disarm(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Visibility => self.visibility = false,
            Trigger::Focus => self.focus = false,
            Trigger::Interaction => self.interaction = false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.visibility || self.focus || self.interaction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayPhase {
    Pending,
    Armed(ArmedTriggers),
    Unlocked,
    TornDown,
}

/// Linear volume ramp applied in fixed timed steps.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeFade {
    step: u32,
    steps: u32,
    interval: Duration,
    next_at: Instant,
    target: f32,
}

impl VolumeFade {
    fn new(now: Instant, settings: &AutoplaySettings) -> Self {
        let steps = settings.fade_steps.max(1);
        let interval = settings.fade_duration / steps;
        Self {
            step: 0,
            steps,
            interval,
            next_at: now + interval,
            target: settings.target_volume,
        }
    }

    /// Apply every step that is due; returns whether more remain.
    fn advance(&mut self, now: Instant, player: &mut dyn Player) -> bool {
        if player.is_paused() {
            debug!(step = self.step, "Playback paused; stopping volume fade");
            return false;
        }
        while self.step < self.steps && now >= self.next_at {
            self.step += 1;
            player.set_volume(self.target * self.step as f32 / self.steps as f32);
            self.next_at += self.interval;
        }
        self.step < self.steps
    }
}

pub struct AutoplaySequencer {
    settings: AutoplaySettings,
    phase: AutoplayPhase,
    unmute_at: Option<Instant>,
    fade: Option<VolumeFade>,
    prompt_visible: bool,
}

impl AutoplaySequencer {
    pub fn new(settings: AutoplaySettings) -> Self {
        Self {
            settings,
            phase: AutoplayPhase::Pending,
            unmute_at: None,
            fade: None,
            prompt_visible: false,
        }
    }

    pub fn phase(&self) -> AutoplayPhase {
        self.phase
    }

    /// Whether the user should be told to start playback by hand.
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Whether [`Self::tick`] still has timed work pending.
    pub fn needs_ticks(&self) -> bool {
        self.unmute_at.is_some() || self.fade.is_some()
    }

    /// First strategy: muted playback straight away.
    pub fn start(&mut self, now: Instant, player: &mut dyn Player) {
        if self.phase != AutoplayPhase::Pending {
            return;
        }
        if attempt(player, true, "immediate") {
            self.unlock(true, now, player);
        } else {
            info!("Autoplay blocked; waiting for focus, visibility or interaction");
            self.phase = AutoplayPhase::Armed(ArmedTriggers::all());
        }
    }

    pub fn on_visibility(&mut self, visible: bool, now: Instant, player: &mut dyn Player) {
        if !visible || !self.armed(Trigger::Visibility) {
            return;
        }
        if attempt(player, true, "visibility") {
            self.unlock(true, now, player);
        } else {
            self.prompt_visible = true;
        }
    }

    pub fn on_focus(&mut self, now: Instant, player: &mut dyn Player) {
        if !self.armed(Trigger::Focus) {
            return;
        }
        self.disarm(Trigger::Focus);
        if attempt(player, true, "focus") {
            self.unlock(true, now, player);
        } else {
            self.prompt_visible = true;
        }
    }

    /// First pointer or key press anywhere in the window.
    pub fn on_interaction(&mut self, now: Instant, player: &mut dyn Player) {
        if !self.armed(Trigger::Interaction) {
            return;
        }
        self.disarm(Trigger::Interaction);
        if attempt(player, true, "interaction") {
            self.unlock(true, now, player);
        } else if attempt(player, false, "interaction-unmuted") {
            self.unlock(false, now, player);
        } else {
            self.prompt_visible = true;
        }
    }

    /// Play/pause button. Returns whether audio is playing afterwards.
    pub fn toggle(&mut self, now: Instant, player: &mut dyn Player) -> bool {
        if player.is_paused() {
            if attempt(player, false, "manual") {
                self.unlock(false, now, player);
                true
            } else {
                self.prompt_visible = true;
                false
            }
        } else {
            player.pause();
            self.unmute_at = None;
            self.fade = None;
            false
        }
    }

    /// Run the pending unmute and fade steps that are due.
    pub fn tick(&mut self, now: Instant, player: &mut dyn Player) {
        if let Some(at) = self.unmute_at {
            if now >= at {
                self.unmute_at = None;
                if player.is_paused() {
                    debug!("Playback paused before unmute; skipping fade");
                } else {
                    player.set_muted(false);
                    self.start_fade(now, player);
                }
            }
        }

        if let Some(fade) = self.fade.as_mut() {
            if !fade.advance(now, player) {
                self.fade = None;
            }
        }
    }

    pub fn teardown(&mut self) {
        self.phase = AutoplayPhase::TornDown;
        self.unmute_at = None;
        self.fade = None;
    }

    fn armed(&self, trigger: Trigger) -> bool {
        matches!(self.phase, AutoplayPhase::Armed(triggers) if triggers.contains(trigger))
    }

    fn disarm(&mut self, trigger: Trigger) {
        if let AutoplayPhase::Armed(triggers) = &mut self.phase {
            triggers.disarm(trigger);
            if triggers.is_empty() {
                self.prompt_visible = true;
            }
        }
    }

    fn unlock(&mut self, muted: bool, now: Instant, player: &mut dyn Player) {
        if self.phase != AutoplayPhase::Unlocked {
            info!(muted, "Audio playback unlocked");
        }
        self.phase = AutoplayPhase::Unlocked;
        self.prompt_visible = false;
        if muted {
            self.fade = None;
            self.unmute_at = Some(now + self.settings.unmute_delay);
        } else {
            self.unmute_at = None;
            self.start_fade(now, player);
        }
    }

    fn start_fade(&mut self, now: Instant, player: &mut dyn Player) {
        player.set_volume(0.0);
        self.fade = Some(VolumeFade::new(now, &self.settings));
    }
}

fn attempt(player: &mut dyn Player, muted: bool, strategy: &'static str) -> bool {
    player.set_muted(muted);
    player.set_volume(0.0);
    match player.try_play() {
        Ok(()) => {
            debug!(strategy, muted, "Playback attempt succeeded");
            true
        }
        Err(err) => {
            warn!(strategy, muted, "Playback attempt rejected: {err:#}");
            false
        }
    }
}
