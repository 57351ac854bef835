use super::super::messages::Message;
use super::super::state::{App, FRAME_INTERVAL, LYRICS_SCROLL_ID, Route};
use super::Effect;
use crate::autoplay::AutoplayPhase;
use crate::countdown::{BACKGROUND_TICK, FOCUSED_TICK};
use iced::Event;
use iced::event;
use iced::keyboard::{self, Key, Modifiers, key};
use iced::mouse;
use iced::time;
use iced::touch;
use iced::widget::scrollable::AbsoluteOffset;
use iced::window;
use iced::{Subscription, Task};
use std::time::Instant;
use tracing::info;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> = vec![
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized {
                width: size.width,
                height: size.height,
            }),
            event::listen_with(runtime_event_to_message),
        ];

        if app.needs_frames() {
            subscriptions.push(time::every(FRAME_INTERVAL).map(Message::Tick));
        }

        if app.route == Route::Countdown {
            let cadence = if app.focused {
                FOCUSED_TICK
            } else {
                BACKGROUND_TICK
            };
            subscriptions.push(time::every(cadence).map(|_| Message::CountdownTick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Startup => self.handle_startup(&mut effects),
            Message::Navigate(route) => {
                self.note_interaction(&mut effects);
                self.handle_navigate(route, &mut effects);
            }
            Message::ToggleTheme => {
                self.note_interaction(&mut effects);
                self.handle_toggle_theme();
            }
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::SeekTo(secs) => self.handle_seek_to(secs, &mut effects),
            Message::SeekForward => self.handle_seek_forward(&mut effects),
            Message::SeekBackward => self.handle_seek_backward(&mut effects),
            Message::NextPhoto => {
                self.note_interaction(&mut effects);
                self.gallery.carousel.next();
            }
            Message::PreviousPhoto => {
                self.note_interaction(&mut effects);
                self.gallery.carousel.previous();
            }
            Message::SelectPhoto(idx) => {
                self.note_interaction(&mut effects);
                self.gallery.carousel.select(idx);
            }
            Message::SafeQuit => effects.push(Effect::QuitSafely),
            Message::Interaction => self.note_interaction(&mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height);
            }
            Message::WindowFocused => self.handle_window_focused(&mut effects),
            Message::WindowUnfocused => {
                self.focused = false;
            }
            Message::WindowOpened => self.handle_window_opened(&mut effects),
            Message::KeyPressed { key, modifiers } => {
                let was_locked = !matches!(self.audio.sequencer.phase(), AutoplayPhase::Unlocked);
                self.note_interaction(&mut effects);
                let just_unlocked =
                    was_locked && matches!(self.audio.sequencer.phase(), AutoplayPhase::Unlocked);
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    if forwards_shortcut(&shortcut, just_unlocked) {
                        effects.extend(self.reduce(shortcut));
                    }
                }
            }
            Message::LyricsScrolled {
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_lyrics_scrolled(
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
            ),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::CountdownTick => {
                self.countdown.now = chrono::Utc::now();
            }
        }

        effects
    }

    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ScrollLyrics(y) => iced::widget::scrollable::scroll_to(
                LYRICS_SCROLL_ID.clone(),
                AbsoluteOffset { x: 0.0, y },
            ),
            Effect::QuitSafely => {
                info!("Quitting memory book");
                self.teardown();
                iced::exit()
            }
        }
    }

    fn handle_window_resized(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.config.window_width = width;
        self.config.window_height = height;
        let text_width = Self::lyrics_text_width_for_window(width);
        if (text_width - self.lyrics.text_width).abs() >= 1.0 {
            self.relayout_lyrics(text_width);
        }
    }

    fn handle_window_focused(&mut self, effects: &mut Vec<Effect>) {
        self.focused = true;
        self.countdown.now = chrono::Utc::now();
        let now = Instant::now();
        self.audio
            .sequencer
            .on_focus(now, &mut self.audio.playback);
        self.resync_lyrics(now, effects);
    }

    fn handle_window_opened(&mut self, effects: &mut Vec<Effect>) {
        self.window_opened = true;
        let now = Instant::now();
        self.audio
            .sequencer
            .on_visibility(true, now, &mut self.audio.playback);
        self.resync_lyrics(now, effects);
    }

    fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
            crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
        };
        info!(theme = %self.config.theme, "Toggled theme");
    }

    /// Stop audio and release per-view timers before the window closes.
    pub(super) fn teardown(&mut self) {
        self.audio.sequencer.teardown();
        self.lyrics.sync.teardown();
        self.audio.playback.stop();
    }

    fn shortcut_message_for_key(&self, key: Key, modifiers: Modifiers) -> Option<Message> {
        if modifiers.control() || modifiers.alt() || modifiers.logo() {
            return None;
        }
        match key.as_ref() {
            Key::Named(key::Named::Space) => Some(Message::TogglePlayPause),
            Key::Named(key::Named::ArrowRight) => Some(match self.route {
                Route::Gallery => Message::NextPhoto,
                _ => Message::SeekForward,
            }),
            Key::Named(key::Named::ArrowLeft) => Some(match self.route {
                Route::Gallery => Message::PreviousPhoto,
                _ => Message::SeekBackward,
            }),
            Key::Named(key::Named::Home) if self.route == Route::Gallery => {
                Some(Message::SelectPhoto(0))
            }
            Key::Named(key::Named::End) if self.route == Route::Gallery => Some(
                Message::SelectPhoto(self.gallery.photos.len().saturating_sub(1)),
            ),
            Key::Character("q") => Some(Message::SafeQuit),
            Key::Character("1") => Some(Message::Navigate(Route::Home)),
            Key::Character("2") => Some(Message::Navigate(Route::Gallery)),
            Key::Character("3") => Some(Message::Navigate(Route::Countdown)),
            _ => None,
        }
    }
}

/// The key press that unlocked playback has already started it.
fn forwards_shortcut(shortcut: &Message, unlocked_by_press: bool) -> bool {
    !(unlocked_by_press && matches!(shortcut, Message::TogglePlayPause))
}

fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::Focused) => Some(Message::WindowFocused),
        Event::Window(window::Event::Unfocused) => Some(Message::WindowUnfocused),
        Event::Window(window::Event::Opened { .. }) => Some(Message::WindowOpened),
        Event::Mouse(mouse::Event::ButtonPressed(_)) | Event::Touch(touch::Event::FingerPressed { .. })
            if status == event::Status::Ignored =>
        {
            Some(Message::Interaction)
        }
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if status == event::Status::Ignored =>
        {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
