use super::state::Route;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    Startup,
    Navigate(Route),
    ToggleTheme,
    TogglePlayPause,
    SeekTo(f32),
    SeekForward,
    SeekBackward,
    NextPhoto,
    PreviousPhoto,
    SelectPhoto(usize),
    SafeQuit,
    Interaction,
    WindowResized {
        width: f32,
        height: f32,
    },
    WindowFocused,
    WindowUnfocused,
    WindowOpened,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    LyricsScrolled {
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    Tick(Instant),
    CountdownTick,
}
