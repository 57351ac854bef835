mod core;
mod navigation;
mod playback;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    ScrollLyrics(f32),
    QuitSafely,
}
