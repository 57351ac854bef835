use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Layout limits for the views.
pub(crate) const PAGE_PADDING_PX: f32 = 16.0;
pub(crate) const LYRICS_SIDE_PADDING_PX: f32 = 12.0;
pub(crate) const SCROLLBAR_ALLOWANCE_PX: f32 = 12.0;
pub(crate) const MIN_LYRICS_TEXT_WIDTH_PX: f32 = 120.0;
pub(crate) const PHOTO_HEIGHT_PX: f32 = 420.0;
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub(crate) const SEEK_STEP: Duration = Duration::from_secs(5);
pub(crate) static LYRICS_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("lyrics-scroll"));
