use super::messages::Message;
use super::state::{
    App, LYRICS_SCROLL_ID, LYRICS_SIDE_PADDING_PX, PAGE_PADDING_PX, PHOTO_HEIGHT_PX, Route,
};
use crate::autoplay::Player;
use crate::countdown::ParsedMilestone;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, image, row, scrollable, slider,
    text,
};
use iced::{Background, Element, Length, Padding};
use std::time::Instant;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let body = match self.route {
            Route::Home => self.home_view(),
            Route::Gallery => self.gallery_view(),
            Route::Countdown => self.countdown_view(),
        };

        column![self.nav_bar(), body]
            .padding(PAGE_PADDING_PX)
            .spacing(12)
            .height(Length::Fill)
            .into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let nav_button = |route: Route| {
            let label = button(text(route.to_string()));
            if self.route == route {
                label
            } else {
                label.on_press(Message::Navigate(route))
            }
        };
        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };

        row![
            nav_button(Route::Home),
            nav_button(Route::Gallery),
            nav_button(Route::Countdown),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn home_view(&self) -> Element<'_, Message> {
        let now = Instant::now();
        let playing = !self.audio.playback.is_paused();
        let title = self
            .config
            .track_label
            .clone()
            .unwrap_or_else(|| "Our song".to_string());

        let play_button = button(if playing { "Pause" } else { "Play" })
            .on_press(Message::TogglePlayPause);
        let position = self.audio.playback.position(now).as_secs_f32();
        let total = self
            .audio
            .playback
            .duration()
            .map(|d| d.as_secs_f32())
            .unwrap_or(0.0);

        let mut controls: Row<'_, Message> = row![play_button]
            .spacing(10)
            .align_y(Vertical::Center)
            .width(Length::Fill);
        if total > 0.0 {
            controls = controls.push(
                slider(0.0..=total, position.min(total), Message::SeekTo)
                    .step(0.5)
                    .width(Length::Fill),
            );
        } else {
            controls = controls.push(horizontal_space());
        }
        controls = controls.push(text(self.playback_label(now)));

        let mut content: Column<'_, Message> = column![text(title).size(28), controls]
            .spacing(12)
            .width(Length::Fill);

        if self.audio.sequencer.prompt_visible() {
            content = content.push(text("Press play to start the music").size(14));
        }

        content.push(self.lyrics_view()).into()
    }

    fn lyrics_view(&self) -> Element<'_, Message> {
        let lines = self.lyrics.sync.lines();
        if lines.is_empty() {
            return container(text("No lyrics for this song."))
                .height(Length::Fixed(self.config.lyrics_view_height))
                .align_y(Vertical::Center)
                .into();
        }

        let active = self.lyrics.sync.active_index();
        let highlight = self.highlight_color();
        let font_size = self.config.font_size as f32;
        let padding = self.config.lyric_row_padding;

        let rows = lines.iter().enumerate().map(|(idx, line)| -> Element<'_, Message> {
            let height = self
                .lyrics
                .layout
                .row_height(idx)
                .unwrap_or(font_size * self.config.line_spacing + padding * 2.0);
            let row = container(
                text(line.text.as_str())
                    .size(font_size)
                    .line_height(LineHeight::Relative(self.config.line_spacing))
                    .wrapping(Wrapping::WordOrGlyph)
                    .align_x(Horizontal::Left)
                    .width(Length::Fill),
            )
            .padding(Padding {
                top: padding,
                bottom: padding,
                left: 0.0,
                right: 0.0,
            })
            .width(Length::Fill)
            .height(Length::Fixed(height));

            if Some(idx) == active {
                row.style(move |_theme| container::Style {
                    background: Some(Background::Color(highlight)),
                    ..container::Style::default()
                })
                .into()
            } else {
                row.into()
            }
        });

        scrollable(
            Column::with_children(rows.collect::<Vec<Element<'_, Message>>>())
                .padding(Padding {
                    top: 0.0,
                    bottom: 0.0,
                    left: LYRICS_SIDE_PADDING_PX,
                    right: LYRICS_SIDE_PADDING_PX,
                })
                .width(Length::Fill),
        )
        .on_scroll(|viewport| Message::LyricsScrolled {
            offset_y: viewport.absolute_offset().y,
            viewport_width: viewport.bounds().width,
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        })
        .id(LYRICS_SCROLL_ID.clone())
        .width(Length::Fill)
        .height(Length::Fixed(self.config.lyrics_view_height))
        .into()
    }

    fn gallery_view(&self) -> Element<'_, Message> {
        let Some(idx) = self.gallery.carousel.index() else {
            return text("No photos yet.").into();
        };
        let Some(photo) = self.gallery.photos.get(idx) else {
            return text("No photos yet.").into();
        };

        let picture = container(
            image(image::Handle::from_path(&photo.path))
                .width(Length::Fill)
                .height(Length::Fixed(PHOTO_HEIGHT_PX)),
        )
        .center_x(Length::Fill);

        let caption = text(photo.caption.clone().unwrap_or_else(|| photo.alt.clone()))
            .size(16)
            .align_x(Horizontal::Center)
            .width(Length::Fill);

        let dots = Row::with_children(
            (0..self.gallery.photos.len())
                .map(|n| -> Element<'_, Message> {
                    let dot = button(text((n + 1).to_string()).size(12));
                    if n == idx {
                        dot.into()
                    } else {
                        dot.on_press(Message::SelectPhoto(n)).into()
                    }
                })
                .collect::<Vec<Element<'_, Message>>>(),
        )
        .spacing(6);

        let counter = text(format!("{} / {}", idx + 1, self.gallery.photos.len()))
            .size(14)
            .align_x(Horizontal::Center)
            .width(Length::Fill);

        let controls = row![
            button("Previous").on_press(Message::PreviousPhoto),
            horizontal_space(),
            dots,
            horizontal_space(),
            button("Next").on_press(Message::NextPhoto),
        ]
        .align_y(Vertical::Center)
        .width(Length::Fill);

        column![picture, caption, counter, controls]
            .spacing(12)
            .width(Length::Fill)
            .into()
    }

    fn countdown_view(&self) -> Element<'_, Message> {
        if self.countdown.milestones.is_empty() {
            return text("Add milestones to the config to start counting.").into();
        }

        let cards = self
            .countdown
            .milestones
            .iter()
            .map(|milestone| self.milestone_card(milestone))
            .collect::<Vec<Element<'_, Message>>>();

        scrollable(Column::with_children(cards).spacing(16).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn milestone_card<'a>(&'a self, milestone: &'a ParsedMilestone) -> Element<'a, Message> {
        let elapsed = milestone.elapsed(self.countdown.now);
        let mut card: Column<'a, Message> = column![
            text(milestone.label.as_str()).size(20),
            row![
                text(format!("{} days", elapsed.days)).size(32),
                text(elapsed.clock()).size(32),
            ]
            .spacing(16)
            .align_y(Vertical::Center),
            text(format!("since {}", milestone.since_label())).size(14),
        ]
        .spacing(6);
        if let Some(note) = &milestone.note {
            card = card.push(text(note.as_str()).size(14));
        }
        container(card).padding(12).width(Length::Fill).into()
    }
}
