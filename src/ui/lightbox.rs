use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::grid;
use super::thumbs::ThumbnailCache;
use crate::state::data::ImageRecord;
use crate::Message;

const EXPANDED_HEIGHT: f32 = 520.0;

/// A single pin shown large, with the same actions as its card
pub fn lightbox<'a>(record: &'a ImageRecord, thumbnails: &'a ThumbnailCache) -> Element<'a, Message> {
    let header = row![
        text(record.title()).size(22).width(Length::Fill),
        button("Close").on_press(Message::CloseExpanded),
    ]
    .align_y(Alignment::Center);

    let details = format!(
        "{} · {} likes · added {}",
        record.category,
        record.likes,
        record.created_at.format("%Y-%m-%d %H:%M")
    );

    let mut body = column![
        header,
        grid::picture(record, EXPANDED_HEIGHT, thumbnails),
        grid::actions(record),
        text(details).size(14),
    ]
    .spacing(12);

    if !record.tags.is_empty() {
        body = body.push(text(format!("#{}", record.tags.join(" #"))).size(14));
    }
    body = body.push(text(&record.source).size(12));

    container(body)
        .padding(20)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
