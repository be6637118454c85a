use iced::widget::{button, column, container, image, mouse_area, row, text, Column, Row, Space};
use iced::{Alignment, Element, Length};

use super::thumbs::ThumbnailCache;
use crate::state::data::ImageRecord;
use crate::state::view::{self, Density, Projection};
use crate::Message;

/// Card image height for each density
fn image_height(density: Density) -> f32 {
    match density {
        Density::Compact => 140.0,
        Density::Normal => 200.0,
        Density::Large => 320.0,
    }
}

/// Render the projected rows; a short last row is padded with empty cells
pub fn grid<'a>(
    projection: &Projection<'a>,
    density: Density,
    thumbnails: &'a ThumbnailCache,
) -> Column<'a, Message> {
    projection
        .rows
        .iter()
        .fold(Column::new().spacing(10), |grid, layout_row| {
            grid.push(grid_row(layout_row, density, thumbnails))
        })
}

fn grid_row<'a>(
    layout_row: &view::Row<'a>,
    density: Density,
    thumbnails: &'a ThumbnailCache,
) -> Element<'a, Message> {
    let cards = layout_row
        .cards
        .iter()
        .fold(Row::new().spacing(10), |cards, &record| {
            cards.push(card(record, density, thumbnails))
        });

    (0..layout_row.padding)
        .fold(cards, |cards, _| {
            cards.push(Space::with_width(Length::FillPortion(1)))
        })
        .into()
}

/// Image area of a card: the thumbnail once loaded, a placeholder until then
pub fn picture<'a>(
    record: &'a ImageRecord,
    height: f32,
    thumbnails: &'a ThumbnailCache,
) -> Element<'a, Message> {
    match thumbnails.get(&record.source) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => {
            let label = if thumbnails.is_failed(&record.source) {
                "Image unavailable"
            } else {
                "Loading..."
            };
            container(text(label).size(14))
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(height))
                .into()
        }
    }
}

/// The like/favorite/save/share/download/delete bar shared by cards and the expanded view
pub fn actions<'a>(record: &ImageRecord) -> Row<'a, Message> {
    let id = record.id;
    let favorite = if record.is_favorite { "★" } else { "☆" };
    let saved = if record.is_saved { "Saved" } else { "Save" };

    row![
        button(text(format!("♥ {}", record.likes)).size(14))
            .on_press(Message::Like(id))
            .style(button::text),
        button(text(favorite).size(14))
            .on_press(Message::ToggleFavorite(id))
            .style(button::text),
        button(text(saved).size(14))
            .on_press(Message::ToggleSave(id))
            .style(button::text),
        button(text("Share").size(14))
            .on_press(Message::Share(id))
            .style(button::text),
        button(text("Download").size(14))
            .on_press(Message::Download(id))
            .style(button::text),
        button(text("🗑").size(14))
            .on_press(Message::Remove(id))
            .style(button::danger),
    ]
    .spacing(4)
    .align_y(Alignment::Center)
}

fn card<'a>(
    record: &'a ImageRecord,
    density: Density,
    thumbnails: &'a ThumbnailCache,
) -> Element<'a, Message> {
    let image_area = mouse_area(picture(record, image_height(density), thumbnails))
        .on_press(Message::Expand(record.id));

    let mut body = column![image_area, actions(record)].spacing(6);

    if density != Density::Compact {
        if !record.description.is_empty() {
            body = body.push(text(&record.description).size(14));
        }
        let mut footer = record.category.to_string();
        for tag in &record.tags {
            footer.push_str(" #");
            footer.push_str(tag);
        }
        body = body.push(text(footer).size(12));
    }

    container(body)
        .padding(8)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}
