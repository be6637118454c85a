use iced::widget::{button, column, pick_list, row, text, text_input, Column};
use iced::{Alignment, Element};
use std::fmt;

use crate::state::data::Category;
use crate::state::draft::Draft;
use crate::state::view::{Density, Query, SortKey};
use crate::Message;

/// Category picker entry: a specific category, or all of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryChoice(pub Option<Category>);

impl CategoryChoice {
    pub fn all() -> Vec<CategoryChoice> {
        std::iter::once(CategoryChoice(None))
            .chain(Category::ALL.into_iter().map(|c| CategoryChoice(Some(c))))
            .collect()
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(category) => write!(f, "{}", category),
            None => f.write_str("All categories"),
        }
    }
}

/// Search, filters, sort, density and the board-wide actions
pub fn toolbar<'a>(
    query: &'a Query,
    density: Density,
    dark_mode: bool,
    add_open: bool,
) -> Element<'a, Message> {
    let bookmarks = if query.bookmarks_only {
        "Saved only"
    } else {
        "All pins"
    };
    let mode = if dark_mode { "Light mode" } else { "Dark mode" };
    let add = if add_open { "Close" } else { "Add pin" };

    let filters = row![
        text_input("Search descriptions and tags", &query.search)
            .on_input(Message::SearchChanged)
            .padding(8)
            .width(280.0),
        pick_list(
            CategoryChoice::all(),
            Some(CategoryChoice(query.category)),
            Message::CategorySelected,
        ),
        pick_list(SortKey::ALL, Some(query.sort), Message::SortSelected),
        pick_list(Density::ALL, Some(density), Message::DensitySelected),
        button(bookmarks).on_press(Message::ToggleBookmarksOnly),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let actions = row![
        button(add).on_press(Message::ToggleAddForm),
        button("Shuffle").on_press(Message::Shuffle),
        button(mode).on_press(Message::ToggleDarkMode),
    ]
    .spacing(10);

    column![filters, actions].spacing(10).into()
}

/// The add-pin form, shown while the form is open
pub fn add_form(draft: &Draft) -> Column<'_, Message> {
    let fields = row![
        text_input("Image URL", &draft.source)
            .on_input(Message::DraftSourceChanged)
            .on_submit(Message::SubmitAdd)
            .padding(8)
            .width(320.0),
        text_input("Description", &draft.description)
            .on_input(Message::DraftDescriptionChanged)
            .on_submit(Message::SubmitAdd)
            .padding(8)
            .width(220.0),
        text_input("Tags, comma separated", &draft.tags)
            .on_input(Message::DraftTagsChanged)
            .on_submit(Message::SubmitAdd)
            .padding(8)
            .width(200.0),
        pick_list(Category::ALL, Some(draft.category), Message::DraftCategorySelected),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let buttons = row![
        button("Add").on_press(Message::SubmitAdd).style(button::primary),
        button("Cancel").on_press(Message::CancelAdd).style(button::secondary),
    ]
    .spacing(10);

    column![fields, buttons].spacing(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_choices() {
        let choices = CategoryChoice::all();
        assert_eq!(choices.len(), Category::ALL.len() + 1);
        assert_eq!(choices[0].to_string(), "All categories");
        assert_eq!(choices[1], CategoryChoice(Some(Category::Nature)));
    }
}
