/// View projection: filter, sort and row layout
///
/// Everything here is a pure function of the catalog records and the
/// active query, so the same inputs always produce the same rows.

use serde::Deserialize;
use std::fmt;

use super::data::{Category, ImageRecord};

/// Sort order of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Newest, SortKey::Oldest, SortKey::Popular];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
            SortKey::Popular => "Most liked",
        })
    }
}

/// Display density: how many cards share a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Large,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Compact, Density::Normal, Density::Large];

    pub fn per_row(self) -> usize {
        match self {
            Density::Compact => 6,
            Density::Normal => 4,
            Density::Large => 2,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Density::Compact => "Compact",
            Density::Normal => "Normal",
            Density::Large => "Large",
        })
    }
}

/// Active filter and sort parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub search: String,
    /// `None` shows every category
    pub category: Option<Category>,
    pub bookmarks_only: bool,
    pub sort: SortKey,
}

impl Query {
    fn matches(&self, record: &ImageRecord, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || record.description.to_lowercase().contains(needle)
            || record
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle));

        text_match
            && self.category.map_or(true, |c| record.category == c)
            && (!self.bookmarks_only || record.is_saved)
    }
}

/// Filter and sort the catalog records for display.
///
/// The sort is stable: records that compare equal keep their catalog order.
pub fn project<'a>(records: &'a [ImageRecord], query: &Query) -> Vec<&'a ImageRecord> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<&ImageRecord> = records
        .iter()
        .filter(|record| query.matches(record, &needle))
        .collect();

    match query.sort {
        SortKey::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Popular => visible.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }

    visible
}

/// One layout row of cards
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub cards: Vec<&'a ImageRecord>,
    /// Empty cells needed to keep a short last row aligned with the grid
    pub padding: usize,
}

/// Split the projected records into rows of `density.per_row()` cards
pub fn partition<'a>(visible: &[&'a ImageRecord], density: Density) -> Vec<Row<'a>> {
    let width = density.per_row();
    visible
        .chunks(width)
        .map(|chunk| Row {
            cards: chunk.to_vec(),
            padding: width - chunk.len(),
        })
        .collect()
}

/// Rows ready for rendering, plus the counts shown in the status line
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub rows: Vec<Row<'a>>,
    pub visible: usize,
    pub total: usize,
}

impl<'a> Projection<'a> {
    pub fn new(records: &'a [ImageRecord], query: &Query, density: Density) -> Self {
        let visible = project(records, query);
        Self {
            rows: partition(&visible, density),
            visible: visible.len(),
            total: records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }
}
