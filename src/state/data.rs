/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog store, the view projector and the UI layer.

use chrono::{DateTime, Utc};
use std::fmt;

/// Stable identifier of a record, assigned by the catalog at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of board categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Nature,
    Food,
    Travel,
    Art,
    Architecture,
    Fashion,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Nature,
        Category::Food,
        Category::Travel,
        Category::Art,
        Category::Architecture,
        Category::Fashion,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Nature => "Nature",
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Art => "Art",
            Category::Architecture => "Architecture",
            Category::Fashion => "Fashion",
        };
        f.write_str(name)
    }
}

/// Represents a single image pinned to the board
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Stable catalog ID (never reused)
    pub id: ImageId,
    /// Image URI (opaque, resolved by the HTTP client)
    pub source: String,
    /// Number of likes, only ever incremented
    pub likes: u64,
    pub is_favorite: bool,
    /// Bookmarked ("saved") by the user
    pub is_saved: bool,
    pub category: Category,
    pub tags: Vec<String>,
    pub description: String,
    /// Creation time, immutable after construction
    pub created_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Short human title used by the share request and the expanded view
    pub fn title(&self) -> String {
        if self.description.trim().is_empty() {
            format!("{} pin #{}", self.category, self.id)
        } else {
            self.description.clone()
        }
    }
}

/// User-supplied fields for a manual add
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewImage {
    pub source: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Category,
}

impl NewImage {
    /// New image with only a source; every other field takes its default
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
