/// Presentation layer
///
/// Widgets that render whatever the state module projects:
/// - Toolbar and add-pin form (toolbar.rs)
/// - The card grid (grid.rs)
/// - The expanded single-pin view (lightbox.rs)
/// - Thumbnail handle cache (thumbs.rs)

pub mod grid;
pub mod lightbox;
pub mod thumbs;
pub mod toolbar;
