/// State management module
///
/// This module handles all board state, including:
/// - Shared data structures (data.rs)
/// - The image catalog and its mutations (catalog.rs)
/// - Filter/sort/row projection for display (view.rs)
/// - The add-pin form workflow (draft.rs)
/// - Infinite-scroll rate limiting (gate.rs)
/// - In-flight download tracking (downloads.rs)
/// - Transient user notices (notice.rs)
/// - Startup settings (settings.rs)

pub mod catalog;
pub mod data;
pub mod downloads;
pub mod draft;
pub mod gate;
pub mod notice;
pub mod settings;
pub mod view;
