use iced::widget::{button, column, container, scrollable, text, Column};
use iced::{keyboard, task, Alignment, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod net;
mod share;
mod state;
mod ui;

use net::DownloadError;
use state::catalog::Catalog;
use state::data::{Category, ImageId};
use state::downloads::Downloads;
use state::draft::AddForm;
use state::gate::ScrollGate;
use state::notice::{NoticeKind, Notices};
use state::settings::Settings;
use state::view::{Density, Projection, Query, SortKey};
use ui::thumbs::ThumbnailCache;
use ui::toolbar::CategoryChoice;

/// Main application state
struct Pinboard {
    /// Every pin on the board, unfiltered
    catalog: Catalog,
    /// Active search, filters and sort
    query: Query,
    density: Density,
    dark_mode: bool,
    add_form: AddForm,
    /// Pin shown in the expanded view
    expanded: Option<ImageId>,
    gate: ScrollGate,
    settings: Settings,
    /// Set once the batch loader has hit the record cap
    board_full: bool,
    http: reqwest::Client,
    thumbnails: ThumbnailCache,
    /// In-flight downloads, aborted when their pin is removed
    downloads: Downloads<task::Handle>,
    notices: Notices,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // Query
    SearchChanged(String),
    CategorySelected(CategoryChoice),
    SortSelected(SortKey),
    DensitySelected(Density),
    ToggleBookmarksOnly,

    // Board-wide actions
    Shuffle,
    ToggleDarkMode,
    LoadMore,
    /// Grid scrolled; carries the remaining distance to the bottom in pixels
    GridScrolled(f32),

    // Add-pin form
    ToggleAddForm,
    CancelAdd,
    DraftSourceChanged(String),
    DraftDescriptionChanged(String),
    DraftTagsChanged(String),
    DraftCategorySelected(Category),
    SubmitAdd,

    // Per-pin actions
    Like(ImageId),
    ToggleFavorite(ImageId),
    ToggleSave(ImageId),
    Remove(ImageId),
    Expand(ImageId),
    CloseExpanded,
    /// Escape closes the expanded view first, then the add form
    EscapePressed,
    Share(ImageId),
    Download(ImageId),

    // Background results
    DownloadFinished(ImageId, Result<PathBuf, DownloadError>),
    ThumbnailLoaded(String, Result<Vec<u8>, DownloadError>),
    Tick(Instant),
}

impl Pinboard {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        let catalog = match settings.seed {
            Some(seed) => Catalog::seeded(settings.max_records, seed),
            None => Catalog::new(settings.max_records),
        };
        let mut catalog = catalog.with_seed_images();
        catalog.subscribe(|change| tracing::debug!(?change, "catalog changed"));

        tracing::info!(
            pins = catalog.len(),
            batch_size = settings.batch_size,
            max_records = settings.max_records,
            "🎨 Pinboard initialized"
        );

        let mut board = Pinboard {
            catalog,
            query: Query::default(),
            density: settings.density,
            dark_mode: settings.dark_mode,
            add_form: AddForm::Closed,
            expanded: None,
            gate: ScrollGate::new(settings.scroll_threshold, settings.load_cooldown()),
            settings,
            board_full: false,
            http: net::client(),
            thumbnails: ThumbnailCache::new(settings.max_records),
            downloads: Downloads::new(),
            notices: Notices::default(),
        };

        let thumbnails = board.fetch_thumbnails();
        (board, thumbnails)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.apply(message);
        Task::batch([task, self.fetch_thumbnails()])
    }

    fn apply(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(search) => {
                self.query.search = search;
            }
            Message::CategorySelected(CategoryChoice(category)) => {
                self.query.category = category;
            }
            Message::SortSelected(sort) => {
                self.query.sort = sort;
            }
            Message::DensitySelected(density) => {
                self.density = density;
            }
            Message::ToggleBookmarksOnly => {
                self.query.bookmarks_only = !self.query.bookmarks_only;
            }
            Message::Shuffle => {
                self.catalog.shuffle();
            }
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
            }
            Message::LoadMore => {
                self.load_batch();
            }
            Message::GridScrolled(distance_to_end) => {
                if self.gate.on_scroll(distance_to_end, Instant::now()) {
                    self.load_batch();
                }
            }

            Message::ToggleAddForm => {
                self.add_form.toggle();
            }
            Message::CancelAdd => {
                self.add_form.cancel();
            }
            Message::DraftSourceChanged(value) => {
                if let Some(draft) = self.add_form.draft_mut() {
                    draft.source = value;
                }
            }
            Message::DraftDescriptionChanged(value) => {
                if let Some(draft) = self.add_form.draft_mut() {
                    draft.description = value;
                }
            }
            Message::DraftTagsChanged(value) => {
                if let Some(draft) = self.add_form.draft_mut() {
                    draft.tags = value;
                }
            }
            Message::DraftCategorySelected(category) => {
                if let Some(draft) = self.add_form.draft_mut() {
                    draft.category = category;
                }
            }
            Message::SubmitAdd => {
                if let Some(id) = self.add_form.submit(&mut self.catalog) {
                    tracing::info!(%id, "pin added");
                }
            }

            Message::Like(id) => {
                self.catalog.like(id);
            }
            Message::ToggleFavorite(id) => {
                self.catalog.toggle_favorite(id);
            }
            Message::ToggleSave(id) => {
                self.catalog.toggle_save(id);
            }
            Message::Remove(id) => {
                if self.downloads.cancel_for(id) {
                    tracing::debug!(%id, "aborted download of removed pin");
                }
                if self.expanded == Some(id) {
                    self.expanded = None;
                }
                if self.catalog.remove(id).is_some() {
                    // Removing pins can bring the cap back into reach
                    self.board_full = false;
                }
            }
            Message::Expand(id) => {
                if self.catalog.get(id).is_some() {
                    self.expanded = Some(id);
                }
            }
            Message::CloseExpanded => {
                self.expanded = None;
            }
            Message::EscapePressed => {
                if self.expanded.is_some() {
                    self.expanded = None;
                } else {
                    self.add_form.cancel();
                }
            }
            Message::Share(id) => {
                let Some(record) = self.catalog.get(id) else {
                    return Task::none();
                };
                let request = share::ShareRequest::for_record(record);
                tracing::info!(%id, text = %request.text, url = %request.url, "sharing pin");
                self.notices.info(format!("🔗 Link copied: {}", request.title));
                return iced::clipboard::write(request.clipboard_contents());
            }
            Message::Download(id) => {
                return self.start_download(id);
            }

            Message::DownloadFinished(id, result) => {
                self.downloads.finish(id);
                match result {
                    Ok(path) => {
                        self.notices.info(format!("✅ Saved to {}", path.display()));
                    }
                    Err(DownloadError::Cancelled) => {
                        tracing::debug!(%id, "download cancelled by user");
                    }
                    Err(err) => {
                        tracing::warn!(%id, "download failed: {err}");
                        self.notices.error(format!("⚠️ Download failed: {err}"));
                    }
                }
            }
            Message::ThumbnailLoaded(source, result) => match result {
                Ok(bytes) => self.thumbnails.insert(source, bytes),
                Err(err) => {
                    tracing::warn!(%source, "thumbnail fetch failed: {err}");
                    self.thumbnails.fail(source);
                }
            },
            Message::Tick(now) => {
                self.notices.prune(now);
            }
        }

        Task::none()
    }

    /// Append one synthetic batch, telling the user once when the cap is hit
    fn load_batch(&mut self) {
        let appended = self.catalog.append_batch(self.settings.batch_size);
        if appended > 0 {
            tracing::debug!(appended, total = self.catalog.len(), "batch loaded");
        } else if !self.board_full {
            self.board_full = true;
            tracing::info!(max_records = self.catalog.capacity(), "board is full");
            self.notices.info(format!(
                "The board is full ({} pins). Remove some to load more.",
                self.catalog.capacity()
            ));
        }
    }

    fn start_download(&mut self, id: ImageId) -> Task<Message> {
        let Some(record) = self.catalog.get(id) else {
            return Task::none();
        };
        if self.downloads.is_active(id) {
            self.notices.info("This image is already downloading");
            return Task::none();
        }

        tracing::info!(%id, url = %record.source, "starting download");
        let (task, handle) = Task::perform(
            net::download::download(self.http.clone(), id, record.source.clone()),
            move |result| Message::DownloadFinished(id, result),
        )
        .abortable();

        self.downloads.start(id, handle);
        task
    }

    /// Request thumbnails for every visible pin that has none yet
    fn fetch_thumbnails(&mut self) -> Task<Message> {
        let visible = state::view::project(self.catalog.records(), &self.query);
        let missing = self
            .thumbnails
            .claim_missing(visible.iter().map(|record| record.source.as_str()));

        Task::batch(missing.into_iter().map(|source| {
            let client = self.http.clone();
            Task::perform(
                net::fetch_bytes(client, source.clone()),
                move |result| Message::ThumbnailLoaded(source.clone(), result),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mut content: Column<Message> = column![
            text("Pinboard").size(32),
            ui::toolbar::toolbar(&self.query, self.density, self.dark_mode, self.add_form.is_open()),
        ]
        .spacing(16)
        .padding(20);

        if let Some(draft) = self.add_form.draft() {
            content = content.push(ui::toolbar::add_form(draft));
        }

        for notice in self.notices.iter() {
            let line = text(&notice.text).size(14);
            content = content.push(match notice.kind {
                NoticeKind::Info => line,
                NoticeKind::Error => line.style(text::danger),
            });
        }

        let expanded = self.expanded.and_then(|id| self.catalog.get(id));
        if let Some(record) = expanded {
            let lightbox = ui::lightbox::lightbox(record, &self.thumbnails);
            return content.push(scrollable(lightbox).height(Length::Fill)).into();
        }

        let projection = Projection::new(self.catalog.records(), &self.query, self.density);
        content = content.push(
            text(format!(
                "Showing {} of {} pins",
                projection.visible, projection.total
            ))
            .size(14),
        );

        if projection.is_empty() {
            let hint = if self.catalog.is_empty() {
                column![
                    text("The board is empty. Add a pin or load more.").size(18),
                    button("Load more").on_press(Message::LoadMore),
                ]
            } else {
                column![text("No pins match the current filters").size(18)]
            };
            return content
                .push(
                    container(hint.spacing(10).align_x(Alignment::Center))
                        .center_x(Length::Fill)
                        .center_y(Length::Fill),
                )
                .into();
        }

        let mut board = ui::grid::grid(&projection, self.density, &self.thumbnails);
        if self.catalog.remaining_capacity() > 0 {
            board = board.push(
                container(button("Load more").on_press(Message::LoadMore))
                    .center_x(Length::Fill),
            );
        }

        content
            .push(
                scrollable(board.padding(4).align_x(Alignment::Center))
                    .on_scroll(|viewport| {
                        let remaining = viewport.content_bounds().height
                            - viewport.bounds().height
                            - viewport.absolute_offset().y;
                        Message::GridScrolled(remaining.max(0.0))
                    })
                    .height(Length::Fill),
            )
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let escape = if self.expanded.is_some() || self.add_form.is_open() {
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
                _ => None,
            })
        } else {
            Subscription::none()
        };

        let tick = if self.notices.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(Duration::from_secs(1)).map(Message::Tick)
        };

        Subscription::batch([escape, tick])
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pinboard=info")),
        )
        .init();

    iced::application("Pinboard", Pinboard::update, Pinboard::view)
        .theme(Pinboard::theme)
        .subscription(Pinboard::subscription)
        .centered()
        .run_with(Pinboard::new)
}
