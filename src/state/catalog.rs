use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::data::{parse_tags, Category, ImageId, ImageRecord, NewImage};

/// Images shown on a fresh board; also the pool the synthetic generator draws from
pub const SEED_URLS: [&str; 8] = [
    "https://images.unsplash.com/photo-1560807707-8cc77767d783",
    "https://images.unsplash.com/photo-1506748686214-e9df14d4d9d0",
    "https://images.unsplash.com/photo-1518733057094-95b53143d2a7",
    "https://images.unsplash.com/photo-1555685812-4b943f1cb0eb",
    "https://images.unsplash.com/photo-1574158622682-e40e69881006",
    "https://images.unsplash.com/photo-1561948955-570b270e7c36",
    "https://images.unsplash.com/photo-1555685812-4b943f1cb0eb",
    "https://images.unsplash.com/photo-1574169208507-84376144848b",
];

/// Default upper bound on the number of records the board holds
pub const DEFAULT_MAX_RECORDS: usize = 600;

/// Highest like count a synthetic record can start with
const SYNTHETIC_MAX_LIKES: u64 = 150;

const SYNTHETIC_TAGS: [&str; 2] = ["inspiration", "discover"];
const SYNTHETIC_DESCRIPTION: &str = "Discovered while scrolling";

/// A successful mutation, as reported to observers
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Added(ImageId),
    Liked { id: ImageId, likes: u64 },
    FavoriteToggled { id: ImageId, is_favorite: bool },
    SaveToggled { id: ImageId, is_saved: bool },
    Removed(ImageId),
    Appended { count: usize },
    Shuffled,
}

type Observer = Box<dyn FnMut(&Change)>;

/// The Catalog owns the full, unfiltered list of pinned images.
///
/// Records are addressed by their stable [`ImageId`], never by their position
/// in a filtered or sorted view. Manual adds go to the front, synthetic batches
/// go to the back.
pub struct Catalog {
    records: Vec<ImageRecord>,
    next_id: u64,
    /// Monotonic counter for the cache-busting suffix of synthetic sources
    next_sig: u64,
    max_records: usize,
    rng: StdRng,
    observers: Vec<Observer>,
}

impl Catalog {
    /// Create an empty catalog with an entropy-seeded generator
    pub fn new(max_records: usize) -> Self {
        Self::with_rng(max_records, StdRng::from_entropy())
    }

    /// Create an empty catalog whose shuffle and synthetic records are reproducible
    pub fn seeded(max_records: usize, seed: u64) -> Self {
        Self::with_rng(max_records, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_records: usize, rng: StdRng) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            next_sig: 1,
            max_records,
            rng,
            observers: Vec::new(),
        }
    }

    /// Fill an empty catalog with the launch images (no likes, round-robin categories)
    pub fn with_seed_images(mut self) -> Self {
        let now = Utc::now();
        for (i, url) in SEED_URLS.iter().enumerate() {
            let id = self.allocate_id();
            self.records.push(ImageRecord {
                id,
                source: (*url).to_string(),
                likes: 0,
                is_favorite: false,
                is_saved: false,
                category: Category::ALL[i % Category::ALL.len()],
                tags: Vec::new(),
                description: String::new(),
                created_at: now,
            });
        }
        self
    }

    /// Register an observer that is called once per successful mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&Change) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_records
    }

    /// How many more synthetic records `append_batch` may add
    pub fn remaining_capacity(&self) -> usize {
        self.max_records.saturating_sub(self.records.len())
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Current position of a record in catalog order
    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Pin a new image at the front of the board.
    ///
    /// Returns `None` without touching the catalog if the source is blank.
    pub fn add(&mut self, image: NewImage) -> Option<ImageId> {
        let source = image.source.trim();
        if source.is_empty() {
            return None;
        }

        let id = self.allocate_id();
        let tags = image
            .tags
            .iter()
            .flat_map(|tag| parse_tags(tag))
            .collect();

        self.records.insert(
            0,
            ImageRecord {
                id,
                source: source.to_string(),
                likes: 0,
                is_favorite: false,
                is_saved: false,
                category: image.category,
                tags,
                description: image.description.trim().to_string(),
                created_at: Utc::now(),
            },
        );

        self.notify(Change::Added(id));
        Some(id)
    }

    /// Add one like. Returns false if the record does not exist.
    pub fn like(&mut self, id: ImageId) -> bool {
        let Some(record) = self.get_mut(id) else {
            return false;
        };
        record.likes = record.likes.saturating_add(1);
        let likes = record.likes;
        self.notify(Change::Liked { id, likes });
        true
    }

    pub fn toggle_favorite(&mut self, id: ImageId) -> bool {
        let Some(record) = self.get_mut(id) else {
            return false;
        };
        record.is_favorite = !record.is_favorite;
        let is_favorite = record.is_favorite;
        self.notify(Change::FavoriteToggled { id, is_favorite });
        true
    }

    pub fn toggle_save(&mut self, id: ImageId) -> bool {
        let Some(record) = self.get_mut(id) else {
            return false;
        };
        record.is_saved = !record.is_saved;
        let is_saved = record.is_saved;
        self.notify(Change::SaveToggled { id, is_saved });
        true
    }

    /// Permanently delete a record
    pub fn remove(&mut self, id: ImageId) -> Option<ImageRecord> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        self.notify(Change::Removed(id));
        Some(removed)
    }

    /// Append up to `n` synthetic records, stopping at the catalog capacity.
    ///
    /// Synthetic records page in older content: each one is stamped one
    /// second before the oldest record on the board, so a batch lands at
    /// the bottom of the newest-first view in the order it was appended.
    ///
    /// Returns how many records were actually appended.
    pub fn append_batch(&mut self, n: usize) -> usize {
        let count = n.min(self.remaining_capacity());
        if count == 0 {
            return 0;
        }

        let mut stamp = self.oldest_created_at().unwrap_or_else(Utc::now);
        self.records.reserve(count);
        for _ in 0..count {
            stamp -= TimeDelta::seconds(1);
            let record = self.synthesize(stamp);
            self.records.push(record);
        }

        self.notify(Change::Appended { count });
        count
    }

    /// Randomly permute the board order (Fisher-Yates); record contents are untouched
    pub fn shuffle(&mut self) {
        if self.records.len() < 2 {
            return;
        }
        self.records.shuffle(&mut self.rng);
        self.notify(Change::Shuffled);
    }

    fn oldest_created_at(&self) -> Option<DateTime<Utc>> {
        self.records.iter().map(|r| r.created_at).min()
    }

    fn synthesize(&mut self, created_at: DateTime<Utc>) -> ImageRecord {
        let id = self.allocate_id();
        let base = SEED_URLS[self.rng.gen_range(0..SEED_URLS.len())];
        let sig = self.next_sig;
        self.next_sig += 1;

        ImageRecord {
            id,
            source: format!("{}?sig={}", base, sig),
            likes: self.rng.gen_range(0..=SYNTHETIC_MAX_LIKES),
            is_favorite: false,
            is_saved: false,
            category: Category::ALL[self.rng.gen_range(0..Category::ALL.len())],
            tags: SYNTHETIC_TAGS.iter().map(|t| t.to_string()).collect(),
            description: SYNTHETIC_DESCRIPTION.to_string(),
            created_at,
        }
    }

    fn allocate_id(&mut self) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn get_mut(&mut self, id: ImageId) -> Option<&mut ImageRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    fn notify(&mut self, change: Change) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORDS)
    }
}

// Implement Debug by hand: observers are opaque closures
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("len", &self.records.len())
            .field("max_records", &self.max_records)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::view::{project, Query};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn catalog() -> Catalog {
        Catalog::seeded(DEFAULT_MAX_RECORDS, 42)
    }

    fn ids(catalog: &Catalog) -> Vec<ImageId> {
        catalog.records().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_seed_images() {
        let catalog = catalog().with_seed_images();
        assert_eq!(catalog.len(), SEED_URLS.len());
        assert!(catalog.records().iter().all(|r| r.likes == 0));
        assert_eq!(catalog.records()[1].category, Category::Food);
    }

    #[test]
    fn test_add_blank_source_is_skipped() {
        let mut catalog = catalog().with_seed_images();
        let before = catalog.len();

        assert_eq!(catalog.add(NewImage::from_source("")), None);
        assert_eq!(catalog.add(NewImage::from_source("   ")), None);
        assert_eq!(catalog.len(), before);
    }

    #[test]
    fn test_add_prepends_fresh_record() {
        let mut catalog = catalog().with_seed_images();
        let before = catalog.len();

        let id = catalog
            .add(NewImage {
                source: "  http://x/y.jpg ".into(),
                description: "A bay".into(),
                tags: vec!["sea, sky".into()],
                category: Category::Travel,
            })
            .unwrap();

        assert_eq!(catalog.len(), before + 1);
        let first = &catalog.records()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.source, "http://x/y.jpg");
        assert_eq!(first.likes, 0);
        assert!(!first.is_favorite && !first.is_saved);
        assert_eq!(first.tags, vec!["sea", "sky"]);
        assert_eq!(first.category, Category::Travel);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut catalog = catalog().with_seed_images();
        catalog.add(NewImage::from_source("http://x/y.jpg"));
        catalog.append_batch(20);

        let mut all = ids(&catalog);
        all.sort();
        all.dedup();
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_like_counts_each_call() {
        let mut catalog = catalog().with_seed_images();
        let id = catalog.records()[3].id;

        for _ in 0..5 {
            assert!(catalog.like(id));
        }
        assert_eq!(catalog.get(id).unwrap().likes, 5);
        assert!(!catalog.like(ImageId(9999)));
    }

    #[test]
    fn test_toggles_are_involutions() {
        let mut catalog = catalog().with_seed_images();
        let id = catalog.records()[0].id;

        catalog.toggle_favorite(id);
        assert!(catalog.get(id).unwrap().is_favorite);
        catalog.toggle_favorite(id);
        assert!(!catalog.get(id).unwrap().is_favorite);

        catalog.toggle_save(id);
        catalog.toggle_save(id);
        assert!(!catalog.get(id).unwrap().is_saved);
    }

    #[test]
    fn test_remove_leaves_others_untouched() {
        let mut catalog = catalog().with_seed_images();
        catalog.like(catalog.records()[5].id);
        let victim = catalog.records()[2].id;
        let mut expected = catalog.records().to_vec();
        expected.retain(|r| r.id != victim);

        let removed = catalog.remove(victim).unwrap();
        assert_eq!(removed.id, victim);
        assert_eq!(catalog.records(), expected.as_slice());
        assert!(catalog.remove(victim).is_none());
    }

    #[test]
    fn test_append_batch_goes_to_the_end() {
        let mut catalog = catalog().with_seed_images();
        let before = ids(&catalog);

        assert_eq!(catalog.append_batch(4), 4);
        assert_eq!(&ids(&catalog)[..before.len()], before.as_slice());

        let appended = &catalog.records()[before.len()..];
        assert!(appended.iter().all(|r| r.likes <= SYNTHETIC_MAX_LIKES));
        assert!(appended.iter().all(|r| r.description == SYNTHETIC_DESCRIPTION));
        assert!(appended.iter().all(|r| r.tags == SYNTHETIC_TAGS));
    }

    #[test]
    fn test_append_batch_respects_capacity() {
        let mut catalog = Catalog::seeded(10, 1).with_seed_images();

        assert_eq!(catalog.append_batch(12), 2);
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.append_batch(12), 0);
        assert_eq!(catalog.remaining_capacity(), 0);
    }

    #[test]
    fn test_shuffle_preserves_records() {
        let mut catalog = catalog().with_seed_images();
        catalog.append_batch(10);
        let mut before = catalog.records().to_vec();

        catalog.shuffle();

        let mut after = catalog.records().to_vec();
        before.sort_by_key(|r| r.id);
        after.sort_by_key(|r| r.id);
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        let mut catalog = Catalog::seeded(DEFAULT_MAX_RECORDS, 7);
        for n in 0..4 {
            catalog.add(NewImage::from_source(format!("http://x/{}.jpg", n)));
        }

        let trials = 8000;
        let mut placements: HashMap<(ImageId, usize), usize> = HashMap::new();
        for _ in 0..trials {
            catalog.shuffle();
            for (position, record) in catalog.records().iter().enumerate() {
                *placements.entry((record.id, position)).or_default() += 1;
            }
        }

        // 4 records x 4 positions, expected 2000 each; allow a wide margin
        assert_eq!(placements.len(), 16);
        for ((id, position), count) in &placements {
            assert!(
                (1700..2300).contains(count),
                "record {} at position {} seen {} times",
                id,
                position,
                count
            );
        }
    }

    #[test]
    fn test_batch_lands_at_bottom_of_default_view() {
        let mut catalog = catalog().with_seed_images();
        catalog.add(NewImage::from_source("http://x/manual.jpg"));

        catalog.append_batch(4);
        let first_batch = ids(&catalog)[catalog.len() - 4..].to_vec();
        catalog.append_batch(4);
        let second_batch = ids(&catalog)[catalog.len() - 4..].to_vec();

        let projected: Vec<ImageId> = project(catalog.records(), &Query::default())
            .iter()
            .map(|r| r.id)
            .collect();
        let tail = &projected[projected.len() - 8..];
        assert_eq!(&tail[..4], first_batch.as_slice());
        assert_eq!(&tail[4..], second_batch.as_slice());
        assert_eq!(projected[0], catalog.records()[0].id);
    }

    #[test]
    fn test_observers_see_one_change_per_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut catalog = catalog();
        let sink = Rc::clone(&seen);
        catalog.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        let id = catalog.add(NewImage::from_source("http://x/y.jpg")).unwrap();
        catalog.add(NewImage::from_source(" "));
        catalog.like(id);
        catalog.like(ImageId(404));
        catalog.append_batch(3);
        catalog.remove(id);

        assert_eq!(
            *seen.borrow(),
            vec![
                Change::Added(id),
                Change::Liked { id, likes: 1 },
                Change::Appended { count: 3 },
                Change::Removed(id),
            ]
        );
    }
}
