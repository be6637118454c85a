use super::catalog::Catalog;
use super::data::{parse_tags, Category, ImageId, NewImage};

/// Fields of the "add pin" form while it is being filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub source: String,
    pub description: String,
    /// Comma-separated, parsed on submit
    pub tags: String,
    pub category: Category,
}

impl Draft {
    fn to_new_image(&self) -> NewImage {
        NewImage {
            source: self.source.clone(),
            description: self.description.clone(),
            tags: parse_tags(&self.tags),
            category: self.category,
        }
    }
}

/// The add-pin workflow: closed, or open with a draft
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AddForm {
    #[default]
    Closed,
    Open(Draft),
}

impl AddForm {
    pub fn is_open(&self) -> bool {
        matches!(self, AddForm::Open(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            AddForm::Open(draft) => Some(draft),
            AddForm::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            AddForm::Open(draft) => Some(draft),
            AddForm::Closed => None,
        }
    }

    /// Open with an empty draft, or close and drop the draft
    pub fn toggle(&mut self) {
        *self = match self {
            AddForm::Closed => AddForm::Open(Draft::default()),
            AddForm::Open(_) => AddForm::Closed,
        };
    }

    pub fn cancel(&mut self) {
        *self = AddForm::Closed;
    }

    /// Add the draft to the catalog.
    ///
    /// On success the form stays open for the next pin: source, description
    /// and tags are cleared, the category is kept. A blank source leaves
    /// both the form and the catalog unchanged.
    pub fn submit(&mut self, catalog: &mut Catalog) -> Option<ImageId> {
        let draft = self.draft_mut()?;
        let id = catalog.add(draft.to_new_image())?;

        *draft = Draft {
            category: draft.category,
            ..Draft::default()
        };
        Some(id)
    }
}
