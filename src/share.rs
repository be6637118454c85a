/// Sharing a pin
///
/// A share request carries a title, a short text and the image URL.
/// The desktop host has no native share sheet, so the request is
/// fulfilled by copying the URL to the clipboard.

use crate::state::data::ImageRecord;

/// What the host is asked to share
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    pub fn for_record(record: &ImageRecord) -> Self {
        let text = if record.tags.is_empty() {
            format!("Check out this {} pin", record.category)
        } else {
            format!("Check out this {} pin: #{}", record.category, record.tags.join(" #"))
        };

        Self {
            title: record.title(),
            text,
            url: record.source.clone(),
        }
    }

    /// Contents placed on the clipboard when no native share is available
    pub fn clipboard_contents(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Category, ImageId};
    use chrono::Utc;

    fn record(tags: &[&str], description: &str) -> ImageRecord {
        ImageRecord {
            id: ImageId(12),
            source: "https://img.example/a.jpg".into(),
            likes: 3,
            is_favorite: false,
            is_saved: true,
            category: Category::Art,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_request_for_tagged_record() {
        let request = ShareRequest::for_record(&record(&["ink", "sketch"], "Harbor study"));
        assert_eq!(request.title, "Harbor study");
        assert_eq!(request.text, "Check out this Art pin: #ink #sketch");
        assert_eq!(request.clipboard_contents(), "https://img.example/a.jpg");
    }

    #[test]
    fn test_request_for_bare_record() {
        let request = ShareRequest::for_record(&record(&[], ""));
        assert_eq!(request.title, "Art pin #12");
        assert_eq!(request.text, "Check out this Art pin");
    }
}
