//! Snippet records and storage-shape normalization.
//!
//! Storage holds an ordered list of records. Two shapes exist in the wild:
//! the current `{title, text}` object and a legacy bare-string form. Both
//! normalize to [`Snippet`] at the read boundary, so nothing downstream
//! needs to know the legacy form existed.

use serde::{Deserialize, Serialize};

/// Label used when neither a title nor any text line is available.
pub const UNTITLED_LABEL: &str = "Untitled";

/// One reusable block of text: a user-facing label plus the literal
/// multi-line payload to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    pub text: String,
}

impl Snippet {
    /// Visible label for this snippet.
    ///
    /// Falls back to the first non-empty line of the text when the title
    /// is blank, then to [`UNTITLED_LABEL`].
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            return &self.title;
        }
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(UNTITLED_LABEL)
    }
}

/// Raw record shape as stored, before normalization.
///
/// Untagged: a bare string is the legacy form; an object is the current
/// form, with both fields tolerated as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Legacy(String),
    Record {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
}

impl StoredRecord {
    /// Normalize to the canonical shape.
    ///
    /// Records with no usable text are dropped: there is nothing to
    /// insert, and a missing field must not disturb the rest of the list.
    pub fn normalize(self) -> Option<Snippet> {
        let (title, text) = match self {
            Self::Legacy(text) => (String::new(), text),
            Self::Record { title, text } => (title.unwrap_or_default(), text.unwrap_or_default()),
        };
        if text.trim().is_empty() {
            tracing::debug!("dropping stored record with no usable text");
            return None;
        }
        Some(Snippet { title, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_prefers_title() {
        let snippet = Snippet {
            title: "A".to_string(),
            text: "a1".to_string(),
        };
        assert_eq!(snippet.display_title(), "A");
    }

    #[test]
    fn test_display_title_derives_first_non_empty_line() {
        let snippet = Snippet {
            title: String::new(),
            text: "b1\nb2".to_string(),
        };
        assert_eq!(snippet.display_title(), "b1");

        let leading_blanks = Snippet {
            title: String::new(),
            text: "\n\n  \nactual".to_string(),
        };
        assert_eq!(leading_blanks.display_title(), "actual");
    }

    #[test]
    fn test_display_title_untitled_fallback() {
        let snippet = Snippet {
            title: "   ".to_string(),
            text: " \n ".to_string(),
        };
        assert_eq!(snippet.display_title(), UNTITLED_LABEL);
    }

    #[test]
    fn test_normalize_legacy_string() {
        let record: StoredRecord = serde_json::from_str(r#""just some text""#).unwrap();
        let snippet = record.normalize().unwrap();
        assert_eq!(snippet.title, "");
        assert_eq!(snippet.text, "just some text");
        assert_eq!(snippet.display_title(), "just some text");
    }

    #[test]
    fn test_normalize_record_shape() {
        let record: StoredRecord =
            serde_json::from_str(r#"{"title":"greet","text":"hello\nworld"}"#).unwrap();
        let snippet = record.normalize().unwrap();
        assert_eq!(snippet.title, "greet");
        assert_eq!(snippet.text, "hello\nworld");
    }

    #[test]
    fn test_normalize_drops_textless_records() {
        let missing: StoredRecord = serde_json::from_str(r#"{"title":"orphan"}"#).unwrap();
        assert!(missing.normalize().is_none());

        let blank: StoredRecord = serde_json::from_str(r#"{"title":"t","text":"  \n "}"#).unwrap();
        assert!(blank.normalize().is_none());

        let legacy_blank: StoredRecord = serde_json::from_str(r#""""#).unwrap();
        assert!(legacy_blank.normalize().is_none());
    }

    #[test]
    fn test_list_order_survives_normalization() {
        let records: Vec<StoredRecord> =
            serde_json::from_str(r#"["first", {"title":"","text":"second"}, {"title":"dud"}]"#)
                .unwrap();
        let snippets: Vec<Snippet> = records
            .into_iter()
            .filter_map(StoredRecord::normalize)
            .collect();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "first");
        assert_eq!(snippets[1].text, "second");
    }
}
