//! Feed entries as seen by the tracker.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One item of a release stream.
///
/// Every text field is optional in practice; absent fields are empty strings.
/// The three naming fields (`volume`, `name_extend`, `chapter_name`) form an
/// ordered fallback chain rather than a schema.
///
/// # Examples
///
/// ```
/// use herald_core::FeedEntryBuilder;
///
/// let entry = FeedEntryBuilder::default()
///     .chapter_name("Chapter 001")
///     .name_extend("Cannon Fodder 001")
///     .build()
///     .unwrap();
/// assert_eq!(entry.volume(), "");
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default, setter(into))]
pub struct FeedEntry {
    /// Entry title (usually "<novel> - <chapter>")
    title: String,
    /// Link to the chapter
    link: String,
    /// Stable entry identifier
    guid: String,
    /// Grouping field: the arc/volume name when the host provides one
    volume: String,
    /// Free-text extended chapter name
    name_extend: String,
    /// Chapter title
    chapter_name: String,
    /// Category tag, used for content-advisory detection
    category: String,
    /// Publish timestamp, when present and parseable
    published: Option<DateTime<FixedOffset>>,
}

/// Normalizes a raw feed field: NBSP becomes a plain space, ends are trimmed.
pub fn normalize_field(raw: &str) -> String {
    raw.replace('\u{00A0}', " ").trim().to_string()
}

/// All entries of one poll of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
pub struct Feed {
    entries: Vec<FeedEntry>,
}

impl Feed {
    /// Wraps entries in feed order.
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    /// Entries in feed order.
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Whether the poll returned nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    ///
    /// The sort is stable on the publish timestamp. Undated entries sort
    /// before dated ones and keep their relative feed order.
    pub fn chronological(&self) -> Vec<FeedEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.published);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(guid: &str, rfc2822: &str) -> FeedEntry {
        FeedEntryBuilder::default()
            .guid(guid)
            .published(DateTime::parse_from_rfc2822(rfc2822).ok())
            .build()
            .unwrap()
    }

    #[test]
    fn chronological_restores_oldest_first() {
        let feed = Feed::new(vec![
            dated("c", "Wed, 03 Sep 2025 10:00:00 +0000"),
            dated("a", "Mon, 01 Sep 2025 10:00:00 +0000"),
            dated("b", "Tue, 02 Sep 2025 10:00:00 +0000"),
        ]);
        let guids: Vec<_> = feed
            .chronological()
            .iter()
            .map(|e| e.guid().clone())
            .collect();
        assert_eq!(guids, vec!["a", "b", "c"]);
    }

    #[test]
    fn normalize_field_replaces_nbsp() {
        assert_eq!(normalize_field("\u{00A0}Foo\u{00A0}Bar "), "Foo Bar");
    }
}
