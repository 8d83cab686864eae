//! Entry classification: which entries open a new arc, and under what title.

use crate::ArcMarker;
use herald_core::{FeedEntry, normalize_field};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*?\d+[^\w\s]*\s*").expect("number prefix regex is valid")
});
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Canonical, unprefixed title of an arc as derived from a feed entry.
///
/// The ledger re-prefixes it with an assigned number when the arc is first
/// recorded.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::From,
)]
pub struct ArcBase(String);

impl ArcBase {
    /// The base title.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArcBase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArcBase {
    fn from(base: &str) -> Self {
        Self(base.to_string())
    }
}

/// Removes leading decorative numbering up through the first digit run and
/// any punctuation and whitespace right after it.
///
/// ```
/// use herald_tracker::strip_number_prefix;
///
/// assert_eq!(strip_number_prefix("【Arc 22】Foo"), "Foo");
/// assert_eq!(strip_number_prefix("Arc 22: Foo"), "Foo");
/// assert_eq!(strip_number_prefix("Prefix 3) Baz"), "Baz");
/// assert_eq!(strip_number_prefix("No Digits"), "No Digits");
/// ```
pub fn strip_number_prefix(text: &str) -> &str {
    match NUMBER_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Picks the arc-opening entries and derives their base titles.
///
/// An entry opens an arc when its extended name or chapter title carries a
/// [`ArcMarker`]. The base comes from, in priority order: the grouping field,
/// the extended name without its marker suffix, the raw chapter title. Any
/// leading numbering is then stripped. Entries whose base ends up empty are
/// dropped.
///
/// Output order follows input order; callers pass entries oldest first.
pub fn classify<'a>(entries: impl IntoIterator<Item = &'a FeedEntry>) -> Vec<ArcBase> {
    entries.into_iter().filter_map(classify_entry).collect()
}

fn classify_entry(entry: &FeedEntry) -> Option<ArcBase> {
    let volume = normalize_field(entry.volume());
    let extend = normalize_field(entry.name_extend());
    let chapter = normalize_field(entry.chapter_name());

    let marker = ArcMarker::find(&extend).or_else(|| ArcMarker::find(&chapter))?;

    let chosen = if !volume.is_empty() {
        volume.replace('*', "")
    } else if !extend.is_empty() {
        let unstarred = extend.trim_matches(|c: char| c == '*' || c == ' ');
        ArcMarker::strip_suffix(unstarred).to_string()
    } else {
        chapter
    };

    let base = canonicalize(strip_number_prefix(chosen.trim()));
    if base.is_empty() {
        debug!(guid = %entry.guid(), %marker, "Arc marker found but base title is empty");
        return None;
    }

    debug!(guid = %entry.guid(), %marker, base = %base, "Classified new-arc entry");
    Some(ArcBase(base))
}

fn canonicalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.replace('*', "").trim(), " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::FeedEntryBuilder;

    fn entry(volume: &str, extend: &str, chapter: &str) -> FeedEntry {
        FeedEntryBuilder::default()
            .volume(volume)
            .name_extend(extend)
            .chapter_name(chapter)
            .build()
            .unwrap()
    }

    #[test]
    fn grouping_field_wins() {
        let bases = classify(&[entry("**Arc 3: The Heiress**", "Heiress 001", "Chapter 88")]);
        assert_eq!(bases, vec![ArcBase::from("The Heiress")]);
    }

    #[test]
    fn extended_name_loses_marker_suffix() {
        let bases = classify(&[entry("", "* Cannon Fodder 001 *", "Chapter 1")]);
        assert_eq!(bases, vec![ArcBase::from("Cannon Fodder")]);
    }

    #[test]
    fn chapter_title_is_last_resort() {
        let bases = classify(&[entry("", "", "Arc 7: Cannon Fodder.1")]);
        assert_eq!(bases, vec![ArcBase::from("Cannon Fodder.1")]);
    }

    #[test]
    fn unmarked_entries_are_ignored() {
        let bases = classify(&[
            entry("Arc 3: The Heiress", "Heiress 002", "Chapter 89"),
            entry("", "", "Chapter 90"),
        ]);
        assert!(bases.is_empty());
    }

    #[test]
    fn marker_in_grouping_field_alone_does_not_count() {
        let bases = classify(&[entry("Heiress 001", "", "Chapter 5")]);
        assert!(bases.is_empty());
    }

    #[test]
    fn empty_base_is_excluded() {
        let bases = classify(&[entry("", "", "Chapter 001")]);
        assert!(bases.is_empty());
    }

    #[test]
    fn nbsp_is_normalized_before_matching() {
        let bases = classify(&[entry("", "Cannon\u{00A0}Fodder\u{00A0}001", "")]);
        assert_eq!(bases, vec![ArcBase::from("Cannon Fodder")]);
    }

    #[test]
    fn order_is_preserved() {
        let bases = classify(&[
            entry("", "First 001", ""),
            entry("", "Middle 004", ""),
            entry("", "Second (1)", ""),
        ]);
        assert_eq!(bases, vec![ArcBase::from("First"), ArcBase::from("Second")]);
    }
}
