//! New-arc markers.
//!
//! Hosts flag the first installment of an arc in the chapter text. The
//! recognised forms live here as data so a format change is a one-place edit.

use regex::Regex;
use std::sync::LazyLock;

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b001\b").expect("ordinal marker regex is valid"));
static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+001$").expect("ordinal suffix regex is valid"));
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(1\)").expect("parenthesized marker regex is valid"));
static PARENTHESIZED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(1\)$").expect("parenthesized suffix regex is valid"));
static DOT_ONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*1$").expect("dot-one marker regex is valid"));

/// A textual convention meaning "this is item #1 of a new arc".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ArcMarker {
    /// A standalone `001`, e.g. `Cannon Fodder 001`
    #[strum(serialize = "001")]
    Ordinal,
    /// A bracketed `(1)`, e.g. `Cannon Fodder (1)`
    #[strum(serialize = "(1)")]
    Parenthesized,
    /// A trailing `.1` or `. 1`, e.g. `Chapter 12.1`
    #[strum(serialize = ".1")]
    TrailingDotOne,
}

impl ArcMarker {
    /// Every recognised marker, in matching priority.
    pub const ALL: [ArcMarker; 3] = [
        ArcMarker::Ordinal,
        ArcMarker::Parenthesized,
        ArcMarker::TrailingDotOne,
    ];

    fn detector(self) -> &'static Regex {
        match self {
            ArcMarker::Ordinal => &*ORDINAL,
            ArcMarker::Parenthesized => &*PARENTHESIZED,
            ArcMarker::TrailingDotOne => &*DOT_ONE,
        }
    }

    fn suffix(self) -> &'static Regex {
        match self {
            ArcMarker::Ordinal => &*ORDINAL_SUFFIX,
            ArcMarker::Parenthesized => &*PARENTHESIZED_SUFFIX,
            ArcMarker::TrailingDotOne => &*DOT_ONE,
        }
    }

    /// The first marker found anywhere in `text`.
    pub fn find(text: &str) -> Option<ArcMarker> {
        Self::ALL.into_iter().find(|m| m.detector().is_match(text))
    }

    /// Removes one trailing marker from `text`, if it ends with one.
    pub fn strip_suffix(text: &str) -> &str {
        for marker in Self::ALL {
            if let Some(m) = marker.suffix().find(text) {
                return text[..m.start()].trim_end();
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_marker_form() {
        assert_eq!(ArcMarker::find("Cannon Fodder 001"), Some(ArcMarker::Ordinal));
        assert_eq!(ArcMarker::find("Cannon Fodder (1)"), Some(ArcMarker::Parenthesized));
        assert_eq!(ArcMarker::find("Chapter 12.1"), Some(ArcMarker::TrailingDotOne));
        assert_eq!(ArcMarker::find("Chapter 12. 1"), Some(ArcMarker::TrailingDotOne));
    }

    #[test]
    fn continuation_chapters_carry_no_marker() {
        assert_eq!(ArcMarker::find("Cannon Fodder 002"), None);
        assert_eq!(ArcMarker::find("Chapter 1001"), None);
        assert_eq!(ArcMarker::find("Chapter 12.10"), None);
        assert_eq!(ArcMarker::find("Chapter 11"), None);
    }

    #[test]
    fn strips_trailing_marker_only() {
        assert_eq!(ArcMarker::strip_suffix("Cannon Fodder 001"), "Cannon Fodder");
        assert_eq!(ArcMarker::strip_suffix("Cannon Fodder(1)"), "Cannon Fodder");
        assert_eq!(ArcMarker::strip_suffix("Heiress .1"), "Heiress");
        assert_eq!(ArcMarker::strip_suffix("001 Leading"), "001 Leading");
    }
}
