//! Numbered arc labels.
//!
//! A label is the ledger's identity for an arc: a decorative numeric prefix
//! assigned once by the numbering assigner, followed by the arc's title
//! fragment, e.g. `【Arc 7】The Heiress` or `#7 The Heiress`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:【\s*Arc\s*(\d+)\s*】|#(\d+)\b)\s*").expect("arc prefix regex is valid")
});

/// How new labels are rendered.
///
/// Parsing accepts either form regardless of the configured style, so a
/// ledger written under one style stays readable under the other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LabelStyle {
    /// `【Arc N】Title`
    #[default]
    Bracketed,
    /// `#N Title`
    Hash,
}

/// A parsed arc label.
///
/// # Examples
///
/// ```
/// use herald_core::{ArcLabel, LabelStyle};
///
/// let label = ArcLabel::new(3, "Foo");
/// assert_eq!(label.render(LabelStyle::Bracketed), "【Arc 3】Foo");
/// assert_eq!(label.render(LabelStyle::Hash), "#3 Foo");
///
/// let parsed = ArcLabel::parse("#12 Cannon Fodder").unwrap();
/// assert_eq!(parsed.number(), 12);
/// assert_eq!(parsed.title(), "Cannon Fodder");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArcLabel {
    number: u32,
    title: String,
}

impl ArcLabel {
    /// Builds a label from an assigned number and a title fragment.
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
        }
    }

    /// Parses a stored label; `None` when it carries no numeric prefix.
    pub fn parse(label: &str) -> Option<Self> {
        let caps = PREFIX.captures(label)?;
        let digits = caps.get(1).or_else(|| caps.get(2))?;
        let number = digits.as_str().parse().ok()?;
        let rest = &label[caps.get(0)?.end()..];
        Some(Self::new(number, rest.trim()))
    }

    /// The numeric prefix of a stored label, if any.
    pub fn number_of(label: &str) -> Option<u32> {
        Self::parse(label).map(|l| l.number)
    }

    /// The title fragment of a stored label; the whole label when unprefixed.
    pub fn title_of(label: &str) -> &str {
        match PREFIX.find(label) {
            Some(m) => label[m.end()..].trim(),
            None => label.trim(),
        }
    }

    /// Splits a stored label into its prefix and title for display.
    ///
    /// Returns `None` for unprefixed labels.
    pub fn split_prefix(label: &str) -> Option<(&str, &str)> {
        let m = PREFIX.find(label)?;
        Some((label[..m.end()].trim(), label[m.end()..].trim()))
    }

    /// Assigned arc number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Title fragment.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renders the label in the given style.
    pub fn render(&self, style: LabelStyle) -> String {
        match style {
            LabelStyle::Bracketed => format!("【Arc {}】{}", self.number, self.title),
            LabelStyle::Hash => format!("#{} {}", self.number, self.title),
        }
    }
}
