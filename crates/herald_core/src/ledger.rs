//! The per-novel arc ledger.

use crate::ArcLabel;
use serde::{Deserialize, Serialize};

/// Durable record of one novel's arc and bonus-content state.
///
/// Field names on disk match the history files written by earlier tooling,
/// so existing ledgers load unchanged:
///
/// ```json
/// {
///   "unlocked": ["【Arc 1】Foo"],
///   "locked": ["【Arc 2】Bar"],
///   "last_announced": "【Arc 2】Bar",
///   "last_extra_announced": 0
/// }
/// ```
///
/// Invariants maintained by the tracker:
/// - a label is in at most one of `unlocked`/`locked`, and only moves
///   locked → unlocked
/// - neither list holds duplicates; insertion order is discovery order
/// - `last_announced` only advances
/// - `bonus_counter` only increases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcLedger {
    /// Arc labels currently public, in discovery order
    #[serde(default)]
    pub unlocked: Vec<String>,
    /// Arc labels currently paywalled; the last one is the newest
    #[serde(default)]
    pub locked: Vec<String>,
    /// Label most recently reported to the notification sink, empty if none
    #[serde(default)]
    pub last_announced: String,
    /// Highest bonus-item index announced so far
    #[serde(default, rename = "last_extra_announced")]
    pub bonus_counter: u32,
}

impl ArcLedger {
    /// Whether no arc has been recorded and nothing announced.
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty() && self.locked.is_empty() && self.last_announced.trim().is_empty()
    }

    /// All recorded labels, unlocked first.
    pub fn labels(&self) -> impl Iterator<Item = &String> {
        self.unlocked.iter().chain(self.locked.iter())
    }

    /// The most recently paywalled arc.
    pub fn newest_locked(&self) -> Option<&str> {
        self.locked.last().map(String::as_str)
    }

    /// Whether any recorded label has exactly this title under any prefix.
    pub fn contains_title(&self, title: &str) -> bool {
        self.labels().any(|label| ArcLabel::title_of(label) == title)
    }

    /// Whether any recorded label ends with this base.
    pub fn contains_suffix(&self, base: &str) -> bool {
        self.labels().any(|label| label.ends_with(base))
    }

    /// Removes duplicate labels from both lists, keeping first occurrences.
    pub fn dedupe(&mut self) {
        dedupe_in_place(&mut self.unlocked);
        dedupe_in_place(&mut self.locked);
    }
}

fn dedupe_in_place(labels: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    labels.retain(|label| seen.insert(label.clone()));
}
