//! Ledger comparison for previews and logs.

use herald_core::ArcLedger;
use std::fmt;

/// Differences between two ledgers of the same novel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerDiff {
    /// Labels present in `after.unlocked` only
    pub unlocked_added: Vec<String>,
    /// Labels present in `before.unlocked` only
    pub unlocked_removed: Vec<String>,
    /// Labels present in `after.locked` only
    pub locked_added: Vec<String>,
    /// Labels present in `before.locked` only
    pub locked_removed: Vec<String>,
    /// `(before, after)` when the last announced label changed
    pub last_announced: Option<(String, String)>,
    /// `(before, after)` when the bonus counter changed
    pub bonus_counter: Option<(u32, u32)>,
}

impl LedgerDiff {
    /// Computes the diff, preserving list order of the side each label is on.
    pub fn between(before: &ArcLedger, after: &ArcLedger) -> Self {
        let only_in = |a: &[String], b: &[String]| -> Vec<String> {
            a.iter().filter(|label| !b.contains(label)).cloned().collect()
        };

        Self {
            unlocked_added: only_in(&after.unlocked, &before.unlocked),
            unlocked_removed: only_in(&before.unlocked, &after.unlocked),
            locked_added: only_in(&after.locked, &before.locked),
            locked_removed: only_in(&before.locked, &after.locked),
            last_announced: (before.last_announced != after.last_announced)
                .then(|| (before.last_announced.clone(), after.last_announced.clone())),
            bonus_counter: (before.bonus_counter != after.bonus_counter)
                .then_some((before.bonus_counter, after.bonus_counter)),
        }
    }

    /// Whether the two ledgers are equivalent.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl fmt::Display for LedgerDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "no changes");
        }

        let sections = [
            ("unlocked", &self.unlocked_added, &self.unlocked_removed),
            ("locked", &self.locked_added, &self.locked_removed),
        ];
        for (name, added, removed) in sections {
            if added.is_empty() && removed.is_empty() {
                continue;
            }
            writeln!(f, "{name}:")?;
            for label in added {
                writeln!(f, "  + {label}")?;
            }
            for label in removed {
                writeln!(f, "  - {label}")?;
            }
        }
        if let Some((before, after)) = &self.last_announced {
            writeln!(f, "last_announced: {before:?} -> {after:?}")?;
        }
        if let Some((before, after)) = self.bonus_counter {
            writeln!(f, "last_extra_announced: {before} -> {after}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_shows_as_move() {
        let before = ArcLedger {
            locked: vec!["#3 Foo".into()],
            ..Default::default()
        };
        let after = ArcLedger {
            unlocked: vec!["#3 Foo".into()],
            ..Default::default()
        };
        let diff = LedgerDiff::between(&before, &after);
        assert_eq!(diff.unlocked_added, vec!["#3 Foo"]);
        assert_eq!(diff.locked_removed, vec!["#3 Foo"]);
        let text = diff.to_string();
        assert!(text.contains("  + #3 Foo"));
        assert!(text.contains("  - #3 Foo"));
    }

    #[test]
    fn identical_ledgers() {
        let ledger = ArcLedger::default();
        let diff = LedgerDiff::between(&ledger, &ledger);
        assert!(diff.is_empty());
        assert_eq!(diff.to_string(), "no changes\n");
    }
}
