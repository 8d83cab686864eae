//! Arc number assignment.

use herald_core::{ArcLabel, ArcLedger};
use tracing::debug;

/// The number the next newly recorded arc receives.
///
/// Derived from ledger content rather than a stored counter, so numbering
/// survives runs that persisted new arcs but failed to announce them. The
/// result is one past the larger of the last announced arc's number and the
/// highest number recorded in either list; an empty ledger starts at 1.
/// A ledger already holding `u32::MAX` keeps returning it rather than
/// wrapping to a number that was used before.
///
/// ```
/// use herald_core::ArcLedger;
/// use herald_tracker::next_number;
///
/// let mut ledger = ArcLedger::default();
/// assert_eq!(next_number(&ledger), 1);
///
/// ledger.unlocked.push("【Arc 4】Foo".to_string());
/// ledger.last_announced = "【Arc 3】Bar".to_string();
/// assert_eq!(next_number(&ledger), 5);
/// ```
pub fn next_number(ledger: &ArcLedger) -> u32 {
    let announced = ArcLabel::number_of(&ledger.last_announced);
    let recorded = ledger
        .labels()
        .filter_map(|label| ArcLabel::number_of(label))
        .max();

    let next = announced.max(recorded).map_or(1, |n| n.saturating_add(1));
    debug!(?announced, ?recorded, next, "Assigned next arc number");
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_last_announced() {
        let ledger = ArcLedger {
            locked: vec!["【Arc 7】Foo".into()],
            last_announced: "【Arc 7】Foo".into(),
            ..Default::default()
        };
        assert_eq!(next_number(&ledger), 8);
    }

    #[test]
    fn falls_back_to_highest_recorded_number() {
        let ledger = ArcLedger {
            unlocked: vec!["【Arc 1】A".into(), "【Arc 3】C".into()],
            locked: vec!["【Arc 2】B".into()],
            ..Default::default()
        };
        assert_eq!(next_number(&ledger), 4);
    }

    #[test]
    fn unannounced_arcs_are_never_renumbered() {
        // Arc 5 was recorded by a run whose announcement failed.
        let ledger = ArcLedger {
            locked: vec!["【Arc 4】Old".into(), "【Arc 5】New".into()],
            last_announced: "【Arc 4】Old".into(),
            ..Default::default()
        };
        assert_eq!(next_number(&ledger), 6);
    }

    #[test]
    fn unprefixed_labels_are_ignored() {
        let ledger = ArcLedger {
            unlocked: vec!["Prologue".into()],
            ..Default::default()
        };
        assert_eq!(next_number(&ledger), 1);
    }

    #[test]
    fn saturates_at_largest_number() {
        let ledger = ArcLedger {
            locked: vec![format!("#{} Endless", u32::MAX)],
            ..Default::default()
        };
        assert_eq!(next_number(&ledger), u32::MAX);
    }
}
