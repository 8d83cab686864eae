//! The announcement gate.

use herald_core::{ArcLabel, ArcLedger};
use tracing::debug;

/// Whether `candidate` still needs announcing.
///
/// False when there is no candidate, when it is the label already announced,
/// or when it is numbered at or below the last announced arc (the gate only
/// moves forward). On true, the caller sends the announcement and, only if
/// that succeeds, calls [`record_announcement`] and persists.
pub fn should_announce(ledger: &ArcLedger, candidate: Option<&str>) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };

    if candidate == ledger.last_announced {
        debug!(candidate, "Already announced");
        return false;
    }

    if let (Some(next), Some(last)) = (
        ArcLabel::number_of(candidate),
        ArcLabel::number_of(&ledger.last_announced),
    ) {
        if next <= last {
            debug!(candidate, last_announced = %ledger.last_announced, "Candidate precedes last announcement");
            return false;
        }
    }

    true
}

/// Advances the gate after a successful send.
pub fn record_announcement(ledger: &mut ArcLedger, candidate: &str) {
    ledger.last_announced = candidate.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_announce_without_candidate() {
        assert!(!should_announce(&ArcLedger::default(), None));
    }

    #[test]
    fn announces_fresh_candidate_once() {
        let mut ledger = ArcLedger {
            locked: vec!["#1 Foo".into()],
            ..Default::default()
        };
        assert!(should_announce(&ledger, Some("#1 Foo")));

        record_announcement(&mut ledger, "#1 Foo");
        assert!(!should_announce(&ledger, Some("#1 Foo")));
    }

    #[test]
    fn never_moves_backwards() {
        let ledger = ArcLedger {
            locked: vec!["【Arc 4】Older".into()],
            unlocked: vec!["【Arc 5】Newer".into()],
            last_announced: "【Arc 5】Newer".into(),
            ..Default::default()
        };
        assert!(!should_announce(&ledger, Some("【Arc 4】Older")));
    }
}
