//! Reconciling classified arc bases against the ledger.

use crate::{ArcBase, next_number};
use herald_core::{ArcLabel, ArcLedger, LabelStyle};
use tracing::{debug, info};

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionReport {
    /// Labels moved from locked to unlocked
    pub promoted: Vec<String>,
    /// Arcs first seen on the public stream, recorded straight into unlocked
    pub new_public: Vec<String>,
    /// Arcs first seen on the advance stream, recorded into locked
    pub new_locked: Vec<String>,
    /// First arc launched public with nothing paywalled: no announcement
    pub bootstrap: bool,
}

impl TransitionReport {
    /// Whether the ledger's arc lists changed.
    pub fn changed(&self) -> bool {
        !(self.promoted.is_empty() && self.new_public.is_empty() && self.new_locked.is_empty())
    }
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The updated ledger
    pub ledger: ArcLedger,
    /// Newest paywalled arc, to be passed through the announcement gate
    pub candidate: Option<String>,
    /// Transitions applied
    pub report: TransitionReport,
}

/// Applies one poll of both streams to a ledger.
///
/// The order is fixed:
/// 1. Public bases: a locked label ending with the base is promoted to
///    unlocked; a base unknown under any prefix is numbered and recorded
///    directly as unlocked.
/// 2. Advance bases not already recorded (by suffix) are numbered and
///    appended to locked.
/// 3. Both lists are deduplicated, first occurrence wins.
/// 4. If a new public arc was recorded, no new locked arc was, and locked is
///    empty, there is no candidate: a work whose first arc starts public does
///    not trigger a paywall announcement.
/// 5. Otherwise the candidate is the last locked label, if any.
///
/// The input ledger is untouched; `last_announced` and the bonus counter are
/// carried over unchanged.
pub fn reconcile(
    ledger: &ArcLedger,
    free_bases: &[ArcBase],
    paid_bases: &[ArcBase],
    style: LabelStyle,
) -> Reconciliation {
    let mut next = ledger.clone();
    let mut report = TransitionReport::default();

    for base in free_bases.iter().map(ArcBase::as_str).filter(|b| !b.is_empty()) {
        if let Some(pos) = next.locked.iter().position(|label| label.ends_with(base)) {
            let label = next.locked.remove(pos);
            if !next.unlocked.contains(&label) {
                info!(label = %label, "Arc unlocked");
                next.unlocked.push(label.clone());
                report.promoted.push(label);
            }
        } else if !next.contains_title(base) {
            let label = ArcLabel::new(next_number(&next), base).render(style);
            info!(label = %label, "New arc started public");
            next.unlocked.push(label.clone());
            report.new_public.push(label);
        } else {
            debug!(base, "Public arc already recorded");
        }
    }

    for base in paid_bases.iter().map(ArcBase::as_str).filter(|b| !b.is_empty()) {
        if next.contains_suffix(base) {
            debug!(base, "Advance arc already recorded");
            continue;
        }
        let label = ArcLabel::new(next_number(&next), base).render(style);
        info!(label = %label, "New locked arc");
        next.locked.push(label.clone());
        report.new_locked.push(label);
    }

    next.dedupe();

    report.bootstrap =
        !report.new_public.is_empty() && report.new_locked.is_empty() && next.locked.is_empty();

    let candidate = if report.bootstrap {
        info!("First arc started public; recording numbering without announcement");
        None
    } else {
        next.newest_locked().map(str::to_string)
    };

    Reconciliation {
        ledger: next,
        candidate,
        report,
    }
}
