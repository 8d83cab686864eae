//! Arc progression tracking for serialized novels.
//!
//! A novel is released on two parallel streams: an advance (paid) stream and
//! a public (free) stream. This crate turns polls of both streams into
//! updates of the novel's [`ArcLedger`](herald_core::ArcLedger) and decides
//! what, if anything, should be announced. Nothing here performs I/O.
//!
//! Pipeline:
//! 1. [`classify`] picks the entries that open a new arc and derives each
//!    arc's base title.
//! 2. [`reconcile`] promotes, registers and numbers arcs against the ledger
//!    (numbers come from [`next_number`]).
//! 3. [`should_announce`] is the idempotence boundary: the caller sends the
//!    announcement and only then calls [`record_announcement`].
//!
//! Bonus content (extras, side stories) runs the same
//! observe → compare → announce → advance shape through [`plan_bonus`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bonus;
mod classify;
mod diff;
mod gate;
mod marker;
mod numbering;
mod transition;

pub use bonus::{
    BonusKind, BonusObservation, BonusPlan, BonusRelease, BonusTotals, BonusWording, plan_bonus,
};
pub use classify::{ArcBase, classify, strip_number_prefix};
pub use diff::LedgerDiff;
pub use gate::{record_announcement, should_announce};
pub use marker::ArcMarker;
pub use numbering::next_number;
pub use transition::{Reconciliation, TransitionReport, reconcile};
