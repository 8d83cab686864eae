//! Announcement runs for herald.
//!
//! This crate wires the pure tracker to its collaborators:
//! - [`HeraldConfig`]: layered configuration and per-novel mapping
//! - [`ArcAnnouncer`]: one novel's arc run (fetch, reconcile, gate, send, persist)
//! - [`BonusAnnouncer`]: one novel's extras / side stories run
//! - [`BatchRunner`]: every configured novel, with per-novel failure isolation
//! - [`RunMetrics`]: counters reported at the end of a batch

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod arcs;
mod batch;
mod config;
mod extras;
mod format;
mod metrics;
mod outcome;
mod services;

pub use arcs::ArcAnnouncer;
pub use batch::{BatchReport, BatchRunner, RunMode, RunOptions};
pub use config::{
    DiscordConfig, DiscordCredentials, GitConfig, HeraldConfig, HttpConfig, NovelConfig,
    StorageConfig, StyleConfig,
};
pub use extras::BonusAnnouncer;
pub use format::{ArcAnnouncement, FormatContext, format_arc_announcement, format_bonus_announcement};
pub use metrics::{MetricsSnapshot, RunMetrics};
pub use outcome::{NovelFailure, NovelOutcome, RunKind};
pub use services::Services;
