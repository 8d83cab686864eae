//! Core data types for herald.
//!
//! This crate provides the foundation data types shared by the tracker, the
//! feed and storage adapters, and the orchestrating bot:
//! - [`FeedEntry`] / [`Feed`]: read-only records from a release stream
//! - [`ArcLabel`] / [`LabelStyle`]: numbered arc labels as stored in a ledger
//! - [`ArcLedger`]: the durable per-novel record of arc and bonus state

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod feed;
mod label;
mod ledger;

pub use feed::{Feed, FeedEntry, FeedEntryBuilder, FeedEntryBuilderError, normalize_field};
pub use label::{ArcLabel, LabelStyle};
pub use ledger::ArcLedger;
