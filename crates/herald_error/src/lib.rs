//! Error types for herald.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use herald_error::{FeedError, FeedErrorKind, HeraldResult};
//!
//! fn fetch_feed() -> HeraldResult<String> {
//!     Err(FeedError::new(FeedErrorKind::Unreachable("connection refused".into())))?
//! }
//!
//! let err = fetch_feed().unwrap_err();
//! assert!(err.is_transient());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commit;
mod config;
mod discord;
mod error;
mod feed;
mod http;
mod json;
mod storage;

pub use commit::{CommitError, CommitErrorKind};
pub use config::ConfigError;
pub use discord::{DiscordError, DiscordErrorKind};
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use feed::{FeedError, FeedErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
