//! Release-feed retrieval for herald.
//!
//! A novel's advance and public streams are RSS documents carrying a few
//! host-specific naming elements next to the standard ones. This crate turns
//! a feed location (an `http(s)` URL or a local path) into a
//! [`Feed`](herald_core::Feed).
//!
//! # Example
//!
//! ```rust
//! use herald_feed::parse_feed;
//!
//! let xml = r#"<rss><channel><item>
//!     <title>My Novel - Chapter 1</title>
//!     <chaptername>Chapter 1</chaptername>
//!     <nameextend>Cannon Fodder 001</nameextend>
//! </item></channel></rss>"#;
//!
//! let feed = parse_feed(xml)?;
//! assert_eq!(feed.entries()[0].name_extend(), "Cannon Fodder 001");
//! # Ok::<(), herald_error::FeedError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod advisory;
mod parser;
mod source;

pub use advisory::nsfw_detected;
pub use parser::parse_feed;
pub use source::{FeedSource, HttpFeedSource};
