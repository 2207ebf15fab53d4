//! Pipeline entry points for feed generation.
//!
//! - `NoteFeedBuilder`: build a user's notes feed in summary or full-text mode

pub mod feed;

pub use feed::{NoteFeedBuilder, parse_mode};
