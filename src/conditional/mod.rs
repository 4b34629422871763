//! # Conditional Requests
//!
//! Entity tags and `If-Match` / `If-None-Match` value parsing, with the
//! strong/weak comparison rules from RFC 9110. Tags are opaque version
//! markers for a stored row; the match list decides whether a conditional
//! operation may proceed.

mod errors;
mod etag;
mod match_list;

pub use errors::{EtagError, MatchError};
pub use etag::ETag;
pub use match_list::MatchList;
