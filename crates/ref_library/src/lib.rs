//! Reference Library - Bibliographic record storage and search
//!
//! This crate holds the user's reference library: an ordered collection of
//! bibliographic records loadable from disk and searchable with the
//! case-insensitive keyword predicate used by the library list.

mod error;
mod library;

pub use error::*;
pub use library::*;
