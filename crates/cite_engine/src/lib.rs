//! Citation Engine - Selection state and document synchronization
//!
//! This crate implements the synchronization engine that keeps three
//! moving parts consistent: the set of references checked in the library
//! list, the per-reference citation metadata being edited, and the
//! citation embedded at the cursor of the host document. The engine reacts
//! to library toggles, metadata edits, host selection-change notifications,
//! and explicit commit/cancel commands, and drives the host document
//! through the [`DocumentAdapter`] contract.

mod adapter;
mod decision;
mod engine;
mod error;
mod memory;
mod processor;
mod store;

pub use adapter::*;
pub use decision::*;
pub use engine::*;
pub use error::*;
pub use memory::*;
pub use processor::*;
pub use store::*;
