//! Core library for reconciling an employee roster with a remote user directory.
//!
//! The flow is a single linear pass: load the field mapping, read the roster
//! from the source database, list and index the destination users by business
//! key, then create, update, or skip one employee at a time. Everything is
//! recomputed from scratch on every run; no state is carried between runs.

pub mod destination;
pub mod error;
mod macros;
pub mod mapping;
pub mod pipeline;
pub mod reconcile;
pub mod source;
pub mod types;
