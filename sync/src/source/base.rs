use std::future::Future;

use crate::error::SyncResult;
use crate::types::Roster;

/// Trait for systems that provide the source-of-truth employee roster.
///
/// Implementations run the fixed roster projection and materialize one
/// [`crate::types::Employee`] per business key. Any connection an
/// implementation opens must be released before `fetch_roster` returns, so
/// the source is never held across the destination phase.
pub trait RosterSource {
    /// Returns the name of the source.
    fn name() -> &'static str;

    /// Fetches the full employee roster, keyed by business key.
    fn fetch_roster(&self) -> impl Future<Output = SyncResult<Roster>> + Send;
}
