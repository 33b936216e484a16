mod base;
mod connection;
mod glpi;
mod sync;
mod syncer;

pub use base::*;
pub use connection::*;
pub use glpi::*;
pub use sync::*;
pub use syncer::*;
