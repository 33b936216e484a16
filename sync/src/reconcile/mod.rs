pub mod diff;
pub mod index;

pub use diff::{build_comment, build_create_payload, compute_changes};
pub use index::UserIndex;
