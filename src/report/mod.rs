//! Warnings gathered during a run and the final user-facing output.

mod issue;
mod summary;

pub use issue::Issue;
pub use summary::{init_color, write_outcome};
