//! Filesystem structure model, and the two sides that touch the disk.
//!
//! [`FolderScanner`] reads an existing folder into a [`Forest`], and
//! [`StructureReplicator`] writes a [`Forest`] back out as directories and empty files.

mod replicator;
mod scanner;
mod tree;

pub use replicator::{CreateWarning, ReplicationError, ReplicationReport, StructureReplicator};
pub use scanner::{FolderScanner, ScanError, ScanWarning};
pub use tree::{FilesystemNode, Forest, NodeKind};
