use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use snafu::{IntoError, ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemNode, Forest};

/// An entry that could not be materialized. Replication goes on with the next entry.
#[derive(Debug, Snafu)]
pub enum CreateWarning {
    #[snafu(display(
        "Could not create directory {}, skipping it and {} entries below it",
        path.best_effort_path_display(),
        skipped_below
    ))]
    Directory {
        path: PathBuf,
        skipped_below: usize,
        source: io::Error,
    },
    #[snafu(display("Could not create file {}", path.best_effort_path_display()))]
    File { path: PathBuf, source: io::Error },
    #[snafu(display(
        "Cannot create file {} because a directory is in the way",
        path.best_effort_path_display()
    ))]
    DirectoryInTheWay { path: PathBuf },
}

#[derive(Debug, Snafu)]
pub enum ReplicationError {
    #[snafu(display("Failed to prepare target location {}", path.best_effort_path_display()))]
    TargetRoot { path: PathBuf, source: io::Error },
}

/// What a replication run did on disk.
#[derive(Debug, Default)]
pub struct ReplicationReport {
    pub directories_created: usize,
    pub files_created: usize,
    pub directories_existing: usize,
    pub files_existing: usize,
    /// Entries not created because of a warning, including everything below a failed directory.
    pub skipped: usize,
    pub warnings: Vec<CreateWarning>,
}

impl ReplicationReport {
    fn skip(&mut self, count: usize, warning: CreateWarning) {
        warn!("{warning}");
        self.skipped += count;
        self.warnings.push(warning);
    }
}

/// Materializes a [`Forest`] below a target directory.
///
/// Directories are created before their children, depth first. Existing directories are
/// reused and existing files are left untouched, so running it twice is harmless.
#[derive(Debug, Clone)]
pub struct StructureReplicator {
    target: PathBuf,
    folders_only: bool,
}

impl StructureReplicator {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            folders_only: false,
        }
    }

    /// Only create directories, never files.
    pub fn folders_only(mut self, folders_only: bool) -> Self {
        self.folders_only = folders_only;
        self
    }

    pub fn replicate(&self, forest: &Forest) -> Result<ReplicationReport, ReplicationError> {
        fs::create_dir_all(&self.target).context(TargetRootSnafu {
            path: &self.target,
        })?;
        info!(
            "Replicating {} top-level entries into {}",
            forest.roots().len(),
            self.target.best_effort_path_display()
        );

        let mut report = ReplicationReport::default();
        for root in forest.roots() {
            self.replicate_node(root, &self.target, &mut report);
        }

        debug!("Replication finished: {report:?}");
        Ok(report)
    }

    fn replicate_node(&self, node: &FilesystemNode, parent: &Path, report: &mut ReplicationReport) {
        let path = parent.join(node.name());

        match node {
            FilesystemNode::Directory { children, .. } => {
                let existed = path.is_dir();
                let skipped = || self.creatable_count(node);
                let created = fs::create_dir_all(&path).with_context(|_| DirectorySnafu {
                    path: &path,
                    skipped_below: skipped() - 1,
                });
                if let Err(warning) = created {
                    report.skip(skipped(), warning);
                    return;
                }

                if existed {
                    report.directories_existing += 1;
                } else {
                    debug!("Created {} {}", node.kind(), path.display());
                    report.directories_created += 1;
                }

                for child in children {
                    self.replicate_node(child, &path, report);
                }
            }
            FilesystemNode::File { .. } => {
                if !self.folders_only {
                    self.create_file(path, report);
                }
            }
        }
    }

    fn create_file(&self, path: PathBuf, report: &mut ReplicationReport) {
        // Never truncate: an existing file keeps its content
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                debug!("Created file {}", path.display());
                report.files_created += 1;
            }
            Err(source) if source.kind() == io::ErrorKind::AlreadyExists => {
                if path.is_dir() {
                    report.skip(1, CreateWarning::DirectoryInTheWay { path });
                } else {
                    report.files_existing += 1;
                }
            }
            Err(source) => report.skip(1, FileSnafu { path }.into_error(source)),
        }
    }

    /// Entries of `node`'s subtree that this replicator would try to create.
    fn creatable_count(&self, node: &FilesystemNode) -> usize {
        let tally = node.tally();
        if self.folders_only {
            tally.directories
        } else {
            tally.total()
        }
    }
}
