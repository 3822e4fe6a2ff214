use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snafu::{OptionExt, ResultExt, Snafu, ensure};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;
use crate::filesystem::{FilesystemNode, Forest};

/// An entry left out of the scanned structure.
#[derive(Debug, Snafu)]
pub enum ScanWarning {
    #[snafu(display("Could not read an entry of {}", path.best_effort_path_display()))]
    ReadEntry { path: PathBuf, source: io::Error },
    #[snafu(display("Could not list directory {}", path.best_effort_path_display()))]
    ListDirectory { path: PathBuf, source: io::Error },
    #[snafu(display("Skipping symbolic link {}", path.best_effort_path_display()))]
    Symlink { path: PathBuf },
    #[snafu(display("Skipping special file {}", path.best_effort_path_display()))]
    SpecialFile { path: PathBuf },
    #[snafu(display("Skipping {} because its name is not valid UTF-8", path.display()))]
    NonUtf8Name { path: PathBuf },
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Baseline folder {} does not exist", path.best_effort_path_display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Baseline {} is not a directory", path.best_effort_path_display()))]
    NotADirectory { path: PathBuf },
    #[snafu(display("Failed to inspect baseline folder {}", path.best_effort_path_display()))]
    Metadata { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to list baseline folder {}", path.best_effort_path_display()))]
    ReadRoot { path: PathBuf, source: io::Error },
    #[snafu(display("Cannot derive a folder name from {}", path.display()))]
    Unnamed { path: PathBuf },
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub forest: Forest,
    pub warnings: Vec<ScanWarning>,
}

/// Builds the structure of an existing folder.
///
/// Children appear in the order the platform lists them; no sorting is applied.
#[derive(Debug, Default)]
pub struct FolderScanner {
    warnings: Vec<ScanWarning>,
}

impl FolderScanner {
    pub fn scan(root: &Path) -> Result<ScanOutcome, ScanError> {
        let metadata = fs::metadata(root).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound {
                path: root.to_path_buf(),
            },
            _ => ScanError::Metadata {
                path: root.to_path_buf(),
                source,
            },
        })?;
        ensure!(
            metadata.is_dir(),
            NotADirectorySnafu {
                path: root.to_path_buf()
            }
        );

        let name = root
            .best_effort_file_name()
            .context(UnnamedSnafu { path: root })?;
        debug!(
            "Scanning baseline folder {} as '{name}'",
            root.best_effort_path_display()
        );

        let mut scanner = FolderScanner::default();
        let entries = fs::read_dir(root).context(ReadRootSnafu { path: root })?;
        let children = scanner.scan_entries(root, entries);

        Ok(ScanOutcome {
            forest: FilesystemNode::directory(name, children).into(),
            warnings: scanner.warnings,
        })
    }

    fn scan_entries(&mut self, dir: &Path, entries: fs::ReadDir) -> Vec<FilesystemNode> {
        let mut children = Vec::new();

        for entry in entries {
            let entry = match entry.context(ReadEntrySnafu { path: dir }) {
                Ok(entry) => entry,
                Err(warning) => {
                    self.skip(warning);
                    continue;
                }
            };

            if let Some(node) = self.scan_entry(&entry) {
                children.push(node);
            }
        }

        children
    }

    fn scan_entry(&mut self, entry: &fs::DirEntry) -> Option<FilesystemNode> {
        let path = entry.path();

        let file_type = match entry.file_type().context(ReadEntrySnafu { path: &path }) {
            Ok(file_type) => file_type,
            Err(warning) => {
                self.skip(warning);
                return None;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            self.skip(ScanWarning::NonUtf8Name { path });
            return None;
        };

        if file_type.is_symlink() {
            self.skip(ScanWarning::Symlink { path });
            None
        } else if file_type.is_dir() {
            match fs::read_dir(&path).context(ListDirectorySnafu { path: &path }) {
                Ok(entries) => {
                    let children = self.scan_entries(&path, entries);
                    Some(FilesystemNode::directory(name, children))
                }
                Err(warning) => {
                    self.skip(warning);
                    None
                }
            }
        } else if file_type.is_file() {
            Some(FilesystemNode::file(name))
        } else {
            self.skip(ScanWarning::SpecialFile { path });
            None
        }
    }

    fn skip(&mut self, warning: ScanWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}
