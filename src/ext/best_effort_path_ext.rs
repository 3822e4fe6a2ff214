use std::path::{Component, Path, PathBuf};

/// Absolute form of `path` with `.` and `..` folded away, without touching the filesystem.
fn lexically_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    absolute
        .components()
        .fold(PathBuf::new(), |mut acc, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    // Never climb above the root or prefix
                    if acc.file_name().is_some() {
                        acc.pop();
                    }
                }
                other => acc.push(other),
            }
            acc
        })
}

pub trait BestEffortPathExt {
    /// Human readable absolute path, canonical when the path exists.
    fn best_effort_path_display(&self) -> String;

    /// The entry name a path stands for, resolving `.`, `..` and trailing separators.
    fn best_effort_file_name(&self) -> Option<String>;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        self.canonicalize()
            .unwrap_or_else(|_| lexically_absolute(self))
            .display()
            .to_string()
    }

    fn best_effort_file_name(&self) -> Option<String> {
        let resolved = self
            .canonicalize()
            .unwrap_or_else(|_| lexically_absolute(self));
        resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn display_of_missing_path_is_absolute_and_folded() {
        let shown = Path::new("missing/./nested/../leaf").best_effort_path_display();
        let expected = std::env::current_dir()
            .expect("Failed to read current dir")
            .join("missing")
            .join("leaf");
        assert_eq!(shown, expected.display().to_string());
    }

    #[test]
    fn parent_dir_does_not_escape_root() {
        let folded = lexically_absolute(Path::new("/../../etc"));
        assert_eq!(folded, PathBuf::from("/etc"));
    }

    #[test]
    fn file_name_of_dot_is_the_directory_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("project");
        std::fs::create_dir(&nested).expect("Failed to create nested directory");

        let name = nested.join(".").best_effort_file_name();
        assert_eq!(name.as_deref(), Some("project"));

        let name = nested.join("sub").join("..").best_effort_file_name();
        assert_eq!(name.as_deref(), Some("project"));
    }
}
