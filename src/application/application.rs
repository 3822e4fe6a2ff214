use std::fs;
use std::path::{Path, PathBuf};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::application::data::Outcome;
use crate::ext::BestEffortPathExt;
use crate::filesystem::{FolderScanner, Forest, ReplicationError, ScanError, StructureReplicator};
use crate::parser::TreeTextParser;
use crate::report::Issue;

/// Where the structure to replicate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Baseline {
    TreeText(PathBuf),
    Folder(PathBuf),
}

impl Baseline {
    fn detect(path: &Path) -> Result<Self, ApplicationError> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => Ok(Baseline::TreeText(path.to_path_buf())),
            Ok(metadata) if metadata.is_dir() => Ok(Baseline::Folder(path.to_path_buf())),
            _ => {
                warn!(
                    "Baseline {} is neither a file nor a folder",
                    path.best_effort_path_display()
                );
                BaselineNotFoundSnafu { path }.fail()
            }
        }
    }

    fn load(&self, config: &RuntimeConfig) -> Result<(Forest, Vec<Issue>), ApplicationError> {
        match self {
            Baseline::TreeText(path) => {
                debug!("Reading tree text from {}", path.best_effort_path_display());
                let text = fs::read_to_string(path).context(BaselineReadSnafu { path })?;
                let outcome = TreeTextParser::new(config.parser).parse(&text);
                let issues = outcome.warnings.into_iter().map(Issue::from).collect();
                Ok((outcome.forest, issues))
            }
            Baseline::Folder(path) => {
                let outcome = FolderScanner::scan(path).context(BaselineScanSnafu)?;
                let issues = outcome.warnings.into_iter().map(Issue::from).collect();
                Ok((outcome.forest, issues))
            }
        }
    }
}

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<Outcome, ApplicationError> {
        let config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", config);

        // Resolve the baseline before touching the target, so a bad baseline leaves no trace
        let baseline = Baseline::detect(&config.baseline)?;
        let (forest, mut issues) = baseline.load(&config)?;
        if forest.is_empty() {
            warn!("Baseline describes no entries, nothing to replicate");
        }
        info!(
            "Baseline holds {} ({} issues)",
            forest.tally(),
            issues.len()
        );

        if config.dry_run {
            return Ok(Outcome {
                forest,
                issues,
                replication: None,
            });
        }

        let mut report = StructureReplicator::new(&config.location)
            .folders_only(config.folders_only)
            .replicate(&forest)
            .context(TargetSnafu)?;
        issues.extend(report.warnings.drain(..).map(Issue::from));

        Ok(Outcome {
            forest,
            issues,
            replication: Some(report),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display(
        "Baseline {} does not exist or is not accessible",
        path.best_effort_path_display()
    ))]
    BaselineNotFound { path: PathBuf },
    #[snafu(display("Failed to read the baseline file {}", path.best_effort_path_display()))]
    BaselineReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Critical failure encountered while scanning the baseline folder"))]
    BaselineScanError { source: ScanError },
    #[snafu(display("Critical failure encountered while preparing the target location"))]
    TargetError { source: ReplicationError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserConfig;
    use tempfile::TempDir;

    const SMALL_PROJECT: &str = "root/\n├── a/\n│   └── b.txt\n└── c.txt\n";

    fn config(baseline: PathBuf, location: PathBuf) -> RuntimeConfig {
        RuntimeConfig {
            baseline,
            location,
            folders_only: false,
            dry_run: false,
            parser: ParserConfig::default(),
        }
    }

    fn write_baseline(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("baseline.txt");
        fs::write(&path, text).expect("Failed to write baseline");
        path
    }

    #[test]
    fn tree_text_baseline_is_replicated() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let baseline = write_baseline(&temp_dir, SMALL_PROJECT);
        let out = temp_dir.path().join("out");

        let outcome = Application::run(config(baseline, out.clone())).expect("Run should succeed");

        assert!(out.join("root").is_dir());
        assert!(out.join("root/a").is_dir());
        assert!(out.join("root/a/b.txt").is_file());
        assert!(out.join("root/c.txt").is_file());
        assert!(outcome.issues.is_empty());
        let report = outcome.replication.expect("Replication should have run");
        assert_eq!(report.directories_created, 2);
        assert_eq!(report.files_created, 2);
    }

    #[test]
    fn folders_only_run_creates_no_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let baseline = write_baseline(&temp_dir, SMALL_PROJECT);
        let out = temp_dir.path().join("out");
        let mut config = config(baseline, out.clone());
        config.folders_only = true;

        Application::run(config).expect("Run should succeed");

        assert!(out.join("root/a").is_dir());
        assert!(!out.join("root/a/b.txt").exists());
        assert!(!out.join("root/c.txt").exists());
    }

    #[test]
    fn missing_baseline_is_fatal_and_leaves_target_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("nope.txt");
        let out = temp_dir.path().join("out");

        let result = Application::run(config(missing.clone(), out.clone()));

        match result {
            Err(ApplicationError::BaselineNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected BaselineNotFound, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn malformed_line_is_reported_and_siblings_survive() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let text = "root/\n├── a/\n│   ├── /\n│   └── b.txt\n└── c.txt\n";
        let baseline = write_baseline(&temp_dir, text);
        let out = temp_dir.path().join("out");

        let outcome = Application::run(config(baseline, out.clone())).expect("Run should succeed");

        assert!(out.join("root/a/b.txt").is_file());
        assert!(out.join("root/c.txt").is_file());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.baseline_issue_count(), 1);
        assert!(matches!(outcome.issues[0], Issue::Parse(_)));
    }

    #[test]
    fn folder_baseline_is_scanned() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("template");
        fs::create_dir_all(source.join("assets/img")).expect("Failed to create dirs");
        fs::write(source.join("assets/style.css"), "body {}").expect("Failed to write file");
        let out = temp_dir.path().join("out");

        let outcome = Application::run(config(source, out.clone())).expect("Run should succeed");

        assert!(out.join("template/assets/img").is_dir());
        assert!(out.join("template/assets/style.css").is_file());
        assert_eq!(outcome.forest.tally().directories, 3);
    }

    #[test]
    fn dry_run_does_not_touch_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let baseline = write_baseline(&temp_dir, SMALL_PROJECT);
        let out = temp_dir.path().join("out");
        let mut config = config(baseline, out.clone());
        config.dry_run = true;

        let outcome = Application::run(config).expect("Run should succeed");

        assert!(!out.exists());
        assert!(outcome.replication.is_none());
        assert_eq!(outcome.forest.to_string(), SMALL_PROJECT);
    }

    #[test]
    fn unwritable_target_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let baseline = write_baseline(&temp_dir, SMALL_PROJECT);
        let occupied = temp_dir.path().join("occupied");
        fs::write(&occupied, "").expect("Failed to write file");

        let result = Application::run(config(baseline, occupied));
        assert!(matches!(result, Err(ApplicationError::TargetError { .. })));
    }

    #[test]
    fn baseline_detection_distinguishes_kinds() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = write_baseline(&temp_dir, "");

        assert_eq!(
            Baseline::detect(&file).expect("File should be detected"),
            Baseline::TreeText(file.clone())
        );
        assert_eq!(
            Baseline::detect(temp_dir.path()).expect("Folder should be detected"),
            Baseline::Folder(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn non_utf8_baseline_file_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0xfd]).expect("Failed to write file");

        let result = Application::run(config(path, temp_dir.path().join("out")));
        assert!(matches!(
            result,
            Err(ApplicationError::BaselineReadError { .. })
        ));
    }
}
