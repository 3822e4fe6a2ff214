use std::io::{self, Write};

use colored::Colorize;
use supports_color::Stream;

use crate::application::data::Outcome;
use crate::filesystem::ReplicationReport;

/// Enables colored output only when stdout can show it.
pub fn init_color() {
    let enabled = supports_color::on(Stream::Stdout).is_some();
    colored::control::set_override(enabled);
}

/// Counts shown to the user once a replication run finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub directories_created: usize,
    pub files_created: usize,
    pub already_present: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn new(report: &ReplicationReport, baseline_issues: usize) -> Self {
        Self {
            directories_created: report.directories_created,
            files_created: report.files_created,
            already_present: report.directories_existing + report.files_existing,
            skipped: report.skipped + baseline_issues,
        }
    }

    pub fn render(&self) -> String {
        let status = if self.skipped == 0 {
            "Done".green().bold()
        } else {
            "Done with warnings".yellow().bold()
        };

        let mut line = format!(
            "{status}: created {} and {}",
            count(self.directories_created, "directory", "directories"),
            count(self.files_created, "file", "files"),
        );
        if self.already_present > 0 {
            line.push_str(&format!(", {} already present", self.already_present));
        }
        if self.skipped > 0 {
            let skipped = format!("{} skipped", self.skipped);
            line.push_str(&format!(", {}", skipped.as_str().yellow()));
        }
        line
    }
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{n} {}", if n == 1 { singular } else { plural })
}

/// Writes the result of a run to `out`: the summary line, or the parsed tree for a dry run.
pub fn write_outcome(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    match &outcome.replication {
        Some(report) => {
            let summary = Summary::new(report, outcome.baseline_issue_count());
            writeln!(out, "{}", summary.render())
        }
        None => {
            write!(out, "{}", outcome.forest)?;
            writeln!(out, "\n{}", outcome.forest.tally())?;
            if !outcome.issues.is_empty() {
                let note = format!(
                    "{} skipped",
                    count(outcome.issues.len(), "line or entry", "lines or entries")
                );
                writeln!(out, "{}", note.as_str().yellow())?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{FilesystemNode, Forest};
    use crate::parser::ParseWarning;
    use crate::report::Issue;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn summary_counts_baseline_issues_as_skipped() {
        let report = ReplicationReport {
            directories_created: 2,
            files_created: 1,
            directories_existing: 1,
            files_existing: 1,
            skipped: 1,
            warnings: Vec::new(),
        };
        let summary = Summary::new(&report, 2);
        assert_eq!(summary.already_present, 2);
        assert_eq!(summary.skipped, 3);
    }

    #[test]
    fn render_mentions_counts() {
        plain();
        let summary = Summary {
            directories_created: 1,
            files_created: 3,
            already_present: 0,
            skipped: 0,
        };
        assert_eq!(summary.render(), "Done: created 1 directory and 3 files");

        let summary = Summary {
            directories_created: 0,
            files_created: 0,
            already_present: 4,
            skipped: 2,
        };
        assert_eq!(
            summary.render(),
            "Done with warnings: created 0 directories and 0 files, 4 already present, 2 skipped"
        );
    }

    #[test]
    fn dry_run_output_is_the_tree_and_tally() {
        plain();
        let outcome = Outcome {
            forest: Forest::from(FilesystemNode::directory(
                "root",
                vec![FilesystemNode::file("a.txt")],
            )),
            issues: vec![Issue::from(ParseWarning::MissingName {
                line_number: 2,
                line: "├──".to_string(),
            })],
            replication: None,
        };

        let mut out = Vec::new();
        write_outcome(&mut out, &outcome).expect("Writing to a Vec cannot fail");
        let text = String::from_utf8(out).expect("Output should be UTF-8");

        assert_eq!(
            text,
            "root/\n└── a.txt\n\n1 directory, 1 file\n1 line or entry skipped\n"
        );
    }
}
