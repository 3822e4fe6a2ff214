use derive_more::{Display, From};

use crate::filesystem::{CreateWarning, ScanWarning};
use crate::parser::ParseWarning;

/// A recoverable problem met while producing or replicating a structure.
#[derive(Debug, Display, From)]
pub enum Issue {
    #[display("{_0}")]
    Parse(ParseWarning),
    #[display("{_0}")]
    Scan(ScanWarning),
    #[display("{_0}")]
    Create(CreateWarning),
}

impl Issue {
    /// Whether the issue came from reading the baseline rather than from writing the copy.
    pub fn is_baseline_issue(&self) -> bool {
        matches!(self, Issue::Parse(_) | Issue::Scan(_))
    }
}
