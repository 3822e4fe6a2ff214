use crate::filesystem::{Forest, ReplicationReport};
use crate::report::Issue;

/// Everything a run produced, for the caller to print or inspect.
#[derive(Debug)]
pub struct Outcome {
    pub forest: Forest,
    /// Baseline issues first, then replication issues, each in the order they happened.
    pub issues: Vec<Issue>,
    /// `None` when the run only built the model.
    pub replication: Option<ReplicationReport>,
}

impl Outcome {
    pub fn baseline_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.is_baseline_issue())
            .count()
    }
}
