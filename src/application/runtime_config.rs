use std::path::PathBuf;

use crate::cli::Cli;
use crate::parser::ParserConfig;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub baseline: PathBuf,
    pub location: PathBuf,
    pub folders_only: bool,
    pub dry_run: bool,
    pub parser: ParserConfig,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            baseline: cli.baseline,
            location: cli.location,
            folders_only: cli.folders_only,
            dry_run: cli.dry_run,
            parser: ParserConfig {
                indent_width: cli.indent_width,
            },
        }
    }
}
