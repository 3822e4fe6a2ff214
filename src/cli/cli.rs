use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Recreate a folder structure, described by a tree diagram or an existing folder,
/// at a new location.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Tree diagram text file, or folder whose structure should be copied
    #[clap(long)]
    pub baseline: PathBuf,

    /// Directory to create the structure in (created when missing)
    #[clap(long)]
    pub location: PathBuf,

    /// Only create directories, no empty files
    #[clap(long)]
    pub folders_only: bool,

    /// Characters per nesting level in the tree diagram
    #[clap(long, default_value = "4")]
    pub indent_width: NonZeroUsize,

    /// Print the parsed structure instead of creating it
    #[clap(long)]
    pub dry_run: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
