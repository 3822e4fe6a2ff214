//! Tree diagram parsing.

mod prefix;
mod tree_text;

pub use tree_text::{ParseWarning, ParserConfig, TreeTextParser};
