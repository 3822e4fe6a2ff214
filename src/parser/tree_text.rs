use std::num::NonZeroUsize;

use snafu::Snafu;
use tracing::{debug, warn};

use crate::filesystem::{FilesystemNode, Forest, NodeKind};
use crate::parser::prefix::split_prefix;

/// Characters per depth level used by `tree` and most generators (`"│   "`, `"├── "`).
const DEFAULT_INDENT_WIDTH: NonZeroUsize = NonZeroUsize::new(4).unwrap();

const SEPARATORS: [char; 2] = ['/', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub indent_width: NonZeroUsize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// A tree line that was skipped. Parsing carries on with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseWarning {
    #[snafu(display("line {line_number}: no entry name after the tree prefix in {line:?}"))]
    MissingName { line_number: usize, line: String },
    #[snafu(display("line {line_number}: entry name {name:?} contains a path separator"))]
    EmbeddedSeparator { line_number: usize, name: String },
    #[snafu(display("line {line_number}: entry name {name:?} cannot be replicated"))]
    ForbiddenName { line_number: usize, name: String },
}

#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub forest: Forest,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, PartialEq, Eq)]
struct Entry<'a> {
    depth: usize,
    name: &'a str,
    kind: NodeKind,
}

/// A directory whose children are still being collected.
struct OpenDirectory {
    depth: usize,
    name: String,
    children: Vec<FilesystemNode>,
}

/// The chain of currently open directories, innermost last.
#[derive(Default)]
struct Ancestry {
    roots: Vec<FilesystemNode>,
    open: Vec<OpenDirectory>,
}

impl Ancestry {
    /// Closes every open directory that cannot be the parent of an entry at `depth`.
    fn unwind_to(&mut self, depth: usize) {
        while self.open.last().is_some_and(|top| top.depth >= depth) {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        if let Some(closed) = self.open.pop() {
            let node = FilesystemNode::directory(closed.name, closed.children);
            self.attach(node);
        }
    }

    fn attach(&mut self, node: FilesystemNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn add(&mut self, entry: Entry<'_>) {
        self.unwind_to(entry.depth);
        match entry.kind {
            NodeKind::File => self.attach(FilesystemNode::file(entry.name)),
            NodeKind::Directory => self.open.push(OpenDirectory {
                depth: entry.depth,
                name: entry.name.to_string(),
                children: Vec::new(),
            }),
        }
    }

    fn finish(mut self) -> Forest {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        Forest::new(self.roots)
    }
}

/// Turns an indented tree diagram (the output of `tree`, `tree /F` or a hand drawn one)
/// into a [`Forest`].
///
/// The depth of a line is the width of its drawing prefix divided by the indentation
/// width. Each entry becomes the last child of the nearest preceding directory with a
/// smaller depth, or a top-level node when there is none. Names ending in `/` or `\`
/// are directories, everything else is a file, except a top-level name directly
/// followed by indented lines, which is read as their directory.
#[derive(Debug, Clone, Default)]
pub struct TreeTextParser {
    config: ParserConfig,
}

impl TreeTextParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        for (ix, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim_end();
            if line.is_empty() {
                continue;
            }

            match self.classify(ix + 1, line) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(warning) => {
                    warn!("Skipping tree line: {warning}");
                    warnings.push(warning);
                }
            }
        }

        let mut ancestry = Ancestry::default();
        let mut entries = entries.into_iter().peekable();
        while let Some(mut entry) = entries.next() {
            // `tree <dir>` prints the root without a separator
            let has_nested_lines = entries.peek().is_some_and(|next| next.depth > 0);
            if entry.depth == 0 && entry.kind == NodeKind::File && has_nested_lines {
                debug!("Treating top-level entry {:?} as a directory", entry.name);
                entry.kind = NodeKind::Directory;
            }
            ancestry.add(entry);
        }

        let forest = ancestry.finish();
        debug!(
            "Parsed tree text into {} top-level entries ({} warnings)",
            forest.roots().len(),
            warnings.len()
        );
        ParseOutcome { forest, warnings }
    }

    /// `Ok(None)` marks lines that are part of the diagram but carry no entry.
    fn classify<'a>(
        &self,
        line_number: usize,
        line: &'a str,
    ) -> Result<Option<Entry<'a>>, ParseWarning> {
        let indent_width = self.config.indent_width.get();
        let prefix = split_prefix(line, indent_width);
        let depth = prefix.measure / indent_width;
        let text = prefix.rest.trim_end();

        if depth == 0 && !prefix.has_connector {
            if is_tree_report(text) {
                debug!("Ignoring tree report on line {line_number}: {text}");
                return Ok(None);
            }
            if text.trim_end_matches(SEPARATORS) == "." {
                debug!("Ignoring current-directory marker on line {line_number}");
                return Ok(None);
            }
        }

        let kind = if text.ends_with(SEPARATORS) {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        let name = text.trim_end_matches(SEPARATORS).trim_end();

        if name.is_empty() {
            return MissingNameSnafu { line_number, line }.fail();
        }
        if name.contains(SEPARATORS) {
            return EmbeddedSeparatorSnafu { line_number, name }.fail();
        }
        if matches!(name, "." | "..") || name.contains('\0') {
            return ForbiddenNameSnafu { line_number, name }.fail();
        }

        Ok(Some(Entry { depth, name, kind }))
    }
}

/// Recognizes the closing line of `tree`, e.g. `3 directories, 5 files`.
fn is_tree_report(text: &str) -> bool {
    let mut parts = text.split(", ").peekable();
    if parts.peek().is_none() {
        return false;
    }
    parts.all(|part| {
        let Some((count, noun)) = part.split_once(' ') else {
            return false;
        };
        !count.is_empty()
            && count.chars().all(|ch| ch.is_ascii_digit())
            && matches!(noun, "directory" | "directories" | "file" | "files")
    })
}
