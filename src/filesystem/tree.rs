use std::fmt;

use derive_more::Display;

/// Kind of a filesystem entry, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// One entry of a baseline structure.
///
/// Files are leaves by construction: only the `Directory` variant can hold children,
/// and the children keep the order in which the producer emitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesystemNode {
    File {
        name: String,
    },
    Directory {
        name: String,
        children: Vec<FilesystemNode>,
    },
}

impl FilesystemNode {
    pub fn file(name: impl Into<String>) -> Self {
        FilesystemNode::File { name: name.into() }
    }

    pub fn directory(name: impl Into<String>, children: Vec<FilesystemNode>) -> Self {
        FilesystemNode::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FilesystemNode::File { name } | FilesystemNode::Directory { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FilesystemNode::File { .. } => NodeKind::File,
            FilesystemNode::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn children(&self) -> &[FilesystemNode] {
        match self {
            FilesystemNode::File { .. } => &[],
            FilesystemNode::Directory { children, .. } => children,
        }
    }

    /// Counts this node and everything below it.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        self.tally_into(&mut tally);
        tally
    }

    fn tally_into(&self, tally: &mut Tally) {
        match self {
            FilesystemNode::File { .. } => tally.files += 1,
            FilesystemNode::Directory { children, .. } => {
                tally.directories += 1;
                for child in children {
                    child.tally_into(tally);
                }
            }
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, indent: &str, connector: &str) -> fmt::Result {
        match self {
            FilesystemNode::File { name } => writeln!(f, "{indent}{connector}{name}"),
            FilesystemNode::Directory { name, children } => {
                writeln!(f, "{indent}{connector}{name}/")?;

                // Roots carry no connector, so their children start at the first level
                let child_indent = match connector {
                    "" => String::new(),
                    BRANCH => format!("{indent}{PIPE}"),
                    _ => format!("{indent}{BLANK}"),
                };
                let last_ix = children.len().saturating_sub(1);
                for (ix, child) in children.iter().enumerate() {
                    let connector = if ix == last_ix { CORNER } else { BRANCH };
                    child.render(f, &child_indent, connector)?;
                }
                Ok(())
            }
        }
    }
}

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Number of directories and files in a (sub)tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub directories: usize,
    pub files: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.directories + self.files
    }
}

/// Same wording as the closing line of `tree`, e.g. `2 directories, 1 file`.
impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directories = if self.directories == 1 {
            "directory"
        } else {
            "directories"
        };
        let files = if self.files == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {directories}, {} {files}",
            self.directories, self.files
        )
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.directories += other.directories;
        self.files += other.files;
    }
}

/// The ordered list of top-level nodes produced from a baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<FilesystemNode>,
}

impl Forest {
    pub fn new(roots: Vec<FilesystemNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[FilesystemNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for root in &self.roots {
            tally += root.tally();
        }
        tally
    }
}

impl From<Vec<FilesystemNode>> for Forest {
    fn from(roots: Vec<FilesystemNode>) -> Self {
        Self::new(roots)
    }
}

impl From<FilesystemNode> for Forest {
    fn from(root: FilesystemNode) -> Self {
        Self::new(vec![root])
    }
}

/// Renders the forest as a tree diagram with four-character units, the same
/// shape the tree text parser reads.
impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            root.render(f, "", "")?;
        }
        Ok(())
    }
}
