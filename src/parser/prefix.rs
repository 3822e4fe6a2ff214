//! Splitting a tree diagram line into its drawing prefix and the entry text.
//!
//! The prefix is everything the diagram generator drew before the entry name:
//! indentation, vertical bars and branch connectors. Its length in characters is
//! the line's indent measure.

/// Unicode "Box Drawing" block, which covers `│ ├ └ ─` and their heavy/rounded variants.
fn is_box_drawing(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

fn is_horizontal(ch: char) -> bool {
    matches!(ch, '-' | '─' | '━')
}

/// Position within the drawing unit that is currently being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Indentation and vertical bars.
    Indent,
    /// The horizontal run of a branch (`├──`, `|--`, `+---`).
    Branch,
    /// Spacing between a branch and the entry name. Anything else starts the name.
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePrefix<'a> {
    /// Prefix width in characters, with tabs expanded to a full indentation unit.
    pub measure: usize,
    /// Whether any connector glyph was part of the prefix.
    pub has_connector: bool,
    /// What remains after the prefix.
    pub rest: &'a str,
}

/// Splits `line` into its prefix and the entry text.
///
/// ASCII connectors are accepted as produced by `tree --charset=ascii` and Windows
/// `tree /A`. `` ` ``, `+` and `\` only count when a dash follows them, `|` only when
/// followed by a dash or whitespace, and a plain `-` only after another connector glyph.
/// Once a branch and its spacing have been read, the name begins, so names such as
/// `+page.svelte` or `-flag` keep their first character.
pub fn split_prefix(line: &str, indent_width: usize) -> LinePrefix<'_> {
    let mut measure = 0;
    let mut has_connector = false;
    let mut stage = Stage::Indent;

    for (ix, ch) in line.char_indices() {
        let next = line[ix + ch.len_utf8()..].chars().next();
        let advanced = match (stage, ch) {
            (Stage::Indent, ch) if ch.is_whitespace() => Some(Stage::Indent),
            (_, ch) if ch.is_whitespace() => Some(Stage::Gap),
            (Stage::Gap, _) => None,
            (_, '-') if !has_connector => None,
            (_, ch) if is_horizontal(ch) => Some(Stage::Branch),
            (Stage::Branch, ch) if is_box_drawing(ch) => Some(Stage::Branch),
            (Stage::Branch, _) => None,
            (Stage::Indent, ch) if is_box_drawing(ch) => Some(Stage::Indent),
            (Stage::Indent, '|')
                if next.is_none_or(|next| next.is_whitespace() || is_horizontal(next)) =>
            {
                Some(Stage::Indent)
            }
            (Stage::Indent, '`' | '+' | '\\') if next.is_some_and(is_horizontal) => {
                Some(Stage::Indent)
            }
            (Stage::Indent, _) => None,
        };

        let Some(advanced) = advanced else {
            return LinePrefix {
                measure,
                has_connector,
                rest: &line[ix..],
            };
        };
        stage = advanced;
        if !ch.is_whitespace() {
            has_connector = true;
        }
        measure += if ch == '\t' { indent_width } else { 1 };
    }

    LinePrefix {
        measure,
        has_connector,
        rest: "",
    }
}
