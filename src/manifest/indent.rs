//! Indentation detection for JSON manifests.

use std::collections::HashMap;

use tracing::debug;

/// Indent used when a document has no indented lines.
pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IndentChar {
    Space,
    Tab,
}

impl IndentChar {
    fn as_char(self) -> char {
        match self {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        }
    }
}

/// Detect the indentation unit of `text`.
///
/// Counts how often each indentation step (an increase in leading whitespace
/// from one non-blank line to the next) occurs and returns the most common
/// one. Ties go to the narrower step. Returns `None` if no line is indented.
pub fn detect_indent(text: &str) -> Option<String> {
    let mut steps: HashMap<(IndentChar, usize), usize> = HashMap::new();
    let mut previous: Option<(IndentChar, usize)> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let current = leading_indent(line);
        match (previous, current) {
            (_, None) => {}
            (None, Some((kind, width))) => *steps.entry((kind, width)).or_default() += 1,
            (Some((prev_kind, prev_width)), Some((kind, width))) => {
                if kind == prev_kind && width > prev_width {
                    *steps.entry((kind, width - prev_width)).or_default() += 1;
                } else if kind != prev_kind {
                    *steps.entry((kind, width)).or_default() += 1;
                }
            }
        }
        previous = current;
    }

    let ((kind, width), count) = steps
        .into_iter()
        .max_by(|(a_key, a_count), (b_key, b_count)| {
            a_count.cmp(b_count).then_with(|| b_key.1.cmp(&a_key.1))
        })?;

    let indent: String = std::iter::repeat_n(kind.as_char(), width).collect();
    debug!("Detected indent {:?} ({} occurrences)", indent, count);
    Some(indent)
}

/// Leading indentation of a line: its character and width.
///
/// Mixed leading whitespace is measured by its first character.
fn leading_indent(line: &str) -> Option<(IndentChar, usize)> {
    let kind = match line.chars().next()? {
        ' ' => IndentChar::Space,
        '\t' => IndentChar::Tab,
        _ => return None,
    };
    let width = line.chars().take_while(|&c| c == kind.as_char()).count();
    Some((kind, width))
}
