use crate::core::{DocComment, TextRange};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Block tag name that introduces a behavior specification.
pub const SHOULD_TAG: &str = "should";

/// A block tag: at the start of a comment line, after optional `*` decoration.
static BLOCK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\**[ \t]*@([A-Za-z][A-Za-z0-9_-]*)").unwrap());

/// One `@should` fragment of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorSpecification {
    /// Description with comment decoration removed and lines joined by a space.
    pub description: String,
    /// Absolute range of the description text. For an empty description this
    /// is the range of the `@should` marker itself, so it is never empty.
    pub range: TextRange,
    /// 1-based position among the `@should` tags of the same comment.
    pub position: usize,
}

impl BehaviorSpecification {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

struct BlockTag<'a> {
    name: &'a str,
    /// Offset of the start of the line holding the tag (relative to body).
    line_start: usize,
    /// Offset of the `@` (relative to body).
    at: usize,
    /// Offset just past the tag name (relative to body).
    name_end: usize,
}

/// Extract the `@should` fragments of `doc`, in textual order.
///
/// An undocumented method yields an empty list.
pub fn parse_behaviors(doc: Option<&DocComment>) -> Vec<BehaviorSpecification> {
    let Some(doc) = doc else {
        return Vec::new();
    };
    let (body_start, body) = comment_body(&doc.text);
    let base = doc.offset + body_start;
    let tags = block_tags(body);

    tags.iter()
        .enumerate()
        .filter(|(_, tag)| tag.name == SHOULD_TAG)
        .enumerate()
        .map(|(ordinal, (index, tag))| {
            let segment_end = tags
                .get(index + 1)
                .map(|next| next.line_start)
                .unwrap_or(body.len());
            fragment(body, tag, segment_end, base, ordinal + 1)
        })
        .collect()
}

/// True when `doc` carries at least one `@should` tag.
pub fn has_behaviors(doc: Option<&DocComment>) -> bool {
    doc.map(|d| block_tags(comment_body(&d.text).1).iter().any(|t| t.name == SHOULD_TAG))
        .unwrap_or(false)
}

/// Strip the `/**` and `*/` delimiters, returning the body and its offset.
fn comment_body(text: &str) -> (usize, &str) {
    let start = if text.starts_with("/**") {
        3
    } else if text.starts_with("/*") {
        2
    } else {
        0
    };
    let end = if text.len() >= start + 2 && text.ends_with("*/") {
        text.len() - 2
    } else {
        text.len()
    };
    (start, &text[start..end])
}

fn block_tags(body: &str) -> Vec<BlockTag<'_>> {
    BLOCK_TAG_PATTERN
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(BlockTag {
                name: name.as_str(),
                line_start: whole.start(),
                at: name.start() - 1,
                name_end: name.end(),
            })
        })
        .collect()
}

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || c == '*'
}

fn fragment(
    body: &str,
    tag: &BlockTag<'_>,
    segment_end: usize,
    base: usize,
    position: usize,
) -> BehaviorSpecification {
    let raw = &body[tag.name_end..segment_end];
    let leading = raw.len() - raw.trim_start_matches(is_decoration).len();
    let trimmed = raw.trim_matches(is_decoration);

    if trimmed.is_empty() {
        return BehaviorSpecification {
            description: String::new(),
            range: TextRange::new(base + tag.at, base + tag.name_end),
            position,
        };
    }

    let start = base + tag.name_end + leading;
    BehaviorSpecification {
        description: join_lines(trimmed),
        range: TextRange::new(start, start + trimmed.len()),
        position,
    }
}

/// Join a multi-line description, dropping the `*` gutter of continuation lines.
fn join_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.trim_start_matches(is_decoration).trim_end())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
