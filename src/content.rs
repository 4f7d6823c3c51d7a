//! Content dialect parser.
//!
//! Content files use a deliberately small markdown subset. Each file parses
//! into a [`ContentDocument`]: an ordered list of [`Block`]s that the section
//! renderer maps onto HTML.
//!
//! ## The Dialect
//!
//! ```text
//! # The **accent** heading            → Heading (level 1)
//! Free text with a [link](https://…)  → Paragraph
//!
//! - read: [A Book](https://…)         → FieldList (flat key/value entries)
//! - watched:                          →   present key, empty value
//!
//! ## Project Name                     → FieldGroup (a ## heading directly
//! - role: Maintainer                  →   followed by `- key: value` lines)
//! - url: https://…
//! ```
//!
//! Inline markup inside headings, paragraphs, and field values is limited to
//! `**accent**` and `[text](url)`. Delimiters must be balanced; anything
//! unterminated is a [`ContentError::Malformed`] pointing at the file and line.
//!
//! Blank lines close the current block. The one exception is a field group
//! title, which may be separated from its first field by blank lines.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{}: malformed content: {}", .path.display(), .line, .reason)]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl ContentError {
    pub fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// A run of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    /// `**text**`, rendered with the seasonal accent color.
    Accent(String),
    /// `[text](url)`, always rendered opening in a new tab.
    Link { text: String, url: String },
}

impl InlineSpan {
    /// Display text, without markup.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(t) | InlineSpan::Accent(t) => t,
            InlineSpan::Link { text, .. } => text,
        }
    }
}

/// Concatenated display text of a span sequence.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Value of a `- key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `- key:` with nothing after the colon.
    Empty,
    Inline(Vec<InlineSpan>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    pub fn spans(&self) -> &[InlineSpan] {
        match self {
            FieldValue::Empty => &[],
            FieldValue::Inline(spans) => spans,
        }
    }

    pub fn plain_text(&self) -> String {
        plain_text(self.spans())
    }

    /// The first link target in the value, or the plain text when the value
    /// is a bare URL.
    pub fn url(&self) -> String {
        self.spans()
            .iter()
            .find_map(|s| match s {
                InlineSpan::Link { url, .. } => Some(url.clone()),
                _ => None,
            })
            .unwrap_or_else(|| self.plain_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

/// A parsed block. `line` is the 1-based line the block starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        line: usize,
        level: u8,
        spans: Vec<InlineSpan>,
    },
    Paragraph {
        line: usize,
        spans: Vec<InlineSpan>,
    },
    FieldList {
        line: usize,
        entries: Vec<Field>,
    },
    FieldGroup {
        line: usize,
        title: Vec<InlineSpan>,
        fields: Vec<Field>,
    },
}

impl Block {
    pub fn line(&self) -> usize {
        match self {
            Block::Heading { line, .. }
            | Block::Paragraph { line, .. }
            | Block::FieldList { line, .. }
            | Block::FieldGroup { line, .. } => *line,
        }
    }
}

/// Borrowed view of a [`Block::FieldGroup`].
#[derive(Debug, Clone, Copy)]
pub struct GroupRef<'a> {
    pub line: usize,
    pub title: &'a [InlineSpan],
    pub fields: &'a [Field],
}

impl<'a> GroupRef<'a> {
    pub fn get(&self, key: &str) -> Option<&'a FieldValue> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// Title with markup stripped, for messages.
    pub fn title_text(&self) -> String {
        plain_text(self.title)
    }
}

/// One parsed content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    pub source_path: PathBuf,
    pub blocks: Vec<Block>,
}

impl ContentDocument {
    /// A document with no blocks, for sections without a content file.
    pub fn empty(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            blocks: Vec::new(),
        }
    }

    /// Spans of the first plain heading, if any.
    pub fn first_heading(&self) -> Option<&[InlineSpan]> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { spans, .. } => Some(spans.as_slice()),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &[InlineSpan]> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph { spans, .. } => Some(spans.as_slice()),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = GroupRef<'_>> {
        self.blocks.iter().filter_map(|b| match b {
            Block::FieldGroup {
                line,
                title,
                fields,
            } => Some(GroupRef {
                line: *line,
                title,
                fields,
            }),
            _ => None,
        })
    }

    /// Entries of every field list, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &Field> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::FieldList { entries, .. } => Some(entries.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Value of the first field-list entry named `key`.
    pub fn entry(&self, key: &str) -> Option<&FieldValue> {
        self.entries().find(|f| f.key == key).map(|f| &f.value)
    }
}

/// Read and parse a content file.
pub fn load(path: &Path) -> Result<ContentDocument, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}

// ============================================================================
// Line classification
// ============================================================================

enum Line<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    /// Text after the `- ` marker.
    Item(&'a str),
    Text(&'a str),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) {
        if let Some(text) = line[hashes..].strip_prefix(' ') {
            return Line::Heading {
                level: hashes as u8,
                text: text.trim(),
            };
        }
    }
    if let Some(item) = line.strip_prefix("- ") {
        return Line::Item(item);
    }
    Line::Text(line)
}

/// Split `key: value`. The key must be a simple word or phrase.
fn split_field(item: &str) -> Option<(&str, &str)> {
    let (key, value) = item.split_once(':')?;
    let key = key.trim();
    let simple = key
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '));
    if key.is_empty() || !simple {
        return None;
    }
    Some((key, value.trim()))
}

fn next_is_field(rest: &[&str]) -> bool {
    rest.iter()
        .map(|l| classify(l))
        .find(|l| !matches!(l, Line::Blank))
        .is_some_and(|l| matches!(l, Line::Item(item) if split_field(item).is_some()))
}

// ============================================================================
// Block assembly
// ============================================================================

enum Open {
    Paragraph {
        line: usize,
        spans: Vec<InlineSpan>,
    },
    List {
        line: usize,
        entries: Vec<Field>,
    },
    Group {
        line: usize,
        title: Vec<InlineSpan>,
        fields: Vec<Field>,
    },
}

impl Open {
    fn into_block(self) -> Block {
        match self {
            Open::Paragraph { line, spans } => Block::Paragraph { line, spans },
            Open::List { line, entries } => Block::FieldList { line, entries },
            Open::Group {
                line,
                title,
                fields,
            } => Block::FieldGroup {
                line,
                title,
                fields,
            },
        }
    }
}

fn close(current: &mut Option<Open>, blocks: &mut Vec<Block>) {
    if let Some(open) = current.take() {
        blocks.push(open.into_block());
    }
}

/// Append spans, merging adjacent plain runs.
fn extend_spans(dst: &mut Vec<InlineSpan>, src: Vec<InlineSpan>) {
    for span in src {
        match (dst.last_mut(), span) {
            (Some(InlineSpan::Plain(prev)), InlineSpan::Plain(next)) => prev.push_str(&next),
            (_, span) => dst.push(span),
        }
    }
}

/// Parse content text into a document. Pure: same text, same blocks.
pub fn parse(path: &Path, text: &str) -> Result<ContentDocument, ContentError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut current: Option<Open> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let inline = |s: &str| {
            parse_inline(s).map_err(|reason| ContentError::malformed(path, line_no, reason))
        };

        match classify(raw) {
            Line::Blank => {
                // A group title may sit apart from its first field.
                let awaiting_fields =
                    matches!(&current, Some(Open::Group { fields, .. }) if fields.is_empty());
                if !awaiting_fields {
                    close(&mut current, &mut blocks);
                }
            }
            Line::Heading { level, text } => {
                close(&mut current, &mut blocks);
                if level == 2 && next_is_field(&lines[idx + 1..]) {
                    current = Some(Open::Group {
                        line: line_no,
                        title: inline(text)?,
                        fields: Vec::new(),
                    });
                } else {
                    blocks.push(Block::Heading {
                        line: line_no,
                        level,
                        spans: inline(text)?,
                    });
                }
            }
            Line::Item(item) => {
                let (key, value) = split_field(item).ok_or_else(|| {
                    ContentError::malformed(
                        path,
                        line_no,
                        format!("expected `- key: value`, found `- {item}`"),
                    )
                })?;
                let value = if value.is_empty() {
                    FieldValue::Empty
                } else {
                    FieldValue::Inline(inline(value)?)
                };
                let field = Field {
                    key: key.to_string(),
                    value,
                };

                match &mut current {
                    Some(Open::Group { title, fields, .. }) => {
                        if fields.iter().any(|f| f.key == field.key) {
                            return Err(ContentError::malformed(
                                path,
                                line_no,
                                format!(
                                    "'{}' declares field '{}' twice",
                                    plain_text(title),
                                    field.key
                                ),
                            ));
                        }
                        fields.push(field);
                    }
                    Some(Open::List { entries, .. }) => entries.push(field),
                    _ => {
                        close(&mut current, &mut blocks);
                        current = Some(Open::List {
                            line: line_no,
                            entries: vec![field],
                        });
                    }
                }
            }
            Line::Text(text) => {
                let spans = inline(text)?;
                match &mut current {
                    Some(Open::Paragraph { spans: acc, .. }) => {
                        extend_spans(acc, vec![InlineSpan::Plain(" ".to_string())]);
                        extend_spans(acc, spans);
                    }
                    _ => {
                        close(&mut current, &mut blocks);
                        current = Some(Open::Paragraph {
                            line: line_no,
                            spans,
                        });
                    }
                }
            }
        }
    }
    close(&mut current, &mut blocks);

    Ok(ContentDocument {
        source_path: path.to_path_buf(),
        blocks,
    })
}

// ============================================================================
// Inline parsing
// ============================================================================

/// Byte offset of the next `**` or `[`, or the end of the text.
fn next_delimiter(text: &str) -> usize {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'[' || (b == b'*' && bytes.get(i + 1) == Some(&b'*')) {
            return i;
        }
    }
    text.len()
}

/// Parse accent and link markup. Errors carry a human-readable reason.
pub fn parse_inline(text: &str) -> Result<Vec<InlineSpan>, String> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            let end = after
                .find("**")
                .ok_or_else(|| format!("unterminated `**` in `{text}`"))?;
            let inner = &after[..end];
            if inner.trim().is_empty() {
                return Err(format!("empty `**` accent in `{text}`"));
            }
            spans.push(InlineSpan::Accent(inner.to_string()));
            rest = &after[end + 2..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let close = after
                .find(']')
                .ok_or_else(|| format!("unmatched `[` in `{text}`"))?;
            let label = &after[..close];
            let target = after[close + 1..]
                .strip_prefix('(')
                .ok_or_else(|| format!("link text `[{label}]` must be followed by `(url)`"))?;
            let end = target
                .find(')')
                .ok_or_else(|| format!("unmatched `(` after `[{label}]`"))?;
            let url = target[..end].trim();
            if label.trim().is_empty() {
                return Err(format!("link to `{url}` has empty text"));
            }
            if url.is_empty() {
                return Err(format!("link `[{label}]` has an empty target"));
            }
            spans.push(InlineSpan::Link {
                text: label.to_string(),
                url: url.to_string(),
            });
            rest = &target[end + 1..];
        } else {
            let stop = next_delimiter(rest);
            extend_spans(&mut spans, vec![InlineSpan::Plain(rest[..stop].to_string())]);
            rest = &rest[stop..];
        }
    }

    Ok(spans)
}
