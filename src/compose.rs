//! Template composition.
//!
//! A shell template marks insertion points with `{{name}}` tokens, where
//! `name` is lowercase letters, digits, and underscores. [`compose`] replaces
//! each token with its value from a [`PlaceholderMap`] in a single left-to-right
//! pass. Substituted text is never rescanned, so content that happens to
//! contain `{{…}}` lands on the page literally.
//!
//! A token with no value is an error: shipping a literal `{{projects}}` to
//! production is worse than failing the build. The reverse case, a content
//! section the template never references, is only reported, since it usually
//! means stale wiring rather than broken output.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholders the build supplies on every page.
pub const BUILTIN_PLACEHOLDERS: &[&str] = &[
    "title",
    "style",
    "script",
    "season_css",
    "season_index",
    "season_data",
];

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("template {} references unresolved placeholder {{{{{}}}}}", .template.display(), .name)]
    UnresolvedPlaceholder { template: PathBuf, name: String },
}

/// Where a placeholder value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A rendered content section.
    Content,
    /// Supplied by the build for every page.
    Builtin,
}

/// Placeholder name → substitution text for one page.
#[derive(Debug, Default)]
pub struct PlaceholderMap {
    entries: BTreeMap<String, (Origin, String)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_content(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(name.into(), (Origin::Content, value.into()));
    }

    pub fn insert_builtin(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(name.into(), (Origin::Builtin, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|(_, v)| v.as_str())
    }

    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.entries.get(name).map(|(o, _)| *o)
    }
}

/// A composed document plus the content placeholders nothing referenced.
#[derive(Debug)]
pub struct Composed {
    pub html: String,
    pub unused: Vec<String>,
}

pub fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Substitute every `{{name}}` in `template`.
///
/// `template_path` is only used in error messages.
pub fn compose(
    template_path: &Path,
    template: &str,
    map: &PlaceholderMap,
) -> Result<Composed, ComposeError> {
    let mut html = String::with_capacity(template.len());
    let mut referenced = BTreeSet::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let token = after
            .find("}}")
            .map(|end| (end, after[..end].trim()))
            .filter(|(_, name)| is_placeholder_name(name));

        match token {
            Some((end, name)) => {
                let value = map
                    .get(name)
                    .ok_or_else(|| ComposeError::UnresolvedPlaceholder {
                        template: template_path.to_path_buf(),
                        name: name.to_string(),
                    })?;
                html.push_str(value);
                referenced.insert(name);
                rest = &after[end + 2..];
            }
            None => {
                // Not a placeholder: keep one brace and rescan from the next.
                html.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    html.push_str(rest);

    let unused = map
        .entries
        .iter()
        .filter(|(name, (origin, _))| {
            *origin == Origin::Content && !referenced.contains(name.as_str())
        })
        .map(|(name, _)| name.clone())
        .collect();

    Ok(Composed { html, unused })
}
