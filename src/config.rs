//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a site
//! only spells out what it changes.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml          # Optional, overrides stock defaults
//! ├── template.html      # Shell templates referenced by [[pages]]
//! ├── style.css
//! ├── script.js
//! ├── content/           # Markdown content files
//! └── assets/            # Static assets copied unchanged
//! ```
//!
//! ## The Page Table
//!
//! Which content file lands in which placeholder of which page is data, not
//! code. Each `[[pages]]` entry names its output path and template, and each
//! `[[pages.sections]]` entry wires one content file (rendered as one section
//! kind) to one placeholder:
//!
//! ```toml
//! [[pages]]
//! name = "home"
//! output = "index.html"
//! template = "template.html"
//! title = "Home"
//!
//! [[pages.sections]]
//! placeholder = "hero"
//! file = "hero.md"
//! kind = "hero"
//! ```
//!
//! Arrays are replaced wholesale when merging: a site that declares
//! `[[pages]]` declares all of its pages.
//!
//! Unknown keys are rejected to catch typos early.

use crate::compose::{BUILTIN_PLACEHOLDERS, is_placeholder_name};
use crate::render::SectionKind;
use crate::season::{self, Season};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the configuration file in the site root.
pub const CONFIG_FILENAME: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the markdown content files, relative to the site root.
    pub content_dir: String,
    /// Directory copied unchanged into the output tree under the same name.
    pub static_dir: String,
    /// Files copied unchanged to the output root (e.g. `CNAME`).
    pub passthrough: Vec<String>,
    /// Stylesheet and script handling.
    pub assets: AssetsConfig,
    /// Remote photo feed for the gallery section.
    pub feed: FeedConfig,
    /// Generated favicon and OG image.
    pub derived: DerivedConfig,
    /// Seasonal accent colors, selected by calendar month.
    pub seasons: Vec<Season>,
    /// Output pages and their content-to-placeholder wiring.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            static_dir: "assets".to_string(),
            passthrough: Vec::new(),
            assets: AssetsConfig::default(),
            feed: FeedConfig::default(),
            derived: DerivedConfig::default(),
            seasons: season::default_seasons(),
            pages: default_pages(),
        }
    }
}

/// How the stylesheet and script reach the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetMode {
    /// Embedded verbatim in `<style>`/`<script>` elements.
    Inline,
    /// Referenced by URL and copied to the output root.
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub mode: AssetMode,
    /// Stylesheet path, relative to the site root.
    pub stylesheet: String,
    /// Script path, relative to the site root.
    pub script: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            mode: AssetMode::Inline,
            stylesheet: "style.css".to_string(),
            script: "script.js".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Feed URL. Empty disables the fetch and the gallery renders empty.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Number of masonry columns in the gallery.
    pub columns: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 5,
            columns: 3,
        }
    }
}

impl FeedConfig {
    pub fn enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DerivedConfig {
    /// Output path of the generated favicon. Empty disables it.
    pub favicon: String,
    /// Output path of the generated Open Graph image. Empty disables it.
    pub og_image: String,
}

impl Default for DerivedConfig {
    fn default() -> Self {
        Self {
            favicon: "favicon.png".to_string(),
            og_image: "og-image.png".to_string(),
        }
    }
}

/// One output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Logical page name, used in logs and output.
    pub name: String,
    /// Output path relative to the output root (e.g. `work/index.html`).
    pub output: String,
    /// Shell template path relative to the site root.
    pub template: String,
    /// Value of the `{{title}}` placeholder.
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

/// One content file wired to one placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub placeholder: String,
    pub kind: SectionKind,
    /// Content file relative to `content_dir`. Optional only for galleries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl SectionConfig {
    fn new(placeholder: &str, kind: SectionKind, file: Option<&str>) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            kind,
            file: file.map(str::to_string),
        }
    }
}

fn shared_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("lately", SectionKind::Tags, Some("lately.md")),
        SectionConfig::new("footer", SectionKind::Footer, Some("footer.md")),
    ]
}

fn default_pages() -> Vec<PageConfig> {
    let page = |name: &str, output: &str, template: &str, title: &str, sections| PageConfig {
        name: name.to_string(),
        output: output.to_string(),
        template: template.to_string(),
        title: title.to_string(),
        sections,
    };

    let mut home = vec![
        SectionConfig::new("hero", SectionKind::Hero, Some("hero.md")),
        SectionConfig::new("about", SectionKind::About, Some("about.md")),
        SectionConfig::new("projects", SectionKind::Projects, Some("projects.md")),
    ];
    home.extend(shared_sections());

    let mut work = vec![
        SectionConfig::new("articles", SectionKind::Articles, Some("writing.md")),
        SectionConfig::new("projects", SectionKind::Projects, Some("projects.md")),
    ];
    work.extend(shared_sections());

    let mut play = vec![
        SectionConfig::new("gallery", SectionKind::Gallery, None),
        SectionConfig::new("rolodex", SectionKind::Rolodex, Some("rolodex.md")),
    ];
    play.extend(shared_sections());

    vec![
        page("home", "index.html", "template.html", "Home", home),
        page("work", "work/index.html", "work.html", "Work", work),
        page("play", "play/index.html", "play.html", "Play", play),
    ]
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "feed.timeout_secs must be greater than 0".into(),
            ));
        }
        if !(1..=6).contains(&self.feed.columns) {
            return Err(ConfigError::Validation(
                "feed.columns must be between 1 and 6".into(),
            ));
        }
        if self.assets.stylesheet.trim().is_empty() || self.assets.script.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets.stylesheet and assets.script must not be empty".into(),
            ));
        }
        // Content may live in the site root itself; everything that is copied
        // or written into the output must name a real subpath.
        if self.content_dir.trim() != "." && !is_safe_relative(&self.content_dir) {
            return Err(ConfigError::Validation(format!(
                "content_dir '{}' must be a relative path inside the site root",
                self.content_dir
            )));
        }
        let derived = [
            ("derived.favicon", &self.derived.favicon),
            ("derived.og_image", &self.derived.og_image),
        ]
        .into_iter()
        .filter(|(_, p)| !p.trim().is_empty());
        for (key, path) in [("static_dir", &self.static_dir)]
            .into_iter()
            .chain(self.passthrough.iter().map(|p| ("passthrough", p)))
            .chain(derived)
        {
            if !is_safe_relative(path) {
                return Err(ConfigError::Validation(format!(
                    "{key} '{path}' must be a relative path inside the site root"
                )));
            }
        }
        self.validate_seasons()?;
        self.validate_pages()
    }

    fn validate_seasons(&self) -> Result<(), ConfigError> {
        if self.seasons.is_empty() {
            return Err(ConfigError::Validation("seasons must not be empty".into()));
        }
        let mut covered = [0u8; 12];
        for s in &self.seasons {
            let valid_name = !s.name.is_empty()
                && s.name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !valid_name {
                return Err(ConfigError::Validation(format!(
                    "season name '{}' must be lowercase letters, digits or dashes",
                    s.name
                )));
            }
            for color in [&s.light, &s.dark] {
                if season::parse_hex(color).is_none() {
                    return Err(ConfigError::Validation(format!(
                        "season '{}' color '{}' must be #rrggbb",
                        s.name, color
                    )));
                }
            }
            for &month in &s.months {
                if !(1..=12).contains(&month) {
                    return Err(ConfigError::Validation(format!(
                        "season '{}' lists invalid month {}",
                        s.name, month
                    )));
                }
                covered[(month - 1) as usize] += 1;
            }
        }
        if let Some(pos) = covered.iter().position(|&n| n != 1) {
            return Err(ConfigError::Validation(format!(
                "month {} must belong to exactly one season",
                pos + 1
            )));
        }
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Validation("pages must not be empty".into()));
        }
        let mut names = HashSet::new();
        let mut outputs = HashSet::new();
        for page in &self.pages {
            if !names.insert(page.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page name '{}'",
                    page.name
                )));
            }
            if !is_safe_relative(&page.output) || !page.output.ends_with(".html") {
                return Err(ConfigError::Validation(format!(
                    "page '{}' output '{}' must be a relative .html path inside the output directory",
                    page.name, page.output
                )));
            }
            if !outputs.insert(page.output.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "pages share output path '{}'",
                    page.output
                )));
            }
            if page.template.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "page '{}' has no template",
                    page.name
                )));
            }

            let mut placeholders = HashSet::new();
            for section in &page.sections {
                let name = section.placeholder.as_str();
                if !is_placeholder_name(name) {
                    return Err(ConfigError::Validation(format!(
                        "page '{}': placeholder '{}' must be lowercase letters, digits or underscores",
                        page.name, name
                    )));
                }
                if BUILTIN_PLACEHOLDERS.contains(&name) {
                    return Err(ConfigError::Validation(format!(
                        "page '{}': placeholder '{}' is reserved",
                        page.name, name
                    )));
                }
                if !placeholders.insert(name) {
                    return Err(ConfigError::Validation(format!(
                        "page '{}': placeholder '{}' is wired twice",
                        page.name, name
                    )));
                }
                match &section.file {
                    Some(file) if !is_safe_relative(file) => {
                        return Err(ConfigError::Validation(format!(
                            "page '{}': content file '{}' must be a relative path",
                            page.name, file
                        )));
                    }
                    None if section.kind.requires_file() => {
                        return Err(ConfigError::Validation(format!(
                            "page '{}': {} section '{}' needs a content file",
                            page.name,
                            section.kind.label(),
                            name
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Every content file referenced by any page, deduplicated and sorted.
    pub fn content_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .filter_map(|s| s.file.as_deref())
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Whether any page renders a gallery (and so needs the photo feed).
    pub fn uses_gallery(&self) -> bool {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .any(|s| s.kind == SectionKind::Gallery)
    }
}

/// Relative, non-empty, and never climbing out of its base directory.
///
/// `.` alone is rejected: it names the base directory itself, not a path in it.
fn is_safe_relative(path: &str) -> bool {
    let p = Path::new(path);
    !path.trim().is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && p.components().any(|c| matches!(c, Component::Normal(_)))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given site root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error. Arrays ([[seasons]], [[pages]]) replace the
# defaults wholesale when present.

# Markdown content directory, relative to the site root.
content_dir = "content"

# Directory copied unchanged into the output tree.
static_dir = "assets"

# Files copied unchanged to the output root, e.g. ["CNAME"].
passthrough = []

# ---------------------------------------------------------------------------
# Stylesheet and script
# ---------------------------------------------------------------------------
[assets]
# "inline" embeds both files verbatim; "external" links and copies them.
mode = "inline"
stylesheet = "style.css"
script = "script.js"

# ---------------------------------------------------------------------------
# Photo feed (gallery)
# ---------------------------------------------------------------------------
[feed]
# JSON endpoint returning [{ "url": ..., "exif": { ... } }]. Empty disables.
url = ""
timeout_secs = 5
# Masonry columns (1-6).
columns = 3

# ---------------------------------------------------------------------------
# Generated images (empty path disables)
# ---------------------------------------------------------------------------
[derived]
favicon = "favicon.png"
og_image = "og-image.png"

# ---------------------------------------------------------------------------
# Seasonal accents: every month 1-12 belongs to exactly one season.
# ---------------------------------------------------------------------------
[[seasons]]
name = "winter"
months = [12, 1, 2]
light = "#3b6ea5"
dark = "#8ab4f8"

[[seasons]]
name = "spring"
months = [3, 4, 5]
light = "#2f855a"
dark = "#68d391"

[[seasons]]
name = "summer"
months = [6, 7, 8]
light = "#c05621"
dark = "#f6ad55"

[[seasons]]
name = "autumn"
months = [9, 10, 11]
light = "#9b2c2c"
dark = "#fc8181"

# ---------------------------------------------------------------------------
# Pages. Builtin placeholders available in every template:
#   {{title}} {{style}} {{script}} {{season_css}} {{season_index}} {{season_data}}
# Section kinds: hero, about, projects, articles, tags, rolodex, footer, gallery
# ---------------------------------------------------------------------------
[[pages]]
name = "home"
output = "index.html"
template = "template.html"
title = "Home"

[[pages.sections]]
placeholder = "hero"
kind = "hero"
file = "hero.md"

[[pages.sections]]
placeholder = "about"
kind = "about"
file = "about.md"

[[pages.sections]]
placeholder = "projects"
kind = "projects"
file = "projects.md"

[[pages.sections]]
placeholder = "lately"
kind = "tags"
file = "lately.md"

[[pages.sections]]
placeholder = "footer"
kind = "footer"
file = "footer.md"

[[pages]]
name = "work"
output = "work/index.html"
template = "work.html"
title = "Work"

[[pages.sections]]
placeholder = "articles"
kind = "articles"
file = "writing.md"

[[pages.sections]]
placeholder = "projects"
kind = "projects"
file = "projects.md"

[[pages.sections]]
placeholder = "lately"
kind = "tags"
file = "lately.md"

[[pages.sections]]
placeholder = "footer"
kind = "footer"
file = "footer.md"

[[pages]]
name = "play"
output = "play/index.html"
template = "play.html"
title = "Play"

# The gallery is fed by [feed]; a content file (for its heading) is optional.
[[pages.sections]]
placeholder = "gallery"
kind = "gallery"

[[pages.sections]]
placeholder = "rolodex"
kind = "rolodex"
file = "rolodex.md"

[[pages.sections]]
placeholder = "lately"
kind = "tags"
file = "lately.md"

[[pages.sections]]
placeholder = "footer"
kind = "footer"
file = "footer.md"
"##
}
