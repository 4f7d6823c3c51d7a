//! Build orchestration.
//!
//! One call to [`build`] turns a site root into a deployable output tree:
//!
//! ```text
//! site.toml ─→ config ─→ season
//!                │
//! content/*.md ──┼─→ parse (fail fast) ─→ render sections ─┐
//! photo feed ────┘   (degrades to zero photos)            ├─→ compose pages
//! style.css, script.js ─→ asset bundle ───────────────────┘        │
//!                                                                  ▼
//!           staging dir ← pages, assets/, passthrough, derived images
//!                │
//!                └─→ swapped into place
//! ```
//!
//! Everything is written into a hidden staging directory beside the output
//! and renamed into place only after the last step succeeds. Any fatal error
//! leaves the previous output exactly as it was.
//!
//! Recoverable problems (an unreachable photo feed, a derived image that
//! fails to encode, a content section no template references) are logged and
//! reported but never fail the build.
//!
//! [`check`] runs the same pipeline up to composition without writing.

use crate::assets::{self, AssetBundle, AssetError};
use crate::compose::{self, ComposeError, PlaceholderMap};
use crate::config::{self, ConfigError, PageConfig, SiteConfig};
use crate::content::{self, ContentDocument, ContentError};
use crate::derived;
use crate::feed::{self, Photo, PhotoFeed};
use crate::render::{self, SectionInput};
use crate::season::{self, AccentPair};
use maud::html;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("error walking static files: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("month {0} is not between 1 and 12")]
    InvalidMonth(u32),
    #[error("no season covers month {0}")]
    NoSeason(u32),
}

/// Inputs of one build. The month is explicit so builds are reproducible.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub site_root: PathBuf,
    pub output: PathBuf,
    /// 1-12; selects the seasonal accent.
    pub month: u32,
}

/// What happened to one derived image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedStatus {
    Generated,
    /// Generation failed; the previous build's file was carried forward.
    Kept,
    /// Generation failed and there was nothing to keep.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct DerivedReport {
    pub path: String,
    pub status: DerivedStatus,
}

#[derive(Debug, Clone)]
pub struct PageReport {
    pub name: String,
    pub output: String,
    pub bytes: usize,
    /// First 12 hex digits of the page's SHA-256.
    pub digest: String,
    pub sections: usize,
    /// Content placeholders the template never referenced.
    pub unused: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    /// `None` for a check run.
    pub output: Option<PathBuf>,
    pub month: u32,
    pub season: String,
    pub accent: AccentPair,
    pub photos: usize,
    pub pages: Vec<PageReport>,
    pub static_files: usize,
    pub passthrough: Vec<String>,
    pub derived: Vec<DerivedReport>,
}

struct RenderedPage {
    html: String,
    report: PageReport,
}

/// Everything computed before the first write.
struct RenderedSite {
    config: SiteConfig,
    bundle: AssetBundle,
    pages: Vec<RenderedPage>,
    report: BuildReport,
}

/// Build the site and swap it into `options.output`.
pub fn build(options: &BuildOptions, feed: &dyn PhotoFeed) -> Result<BuildReport, BuildError> {
    let site = render_site(options, feed)?;
    let RenderedSite {
        config,
        bundle,
        pages,
        mut report,
    } = site;

    let parent = output_parent(&options.output);
    fs::create_dir_all(&parent)?;
    let staging = tempfile::Builder::new()
        .prefix(".simple-folio-")
        .tempdir_in(&parent)?;
    debug!(staging = %staging.path().display(), "staging output");

    for page in &pages {
        write_file(&staging.path().join(&page.report.output), page.html.as_bytes())?;
    }

    let static_src = options.site_root.join(&config.static_dir);
    report.static_files = copy_static_dir(&static_src, &staging.path().join(&config.static_dir))?;

    for name in &config.passthrough {
        let src = options.site_root.join(name);
        if !src.is_file() {
            return Err(AssetError::Missing(src).into());
        }
        copy_file(&src, &staging.path().join(name))?;
        report.passthrough.push(name.clone());
    }

    for copy in &bundle.copies {
        copy_file(&copy.source, &staging.path().join(&copy.target))?;
    }

    report.derived = generate_derived(&config, &report.accent, &options.output, staging.path())?;

    swap_into_place(staging.path(), &options.output, &parent)?;
    info!(output = %options.output.display(), "build complete");
    report.output = Some(options.output.clone());
    Ok(report)
}

/// Run the pipeline through composition without touching the filesystem
/// beyond reading.
pub fn check(options: &BuildOptions, feed: &dyn PhotoFeed) -> Result<BuildReport, BuildError> {
    Ok(render_site(options, feed)?.report)
}

fn render_site(options: &BuildOptions, feed: &dyn PhotoFeed) -> Result<RenderedSite, BuildError> {
    if !(1..=12).contains(&options.month) {
        return Err(BuildError::InvalidMonth(options.month));
    }
    let root = &options.site_root;
    let config = config::load_config(root)?;
    info!(root = %root.display(), pages = config.pages.len(), "loaded site config");

    let index = season::season_for_month(&config.seasons, options.month)
        .ok_or(BuildError::NoSeason(options.month))?;
    let state = season::apply_season(&config.seasons, index)
        .ok_or(BuildError::NoSeason(options.month))?;
    let season_name = config.seasons[state.active_index].name.clone();
    info!(month = options.month, season = %season_name, "season selected");

    let documents = parse_documents(root, &config)?;

    let photos = if config.uses_gallery() {
        feed::fetch_or_empty(feed)
    } else {
        Vec::new()
    };
    info!(count = photos.len(), "photos");

    let bundle = assets::prepare(root, &config.assets)?;
    let season_css = season::accent_css(&state.colors);
    let season_data = season::season_data_json(&config.seasons)?;

    let mut pages = Vec::with_capacity(config.pages.len());
    for page in &config.pages {
        let mut map = PlaceholderMap::new();
        bundle.apply(&mut map);
        map.insert_builtin("title", html! { (page.title) }.into_string());
        map.insert_builtin("season_css", season_css.clone());
        map.insert_builtin("season_index", state.active_index.to_string());
        map.insert_builtin("season_data", season_data.clone());

        let rendered = render_page(root, &config, page, &documents, &photos, map)?;
        pages.push(rendered);
    }

    let report = BuildReport {
        output: None,
        month: options.month,
        season: season_name,
        accent: state.colors,
        photos: photos.len(),
        pages: pages.iter().map(|p| p.report.clone()).collect(),
        static_files: 0,
        passthrough: Vec::new(),
        derived: Vec::new(),
    };
    Ok(RenderedSite {
        config,
        bundle,
        pages,
        report,
    })
}

/// Parse every referenced content file once. The first malformed file
/// aborts the build.
fn parse_documents(
    root: &Path,
    config: &SiteConfig,
) -> Result<BTreeMap<String, ContentDocument>, BuildError> {
    let content_dir = root.join(&config.content_dir);
    let mut documents = BTreeMap::new();
    for file in config.content_files() {
        let path = content_dir.join(file);
        let doc = content::load(&path)?;
        debug!(file, blocks = doc.blocks.len(), "parsed content");
        documents.insert(file.to_string(), doc);
    }
    Ok(documents)
}

fn render_page(
    root: &Path,
    config: &SiteConfig,
    page: &PageConfig,
    documents: &BTreeMap<String, ContentDocument>,
    photos: &[Photo],
    mut map: PlaceholderMap,
) -> Result<RenderedPage, BuildError> {
    let content_dir = root.join(&config.content_dir);

    for section in &page.sections {
        let empty;
        let document = match section.file.as_deref().and_then(|f| documents.get(f)) {
            Some(doc) => doc,
            None => {
                empty = ContentDocument::empty(content_dir.join(&section.placeholder));
                &empty
            }
        };
        let input = SectionInput {
            document,
            photos,
            gallery_columns: config.feed.columns,
        };
        let markup = render::render_section(section.kind, &input)?;
        map.insert_content(&section.placeholder, markup.into_string());
    }

    let template_path = root.join(&page.template);
    let template = assets::read_asset(&template_path)?;
    let composed = compose::compose(&template_path, &template, &map)?;
    for name in &composed.unused {
        warn!(page = %page.name, placeholder = %name, "section is not referenced by the template");
    }

    let digest = Sha256::digest(composed.html.as_bytes());
    let digest = format!("{:x}", digest)[..12].to_string();
    info!(page = %page.name, output = %page.output, bytes = composed.html.len(), "composed page");

    Ok(RenderedPage {
        report: PageReport {
            name: page.name.clone(),
            output: page.output.clone(),
            bytes: composed.html.len(),
            digest,
            sections: page.sections.len(),
            unused: composed.unused,
        },
        html: composed.html,
    })
}

/// Run every enabled generator. A failure keeps the previous build's file
/// when there is one.
fn generate_derived(
    config: &SiteConfig,
    accent: &AccentPair,
    previous_output: &Path,
    staging: &Path,
) -> Result<Vec<DerivedReport>, BuildError> {
    let mut reports = Vec::new();
    for generator in derived::generators(&config.derived) {
        let path = generator.output_path().to_string();
        let status = match generator.generate(accent) {
            Ok(bytes) => {
                write_file(&staging.join(&path), &bytes)?;
                debug!(path = %path, "generated derived image");
                DerivedStatus::Generated
            }
            Err(e) => {
                let previous = previous_output.join(&path);
                if previous.is_file() {
                    warn!(path = %path, error = %e, "derived image failed; keeping previous");
                    copy_file(&previous, &staging.join(&path))?;
                    DerivedStatus::Kept
                } else {
                    warn!(path = %path, error = %e, "derived image failed; skipping");
                    DerivedStatus::Skipped
                }
            }
        };
        reports.push(DerivedReport { path, status });
    }
    Ok(reports)
}

/// Copy `src` to `dst` recursively in name order. A missing static dir is
/// not an error; there is simply nothing to copy.
fn copy_static_dir(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        debug!(dir = %src.display(), "no static dir");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        copy_file(entry.path(), &dst.join(rel))?;
        copied += 1;
    }
    debug!(count = copied, "copied static files");
    Ok(copied)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst).map(|_| ())
}

fn output_parent(output: &Path) -> PathBuf {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replace `output` with `staging`. The old tree is moved aside first and
/// restored if the final rename fails.
fn swap_into_place(staging: &Path, output: &Path, parent: &Path) -> io::Result<()> {
    // Temp dirs are created owner-only; a published tree must be world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staging, fs::Permissions::from_mode(0o755))?;
    }
    if !output.exists() {
        return fs::rename(staging, output);
    }
    let retired = tempfile::Builder::new()
        .prefix(".simple-folio-old-")
        .tempdir_in(parent)?;
    let old = retired.path().join("site");
    fs::rename(output, &old)?;
    if let Err(e) = fs::rename(staging, output) {
        fs::rename(&old, output)?;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Exif, StaticFeed};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn options(site: &Path, out: &Path) -> BuildOptions {
        BuildOptions {
            site_root: site.to_path_buf(),
            output: out.to_path_buf(),
            month: 4,
        }
    }

    #[test]
    fn builds_fixture_site() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let report = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();

        assert_eq!(report.season, "spring");
        let names: Vec<&str> = report.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["home", "work", "play"]);
        assert!(out.join("index.html").is_file());
        assert!(out.join("work/index.html").is_file());
        assert!(out.join("play/index.html").is_file());
        assert!(out.join("CNAME").is_file());
        assert!(out.join("assets/photo-placeholder.svg").is_file());
        assert!(out.join("favicon.png").is_file());
        assert!(out.join("og-image.png").is_file());
        assert_eq!(report.output.as_deref(), Some(out.as_path()));
    }

    #[test]
    fn pages_have_no_placeholders_left() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();
        for page in ["index.html", "work/index.html", "play/index.html"] {
            let html = read(&out.join(page));
            assert!(!html.contains("{{"), "{page} still has a placeholder");
            assert!(html.contains("<style>"), "{page} has no inlined style");
        }
    }

    #[test]
    fn season_builtins_follow_month() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let mut opts = options(tmp.path(), &out);
        opts.month = 12;
        let report = build(&opts, &StaticFeed::default()).unwrap();
        assert_eq!(report.season, "winter");
        let html = read(&out.join("index.html"));
        assert!(html.contains("--accent-light: #3b6ea5"));
        assert!(html.contains(r#"data-season-index="0""#));
    }

    #[test]
    fn failing_feed_renders_empty_gallery() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let report = build(&options(tmp.path(), &out), &FailingFeed).unwrap();
        assert_eq!(report.photos, 0);
        let html = read(&out.join("play/index.html"));
        assert!(html.contains(r#"data-count="0""#));
    }

    #[test]
    fn photos_reach_the_gallery() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let feed = StaticFeed(vec![Photo {
            url: "https://photos.example/1.jpg".into(),
            exif: Exif {
                camera: Some("X100V".into()),
                ..Exif::default()
            },
        }]);
        let report = build(&options(tmp.path(), &out), &feed).unwrap();
        assert_eq!(report.photos, 1);
        let html = read(&out.join("play/index.html"));
        assert!(html.contains("https://photos.example/1.jpg"));
    }

    #[test]
    fn malformed_content_leaves_previous_output() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();
        let before = read(&out.join("index.html"));

        fs::write(
            tmp.path().join("content/projects.md"),
            "## Broken\n- url: [x](https://x.dev)\n- role: Author\n",
        )
        .unwrap();
        let err = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap_err();
        assert!(matches!(err, BuildError::Content(_)), "{err}");
        assert!(err.to_string().contains("Broken"));
        assert_eq!(read(&out.join("index.html")), before);
        assert_no_staging_left(tmp.path());
    }

    #[test]
    fn missing_stylesheet_is_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("style.css")).unwrap();
        let out = tmp.path().join("dist");
        let err = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap_err();
        assert!(matches!(err, BuildError::Asset(AssetError::Missing(_))));
        assert!(!out.exists());
    }

    #[test]
    fn missing_passthrough_is_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("CNAME")).unwrap();
        let out = tmp.path().join("dist");
        let err = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap_err();
        assert!(matches!(err, BuildError::Asset(AssetError::Missing(_))));
        assert!(!out.exists());
        assert_no_staging_left(tmp.path());
    }

    #[test]
    fn unresolved_placeholder_is_fatal() {
        let tmp = setup_fixtures();
        let path = tmp.path().join("template.html");
        let template = read(&path).replace("</main>", "{{newsletter}}</main>");
        fs::write(&path, template).unwrap();
        let out = tmp.path().join("dist");
        let err = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap_err();
        assert!(err.to_string().contains("{{newsletter}}"));
    }

    #[test]
    fn unused_section_is_reported_not_fatal() {
        let tmp = setup_fixtures();
        let path = tmp.path().join("template.html");
        let template = read(&path).replace("{{lately}}", "");
        fs::write(&path, template).unwrap();
        let report = check(
            &options(tmp.path(), &tmp.path().join("dist")),
            &StaticFeed::default(),
        )
        .unwrap();
        assert_eq!(report.pages[0].unused, vec!["lately".to_string()]);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let tmp = setup_fixtures();
        let mut opts = options(tmp.path(), &tmp.path().join("dist"));
        opts.month = 13;
        assert!(matches!(
            check(&opts, &StaticFeed::default()),
            Err(BuildError::InvalidMonth(13))
        ));
    }

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let report = check(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();
        assert_eq!(report.pages.len(), 3);
        assert!(report.output.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn rebuild_replaces_stale_files() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();
        build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();
        assert!(!out.join("stale.html").exists());
        assert!(out.join("index.html").is_file());
        assert_no_staging_left(tmp.path());
    }

    #[test]
    fn disabled_derived_images_are_not_written() {
        let tmp = setup_fixtures();
        let config_path = tmp.path().join(config::CONFIG_FILENAME);
        let mut text = read(&config_path);
        text.push_str("\n[derived]\nfavicon = \"\"\nog_image = \"\"\n");
        fs::write(&config_path, text).unwrap();
        let out = tmp.path().join("dist");
        let report = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap();
        assert!(report.derived.is_empty());
        assert!(!out.join("favicon.png").exists());
    }

    #[test]
    fn derived_path_outside_output_is_rejected() {
        let tmp = setup_fixtures();
        let config_path = tmp.path().join(config::CONFIG_FILENAME);
        let mut text = read(&config_path);
        text.push_str("\n[derived]\nfavicon = \"../escaped.png\"\n");
        fs::write(&config_path, text).unwrap();
        let out = tmp.path().join("sub/dist");
        let err = build(&options(tmp.path(), &out), &StaticFeed::default()).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)), "{err}");
        assert!(!tmp.path().join("sub/escaped.png").exists());
        assert!(!out.exists());
    }

    #[test]
    fn failed_derived_image_keeps_previous_file() {
        let tmp = TempDir::new().unwrap();
        let previous = tmp.path().join("prev");
        let staging = tmp.path().join("stage");
        fs::create_dir_all(&previous).unwrap();
        fs::create_dir_all(&staging).unwrap();
        fs::write(previous.join("favicon.png"), b"old png").unwrap();

        let config = SiteConfig::default();
        let bad = AccentPair {
            light: "nope".into(),
            dark: "nope".into(),
        };
        let reports = generate_derived(&config, &bad, &previous, &staging).unwrap();
        let statuses: Vec<(&str, DerivedStatus)> = reports
            .iter()
            .map(|r| (r.path.as_str(), r.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("favicon.png", DerivedStatus::Kept),
                ("og-image.png", DerivedStatus::Skipped),
            ]
        );
        assert_eq!(fs::read(staging.join("favicon.png")).unwrap(), b"old png");
    }

    #[test]
    fn output_parent_of_bare_name_is_cwd() {
        assert_eq!(output_parent(Path::new("dist")), PathBuf::from("."));
        assert_eq!(output_parent(Path::new("a/dist")), PathBuf::from("a"));
    }
}
