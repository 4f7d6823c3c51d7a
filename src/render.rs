//! Section rendering.
//!
//! Turns a parsed [`ContentDocument`] into the HTML fragment for one page
//! section. Every section has a declared [`SectionKind`]; the kind selects a
//! renderer from a fixed dispatch table ([`renderer`]) and each renderer owns
//! one HTML skeleton.
//!
//! | Kind | Reads | Produces |
//! |------|-------|----------|
//! | `hero` | first heading, first paragraph | `header.hero` |
//! | `about` | heading, paragraphs | `section` with `div.about-text` |
//! | `projects` | optional heading, field groups | project cards |
//! | `articles` | optional heading, field groups | article cards with tag chips |
//! | `tags` | field list | inline tags, empty entries omitted |
//! | `rolodex` | field list | `ul.rolodex`, shuffled client-side |
//! | `footer` | field list | email, meta row, credits |
//! | `gallery` | photo feed, optional heading | masonry columns |
//!
//! Cards render in file order. Newest-first ordering is an authoring
//! convention; nothing here sorts.
//!
//! HTML is built with [maud](https://maud.lambda.xyz/), so all content text
//! is escaped.

use crate::content::{ContentDocument, ContentError, FieldValue, GroupRef, InlineSpan};
use crate::feed::Photo;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// Article cards show at most this many tag chips.
pub const MAX_ARTICLE_TAGS: usize = 3;

const PROJECT_FIELDS: &[&str] = &["url", "role", "desc"];
const ARTICLE_FIELDS: &[&str] = &["publisher", "date", "tags", "url"];

/// Declared kind of a page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Articles,
    Tags,
    Rolodex,
    Footer,
    Gallery,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Projects => "projects",
            SectionKind::Articles => "articles",
            SectionKind::Tags => "tags",
            SectionKind::Rolodex => "rolodex",
            SectionKind::Footer => "footer",
            SectionKind::Gallery => "gallery",
        }
    }

    /// Every kind except the gallery is driven by a content file.
    pub fn requires_file(self) -> bool {
        self != SectionKind::Gallery
    }
}

/// Everything a renderer may read.
pub struct SectionInput<'a> {
    pub document: &'a ContentDocument,
    pub photos: &'a [Photo],
    pub gallery_columns: usize,
}

pub type RenderFn = fn(&SectionInput<'_>) -> Result<Markup, ContentError>;

/// The dispatch table: one renderer per kind.
pub fn renderer(kind: SectionKind) -> RenderFn {
    match kind {
        SectionKind::Hero => render_hero,
        SectionKind::About => render_about,
        SectionKind::Projects => render_projects,
        SectionKind::Articles => render_articles,
        SectionKind::Tags => render_tags,
        SectionKind::Rolodex => render_rolodex,
        SectionKind::Footer => render_footer,
        SectionKind::Gallery => render_gallery,
    }
}

pub fn render_section(kind: SectionKind, input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    renderer(kind)(input)
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Renders inline spans. Accents point at the seasonal CSS variable so the
/// page script can repaint them.
pub fn render_spans(spans: &[InlineSpan]) -> Markup {
    html! {
        @for s in spans {
            @match s {
                InlineSpan::Plain(text) => { (text) }
                InlineSpan::Accent(text) => {
                    span.accent style="color: var(--accent)" { (text) }
                }
                InlineSpan::Link { text, url } => {
                    a href=(url) target="_blank" rel="noopener" { (text) }
                }
            }
        }
    }
}

/// Card titles sit inside the card's own link, so nested links keep only
/// their text.
fn render_title(spans: &[InlineSpan]) -> Markup {
    html! {
        @for s in spans {
            @match s {
                InlineSpan::Accent(text) => {
                    span.accent style="color: var(--accent)" { (text) }
                }
                InlineSpan::Plain(text) | InlineSpan::Link { text, .. } => { (text) }
            }
        }
    }
}

/// Look up a required card field. Absent and empty both fail.
fn required<'a>(
    doc: &ContentDocument,
    group: &GroupRef<'a>,
    noun: &str,
    key: &str,
) -> Result<&'a FieldValue, ContentError> {
    match group.get(key) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(ContentError::malformed(
            &doc.source_path,
            group.line,
            format!(
                "{noun} '{}' has an empty required field '{key}'",
                group.title_text()
            ),
        )),
        None => Err(ContentError::malformed(
            &doc.source_path,
            group.line,
            format!(
                "{noun} '{}' is missing required field '{key}'",
                group.title_text()
            ),
        )),
    }
}

/// Check all required fields up front so the error names the first missing
/// one in declaration order.
fn require_all(
    doc: &ContentDocument,
    group: &GroupRef<'_>,
    noun: &str,
    keys: &[&str],
) -> Result<(), ContentError> {
    keys.iter()
        .try_for_each(|key| required(doc, group, noun, key).map(|_| ()))
}

fn missing_block(doc: &ContentDocument, kind: SectionKind, what: &str) -> ContentError {
    ContentError::malformed(
        &doc.source_path,
        1,
        format!("{} section needs {what}", kind.label()),
    )
}

/// Split a comma-separated tag string into at most [`MAX_ARTICLE_TAGS`] tags.
pub fn split_tags(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_ARTICLE_TAGS)
        .collect()
}

// ============================================================================
// Renderers
// ============================================================================

fn render_hero(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;
    let heading = doc
        .first_heading()
        .ok_or_else(|| missing_block(doc, SectionKind::Hero, "a `#` heading"))?;
    let tagline = doc.paragraphs().next();

    Ok(html! {
        header.hero {
            h1 { (render_spans(heading)) }
            @if let Some(tagline) = tagline {
                p.tagline { (render_spans(tagline)) }
            }
        }
    })
}

fn render_about(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;
    let heading = doc.first_heading();

    Ok(html! {
        section.about {
            div.about-content {
                @if let Some(heading) = heading {
                    h2 { (render_spans(heading)) }
                }
                div.about-text {
                    @for paragraph in doc.paragraphs() {
                        p { (render_spans(paragraph)) }
                    }
                }
            }
        }
    })
}

fn project_card(doc: &ContentDocument, group: &GroupRef<'_>) -> Result<Markup, ContentError> {
    require_all(doc, group, "project", PROJECT_FIELDS)?;
    let url = required(doc, group, "project", "url")?.url();
    let role = required(doc, group, "project", "role")?;
    let desc = required(doc, group, "project", "desc")?;

    Ok(html! {
        div.project {
            a.project-header href=(url) target="_blank" rel="noopener" {
                span.project-name { (render_title(group.title)) }
                span.project-arrow {
                    span.material-symbols-sharp { "arrow_outward" }
                }
            }
            span.project-role { (render_spans(role.spans())) }
            span.project-desc { (render_spans(desc.spans())) }
        }
    })
}

fn render_projects(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;
    let cards = doc
        .groups()
        .map(|g| project_card(doc, &g))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        section.projects-section {
            @if let Some(title) = doc.first_heading() {
                h2.projects-title { (render_spans(title)) }
            }
            div.projects {
                @for card in &cards { (card) }
            }
        }
    })
}

fn article_card(doc: &ContentDocument, group: &GroupRef<'_>) -> Result<Markup, ContentError> {
    require_all(doc, group, "article", ARTICLE_FIELDS)?;
    let publisher = required(doc, group, "article", "publisher")?.plain_text();
    let date = required(doc, group, "article", "date")?.plain_text();
    let tags_text = required(doc, group, "article", "tags")?.plain_text();
    let url = required(doc, group, "article", "url")?.url();
    let tags = split_tags(&tags_text);

    Ok(html! {
        article.article-card {
            a.article-link href=(url) target="_blank" rel="noopener" {
                span.article-title { (render_title(group.title)) }
                span.article-meta {
                    span.article-publisher { (publisher) }
                    " · "
                    time.article-date { (date) }
                }
            }
            ul.article-tags {
                @for tag in &tags {
                    li.tag-chip { (tag) }
                }
            }
        }
    })
}

fn render_articles(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;
    let cards = doc
        .groups()
        .map(|g| article_card(doc, &g))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(html! {
        section.articles-section {
            @if let Some(title) = doc.first_heading() {
                h2.articles-title { (render_spans(title)) }
            }
            div.articles {
                @for card in &cards { (card) }
            }
        }
    })
}

/// Material Symbols icon for well-known "lately" keys.
fn tag_icon(key: &str) -> Option<&'static str> {
    match key {
        "read" => Some("menu_book"),
        "listened" => Some("headphones"),
        "watched" => Some("movie"),
        "cooked" => Some("restaurant"),
        "played" => Some("sports_esports"),
        _ => None,
    }
}

fn render_tags(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let visible = input.document.entries().filter(|f| !f.value.is_empty());

    Ok(html! {
        div.footer-lately {
            @for field in visible {
                div.footer-lately-item data-key=(field.key) {
                    @if let Some(icon) = tag_icon(&field.key) {
                        span.material-symbols-sharp aria-label=(field.key) { (icon) }
                    } @else {
                        span.footer-lately-label { (field.key) }
                    }
                    span.footer-lately-value { (render_spans(field.value.spans())) }
                }
            }
        }
    })
}

fn render_rolodex(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;

    Ok(html! {
        section.rolodex-section {
            @if let Some(title) = doc.first_heading() {
                h2.rolodex-title { (render_spans(title)) }
            }
            // Order is randomized by the page script on load.
            ul.rolodex data-shuffle="true" {
                @for field in doc.entries().filter(|f| !f.value.is_empty()) {
                    li.rolodex-entry {
                        span.rolodex-name { (field.key) }
                        " "
                        span.rolodex-link { (render_spans(field.value.spans())) }
                    }
                }
            }
        }
    })
}

fn render_footer(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let doc = input.document;
    let field = |key: &str| doc.entry(key).filter(|v| !v.is_empty());

    let email = field("email").map(FieldValue::plain_text);
    let location = field("location");
    let credit = field("credit");
    let bottom: Vec<&FieldValue> = ["license", "handle", "year"]
        .iter()
        .filter_map(|k| field(*k))
        .collect();

    Ok(html! {
        @if let Some(email) = &email {
            div.footer-email {
                span { (email) }
                button.footer-email-copy onclick="copyEmail()" aria-label="Copy email" {
                    span.material-symbols-sharp { "content_copy" }
                }
            }
        }
        div.footer-meta {
            @if let Some(location) = location {
                span { (render_spans(location.spans())) }
            }
            span id="local-time" { "--:--" }
            span id="temperature" { "--" }
            span { "AQI " span id="aqi" { "--" } }
        }
        div.footer-bottom {
            @if let Some(credit) = credit {
                span { (render_spans(credit.spans())) }
            }
            @if !bottom.is_empty() {
                span {
                    @for (i, value) in bottom.iter().enumerate() {
                        @if i > 0 { " · " }
                        (render_spans(value.spans()))
                    }
                }
            }
        }
    })
}

/// Distribute photos round-robin so each column stays in feed order.
pub fn masonry_columns(photos: &[Photo], columns: usize) -> Vec<Vec<&Photo>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<&Photo>> = vec![Vec::new(); columns];
    for (i, photo) in photos.iter().enumerate() {
        out[i % columns].push(photo);
    }
    out
}

fn render_gallery(input: &SectionInput<'_>) -> Result<Markup, ContentError> {
    let columns = masonry_columns(input.photos, input.gallery_columns);
    let style = format!("--columns: {}", columns.len());

    Ok(html! {
        section.gallery data-count=(input.photos.len()) {
            @if let Some(title) = input.document.first_heading() {
                h2.gallery-title { (render_spans(title)) }
            }
            @if let Some(intro) = input.document.paragraphs().next() {
                p.gallery-intro { (render_spans(intro)) }
            }
            div.masonry style=(style) {
                @for column in &columns {
                    div.masonry-column {
                        @for photo in column {
                            figure.photo {
                                img src=(photo.url) alt=(photo.alt_text()) loading="lazy";
                                @if let Some(caption) = photo.exif.summary() {
                                    figcaption.photo-exif { (caption) }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse;
    use crate::feed::Exif;
    use std::path::Path;

    fn render(kind: SectionKind, text: &str) -> Result<String, ContentError> {
        let doc = parse(Path::new("section.md"), text).unwrap();
        let input = SectionInput {
            document: &doc,
            photos: &[],
            gallery_columns: 3,
        };
        render_section(kind, &input).map(Markup::into_string)
    }

    /// (href, text) of every anchor in rendered HTML.
    fn anchors(html: &str) -> Vec<(String, String)> {
        let mut found = Vec::new();
        let mut rest = html;
        while let Some(start) = rest.find("<a href=\"") {
            let after = &rest[start + 9..];
            let href_end = after.find('"').unwrap();
            let href = after[..href_end].to_string();
            let open_end = after.find('>').unwrap();
            let close = after.find("</a>").unwrap();
            found.push((href, after[open_end + 1..close].to_string()));
            rest = &after[close..];
        }
        found
    }

    fn photo(url: &str) -> Photo {
        Photo {
            url: url.to_string(),
            exif: Exif::default(),
        }
    }

    #[test]
    fn accent_uses_css_variable() {
        let html = render_spans(&[InlineSpan::Accent("Ada".into())]).into_string();
        assert!(html.starts_with("<span"));
        assert!(html.contains(r#"class="accent""#));
        assert!(html.contains(r#"style="color: var(--accent)""#));
        assert!(html.ends_with(">Ada</span>"));
    }

    #[test]
    fn links_open_in_new_tab() {
        let html = render_spans(&[InlineSpan::Link {
            text: "x".into(),
            url: "https://x.dev".into(),
        }])
        .into_string();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener""#));
    }

    #[test]
    fn content_text_is_escaped() {
        let html = render(SectionKind::About, "<script>alert(1)</script>\n").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn hero_renders_heading_and_tagline() {
        let html = render(SectionKind::Hero, "# Hi, I'm **Ada**\nI draw with data.\n").unwrap();
        assert!(html.contains("<header class=\"hero\">"));
        assert!(html.contains("<h1>Hi, I'm <span class=\"accent\""));
        assert!(html.contains("<p class=\"tagline\">I draw with data.</p>"));
    }

    #[test]
    fn hero_without_heading_fails() {
        let err = render(SectionKind::Hero, "just text\n").unwrap_err();
        assert!(err.to_string().contains("hero section needs"));
    }

    #[test]
    fn about_renders_paragraphs_in_order() {
        let html = render(SectionKind::About, "# About\n\nfirst\n\nsecond\n").unwrap();
        let first = html.find("<p>first</p>").unwrap();
        let second = html.find("<p>second</p>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn tags_omit_empty_entries_and_keep_order() {
        let html = render(
            SectionKind::Tags,
            "- read: [Book](https://book)\n- watched:\n- cooked: [Dinner](https://dinner)\n",
        )
        .unwrap();
        assert_eq!(html.matches("footer-lately-item").count(), 2);
        assert!(!html.contains("watched"));
        assert_eq!(
            anchors(&html),
            vec![
                ("https://book".to_string(), "Book".to_string()),
                ("https://dinner".to_string(), "Dinner".to_string()),
            ]
        );
    }

    #[test]
    fn tags_round_trip_through_html() {
        let source = "- read: [The Book](https://example.com/book)\n- listened: [An Album](https://example.com/album)\n";
        let doc = parse(Path::new("lately.md"), source).unwrap();
        let html = render(SectionKind::Tags, source).unwrap();

        let rendered = anchors(&html);
        let reparsed: Vec<(String, String)> = rendered
            .iter()
            .map(|(href, text)| {
                let spans = crate::content::parse_inline(&format!("[{text}]({href})")).unwrap();
                match &spans[0] {
                    InlineSpan::Link { text, url } => (url.clone(), text.clone()),
                    other => panic!("expected link, got {other:?}"),
                }
            })
            .collect();
        let original: Vec<(String, String)> = doc
            .entries()
            .flat_map(|f| f.value.spans().to_vec())
            .filter_map(|s| match s {
                InlineSpan::Link { text, url } => Some((url, text)),
                _ => None,
            })
            .collect();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn tags_unknown_key_shows_label() {
        let html = render(SectionKind::Tags, "- built: a shed\n").unwrap();
        assert!(html.contains("<span class=\"footer-lately-label\">built</span>"));
    }

    const PROJECT: &str = "# Selected **work**\n\n## Tool\n- role: Author\n- url: https://tool.dev\n- desc: Built with [Rust](https://rust-lang.org)\n";

    #[test]
    fn project_card_renders_fields() {
        let html = render(SectionKind::Projects, PROJECT).unwrap();
        assert!(html.contains("<span class=\"project-name\">Tool</span>"));
        assert!(html.contains("href=\"https://tool.dev\""));
        assert!(html.contains("<span class=\"project-role\">Author</span>"));
        assert!(html.contains(
            r#"<a href="https://rust-lang.org" target="_blank" rel="noopener">Rust</a>"#
        ));
    }

    #[test]
    fn project_title_renders_accent() {
        let html = render(
            SectionKind::Projects,
            "## **Cool** Tool\n- role: r\n- url: https://tool.dev\n- desc: d\n",
        )
        .unwrap();
        assert!(html.contains(r#"<span class="project-name"><span class="accent""#));
        assert!(html.contains(">Cool</span> Tool</span>"));
    }

    #[test]
    fn link_in_card_title_does_not_nest_anchors() {
        let html = render(
            SectionKind::Projects,
            "## [Tool](https://elsewhere.dev)\n- role: r\n- url: https://tool.dev\n- desc: d\n",
        )
        .unwrap();
        assert!(html.contains(r#"<span class="project-name">Tool</span>"#));
        assert!(!html.contains("elsewhere.dev"));
    }

    #[test]
    fn accented_title_in_error_is_plain() {
        let err = render(
            SectionKind::Projects,
            "## **Cool** Tool\n- role: r\n- url: https://tool.dev\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("'Cool Tool'"), "{err}");
    }

    #[test]
    fn project_missing_desc_names_heading() {
        let err = render(
            SectionKind::Projects,
            "## Widget\n- role: Author\n- url: https://w.dev\n",
        )
        .unwrap_err();
        match err {
            ContentError::Malformed { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("'Widget'"));
                assert!(reason.contains("'desc'"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn project_empty_required_field_fails() {
        let err = render(
            SectionKind::Projects,
            "## Widget\n- role:\n- url: https://w.dev\n- desc: d\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty required field 'role'"));
    }

    #[test]
    fn projects_keep_file_order() {
        let html = render(
            SectionKind::Projects,
            "## Zeta\n- role: r\n- url: u\n- desc: d\n\n## Alpha\n- role: r\n- url: u\n- desc: d\n",
        )
        .unwrap();
        assert!(html.find("Zeta").unwrap() < html.find("Alpha").unwrap());
    }

    const ARTICLE: &str = "## published writings\n\nIntro.\n\n## On Maps\n- publisher: Quarterly\n- date: 2024-05\n- tags: a, b, c, d\n- url: https://q.example/maps\n";

    #[test]
    fn article_tags_truncated_to_three() {
        let html = render(SectionKind::Articles, ARTICLE).unwrap();
        assert_eq!(html.matches("class=\"tag-chip\"").count(), 3);
        assert!(html.contains("<li class=\"tag-chip\">a</li><li class=\"tag-chip\">b</li><li class=\"tag-chip\">c</li>"));
        assert!(!html.contains(">d</li>"));
    }

    #[test]
    fn article_section_title_is_plain_heading() {
        let html = render(SectionKind::Articles, ARTICLE).unwrap();
        assert!(html.contains("<h2 class=\"articles-title\">published writings</h2>"));
        assert!(html.contains("<span class=\"article-title\">On Maps</span>"));
    }

    #[test]
    fn article_missing_date_fails() {
        let err = render(
            SectionKind::Articles,
            "## Post\n- publisher: P\n- tags: x\n- url: u\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("'date'"));
    }

    #[test]
    fn split_tags_drops_blanks() {
        assert_eq!(split_tags(" a ,, b ,"), vec!["a", "b"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn rolodex_is_flagged_for_shuffle() {
        let html = render(
            SectionKind::Rolodex,
            "- Grace: [site](https://g.dev)\n- Linus:\n- Barbara: [blog](https://b.dev)\n",
        )
        .unwrap();
        assert!(html.contains("data-shuffle=\"true\""));
        assert_eq!(html.matches("rolodex-entry").count(), 2);
        assert!(!html.contains("Linus"));
    }

    #[test]
    fn footer_omits_absent_and_empty_fields() {
        let html = render(
            SectionKind::Footer,
            "- email: hi@ada.dev\n- location:\n- credit: Type by [Someone](https://s.dev)\n- license: CC BY\n- year: 2025\n",
        )
        .unwrap();
        assert!(html.contains("<span>hi@ada.dev</span>"));
        assert!(html.contains("copyEmail()"));
        assert!(html.contains("<span>CC BY · 2025</span>"));
        assert!(html.contains("id=\"aqi\""));
    }

    #[test]
    fn footer_without_email_has_no_copy_button() {
        let html = render(SectionKind::Footer, "- year: 2025\n").unwrap();
        assert!(!html.contains("copyEmail"));
    }

    #[test]
    fn gallery_with_no_photos_renders_empty() {
        let html = render(SectionKind::Gallery, "").unwrap();
        assert!(html.contains("data-count=\"0\""));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn gallery_distributes_photos_into_columns() {
        let photos: Vec<Photo> = (1..=5).map(|i| photo(&format!("https://p/{i}.jpg"))).collect();
        let doc = ContentDocument::empty("gallery");
        let input = SectionInput {
            document: &doc,
            photos: &photos,
            gallery_columns: 2,
        };
        let html = render_section(SectionKind::Gallery, &input).unwrap().into_string();
        assert_eq!(html.matches("<figure").count(), 5);
        assert_eq!(html.matches("class=\"masonry-column\"").count(), 2);
        assert!(html.contains("--columns: 2"));

        let columns = masonry_columns(&photos, 2);
        let first: Vec<&str> = columns[0].iter().map(|p| p.url.as_str()).collect();
        assert_eq!(first, vec!["https://p/1.jpg", "https://p/3.jpg", "https://p/5.jpg"]);
    }

    #[test]
    fn every_kind_has_a_renderer() {
        let doc = ContentDocument::empty("empty.md");
        let input = SectionInput {
            document: &doc,
            photos: &[],
            gallery_columns: 3,
        };
        for kind in [
            SectionKind::About,
            SectionKind::Projects,
            SectionKind::Articles,
            SectionKind::Tags,
            SectionKind::Rolodex,
            SectionKind::Footer,
            SectionKind::Gallery,
        ] {
            assert!(render_section(kind, &input).is_ok(), "{kind:?}");
        }
        // Hero is the one kind that insists on content
        assert!(render_section(SectionKind::Hero, &input).is_err());
    }
}
