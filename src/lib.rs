//! # Simple Folio
//!
//! A minimal static site generator for a personal portfolio. A handful of
//! small markdown files describe the person (hero, about, projects, writing,
//! what they've been up to lately); each one feeds a named placeholder in a
//! hand-written HTML shell template.
//!
//! # Architecture: One Pass, Leaves First
//!
//! ```text
//! content/*.md ─→ content ─→ render ─┐
//! photo feed ────→ feed ─────────────┤
//! style.css, script.js ─→ assets ────┼─→ compose ─→ pipeline ─→ dist/
//! site.toml ─→ config ─→ season ─────┘                 │
//!                          └──────→ derived ───────────┘
//! ```
//!
//! Every build is a full regeneration. There is no cache and no manifest:
//! the site is small enough that parsing everything takes milliseconds, and a
//! full rebuild is the easiest thing to reason about.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Parser for the content dialect: headings, `**accent**`, `[links](url)`, `- key: value` lists, `## Title` field groups |
//! | [`render`] | Section kind → HTML fragment, one renderer per kind, using Maud |
//! | [`compose`] | Single-pass `{{name}}` substitution into a shell template |
//! | [`assets`] | Stylesheet/script inlining (or linking), missing-file errors |
//! | [`pipeline`] | Build orchestration, staging directory, atomic swap |
//! | [`config`] | `site.toml` loading over stock defaults, validation |
//! | [`season`] | Month → seasonal accent pair, CSS variables, season table JSON |
//! | [`feed`] | Photo feed trait, HTTP client, degradation to an empty gallery |
//! | [`derived`] | Favicon and OG image generated from the accent colors |
//! | [`output`] | CLI build summary |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## File Order Is Page Order
//!
//! Cards, tags and paragraphs appear on the page in the order they appear in
//! the file. Nothing is sorted by date or title. The one exception is the
//! rolodex, which the page script shuffles on every load.
//!
//! ## Missing Is Loud, Empty Is Quiet
//!
//! A project card without a `desc`, a template referencing a placeholder no
//! section provides, a missing stylesheet: all fail the build with the file
//! and line. An intentionally empty value in a tag list (`- watched:`) is the
//! only thing silently dropped.
//!
//! ## Maud for Fragments, Strings for Shells
//!
//! Section fragments are built with [Maud](https://maud.lambda.xyz/), so all
//! interpolated text is escaped. The shell templates stay plain HTML files the
//! site owner edits directly; the compositor only substitutes placeholders.
//!
//! ## Reproducible Builds
//!
//! The month that selects the seasonal accent is a build input, not a clock
//! read buried in the pipeline. Same inputs, same month: byte-identical output.

pub mod assets;
pub mod compose;
pub mod config;
pub mod content;
pub mod derived;
pub mod feed;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod season;

#[cfg(test)]
pub(crate) mod test_helpers;
