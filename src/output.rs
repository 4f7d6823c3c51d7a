//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Pages are listed by name and position, with the output path and size as
//! secondary detail. Problems that did not fail the build (unreferenced
//! sections, derived images that fell back) are shown indented under the
//! entity they belong to, so they are hard to miss in a CI log.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Season: spring (month 4) · accent #2f855a / #68d391
//! Photos: 12
//!
//! Pages
//! 001 home → index.html (5 sections, 18204 bytes, sha256 1f0c2a9be413)
//!     Unused: lately
//! 002 work → work/index.html (4 sections, 16011 bytes, sha256 93ab01c7de55)
//!
//! Static
//!     assets/: 3 files
//!     CNAME
//!
//! Derived
//!     favicon.png: generated
//!     og-image.png: kept previous
//!
//! Built 2 pages → dist
//! ```
//!
//! ## Check
//!
//! The same header and page list, followed by `Content is valid (N pages)`.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::{BuildReport, DerivedStatus};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn derived_status_label(status: DerivedStatus) -> &'static str {
    match status {
        DerivedStatus::Generated => "generated",
        DerivedStatus::Kept => "kept previous",
        DerivedStatus::Skipped => "skipped",
    }
}

/// Season header and page list, shared by build and check.
fn format_summary(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Season: {} (month {}) · accent {} / {}",
            report.season, report.month, report.accent.light, report.accent.dark
        ),
        format!("Photos: {}", report.photos),
        String::new(),
        "Pages".to_string(),
    ];

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {} ({}, {} bytes, sha256 {})",
            format_index(i + 1),
            page.name,
            page.output,
            plural(page.sections, "section", "sections"),
            page.bytes,
            page.digest
        ));
        if !page.unused.is_empty() {
            lines.push(format!("{}Unused: {}", indent(1), page.unused.join(", ")));
        }
    }
    lines
}

pub fn format_build_output(report: &BuildReport, static_dir: &str) -> Vec<String> {
    let mut lines = format_summary(report);

    if report.static_files > 0 || !report.passthrough.is_empty() {
        lines.push(String::new());
        lines.push("Static".to_string());
        if report.static_files > 0 {
            lines.push(format!(
                "{}{}/: {}",
                indent(1),
                static_dir,
                plural(report.static_files, "file", "files")
            ));
        }
        for name in &report.passthrough {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    if !report.derived.is_empty() {
        lines.push(String::new());
        lines.push("Derived".to_string());
        for d in &report.derived {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                d.path,
                derived_status_label(d.status)
            ));
        }
    }

    lines.push(String::new());
    let target = report
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    lines.push(format!(
        "Built {} → {}",
        plural(report.pages.len(), "page", "pages"),
        target
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, static_dir: &str) {
    for line in format_build_output(report, static_dir) {
        println!("{}", line);
    }
}

pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    let mut lines = format_summary(report);
    lines.push(String::new());
    lines.push(format!(
        "Content is valid ({})",
        plural(report.pages.len(), "page", "pages")
    ));
    lines
}

pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DerivedReport, PageReport};
    use crate::season::AccentPair;
    use std::path::PathBuf;

    fn report() -> BuildReport {
        BuildReport {
            output: Some(PathBuf::from("dist")),
            month: 4,
            season: "spring".into(),
            accent: AccentPair {
                light: "#2f855a".into(),
                dark: "#68d391".into(),
            },
            photos: 12,
            pages: vec![
                PageReport {
                    name: "home".into(),
                    output: "index.html".into(),
                    bytes: 18204,
                    digest: "1f0c2a9be413".into(),
                    sections: 5,
                    unused: vec!["lately".into()],
                },
                PageReport {
                    name: "work".into(),
                    output: "work/index.html".into(),
                    bytes: 16011,
                    digest: "93ab01c7de55".into(),
                    sections: 1,
                    unused: vec![],
                },
            ],
            static_files: 3,
            passthrough: vec!["CNAME".into()],
            derived: vec![
                DerivedReport {
                    path: "favicon.png".into(),
                    status: DerivedStatus::Generated,
                },
                DerivedReport {
                    path: "og-image.png".into(),
                    status: DerivedStatus::Kept,
                },
            ],
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    #[test]
    fn build_output_full() {
        let lines = format_build_output(&report(), "assets");
        assert_eq!(
            lines,
            vec![
                "Season: spring (month 4) · accent #2f855a / #68d391",
                "Photos: 12",
                "",
                "Pages",
                "001 home → index.html (5 sections, 18204 bytes, sha256 1f0c2a9be413)",
                "    Unused: lately",
                "002 work → work/index.html (1 section, 16011 bytes, sha256 93ab01c7de55)",
                "",
                "Static",
                "    assets/: 3 files",
                "    CNAME",
                "",
                "Derived",
                "    favicon.png: generated",
                "    og-image.png: kept previous",
                "",
                "Built 2 pages → dist",
            ]
        );
    }

    #[test]
    fn build_output_omits_empty_groups() {
        let mut r = report();
        r.static_files = 0;
        r.passthrough.clear();
        r.derived.clear();
        let lines = format_build_output(&r, "assets");
        assert!(!lines.iter().any(|l| l == "Static" || l == "Derived"));
    }

    #[test]
    fn check_output_ends_with_verdict() {
        let mut r = report();
        r.output = None;
        let lines = format_check_output(&r);
        assert_eq!(lines.last().unwrap(), "Content is valid (2 pages)");
        assert!(!lines.iter().any(|l| l.starts_with("Built")));
    }

    #[test]
    fn skipped_derived_label() {
        assert_eq!(derived_status_label(DerivedStatus::Skipped), "skipped");
    }
}
