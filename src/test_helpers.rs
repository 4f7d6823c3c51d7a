//! Shared test utilities for the simple-folio test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let out = tmp.path().join("dist");
//! pipeline::build(&options, &FailingFeed).unwrap();
//! assert!(read(&out.join("index.html")).contains("<h1>"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::feed::{FeedError, Photo, PhotoFeed};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Read a file to a string. Panics with the path on failure.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Assert the build left no hidden staging directories next to its output.
pub fn assert_no_staging_left(dir: &Path) {
    let leftovers: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with(".simple-folio-"))
        .collect();
    assert!(leftovers.is_empty(), "staging dirs left behind: {leftovers:?}");
}

// =========================================================================
// Feed stubs
// =========================================================================

/// A feed that always fails, like an unreachable host.
pub struct FailingFeed;

impl PhotoFeed for FailingFeed {
    fn fetch(&self) -> Result<Vec<Photo>, FeedError> {
        Err(FeedError::Unavailable("connection refused".into()))
    }
}
