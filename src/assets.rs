//! Stylesheet and script handling.
//!
//! In `inline` mode both files are embedded verbatim into every page through
//! the `{{style}}` and `{{script}}` placeholders: no minification, no
//! rewriting. In `external` mode the placeholders become references and the
//! files are copied to the output root unchanged.
//!
//! Either way, a missing source file fails the build. Templates are read
//! through the same path so a missing template reports the same error.

use crate::compose::PlaceholderMap;
use crate::config::{AssetMode, AssetsConfig};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("missing asset: {}", .0.display())]
    Missing(PathBuf),
    #[error("IO error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a referenced source file, distinguishing "absent" from other failures.
pub fn read_asset(path: &Path) -> Result<String, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A file to copy into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopy {
    pub source: PathBuf,
    /// Destination relative to the output root.
    pub target: String,
}

/// The `{{style}}`/`{{script}}` values plus any files to copy.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub style: String,
    pub script: String,
    pub copies: Vec<AssetCopy>,
}

impl AssetBundle {
    pub fn apply(&self, map: &mut PlaceholderMap) {
        map.insert_builtin("style", self.style.clone());
        map.insert_builtin("script", self.script.clone());
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Read both sources and build the placeholder values for `config.mode`.
pub fn prepare(site_root: &Path, config: &AssetsConfig) -> Result<AssetBundle, AssetError> {
    let style_path = site_root.join(&config.stylesheet);
    let script_path = site_root.join(&config.script);
    let css = read_asset(&style_path)?;
    let js = read_asset(&script_path)?;

    Ok(match config.mode {
        AssetMode::Inline => AssetBundle {
            style: format!("<style>\n{css}</style>"),
            script: format!("<script>\n{js}</script>"),
            copies: Vec::new(),
        },
        AssetMode::External => {
            let style_name = file_name(&style_path);
            let script_name = file_name(&script_path);
            AssetBundle {
                style: format!(r#"<link rel="stylesheet" href="/{style_name}">"#),
                script: format!(r#"<script src="/{script_name}"></script>"#),
                copies: vec![
                    AssetCopy {
                        source: style_path,
                        target: style_name,
                    },
                    AssetCopy {
                        source: script_path,
                        target: script_name,
                    },
                ],
            }
        }
    })
}
