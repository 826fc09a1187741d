// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration loaded from environment variables.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Gap kept around every panel when packing, on each side
pub const DEFAULT_PACK_MARGIN: f64 = 3.0;
/// Sheets available per media
pub const DEFAULT_MAX_BINS: usize = 20;

/// Export configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Root directory for all exported models.
    pub output_dir: PathBuf,
    /// SVG page template with `{{polygons}}` and `{{labels}}` placeholders.
    pub template_path: PathBuf,
    /// Margin added around each panel before packing.
    pub pack_margin: f64,
    /// Maximum number of sheets per media.
    pub max_bins: usize,
    /// Draw the packer's rectangles on each page.
    pub include_layout_boxes: bool,
}

impl ExportConfig {
    /// Configuration with default settings writing under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            template_path: PathBuf::from("page.svg.template"),
            pack_margin: DEFAULT_PACK_MARGIN,
            max_bins: DEFAULT_MAX_BINS,
            include_layout_boxes: false,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::new("./output");
        Self {
            output_dir: std::env::var("PAPERCRAFT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            template_path: std::env::var("PAPERCRAFT_TEMPLATE")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            pack_margin: std::env::var("PAPERCRAFT_PACK_MARGIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m: &f64| *m >= 0.0)
                .unwrap_or(defaults.pack_margin),
            max_bins: std::env::var("PAPERCRAFT_MAX_BINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_bins),
            include_layout_boxes: std::env::var("PAPERCRAFT_LAYOUT_BOXES")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.include_layout_boxes),
        }
    }

    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    pub fn with_layout_boxes(mut self, include: bool) -> Self {
        self.include_layout_boxes = include;
        self
    }

    /// Output directory of one model
    pub fn output_dir_for_model(&self, model_name: &str) -> PathBuf {
        self.output_dir.join(model_name)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Remove an output directory and everything in it; a missing directory is fine
pub fn delete_output_dir(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "deleted output directory");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
