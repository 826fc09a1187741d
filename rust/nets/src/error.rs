// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] papercraft_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] papercraft_geometry::Error),

    #[error("Silhouette vertex ({x}, {y}) has {degree} edges, expected 2")]
    NonManifoldSilhouette { x: f64, y: f64, degree: usize },

    #[error("Panel '{0}' has an empty silhouette")]
    EmptySilhouette(String),

    #[error("{} panel(s) of media '{media}' do not fit on {max_bins} sheet(s): {}", unplaced.len(), unplaced.join(", "))]
    SheetCapacityExceeded {
        media: String,
        max_bins: usize,
        unplaced: Vec<String>,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
