// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Geometry error: {0}")]
    Geometry(#[from] papercraft_geometry::Error),

    #[error("Cutout {cutout} of group '{child}' targets missing panel '{target}' in group '{parent}'")]
    MissingCutoutTarget {
        parent: String,
        child: String,
        cutout: usize,
        target: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
