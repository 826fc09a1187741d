// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line drawings produced by projecting a solid
//!
//! A drawing is a list of polylines. Projection emits closed polylines whose
//! last point repeats the first. The path-string form mirrors the SVG `d`
//! attribute subset `M x,y L x,y ...`.

use crate::error::{Error, Result};
use crate::profile::Profile2D;
use nalgebra::Point2;
use std::fmt::Write;

/// A set of 2D polylines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineDrawing {
    paths: Vec<Vec<Point2<f64>>>,
}

impl LineDrawing {
    /// Wrap polylines
    pub fn new(paths: Vec<Vec<Point2<f64>>>) -> Self {
        Self { paths }
    }

    /// One closed polyline per profile boundary, outer boundaries first within each profile
    pub fn from_profiles(profiles: &[Profile2D]) -> Self {
        let paths = profiles
            .iter()
            .flat_map(|p| p.contours())
            .filter(|c| c.len() >= 2)
            .map(|c| {
                let mut closed = c.clone();
                closed.push(c[0]);
                closed
            })
            .collect();
        Self { paths }
    }

    /// Polylines of the drawing
    pub fn paths(&self) -> &[Vec<Point2<f64>>] {
        &self.paths
    }

    /// Check if the drawing has no polylines
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Render every polyline as an `M x,y L x,y ...` path string
    pub fn to_path_strings(&self) -> Vec<String> {
        self.paths
            .iter()
            .filter(|p| !p.is_empty())
            .map(|path| {
                let mut d = String::new();
                for (i, p) in path.iter().enumerate() {
                    let command = if i == 0 { 'M' } else { 'L' };
                    if i > 0 {
                        d.push(' ');
                    }
                    // Writing to a String cannot fail
                    let _ = write!(d, "{}{},{}", command, p.x, p.y);
                }
                d
            })
            .collect()
    }

    /// Parse path strings in the `M x,y L x,y ...` form
    pub fn from_path_strings<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        paths
            .iter()
            .map(|s| parse_path(s.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }
}

fn parse_path(path: &str) -> Result<Vec<Point2<f64>>> {
    let malformed = |reason: String| Error::MalformedPath {
        path: path.to_string(),
        reason,
    };

    let body = path
        .trim()
        .strip_prefix('M')
        .ok_or_else(|| malformed("path must start with 'M'".to_string()))?;

    body.split('L')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (x, y) = token
                .split_once(',')
                .ok_or_else(|| malformed(format!("point {:?} is not 'x,y'", token)))?;
            let parse = |v: &str| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| malformed(format!("bad coordinate {:?}: {}", v, e)))
            };
            Ok(Point2::new(parse(x)?, parse(y)?))
        })
        .collect()
}
