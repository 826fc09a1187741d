// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Profile definitions and triangulation

use crate::bool2d::compute_signed_area;
use crate::error::{Error, Result};
use nalgebra::Point2;

/// 2D Profile with optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Outer boundary (counter-clockwise)
    pub outer: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Create a profile from an arbitrary point sequence, rejecting degenerate input
    pub fn polygon(points: &[Point2<f64>]) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "Polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        if compute_signed_area(points).abs() <= f64::EPSILON {
            return Err(Error::InvalidProfile(
                "Polygon has zero area".to_string(),
            ));
        }
        Ok(Self::new(points.to_vec()))
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// Net area (outer minus holes)
    pub fn area(&self) -> f64 {
        let outer = compute_signed_area(&self.outer).abs();
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| compute_signed_area(h).abs())
            .sum();
        outer - holes
    }

    /// Axis-aligned bounds of the outer boundary
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        crate::bool2d::contour_bounds(&self.outer)
    }

    /// Map every vertex (outer and holes) through `f`
    pub fn map_points(&self, f: impl Fn(&Point2<f64>) -> Point2<f64>) -> Profile2D {
        Profile2D {
            outer: self.outer.iter().map(&f).collect(),
            holes: self
                .holes
                .iter()
                .map(|h| h.iter().map(&f).collect())
                .collect(),
        }
    }

    /// All boundaries, outer first
    pub fn contours(&self) -> impl Iterator<Item = &Vec<Point2<f64>>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into the flattened vertex array
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let mut vertices = Vec::with_capacity(
            (self.outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>()) * 2,
        );

        for p in &self.outer {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            hole_indices.push(vertices.len() / 2);
            for p in hole {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        let indices = earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        let points = vertices
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect();

        Ok(Triangulation { points, indices })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Create a rectangular profile centered on the origin
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    Profile2D::new(vec![
        Point2::new(-half_w, -half_h),
        Point2::new(half_w, -half_h),
        Point2::new(half_w, half_h),
        Point2::new(-half_w, half_h),
    ])
}

/// Create a segmental arch: a chord of `width` at y = 0 with a circular
/// arc rising `height` above it
pub fn create_arch(width: f64, height: f64) -> Result<Profile2D> {
    if width <= 0.0 || height <= 0.0 {
        return Err(Error::InvalidProfile(format!(
            "Arch needs positive width and height, got {} x {}",
            width, height
        )));
    }
    let half = 0.5 * width;
    // Circle through (-half, 0), (half, 0) and (0, height)
    let radius = (half * half + height * height) / (2.0 * height);
    let center_y = height - radius;
    let start = (-center_y).atan2(half);
    let end = std::f64::consts::PI - start;

    let outer = arc_points(radius, start, end)
        .into_iter()
        .map(|p| Point2::new(p.x, p.y + center_y))
        .collect();
    Ok(Profile2D::new(outer))
}

/// Points on an arc of `radius` around the origin, from `start` to `end` radians,
/// both ends included
fn arc_points(radius: f64, start: f64, end: f64) -> Vec<Point2<f64>> {
    let sweep = end - start;
    let segments = ((calculate_circle_segments(radius) as f64)
        * (sweep / (2.0 * std::f64::consts::PI)))
        .ceil()
        .max(2.0) as usize;

    (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f64) / (segments as f64);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Calculate adaptive number of segments for a circle
#[inline]
pub fn calculate_circle_segments(radius: f64) -> usize {
    let segments = (radius.sqrt() * 8.0).ceil() as usize;
    segments.clamp(8, 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_profile() {
        let profile = create_rectangle(10.0, 5.0);
        assert_eq!(profile.outer.len(), 4);
        assert_eq!(profile.holes.len(), 0);

        assert_eq!(profile.outer[0], Point2::new(-5.0, -2.5));
        assert_eq!(profile.outer[1], Point2::new(5.0, -2.5));
        assert_eq!(profile.outer[2], Point2::new(5.0, 2.5));
        assert_eq!(profile.outer[3], Point2::new(-5.0, 2.5));
        assert!((profile.area() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_rejects_degenerate() {
        assert!(Profile2D::polygon(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).is_err());
        assert!(Profile2D::polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ])
        .is_err());
        assert!(Profile2D::polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .is_ok());
    }

    #[test]
    fn test_arch_spans_chord() {
        let arch = create_arch(10.0, 3.0).unwrap();
        let (min, max) = arch.bounds().unwrap();
        assert!((min.x + 5.0).abs() < 1e-9);
        assert!((max.x - 5.0).abs() < 1e-9);
        assert!(min.y.abs() < 1e-9);
        assert!(max.y <= 3.0 + 1e-9);
        assert!(max.y > 2.8);
    }

    #[test]
    fn test_triangulate_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let tri = profile.triangulate().unwrap();

        assert_eq!(tri.points.len(), 4);
        assert_eq!(tri.indices.len(), 6);
    }

    #[test]
    fn test_triangulate_frame() {
        let mut profile = create_rectangle(10.0, 8.0);
        let mut hole = create_rectangle(6.0, 4.0).outer;
        hole.reverse();
        profile.add_hole(hole);
        let tri = profile.triangulate().unwrap();

        assert_eq!(tri.points.len(), 8);
        assert_eq!(tri.indices.len(), 8 * 3);
        assert!((profile.area() - 56.0).abs() < 1e-12);
        assert!(compute_signed_area(&profile.holes[0]) < 0.0);
    }

    #[test]
    fn test_circle_segments() {
        assert_eq!(calculate_circle_segments(1.0), 8);
        assert_eq!(calculate_circle_segments(4.0), 16);
        assert!(calculate_circle_segments(100.0) <= 32);
        assert!(calculate_circle_segments(0.1) >= 8);
    }
}
