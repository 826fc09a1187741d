// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations on profiles
//!
//! Every solid boolean in this crate reduces to a polygon boolean on the
//! cross-section of a prism slab. The polygon work is delegated to i_overlay.
//! Results keep every shape the overlay produces: a cutout that splits a
//! panel in two yields two profiles.

use crate::profile::Profile2D;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Minimum area threshold - polygons smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Largest distance a vertex moves through one polygon boolean at panel scale.
///
/// i_overlay snaps its output to an integer grid sized from the operands'
/// bounds, so cut corners land within this distance of their exact position.
pub const OVERLAY_TOLERANCE: f64 = 1e-6;

/// Perform 2D boolean difference: profile minus the union of `clips`
///
/// Returns one profile per disjoint piece of the result. An empty vector
/// means the clips swallowed the whole profile.
pub fn subtract(profile: &Profile2D, clips: &[Profile2D]) -> Vec<Profile2D> {
    let clip = profiles_to_paths(clips);
    if clip.is_empty() {
        return vec![profile.clone()];
    }

    let subject = profile_to_paths(profile);
    let result = subject.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd);
    shapes_to_profiles(&result)
}

/// Perform 2D boolean intersection: the part of `profile` covered by `clips`
pub fn intersect(profile: &Profile2D, clips: &[Profile2D]) -> Vec<Profile2D> {
    let clip = profiles_to_paths(clips);
    if clip.is_empty() {
        return Vec::new();
    }

    let subject = profile_to_paths(profile);
    let result = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);
    shapes_to_profiles(&result)
}

/// Union a soup of contours into clean profiles
///
/// Contours are re-oriented counter-clockwise and combined with the non-zero
/// rule, so overlapping faces of a projected solid merge into one silhouette.
pub fn union_contours(contours: &[Vec<Point2<f64>>]) -> Vec<Profile2D> {
    let subject: Vec<Vec<[f64; 2]>> = contours
        .iter()
        .filter(|c| is_valid_contour(c))
        .map(|c| contour_to_path(&ensure_ccw(c)))
        .collect();

    if subject.is_empty() {
        return Vec::new();
    }

    let clip: Vec<Vec<[f64; 2]>> = Vec::new();
    let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    shapes_to_profiles(&result)
}

/// Union whole profiles, keeping their holes
pub fn union_profiles(profiles: &[Profile2D]) -> Vec<Profile2D> {
    let subject = profiles_to_paths(profiles);
    if subject.is_empty() {
        return Vec::new();
    }

    let clip: Vec<Vec<[f64; 2]>> = Vec::new();
    let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    shapes_to_profiles(&result)
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let area = compute_signed_area(contour).abs();
    area > MIN_AREA_THRESHOLD
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Compute bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let (first, rest) = contour.split_first()?;

    let mut min = *first;
    let mut max = *first;

    for p in rest {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert Profile2D to i_overlay path format
fn profile_to_paths(profile: &Profile2D) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + profile.holes.len());

    if is_valid_contour(&profile.outer) {
        paths.push(contour_to_path(&ensure_ccw(&profile.outer)));
    }

    for hole in profile.holes.iter().filter(|h| is_valid_contour(h)) {
        paths.push(contour_to_path(&ensure_cw(hole)));
    }

    paths
}

fn profiles_to_paths(profiles: &[Profile2D]) -> Vec<Vec<[f64; 2]>> {
    profiles.iter().flat_map(profile_to_paths).collect()
}

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Convert i_overlay result shapes back to profiles
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_profiles(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Profile2D> {
    let mut profiles = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let Some((outer, holes)) = shape.split_first() else {
            continue;
        };
        let outer = path_to_contour(outer);
        if !is_valid_contour(&outer) {
            continue;
        }

        let holes = holes
            .iter()
            .map(|h| path_to_contour(h))
            .filter(|h| is_valid_contour(h))
            .map(|h| ensure_cw(&h))
            .collect();

        profiles.push(Profile2D {
            outer: ensure_ccw(&outer),
            holes,
        });
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::create_rectangle;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Profile2D {
        Profile2D::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    #[test]
    fn test_compute_signed_area_ccw() {
        let contour = square(0.0, 0.0, 1.0, 1.0).outer;
        assert!((compute_signed_area(&contour) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_signed_area_cw() {
        let mut contour = square(0.0, 0.0, 1.0, 1.0).outer;
        contour.reverse();
        assert!((compute_signed_area(&contour) + 1.0).abs() < 1e-12);
        assert!(compute_signed_area(&ensure_ccw(&contour)) > 0.0);
    }

    #[test]
    fn test_subtract_interior_hole() {
        let result = subtract(&square(0.0, 0.0, 10.0, 10.0), &[square(4.0, 4.0, 6.0, 6.0)]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert_eq!(result[0].outer.len(), 4);
        assert!((result[0].area() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtract_splits_profile() {
        // A bar through the middle cuts the square in two
        let result = subtract(&square(0.0, 0.0, 10.0, 10.0), &[square(4.0, -1.0, 6.0, 11.0)]);

        assert_eq!(result.len(), 2);
        let total: f64 = result.iter().map(|p| p.area()).sum();
        assert!((total - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtract_everything() {
        let result = subtract(&square(0.0, 0.0, 1.0, 1.0), &[square(-1.0, -1.0, 2.0, 2.0)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_subtract_no_clips_is_identity() {
        let profile = create_rectangle(4.0, 2.0);
        assert_eq!(subtract(&profile, &[]), vec![profile]);
    }

    #[test]
    fn test_intersect_overlap() {
        let result = intersect(&square(0.0, 0.0, 2.0, 2.0), &[square(1.0, 1.0, 3.0, 3.0)]);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_union_contours_merges_overlap() {
        let a = square(0.0, 0.0, 2.0, 2.0).outer;
        let mut b = square(1.0, 1.0, 3.0, 3.0).outer;
        // Winding of the input does not matter
        b.reverse();

        let result = union_contours(&[a, b]);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_union_profiles_keeps_holes() {
        let mut ring = square(0.0, 0.0, 10.0, 10.0);
        ring.add_hole(square(4.0, 4.0, 6.0, 6.0).outer);

        let result = union_profiles(&[ring]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
    }

    #[test]
    fn test_is_valid_contour() {
        assert!(is_valid_contour(&square(0.0, 0.0, 1.0, 1.0).outer));

        let degenerate = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(!is_valid_contour(&degenerate));

        let too_few = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(!is_valid_contour(&too_few));
    }

    #[test]
    fn test_contour_bounds() {
        assert!(contour_bounds(&[]).is_none());
        let (min, max) = contour_bounds(&square(-1.0, 2.0, 3.0, 5.0).outer).unwrap();
        assert_eq!(min, Point2::new(-1.0, 2.0));
        assert_eq!(max, Point2::new(3.0, 5.0));
    }
}
