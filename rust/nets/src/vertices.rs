// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex loops from a top-down silhouette
//!
//! The projected drawing is broken into two-point edges. Endpoints are
//! snapped to a `VERTEX_EPSILON` grid, so fragments that meet within that
//! tolerance share a vertex, and the edge graph is walked into closed loops.
//! Loops come out in the order their first vertex was seen.

use crate::error::{Error, Result};
use nalgebra::Point2;
use papercraft_geometry::{LineDrawing, Solid};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Grid used to merge nearly coincident endpoints (8 decimal places)
pub const VERTEX_EPSILON: f64 = 1e-8;
const VERTEX_SCALE: f64 = 1e8;

/// A closed loop of vertices, without the repeated first vertex
pub type VertexLoop = Vec<Point2<f64>>;

type VertexKey = (i64, i64);

fn vertex_key(p: &Point2<f64>) -> VertexKey {
    // `as` saturates; -0.0 rounds to the same key as 0.0
    (
        (p.x * VERTEX_SCALE).round() as i64,
        (p.y * VERTEX_SCALE).round() as i64,
    )
}

fn key_point(key: VertexKey) -> Point2<f64> {
    Point2::new(key.0 as f64 / VERTEX_SCALE, key.1 as f64 / VERTEX_SCALE)
}

/// Two-point edges of every polyline, in drawing order
pub fn path_edges(drawing: &LineDrawing) -> Vec<(Point2<f64>, Point2<f64>)> {
    drawing
        .paths()
        .iter()
        .flat_map(|path| path.windows(2).map(|w| (w[0], w[1])))
        .collect()
}

/// Closed vertex loops of a line drawing
///
/// Duplicate and zero-length edges are dropped. Every remaining vertex must
/// join exactly two edges.
pub fn extract_loops(drawing: &LineDrawing) -> Result<Vec<VertexLoop>> {
    let mut index: FxHashMap<VertexKey, usize> = FxHashMap::default();
    let mut vertices: Vec<VertexKey> = Vec::new();
    let mut seen_edges: FxHashSet<(usize, usize)> = FxHashSet::default();
    let mut adjacency: Vec<SmallVec<[usize; 2]>> = Vec::new();

    for (a, b) in path_edges(drawing) {
        let mut ids = [0usize; 2];
        for (slot, p) in ids.iter_mut().zip([a, b]) {
            let key = vertex_key(&p);
            *slot = *index.entry(key).or_insert_with(|| {
                vertices.push(key);
                adjacency.push(SmallVec::new());
                vertices.len() - 1
            });
        }

        let [i, j] = ids;
        if i == j || !seen_edges.insert((i.min(j), i.max(j))) {
            continue;
        }
        adjacency[i].push(j);
        adjacency[j].push(i);
    }

    if let Some((v, neighbours)) = adjacency.iter().enumerate().find(|(_, n)| n.len() != 2) {
        let p = key_point(vertices[v]);
        return Err(Error::NonManifoldSilhouette {
            x: p.x,
            y: p.y,
            degree: neighbours.len(),
        });
    }

    let mut visited = vec![false; vertices.len()];
    let mut loops = Vec::new();
    for start in 0..vertices.len() {
        if visited[start] {
            continue;
        }

        let mut ring = Vec::new();
        let mut prev = usize::MAX;
        let mut current = start;
        loop {
            visited[current] = true;
            ring.push(key_point(vertices[current]));
            let next = if adjacency[current][0] != prev {
                adjacency[current][0]
            } else {
                adjacency[current][1]
            };
            prev = current;
            current = next;
            if current == start {
                break;
            }
        }
        loops.push(ring);
    }

    Ok(loops)
}

/// Loops of SVG-style path strings (`M x,y L x,y ...`)
pub fn loops_from_path_strings<S: AsRef<str>>(paths: &[S]) -> Result<Vec<VertexLoop>> {
    extract_loops(&LineDrawing::from_path_strings(paths)?)
}

/// Loops of a solid's top-down silhouette
pub fn panel_vertex_loops(shape: &Solid) -> Result<Vec<VertexLoop>> {
    extract_loops(&shape.project_top())
}

/// Axis-aligned size of a set of loops and the position of its centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingMetrics {
    pub width: f64,
    pub height: f64,
    /// Centre of the bounding box relative to the local origin
    pub center_offset_x: f64,
    pub center_offset_y: f64,
}

impl BoundingMetrics {
    /// Metrics of every vertex in `loops`; `None` when there are none
    pub fn from_loops(loops: &[VertexLoop]) -> Option<Self> {
        let mut points = loops.iter().flatten();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });

        Some(Self {
            width: max.x - min.x,
            height: max.y - min.y,
            center_offset_x: 0.5 * (min.x + max.x),
            center_offset_y: 0.5 * (min.y + max.y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_from_multi_point_paths() {
        let drawing = LineDrawing::from_path_strings(&[
            "M34.5,42.5 L34.5,-42.5 ",
            "M4.5,29.0 L4.49,29.18 L4.48,29.37",
        ])
        .unwrap();

        let edges = path_edges(&drawing);
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[1], (Point2::new(4.5, 29.0), Point2::new(4.49, 29.18)));
        assert_eq!(edges[2].0, edges[1].1);
    }

    #[test]
    fn test_fragments_join_within_epsilon() {
        // Four separate edges of a triangle-ish outline with float noise
        let loops = loops_from_path_strings(&[
            "M34.5,42.5 L34.5,-42.5",
            "M0.0,64.5 L34.5,42.49999999999999",
            "M34.5,-42.5 L-34.5,-42.5",
            "M-34.5,42.5 L0.0,64.5",
            "M-34.5,-42.5 L-34.5,42.5",
        ])
        .unwrap();

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 5);
        assert_eq!(loops[0][0], Point2::new(34.5, 42.5));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let loops = loops_from_path_strings(&["M-0.0,0 L1,0 L1,1 L0,0.0"]).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert!(loops[0][0].x.is_sign_positive());
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let loops = loops_from_path_strings(&[
            "M0,0 L4,0 L4,3 L0,3 L0,0",
            "M4,3 L4,0",
        ])
        .unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn test_open_path_is_rejected() {
        let result = loops_from_path_strings(&["M0,0 L4,0 L4,3"]);
        assert!(matches!(
            result,
            Err(Error::NonManifoldSilhouette { degree: 1, .. })
        ));
    }

    #[test]
    fn test_rectangle_with_hole() {
        let loops = loops_from_path_strings(&[
            "M-5,-3 L5,-3 L5,3 L-5,3 L-5,-3",
            "M-1,-1 L-1,1 L1,1 L1,-1 L-1,-1",
        ])
        .unwrap();
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|l| l.len() == 4));

        let metrics = BoundingMetrics::from_loops(&loops).unwrap();
        assert_relative_eq!(metrics.width, 10.0);
        assert_relative_eq!(metrics.height, 6.0);
        assert_relative_eq!(metrics.center_offset_x, 0.0);
    }

    #[test]
    fn test_metrics_of_offset_shape() {
        let loops = vec![vec![
            Point2::new(2.0, 1.0),
            Point2::new(8.0, 1.0),
            Point2::new(8.0, 5.0),
        ]];
        let metrics = BoundingMetrics::from_loops(&loops).unwrap();
        assert_relative_eq!(metrics.width, 6.0);
        assert_relative_eq!(metrics.height, 4.0);
        assert_relative_eq!(metrics.center_offset_x, 5.0);
        assert_relative_eq!(metrics.center_offset_y, 3.0);

        assert!(BoundingMetrics::from_loops(&[]).is_none());
    }
}
