// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Isometry3, Point2, Point3, Vector3};

/// Extrude a 2D profile along the local Z axis between `z_min` and `z_max`,
/// then move the result by `placement`
pub fn extrude_profile(
    profile: &Profile2D,
    z_min: f64,
    z_max: f64,
    placement: &Isometry3<f64>,
) -> Result<Mesh> {
    if z_max <= z_min {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got [{}, {}]",
            z_min, z_max
        )));
    }

    let triangulation = profile.triangulate()?;

    let side_vertex_count = profile.contours().map(|c| c.len() * 4).sum::<usize>();
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count,
        triangulation.indices.len() * 2 + side_vertex_count / 4 * 6,
    );

    create_cap_mesh(&triangulation, z_min, false, &mut mesh);
    create_cap_mesh(&triangulation, z_max, true, &mut mesh);

    // Outer boundary is counter-clockwise and holes clockwise, so the
    // left-hand edge normal points out of the material for both
    for contour in profile.contours() {
        create_side_walls(contour, z_min, z_max, &mut mesh);
    }

    apply_placement(&mut mesh, placement);

    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
fn create_cap_mesh(triangulation: &Triangulation, z: f64, top: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if top { Vector3::z() } else { -Vector3::z() };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        // earcutr winding follows the input contour; orient each cap outward
        let a = &triangulation.points[tri[0]];
        let b = &triangulation.points[tri[1]];
        let c = &triangulation.points[tri[2]];
        let ccw = (b - a).perp(&(c - a)) > 0.0;

        if ccw == top {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

/// Create side walls for a profile boundary
fn create_side_walls(boundary: &[Point2<f64>], z_min: f64, z_max: f64, mesh: &mut Mesh) {
    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        // Use try_normalize to skip degenerate edges (duplicate consecutive points)
        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue,
        };

        let idx = mesh.add_vertex(Point3::new(p0.x, p0.y, z_min), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, z_min), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, z_max), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, z_max), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

/// Move mesh positions and normals by a rigid placement
pub fn apply_placement(mesh: &mut Mesh, placement: &Isometry3<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = placement.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Rigid motions keep normals unit length; only the rotation applies
    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = placement.rotation * normal;
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}
