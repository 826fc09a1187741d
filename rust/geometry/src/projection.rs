// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprints: the region a prism covers when viewed along a frame's Z axis
//!
//! When the prism's extrusion axis is parallel to the viewing axis its profile
//! maps into the view plane exactly, holes included. Otherwise the footprint
//! is the union of the projected outer faces (both caps and every side quad).

use crate::bool2d::union_contours;
use crate::profile::Profile2D;
use crate::solid::Prism;
use nalgebra::{Isometry3, Point2, Point3, Vector3};

/// Tolerance on |axis · z| for treating two extrusion axes as parallel
pub const AXIS_EPSILON: f64 = 1e-9;

/// Projected region of one prism in a viewing frame
#[derive(Debug, Clone)]
pub struct Footprint {
    /// Covered region in the frame's XY plane
    pub profiles: Vec<Profile2D>,
    /// Lowest frame Z reached by the prism
    pub z_min: f64,
    /// Highest frame Z reached by the prism
    pub z_max: f64,
    /// Whether the profile was mapped exactly (parallel axes)
    pub exact: bool,
}

/// Compute the footprint of `prism` seen along the Z axis of `frame`
pub fn footprint(prism: &Prism, frame: &Isometry3<f64>) -> Footprint {
    let relative = frame.inverse() * prism.placement;
    let axis = relative.rotation * Vector3::z();

    let to_frame = |p: &Point2<f64>, z: f64| relative.transform_point(&Point3::new(p.x, p.y, z));

    // z-range over every vertex on both caps
    let (z_min, z_max) = prism
        .profile
        .outer
        .iter()
        .flat_map(|p| [to_frame(p, prism.z_min).z, to_frame(p, prism.z_max).z])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| {
            (lo.min(z), hi.max(z))
        });

    if axis.z.abs() > 1.0 - AXIS_EPSILON {
        let profile = prism.profile.map_points(|p| {
            let q = to_frame(p, prism.z_min);
            Point2::new(q.x, q.y)
        });
        return Footprint {
            profiles: vec![profile],
            z_min,
            z_max,
            exact: true,
        };
    }

    let outer = &prism.profile.outer;
    let flat = |p: &Point2<f64>, z: f64| {
        let q = to_frame(p, z);
        Point2::new(q.x, q.y)
    };

    let mut faces: Vec<Vec<Point2<f64>>> = Vec::with_capacity(outer.len() + 2);
    faces.push(outer.iter().map(|p| flat(p, prism.z_min)).collect());
    faces.push(outer.iter().map(|p| flat(p, prism.z_max)).collect());
    for i in 0..outer.len() {
        let j = (i + 1) % outer.len();
        faces.push(vec![
            flat(&outer[i], prism.z_min),
            flat(&outer[j], prism.z_min),
            flat(&outer[j], prism.z_max),
            flat(&outer[i], prism.z_max),
        ]);
    }

    Footprint {
        profiles: union_contours(&faces),
        z_min,
        z_max,
        exact: false,
    }
}
