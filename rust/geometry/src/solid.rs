// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prismatic solids and their booleans
//!
//! A [`Solid`] is a set of [`Prism`] bodies. Booleans never build a general
//! B-rep: the target body is split into z-slabs at the tool's depth range and
//! only the middle slab's profile is clipped in 2D. Tools whose extrusion axis
//! is parallel to the target's are handled exactly; oblique tools are replaced
//! by their projected silhouette over their full depth range.

use crate::bool2d;
use crate::drawing::LineDrawing;
use crate::error::{Error, Result};
use crate::extrusion::extrude_profile;
use crate::mesh::Mesh;
use crate::profile::{create_rectangle, Profile2D};
use crate::projection::{footprint, Footprint};
use nalgebra::{Isometry3, Point2, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use tracing::debug;

/// Slabs thinner than this are dropped
const SLAB_EPSILON: f64 = 1e-9;

/// A planar profile extruded along its local Z axis and placed by a rigid motion
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    /// Cross-section in the prism's local XY plane
    pub profile: Profile2D,
    /// Local Z of the bottom cap
    pub z_min: f64,
    /// Local Z of the top cap
    pub z_max: f64,
    /// Local-to-world placement
    pub placement: Isometry3<f64>,
}

impl Prism {
    /// Create an unplaced prism
    pub fn new(profile: Profile2D, z_min: f64, z_max: f64) -> Self {
        Self {
            profile,
            z_min,
            z_max,
            placement: Isometry3::identity(),
        }
    }

    /// Same placement and profile, different depth range
    fn slab(&self, profile: Profile2D, z_min: f64, z_max: f64) -> Self {
        Self {
            profile,
            z_min,
            z_max,
            placement: self.placement,
        }
    }

    /// Vertices of both caps in world coordinates
    pub fn world_vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.profile.outer.iter().flat_map(move |p| {
            [self.z_min, self.z_max]
                .map(|z| self.placement.transform_point(&Point3::new(p.x, p.y, z)))
        })
    }

    /// Exact volume of this body
    pub fn volume(&self) -> f64 {
        self.profile.area() * (self.z_max - self.z_min)
    }
}

/// A solid made of prism bodies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    bodies: Vec<Prism>,
}

impl Solid {
    /// The empty solid
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap prism bodies
    pub fn from_bodies(bodies: Vec<Prism>) -> Self {
        Self { bodies }
    }

    /// Axis-aligned box of `width` (x), `height` (y) and `depth` (z), centered on the origin
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Result<Self> {
        if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
            return Err(Error::InvalidExtrusion(format!(
                "Box dimensions must be positive, got {} x {} x {}",
                width, height, depth
            )));
        }
        let half = 0.5 * depth;
        Ok(Self::from_bodies(vec![Prism::new(
            create_rectangle(width, height),
            -half,
            half,
        )]))
    }

    /// Extrude `profile` from z = 0 to z = `depth`
    pub fn extrude(profile: Profile2D, depth: f64) -> Result<Self> {
        if depth <= 0.0 {
            return Err(Error::InvalidExtrusion(format!(
                "Depth must be positive, got {}",
                depth
            )));
        }
        if profile.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }
        Ok(Self::from_bodies(vec![Prism::new(profile, 0.0, depth)]))
    }

    /// Extrude a closed polygon from z = 0 to z = `depth`
    pub fn polygon(points: &[Point2<f64>], depth: f64) -> Result<Self> {
        Self::extrude(Profile2D::polygon(points)?, depth)
    }

    /// Prism bodies of this solid
    pub fn bodies(&self) -> &[Prism] {
        &self.bodies
    }

    /// Check if the solid has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    // ========================================================================
    // Rigid motions
    // ========================================================================

    /// Apply a rigid motion to every body
    pub fn transformed(&self, motion: &Isometry3<f64>) -> Self {
        Self::from_bodies(
            self.bodies
                .iter()
                .map(|b| Prism {
                    placement: motion * b.placement,
                    ..b.clone()
                })
                .collect(),
        )
    }

    /// Translate by `offset`
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        self.transformed(&Isometry3::from_parts(
            Translation3::from(offset),
            UnitQuaternion::identity(),
        ))
    }

    /// Rotate by `degrees` about the axis through `axis_start` and `axis_end`
    pub fn rotated(
        &self,
        axis_start: Point3<f64>,
        axis_end: Point3<f64>,
        degrees: f64,
    ) -> Result<Self> {
        Ok(self.transformed(&axis_rotation(axis_start, axis_end, degrees)?))
    }

    // ========================================================================
    // Booleans
    // ========================================================================

    /// Combine two solids
    pub fn union(&self, other: &Solid) -> Self {
        let mut bodies = self.bodies.clone();
        bodies.extend(other.bodies.iter().cloned());
        Self::from_bodies(bodies)
    }

    /// Remove `tool` from this solid
    pub fn difference(&self, tool: &Solid) -> Self {
        let mut pieces = self.bodies.clone();

        for tool_body in &tool.bodies {
            pieces = pieces
                .iter()
                .flat_map(|target| subtract_body(target, tool_body))
                .collect();
        }

        debug!(
            before = self.bodies.len(),
            after = pieces.len(),
            tools = tool.bodies.len(),
            "solid difference"
        );
        Self::from_bodies(pieces)
    }

    /// Keep the part of this solid inside `other`
    pub fn intersection(&self, other: &Solid) -> Self {
        let mut pieces = Vec::new();

        for target in &self.bodies {
            for tool_body in &other.bodies {
                let fp = footprint(tool_body, &target.placement);
                let Some((lo, hi)) = clamp_range(target, &fp) else {
                    continue;
                };
                pieces.extend(
                    bool2d::intersect(&target.profile, &fp.profiles)
                        .into_iter()
                        .map(|profile| target.slab(profile, lo, hi)),
                );
            }
        }

        Self::from_bodies(pieces)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Top-down (along -Z) line drawing of the solid's outline
    pub fn project_top(&self) -> LineDrawing {
        let frame = Isometry3::identity();
        let footprints: Vec<Profile2D> = self
            .bodies
            .iter()
            .flat_map(|b| footprint(b, &frame).profiles)
            .collect();

        // One exact body needs no clean-up pass
        let outline = if self.bodies.len() == 1 {
            footprints
        } else {
            bool2d::union_profiles(&footprints)
        };

        LineDrawing::from_profiles(&outline)
    }

    /// Triangulate every body into one mesh
    pub fn tessellate(&self) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        for body in &self.bodies {
            mesh.merge(&extrude_profile(
                &body.profile,
                body.z_min,
                body.z_max,
                &body.placement,
            )?);
        }
        Ok(mesh)
    }

    /// World-space axis-aligned bounds
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut points = self.bodies.iter().flat_map(|b| b.world_vertices());
        let first = points.next()?;

        Some(points.fold((first, first), |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// Sum of body volumes
    ///
    /// Bodies produced by booleans never overlap, so this is exact for them;
    /// an explicit `union` of overlapping solids counts shared volume twice.
    pub fn volume(&self) -> f64 {
        self.bodies.iter().map(Prism::volume).sum()
    }
}

/// Rigid rotation of `degrees` about the line through `start` and `end`
///
/// Coincident points do not define an axis and are rejected.
pub fn axis_rotation(start: Point3<f64>, end: Point3<f64>, degrees: f64) -> Result<Isometry3<f64>> {
    let axis = Unit::try_new(end - start, f64::EPSILON).ok_or_else(|| {
        Error::InvalidParameter(format!("rotation axis through {} has no direction", start))
    })?;
    let rotation = UnitQuaternion::from_axis_angle(&axis, degrees.to_radians());
    let to_origin = Translation3::from(-start.coords);
    let back = Translation3::from(start.coords);

    Ok(Isometry3::from_parts(back, UnitQuaternion::identity())
        * Isometry3::from_parts(Translation3::identity(), rotation)
        * Isometry3::from_parts(to_origin, UnitQuaternion::identity()))
}

/// Depth range of a footprint clamped to the target body, if non-empty
fn clamp_range(target: &Prism, fp: &Footprint) -> Option<(f64, f64)> {
    let lo = fp.z_min.max(target.z_min);
    let hi = fp.z_max.min(target.z_max);
    (hi - lo > SLAB_EPSILON).then_some((lo, hi))
}

/// Subtract one tool body from one target body
fn subtract_body(target: &Prism, tool: &Prism) -> Vec<Prism> {
    let fp = footprint(tool, &target.placement);
    let Some((lo, hi)) = clamp_range(target, &fp) else {
        return vec![target.clone()];
    };

    let mut pieces = Vec::with_capacity(3);
    if lo - target.z_min > SLAB_EPSILON {
        pieces.push(target.slab(target.profile.clone(), target.z_min, lo));
    }
    pieces.extend(
        bool2d::subtract(&target.profile, &fp.profiles)
            .into_iter()
            .map(|profile| target.slab(profile, lo, hi)),
    );
    if target.z_max - hi > SLAB_EPSILON {
        pieces.push(target.slab(target.profile.clone(), hi, target.z_max));
    }
    pieces
}
