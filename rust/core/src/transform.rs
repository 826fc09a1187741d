// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local transforms: ordered translate/rotate sequences
//!
//! Operations apply left to right. Reverse application walks the list
//! backwards with negated vectors and angles, so `reverse_apply(apply(s))`
//! returns `s` to its original pose.

use crate::error::{Error, Result};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use papercraft_geometry::{axis_rotation, Solid};

/// A single rigid motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Move by a vector
    Translate(Vector3<f64>),
    /// Rotate by `degrees` about the axis through two points
    Rotate {
        axis_start: Point3<f64>,
        axis_end: Point3<f64>,
        degrees: f64,
    },
}

impl TransformOp {
    /// The operation that undoes this one
    pub fn inverse(&self) -> TransformOp {
        match *self {
            TransformOp::Translate(v) => TransformOp::Translate(-v),
            TransformOp::Rotate {
                axis_start,
                axis_end,
                degrees,
            } => TransformOp::Rotate {
                axis_start,
                axis_end,
                degrees: -degrees,
            },
        }
    }

    /// Rigid motion of this operation
    pub fn to_isometry(&self) -> Result<Isometry3<f64>> {
        match *self {
            TransformOp::Translate(v) => Ok(Isometry3::from_parts(
                Translation3::from(v),
                UnitQuaternion::identity(),
            )),
            TransformOp::Rotate {
                axis_start,
                axis_end,
                degrees,
            } => axis_rotation(axis_start, axis_end, degrees).map_err(|_| {
                Error::InvalidParameter(format!(
                    "rotation axis needs two distinct points, got {} twice",
                    axis_start
                ))
            }),
        }
    }
}

/// Ordered sequence of rigid motions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform {
    ops: Vec<TransformOp>,
}

impl Transform {
    /// The empty transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from explicit operations, rejecting rotations about a degenerate axis
    pub fn new(ops: Vec<TransformOp>) -> Result<Self> {
        for op in &ops {
            op.to_isometry()?;
        }
        Ok(Self { ops })
    }

    /// Single translation
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::identity().translate(x, y, z)
    }

    /// Single rotation
    pub fn rotation(axis_start: Point3<f64>, axis_end: Point3<f64>, degrees: f64) -> Result<Self> {
        Self::identity().rotate(axis_start, axis_end, degrees)
    }

    /// Append a translation
    pub fn translate(mut self, x: f64, y: f64, z: f64) -> Self {
        self.ops.push(TransformOp::Translate(Vector3::new(x, y, z)));
        self
    }

    /// Append a rotation
    ///
    /// Fails with [`Error::InvalidParameter`] when `axis_start` and `axis_end` coincide.
    pub fn rotate(
        mut self,
        axis_start: Point3<f64>,
        axis_end: Point3<f64>,
        degrees: f64,
    ) -> Result<Self> {
        let op = TransformOp::Rotate {
            axis_start,
            axis_end,
            degrees,
        };
        op.to_isometry()?;
        self.ops.push(op);
        Ok(self)
    }

    /// Operations in application order
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Check if the transform has no operations
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// `self` followed by `next`
    pub fn then(&self, next: &Transform) -> Transform {
        let mut ops = self.ops.clone();
        ops.extend_from_slice(&next.ops);
        Transform { ops }
    }

    /// Reversed sequence of inverted operations
    pub fn inverse(&self) -> Transform {
        Transform {
            ops: self.ops.iter().rev().map(TransformOp::inverse).collect(),
        }
    }

    /// Compose every operation into one rigid motion
    pub fn to_isometry(&self) -> Isometry3<f64> {
        // Rotation axes were checked when each op entered the sequence
        self.ops.iter().fold(Isometry3::identity(), |acc, op| {
            op.to_isometry().unwrap_or_else(|_| Isometry3::identity()) * acc
        })
    }

    /// Move a shape by this transform
    pub fn apply(&self, shape: &Solid) -> Solid {
        if self.is_identity() {
            return shape.clone();
        }
        shape.transformed(&self.to_isometry())
    }

    /// Undo this transform on a shape
    pub fn reverse_apply(&self, shape: &Solid) -> Solid {
        self.inverse().apply(shape)
    }
}
