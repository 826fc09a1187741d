// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Papercraft Geometry Kernel
//!
//! Small prismatic modelling kernel for card-model panels: profiles extruded
//! into placed prisms, booleans reduced to 2D polygon clipping with i_overlay,
//! top-down projection to line drawings, and earcutr tessellation.

pub mod bool2d;
pub mod drawing;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod profile;
pub mod projection;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point2, Point3, Vector2, Vector3};

pub use bool2d::OVERLAY_TOLERANCE;
pub use drawing::LineDrawing;
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use profile::{create_arch, create_rectangle, Profile2D};
pub use solid::{axis_rotation, Prism, Solid};
