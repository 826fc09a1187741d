// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building recipes
//!
//! Pure builders that assemble panel groups from primitive solids. Panels
//! are drawn in the XY plane with their thickness above z = 0 and placed by
//! their transforms.

pub mod doors;
pub mod floors;
pub mod house;
pub mod tabs;
pub mod walls;
pub mod windows;

pub use doors::door;
pub use floors::{floor, FloorParams};
pub use house::basic_house;
pub use tabs::{tabbed_polygon, tabbed_rect, RectTabs, Tab, TabDirection};
pub use walls::{tabbed_wall, wall};
pub use windows::{window, WindowParams};

use crate::error::Result;
use nalgebra::Vector3;
use papercraft_geometry::{Point2, Prism, Profile2D, Solid};

/// Depth of tool solids that must cut through any panel stack
pub const THROUGH_CUT_DEPTH: f64 = 100.0;

/// Box of `width` x `height` resting on z = 0 with the given thickness
pub fn basic_rect(width: f64, height: f64, thickness: f64) -> Result<Solid> {
    Ok(Solid::cuboid(width, height, thickness)?.translated(Vector3::new(0.0, 0.0, 0.5 * thickness)))
}

/// Flat plate from 2D regions, from z = 0 to `thickness`
pub fn plate(regions: Vec<Profile2D>, thickness: f64) -> Solid {
    Solid::from_bodies(
        regions
            .into_iter()
            .map(|region| Prism::new(region, 0.0, thickness))
            .collect(),
    )
}

/// Through-cut tool: a `width` x `height` box centered on the origin
pub fn through_hole(width: f64, height: f64) -> Result<Solid> {
    Ok(Solid::cuboid(width, height, THROUGH_CUT_DEPTH)?)
}

/// Through-cut tool with 45 degree corner chamfers of size `chamfer`
pub fn chamfered_hole(width: f64, height: f64, chamfer: f64) -> Result<Solid> {
    let (hw, hh) = (0.5 * width, 0.5 * height);
    let c = chamfer.min(hw).min(hh);
    let outline = [
        Point2::new(-hw + c, -hh),
        Point2::new(hw - c, -hh),
        Point2::new(hw, -hh + c),
        Point2::new(hw, hh - c),
        Point2::new(hw - c, hh),
        Point2::new(-hw + c, hh),
        Point2::new(-hw, hh - c),
        Point2::new(-hw, -hh + c),
    ];
    Ok(Solid::polygon(&outline, THROUGH_CUT_DEPTH)?
        .translated(Vector3::new(0.0, 0.0, -0.5 * THROUGH_CUT_DEPTH)))
}
