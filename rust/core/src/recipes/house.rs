// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A plain box building: tabbed floor and four tabbed walls

use super::floors::{floor, FloorParams};
use super::tabs::TabDirection;
use super::walls::tabbed_wall;
use crate::error::Result;
use crate::media::Media;
use crate::panel::PanelGroup;
use crate::transform::Transform;
use nalgebra::Point3;

/// House `length` along x, `width` along y and `height` tall, standing on z = 0
///
/// Children, in order: `floor`, `front_wall` (+y), `back_wall` (-y),
/// `right_wall` (+x), `left_wall` (-x). Front and back walls carry outward
/// side tabs that slot into the side walls.
pub fn basic_house(
    base: &Media,
    front: &Media,
    back: &Media,
    length: f64,
    width: f64,
    height: f64,
) -> Result<PanelGroup> {
    let origin = Point3::origin();
    let x_axis = Point3::new(1.0, 0.0, 0.0);
    let z_axis = Point3::new(0.0, 0.0, 1.0);
    // Walls stand with their outer facing flush with the footprint
    let inset = base.thickness() + front.thickness();

    let upright = |turn: f64, x: f64, y: f64| -> Result<Transform> {
        Ok(Transform::rotation(origin, x_axis, 90.0)?
            .rotate(origin, z_axis, turn)?
            .translate(x, y, 0.5 * height))
    };

    let floor = floor(
        "floor",
        base,
        front,
        back,
        &FloorParams::new(length, width),
        Transform::rotation(origin, x_axis, 180.0)?.translate(0.0, 0.0, base.thickness()),
    )?;

    let walls = [
        ("front_wall", length, TabDirection::Out, upright(180.0, 0.0, 0.5 * width - inset)?),
        ("back_wall", length, TabDirection::Out, upright(0.0, 0.0, -0.5 * width + inset)?),
        ("right_wall", width, TabDirection::In, upright(90.0, 0.5 * length - inset, 0.0)?),
        ("left_wall", width, TabDirection::In, upright(-90.0, -0.5 * length + inset, 0.0)?),
    ];

    let mut house = PanelGroup::new("house").with_child(floor);
    for (name, span, side_tabs, transform) in walls {
        house = house.with_child(
            tabbed_wall(name, base, front, back, span, height, side_tabs)?.with_transform(transform),
        );
    }
    Ok(house)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::media::{card_056mm, card_169mm};
    use approx::assert_relative_eq;
    use papercraft_geometry::OVERLAY_TOLERANCE;

    fn house() -> PanelGroup {
        basic_house(&card_169mm(), &card_056mm(), &card_056mm(), 120.0, 80.0, 50.0).unwrap()
    }

    #[test]
    fn test_house_children() {
        let house = house();
        let names: Vec<&str> = house.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["floor", "front_wall", "back_wall", "right_wall", "left_wall"]
        );
    }

    #[test]
    fn test_house_stands_on_ground() {
        let flat = flatten(&house());
        assert_eq!(flat.len(), 2 + 4 * 3);

        for entry in &flat {
            let (min, max) = entry.world_shape.bounds().unwrap();
            assert!(min.z > -1.0, "{} dips below ground", entry.panel.name);
            assert!(max.z < 51.0, "{} pokes above the eaves", entry.panel.name);
        }
    }

    #[test]
    fn test_floor_tabs_reach_side_walls() {
        let flat = flatten(&house());
        let find = |name: &str| {
            flat.iter()
                .find(|e| e.panel.name == name)
                .map(|e| e.world_shape.bounds().unwrap())
                .unwrap()
        };

        let inset = 1.69 + 0.56;
        let (_, floor_max) = find("house_c0_floor_p0_base_floor");
        let (wall_min, wall_max) = find("house_c3_right_wall_p0_base_wall");

        assert_relative_eq!(floor_max.x, 60.0 - 0.56, epsilon = OVERLAY_TOLERANCE);
        assert_relative_eq!(wall_min.x, 60.0 - inset, epsilon = OVERLAY_TOLERANCE);
        assert_relative_eq!(wall_max.x, 60.0 - 0.56, epsilon = OVERLAY_TOLERANCE);

        // Floor lies flat on z = 0 with its lining above
        let (floor_min, _) = find("house_c0_floor_p0_base_floor");
        assert_relative_eq!(floor_min.z, 0.0, epsilon = 1e-9);
        let (lining_min, lining_max) = find("house_c0_floor_p1_inside_floor");
        assert_relative_eq!(lining_min.z, 1.69, epsilon = 1e-9);
        assert_relative_eq!(lining_max.z, 1.69 + 0.56, epsilon = 1e-9);
    }
}
