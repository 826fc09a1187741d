// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Doors: a three-sided frame with an optional closed door leaf behind it

use super::walls::{BACK_WALL, BASE_WALL, FRONT_WALL};
use super::{basic_rect, plate, through_hole};
use crate::error::{Error, Result};
use crate::media::Media;
use crate::panel::{Cutout, Panel, PanelGroup};
use crate::transform::Transform;
use nalgebra::Point2;
use papercraft_geometry::bool2d;
use papercraft_geometry::profile::create_rectangle;
use papercraft_geometry::Solid;

/// Frame around the door opening, also cut from the base wall
pub const DOOR_MARGIN: f64 = 1.0;

const FRAME_BORDER: f64 = 0.5;

/// Door group: a `frame` panel and, unless `is_open`, a `door` leaf
pub fn door(
    base: &Media,
    media: &Media,
    width: f64,
    height: f64,
    is_open: bool,
    transform: Transform,
) -> Result<PanelGroup> {
    if width <= 4.0 * FRAME_BORDER || height <= 2.0 * FRAME_BORDER {
        return Err(Error::InvalidParameter(format!(
            "Door {} x {} leaves no opening",
            width, height
        )));
    }
    let t = media.thickness();

    let mut group = PanelGroup::new("door").with_panel(
        Panel::new("frame", media.clone(), door_frame(width, height, t))
            .with_transform(Transform::translation(0.0, 0.0, base.thickness() - t)),
    );

    if !is_open {
        group = group.with_panel(
            Panel::new(
                "door",
                media.clone(),
                basic_rect(width + 2.0 * DOOR_MARGIN, height + 2.0 * DOOR_MARGIN, t)?,
            )
            .with_transform(Transform::translation(0.0, 0.0, base.thickness() - 2.0 * t)),
        );
    }

    Ok(group
        .with_cutout(Cutout::new(
            through_hole(width + 2.0 * DOOR_MARGIN, height + 2.0 * DOOR_MARGIN)?,
            [BASE_WALL, BACK_WALL],
        ))
        .with_cutout(Cutout::new(through_hole(width, height)?, [FRONT_WALL]))
        .with_transform(transform))
}

fn door_frame(width: f64, height: f64, thickness: f64) -> Solid {
    let outer = create_rectangle(width + 2.0 * DOOR_MARGIN, height + 2.0 * DOOR_MARGIN);
    let opening = create_rectangle(width - 4.0 * FRAME_BORDER, height - 2.0 * FRAME_BORDER)
        .map_points(|p| Point2::new(p.x, p.y - FRAME_BORDER));

    plate(bool2d::subtract(&outer, &[opening]), thickness)
}
