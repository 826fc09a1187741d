// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walls: a structural base panel faced on both sides
//!
//! The front facing sits on top of the base (+z), the back facing below it.
//! Window and door cutouts target the panel names used here.

use super::basic_rect;
use super::tabs::{tabbed_rect, RectTabs, Tab, TabDirection};
use crate::error::Result;
use crate::media::Media;
use crate::panel::{Panel, PanelGroup};
use crate::transform::Transform;

pub const BASE_WALL: &str = "base_wall";
pub const FRONT_WALL: &str = "front_wall";
pub const BACK_WALL: &str = "back_wall";

/// Plain 90 x 50 wall section
pub fn wall(base: &Media, front: &Media, back: &Media, transform: Transform) -> Result<PanelGroup> {
    const WIDTH: f64 = 90.0;
    const HEIGHT: f64 = 50.0;

    Ok(PanelGroup::new("wall")
        .with_panel(Panel::new(
            BASE_WALL,
            base.clone(),
            basic_rect(WIDTH, HEIGHT, base.thickness())?,
        ))
        .with_panel(
            Panel::new(
                FRONT_WALL,
                front.clone(),
                basic_rect(WIDTH, HEIGHT, front.thickness())?,
            )
            .with_transform(Transform::translation(0.0, 0.0, base.thickness())),
        )
        .with_panel(
            Panel::new(
                BACK_WALL,
                back.clone(),
                basic_rect(WIDTH, HEIGHT, back.thickness())?,
            )
            .with_transform(Transform::translation(0.0, 0.0, -back.thickness())),
        )
        .with_transform(transform))
}

/// Wall of a box-shaped building, tabbed to join its neighbours and the floor
///
/// Left and right edges carry `side_tabs` tabs so adjacent walls interlock;
/// the bottom edge has a slot for the floor tab. The back facing is inset by
/// the base thickness on each side so it clears the neighbouring walls.
pub fn tabbed_wall(
    name: &str,
    base: &Media,
    front: &Media,
    back: &Media,
    width: f64,
    height: f64,
    side_tabs: TabDirection,
) -> Result<PanelGroup> {
    let t = base.thickness();
    let side_tab = Tab::new(side_tabs, 0.25 * height, t);
    let tabs = RectTabs {
        left: Some(side_tab.with_offset(0.25 * height)),
        right: Some(side_tab.with_offset(-0.25 * height)),
        bottom: Some(Tab::new(TabDirection::In, 30.0_f64.min(0.5 * width), t)),
        top: None,
    };

    Ok(PanelGroup::new(name)
        .with_panel(Panel::new(BASE_WALL, base.clone(), tabbed_rect(width, height, t, tabs)?))
        .with_panel(
            Panel::new(
                FRONT_WALL,
                front.clone(),
                basic_rect(width, height, front.thickness())?,
            )
            .with_transform(Transform::translation(0.0, 0.0, t)),
        )
        .with_panel(
            Panel::new(
                BACK_WALL,
                back.clone(),
                basic_rect(width - 2.0 * t, height - t, back.thickness())?,
            )
            .with_transform(Transform::translation(0.0, 0.5 * t, -back.thickness())),
        ))
}
