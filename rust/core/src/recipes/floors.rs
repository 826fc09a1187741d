// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floors: a tabbed base that slots into the walls, lined on the inside

use super::tabs::{tabbed_rect, RectTabs, Tab, TabDirection};
use super::{basic_rect, chamfered_hole};
use crate::error::{Error, Result};
use crate::media::Media;
use crate::panel::{Cutout, Panel, PanelGroup};
use crate::transform::Transform;

pub const BASE_FLOOR: &str = "base_floor";
pub const INSIDE_FLOOR: &str = "inside_floor";

/// Chamfer on the corners of the access hole
const HOLE_CHAMFER: f64 = 5.0;
/// Clearance between the access hole and the floor edge
const HOLE_INSET: f64 = 20.0;
/// Gap between the inside lining and the wall linings
const LINING_GAP: f64 = 0.25;

/// Outer floor dimensions and tab lengths
#[derive(Debug, Clone, PartialEq)]
pub struct FloorParams {
    /// Size along x, measured to the outside of the walls
    pub width: f64,
    /// Size along y, measured to the outside of the walls
    pub height: f64,
    /// Length of the tabs on the bottom and top edges
    pub tab_length_x: f64,
    /// Length of the tabs on the left and right edges
    pub tab_length_y: f64,
    /// Cut a chamfered access hole through the floor
    pub hole: bool,
}

impl FloorParams {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            tab_length_x: 30.0,
            tab_length_y: 30.0,
            hole: true,
        }
    }

    pub fn with_tab_lengths(mut self, x: f64, y: f64) -> Self {
        self.tab_length_x = x;
        self.tab_length_y = y;
        self
    }

    pub fn without_hole(mut self) -> Self {
        self.hole = false;
        self
    }
}

/// Floor group with `base_floor` and `inside_floor` panels
///
/// The base floor sits inside the walls and reaches into their bottom slots
/// with a tab on every edge. The inside lining hangs below it. With
/// `params.hole` a `floor_hole` child cuts through both.
pub fn floor(
    name: &str,
    base: &Media,
    front: &Media,
    back: &Media,
    params: &FloorParams,
    transform: Transform,
) -> Result<PanelGroup> {
    let t = base.thickness();
    let base_inset = 2.0 * (front.thickness() + t);
    let lining_inset = 2.0 * (front.thickness() + t + back.thickness() + LINING_GAP);
    if params.width <= lining_inset || params.height <= lining_inset {
        return Err(Error::InvalidParameter(format!(
            "Floor {} x {} is smaller than its walls",
            params.width, params.height
        )));
    }

    let x_tab = Tab::new(TabDirection::Out, params.tab_length_x, t);
    let y_tab = Tab::new(TabDirection::Out, params.tab_length_y, t);
    let tabs = RectTabs {
        left: Some(y_tab),
        right: Some(y_tab),
        bottom: Some(x_tab),
        top: Some(x_tab),
    };

    let mut group = PanelGroup::new(name)
        .with_panel(Panel::new(
            BASE_FLOOR,
            base.clone(),
            tabbed_rect(params.width - base_inset, params.height - base_inset, t, tabs)?,
        ))
        .with_panel(
            Panel::new(
                INSIDE_FLOOR,
                back.clone(),
                basic_rect(
                    params.width - lining_inset,
                    params.height - lining_inset,
                    back.thickness(),
                )?,
            )
            .with_transform(Transform::translation(0.0, 0.0, -back.thickness())),
        )
        .with_transform(transform);

    if params.hole {
        let inset = 2.0 * front.thickness() + HOLE_INSET;
        let hole = PanelGroup::new("floor_hole").with_cutout(Cutout::new(
            chamfered_hole(params.width - inset, params.height - inset, HOLE_CHAMFER)?,
            [BASE_FLOOR, INSIDE_FLOOR],
        ));
        group.attach(hole).ensure_complete()?;
    }

    Ok(group)
}
