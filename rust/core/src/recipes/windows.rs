// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Windows: a glazing-bar frame and a sill, with holes for the wall behind

use super::walls::{BACK_WALL, BASE_WALL, FRONT_WALL};
use super::{basic_rect, plate, through_hole, THROUGH_CUT_DEPTH};
use crate::error::{Error, Result};
use crate::media::Media;
use crate::panel::{Cutout, Panel, PanelGroup};
use crate::transform::Transform;
use nalgebra::Vector3;
use papercraft_geometry::bool2d;
use papercraft_geometry::profile::{create_arch, create_rectangle};
use papercraft_geometry::Solid;

/// Width of the frame border around the glazing
const FRAME_BORDER: f64 = 0.5;
/// Width of the glazing bars
const GLAZING_BAR: f64 = 0.75;

/// Window opening and trim dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct WindowParams {
    pub width: f64,
    pub height: f64,
    pub sill_width: f64,
    pub sill_height: f64,
    /// Extra frame around the opening, also cut from the base wall
    pub margin: f64,
    pub vertical_bar: bool,
    /// Height of an arched head above the front opening; zero for none
    pub top_arc_height: f64,
}

impl WindowParams {
    /// Window with a 1 unit margin, both glazing bars, and a sill 3 wider than the opening
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sill_width: width + 3.0,
            sill_height: 2.0,
            margin: 1.0,
            vertical_bar: true,
            top_arc_height: 0.0,
        }
    }

    pub fn with_sill(mut self, width: f64, height: f64) -> Self {
        self.sill_width = width;
        self.sill_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn without_vertical_bar(mut self) -> Self {
        self.vertical_bar = false;
        self
    }

    pub fn with_top_arc(mut self, height: f64) -> Self {
        self.top_arc_height = height;
        self
    }

    fn validate(&self) -> Result<()> {
        let inner_w = self.width - 4.0 * FRAME_BORDER;
        let inner_h = self.height - 6.0 * FRAME_BORDER;
        if inner_w <= 0.0 || inner_h <= 0.0 || self.margin < 0.0 || self.top_arc_height < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Window {} x {} (margin {}, arc {}) leaves no glazing",
                self.width, self.height, self.margin, self.top_arc_height
            )));
        }
        Ok(())
    }
}

/// Window group: `frame` and `sill` panels, cutting the wall it is attached to
///
/// The base and back walls lose the opening plus margin; the front wall loses
/// the bare opening, with its arched head if any.
pub fn window(base: &Media, media: &Media, params: &WindowParams, transform: Transform) -> Result<PanelGroup> {
    params.validate()?;
    let t = media.thickness();

    let frame = Panel::new("frame", media.clone(), window_frame(params, t))
        .with_transform(Transform::translation(0.0, 0.0, base.thickness() - t));

    let sill = Panel::new(
        "sill",
        media.clone(),
        basic_rect(params.sill_width, params.sill_height, t)?,
    )
    .with_transform(Transform::translation(
        0.0,
        -0.5 * params.height - 0.5 * params.sill_height,
        base.thickness() + 2.0 * t,
    ));

    let base_hole = Cutout::new(
        through_hole(
            params.width + 2.0 * params.margin,
            params.height + 2.0 * params.margin,
        )?,
        [BASE_WALL, BACK_WALL],
    );

    let mut front_tool = through_hole(params.width, params.height)?;
    if params.top_arc_height > 0.0 {
        let arc = Solid::extrude(create_arch(params.width, params.top_arc_height)?, THROUGH_CUT_DEPTH)?
            .translated(Vector3::new(0.0, 0.5 * params.height, -0.5 * THROUGH_CUT_DEPTH));
        front_tool = front_tool.union(&arc);
    }
    let front_hole = Cutout::new(front_tool, [FRONT_WALL]);

    Ok(PanelGroup::new("window")
        .with_panel(frame)
        .with_panel(sill)
        .with_cutout(base_hole)
        .with_cutout(front_hole)
        .with_transform(transform))
}

fn window_frame(params: &WindowParams, thickness: f64) -> Solid {
    let outer = create_rectangle(
        params.width + 2.0 * params.margin,
        params.height + 2.0 * params.margin,
    );
    let glazing = create_rectangle(
        params.width - 4.0 * FRAME_BORDER,
        params.height - 6.0 * FRAME_BORDER,
    );

    let mut regions = bool2d::subtract(&outer, &[glazing]);
    regions.push(create_rectangle(params.width - 2.0 * FRAME_BORDER, GLAZING_BAR));
    if params.vertical_bar {
        regions.push(create_rectangle(GLAZING_BAR, params.height - 4.0 * FRAME_BORDER));
    }

    plate(bool2d::union_profiles(&regions), thickness)
}
