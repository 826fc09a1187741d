// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge tabs
//!
//! Tabs are listed per edge, in the polygon's edge order (edge `i` runs from
//! point `i` to point `i + 1`). An `Out` tab adds a rectangle straddling the
//! edge, an `In` tab cuts one. Both are `width` long along the edge and reach
//! `height` past it on each side, shifted `offset` along the edge direction of
//! the counter-clockwise outline.

use super::plate;
use crate::error::{Error, Result};
use papercraft_geometry::bool2d::{self, compute_signed_area, ensure_ccw};
use papercraft_geometry::{Point2, Profile2D, Solid};

/// Whether a tab sticks out of the edge or is cut into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    In,
    Out,
}

/// A rectangular tab on one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tab {
    pub direction: TabDirection,
    /// Length along the edge
    pub width: f64,
    /// Depth across the edge
    pub height: f64,
    /// Shift from the edge midpoint along the edge
    pub offset: f64,
}

impl Tab {
    pub fn new(direction: TabDirection, width: f64, height: f64) -> Self {
        Self {
            direction,
            width,
            height,
            offset: 0.0,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Tabs for the four edges of a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectTabs {
    pub left: Option<Tab>,
    pub right: Option<Tab>,
    pub bottom: Option<Tab>,
    pub top: Option<Tab>,
}

impl RectTabs {
    /// The same tab on every edge
    pub fn all(tab: Tab) -> Self {
        Self {
            left: Some(tab),
            right: Some(tab),
            bottom: Some(tab),
            top: Some(tab),
        }
    }
}

/// Closed polygon extruded from z = 0 to `thickness`, with per-edge tabs
///
/// `tabs` may be shorter than the edge list; missing entries mean no tab.
pub fn tabbed_polygon(points: &[Point2<f64>], thickness: f64, tabs: &[Option<Tab>]) -> Result<Solid> {
    if tabs.len() > points.len() {
        return Err(Error::InvalidParameter(format!(
            "{} tabs given for a polygon with {} edges",
            tabs.len(),
            points.len()
        )));
    }

    if thickness <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "Thickness must be positive, got {}",
            thickness
        )));
    }

    let profile = Profile2D::polygon(points)?;
    // Tabs are laid out on the counter-clockwise outline
    let reversed = compute_signed_area(points) < 0.0;
    let outline = ensure_ccw(&profile.outer);

    let mut add = Vec::new();
    let mut cut = Vec::new();
    for (edge, tab) in tabs.iter().enumerate() {
        let Some(tab) = tab else { continue };
        let (a, b) = if reversed {
            (points[(edge + 1) % points.len()], points[edge])
        } else {
            (points[edge], points[(edge + 1) % points.len()])
        };
        let rect = tab_rectangle(a, b, tab)?;
        match tab.direction {
            TabDirection::Out => add.push(rect),
            TabDirection::In => cut.push(rect),
        }
    }

    let base = Profile2D::new(outline);
    let mut shapes = if add.is_empty() {
        vec![base]
    } else {
        add.push(base);
        bool2d::union_profiles(&add)
    };
    if !cut.is_empty() {
        shapes = shapes
            .iter()
            .flat_map(|p| bool2d::subtract(p, &cut))
            .collect();
    }

    Ok(plate(shapes, thickness))
}

/// Rectangle centered on the origin in XY, extruded from z = 0 to `thickness`, with edge tabs
pub fn tabbed_rect(width: f64, height: f64, thickness: f64, tabs: RectTabs) -> Result<Solid> {
    let (hw, hh) = (0.5 * width, 0.5 * height);
    // Counter-clockwise from the bottom-left corner: bottom, right, top, left
    let points = [
        Point2::new(-hw, -hh),
        Point2::new(hw, -hh),
        Point2::new(hw, hh),
        Point2::new(-hw, hh),
    ];
    tabbed_polygon(&points, thickness, &[tabs.bottom, tabs.right, tabs.top, tabs.left])
}

fn tab_rectangle(a: Point2<f64>, b: Point2<f64>, tab: &Tab) -> Result<Profile2D> {
    let edge = b - a;
    let length = edge.norm();
    if length <= f64::EPSILON {
        return Err(Error::InvalidParameter("Tab on a zero-length edge".to_string()));
    }
    if tab.width <= 0.0 || tab.height <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "Tab must have positive size, got {} x {}",
            tab.width, tab.height
        )));
    }

    let dir = edge / length;
    // Outward normal of a counter-clockwise outline
    let normal = nalgebra::Vector2::new(dir.y, -dir.x);
    let center = a + edge * 0.5 + dir * tab.offset;
    let along = dir * (0.5 * tab.width);
    let across = normal * tab.height;

    Ok(Profile2D::new(vec![
        center - along - across,
        center + along - across,
        center + along + across,
        center - along + across,
    ]))
}
