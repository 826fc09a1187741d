// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel-group flattening
//!
//! Both traversals are depth-first pre-order (a group's own panels, then its
//! children in order), so [`flatten_panels`] and [`flatten_world_shapes`]
//! line up index for index.

use crate::panel::{Panel, PanelGroup};
use nalgebra::Isometry3;
use papercraft_geometry::Solid;

/// A panel with its hierarchy name and its shape in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedPanel {
    /// Copy of the source panel, renamed to its unique hierarchy name
    pub panel: Panel,
    pub world_shape: Solid,
}

/// Copies of every panel in the tree, renamed to unique hierarchy names
///
/// A group's panels are named `{prefix}{group}_p{index}_{panel}`; its children
/// recurse with the prefix `{prefix}{group}_c{index}_`.
pub fn flatten_panels(group: &PanelGroup) -> Vec<Panel> {
    let mut panels = Vec::with_capacity(group.panel_count());
    collect_panels(group, "", &mut panels);
    panels
}

fn collect_panels(group: &PanelGroup, prefix: &str, out: &mut Vec<Panel>) {
    for (index, panel) in group.panels.iter().enumerate() {
        let mut copy = panel.clone();
        copy.name = format!("{}{}_p{}_{}", prefix, group.name, index, panel.name);
        out.push(copy);
    }

    for (index, child) in group.children.iter().enumerate() {
        let child_prefix = format!("{}{}_c{}_", prefix, group.name, index);
        collect_panels(child, &child_prefix, out);
    }
}

/// Shapes of every panel in world coordinates
///
/// Each shape is moved by its panel's transform, then by every enclosing
/// group's transform from the innermost out to the root.
pub fn flatten_world_shapes(group: &PanelGroup) -> Vec<Solid> {
    let mut shapes = Vec::with_capacity(group.panel_count());
    collect_shapes(group, &Isometry3::identity(), &mut shapes);
    shapes
}

fn collect_shapes(group: &PanelGroup, parent: &Isometry3<f64>, out: &mut Vec<Solid>) {
    let pose = parent * group.transform.to_isometry();

    for panel in &group.panels {
        let world = pose * panel.transform.to_isometry();
        out.push(panel.shape.transformed(&world));
    }

    for child in &group.children {
        collect_shapes(child, &pose, out);
    }
}

/// Renamed panels zipped with their world shapes
pub fn flatten(group: &PanelGroup) -> Vec<FlattenedPanel> {
    flatten_panels(group)
        .into_iter()
        .zip(flatten_world_shapes(group))
        .map(|(panel, world_shape)| FlattenedPanel { panel, world_shape })
        .collect()
}
