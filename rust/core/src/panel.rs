// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel hierarchy data model

use crate::media::Media;
use crate::transform::Transform;
use papercraft_geometry::Solid;

/// A named piece of sheet material with a shape in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub name: String,
    pub media: Media,
    /// Solid in the panel's local frame
    pub shape: Solid,
    /// Local-to-group transform
    pub transform: Transform,
}

impl Panel {
    /// Create an untransformed panel
    pub fn new(name: impl Into<String>, media: Media, shape: Solid) -> Self {
        Self {
            name: name.into(),
            media,
            shape,
            transform: Transform::identity(),
        }
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// A subtraction tool aimed at named panels of the parent group
#[derive(Debug, Clone, PartialEq)]
pub struct Cutout {
    /// Tool solid in the cutout's local frame
    pub shape: Solid,
    /// Names of the parent group's panels to cut
    pub subtract_from: Vec<String>,
    /// Local-to-group transform
    pub transform: Transform,
}

impl Cutout {
    /// Create an untransformed cutout
    pub fn new<I, S>(shape: Solid, subtract_from: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shape,
            subtract_from: subtract_from.into_iter().map(Into::into).collect(),
            transform: Transform::identity(),
        }
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// A node of the model tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelGroup {
    pub name: String,
    pub panels: Vec<Panel>,
    /// Cutouts applied to the parent group's panels
    pub cutouts: Vec<Cutout>,
    pub children: Vec<PanelGroup>,
    /// Local-to-parent transform
    pub transform: Transform,
}

impl PanelGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn with_cutout(mut self, cutout: Cutout) -> Self {
        self.cutouts.push(cutout);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Append a child without resolving its cutouts
    ///
    /// Use [`PanelGroup::attach`] to cut the parent's panels immediately, or
    /// call [`PanelGroup::finalize_cutouts`] once the tree is complete.
    pub fn with_child(mut self, child: PanelGroup) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child with this name
    pub fn child(&self, name: &str) -> Option<&PanelGroup> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First direct child with this name, mutably
    pub fn child_mut(&mut self, name: &str) -> Option<&mut PanelGroup> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// First direct panel with this name
    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name == name)
    }

    /// Number of panels in the whole subtree
    pub fn panel_count(&self) -> usize {
        self.panels.len() + self.children.iter().map(PanelGroup::panel_count).sum::<usize>()
    }
}
