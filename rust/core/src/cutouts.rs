// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cutout propagation
//!
//! A child group's cutouts subtract from its parent's direct panels. The
//! tool is moved into the parent frame by the cutout's transform and then the
//! child's transform; the target panel is cut in the parent frame and moved
//! back into its own local frame, so the stored shape stays local.
//!
//! Resolution is one-shot: [`PanelGroup::attach`] resolves only the new
//! child's cutouts, against the panels that exist at that moment.

use crate::error::{Error, Result};
use crate::panel::PanelGroup;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// A cutout target name that matched no panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    /// Group that owns the panels
    pub parent: String,
    /// Group that owns the cutout
    pub child: String,
    /// Index of the cutout in the child's list
    pub cutout: usize,
    /// Panel name that was not found
    pub target: String,
}

/// Outcome of resolving cutouts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutoutReport {
    /// Number of (cutout, panel) subtractions performed
    pub applied: usize,
    /// Targets that were skipped
    pub missing: Vec<MissingTarget>,
}

impl CutoutReport {
    /// Check if every target was found
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Turn the first skipped target into an error
    pub fn ensure_complete(self) -> Result<Self> {
        match self.missing.first() {
            None => Ok(self),
            Some(m) => Err(Error::MissingCutoutTarget {
                parent: m.parent.clone(),
                child: m.child.clone(),
                cutout: m.cutout,
                target: m.target.clone(),
            }),
        }
    }

    fn absorb(&mut self, other: CutoutReport) {
        self.applied += other.applied;
        self.missing.extend(other.missing);
    }
}

impl PanelGroup {
    /// Append `child` and apply its cutouts to this group's panels
    ///
    /// Missing targets are logged and skipped; the report lists them.
    pub fn attach(&mut self, child: PanelGroup) -> CutoutReport {
        self.children.push(child);
        self.resolve_child_cutouts(self.children.len() - 1)
    }

    /// Resolve every group's direct-children cutouts, deepest groups first
    ///
    /// For trees assembled with [`PanelGroup::with_child`]. Calling it on a
    /// tree whose cutouts were already resolved by `attach` cuts twice.
    pub fn finalize_cutouts(&mut self) -> CutoutReport {
        let mut report = CutoutReport::default();
        for child in &mut self.children {
            report.absorb(child.finalize_cutouts());
        }
        for index in 0..self.children.len() {
            report.absorb(self.resolve_child_cutouts(index));
        }
        report
    }

    fn resolve_child_cutouts(&mut self, index: usize) -> CutoutReport {
        let mut report = CutoutReport::default();
        let child = &self.children[index];
        if child.cutouts.is_empty() {
            return report;
        }

        let mut panel_index: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, panel) in self.panels.iter().enumerate() {
            panel_index.entry(panel.name.as_str()).or_insert(i);
        }
        let targets: Vec<Vec<Option<usize>>> = child
            .cutouts
            .iter()
            .map(|c| {
                c.subtract_from
                    .iter()
                    .map(|name| panel_index.get(name.as_str()).copied())
                    .collect()
            })
            .collect();

        for (cutout_index, (cutout, found)) in child.cutouts.iter().zip(targets).enumerate() {
            let tool = child.transform.apply(&cutout.transform.apply(&cutout.shape));

            for (target, slot) in cutout.subtract_from.iter().zip(found) {
                let Some(panel_i) = slot else {
                    warn!(
                        parent = %self.name,
                        child = %child.name,
                        cutout = cutout_index,
                        target = %target,
                        "cutout target not found, skipping"
                    );
                    report.missing.push(MissingTarget {
                        parent: self.name.clone(),
                        child: child.name.clone(),
                        cutout: cutout_index,
                        target: target.clone(),
                    });
                    continue;
                };

                let panel = &mut self.panels[panel_i];
                let placed = panel.transform.apply(&panel.shape);
                panel.shape = panel.transform.reverse_apply(&placed.difference(&tool));
                report.applied += 1;

                debug!(
                    parent = %self.name,
                    child = %child.name,
                    panel = %panel.name,
                    "applied cutout"
                );
            }
        }

        report
    }
}
