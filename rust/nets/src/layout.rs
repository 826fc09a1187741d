// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sheet layout
//!
//! Panels are grouped by the card stock they are cut from, one entry per
//! physical layer, and their silhouettes are packed onto that stock's sheets.
//! Layout coordinates are y-up with the sheet's lower-left corner at the
//! origin.

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::packing::{pack, PackItem, PackedRect};
use crate::vertices::{panel_vertex_loops, BoundingMetrics, VertexLoop};
use papercraft_core::{Panel, SingleLayerMedia};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Turn applied to a panel on the sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    /// 90 degrees
    Quarter,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 90,
        }
    }
}

/// One cut piece: a panel, or one layer of a layered panel
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPanel {
    pub name: String,
    /// Silhouette in the panel's local frame
    pub vertex_loops: Vec<VertexLoop>,
    pub width: f64,
    pub height: f64,
    pub center_offset_x: f64,
    pub center_offset_y: f64,
    /// Sheet the piece is on
    pub bin_index: usize,
    /// Where the piece's local origin goes on the sheet
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

impl LayoutPanel {
    /// Unplaced piece sized from its silhouette
    pub fn new(name: impl Into<String>, vertex_loops: Vec<VertexLoop>) -> Result<Self> {
        let name = name.into();
        let Some(metrics) = BoundingMetrics::from_loops(&vertex_loops) else {
            return Err(Error::EmptySilhouette(name));
        };
        Ok(Self {
            name,
            vertex_loops,
            width: metrics.width,
            height: metrics.height,
            center_offset_x: metrics.center_offset_x,
            center_offset_y: metrics.center_offset_y,
            bin_index: 0,
            x: 0.0,
            y: 0.0,
            rotation: Rotation::None,
        })
    }

    /// Record a packed slot, moving the local origin so the silhouette's
    /// bounding-box centre sits on the slot's centre
    ///
    /// The centre offset is subtracted from the slot centre, not averaged in
    /// as `x + 0.5 * (width + center_offset_x)`, which misplaces any piece
    /// whose silhouette is not centred on its local origin.
    fn place(&mut self, slot: &PackedRect) {
        let cx = slot.rect.x + 0.5 * slot.rect.width;
        let cy = slot.rect.y + 0.5 * slot.rect.height;
        self.bin_index = slot.bin;
        if slot.rotated {
            // A quarter turn maps local (u, v) to (v, -u) on the sheet
            self.rotation = Rotation::Quarter;
            self.x = cx - self.center_offset_y;
            self.y = cy + self.center_offset_x;
        } else {
            self.rotation = Rotation::None;
            self.x = cx - self.center_offset_x;
            self.y = cy - self.center_offset_y;
        }
    }
}

/// Pieces cut from one card stock
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPanels {
    pub media: SingleLayerMedia,
    pub panels: Vec<LayoutPanel>,
}

/// Underlying single-layer media of every panel, by name
pub fn single_layer_media_by_name(panels: &[Panel]) -> FxHashMap<String, SingleLayerMedia> {
    panels
        .iter()
        .map(|p| (p.media.sheet().name.clone(), p.media.sheet().clone()))
        .collect()
}

/// Group panels by single-layer media, in first-seen order
///
/// A panel of layered media becomes one piece per layer, named
/// `{panel}_{layer}`.
pub fn layout_panels_by_media(panels: &[Panel]) -> Result<Vec<MediaPanels>> {
    let mut groups: Vec<MediaPanels> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

    for panel in panels {
        let sheet = panel.media.sheet();
        let group = *by_name.entry(sheet.name.clone()).or_insert_with(|| {
            groups.push(MediaPanels {
                media: sheet.clone(),
                panels: Vec::new(),
            });
            groups.len() - 1
        });

        let loops = panel_vertex_loops(&panel.shape)?;
        let layers = panel.media.layer_count();
        if layers == 1 {
            groups[group].panels.push(LayoutPanel::new(&panel.name, loops)?);
            continue;
        }
        for layer in 0..layers {
            groups[group].panels.push(LayoutPanel::new(
                format!("{}_{}", panel.name, layer),
                loops.clone(),
            )?);
        }
    }

    Ok(groups)
}

/// Packing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Gap kept around every piece, on each side
    pub margin: f64,
    pub max_bins: usize,
}

impl From<&ExportConfig> for LayoutOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            margin: config.pack_margin,
            max_bins: config.max_bins,
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            margin: crate::config::DEFAULT_PACK_MARGIN,
            max_bins: crate::config::DEFAULT_MAX_BINS,
        }
    }
}

/// Packed pieces of one media
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLayout {
    pub media: SingleLayerMedia,
    /// Placed pieces, in input order
    pub panels: Vec<LayoutPanel>,
    /// Packer slots, margin included
    pub boxes: Vec<PackedRect>,
    /// Pieces that fit on no sheet
    pub unplaced: Vec<LayoutPanel>,
}

impl MediaLayout {
    /// Number of sheets in use
    pub fn page_count(&self) -> usize {
        self.panels.iter().map(|p| p.bin_index + 1).max().unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Fail when any piece is unplaced
    pub fn ensure_complete(&self, max_bins: usize) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(Error::SheetCapacityExceeded {
            media: self.media.name.clone(),
            max_bins,
            unplaced: self.unplaced.iter().map(|p| p.name.clone()).collect(),
        })
    }
}

/// Pack one media's pieces onto its sheets
pub fn compute_layout(
    media: SingleLayerMedia,
    panels: Vec<LayoutPanel>,
    options: &LayoutOptions,
) -> MediaLayout {
    let items: Vec<PackItem> = panels
        .iter()
        .enumerate()
        .map(|(id, p)| PackItem {
            id,
            width: p.width + 2.0 * options.margin,
            height: p.height + 2.0 * options.margin,
        })
        .collect();

    let packed = pack(&items, media.width, media.height, options.max_bins);

    let mut slots: Vec<Option<PackedRect>> = vec![None; panels.len()];
    for slot in &packed.placed {
        slots[slot.id] = Some(*slot);
    }

    let mut placed = Vec::with_capacity(panels.len());
    let mut unplaced = Vec::new();
    for (mut panel, slot) in panels.into_iter().zip(slots) {
        match slot {
            Some(slot) => {
                panel.place(&slot);
                placed.push(panel);
            }
            None => {
                warn!(
                    media = %media.name,
                    panel = %panel.name,
                    width = panel.width,
                    height = panel.height,
                    "panel does not fit on any sheet"
                );
                unplaced.push(panel);
            }
        }
    }

    debug!(
        media = %media.name,
        panels = placed.len(),
        sheets = packed.bin_count(),
        "computed layout"
    );

    MediaLayout {
        media,
        panels: placed,
        boxes: packed.placed,
        unplaced,
    }
}

/// Group and pack every panel
pub fn layout_panels(panels: &[Panel], options: &LayoutOptions) -> Result<Vec<MediaLayout>> {
    Ok(layout_panels_by_media(panels)?
        .into_iter()
        .map(|group| compute_layout(group.media, group.panels, options))
        .collect())
}
