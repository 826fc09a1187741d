// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sheet materials
//!
//! Panels on the same underlying single-layer media share physical sheets.
//! A layered media is cut as `layer_count` identical single-layer pieces.

/// A sheet material cut as one layer
#[derive(Debug, Clone, PartialEq)]
pub struct SingleLayerMedia {
    pub name: String,
    pub description: String,
    pub thickness: f64,
    /// Sheet width
    pub width: f64,
    /// Sheet height
    pub height: f64,
}

/// A stack of identical single-layer sheets glued together
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredMedia {
    pub description: String,
    pub media: SingleLayerMedia,
    pub layer_count: u32,
}

impl LayeredMedia {
    /// Aggregate thickness of the stack
    pub fn thickness(&self) -> f64 {
        self.layer_count as f64 * self.media.thickness
    }
}

/// Material of a panel
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Single(SingleLayerMedia),
    Layered(LayeredMedia),
}

impl Media {
    /// Total thickness of the material
    pub fn thickness(&self) -> f64 {
        match self {
            Media::Single(m) => m.thickness,
            Media::Layered(m) => m.thickness(),
        }
    }

    /// The single-layer sheet the panel is cut from
    pub fn sheet(&self) -> &SingleLayerMedia {
        match self {
            Media::Single(m) => m,
            Media::Layered(m) => &m.media,
        }
    }

    /// Number of pieces cut per panel
    pub fn layer_count(&self) -> u32 {
        match self {
            Media::Single(_) => 1,
            Media::Layered(m) => m.layer_count,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Media::Single(m) => &m.description,
            Media::Layered(m) => &m.description,
        }
    }
}

impl From<SingleLayerMedia> for Media {
    fn from(media: SingleLayerMedia) -> Self {
        Media::Single(media)
    }
}

impl From<LayeredMedia> for Media {
    fn from(media: LayeredMedia) -> Self {
        Media::Layered(media)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Sheet size shared by the catalog card stocks
const CARD_SHEET_WIDTH: f64 = 265.0;
const CARD_SHEET_HEIGHT: f64 = 165.0;

fn card(name: &str, description: &str, thickness: f64) -> SingleLayerMedia {
    SingleLayerMedia {
        name: name.to_string(),
        description: description.to_string(),
        thickness,
        width: CARD_SHEET_WIDTH,
        height: CARD_SHEET_HEIGHT,
    }
}

/// 1.69mm corrugated card
pub fn card_169mm() -> Media {
    card("card-1.69mm", "1.69mm corrugated card", 1.69).into()
}

/// 0.56mm white card
pub fn card_056mm() -> Media {
    card("card-0.56mm", "0.56mm white card", 0.56).into()
}

/// Two layers of 1.69mm corrugated card
pub fn card_2x169mm() -> Media {
    LayeredMedia {
        description: "Two layers of 1.69mm corrugated card".to_string(),
        media: card("card-1.69mm", "1.69mm corrugated card", 1.69),
        layer_count: 2,
    }
    .into()
}

/// Two layers of 0.56mm card
pub fn card_2x056mm() -> Media {
    LayeredMedia {
        description: "Two layers of 0.56mm card".to_string(),
        media: card("card-0.56mm", "0.56mm white card", 0.56),
        layer_count: 2,
    }
    .into()
}
