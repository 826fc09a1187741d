// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Papercraft Core
//!
//! Panel hierarchy for card-model buildings: every part of a building is a
//! [`Panel`] of some [`Media`] (a card stock), placed by a [`Transform`] and
//! grouped into nested [`PanelGroup`]s.
//!
//! ## Overview
//!
//! - **Transforms**: ordered translate/rotate sequences with exact reversal
//! - **Media**: single and layered card stocks with their sheet sizes
//! - **Cutouts**: child groups carve openings into their parent's panels
//! - **Flattening**: uniquely named panels with world-space shapes
//! - **Recipes**: walls, windows, doors, floors and a box house
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use papercraft_core::recipes::{wall, window, WindowParams};
//! use papercraft_core::{card_056mm, card_169mm, flatten, Transform};
//!
//! let base = card_169mm();
//! let card = card_056mm();
//! let mut wall = wall(&base, &card, &card, Transform::identity())?;
//!
//! // Attaching resolves the window's cutouts against the wall panels
//! let window = window(&base, &card, &WindowParams::new(14.0, 20.0), Transform::translation(-20.0, 0.0, 0.0))?;
//! wall.attach(window).ensure_complete()?;
//!
//! for entry in flatten(&wall) {
//!     println!("{}: {:?}", entry.panel.name, entry.world_shape.bounds());
//! }
//! ```

pub mod cutouts;
pub mod error;
pub mod flatten;
pub mod media;
pub mod panel;
pub mod recipes;
pub mod transform;

pub use cutouts::{CutoutReport, MissingTarget};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_panels, flatten_world_shapes, FlattenedPanel};
pub use media::{
    card_056mm, card_169mm, card_2x056mm, card_2x169mm, LayeredMedia, Media, SingleLayerMedia,
};
pub use panel::{Cutout, Panel, PanelGroup};
pub use transform::{Transform, TransformOp};
