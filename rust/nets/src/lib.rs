// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Papercraft Nets
//!
//! Flat cut sheets for a [`PanelGroup`](papercraft_core::PanelGroup) tree.
//!
//! ## Overview
//!
//! - **Vertices**: closed loops of each panel's top-down silhouette
//! - **Packing**: MaxRects placement of bounding boxes onto media sheets
//! - **Layout**: one packed layout per single-layer media, layered media
//!   expanded into copies
//! - **SVG**: one cut sheet per page from a template
//! - **glTF / XML**: the assembled model as a mesh and as a fixture dump
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use papercraft_core::{card_056mm, card_169mm};
//! use papercraft_core::recipes::basic_house;
//! use papercraft_nets::{export_model, ExportConfig};
//!
//! let house = basic_house(&card_169mm(), &card_056mm(), &card_056mm(), 120.0, 80.0, 50.0)?;
//! let summary = export_model(&house, &ExportConfig::new("out"))?;
//! println!("{} pages in {}", summary.pages.len(), summary.model_dir.display());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod gltf_export;
pub mod layout;
pub mod packing;
pub mod scene_xml;
pub mod svg;
pub mod vertices;

pub use config::{delete_output_dir, ExportConfig, DEFAULT_MAX_BINS, DEFAULT_PACK_MARGIN};
pub use error::{Error, Result};
pub use export::{export_model, ExportSummary};
pub use gltf_export::{export_mesh, gltf_document};
pub use layout::{
    compute_layout, layout_panels, layout_panels_by_media, single_layer_media_by_name,
    LayoutOptions, LayoutPanel, MediaLayout, MediaPanels, Rotation,
};
pub use packing::{pack, PackItem, PackResult, PackedRect, Rect};
pub use scene_xml::{compare_scene_xml, export_scene_xml, scene_xml, FixtureMismatch};
pub use svg::{export_svgs, page_path, render_page, write_layouts};
pub use vertices::{
    extract_loops, loops_from_path_strings, panel_vertex_loops, path_edges, BoundingMetrics,
    VertexLoop, VERTEX_EPSILON,
};
