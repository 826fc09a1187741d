// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-model export: cut sheets, mesh and scene dump in one directory

use crate::config::{delete_output_dir, ExportConfig};
use crate::error::Result;
use crate::gltf_export::export_mesh;
use crate::scene_xml::export_scene_xml;
use crate::svg::export_svgs;
use papercraft_core::PanelGroup;
use std::path::PathBuf;
use tracing::info;

/// Files written by [`export_model`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub model_dir: PathBuf,
    pub pages: Vec<PathBuf>,
    pub mesh: PathBuf,
    pub scene: PathBuf,
}

/// Export `group` under `{output_dir}/{group name}`
///
/// The model directory is cleared first. Cut sheets are written before the
/// mesh, so a layout overflow leaves the directory empty.
pub fn export_model(group: &PanelGroup, config: &ExportConfig) -> Result<ExportSummary> {
    let model_dir = config.output_dir_for_model(&group.name);
    delete_output_dir(&model_dir)?;

    let pages = export_svgs(group, &model_dir, config)?;
    let mesh = export_mesh(group, &model_dir)?;
    let scene = export_scene_xml(group, &model_dir)?;

    info!(
        model = %group.name,
        pages = pages.len(),
        dir = %model_dir.display(),
        "exported model"
    );
    Ok(ExportSummary {
        model_dir,
        pages,
        mesh,
        scene,
    })
}
