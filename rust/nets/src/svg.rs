// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SVG cut sheets
//!
//! One file per sheet of each media, written to
//! `{output_dir}/media-{media}/page-{n}-cut.svg` with `n` counting from 1.
//! Layout y points up, SVG y points down: pieces are drawn with their local
//! y negated and placed with `translate(x,-y)`.

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::layout::{layout_panels, LayoutOptions, MediaLayout};
use crate::vertices::VertexLoop;
use papercraft_core::{flatten_panels, PanelGroup};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const POLYGONS_PLACEHOLDER: &str = "{{polygons}}";
pub const LABELS_PLACEHOLDER: &str = "{{labels}}";

/// Avoid printing `-0`
fn num(v: f64) -> f64 {
    v + 0.0
}

fn polygon(points: &VertexLoop) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(-p.y)))
        .collect();
    format!(
        "<polygon points=\"{}\" fill=\"none\" stroke=\"black\" />",
        coords.join(" ")
    )
}

/// Fill the template for one sheet of a layout
pub fn render_page(template: &str, layout: &MediaLayout, page: usize, include_layout_boxes: bool) -> String {
    let mut polygons = Vec::new();
    let mut labels = Vec::new();

    if include_layout_boxes {
        for slot in layout.boxes.iter().filter(|b| b.bin == page) {
            let r = slot.rect;
            polygons.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"transparent\" stroke-width=\"0.1\" stroke=\"#000\" />",
                num(r.x),
                num(-r.top()),
                r.width,
                r.height
            ));
        }
    }

    for (index, panel) in layout.panels.iter().enumerate() {
        if panel.bin_index != page {
            continue;
        }
        for ring in &panel.vertex_loops {
            let mut group = String::new();
            // Writing to a String cannot fail
            let _ = write!(
                group,
                "<g transform=\"translate({},{}) rotate({})\">{}</g>",
                num(panel.x),
                num(-panel.y),
                panel.rotation.degrees(),
                polygon(ring)
            );
            polygons.push(group);
        }
        labels.push(format!(
            "<text x=\"{}\" y=\"{}\">{}</text>",
            num(panel.x),
            num(-panel.y),
            index
        ));
        debug!(page, index, panel = %panel.name, "rendered panel");
    }

    template
        .replace(POLYGONS_PLACEHOLDER, &polygons.join("\n"))
        .replace(LABELS_PLACEHOLDER, &labels.join("\n"))
}

/// Path of one sheet's file
pub fn page_path(output_dir: &Path, media_name: &str, page: usize) -> PathBuf {
    output_dir
        .join(format!("media-{}", media_name))
        .join(format!("page-{}-cut.svg", page + 1))
}

/// Write every sheet of every layout
///
/// Nothing is written when any layout has unplaced pieces.
pub fn write_layouts(
    layouts: &[MediaLayout],
    template: &str,
    output_dir: &Path,
    include_layout_boxes: bool,
    max_bins: usize,
) -> Result<Vec<PathBuf>> {
    for layout in layouts {
        layout.ensure_complete(max_bins)?;
    }

    let mut written = Vec::new();
    for layout in layouts {
        for page in 0..layout.page_count() {
            let path = page_path(output_dir, &layout.media.name, page);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(Error::io(dir))?;
            }
            let svg = render_page(template, layout, page, include_layout_boxes);
            std::fs::write(&path, svg).map_err(Error::io(&path))?;
            written.push(path);
        }
    }
    Ok(written)
}

/// Lay out every panel of `group` and write the cut sheets under `output_dir`
pub fn export_svgs(group: &PanelGroup, output_dir: &Path, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    let panels = flatten_panels(group);
    let layouts = layout_panels(&panels, &LayoutOptions::from(config))?;

    let template = std::fs::read_to_string(&config.template_path)
        .map_err(Error::io(&config.template_path))?;

    let written = write_layouts(
        &layouts,
        &template,
        output_dir,
        config.include_layout_boxes,
        config.max_bins,
    )?;
    info!(
        group = %group.name,
        files = written.len(),
        dir = %output_dir.display(),
        "exported cut sheets"
    );
    Ok(written)
}
