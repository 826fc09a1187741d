// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic XML dump of a panel tree
//!
//! The dump has three sections: `<info>` (date and schema version),
//! `<label>` (the group hierarchy with panel names and media) and `<shapes>`
//! (every flattened panel's world bodies). Fixtures are compared section by
//! section with the info date ignored.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use nalgebra::Point2;
use papercraft_core::{flatten, PanelGroup};
use papercraft_geometry::Prism;
use regex::Regex;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SCHEMA_VERSION: u32 = 1;
pub const SCENE_FILE_NAME: &str = "scene.xml";

/// Decimal places of every coordinate in the dump
const DECIMALS: usize = 4;
/// Lines of context kept in a mismatch report
const MAX_DIFF_LINES: usize = 20;

/// Where a scene dump differs from its fixture
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FixtureMismatch {
    #[error("label section differs:\n{diff}")]
    Label { diff: String },

    #[error("shapes section differs:\n{diff}")]
    Shapes { diff: String },
}

fn fixed(v: f64) -> String {
    let scale = 10f64.powi(DECIMALS as i32);
    // Adding 0.0 turns -0.0 into 0.0
    format!("{:.*}", DECIMALS, (v * scale).round() / scale + 0.0)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn points(ring: &[Point2<f64>]) -> String {
    ring.iter()
        .map(|p| format!("{},{}", fixed(p.x), fixed(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the dump of `group`, stamped with `date`
pub fn scene_xml(group: &PanelGroup, date: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<scene>\n");
    out.push_str(&format!(
        "  <info date=\"{}\" schemaversion=\"{}\" generator=\"papercraft-nets\"/>\n",
        date.to_rfc3339_opts(SecondsFormat::Secs, true),
        SCHEMA_VERSION
    ));

    out.push_str("  <label>\n");
    write_label(&mut out, group, 2);
    out.push_str("  </label>\n");

    out.push_str("  <shapes>\n");
    write_shapes(&mut out, group);
    out.push_str("  </shapes>\n</scene>\n");
    out
}

fn write_label(out: &mut String, group: &PanelGroup, depth: usize) {
    let pad = "  ".repeat(depth);
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{}<group name=\"{}\" panels=\"{}\" cutouts=\"{}\" children=\"{}\">",
        pad,
        escape(&group.name),
        group.panels.len(),
        group.cutouts.len(),
        group.children.len()
    );
    for panel in &group.panels {
        let _ = writeln!(
            out,
            "{}  <panel name=\"{}\" media=\"{}\" layers=\"{}\" thickness=\"{}\"/>",
            pad,
            escape(&panel.name),
            escape(&panel.media.sheet().name),
            panel.media.layer_count(),
            fixed(panel.media.thickness())
        );
    }
    for cutout in &group.cutouts {
        let _ = writeln!(
            out,
            "{}  <cutout targets=\"{}\"/>",
            pad,
            escape(&cutout.subtract_from.join(" "))
        );
    }
    for child in &group.children {
        write_label(out, child, depth + 1);
    }
    let _ = writeln!(out, "{}</group>", pad);
}

fn write_shapes(out: &mut String, group: &PanelGroup) {
    for entry in flatten(group) {
        let shape = &entry.world_shape;
        let z_range = shape
            .bounds()
            .map(|(min, max)| format!(" zmin=\"{}\" zmax=\"{}\"", fixed(min.z), fixed(max.z)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "    <panel name=\"{}\" bodies=\"{}\"{}>",
            escape(&entry.panel.name),
            shape.bodies().len(),
            z_range
        );
        for body in shape.bodies() {
            write_body(out, body);
        }
        out.push_str("    </panel>\n");
    }
}

fn write_body(out: &mut String, body: &Prism) {
    let t = body.placement.translation.vector;
    let q = body.placement.rotation.quaternion();
    let _ = writeln!(
        out,
        "      <body zmin=\"{}\" zmax=\"{}\" translation=\"{} {} {}\" rotation=\"{} {} {} {}\">",
        fixed(body.z_min),
        fixed(body.z_max),
        fixed(t.x),
        fixed(t.y),
        fixed(t.z),
        fixed(q.w),
        fixed(q.i),
        fixed(q.j),
        fixed(q.k)
    );
    let _ = writeln!(out, "        <outer points=\"{}\"/>", points(&body.profile.outer));
    for hole in &body.profile.holes {
        let _ = writeln!(out, "        <hole points=\"{}\"/>", points(hole));
    }
    out.push_str("      </body>\n");
}

/// Write `{output_dir}/scene.xml` stamped with the current time
pub fn export_scene_xml(group: &PanelGroup, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(Error::io(output_dir))?;
    let path = output_dir.join(SCENE_FILE_NAME);
    std::fs::write(&path, scene_xml(group, Utc::now())).map_err(Error::io(&path))?;
    info!(group = %group.name, path = %path.display(), "exported scene dump");
    Ok(path)
}

fn normalize(xml: &str) -> String {
    // The pattern is a literal and always valid
    match Regex::new(r#"<info date="[^"]*""#) {
        Ok(re) => re.replace_all(xml, r#"<info date="""#).into_owned(),
        Err(_) => xml.to_string(),
    }
}

/// Text between `open` and `close`, empty when the section is missing
fn section<'a>(xml: &'a str, open: &str, close: &str) -> &'a str {
    let Some(start) = xml.find(open) else {
        return "";
    };
    let body = &xml[start + open.len()..];
    match body.find(close) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Lines that differ, position by position
fn line_diff(expected: &str, actual: &str) -> String {
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();

    let mut report = Vec::new();
    for i in 0..expected.len().max(actual.len()) {
        let (e, a) = (expected.get(i), actual.get(i));
        if e == a {
            continue;
        }
        report.push(format!("@@ line {}", i + 1));
        if let Some(e) = e {
            report.push(format!("- {}", e.trim()));
        }
        if let Some(a) = a {
            report.push(format!("+ {}", a.trim()));
        }
        if report.len() >= MAX_DIFF_LINES {
            report.push("...".to_string());
            break;
        }
    }
    report.join("\n")
}

/// Compare a dump against a fixture, ignoring the info date
///
/// The label section is checked first, so a renamed panel reports
/// [`FixtureMismatch::Label`] even when its geometry moved too.
pub fn compare_scene_xml(actual: &str, expected: &str) -> std::result::Result<(), FixtureMismatch> {
    let actual = normalize(actual);
    let expected = normalize(expected);

    let (a, e) = (
        section(&actual, "<label>", "</label>"),
        section(&expected, "<label>", "</label>"),
    );
    if a != e {
        return Err(FixtureMismatch::Label { diff: line_diff(e, a) });
    }

    let (a, e) = (
        section(&actual, "<shapes>", "</shapes>"),
        section(&expected, "<shapes>", "</shapes>"),
    );
    if a != e {
        return Err(FixtureMismatch::Shapes { diff: line_diff(e, a) });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use papercraft_core::recipes::wall;
    use papercraft_core::{card_056mm, card_169mm, Transform};

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    fn wall_group() -> PanelGroup {
        wall(&card_169mm(), &card_056mm(), &card_056mm(), Transform::identity()).unwrap()
    }

    #[test]
    fn test_fixed_decimals() {
        assert_eq!(fixed(1.0), "1.0000");
        assert_eq!(fixed(-0.00001), "0.0000");
        assert_eq!(fixed(-2.5), "-2.5000");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_dump_sections() {
        let xml = scene_xml(&wall_group(), date(1));

        assert!(xml.contains("<info date=\"2024-05-01T12:00:00Z\" schemaversion=\"1\""));
        assert!(xml.contains("<group name=\"wall\" panels=\"3\" cutouts=\"0\" children=\"0\">"));
        assert!(xml.contains(
            "<panel name=\"base_wall\" media=\"card-1.69mm\" layers=\"1\" thickness=\"1.6900\"/>"
        ));
        assert!(xml.contains("<panel name=\"wall_p1_front_wall\" bodies=\"1\" zmin=\"1.6900\" zmax=\"2.2500\">"));
        assert!(xml.contains("<outer points=\"-45.0000,-25.0000 45.0000,-25.0000"));
        assert_eq!(xml.matches("<body ").count(), 3);
    }

    #[test]
    fn test_date_is_ignored() {
        let group = wall_group();
        let result = compare_scene_xml(&scene_xml(&group, date(2)), &scene_xml(&group, date(3)));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_renamed_panel_is_a_label_mismatch() {
        let expected = scene_xml(&wall_group(), date(1));
        let mut group = wall_group();
        group.panels[0].name = "renamed".to_string();

        let result = compare_scene_xml(&scene_xml(&group, date(1)), &expected);
        match result {
            Err(FixtureMismatch::Label { diff }) => {
                assert!(diff.contains("- <panel name=\"base_wall\""));
                assert!(diff.contains("+ <panel name=\"renamed\""));
            }
            other => panic!("expected label mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_moved_panel_is_a_shapes_mismatch() {
        let expected = scene_xml(&wall_group(), date(1));
        let group = wall_group().with_transform(Transform::translation(0.0, 0.0, 5.0));

        let result = compare_scene_xml(&scene_xml(&group, date(1)), &expected);
        assert!(matches!(result, Err(FixtureMismatch::Shapes { .. })));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_scene_xml(&wall_group(), dir.path()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(compare_scene_xml(&text, &scene_xml(&wall_group(), date(1))), Ok(()));
    }
}
