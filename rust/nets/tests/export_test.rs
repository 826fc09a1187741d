// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use papercraft_core::recipes::{basic_house, wall, window, WindowParams};
use papercraft_core::{card_056mm, card_169mm, card_2x169mm, Panel, PanelGroup, Transform};
use papercraft_geometry::{create_rectangle, Point2, Solid, Vector3, OVERLAY_TOLERANCE};
use papercraft_nets::{
    compare_scene_xml, compute_layout, export_model, export_svgs, layout_panels,
    layout_panels_by_media, panel_vertex_loops, scene_xml, BoundingMetrics, Error, ExportConfig,
    LayoutOptions, LayoutPanel, Rotation, VERTEX_EPSILON,
};
use proptest::prelude::*;
use std::path::Path;

const TEMPLATE: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n{{polygons}}\n{{labels}}\n</svg>\n";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(dir: &Path) -> ExportConfig {
    let template = dir.join("page.svg.template");
    std::fs::write(&template, TEMPLATE).unwrap();
    ExportConfig::new(dir.join("out")).with_template(template)
}

fn house() -> PanelGroup {
    basic_house(&card_169mm(), &card_056mm(), &card_056mm(), 120.0, 80.0, 50.0).unwrap()
}

#[test]
fn test_plain_rectangle_loop() {
    let loops = panel_vertex_loops(&Solid::cuboid(10.0, 6.0, 2.0).unwrap()).unwrap();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].len(), 4);

    let metrics = BoundingMetrics::from_loops(&loops).unwrap();
    assert_relative_eq!(metrics.width, 10.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.height, 6.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.center_offset_x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.center_offset_y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_rectangle_with_hole_loops() {
    let mut profile = create_rectangle(10.0, 6.0);
    let mut hole = create_rectangle(2.0, 2.0).outer;
    hole.reverse();
    profile.add_hole(hole);

    let loops = panel_vertex_loops(&Solid::extrude(profile, 2.0).unwrap()).unwrap();
    assert_eq!(loops.len(), 2);
    assert!(loops.iter().all(|l| l.len() == 4));
}

#[test]
fn test_window_opening_shows_in_silhouette() {
    let base = card_169mm();
    let card = card_056mm();
    let mut group = wall(&base, &card, &card, Transform::identity()).unwrap();
    group
        .attach(window(&base, &card, &WindowParams::new(14.0, 20.0), Transform::identity()).unwrap())
        .ensure_complete()
        .unwrap();

    let loops = panel_vertex_loops(&group.panels[0].shape).unwrap();
    assert_eq!(loops.len(), 2);
    let opening = loops
        .iter()
        .filter_map(|l| BoundingMetrics::from_loops(std::slice::from_ref(l)))
        .find(|m| m.width < 90.0)
        .unwrap();
    assert_relative_eq!(opening.width, 16.0, epsilon = 1e-6);
    assert_relative_eq!(opening.height, 22.0, epsilon = 1e-6);
}

#[test]
fn test_layered_media_expands_per_layer() {
    let panels = [Panel::new(
        "base",
        card_2x169mm(),
        Solid::cuboid(40.0, 30.0, 3.38).unwrap(),
    )];

    let groups = layout_panels_by_media(&panels).unwrap();
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].panels.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["base_0", "base_1"]);

    let layouts = layout_panels(&panels, &LayoutOptions::default()).unwrap();
    let (a, b) = (&layouts[0].panels[0], &layouts[0].panels[1]);
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert!((a.x, a.y) != (b.x, b.y));
}

#[test]
fn test_house_export() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let summary = export_model(&house(), &config).unwrap();
    assert_eq!(summary.model_dir, dir.path().join("out").join("house"));
    assert!(summary.mesh.is_file());
    assert!(summary.scene.is_file());

    let first = summary.model_dir.join("media-card-1.69mm").join("page-1-cut.svg");
    assert!(summary.pages.contains(&first));
    assert!(summary.model_dir.join("media-card-0.56mm").join("page-1-cut.svg").is_file());

    // One label per cut piece: floor base plus four base walls on 1.69mm,
    // lining plus eight facings on 0.56mm
    let labels: usize = summary
        .pages
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap().matches("<text").count())
        .sum();
    assert_eq!(labels, 14);

    let svg = std::fs::read_to_string(&first).unwrap();
    assert!(svg.starts_with("<svg xmlns"));
    assert!(!svg.contains("{{polygons}}"));
}

#[test]
fn test_export_clears_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let stale = config.output_dir_for_model("house").join("media-old");
    std::fs::create_dir_all(&stale).unwrap();

    export_model(&house(), &config).unwrap();
    assert!(!stale.exists());
}

#[test]
fn test_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::new(dir.path()).with_template(dir.path().join("missing.svg"));

    let result = export_svgs(&house(), dir.path(), &config);
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_scene_dump_is_reproducible() {
    let date = chrono::Utc::now();
    let expected = scene_xml(&house(), date);
    assert_eq!(compare_scene_xml(&scene_xml(&house(), date), &expected), Ok(()));
}

#[test]
fn test_multi_body_silhouette_closes() {
    // Pocket splits the panel into two slabs, then an off-grid through-cut
    // goes through both: every corner passes through the overlay grid
    let pocket = Solid::cuboid(20.0, 10.0, 1.0)
        .unwrap()
        .translated(Vector3::new(-25.0, 10.0, 0.845));
    let side = 26.907;
    let (hx, hy) = (9.303, 4.010);
    let through = Solid::cuboid(side, side, 100.0)
        .unwrap()
        .translated(Vector3::new(hx, hy, 0.0));
    let shape = Solid::cuboid(90.0, 50.0, 1.69)
        .unwrap()
        .difference(&pocket)
        .difference(&through);
    assert_eq!(shape.bodies().len(), 2);

    // Endpoints of one projection chain within VERTEX_EPSILON
    let loops = panel_vertex_loops(&shape).unwrap();
    assert_eq!(loops.len(), 2);
    assert!(VERTEX_EPSILON < OVERLAY_TOLERANCE);

    let metrics = BoundingMetrics::from_loops(&loops).unwrap();
    assert_relative_eq!(metrics.width, 90.0, epsilon = OVERLAY_TOLERANCE);
    assert_relative_eq!(metrics.height, 50.0, epsilon = OVERLAY_TOLERANCE);

    let hole = loops
        .iter()
        .filter_map(|l| BoundingMetrics::from_loops(std::slice::from_ref(l)))
        .find(|m| m.width < 90.0)
        .unwrap();
    assert_relative_eq!(hole.width, side, epsilon = 2.0 * OVERLAY_TOLERANCE);
    assert_relative_eq!(hole.center_offset_x, hx, epsilon = OVERLAY_TOLERANCE);
    assert_relative_eq!(hole.center_offset_y, hy, epsilon = OVERLAY_TOLERANCE);
}

/// Off-centre L-shaped silhouettes: (width, height, dx, dy)
fn pieces() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec(
        (2.0..100.0f64, 2.0..100.0f64, -60.0..60.0f64, -60.0..60.0f64),
        1..30,
    )
}

fn l_shape(w: f64, h: f64, dx: f64, dy: f64) -> Solid {
    let points = [
        Point2::new(dx, dy),
        Point2::new(dx + w, dy),
        Point2::new(dx + w, dy + 0.4 * h),
        Point2::new(dx + 0.5 * w, dy + 0.4 * h),
        Point2::new(dx + 0.5 * w, dy + h),
        Point2::new(dx, dy + h),
    ];
    Solid::polygon(&points, 1.0).unwrap()
}

/// Where a local silhouette point lands on the sheet
fn to_sheet(p: &LayoutPanel, u: f64, v: f64) -> (f64, f64) {
    match p.rotation {
        Rotation::None => (p.x + u, p.y + v),
        Rotation::Quarter => (p.x + v, p.y - u),
    }
}

proptest! {
    #[test]
    fn prop_layout_never_overlaps(shapes in pieces()) {
        let panels: Vec<LayoutPanel> = shapes
            .iter()
            .enumerate()
            .map(|(i, (w, h, dx, dy))| {
                let loops = panel_vertex_loops(&l_shape(*w, *h, *dx, *dy)).unwrap();
                LayoutPanel::new(format!("p{}", i), loops).unwrap()
            })
            .collect();
        let options = LayoutOptions::default();
        let layout = compute_layout(card_056mm().sheet().clone(), panels, &options);
        prop_assert!(layout.is_complete());

        // Every placed vertex stays inside its own slot, clear of the margin
        let m = options.margin;
        let eps = 1e-6;
        for slot in &layout.boxes {
            let piece = &layout.panels[slot.id];
            prop_assert_eq!(piece.bin_index, slot.bin);
            let r = slot.rect;
            for point in piece.vertex_loops.iter().flatten() {
                let (x, y) = to_sheet(piece, point.x, point.y);
                prop_assert!(
                    x >= r.x + m - eps && x <= r.x + r.width - m + eps,
                    "{} x {} outside slot {:?}", piece.name, x, r
                );
                prop_assert!(
                    y >= r.y + m - eps && y <= r.y + r.height - m + eps,
                    "{} y {} outside slot {:?}", piece.name, y, r
                );
            }
        }

        for (i, a) in layout.boxes.iter().enumerate() {
            for b in &layout.boxes[i + 1..] {
                if a.bin == b.bin {
                    prop_assert!(!a.rect.overlaps(&b.rect), "slot {} overlaps {}", a.id, b.id);
                }
            }
        }
    }
}
