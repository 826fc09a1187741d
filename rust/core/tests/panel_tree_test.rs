// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use papercraft_core::recipes::{basic_rect, wall, window, WindowParams};
use papercraft_core::{
    card_056mm, card_169mm, flatten, flatten_panels, flatten_world_shapes, Cutout, Media, Panel,
    PanelGroup, Transform,
};
use papercraft_geometry::{Point3, Solid, OVERLAY_TOLERANCE};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn media_c() -> Media {
    card_056mm()
}

#[test]
fn test_wall_end_to_end() {
    init_tracing();

    let group = PanelGroup::new("wall")
        .with_panel(Panel::new(
            "base_wall",
            card_169mm(),
            basic_rect(90.0, 50.0, 1.69).unwrap(),
        ))
        .with_panel(
            Panel::new("front_wall", card_056mm(), basic_rect(90.0, 50.0, 0.56).unwrap())
                .with_transform(Transform::translation(0.0, 0.0, 1.69)),
        )
        .with_panel(
            Panel::new("back_wall", media_c(), basic_rect(90.0, 50.0, 0.56).unwrap())
                .with_transform(Transform::translation(0.0, 0.0, -0.56)),
        );

    let flat = flatten(&group);
    let names: Vec<&str> = flat.iter().map(|e| e.panel.name.as_str()).collect();
    assert_eq!(names, ["wall_p0_base_wall", "wall_p1_front_wall", "wall_p2_back_wall"]);

    let z_ranges = [(0.0, 1.69), (1.69, 2.25), (-0.56, 0.0)];
    for (entry, (z_min, z_max)) in flat.iter().zip(z_ranges) {
        let (min, max) = entry.world_shape.bounds().unwrap();
        assert_relative_eq!(max.x - min.x, 90.0, epsilon = 1e-9);
        assert_relative_eq!(max.y - min.y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(min.z, z_min, epsilon = 1e-9);
        assert_relative_eq!(max.z, z_max, epsilon = 1e-9);
    }

    // The recipe builds the same tree
    let recipe = wall(&card_169mm(), &card_056mm(), &media_c(), Transform::identity()).unwrap();
    assert_eq!(recipe, group);
}

#[test]
fn test_reflatten_after_attach_sees_the_cut() {
    init_tracing();

    let card = card_056mm();
    let mut group = wall(&card_169mm(), &card, &card, Transform::identity()).unwrap();
    let before = flatten_world_shapes(&group);

    let report = group.attach(
        window(
            &card_169mm(),
            &card,
            &WindowParams::new(14.0, 20.0),
            Transform::translation(20.0, 0.0, 0.0),
        )
        .unwrap(),
    );
    assert!(report.is_complete());

    // Wall panels first, then the window's frame and sill
    let after = flatten(&group);
    assert_eq!(after.len(), 5);
    assert_eq!(after[3].panel.name, "wall_c0_window_p0_frame");

    for (old, new) in before.iter().zip(&after) {
        assert!(new.world_shape.volume() < old.volume());
        assert_eq!(new.world_shape.project_top().paths().len(), 2);
    }
}

// ============================================================================
// Property tests
// ============================================================================

fn panels(count: usize) -> Vec<Panel> {
    (0..count)
        .map(|i| {
            Panel::new(
                format!("panel{}", i),
                card_169mm(),
                Solid::cuboid(1.0, 1.0, 1.0).unwrap(),
            )
        })
        .collect()
}

fn group_strategy() -> impl Strategy<Value = PanelGroup> {
    let leaf = (0usize..4).prop_map(|n| {
        panels(n)
            .into_iter()
            .fold(PanelGroup::new("leaf"), PanelGroup::with_panel)
    });

    leaf.prop_recursive(3, 32, 4, |inner| {
        (0usize..4, prop::collection::vec(inner, 0..4), -50.0..50.0f64).prop_map(
            |(n, children, offset)| {
                let mut group = panels(n)
                    .into_iter()
                    .fold(PanelGroup::new("group"), PanelGroup::with_panel)
                    .with_transform(Transform::translation(offset, 0.0, offset));
                for (i, mut child) in children.into_iter().enumerate() {
                    child.name = format!("child{}", i);
                    group = group.with_child(child);
                }
                group
            },
        )
    })
}

/// Give every panel a distinct width, in flattening order
fn number_panels(group: &mut PanelGroup, next: &mut usize) {
    for panel in &mut group.panels {
        *next += 1;
        panel.shape = Solid::cuboid(*next as f64, 1.0, 1.0).unwrap();
    }
    for child in &mut group.children {
        number_panels(child, next);
    }
}

fn motion_strategy() -> impl Strategy<Value = Transform> {
    let op = prop_oneof![
        (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64)
            .prop_map(|(x, y, z)| Transform::translation(x, y, z)),
        (0usize..3, -360.0..360.0f64).prop_map(|(axis, degrees)| {
            let mut end = [0.0; 3];
            end[axis] = 1.0;
            Transform::rotation(
                Point3::new(1.0, 2.0, 3.0),
                Point3::new(1.0 + end[0], 2.0 + end[1], 3.0 + end[2]),
                degrees,
            )
            .unwrap()
        }),
    ];
    prop::collection::vec(op, 0..5)
        .prop_map(|ops| ops.iter().fold(Transform::identity(), |acc, t| acc.then(t)))
}

proptest! {
    #[test]
    fn prop_transform_round_trip(transform in motion_strategy()) {
        let shape = basic_rect(10.0, 6.0, 2.0).unwrap();
        let back = transform.reverse_apply(&transform.apply(&shape));

        let (min_a, max_a) = shape.bounds().unwrap();
        let (min_b, max_b) = back.bounds().unwrap();
        prop_assert!((min_a - min_b).norm() < 1e-6);
        prop_assert!((max_a - max_b).norm() < 1e-6);
    }

    #[test]
    fn prop_flattening_lines_up(mut group in group_strategy()) {
        let mut count = 0;
        number_panels(&mut group, &mut count);

        let names = flatten_panels(&group);
        let shapes = flatten_world_shapes(&group);
        prop_assert_eq!(names.len(), count);
        prop_assert_eq!(shapes.len(), count);

        for (i, shape) in shapes.iter().enumerate() {
            let (min, max) = shape.bounds().unwrap();
            prop_assert!(((max.x - min.x) - (i + 1) as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_flattened_names_are_unique(group in group_strategy()) {
        let names = flatten_panels(&group);
        let unique: FxHashSet<&str> = names.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn prop_cutout_never_grows_panel(x in -80.0..80.0f64, y in -40.0..40.0f64, size in 1.0..30.0f64) {
        let mut group = PanelGroup::new("wall").with_panel(Panel::new(
            "base_wall",
            card_169mm(),
            basic_rect(90.0, 50.0, 1.69).unwrap(),
        ));
        let before = group.panels[0].shape.volume();

        group.attach(
            PanelGroup::new("hole")
                .with_cutout(Cutout::new(
                    Solid::cuboid(size, size, 100.0).unwrap(),
                    ["base_wall"],
                ))
                .with_transform(Transform::translation(x, y, 0.0)),
        );

        let after = group.panels[0].shape.volume();
        // Cut edges may shift by the overlay grid along their whole length
        let slack = 2.0 * (90.0 + 50.0 + 2.0 * size) * OVERLAY_TOLERANCE * 1.69;
        prop_assert!(after <= before + slack);
        prop_assert!(after >= before - size * size * 1.69 - slack);
    }
}
