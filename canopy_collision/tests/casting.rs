// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Casting against a tree under movement churn, the way a game tick drives it.

use canopy_collision::{Aabb2D, EntityId, Label, RTreeConfig, SharedTree, Space, SpaceId, Tree};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn casts_follow_moving_spaces() {
    init_logging();
    let mut tree = Tree::with_config(RTreeConfig::new(2, 4).unwrap());
    let mut movers: Vec<SpaceId> = Vec::new();
    for i in 0..40_u32 {
        let y = f64::from(i) * 3.0;
        movers.push(tree.insert(Space::labeled(
            50.0,
            y,
            1.0,
            1.0,
            EntityId(u64::from(i) + 1),
            Label(1),
        )));
    }

    // Slide every mover left one unit per tick; a ray along y = 0.5 keeps
    // hitting mover 0 at its current x.
    for tick in 0..30_u32 {
        for &id in &movers {
            assert!(tree.shift(id, -1.0, 0.0));
        }
        let x = 49.0 - f64::from(tick);
        let hit = tree
            .ray_cast_single_labels(0.0, 0.5, 0.0, 100.0, &[Label(1)])
            .expect("mover 0 is on the ray");
        assert_eq!(hit.id, movers[0]);
        assert_eq!(hit.pixel(), (x as i64, 1));
    }
}

#[test]
fn cast_all_reports_each_space_once() {
    let mut tree = Tree::new();
    let wide = tree.insert(Space::new(0.0, -5.0, 100.0, 10.0, EntityId(1)));
    let ids: Vec<SpaceId> = (0..10_u32)
        .map(|i| tree.insert(Space::new(f64::from(i) * 10.0 + 5.0, -1.0, 2.0, 2.0, EntityId(2))))
        .collect();
    let hits = tree.ray_cast(0.0, 0.0, 0.0, 100.0);
    assert_eq!(hits.len(), 11);
    assert_eq!(hits[0].id, wide);
    let rest: Vec<SpaceId> = hits[1..].iter().map(|h| h.id).collect();
    assert_eq!(rest, ids);
}

#[test]
fn scene_reset_under_shared_lock() {
    let shared = SharedTree::new(Tree::new());
    for i in 0..10_u32 {
        shared.insert(Space::new(f64::from(i), 0.0, 1.0, 1.0, EntityId(1)));
    }
    assert!(shared.read().ray_cast_single(0.5, 0.5, 0.0, 20.0, &[]).is_some());
    shared.clear();
    assert!(shared.read().ray_cast(0.5, 0.5, 0.0, 20.0).is_empty());
    assert!(
        shared
            .search_intersect(Aabb2D::new(-1e9, -1e9, 1e9, 1e9))
            .is_empty()
    );
}
