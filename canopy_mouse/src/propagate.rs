// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broadcasting a pointer event to everything under the pointer.

use canopy_collision::{EntityId, Tree};

use crate::event::MouseEvent;
use crate::host::EventTrigger;

/// Owners of every space under the pointer, in the tree's query order.
///
/// An owner appears once per hit space. Spaces owned by [`EntityId::NONE`]
/// are skipped.
pub fn owners_under(tree: &Tree, event: &MouseEvent) -> Vec<EntityId> {
    let mut owners = Vec::new();
    tree.visit_intersect(event.to_space().bounds, |_, space| {
        if space.cid != EntityId::NONE {
            owners.push(space.cid);
        }
    });
    owners
}

/// Fire `event_name` on each of `owners`. Returns the number of triggers fired.
///
/// Takes no tree, so handlers are free to mutate the tree the owners were
/// collected from.
pub fn fire<B: EventTrigger + ?Sized>(
    bus: &mut B,
    event_name: &str,
    event: &MouseEvent,
    owners: &[EntityId],
) -> usize {
    for &cid in owners {
        bus.trigger(cid, event_name, event);
    }
    log::trace!(
        "propagated {event_name} at {:?} to {} owners",
        event.position,
        owners.len()
    );
    owners.len()
}

/// Fire `event_name` on the owner of every space under the pointer.
///
/// The hits are collected before the first trigger. See [`owners_under`]
/// for order and skipping. Returns the number of triggers fired.
pub fn propagate<B: EventTrigger + ?Sized>(
    tree: &Tree,
    bus: &mut B,
    event_name: &str,
    event: &MouseEvent,
) -> usize {
    let owners = owners_under(tree, event);
    fire(bus, event_name, event, &owners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, Button};
    use canopy_collision::Space;

    #[derive(Default)]
    struct Recorder(Vec<(EntityId, String)>);

    impl EventTrigger for Recorder {
        fn trigger(&mut self, cid: EntityId, event: &str, _payload: &MouseEvent) {
            self.0.push((cid, event.to_owned()));
        }
    }

    #[test]
    fn every_owner_under_the_pointer_is_triggered() {
        let mut tree = Tree::new();
        tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, EntityId(1)));
        tree.insert(Space::new(5.0, 5.0, 10.0, 10.0, EntityId(2)));
        tree.insert(Space::new(50.0, 50.0, 10.0, 10.0, EntityId(3)));
        tree.insert(Space::unassigned(0.0, 0.0, 20.0, 20.0));

        let mut bus = Recorder::default();
        let ev = MouseEvent::new(7.0, 7.0, Button::Left, Action::Press);
        let n = propagate(&tree, &mut bus, "MousePressOn", &ev);

        assert_eq!(n, 2);
        let mut owners: Vec<_> = bus.0.iter().map(|(cid, _)| *cid).collect();
        owners.sort();
        assert_eq!(owners, vec![EntityId(1), EntityId(2)]);
        assert!(bus.0.iter().all(|(_, name)| name == "MousePressOn"));
    }

    #[test]
    fn nothing_under_the_pointer_fires_nothing() {
        let mut tree = Tree::new();
        tree.insert(Space::new(0.0, 0.0, 1.0, 1.0, EntityId(1)));
        let mut bus = Recorder::default();
        let ev = MouseEvent::new(9.0, 9.0, Button::None, Action::Move);
        assert_eq!(propagate(&tree, &mut bus, "MouseMoveOn", &ev), 0);
        assert!(bus.0.is_empty());
    }

    #[test]
    fn owners_are_collected_once_per_space() {
        let mut tree = Tree::new();
        tree.insert(Space::new(0.0, 0.0, 4.0, 4.0, EntityId(1)));
        tree.insert(Space::new(1.0, 1.0, 4.0, 4.0, EntityId(1)));
        let ev = MouseEvent::new(2.0, 2.0, Button::None, Action::Move);
        let owners = owners_under(&tree, &ev);
        assert_eq!(owners, vec![EntityId(1), EntityId(1)]);

        let mut bus = Recorder::default();
        assert_eq!(fire(&mut bus, "MouseMoveOn", &ev, &owners), 2);
    }

    #[test]
    fn edges_count_as_under_the_pointer() {
        let mut tree = Tree::new();
        tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, EntityId(4)));
        let mut bus = Recorder::default();
        let ev = MouseEvent::new(10.0, 10.0, Button::Right, Action::Release);
        assert_eq!(propagate(&tree, &mut bus, "MouseReleaseOn", &ev), 1);
    }
}
