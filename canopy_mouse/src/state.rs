// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-scene pointer state and hover tracking.

use canopy_collision::{EntityId, SpaceId, Tree};
use thiserror::Error;

use crate::event::MouseEvent;
use crate::host::{EntityHost, EntityLookup, EventTrigger};
use crate::phase::Transition;
use crate::propagate::propagate;

/// Why an entity could not be registered for hover tracking.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    /// The space id does not resolve in the tree.
    #[error("space is not in the collision tree")]
    UnknownSpace,
    /// The space's owner is not a live entity.
    #[error("entity {cid:?} does not exist")]
    UnknownEntity {
        /// Owner of the space.
        cid: EntityId,
    },
    /// The owner has no [`CollisionPhase`](crate::CollisionPhase).
    #[error("entity {cid:?} does not support collision phase tracking")]
    Unsupported {
        /// Owner of the space.
        cid: EntityId,
    },
}

/// Pointer state owned by one scene.
///
/// Holds the last pointer event seen and the set of entities whose hover
/// state is checked every frame. Nothing here is global, so scenes can run
/// side by side.
#[derive(Clone, Debug, Default)]
pub struct MouseState {
    last: Option<MouseEvent>,
    tracked: Vec<EntityId>,
}

impl MouseState {
    /// Empty state: no pointer event yet, nothing tracked.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent pointer event.
    pub fn last_event(&self) -> Option<MouseEvent> {
        self.last
    }

    /// Remember `event` as the current pointer state.
    pub fn record(&mut self, event: MouseEvent) {
        self.last = Some(event);
    }

    /// Record `event` and [`propagate`] it under `event_name`.
    pub fn dispatch<B: EventTrigger + ?Sized>(
        &mut self,
        tree: &Tree,
        bus: &mut B,
        event_name: &str,
        event: MouseEvent,
    ) -> usize {
        self.record(event);
        propagate(tree, bus, event_name, &event)
    }

    /// Track hover state for the owner of `space`.
    ///
    /// The owner's [`CollisionPhase`](crate::CollisionPhase) is pointed at
    /// `space`; from the next [`enter_frame`](Self::enter_frame) on it fires
    /// start and stop events as the pointer crosses the space. Registering an
    /// entity again retargets it without duplicating it.
    pub fn phase_collision<L: EntityLookup + ?Sized>(
        &mut self,
        space: SpaceId,
        tree: &Tree,
        host: &mut L,
    ) -> Result<(), PhaseError> {
        let cid = tree.get(space).ok_or(PhaseError::UnknownSpace)?.cid;
        self.register(space, cid, host)
    }

    /// Track hover state for `cid` on `space`, with the owner already looked up.
    ///
    /// Lets callers release their hold on the tree before `host` is consulted.
    pub fn register<L: EntityLookup + ?Sized>(
        &mut self,
        space: SpaceId,
        cid: EntityId,
        host: &mut L,
    ) -> Result<(), PhaseError> {
        let entity = host
            .resolve(cid)
            .ok_or(PhaseError::UnknownEntity { cid })?;
        let Some(phase) = entity.collision_phase_mut() else {
            log::warn!("{cid:?} cannot track collision phase");
            return Err(PhaseError::Unsupported { cid });
        };
        phase.track(space);
        if !self.tracked.contains(&cid) {
            self.tracked.push(cid);
        }
        log::debug!("tracking hover for {cid:?} on {space:?}");
        Ok(())
    }

    /// Run one frame of hover tracking against the last pointer event.
    ///
    /// [`check_frame`](Self::check_frame) followed by
    /// [`fire_transitions`](Self::fire_transitions). Returns the number of
    /// events fired.
    pub fn enter_frame<H: EntityHost + ?Sized>(&mut self, tree: &Tree, host: &mut H) -> usize {
        let transitions = self.check_frame(tree, host);
        self.fire_transitions(host, &transitions)
    }

    /// Update every tracked entity's hover state and return the changes.
    ///
    /// For each tracked entity, in registration order, the tracked space is
    /// tested for containing the pointer. A space that has left the tree
    /// counts as not containing the pointer. Entities that no longer resolve
    /// are dropped. Does nothing before the first pointer event. No event is
    /// fired here.
    pub fn check_frame<L: EntityLookup + ?Sized>(
        &mut self,
        tree: &Tree,
        host: &mut L,
    ) -> Vec<(EntityId, Transition)> {
        let Some(event) = self.last else {
            return Vec::new();
        };
        let probe = event.to_space();
        let mut transitions = Vec::new();
        self.tracked.retain(|&cid| {
            let Some(entity) = host.resolve(cid) else {
                log::debug!("{cid:?} is gone; no longer tracking hover");
                return false;
            };
            let Some(phase) = entity.collision_phase_mut() else {
                return false;
            };
            let contains = phase
                .space()
                .and_then(|id| tree.get(id))
                .is_some_and(|space| space.contains(&probe));
            if let Some(transition) = phase.check(contains) {
                transitions.push((cid, transition));
            }
            true
        });
        transitions
    }

    /// Fire the events for `transitions` with the last pointer event as payload.
    ///
    /// Takes no tree, so handlers may mutate it. Returns the number of events fired.
    pub fn fire_transitions<B: EventTrigger + ?Sized>(
        &self,
        bus: &mut B,
        transitions: &[(EntityId, Transition)],
    ) -> usize {
        let Some(event) = self.last else {
            return 0;
        };
        for &(cid, transition) in transitions {
            log::debug!("{cid:?} {transition:?}");
            bus.trigger(cid, transition.event_name(), &event);
        }
        transitions.len()
    }

    /// Stop tracking `cid`. Returns `false` if it was not tracked.
    pub fn untrack(&mut self, cid: EntityId) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|&c| c != cid);
        self.tracked.len() != before
    }

    /// Entities currently tracked, in registration order.
    pub fn tracked(&self) -> &[EntityId] {
        &self.tracked
    }

    /// Forget the last event and every tracked entity.
    pub fn reset(&mut self) {
        self.last = None;
        self.tracked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, Button};
    use crate::host::PhaseEntity;
    use crate::phase::CollisionPhase;
    use canopy_collision::Space;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Widget {
        phase: Option<CollisionPhase>,
    }

    impl PhaseEntity for Widget {
        fn collision_phase_mut(&mut self) -> Option<&mut CollisionPhase> {
            self.phase.as_mut()
        }
    }

    #[derive(Default)]
    struct Host {
        entities: HashMap<EntityId, Widget>,
        fired: Vec<(EntityId, String)>,
    }

    impl Host {
        fn spawn(&mut self, cid: u64, trackable: bool) -> EntityId {
            let phase = trackable.then(CollisionPhase::new);
            self.entities.insert(EntityId(cid), Widget { phase });
            EntityId(cid)
        }
    }

    impl EntityLookup for Host {
        fn resolve(&mut self, cid: EntityId) -> Option<&mut dyn PhaseEntity> {
            self.entities
                .get_mut(&cid)
                .map(|w| w as &mut dyn PhaseEntity)
        }
    }

    impl EventTrigger for Host {
        fn trigger(&mut self, cid: EntityId, event: &str, _payload: &MouseEvent) {
            self.fired.push((cid, event.to_owned()));
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn hover(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(x, y, Button::None, Action::Move)
    }

    #[test]
    fn enter_stay_leave() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let cid = host.spawn(1, true);
        let space = tree.insert(Space::new(10.0, 10.0, 10.0, 10.0, cid));
        mouse.phase_collision(space, &tree, &mut host).unwrap();

        mouse.record(hover(15.0, 15.0));
        assert_eq!(mouse.enter_frame(&tree, &mut host), 1);
        assert_eq!(mouse.enter_frame(&tree, &mut host), 0);
        mouse.record(hover(16.0, 12.0));
        assert_eq!(mouse.enter_frame(&tree, &mut host), 0);
        mouse.record(hover(50.0, 50.0));
        assert_eq!(mouse.enter_frame(&tree, &mut host), 1);
        assert_eq!(mouse.enter_frame(&tree, &mut host), 0);

        assert_eq!(
            host.fired,
            vec![
                (cid, "MouseCollisionStart".to_owned()),
                (cid, "MouseCollisionStop".to_owned()),
            ]
        );
    }

    #[test]
    fn nothing_fires_before_the_first_event() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let cid = host.spawn(1, true);
        let space = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, cid));
        mouse.phase_collision(space, &tree, &mut host).unwrap();
        assert_eq!(mouse.enter_frame(&tree, &mut host), 0);
        assert!(host.fired.is_empty());
    }

    #[test]
    fn registration_errors() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();

        let plain = host.spawn(1, false);
        let space = tree.insert(Space::new(0.0, 0.0, 1.0, 1.0, plain));
        assert_eq!(
            mouse.phase_collision(space, &tree, &mut host),
            Err(PhaseError::Unsupported { cid: plain })
        );

        let ghost = tree.insert(Space::new(0.0, 0.0, 1.0, 1.0, EntityId(99)));
        assert_eq!(
            mouse.phase_collision(ghost, &tree, &mut host),
            Err(PhaseError::UnknownEntity { cid: EntityId(99) })
        );

        tree.remove(space);
        assert_eq!(
            mouse.phase_collision(space, &tree, &mut host),
            Err(PhaseError::UnknownSpace)
        );
        assert!(mouse.tracked().is_empty());
    }

    #[test]
    fn destroyed_entities_are_dropped() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let a = host.spawn(1, true);
        let b = host.spawn(2, true);
        let sa = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, a));
        let sb = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, b));
        mouse.phase_collision(sa, &tree, &mut host).unwrap();
        mouse.phase_collision(sb, &tree, &mut host).unwrap();
        mouse.phase_collision(sb, &tree, &mut host).unwrap();
        assert_eq!(mouse.tracked(), &[a, b]);

        host.entities.remove(&a);
        mouse.record(hover(5.0, 5.0));
        assert_eq!(mouse.enter_frame(&tree, &mut host), 1);
        assert_eq!(mouse.tracked(), &[b]);
        assert_eq!(host.fired, vec![(b, "MouseCollisionStart".to_owned())]);
    }

    #[test]
    fn removed_space_stops_hover() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let cid = host.spawn(1, true);
        let space = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, cid));
        mouse.phase_collision(space, &tree, &mut host).unwrap();
        mouse.record(hover(5.0, 5.0));
        assert_eq!(mouse.enter_frame(&tree, &mut host), 1);

        tree.remove(space);
        assert_eq!(mouse.enter_frame(&tree, &mut host), 1);
        assert_eq!(host.fired.last().map(|(_, e)| e.as_str()), Some("MouseCollisionStop"));
        assert!(mouse.untrack(cid));
        assert!(!mouse.untrack(cid));
    }

    #[test]
    fn dispatch_records_and_propagates() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let cid = host.spawn(3, false);
        tree.insert(Space::new(0.0, 0.0, 4.0, 4.0, cid));

        let press = MouseEvent::new(1.0, 1.0, Button::Left, Action::Press);
        let n = mouse.dispatch(&tree, &mut host, press.action.on_event_name(), press);
        assert_eq!(n, 1);
        assert_eq!(mouse.last_event(), Some(press));
        assert_eq!(host.fired, vec![(cid, "MousePressOn".to_owned())]);

        mouse.reset();
        assert_eq!(mouse.last_event(), None);
    }

    #[test]
    fn transitions_are_collected_before_firing() {
        init_logging();
        let mut tree = Tree::new();
        let mut host = Host::default();
        let mut mouse = MouseState::new();
        let cid = host.spawn(1, true);
        let space = tree.insert(Space::new(0.0, 0.0, 10.0, 10.0, cid));
        mouse.phase_collision(space, &tree, &mut host).unwrap();
        mouse.record(hover(5.0, 5.0));

        let transitions = mouse.check_frame(&tree, &mut host);
        assert_eq!(transitions, vec![(cid, Transition::Start)]);
        assert!(host.fired.is_empty());

        // The tree can change between collecting and firing.
        tree.remove(space);
        assert_eq!(mouse.fire_transitions(&mut host, &transitions), 1);
        assert_eq!(host.fired, vec![(cid, "MouseCollisionStart".to_owned())]);
        assert_eq!(
            mouse.check_frame(&tree, &mut host),
            vec![(cid, Transition::Stop)]
        );
    }
}
