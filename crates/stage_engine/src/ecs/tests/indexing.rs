//! Kind and component indices stay an exact reflection of membership

use std::cell::RefCell;
use std::rc::Rc;

use super::mocks::{actor, component, component_beta, hook_log, scene, Alpha, Beta, Recording};
use crate::ecs::{Actor, ActorBehavior, Component, ComponentBehavior, Kind, Scene, World};
use crate::events::ActorEvent;

fn alpha() -> Kind {
    Kind::of::<Recording<Alpha>>()
}

fn beta() -> Kind {
    Kind::of::<Recording<Beta>>()
}

struct Crate;
impl ActorBehavior for Crate {}

fn holders(scene: &Scene, kinds: &[Kind]) -> Vec<Actor> {
    scene.actors_with_components(kinds)
}

#[test]
fn test_component_index_tracks_attach_and_detach() {
    let log = hook_log();
    let s = scene("S", &log);
    let (first, second) = (actor("A1", &log), actor("A2", &log));
    let (c1, c2) = (component("C1", &log), component("C2", &log));
    first.attach_component(&c1).unwrap();
    second.attach_component(&c2).unwrap();
    s.attach_actor(&first).unwrap();
    s.attach_actor(&second).unwrap();

    assert_eq!(holders(&s, &[alpha()]), vec![first.clone(), second.clone()]);

    first.detach_component(&c1).unwrap();
    assert_eq!(holders(&s, &[alpha()]), vec![second.clone()]);

    second.detach_component(&c2).unwrap();
    assert!(holders(&s, &[alpha()]).is_empty());
}

#[test]
fn test_actor_stays_indexed_while_it_holds_another_of_the_kind() {
    let log = hook_log();
    let s = scene("S", &log);
    let a = actor("A", &log);
    let (c1, c2) = (component("C1", &log), component("C2", &log));
    s.attach_actor(&a).unwrap();
    a.attach_component(&c1).unwrap();
    a.attach_component(&c2).unwrap();

    a.detach_component(&c1).unwrap();
    assert_eq!(holders(&s, &[alpha()]), vec![a.clone()]);

    a.detach_component(&c2).unwrap();
    assert!(holders(&s, &[alpha()]).is_empty());
}

#[test]
fn test_same_frame_attach_detach_attach() {
    let log = hook_log();
    let s = scene("S", &log);
    let a = actor("A", &log);
    let c = component("C", &log);
    s.attach_actor(&a).unwrap();

    a.attach_component(&c).unwrap();
    a.detach_component(&c).unwrap();
    a.attach_component(&c).unwrap();
    assert_eq!(holders(&s, &[alpha()]), vec![a.clone()]);

    s.detach_actor(&a).unwrap();
    s.attach_actor(&a).unwrap();
    s.detach_actor(&a).unwrap();
    assert!(holders(&s, &[alpha()]).is_empty());
    assert!(s.actors().is_empty());

    s.attach_actor(&a).unwrap();
    assert_eq!(holders(&s, &[alpha()]), vec![a]);
}

#[test]
fn test_detached_actor_no_longer_feeds_the_index() {
    let log = hook_log();
    let s = scene("S", &log);
    let a = actor("A", &log);
    s.attach_actor(&a).unwrap();
    s.detach_actor(&a).unwrap();

    a.attach_component(&component("C", &log)).unwrap();

    assert!(holders(&s, &[alpha()]).is_empty());
}

#[test]
fn test_index_leaves_no_listeners_on_actors() {
    let log = hook_log();
    let a = actor("A", &log);
    {
        let s = scene("S", &log);
        s.attach_actor(&a).unwrap();
        a.attach_component(&component("C", &log)).unwrap();
        assert_eq!(holders(&s, &[alpha()]), vec![a.clone()]);
        assert_eq!(a.events().listener_count(ActorEvent::ComponentAttached), 0);
    }

    assert!(a.scene().is_none());
    assert_eq!(a.events().listener_count(ActorEvent::ComponentAttached), 0);
    assert_eq!(a.events().listener_count(ActorEvent::ComponentDetached), 0);
    a.attach_component(&component("Late", &log)).unwrap();
    assert_eq!(a.components().len(), 2);
}

/// Records how many actors in its scene hold a component of its own kind
#[derive(Default)]
struct Lookout {
    seen: Rc<RefCell<Vec<(&'static str, usize)>>>,
}

impl Lookout {
    fn record(&self, hook: &'static str, component: &Component) {
        let holders = component.scene().map_or(0, |scene| {
            scene.actors_with_components(&[Kind::of::<Lookout>()]).len()
        });
        self.seen.borrow_mut().push((hook, holders));
    }
}

impl ComponentBehavior for Lookout {
    fn on_attach_to_scene(&self, component: &Component, _scene: &Scene) {
        self.record("on_attach_to_scene", component);
    }
    fn on_enable(&self, component: &Component) {
        self.record("on_enable", component);
    }
    fn on_disable(&self, component: &Component) {
        self.record("on_disable", component);
    }
    fn on_detach_from_scene(&self, component: &Component, _scene: &Scene) {
        self.record("on_detach_from_scene", component);
    }
}

#[test]
fn test_index_is_current_inside_component_hooks() {
    let log = hook_log();
    let world = World::new();
    let s = scene("S", &log);
    let a = actor("A", &log);
    world.attach_scene(&s).unwrap();
    s.attach_actor(&a).unwrap();
    world.set_active_scene(Some(&s)).unwrap();

    let lookout = Lookout::default();
    let seen = Rc::clone(&lookout.seen);
    let c = Component::new(lookout);
    a.attach_component(&c).unwrap();
    a.detach_component(&c).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            ("on_attach_to_scene", 1),
            ("on_enable", 1),
            ("on_disable", 1),
            ("on_detach_from_scene", 1),
        ]
    );
    assert!(holders(&s, &[Kind::of::<Lookout>()]).is_empty());
}

#[test]
fn test_multi_kind_query_intersects_in_first_kind_order() {
    let log = hook_log();
    let s = scene("S", &log);
    let (both_late, alpha_only, both_early) =
        (actor("Late", &log), actor("Alpha", &log), actor("Early", &log));

    both_early.attach_component(&component("E1", &log)).unwrap();
    both_early.attach_component(&component_beta("E2", &log)).unwrap();
    alpha_only.attach_component(&component("A1", &log)).unwrap();
    both_late.attach_component(&component_beta("L2", &log)).unwrap();
    both_late.attach_component(&component("L1", &log)).unwrap();

    s.attach_actor(&both_late).unwrap();
    s.attach_actor(&alpha_only).unwrap();
    s.attach_actor(&both_early).unwrap();

    assert_eq!(
        holders(&s, &[alpha(), beta()]),
        vec![both_late.clone(), both_early.clone()]
    );
    assert_eq!(
        holders(&s, &[beta(), alpha()]),
        vec![both_late, both_early]
    );
    assert!(holders(&s, &[]).is_empty());
    assert!(holders(&s, &[alpha(), Kind::of::<Crate>()]).is_empty());
}

#[test]
fn test_component_moving_between_scenes_moves_its_index_entry() {
    let log = hook_log();
    let (first, second) = (scene("S1", &log), scene("S2", &log));
    let (a1, a2) = (actor("A1", &log), actor("A2", &log));
    first.attach_actor(&a1).unwrap();
    second.attach_actor(&a2).unwrap();
    let c = component("C", &log);
    a1.attach_component(&c).unwrap();

    a2.attach_component(&c).unwrap();

    assert!(holders(&first, &[alpha()]).is_empty());
    assert_eq!(holders(&second, &[alpha()]), vec![a2.clone()]);
    assert_eq!(c.scene(), Some(second));
}

#[test]
fn test_exact_kind_queries() {
    let log = hook_log();
    let world = World::new();
    let s = scene("S", &log);
    world.attach_scene(&s).unwrap();
    let crate_actor = Actor::new(Crate);
    let recording = actor("R", &log);
    s.attach_actor(&crate_actor).unwrap();
    s.attach_actor(&recording).unwrap();

    assert_eq!(s.actors_with_kind(Kind::of::<Crate>()), vec![crate_actor.clone()]);
    assert_eq!(s.actor_manager().get_with_type::<Crate>(), vec![crate_actor.clone()]);
    assert!(s.actor_manager().has_with_kind(alpha()));

    s.detach_actor(&crate_actor).unwrap();
    assert!(s.actors_with_kind(Kind::of::<Crate>()).is_empty());
    assert!(!s.actor_manager().has_with_kind(Kind::of::<Crate>()));

    assert_eq!(world.scenes_with_kind(alpha()), vec![s.clone()]);
    assert_eq!(world.scene_of::<Recording<Alpha>>(), Some(s));
}

#[test]
fn test_query_results_are_snapshots() {
    let log = hook_log();
    let s = scene("S", &log);
    let a = actor("A", &log);
    s.attach_actor(&a).unwrap();

    let before = s.actors();
    s.detach_actor(&a).unwrap();

    assert_eq!(before, vec![a]);
    assert!(s.actors().is_empty());
}
