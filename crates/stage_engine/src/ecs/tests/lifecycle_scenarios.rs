//! Ordering and cascade behavior across the whole entity tree

use super::mocks::{
    actor, component, count, entries_for, hook_log, position, scene, system, HookLog,
};
use crate::ecs::{Actor, Component, Scene, System, World};
use crate::lifecycle::LifecycleError;

/// World with one active-ready scene holding one actor with one component
fn populated(log: &HookLog) -> (World, Scene, Actor, Component) {
    let world = World::new();
    let s = scene("S", log);
    let a = actor("A", log);
    let c = component("C", log);

    world.attach_scene(&s).unwrap();
    s.attach_actor(&a).unwrap();
    a.attach_component(&c).unwrap();
    (world, s, a, c)
}

#[test]
fn test_activating_scene_enables_tree_top_down() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);

    world.set_active_scene(Some(&s)).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "S.on_attach",
            "A.on_attach",
            "C.on_attach",
            "C.on_attach_to_scene",
            "S.on_enable",
            "A.on_enable",
            "C.on_enable",
        ]
    );
    assert_eq!(count(&log, "C.on_enable"), 1);
    assert!(s.is_enabled() && a.is_enabled() && c.is_enabled());
    assert_eq!(c.scene(), Some(s));
}

#[test]
fn test_switching_scenes_disables_old_before_enabling_new() {
    let log = hook_log();
    let world = World::new();
    let (first, second) = (scene("S1", &log), scene("S2", &log));
    world.attach_scene(&first).unwrap();
    world.attach_scene(&second).unwrap();

    world.set_active_scene(Some(&first)).unwrap();
    world.set_active_scene(Some(&second)).unwrap();

    assert_eq!(count(&log, "S1.on_enable"), 1);
    assert_eq!(count(&log, "S1.on_disable"), 1);
    assert_eq!(count(&log, "S2.on_enable"), 1);
    assert!(position(&log, "S1.on_disable") < position(&log, "S2.on_enable"));
    assert!(!first.is_enabled());
    assert!(second.is_enabled());
    assert_eq!(world.active_scene(), Some(second));
}

#[test]
fn test_detaching_actor_from_inactive_scene_never_disables() {
    let log = hook_log();
    let s = scene("S", &log);
    let a = actor("A", &log);

    s.attach_actor(&a).unwrap();
    s.detach_actor(&a).unwrap();

    assert_eq!(count(&log, "A.on_disable"), 0);
    assert_eq!(count(&log, "A.on_detach"), 1);
    assert!(a.scene().is_none());
}

#[test]
fn test_removal_disables_before_detaching() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);
    world.set_active_scene(Some(&s)).unwrap();
    log.borrow_mut().clear();

    s.detach_actor(&a).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "C.on_disable",
            "C.on_detach_from_scene",
            "A.on_disable",
            "A.on_detach",
        ]
    );
    assert_eq!(c.actor(), Some(a.clone()));
    assert!(c.scene().is_none());
    assert!(!a.is_enabled() && !c.is_enabled());
}

#[test]
fn test_attach_precedes_enable_when_parent_is_active() {
    let log = hook_log();
    let (world, s, _a, _c) = populated(&log);
    world.set_active_scene(Some(&s)).unwrap();
    log.borrow_mut().clear();

    let late = actor("Late", &log);
    s.attach_actor(&late).unwrap();

    assert_eq!(*log.borrow(), vec!["Late.on_attach", "Late.on_enable"]);
}

#[test]
fn test_component_added_after_activation_follows_scene() {
    let log = hook_log();
    let (world, s, a, _c) = populated(&log);
    world.set_active_scene(Some(&s)).unwrap();
    log.borrow_mut().clear();

    let late = component("Late", &log);
    a.attach_component(&late).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["Late.on_attach", "Late.on_attach_to_scene", "Late.on_enable"]
    );
    assert_eq!(late.scene(), Some(s));

    world.set_active_scene(None).unwrap();
    assert_eq!(count(&log, "Late.on_disable"), 1);
    assert!(!late.is_enabled());
}

#[test]
fn test_component_joins_scene_when_actor_joins() {
    let log = hook_log();
    let world = World::new();
    let s = scene("S", &log);
    world.attach_scene(&s).unwrap();
    world.set_active_scene(Some(&s)).unwrap();

    let a = actor("A", &log);
    let c = component("C", &log);
    a.attach_component(&c).unwrap();
    assert!(c.scene().is_none());

    s.attach_actor(&a).unwrap();

    assert_eq!(c.scene(), Some(s));
    assert!(c.is_enabled());
    assert!(position(&log, "C.on_attach_to_scene") < position(&log, "A.on_attach"));
}

#[test]
fn test_deactivation_cascades_bottom_up() {
    let log = hook_log();
    let (world, s, _a, _c) = populated(&log);
    let sys = system("Sys", &log);
    s.attach_system(&sys).unwrap();
    world.set_active_scene(Some(&s)).unwrap();
    log.borrow_mut().clear();

    world.set_active_scene(None).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["C.on_disable", "A.on_disable", "Sys.on_disable", "S.on_disable"]
    );
    assert!(world.active_scene().is_none());
}

#[test]
fn test_enable_cascade_reaches_exactly_current_members() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);
    let sys = system("Sys", &log);
    s.attach_system(&sys).unwrap();
    let gone = actor("Gone", &log);
    s.attach_actor(&gone).unwrap();
    s.detach_actor(&gone).unwrap();

    world.set_active_scene(Some(&s)).unwrap();

    assert!(a.is_enabled() && c.is_enabled() && sys.is_enabled());
    assert!(!gone.is_enabled());
    assert_eq!(count(&log, "Gone.on_enable"), 0);
    assert!(position(&log, "C.on_enable") < position(&log, "Sys.on_enable"));
}

#[test]
fn test_redundant_operations_fire_no_hooks() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);
    world.set_active_scene(Some(&s)).unwrap();
    let before = log.borrow().clone();

    assert!(matches!(
        world.attach_scene(&s),
        Err(LifecycleError::AlreadyMember { .. })
    ));
    assert!(matches!(
        s.attach_actor(&a),
        Err(LifecycleError::AlreadyMember { .. })
    ));
    assert!(matches!(
        a.attach_component(&c),
        Err(LifecycleError::AlreadyMember { .. })
    ));
    assert!(matches!(
        world.set_active_scene(Some(&s)),
        Err(LifecycleError::AlreadyActive { .. })
    ));

    assert_eq!(*log.borrow(), before);

    let stranger = actor("Stranger", &log);
    assert!(matches!(
        s.detach_actor(&stranger),
        Err(LifecycleError::UnknownChild { .. })
    ));
    assert!(entries_for(&log, "Stranger.").is_empty());
}

#[test]
fn test_actor_reparents_between_scenes() {
    let log = hook_log();
    let world = World::new();
    let (first, second) = (scene("S1", &log), scene("S2", &log));
    world.attach_scene(&first).unwrap();
    world.attach_scene(&second).unwrap();
    world.set_active_scene(Some(&first)).unwrap();

    let a = actor("A", &log);
    let c = component("C", &log);
    a.attach_component(&c).unwrap();
    first.attach_actor(&a).unwrap();
    log.borrow_mut().clear();

    second.attach_actor(&a).unwrap();

    assert_eq!(
        entries_for(&log, "A."),
        vec!["A.on_disable", "A.on_detach", "A.on_attach"]
    );
    assert_eq!(
        entries_for(&log, "C."),
        vec![
            "C.on_disable",
            "C.on_detach_from_scene",
            "C.on_attach_to_scene",
        ]
    );
    assert!(first.actors().is_empty());
    assert_eq!(second.actors(), vec![a.clone()]);
    assert_eq!(c.scene(), Some(second));
    assert!(!a.is_enabled());
}

#[test]
fn test_scene_moves_between_worlds() {
    let log = hook_log();
    let (old, new) = (World::new(), World::new());
    let s = scene("S", &log);
    old.attach_scene(&s).unwrap();
    old.set_active_scene(Some(&s)).unwrap();

    new.attach_scene(&s).unwrap();

    assert!(old.scenes().is_empty());
    assert!(old.active_scene().is_none());
    assert_eq!(s.world(), Some(new));
    assert!(!s.is_enabled());
    assert!(position(&log, "S.on_disable") < position(&log, "S.on_detach"));
}

#[test]
fn test_detaching_active_scene_clears_active_reference() {
    let log = hook_log();
    let world = World::new();
    let (active, idle) = (scene("Active", &log), scene("Idle", &log));
    world.attach_scene(&active).unwrap();
    world.attach_scene(&idle).unwrap();
    world.set_active_scene(Some(&active)).unwrap();

    world.detach_scene(&idle).unwrap();
    assert_eq!(world.active_scene(), Some(active.clone()));

    world.detach_scene(&active).unwrap();
    assert!(world.active_scene().is_none());
    assert!(!active.is_enabled());
    assert_eq!(count(&log, "Active.on_disable"), 1);
}

#[test]
fn test_cannot_activate_foreign_scene() {
    let log = hook_log();
    let world = World::new();
    let foreign = scene("Foreign", &log);

    assert!(matches!(
        world.set_active_scene(Some(&foreign)),
        Err(LifecycleError::UnknownChild { .. })
    ));
    assert!(matches!(
        world.set_active_scene(None),
        Err(LifecycleError::AlreadyActive { .. })
    ));
    assert!(world.active_scene().is_none());
    assert_eq!(count(&log, "Foreign.on_enable"), 0);
}

#[test]
fn test_world_update_order() {
    let log = hook_log();
    let (world, s, _a, _c) = populated(&log);
    let world_system = system("WS", &log);
    let scene_system = system("SS", &log);
    world.attach_system(&world_system).unwrap();
    s.attach_system(&scene_system).unwrap();
    world.set_active_scene(Some(&s)).unwrap();
    log.borrow_mut().clear();

    world.update(0.016);

    assert_eq!(
        *log.borrow(),
        vec![
            "WS.on_update",
            "C.on_update",
            "A.on_update",
            "SS.on_update",
            "S.on_update",
            "WS.on_post_update",
            "C.on_post_update",
            "A.on_post_update",
            "SS.on_post_update",
            "S.on_post_update",
        ]
    );
}

#[test]
fn test_world_systems_run_without_active_scene() {
    let log = hook_log();
    let (world, _s, _a, _c) = populated(&log);
    let world_system = system("WS", &log);
    world.attach_system(&world_system).unwrap();
    log.borrow_mut().clear();

    world.update(0.016);

    assert_eq!(*log.borrow(), vec!["WS.on_update", "WS.on_post_update"]);
}

#[test]
fn test_only_active_scene_updates() {
    let log = hook_log();
    let world = World::new();
    let (active, idle) = (scene("Active", &log), scene("Idle", &log));
    world.attach_scene(&active).unwrap();
    world.attach_scene(&idle).unwrap();
    let idle_actor = actor("IdleActor", &log);
    idle.attach_actor(&idle_actor).unwrap();
    world.set_active_scene(Some(&active)).unwrap();

    world.update(0.016);

    assert_eq!(count(&log, "Active.on_update"), 1);
    assert!(entries_for(&log, "Idle").iter().all(|e| !e.contains("update")));
}

#[test]
fn test_dropping_world_releases_the_tree() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);
    let sys: System = system("Sys", &log);
    world.attach_system(&sys).unwrap();

    drop(world);

    assert!(s.world().is_none());
    assert!(sys.host().is_none());
    assert!(!sys.is_enabled());
    assert_eq!(count(&log, "Sys.on_disable"), 1);
    assert_eq!(a.scene(), Some(s));
    assert_eq!(c.actor(), Some(a));
}

#[test]
fn test_dropping_world_disables_its_active_scene() {
    let log = hook_log();
    let (world, s, a, c) = populated(&log);
    world.set_active_scene(Some(&s)).unwrap();

    drop(world);

    assert!(!s.is_enabled());
    assert!(!a.is_enabled());
    assert!(!c.is_enabled());
    assert_eq!(count(&log, "S.on_disable"), 1);
    assert_eq!(count(&log, "A.on_disable"), 1);
    assert_eq!(count(&log, "C.on_disable"), 1);

    let next = World::new();
    let t = scene("T", &log);
    next.attach_scene(&s).unwrap();
    next.attach_scene(&t).unwrap();
    next.set_active_scene(Some(&t)).unwrap();

    assert!(!s.is_enabled());
    assert!(t.is_enabled());
    assert_eq!(next.active_scene(), Some(t));
}
