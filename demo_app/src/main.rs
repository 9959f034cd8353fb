//! Headless stage demo
//!
//! Builds a small world with two scenes, a few actors and a world-level
//! system, then runs simulated frames while switching the active scene.

use stage_engine::prelude::*;
use std::cell::Cell;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("missing {0}")]
    Missing(&'static str),
}

/// Counts frames for the whole world, regardless of the active scene
#[derive(Default)]
struct FrameCounter {
    frames: Cell<u64>,
}

impl SystemBehavior for FrameCounter {
    fn on_update(&self, _system: &System, _delta_time: f32) {
        self.frames.set(self.frames.get() + 1);
    }
}

struct Level {
    name: &'static str,
}

impl SceneBehavior for Level {
    fn on_enable(&self, scene: &Scene) {
        info!("{} ({}) is now active", self.name, scene.label());
    }

    fn on_disable(&self, scene: &Scene) {
        info!("{} ({}) went dormant", self.name, scene.label());
    }
}

struct Ship {
    name: &'static str,
}

impl ActorBehavior for Ship {
    fn on_attach(&self, actor: &Actor, scene: &Scene) {
        debug!("{} ({}) entered {}", self.name, actor.label(), scene.label());
    }
}

struct Position {
    x: Cell<f32>,
}

struct Velocity {
    dx: f32,
}

impl ComponentBehavior for Position {}

impl ComponentBehavior for Velocity {
    fn on_update(&self, component: &Component, delta_time: f32) {
        let Some(actor) = component.actor() else {
            return;
        };
        if let Some(position) = actor.component_behavior::<Position>() {
            position.x.set(position.x.get() + self.dx * delta_time);
        }
    }
}

/// Regenerates slowly while enabled
struct Shield {
    strength: Cell<f32>,
}

impl ComponentBehavior for Shield {
    fn on_enable(&self, component: &Component) {
        trace!("{} online", component.label());
    }

    fn on_update(&self, _component: &Component, delta_time: f32) {
        self.strength.set((self.strength.get() + delta_time * 10.0).min(100.0));
    }
}

fn spawn_ship(
    scene: &Scene,
    name: &'static str,
    dx: f32,
    shielded: bool,
) -> Result<Actor, DemoError> {
    let ship = Actor::new(Ship { name });
    ship.attach_component(&Component::new(Position { x: Cell::new(0.0) }))?;
    ship.attach_component(&Component::new(Velocity { dx }))?;
    if shielded {
        ship.attach_component(&Component::new(Shield {
            strength: Cell::new(50.0),
        }))?;
    }
    scene.attach_actor(&ship)?;
    Ok(ship)
}

fn report(scene: &Scene) {
    let movers =
        scene.actors_with_components(&[Kind::of::<Position>(), Kind::of::<Velocity>()]);
    for actor in movers {
        let name = actor.behavior::<Ship>().map_or("?", |ship| ship.name);
        let x = actor
            .component_behavior::<Position>()
            .map_or(0.0, |position| position.x.get());
        info!("  {name}: x = {x:.2}");
    }
}

fn run() -> Result<(), DemoError> {
    let config = EngineConfig::default().with_log_filter("info,stage_engine=debug");
    let mut engine = Engine::new(config)?;
    engine.init_logging();

    engine
        .world()
        .attach_system(&System::new(FrameCounter::default()))?;

    let patrol = Scene::new(Level { name: "Patrol" });
    let hangar = Scene::new(Level { name: "Hangar" });
    engine.attach_scene(&patrol)?;
    engine.attach_scene(&hangar)?;

    let scout = spawn_ship(&patrol, "Scout", 4.0, false)?;
    spawn_ship(&patrol, "Frigate", 1.5, true)?;
    spawn_ship(&hangar, "Tender", 0.0, true)?;

    engine.set_active_scene(Some(&patrol))?;
    let simulated = engine.run_frames(60, 1.0 / 60.0);
    info!("Patrol ran for {simulated:.2}s");
    report(&patrol);

    // Scout docks: it keeps its components and position across the move.
    hangar.attach_actor(&scout)?;
    engine.set_active_scene(Some(&hangar))?;
    engine.run_frames(30, 1.0 / 60.0);
    info!("Hangar now holds {} ships", hangar.actors().len());
    report(&hangar);

    let shielded = hangar
        .actors_with_kind(Kind::of::<Ship>())
        .into_iter()
        .filter(|actor| actor.component_of::<Shield>().is_some())
        .count();
    info!("{shielded} ships in the hangar carry shields");

    let frames = engine
        .world()
        .system_of::<FrameCounter>()
        .and_then(|system| system.behavior::<FrameCounter>())
        .ok_or(DemoError::Missing("frame counter"))?
        .frames
        .get();
    info!("World systems saw {frames} frames");

    engine.set_active_scene(None)?;
    engine.start()?;
    engine.tick()?;
    engine.stop()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Demo failed: {e}");
        eprintln!("Demo failed: {e}");
        std::process::exit(1);
    }
}
