//! # Stage Engine
//!
//! Actor/component/scene/world lifecycle framework.
//!
//! ## Features
//!
//! - **Entity tree**: World → Scene → Actor → Component, plus systems owned by
//!   a world or a scene
//! - **Lifecycle state machines**: attachment, scene membership, enabled and
//!   update, each with ordered before/on/after hook points
//! - **Type-indexed queries**: by exact behavior type and, for actors, by the
//!   component types they hold
//! - **Headless host**: frame clock, delta clamping and time scaling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stage_engine::prelude::*;
//!
//! struct Level;
//! impl SceneBehavior for Level {}
//!
//! struct Player;
//! impl ActorBehavior for Player {}
//!
//! struct Health;
//! impl ComponentBehavior for Health {
//!     fn on_update(&self, _component: &Component, delta_time: f32) {
//!         info!("regenerating over {delta_time}s");
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     let level = Scene::new(Level);
//!     let player = Actor::new(Player);
//!     player.attach_component(&Component::new(Health))?;
//!     level.attach_actor(&player)?;
//!
//!     engine.attach_scene(&level)?;
//!     engine.set_active_scene(Some(&level))?;
//!     engine.run_frames(3, 1.0 / 60.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod lifecycle;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, EngineConfig},
        ecs::{
            Actor, ActorBehavior, Component, ComponentBehavior, EntityId, Kind, Scene,
            SceneBehavior, System, SystemBehavior, SystemHost, World,
        },
        events::{ActorEvent, ActorListener, ListenerId},
        foundation::{
            logging::{debug, error, info, trace, warn},
            time::Timer,
        },
        lifecycle::{Labeled, LifecycleError},
        Engine, EngineError,
    };
}
