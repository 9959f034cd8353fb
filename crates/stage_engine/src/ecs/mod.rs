//! Actor/Component/Scene/World entity tree
//!
//! Ownership runs World → Scene → Actor → Component, with systems hanging off
//! either a world or a scene. Every entity is a cheap reference-counted
//! handle; parents own their children strongly through a manager, and
//! children point back weakly.

pub mod actor;
pub mod actor_manager;
pub mod component;
pub mod component_manager;
pub mod entity;
pub mod scene;
pub mod scene_manager;
pub mod system;
pub mod system_manager;
pub mod world;

pub use actor::{Actor, ActorBehavior, WeakActor};
pub use actor_manager::ActorManager;
pub use component::{Component, ComponentBehavior, WeakComponent};
pub use component_manager::ComponentManager;
pub use entity::{EntityId, Kind};
pub use scene::{Scene, SceneBehavior, WeakScene};
pub use scene_manager::SceneManager;
pub use system::{System, SystemBehavior, SystemHost, WeakSystemHost};
pub use system_manager::SystemManager;
pub use world::{WeakWorld, World};

#[cfg(test)]
mod tests;
