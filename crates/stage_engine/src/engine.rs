//! Core engine implementation
//!
//! Headless host that owns a [`World`] and drives it once per frame.

use crate::{
    core::config::{ConfigError, EngineConfig},
    ecs::{Scene, World},
    foundation::{logging, time::Timer},
    lifecycle::LifecycleError,
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the world, measures frame times and turns them into delta times
/// according to the [`EngineConfig`].
#[derive(Debug)]
pub struct Engine {
    world: World,
    timer: Timer,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create a stopped engine with an empty world
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        Ok(Self {
            world: World::new(),
            timer: Timer::new(),
            config,
            running: false,
        })
    }

    /// Install the global logger using the configured filter
    pub fn init_logging(&self) {
        logging::init_with_filter(&self.config.log_filter);
    }

    /// Start the frame clock
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.running {
            log::warn!("Engine: already started");
            return Err(EngineError::AlreadyRunning);
        }

        self.timer.reset();
        self.running = true;
        log::info!("Engine started");
        Ok(())
    }

    /// Stop the frame clock
    pub fn stop(&mut self) -> Result<(), EngineError> {
        if !self.running {
            log::warn!("Engine: not started");
            return Err(EngineError::NotRunning);
        }

        self.running = false;
        log::info!(
            "Engine stopped after {} frames ({:.1} fps)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Run one frame using the measured wall-clock delta
    ///
    /// Returns the delta time handed to the world.
    pub fn tick(&mut self) -> Result<f32, EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }

        let raw = self.timer.tick();
        Ok(self.advance(raw))
    }

    /// Run one frame with a caller-supplied delta time
    ///
    /// The delta is clamped and scaled exactly like a measured one. Works
    /// whether or not the engine is started.
    pub fn advance(&mut self, raw_delta_time: f32) -> f32 {
        let delta_time = self.config.effective_delta(raw_delta_time);
        self.world.update(delta_time);
        delta_time
    }

    /// Advance `frames` frames of `raw_delta_time` each
    pub fn run_frames(&mut self, frames: u32, raw_delta_time: f32) -> f32 {
        (0..frames).map(|_| self.advance(raw_delta_time)).sum()
    }

    /// Add a scene to the world
    pub fn attach_scene(&self, scene: &Scene) -> Result<(), EngineError> {
        self.world.attach_scene(scene)?;
        Ok(())
    }

    /// Switch the world's active scene
    pub fn set_active_scene(&self, scene: Option<&Scene>) -> Result<(), EngineError> {
        self.world.set_active_scene(scene)?;
        Ok(())
    }

    /// Whether the frame clock is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The world driven by this engine
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// `start` called on a running engine
    #[error("Engine already running")]
    AlreadyRunning,

    /// Frame requested from, or `stop` called on, a stopped engine
    #[error("Engine not running")]
    NotRunning,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected world operation
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
}
