//! Time management utilities

use std::time::Instant;

/// Frame timer measuring wall-clock time between ticks
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the time since the previous tick and return it in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Restart measuring from now and clear the totals
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Time between the last two ticks in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total measured time since creation or the last reset
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks since creation or the last reset
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average ticks per second since creation or the last reset
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
