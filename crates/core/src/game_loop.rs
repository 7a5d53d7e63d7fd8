//! Frame pacing for forced drops.
//!
//! The loop counts frames and signals a drop once the count reaches
//! `max(min_frame_rate, max_frame_rate - level)`. Higher levels shrink the
//! threshold until it hits the floor.

/// Frame counter driving gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLoop {
    frame_count: u32,
    min_frame_rate: u32,
    max_frame_rate: u32,
    running: bool,
}

impl GameLoop {
    pub fn new(min_frame_rate: u32, max_frame_rate: u32) -> Self {
        Self {
            frame_count: 0,
            min_frame_rate,
            max_frame_rate,
            running: true,
        }
    }

    /// Frames between forced drops at `level`.
    pub fn cadence(&self, level: u32) -> u32 {
        self.max_frame_rate
            .saturating_sub(level)
            .max(self.min_frame_rate)
    }

    /// Count one frame. Returns true when a drop is due, resetting the count.
    pub fn advance(&mut self, level: u32) -> bool {
        if !self.running {
            return false;
        }
        self.frame_count += 1;
        if self.frame_count >= self.cadence(level) {
            self.frame_count = 0;
            true
        } else {
            false
        }
    }

    /// Stop scheduling; every later `advance` is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
