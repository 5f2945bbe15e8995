/*
 * Debug Information Module
 *
 * Frame statistics shown in the control panel.
 */

use std::time::Duration;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    /// Wall time of the last simulation step.
    pub step_time: Duration,
}

impl DebugInfo {
    pub fn step_millis(&self) -> f64 {
        self.step_time.as_secs_f64() * 1000.0
    }

    pub fn frame_millis(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }
}
