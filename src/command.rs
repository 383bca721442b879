//! Action-based control for controllers.

use crate::types::StepDelay;

/// A single operation a controller can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedAction {
    /// Jump to a packed color.
    SetColor(u32),
    /// Step toward a packed color, blocking until reached.
    Transition { color: u32, step_delay: StepDelay },
    /// Change brightness percentage, effective on the next write.
    SetBrightness(u8),
    /// Hold the current output for this many milliseconds.
    Pause(u32),
}

impl LedAction {
    /// Transition at the default step delay.
    pub const fn fade(color: u32) -> Self {
        LedAction::Transition {
            color,
            step_delay: StepDelay::FAST,
        }
    }
}
