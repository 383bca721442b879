//! Fixed lists of actions played back by a controller.

use crate::colors::{BLUE, GREEN, RED};
use crate::command::LedAction;
use crate::types::StepDelay;
use heapless::Vec;

/// Number of actions in [`Choreography::demo`].
pub const DEMO_LEN: usize = 7;

/// Pause between the fast and slow halves of the demo.
pub const DEMO_PAUSE_MS: u32 = 1000;

/// Choreography validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChoreographyError {
    /// No actions provided.
    Empty,

    /// Choreography capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for ChoreographyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChoreographyError::Empty => {
                write!(f, "choreography must have at least one action")
            }
            ChoreographyError::CapacityExceeded => {
                write!(f, "choreography capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChoreographyError {}

/// An ordered, bounded list of [`LedAction`]s.
///
/// # Type Parameters
/// * `N` - Maximum number of actions
#[derive(Debug, Clone)]
pub struct Choreography<const N: usize> {
    actions: Vec<LedAction, N>,
}

impl<const N: usize> Choreography<N> {
    /// Creates a new choreography builder.
    pub fn builder() -> ChoreographyBuilder<N> {
        ChoreographyBuilder::new()
    }

    /// Returns the actions in playback order.
    pub fn actions(&self) -> &[LedAction] {
        &self.actions
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false for a built choreography.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Total time spent in [`LedAction::Pause`] actions, in milliseconds.
    pub fn pause_millis(&self) -> u32 {
        self.actions
            .iter()
            .map(|action| match action {
                LedAction::Pause(ms) => *ms,
                _ => 0,
            })
            .fold(0u32, u32::saturating_add)
    }
}

impl Choreography<DEMO_LEN> {
    /// Red, green, blue at fast speed, a one second pause, then the same
    /// three colors at slow speed.
    pub fn demo() -> Self {
        let actions = Vec::from_array([
            LedAction::fade(RED),
            LedAction::fade(GREEN),
            LedAction::fade(BLUE),
            LedAction::Pause(DEMO_PAUSE_MS),
            LedAction::Transition { color: RED, step_delay: StepDelay::SLOW },
            LedAction::Transition { color: GREEN, step_delay: StepDelay::SLOW },
            LedAction::Transition { color: BLUE, step_delay: StepDelay::SLOW },
        ]);
        Self { actions }
    }
}

/// Builder for constructing validated choreographies.
#[derive(Debug)]
pub struct ChoreographyBuilder<const N: usize> {
    actions: Vec<LedAction, N>,
}

impl<const N: usize> ChoreographyBuilder<N> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Appends an action.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if `N` actions were already added.
    pub fn action(mut self, action: LedAction) -> Result<Self, ChoreographyError> {
        self.actions
            .push(action)
            .map_err(|_| ChoreographyError::CapacityExceeded)?;
        Ok(self)
    }

    /// Appends a jump to `color`.
    pub fn set_color(self, color: u32) -> Result<Self, ChoreographyError> {
        self.action(LedAction::SetColor(color))
    }

    /// Appends a transition to `color`.
    pub fn transition(self, color: u32, step_delay: StepDelay) -> Result<Self, ChoreographyError> {
        self.action(LedAction::Transition { color, step_delay })
    }

    /// Appends a brightness change.
    pub fn brightness(self, percent: u8) -> Result<Self, ChoreographyError> {
        self.action(LedAction::SetBrightness(percent))
    }

    /// Appends a pause.
    pub fn pause(self, millis: u32) -> Result<Self, ChoreographyError> {
        self.action(LedAction::Pause(millis))
    }

    /// Builds and validates the choreography.
    ///
    /// # Errors
    /// * `Empty` - No actions were added
    pub fn build(self) -> Result<Choreography<N>, ChoreographyError> {
        if self.actions.is_empty() {
            return Err(ChoreographyError::Empty);
        }

        Ok(Choreography {
            actions: self.actions,
        })
    }
}

impl<const N: usize> Default for ChoreographyBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
