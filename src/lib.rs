#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LedController`**: Owns one RGB LED, sets colors, steps transitions and applies brightness
//! - **`LedOutput`**: Trait to implement for your LED hardware
//! - **`PwmRgbLed`**: `LedOutput` over three `embedded-hal` PWM channels
//! - **`Polarity`**: Whether the LED lights up on high (`ActiveHigh`) or low (`ActiveLow`) duty
//! - **`Brightness`**: Global linear brightness in percent, clamped to 100
//! - **`StepDelay`**: Time between transition steps (`FAST`, `SLOW`, `VERY_FAST`)
//! - **`LedAction`** / **`Choreography`**: Scripted sequences of actions, such as the demo
//!
//! Colors are packed `0xRRGGBB` integers. Each channel is a raw 8-bit level;
//! there is no gamma correction.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod choreography;
pub mod colors;
pub mod command;
pub mod controller;
pub mod output;
pub mod types;

pub use choreography::{Choreography, ChoreographyBuilder, ChoreographyError};
pub use colors::{BLACK, BLUE, CYAN, GREEN, MAGENTA, ORANGE, RED, WHITE, YELLOW};
pub use command::LedAction;
pub use controller::{ColorEvent, ColorHook, LedController};
pub use output::{LedOutput, PwmRgbLed};
pub use types::{Brightness, Channel, ChannelState, ControllerConfig, Polarity, StepDelay};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = Polarity::ActiveHigh;
        let _ = Polarity::ActiveLow;
        let _ = StepDelay::VERY_FAST;
        let _ = LedAction::Pause(1);
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn public_types_are_defmt_format() {
        fn assert_format<T: defmt::Format>() {}
        assert_format::<ColorEvent>();
        assert_format::<ChoreographyError>();
        assert_format::<ControllerConfig>();
        assert_format::<LedAction>();
        assert_format::<Polarity>();
    }
}
