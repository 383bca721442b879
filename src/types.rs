//! Core types shared by the controller and its hardware outputs.

/// Wiring convention of the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Higher duty cycle means a brighter LED (common cathode).
    #[default]
    ActiveHigh,

    /// Lower duty cycle means a brighter LED (common anode).
    ActiveLow,
}

impl Polarity {
    /// Maps a logical duty cycle onto the physical one for this wiring.
    #[inline]
    pub fn apply(self, duty: u16, max_duty: u16) -> u16 {
        match self {
            Polarity::ActiveHigh => duty,
            Polarity::ActiveLow => max_duty.saturating_sub(duty),
        }
    }
}

/// Time between two transition steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepDelay(u32);

impl StepDelay {
    /// 1 ms per step.
    pub const VERY_FAST: Self = StepDelay(1);

    /// 3 ms per step. Default for transitions.
    pub const FAST: Self = StepDelay(3);

    /// 10 ms per step.
    pub const SLOW: Self = StepDelay(10);

    /// Creates a step delay from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u32) -> Self {
        StepDelay(millis)
    }

    /// Returns the delay in milliseconds.
    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for StepDelay {
    fn default() -> Self {
        StepDelay::FAST
    }
}

/// Global brightness as a percentage in `0..=100`.
///
/// Scaling is linear with truncating integer division; there is no
/// perceptual curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Upper bound, values above are clamped.
    pub const MAX_PERCENT: u8 = 100;

    /// Brightness applied by a freshly constructed controller.
    pub const DEFAULT: Self = Brightness(25);

    /// Full brightness.
    pub const FULL: Self = Brightness(Self::MAX_PERCENT);

    /// Creates a brightness, clamping `percent` to 100.
    #[inline]
    pub const fn from_percent(percent: u8) -> Self {
        if percent > Self::MAX_PERCENT {
            Brightness(Self::MAX_PERCENT)
        } else {
            Brightness(percent)
        }
    }

    /// Returns the brightness percentage.
    #[inline]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Scales a channel level: `floor(level * percent / 100)`.
    #[inline]
    pub const fn scale(self, level: u8) -> u8 {
        // Never exceeds `level` because percent <= 100.
        ((level as u16 * self.0 as u16) / Self::MAX_PERCENT as u16) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness::DEFAULT
    }
}

impl From<u8> for Brightness {
    fn from(percent: u8) -> Self {
        Brightness::from_percent(percent)
    }
}

/// One of the three LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Intensity bookkeeping for a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    /// Live output level, before brightness.
    pub current: u8,

    /// Level `current` converges toward.
    pub target: u8,

    /// `current` with brightness applied. Derived, refreshed before every write.
    pub scaled: u8,
}

impl ChannelState {
    /// Sets current and target to `level` at once.
    #[inline]
    pub(crate) fn jump_to(&mut self, level: u8) {
        self.current = level;
        self.target = level;
    }

    /// Moves `current` one unit toward `target`. No-op when settled.
    #[inline]
    pub(crate) fn step(&mut self) {
        if self.current < self.target {
            self.current += 1;
        } else if self.current > self.target {
            self.current -= 1;
        }
    }

    /// Recomputes `scaled` from `current`.
    #[inline]
    pub(crate) fn apply_brightness(&mut self, brightness: Brightness) {
        self.scaled = brightness.scale(self.current);
    }

    /// Returns true if `current` has reached `target`.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Number of steps left until settled.
    #[inline]
    pub fn distance(&self) -> u8 {
        self.current.abs_diff(self.target)
    }
}

/// Construction-time settings for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Wiring of the LED. Passed to the output on every write.
    pub polarity: Polarity,

    /// Initial brightness.
    pub brightness: Brightness,

    /// Step delay used by [`crate::LedController::fade_to`].
    pub step_delay: StepDelay,
}

impl ControllerConfig {
    /// Returns a copy with the given polarity.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Returns a copy with the given brightness.
    pub fn brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    /// Returns a copy with the given default step delay.
    pub fn step_delay(mut self, step_delay: StepDelay) -> Self {
        self.step_delay = step_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_clamps_above_hundred() {
        assert_eq!(Brightness::from_percent(150).percent(), 100);
        assert_eq!(Brightness::from_percent(255), Brightness::FULL);
        assert_eq!(Brightness::from_percent(40).percent(), 40);
    }

    #[test]
    fn brightness_scale_truncates() {
        assert_eq!(Brightness::from_percent(25).scale(255), 63);
        assert_eq!(Brightness::from_percent(50).scale(3), 1);
        assert_eq!(Brightness::from_percent(0).scale(255), 0);
        assert_eq!(Brightness::FULL.scale(255), 255);
    }

    #[test]
    fn brightness_scale_is_monotonic() {
        for level in [0u8, 1, 7, 128, 200, 255] {
            let mut previous = 0;
            for percent in 0..=100 {
                let scaled = Brightness::from_percent(percent).scale(level);
                assert!(scaled >= previous);
                assert!(scaled <= level);
                previous = scaled;
            }
        }
    }

    #[test]
    fn channel_step_moves_one_unit_toward_target() {
        let mut up = ChannelState { current: 10, target: 12, scaled: 0 };
        up.step();
        assert_eq!(up.current, 11);

        let mut down = ChannelState { current: 10, target: 0, scaled: 0 };
        down.step();
        assert_eq!(down.current, 9);
        assert_eq!(down.distance(), 9);

        let mut settled = ChannelState { current: 5, target: 5, scaled: 0 };
        settled.step();
        assert_eq!(settled.current, 5);
        assert!(settled.is_settled());
    }

    #[test]
    fn polarity_inverts_duty_for_active_low() {
        assert_eq!(Polarity::ActiveHigh.apply(200, 255), 200);
        assert_eq!(Polarity::ActiveLow.apply(200, 255), 55);
        assert_eq!(Polarity::ActiveLow.apply(0, 1023), 1023);
    }

    #[test]
    fn config_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.polarity, Polarity::ActiveHigh);
        assert_eq!(config.brightness.percent(), 25);
        assert_eq!(config.step_delay.as_millis(), 3);
    }
}
