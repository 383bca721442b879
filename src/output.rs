//! Hardware outputs for the controller.
//!
//! Defines the [`LedOutput`] trait the controller writes through and
//! [`PwmRgbLed`], an implementation over three `embedded-hal` PWM channels.

use crate::types::{Channel, Polarity};
use embedded_hal::pwm::SetDutyCycle;
use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware to let the controller drive it.
pub trait LedOutput {
    /// Writes brightness-scaled 8-bit levels to all three channels.
    ///
    /// `polarity` is the controller's wiring setting; implementations must
    /// invert their output for [`Polarity::ActiveLow`]. Called once per tick.
    /// Handle hardware errors internally; this method cannot fail.
    fn write_levels(&mut self, levels: Srgb<u8>, polarity: Polarity);
}

impl<T: LedOutput + ?Sized> LedOutput for &mut T {
    fn write_levels(&mut self, levels: Srgb<u8>, polarity: Polarity) {
        (**self).write_levels(levels, polarity)
    }
}

/// RGB LED driven by three PWM channels.
///
/// The channels must already be configured and attached to their pins by the
/// HAL (5 kHz with 8-bit resolution works well). Levels are rescaled to each
/// channel's duty range and inverted when the controller writes with
/// [`Polarity::ActiveLow`].
pub struct PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    red: R,
    green: G,
    blue: B,
    write_failures: u32,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Creates an LED from three configured PWM channels.
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            write_failures: 0,
        }
    }

    /// Number of duty-cycle writes the hardware rejected so far.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    /// Consumes the LED and returns the channels.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    fn record(&mut self, channel: Channel, ok: bool) {
        if ok {
            return;
        }
        self.write_failures = self.write_failures.saturating_add(1);

        #[cfg(feature = "defmt")]
        defmt::warn!("PWM write failed on {} channel", channel);
        #[cfg(not(feature = "defmt"))]
        let _ = channel;
    }
}

/// Maps an 8-bit level onto `0..=max_duty`, honoring polarity.
#[inline]
fn level_to_duty(level: u8, max_duty: u16, polarity: Polarity) -> u16 {
    let duty = (level as u32 * max_duty as u32 / u8::MAX as u32) as u16;
    polarity.apply(duty, max_duty)
}

fn write_channel<C: SetDutyCycle>(channel: &mut C, level: u8, polarity: Polarity) -> bool {
    let duty = level_to_duty(level, channel.max_duty_cycle(), polarity);
    channel.set_duty_cycle(duty).is_ok()
}

impl<R, G, B> LedOutput for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn write_levels(&mut self, levels: Srgb<u8>, polarity: Polarity) {
        let ok = write_channel(&mut self.red, levels.red, polarity);
        self.record(Channel::Red, ok);
        let ok = write_channel(&mut self.green, levels.green, polarity);
        self.record(Channel::Green, ok);
        let ok = write_channel(&mut self.blue, levels.blue, polarity);
        self.record(Channel::Blue, ok);
    }
}
