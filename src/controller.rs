//! RGB LED controller with color transitions and brightness control.
//!
//! Provides [`LedController`] which tracks per-channel current and target
//! levels, walks them toward a target one unit per tick, applies global
//! brightness and writes the result through a [`LedOutput`].
//!
//! Transitions can be driven two ways:
//! - Blocking: [`LedController::color_transition`] steps, writes and sleeps
//!   until the target is reached.
//! - Tick-driven: [`LedController::begin_transition`] followed by repeated
//!   [`LedController::tick`] calls from an event loop or task.

use crate::choreography::{Choreography, DEMO_LEN};
use crate::colors::{pack, unpack};
use crate::command::LedAction;
use crate::output::{LedOutput, PwmRgbLed};
use crate::types::{Brightness, Channel, ChannelState, ControllerConfig, Polarity, StepDelay};
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use palette::Srgb;

/// Passed to the color hook on every [`LedController::set_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEvent {
    /// Value handed to `set_color`, high bits included.
    pub requested: u32,

    /// Decomposed channel levels, before brightness.
    pub levels: Srgb<u8>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ColorEvent {{ requested: {=u32:#x}, rgb: ({=u8}, {=u8}, {=u8}) }}",
            self.requested,
            self.levels.red,
            self.levels.green,
            self.levels.blue
        )
    }
}

/// Observer invoked on every [`LedController::set_color`].
pub type ColorHook = fn(ColorEvent);

/// In-flight tick-driven transition.
#[derive(Debug, Clone, Copy)]
struct Transition {
    step_delay: StepDelay,
    /// Milliseconds until the next step is due.
    due_ms: u32,
}

/// Controls a single RGB LED.
///
/// The controller exclusively owns its output. Every mutating operation takes
/// `&mut self`, so writes to one LED are always serialized.
///
/// # Type Parameters
/// * `L` - LED output implementation type
pub struct LedController<L: LedOutput> {
    led: L,
    red: ChannelState,
    green: ChannelState,
    blue: ChannelState,
    polarity: Polarity,
    brightness: Brightness,
    step_delay: StepDelay,
    transition: Option<Transition>,
    hook: Option<ColorHook>,
}

impl<R, G, B> LedController<PwmRgbLed<R, G, B>>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Creates a controller over three configured PWM channels.
    pub fn from_pwm(red: R, green: G, blue: B, polarity: Polarity) -> Self {
        Self::from_pwm_with_config(red, green, blue, ControllerConfig::default().polarity(polarity))
    }

    /// Creates a controller over three PWM channels with explicit settings.
    pub fn from_pwm_with_config(red: R, green: G, blue: B, config: ControllerConfig) -> Self {
        Self::with_config(PwmRgbLed::new(red, green, blue), config)
    }
}

impl<L: LedOutput> LedController<L> {
    /// Creates a controller with default settings. The LED is not written.
    pub fn new(led: L) -> Self {
        Self::with_config(led, ControllerConfig::default())
    }

    /// Creates a controller with the given settings.
    ///
    /// `config.polarity` is handed to the output on every write.
    pub fn with_config(led: L, config: ControllerConfig) -> Self {
        Self {
            led,
            red: ChannelState::default(),
            green: ChannelState::default(),
            blue: ChannelState::default(),
            polarity: config.polarity,
            brightness: config.brightness,
            step_delay: config.step_delay,
            transition: None,
            hook: None,
        }
    }

    /// Installs or removes the color hook.
    pub fn set_color_hook(&mut self, hook: Option<ColorHook>) {
        self.hook = hook;
    }

    /// Jumps to `color` (`0xRRGGBB`) and writes the LED.
    ///
    /// Bits above the low 24 are ignored. Cancels a tick-driven transition.
    pub fn set_color(&mut self, color: u32) {
        let levels = unpack(color);
        self.red.jump_to(levels.red);
        self.green.jump_to(levels.green);
        self.blue.jump_to(levels.blue);
        self.transition = None;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "set color {=u32:#x} (r={=u8} g={=u8} b={=u8})",
            color,
            levels.red,
            levels.green,
            levels.blue
        );

        self.render();

        if let Some(hook) = self.hook {
            hook(ColorEvent {
                requested: color,
                levels,
            });
        }
    }

    /// Sets brightness in percent, clamped to 100.
    ///
    /// Takes effect on the next write; the LED is not re-rendered here.
    pub fn set_brightness(&mut self, percent: u8) {
        self.brightness = Brightness::from_percent(percent);

        #[cfg(feature = "defmt")]
        defmt::debug!("brightness {=u8}%", self.brightness.percent());
    }

    /// Returns the wiring polarity passed to every write.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns the current brightness.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Returns the step delay used by [`fade_to`](Self::fade_to).
    pub fn default_step_delay(&self) -> StepDelay {
        self.step_delay
    }

    /// Returns the current color as `0xRRGGBB`, before brightness.
    pub fn current_color(&self) -> u32 {
        pack(Srgb::new(self.red.current, self.green.current, self.blue.current))
    }

    /// Returns the color being converged toward as `0xRRGGBB`.
    pub fn target_color(&self) -> u32 {
        pack(Srgb::new(self.red.target, self.green.target, self.blue.target))
    }

    /// Returns the brightness-scaled levels of the last write.
    pub fn output_levels(&self) -> Srgb<u8> {
        Srgb::new(self.red.scaled, self.green.scaled, self.blue.scaled)
    }

    /// Returns the state of one channel.
    pub fn channel(&self, channel: Channel) -> ChannelState {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Starts a transition toward `color` without blocking.
    ///
    /// Nothing is written until the first [`tick`](Self::tick). If the LED
    /// already shows `color` no transition is started.
    pub fn begin_transition(&mut self, color: u32, step_delay: StepDelay) {
        let levels = unpack(color);
        self.red.target = levels.red;
        self.green.target = levels.green;
        self.blue.target = levels.blue;

        if self.is_settled() {
            self.transition = None;
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "transition {=u32:#x} -> {=u32:#x}, {=u32} steps every {=u32} ms",
            self.current_color(),
            self.target_color(),
            self.remaining_steps(),
            step_delay.as_millis()
        );

        self.transition = Some(Transition {
            step_delay,
            due_ms: 0,
        });
    }

    /// Advances a tick-driven transition by `elapsed_ms`.
    ///
    /// The first step is due immediately, later steps every step delay. Enough
    /// elapsed time performs several steps at once; a zero step delay performs
    /// one step per call. Each step writes the LED.
    ///
    /// Returns true once every channel has reached its target, or when no
    /// transition is in progress.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(mut transition) = self.transition.take() else {
            return true;
        };

        let mut budget = elapsed_ms;
        while !self.is_settled() && budget >= transition.due_ms {
            budget -= transition.due_ms;
            self.step();
            transition.due_ms = transition.step_delay.as_millis();
            if transition.due_ms == 0 {
                break;
            }
        }

        if self.is_settled() {
            #[cfg(feature = "defmt")]
            defmt::debug!("transition complete at {=u32:#x}", self.current_color());
            return true;
        }

        transition.due_ms = transition.due_ms.saturating_sub(budget);
        self.transition = Some(transition);
        false
    }

    /// Returns true while a tick-driven transition is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Steps left until the slowest channel reaches its target.
    pub fn remaining_steps(&self) -> u32 {
        self.red
            .distance()
            .max(self.green.distance())
            .max(self.blue.distance()) as u32
    }

    /// Drives the pending transition to its end, sleeping one step delay
    /// after every step. No cancellation, no timeout.
    ///
    /// A transition already advanced by [`tick`](Self::tick) first sleeps only
    /// the time left until its next step is due.
    pub fn run_to_completion<D: DelayNs>(&mut self, delay: &mut D) {
        let Some(transition) = self.transition else {
            return;
        };
        let step_ms = transition.step_delay.as_millis();

        let mut elapsed = transition.due_ms;
        if elapsed > 0 {
            delay.delay_ms(elapsed);
        }
        while self.is_transitioning() {
            self.tick(elapsed);
            delay.delay_ms(step_ms);
            elapsed = step_ms;
        }
    }

    /// Transitions to `color`, blocking until every channel matches.
    ///
    /// Performs one tick per unit of the largest channel distance, each
    /// followed by a `step_delay` sleep.
    pub fn color_transition<D: DelayNs>(&mut self, color: u32, step_delay: StepDelay, delay: &mut D) {
        self.begin_transition(color, step_delay);
        self.run_to_completion(delay);
    }

    /// [`color_transition`](Self::color_transition) at the configured default step delay.
    pub fn fade_to<D: DelayNs>(&mut self, color: u32, delay: &mut D) {
        self.color_transition(color, self.step_delay, delay);
    }

    /// Performs a single action, blocking for transitions and pauses.
    pub fn handle_action<D: DelayNs>(&mut self, action: LedAction, delay: &mut D) {
        match action {
            LedAction::SetColor(color) => self.set_color(color),
            LedAction::Transition { color, step_delay } => {
                self.color_transition(color, step_delay, delay)
            }
            LedAction::SetBrightness(percent) => self.set_brightness(percent),
            LedAction::Pause(ms) => delay.delay_ms(ms),
        }
    }

    /// Plays every action of a choreography in order.
    pub fn play<D: DelayNs, const N: usize>(&mut self, choreography: &Choreography<N>, delay: &mut D) {
        for action in choreography.actions() {
            self.handle_action(*action, delay);
        }
    }

    /// Plays [`Choreography::demo`].
    pub fn demo<D: DelayNs>(&mut self, delay: &mut D) {
        let demo: Choreography<DEMO_LEN> = Choreography::demo();
        self.play(&demo, delay);
    }

    /// Returns a reference to the LED output.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the controller and returns the LED output.
    pub fn release(self) -> L {
        self.led
    }

    fn is_settled(&self) -> bool {
        self.red.is_settled() && self.green.is_settled() && self.blue.is_settled()
    }

    /// One unit step on every channel, then a write.
    fn step(&mut self) {
        self.red.step();
        self.green.step();
        self.blue.step();
        self.render();
    }

    /// Refreshes brightness-scaled levels and writes them.
    fn render(&mut self) {
        let brightness = self.brightness;
        for channel in [&mut self.red, &mut self.green, &mut self.blue] {
            channel.apply_brightness(brightness);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "write r={=u8} g={=u8} b={=u8}",
            self.red.scaled,
            self.green.scaled,
            self.blue.scaled
        );

        let levels = self.output_levels();
        self.led.write_levels(levels, self.polarity);
    }
}
