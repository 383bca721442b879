//! Shared test infrastructure for pwm-rgb-led integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::{self, ErrorKind, ErrorType, SetDutyCycle};
use palette::Srgb;
use pwm_rgb_led::{LedOutput, Polarity};

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every write for testing
pub struct MockLed {
    history: heapless::Vec<Srgb<u8>, 1024>,
    polarity: Option<Polarity>,
    writes: usize,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
            polarity: None,
            writes: 0,
        }
    }

    pub fn last_levels(&self) -> Option<Srgb<u8>> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Srgb<u8>] {
        &self.history
    }

    /// Polarity passed with the most recent write
    pub fn last_polarity(&self) -> Option<Polarity> {
        self.polarity
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LedOutput for MockLed {
    fn write_levels(&mut self, levels: Srgb<u8>, polarity: Polarity) {
        self.writes += 1;
        self.polarity = Some(polarity);
        let _ = self.history.push(levels);
    }
}

// ============================================================================
// Mock PWM channel
// ============================================================================

#[derive(Debug)]
pub struct MockPwmError;

impl pwm::Error for MockPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// PWM channel that stores its duty cycle in a shared cell
pub struct MockChannel<'a> {
    duty: &'a Cell<u16>,
    writes: &'a Cell<usize>,
    max_duty: u16,
    fail: bool,
}

impl<'a> MockChannel<'a> {
    pub fn new(duty: &'a Cell<u16>, writes: &'a Cell<usize>, max_duty: u16) -> Self {
        Self {
            duty,
            writes,
            max_duty,
            fail: false,
        }
    }

    /// Channel whose every write is rejected
    pub fn failing(duty: &'a Cell<u16>, writes: &'a Cell<usize>, max_duty: u16) -> Self {
        Self {
            fail: true,
            ..Self::new(duty, writes, max_duty)
        }
    }
}

impl ErrorType for MockChannel<'_> {
    type Error = MockPwmError;
}

impl SetDutyCycle for MockChannel<'_> {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPwmError);
        }
        self.duty.set(duty);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Duty cells and write counters for the three channels of one LED
pub struct MockPins {
    pub duty: [Cell<u16>; 3],
    pub writes: [Cell<usize>; 3],
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            duty: [Cell::new(0), Cell::new(0), Cell::new(0)],
            writes: [Cell::new(0), Cell::new(0), Cell::new(0)],
        }
    }

    pub fn channels(&self, max_duty: u16) -> (MockChannel<'_>, MockChannel<'_>, MockChannel<'_>) {
        (
            MockChannel::new(&self.duty[0], &self.writes[0], max_duty),
            MockChannel::new(&self.duty[1], &self.writes[1], max_duty),
            MockChannel::new(&self.duty[2], &self.writes[2], max_duty),
        )
    }

    pub fn duties(&self) -> (u16, u16, u16) {
        (self.duty[0].get(), self.duty[1].get(), self.duty[2].get())
    }
}

// ============================================================================
// Mock delay
// ============================================================================

/// Delay that records requested sleeps instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    pub calls: usize,
    pub total_ms: u64,
    pub last_ms: Option<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms as u64;
        self.last_ms = Some(ms);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn levels(red: u8, green: u8, blue: u8) -> Srgb<u8> {
    Srgb::new(red, green, blue)
}
