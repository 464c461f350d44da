//! Status LED
//!
//! Heartbeat LED on any push-pull output. The Blue Pill LED on PC13 is
//! wired active low.

use embedded_hal::digital::OutputPin;

use crate::app::Heartbeat;

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "off"),
            Self::On => defmt::write!(f, "on"),
        }
    }
}

/// Active-low status LED blinking on a [`Heartbeat`]
pub struct StatusLed<P> {
    pin: P,
    state: LedState,
    heartbeat: Heartbeat,
}

impl<P: OutputPin> StatusLed<P> {
    /// Take the pin and drive the LED off
    #[must_use]
    pub fn new(pin: P) -> Self {
        let mut led = Self {
            pin,
            state: LedState::On,
            heartbeat: Heartbeat::new(),
        };
        led.toggle();
        led
    }

    /// Flip the LED
    pub fn toggle(&mut self) {
        // Pin errors are ignored, the state tracks what was requested
        self.state = match self.state {
            LedState::Off => {
                let _ = self.pin.set_low();
                LedState::On
            }
            LedState::On => {
                let _ = self.pin.set_high();
                LedState::Off
            }
        };
    }

    /// Toggle if the heartbeat period has elapsed; returns whether it did
    pub fn blink(&mut self, now_ms: u32) -> bool {
        let due = self.heartbeat.poll(now_ms);
        if due {
            self.toggle();
        }
        due
    }

    /// Last requested state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}
