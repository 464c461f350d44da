//! Channel Energy Sweep
//!
//! Samples the RPD flag on every channel `SWEEP_REPEATS` times and
//! counts the hits. One sweep blocks for `SWEEP_DURATION_US` (~3.86 s);
//! there is no way to cancel it and no partial result.
//!
//! Per sample (datasheet 6.1.4, 6.4):
//!
//! ```text
//!  RF_CH <- ch    CE high    wait Tstby2a + Tdelay_AGC    CE low    read RPD
//!  ───────────────┐▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔┌───────────────────
//!                 └──────────── 130 us + 40 us ─────────┘  RPD latched here
//! ```
//!
//! The RPD flag is only valid for a signal above -64 dBm present for at
//! least 40 us, after the full settle window.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::registers::{bits, reg, Registers};
use crate::config::{SETTLE_WINDOW_US, SWEEP_DURATION_US, SWEEP_REPEATS};
use crate::types::{Channel, ScanFrame};

/// Radio enable line (CE, active high)
pub struct RadioEnable<P> {
    pin: P,
}

impl<P: OutputPin> RadioEnable<P> {
    /// Wrap the CE pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Start an RX attempt on the configured channel (CE high)
    pub fn assert(&mut self) {
        let _ = self.pin.set_high();
    }

    /// Leave RX, latching RPD (CE low)
    pub fn deassert(&mut self) {
        let _ = self.pin.set_low();
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

/// Channel energy scanner
///
/// Exclusively owns the transceiver: the register interface, the CE
/// line and the microsecond delay.
pub struct ChannelEnergyScanner<SPI, CS, CE, D> {
    regs: Registers<SPI, CS>,
    ce: RadioEnable<CE>,
    delay: D,
}

impl<SPI, CS, CE, D> ChannelEnergyScanner<SPI, CS, CE, D>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    CE: OutputPin,
    D: DelayNs,
{
    /// Create a scanner. CE is driven low so the radio starts in standby.
    pub fn new(regs: Registers<SPI, CS>, ce: CE, delay: D) -> Self {
        let mut ce = RadioEnable::new(ce);
        ce.deassert();
        Self { regs, ce, delay }
    }

    /// Expected blocking time of [`Self::scan`] in microseconds
    #[must_use]
    pub const fn sweep_duration_us() -> u32 {
        SWEEP_DURATION_US
    }

    /// Register interface, for bring-up
    pub fn registers(&mut self) -> &mut Registers<SPI, CS> {
        &mut self.regs
    }

    /// Block for a number of microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Run one full sweep
    ///
    /// Outer loop is the repeat pass, inner loop the channel: pass `k`
    /// covers channels 0..=125 in order before pass `k + 1` starts.
    pub fn scan(&mut self) -> ScanFrame {
        let mut frame = ScanFrame::new();

        for _ in 0..SWEEP_REPEATS {
            for channel in Channel::all() {
                if self.sample(channel) {
                    frame.record_detection(channel);
                }
            }
        }

        frame
    }

    /// Take one RPD sample on a channel
    fn sample(&mut self, channel: Channel) -> bool {
        self.regs.write(reg::RF_CH, channel.index());
        self.ce.assert();
        self.delay.delay_us(SETTLE_WINDOW_US);
        self.ce.deassert();

        self.regs.read(reg::RPD) & bits::RPD != 0
    }

    /// Release the hardware
    pub fn release(self) -> (Registers<SPI, CS>, CE, D) {
        (self.regs, self.ce.release(), self.delay)
    }
}
