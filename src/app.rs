//! Scanner Application
//!
//! One-time transceiver bring-up and the per-cycle scan → normalize →
//! render pipeline, driven from the firmware superloop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_io::Write;

use crate::config::{HEARTBEAT_PERIOD_MS, POWER_DOWN_TO_STANDBY_US};
use crate::dsp::normalize::normalize;
use crate::radio::registers::{bits, reg, Registers};
use crate::radio::sweep::ChannelEnergyScanner;
use crate::ui::FrameRenderer;

/// The RF scanner: transceiver sweep plus serial plot
pub struct RfScanner<SPI, CS, CE, D, W> {
    scanner: ChannelEnergyScanner<SPI, CS, CE, D>,
    renderer: FrameRenderer<W>,
}

impl<SPI, CS, CE, D, W> RfScanner<SPI, CS, CE, D, W>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    CE: OutputPin,
    D: DelayNs,
    W: Write,
{
    /// Assemble the scanner from its peripherals
    pub fn new(spi: SPI, csn: CS, ce: CE, delay: D, serial: W) -> Self {
        Self {
            scanner: ChannelEnergyScanner::new(Registers::new(spi, csn), ce, delay),
            renderer: FrameRenderer::new(serial),
        }
    }

    /// Configure the nRF24L01+ as a powered-up receiver
    ///
    /// Expects register defaults, i.e. a fresh power cycle.
    pub fn init(&mut self) {
        let regs = self.scanner.registers();

        // The first SPI transaction after power-up is unreliable (cause
        // unknown); spend it on a throwaway read.
        let _ = regs.read(reg::CONFIG);

        // No ShockBurst acks are needed for listening, on any pipe
        regs.write(reg::EN_AA, 0x00);

        regs.set_bits(reg::CONFIG, bits::PRIM_RX);
        regs.set_bits(reg::CONFIG, bits::PWR_UP);

        // No register access until standby is reached
        self.scanner.delay_us(POWER_DOWN_TO_STANDBY_US);

        #[cfg(feature = "embedded")]
        defmt::info!("nRF24L01+ in RX mode, powered up");
    }

    /// One full cycle: sweep, normalize and emit one plot line
    ///
    /// Blocks for the whole sweep.
    pub fn step(&mut self) {
        let frame = self.scanner.scan();
        let (symbols, reference) = normalize(&frame);

        #[cfg(feature = "embedded")]
        defmt::trace!("sweep done, ref={}", reference);

        self.renderer.render(&symbols, reference);
    }

    /// Renderer state, for inspection
    #[must_use]
    pub const fn renderer(&self) -> &FrameRenderer<W> {
        &self.renderer
    }

    /// Tear down into the sweep engine and the serial transport
    pub fn release(self) -> (ChannelEnergyScanner<SPI, CS, CE, D>, W) {
        (self.scanner, self.renderer.release())
    }
}

/// Non-blocking status LED blink timing
///
/// Call [`Heartbeat::poll`] from the superloop; it reports when the LED
/// should be toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    period_ms: u32,
    last_toggle_ms: u32,
}

impl Heartbeat {
    /// Heartbeat with the default 100 ms period
    #[must_use]
    pub const fn new() -> Self {
        Self::with_period(HEARTBEAT_PERIOD_MS)
    }

    /// Heartbeat with a custom period
    #[must_use]
    pub const fn with_period(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_toggle_ms: 0,
        }
    }

    /// Returns true if the LED should toggle at `now_ms`
    ///
    /// Tolerates wrap-around of the millisecond tick.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_toggle_ms) >= self.period_ms {
            self.last_toggle_ms = now_ms;
            true
        } else {
            false
        }
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new()
    }
}
