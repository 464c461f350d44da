//! Simulated nRF24L01+ for host tests
//!
//! Implements the embedded-hal / embedded-io traits the scanner is generic
//! over, backed by one shared register model and a virtual microsecond
//! clock. RPD is latched on the CE falling edge and only reads 1 if the
//! channel carried energy for that sample, the radio is a powered-up
//! receiver and CE stayed high for the full settle window.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use rf_scanner::config::{CHANNEL_COUNT, POWER_DOWN_TO_STANDBY_US, SETTLE_WINDOW_US};

/// Register addresses used in assertions
pub const CONFIG: u8 = 0x00;
pub const EN_AA: u8 = 0x01;
pub const RF_CH: u8 = 0x05;
pub const RPD: u8 = 0x09;

/// Energy source: `(channel, sample index on that channel) -> present`
pub type EnergyFn = Box<dyn FnMut(u8, u32) -> bool>;

/// One completed CSN-framed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Bytes written on MOSI
    pub mosi: Vec<u8>,
    /// Bytes returned on MISO for explicit reads
    pub miso: Vec<u8>,
    /// Virtual time at CSN low, in microseconds
    pub at_us: u64,
}

/// Ordered log of line and bus activity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// CSN driven low
    CsnLow,
    /// CSN driven high
    CsnHigh,
    /// CE driven high
    CeHigh,
    /// CE driven low
    CeLow,
    /// Delay requested, in microseconds
    DelayUs(u32),
}

/// Register model and bookkeeping
pub struct Nrf24Sim {
    /// Register file
    pub regs: [u8; 32],
    /// Virtual clock in nanoseconds
    pub now_ns: u64,
    /// Drop the first transaction after power-up
    pub glitch_first: bool,
    /// Record every transaction and event
    pub logging: bool,
    /// Completed transactions (when logging)
    pub transactions: Vec<Transaction>,
    /// Line and delay events (when logging)
    pub events: Vec<Event>,
    /// Number of completed transactions
    pub transaction_count: usize,
    /// CE pulses as `(channel, high time in us)` (when logging)
    pub ce_pulses: Vec<(u8, u64)>,
    /// Number of CE pulses
    pub ce_pulse_count: usize,
    /// CE pulses shorter than the settle window
    pub short_settles: usize,
    /// Transactions started before the power-up delay elapsed
    pub early_accesses: usize,
    /// Transactions while CE was high
    pub accesses_during_rx: usize,
    csn_low: bool,
    ce_high: bool,
    ce_rise_ns: u64,
    current: Vec<u8>,
    current_miso: Vec<u8>,
    current_at_ns: u64,
    powered_up_at_ns: Option<u64>,
    samples: [u32; CHANNEL_COUNT],
    energy: EnergyFn,
}

impl Nrf24Sim {
    /// Power-on register defaults (datasheet 9.1)
    fn reset_registers() -> [u8; 32] {
        let mut regs = [0u8; 32];
        regs[CONFIG as usize] = 0x08;
        regs[EN_AA as usize] = 0x3F;
        regs[0x02] = 0x03;
        regs[0x03] = 0x03;
        regs[0x04] = 0x03;
        regs[RF_CH as usize] = 0x02;
        regs[0x06] = 0x0F;
        regs[0x07] = 0x0E;
        regs
    }

    /// A transceiver with the given energy source
    pub fn new(energy: EnergyFn) -> Self {
        Self {
            regs: Self::reset_registers(),
            now_ns: 0,
            glitch_first: false,
            logging: false,
            transactions: Vec::new(),
            events: Vec::new(),
            transaction_count: 0,
            ce_pulses: Vec::new(),
            ce_pulse_count: 0,
            short_settles: 0,
            early_accesses: 0,
            accesses_during_rx: 0,
            csn_low: false,
            ce_high: false,
            ce_rise_ns: 0,
            current: Vec::new(),
            current_miso: Vec::new(),
            current_at_ns: 0,
            powered_up_at_ns: None,
            samples: [0; CHANNEL_COUNT],
            energy,
        }
    }

    /// A band with no energy anywhere
    pub fn quiet() -> Self {
        Self::new(Box::new(|_, _| false))
    }

    /// A transceiver already configured as a powered-up receiver
    pub fn listening(energy: EnergyFn) -> Self {
        let mut sim = Self::new(energy);
        sim.regs[CONFIG as usize] |= 0x03;
        sim.powered_up_at_ns = Some(0);
        sim.now_ns = u64::from(POWER_DOWN_TO_STANDBY_US) * 1_000;
        sim
    }

    /// Virtual time in microseconds
    pub fn now_us(&self) -> u64 {
        self.now_ns / 1_000
    }

    /// Value of one register
    pub fn reg(&self, address: u8) -> u8 {
        self.regs[address as usize]
    }

    fn is_receiving(&self) -> bool {
        self.reg(CONFIG) & 0x03 == 0x03
    }

    fn dropping_current(&self) -> bool {
        self.glitch_first && self.transaction_count == 0
    }

    fn csn(&mut self, low: bool) {
        if low && !self.csn_low {
            self.current.clear();
            self.current_miso.clear();
            self.current_at_ns = self.now_ns;
            if let Some(at) = self.powered_up_at_ns {
                if self.now_ns < at + u64::from(POWER_DOWN_TO_STANDBY_US) * 1_000 {
                    self.early_accesses += 1;
                }
            }
            if self.ce_high {
                self.accesses_during_rx += 1;
            }
        } else if !low && self.csn_low {
            if self.logging {
                self.transactions.push(Transaction {
                    mosi: self.current.clone(),
                    miso: self.current_miso.clone(),
                    at_us: self.current_at_ns / 1_000,
                });
            }
            self.transaction_count += 1;
        }
        self.csn_low = low;
        self.log(if low { Event::CsnLow } else { Event::CsnHigh });
    }

    fn ce(&mut self, high: bool) {
        if high && !self.ce_high {
            self.ce_rise_ns = self.now_ns;
        } else if !high && self.ce_high {
            self.latch_rpd();
        }
        self.ce_high = high;
        self.log(if high { Event::CeHigh } else { Event::CeLow });
    }

    fn latch_rpd(&mut self) {
        let high_us = (self.now_ns - self.ce_rise_ns) / 1_000;
        let channel = self.reg(RF_CH);
        let index = channel as usize % CHANNEL_COUNT;
        let sample = self.samples[index];
        self.samples[index] += 1;

        let settled = high_us >= u64::from(SETTLE_WINDOW_US);
        if !settled {
            self.short_settles += 1;
        }
        let present = (self.energy)(channel, sample);
        self.regs[RPD as usize] = u8::from(present && settled && self.is_receiving());

        self.ce_pulse_count += 1;
        if self.logging {
            self.ce_pulses.push((channel, high_us));
        }
    }

    fn mosi(&mut self, byte: u8) {
        if !self.csn_low {
            return;
        }
        self.current.push(byte);

        if self.current.len() == 2 && !self.dropping_current() {
            let command = self.current[0];
            if command & 0xE0 == 0x20 {
                let address = command & 0x1F;
                let was_up = self.reg(CONFIG) & 0x02 != 0;
                self.regs[address as usize] = byte;
                if address == CONFIG && !was_up && byte & 0x02 != 0 {
                    self.powered_up_at_ns = Some(self.now_ns);
                }
            }
        }
    }

    fn miso(&mut self) -> u8 {
        let value = match self.current.first() {
            _ if self.dropping_current() => 0xFF,
            Some(&command) if command & 0xE0 == 0x00 => self.reg(command & 0x1F),
            _ => 0x0E,
        };
        self.current_miso.push(value);
        value
    }

    fn advance(&mut self, ns: u64) {
        self.now_ns += ns;
    }

    fn log(&mut self, event: Event) {
        if self.logging {
            self.events.push(event);
        }
    }
}

/// Shared handle to the simulated transceiver
pub type SharedSim = Rc<RefCell<Nrf24Sim>>;

/// SPI bus into the simulator
pub struct SimSpi(pub SharedSim);

impl spi::ErrorType for SimSpi {
    type Error = Infallible;
}

impl SpiBus<u8> for SimSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        for word in words {
            *word = sim.miso();
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        for &word in words {
            sim.mosi(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        for (i, &word) in write.iter().enumerate() {
            let out = sim.miso();
            if let Some(slot) = read.get_mut(i) {
                *slot = out;
            }
            sim.mosi(word);
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        for word in words {
            let out = sim.miso();
            sim.mosi(*word);
            *word = out;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Which control line a pin drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// CSN
    ChipSelect,
    /// CE
    RadioEnable,
}

/// Control line into the simulator
pub struct SimPin {
    sim: SharedSim,
    line: Line,
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.sim.borrow_mut();
        match self.line {
            Line::ChipSelect => sim.csn(true),
            Line::RadioEnable => sim.ce(false),
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.sim.borrow_mut();
        match self.line {
            Line::ChipSelect => sim.csn(false),
            Line::RadioEnable => sim.ce(true),
        }
        Ok(())
    }
}

/// Virtual clock delay
pub struct SimDelay(pub SharedSim);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().advance(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        let mut sim = self.0.borrow_mut();
        sim.log(Event::DelayUs(us));
        sim.advance(u64::from(us) * 1_000);
    }
}

/// Captured serial output
#[derive(Clone, Default)]
pub struct SimSerial(pub Rc<RefCell<Vec<u8>>>);

impl SimSerial {
    /// Everything written so far, as text
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("plot output is ASCII")
    }

    /// Output split into lines (newline kept off)
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }
}

impl embedded_io::ErrorType for SimSerial {
    type Error = Infallible;
}

impl embedded_io::Write for SimSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A simulator plus the peripheral handles wired to it
pub struct Rig {
    /// Shared transceiver model
    pub sim: SharedSim,
    /// Serial capture
    pub serial: SimSerial,
}

impl Rig {
    /// Wrap a transceiver model
    pub fn new(sim: Nrf24Sim) -> Self {
        Self {
            sim: Rc::new(RefCell::new(sim)),
            serial: SimSerial::default(),
        }
    }

    /// SPI bus handle
    pub fn spi(&self) -> SimSpi {
        SimSpi(Rc::clone(&self.sim))
    }

    /// CSN pin handle
    pub fn csn(&self) -> SimPin {
        SimPin {
            sim: Rc::clone(&self.sim),
            line: Line::ChipSelect,
        }
    }

    /// CE pin handle
    pub fn ce(&self) -> SimPin {
        SimPin {
            sim: Rc::clone(&self.sim),
            line: Line::RadioEnable,
        }
    }

    /// Delay handle
    pub fn delay(&self) -> SimDelay {
        SimDelay(Rc::clone(&self.sim))
    }

    /// Serial handle
    pub fn serial(&self) -> SimSerial {
        self.serial.clone()
    }
}

/// Energy on a fixed number of passes per channel: channel `c` is hot in
/// its first `hits[c]` samples
pub fn hits_per_channel(hits: [u32; CHANNEL_COUNT]) -> EnergyFn {
    Box::new(move |channel, sample| sample < hits[channel as usize % CHANNEL_COUNT])
}

/// SPI bus whose every call fails
pub struct BrokenSpi;

impl spi::ErrorType for BrokenSpi {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for BrokenSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }
}

/// Pin whose every call fails
pub struct BrokenPin;

impl digital::ErrorType for BrokenPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

/// Serial port that rejects every write
pub struct BrokenSerial;

impl embedded_io::ErrorType for BrokenSerial {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for BrokenSerial {
    fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
        Err(embedded_io::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Err(embedded_io::ErrorKind::Other)
    }
}

/// Delay that only counts requested microseconds
#[derive(Default)]
pub struct CountingDelay {
    /// Total requested
    pub total_us: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_us += u64::from(ns) / 1_000;
    }

    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
    }
}
