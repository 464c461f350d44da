//! nRF24L01+ Register Interface
//!
//! Byte-level register access over SPI with a software chip-select line
//! (datasheet chapters 8 and 9.1). Every transaction is framed by CSN
//! going low and back high.
//!
//! Transport results are not observed: a failed SPI or GPIO call leaves
//! the transaction as it is and a failed read yields `0x00`.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// nRF24L01+ register addresses
pub mod reg {
    /// Configuration register
    pub const CONFIG: u8 = 0x00;
    /// Enhanced ShockBurst auto acknowledgment, one bit per pipe
    pub const EN_AA: u8 = 0x01;
    /// RF channel
    pub const RF_CH: u8 = 0x05;
    /// Received power detector
    pub const RPD: u8 = 0x09;
}

/// Register bit masks
pub mod bits {
    /// `CONFIG.PRIM_RX`: primary receiver mode
    pub const PRIM_RX: u8 = 1 << 0;
    /// `CONFIG.PWR_UP`: power up
    pub const PWR_UP: u8 = 1 << 1;
    /// `RPD.RPD`: received power above -64 dBm
    pub const RPD: u8 = 1 << 0;
}

/// SPI command words
mod cmd {
    /// `R_REGISTER`: `0b000A_AAAA`
    pub const R_REGISTER: u8 = 0b0000_0000;
    /// `W_REGISTER`: `0b001A_AAAA`
    pub const W_REGISTER: u8 = 0b0010_0000;
    /// Register address field
    pub const ADDRESS_MASK: u8 = 0b0001_1111;
}

/// Read command byte for a register
#[must_use]
pub const fn read_command(register: u8) -> u8 {
    cmd::R_REGISTER | (register & cmd::ADDRESS_MASK)
}

/// Write command byte for a register
#[must_use]
pub const fn write_command(register: u8) -> u8 {
    cmd::W_REGISTER | (register & cmd::ADDRESS_MASK)
}

/// Chip-select line (CSN, active low)
pub struct ChipSelect<P> {
    pin: P,
}

impl<P: OutputPin> ChipSelect<P> {
    /// Wrap the CSN pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Start a transaction (CSN low)
    pub fn assert(&mut self) {
        let _ = self.pin.set_low();
    }

    /// End a transaction (CSN high)
    pub fn deassert(&mut self) {
        let _ = self.pin.set_high();
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

/// Register access to the nRF24L01+
pub struct Registers<SPI, CS> {
    spi: SPI,
    csn: ChipSelect<CS>,
}

impl<SPI, CS> Registers<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create the interface from an SPI bus and the CSN pin
    pub fn new(spi: SPI, csn: CS) -> Self {
        Self {
            spi,
            csn: ChipSelect::new(csn),
        }
    }

    /// Read a single register
    pub fn read(&mut self, register: u8) -> u8 {
        let mut value = [0u8];

        self.csn.assert();
        let _ = self.spi.write(&[read_command(register)]);
        let _ = self.spi.read(&mut value);
        let _ = self.spi.flush();
        self.csn.deassert();

        value[0]
    }

    /// Write a single register
    pub fn write(&mut self, register: u8, value: u8) {
        self.csn.assert();
        let _ = self.spi.write(&[write_command(register)]);
        let _ = self.spi.write(&[value]);
        let _ = self.spi.flush();
        self.csn.deassert();
    }

    /// Read-modify-write: set `mask` bits in a register
    pub fn set_bits(&mut self, register: u8, mask: u8) {
        let value = self.read(register);
        self.write(register, value | mask);
    }

    /// Release the bus and the CSN pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.csn.release())
    }
}
