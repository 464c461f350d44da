//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the RF scanner hardware.
//! Pin mappings, bus parameters, nRF24L01+ timing and output layout are
//! centralized here. None of these are runtime tunables.

/// Number of RF channels scanned (nRF24L01+ datasheet 6.3)
pub const CHANNEL_COUNT: usize = 126;

/// Number of times every channel is sampled per sweep
pub const SWEEP_REPEATS: u16 = 180;

/// Carrier frequency of channel 0 in MHz
pub const BASE_FREQUENCY_MHZ: u16 = 2400;

/// Standby-I to RX mode transition time (`Tstby2a`) in microseconds
pub const STANDBY_TO_RX_DELAY_US: u32 = 130;

/// Automatic gain control settling time (`Tdelay_AGC`) in microseconds
pub const AGC_SETTLE_DELAY_US: u32 = 40;

/// Time CE must stay high before the RPD flag is valid
///
/// This is a lower bound set by the transceiver state machine. Shorter
/// windows give unreliable RPD readings.
pub const SETTLE_WINDOW_US: u32 = STANDBY_TO_RX_DELAY_US + AGC_SETTLE_DELAY_US;

/// Power down to standby transition time (`Tpd2stby`) in microseconds
pub const POWER_DOWN_TO_STANDBY_US: u32 = 1500;

/// Total blocking time of one sweep in microseconds (3.86 s)
pub const SWEEP_DURATION_US: u32 =
    SWEEP_REPEATS as u32 * CHANNEL_COUNT as u32 * SETTLE_WINDOW_US;

/// Data lines emitted between two header blocks
pub const HEADER_INTERVAL: u8 = 18;

/// Number of intensity levels (symbol alphabet size)
pub const SYMBOL_LEVELS: u8 = 10;

/// Intensity alphabet, quietest first
pub const ALPHABET: &[u8; SYMBOL_LEVELS as usize] = b" .:-=+*#%@";

/// Length of one output line in bytes, including the trailing newline
///
/// `"|" + 126 symbols + "| " + 3 digits + " | " + 3 digits + " |\n"`
pub const LINE_LEN: usize = 1 + CHANNEL_COUNT + 2 + 3 + 3 + 3 + 3;

/// Number of lines in the header block
pub const HEADER_LINES: usize = 5;

/// USART2 baud rate for the plot stream
pub const UART_BAUD: u32 = 115_200;

/// SPI1 clock for the nRF24L01+ (max 10 MHz, kept conservative)
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Status LED toggle period in milliseconds
pub const HEARTBEAT_PERIOD_MS: u32 = 100;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the Blue Pill wiring

    /// Status LED (on-board, active low)
    pub const LED_STATUS: &str = "PC13";

    /// SPI1 SCK to nRF24L01+ SCK
    pub const SPI1_SCK: &str = "PA5";

    /// SPI1 MISO to nRF24L01+ MISO
    pub const SPI1_MISO: &str = "PA6";

    /// SPI1 MOSI to nRF24L01+ MOSI
    pub const SPI1_MOSI: &str = "PA7";

    /// nRF24L01+ CSN (chip select, active low)
    pub const NRF_CSN: &str = "PB0";

    /// nRF24L01+ CE (radio enable, active high)
    pub const NRF_CE: &str = "PB1";

    /// USART2 TX (plot output)
    pub const USART2_TX: &str = "PA2";
}
