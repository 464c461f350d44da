//! RF Scanner Main Application
//!
//! Entry point for the STM32F103 + nRF24L01+ band scanner.
//! Brings up the board, configures the transceiver once and then runs the
//! scan/plot superloop forever.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, UartTx};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use rf_scanner::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RF Scanner Firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    let led = StatusLed::new(Output::new(p.PC13, Level::High, Speed::Low));

    // SPI1: PA5 = SCK, PA7 = MOSI, PA6 = MISO, mode 0
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);

    // CSN idles high, CE idles low (standby)
    let csn = Output::new(p.PB0, Level::High, Speed::VeryHigh);
    let ce = Output::new(p.PB1, Level::Low, Speed::VeryHigh);

    info!("SPI1 initialized at {} Hz", SPI_FREQUENCY_HZ);

    // USART2 TX on PA2 carries the plot
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = UART_BAUD;
    let serial = unwrap!(UartTx::new_blocking(p.USART2, p.PA2, uart_config));

    info!("USART2 initialized at {} baud", UART_BAUD);

    let bring_up = Stopwatch::default();
    let mut scanner = RfScanner::new(spi, csn, ce, Delay, serial);
    scanner.init();
    info!("Transceiver ready after {}", bring_up);

    info!(
        "Scanning {} channels x {} repeats (~{} ms per sweep)",
        CHANNEL_COUNT,
        SWEEP_REPEATS,
        SWEEP_DURATION_US / 1000
    );

    superloop(scanner, led)
}

/// Scan and plot forever, blinking the status LED once per pass
fn superloop<SPI, CS, CE, D, W>(
    mut scanner: RfScanner<SPI, CS, CE, D, W>,
    mut led: StatusLed<Output<'_>>,
) -> !
where
    SPI: embedded_hal::spi::SpiBus<u8>,
    CS: OutputPin,
    CE: OutputPin,
    D: embedded_hal::delay::DelayNs,
    W: embedded_io::Write,
{
    let mut lap = Stopwatch::default();

    loop {
        if led.blink(now_ms()) {
            trace!("LED {}", led.state());
        }

        scanner.step();
        info!("Sweep took {} ms", lap.restart().as_millis());
    }
}
