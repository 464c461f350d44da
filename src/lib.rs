//! RF Scanner Firmware Library
//!
//! This library drives an nRF24L01+ transceiver as a 2.4 GHz band
//! occupancy scanner. Each sweep samples the Received Power Detector on
//! all 126 channels (2.400 - 2.525 GHz, 1 MHz apart) 180 times, the hit
//! counts are normalized to a 10-level ASCII intensity scale and one plot
//! line per sweep is streamed over a serial port.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        RfScanner::init / RfScanner::step  (superloop)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │   SWEEP (radio)     │  NORMALIZE (dsp)   │   PLOT (ui)        │
//! │   RF_CH, CE, RPD    │  counts → symbols  │   header + lines   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   REGISTER INTERFACE                         │
//! │          R_REGISTER / W_REGISTER framed by CSN               │
//! ├─────────────────────────────────────────────────────────────┤
//! │     embedded-hal SpiBus / OutputPin / DelayNs,               │
//! │     embedded-io Write  (embassy-stm32 on target)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Injected peripherals**: the core is generic over embedded-hal
//!   traits, so it runs against a simulated transceiver on the host
//! - **Fixed timing**: datasheet delays are constants, never tunables
//! - **Functional core, imperative shell**: normalization and line
//!   formatting are pure
//! - **Fire-and-forget I/O**: transport errors never surface; hardware
//!   misbehavior only shows up as a wrong plot

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Board helpers: status LED, and timing over embassy-time.
pub mod hal;

/// Radio Control
///
/// nRF24L01+ register access and the channel sweep.
pub mod radio;

/// Signal Processing
///
/// Count normalization.
pub mod dsp;

/// Plot Output
///
/// Header block and data line rendering.
pub mod ui;

/// Scanner Application
///
/// Bring-up and the per-cycle pipeline.
pub mod app;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::app::{Heartbeat, RfScanner};
    pub use crate::config::*;
    pub use crate::hal::gpio::StatusLed;
    pub use crate::hal::timer::{now_ms, Stopwatch};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
