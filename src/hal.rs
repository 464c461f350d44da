//! Hardware Abstraction Layer
//!
//! Board-side helpers for the STM32F103 Blue Pill. The scanner core does
//! not depend on this module; it only sees the embedded-hal traits that the
//! embassy drivers implement. `gpio` is generic over those traits too and
//! builds on the host; `timer` needs the embassy time driver.

pub mod gpio;
#[cfg(feature = "embedded")]
pub mod timer;
