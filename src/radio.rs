//! Radio Control
//!
//! nRF24L01+ register access and the timed channel sweep.

pub mod registers;
pub mod sweep;
