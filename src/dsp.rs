//! Signal Processing
//!
//! Post-processing of sweep results. The sweep itself lives in
//! [`crate::radio`]; everything here is pure.

pub mod normalize;
