//! Shared types used across the RF scanner firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{ALPHABET, BASE_FREQUENCY_MHZ, CHANNEL_COUNT, SWEEP_REPEATS, SYMBOL_LEVELS};

/// nRF24L01+ RF channel
///
/// Channel `i` is the 1 MHz wide carrier at `2400 + i` MHz.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Lowest channel (2.400 GHz)
    pub const MIN: Self = Self(0);

    /// Highest channel (2.525 GHz)
    pub const MAX: Self = Self(CHANNEL_COUNT as u8 - 1);

    /// Create a channel from its index, returns None if out of range
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CHANNEL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Channel index, as written into `RF_CH`
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Carrier frequency in MHz
    #[must_use]
    pub const fn frequency_mhz(self) -> u16 {
        BASE_FREQUENCY_MHZ + self.0 as u16
    }

    /// All channels in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CHANNEL_COUNT as u8).map(Self)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({} @ {} MHz)", self.0, self.frequency_mhz())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CH{} ({} MHz)", self.0, self.frequency_mhz());
    }
}

/// RPD detection counts of one sweep, one entry per channel
///
/// Every count stays within `0..=SWEEP_REPEATS`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ScanFrame {
    counts: [u8; CHANNEL_COUNT],
}

impl ScanFrame {
    /// Create a frame with every channel silent
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; CHANNEL_COUNT],
        }
    }

    /// Build a frame from raw counts, clamping each to `SWEEP_REPEATS`
    #[must_use]
    pub fn from_counts(mut counts: [u8; CHANNEL_COUNT]) -> Self {
        for count in &mut counts {
            *count = (*count).min(SWEEP_REPEATS as u8);
        }
        Self { counts }
    }

    /// Count one RPD hit on a channel
    pub fn record_detection(&mut self, channel: Channel) {
        let count = &mut self.counts[channel.index() as usize];
        if u16::from(*count) < SWEEP_REPEATS {
            *count += 1;
        }
    }

    /// Detection count of one channel
    #[must_use]
    pub const fn count(&self, channel: Channel) -> u8 {
        self.counts[channel.index() as usize]
    }

    /// All counts, indexed by channel
    #[must_use]
    pub const fn counts(&self) -> &[u8; CHANNEL_COUNT] {
        &self.counts
    }

    /// Largest count in the frame (the normalization reference)
    #[must_use]
    pub fn reference_max(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// True if no channel saw any energy
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for ScanFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanFrame")
            .field("reference_max", &self.reference_max())
            .field("counts", &&self.counts[..])
            .finish()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ScanFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ScanFrame(max={})", self.reference_max());
    }
}

/// Intensity symbol, level 0 (silent) to 9 (loudest)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Symbol(u8);

impl Symbol {
    /// Silent channel
    pub const SILENT: Self = Self(0);

    /// Weakest non-silent level
    pub const WEAKEST: Self = Self(1);

    /// Loudest level
    pub const LOUDEST: Self = Self(SYMBOL_LEVELS - 1);

    /// Create a symbol from its level, returns None above level 9
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        if level < SYMBOL_LEVELS {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Intensity level (alphabet index)
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// ASCII byte for this level
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        ALPHABET[self.0 as usize]
    }

    /// Character for this level
    #[must_use]
    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Symbol {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "'{}'", self.as_char());
    }
}

/// One symbol per channel, in channel order
///
/// Always exactly `CHANNEL_COUNT` ASCII bytes; the fixed length takes
/// the place of a string terminator.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SymbolSequence {
    bytes: [u8; CHANNEL_COUNT],
}

impl SymbolSequence {
    /// Sequence with every channel silent
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            bytes: [ALPHABET[0]; CHANNEL_COUNT],
        }
    }

    /// Set the symbol of one channel
    pub fn set(&mut self, channel: Channel, symbol: Symbol) {
        self.bytes[channel.index() as usize] = symbol.as_byte();
    }

    /// Symbol of one channel
    #[must_use]
    pub fn symbol(&self, channel: Channel) -> Symbol {
        let byte = self.bytes[channel.index() as usize];
        let level = ALPHABET.iter().position(|&b| b == byte).unwrap_or(0);
        Symbol(level as u8)
    }

    /// Raw ASCII bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CHANNEL_COUNT] {
        &self.bytes
    }

    /// The sequence as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only alphabet bytes are ever stored, all of them ASCII
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }
}

impl Default for SymbolSequence {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolSequence(\"{}\")", self.as_str())
    }
}

impl fmt::Display for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SymbolSequence {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
