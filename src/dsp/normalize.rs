//! Count Normalization
//!
//! Maps the RPD counts of a sweep onto the 10-level intensity alphabet,
//! relative to the loudest channel of the same sweep.
//!
//! `level = round(count * 9 / ref)` with halves rounded up, computed in
//! integers as `(2 * count * 9 + ref) / (2 * ref)`. A channel with at
//! least one hit is never shown as silent, so level 0 is lifted to 1.

use crate::config::SYMBOL_LEVELS;
use crate::types::{Channel, ScanFrame, Symbol, SymbolSequence};

/// Highest intensity level
const TOP_LEVEL: u16 = SYMBOL_LEVELS as u16 - 1;

/// Intensity level of a single count against the sweep reference
///
/// `reference` must be the maximum of the frame `count` came from.
#[must_use]
pub fn level(count: u8, reference: u8) -> Symbol {
    if count == 0 || reference == 0 {
        return Symbol::SILENT;
    }

    let count = u16::from(count);
    let reference = u16::from(reference);
    let rounded = (2 * count * TOP_LEVEL + reference) / (2 * reference);

    match rounded {
        0 => Symbol::WEAKEST,
        n => Symbol::from_level(n.min(TOP_LEVEL) as u8).unwrap_or(Symbol::LOUDEST),
    }
}

/// Normalize a sweep into symbols plus its reference maximum
///
/// Pure: the same frame always gives the same result. Symbol `i`
/// belongs to channel `i`.
#[must_use]
pub fn normalize(frame: &ScanFrame) -> (SymbolSequence, u8) {
    let reference = frame.reference_max();
    let mut symbols = SymbolSequence::silent();

    if reference == 0 {
        return (symbols, 0);
    }

    for channel in Channel::all() {
        symbols.set(channel, level(frame.count(channel), reference));
    }

    (symbols, reference)
}
