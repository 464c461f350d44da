//! Plot Output
//!
//! Formats sweep results as fixed-width ASCII lines on the serial link.
//! A five line frequency axis header is repeated every `HEADER_INTERVAL`
//! data lines so a scrolling terminal always shows one nearby:
//!
//! ```text
//! |----- ... -----|-----|-----|
//! |Frequency layout [GHz] ...|Ref. |Max. |
//! |2.4       2.41  ...       |RPD  |RPD  |
//! ||         |     ...       |[pcs]|[pcs]|
//! |----- ... -----|-----|-----|
//! |  .:-=+*#%@ ... | 180 | 180 |
//! ```
//!
//! Every line, header or data, is exactly `LINE_LEN` bytes including the
//! newline. Nothing else goes on the wire: older firmware for this scanner
//! sent a trailing NUL byte after each data line and after the header
//! block, this renderer does not. Serial write errors are not reported.

use core::fmt::Write as _;

use embedded_io::Write;
use heapless::String;

use crate::config::{HEADER_INTERVAL, HEADER_LINES, LINE_LEN, SWEEP_REPEATS};
use crate::types::SymbolSequence;

/// Header block lines, without newlines
pub const HEADER_ROWS: [&str; HEADER_LINES] = [
    "|------------------------------------------------------------------------------------------------------------------------------|-----|-----|",
    "|Frequency layout [GHz]                                                                                                        |Ref. |Max. |",
    "|2.4       2.41      2.42      2.43      2.44      2.45      2.46      2.47      2.48      2.49      2.5       2.51      2.52  |RPD  |RPD  |",
    "||         |         |         |         |         |         |         |         |         |         |         |         |     |[pcs]|[pcs]|",
    "|------------------------------------------------------------------------------------------------------------------------------|-----|-----|",
];

/// One formatted output line
pub type Line = String<LINE_LEN>;

/// Format one data line
///
/// `"|" + symbols + "| " + ref (3 wide) + " | " + repeats (3 wide) + " |\n"`
#[must_use]
pub fn format_data_line(symbols: &SymbolSequence, reference: u8) -> Line {
    let mut line = Line::new();
    // Capacity is exactly one line and both numeric fields fit in 3 digits
    let _ = writeln!(
        line,
        "|{}| {:>3} | {:>3} |",
        symbols.as_str(),
        reference,
        SWEEP_REPEATS
    );
    line
}

/// Serial plot renderer
///
/// Owns the serial transport and the line counter that decides when the
/// header is due.
pub struct FrameRenderer<W> {
    serial: W,
    lines_since_header: u8,
}

impl<W: Write> FrameRenderer<W> {
    /// Create a renderer; the first line is preceded by a header
    pub fn new(serial: W) -> Self {
        Self {
            serial,
            lines_since_header: HEADER_INTERVAL,
        }
    }

    /// Data lines written since the last header
    #[must_use]
    pub const fn lines_since_header(&self) -> u8 {
        self.lines_since_header
    }

    /// True if the next [`Self::render`] starts with a header
    #[must_use]
    pub const fn header_due(&self) -> bool {
        self.lines_since_header == HEADER_INTERVAL
    }

    /// Emit one data line, preceded by the header block when due
    pub fn render(&mut self, symbols: &SymbolSequence, reference: u8) {
        if self.header_due() {
            self.write_header();
            self.lines_since_header = 0;
        }
        self.lines_since_header += 1;

        let line = format_data_line(symbols, reference);
        let _ = self.serial.write_all(line.as_bytes());
        let _ = self.serial.flush();
    }

    fn write_header(&mut self) {
        #[cfg(feature = "embedded")]
        defmt::debug!("plot header");

        for row in HEADER_ROWS {
            let _ = self.serial.write_all(row.as_bytes());
            let _ = self.serial.write_all(b"\n");
        }
    }

    /// Release the serial transport
    pub fn release(self) -> W {
        self.serial
    }
}
