//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data as an ordered list
//! of byte chunks.

use crate::encoding::encode_text;

/// Named ESC/POS command sequences
///
/// Kept as constants so the byte protocol stays reviewable in one place.
pub mod command {
    /// Page area setting GS W nL nH (nL = 128, nH = 1)
    pub const PAGE_AREA: [u8; 4] = [0x1D, 0x57, 0x80, 0x31];

    /// Left justification ESC a 0
    pub const ALIGN_LEFT: [u8; 3] = [0x1B, 0x61, 0x00];
    /// Center justification ESC a 1
    pub const ALIGN_CENTER: [u8; 3] = [0x1B, 0x61, 0x01];
    /// Right justification ESC a 2
    pub const ALIGN_RIGHT: [u8; 3] = [0x1B, 0x61, 0x02];

    /// Emphasized printing on ESC E 1
    pub const EMPHASIS_ON: [u8; 3] = [0x1B, 0x45, 0x01];
    /// Emphasized printing off ESC E 0
    pub const EMPHASIS_OFF: [u8; 3] = [0x1B, 0x45, 0x00];

    /// Pound glyph in the printer code page
    pub const CURRENCY: u8 = 0x9C;
}

/// ESC/POS ticket builder
///
/// Accumulates an ordered list of byte chunks; [`TicketBuilder::build`]
/// concatenates them in order, so the final buffer length is always the sum
/// of the chunk lengths.
#[derive(Debug)]
pub struct TicketBuilder {
    chunks: Vec<Vec<u8>>,
    width: usize,
}

impl TicketBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(64),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text (converted to the printer code page)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.chunks.push(encode_text(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        let mut chunk = encode_text(s);
        chunk.push(b'\n');
        self.chunks.push(chunk);
        self
    }

    /// Write an empty line
    pub fn newline(&mut self) -> &mut Self {
        self.chunks.push(vec![b'\n']);
        self
    }

    // === Page Setup ===

    /// Set the printable page area
    pub fn page_area(&mut self) -> &mut Self {
        self.raw(&command::PAGE_AREA)
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.raw(&command::ALIGN_CENTER)
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.raw(&command::ALIGN_LEFT)
    }

    /// Align text to right
    pub fn right(&mut self) -> &mut Self {
        self.raw(&command::ALIGN_RIGHT)
    }

    // === Text Style ===

    /// Enable emphasized printing
    pub fn emphasis_on(&mut self) -> &mut Self {
        self.raw(&command::EMPHASIS_ON)
    }

    /// Disable emphasized printing
    pub fn emphasis_off(&mut self) -> &mut Self {
        self.raw(&command::EMPHASIS_OFF)
    }

    // === Separators ===

    /// Print a line of '-' characters at the configured width
    pub fn sep(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Currency ===

    /// Emit the currency glyph
    pub fn currency(&mut self) -> &mut Self {
        self.chunks.push(vec![command::CURRENCY]);
        self
    }

    // === Raw Commands ===

    /// Write raw bytes as one chunk
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.chunks.push(bytes.to_vec());
        self
    }

    // === Build ===

    /// The accumulated chunks, in emission order
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Concatenate all chunks into the final byte buffer
    pub fn build(self) -> Vec<u8> {
        let total: usize = self.chunks.iter().map(|c| c.len()).sum();
        let mut buf = Vec::with_capacity(total);
        for chunk in &self.chunks {
            buf.extend_from_slice(chunk);
        }
        buf
    }
}

impl Default for TicketBuilder {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = TicketBuilder::new(32);
        b.page_area()
            .center()
            .line("Company Name")
            .left()
            .line("Order No: SO-1001");

        let data = b.build();
        assert!(data.starts_with(&command::PAGE_AREA));
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("Company Name\n"));
        assert!(s.contains("Order No: SO-1001\n"));
    }

    #[test]
    fn test_build_length_is_sum_of_chunks() {
        let mut b = TicketBuilder::new(32);
        b.page_area()
            .center()
            .line("Letterhead")
            .left()
            .currency()
            .text("9.99")
            .sep();

        let expected: usize = b.chunks().iter().map(|c| c.len()).sum();
        let order: Vec<Vec<u8>> = b.chunks().to_vec();
        let data = b.build();

        assert_eq!(data.len(), expected);
        // Chunk order is preserved in the concatenation
        let mut offset = 0;
        for chunk in order {
            assert_eq!(&data[offset..offset + chunk.len()], chunk.as_slice());
            offset += chunk.len();
        }
    }

    #[test]
    fn test_separator_uses_width() {
        let mut b = TicketBuilder::new(10);
        b.sep();

        let data = b.build();
        assert_eq!(data, b"----------\n".to_vec());
    }

    #[test]
    fn test_currency_is_single_byte() {
        let mut b = TicketBuilder::new(32);
        b.currency();
        assert_eq!(b.build(), vec![0x9C]);
    }

    #[test]
    fn test_alignment_commands() {
        let mut b = TicketBuilder::new(32);
        b.left().center().right();
        assert_eq!(
            b.build(),
            vec![0x1B, 0x61, 0x00, 0x1B, 0x61, 0x01, 0x1B, 0x61, 0x02]
        );
    }
}
