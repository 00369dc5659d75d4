//! Printer port abstraction
//!
//! [`PrinterPort`] is the minimal capability surface a vendor port exposes:
//! a status sample before the write, the write itself, a completion-wait
//! timeout, and a status sample after the write. Opening is the constructor
//! of the concrete implementation; release happens in `Drop`, exactly once
//! per handle regardless of how the send ended.

use std::time::Duration;

use crate::error::{PrintError, PrintResult};

/// Printer-reported status flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrinterStatus {
    pub offline: bool,
    pub cover_open: bool,
    pub paper_empty: bool,
}

impl PrinterStatus {
    /// Status with no condition raised
    ///
    /// Used by transports that have no status channel.
    pub fn clear() -> Self {
        Self::default()
    }

    /// True when no condition is raised
    pub fn is_clear(&self) -> bool {
        !self.offline && !self.cover_open && !self.paper_empty
    }
}

/// Byte-level printer port with status-checked writes
pub trait PrinterPort: Send {
    /// Sample printer status before sending
    fn begin_checked_block(&mut self) -> PrintResult<PrinterStatus>;

    /// Send the whole buffer
    fn write_all(&mut self, data: &[u8]) -> PrintResult<()>;

    /// Extend the completion wait used by [`PrinterPort::end_checked_block`]
    fn set_end_check_timeout(&mut self, timeout: Duration);

    /// Sample printer status after sending
    fn end_checked_block(&mut self) -> PrintResult<PrinterStatus>;

    /// Human-readable description of the connection target
    fn description(&self) -> String;
}

/// Serial connection settings parsed from a `"9600/8N1"` style string
///
/// Format: `<baud>/<data bits><parity><stop bits>` where parity is `N`, `E`
/// or `O`. Both parts are optional: `"19200"` keeps the `8N1` frame,
/// `""` means the 9600/8N1 default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
}

/// Serial frame parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
        }
    }
}

impl PortSettings {
    /// Parse a connection-settings string
    pub fn parse(s: &str) -> PrintResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        let mut settings = Self::default();
        let (baud, frame) = match s.split_once('/') {
            Some((baud, frame)) => (baud, Some(frame)),
            None => (s, None),
        };

        settings.baud_rate = baud
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid baud rate: '{}'", baud)))?;

        if let Some(frame) = frame {
            let chars: Vec<char> = frame.chars().collect();
            if chars.len() != 3 {
                return Err(PrintError::InvalidConfig(format!(
                    "Invalid frame settings: '{}' (expected e.g. 8N1)",
                    frame
                )));
            }
            settings.data_bits = match chars[0] {
                '5' => 5,
                '6' => 6,
                '7' => 7,
                '8' => 8,
                other => {
                    return Err(PrintError::InvalidConfig(format!(
                        "Invalid data bits: '{}'",
                        other
                    )))
                }
            };
            settings.parity = match chars[1].to_ascii_uppercase() {
                'N' => Parity::None,
                'E' => Parity::Even,
                'O' => Parity::Odd,
                other => {
                    return Err(PrintError::InvalidConfig(format!(
                        "Invalid parity: '{}'",
                        other
                    )))
                }
            };
            settings.stop_bits = match chars[2] {
                '1' => 1,
                '2' => 2,
                other => {
                    return Err(PrintError::InvalidConfig(format!(
                        "Invalid stop bits: '{}'",
                        other
                    )))
                }
            };
        }

        Ok(settings)
    }
}

impl std::fmt::Display for PortSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parity = match self.parity {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
        };
        write!(
            f,
            "{}/{}{}{}",
            self.baud_rate, self.data_bits, parity, self.stop_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = PortSettings::parse("").unwrap();
        assert_eq!(s, PortSettings::default());
        assert_eq!(s.to_string(), "9600/8N1");
    }

    #[test]
    fn test_parse_full() {
        let s = PortSettings::parse("19200/7E2").unwrap();
        assert_eq!(s.baud_rate, 19200);
        assert_eq!(s.data_bits, 7);
        assert_eq!(s.parity, Parity::Even);
        assert_eq!(s.stop_bits, 2);
    }

    #[test]
    fn test_parse_baud_only() {
        let s = PortSettings::parse("115200").unwrap();
        assert_eq!(s.baud_rate, 115200);
        assert_eq!(s.data_bits, 8);
        assert_eq!(s.parity, Parity::None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PortSettings::parse("fast").is_err());
        assert!(PortSettings::parse("9600/8X1").is_err());
        assert!(PortSettings::parse("9600/81").is_err());
        assert!(PortSettings::parse("9600/9N1").is_err());
    }

    #[test]
    fn test_status_clear() {
        let status = PrinterStatus::clear();
        assert!(status.is_clear());

        let offline = PrinterStatus {
            offline: true,
            ..PrinterStatus::clear()
        };
        assert!(!offline.is_clear());
    }
}
