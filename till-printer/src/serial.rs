//! Serial printer port
//!
//! Talks to portable receipt printers over a serial device node (USB
//! adapter or Bluetooth SPP binding) using the `serialport` crate. Status
//! is sampled with the ESC/POS real-time requests `DLE EOT n`; a printer
//! that does not answer within the read timeout is reported offline.

use std::io::{Read, Write};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{PrintError, PrintResult};
use crate::port::{Parity, PortSettings, PrinterPort, PrinterStatus};

/// Real-time status request DLE EOT n
const DLE_EOT: [u8; 2] = [0x10, 0x04];

/// n = 1, printer status: bit 3 set when offline
const STATUS_PRINTER: u8 = 0x01;
const OFFLINE_BIT: u8 = 0x08;

/// n = 2, offline cause status: bit 2 set when the cover is open
const STATUS_OFFLINE_CAUSE: u8 = 0x02;
const COVER_OPEN_BIT: u8 = 0x04;

/// n = 4, roll paper sensor status: bits 5-6 set when the roll ran out
const STATUS_PAPER_SENSOR: u8 = 0x04;
const PAPER_END_BITS: u8 = 0x60;

/// Serial port handle for one print attempt
///
/// The OS handle is released when the value drops, whichever way the send
/// sequence exits.
pub struct SerialPrinterPort {
    port: Box<dyn serialport::SerialPort>,
    name: String,
    end_check_timeout: Duration,
}

impl SerialPrinterPort {
    /// Open a serial port by device name
    ///
    /// `open_timeout` becomes the port's initial read/write timeout; it also
    /// bounds the status samples taken before the write.
    pub fn open(name: &str, settings: &PortSettings, open_timeout: Duration) -> PrintResult<Self> {
        info!(port = name, settings = %settings, "Opening serial port");

        let data_bits = match settings.data_bits {
            5 => serialport::DataBits::Five,
            6 => serialport::DataBits::Six,
            7 => serialport::DataBits::Seven,
            _ => serialport::DataBits::Eight,
        };
        let parity = match settings.parity {
            Parity::None => serialport::Parity::None,
            Parity::Even => serialport::Parity::Even,
            Parity::Odd => serialport::Parity::Odd,
        };
        let stop_bits = match settings.stop_bits {
            2 => serialport::StopBits::Two,
            _ => serialport::StopBits::One,
        };

        let port = serialport::new(name, settings.baud_rate)
            .data_bits(data_bits)
            .parity(parity)
            .stop_bits(stop_bits)
            .timeout(open_timeout)
            .open()
            .map_err(|e| PrintError::Connection(format!("{}: {}", name, e)))?;

        Ok(Self {
            port,
            name: name.to_string(),
            end_check_timeout: open_timeout,
        })
    }

    /// Ask the printer for one status byte
    ///
    /// A read timeout means the link is up but nobody is answering — the
    /// device is off or out of range, which the checked block treats as
    /// offline.
    fn query_status(&mut self, n: u8) -> PrintResult<Option<u8>> {
        self.port
            .write_all(&[DLE_EOT[0], DLE_EOT[1], n])
            .map_err(PrintError::Io)?;
        self.port.flush().map_err(PrintError::Io)?;

        let mut buf = [0u8; 1];
        match self.port.read_exact(&mut buf) {
            Ok(()) => {
                debug!(port = %self.name, request = n, status = buf[0], "Status byte");
                Ok(Some(buf[0]))
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                debug!(port = %self.name, request = n, "Status request timed out");
                Ok(None)
            }
            Err(e) => Err(PrintError::Io(e)),
        }
    }

    fn sample_status(&mut self) -> PrintResult<PrinterStatus> {
        let printer = match self.query_status(STATUS_PRINTER)? {
            Some(byte) => byte,
            None => {
                return Ok(PrinterStatus {
                    offline: true,
                    ..PrinterStatus::clear()
                })
            }
        };
        let cause = self.query_status(STATUS_OFFLINE_CAUSE)?.unwrap_or(0);
        let paper = self.query_status(STATUS_PAPER_SENSOR)?.unwrap_or(0);

        Ok(PrinterStatus {
            offline: printer & OFFLINE_BIT != 0,
            cover_open: cause & COVER_OPEN_BIT != 0,
            paper_empty: paper & PAPER_END_BITS != 0,
        })
    }
}

impl PrinterPort for SerialPrinterPort {
    fn begin_checked_block(&mut self) -> PrintResult<PrinterStatus> {
        self.sample_status()
    }

    fn write_all(&mut self, data: &[u8]) -> PrintResult<()> {
        debug!(port = %self.name, bytes = data.len(), "Serial TX");
        self.port.write_all(data).map_err(PrintError::Io)?;
        self.port.flush().map_err(PrintError::Io)?;
        Ok(())
    }

    fn set_end_check_timeout(&mut self, timeout: Duration) {
        self.end_check_timeout = timeout;
    }

    fn end_checked_block(&mut self) -> PrintResult<PrinterStatus> {
        // Completion wait: the printer answers status requests only after it
        // finished feeding the buffered job through the head.
        self.port
            .set_timeout(self.end_check_timeout)
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.name, e)))?;
        self.sample_status()
    }

    fn description(&self) -> String {
        format!("Serial({})", self.name)
    }
}

impl Drop for SerialPrinterPort {
    fn drop(&mut self) {
        info!(port = %self.name, "Releasing serial port");
    }
}
