//! Network printer port (TCP port 9100)
//!
//! Most receipt printers with an Ethernet or Wi-Fi interface accept raw
//! ESC/POS on TCP port 9100. The raw-print channel carries no status
//! replies, so checked blocks report a clear status and failures surface
//! as connection or write errors instead.

use std::io::Write;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{PrintError, PrintResult};
use crate::port::{PrinterPort, PrinterStatus};

/// TCP port handle for one print attempt
pub struct NetworkPort {
    stream: TcpStream,
    addr: SocketAddr,
}

impl NetworkPort {
    /// Connect to a printer address with a timeout
    pub fn open(addr: SocketAddr, connect_timeout: Duration) -> PrintResult<Self> {
        info!(addr = %addr, "Connecting to network printer");

        let stream = TcpStream::connect_timeout(&addr, connect_timeout)
            .map_err(|e| PrintError::Connection(format!("{}: {}", addr, e)))?;

        stream
            .set_write_timeout(Some(connect_timeout))
            .map_err(PrintError::Io)?;
        let _ = stream.set_nodelay(true);

        Ok(Self { stream, addr })
    }
}

impl PrinterPort for NetworkPort {
    fn begin_checked_block(&mut self) -> PrintResult<PrinterStatus> {
        Ok(PrinterStatus::clear())
    }

    fn write_all(&mut self, data: &[u8]) -> PrintResult<()> {
        debug!(addr = %self.addr, bytes = data.len(), "TCP TX");
        self.stream.write_all(data).map_err(PrintError::Io)?;
        self.stream.flush().map_err(PrintError::Io)?;
        Ok(())
    }

    fn set_end_check_timeout(&mut self, _timeout: Duration) {
        // No status channel, nothing to wait on.
    }

    fn end_checked_block(&mut self) -> PrintResult<PrinterStatus> {
        Ok(PrinterStatus::clear())
    }

    fn description(&self) -> String {
        format!("TCP({})", self.addr)
    }
}

impl Drop for NetworkPort {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
        info!(addr = %self.addr, "Released network printer connection");
    }
}
