//! Checked-block sending and printer adapters
//!
//! [`send_checked`] runs the whole status-checked send sequence on an open
//! port. The [`Printer`] trait wraps it behind the async facade the
//! application uses; the blocking serial work runs on the tokio blocking
//! pool.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::error::{PrintError, PrintResult};
use crate::net::NetworkPort;
use crate::port::{PortSettings, PrinterPort};
use crate::serial::SerialPrinterPort;

/// Timings for one checked send
#[derive(Debug, Clone, Copy)]
pub struct SendOptions {
    /// Pause between opening the port and the first status sample, giving
    /// the link time to stabilize
    pub settle_delay: Duration,
    /// Completion wait applied before the final status sample
    pub end_check_timeout: Duration,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            end_check_timeout: Duration::from_secs(30),
        }
    }
}

/// Send a buffer through a status-checked block
///
/// Sequence: settle delay, pre-send status sample (abort before writing if
/// the printer is offline), one write of the whole buffer, extended
/// completion wait, post-send status sample. Cover-open, paper-empty and
/// offline conditions after the send fail the attempt even though the bytes
/// went out. No retry on any path; the port is released by its owner's
/// scope exit.
#[instrument(skip(port, data), fields(target = %port.description(), bytes = data.len()))]
pub fn send_checked<P: PrinterPort + ?Sized>(
    port: &mut P,
    data: &[u8],
    options: &SendOptions,
) -> PrintResult<()> {
    std::thread::sleep(options.settle_delay);

    let status = port.begin_checked_block()?;
    if status.offline {
        warn!("Printer offline before send");
        return Err(PrintError::Offline(port.description()));
    }

    port.write_all(data)?;

    port.set_end_check_timeout(options.end_check_timeout);
    let status = port.end_checked_block()?;

    if status.cover_open {
        return Err(PrintError::CoverOpen(port.description()));
    }
    if status.paper_empty {
        return Err(PrintError::PaperEmpty(port.description()));
    }
    if status.offline {
        return Err(PrintError::Offline(port.description()));
    }

    info!("Print job sent");
    Ok(())
}

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Serial printer (USB adapter or Bluetooth SPP device node)
///
/// Each print opens the port, runs the checked block and releases the port.
#[derive(Debug, Clone)]
pub struct SerialPrinter {
    name: String,
    settings: PortSettings,
    open_timeout: Duration,
    options: SendOptions,
}

impl SerialPrinter {
    /// Create a serial printer adapter
    pub fn new(name: &str, settings: PortSettings, options: SendOptions) -> Self {
        Self {
            name: name.to_string(),
            settings,
            open_timeout: Duration::from_secs(20),
            options,
        }
    }

    /// Set the port open timeout
    pub fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Get the device name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Printer for SerialPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let printer = self.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut port =
                SerialPrinterPort::open(&printer.name, &printer.settings, printer.open_timeout)?;
            send_checked(&mut port, &data, &printer.options)
        })
        .await
        .map_err(|e| PrintError::Connection(format!("Task join failed: {}", e)))?
    }

    async fn is_online(&self) -> bool {
        let printer = self.clone();

        let probed = tokio::task::spawn_blocking(move || {
            let check_timeout = Duration::from_millis(500);
            let mut port =
                SerialPrinterPort::open(&printer.name, &printer.settings, check_timeout)?;
            port.begin_checked_block()
        })
        .await;

        match probed {
            Ok(Ok(status)) => !status.offline,
            _ => false,
        }
    }
}

/// Network printer (TCP port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    connect_timeout: Duration,
    options: SendOptions,
}

impl NetworkPrinter {
    /// Create a network printer adapter
    pub fn new(addr: SocketAddr, options: SendOptions) -> Self {
        Self {
            addr,
            connect_timeout: Duration::from_secs(5),
            options,
        }
    }

    /// Create from an address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str, options: SendOptions) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
        Ok(Self::new(addr, options))
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let printer = self.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut port = NetworkPort::open(printer.addr, printer.connect_timeout)?;
            send_checked(&mut port, &data, &printer.options)
        })
        .await
        .map_err(|e| PrintError::Connection(format!("Task join failed: {}", e)))?
    }

    async fn is_online(&self) -> bool {
        let addr = self.addr;

        let probed = tokio::task::spawn_blocking(move || {
            std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(500))
        })
        .await;

        matches!(probed, Ok(Ok(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PrinterStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Scripted port: fixed begin/end statuses, recorded writes and
    /// release count.
    struct FakePort {
        begin: PrinterStatus,
        end: PrinterStatus,
        fail_write: bool,
        written: Arc<Mutex<Vec<u8>>>,
        end_timeout: Arc<Mutex<Option<Duration>>>,
        releases: Arc<AtomicUsize>,
    }

    impl FakePort {
        fn new(begin: PrinterStatus, end: PrinterStatus) -> Self {
            Self {
                begin,
                end,
                fail_write: false,
                written: Arc::new(Mutex::new(Vec::new())),
                end_timeout: Arc::new(Mutex::new(None)),
                releases: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl PrinterPort for FakePort {
        fn begin_checked_block(&mut self) -> PrintResult<PrinterStatus> {
            Ok(self.begin)
        }

        fn write_all(&mut self, data: &[u8]) -> PrintResult<()> {
            if self.fail_write {
                return Err(PrintError::Connection("link dropped".to_string()));
            }
            self.written.lock().unwrap().extend_from_slice(data);
            Ok(())
        }

        fn set_end_check_timeout(&mut self, timeout: Duration) {
            *self.end_timeout.lock().unwrap() = Some(timeout);
        }

        fn end_checked_block(&mut self) -> PrintResult<PrinterStatus> {
            Ok(self.end)
        }

        fn description(&self) -> String {
            "Fake(test)".to_string()
        }
    }

    impl Drop for FakePort {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fast_options() -> SendOptions {
        SendOptions {
            settle_delay: Duration::ZERO,
            end_check_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_clear_status_sends_whole_buffer() {
        let written = {
            let mut port = FakePort::new(PrinterStatus::clear(), PrinterStatus::clear());
            let written = port.written.clone();
            let end_timeout = port.end_timeout.clone();

            send_checked(&mut port, b"receipt bytes", &fast_options()).unwrap();

            assert_eq!(
                *end_timeout.lock().unwrap(),
                Some(Duration::from_secs(30))
            );
            written
        };
        assert_eq!(written.lock().unwrap().as_slice(), b"receipt bytes");
    }

    #[test]
    fn test_offline_before_send_writes_nothing() {
        let offline = PrinterStatus {
            offline: true,
            ..PrinterStatus::clear()
        };
        let mut port = FakePort::new(offline, PrinterStatus::clear());
        let written = port.written.clone();

        let err = send_checked(&mut port, b"never sent", &fast_options()).unwrap_err();

        assert!(matches!(err, PrintError::Offline(_)));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_paper_empty_after_send_fails_despite_write() {
        let paper_empty = PrinterStatus {
            paper_empty: true,
            ..PrinterStatus::clear()
        };
        let mut port = FakePort::new(PrinterStatus::clear(), paper_empty);
        let written = port.written.clone();

        let err = send_checked(&mut port, b"job", &fast_options()).unwrap_err();

        assert!(matches!(err, PrintError::PaperEmpty(_)));
        // The write happened; the condition was only visible afterwards.
        assert_eq!(written.lock().unwrap().as_slice(), b"job");
    }

    #[test]
    fn test_cover_open_takes_precedence() {
        let all_bad = PrinterStatus {
            offline: true,
            cover_open: true,
            paper_empty: true,
        };
        let mut port = FakePort::new(PrinterStatus::clear(), all_bad);

        let err = send_checked(&mut port, b"job", &fast_options()).unwrap_err();
        assert!(matches!(err, PrintError::CoverOpen(_)));
    }

    #[test]
    fn test_release_happens_once_on_every_path() {
        // Success path
        let releases = {
            let mut port = FakePort::new(PrinterStatus::clear(), PrinterStatus::clear());
            let releases = port.releases.clone();
            send_checked(&mut port, b"ok", &fast_options()).unwrap();
            releases
        };
        assert_eq!(releases.load(Ordering::SeqCst), 1);

        // Status failure path
        let offline = PrinterStatus {
            offline: true,
            ..PrinterStatus::clear()
        };
        let releases = {
            let mut port = FakePort::new(offline, PrinterStatus::clear());
            let releases = port.releases.clone();
            let _ = send_checked(&mut port, b"no", &fast_options());
            releases
        };
        assert_eq!(releases.load(Ordering::SeqCst), 1);

        // Write error path
        let releases = {
            let mut port = FakePort::new(PrinterStatus::clear(), PrinterStatus::clear());
            port.fail_write = true;
            let releases = port.releases.clone();
            let err = send_checked(&mut port, b"no", &fast_options()).unwrap_err();
            assert!(matches!(err, PrintError::Connection(_)));
            releases
        };
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_network_printer_offline_probe() {
        // Reserved TEST-NET-1 address, nothing listens there.
        let printer = NetworkPrinter::from_addr("192.0.2.1:9100", SendOptions::default()).unwrap();
        assert!(!printer.is_online().await);
    }

    #[test]
    fn test_network_printer_rejects_bad_addr() {
        assert!(NetworkPrinter::from_addr("not an address", SendOptions::default()).is_err());
    }
}
