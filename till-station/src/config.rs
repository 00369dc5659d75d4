//! Station configuration
//!
//! # Environment variables
//!
//! Every setting can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | TILL_TRANSPORT | serial | Printer transport: serial \| network |
//! | TILL_PORT | /dev/rfcomm0 | Serial device node |
//! | TILL_PORT_SETTINGS | 9600/8N1 | Serial settings string |
//! | TILL_PRINTER_ADDR | 192.168.1.100:9100 | Network printer address |
//! | TILL_OPEN_TIMEOUT_MS | 20000 | Port open timeout |
//! | TILL_SETTLE_DELAY_MS | 500 | Link settle pause before sending |
//! | TILL_END_CHECK_TIMEOUT_MS | 30000 | Completion wait after sending |
//! | TILL_PAPER_WIDTH | 32 | Paper width in characters |
//! | TILL_STORE_PATH | catalog.json | Sales catalog file |
//! | TILL_LETTERHEAD | Company Name\|Information\|Information | `\|`-separated letterhead lines |

use std::path::PathBuf;
use std::time::Duration;

/// Printer transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Serial,
    Network,
}

/// Station configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Which transport carries the print job
    pub transport: TransportKind,
    /// Serial device node
    pub port_name: String,
    /// Serial connection-settings string
    pub port_settings: String,
    /// Network printer address
    pub printer_addr: String,
    /// Port open timeout
    pub open_timeout: Duration,
    /// Settle pause between opening and sending
    pub settle_delay: Duration,
    /// Completion wait after sending
    pub end_check_timeout: Duration,
    /// Paper width in characters
    pub paper_width: usize,
    /// Sales catalog file
    pub store_path: PathBuf,
    /// Letterhead lines printed centered at the top of every receipt
    pub letterhead: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable values fall back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            transport: match std::env::var("TILL_TRANSPORT").as_deref() {
                Ok("network") => TransportKind::Network,
                _ => TransportKind::Serial,
            },
            port_name: std::env::var("TILL_PORT").unwrap_or_else(|_| "/dev/rfcomm0".into()),
            port_settings: std::env::var("TILL_PORT_SETTINGS")
                .unwrap_or_else(|_| "9600/8N1".into()),
            printer_addr: std::env::var("TILL_PRINTER_ADDR")
                .unwrap_or_else(|_| "192.168.1.100:9100".into()),
            open_timeout: duration_from_env("TILL_OPEN_TIMEOUT_MS", 20000),
            settle_delay: duration_from_env("TILL_SETTLE_DELAY_MS", 500),
            end_check_timeout: duration_from_env("TILL_END_CHECK_TIMEOUT_MS", 30000),
            paper_width: std::env::var("TILL_PAPER_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(32),
            store_path: std::env::var("TILL_STORE_PATH")
                .unwrap_or_else(|_| "catalog.json".into())
                .into(),
            letterhead: std::env::var("TILL_LETTERHEAD")
                .unwrap_or_else(|_| "Company Name|Information|Information".into())
                .split('|')
                .map(str::to_string)
                .collect(),
        }
    }

    /// Override store path and transport, keeping the rest
    ///
    /// Used by tests and the CLI flags.
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }
}

fn duration_from_env(var: &str, default_ms: u64) -> Duration {
    Duration::from_millis(
        std::env::var(var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_ms),
    )
}
