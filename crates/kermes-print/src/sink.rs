//! # Print Sinks
//!
//! A sink moves an already-encoded byte stream to a device. It knows
//! nothing about carts or receipts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PrinterService                                                         │
//! │       │  send(stream, profile)                                          │
//! │       ▼                                                                 │
//! │  dyn PrintSink                                                          │
//! │  ├── Ok(true)    delivered                                             │
//! │  ├── Ok(false)   device declined the job      ─┐                        │
//! │  └── Err(e)      transport failure             ├─► PrintError::PrintFailed
//! │                                                ─┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use kermes_core::printer::DEFAULT_DEVICE_NAME;
use kermes_core::DeviceProfile;
use tracing::{debug, info};

use crate::error::SinkError;

/// Transport to a receipt printer.
#[async_trait]
pub trait PrintSink: Send + Sync {
    /// Delivers `stream` to the device named in `profile`.
    ///
    /// `Ok(false)` means the device was reachable but declined the job.
    async fn send(&self, stream: &[u8], profile: &DeviceProfile) -> Result<bool, SinkError>;

    /// Names of the devices this sink can reach.
    async fn available_devices(&self) -> Vec<String>;
}

/// Dry-run sink: logs every job and reports success.
///
/// Stands in for a real transport; the register's `demo` command prints
/// through it.
#[derive(Debug, Clone)]
pub struct LogSink {
    devices: Vec<String>,
}

impl LogSink {
    pub fn new() -> Self {
        LogSink {
            devices: vec![DEFAULT_DEVICE_NAME.to_string(), "Default Printer".to_string()],
        }
    }

    /// A sink that advertises exactly `devices`.
    pub fn with_devices(devices: Vec<String>) -> Self {
        LogSink { devices }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrintSink for LogSink {
    async fn send(&self, stream: &[u8], profile: &DeviceProfile) -> Result<bool, SinkError> {
        info!(
            device = %profile.device_name,
            paper_width_mm = profile.paper_width_mm,
            bytes = stream.len(),
            "Sending to printer (dry run)"
        );
        debug!(data = %String::from_utf8_lossy(stream).escape_debug(), "Receipt stream");
        Ok(true)
    }

    async fn available_devices(&self) -> Vec<String> {
        self.devices.clone()
    }
}
