//! # Printer Service
//!
//! Validates a cart, encodes it, and hands the stream to a sink exactly
//! once.

use std::sync::Arc;

use kermes_core::validation::validate_cart;
use kermes_core::{CartItem, DeviceProfile, ReceiptEncoder, ReceiptLayout};
use tracing::{debug, info, warn};

use crate::error::{PrintError, PrintResult};
use crate::sink::PrintSink;

/// Prints carts through a [`PrintSink`].
#[derive(Clone)]
pub struct PrinterService {
    sink: Arc<dyn PrintSink>,
    encoder: ReceiptEncoder,
}

impl std::fmt::Debug for PrinterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrinterService")
            .field("layout", self.encoder.layout())
            .finish_non_exhaustive()
    }
}

impl PrinterService {
    /// A service using the default receipt layout.
    pub fn new(sink: Arc<dyn PrintSink>) -> Self {
        PrinterService {
            sink,
            encoder: ReceiptEncoder::default(),
        }
    }

    pub fn with_layout(mut self, layout: ReceiptLayout) -> Self {
        self.encoder = ReceiptEncoder::new(layout);
        self
    }

    /// Replaces the layout used for later jobs.
    pub fn set_layout(&mut self, layout: ReceiptLayout) {
        self.encoder = ReceiptEncoder::new(layout);
    }

    pub fn layout(&self) -> &ReceiptLayout {
        self.encoder.layout()
    }

    /// Prints one slip per cart item on the device described by `profile`.
    ///
    /// ## Errors
    /// - [`PrintError::InvalidCart`] before anything is encoded
    /// - [`PrintError::PrintFailed`] when the sink declines the job
    ///   (`Ok(false)`) or fails to deliver it (`Err`)
    pub async fn print_cart(&self, items: &[CartItem], profile: &DeviceProfile) -> PrintResult<()> {
        validate_cart(items)?;

        let stream = self.encoder.encode(items);
        debug!(
            device = %profile.device_name,
            items = items.len(),
            bytes = stream.len(),
            "Encoded receipt"
        );

        match self.sink.send(&stream, profile).await {
            Ok(true) => {
                info!(device = %profile.device_name, items = items.len(), "Receipt printed");
                Ok(())
            }
            Ok(false) => {
                warn!(device = %profile.device_name, "Printer declined the job");
                Err(PrintError::PrintFailed(format!(
                    "{} declined the job",
                    profile.device_name
                )))
            }
            Err(e) => {
                warn!(device = %profile.device_name, error = %e, "Printing failed");
                Err(PrintError::PrintFailed(format!("{}: {}", profile.device_name, e)))
            }
        }
    }

    /// Device names the sink can reach.
    pub async fn available_printers(&self) -> Vec<String> {
        self.sink.available_devices().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
