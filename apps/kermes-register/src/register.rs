//! # Register
//!
//! The operations a till screen invokes. Printing and recording are
//! deliberately separate calls: a jammed printer never blocks a sale from
//! reaching the ledger, and a ledger failure never prevents a reprint.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Print" button  ──► print_cart(items)   ──► PrinterService ──► sink   │
//! │  "Pay" button    ──► record_sale(items)  ──► TransactionStore          │
//! │  Stats screen    ──► report()            ──► daily + category stats    │
//! │  Settings dialog ──► update_printer_settings(overrides)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use kermes_core::{
    cart_total, CartItem, CategoryStats, DailyStats, DeviceProfile, ProfileOverrides,
    TransactionRecord,
};
use kermes_db::TransactionStore;
use kermes_print::{PrintSink, PrinterConfig, PrinterService, ReceiptSettings};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;

/// Everything the statistics screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub transaction_count: i64,
    pub daily: Vec<DailyStats>,
    pub categories: Vec<CategoryStats>,
}

/// A till: one ledger, one printer.
#[derive(Debug)]
pub struct Register<'s> {
    store: &'s TransactionStore,
    printer: PrinterService,
    profile: DeviceProfile,
    /// Layout settings re-applied whenever the profile changes.
    receipt: ReceiptSettings,
}

impl<'s> Register<'s> {
    /// A register printing with `printer` as configured. The separator is
    /// re-derived from the paper width when the settings change.
    pub fn new(store: &'s TransactionStore, printer: PrinterService, profile: DeviceProfile) -> Self {
        let receipt = ReceiptSettings {
            separator_width: None,
            currency_glyph: printer.layout().currency_glyph,
        };
        Register {
            store,
            printer,
            profile,
            receipt,
        }
    }

    /// A register whose profile and receipt layout come from `config`.
    pub fn from_config(
        store: &'s TransactionStore,
        sink: Arc<dyn PrintSink>,
        config: &PrinterConfig,
    ) -> Self {
        Register {
            store,
            printer: PrinterService::new(sink).with_layout(config.layout()),
            profile: config.profile(),
            receipt: config.receipt.clone(),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Replaces the printer profile with `overrides` applied over the
    /// defaults, and returns the new profile. The receipt layout follows
    /// the new paper width unless a fixed separator width is configured.
    pub fn update_printer_settings(&mut self, overrides: ProfileOverrides) -> DeviceProfile {
        let config = PrinterConfig {
            printer: overrides,
            receipt: self.receipt.clone(),
        };
        self.profile = config.profile();
        self.printer.set_layout(config.layout());
        info!(
            device = %self.profile.device_name,
            paper_width_mm = self.profile.paper_width_mm,
            separator_width = self.printer.layout().separator_width,
            "Printer settings updated"
        );
        self.profile.clone()
    }

    /// Prints one slip per cart line. Does not touch the ledger.
    pub async fn print_cart(&self, items: &[CartItem]) -> Result<(), ApiError> {
        debug!(items = items.len(), "print_cart");
        self.printer.print_cart(items, &self.profile).await?;
        Ok(())
    }

    /// Records the cart as a completed sale. Does not print.
    pub async fn record_sale(
        &self,
        items: &[CartItem],
        payment_method: &str,
    ) -> Result<TransactionRecord, ApiError> {
        debug!(items = items.len(), payment_method, "record_sale");
        let record = self
            .store
            .append(items, cart_total(items), payment_method)
            .await?;
        Ok(record)
    }

    pub async fn available_printers(&self) -> Vec<String> {
        self.printer.available_printers().await
    }

    pub async fn transactions(&self) -> Result<Vec<TransactionRecord>, ApiError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn report(&self) -> Result<SalesReport, ApiError> {
        Ok(SalesReport {
            transaction_count: self.store.count().await?,
            daily: self.store.daily_stats().await?,
            categories: self.store.category_stats().await?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use kermes_core::{Money, Product};
    use kermes_db::StoreConfig;
    use kermes_print::{LogSink, SinkError};

    /// A printer that is always out of paper.
    struct JammedSink;

    #[async_trait]
    impl PrintSink for JammedSink {
        async fn send(&self, _stream: &[u8], _profile: &DeviceProfile) -> Result<bool, SinkError> {
            Ok(false)
        }

        async fn available_devices(&self) -> Vec<String> {
            vec![]
        }
    }

    /// Keeps every job it is sent.
    #[derive(Default)]
    struct RecordingSink {
        jobs: std::sync::Mutex<Vec<Vec<u8>>>,
    }

    impl RecordingSink {
        fn last_job(&self) -> Vec<u8> {
            self.jobs.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl PrintSink for RecordingSink {
        async fn send(&self, stream: &[u8], _profile: &DeviceProfile) -> Result<bool, SinkError> {
            self.jobs.lock().unwrap().push(stream.to_vec());
            Ok(true)
        }

        async fn available_devices(&self) -> Vec<String> {
            vec![]
        }
    }

    fn cart() -> Vec<CartItem> {
        let kebab = Product::new("p-1", "Kebab", "food", Money::from_cents(500));
        let ayran = Product::new("p-3", "Ayran", "drink", Money::from_cents(200));
        vec![CartItem::new(kebab, 2), CartItem::new(ayran, 1)]
    }

    #[tokio::test]
    async fn test_print_failure_does_not_block_recording() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let register = Register::new(
            &store,
            PrinterService::new(Arc::new(JammedSink)),
            DeviceProfile::default(),
        );

        let err = register.print_cart(&cart()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PrintError);

        let record = register.record_sale(&cart(), "cash").await.unwrap();
        assert_eq!(record.total_amount, Money::from_cents(1200));
        assert_eq!(record.items_count, 3);
        assert_eq!(register.transactions().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_report() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let register = Register::new(
            &store,
            PrinterService::new(Arc::new(LogSink::new())),
            DeviceProfile::default(),
        );

        register.print_cart(&cart()).await.unwrap();
        register.record_sale(&cart(), "cash").await.unwrap();
        register.record_sale(&cart()[1..], "card").await.unwrap();

        let report = register.report().await.unwrap();
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].total_revenue, Money::from_cents(1400));
        assert_eq!(
            report.categories,
            vec![
                CategoryStats { category: "food".into(), count: 2 },
                CategoryStats { category: "drink".into(), count: 2 },
            ]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["transactionCount"], 2);
        assert_eq!(json["categories"][0]["category"], "food");
    }

    #[tokio::test]
    async fn test_invalid_sale_is_validation_error() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let register = Register::new(
            &store,
            PrinterService::new(Arc::new(LogSink::new())),
            DeviceProfile::default(),
        );

        let err = register.record_sale(&cart(), " ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_printer_settings_merges_over_defaults() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let mut register = Register::from_config(
            &store,
            Arc::new(LogSink::new()),
            &PrinterConfig::default(),
        );

        register.update_printer_settings(ProfileOverrides {
            device_name: Some("Kitchen".into()),
            bold: Some(false),
            ..Default::default()
        });
        let profile = register.update_printer_settings(ProfileOverrides {
            paper_width_mm: Some(58),
            ..Default::default()
        });

        // Each update starts from the defaults
        assert_eq!(profile.device_name, "TSP100III");
        assert_eq!(profile.paper_width_mm, 58);
        assert!(profile.bold);
        assert_eq!(register.profile(), &profile);
    }

    #[tokio::test]
    async fn test_paper_width_change_resizes_separator() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let sink = Arc::new(RecordingSink::default());
        let mut register = Register::from_config(&store, sink.clone(), &PrinterConfig::default());

        register.update_printer_settings(ProfileOverrides {
            paper_width_mm: Some(58),
            ..Default::default()
        });
        register.print_cart(&cart()[..1]).await.unwrap();

        let text = String::from_utf8_lossy(&sink.last_job()).to_string();
        assert!(text.contains(&format!("\n{}\n", "-".repeat(25))));
        assert!(!text.contains(&"-".repeat(26)));
    }

    #[tokio::test]
    async fn test_fixed_separator_survives_settings_update() {
        let store = TransactionStore::new(StoreConfig::in_memory());
        let sink = Arc::new(RecordingSink::default());
        let mut config = PrinterConfig::default();
        config.receipt.separator_width = Some(40);
        config.receipt.currency_glyph = '$';
        let mut register = Register::from_config(&store, sink.clone(), &config);

        register.update_printer_settings(ProfileOverrides {
            paper_width_mm: Some(58),
            ..Default::default()
        });
        register.print_cart(&cart()[..1]).await.unwrap();

        let text = String::from_utf8_lossy(&sink.last_job()).to_string();
        assert!(text.contains(&"-".repeat(40)));
        assert!(text.contains("Total: 10.00$"));
    }
}
