//! # Printer Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KERMES_PRINTER_NAME=TSP650II                                       │
//! │     KERMES_PAPER_WIDTH_MM=80                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kermes-pos/printer.toml (Linux)                          │
//! │     ~/Library/Application Support/org.kermes.kermes-pos/printer.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     TSP100III, 72mm paper, font size 12, bold, "€", 32-dash separator  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # printer.toml
//! [printer]
//! deviceName = "TSP100III"
//! paperWidthMm = 58
//!
//! [receipt]
//! currency_glyph = "€"
//! # separator_width = 24   # defaults to a width derived from paperWidthMm
//! ```
//!
//! Any field left out of `[printer]` keeps its default.

use kermes_core::{DeviceProfile, ProfileOverrides, ReceiptLayout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{PrintError, PrintResult};

pub const PRINTER_NAME_ENV: &str = "KERMES_PRINTER_NAME";
pub const PAPER_WIDTH_ENV: &str = "KERMES_PAPER_WIDTH_MM";

/// Accepted paper widths, in millimetres.
const PAPER_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 40..=120;

// =============================================================================
// Receipt Settings
// =============================================================================

/// Text layout settings for printed slips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSettings {
    /// Fixed separator width. `None` derives it from the paper width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_width: Option<usize>,

    #[serde(default = "default_glyph")]
    pub currency_glyph: char,
}

fn default_glyph() -> char {
    ReceiptLayout::default().currency_glyph
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        ReceiptSettings {
            separator_width: None,
            currency_glyph: default_glyph(),
        }
    }
}

// =============================================================================
// Printer Config
// =============================================================================

/// Complete printer configuration as stored in `printer.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Partial device profile, merged over the defaults.
    #[serde(default)]
    pub printer: ProfileOverrides,

    #[serde(default)]
    pub receipt: ReceiptSettings,
}

impl PrinterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, or `printer.toml` in the platform config dir)
    /// 3. Environment variables
    ///
    /// A missing file is not an error.
    pub fn load(path: Option<PathBuf>) -> PrintResult<Self> {
        let mut config = Self::default();

        if let Some(path) = path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading printer config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| PrintError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Printer config not found, using defaults");
            }
        }

        config.apply_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Failed to load printer config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: Option<PathBuf>) -> PrintResult<PathBuf> {
        let path = path
            .or_else(Self::default_config_path)
            .ok_or_else(|| PrintError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_error(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| save_error(&path, e))?;

        info!(?path, "Printer config saved");
        Ok(path)
    }

    /// Checks the values a device would choke on.
    pub fn validate(&self) -> PrintResult<()> {
        let profile = self.profile();

        if profile.device_name.trim().is_empty() {
            return Err(PrintError::InvalidConfig("deviceName must not be empty".into()));
        }

        if !PAPER_WIDTH_RANGE.contains(&profile.paper_width_mm) {
            return Err(PrintError::InvalidConfig(format!(
                "paperWidthMm must be between {} and {}, got {}",
                PAPER_WIDTH_RANGE.start(),
                PAPER_WIDTH_RANGE.end(),
                profile.paper_width_mm
            )));
        }

        if profile.font_size == 0 {
            return Err(PrintError::InvalidConfig("fontSize must be greater than 0".into()));
        }

        if self.receipt.separator_width == Some(0) {
            return Err(PrintError::InvalidConfig(
                "separator_width must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `KERMES_PRINTER_NAME` / `KERMES_PAPER_WIDTH_MM` as returned
    /// by `lookup`. Unparsable values are ignored with a warning.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup(PRINTER_NAME_ENV) {
            debug!(device = %name, "Overriding printer name from environment");
            self.printer.device_name = Some(name);
        }

        if let Some(width) = lookup(PAPER_WIDTH_ENV) {
            match width.trim().parse::<u32>() {
                Ok(mm) => {
                    debug!(paper_width_mm = mm, "Overriding paper width from environment");
                    self.printer.paper_width_mm = Some(mm);
                }
                Err(_) => warn!(value = %width, "Ignoring unparsable {}", PAPER_WIDTH_ENV),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "kermes", "kermes-pos")
            .map(|dirs| dirs.config_dir().join("printer.toml"))
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// The effective device profile.
    pub fn profile(&self) -> DeviceProfile {
        DeviceProfile::merged(self.printer.clone())
    }

    /// Replaces the stored profile with every field of `profile`.
    pub fn set_profile(&mut self, profile: &DeviceProfile) {
        self.printer = ProfileOverrides {
            device_name: Some(profile.device_name.clone()),
            paper_width_mm: Some(profile.paper_width_mm),
            font_size: Some(profile.font_size),
            bold: Some(profile.bold),
        };
    }

    /// The receipt layout for the effective profile.
    pub fn layout(&self) -> ReceiptLayout {
        let derived = ReceiptLayout::for_profile(&self.profile());
        ReceiptLayout {
            separator_width: self.receipt.separator_width.unwrap_or(derived.separator_width),
            currency_glyph: self.receipt.currency_glyph,
        }
    }
}

fn save_error(path: &Path, err: std::io::Error) -> PrintError {
    PrintError::ConfigSaveFailed(format!("{}: {}", path.display(), err))
}

// =============================================================================
// Unit Tests
// =============================================================================
