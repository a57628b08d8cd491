//! # Printer Device Profile
//!
//! Describes the receipt printer a stream is meant for. The profile is
//! consumed by the print sink; the encoder only looks at it when a caller
//! explicitly derives a layout via [`crate::receipt::ReceiptLayout::for_profile`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Default device: Star TSP100III on 72mm paper.
pub const DEFAULT_DEVICE_NAME: &str = "TSP100III";

/// Receipt printer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeviceProfile {
    pub device_name: String,
    /// Printable paper width in millimetres (typically 58, 72 or 80).
    pub paper_width_mm: u32,
    pub font_size: u32,
    pub bold: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        DeviceProfile {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            paper_width_mm: 72,
            font_size: 12,
            bold: true,
        }
    }
}

/// A partial profile, as produced by a settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_width_mm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

impl DeviceProfile {
    /// Applies `overrides` on top of the default profile.
    ///
    /// ## Example
    /// ```rust
    /// use kermes_core::printer::{DeviceProfile, ProfileOverrides};
    ///
    /// let profile = DeviceProfile::merged(ProfileOverrides {
    ///     paper_width_mm: Some(58),
    ///     ..Default::default()
    /// });
    /// assert_eq!(profile.paper_width_mm, 58);
    /// assert_eq!(profile.device_name, "TSP100III");
    /// ```
    pub fn merged(overrides: ProfileOverrides) -> Self {
        DeviceProfile::default().apply(overrides)
    }

    /// Applies `overrides` on top of this profile.
    pub fn apply(mut self, overrides: ProfileOverrides) -> Self {
        if let Some(name) = overrides.device_name {
            self.device_name = name;
        }
        if let Some(width) = overrides.paper_width_mm {
            self.paper_width_mm = width;
        }
        if let Some(size) = overrides.font_size {
            self.font_size = size;
        }
        if let Some(bold) = overrides.bold {
            self.bold = bold;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = DeviceProfile::default();
        assert_eq!(profile.device_name, "TSP100III");
        assert_eq!(profile.paper_width_mm, 72);
        assert_eq!(profile.font_size, 12);
        assert!(profile.bold);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let profile = DeviceProfile::merged(ProfileOverrides {
            device_name: Some("Kitchen".into()),
            bold: Some(false),
            ..Default::default()
        });
        assert_eq!(profile.device_name, "Kitchen");
        assert!(!profile.bold);
        assert_eq!(profile.paper_width_mm, 72);
        assert_eq!(profile.font_size, 12);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(DeviceProfile::default()).unwrap();
        assert_eq!(json["deviceName"], "TSP100III");
        assert_eq!(json["paperWidthMm"], 72);
    }
}
