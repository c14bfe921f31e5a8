use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::{AppError, Result};

/// USB addressing for the display's HID brightness interface.
///
/// Loaded from a YAML file when `--config` is given; every field is optional
/// there and falls back to the LG UltraFine defaults:
///
/// ```yaml
/// vendor_id: 0x043e
/// product_id: 0x9a40
/// interface: 1
/// timeout_ms: 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: u8,
    /// Control transfer timeout; zero waits forever.
    pub timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_id: 0x043e,
            product_id: 0x9a40,
            interface: 1,
            timeout_ms: 2000,
        }
    }
}

impl DeviceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| AppError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::from_yaml(&text).map_err(|reason| AppError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_yaml(text: &str) -> std::result::Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| err.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
