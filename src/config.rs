//! Configuration for a conversion run (`fwd.toml`).
//!
//! The class allow-list, the exclusion set, the scan directories and the
//! forward-declaration header name are loaded once at startup and stay
//! immutable for the whole run. A `fwd.toml` at the scan root overrides the
//! compiled-in defaults, which describe the firmware include tree this tool
//! was written for.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "fwd.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct FwdConfig {
    /// Classes eligible for forward-declaration conversion.
    #[serde(default = "default_classes")]
    pub classes: BTreeSet<String>,
    /// File names that are never rewritten.
    #[serde(default = "default_exclude")]
    pub exclude: BTreeSet<String>,
    /// Directories to scan, relative to the root. Order drives report order.
    #[serde(default = "default_dirs")]
    pub dirs: Vec<String>,
    /// Header that provides the forward declarations themselves.
    #[serde(default = "default_forward_header")]
    pub forward_header: String,
}

impl Default for FwdConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            exclude: default_exclude(),
            dirs: default_dirs(),
            forward_header: default_forward_header(),
        }
    }
}

fn default_classes() -> BTreeSet<String> {
    [
        "HeaterController",
        "HeaterMonitor",
        "ZVSDriver",
        "TempSensor",
        "IRTempSensor",
        "DeviceUI",
        "ScreenManager",
        "DisplayDriver",
        "Screen",
        "Network",
        "WiFiManager",
        "WebSocketManager",
        "OTASetup",
        "InputManager",
        "InputHandler",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclude() -> BTreeSet<String> {
    ["forward.h", "Types.h", "Config.h", "bitmaps.h"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_dirs() -> Vec<String> {
    [
        "include/core",
        "include/ui",
        "include/heater",
        "include/net",
        "include/hardware",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_forward_header() -> String {
    "forward.h".to_string()
}

/// Load the run configuration from `fwd.toml` at the scan root, falling
/// back to the compiled-in defaults when the file does not exist.
pub fn load(root: &Path) -> Result<FwdConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FwdConfig::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    toml::from_str(&raw).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
            path.display()
        )
    })
}
