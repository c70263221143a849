use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Board-specific properties for one hardware variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    /// Hardware code (`ro.boot.hwc`); empty matches any code
    #[serde(default)]
    pub hwc_value: String,
    /// Hardware name (`ro.boot.hwname`) the entry applies to
    pub hwname: String,
    pub brand: String,
    pub device: String,
    pub model: String,
    pub build_fingerprint: String,
}

impl VariantEntry {
    pub fn matches(&self, hwc: &str, hwname: &str) -> bool {
        (self.hwc_value.is_empty() || self.hwc_value == hwc) && self.hwname == hwname
    }
}

/// Variant table file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub version: String,
    /// Scanned in order, first match wins
    pub variants: Vec<VariantEntry>,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            variants: Vec::new(),
        }
    }
}

/// Reads and writes the variant table as JSON
pub struct VariantStorage {
    config_path: PathBuf,
}

impl VariantStorage {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load the table; a missing file yields an empty table
    pub fn load(&self) -> Result<VariantConfig> {
        if !self.config_path.exists() {
            return Ok(VariantConfig::default());
        }

        let json = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read variant table {:?}", self.config_path))?;

        let config: VariantConfig =
            serde_json::from_str(&json).context("Failed to parse variant table JSON")?;

        Ok(config)
    }

    pub fn save(&self, config: &VariantConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create variant table directory")?;
        }

        let json =
            serde_json::to_string_pretty(config).context("Failed to serialize variant table")?;

        // Write to temporary file first
        let temp_path = self.config_path.with_extension("tmp");
        fs::write(&temp_path, json).context("Failed to write temporary variant table")?;

        fs::rename(&temp_path, &self.config_path)
            .context("Failed to atomically update variant table")?;

        Ok(())
    }
}
