use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::hal::PropertyStore;

/// Partition prefixes of `ro.*` build properties, in override order
pub const RO_PROPS_DEFAULT_SOURCE_ORDER: [&str; 8] = [
    "",
    "bootimage.",
    "odm.",
    "product.",
    "system.",
    "system_ext.",
    "vendor.",
    "vendor_dlkm.",
];

/// Longest value accepted for a writable property
pub const PROP_VALUE_MAX: usize = 92;

/// In-memory property store with init's read-only rules
#[derive(Debug, Default, Clone)]
pub struct MemoryPropertyStore {
    props: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` lines; blank lines and `#` comments are skipped
    pub fn from_build_prop(contents: &str) -> Result<Self> {
        let mut store = Self::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .with_context(|| format!("Line {}: expected key=value", lineno + 1))?;
            store.props.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(store)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read properties from {:?}", path))?;
        Self::from_build_prop(&contents)
    }

    /// Every accepted write since construction, oldest first
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn store(&mut self, key: &str, value: &str) {
        debug!("{} = {}", key, value);
        self.props.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.props.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.starts_with("ro.") {
            if self.props.contains_key(key) {
                bail!("Property {} is read-only", key);
            }
        } else if value.len() >= PROP_VALUE_MAX {
            bail!("Value for {} exceeds {} bytes", key, PROP_VALUE_MAX - 1);
        }
        self.store(key, value);
        Ok(())
    }

    fn override_property(&mut self, key: &str, value: &str, add: bool) -> Result<()> {
        if self.props.contains_key(key) || add {
            self.store(key, value);
        }
        Ok(())
    }
}

/// Override a build property on every partition.
///
/// `product` selects `ro.product.<source><prop>`, otherwise
/// `ro.<source>build.<prop>` is written.
pub fn set_ro_build_prop(
    store: &mut dyn PropertyStore,
    prop: &str,
    value: &str,
    product: bool,
) -> Result<()> {
    for source in RO_PROPS_DEFAULT_SOURCE_ORDER {
        let prop_name = if product {
            format!("ro.product.{}{}", source, prop)
        } else {
            format!("ro.{}build.{}", source, prop)
        };
        store.override_property(&prop_name, value, true)?;
    }
    Ok(())
}

/// Build description derived from a fingerprint.
///
/// `brand/product/device:release/id/incremental:type/tags` becomes
/// `product-type release id incremental tags`; other shapes give "".
pub fn fingerprint_to_description(fingerprint: &str) -> String {
    let tokens: Vec<&str> = fingerprint.split(['/', ':']).collect();
    let [_brand, product, _device, release, build_id, incremental, build_type, tags] =
        tokens.as_slice()
    else {
        return String::new();
    };

    format!(
        "{}-{} {} {} {} {}",
        product, build_type, release, build_id, incremental, tags
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ro_property_locked_after_first_set() {
        let mut store = MemoryPropertyStore::new();
        store.set("ro.product.model", "A").unwrap();
        assert!(store.set("ro.product.model", "B").is_err());
        assert_eq!(store.get("ro.product.model").as_deref(), Some("A"));

        store.override_property("ro.product.model", "B", false).unwrap();
        assert_eq!(store.get("ro.product.model").as_deref(), Some("B"));
    }

    #[test]
    fn test_override_without_add_skips_missing() {
        let mut store = MemoryPropertyStore::new();
        store.override_property("ro.build.description", "x", false).unwrap();
        assert!(store.get("ro.build.description").is_none());
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_writable_value_length_limit() {
        let mut store = MemoryPropertyStore::new();
        let long = "x".repeat(PROP_VALUE_MAX);
        assert!(store.set("persist.vendor.test", &long).is_err());
        assert!(store.set("persist.vendor.test", "ok").is_ok());
        assert!(store.set("ro.build.fingerprint", &long).is_ok());
    }

    #[test]
    fn test_build_prop_fan_out() {
        let mut store = MemoryPropertyStore::new();
        set_ro_build_prop(&mut store, "fingerprint", "fp", false).unwrap();
        set_ro_build_prop(&mut store, "model", "M2101K6G", true).unwrap();

        assert_eq!(store.get("ro.build.fingerprint").as_deref(), Some("fp"));
        assert_eq!(store.get("ro.bootimage.build.fingerprint").as_deref(), Some("fp"));
        assert_eq!(store.get("ro.vendor_dlkm.build.fingerprint").as_deref(), Some("fp"));
        assert_eq!(store.get("ro.product.model").as_deref(), Some("M2101K6G"));
        assert_eq!(store.get("ro.product.system_ext.model").as_deref(), Some("M2101K6G"));
        assert_eq!(store.writes().len(), 16);
    }

    #[test]
    fn test_fingerprint_to_description() {
        assert_eq!(
            fingerprint_to_description(
                "Redmi/sweet_global/sweet:11/RKQ1.200826.002/V12.5.6.0.RKFMIXM:user/release-keys"
            ),
            "sweet_global-user 11 RKQ1.200826.002 V12.5.6.0.RKFMIXM release-keys"
        );
        assert_eq!(fingerprint_to_description("not/a/fingerprint"), "");
        assert_eq!(fingerprint_to_description(""), "");
    }

    #[test]
    fn test_parse_build_prop() {
        let store = MemoryPropertyStore::from_build_prop(
            "# boot\nro.boot.hwc=India\n\nro.boot.hwname = sweetin\n",
        )
        .unwrap();
        assert_eq!(store.get("ro.boot.hwc").as_deref(), Some("India"));
        assert_eq!(store.get("ro.boot.hwname").as_deref(), Some("sweetin"));
        assert!(store.writes().is_empty());

        assert!(MemoryPropertyStore::from_build_prop("no equals sign").is_err());
    }
}
