use anyhow::Result;
use log::info;

use super::props::{fingerprint_to_description, set_ro_build_prop};
use super::table::VariantEntry;
use crate::hal::PropertyStore;

/// Hardware code set by the bootloader
pub const HWC_PROP: &str = "ro.boot.hwc";
/// Hardware name set by the bootloader
pub const HWNAME_PROP: &str = "ro.boot.hwname";

/// First variant matching the boot hardware code and name
pub fn search_variant<'a>(
    store: &dyn PropertyStore,
    variants: &'a [VariantEntry],
) -> Option<&'a VariantEntry> {
    let hwc = store.get_or(HWC_PROP, "");
    let hwname = store.get_or(HWNAME_PROP, "");

    variants.iter().find(|v| v.matches(&hwc, &hwname))
}

/// Apply a variant's identity to the build properties
pub fn set_variant_props(store: &mut dyn PropertyStore, variant: &VariantEntry) -> Result<()> {
    set_ro_build_prop(store, "brand", &variant.brand, true)?;
    set_ro_build_prop(store, "device", &variant.device, true)?;
    set_ro_build_prop(store, "model", &variant.model, true)?;

    set_ro_build_prop(store, "fingerprint", &variant.build_fingerprint, false)?;
    store.override_property("ro.bootimage.build.fingerprint", &variant.build_fingerprint, true)?;

    store.override_property(
        "ro.build.description",
        &fingerprint_to_description(&variant.build_fingerprint),
        true,
    )?;

    Ok(())
}

/// Find the matching variant and apply it; no match leaves the store untouched
pub fn resolve<'a>(
    store: &mut dyn PropertyStore,
    variants: &'a [VariantEntry],
) -> Result<Option<&'a VariantEntry>> {
    let Some(variant) = search_variant(&*store, variants) else {
        info!("No variant matches this board");
        return Ok(None);
    };

    info!("Applying variant {} ({})", variant.model, variant.device);
    set_variant_props(store, variant)?;
    Ok(Some(variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::props::MemoryPropertyStore;

    fn variant(hwc: &str, hwname: &str, model: &str) -> VariantEntry {
        VariantEntry {
            hwc_value: hwc.to_string(),
            hwname: hwname.to_string(),
            brand: "Redmi".to_string(),
            device: hwname.to_string(),
            model: model.to_string(),
            build_fingerprint: format!(
                "Redmi/{0}/{0}:12/SKQ1.211006.001/V13.0.4.0:user/release-keys",
                hwname
            ),
        }
    }

    fn boot(hwc: &str, hwname: &str) -> MemoryPropertyStore {
        MemoryPropertyStore::from_build_prop(&format!(
            "{}={}\n{}={}\n",
            HWC_PROP, hwc, HWNAME_PROP, hwname
        ))
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let variants = [variant("", "sweet", "M2101K6G"), variant("India", "sweet", "M2101K6I")];
        let store = boot("India", "sweet");

        let found = search_variant(&store, &variants).unwrap();
        assert_eq!(found.model, "M2101K6G");
    }

    #[test]
    fn test_no_match_applies_nothing() {
        let variants = [variant("India", "sweet", "M2101K6I")];
        let mut store = boot("Global", "sweet");

        assert!(resolve(&mut store, &variants).unwrap().is_none());
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_missing_boot_props_match_only_empty_names() {
        let variants = [variant("", "sweet", "M2101K6G")];
        let store = MemoryPropertyStore::new();
        assert!(search_variant(&store, &variants).is_none());
    }

    #[test]
    fn test_description_derived_from_fingerprint() {
        let variants = [variant("", "sweet", "M2101K6G")];
        let mut store = boot("Global", "sweet");

        resolve(&mut store, &variants).unwrap();
        assert_eq!(
            store.get("ro.build.description").as_deref(),
            Some("sweet-user 12 SKQ1.211006.001 V13.0.4.0 release-keys")
        );
    }
}
