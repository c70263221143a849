pub mod props;
pub mod resolver;
pub mod table;

pub use props::{fingerprint_to_description, set_ro_build_prop, MemoryPropertyStore};
pub use resolver::{resolve, search_variant, set_variant_props, HWC_PROP, HWNAME_PROP};
pub use table::{VariantConfig, VariantEntry, VariantStorage};
