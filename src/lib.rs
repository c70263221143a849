pub mod amplifier;
pub mod error;
pub mod hal;
pub mod registry;
pub mod variant;

pub use amplifier::{Profile, Tas2562};
pub use error::{AmpError, AmpResult};
pub use hal::{AmplifierHal, AudioDevice, AudioMode, SndDevice};
pub use registry::{close_device, ModuleRegistry};
pub use variant::{resolve, MemoryPropertyStore, VariantConfig, VariantEntry, VariantStorage};
