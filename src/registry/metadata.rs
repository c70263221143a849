use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmpResult;
use crate::hal::AmplifierHal;

/// Module id the audio framework loads amplifier HALs under
pub const AMPLIFIER_HARDWARE_MODULE_ID: &str = "audio_amplifier";

/// Interface name passed to `open`
pub const AMPLIFIER_HARDWARE_INTERFACE: &str = "amplifier";

pub const AMPLIFIER_DEVICE_API_VERSION: ApiVersion = ApiVersion::new(1, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Factory that opens a device for a hardware interface name
pub type OpenFn = fn(&str) -> AmpResult<Box<dyn AmplifierHal>>;

/// Descriptor of a loadable amplifier module
#[derive(Clone, Copy)]
pub struct AmplifierModule {
    pub id: &'static str,
    pub name: &'static str,
    pub author: &'static str,
    pub api_version: ApiVersion,
    pub open: OpenFn,
}

impl fmt::Debug for AmplifierModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmplifierModule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("author", &self.author)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl AmplifierModule {
    pub fn open(&self, interface: &str) -> AmpResult<Box<dyn AmplifierHal>> {
        (self.open)(interface)
    }
}

// Modules register themselves at link time with `inventory::submit!`
inventory::collect!(AmplifierModule);

/// Every module linked into the binary
pub fn linked_modules() -> impl Iterator<Item = &'static AmplifierModule> {
    inventory::iter::<AmplifierModule>.into_iter()
}
