pub mod metadata;

pub use metadata::{
    linked_modules, AmplifierModule, ApiVersion, OpenFn, AMPLIFIER_DEVICE_API_VERSION,
    AMPLIFIER_HARDWARE_INTERFACE, AMPLIFIER_HARDWARE_MODULE_ID,
};

use std::collections::HashMap;

use log::{error, info};

use crate::amplifier::TAS2562_MODULE;
use crate::error::{AmpError, AmpResult};
use crate::hal::AmplifierHal;

/// Registry of amplifier modules keyed by module id
pub struct ModuleRegistry {
    modules: HashMap<String, AmplifierModule>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Registry with the modules built into this crate
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TAS2562_MODULE);
        registry
    }

    /// Registry populated from every module linked into the binary
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for module in linked_modules() {
            registry.register(*module);
        }
        registry
    }

    /// Register a module; a later registration replaces one with the same id
    pub fn register(&mut self, module: AmplifierModule) {
        info!("Registered amplifier module '{}' ({})", module.id, module.name);
        self.modules.insert(module.id.to_string(), module);
    }

    pub fn get(&self, id: &str) -> Option<&AmplifierModule> {
        self.modules.get(id)
    }

    pub fn list_modules(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Load module `id` and open a device on `interface`
    pub fn open(&self, id: &str, interface: &str) -> AmpResult<Box<dyn AmplifierHal>> {
        let module = self.get(id).ok_or_else(|| {
            error!("No amplifier module '{}'", id);
            AmpError::NotFound(id.to_string())
        })?;
        module.open(interface)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Release a device handle; a missing handle is a no-op
pub fn close_device(device: Option<Box<dyn AmplifierHal>>) -> AmpResult<()> {
    match device {
        Some(device) => device.close(),
        None => Ok(()),
    }
}
