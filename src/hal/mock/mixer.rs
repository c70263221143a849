use anyhow::{anyhow, Result};

use super::journal::{HalCall, Journal};
use crate::hal::traits::Mixer;
use crate::hal::types::ControlHandle;

#[derive(Debug, Clone)]
enum ControlKind {
    Enum(Vec<String>),
    Integer { count: usize },
}

/// Control definition for the simulated mixer
#[derive(Debug, Clone)]
pub struct MockControl {
    name: String,
    kind: ControlKind,
}

impl MockControl {
    pub fn enumerated(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ControlKind::Enum(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    pub fn integer(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: ControlKind::Integer { count },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Simulated mixer that validates writes and journals them
pub struct SimulatedMixer {
    controls: Vec<MockControl>,
    journal: Journal,
}

impl SimulatedMixer {
    pub fn new(controls: Vec<MockControl>, journal: Journal) -> Self {
        Self { controls, journal }
    }

    fn control(&self, ctl: ControlHandle) -> Result<&MockControl> {
        self.controls
            .get(ctl.0)
            .ok_or_else(|| anyhow!("Stale mixer control handle {}", ctl.0))
    }
}

impl Mixer for SimulatedMixer {
    fn get_control(&self, name: &str) -> Option<ControlHandle> {
        self.controls
            .iter()
            .position(|c| c.name == name)
            .map(ControlHandle)
    }

    fn set_enum_by_name(&mut self, ctl: ControlHandle, value: &str) -> Result<()> {
        let control = self.control(ctl)?;
        match &control.kind {
            ControlKind::Enum(values) if values.iter().any(|v| v == value) => {}
            ControlKind::Enum(_) => {
                return Err(anyhow!("'{}' has no enum entry '{}'", control.name, value));
            }
            ControlKind::Integer { .. } => {
                return Err(anyhow!("'{}' is not an enum control", control.name));
            }
        }

        self.journal.record(HalCall::SetEnum {
            control: control.name.clone(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn set_value(&mut self, ctl: ControlHandle, index: usize, value: i64) -> Result<()> {
        let control = self.control(ctl)?;
        match &control.kind {
            ControlKind::Integer { count } if index < *count => {}
            ControlKind::Integer { count } => {
                return Err(anyhow!(
                    "'{}' index {} out of range (count {})",
                    control.name, index, count
                ));
            }
            ControlKind::Enum(values) if index == 0 && (value as usize) < values.len() => {}
            ControlKind::Enum(_) => {
                return Err(anyhow!("'{}' rejects value {}", control.name, value));
            }
        }

        self.journal.record(HalCall::SetValue {
            control: control.name.clone(),
            index,
            value,
        });
        Ok(())
    }
}
