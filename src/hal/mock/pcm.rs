use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::journal::{HalCall, Journal};
use super::Faults;
use crate::hal::traits::{PcmBackend, PcmStream};
use crate::hal::types::{PcmConfig, PcmDirection};

pub struct SimulatedPcm {
    journal: Journal,
    faults: Arc<Mutex<Faults>>,
}

impl SimulatedPcm {
    pub fn new(journal: Journal, faults: Arc<Mutex<Faults>>) -> Self {
        Self { journal, faults }
    }
}

impl PcmBackend for SimulatedPcm {
    fn open(
        &mut self,
        card: u32,
        device: u32,
        direction: PcmDirection,
        config: &PcmConfig,
    ) -> Result<Box<dyn PcmStream>> {
        let faults = self
            .faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        if faults.pcm_open {
            return Err(anyhow!("cannot open device {} on card {}", device, card));
        }

        self.journal.record(HalCall::PcmOpen {
            card,
            device,
            direction,
            config: *config,
        });

        Ok(Box::new(SimulatedStream {
            device,
            ready: !faults.pcm_not_ready,
            fail_start: faults.pcm_start,
            last_error: String::new(),
            journal: self.journal.clone(),
        }))
    }
}

struct SimulatedStream {
    device: u32,
    ready: bool,
    fail_start: bool,
    last_error: String,
    journal: Journal,
}

impl PcmStream for SimulatedStream {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            self.last_error = format!("cannot start channel: pcmC0D{}c", self.device);
            return Err(anyhow!(self.last_error.clone()));
        }
        self.journal.record(HalCall::PcmStart { device: self.device });
        Ok(())
    }

    fn last_error(&self) -> String {
        if self.ready {
            self.last_error.clone()
        } else {
            format!("cannot set hw params: pcmC0D{}c", self.device)
        }
    }

    fn close(self: Box<Self>) {
        self.journal.record(HalCall::PcmClose { device: self.device });
    }
}
