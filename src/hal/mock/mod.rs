pub mod journal;
pub mod mixer;
pub mod pcm;
pub mod routing;

use std::sync::{Arc, Mutex};

pub use journal::{HalCall, Journal};
pub use mixer::{MockControl, SimulatedMixer};
pub use pcm::SimulatedPcm;
pub use routing::SimulatedRouting;

use crate::amplifier::tas2562::{ALGO_PROFILE_CTL, SET_SPKID_LEFT_CTL, SMARTPA_ENABLE_CTL};
use crate::hal::AudioDevice;

/// Failures the simulated card injects on demand
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Platform has no PCM device for any usecase
    pub no_pcm_device: bool,
    /// `pcm_open` fails outright
    pub pcm_open: bool,
    /// Stream opens but never becomes ready
    pub pcm_not_ready: bool,
    /// `pcm_start` fails
    pub pcm_start: bool,
}

/// Simulated sound card exposing the TAS2562 mixer controls
pub struct SimulatedCard {
    card: u32,
    journal: Journal,
    faults: Arc<Mutex<Faults>>,
    controls: Vec<MockControl>,
}

impl SimulatedCard {
    pub fn new() -> Self {
        Self {
            card: 0,
            journal: Journal::new(),
            faults: Arc::new(Mutex::new(Faults::default())),
            controls: vec![
                MockControl::enumerated(ALGO_PROFILE_CTL, &["MUSIC", "RING", "VOICE"]),
                MockControl::enumerated(SMARTPA_ENABLE_CTL, &["DISABLE", "ENABLE"]),
                MockControl::integer(SET_SPKID_LEFT_CTL, 1),
            ],
        }
    }

    /// Drop a control from the card before building the device
    pub fn without_control(mut self, name: &str) -> Self {
        self.controls.retain(|c| c.name() != name);
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Change the injected faults; applies to devices already built
    pub fn inject(&self, update: impl FnOnce(&mut Faults)) {
        let mut faults = self
            .faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut faults);
    }

    /// Build a primary HAL context wired to this card
    pub fn audio_device(&self) -> AudioDevice {
        AudioDevice::new(
            self.card,
            Box::new(SimulatedMixer::new(self.controls.clone(), self.journal.clone())),
            Box::new(SimulatedRouting::new(self.journal.clone(), self.faults.clone())),
            Box::new(SimulatedPcm::new(self.journal.clone(), self.faults.clone())),
        )
    }
}

impl Default for SimulatedCard {
    fn default() -> Self {
        Self::new()
    }
}
