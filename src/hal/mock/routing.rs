use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::journal::{HalCall, Journal};
use super::Faults;
use crate::hal::traits::AudioRouting;
use crate::hal::types::{PcmDirection, SndDevice, Usecase, UsecaseId};

/// PCM device ids of the simulated platform
const PCM_DEVICE_MAP: [(UsecaseId, PcmDirection, u32); 5] = [
    (UsecaseId::PrimaryPlayback, PcmDirection::Playback, 0),
    (UsecaseId::DeepBufferPlayback, PcmDirection::Playback, 1),
    (UsecaseId::AudioRecord, PcmDirection::Capture, 0),
    (UsecaseId::VoiceCall, PcmDirection::Playback, 2),
    (UsecaseId::SpkrCalibTx, PcmDirection::Capture, 5),
];

pub struct SimulatedRouting {
    journal: Journal,
    faults: Arc<Mutex<Faults>>,
}

impl SimulatedRouting {
    pub fn new(journal: Journal, faults: Arc<Mutex<Faults>>) -> Self {
        Self { journal, faults }
    }

    fn faults(&self) -> Faults {
        self.faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AudioRouting for SimulatedRouting {
    fn enable_snd_device(&mut self, device: SndDevice) -> Result<()> {
        self.journal.record(HalCall::EnableSndDevice(device));
        Ok(())
    }

    fn disable_snd_device(&mut self, device: SndDevice) -> Result<()> {
        self.journal.record(HalCall::DisableSndDevice(device));
        Ok(())
    }

    fn enable_audio_route(&mut self, usecase: &Usecase) -> Result<()> {
        self.journal.record(HalCall::EnableRoute(usecase.id));
        Ok(())
    }

    fn disable_audio_route(&mut self, usecase: &Usecase) -> Result<()> {
        self.journal.record(HalCall::DisableRoute(usecase.id));
        Ok(())
    }

    fn pcm_device_id(&self, usecase: UsecaseId, direction: PcmDirection) -> Option<u32> {
        if self.faults().no_pcm_device {
            return None;
        }

        PCM_DEVICE_MAP
            .iter()
            .find(|(id, dir, _)| *id == usecase && *dir == direction)
            .map(|(_, _, device)| *device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_device_lookup() {
        let faults = Arc::new(Mutex::new(Faults::default()));
        let routing = SimulatedRouting::new(Journal::new(), faults.clone());

        assert_eq!(routing.pcm_device_id(UsecaseId::SpkrCalibTx, PcmDirection::Capture), Some(5));
        assert_eq!(routing.pcm_device_id(UsecaseId::SpkrCalibTx, PcmDirection::Playback), None);

        faults.lock().unwrap().no_pcm_device = true;
        assert_eq!(routing.pcm_device_id(UsecaseId::SpkrCalibTx, PcmDirection::Capture), None);
    }
}
