use anyhow::Result;

use super::audio_device::AudioDevice;
use super::types::{
    AudioMode, ControlHandle, PcmConfig, PcmDirection, SndDevice, Usecase, UsecaseId,
};
use crate::error::AmpResult;

/// Named mixer controls exposed by the sound card
pub trait Mixer {
    /// Look up a control by name
    fn get_control(&self, name: &str) -> Option<ControlHandle>;

    /// Select an enum control entry by its string name
    fn set_enum_by_name(&mut self, ctl: ControlHandle, value: &str) -> Result<()>;

    /// Write one element of an integer/boolean control
    fn set_value(&mut self, ctl: ControlHandle, index: usize, value: i64) -> Result<()>;
}

/// Routing side of the primary audio HAL
pub trait AudioRouting {
    fn enable_snd_device(&mut self, device: SndDevice) -> Result<()>;

    fn disable_snd_device(&mut self, device: SndDevice) -> Result<()>;

    /// Apply the mixer paths for a usecase
    fn enable_audio_route(&mut self, usecase: &Usecase) -> Result<()>;

    /// Revert the mixer paths for a usecase
    fn disable_audio_route(&mut self, usecase: &Usecase) -> Result<()>;

    /// Platform PCM device backing a usecase, if the platform defines one
    fn pcm_device_id(&self, usecase: UsecaseId, direction: PcmDirection) -> Option<u32>;
}

/// Opens PCM streams on a sound card
pub trait PcmBackend {
    fn open(
        &mut self,
        card: u32,
        device: u32,
        direction: PcmDirection,
        config: &PcmConfig,
    ) -> Result<Box<dyn PcmStream>>;
}

/// An opened PCM stream
pub trait PcmStream {
    fn is_ready(&self) -> bool;

    fn start(&mut self) -> Result<()>;

    /// Last error reported by the driver for this stream
    fn last_error(&self) -> String;

    fn close(self: Box<Self>);
}

/// System property store
pub trait PropertyStore {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Regular property write; read-only properties may refuse it
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Force a value into the store, bypassing the read-only lock.
    /// When `add` is false, keys that do not exist yet are left alone.
    fn override_property(&mut self, key: &str, value: &str, add: bool) -> Result<()>;
}

/// Amplifier plugin contract invoked by the audio framework
pub trait AmplifierHal {
    /// Create a device for the requested hardware interface
    fn open(name: &str) -> AmpResult<Self>
    where
        Self: Sized;

    /// Release the device
    fn close(self: Box<Self>) -> AmpResult<()>;

    /// Audio mode changed
    fn set_mode(&mut self, mode: AudioMode) -> AmpResult<()>;

    /// Output routing changed; start or stop speaker feedback capture
    fn set_feedback(
        &mut self,
        adev: Option<&mut AudioDevice>,
        devices: SndDevice,
        enable: bool,
    ) -> AmpResult<()>;
}
