pub mod audio_device;
pub mod mock;
pub mod traits;
pub mod types;
pub mod usecase;

pub use audio_device::AudioDevice;
pub use traits::{AmplifierHal, AudioRouting, Mixer, PcmBackend, PcmStream, PropertyStore};
pub use types::{
    AudioMode, ControlHandle, PcmConfig, PcmDirection, PcmFormat, SndDevice, Usecase,
    UsecaseId, SPEAKER_DEVICES,
};
pub use usecase::UsecaseList;
