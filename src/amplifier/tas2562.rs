//! TAS2562 smart-PA amplifier module.

use log::error;

use super::feedback::{FeedbackManager, SmartPaControls};
use super::profile::{Profile, ProfileSelector};
use crate::error::{AmpError, AmpResult};
use crate::hal::{AmplifierHal, AudioDevice, AudioMode, SndDevice};
use crate::registry::{
    AmplifierModule, ApiVersion, AMPLIFIER_DEVICE_API_VERSION, AMPLIFIER_HARDWARE_INTERFACE,
    AMPLIFIER_HARDWARE_MODULE_ID,
};

pub const ALGO_PROFILE_CTL: &str = "TAS2562_ALGO_PROFILE";
pub const SMARTPA_ENABLE_CTL: &str = "TAS2562_SMARTPA_ENABLE";
pub const SET_SPKID_LEFT_CTL: &str = "TAS2562_SET_SPKID_LEFT";

pub const TAS2562_CONTROLS: SmartPaControls = SmartPaControls {
    spkid_left: SET_SPKID_LEFT_CTL,
    algo_profile: ALGO_PROFILE_CTL,
    smartpa_enable: SMARTPA_ENABLE_CTL,
};

/// Version reported by opened TAS2562 devices
pub const TAS2562_DEVICE_VERSION: ApiVersion = ApiVersion::new(1, 0);

pub const TAS2562_MODULE: AmplifierModule = AmplifierModule {
    id: AMPLIFIER_HARDWARE_MODULE_ID,
    name: "TAS2562 audio amplifier HAL",
    author: "The LineageOS Project",
    api_version: AMPLIFIER_DEVICE_API_VERSION,
    open: open_device,
};

inventory::submit! { TAS2562_MODULE }

/// Amplifier device handle handed to the audio framework
pub struct Tas2562 {
    selector: ProfileSelector,
    feedback: FeedbackManager,
}

impl Tas2562 {
    pub fn profile(&self) -> Profile {
        self.selector.current()
    }

    pub fn feedback_active(&self) -> bool {
        self.feedback.is_active()
    }

    pub fn version(&self) -> ApiVersion {
        TAS2562_DEVICE_VERSION
    }
}

impl AmplifierHal for Tas2562 {
    fn open(name: &str) -> AmpResult<Self> {
        if name != AMPLIFIER_HARDWARE_INTERFACE {
            error!("{} does not match amplifier hardware interface name", name);
            return Err(AmpError::NotFound(name.to_string()));
        }

        Ok(Self {
            selector: ProfileSelector::new(),
            feedback: FeedbackManager::new(TAS2562_CONTROLS),
        })
    }

    fn close(self: Box<Self>) -> AmpResult<()> {
        Ok(())
    }

    fn set_mode(&mut self, mode: AudioMode) -> AmpResult<()> {
        self.selector.set_mode(mode);
        Ok(())
    }

    fn set_feedback(
        &mut self,
        adev: Option<&mut AudioDevice>,
        devices: SndDevice,
        enable: bool,
    ) -> AmpResult<()> {
        let Some(adev) = adev else {
            error!("Invalid parameters: no audio device");
            return Err(AmpError::InvalidArgument("audio device context is missing"));
        };

        let profile = self.selector.current();
        self.feedback.set_feedback(adev, devices, profile, enable)
    }
}

fn open_device(name: &str) -> AmpResult<Box<dyn AmplifierHal>> {
    Ok(Box::new(Tas2562::open(name)?))
}
