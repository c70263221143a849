use anyhow::{Context, Result};
use log::{error, info, warn};

use super::profile::Profile;
use super::rollback::Rollback;
use crate::error::{AmpError, AmpResult};
use crate::hal::{
    AudioDevice, Mixer, PcmConfig, PcmDirection, PcmFormat, PcmStream, SndDevice, Usecase,
    UsecaseId,
};

/// Usecase registered while feedback capture runs
pub const FEEDBACK_USECASE: UsecaseId = UsecaseId::SpkrCalibTx;

/// Capture device carrying the V/I sense data
pub const FEEDBACK_SND_DEVICE: SndDevice = SndDevice::InCaptureViFeedback;

pub const FEEDBACK_PCM_CONFIG: PcmConfig = PcmConfig {
    channels: 2,
    rate: 48000,
    period_size: 256,
    period_count: 4,
    format: PcmFormat::S24Le,
    start_threshold: 0,
    stop_threshold: i32::MAX as u32,
    avail_min: 40,
};

/// Mixer controls of a smart-PA that takes speaker feedback
#[derive(Debug, Clone, Copy)]
pub struct SmartPaControls {
    /// Integer control selecting the left speaker channel id
    pub spkid_left: &'static str,
    /// Enum control taking a [`Profile`] name
    pub algo_profile: &'static str,
    /// Enum control taking `ENABLE` / `DISABLE`
    pub smartpa_enable: &'static str,
}

/// An open feedback capture stream
pub struct FeedbackSession {
    stream: Option<Box<dyn PcmStream>>,
    pcm_device: u32,
}

impl FeedbackSession {
    pub fn pcm_device(&self) -> u32 {
        self.pcm_device
    }

    fn close(mut self) {
        if let Some(stream) = self.stream.take() {
            stream.close();
        }
    }
}

impl Drop for FeedbackSession {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            warn!(
                "Feedback stream on PCM {} dropped while active, amplifier left enabled",
                self.pcm_device
            );
            stream.close();
        }
    }
}

/// Starts and stops speaker feedback capture; at most one session at a time
pub struct FeedbackManager {
    controls: SmartPaControls,
    session: Option<FeedbackSession>,
}

impl FeedbackManager {
    pub fn new(controls: SmartPaControls) -> Self {
        Self {
            controls,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&FeedbackSession> {
        self.session.as_ref()
    }

    /// Handle a routing change. Non-speaker devices are ignored.
    pub fn set_feedback(
        &mut self,
        adev: &mut AudioDevice,
        devices: SndDevice,
        profile: Profile,
        enable: bool,
    ) -> AmpResult<()> {
        if !devices.is_speaker() {
            return Ok(());
        }

        if enable {
            self.start(adev, profile)
        } else {
            self.stop(adev)
        }
    }

    fn start(&mut self, adev: &mut AudioDevice, profile: Profile) -> AmpResult<()> {
        if self.session.is_some() {
            error!("Feedback capture already open");
            return Err(AmpError::InvalidState("feedback capture already open"));
        }

        let controls = self.controls;
        let usecase = Usecase::capture(FEEDBACK_USECASE, FEEDBACK_SND_DEVICE);
        let mut setup = Rollback::new(adev);

        setup.usecases.push_front(usecase.clone()).map_err(|e| {
            error!("Failed to allocate usecase record: {}", e);
            e
        })?;
        setup.defer("usecase", |adev| {
            adev.usecases.remove(FEEDBACK_USECASE);
        });

        report(setup.routing.enable_snd_device(FEEDBACK_SND_DEVICE));
        setup.defer("feedback device", |adev| {
            report(adev.routing.disable_snd_device(FEEDBACK_SND_DEVICE));
        });

        report(setup.routing.enable_audio_route(&usecase));
        setup.defer("audio route", move |adev| {
            report(adev.routing.disable_audio_route(&usecase));
        });

        report(mixer_set_value(setup.mixer.as_mut(), controls.spkid_left, 0));

        info!("Using profile {}", profile.name());
        report(mixer_set_enum(setup.mixer.as_mut(), controls.algo_profile, profile.name()));

        report(mixer_set_enum(setup.mixer.as_mut(), controls.smartpa_enable, "ENABLE"));
        setup.defer("smart-PA enable", move |adev| {
            report(mixer_set_enum(adev.mixer.as_mut(), controls.smartpa_enable, "DISABLE"));
        });

        let pcm_device = setup
            .routing
            .pcm_device_id(FEEDBACK_USECASE, PcmDirection::Capture)
            .ok_or_else(|| {
                error!("Invalid PCM device for usecase {:?}", FEEDBACK_USECASE);
                AmpError::DeviceUnavailable(FEEDBACK_USECASE)
            })?;

        let card = setup.snd_card;
        let stream = open_capture(&mut setup, card, pcm_device)?;

        setup.commit();
        self.session = Some(FeedbackSession {
            stream: Some(stream),
            pcm_device,
        });

        info!("Feedback enabled successfully");
        Ok(())
    }

    fn stop(&mut self, adev: &mut AudioDevice) -> AmpResult<()> {
        let Some(session) = self.session.take() else {
            info!("Feedback capture not open");
            return Err(AmpError::InvalidState("feedback capture not open"));
        };

        session.close();

        report(mixer_set_enum(adev.mixer.as_mut(), self.controls.smartpa_enable, "DISABLE"));
        report(adev.routing.disable_snd_device(FEEDBACK_SND_DEVICE));

        match adev.usecases.remove(FEEDBACK_USECASE) {
            Some(usecase) => report(adev.routing.disable_audio_route(&usecase)),
            None => warn!("Usecase {:?} missing from active list", FEEDBACK_USECASE),
        }

        info!("Feedback disabled");
        Ok(())
    }
}

/// Open and start the capture stream, closing it again on any failure
fn open_capture(
    adev: &mut AudioDevice,
    card: u32,
    pcm_device: u32,
) -> AmpResult<Box<dyn PcmStream>> {
    let mut stream = adev
        .pcm
        .open(card, pcm_device, PcmDirection::Capture, &FEEDBACK_PCM_CONFIG)
        .map_err(|e| {
            error!("Failed to open PCM device: {:#}", e);
            AmpError::Io(format!("{:#}", e))
        })?;

    if !stream.is_ready() {
        let reason = stream.last_error();
        error!("Failed to open PCM device: {}", reason);
        stream.close();
        return Err(AmpError::Io(reason));
    }

    if let Err(e) = stream.start() {
        let reason = match stream.last_error() {
            detail if detail.is_empty() => format!("{:#}", e),
            detail => detail,
        };
        error!("Failed to start PCM: {}", reason);
        stream.close();
        return Err(AmpError::Io(reason));
    }

    Ok(stream)
}

fn mixer_set_enum(mixer: &mut dyn Mixer, name: &str, value: &str) -> Result<()> {
    let ctl = mixer
        .get_control(name)
        .with_context(|| format!("Could not get mixer ctl '{}'", name))?;
    mixer
        .set_enum_by_name(ctl, value)
        .with_context(|| format!("Failed to set mixer ctl '{}' to enum '{}'", name, value))?;

    info!("Set mixer ctl '{}' to enum '{}'", name, value);
    Ok(())
}

fn mixer_set_value(mixer: &mut dyn Mixer, name: &str, value: i64) -> Result<()> {
    let ctl = mixer
        .get_control(name)
        .with_context(|| format!("Could not get mixer ctl '{}'", name))?;
    mixer
        .set_value(ctl, 0, value)
        .with_context(|| format!("Failed to set mixer ctl '{}' to '{}'", name, value))?;

    info!("Set mixer ctl '{}' to '{}'", name, value);
    Ok(())
}

/// Mixer and routing writes are best effort; failures are logged only
fn report(result: Result<()>) {
    if let Err(e) = result {
        error!("{:#}", e);
    }
}
