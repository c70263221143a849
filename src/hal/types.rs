use serde::{Deserialize, Serialize};

/// Framework audio mode (`audio_mode_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioMode {
    Invalid,
    Current,
    Normal,
    Ringtone,
    InCall,
    InCommunication,
    CallScreen,
}

impl AudioMode {
    /// Decode the raw `audio_mode_t` value; unknown values become `Invalid`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            -1 => Self::Current,
            0 => Self::Normal,
            1 => Self::Ringtone,
            2 => Self::InCall,
            3 => Self::InCommunication,
            4 => Self::CallScreen,
            _ => Self::Invalid,
        }
    }
}

/// Sound device selected by the routing subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SndDevice {
    None,

    // Output devices
    OutHandset,
    OutSpeaker,
    OutSpeakerReverse,
    OutSpeakerAndHeadphones,
    OutSpeakerAndLine,
    OutSpeakerAndHdmi,
    OutSpeakerAndDisplayPort,
    OutSpeakerAndBtA2dp,
    OutSpeakerAndBtSco,
    OutSpeakerAndBtScoWb,
    OutSpeakerAndAncHeadset,
    OutVoiceHandset,
    OutVoiceSpeaker,
    OutVoiceSpeaker2,
    OutVoiceSpeakerAndVoiceHeadphones,
    OutVoiceSpeakerAndVoiceAncHeadset,
    OutVoiceHeadphones,
    OutHeadphones,
    OutLine,
    OutHdmi,
    OutBtSco,
    OutBtA2dp,

    // Input devices
    InHandsetMic,
    InSpeakerMic,
    InCaptureViFeedback,
}

/// Output devices that route through the smart-PA speaker
pub const SPEAKER_DEVICES: [SndDevice; 14] = [
    SndDevice::OutSpeaker,
    SndDevice::OutSpeakerAndAncHeadset,
    SndDevice::OutSpeakerAndBtA2dp,
    SndDevice::OutSpeakerAndBtSco,
    SndDevice::OutSpeakerAndBtScoWb,
    SndDevice::OutSpeakerAndDisplayPort,
    SndDevice::OutSpeakerAndHdmi,
    SndDevice::OutSpeakerAndHeadphones,
    SndDevice::OutSpeakerAndLine,
    SndDevice::OutSpeakerReverse,
    SndDevice::OutVoiceSpeaker,
    SndDevice::OutVoiceSpeakerAndVoiceAncHeadset,
    SndDevice::OutVoiceSpeakerAndVoiceHeadphones,
    SndDevice::OutVoiceSpeaker2,
];

impl SndDevice {
    pub fn is_speaker(self) -> bool {
        SPEAKER_DEVICES.contains(&self)
    }
}

/// Logical audio activity known to the routing subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsecaseId {
    PrimaryPlayback,
    DeepBufferPlayback,
    AudioRecord,
    VoiceCall,
    /// Speaker protection V/I sense capture
    SpkrCalibTx,
}

/// Stream direction, used both for usecase type and PCM open flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PcmDirection {
    Playback,
    Capture,
}

/// Routing record binding a usecase to its sound devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usecase {
    pub id: UsecaseId,
    pub kind: PcmDirection,
    pub in_snd_device: SndDevice,
    pub out_snd_device: SndDevice,
    pub devices: Vec<SndDevice>,
}

impl Usecase {
    pub fn capture(id: UsecaseId, in_snd_device: SndDevice) -> Self {
        Self {
            id,
            kind: PcmDirection::Capture,
            in_snd_device,
            out_snd_device: SndDevice::None,
            devices: Vec::new(),
        }
    }
}

/// PCM sample layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PcmFormat {
    S16Le,
    /// 24-bit samples in the low bytes of a 32-bit container
    S24Le,
    /// 24-bit samples packed in 3 bytes
    S24_3Le,
    S32Le,
}

impl PcmFormat {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::S16Le => 2,
            Self::S24_3Le => 3,
            Self::S24Le | Self::S32Le => 4,
        }
    }
}

/// PCM stream configuration (`struct pcm_config`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmConfig {
    pub channels: u32,
    pub rate: u32,
    pub period_size: u32,
    pub period_count: u32,
    pub format: PcmFormat,
    pub start_threshold: u32,
    pub stop_threshold: u32,
    pub avail_min: u32,
}

impl PcmConfig {
    /// Ring buffer size in bytes
    pub fn buffer_bytes(&self) -> usize {
        self.period_size as usize
            * self.period_count as usize
            * self.channels as usize
            * self.format.bytes_per_sample()
    }
}

/// Opaque handle to a mixer control, valid for the mixer that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub usize);
