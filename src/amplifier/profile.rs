use log::info;
use serde::{Deserialize, Serialize};

use crate::hal::AudioMode;

/// Speaker protection algorithm profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profile {
    #[default]
    Music,
    Ring,
    Voice,
}

impl Profile {
    /// Enum entry name on the algorithm profile mixer control
    pub fn name(self) -> &'static str {
        match self {
            Self::Music => "MUSIC",
            Self::Ring => "RING",
            Self::Voice => "VOICE",
        }
    }

    /// Profile for an audio mode, `None` when the mode has no mapping
    pub fn for_mode(mode: AudioMode) -> Option<Self> {
        match mode {
            AudioMode::Normal => Some(Self::Music),
            AudioMode::Ringtone => Some(Self::Ring),
            AudioMode::InCall | AudioMode::InCommunication => Some(Self::Voice),
            _ => None,
        }
    }
}

/// Tracks the profile selected by framework mode changes
#[derive(Debug, Default)]
pub struct ProfileSelector {
    current: Profile,
}

impl ProfileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Profile {
        self.current
    }

    /// Apply a mode change. Unmapped modes keep the current profile.
    pub fn set_mode(&mut self, mode: AudioMode) -> Profile {
        if let Some(profile) = Profile::for_mode(mode) {
            self.current = profile;
        }
        info!("Setting profile to {}", self.current.name());
        self.current
    }
}
