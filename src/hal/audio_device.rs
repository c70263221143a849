use super::traits::{AudioRouting, Mixer, PcmBackend};
use super::usecase::UsecaseList;

/// Primary HAL context handed to the amplifier on every routing change.
///
/// Fields are public so callers can borrow the collaborators independently.
pub struct AudioDevice {
    pub snd_card: u32,
    pub usecases: UsecaseList,
    pub mixer: Box<dyn Mixer>,
    pub routing: Box<dyn AudioRouting>,
    pub pcm: Box<dyn PcmBackend>,
}

impl AudioDevice {
    pub fn new(
        snd_card: u32,
        mixer: Box<dyn Mixer>,
        routing: Box<dyn AudioRouting>,
        pcm: Box<dyn PcmBackend>,
    ) -> Self {
        Self {
            snd_card,
            usecases: UsecaseList::new(),
            mixer,
            routing,
            pcm,
        }
    }
}
