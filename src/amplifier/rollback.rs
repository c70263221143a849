use std::ops::{Deref, DerefMut};

use log::debug;

use crate::hal::AudioDevice;

type Undo = Box<dyn FnOnce(&mut AudioDevice)>;

/// Scoped multi-step setup against the audio device.
///
/// Each completed step records its undo action with [`Rollback::defer`].
/// Dropping the guard without [`Rollback::commit`] runs the recorded
/// actions newest first, so an early `?` return unwinds a partial setup.
pub struct Rollback<'a> {
    adev: &'a mut AudioDevice,
    undo: Vec<(&'static str, Undo)>,
}

impl<'a> Rollback<'a> {
    pub fn new(adev: &'a mut AudioDevice) -> Self {
        Self {
            adev,
            undo: Vec::new(),
        }
    }

    /// Record how to revert the step that just completed
    pub fn defer<F>(&mut self, step: &'static str, undo: F)
    where
        F: FnOnce(&mut AudioDevice) + 'static,
    {
        self.undo.push((step, Box::new(undo)));
    }

    /// Number of recorded undo actions
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Keep everything set up so far
    pub fn commit(mut self) {
        self.undo.clear();
    }
}

impl Deref for Rollback<'_> {
    type Target = AudioDevice;

    fn deref(&self) -> &AudioDevice {
        &*self.adev
    }
}

impl DerefMut for Rollback<'_> {
    fn deref_mut(&mut self) -> &mut AudioDevice {
        &mut *self.adev
    }
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        while let Some((step, undo)) = self.undo.pop() {
            debug!("Rolling back {}", step);
            undo(&mut *self.adev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{HalCall, SimulatedCard};
    use crate::hal::SndDevice;

    #[test]
    fn test_drop_unwinds_newest_first() {
        let card = SimulatedCard::new();
        let journal = card.journal();
        let mut adev = card.audio_device();

        {
            let mut setup = Rollback::new(&mut adev);
            setup.defer("first", |adev| {
                adev.routing.disable_snd_device(SndDevice::InHandsetMic).unwrap();
            });
            setup.defer("second", |adev| {
                adev.routing.disable_snd_device(SndDevice::InSpeakerMic).unwrap();
            });
            assert_eq!(setup.depth(), 2);
        }

        assert_eq!(
            journal.calls(),
            vec![
                HalCall::DisableSndDevice(SndDevice::InSpeakerMic),
                HalCall::DisableSndDevice(SndDevice::InHandsetMic),
            ]
        );
    }

    #[test]
    fn test_commit_keeps_setup() {
        let card = SimulatedCard::new();
        let journal = card.journal();
        let mut adev = card.audio_device();

        let mut setup = Rollback::new(&mut adev);
        setup.routing.enable_snd_device(SndDevice::InHandsetMic).unwrap();
        setup.defer("mic", |adev| {
            adev.routing.disable_snd_device(SndDevice::InHandsetMic).unwrap();
        });
        setup.commit();

        assert_eq!(journal.calls(), vec![HalCall::EnableSndDevice(SndDevice::InHandsetMic)]);
    }
}
