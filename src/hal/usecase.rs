use std::collections::VecDeque;

use super::types::{Usecase, UsecaseId};
use crate::error::AmpResult;

/// Active usecase list owned by the audio device.
///
/// Newest entries sit at the head; lookups return the first match.
#[derive(Debug, Default)]
pub struct UsecaseList {
    entries: VecDeque<Usecase>,
}

impl UsecaseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head of the list
    pub fn push_front(&mut self, usecase: Usecase) -> AmpResult<()> {
        self.entries.try_reserve(1)?;
        self.entries.push_front(usecase);
        Ok(())
    }

    pub fn get(&self, id: UsecaseId) -> Option<&Usecase> {
        self.entries.iter().find(|u| u.id == id)
    }

    /// Unlink the first entry with this id
    pub fn remove(&mut self, id: UsecaseId) -> Option<Usecase> {
        let pos = self.entries.iter().position(|u| u.id == id)?;
        self.entries.remove(pos)
    }

    pub fn count(&self, id: UsecaseId) -> usize {
        self.entries.iter().filter(|u| u.id == id).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Usecase> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::types::SndDevice;

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = UsecaseList::new();
        list.push_front(Usecase::capture(UsecaseId::AudioRecord, SndDevice::InHandsetMic))
            .unwrap();
        list.push_front(Usecase::capture(UsecaseId::SpkrCalibTx, SndDevice::InCaptureViFeedback))
            .unwrap();

        let ids: Vec<_> = list.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![UsecaseId::SpkrCalibTx, UsecaseId::AudioRecord]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut list = UsecaseList::new();
        assert!(list.remove(UsecaseId::SpkrCalibTx).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_takes_first_match() {
        let mut list = UsecaseList::new();
        list.push_front(Usecase::capture(UsecaseId::SpkrCalibTx, SndDevice::InCaptureViFeedback))
            .unwrap();
        list.push_front(Usecase::capture(UsecaseId::AudioRecord, SndDevice::InHandsetMic))
            .unwrap();

        let removed = list.remove(UsecaseId::SpkrCalibTx).unwrap();
        assert_eq!(removed.in_snd_device, SndDevice::InCaptureViFeedback);
        assert_eq!(list.len(), 1);
        assert_eq!(list.count(UsecaseId::SpkrCalibTx), 0);
    }
}
