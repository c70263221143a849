use std::sync::{Arc, Mutex, MutexGuard};

use crate::hal::types::{PcmConfig, PcmDirection, SndDevice, UsecaseId};

/// One observable call into a simulated collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalCall {
    SetEnum { control: String, value: String },
    SetValue { control: String, index: usize, value: i64 },
    EnableSndDevice(SndDevice),
    DisableSndDevice(SndDevice),
    EnableRoute(UsecaseId),
    DisableRoute(UsecaseId),
    PcmOpen { card: u32, device: u32, direction: PcmDirection, config: PcmConfig },
    PcmStart { device: u32 },
    PcmClose { device: u32 },
}

/// Shared, ordered record of calls made against a simulated sound card
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Arc<Mutex<Vec<HalCall>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HalCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, call: HalCall) {
        self.lock().push(call);
    }

    /// Snapshot of every call so far
    pub fn calls(&self) -> Vec<HalCall> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, call: &HalCall) -> bool {
        self.lock().iter().any(|c| c == call)
    }

    /// Most recent enum value written to a control
    pub fn last_enum(&self, control: &str) -> Option<String> {
        self.lock().iter().rev().find_map(|c| match c {
            HalCall::SetEnum { control: name, value } if name == control => Some(value.clone()),
            _ => None,
        })
    }

    /// Streams opened and not yet closed
    pub fn live_streams(&self) -> usize {
        let calls = self.lock();
        let opened = calls.iter().filter(|c| matches!(c, HalCall::PcmOpen { .. })).count();
        let closed = calls.iter().filter(|c| matches!(c, HalCall::PcmClose { .. })).count();
        opened.saturating_sub(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_enum_tracks_latest_write() {
        let journal = Journal::new();
        journal.record(HalCall::SetEnum { control: "A".into(), value: "ENABLE".into() });
        journal.record(HalCall::SetEnum { control: "B".into(), value: "MUSIC".into() });
        journal.record(HalCall::SetEnum { control: "A".into(), value: "DISABLE".into() });

        assert_eq!(journal.last_enum("A").as_deref(), Some("DISABLE"));
        assert_eq!(journal.last_enum("B").as_deref(), Some("MUSIC"));
        assert_eq!(journal.last_enum("C"), None);
    }

    #[test]
    fn test_clones_share_calls() {
        let journal = Journal::new();
        let other = journal.clone();
        other.record(HalCall::PcmStart { device: 3 });
        assert_eq!(journal.len(), 1);
        journal.clear();
        assert!(other.is_empty());
    }
}
