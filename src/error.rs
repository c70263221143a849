use std::collections::TryReserveError;
use thiserror::Error;

use crate::hal::UsecaseId;

pub const EINVAL: i32 = 22;
pub const ENODEV: i32 = 19;
pub const EIO: i32 = 5;
pub const ENOMEM: i32 = 12;

/// Errors returned to the audio framework by the amplifier module
#[derive(Debug, Error)]
pub enum AmpError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("no PCM device for usecase {0:?}")]
    DeviceUnavailable(UsecaseId),

    #[error("PCM I/O failure: {0}")]
    Io(String),

    #[error("'{0}' does not name a known amplifier module or interface")]
    NotFound(String),

    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl AmpError {
    /// Negative errno handed back across the HAL boundary
    pub fn status(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidState(_) => -EINVAL,
            Self::DeviceUnavailable(_) | Self::NotFound(_) => -ENODEV,
            Self::Io(_) => -EIO,
            Self::AllocationFailure(_) => -ENOMEM,
        }
    }
}

pub type AmpResult<T> = std::result::Result<T, AmpError>;

/// Collapse a HAL call result into the framework's status code
pub fn status_of<T>(result: &AmpResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AmpError::InvalidArgument("adev").status(), -22);
        assert_eq!(AmpError::InvalidState("pcm open").status(), -22);
        assert_eq!(AmpError::DeviceUnavailable(UsecaseId::SpkrCalibTx).status(), -19);
        assert_eq!(AmpError::Io("boom".to_string()).status(), -5);
        assert_eq!(AmpError::NotFound("bogus".to_string()).status(), -19);
    }

    #[test]
    fn test_allocation_failure_maps_to_enomem() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        let amp: AmpError = err.into();
        assert_eq!(amp.status(), -ENOMEM);
    }

    #[test]
    fn test_status_of_ok_is_zero() {
        let ok: AmpResult<()> = Ok(());
        assert_eq!(status_of(&ok), 0);
        let err: AmpResult<()> = Err(AmpError::Io("x".into()));
        assert_eq!(status_of(&err), -EIO);
    }
}
