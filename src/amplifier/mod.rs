pub mod feedback;
pub mod profile;
pub mod rollback;
pub mod tas2562;

pub use feedback::{
    FeedbackManager, FeedbackSession, SmartPaControls, FEEDBACK_PCM_CONFIG, FEEDBACK_SND_DEVICE,
    FEEDBACK_USECASE,
};
pub use profile::{Profile, ProfileSelector};
pub use rollback::Rollback;
pub use tas2562::{Tas2562, TAS2562_CONTROLS, TAS2562_MODULE};
