// Video - frame publication and repaint cadence

pub mod frame;
pub mod scheduler;

pub use frame::{DisplayImage, FramePublisher, force_opaque};
pub use scheduler::{FrameLoop, RepaintScheduler};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame size mismatch: expected {expected} pixels, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type FrameResult<T> = Result<T, FrameError>;
