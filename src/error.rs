use thiserror::Error;

/// Presentation failures. None of these are fatal: the frame is skipped and
/// the next cadence tick tries again.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame buffer unavailable")]
    Unavailable,
    #[error("surface lost: {0}")]
    Lost(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is already running")]
    AlreadyRunning,
    #[error("no frame surface available")]
    NoSurface,
    #[error("failed to spawn session worker: {0}")]
    Spawn(#[from] std::io::Error),
}
