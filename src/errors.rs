use thiserror::Error;

/// Error depicting a failed badge update as reported to the caller
///
#[derive(Debug, Error)]
#[error("error while updating weather badge: {0}")]
pub struct BadgeError(pub String);
