#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to open {url}: {reason}")]
    OpenFailed { url: String, reason: String },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error(transparent)]
    Validation(#[from] zink_core::link::ValidationError),
}
