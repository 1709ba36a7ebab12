use thiserror::Error;

/// Camera acquisition failures.
///
/// Non-fatal: the scan cannot proceed, but the caller may retry by starting
/// a new scan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("QR encode failed: {0}")]
    Encode(String),
}

/// Rejection of a scanned payload on the teller side.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),
    #[error("payload field `{0}` is missing or empty")]
    EmptyField(&'static str),
    #[error("payload could not be serialized: {0}")]
    Serialize(String),
}

/// Form-entry rejection, raised before any payload exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("amount `{0}` is not a valid number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    AmountNotPositive,
    #[error("details must not be empty")]
    MissingDetails,
    #[error("could not render the request: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),
    #[error("form error: {0}")]
    Form(#[from] FormError),
}

pub type Result<T> = std::result::Result<T, HandoffError>;
