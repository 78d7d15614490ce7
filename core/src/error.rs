use thiserror::Error;

/// Failures raised while running a transformation. Decode and encode are the
/// only fallible stages; pixel transforms on a decoded image cannot fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),
}
