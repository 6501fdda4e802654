use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Feed errors
    #[error("Feed request failed at offset {skip}: {message}")]
    Transport { skip: usize, message: String },

    #[error("Failed to decode feed response: {0}")]
    Decode(String),

    // Checkpoint errors
    #[error("Checkpoint is unreadable: {0}")]
    CheckpointRead(String),

    #[error("Failed to persist checkpoint: {0}")]
    CheckpointWrite(#[source] std::io::Error),

    // Delivery errors
    #[error("Email delivery failed: {0}")]
    Email(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type DigestResult<T> = Result<T, DigestError>;
