use thiserror::Error;

/// Why a snapshot could not be stored or read back.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot json is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },

    #[error("snapshot is truncated")]
    Truncated,

    #[error("checksum verification failed")]
    ChecksumMismatch,

    #[error("snapshot payload is not utf-8")]
    NotUtf8,
}
