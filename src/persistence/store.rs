//! Snapshot transports.
//!
//! A store only moves serialized JSON; turning it back into a [`GameState`]
//! is the job of [`super::snapshot`].
//!
//! [`GameState`]: crate::core::GameState

use super::error::PersistenceError;
use crate::core::constants::{SAVE_VERSION_MAGIC, STORAGE_KEY};
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

/// Where the last persisted snapshot lives.
pub trait SnapshotStore: Send {
    /// The last saved snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    fn save(&self, json: &str) -> Result<(), PersistenceError>;
}

/// Checksummed file in the platform config directory.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Sets up `<config dir>/hugoland/hugoland_game_state.sav`.
    pub fn new() -> Result<Self, PersistenceError> {
        let dirs = ProjectDirs::from("", "", "hugoland").ok_or(PersistenceError::NoConfigDir)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at(config_dir.join(format!("{STORAGE_KEY}.sav"))))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        decode_envelope(&bytes).map(Some)
    }

    fn save(&self, json: &str) -> Result<(), PersistenceError> {
        // Write then rename so a crash never leaves a half-written save.
        let tmp = self.path.with_extension("sav.tmp");
        fs::write(&tmp, encode_envelope(json))?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn checksum(magic: &[u8], length: &[u8], payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(magic);
    hasher.update(length);
    hasher.update(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// File format:
/// - Version magic (8 bytes, LE)
/// - Payload length (4 bytes, LE)
/// - JSON payload
/// - SHA256 over the three fields above (32 bytes)
pub fn encode_envelope(json: &str) -> Vec<u8> {
    let payload = json.as_bytes();
    let magic = SAVE_VERSION_MAGIC.to_le_bytes();
    let length = (payload.len() as u32).to_le_bytes();

    let mut out = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + payload.len() + CHECKSUM_LEN);
    out.extend_from_slice(&magic);
    out.extend_from_slice(&length);
    out.extend_from_slice(payload);
    out.extend_from_slice(&checksum(&magic, &length, payload));
    out
}

pub fn decode_envelope(bytes: &[u8]) -> Result<String, PersistenceError> {
    if bytes.len() < MAGIC_LEN + LENGTH_LEN + CHECKSUM_LEN {
        return Err(PersistenceError::Truncated);
    }
    let (magic, rest) = bytes.split_at(MAGIC_LEN);
    let (length, rest) = rest.split_at(LENGTH_LEN);

    let mut magic_bytes = [0u8; MAGIC_LEN];
    magic_bytes.copy_from_slice(magic);
    let found = u64::from_le_bytes(magic_bytes);
    if found != SAVE_VERSION_MAGIC {
        return Err(PersistenceError::BadMagic {
            expected: SAVE_VERSION_MAGIC,
            found,
        });
    }

    let mut length_bytes = [0u8; LENGTH_LEN];
    length_bytes.copy_from_slice(length);
    let payload_len = u32::from_le_bytes(length_bytes) as usize;
    if rest.len() != payload_len + CHECKSUM_LEN {
        return Err(PersistenceError::Truncated);
    }
    let (payload, stored) = rest.split_at(payload_len);

    if checksum(magic, length, payload).as_slice() != stored {
        return Err(PersistenceError::ChecksumMismatch);
    }
    String::from_utf8(payload.to_vec()).map_err(|_| PersistenceError::NotUtf8)
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(json.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.contents())
    }

    fn save(&self, json: &str) -> Result<(), PersistenceError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(json.to_string());
        Ok(())
    }
}
