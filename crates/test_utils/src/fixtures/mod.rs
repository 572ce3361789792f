//! Test fixtures for reproducible tests

use custody_api::transaction::context::TxContext;
use custody_types::app::{AccountId, ProofHash};
use custody_types::config::LedgerConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A deterministic principal whose every byte is `tag`. `tag` must be non-zero.
pub fn account(tag: u8) -> AccountId {
    AccountId([tag; 32])
}

/// A deterministic 32-byte proof whose every byte is `tag`.
pub fn proof(tag: u8) -> ProofHash {
    [tag; 32]
}

/// The oracle principal used across tests.
pub fn oracle_principal() -> AccountId {
    account(0xA0)
}

/// A call context for `signer` at `height`.
pub fn ctx(signer: AccountId, height: u64) -> TxContext {
    TxContext::new(signer, height)
}

/// Test fixture manager backed by a temporary directory that is removed on drop.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    /// Create a fresh, empty fixture directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Get a fixture file path
    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Write data to a fixture file and return its path
    pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(
        &self,
        relative_path: P,
        contents: C,
    ) -> io::Result<PathBuf> {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Serialize a ledger configuration as TOML into `relative_path`.
    pub fn write_config<P: AsRef<Path>>(
        &self,
        relative_path: P,
        config: &LedgerConfig,
    ) -> io::Result<PathBuf> {
        let text = toml::to_string(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write(relative_path, text)
    }

    /// Serialize any JSON value into `relative_path`.
    pub fn write_json<P: AsRef<Path>>(
        &self,
        relative_path: P,
        value: &serde_json::Value,
    ) -> io::Result<PathBuf> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write(relative_path, text)
    }
}
