use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// Handle on the ledger file.
///
/// Opening a handle touches nothing on disk; call
/// [`ensure_initialized`](LedgerStore::ensure_initialized) before the first append.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    config: LedgerConfig,
}

impl LedgerStore {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Creates a header-only ledger file when none exists.
    ///
    /// An empty existing file only gets the header written into it; a file
    /// with any content is left untouched. Returns `true` if the header was
    /// written.
    pub fn ensure_initialized(&self) -> Result<bool> {
        let path = self.config.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                if fs::metadata(path)?.len() > 0 {
                    tracing::debug!(path = %path.display(), "ledger already initialized");
                    return Ok(false);
                }
                tracing::warn!(path = %path.display(), "ledger file is empty, writing header");
                OpenOptions::new().write(true).open(path)?
            }
            Err(err) => return Err(err.into()),
        };

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(self.config.columns())?;
        writer.flush()?;
        tracing::info!(path = %path.display(), "created empty ledger");
        Ok(true)
    }

    pub(crate) fn not_found(&self, err: io::Error) -> LedgerError {
        if err.kind() == ErrorKind::NotFound {
            LedgerError::NotFound(self.config.path().to_path_buf())
        } else {
            LedgerError::Io(err)
        }
    }
}

#[cfg(test)]
pub fn establish_test_store() -> (tempfile::TempDir, LedgerStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = LedgerStore::new(LedgerConfig::new(dir.path().join("finance_data.csv")));
    (dir, store)
}
