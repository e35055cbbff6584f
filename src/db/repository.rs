use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{LedgerError, Result};
use crate::models::transaction::LedgerRow;

use super::connection::LedgerStore;

impl LedgerStore {
    /// Writes one row at the end of the ledger.
    ///
    /// Field contents are not validated; the ledger must already exist. A
    /// zero-length ledger gets its header back before the row.
    pub fn append(&self, row: &LedgerRow) -> Result<()> {
        let path = self.config().path();
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| self.not_found(e))?;

        let empty = file.metadata()?.len() == 0;
        if !empty && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if empty {
            tracing::warn!(path = %path.display(), "ledger file is empty, writing header");
            writer.write_record(self.config().columns())?;
        }
        writer.write_record(row.fields())?;
        writer.flush()?;

        tracing::info!(
            date = %row.date,
            amount = %row.amount,
            category = %row.category,
            "new entry written"
        );
        Ok(())
    }

    /// Every row of the ledger in file order.
    pub fn read_all(&self) -> Result<Vec<LedgerRow>> {
        let file = File::open(self.config().path()).map_err(|e| self.not_found(e))?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers()?;
        let expected = self.config().columns();
        if headers.len() != expected.len()
            || headers.iter().zip(expected).any(|(h, e)| h.trim() != *e)
        {
            return Err(LedgerError::SchemaMismatch {
                expected: expected.join(","),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(LedgerRow::new(&record[0], &record[1], &record[2], &record[3]));
        }

        tracing::debug!(rows = rows.len(), path = %self.config().path().display(), "read ledger");
        Ok(rows)
    }
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
