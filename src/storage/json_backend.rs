use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{ledger::BudgetRecord, utils::ensure_dir};

use super::{RecordStore, Result};

const TMP_SUFFIX: &str = "tmp";

/// Flat JSON file holding one serialized [`BudgetRecord`].
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for JsonStore {
    fn load(&self) -> Result<BudgetRecord> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                ensure_dir(parent)?;
            }
            File::create(&self.path)?;
            debug!(path = %self.path.display(), "created empty budget file");
            return Ok(BudgetRecord::default());
        }

        let data = fs::read(&self.path)?;
        Ok(parse_record(&data, &self.path))
    }

    fn save(&self, record: &BudgetRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "budget record saved");
        Ok(())
    }
}

/// Corrupt, empty, or non-UTF-8 contents yield the default record; nothing is surfaced to the user.
fn parse_record(data: &[u8], path: &Path) -> BudgetRecord {
    let mut record = match serde_json::from_slice::<BudgetRecord>(data) {
        Ok(record) => record,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "unreadable budget file, using defaults");
            return BudgetRecord::default();
        }
    };
    for note in record.sanitize() {
        debug!(path = %path.display(), "{note}");
    }
    record
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
