use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info, warn};
use serde_json::Value;

use crate::config::{resolve_data_dir, RECORDS_FILE_NAME};
use crate::error::LeaveError;
use crate::model::leave::{LeaveRecord, LeaveStatus};
use crate::repository::traits::LeaveRepository;

/// Leave records kept as one JSON array, rewritten on every change.
#[derive(Clone)]
pub struct FileLeaveRepository {
    file_path: PathBuf,
}

impl FileLeaveRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = resolve_data_dir(base_dir)?;
        fs::create_dir_all(&path)?;
        path.push(RECORDS_FILE_NAME);

        if !path.exists() {
            info!("Record file not found, creating {}", path.display());
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<LeaveRecord>::new())?;
            writer.flush()?;
        }

        Ok(FileLeaveRepository { file_path: path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_records(&self) -> Result<Vec<LeaveRecord>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let rows: Vec<Value> = serde_json::from_reader(reader).map_err(LeaveError::from)?;
        let raw_len = rows.len();

        let mut records = Vec::with_capacity(raw_len);
        for row in rows.into_iter().filter(is_complete_row) {
            records.push(serde_json::from_value::<LeaveRecord>(row).map_err(LeaveError::from)?);
        }
        if records.len() != raw_len {
            warn!(
                "Skipped {} rows without an employee name or leave date in {}",
                raw_len - records.len(),
                self.file_path.display()
            );
        }
        debug!("Read {} records from {}", records.len(), self.file_path.display());
        Ok(records)
    }

    fn write_records(&self, records: &[LeaveRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        debug!("Wrote {} records to {}", records.len(), self.file_path.display());
        Ok(())
    }
}

/// A row is kept only when it names an employee and a leave date.
fn is_complete_row(row: &Value) -> bool {
    let filled = |key: &str| {
        row.get(key)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.trim().is_empty())
    };
    filled("employeeName") && filled("leaveDate")
}

impl LeaveRepository for FileLeaveRepository {
    fn list(&self) -> Result<Vec<LeaveRecord>> {
        self.read_records()
    }

    fn get(&self, id: &str) -> Result<LeaveRecord> {
        self.read_records()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| LeaveError::NotFound(id.to_string()).into())
    }

    fn create(&self, record: LeaveRecord) -> Result<LeaveRecord> {
        let mut records = self.read_records()?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(LeaveError::Validation(format!("duplicate id '{}'", record.id)).into());
        }
        records.push(record.clone());
        self.write_records(&records)?;
        Ok(record)
    }

    fn set_status(&self, id: &str, status: LeaveStatus) -> Result<LeaveRecord> {
        let mut records = self.read_records()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LeaveError::NotFound(id.to_string()))?;
        record.status = status;
        let updated = record.clone();
        self.write_records(&records)?;
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.read_records()?;
        let initial_len = records.len();
        records.retain(|r| r.id != id);

        if records.len() == initial_len {
            return Err(LeaveError::NotFound(id.to_string()).into());
        }

        self.write_records(&records)?;
        Ok(())
    }
}
