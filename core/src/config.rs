//! Defaults for where and how records are stored.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Directory under the home directory used when no data dir is given.
pub const DEFAULT_DIR_NAME: &str = ".leavetrack";

/// JSON file holding every leave record.
pub const RECORDS_FILE_NAME: &str = "leave_records.json";

/// Environment variable the CLI reads as an alternative to `--data-dir`.
pub const DATA_DIR_ENV: &str = "LEAVETRACK_DATA_DIR";

/// Leave type assumed for records stored without one.
pub const DEFAULT_LEAVE_TYPE: &str = "Annual Leave";

/// Shown in place of a "most used" value when there is nothing to count.
pub const NO_DATA_MARKER: &str = "—";

pub const KNOWN_LEAVE_TYPES: &[&str] = &[
    "Annual Leave",
    "Sick Leave",
    "Personal Leave",
    "Maternity Leave",
    "Paternity Leave",
    "Emergency Leave",
    "Bereavement Leave",
    "Study Leave",
    "Unpaid Leave",
    "Compensatory Leave",
];

/// Resolve the data directory: an explicit path wins, otherwise `~/.leavetrack`.
pub fn resolve_data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DEFAULT_DIR_NAME))
        }
    }
}
