use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LEAVE_TYPE;
use crate::time::leave_date_format;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum LeaveStatus {
    Active,
    Cancelled,
    /// Any other label found in the record file, kept verbatim.
    Other(String),
}

impl Default for LeaveStatus {
    fn default() -> Self {
        LeaveStatus::Active
    }
}

impl LeaveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LeaveStatus::Active => "Active",
            LeaveStatus::Cancelled => "Cancelled",
            LeaveStatus::Other(label) => label,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LeaveStatus::Active)
    }
}

impl From<String> for LeaveStatus {
    fn from(label: String) -> Self {
        match label.trim() {
            "" | "Active" => LeaveStatus::Active,
            "Cancelled" => LeaveStatus::Cancelled,
            other => LeaveStatus::Other(other.to_string()),
        }
    }
}

impl From<LeaveStatus> for String {
    fn from(status: LeaveStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    pub id: String,
    pub employee_name: String,
    #[serde(with = "leave_date_format")]
    pub leave_date: NaiveDate,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl LeaveRecord {
    pub fn new(id: String, employee_name: String, leave_date: NaiveDate) -> Self {
        Self {
            id,
            employee_name,
            leave_date,
            status: LeaveStatus::default(),
            leave_type: None,
            comment: None,
        }
    }

    /// The stored leave type, or "Annual Leave" when absent or blank.
    pub fn effective_leave_type(&self) -> &str {
        match self.leave_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_LEAVE_TYPE,
        }
    }
}
