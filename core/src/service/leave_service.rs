use crate::error::LeaveError;
use crate::model::leave::{LeaveRecord, LeaveStatus};
use crate::repository::LeaveRepository;
use crate::service::analytics::LeaveAnalytics;
use crate::time::{date_range, month_bounds};
use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

/// Input for a single leave day.
#[derive(Debug, Clone, Default)]
pub struct NewLeave {
    /// Generated when absent.
    pub id: Option<String>,
    pub employee_name: String,
    pub leave_date: Option<NaiveDate>,
    pub leave_type: String,
    pub comment: Option<String>,
}

pub struct LeaveService<R: LeaveRepository> {
    repo: R,
}

impl<R: LeaveRepository> LeaveService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_leave(&self, input: NewLeave) -> Result<LeaveRecord> {
        let employee_name = input.employee_name.trim();
        let leave_type = input.leave_type.trim();
        let leave_date = match input.leave_date {
            Some(d) if !employee_name.is_empty() && !leave_type.is_empty() => d,
            _ => {
                return Err(LeaveError::Validation(
                    "employee name, leave date and leave type are required".to_string(),
                )
                .into())
            }
        };

        let id = input
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(employee_name, leave_date));

        let mut record = LeaveRecord::new(id, employee_name.to_string(), leave_date);
        record.leave_type = Some(leave_type.to_string());
        record.comment = input.comment.filter(|c| !c.trim().is_empty());

        let created = self.repo.create(record)?;
        info!(
            "Added {} for {} on {} ({})",
            created.effective_leave_type(),
            created.employee_name,
            created.leave_date,
            created.id
        );
        Ok(created)
    }

    /// One record per calendar day from `from` to `to`, inclusive.
    pub fn add_leave_range(
        &self,
        employee_name: &str,
        from: NaiveDate,
        to: NaiveDate,
        leave_type: &str,
        comment: Option<&str>,
    ) -> Result<Vec<LeaveRecord>> {
        let days = date_range(from, to)?;
        let mut created = Vec::with_capacity(days.len());
        for day in days {
            created.push(self.create_leave(NewLeave {
                id: None,
                employee_name: employee_name.to_string(),
                leave_date: Some(day),
                leave_type: leave_type.to_string(),
                comment: comment.map(str::to_string),
            })?);
        }
        Ok(created)
    }

    pub fn cancel_leave(&self, id: &str) -> Result<LeaveRecord> {
        let record = self.repo.set_status(id, LeaveStatus::Cancelled)?;
        info!("Cancelled leave {}", id);
        Ok(record)
    }

    pub fn remove_leave(&self, id: &str) -> Result<()> {
        self.repo.delete(id)?;
        info!("Removed leave {}", id);
        Ok(())
    }

    /// Delete every record dated in the given month. Returns how many went.
    pub fn remove_month(&self, year: i32, month: u32) -> Result<usize> {
        let (first, last) = NaiveDate::from_ymd_opt(year, month, 1)
            .map(month_bounds)
            .ok_or_else(|| LeaveError::Validation(format!("no such month {}-{:02}", year, month)))?;

        let ids: Vec<String> = self
            .repo
            .list()?
            .into_iter()
            .filter(|r| r.leave_date >= first && r.leave_date <= last)
            .map(|r| r.id)
            .collect();
        for id in &ids {
            self.repo.delete(id)?;
        }
        info!("Removed {} leave records from {}-{:02}", ids.len(), year, month);
        Ok(ids.len())
    }

    pub fn get_leave(&self, id: &str) -> Result<LeaveRecord> {
        self.repo.get(id)
    }

    pub fn list_leaves(&self) -> Result<Vec<LeaveRecord>> {
        self.repo.list()
    }

    /// Fetch the current records and recompute every aggregate.
    pub fn analytics(&self) -> Result<LeaveAnalytics> {
        let records = self.repo.list()?;
        Ok(LeaveAnalytics::compute(&records))
    }
}

/// URL-safe id: `Jane_Smith_2024_01_05_1a2b3c4d`.
pub fn generate_id(employee_name: &str, leave_date: NaiveDate) -> String {
    let clean_name: String = employee_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", clean_name, leave_date.format("%Y_%m_%d"), &suffix[..8])
}
