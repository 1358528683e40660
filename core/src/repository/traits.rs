use crate::model::leave::{LeaveRecord, LeaveStatus};
use anyhow::Result;

pub trait LeaveRepository {
    /// Every stored record, in stored order.
    fn list(&self) -> Result<Vec<LeaveRecord>>;
    fn get(&self, id: &str) -> Result<LeaveRecord>;
    fn create(&self, record: LeaveRecord) -> Result<LeaveRecord>;
    fn set_status(&self, id: &str, status: LeaveStatus) -> Result<LeaveRecord>;
    fn delete(&self, id: &str) -> Result<()>;
}
