pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use model::leave::{LeaveRecord, LeaveStatus};
pub use model::stats::{EmployeeSummary, MonthlyBucket, MonthlyHighlights, OverallSummary, Tally};
pub use error::LeaveError;
pub use repository::{LeaveRepository, FileLeaveRepository};
pub use input::{parse_args, expand_key, resolve_leave_type, ParsedInput};
pub use time::{date_range, parse_leave_date, parse_month};
pub use service::analytics::{
    compute_employee_summaries, compute_monthly, compute_overall, most_used_leave_type,
    LeaveAnalytics,
};
pub use service::leave_service::{LeaveService, NewLeave};
pub use usecase::listing::{group_by_month, MonthGroup, RecordFilter};
