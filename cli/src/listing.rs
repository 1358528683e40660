use leavetrack_core::{group_by_month, LeaveRecord, LeaveStatus, RecordFilter};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use crate::text::truncate;

// Helper struct for Table Row
#[derive(Tabled)]
struct LeaveRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Type")]
    leave_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl LeaveRow {
    fn from_record(record: &LeaveRecord) -> Self {
        Self {
            date: record.leave_date.format("%Y-%m-%d (%a)").to_string(),
            employee: truncate(&record.employee_name, 24),
            leave_type: record.effective_leave_type().to_string(),
            status: record.status.to_string(),
            comment: truncate(record.comment.as_deref().unwrap_or("-"), 30),
            id: record.id.clone(),
        }
    }
}

pub fn show_listing(records: &[LeaveRecord], filter: &RecordFilter) {
    let matching = filter.apply(records);

    if matching.is_empty() {
        if filter.is_active() {
            println!("No leave records match the filter ({} in total).", records.len());
        } else {
            println!("No leave records found.");
        }
        return;
    }

    if filter.is_active() {
        println!("Showing {} of {} records", matching.len(), records.len());
    }

    for group in group_by_month(matching) {
        let active = group
            .records
            .iter()
            .filter(|r| r.status == LeaveStatus::Active)
            .count();

        // Month Header
        println!(
            "\n\x1b[1;36m{}\x1b[0m ({} day(s), {} active)",
            group.display_name, group.total_days, active
        );

        let rows: Vec<LeaveRow> = group.records.iter().map(LeaveRow::from_record).collect();
        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

        println!("{}", table);
    }
}
