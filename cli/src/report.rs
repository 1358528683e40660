use leavetrack_core::{most_used_leave_type, EmployeeSummary, LeaveAnalytics};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::Table;

/// Which part of the analytics `stats` prints.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum StatsView {
    All,
    Monthly,
    Overall,
    Employees,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

fn heading(title: &str) {
    println!("\n\x1b[1;36m{}\x1b[0m", title);
}

pub fn show_analytics(analytics: &LeaveAnalytics, view: StatsView) {
    if analytics.overall.total_stats.total_leaves == 0 {
        println!("No leave records found.");
        return;
    }

    if matches!(view, StatsView::All | StatsView::Monthly) {
        show_monthly(analytics);
    }
    if matches!(view, StatsView::All | StatsView::Overall) {
        show_overall(analytics);
    }
    if matches!(view, StatsView::All | StatsView::Employees) {
        show_employees(&analytics.employees);
    }
}

fn show_monthly(analytics: &LeaveAnalytics) {
    heading("Monthly");

    let mut builder = Builder::default();
    builder.push_record(["Month", "Leaves", "Employees", "Top type"]);
    for bucket in &analytics.monthly {
        builder.push_record([
            bucket.label.clone(),
            bucket.total_leaves.to_string(),
            bucket.employees.len().to_string(),
            bucket.leave_types.most_used().to_string(),
        ]);
    }
    println!("{}", styled(builder.build()));

    if let Some(h) = &analytics.highlights {
        println!(
            "Months tracked: {}   Avg/month: {:.1}   Peak: {}   Latest month: {}",
            h.months_tracked, h.avg_leaves_per_month, h.peak_month, h.latest_month_total
        );
    }
}

fn show_overall(analytics: &LeaveAnalytics) {
    let overall = &analytics.overall;

    heading("Leave types");
    let mut builder = Builder::default();
    builder.push_record(["Type", "Count", "Share"]);
    for share in &overall.leave_types {
        builder.push_record([
            share.leave_type.clone(),
            share.count.to_string(),
            format!("{:.1}%", share.percentage),
        ]);
    }
    println!("{}", styled(builder.build()));

    heading("Status");
    let mut builder = Builder::default();
    builder.push_record(["Status", "Count", "Share"]);
    for share in &overall.status_distribution {
        builder.push_record([
            share.status.clone(),
            share.count.to_string(),
            format!("{:.1}%", share.percentage),
        ]);
    }
    println!("{}", styled(builder.build()));

    let totals = &overall.total_stats;
    println!(
        "Total: {}   Active: {}   Cancelled: {}   Employees: {}   Avg/employee: {:.1}   Most used: {}",
        totals.total_leaves,
        totals.active_leaves,
        totals.cancelled_leaves,
        totals.unique_employees,
        totals.avg_leaves_per_employee,
        totals.most_used_leave_type
    );
    if let Some(top) = analytics.top_employee() {
        println!("Top employee: {} ({} leaves)", top.employee_name, top.total_leaves);
    }
}

fn show_employees(employees: &[EmployeeSummary]) {
    heading("Employees");

    let mut builder = Builder::default();
    builder.push_record(["Employee", "Total", "Active", "Cancelled", "Most used"]);
    for summary in employees {
        builder.push_record([
            summary.employee_name.clone(),
            summary.total_leaves.to_string(),
            summary.active_leaves.to_string(),
            summary.cancelled_leaves.to_string(),
            most_used_leave_type(summary).to_string(),
        ]);
    }
    println!("{}", styled(builder.build()));
}

pub fn show_employee_detail(summary: &EmployeeSummary) {
    heading(&summary.employee_name);
    println!(
        "Total: {}   Active: {}   Cancelled: {}   Most used: {}",
        summary.total_leaves,
        summary.active_leaves,
        summary.cancelled_leaves,
        most_used_leave_type(summary)
    );

    let mut builder = Builder::default();
    builder.push_record(["Type", "Count"]);
    for (leave_type, count) in summary.leave_types.iter() {
        builder.push_record([leave_type.to_string(), count.to_string()]);
    }
    println!("{}", styled(builder.build()));

    let mut builder = Builder::default();
    builder.push_record(["Month", "Leaves"]);
    for month in &summary.monthly_trend {
        builder.push_record([month.month.clone(), month.count.to_string()]);
    }
    println!("{}", styled(builder.build()));
}
