//! Aggregation of leave records into monthly, overall and per-employee views.
//!
//! Every function here is a pure pass over the full record set. Callers
//! recompute after each change to the records; nothing is cached.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::model::leave::{LeaveRecord, LeaveStatus};
use crate::model::stats::{
    EmployeeSummary, MonthCount, MonthlyBucket, MonthlyHighlights, OverallSummary, StatusShare,
    Tally, TotalStats, TypeShare,
};
use crate::time::short_month_label;

/// A record as the engine sees it, with the leave type default applied.
#[derive(Debug, Clone, Copy)]
struct Normalized<'a> {
    employee_name: &'a str,
    leave_date: NaiveDate,
    status: &'a LeaveStatus,
    leave_type: &'a str,
}

impl Normalized<'_> {
    fn month_key(&self) -> (i32, u32) {
        (self.leave_date.year(), self.leave_date.month())
    }
}

fn normalize(records: &[LeaveRecord]) -> Vec<Normalized<'_>> {
    records
        .iter()
        .map(|r| Normalized {
            employee_name: &r.employee_name,
            leave_date: r.leave_date,
            status: &r.status,
            leave_type: r.effective_leave_type(),
        })
        .collect()
}

/// `100 * count / total`, 0 when there is nothing to divide by.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn compute_monthly(records: &[LeaveRecord]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<(i32, u32), MonthlyBucket> = BTreeMap::new();

    for record in normalize(records) {
        let (year, month) = record.month_key();
        buckets
            .entry((year, month))
            .or_insert_with(|| MonthlyBucket::new(year, month))
            .add(record.employee_name, record.leave_type);
    }

    // BTreeMap iterates in (year, month) order.
    buckets.into_values().collect()
}

pub fn compute_overall(records: &[LeaveRecord]) -> OverallSummary {
    let normalized = normalize(records);
    let total = normalized.len();

    let mut type_tally = Tally::new();
    let mut status_tally = Tally::new();
    let mut employees: HashSet<&str> = HashSet::new();
    let mut active = 0;
    let mut cancelled = 0;

    for record in &normalized {
        type_tally.increment(record.leave_type);
        status_tally.increment(record.status.as_str());
        employees.insert(record.employee_name);
        match record.status {
            LeaveStatus::Active => active += 1,
            LeaveStatus::Cancelled => cancelled += 1,
            LeaveStatus::Other(_) => {}
        }
    }

    let mut leave_types: Vec<TypeShare> = type_tally
        .iter()
        .map(|(leave_type, count)| TypeShare {
            leave_type: leave_type.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();
    // Stable: equal counts keep first-seen order.
    leave_types.sort_by(|a, b| b.count.cmp(&a.count));

    let status_distribution = status_tally
        .iter()
        .map(|(status, count)| StatusShare {
            status: status.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    let unique_employees = employees.len();
    let avg_leaves_per_employee = if unique_employees > 0 {
        round_one_decimal(total as f64 / unique_employees as f64)
    } else {
        0.0
    };

    let most_used_leave_type = leave_types
        .first()
        .map(|t| t.leave_type.clone())
        .unwrap_or_else(|| TotalStats::default().most_used_leave_type);

    OverallSummary {
        leave_types,
        status_distribution,
        total_stats: TotalStats {
            total_leaves: total,
            active_leaves: active,
            cancelled_leaves: cancelled,
            unique_employees,
            avg_leaves_per_employee,
            most_used_leave_type,
        },
    }
}

pub fn compute_employee_summaries(records: &[LeaveRecord]) -> Vec<EmployeeSummary> {
    let mut summaries: Vec<EmployeeSummary> = Vec::new();
    let mut months: Vec<BTreeMap<(i32, u32), usize>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in normalize(records) {
        let pos = *index.entry(record.employee_name).or_insert_with(|| {
            summaries.push(EmployeeSummary::new(record.employee_name));
            months.push(BTreeMap::new());
            summaries.len() - 1
        });

        let summary = &mut summaries[pos];
        summary.total_leaves += 1;
        // Anything not Active counts as cancelled here.
        if record.status.is_active() {
            summary.active_leaves += 1;
        } else {
            summary.cancelled_leaves += 1;
        }
        summary.leave_types.increment(record.leave_type);
        *months[pos].entry(record.month_key()).or_insert(0) += 1;
    }

    for (summary, per_month) in summaries.iter_mut().zip(months) {
        summary.monthly_trend = per_month
            .into_iter()
            .map(|((year, month), count)| MonthCount {
                month: short_month_label(year, month),
                count,
            })
            .collect();
    }

    summaries.sort_by(|a, b| b.total_leaves.cmp(&a.total_leaves));
    summaries
}

/// The employee's most frequent leave type, `"—"` when they have none.
pub fn most_used_leave_type(summary: &EmployeeSummary) -> &str {
    summary.leave_types.most_used()
}

/// Headline figures over an already computed monthly view.
///
/// The peak month is the first month holding the highest total.
pub fn compute_highlights(monthly: &[MonthlyBucket], total_records: usize) -> Option<MonthlyHighlights> {
    let latest = monthly.last()?;

    let mut peak = &monthly[0];
    for bucket in &monthly[1..] {
        if bucket.total_leaves > peak.total_leaves {
            peak = bucket;
        }
    }

    Some(MonthlyHighlights {
        months_tracked: monthly.len(),
        avg_leaves_per_month: round_one_decimal(total_records as f64 / monthly.len() as f64),
        peak_month: peak.label.clone(),
        latest_month_total: latest.total_leaves,
    })
}

/// Every aggregate for one snapshot of the records.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveAnalytics {
    pub monthly: Vec<MonthlyBucket>,
    pub highlights: Option<MonthlyHighlights>,
    pub overall: OverallSummary,
    pub employees: Vec<EmployeeSummary>,
}

impl LeaveAnalytics {
    pub fn compute(records: &[LeaveRecord]) -> Self {
        debug!("Recomputing analytics over {} records", records.len());
        let monthly = compute_monthly(records);
        let highlights = compute_highlights(&monthly, records.len());
        Self {
            monthly,
            highlights,
            overall: compute_overall(records),
            employees: compute_employee_summaries(records),
        }
    }

    pub fn employee(&self, name: &str) -> Option<&EmployeeSummary> {
        self.employees
            .iter()
            .find(|e| e.employee_name.eq_ignore_ascii_case(name.trim()))
    }

    /// The employee with the most records, ties to the first seen.
    pub fn top_employee(&self) -> Option<&EmployeeSummary> {
        self.employees.first()
    }
}
