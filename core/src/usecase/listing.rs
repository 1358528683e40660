use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::model::leave::LeaveRecord;
use crate::time::{month_bounds, month_label};

/// Which records a listing shows. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub employee: Option<String>,
}

impl RecordFilter {
    /// The last `days` days up to and including `today`. Spans reaching past
    /// the earliest representable date start there instead.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let from = TimeDelta::try_days(days.max(0))
            .and_then(|span| today.checked_sub_signed(span))
            .unwrap_or(NaiveDate::MIN);
        Self {
            from: Some(from),
            to: Some(today),
            employee: None,
        }
    }

    pub fn current_month(today: NaiveDate) -> Self {
        let (first, last) = month_bounds(today);
        Self {
            from: Some(first),
            to: Some(last),
            employee: None,
        }
    }

    pub fn with_employee(mut self, employee: Option<String>) -> Self {
        self.employee = employee.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.employee.is_some()
    }

    pub fn is_valid_range(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= to,
            _ => true,
        }
    }

    pub fn matches(&self, record: &LeaveRecord) -> bool {
        let after_from = self.from.map_or(true, |from| record.leave_date >= from);
        let before_to = self.to.map_or(true, |to| record.leave_date <= to);
        let employee = self.employee.as_deref().map_or(true, |name| {
            record.employee_name.trim().eq_ignore_ascii_case(name.trim())
        });
        after_from && before_to && employee
    }

    pub fn apply<'a>(&self, records: &'a [LeaveRecord]) -> Vec<&'a LeaveRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    /// "2024-01"
    pub month_year: String,
    /// "January 2024"
    pub display_name: String,
    pub records: Vec<LeaveRecord>,
    pub total_days: usize,
}

/// Newest month first, and newest day first within a month.
pub fn group_by_month<'a, I>(records: I) -> Vec<MonthGroup>
where
    I: IntoIterator<Item = &'a LeaveRecord>,
{
    let mut groups: BTreeMap<(i32, u32), Vec<LeaveRecord>> = BTreeMap::new();
    for record in records {
        let key = (record.leave_date.year(), record.leave_date.month());
        groups.entry(key).or_default().push(record.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|((year, month), mut records)| {
            records.sort_by(|a, b| b.leave_date.cmp(&a.leave_date));
            MonthGroup {
                month_year: format!("{:04}-{:02}", year, month),
                display_name: month_label(year, month),
                total_days: records.len(),
                records,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, name: &str, date: NaiveDate) -> LeaveRecord {
        LeaveRecord::new(id.to_string(), name.to_string(), date)
    }

    fn sample() -> Vec<LeaveRecord> {
        vec![
            record("1", "Jane Smith", ymd(2025, 1, 3)),
            record("2", "John Doe", ymd(2024, 12, 24)),
            record("3", "Jane Smith", ymd(2024, 12, 27)),
            record("4", "John Doe", ymd(2024, 11, 2)),
        ]
    }

    #[test]
    fn test_groups_newest_first() {
        let groups = group_by_month(&sample());
        let names: Vec<&str> = groups.iter().map(|g| g.display_name.as_str()).collect();
        assert_eq!(names, vec!["January 2025", "December 2024", "November 2024"]);

        let december = &groups[1];
        assert_eq!(december.month_year, "2024-12");
        assert_eq!(december.total_days, 2);
        assert_eq!(december.records[0].id, "3");
        assert_eq!(december.records[1].id, "2");
    }

    #[test]
    fn test_inclusive_date_bounds() {
        let records = sample();
        let filter = RecordFilter {
            from: Some(ymd(2024, 12, 24)),
            to: Some(ymd(2025, 1, 3)),
            employee: None,
        };
        let ids: Vec<&str> = filter.apply(&records).into_iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_employee_filter() {
        let records = sample();
        let filter = RecordFilter::default().with_employee(Some("jane smith".to_string()));
        assert!(filter.is_active());
        assert_eq!(filter.apply(&records).len(), 2);

        let blank = RecordFilter::default().with_employee(Some("  ".to_string()));
        assert!(!blank.is_active());
        assert_eq!(blank.apply(&records).len(), 4);
    }

    #[test]
    fn test_quick_filters() {
        let today = ymd(2024, 12, 27);
        let last_week = RecordFilter::last_days(today, 7);
        assert_eq!(last_week.from, Some(ymd(2024, 12, 20)));
        assert_eq!(last_week.to, Some(today));

        let month = RecordFilter::current_month(today);
        assert_eq!(month.from, Some(ymd(2024, 12, 1)));
        assert_eq!(month.to, Some(ymd(2024, 12, 31)));
        assert_eq!(month.apply(&sample()).len(), 2);
    }

    #[test]
    fn test_huge_last_days_covers_everything() {
        let today = ymd(2025, 1, 3);
        let all = RecordFilter::last_days(today, 100_000_000);
        assert_eq!(all.from, Some(NaiveDate::MIN));
        assert_eq!(all.apply(&sample()).len(), 4);

        let none_back = RecordFilter::last_days(today, -5);
        assert_eq!(none_back.from, Some(today));
    }

    #[test]
    fn test_range_validity() {
        let reversed = RecordFilter {
            from: Some(ymd(2024, 2, 1)),
            to: Some(ymd(2024, 1, 1)),
            employee: None,
        };
        assert!(!reversed.is_valid_range());
        assert!(RecordFilter::default().is_valid_range());
    }
}
