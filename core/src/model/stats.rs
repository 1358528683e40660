use std::collections::{BTreeSet, HashMap};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::NO_DATA_MARKER;

/// Counts per key, remembering the order keys were first seen.
///
/// That order is the tie-break wherever a "most used" key is picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map(|&pos| self.entries[pos].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Highest count, earliest key on ties, `"—"` when empty.
    pub fn most_used(&self) -> &str {
        let mut best: Option<(&str, usize)> = None;
        for (key, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((key, count)),
            }
        }
        best.map(|(key, _)| key).unwrap_or(NO_DATA_MARKER)
    }
}

impl Serialize for Tally {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// "January 2024"
    pub label: String,
    pub total_leaves: usize,
    pub leave_types: Tally,
    pub employees: BTreeSet<String>,
}

impl MonthlyBucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            label: crate::time::month_label(year, month),
            total_leaves: 0,
            leave_types: Tally::new(),
            employees: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, employee_name: &str, leave_type: &str) {
        self.total_leaves += 1;
        self.leave_types.increment(leave_type);
        if !self.employees.contains(employee_name) {
            self.employees.insert(employee_name.to_string());
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub leave_type: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    pub total_leaves: usize,
    pub active_leaves: usize,
    pub cancelled_leaves: usize,
    pub unique_employees: usize,
    pub avg_leaves_per_employee: f64,
    pub most_used_leave_type: String,
}

impl Default for TotalStats {
    fn default() -> Self {
        Self {
            total_leaves: 0,
            active_leaves: 0,
            cancelled_leaves: 0,
            unique_employees: 0,
            avg_leaves_per_employee: 0.0,
            most_used_leave_type: NO_DATA_MARKER.to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    /// Sorted by count, descending.
    pub leave_types: Vec<TypeShare>,
    /// First-seen order.
    pub status_distribution: Vec<StatusShare>,
    pub total_stats: TotalStats,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthCount {
    /// "Jan 2024"
    pub month: String,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee_name: String,
    pub total_leaves: usize,
    pub active_leaves: usize,
    pub cancelled_leaves: usize,
    pub leave_types: Tally,
    pub monthly_trend: Vec<MonthCount>,
}

impl EmployeeSummary {
    pub fn new(employee_name: &str) -> Self {
        Self {
            employee_name: employee_name.to_string(),
            total_leaves: 0,
            active_leaves: 0,
            cancelled_leaves: 0,
            leave_types: Tally::new(),
            monthly_trend: Vec::new(),
        }
    }
}

/// Headline figures for the monthly view.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHighlights {
    pub months_tracked: usize,
    pub avg_leaves_per_month: f64,
    pub peak_month: String,
    pub latest_month_total: usize,
}
