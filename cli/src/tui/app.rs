use anyhow::Result;
use chrono::Datelike;
use leavetrack_core::time::month_label;
use leavetrack_core::{LeaveAnalytics, LeaveRecord, LeaveRepository, LeaveService};
use ratatui::widgets::TableState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Records,
    Monthly,
    Overall,
    Employees,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Records, Tab::Monthly, Tab::Overall, Tab::Employees];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Records => "Records",
            Tab::Monthly => "Monthly",
            Tab::Overall => "Overall",
            Tab::Employees => "Employees",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

pub struct App<R: LeaveRepository> {
    service: LeaveService<R>,
    /// Newest leave date first.
    pub records: Vec<LeaveRecord>,
    pub analytics: LeaveAnalytics,
    pub tab: Tab,
    pub state: TableState,
    /// Last action result or error, shown in the footer.
    pub message: Option<String>,
}

impl<R: LeaveRepository> App<R> {
    pub fn new(service: LeaveService<R>) -> Result<Self> {
        let mut app = App {
            service,
            records: Vec::new(),
            analytics: LeaveAnalytics::compute(&[]),
            tab: Tab::Records,
            state: TableState::default(),
            message: None,
        };
        app.reload()?;
        if !app.records.is_empty() {
            app.state.select(Some(0));
        }
        Ok(app)
    }

    /// Re-read the store and recompute every aggregate from it.
    pub fn reload(&mut self) -> Result<()> {
        let mut records = self.service.list_leaves()?;
        records.sort_by(|a, b| b.leave_date.cmp(&a.leave_date));
        self.analytics = LeaveAnalytics::compute(&records);
        self.records = records;
        Ok(())
    }

    pub fn selected(&self) -> Option<&LeaveRecord> {
        self.state.selected().and_then(|i| self.records.get(i))
    }

    pub fn next_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
    }

    pub fn previous_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()];
    }

    pub fn next(&mut self) {
        if self.records.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) if i + 1 < self.records.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.records.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(0) | None => self.records.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn cancel_selected(&mut self) {
        let Some(id) = self.selected().map(|r| r.id.clone()) else {
            return;
        };
        self.message = Some(match self.service.cancel_leave(&id) {
            Ok(record) => format!("Cancelled {} on {}", record.employee_name, record.leave_date),
            Err(e) => format!("Error: {}", e),
        });
        self.refresh();
    }

    pub fn delete_selected(&mut self) {
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(id) = self.records.get(i).map(|r| r.id.clone()) else {
            return;
        };
        self.message = Some(match self.service.remove_leave(&id) {
            Ok(()) => format!("Removed {}", id),
            Err(e) => format!("Error: {}", e),
        });
        self.refresh();

        // Keep the cursor near where it was
        if self.records.is_empty() {
            self.state.select(None);
        } else if i >= self.records.len() {
            self.state.select(Some(self.records.len() - 1));
        } else {
            self.state.select(Some(i));
        }
    }

    /// Remove every record in the selected record's month.
    pub fn delete_selected_month(&mut self) {
        let Some(date) = self.selected().map(|r| r.leave_date) else {
            return;
        };
        let (year, month) = (date.year(), date.month());
        self.message = Some(match self.service.remove_month(year, month) {
            Ok(n) => format!("Removed {} record(s) from {}", n, month_label(year, month)),
            Err(e) => format!("Error: {}", e),
        });
        self.refresh();
        self.state.select(if self.records.is_empty() { None } else { Some(0) });
    }

    fn refresh(&mut self) {
        if let Err(e) = self.reload() {
            self.message = Some(format!("Error: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leavetrack_core::{LeaveError, LeaveStatus};
    use std::cell::RefCell;

    struct MemoryRepo {
        records: RefCell<Vec<LeaveRecord>>,
    }

    impl LeaveRepository for MemoryRepo {
        fn list(&self) -> Result<Vec<LeaveRecord>> {
            Ok(self.records.borrow().clone())
        }

        fn get(&self, id: &str) -> Result<LeaveRecord> {
            self.records
                .borrow()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| LeaveError::NotFound(id.to_string()).into())
        }

        fn create(&self, record: LeaveRecord) -> Result<LeaveRecord> {
            self.records.borrow_mut().push(record.clone());
            Ok(record)
        }

        fn set_status(&self, id: &str, status: LeaveStatus) -> Result<LeaveRecord> {
            let mut records = self.records.borrow_mut();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| LeaveError::NotFound(id.to_string()))?;
            record.status = status;
            Ok(record.clone())
        }

        fn delete(&self, id: &str) -> Result<()> {
            self.records.borrow_mut().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn app() -> App<MemoryRepo> {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let records = vec![
            LeaveRecord::new("a".into(), "Jane Smith".into(), day(4)),
            LeaveRecord::new("b".into(), "John Doe".into(), day(12)),
            LeaveRecord::new("c".into(), "Jane Smith".into(), day(8)),
        ];
        let repo = MemoryRepo { records: RefCell::new(records) };
        App::new(LeaveService::new(repo)).unwrap()
    }

    #[test]
    fn test_records_newest_first() {
        let app = app();
        let ids: Vec<&str> = app.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(app.selected().unwrap().id, "b");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous();
        assert_eq!(app.selected().unwrap().id, "a");
        app.next();
        assert_eq!(app.selected().unwrap().id, "b");

        app.previous_tab();
        assert_eq!(app.tab, Tab::Employees);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::Monthly);
    }

    #[test]
    fn test_cancel_recomputes_analytics() {
        let mut app = app();
        app.cancel_selected();
        let totals = &app.analytics.overall.total_stats;
        assert_eq!(totals.active_leaves, 2);
        assert_eq!(totals.cancelled_leaves, 1);
        assert_eq!(app.analytics.employee("John Doe").unwrap().cancelled_leaves, 1);
    }

    #[test]
    fn test_delete_keeps_selection_in_bounds() {
        let mut app = app();
        app.previous();
        app.delete_selected();
        assert_eq!(app.records.len(), 2);
        assert_eq!(app.selected().unwrap().id, "c");
        assert_eq!(app.analytics.overall.total_stats.total_leaves, 2);
    }

    #[test]
    fn test_delete_month_of_selection() {
        let mut app = app();
        app.delete_selected_month();
        assert!(app.records.is_empty());
        assert_eq!(app.state.selected(), None);
        assert_eq!(app.message.as_deref(), Some("Removed 3 record(s) from March 2024"));
        assert_eq!(app.analytics.overall.total_stats.total_leaves, 0);
    }
}
