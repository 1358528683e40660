#[cfg(test)]
mod tests {
    use crate::error::LeaveError;
    use crate::model::leave::{LeaveRecord, LeaveStatus};
    use crate::repository::LeaveRepository;
    use crate::service::leave_service::{generate_id, LeaveService, NewLeave};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockLeaveRepo {
        records: RefCell<Vec<LeaveRecord>>,
    }

    impl LeaveRepository for MockLeaveRepo {
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

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_leave(name: &str, date: NaiveDate, leave_type: &str) -> NewLeave {
        NewLeave {
            employee_name: name.to_string(),
            leave_date: Some(date),
            leave_type: leave_type.to_string(),
            ..NewLeave::default()
        }
    }

    #[test]
    fn test_create_trims_and_defaults() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let mut input = new_leave("  Jane Smith ", ymd(2024, 1, 5), "Sick Leave");
        input.comment = Some("   ".to_string());

        let created = service.create_leave(input).unwrap();
        assert_eq!(created.employee_name, "Jane Smith");
        assert_eq!(created.status, LeaveStatus::Active);
        assert_eq!(created.leave_type.as_deref(), Some("Sick Leave"));
        assert_eq!(created.comment, None);
        assert!(created.id.starts_with("Jane_Smith_2024_01_05_"));
    }

    #[test]
    fn test_create_keeps_supplied_id() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let mut input = new_leave("A", ymd(2024, 1, 5), "Annual Leave");
        input.id = Some("fixed-id".to_string());
        assert_eq!(service.create_leave(input).unwrap().id, "fixed-id");
    }

    #[test]
    fn test_create_requires_fields() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let missing_type = new_leave("A", ymd(2024, 1, 5), " ");
        let missing_name = new_leave("", ymd(2024, 1, 5), "Annual Leave");
        let mut missing_date = new_leave("A", ymd(2024, 1, 5), "Annual Leave");
        missing_date.leave_date = None;

        for input in [missing_type, missing_name, missing_date] {
            let err = service.create_leave(input).unwrap_err();
            assert!(matches!(err.downcast_ref::<LeaveError>(), Some(LeaveError::Validation(_))));
        }
        assert!(service.list_leaves().unwrap().is_empty());
    }

    #[test]
    fn test_range_spans_months() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let created = service
            .add_leave_range("A", ymd(2024, 1, 30), ymd(2024, 2, 2), "Study Leave", Some("exam"))
            .unwrap();
        assert_eq!(created.len(), 4);
        assert!(created.iter().all(|r| r.comment.as_deref() == Some("exam")));

        let analytics = service.analytics().unwrap();
        let totals: Vec<usize> = analytics.monthly.iter().map(|b| b.total_leaves).collect();
        assert_eq!(totals, vec![2, 2]);
    }

    #[test]
    fn test_range_rejects_reversed_dates() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let err = service
            .add_leave_range("A", ymd(2024, 2, 2), ymd(2024, 1, 30), "Study Leave", None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeaveError>(),
            Some(LeaveError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_cancel_and_remove_feed_analytics() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let first = service.create_leave(new_leave("A", ymd(2024, 1, 5), "Sick Leave")).unwrap();
        let second = service.create_leave(new_leave("A", ymd(2024, 1, 6), "Sick Leave")).unwrap();
        service.create_leave(new_leave("B", ymd(2024, 1, 7), "Annual Leave")).unwrap();

        service.cancel_leave(&first.id).unwrap();
        assert_eq!(service.get_leave(&first.id).unwrap().status, LeaveStatus::Cancelled);

        let analytics = service.analytics().unwrap();
        assert_eq!(analytics.overall.total_stats.cancelled_leaves, 1);
        let a = analytics.employee("A").unwrap();
        assert_eq!((a.active_leaves, a.cancelled_leaves), (1, 1));

        service.remove_leave(&second.id).unwrap();
        let analytics = service.analytics().unwrap();
        assert_eq!(analytics.overall.total_stats.total_leaves, 2);
        assert_eq!(analytics.employee("A").unwrap().total_leaves, 1);
    }

    #[test]
    fn test_remove_month_clears_only_that_month() {
        let service = LeaveService::new(MockLeaveRepo::default());
        service
            .add_leave_range("A", ymd(2024, 1, 30), ymd(2024, 2, 2), "Sick Leave", None)
            .unwrap();
        service.create_leave(new_leave("B", ymd(2024, 1, 1), "Annual Leave")).unwrap();
        service.create_leave(new_leave("B", ymd(2023, 1, 15), "Annual Leave")).unwrap();

        assert_eq!(service.remove_month(2024, 1).unwrap(), 3);

        let left: Vec<NaiveDate> = service.list_leaves().unwrap().iter().map(|r| r.leave_date).collect();
        assert_eq!(left, vec![ymd(2024, 2, 1), ymd(2024, 2, 2), ymd(2023, 1, 15)]);
        assert_eq!(service.remove_month(2024, 1).unwrap(), 0);
    }

    #[test]
    fn test_remove_month_rejects_bad_month() {
        let service = LeaveService::new(MockLeaveRepo::default());
        let err = service.remove_month(2024, 13).unwrap_err();
        assert!(matches!(err.downcast_ref::<LeaveError>(), Some(LeaveError::Validation(_))));
    }

    #[test]
    fn test_generate_id_is_url_safe() {
        let id = generate_id("Mary-Jane O'Neil", ymd(2024, 12, 1));
        assert!(id.starts_with("Mary_Jane_O_Neil_2024_12_01_"));
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert_ne!(id, generate_id("Mary-Jane O'Neil", ymd(2024, 12, 1)));
    }
}
