pub mod analytics;
pub mod leave_service;
mod leave_service_test;
