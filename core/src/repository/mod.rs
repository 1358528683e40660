pub mod file;
pub mod traits;

// Re-export
pub use file::FileLeaveRepository;
pub use traits::LeaveRepository;
