pub mod leave;
pub mod stats;
