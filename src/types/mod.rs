pub mod responses;

pub use responses::{HealthStatus, Updated};
