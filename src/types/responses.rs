use serde::{Deserialize, Serialize};

/// Acknowledgement for a partial update: the target id and the accepted changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Updated<T> {
    pub id: i64,
    pub changes: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
