pub mod goal;
pub mod transaction;

// Re-exports for convenience
pub use goal::{CreateGoal, GoalPriority, GoalStatus, UpdateGoal};
pub use transaction::{CreateTransaction, UpdateTransaction};
