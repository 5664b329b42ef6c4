pub mod goals;
pub mod health;
pub mod transactions;

// Re-exports for convenience
pub use goals::{create_goal, update_goal};
pub use health::{handler_404, health};
pub use transactions::{create_transaction, update_transaction};
