use std::fmt::Formatter;

use once_cell::sync::Lazy;

use super::{FieldSpec, Schema};

pub const GOAL_PRIORITIES: &[&str] = &["high", "medium", "low"];
pub const GOAL_STATUSES: &[&str] = &["on-track", "behind", "ahead", "completed"];

// Built once on first use and shared by every request.
pub static GOAL_CREATE: Lazy<Schema> = Lazy::new(goal_create);
pub static GOAL_UPDATE: Lazy<Schema> = Lazy::new(goal_update);
pub static TRANSACTION_CREATE: Lazy<Schema> = Lazy::new(transaction_create);
pub static TRANSACTION_UPDATE: Lazy<Schema> = Lazy::new(transaction_update);

/// Names the registered contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    GoalCreate,
    GoalUpdate,
    TransactionCreate,
    TransactionUpdate,
}

impl Contract {
    pub fn schema(self) -> &'static Schema {
        match self {
            Contract::GoalCreate => &GOAL_CREATE,
            Contract::GoalUpdate => &GOAL_UPDATE,
            Contract::TransactionCreate => &TRANSACTION_CREATE,
            Contract::TransactionUpdate => &TRANSACTION_UPDATE,
        }
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            Contract::GoalCreate => "goal.create",
            Contract::GoalUpdate => "goal.update",
            Contract::TransactionCreate => "transaction.create",
            Contract::TransactionUpdate => "transaction.update",
        };
        f.write_str(name)
    }
}

pub fn goal_create() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title", "Title").non_empty(),
        FieldSpec::text("description", "Description").optional(),
        FieldSpec::number("targetAmount", "Target amount").positive(),
        FieldSpec::text("targetDate", "Target date"),
        FieldSpec::text("category", "Category").non_empty(),
        FieldSpec::one_of("priority", "Priority", GOAL_PRIORITIES).default_value("medium"),
        FieldSpec::number("monthlyContribution", "Monthly contribution")
            .non_negative()
            .default_value(0),
    ])
}

pub fn goal_update() -> Schema {
    goal_create().partial().extend(vec![
        FieldSpec::number("currentAmount", "Current amount")
            .non_negative()
            .optional(),
        FieldSpec::one_of("status", "Status", GOAL_STATUSES).optional(),
    ])
}

pub fn transaction_create() -> Schema {
    Schema::new(vec![
        FieldSpec::number("amount", "Amount"),
        FieldSpec::text("description", "Description").non_empty(),
        FieldSpec::text("category", "Category").non_empty(),
        FieldSpec::text("date", "Date").optional(),
        FieldSpec::text("location", "Location").optional(),
        FieldSpec::text("paymentMethod", "Payment method").optional(),
        FieldSpec::boolean("recurring", "Recurring").default_value(false),
    ])
}

pub fn transaction_update() -> Schema {
    transaction_create().partial()
}
