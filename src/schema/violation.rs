use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field path and the reason the value at that path was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a violation for a nested location, joining the segments with dots.
    /// The empty path addresses the root value.
    pub fn at(path: &[&str], message: impl Into<String>) -> Self {
        Self::new(path.join("."), message)
    }
}

/// Every violation found in one validation pass, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation: {}", .violations.len(), summary(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == name)
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths_are_dot_joined() {
        let v = Violation::at(&["goal", "targetAmount"], "Target amount must be positive");
        assert_eq!(v.field, "goal.targetAmount");

        let root = Violation::at(&[], "Expected object, received array");
        assert_eq!(root.field, "");
    }

    #[test]
    fn display_lists_every_violation() {
        let err = ValidationError::new(vec![
            Violation::new("title", "Title is required"),
            Violation::new("targetAmount", "Target amount must be positive"),
        ]);

        assert_eq!(
            err.to_string(),
            "2 field(s) failed validation: title: Title is required; targetAmount: Target amount must be positive"
        );
        assert_eq!(err.field("title").map(|v| v.message.as_str()), Some("Title is required"));
    }
}
