//! Declarative body contracts.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. Validation is a single
//! pass over the fields in declaration order that collects every violation
//! before returning, so a client can fix all of them in one round-trip.

pub mod contracts;
mod violation;

use serde_json::{Map, Value};
use validator::{ValidateLength, ValidateRange};

pub use contracts::{Contract, GOAL_CREATE, GOAL_UPDATE, TRANSACTION_CREATE, TRANSACTION_UPDATE};
pub use violation::{ValidationError, Violation};

/// Primitive JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Enum(_) => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text | FieldKind::Enum(_) => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// Value constraint applied after the type check succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must contain at least one character.
    NonEmpty,
    /// Number must be strictly greater than zero.
    Positive,
    /// Number must be zero or greater.
    NonNegative,
}

impl Rule {
    fn check(&self, label: &str, value: &Value) -> Option<String> {
        match self {
            Rule::NonEmpty => {
                let Value::String(text) = value else {
                    return None;
                };
                (!text.validate_length(Some(1u64), None, None))
                    .then(|| format!("{label} is required"))
            }
            Rule::Positive => {
                let number = value.as_f64()?;
                // inside (-inf, 0] means not positive
                number
                    .validate_range(None, Some(0.0), None, None)
                    .then(|| format!("{label} must be positive"))
            }
            Rule::NonNegative => {
                let number = value.as_f64()?;
                (!number.validate_range(Some(0.0), None, None, None))
                    .then(|| format!("{label} cannot be negative"))
            }
        }
    }
}

/// One accepted field: its wire name, the label used in messages, its type,
/// presence requirement, default and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            default: None,
            rules: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn one_of(name: &'static str, label: &'static str, values: &'static [&'static str]) -> Self {
        Self::new(name, label, FieldKind::Enum(values))
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value inserted when the field is omitted. Implies the field is optional.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    pub fn non_empty(self) -> Self {
        self.rule(Rule::NonEmpty)
    }

    pub fn positive(self) -> Self {
        self.rule(Rule::Positive)
    }

    pub fn non_negative(self) -> Self {
        self.rule(Rule::NonNegative)
    }

    fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the normalized value to keep (if any) or the violation message.
    fn check(&self, value: Option<&Value>) -> Result<Option<Value>, String> {
        let Some(value) = value else {
            if let Some(default) = &self.default {
                return Ok(Some(default.clone()));
            }
            if self.required {
                return Err(format!("{} is required", self.label));
            }
            return Ok(None);
        };

        if !self.kind.accepts(value) {
            return Err(format!(
                "Expected {}, received {}",
                self.kind.expected(),
                type_name(value)
            ));
        }

        if let FieldKind::Enum(options) = self.kind {
            let text = value.as_str().unwrap_or_default();
            if !options.contains(&text) {
                let expected = options
                    .iter()
                    .map(|o| format!("'{o}'"))
                    .collect::<Vec<_>>()
                    .join(" | ");
                return Err(format!(
                    "Invalid enum value. Expected {expected}, received '{text}'"
                ));
            }
        }

        if let Some(message) = self.rules.iter().find_map(|r| r.check(self.label, value)) {
            return Err(message);
        }

        Ok(Some(value.clone()))
    }
}

/// Ordered set of accepted fields for one resource operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Same fields, all optional and without defaults. An omitted field stays
    /// omitted in the normalized output.
    pub fn partial(&self) -> Schema {
        let fields = self
            .fields
            .iter()
            .cloned()
            .map(|mut f| {
                f.required = false;
                f.default = None;
                f
            })
            .collect();
        Schema { fields }
    }

    /// Appends `extra` fields. A field whose name already exists replaces the
    /// earlier one in place, keeping its position.
    pub fn extend(mut self, extra: Vec<FieldSpec>) -> Schema {
        for spec in extra {
            match self.fields.iter().position(|f| f.name == spec.name) {
                Some(index) => self.fields[index] = spec,
                None => self.fields.push(spec),
            }
        }
        self
    }

    /// Checks `input` against every field and returns the normalized object:
    /// declared fields only, defaults applied, unknown keys dropped.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let Some(object) = input.as_object() else {
            return Err(ValidationError::new(vec![Violation::at(
                &[],
                format!("Expected object, received {}", type_name(input)),
            )]));
        };

        let mut normalized = Map::new();
        let mut violations = Vec::new();

        for spec in &self.fields {
            match spec.check(object.get(spec.name)) {
                Ok(Some(value)) => {
                    normalized.insert(spec.name.to_owned(), value);
                }
                Ok(None) => {}
                Err(message) => violations.push(Violation::new(spec.name, message)),
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
