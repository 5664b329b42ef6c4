pub mod validation;

pub use validation::{NormalizedBody, ValidationGate, validate_body};
