//! Literal vs. parameterized classification of event fields.
//!
//! A cell containing `|` lists several possible values; the generated
//! function then takes that dimension as a parameter instead of hard-coding
//! an enum case.

use crate::codegen::types::{FieldKind, Parameter, EVENT_NAMESPACE};
use crate::codegen::utils::to_lower_camel;

/// Marks a field as a runtime parameter
pub const PARAMETER_SEPARATOR: char = '|';

/// Classification of one field of an [`EventRow`](crate::EventRow)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Fixed enum case, e.g. `Event.Screen.myAd`
    Literal(String),
    /// Supplied by the caller through a parameter of the field's own type
    Parameter(FieldKind),
}

impl FieldValue {
    /// Swift expression for the `EventDetails` initializer
    pub fn code(&self) -> String {
        match self {
            FieldValue::Literal(reference) => reference.clone(),
            FieldValue::Parameter(kind) => kind.param_name(),
        }
    }

    /// Declared type name for parameterized fields
    pub fn declared_type(&self) -> Option<&'static str> {
        match self {
            FieldValue::Literal(_) => None,
            FieldValue::Parameter(kind) => Some(kind.type_name()),
        }
    }
}

/// Classify `raw` as a field of `kind`, appending to `params` when the field
/// becomes a parameter.
pub fn classify_field(raw: &str, kind: FieldKind, params: &mut Vec<Parameter>) -> FieldValue {
    let value = raw.trim();
    if value.contains(PARAMETER_SEPARATOR) {
        params.push(Parameter::new(kind.param_name(), kind.qualified_type()));
        return FieldValue::Parameter(kind);
    }

    FieldValue::Literal(format!(
        "{}.{}.{}",
        EVENT_NAMESPACE,
        kind.type_name(),
        to_lower_camel(value)
    ))
}
