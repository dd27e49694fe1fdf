use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{FieldSpec, FieldType, RecordKind};

/// Name used for issues that concern the payload as a whole.
pub const ROOT_FIELD: &str = "$root";

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Missing,
    NotNullable,
    WrongType { expected: &'static str },
    BelowMinimum { minimum: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => f.write_str("field required"),
            Violation::NotNullable => f.write_str("must not be null"),
            Violation::WrongType { expected } => write!(f, "expected {}", expected),
            Violation::BelowMinimum { minimum } => {
                write!(f, "must be greater than or equal to {}", minimum)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub violation: Violation,
}

impl FieldIssue {
    fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.violation)
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid {kind} record: {}", join_issues(.issues))]
pub struct ValidationError {
    pub kind: RecordKind,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Names of the offending fields, in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }

    pub fn violation_for(&self, field: &str) -> Option<&Violation> {
        self.issues
            .iter()
            .find(|i| i.field == field)
            .map(|i| &i.violation)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A record that passed validation: every declared field present, typed,
/// defaults applied, and no identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    kind: RecordKind,
    fields: Map<String, Value>,
}

impl NormalizedRecord {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

/// Checks `input` against the field table of `kind`.
///
/// Unknown keys are dropped. Every violation found is reported, not only
/// the first one.
pub fn validate(kind: RecordKind, input: &Value) -> Result<NormalizedRecord, ValidationError> {
    let Some(object) = input.as_object() else {
        return Err(ValidationError {
            kind,
            issues: vec![FieldIssue::new(
                ROOT_FIELD,
                Violation::WrongType { expected: "object" },
            )],
        });
    };

    let mut fields = Map::new();
    let mut issues = Vec::new();

    for spec in kind.fields() {
        match normalize_field(spec, object.get(spec.name)) {
            Ok(value) => {
                fields.insert(spec.name.to_string(), value);
            }
            Err(mut found) => issues.append(&mut found),
        }
    }

    if issues.is_empty() {
        Ok(NormalizedRecord { kind, fields })
    } else {
        Err(ValidationError { kind, issues })
    }
}

fn normalize_field(spec: &FieldSpec, raw: Option<&Value>) -> Result<Value, Vec<FieldIssue>> {
    let raw = match raw {
        None => {
            return spec
                .default_value()
                .ok_or_else(|| vec![FieldIssue::new(spec.name, Violation::Missing)]);
        }
        Some(Value::Null) if spec.nullable => return Ok(Value::Null),
        Some(Value::Null) => {
            return Err(vec![FieldIssue::new(spec.name, Violation::NotNullable)]);
        }
        Some(v) => v,
    };

    let value = coerce(spec, raw)?;

    if let Some(minimum) = spec.minimum {
        if let Some(n) = value.as_f64() {
            if n < minimum {
                return Err(vec![FieldIssue::new(
                    spec.name,
                    Violation::BelowMinimum { minimum },
                )]);
            }
        }
    }

    Ok(value)
}

fn coerce(spec: &FieldSpec, raw: &Value) -> Result<Value, Vec<FieldIssue>> {
    let wrong_type = || {
        vec![FieldIssue::new(
            spec.name,
            Violation::WrongType {
                expected: spec.field_type.type_name(),
            },
        )]
    };

    match spec.field_type {
        FieldType::String => raw
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(wrong_type),
        FieldType::Integer => as_integer(raw).map(Value::from).ok_or_else(wrong_type),
        FieldType::Decimal => as_decimal(raw).map(Value::from).ok_or_else(wrong_type),
        FieldType::Boolean => as_boolean(raw).map(Value::Bool).ok_or_else(wrong_type),
        FieldType::StringList => {
            let items = raw.as_array().ok_or_else(wrong_type)?;
            let mut issues = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    issues.push(FieldIssue::new(
                        format!("{}[{}]", spec.name, i),
                        Violation::WrongType { expected: "string" },
                    ));
                }
            }
            if issues.is_empty() {
                Ok(Value::Array(items.clone()))
            } else {
                Err(issues)
            }
        }
    }
}

/// Accepts integers, floats without a fractional part, and strings holding
/// either.
fn as_integer(raw: &Value) -> Option<i64> {
    if let Some(n) = raw.as_i64() {
        return Some(n);
    }
    let f = match raw {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Some(n);
            }
            s.parse::<f64>().ok()?
        }
        _ => raw.as_f64()?,
    };
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Accepts any number, or a string holding a finite one.
fn as_decimal(raw: &Value) -> Option<f64> {
    match raw {
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => raw.as_f64(),
    }
}

fn as_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
