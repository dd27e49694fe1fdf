//! Field-descriptor tables for the two record kinds.
//!
//! Each kind is a static list of [`FieldSpec`]s. The validator walks these
//! tables generically, so adding a field means adding one line here.

use std::fmt;

use serde_json::Value;

use crate::models::enrollment::STATUS_PENDING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Course,
    Enrollment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Course, RecordKind::Enrollment];

    /// Name of the storage collection holding records of this kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Course => "course",
            RecordKind::Enrollment => "enrollment",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Course => COURSE_FIELDS,
            RecordKind::Enrollment => ENROLLMENT_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Decimal,
    Boolean,
    StringList,
}

impl FieldType {
    pub fn type_name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Decimal => "number",
            FieldType::Boolean => "boolean",
            FieldType::StringList => "array of strings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Integer(i64),
    Str(&'static str),
    EmptyList,
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Null => Value::Null,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Integer(n) => Value::from(n),
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::EmptyList => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    Required,
    Optional(DefaultValue),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub presence: Presence,
    /// Whether an explicit `null` is accepted.
    pub nullable: bool,
    /// Inclusive lower bound for numeric fields.
    pub minimum: Option<f64>,
}

impl FieldSpec {
    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            presence: Presence::Required,
            nullable: false,
            minimum: None,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType, default: DefaultValue) -> Self {
        Self {
            name,
            field_type,
            presence: Presence::Optional(default),
            nullable: false,
            minimum: None,
        }
    }

    const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    const fn at_least(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn default_value(&self) -> Option<Value> {
        match self.presence {
            Presence::Required => None,
            Presence::Optional(d) => Some(d.to_value()),
        }
    }
}

use DefaultValue::{Bool, EmptyList, Integer, Null, Str};

static COURSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldType::String),
    FieldSpec::required("code", FieldType::String),
    FieldSpec::optional("description", FieldType::String, Null).nullable(),
    // Sailing, Motor, Theory, Mixed
    FieldSpec::optional("modality", FieldType::String, Null).nullable(),
    FieldSpec::optional("duration_hours", FieldType::Integer, Null)
        .nullable()
        .at_least(0.0),
    // EUR
    FieldSpec::required("price", FieldType::Decimal).at_least(0.0),
    FieldSpec::optional("seats", FieldType::Integer, Integer(8))
        .nullable()
        .at_least(0.0),
    FieldSpec::optional("is_published", FieldType::Boolean, Bool(true)),
    FieldSpec::optional("tags", FieldType::StringList, EmptyList),
];

static ENROLLMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("course_id", FieldType::String),
    FieldSpec::required("student_name", FieldType::String),
    FieldSpec::required("email", FieldType::String),
    FieldSpec::optional("phone", FieldType::String, Null).nullable(),
    FieldSpec::optional("preferred_dates", FieldType::String, Null).nullable(),
    FieldSpec::optional("status", FieldType::String, Str(STATUS_PENDING)),
    FieldSpec::optional("notes", FieldType::String, Null).nullable(),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_required_fields() {
        let required: Vec<&str> = RecordKind::Course
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["name", "code", "price"]);
    }

    #[test]
    fn test_enrollment_defaults() {
        let status = RecordKind::Enrollment.field("status").expect("status field");
        assert_eq!(status.default_value(), Some(Value::String("pending".into())));
        assert!(!status.nullable);

        let phone = RecordKind::Enrollment.field("phone").expect("phone field");
        assert_eq!(phone.default_value(), Some(Value::Null));
    }

    #[test]
    fn test_no_kind_declares_an_identifier() {
        for kind in RecordKind::ALL {
            assert!(kind.field("id").is_none());
            assert!(kind.field("_id").is_none());
        }
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(RecordKind::Course.collection(), "course");
        assert_eq!(RecordKind::Enrollment.to_string(), "enrollment");
    }
}
