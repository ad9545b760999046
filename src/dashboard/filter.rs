//! # Document Filter
//!
//! Single-field, single-operator predicate over cached documents.
//!
//! String operators compare the lower-cased display string of a field
//! against the lower-cased filter value. Numeric operators coerce both
//! sides to numbers; values with no numeric reading never match.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::store::ID_FIELD;

use super::errors::DashboardError;

/// Filter operators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Display strings are equal
    #[default]
    Equals,

    /// Display string contains the value
    Contains,

    /// Display string starts with the value
    StartsWith,

    /// Display string ends with the value
    EndsWith,

    /// Numeric greater than
    GreaterThan,

    /// Numeric less than
    LessThan,
}

impl FilterOperator {
    /// Every operator, in menu order
    pub const ALL: [FilterOperator; 6] = [
        FilterOperator::Equals,
        FilterOperator::Contains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
    ];

    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = DashboardError;

    /// Accepts `startsWith`, `starts-with`, `starts_with` and the like,
    /// plus the short forms `eq`, `gt` and `lt`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "equals" | "eq" => Ok(FilterOperator::Equals),
            "contains" => Ok(FilterOperator::Contains),
            "startswith" => Ok(FilterOperator::StartsWith),
            "endswith" => Ok(FilterOperator::EndsWith),
            "greaterthan" | "gt" => Ok(FilterOperator::GreaterThan),
            "lessthan" | "lt" => Ok(FilterOperator::LessThan),
            _ => Err(DashboardError::UnknownOperator(s.to_string())),
        }
    }
}

/// A filter over one top-level field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// A filter with no field or no value lets every document through
    pub fn is_active(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        if !self.is_active() {
            return true;
        }

        let field_value = match doc.get(&self.field) {
            None | Some(Value::Null) => return false,
            Some(v) => v,
        };

        let text = || display_string(field_value).to_lowercase();
        let needle = || self.value.to_lowercase();

        match self.operator {
            FilterOperator::Equals => text() == needle(),
            FilterOperator::Contains => text().contains(&needle()),
            FilterOperator::StartsWith => text().starts_with(&needle()),
            FilterOperator::EndsWith => text().ends_with(&needle()),
            FilterOperator::GreaterThan => to_number(field_value) > str_to_number(&self.value),
            FilterOperator::LessThan => to_number(field_value) < str_to_number(&self.value),
        }
    }

    /// Indexes of the documents that pass, in order
    pub fn matching_indexes(&self, docs: &[Value]) -> Vec<usize> {
        docs.iter()
            .enumerate()
            .filter(|(_, doc)| self.matches(doc))
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.field, self.operator, self.value)
    }
}

/// Sorted union of top-level keys across documents, without `_id`
pub fn extract_fields(docs: &[Value]) -> Vec<String> {
    let fields: BTreeSet<&String> = docs
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|obj| obj.keys())
        .filter(|key| key.as_str() != ID_FIELD)
        .collect();

    fields.into_iter().cloned().collect()
}

/// String form of a value as shown to a user
///
/// Arrays join their elements with commas and nulls inside them render
/// empty. Objects have no useful string form.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) => format_f64(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip form; exponent notation outside `[1e-6, 1e21)`
fn format_f64(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", f);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// Numeric reading of a value; `NaN` when there is none
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => str_to_number(s),
        Value::Array(_) => str_to_number(&display_string(value)),
        Value::Object(_) => f64::NAN,
    }
}

/// Numeric reading of a string
///
/// Surrounding whitespace is ignored and an empty string reads as zero.
/// Unsigned `0x`, `0o` and `0b` literals are read in their radix.
pub fn str_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(n) = radix_literal(trimmed) {
        return n;
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Rust also accepts spellings like "inf" and "nan"
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}
