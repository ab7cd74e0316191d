//! Value parsers: validate raw scalars and convert them to canonical values.
//!
//! Every parser has the same shape, `fn(&Value, &ConfigPath) -> Result<T,
//! ValidationError>`, so schemas can pass them around as plain function
//! pointers (see [`Parser`]).

use std::fmt;
use std::ops::Range;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::codegen::Literal;
use crate::error::ValidationError;
use crate::id::Identifier;
use crate::path::ConfigPath;

/// Signature shared by every value parser.
pub type Parser<T> = fn(&Value, &ConfigPath) -> Result<T, ValidationError>;

/// A non-negative duration in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Milliseconds(pub u32);

impl fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<Milliseconds> for Literal {
    fn from(value: Milliseconds) -> Self {
        Literal::from(value.0)
    }
}

/// Inline foreign code, with the identifiers it references through
/// `id(name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaSource {
    code: String,
    requires: Vec<Identifier>,
}

impl LambdaSource {
    /// Scan `code` for `id(name)` references.
    #[must_use]
    pub fn parse(code: impl Into<String>) -> Self {
        let code = code.into();
        let mut requires: Vec<Identifier> = Vec::new();
        for (_, name) in scan_references(&code) {
            if !requires.contains(&name) {
                requires.push(name);
            }
        }
        Self { code, requires }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Referenced identifiers, in first-occurrence order, without duplicates.
    #[must_use]
    pub fn requires(&self) -> &[Identifier] {
        &self.requires
    }

    /// The code with every `id(name)` replaced by `name`.
    #[must_use]
    pub fn rewritten(&self) -> String {
        let mut out = String::with_capacity(self.code.len());
        let mut last = 0;
        for (span, name) in scan_references(&self.code) {
            out.push_str(&self.code[last..span.start]);
            out.push_str(name.as_str());
            last = span.end;
        }
        out.push_str(&self.code[last..]);
        out
    }
}

impl Serialize for LambdaSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("lambda", &self.code)?;
        map.end()
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn scan_references(code: &str) -> Vec<(Range<usize>, Identifier)> {
    let bytes = code.as_bytes();
    let mut found = Vec::new();
    let mut offset = 0;
    while let Some(pos) = code[offset..].find("id(") {
        let start = offset + pos;
        offset = start + 3;
        if start > 0 && is_ident_byte(bytes[start - 1]) {
            continue;
        }
        let mut cursor = start + 3;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        let name_start = cursor;
        while cursor < bytes.len() && is_ident_byte(bytes[cursor]) {
            cursor += 1;
        }
        let name_end = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if cursor >= bytes.len() || bytes[cursor] != b')' {
            continue;
        }
        if let Ok(name) = code[name_start..name_end].parse::<Identifier>() {
            found.push((start..cursor + 1, name));
            offset = cursor + 1;
        }
    }
    found
}

/// A field that is either a literal or a lambda evaluated against the
/// calling context's argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Templatable<T> {
    Static(T),
    Lambda(LambdaSource),
}

impl<T> Templatable<T> {
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Templatable<U> {
        match self {
            Self::Static(value) => Templatable::Static(f(value)),
            Self::Lambda(source) => Templatable::Lambda(source),
        }
    }
}

fn describe(value: &Value) -> String {
    value.to_string()
}

fn wrong_type(path: &ConfigPath, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        path: path.clone(),
        expected,
    }
}

fn invalid_format(path: &ConfigPath, value: &str, format: &'static str) -> ValidationError {
    ValidationError::InvalidFormat {
        path: path.clone(),
        value: value.to_string(),
        format,
    }
}

fn out_of_range(path: &ConfigPath, value: &Value, range: &'static str) -> ValidationError {
    ValidationError::OutOfRange {
        path: path.clone(),
        value: describe(value),
        range,
    }
}

/// Any scalar, stringified.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for mappings, sequences and null.
pub fn string(value: &Value, path: &ConfigPath) -> Result<String, ValidationError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(wrong_type(path, "string")),
    }
}

/// `true`/`false`, or one of `yes/no/on/off/enable/disable/true/false`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] for unrecognised strings and
/// [`ValidationError::WrongType`] for non-scalars.
pub fn boolean(value: &Value, path: &ConfigPath) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(invalid_format(path, text, "boolean")),
        },
        _ => Err(wrong_type(path, "boolean")),
    }
}

fn number(value: &Value, path: &ConfigPath, expected: &'static str) -> Result<f64, ValidationError> {
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| wrong_type(path, expected)),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_format(path, text, expected)),
        _ => Err(wrong_type(path, expected)),
    }
}

/// A fraction in `[0, 1]`, or a string percentage such as `"50%"`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] outside `[0, 1]`.
#[allow(clippy::cast_possible_truncation)]
pub fn percentage(value: &Value, path: &ConfigPath) -> Result<f32, ValidationError> {
    let fraction = match value {
        Value::String(text) => match text.trim().strip_suffix('%') {
            Some(percent) => {
                percent
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid_format(path, text, "percentage"))?
                    / 100.0
            }
            None => number(value, path, "percentage")?,
        },
        _ => number(value, path, "percentage")?,
    };
    if !(0.0..=1.0).contains(&fraction) {
        return Err(out_of_range(path, value, "0% to 100% (0.0 to 1.0)"));
    }
    Ok(fraction as f32)
}

/// A finite number `>= 0`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] for negative or non-finite values.
#[allow(clippy::cast_possible_truncation)]
pub fn positive_float(value: &Value, path: &ConfigPath) -> Result<f32, ValidationError> {
    let parsed = number(value, path, "positive float")?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(out_of_range(path, value, "a number >= 0"));
    }
    Ok(parsed as f32)
}

fn unsigned(
    value: &Value,
    path: &ConfigPath,
    max: u64,
    range: &'static str,
) -> Result<u64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                unsigned
            } else if number.as_i64().is_some_and(|signed| signed < 0) {
                return Err(out_of_range(path, value, range));
            } else {
                return Err(invalid_format(path, &describe(value), "integer"));
            }
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('-') {
                return Err(out_of_range(path, value, range));
            }
            trimmed
                .parse::<u64>()
                .map_err(|_| invalid_format(path, text, "integer"))?
        }
        _ => return Err(wrong_type(path, "integer")),
    };
    if parsed > max {
        return Err(out_of_range(path, value, range));
    }
    Ok(parsed)
}

/// An integer in `[0, 2^32)`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] when negative or too large.
pub fn uint32(value: &Value, path: &ConfigPath) -> Result<u32, ValidationError> {
    let parsed = unsigned(value, path, u64::from(u32::MAX), "0 to 4294967295")?;
    u32::try_from(parsed).map_err(|_| out_of_range(path, value, "0 to 4294967295"))
}

/// An integer in `[0, 255]`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] when negative or too large.
pub fn uint8(value: &Value, path: &ConfigPath) -> Result<u8, ValidationError> {
    let parsed = unsigned(value, path, u64::from(u8::MAX), "0 to 255")?;
    u8::try_from(parsed).map_err(|_| out_of_range(path, value, "0 to 255"))
}

const DURATION_RANGE: &str = "0ms to 4294967295ms";

/// A duration: an integer number of milliseconds, or a string such as
/// `"500ms"`, `"1.5s"`, `"2min"`, `"1h"`, `"1d"` (no unit means ms).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] for unknown units or
/// fractional milliseconds, [`ValidationError::OutOfRange`] for negative or
/// too large durations.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn milliseconds(value: &Value, path: &ConfigPath) -> Result<Milliseconds, ValidationError> {
    let millis = match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                unsigned as f64
            } else if number.as_f64().is_some_and(|n| n < 0.0) {
                return Err(out_of_range(path, value, DURATION_RANGE));
            } else {
                number
                    .as_f64()
                    .ok_or_else(|| wrong_type(path, "time period"))?
            }
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('-') {
                return Err(out_of_range(path, value, DURATION_RANGE));
            }
            let split = trimmed
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(trimmed.len());
            let (amount, unit) = trimmed.split_at(split);
            let factor = match unit.trim() {
                "" | "ms" => 1.0,
                "s" | "sec" => 1_000.0,
                "min" => 60_000.0,
                "h" => 3_600_000.0,
                "d" => 86_400_000.0,
                _ => return Err(invalid_format(path, text, "time period")),
            };
            let amount = amount
                .parse::<f64>()
                .map_err(|_| invalid_format(path, text, "time period"))?;
            amount * factor
        }
        _ => return Err(wrong_type(path, "time period")),
    };
    let rounded = millis.round();
    if (millis - rounded).abs() > 1e-6 {
        return Err(invalid_format(
            path,
            &describe(value),
            "time period in whole milliseconds",
        ));
    }
    if rounded > f64::from(u32::MAX) {
        return Err(out_of_range(path, value, DURATION_RANGE));
    }
    Ok(Milliseconds(rounded as u32))
}

/// A string usable as an identifier.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFormat`] when the string does not match
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn identifier(value: &Value, path: &ConfigPath) -> Result<Identifier, ValidationError> {
    match value {
        Value::String(text) => text
            .parse()
            .map_err(|_| invalid_format(path, text, "identifier")),
        _ => Err(wrong_type(path, "identifier")),
    }
}

/// Inline code, either as a bare string or as `{lambda: "<code>"}`.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for anything else.
pub fn lambda(value: &Value, path: &ConfigPath) -> Result<LambdaSource, ValidationError> {
    match value {
        Value::String(code) => Ok(LambdaSource::parse(code.clone())),
        Value::Object(map) if map.len() == 1 => match map.get("lambda") {
            Some(Value::String(code)) => Ok(LambdaSource::parse(code.clone())),
            _ => Err(wrong_type(path, "lambda")),
        },
        _ => Err(wrong_type(path, "lambda")),
    }
}

fn is_lambda(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.len() == 1 && map.contains_key("lambda"))
}

/// A literal parsed with `parser`, or a `{lambda: ...}` mapping.
///
/// # Errors
///
/// Propagates the error of whichever branch applies.
pub fn templatable<T>(
    value: &Value,
    path: &ConfigPath,
    parser: Parser<T>,
) -> Result<Templatable<T>, ValidationError> {
    if is_lambda(value) {
        lambda(value, path).map(Templatable::Lambda)
    } else {
        parser(value, path).map(Templatable::Static)
    }
}

/// A sequence as-is, a single item as a one-element list, `null` as empty.
#[must_use]
pub fn ensure_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Enforce a cardinality floor on a list.
///
/// # Errors
///
/// Returns [`ValidationError::TooFewEntries`] when `found < min`.
pub fn min_entries(path: &ConfigPath, found: usize, min: usize) -> Result<(), ValidationError> {
    if found < min {
        return Err(ValidationError::TooFewEntries {
            path: path.clone(),
            min,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn path() -> ConfigPath {
        ConfigPath::root().key("field")
    }

    #[test]
    fn should_accept_fraction_as_percentage() {
        assert!((percentage(&json!(0.5), &path()).unwrap() - 0.5).abs() < f32::EPSILON);
        assert!((percentage(&json!(1), &path()).unwrap() - 1.0).abs() < f32::EPSILON);
        assert!(percentage(&json!(0), &path()).unwrap().abs() < f32::EPSILON);
    }

    #[test]
    fn should_accept_percent_string_as_percentage() {
        let parsed = percentage(&json!("75%"), &path()).unwrap();
        assert!((parsed - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn should_reject_percentage_above_one() {
        let result = percentage(&json!(1.5), &path());
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
        let result = percentage(&json!("120%"), &path());
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn should_reject_negative_percentage() {
        let result = percentage(&json!(-0.1), &path());
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn should_parse_durations_with_units() {
        let cases = [
            (json!(500), 500),
            (json!("500"), 500),
            (json!("500ms"), 500),
            (json!("1.5s"), 1_500),
            (json!("2 s"), 2_000),
            (json!("2min"), 120_000),
            (json!("1h"), 3_600_000),
            (json!("1d"), 86_400_000),
            (json!("0ms"), 0),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                milliseconds(&raw, &path()).unwrap(),
                Milliseconds(expected),
                "parsing {raw}"
            );
        }
    }

    #[test]
    fn should_reject_unknown_duration_unit() {
        let result = milliseconds(&json!("5 fortnights"), &path());
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn should_reject_negative_duration() {
        assert!(matches!(
            milliseconds(&json!(-5), &path()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            milliseconds(&json!("-5ms"), &path()),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn should_reject_fractional_milliseconds() {
        let result = milliseconds(&json!("1.5ms"), &path());
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn should_reject_duration_overflowing_u32() {
        let result = milliseconds(&json!("50d"), &path());
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn should_parse_boolean_spellings() {
        assert!(boolean(&json!(true), &path()).unwrap());
        assert!(boolean(&json!("ON"), &path()).unwrap());
        assert!(boolean(&json!("yes"), &path()).unwrap());
        assert!(!boolean(&json!("disable"), &path()).unwrap());
        assert!(boolean(&json!("maybe"), &path()).is_err());
        assert!(boolean(&json!(1), &path()).is_err());
    }

    #[test]
    fn should_bound_unsigned_integers() {
        assert_eq!(uint8(&json!(255), &path()).unwrap(), 255);
        assert!(matches!(
            uint8(&json!(256), &path()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            uint32(&json!(-1), &path()),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(uint32(&json!("42"), &path()).unwrap(), 42);
        assert!(matches!(
            uint32(&json!(1.5), &path()),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn should_stringify_scalars() {
        assert_eq!(string(&json!("Kitchen"), &path()).unwrap(), "Kitchen");
        assert_eq!(string(&json!(42), &path()).unwrap(), "42");
        assert!(matches!(
            string(&json!({"a": 1}), &path()),
            Err(ValidationError::WrongType { .. })
        ));
    }

    #[test]
    fn should_reject_negative_positive_float() {
        assert!(positive_float(&json!(-1.0), &path()).is_err());
        assert!((positive_float(&json!(2.8), &path()).unwrap() - 2.8).abs() < f32::EPSILON);
    }

    #[test]
    fn should_validate_identifiers() {
        assert_eq!(
            identifier(&json!("kitchen"), &path()).unwrap().as_str(),
            "kitchen"
        );
        assert!(matches!(
            identifier(&json!("kitchen light"), &path()),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn should_extract_lambda_references_in_order_without_duplicates() {
        let source = LambdaSource::parse("return id(b)->value + id( a ) + id(b)->value;");
        let names: Vec<_> = source.requires().iter().map(Identifier::as_str).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn should_rewrite_lambda_references_to_variable_names() {
        let source = LambdaSource::parse("return id(sensor)->state * 2;");
        assert_eq!(source.rewritten(), "return sensor->state * 2;");
    }

    #[test]
    fn should_ignore_identifiers_ending_in_id() {
        let source = LambdaSource::parse("auto x = grid(3); return valid(x);");
        assert!(source.requires().is_empty());
        assert_eq!(source.rewritten(), "auto x = grid(3); return valid(x);");
    }

    #[test]
    fn should_parse_lambda_from_mapping_or_string() {
        let from_map = lambda(&json!({"lambda": "return 1;"}), &path()).unwrap();
        let from_str = lambda(&json!("return 1;"), &path()).unwrap();
        assert_eq!(from_map, from_str);
        assert!(lambda(&json!(5), &path()).is_err());
    }

    #[test]
    fn should_parse_templatable_literal_and_lambda() {
        let literal = templatable(&json!("500ms"), &path(), milliseconds).unwrap();
        assert_eq!(literal, Templatable::Static(Milliseconds(500)));

        let lambda = templatable(&json!({"lambda": "return x;"}), &path(), milliseconds).unwrap();
        assert!(matches!(lambda, Templatable::Lambda(_)));
    }

    #[test]
    fn should_wrap_single_item_as_list() {
        assert_eq!(ensure_list(&json!([1, 2])).len(), 2);
        assert_eq!(ensure_list(&json!({"a": 1})).len(), 1);
        assert!(ensure_list(&Value::Null).is_empty());
    }

    #[test]
    fn should_enforce_min_entries() {
        assert!(min_entries(&path(), 2, 2).is_ok());
        assert!(matches!(
            min_entries(&path(), 1, 2),
            Err(ValidationError::TooFewEntries { min: 2, found: 1, .. })
        ));
    }

    #[test]
    fn should_serialize_lambda_as_tagged_mapping() {
        let source = LambdaSource::parse("return 1;");
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json, json!({"lambda": "return 1;"}));
    }
}
