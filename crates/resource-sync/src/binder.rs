//! # Form Binder
//!
//! Translates raw input text into typed draft-field writes. Each [`Record`] declares a
//! table of [`Binding`]s; the binder looks the field up, coerces the raw text with the
//! field's [`FieldRule`] and hands the [`FieldValue`] to [`Record::apply`].
//!
//! The binder does no range or format validation. A number field fed `"abc"` becomes
//! `NaN` and that value reaches the remote call; the server owns data correctness.

use crate::record::Record;

/// How raw input text is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Identity copy of the input string.
    Text,
    /// Number parse. Blank input is `0`, anything unparseable is `NaN`.
    Number,
    /// Enumerated value passed through as text. The options are for renderers to offer;
    /// the binder does not enforce them.
    Choice(&'static [&'static str]),
    /// Identity of another record. Blank or unparseable input clears the reference.
    Reference,
    /// Boolean toggle.
    Flag,
}

/// One entry of a record's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub field: &'static str,
    pub rule: FieldRule,
}

impl Binding {
    pub const fn new(field: &'static str, rule: FieldRule) -> Self {
        Self { field, rule }
    }
}

/// A coerced value, ready to be written into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Reference(Option<u32>),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field {field} expects a {expected} value")]
    Mismatch {
        field: String,
        expected: &'static str,
    },
    #[error("Field {field} expects a yes/no value, got {value:?}")]
    InvalidFlag { field: String, value: String },
    #[error("Field {field} has no variant {value:?}")]
    UnknownVariant { field: String, value: String },
}

impl FieldValue {
    pub fn into_text(self, field: &str) -> Result<String, BindError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            _ => Err(mismatch(field, "text")),
        }
    }

    pub fn into_number(self, field: &str) -> Result<f64, BindError> {
        match self {
            FieldValue::Number(n) => Ok(n),
            _ => Err(mismatch(field, "number")),
        }
    }

    pub fn into_reference(self, field: &str) -> Result<Option<u32>, BindError> {
        match self {
            FieldValue::Reference(id) => Ok(id),
            _ => Err(mismatch(field, "reference")),
        }
    }

    pub fn into_flag(self, field: &str) -> Result<bool, BindError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            _ => Err(mismatch(field, "flag")),
        }
    }
}

fn mismatch(field: &str, expected: &'static str) -> BindError {
    BindError::Mismatch {
        field: field.to_string(),
        expected,
    }
}

/// Finds the binding for `field` in the record's table.
pub fn binding_for<T: Record>(field: &str) -> Result<Binding, BindError> {
    T::bindings()
        .iter()
        .find(|binding| binding.field == field)
        .copied()
        .ok_or_else(|| BindError::UnknownField(field.to_string()))
}

/// Coerces `raw` according to `rule`.
pub fn coerce(field: &str, rule: FieldRule, raw: &str) -> Result<FieldValue, BindError> {
    let value = match rule {
        FieldRule::Text | FieldRule::Choice(_) => FieldValue::Text(raw.to_string()),
        FieldRule::Number => FieldValue::Number(parse_number(raw)),
        FieldRule::Reference => FieldValue::Reference(raw.trim().parse().ok()),
        FieldRule::Flag => FieldValue::Flag(parse_flag(raw).ok_or_else(|| {
            BindError::InvalidFlag {
                field: field.to_string(),
                value: raw.to_string(),
            }
        })?),
    };
    Ok(value)
}

/// Looks up, coerces and writes one field of `record`.
pub fn bind<T: Record>(record: &mut T, field: &str, raw: &str) -> Result<(), BindError> {
    let binding = binding_for::<T>(field)?;
    let value = coerce(field, binding.rule, raw)?;
    record.apply(field, value)
}

/// Number parse with browser form semantics: surrounding whitespace is ignored, blank
/// input is zero, and anything else that does not parse is `NaN`.
///
/// Accepts what a browser number conversion accepts: decimal and exponent notation,
/// `Infinity` with an optional sign, and unsigned `0x`/`0o`/`0b` integers. Spellings
/// such as `inf` or `nan` are not numbers.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_radix(trimmed) {
        return value;
    }
    if trimmed.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x1A`, `0o17`, `0b101`. `None` when there is no radix prefix.
fn parse_radix(text: &str) -> Option<f64> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.unwrap_or(f64::NAN))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" | "si" | "sí" => Some(true),
        "false" | "0" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_parse_follows_form_semantics() {
        assert_eq!(parse_number("55"), 55.0);
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert_eq!(parse_number(""), 0.0);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("12kg").is_nan());
    }

    #[test]
    fn number_parse_rejects_non_browser_spellings() {
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("infinity").is_nan());
        assert!(parse_number("nan").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);

        assert_eq!(parse_number("0x1A"), 26.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert_eq!(parse_number("0o17"), 15.0);
        assert!(parse_number("-0x1A").is_nan());
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("0x1G").is_nan());

        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("-2.5E1"), -25.0);
    }

    #[test]
    fn choice_is_passed_through_unchecked() {
        let value = coerce("tipo", FieldRule::Choice(&["BEBIDA", "COMIDA"]), "POSTRE").unwrap();
        assert_eq!(value, FieldValue::Text("POSTRE".to_string()));
    }

    #[test]
    fn reference_clears_on_garbage() {
        assert_eq!(
            coerce("categoria_id", FieldRule::Reference, "3").unwrap(),
            FieldValue::Reference(Some(3))
        );
        assert_eq!(
            coerce("categoria_id", FieldRule::Reference, "").unwrap(),
            FieldValue::Reference(None)
        );
        assert_eq!(
            coerce("categoria_id", FieldRule::Reference, "x").unwrap(),
            FieldValue::Reference(None)
        );
    }

    #[test]
    fn flag_accepts_common_spellings() {
        assert_eq!(coerce("activo", FieldRule::Flag, "on").unwrap(), FieldValue::Flag(true));
        assert_eq!(coerce("activo", FieldRule::Flag, "No").unwrap(), FieldValue::Flag(false));
        assert!(matches!(
            coerce("activo", FieldRule::Flag, "maybe"),
            Err(BindError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn wrong_kind_is_a_mismatch() {
        let err = FieldValue::Number(1.0).into_text("nombre").unwrap_err();
        assert_eq!(
            err,
            BindError::Mismatch {
                field: "nombre".to_string(),
                expected: "text"
            }
        );
    }
}
