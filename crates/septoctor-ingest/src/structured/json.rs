//! Single-object JSON.

use serde_json::Value;
use tracing::debug;

use septoctor_model::{FieldValue, IntakeError, RawRecord, SourceFormat};

/// Parses a JSON payload holding one object, or an array of exactly one.
///
/// Value conversion:
/// - numbers stay numeric, strings stay text
/// - booleans become `"true"` / `"false"`
/// - `null` members are omitted
/// - nested arrays and objects become their compact JSON text
pub fn parse_json_record(text: &str) -> Result<RawRecord, IntakeError> {
    let value: Value = serde_json::from_str(text).map_err(|e| IntakeError::ParseError {
        format: SourceFormat::Json,
        message: e.to_string(),
    })?;

    let value = match value {
        Value::Array(mut items) => match items.len() {
            0 => {
                return Err(IntakeError::EmptyFile {
                    format: SourceFormat::Json,
                });
            }
            1 => items.swap_remove(0),
            records => return Err(IntakeError::MultiRecordFile { records }),
        },
        other => other,
    };

    let Value::Object(members) = value else {
        return Err(IntakeError::ParseError {
            format: SourceFormat::Json,
            message: format!("expected a JSON object, found {}", type_name(&value)),
        });
    };

    let total = members.len();
    let record: RawRecord = members
        .into_iter()
        .filter_map(|(key, value)| convert_value(value).map(|value| (key, value)))
        .collect();
    if record.len() < total {
        debug!(omitted = total - record.len(), "null JSON members omitted");
    }
    Ok(record)
}

fn convert_value(value: Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
        Value::Number(number) => number.as_f64().map(FieldValue::Number),
        Value::String(text) => Some(FieldValue::Text(text)),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(FieldValue::Text(nested.to_string())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object() {
        let record =
            parse_json_record(r#"{"birth_weight": 1800, "sex": "female", "ga": 35.5}"#).unwrap();
        assert_eq!(record.get("birth_weight"), Some(&FieldValue::Number(1800.0)));
        assert_eq!(record.get("sex"), Some(&FieldValue::text("female")));
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["birth_weight", "sex", "ga"]);
    }

    #[test]
    fn test_array_of_one_is_unwrapped() {
        let record = parse_json_record(r#"[{"apnea": "no"}]"#).unwrap();
        assert_eq!(record.get("apnea"), Some(&FieldValue::text("no")));
    }

    #[test]
    fn test_array_cardinality() {
        assert_eq!(
            parse_json_record("[]").unwrap_err(),
            IntakeError::EmptyFile {
                format: SourceFormat::Json
            }
        );
        assert_eq!(
            parse_json_record(r#"[{"a":1},{"a":2}]"#).unwrap_err(),
            IntakeError::MultiRecordFile { records: 2 }
        );
    }

    #[test]
    fn test_value_conversion() {
        let record = parse_json_record(
            r#"{"shock": true, "apnea": false, "notes": null, "labs": [1, 2], "vitals": {"hr": 150}}"#,
        )
        .unwrap();
        assert_eq!(record.get("shock"), Some(&FieldValue::text("true")));
        assert_eq!(record.get("apnea"), Some(&FieldValue::text("false")));
        assert!(record.get("notes").is_none());
        assert_eq!(record.get("labs"), Some(&FieldValue::text("[1,2]")));
        assert_eq!(record.get("vitals"), Some(&FieldValue::text(r#"{"hr":150}"#)));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        for input in ["42", r#""text""#, "[7]", "null"] {
            let err = parse_json_record(input).unwrap_err();
            assert!(
                matches!(err, IntakeError::ParseError { .. }),
                "{input} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_json_keeps_parser_message() {
        match parse_json_record("{\"a\": ").unwrap_err() {
            IntakeError::ParseError { format, message } => {
                assert_eq!(format, SourceFormat::Json);
                assert!(message.contains("EOF"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_payload_is_parse_error() {
        assert!(matches!(
            parse_json_record("").unwrap_err(),
            IntakeError::ParseError { .. }
        ));
    }
}
