//! Single-record structured parsing.
//!
//! Both parsers produce a [`RawRecord`] with the source keys untouched; key
//! normalization happens in the mapping engine.

mod csv;
mod json;

use septoctor_model::{IntakeError, RawRecord, SourceFormat};

pub use csv::parse_csv_record;
pub use json::parse_json_record;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes `bytes` as UTF-8 and parses exactly one record.
pub fn parse_structured(bytes: &[u8], format: SourceFormat) -> Result<RawRecord, IntakeError> {
    let text = decode_text(bytes, format)?;
    match format {
        SourceFormat::Csv => parse_csv_record(text),
        SourceFormat::Json => parse_json_record(text),
    }
}

/// Strips a UTF-8 BOM and rejects UTF-16 or invalid UTF-8 input.
fn decode_text(bytes: &[u8], format: SourceFormat) -> Result<&str, IntakeError> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IntakeError::ParseError {
            format,
            message: "UTF-16 encoded files are not supported, save the file as UTF-8".to_string(),
        });
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| IntakeError::ParseError {
        format,
        message: format!("file is not valid UTF-8: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use septoctor_model::FieldValue;

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"birth_weight,sex\n1800,female\n");
        let record = parse_structured(&bytes, SourceFormat::Csv).unwrap();
        assert_eq!(
            record.get("birth_weight"),
            Some(&FieldValue::text("1800"))
        );
    }

    #[test]
    fn test_utf16_is_rejected() {
        let err = parse_structured(&[0xFF, 0xFE, b'a', 0], SourceFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            IntakeError::ParseError {
                format: SourceFormat::Csv,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = parse_structured(&[b'{', 0xC3, 0x28, b'}'], SourceFormat::Json).unwrap_err();
        match err {
            IntakeError::ParseError { format, message } => {
                assert_eq!(format, SourceFormat::Json);
                assert!(message.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
