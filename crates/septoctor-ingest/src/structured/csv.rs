//! Header-plus-one-row CSV.
//!
//! Lines are split on `,` without quote-aware escaping: a quoted value that
//! contains a comma is split into two cells.

use tracing::debug;

use septoctor_model::{FieldValue, IntakeError, RawRecord, SourceFormat};

const QUOTE_CHARS: [char; 2] = ['"', '\''];

/// Parses a CSV payload holding a header row and exactly one data row.
///
/// Blank lines are ignored. Headers beyond the last value are dropped, as are
/// values beyond the last header. All values are kept as text.
pub fn parse_csv_record(text: &str) -> Result<RawRecord, IntakeError> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let (header_line, value_line) = match lines.as_slice() {
        [header, values] => (*header, *values),
        [] | [_] => {
            return Err(IntakeError::EmptyFile {
                format: SourceFormat::Csv,
            });
        }
        rows => {
            return Err(IntakeError::MultiRecordFile {
                records: rows.len() - 1,
            });
        }
    };

    let headers = split_cells(header_line);
    let values = split_cells(value_line);
    if headers.len() != values.len() {
        debug!(
            headers = headers.len(),
            values = values.len(),
            "CSV row width differs from header, extra cells ignored"
        );
    }

    Ok(headers
        .into_iter()
        .zip(values)
        .map(|(header, value)| (header, FieldValue::Text(value)))
        .collect())
}

/// Splits one line on commas, trimming whitespace and surrounding quotes.
fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

fn clean_cell(raw: &str) -> String {
    raw.trim().trim_matches(QUOTE_CHARS).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<FieldValue> {
        Some(FieldValue::text(value))
    }

    #[test]
    fn test_header_and_one_row() {
        let record = parse_csv_record("Birth Weight,GA,Sex\n1800,35,female\n").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Birth Weight").cloned(), text("1800"));
        assert_eq!(record.get("GA").cloned(), text("35"));
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["Birth Weight", "GA", "Sex"]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let record = parse_csv_record("\r\nprom,temp\r\n\r\nyes, 37.5 \r\n\r\n").unwrap();
        assert_eq!(record.get("prom").cloned(), text("yes"));
        assert_eq!(record.get("temp").cloned(), text("37.5"));
    }

    #[test]
    fn test_surrounding_quotes_are_stripped() {
        let record = parse_csv_record("\"sex\",'feeding'\n\"female\", 'poor' \n").unwrap();
        assert_eq!(record.get("sex").cloned(), text("female"));
        assert_eq!(record.get("feeding").cloned(), text("poor"));
    }

    #[test]
    fn test_inner_quotes_are_kept() {
        let record = parse_csv_record("note\n\"says \"\"hi\"\"\"\n").unwrap();
        assert_eq!(record.get("note").cloned(), text("says \"\"hi"));
    }

    #[test]
    fn test_empty_cells_are_present() {
        let record = parse_csv_record("apnea,shock\n,no\n").unwrap();
        assert_eq!(record.get("apnea").cloned(), text(""));
        assert_eq!(record.get("shock").cloned(), text("no"));
    }

    #[test]
    fn test_ragged_rows_pair_positionally() {
        let record = parse_csv_record("a,b,c\n1,2\n").unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.get("c").is_none());

        let record = parse_csv_record("a\n1,2,3\n").unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("a").cloned(), text("1"));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert_eq!(
            parse_csv_record("birth_weight,ga\n").unwrap_err(),
            IntakeError::EmptyFile {
                format: SourceFormat::Csv
            }
        );
        assert_eq!(
            parse_csv_record("   \n\n").unwrap_err(),
            IntakeError::EmptyFile {
                format: SourceFormat::Csv
            }
        );
    }

    #[test]
    fn test_multiple_rows_are_rejected() {
        let err = parse_csv_record("h\nv1\nv2\nv3\n").unwrap_err();
        assert_eq!(err, IntakeError::MultiRecordFile { records: 3 });
    }
}
