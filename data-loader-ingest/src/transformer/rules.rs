//! Field-level normalization rules.

use crate::errors::TransformError;
use crate::reader::RawRecord;

/// Keyword list separator inside a single field.
pub const KEYWORD_DELIMITER: char = ',';

/// Split a field into an ordered list of trimmed keywords.
///
/// Empty pieces are kept, so `"a,,b"` yields `["a", "", "b"]` and an empty
/// field yields `[""]`.
pub fn split_keywords(value: &str) -> Vec<String> {
    value
        .split(KEYWORD_DELIMITER)
        .map(|keyword| keyword.trim().to_string())
        .collect()
}

/// Parse a field as a base-10 integer.
pub fn parse_integer(field: &str, value: &str) -> Result<i64, TransformError> {
    value
        .parse::<i64>()
        .map_err(|source| TransformError::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}

/// Value of a column the rules cannot do without.
pub(crate) fn required<'a>(record: &'a RawRecord, column: &str) -> Result<&'a str, TransformError> {
    record
        .get(column)
        .ok_or_else(|| TransformError::missing_field(column))
}

pub(crate) fn optional(record: &RawRecord, column: &str) -> Option<String> {
    record.get(column).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("Health, Vascular"), vec!["Health", "Vascular"]);
        assert_eq!(
            split_keywords("Health, Vascular, Mission Cancer"),
            vec!["Health", "Vascular", "Mission Cancer"]
        );
    }

    #[test]
    fn test_split_keywords_keeps_order_and_duplicates() {
        assert_eq!(split_keywords("b, a, b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_split_keywords_keeps_empty_pieces() {
        assert_eq!(split_keywords("a,, b ,"), vec!["a", "", "b", ""]);
        assert_eq!(split_keywords(""), vec![""]);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("ID", "42"), Ok(42));
        assert_eq!(parse_integer("ID", "-3"), Ok(-3));
        assert_eq!(parse_integer("ID", "+5"), Ok(5));
    }

    #[test]
    fn test_parse_integer_rejects_non_numeric() {
        for value in ["abc", "", "1.5", "12a"] {
            let err = parse_integer("ID", value).unwrap_err();
            assert!(matches!(
                err,
                TransformError::InvalidInteger { ref field, .. } if field == "ID"
            ));
        }
    }
}
