//! Conversion of untyped JSON input into documents and labels

use crate::error::{Result, TextBaselinesError};
use crate::processing::regex_classifier::Label;
use serde_json::Value;

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        TextBaselinesError::invalid_argument(format!(
            "{} must be a JSON array, got {}",
            what,
            json_type(value)
        ))
    })
}

/// Every element must be a string; the first that is not fails with `TypeMismatch`
pub fn texts_from_json(value: &Value) -> Result<Vec<String>> {
    as_array(value, "documents")?
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text.clone()),
            other => Err(TextBaselinesError::TypeMismatch {
                index,
                expected: "string",
                found: json_type(other).to_string(),
            }),
        })
        .collect()
}

pub fn labels_from_json(value: &Value) -> Result<Vec<Label>> {
    as_array(value, "labels")?
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_i64() {
            Some(n) => Label::try_from(n),
            None => Err(TextBaselinesError::TypeMismatch {
                index,
                expected: "integer",
                found: json_type(item).to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_texts_from_json() {
        let texts = texts_from_json(&json!(["a good film", ""])).unwrap();
        assert_eq!(texts, vec!["a good film", ""]);
    }

    #[test]
    fn test_non_string_document_is_type_mismatch() {
        let err = texts_from_json(&json!(["fine", 42, null])).unwrap_err();
        match err {
            TextBaselinesError::TypeMismatch { index, expected, found } => {
                assert_eq!(index, 1);
                assert_eq!(expected, "string");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_documents_must_be_an_array() {
        let err = texts_from_json(&json!({"text": "hi"})).unwrap_err();
        assert!(matches!(err, TextBaselinesError::InvalidArgument(_)));
    }

    #[test]
    fn test_labels_from_json() {
        assert_eq!(
            labels_from_json(&json!([1, 0, 1])).unwrap(),
            vec![Label::Positive, Label::Negative, Label::Positive]
        );
        assert!(matches!(
            labels_from_json(&json!([1, "0"])),
            Err(TextBaselinesError::TypeMismatch { index: 1, .. })
        ));
        assert!(matches!(
            labels_from_json(&json!([3])),
            Err(TextBaselinesError::InvalidArgument(_))
        ));
    }
}
