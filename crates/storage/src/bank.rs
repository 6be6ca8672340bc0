//! Loading a question bank from a JSON file.
//!
//! The file holds an array of `{ "q": ..., "choices": [...], "answer": n }` objects.

use std::path::Path;

use quiz_core::model::{QuestionBank, QuestionDraft, QuestionError};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {position} is invalid: {source}")]
    Invalid {
        position: usize,
        source: QuestionError,
    },
}

/// Parse and validate a bank from JSON text.
///
/// # Errors
///
/// Returns `BankLoadError::Json` for malformed JSON and `BankLoadError::Invalid`
/// for the first question that fails validation.
pub fn parse_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
    QuestionBank::from_drafts(drafts)
        .map_err(|(position, source)| BankLoadError::Invalid { position, source })
}

/// Read a bank file from disk.
///
/// # Errors
///
/// Returns `BankLoadError` if the file cannot be read or its contents are invalid.
pub fn load_bank_from_path(path: impl AsRef<Path>) -> Result<QuestionBank, BankLoadError> {
    let raw = std::fs::read_to_string(path)?;
    parse_bank(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_bank() {
        let bank = parse_bank(
            r#"[
                {"q": "First?", "choices": ["a", "b"], "answer": 0},
                {"q": "Second?", "choices": ["a", "b", "c"], "answer": 2}
            ]"#,
        )
        .unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).unwrap().correct_choice(), "c");
    }

    #[test]
    fn empty_array_is_an_empty_bank() {
        assert!(parse_bank("[]").unwrap().is_empty());
    }

    #[test]
    fn reports_invalid_question_position() {
        let err = parse_bank(
            r#"[
                {"q": "ok", "choices": ["a", "b"], "answer": 1},
                {"q": "bad", "choices": ["only"], "answer": 0}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BankLoadError::Invalid {
                position: 1,
                source: QuestionError::TooFewChoices { count: 1 }
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_bank(r#"{"q": "not an array"}"#),
            Err(BankLoadError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_bank_from_path("/definitely/not/here.json"),
            Err(BankLoadError::Io(_))
        ));
    }
}
