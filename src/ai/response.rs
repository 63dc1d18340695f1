use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::trivia::{AnswerVerdict, Question};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model returned an empty response")]
    EmptyOutput,

    /// `raw` is kept for logs only and must not reach API callers.
    #[error("model output did not match the verdict schema: {reason}")]
    MalformedModelOutput { raw: String, reason: String },
}

// Exact shape the grading prompt asks for.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictPayload {
    correct: bool,
    feedback: String,
    tidbit: String,
}

pub struct ResponseParser;

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_question(&self, raw: &str) -> Result<Question, ParseError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyOutput);
        }

        Ok(Question {
            text: text.to_string(),
        })
    }

    /// Strict decoding: prose or code fences around the object are rejected,
    /// never stripped.
    pub fn parse_answer_verdict(&self, raw: &str) -> Result<AnswerVerdict, ParseError> {
        debug!("Parsing verdict response: {raw}");

        match serde_json::from_str::<VerdictPayload>(raw) {
            Ok(payload) => Ok(AnswerVerdict {
                correct: payload.correct,
                feedback: payload.feedback,
                tidbit: payload.tidbit,
            }),
            Err(e) => Err(ParseError::MalformedModelOutput {
                raw: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(raw: &str) {
        match ResponseParser::new().parse_answer_verdict(raw) {
            Err(ParseError::MalformedModelOutput { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected MalformedModelOutput for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn question_is_trimmed() {
        let parser = ResponseParser::new();
        let question = parser
            .parse_question("\n  What is the capital of France?  \n")
            .unwrap();
        assert_eq!(question.text, "What is the capital of France?");
    }

    #[test]
    fn question_keeps_inner_text_verbatim() {
        let raw = "Which planet has a day longer than its year?\nHint-free.";
        let question = ResponseParser::new().parse_question(raw).unwrap();
        assert_eq!(question.text, raw);
    }

    #[test]
    fn empty_question_is_rejected() {
        let parser = ResponseParser::new();
        assert!(matches!(parser.parse_question(""), Err(ParseError::EmptyOutput)));
        assert!(matches!(parser.parse_question("   "), Err(ParseError::EmptyOutput)));
        assert!(matches!(parser.parse_question("\n\t"), Err(ParseError::EmptyOutput)));
    }

    #[test]
    fn verdict_fields_are_returned_unchanged() {
        let raw = r#"{"correct": false, "feedback": "  Not quite. ", "tidbit": "Canberra was purpose-built.\n"}"#;
        let verdict = ResponseParser::new().parse_answer_verdict(raw).unwrap();

        assert_eq!(
            verdict,
            AnswerVerdict {
                correct: false,
                feedback: "  Not quite. ".to_string(),
                tidbit: "Canberra was purpose-built.\n".to_string(),
            }
        );
    }

    #[test]
    fn verdict_tolerates_surrounding_whitespace() {
        let raw = "\n{\"correct\": true, \"feedback\": \"Yes\", \"tidbit\": \"Fact\"}\n";
        let verdict = ResponseParser::new().parse_answer_verdict(raw).unwrap();
        assert!(verdict.correct);
    }

    #[test]
    fn missing_keys_are_malformed() {
        assert_malformed(r#"{"correct": true, "feedback": "Yes"}"#);
        assert_malformed(r#"{"correct": true, "tidbit": "Fact"}"#);
        assert_malformed(r#"{"feedback": "Yes", "tidbit": "Fact"}"#);
    }

    #[test]
    fn non_boolean_correct_is_malformed() {
        assert_malformed(r#"{"correct": "true", "feedback": "Yes", "tidbit": "Fact"}"#);
        assert_malformed(r#"{"correct": 1, "feedback": "Yes", "tidbit": "Fact"}"#);
        assert_malformed(r#"{"correct": null, "feedback": "Yes", "tidbit": "Fact"}"#);
    }

    #[test]
    fn non_string_fields_are_malformed() {
        assert_malformed(r#"{"correct": true, "feedback": null, "tidbit": "Fact"}"#);
        assert_malformed(r#"{"correct": true, "feedback": "Yes", "tidbit": ["Fact"]}"#);
    }

    #[test]
    fn unknown_keys_are_malformed() {
        assert_malformed(
            r#"{"correct": true, "feedback": "Yes", "tidbit": "Fact", "answer": "Paris"}"#,
        );
    }

    #[test]
    fn wrapped_json_is_not_repaired() {
        assert_malformed(r#"Sure! {"correct": true, "feedback": "Yes", "tidbit": "Fact"}"#);
        assert_malformed(
            "```json\n{\"correct\": true, \"feedback\": \"Yes\", \"tidbit\": \"Fact\"}\n```",
        );
    }

    #[test]
    fn non_json_is_malformed() {
        assert_malformed("");
        assert_malformed("true");
        assert_malformed("Correct! Paris is the capital.");
        assert_malformed("[]");
    }
}
