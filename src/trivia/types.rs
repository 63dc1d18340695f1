use serde::{Deserialize, Serialize};

/// A single generated trivia question. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
}

/// Body of `POST /api/check-answer`. Both fields must be present; the answer
/// may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerCheckRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerVerdict {
    pub correct: bool,
    pub feedback: String,
    pub tidbit: String,
}
