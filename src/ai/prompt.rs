pub struct PromptBuilder;

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_question_prompt(&self) -> String {
        r#"Generate one random trivia question. The question should be interesting and educational.

RESPONSE FORMAT:
- Reply with the question text only, on a single line.
- Do NOT include the answer, hints, multiple-choice options, numbering or any commentary."#
            .to_string()
    }

    /// Both inputs are interpolated verbatim; the model reads them as plain text.
    pub fn build_answer_check_prompt(&self, question: &str, answer: &str) -> String {
        format!(
            r#"Grade this trivia answer.
Question: {question}
User's Answer: {answer}

An empty or unrelated answer is incorrect.

RESPONSE FORMAT - Return exactly one JSON object and nothing else, like this:
{{
  "correct": true,
  "feedback": "One sentence of feedback about the answer",
  "tidbit": "An interesting fact related to the topic (1-2 sentences)"
}}

"correct" must be the JSON boolean true or false. Do not wrap the object in code fences and do not add text before or after it."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_is_deterministic() {
        let builder = PromptBuilder::new();
        assert_eq!(builder.build_question_prompt(), builder.build_question_prompt());
    }

    #[test]
    fn question_prompt_forbids_answer() {
        let prompt = PromptBuilder::new().build_question_prompt();
        assert!(prompt.contains("trivia question"));
        assert!(prompt.contains("Do NOT include the answer"));
    }

    #[test]
    fn answer_check_prompt_contains_inputs_verbatim() {
        let builder = PromptBuilder::new();
        let cases = [
            ("What is the capital of France?", "Paris"),
            (r#"Who said "I think, therefore I am"?"#, "Descartes"),
            ("What does {} mean in Rust's format!?", r#"{"correct": true}"#),
            ("Question with trailing space ", ""),
        ];

        for (question, answer) in cases {
            let prompt = builder.build_answer_check_prompt(question, answer);
            assert!(prompt.contains(question), "missing question: {question}");
            assert!(prompt.contains(answer), "missing answer: {answer}");
        }
    }

    #[test]
    fn answer_check_prompt_names_every_key() {
        let prompt = PromptBuilder::new().build_answer_check_prompt("q", "a");
        for key in ["\"correct\"", "\"feedback\"", "\"tidbit\""] {
            assert!(prompt.contains(key), "missing key {key}");
        }
        assert!(prompt.contains("exactly one JSON object"));
    }
}
