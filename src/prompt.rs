//! Prompt template forwarded to the provider.

/// Instruction block placed in front of every question.
pub const TUTOR_INSTRUCTIONS: &str = "You are a helpful AI tutor. \
Answer the student's question clearly and concisely. \
If the question is ambiguous, note the missing details.";

/// Build the final prompt from an already normalized question.
pub fn build_prompt(processed_question: &str) -> String {
    format!("{TUTOR_INSTRUCTIONS}\n\nQuestion: {processed_question}\nAnswer:")
}
