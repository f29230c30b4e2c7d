//! Question normalization: trim, lowercase, tokenize, rejoin.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::{Error, Result};

// Unicode-aware `\w`: ASCII letters, digits and underscore, plus letters and
// digits of other scripts.
static WORD: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"\w+").unwrap());

/// A question after preprocessing. Built only by [`preprocess_question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuestion {
    original: String,
    lowercased: String,
    tokens: Vec<String>,
    processed: String,
}

impl NormalizedQuestion {
    /// The input with surrounding whitespace removed.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn lowercased(&self) -> &str {
        &self.lowercased
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens joined by single spaces; this is what goes into the prompt.
    pub fn processed(&self) -> &str {
        &self.processed
    }
}

/// Normalize a natural-language question.
///
/// Fails with [`Error::InvalidInput`] when the question is empty or only
/// whitespace.
pub fn preprocess_question(question: &str) -> Result<NormalizedQuestion> {
    let original = question.trim();
    if original.is_empty() {
        return Err(Error::invalid_input("Question cannot be empty."));
    }

    let lowercased = original.to_lowercase();
    let tokens: Vec<String> = WORD
        .find_iter(&lowercased)
        .map(|m| m.as_str().to_string())
        .collect();
    let processed = tokens.join(" ");

    Ok(NormalizedQuestion {
        original: original.to_string(),
        lowercased,
        tokens,
        processed,
    })
}
