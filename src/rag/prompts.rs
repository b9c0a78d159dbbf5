//! Prompt template for grounded answer generation

use crate::index::Match;

/// Fixed system-role instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a helpful TA.";

/// Fallback phrase the model is told to use when the excerpts don't answer
/// the question
pub const FALLBACK_PHRASE: &str =
    "I'm not sure; please check the course materials or ask on Discourse.";

/// Build the grounded user prompt from the question and retrieved excerpts.
///
/// Excerpts are listed 1-indexed in retrieval order with their full text.
/// The prompt also asks the model to include its own links array in the
/// answer text; the links returned to the caller are computed separately
/// from the matches and the two are not reconciled.
#[must_use]
pub fn build_prompt(question: &str, matches: &[Match]) -> String {
    let excerpts = matches
        .iter()
        .enumerate()
        .map(|(i, m)| format!("— [{}] {}\n{}\n", i + 1, m.metadata.url, m.metadata.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
You are a virtual TA for the IITM "Tools in Data Science" course.
Use only the following excerpts (with their URLs) to answer the student's question.
If the answer is not contained here, say "{FALLBACK_PHRASE}"

Excerpts:
{excerpts}

Student question: """{question}"""
Answer concisely and include an array of "links" (each with url and a one-line description).
"#
    )
}
