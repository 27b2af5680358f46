//! Question/answer extraction from generated text.
//!
//! The model is prompted for a fixed number of question/answer pairs; the
//! response is a freeform line-oriented list that a single forward scan
//! pairs up, skipping blank separator lines.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generation::{GenerationParams, TextGenerator};

/// Number of pairs requested from the model. The parser never returns more.
pub const QUESTION_COUNT: usize = 20;

/// A question and its answer, in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    /// The response ended after a question line with no answer line left.
    #[error("response truncated: question {index} ({question:?}) has no answer line")]
    TruncatedResponse { index: usize, question: String },
}

fn build_prompt(text: &str) -> String {
    format!(
        "TEXT:\n{text}\n\n\
         Give me at least {QUESTION_COUNT} specific questions and answers \
         that can be answered from the above text.\n\
         Questions: Answers:"
    )
}

/// Ask the model for question/answer pairs extracted from `text`.
///
/// Remote failures propagate unchanged. A short or malformed response does
/// not fail here; it simply yields fewer pairs, down to none, unless it ends
/// in the middle of a pair, which is a [`PairingError`].
pub async fn extract_questions(
    generator: &impl TextGenerator,
    text: &str,
    params: &GenerationParams,
) -> Result<Vec<QaPair>> {
    let prompt = build_prompt(text);
    let response = generator.generate(&prompt, params).await?;
    let lines: Vec<&str> = response.lines().collect();
    tracing::debug!(?lines, "Pairing generated lines");
    Ok(pair_question_answers(&lines)?)
}

/// Pair up alternating question/answer lines.
///
/// Single forward pass, no backtracking. A blank line in question position
/// is a separator: it is skipped without consuming an answer slot. The line
/// after a non-empty question is recorded as the answer even when blank, and
/// one blank line after a pair is skipped. Stops at [`QUESTION_COUNT`] pairs
/// or when the input runs out before the next question.
pub fn pair_question_answers<S: AsRef<str>>(lines: &[S]) -> Result<Vec<QaPair>, PairingError> {
    let mut pairs = Vec::new();
    let mut cursor = 0;
    while pairs.len() < QUESTION_COUNT && cursor < lines.len() {
        let question = lines[cursor].as_ref();
        cursor += 1;
        if question.is_empty() {
            continue;
        }
        let answer = match lines.get(cursor) {
            Some(line) => line.as_ref(),
            None => {
                return Err(PairingError::TruncatedResponse {
                    index: pairs.len(),
                    question: question.to_string(),
                });
            }
        };
        cursor += 1;
        pairs.push(QaPair {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        if cursor >= lines.len() {
            break;
        }
        if lines[cursor].as_ref().is_empty() {
            cursor += 1;
        }
    }
    Ok(pairs)
}
