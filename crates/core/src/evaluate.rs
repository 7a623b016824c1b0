//! Numeric answer parsing and tolerance-based grading.

use thiserror::Error;

use crate::model::QuizQuestion;

/// Rejection reasons for a submitted answer. These never mutate session
/// state; the user is simply re-prompted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseAnswerError {
    #[error("answer is not a number")]
    NotNumeric,

    #[error("fraction denominator is zero")]
    ZeroDenominator,
}

/// Parse a raw submission as a decimal number or an `a/b` fraction.
///
/// Decimals accept scientific notation (`1.4e2`). Fractions reject a zero
/// denominator, and non-finite values are never accepted.
///
/// # Errors
///
/// Returns `ParseAnswerError` when the input parses as neither form.
pub fn parse_answer(input: &str) -> Result<f64, ParseAnswerError> {
    let trimmed = input.trim();
    if let Some((numerator, denominator)) = trimmed.split_once('/') {
        let numerator = parse_decimal(numerator)?;
        let denominator = parse_decimal(denominator)?;
        if denominator == 0.0 {
            return Err(ParseAnswerError::ZeroDenominator);
        }
        return Ok(numerator / denominator);
    }
    parse_decimal(trimmed)
}

fn parse_decimal(raw: &str) -> Result<f64, ParseAnswerError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ParseAnswerError::NotNumeric)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseAnswerError::NotNumeric)
    }
}

/// A parsed submission graded against a question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub submitted: f64,
    pub correct: bool,
}

/// Grade a raw submission against a question's answer and tolerance.
///
/// # Errors
///
/// Returns `ParseAnswerError` when the input cannot be parsed; the caller
/// must not advance any session state in that case.
pub fn evaluate(input: &str, question: &QuizQuestion) -> Result<Evaluation, ParseAnswerError> {
    let submitted = parse_answer(input)?;
    Ok(Evaluation {
        submitted,
        correct: within_tolerance(submitted, question.answer, question.tolerance),
    })
}

/// The boundary is inclusive: a deviation exactly equal to the tolerance is
/// still correct.
#[must_use]
pub fn within_tolerance(submitted: f64, answer: f64, tolerance: f64) -> bool {
    (submitted - answer).abs() <= tolerance
}
