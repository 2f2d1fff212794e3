use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// Broad failure classes. Every one of them aborts the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    SyntaxError,
    NumericLiteralError,
    RecursionLimitError,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NonAssociative { .. } => ErrorCategory::SyntaxError,
            ErrorImpl::NumericLiteral { .. } => ErrorCategory::NumericLiteralError,
            ErrorImpl::RecursionLimit { .. } => ErrorCategory::RecursionLimitError,
        }
    }

    /// The token kinds that would have been accepted, for syntax errors.
    pub fn expected(&self) -> &[TokenKind] {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NonAssociative { .. } => "NonAssociative",
            ErrorImpl::NumericLiteral { .. } => "NumericLiteral",
            ErrorImpl::RecursionLimit { .. } => "RecursionLimit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String is never closed, is a quote or `''` missing?",
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::UnexpectedToken {
                expected, token, ..
            } => ErrorTip::Suggestion(format!(
                "Unexpected {}, expected {}",
                token,
                describe_expected(expected)
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected {}, {}", token, message))
            }
            ErrorImpl::NonAssociative { operator } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be chained, add parentheses",
                operator
            )),
            ErrorImpl::NumericLiteral { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::RecursionLimit { limit } => ErrorTip::Suggestion(format!(
                "Expression nests deeper than {} levels",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at {}:{}",
            self.category(),
            self.internal_error,
            self.position.1,
            self.position.0
        )
    }
}

impl std::error::Error for Error {}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => String::from("an expression"),
        kinds if kinds.len() > 6 => String::from("an expression"),
        [only] => only.to_string(),
        [rest @ .., last] => format!(
            "one of {} or {}",
            rest.iter()
                .map(|kind| kind.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            last
        ),
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unexpected token {token}, expected {}", describe_expected(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        token: String,
    },
    #[error("unexpected token ({message}): {token}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("non-associative operator `{operator}` used in a chain")]
    NonAssociative { operator: String },
    #[error("numeric literal out of range or malformed: {token:?}")]
    NumericLiteral { token: String },
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },
}
