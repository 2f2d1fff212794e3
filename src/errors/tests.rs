//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use std::sync::Arc;

use crate::errors::errors::{Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;

fn position(offset: u32) -> Position {
    Position(offset, Arc::new("test.nix".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "&".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_categories() {
    let syntax = Error::new(
        ErrorImpl::NonAssociative {
            operator: "==".to_string(),
        },
        position(0),
    );
    let numeric = Error::new(
        ErrorImpl::NumericLiteral {
            token: "99999999999999999999".to_string(),
        },
        position(0),
    );
    let depth = Error::new(ErrorImpl::RecursionLimit { limit: 128 }, position(0));

    assert_eq!(syntax.category(), ErrorCategory::SyntaxError);
    assert_eq!(numeric.category(), ErrorCategory::NumericLiteralError);
    assert_eq!(depth.category(), ErrorCategory::RecursionLimitError);
}

#[test]
fn test_unexpected_token_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![TokenKind::Then, TokenKind::Else],
            found: TokenKind::In,
            token: "`in`".to_string(),
        },
        position(4),
    );

    assert_eq!(error.expected(), &[TokenKind::Then, TokenKind::Else]);
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected `in`, expected one of `then` or `else`"
    );
}

#[test]
fn test_expected_set_too_large_to_list() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: vec![
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Identifier,
                TokenKind::Path,
                TokenKind::OpenBracket,
                TokenKind::OpenCurly,
                TokenKind::OpenParen,
            ],
            found: TokenKind::EOF,
            token: "end of input".to_string(),
        },
        position(0),
    );

    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected end of input, expected an expression"
    );
}

#[test]
fn test_error_display() {
    let error = Error::new(ErrorImpl::RecursionLimit { limit: 8 }, position(12));

    assert_eq!(
        error.to_string(),
        "RecursionLimitError: recursion limit of 8 exceeded at test.nix:12"
    );
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + std::error::Error>() {}

    assert_send_sync::<Error>();
}
