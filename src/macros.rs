//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance with empty comment trivia
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// Comment trivia starts out empty; the lexer fills it in when the token is
/// pushed onto the stream.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The decoded value
/// * `$raw` - The exact source text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $raw:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            raw: $raw,
            span: $span,
            leading: Vec::new(),
            trailing: Vec::new(),
            detached: 0,
        }
    };
}

/// Creates a default lexer handler for fixed-text tokens.
///
/// The generated handler emits a token of the given kind whose value is the
/// literal text, and advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Concat, "++"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _len: usize| -> Result<(), Error> {
            lexer.emit($kind, String::from($value), $value.len());
            Ok(())
        }
    };
}
