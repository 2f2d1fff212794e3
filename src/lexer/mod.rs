//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, paths, literals, and operators
//! - String and indented-string scanning with `${}` interpolation
//! - Comment trivia, attached to the tokens they sit next to
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
