//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens into
//! a `Root`. It uses a Pratt parser for expressions with operator
//! precedence and handles:
//!
//! - Literals, strings with interpolation, lists and attribute sets
//! - `let`, `if`, `with`/`assert`, functions and application
//! - Attaching every comment to exactly one node
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod bindings;
pub mod config;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod trivia;

#[cfg(test)]
mod tests;
