//! Error types and error handling for the parser.
//!
//! This module defines the error types used throughout lexing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants, grouped into syntax, numeric literal and
//!   recursion limit categories
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
