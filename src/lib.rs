#![allow(clippy::module_inception)]

//! A comment-preserving parser for a lazily evaluated configuration
//! expression language.
//!
//! ```
//! let root = nixparse::parse("{ a ? true, b } @ args: args.a", Default::default()).unwrap();
//! assert_eq!(root.to_string(), "(args @ { a ? true, b }: args.a)");
//! ```

use std::sync::Arc;

use crate::{
    ast::ast::Root,
    errors::errors::{Error, ErrorTip},
    lexer::tokens::Token,
    parser::config::ParserOptions,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into the named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses one expression.
pub fn parse(source: &str, options: ParserOptions) -> Result<Root, Error> {
    let tokens = lexer::lexer::tokenize(source, Some(options.file.clone()))?;
    parse_tokens(tokens, options)
}

/// Parses an already tokenized stream. A missing `EOF` is supplied.
pub fn parse_tokens(tokens: Vec<Token>, options: ParserOptions) -> Result<Root, Error> {
    parser::parser::parse(tokens, options)
}

/// Returns the 1-based line number, the line's text and the column of the
/// byte offset `position`. Offsets past the end resolve to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;
    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last = (line_number, line.to_string(), line.trim_end_matches('\n').len());
        start = end;
        line_number += 1;
    }

    last
}

/// Renders an error against its source as a caret diagram.
pub fn display_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedToken (Unexpected `in`, expected `then`)
        -> default.nix
           |
        20 | if x in y
           | -----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
