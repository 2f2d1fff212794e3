//! Configure the parser.
//!
//! `ParserOptions` holds the knobs that are not fixed by the grammar itself:
//! the nesting limit that protects the call stack, where the `or` fallback
//! operator binds, and the file name reported in positions.
//!
//! ```
//! # use nixparse::parser::config::*;
//! let opts = ParserOptions {
//!     max_depth: 32,
//!     fallback: FallbackPrecedence::Select,
//!     ..Default::default()
//! };
//! assert_eq!(opts.file, "<input>");
//! ```

/// Where the `or` fallback operator sits in the precedence ladder.
///
/// List elements and call arguments are parsed at application level, so
/// under `Lowest` an `or` there must be parenthesized: `[ (a.b or c) ]`.
/// `[ a.b or c ]` is a syntax error unless `Select` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPrecedence {
    /// Loosest binary operator: `a.b or c + 1` is `(a.b or (c + 1))`
    Lowest,
    /// Binds to the attribute path, tighter than application:
    /// `f a.b or c` is `(f (a.b or c))`
    Select,
}

#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum depth of the tree before the parse fails.
    ///
    /// Every nested expression counts one level, and so does every link of
    /// an operator chain such as `a + b + c` or `a ++ b ++ c`. Each `else if`
    /// branch nests too. With the default of 128, a flat chain of more than
    /// about 120 operands needs a larger limit.
    pub max_depth: usize,
    /// Binding of the `or` operator
    pub fallback: FallbackPrecedence,
    /// Name used in error positions
    pub file: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            fallback: FallbackPrecedence::Lowest,
            file: String::from("<input>"),
        }
    }
}
