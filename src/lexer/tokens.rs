use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{ast::ast::Comment, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("in", TokenKind::In);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("inherit", TokenKind::Inherit);
        map.insert("rec", TokenKind::Rec);
        map.insert("with", TokenKind::With);
        map.insert("assert", TokenKind::Assert);
        map.insert("import", TokenKind::Import);
        map.insert("or", TokenKind::OrDefault);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Int,
    Float,
    Identifier,
    Path,

    StringStart,    // "
    StringEnd,      // "
    IndStringStart, // ''
    IndStringEnd,   // ''
    StringFragment,
    InterpStart, // ${
    InterpEnd,   // } closing an interpolation

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,      // ||
    And,     // &&
    Implies, // ->

    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    Question,
    Comma,
    At,

    Plus,
    Dash,
    Slash,
    Star,
    Update, // //
    Concat, // ++

    // Reserved
    Let,
    In,
    If,
    Then,
    Else,
    Inherit,
    Rec,
    With,
    Assert,
    Import,
    OrDefault, // or
    True,
    False,
    Null,
}

impl TokenKind {
    /// Source spelling used in diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Identifier => "identifier",
            TokenKind::Path => "path",
            TokenKind::StringStart | TokenKind::StringEnd => "\"",
            TokenKind::IndStringStart | TokenKind::IndStringEnd => "''",
            TokenKind::StringFragment => "string text",
            TokenKind::InterpStart => "${",
            TokenKind::InterpEnd => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Implies => "->",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Comma => ",",
            TokenKind::At => "@",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Update => "//",
            TokenKind::Concat => "++",
            TokenKind::Let => "let",
            TokenKind::In => "in",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::Inherit => "inherit",
            TokenKind::Rec => "rec",
            TokenKind::With => "with",
            TokenKind::Assert => "assert",
            TokenKind::Import => "import",
            TokenKind::OrDefault => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.symbol())
    }
}

/// A lexical token together with the comments lexically adjacent to it.
///
/// `value` is the decoded literal (escape sequences resolved for string
/// fragments), `raw` the exact source text. Comments that start on the same
/// line as the token are `trailing`; comments on the lines before it are
/// `leading`. The first `detached` leading comments are separated from the
/// token by a blank line.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub raw: String,
    pub span: Span,
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
    pub detached: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of input"),
            _ => write!(f, "`{}`", self.raw),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
