use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    ast::ast::{Comment, CommentKind},
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the lexer and the length of the text the pattern matched.
pub type RegexHandler = fn(&mut Lexer, usize) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

const PATH_CHARS: &str = "[a-zA-Z0-9._+\\-]";

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^#[^\\r\\n]*").unwrap(), handler: line_comment_handler },
        RegexPattern { regex: Regex::new("^/\\*").unwrap(), handler: block_comment_handler },
        RegexPattern {
            regex: Regex::new(&format!(
                "^(<{c}+(/{c}+)*>|~?{c}*(/{c}+)+)",
                c = PATH_CHARS
            ))
            .unwrap(),
            handler: path_handler,
        },
        RegexPattern {
            regex: Regex::new("^([0-9]+\\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)").unwrap(),
            handler: float_handler,
        },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: int_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_'\\-]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^\\$\\{").unwrap(), handler: interp_start_handler },
        RegexPattern { regex: Regex::new("^''").unwrap(), handler: indented_string_start_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_start_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: open_curly_handler },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: close_curly_handler },
        RegexPattern { regex: Regex::new("^\\.\\.\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...") },
        RegexPattern { regex: Regex::new("^//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Update, "//") },
        RegexPattern { regex: Regex::new("^\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Concat, "++") },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Implies, "->") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
    ];
}

/// What the lexer is currently scanning. Braces are tracked so the `}` that
/// closes an interpolation can be told apart from one closing an attribute set.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Code,
    Brace,
    Interp,
    String { start: usize },
    IndentedString { start: usize },
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Arc<String>,
    modes: Vec<Mode>,
    /// Comments waiting to become leading trivia of the next token
    pending: Vec<Comment>,
    /// How many of `pending` are followed by a blank line
    detached: usize,
    /// Whether a line break was seen since the last token
    line_break: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Arc::new(file.unwrap_or_else(|| String::from("<input>")));

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
            modes: vec![Mode::Code],
            pending: vec![],
            detached: 0,
            line_break: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Arc::clone(&self.file))
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: Position(start as u32, Arc::clone(&self.file)),
            end: Position(end as u32, Arc::clone(&self.file)),
        }
    }

    /// Pushes a token, handing it every comment collected since the last one.
    pub fn push(&mut self, mut token: Token) {
        token.leading = std::mem::take(&mut self.pending);
        token.detached = std::mem::take(&mut self.detached);
        self.line_break = false;
        self.tokens.push(token);
    }

    /// Emits a token covering the next `len` bytes of source.
    pub fn emit(&mut self, kind: TokenKind, value: String, len: usize) {
        let raw = self.source[self.pos..self.pos + len].to_string();
        let span = self.span(self.pos, self.pos + len);
        self.push(MK_TOKEN!(kind, value, raw, span));
        self.advance_n(len);
    }

    fn comment(&mut self, comment: Comment, spans_lines: bool) {
        match self.tokens.last_mut() {
            Some(last) if !self.line_break => last.trailing.push(comment),
            _ => self.pending.push(comment),
        }

        if spans_lines {
            self.line_break = true;
        }
    }

    fn mode(&self) -> Mode {
        *self.modes.last().unwrap_or(&Mode::Code)
    }

    fn lex_code(&mut self) -> Result<(), Error> {
        for pattern in PATTERNS.iter() {
            let matched = pattern.regex.find(self.remainder()).map(|m| m.end());

            if let Some(len) = matched {
                return (pattern.handler)(self, len);
            }
        }

        let token = self.remainder().chars().next().map(String::from).unwrap_or_default();
        Err(Error::new(ErrorImpl::UnrecognisedToken { token }, self.position()))
    }

    /// Scans one literal run of a string, then the delimiter that ended it.
    fn lex_string(&mut self, indented: bool) -> Result<(), Error> {
        let start = self.pos;
        let mut value = String::new();
        let mut chars = self.source[self.pos..].char_indices().peekable();
        let mut end = None;

        while let Some((offset, ch)) = chars.next() {
            let rest = &self.source[start + offset..];

            if !indented && ch == '"' {
                end = Some((offset, TokenKind::StringEnd, 1));
                break;
            }

            if indented && rest.starts_with("''") {
                if rest.starts_with("'''") {
                    value.push_str("''");
                    chars.next();
                    chars.next();
                    continue;
                }
                if rest.starts_with("''$") {
                    value.push('$');
                    chars.next();
                    chars.next();
                    continue;
                }
                if rest.starts_with("''\\") {
                    chars.next();
                    chars.next();
                    if let Some((_, escaped)) = chars.next() {
                        value.push(unescape(escaped));
                    }
                    continue;
                }
                end = Some((offset, TokenKind::IndStringEnd, 2));
                break;
            }

            if rest.starts_with("${") {
                end = Some((offset, TokenKind::InterpStart, 2));
                break;
            }

            if rest.starts_with("$$") {
                value.push_str("$$");
                chars.next();
                continue;
            }

            if !indented && ch == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    value.push(unescape(escaped));
                }
                continue;
            }

            value.push(ch);
        }

        let Some((offset, kind, len)) = end else {
            let opened_at = match self.mode() {
                Mode::String { start } | Mode::IndentedString { start } => start,
                _ => start,
            };
            return Err(Error::new(
                ErrorImpl::UnterminatedString,
                Position(opened_at as u32, Arc::clone(&self.file)),
            ));
        };

        if offset > 0 {
            self.emit(TokenKind::StringFragment, value, offset);
        }

        match kind {
            TokenKind::InterpStart => {
                self.emit(kind, String::from("${"), len);
                self.modes.push(Mode::Interp);
            }
            _ => {
                let text = self.source[self.pos..self.pos + len].to_string();
                self.emit(kind, text, len);
                self.modes.pop();
            }
        }

        Ok(())
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

fn skip_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let newlines = lexer.remainder()[..len].matches('\n').count();

    if newlines > 0 {
        lexer.line_break = true;
    }
    if newlines > 1 && !lexer.pending.is_empty() {
        lexer.detached = lexer.pending.len();
    }

    lexer.advance_n(len);
    Ok(())
}

fn line_comment_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let value = lexer.remainder()[1..len].to_string();
    lexer.comment(Comment { value, kind: CommentKind::Line }, false);
    lexer.advance_n(len);
    Ok(())
}

fn block_comment_handler(lexer: &mut Lexer, _len: usize) -> Result<(), Error> {
    let Some(close) = lexer.remainder()[2..].find("*/") else {
        return Err(Error::new(ErrorImpl::UnterminatedComment, lexer.position()));
    };

    let value = lexer.remainder()[2..close + 2].to_string();
    let spans_lines = value.contains('\n');
    lexer.comment(Comment { value, kind: CommentKind::Block }, spans_lines);
    lexer.advance_n(close + 4);
    Ok(())
}

fn path_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let value = lexer.remainder()[..len].to_string();
    lexer.emit(TokenKind::Path, value, len);
    Ok(())
}

fn float_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let value = lexer.remainder()[..len].to_string();
    lexer.emit(TokenKind::Float, value, len);
    Ok(())
}

fn int_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let value = lexer.remainder()[..len].to_string();
    lexer.emit(TokenKind::Int, value, len);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let value = lexer.remainder()[..len].to_string();
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.emit(kind, value, len);
    Ok(())
}

fn interp_start_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    lexer.emit(TokenKind::InterpStart, String::from("${"), len);
    lexer.modes.push(Mode::Interp);
    Ok(())
}

fn string_start_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let start = lexer.pos;
    lexer.emit(TokenKind::StringStart, String::from("\""), len);
    lexer.modes.push(Mode::String { start });
    Ok(())
}

fn indented_string_start_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    let start = lexer.pos;
    lexer.emit(TokenKind::IndStringStart, String::from("''"), len);
    lexer.modes.push(Mode::IndentedString { start });
    Ok(())
}

fn open_curly_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    lexer.emit(TokenKind::OpenCurly, String::from("{"), len);
    lexer.modes.push(Mode::Brace);
    Ok(())
}

fn close_curly_handler(lexer: &mut Lexer, len: usize) -> Result<(), Error> {
    // An unbalanced `}` at the outermost level is left for the parser to reject.
    let kind = match lexer.mode() {
        Mode::Interp => TokenKind::InterpEnd,
        _ => TokenKind::CloseCurly,
    };

    if lexer.modes.len() > 1 {
        lexer.modes.pop();
    }

    lexer.emit(kind, String::from("}"), len);
    Ok(())
}

/// Splits source text into tokens, attaching comments as trivia.
///
/// The returned stream always ends with an `EOF` token, which carries any
/// comments after the last real token as its leading trivia.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.to_string(), file);

    while !lex.at_eof() {
        match lex.mode() {
            Mode::String { .. } => lex.lex_string(false)?,
            Mode::IndentedString { .. } => lex.lex_string(true)?,
            Mode::Code | Mode::Brace | Mode::Interp => lex.lex_code()?,
        }
    }

    if let Some(start) = lex.modes.iter().find_map(|mode| match mode {
        Mode::String { start } | Mode::IndentedString { start } => Some(*start),
        _ => None,
    }) {
        return Err(Error::new(
            ErrorImpl::UnterminatedString,
            Position(start as u32, Arc::clone(&lex.file)),
        ));
    }

    let end = lex.pos;
    let span = lex.span(end, end);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), String::new(), span));

    debug!("tokenized {} tokens from {}", lex.tokens.len(), lex.file);
    Ok(lex.tokens)
}
