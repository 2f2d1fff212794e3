//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the parsing entry point.
//! Expressions are parsed Pratt style with NUD/LED handlers; the handlers
//! themselves live in `expr` and `bindings`.
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for expressions that start at a token
//! - LED (left denotation) handlers for operators and application
//! - Binding powers for operator precedence

use std::{collections::HashMap, sync::Arc};

use log::{debug, trace};

use crate::{
    ast::ast::{Comment, Root},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    config::ParserOptions,
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    },
    trivia::Trivia,
};

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the lookup tables, the comments that still have
/// to be attached and the current nesting depth.
pub struct Parser {
    /// The list of tokens to parse, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source being parsed
    file: Arc<String>,
    options: ParserOptions,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    trivia: Trivia,
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended when the stream does not already end in one.
    pub fn new(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        let file = Arc::new(options.file.clone());

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Arc::clone(&file)));
            let span = Span {
                start: end.clone(),
                end,
            };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), String::new(), span));
        }

        Parser {
            tokens,
            pos: 0,
            file,
            options,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            trivia: Trivia::default(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Looks `offset` tokens ahead. Lookahead past the end yields `EOF`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the consumed one. The
    /// consumed token's comments move into the trivia buffer. The cursor
    /// never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let index = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }

        let token = &mut self.tokens[index];
        self.trivia.consume(token);
        token.clone()
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a syntax
    /// error naming `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_one_of(&[expected_kind])
    }

    pub fn expect_one_of(&mut self, expected: &[TokenKind]) -> Result<Token, Error> {
        if self.current_token().is_one_of_many(expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Expects a token of the specified kind, failing with `message`.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected_detailed(message))
        }
    }

    /// A syntax error at the current token.
    pub fn unexpected(&self, expected: &[TokenKind]) -> Error {
        let token = self.current_token();

        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.to_vec(),
                found: token.kind,
                token: token.to_string(),
            },
            self.get_position(),
        )
    }

    pub fn unexpected_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().to_string(),
                message: message.to_string(),
            },
            self.get_position(),
        )
    }

    /// Enters one level of expression nesting.
    pub fn descend(&mut self) -> Result<(), Error> {
        self.depth += 1;

        if self.depth > self.options.max_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimit {
                    limit: self.options.max_depth,
                },
                self.get_position(),
            ));
        }

        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Leaves every level entered since `depth` was read.
    pub fn ascend_to(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Comments for a node starting at the current token.
    pub fn take_before(&mut self) -> Vec<Comment> {
        let token = &mut self.tokens[self.pos];
        self.trivia.before(token)
    }

    /// Comments for the node that just ended.
    pub fn take_after(&mut self) -> Vec<Comment> {
        let token = &mut self.tokens[self.pos];
        self.trivia.after(token)
    }

    /// Comments on consumed tokens that no node has claimed yet.
    pub fn take_trailing(&mut self) -> Vec<Comment> {
        self.trivia.trailing()
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of the current token, `Default` when it is no operator.
    pub fn current_bp(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Does not touch the binding power table: a token such as `-` is both a
    /// prefix and an infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        let mut position = self.current_token().span.start.clone();
        if position.1.is_empty() {
            position.1 = Arc::clone(&self.file);
        }
        position
    }
}

/// Parses a stream of tokens into a document.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables and parses exactly one expression, which
/// must be followed by the end of input.
pub fn parse(tokens: Vec<Token>, options: ParserOptions) -> Result<Root, Error> {
    let mut parser = Parser::new(tokens, options);
    create_token_lookups(&mut parser);

    trace!("parsing {} tokens from {}", parser.tokens.len(), parser.file);

    let first = &mut parser.tokens[0];
    let before = parser.trivia.header(first);

    let value = parse_expr(&mut parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.unexpected(&[TokenKind::EOF]));
    }

    let after = parser.take_before();

    debug!(
        "parsed {} with {} header and {} footer comments",
        parser.file,
        before.len(),
        after.len()
    );

    Ok(Root {
        value,
        before,
        after,
    })
}
