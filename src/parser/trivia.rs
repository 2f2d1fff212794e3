//! Comment attachment.
//!
//! The lexer hands every comment to exactly one token, as leading or
//! trailing trivia. While the parser consumes tokens, `Trivia` moves those
//! comments onto syntax nodes. Each comment is moved out of its token once,
//! so no comment can be attached twice or lost.

use std::mem::take;

use crate::{
    ast::ast::Comment,
    lexer::tokens::{Token, TokenKind},
};

/// Tokens that can end a node. A comment on the same line after one of these
/// belongs to the node that just ended rather than to the next one.
pub fn keeps_trailing(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int
            | TokenKind::Float
            | TokenKind::Identifier
            | TokenKind::Path
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::StringEnd
            | TokenKind::IndStringEnd
            | TokenKind::InterpEnd
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
            | TokenKind::CloseParen
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Ellipsis
            | TokenKind::EOF
    )
}

/// Tokens that continue or close the expression before them. Comments on the
/// lines above one of these are attached after that expression.
pub fn is_follower(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Update
            | TokenKind::Concat
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Implies
            | TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::Question
            | TokenKind::OrDefault
            | TokenKind::Dot
            | TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::At
            | TokenKind::Then
            | TokenKind::Else
            | TokenKind::CloseParen
            | TokenKind::InterpEnd
    )
}

#[derive(Debug, Default)]
pub struct Trivia {
    /// Comments from consumed tokens that no node has claimed yet
    pending: Vec<Comment>,
    /// Same-line comments of the last consumed token, when it can end a node
    last_trailing: Vec<Comment>,
}

impl Trivia {
    /// Takes the comments of a token the parser just consumed.
    pub fn consume(&mut self, token: &mut Token) {
        self.pending.append(&mut self.last_trailing);
        self.pending.append(&mut token.leading);

        if keeps_trailing(token.kind) {
            self.last_trailing = take(&mut token.trailing);
        } else {
            self.pending.append(&mut token.trailing);
        }
    }

    /// Everything consumed but unclaimed, in source order.
    pub fn trailing(&mut self) -> Vec<Comment> {
        let mut comments = take(&mut self.pending);
        comments.append(&mut self.last_trailing);
        comments
    }

    /// Comments for a node that starts at `next`.
    pub fn before(&mut self, next: &mut Token) -> Vec<Comment> {
        let mut comments = self.trailing();
        comments.append(&mut next.leading);
        comments
    }

    /// Comments for a node that just ended, with `next` as the upcoming token.
    pub fn after(&mut self, next: &mut Token) -> Vec<Comment> {
        let mut comments = self.trailing();
        if is_follower(next.kind) {
            comments.append(&mut next.leading);
        }
        comments
    }

    /// The comments before the first token that a blank line separates from it.
    pub fn header(&mut self, first: &mut Token) -> Vec<Comment> {
        let count = first.detached.min(first.leading.len());
        first.leading.drain(..count).collect()
    }
}
