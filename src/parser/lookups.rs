use std::collections::HashMap;

use crate::{ast::ast::SubExpr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    bindings::{parse_curly_expr, parse_let_in_expr, parse_rec_attrs_expr},
    config::FallbackPrecedence,
    expr::{
        parse_binary_expr, parse_call_expr, parse_conditional_expr, parse_grouping_expr,
        parse_has_attr_expr, parse_identifier_expr, parse_import_expr, parse_list_expr,
        parse_modifier_expr, parse_prefix_expr, parse_primary_expr, parse_select_expr,
        parse_string_expr,
    },
    parser::Parser,
};

/// Precedence ladder, loosest first. An operator continues the expression
/// on its left only while its binding power is greater than the caller's.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Fallback,
    Implication,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Update,
    Not,
    Additive,
    Multiplicative,
    Concat,
    HasAttr,
    Application,
    Unary,
    Select,
    Primary,
}

impl BindingPower {
    /// The next looser level, used to parse the right operand of a
    /// right-associative operator.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Default | BindingPower::Fallback => BindingPower::Default,
            BindingPower::Implication => BindingPower::Fallback,
            BindingPower::LogicalOr => BindingPower::Implication,
            BindingPower::LogicalAnd => BindingPower::LogicalOr,
            BindingPower::Equality => BindingPower::LogicalAnd,
            BindingPower::Relational => BindingPower::Equality,
            BindingPower::Update => BindingPower::Relational,
            BindingPower::Not => BindingPower::Update,
            BindingPower::Additive => BindingPower::Not,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Concat => BindingPower::Multiplicative,
            BindingPower::HasAttr => BindingPower::Concat,
            BindingPower::Application => BindingPower::HasAttr,
            BindingPower::Unary => BindingPower::Application,
            BindingPower::Select => BindingPower::Unary,
            BindingPower::Primary => BindingPower::Select,
        }
    }

    pub fn is_non_associative(self) -> bool {
        matches!(self, BindingPower::Equality | BindingPower::Relational)
    }
}

pub type NUDHandler = fn(&mut Parser) -> Result<SubExpr, Error>;
pub type LEDHandler = fn(&mut Parser, SubExpr, BindingPower) -> Result<SubExpr, Error>;

/// Tokens that can begin an argument of a function application.
pub const ARGUMENT_START: [TokenKind; 13] = [
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::Path,
    TokenKind::Identifier,
    TokenKind::StringStart,
    TokenKind::IndStringStart,
    TokenKind::OpenBracket,
    TokenKind::OpenCurly,
    TokenKind::Rec,
    TokenKind::OpenParen,
];

pub fn create_token_lookups(parser: &mut Parser) {
    // Fallback
    let fallback_bp = match parser.options().fallback {
        FallbackPrecedence::Lowest => BindingPower::Fallback,
        FallbackPrecedence::Select => BindingPower::Select,
    };
    parser.led(TokenKind::OrDefault, fallback_bp, parse_binary_expr);

    // Logical
    parser.led(TokenKind::Implies, BindingPower::Implication, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    parser.led(TokenKind::Update, BindingPower::Update, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::Concat, BindingPower::Concat, parse_binary_expr);
    parser.led(TokenKind::Question, BindingPower::HasAttr, parse_has_attr_expr);

    // Application by juxtaposition
    for kind in ARGUMENT_START {
        parser.led(kind, BindingPower::Application, parse_call_expr);
    }

    parser.led(TokenKind::Dot, BindingPower::Select, parse_select_expr);

    // Literals and primaries
    parser.nud(TokenKind::Int, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Null, parse_primary_expr);
    parser.nud(TokenKind::Path, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::StringStart, parse_string_expr);
    parser.nud(TokenKind::IndStringStart, parse_string_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::Import, parse_import_expr);

    // Prefix operators
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);

    // Binding structures
    parser.nud(TokenKind::OpenCurly, parse_curly_expr);
    parser.nud(TokenKind::Rec, parse_rec_attrs_expr);
    parser.nud(TokenKind::Let, parse_let_in_expr);
    parser.nud(TokenKind::If, parse_conditional_expr);
    parser.nud(TokenKind::With, parse_modifier_expr);
    parser.nud(TokenKind::Assert, parse_modifier_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
