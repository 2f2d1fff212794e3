use log::trace;

use crate::{
    ast::{
        ast::{Expr, Modifier, ModifierAction, SubExpr},
        expressions::{
            BinaryExpr, BinaryOperator, Conditional, FnCall, Import, Interp, List, Select,
            StringNode, StringPart, UnaryExpr, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    bindings::{parse_attr_path, parse_fn_expr},
    lookups::{BindingPower, ARGUMENT_START},
    parser::Parser,
};

/// Tokens that can begin an expression.
pub const EXPRESSION_START: [TokenKind; 20] = [
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
    TokenKind::OpenParen,
    TokenKind::Rec,
    TokenKind::Let,
    TokenKind::If,
    TokenKind::With,
    TokenKind::Assert,
    TokenKind::Import,
    TokenKind::Dash,
    TokenKind::Not,
];

/// Parses one expression. Every node it builds counts against
/// `max_depth`, including each link of an operator chain, so the depth of
/// the finished tree is bounded as well as the depth of the call stack.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<SubExpr, Error> {
    let depth = parser.depth();
    parser.descend()?;
    let result = parse_expr_at(parser, bp);
    parser.ascend_to(depth);
    result
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> Result<SubExpr, Error> {
    trace!("expression at {:?} from {}", bp, parser.current_token());

    // First parse NUD
    let before = parser.take_before();
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected(&EXPRESSION_START));
    };

    let mut left = nud(parser)?;
    let mut comments = before;
    comments.append(&mut left.comments.before);
    left.comments.before = comments;
    left.comments.after.append(&mut parser.take_after());

    // While the current token binds tighter than the caller, continue parsing lhs
    while parser.current_bp() > bp {
        let token_kind = parser.current_token_kind();
        let operator_bp = parser.current_bp();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected(&[]));
        };

        // The new node nests `left` one level deeper
        parser.descend()?;
        left = led(parser, left, operator_bp)?;
        left.comments.after.append(&mut parser.take_after());
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    let position = parser.get_position();

    let value = match parser.current_token_kind() {
        TokenKind::Int => {
            let token = parser.advance();
            match token.value.parse::<i64>() {
                Ok(value) => Expr::Int(value),
                Err(_) => {
                    return Err(Error::new(
                        ErrorImpl::NumericLiteral { token: token.raw },
                        position,
                    ))
                }
            }
        }
        TokenKind::Float => {
            let token = parser.advance();
            match token.value.parse::<f64>() {
                Ok(value) if value.is_finite() => Expr::Float(value),
                _ => {
                    return Err(Error::new(
                        ErrorImpl::NumericLiteral { token: token.raw },
                        position,
                    ))
                }
            }
        }
        TokenKind::True => {
            parser.advance();
            Expr::Bool(true)
        }
        TokenKind::False => {
            parser.advance();
            Expr::Bool(false)
        }
        TokenKind::Null => {
            parser.advance();
            Expr::Null
        }
        TokenKind::Path => Expr::Path(parser.advance().value),
        _ => return Err(parser.unexpected(&EXPRESSION_START)),
    };

    Ok(SubExpr::new(value))
}

/// A plain attribute path, or a function whose parameter is a name.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    match parser.peek_kind(1) {
        TokenKind::Colon | TokenKind::At => parse_fn_expr(parser),
        _ => Ok(SubExpr::new(Expr::Identifier(parse_attr_path(parser)?))),
    }
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    Ok(SubExpr::new(Expr::String(parse_string(parser)?)))
}

pub fn parse_string(parser: &mut Parser) -> Result<StringNode, Error> {
    let start = parser.expect_one_of(&[TokenKind::StringStart, TokenKind::IndStringStart])?;
    let multiline = start.kind == TokenKind::IndStringStart;
    let end = if multiline {
        TokenKind::IndStringEnd
    } else {
        TokenKind::StringEnd
    };

    let mut value = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::StringFragment => value.push(StringPart::Literal(parser.advance().value)),
            TokenKind::InterpStart => value.push(StringPart::Interp(parse_interp(parser)?)),
            kind if kind == end => {
                parser.advance();
                break;
            }
            _ => {
                return Err(parser.unexpected(&[
                    end,
                    TokenKind::StringFragment,
                    TokenKind::InterpStart,
                ]))
            }
        }
    }

    Ok(StringNode { multiline, value })
}

pub fn parse_interp(parser: &mut Parser) -> Result<Interp, Error> {
    parser.expect(TokenKind::InterpStart)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::InterpEnd)?;

    Ok(Interp { value })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.advance();

    let mut value = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseBracket => break,
            TokenKind::EOF => return Err(parser.unexpected(&[TokenKind::CloseBracket])),
            _ => value.push(parse_expr(parser, BindingPower::Application)?),
        }
    }

    let comments = parser.take_before();
    parser.advance();

    Ok(SubExpr::new(Expr::List(List { value, comments })))
}

pub fn parse_import_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::Application)?;

    Ok(SubExpr::new(Expr::Import(Import { value })))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    let operator_token = parser.advance();

    let (op, bp) = match operator_token.kind {
        TokenKind::Not => (UnaryOperator::Not, BindingPower::Not),
        _ => (UnaryOperator::Negate, BindingPower::Unary),
    };
    let value = parse_expr(parser, bp)?;

    Ok(SubExpr::new(Expr::Unary(UnaryExpr { op, value })))
}

pub fn parse_conditional_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.advance();

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let r#else = parse_expr(parser, BindingPower::Default)?;

    Ok(SubExpr::new(Expr::Conditional(Conditional {
        condition,
        then,
        r#else,
    })))
}

/// `with e; body` and `assert e; body`. The modifier is recorded on the
/// body rather than producing a node of its own.
pub fn parse_modifier_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    let action = match parser.advance().kind {
        TokenKind::Assert => ModifierAction::Assert,
        _ => ModifierAction::With,
    };

    let mut value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    value.comments.after.append(&mut parser.take_trailing());

    let mut body = parse_expr(parser, BindingPower::Default)?;
    body.modifiers.insert(0, Modifier { action, value });

    Ok(body)
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let op = match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Dash => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Or => BinaryOperator::Or,
        TokenKind::Implies => BinaryOperator::Implies,
        TokenKind::Update => BinaryOperator::Update,
        TokenKind::Concat => BinaryOperator::Concat,
        TokenKind::OrDefault => BinaryOperator::Fallback,
        TokenKind::Equals => BinaryOperator::EqEq,
        TokenKind::NotEquals => BinaryOperator::NotEq,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEquals => BinaryOperator::LessEq,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEquals => BinaryOperator::GreaterEq,
        _ => return None,
    };

    Some(op)
}

/// `*` groups to the right, `/` to the left: `2 * 3 * 4` is `(2 * (3 * 4))`
/// while `8 / 4 / 2` is `((8 / 4) / 2)`.
fn is_right_associative(op: BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Implies
            | BinaryOperator::Update
            | BinaryOperator::Concat
            | BinaryOperator::Mul
    )
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: SubExpr,
    bp: BindingPower,
) -> Result<SubExpr, Error> {
    let Some(op) = binary_operator(parser.current_token_kind()) else {
        return Err(parser.unexpected(&[]));
    };
    parser.advance();

    let right_bp = if is_right_associative(op) {
        bp.lower()
    } else {
        bp
    };
    let right = parse_expr(parser, right_bp)?;

    if bp.is_non_associative() && parser.current_bp() == bp {
        return Err(Error::new(
            ErrorImpl::NonAssociative {
                operator: parser.current_token().raw.clone(),
            },
            parser.get_position(),
        ));
    }

    Ok(SubExpr::new(Expr::Binary(BinaryExpr { left, op, right })))
}

/// `e ? a.b`, whose right side is an attribute path rather than an expression.
pub fn parse_has_attr_expr(
    parser: &mut Parser,
    left: SubExpr,
    _bp: BindingPower,
) -> Result<SubExpr, Error> {
    parser.advance();
    let path = parse_attr_path(parser)?;

    Ok(SubExpr::new(Expr::Binary(BinaryExpr {
        left,
        op: BinaryOperator::HasAttr,
        right: SubExpr::new(Expr::Identifier(path)),
    })))
}

pub fn parse_select_expr(
    parser: &mut Parser,
    left: SubExpr,
    _bp: BindingPower,
) -> Result<SubExpr, Error> {
    parser.advance();
    let path = parse_attr_path(parser)?;

    Ok(SubExpr::new(Expr::Select(Select { value: left, path })))
}

/// Application by juxtaposition: `f a b` collects every argument into one call.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: SubExpr,
    _bp: BindingPower,
) -> Result<SubExpr, Error> {
    let mut value = vec![];

    while parser.current_token().is_one_of_many(&ARGUMENT_START) {
        value.push(parse_expr(parser, BindingPower::Application)?);
    }

    Ok(SubExpr::new(Expr::FnCall(FnCall { name: left, value })))
}
