//! Binding structures: attribute sets, `let` blocks, attribute paths and
//! function parameters.

use log::debug;

use crate::{
    ast::{
        ast::{Comment, Comments, Expr, SubExpr},
        bindings::{Attr, Attrs, FnParam, FnParams, Function, LetIn},
        expressions::{Identifier, IdentifierPart},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_interp, parse_string},
    lookups::BindingPower,
    parser::Parser,
};

const ATTR_START: [TokenKind; 4] = [
    TokenKind::Identifier,
    TokenKind::Inherit,
    TokenKind::InterpStart,
    TokenKind::StringStart,
];

// ATTRIBUTE PATHS

/// One segment of an attribute path: a name, `${e}` or a quoted string.
fn parse_attr_part(parser: &mut Parser) -> Result<IdentifierPart, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier | TokenKind::OrDefault => {
            Ok(IdentifierPart::Name(parser.advance().value))
        }
        TokenKind::InterpStart => Ok(IdentifierPart::Interp(parse_interp(parser)?)),
        TokenKind::StringStart => Ok(IdentifierPart::String(parse_string(parser)?)),
        _ => Err(parser.unexpected(&[
            TokenKind::Identifier,
            TokenKind::InterpStart,
            TokenKind::StringStart,
        ])),
    }
}

/// Parses `a.b."c".${d}`.
pub fn parse_attr_path(parser: &mut Parser) -> Result<Identifier, Error> {
    let mut value = vec![parse_attr_part(parser)?];

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        value.push(parse_attr_part(parser)?);
    }

    Ok(Identifier { value })
}

// ATTRIBUTE SETS AND LET

fn parse_binding(parser: &mut Parser, comments: Vec<Comment>) -> Result<Attr, Error> {
    let name = parse_attr_path(parser)?;
    parser.expect(TokenKind::Assignment)?;
    let mut value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    value.comments.after.append(&mut parser.take_trailing());

    Ok(Attr::Binding {
        name,
        value,
        comments,
    })
}

fn parse_inherit(parser: &mut Parser, mut comments: Vec<Comment>) -> Result<Attr, Error> {
    parser.expect(TokenKind::Inherit)?;

    let from = match parser.current_token_kind() {
        TokenKind::OpenParen => {
            parser.advance();
            let from = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseParen)?;
            Some(from)
        }
        _ => None,
    };

    // At least one name
    let mut value = vec![Identifier {
        value: vec![parse_attr_part(parser)?],
    }];
    while parser.current_token_kind() != TokenKind::Semicolon {
        value.push(Identifier {
            value: vec![parse_attr_part(parser)?],
        });
    }
    parser.advance();
    comments.append(&mut parser.take_trailing());

    Ok(Attr::Inherit {
        from,
        value,
        comments,
    })
}

/// Entries up to `close`, which is left unconsumed. Returns the entries and
/// the comments in front of `close`.
fn parse_attrs_body(
    parser: &mut Parser,
    close: TokenKind,
) -> Result<(Vec<Attr>, Vec<Comment>), Error> {
    let mut value = vec![];

    loop {
        let kind = parser.current_token_kind();

        if kind == close {
            break;
        }
        if !ATTR_START.contains(&kind) {
            let mut expected = vec![close];
            expected.extend(ATTR_START);
            return Err(parser.unexpected(&expected));
        }

        let comments = parser.take_before();
        let attr = match kind {
            TokenKind::Inherit => parse_inherit(parser, comments)?,
            _ => parse_binding(parser, comments)?,
        };
        value.push(attr);
    }

    let comments = parser.take_before();
    Ok((value, comments))
}

fn parse_attrs(parser: &mut Parser, recursive: bool) -> Result<SubExpr, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let (value, comments) = parse_attrs_body(parser, TokenKind::CloseCurly)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(SubExpr::new(Expr::Attrs(Attrs {
        recursive,
        value,
        comments,
    })))
}

pub fn parse_rec_attrs_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.expect(TokenKind::Rec)?;
    parse_attrs(parser, true)
}

/// `{` opens either an attribute set or a destructured parameter list.
pub fn parse_curly_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    if is_fn_params_start(parser) {
        parse_fn_expr(parser)
    } else {
        parse_attrs(parser, false)
    }
}

pub fn parse_let_in_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    parser.expect(TokenKind::Let)?;

    if parser.current_token_kind() == TokenKind::OpenCurly {
        return Err(parser.unexpected_detailed("legacy `let { ... }` blocks are not supported"));
    }

    let (bindings, comments) = parse_attrs_body(parser, TokenKind::In)?;
    parser.expect(TokenKind::In)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(SubExpr::new(Expr::LetIn(LetIn {
        bindings,
        body,
        comments,
    })))
}

// FUNCTIONS

/// Decides, from the tokens after `{`, whether the braces hold parameters.
fn is_fn_params_start(parser: &Parser) -> bool {
    let follows_params = |kind: TokenKind| matches!(kind, TokenKind::Colon | TokenKind::At);

    match parser.peek_kind(1) {
        TokenKind::Ellipsis => true,
        TokenKind::CloseCurly => follows_params(parser.peek_kind(2)),
        TokenKind::Identifier => match parser.peek_kind(2) {
            TokenKind::Comma | TokenKind::Question => true,
            TokenKind::CloseCurly => follows_params(parser.peek_kind(3)),
            _ => false,
        },
        _ => false,
    }
}

fn parse_fn_param(parser: &mut Parser) -> Result<FnParam, Error> {
    let before = parser.take_before();
    let name = Identifier::name(&parser.expect(TokenKind::Identifier)?.value);

    let default = match parser.current_token_kind() {
        TokenKind::Question => {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        }
        _ => None,
    };

    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
    } else if parser.current_token_kind() != TokenKind::CloseCurly {
        return Err(parser.unexpected(&[TokenKind::Comma, TokenKind::CloseCurly]));
    }

    Ok(FnParam {
        name,
        default,
        comments: Comments {
            before,
            after: parser.take_trailing(),
        },
    })
}

fn parse_destructured(parser: &mut Parser, alias: Option<Identifier>) -> Result<FnParams, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut value = vec![];
    let mut extra = false;

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::Ellipsis => {
                parser.advance();
                extra = true;
                break;
            }
            TokenKind::Identifier => value.push(parse_fn_param(parser)?),
            _ => {
                return Err(parser.unexpected(&[
                    TokenKind::Identifier,
                    TokenKind::Ellipsis,
                    TokenKind::CloseCurly,
                ]))
            }
        }
    }

    let comments = parser.take_before();
    parser.expect(TokenKind::CloseCurly)?;

    Ok(FnParams::Destructured {
        value,
        extra,
        alias,
        comments,
    })
}

/// Parses `x: body`, `{ ... }: body`, `x @ { ... }: body` and
/// `{ ... } @ x: body`. Both alias forms produce the same parameters.
pub fn parse_fn_expr(parser: &mut Parser) -> Result<SubExpr, Error> {
    let args = match parser.current_token_kind() {
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::Colon => FnParams::Identifier {
            name: Identifier::name(&parser.advance().value),
        },
        TokenKind::Identifier => {
            let alias = Identifier::name(&parser.advance().value);
            parser.expect(TokenKind::At)?;
            parse_destructured(parser, Some(alias))?
        }
        _ => parse_destructured(parser, None)?,
    };

    let args = match args {
        FnParams::Destructured {
            value,
            extra,
            alias,
            comments,
        } if parser.current_token_kind() == TokenKind::At => {
            if alias.is_some() {
                return Err(parser.unexpected_detailed("a parameter list takes only one alias"));
            }
            parser.advance();
            let name = parser.expect_error(
                TokenKind::Identifier,
                "expected a name for the parameter list after `@`",
            )?;

            FnParams::Destructured {
                value,
                extra,
                alias: Some(Identifier::name(&name.value)),
                comments,
            }
        }
        args => args,
    };

    parser.expect(TokenKind::Colon)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    debug!("parsed function taking {}", args);
    Ok(SubExpr::new(Expr::Fn(Function { args, body })))
}
