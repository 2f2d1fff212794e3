//! Rendering of the AST back to source text.
//!
//! Every compound expression is parenthesized so precedence is visible:
//! `1 + 2 * 3` renders as `(1 + (2 * 3))`. Comments are placed so that
//! parsing the output attaches each one to the node it came from: `before`
//! comments start on a line of their own, `after` comments start on the line
//! of the node's last token.

use std::fmt::{self, Display, Formatter};

use super::{
    ast::{Comment, CommentKind, Expr, Modifier, Root, SubExpr},
    bindings::{Attr, Attrs, FnParam, FnParams},
    expressions::{
        BinaryOperator, Identifier, IdentifierPart, Interp, StringNode, StringPart, UnaryOperator,
    },
};

/// Comments on lines of their own, ahead of the next token.
fn write_own_lines(f: &mut Formatter<'_>, comments: &[Comment]) -> fmt::Result {
    if comments.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    for comment in comments {
        writeln!(f, "{}", comment)?;
    }
    Ok(())
}

/// Comments after a node, starting on the line of its last token.
fn write_after(f: &mut Formatter<'_>, comments: &[Comment]) -> fmt::Result {
    for comment in comments {
        match comment.kind {
            CommentKind::Line => writeln!(f, " {}", comment)?,
            CommentKind::Block => write!(f, " {}", comment)?,
        }
    }
    Ok(())
}

/// Whether a comment after a node starts below the node's last line. Those
/// comments only reattach when a closing token follows them.
fn runs_past_line(comments: &[Comment]) -> bool {
    comments
        .iter()
        .rev()
        .skip(1)
        .any(|comment| comment.kind == CommentKind::Line || comment.value.contains('\n'))
}

fn is_unary(sub: &SubExpr, op: UnaryOperator) -> bool {
    sub.modifiers.is_empty() && matches!(sub.expr(), Expr::Unary(unary) if unary.op == op)
}

fn write_grouped(f: &mut Formatter<'_>, sub: &SubExpr, grouped: bool) -> fmt::Result {
    if grouped {
        write!(f, "({})", sub)
    } else {
        write!(f, "{}", sub)
    }
}

/// The modifiers and value of `sub` without its comments. The output ends in
/// a token that belongs to `sub` itself, so comments after it stay with `sub`.
fn write_value(f: &mut Formatter<'_>, sub: &SubExpr) -> fmt::Result {
    if !sub.modifiers.is_empty() {
        write!(f, "(")?;
        for modifier in &sub.modifiers {
            write!(f, "{} ", modifier)?;
        }
        return write!(f, "{})", sub.value);
    }

    match sub.expr() {
        // `-x #c` hands the comment to `x`
        Expr::Unary(_) if !sub.comments.after.is_empty() => write!(f, "({})", sub.value),
        // `(v).a` starts with the parenthesis of `v`
        Expr::Select(_) if !sub.comments.before.is_empty() => write!(f, "({})", sub.value),
        _ => write!(f, "{}", sub.value),
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            CommentKind::Line => write!(f, "#{}", self.value),
            CommentKind::Block => write!(f, "/*{}*/", self.value),
        }
    }
}

impl Display for Root {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // A blank line keeps the header apart from the expression
        for comment in &self.before {
            writeln!(f, "{}", comment)?;
        }
        if !self.before.is_empty() {
            writeln!(f)?;
        }

        write!(f, "{}", self.value)?;
        write_own_lines(f, &self.after)
    }
}

impl Display for SubExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_own_lines(f, &self.comments.before)?;

        if runs_past_line(&self.comments.after) {
            write!(f, "(")?;
            write_value(f, self)?;
            write_after(f, &self.comments.after)?;
            write!(f, ")")
        } else {
            write_value(f, self)?;
            write_after(f, &self.comments.after)
        }
    }
}

impl Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.action.keyword(), self.value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Float(value) => write!(f, "{:?}", value),
            Expr::Bool(value) => write!(f, "{}", value),
            Expr::Null => write!(f, "null"),
            Expr::Path(value) => write!(f, "{}", value),
            Expr::Identifier(identifier) => write!(f, "{}", identifier),
            Expr::String(string) => write!(f, "{}", string),
            Expr::List(list) => {
                write!(f, "[")?;
                for element in &list.value {
                    write!(f, " {}", element)?;
                }
                write_own_lines(f, &list.comments)?;
                write!(f, " ]")
            }
            Expr::Attrs(attrs) => write!(f, "{}", attrs),
            Expr::LetIn(let_in) => {
                write!(f, "(let")?;
                for binding in &let_in.bindings {
                    write!(f, " {}", binding)?;
                }
                write_own_lines(f, &let_in.comments)?;
                write!(f, " in {})", let_in.body)
            }
            Expr::Fn(function) => write!(f, "({}: {})", function.args, function.body),
            Expr::FnCall(call) => {
                // `!f x` would negate the call, `f -x` would subtract
                write!(f, "(")?;
                write_grouped(f, &call.name, is_unary(&call.name, UnaryOperator::Not))?;
                for argument in &call.value {
                    write!(f, " ")?;
                    write_grouped(f, argument, matches!(argument.expr(), Expr::Unary(_)))?;
                }
                write!(f, ")")
            }
            Expr::Binary(binary) => {
                // A prefix operand on the left would swallow a tighter operator
                let grouped = match binary.op {
                    BinaryOperator::Fallback => matches!(binary.left.expr(), Expr::Unary(_)),
                    BinaryOperator::Add
                    | BinaryOperator::Sub
                    | BinaryOperator::Mul
                    | BinaryOperator::Div
                    | BinaryOperator::Concat
                    | BinaryOperator::HasAttr => is_unary(&binary.left, UnaryOperator::Not),
                    _ => false,
                };

                write!(f, "(")?;
                write_grouped(f, &binary.left, grouped)?;
                write!(f, " {} {})", binary.op.symbol(), binary.right)
            }
            Expr::Unary(unary) => match unary.op {
                UnaryOperator::Negate => write!(f, "-{}", unary.value),
                UnaryOperator::Not => write!(f, "!{}", unary.value),
            },
            Expr::Select(select) => {
                // `x.a` would read as one attribute path
                let grouped = select.value.modifiers.is_empty()
                    && matches!(
                        select.value.expr(),
                        Expr::Identifier(_)
                            | Expr::Unary(_)
                            | Expr::Select(_)
                            | Expr::Int(_)
                            | Expr::Float(_)
                            | Expr::Path(_)
                    );

                write_grouped(f, &select.value, grouped)?;
                write!(f, ".{}", select.path)
            }
            Expr::Conditional(conditional) => write!(
                f,
                "(if {} then {} else {})",
                conditional.condition, conditional.then, conditional.r#else
            ),
            Expr::Import(import) => write!(f, "(import {})", import.value),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, part) in self.value.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match part {
                IdentifierPart::Name(name) => write!(f, "{}", name)?,
                IdentifierPart::Interp(interp) => write!(f, "{}", interp)?,
                IdentifierPart::String(string) => write!(f, "{}", string)?,
            }
        }
        Ok(())
    }
}

impl Display for Interp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}}}", self.value)
    }
}

impl Display for StringNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let quotes = if self.multiline { "''" } else { "\"" };
        write!(f, "{}", quotes)?;
        for part in &self.value {
            match part {
                StringPart::Interp(interp) => write!(f, "{}", interp)?,
                StringPart::Literal(text) if self.multiline => {
                    write!(f, "{}", text.replace("''", "'''").replace("${", "''${"))?
                }
                StringPart::Literal(text) => write!(
                    f,
                    "{}",
                    text.replace('\\', "\\\\")
                        .replace('"', "\\\"")
                        .replace("${", "\\${")
                        .replace('\n', "\\n")
                        .replace('\t', "\\t")
                        .replace('\r', "\\r")
                )?,
            }
        }
        write!(f, "{}", quotes)
    }
}

impl Display for Attrs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.recursive {
            write!(f, "rec ")?;
        }
        if self.value.is_empty() && self.comments.is_empty() {
            return write!(f, "{{}}");
        }

        write!(f, "{{")?;
        for attr in &self.value {
            write!(f, " {}", attr)?;
        }
        write_own_lines(f, &self.comments)?;
        write!(f, " }}")
    }
}

impl Display for Attr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Binding {
                name,
                value,
                comments,
            } => {
                write_own_lines(f, comments)?;
                write!(f, "{} = ", name)?;

                // Comments that fit on one line go after the `;`
                if runs_past_line(&value.comments.after) {
                    return write!(f, "{};", value);
                }
                write_own_lines(f, &value.comments.before)?;
                write_value(f, value)?;
                write!(f, ";")?;
                write_after(f, &value.comments.after)
            }
            Attr::Inherit {
                from,
                value,
                comments,
            } => {
                write_own_lines(f, comments)?;
                write!(f, "inherit")?;
                if let Some(from) = from {
                    write!(f, " ({})", from)?;
                }
                for name in value {
                    write!(f, " {}", name)?;
                }
                write!(f, ";")
            }
        }
    }
}

impl Display for FnParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FnParams::Identifier { name } => write!(f, "{}", name),
            FnParams::Destructured {
                value,
                extra,
                alias,
                comments,
            } => {
                if let Some(alias) = alias {
                    write!(f, "{} @ ", alias)?;
                }

                write!(f, "{{")?;
                for (i, param) in value.iter().enumerate() {
                    let last = i + 1 == value.len() && !*extra;
                    let comma = !last || !param.comments.after.is_empty();

                    write!(f, " {}", param)?;
                    // A default claims comments in front of the comma
                    if param.default.is_some() {
                        if comma {
                            write!(f, ",")?;
                        }
                        write_after(f, &param.comments.after)?;
                    } else {
                        write_after(f, &param.comments.after)?;
                        if comma {
                            write!(f, ",")?;
                        }
                    }
                }
                if *extra {
                    write!(f, " ...")?;
                }
                write_own_lines(f, comments)?;
                write!(f, " }}")
            }
        }
    }
}

/// The parameter without its `after` comments, which belong around the comma.
impl Display for FnParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_own_lines(f, &self.comments.before)?;
        write!(f, "{}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " ? {}", default)?;
        }
        Ok(())
    }
}
