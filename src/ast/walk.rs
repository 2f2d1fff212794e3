//! Collects every comment reachable from a tree, in attachment order.

use super::{
    ast::{Comment, Expr, Root, SubExpr},
    bindings::{Attr, FnParams},
    expressions::{Identifier, IdentifierPart, StringNode, StringPart},
};

impl Root {
    /// Every comment in the tree. Each source comment appears exactly once.
    pub fn comments(&self) -> Vec<&Comment> {
        let mut out = vec![];
        out.extend(&self.before);
        walk_sub_expr(&self.value, &mut out);
        out.extend(&self.after);
        out
    }
}

fn walk_sub_expr<'a>(sub_expr: &'a SubExpr, out: &mut Vec<&'a Comment>) {
    out.extend(&sub_expr.comments.before);
    for modifier in &sub_expr.modifiers {
        walk_sub_expr(&modifier.value, out);
    }
    walk_expr(&sub_expr.value, out);
    out.extend(&sub_expr.comments.after);
}

fn walk_expr<'a>(expr: &'a Expr, out: &mut Vec<&'a Comment>) {
    match expr {
        Expr::Int(_) | Expr::Float(_) | Expr::Bool(_) | Expr::Null | Expr::Path(_) => {}
        Expr::Identifier(identifier) => walk_identifier(identifier, out),
        Expr::String(string) => walk_string(string, out),
        Expr::List(list) => {
            for element in &list.value {
                walk_sub_expr(element, out);
            }
            out.extend(&list.comments);
        }
        Expr::Attrs(attrs) => {
            for attr in &attrs.value {
                walk_attr(attr, out);
            }
            out.extend(&attrs.comments);
        }
        Expr::LetIn(let_in) => {
            for attr in &let_in.bindings {
                walk_attr(attr, out);
            }
            out.extend(&let_in.comments);
            walk_sub_expr(&let_in.body, out);
        }
        Expr::Fn(function) => {
            if let FnParams::Destructured {
                value, comments, ..
            } = &function.args
            {
                for param in value {
                    out.extend(&param.comments.before);
                    if let Some(default) = &param.default {
                        walk_sub_expr(default, out);
                    }
                    out.extend(&param.comments.after);
                }
                out.extend(comments);
            }
            walk_sub_expr(&function.body, out);
        }
        Expr::FnCall(call) => {
            walk_sub_expr(&call.name, out);
            for arg in &call.value {
                walk_sub_expr(arg, out);
            }
        }
        Expr::Binary(binary) => {
            walk_sub_expr(&binary.left, out);
            walk_sub_expr(&binary.right, out);
        }
        Expr::Unary(unary) => walk_sub_expr(&unary.value, out),
        Expr::Select(select) => {
            walk_sub_expr(&select.value, out);
            walk_identifier(&select.path, out);
        }
        Expr::Conditional(conditional) => {
            walk_sub_expr(&conditional.condition, out);
            walk_sub_expr(&conditional.then, out);
            walk_sub_expr(&conditional.r#else, out);
        }
        Expr::Import(import) => walk_sub_expr(&import.value, out),
    }
}

fn walk_attr<'a>(attr: &'a Attr, out: &mut Vec<&'a Comment>) {
    match attr {
        Attr::Binding {
            name,
            value,
            comments,
        } => {
            out.extend(comments);
            walk_identifier(name, out);
            walk_sub_expr(value, out);
        }
        Attr::Inherit {
            from,
            value,
            comments,
        } => {
            out.extend(comments);
            if let Some(from) = from {
                walk_sub_expr(from, out);
            }
            for name in value {
                walk_identifier(name, out);
            }
        }
    }
}

fn walk_identifier<'a>(identifier: &'a Identifier, out: &mut Vec<&'a Comment>) {
    for part in &identifier.value {
        match part {
            IdentifierPart::Name(_) => {}
            IdentifierPart::Interp(interp) => walk_sub_expr(&interp.value, out),
            IdentifierPart::String(string) => walk_string(string, out),
        }
    }
}

fn walk_string<'a>(string: &'a StringNode, out: &mut Vec<&'a Comment>) {
    for part in &string.value {
        if let StringPart::Interp(interp) = part {
            walk_sub_expr(&interp.value, out);
        }
    }
}
