use super::{
    bindings::{Attrs, Function, LetIn},
    expressions::{
        BinaryExpr, Conditional, FnCall, Identifier, Import, List, Select, StringNode, UnaryExpr,
    },
};

/// Comment Kind
///
/// `#` comments run to the end of the line, `/* */` comments may span lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Comment
/// Raw comment text without its delimiters. Never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
    pub kind: CommentKind,
}

impl Comment {
    pub fn line(value: &str) -> Self {
        Comment {
            value: value.to_string(),
            kind: CommentKind::Line,
        }
    }
}

/// Comments attached directly before and after a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comments {
    pub before: Vec<Comment>,
    pub after: Vec<Comment>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Root
///
/// The parsed document. `before` holds header comments separated from the
/// expression by a blank line; `after` holds everything after the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub value: SubExpr,
    pub before: Vec<Comment>,
    pub after: Vec<Comment>,
}

/// Sub Expression
///
/// The uniform wrapper around every expression position. Carries the
/// `with`/`assert` modifiers in front of the value and the comments attached
/// to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubExpr {
    pub value: Box<Expr>,
    pub modifiers: Vec<Modifier>,
    pub comments: Comments,
}

impl SubExpr {
    pub fn new(value: Expr) -> Self {
        SubExpr {
            value: Box::new(value),
            modifiers: vec![],
            comments: Comments::default(),
        }
    }

    pub fn with_comments(value: Expr, comments: Comments) -> Self {
        SubExpr {
            value: Box::new(value),
            modifiers: vec![],
            comments,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierAction {
    With,
    Assert,
}

impl ModifierAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            ModifierAction::With => "with",
            ModifierAction::Assert => "assert",
        }
    }
}

/// Modifier
/// `with e;` or `assert e;` prefixed to the expression it scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub action: ModifierAction,
    pub value: SubExpr,
}

/// Expression
///
/// The closed set of expression kinds. Matching on it is exhaustive, so a
/// new kind forces every consumer to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Path(String),
    Identifier(Identifier),
    String(StringNode),
    List(List),
    Attrs(Attrs),
    LetIn(LetIn),
    Fn(Function),
    FnCall(FnCall),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Select(Select),
    Conditional(Conditional),
    Import(Import),
}
