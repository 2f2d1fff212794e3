use super::{
    ast::{Comment, Comments, SubExpr},
    expressions::Identifier,
};

/// Attribute
///
/// A single entry of an attribute set or `let` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    /// `name.path = value;`
    Binding {
        name: Identifier,
        value: SubExpr,
        comments: Vec<Comment>,
    },
    /// `inherit (from) a b;`, where no `from` inherits from the enclosing scope
    Inherit {
        from: Option<SubExpr>,
        value: Vec<Identifier>,
        comments: Vec<Comment>,
    },
}

impl Attr {
    pub fn is_binding(&self) -> bool {
        matches!(self, Attr::Binding { .. })
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Attr::Inherit { .. })
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            Attr::Binding { comments, .. } | Attr::Inherit { comments, .. } => comments,
        }
    }
}

/// Attribute Set
///
/// Entries keep source order and duplicates are kept. `comments` are the
/// comment-only entries before the closing `}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attrs {
    pub recursive: bool,
    pub value: Vec<Attr>,
    pub comments: Vec<Comment>,
}

/// Let Expression
/// `comments` are the comment-only entries before `in`.
#[derive(Debug, Clone, PartialEq)]
pub struct LetIn {
    pub bindings: Vec<Attr>,
    pub body: SubExpr,
    pub comments: Vec<Comment>,
}

/// Function Parameter
/// A destructured name with an optional `? default`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub name: Identifier,
    pub default: Option<SubExpr>,
    pub comments: Comments,
}

/// Function Parameters
///
/// `x @ { ... }` and `{ ... } @ x` both produce `Destructured` with
/// `alias: Some(x)`; the source order is not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum FnParams {
    Identifier {
        name: Identifier,
    },
    Destructured {
        value: Vec<FnParam>,
        extra: bool,
        alias: Option<Identifier>,
        comments: Vec<Comment>,
    },
}

impl FnParams {
    pub fn is_identifier(&self) -> bool {
        matches!(self, FnParams::Identifier { .. })
    }

    pub fn is_destructured(&self) -> bool {
        matches!(self, FnParams::Destructured { .. })
    }
}

/// Function
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub args: FnParams,
    pub body: SubExpr,
}
