use super::ast::{Comment, SubExpr};

// NAMES AND STRINGS

/// Identifier Part
/// One segment of a dotted attribute path.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierPart {
    Name(String),
    Interp(Interp),
    /// A quoted segment such as `"a b"` in `x."a b"`
    String(StringNode),
}

/// Identifier
/// A dotted attribute path; any segment may be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: Vec<IdentifierPart>,
}

impl Identifier {
    /// A single plain name.
    pub fn name(name: &str) -> Self {
        Identifier {
            value: vec![IdentifierPart::Name(name.to_string())],
        }
    }

    /// The name when this is a single plain segment.
    pub fn as_name(&self) -> Option<&str> {
        match self.value.as_slice() {
            [IdentifierPart::Name(name)] => Some(name),
            _ => None,
        }
    }
}

/// Interpolation
/// `${...}` inside a string or an attribute path.
#[derive(Debug, Clone, PartialEq)]
pub struct Interp {
    pub value: SubExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Literal(String),
    Interp(Interp),
}

/// String Expression
///
/// `multiline` marks the `''...''` form. Literal parts hold decoded text
/// exactly as it appeared, indentation included.
#[derive(Debug, Clone, PartialEq)]
pub struct StringNode {
    pub multiline: bool,
    pub value: Vec<StringPart>,
}

// COLLECTIONS

/// List Expression
/// `comments` are the comment-only entries before the closing `]`.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub value: Vec<SubExpr>,
    pub comments: Vec<Comment>,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Implies,
    Update,
    Concat,
    Fallback,
    HasAttr,
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Implies => "->",
            BinaryOperator::Update => "//",
            BinaryOperator::Concat => "++",
            BinaryOperator::Fallback => "or",
            BinaryOperator::HasAttr => "?",
            BinaryOperator::EqEq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEq => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEq => ">=",
        }
    }
}

/// Binary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: SubExpr,
    pub op: BinaryOperator,
    pub right: SubExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

/// Unary Expression
/// Prefix `-` or `!`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOperator,
    pub value: SubExpr,
}

/// Function Call
///
/// Application by juxtaposition. `f x y` is a single call with two
/// arguments; `value` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FnCall {
    pub name: SubExpr,
    pub value: Vec<SubExpr>,
}

/// Select Expression
/// Attribute access on something other than a plain identifier, e.g. `(f x).a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub value: SubExpr,
    pub path: Identifier,
}

// CONTROL

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: SubExpr,
    pub then: SubExpr,
    pub r#else: SubExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub value: SubExpr,
}
