/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Root, SubExpr, the Expr sum type and comment trivia
/// - expressions: Literal, operator and application nodes
/// - bindings: Attribute sets, let blocks, functions and their parameters
/// - display: Fully-parenthesized debug rendering
/// - walk: Comment collection over a whole tree
pub mod ast;
pub mod bindings;
pub mod display;
pub mod expressions;
pub mod walk;
