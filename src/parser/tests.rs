//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Literals, strings and interpolation
//! - Operator precedence and associativity
//! - Attribute sets, let blocks and inherit
//! - Functions, parameter aliases and application
//! - Comment attachment
//! - Error cases

use super::{
    config::{FallbackPrecedence, ParserOptions},
    parser::parse,
};
use crate::{
    ast::{
        ast::{Comment, Expr, ModifierAction, Root, SubExpr},
        bindings::{Attr, FnParams},
        expressions::{BinaryOperator, IdentifierPart, Interp, StringNode, StringPart},
    },
    errors::errors::{Error, ErrorCategory},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn parse_with(source: &str, options: ParserOptions) -> Result<Root, Error> {
    let tokens = tokenize(source, Some("test.nix".to_string()))?;
    parse(tokens, options)
}

fn parse_source(source: &str) -> Result<Root, Error> {
    parse_with(source, ParserOptions::default())
}

fn pretty(source: &str) -> String {
    parse_source(source).unwrap().to_string()
}

fn comments(values: &[&str]) -> Vec<Comment> {
    values.iter().map(|value| Comment::line(value)).collect()
}

#[test]
fn test_parse_sub_expr() {
    let root = parse_source("42.0").unwrap();

    assert_eq!(*root.value.expr(), Expr::Float(42.0));
    assert_eq!(root.to_string(), "42.0");
}

#[test]
fn test_parse_sub_expr_with_comments() {
    let root = parse_source("#before\n42.0#after").unwrap();

    assert_eq!(root.value.comments.before, comments(&["before"]));
    assert_eq!(root.value.comments.after, comments(&["after"]));
    assert!(root.before.is_empty());
    assert!(root.after.is_empty());
}

#[test]
fn test_parse_literals() {
    assert_eq!(pretty("true"), "true");
    assert_eq!(pretty("null"), "null");
    assert_eq!(pretty("./x/y/z"), "./x/y/z");
    assert_eq!(pretty("<nixpkgs>"), "<nixpkgs>");
    assert_eq!(*parse_source("007").unwrap().value.expr(), Expr::Int(7));
}

#[test]
fn test_parse_binary_expressions() {
    assert_eq!(
        pretty("1 + 2 * 3 * 4 - 5 / 6 - -7.8"),
        "(((1 + (2 * (3 * 4))) - (5 / 6)) - -7.8)"
    );
}

#[test]
fn test_parse_boolean_logic() {
    assert_eq!(pretty("true && false || true"), "((true && false) || true)");
    assert_eq!(pretty("true || false && true"), "(true || (false && true))");
}

#[test]
fn test_parse_associativity() {
    assert_eq!(pretty("8 / 4 / 2"), "((8 / 4) / 2)");
    assert_eq!(pretty("a - b - c"), "((a - b) - c)");
    assert_eq!(pretty("a // b // c"), "(a // (b // c))");
    assert_eq!(pretty("a ++ b ++ c"), "(a ++ (b ++ c))");
    assert_eq!(pretty("a -> b -> c"), "(a -> (b -> c))");
    assert_eq!(pretty("a || b -> c"), "((a || b) -> c)");
}

#[test]
fn test_parse_comparison_levels() {
    assert_eq!(pretty("a < b == c"), "((a < b) == c)");
    assert_eq!(pretty("a == b < c"), "(a == (b < c))");
    assert_eq!(pretty("a + 1 >= b // c"), "((a + 1) >= (b // c))");
}

#[test]
fn test_parse_non_associative_chain() {
    let error = parse_source("a == b == c").unwrap_err();
    assert_eq!(error.get_error_name(), "NonAssociative");
    assert_eq!(error.category(), ErrorCategory::SyntaxError);

    let error = parse_source("a < b <= c").unwrap_err();
    assert_eq!(error.get_error_name(), "NonAssociative");
}

#[test]
fn test_parse_prefix_operators() {
    assert_eq!(pretty("!a && b"), "(!a && b)");
    assert_eq!(pretty("!a + b"), "!(a + b)");
    assert_eq!(pretty("-f x"), "(-f x)");
    assert_eq!(pretty("- -1"), "--1");
}

#[test]
fn test_parse_application_binds_tighter_than_comparison() {
    assert_eq!(pretty("builtins.length x != 3"), "((builtins.length x) != 3)");
}

#[test]
fn test_parse_function_calls() {
    assert_eq!(pretty("builtins.trace x y"), "(builtins.trace x y)");
    assert_eq!(pretty("f x.y z"), "(f x.y z)");
    assert_eq!(pretty("f (g x) [ 1 ]"), "(f (g x) [ 1 ])");

    let root = parse_source("f a b c").unwrap();
    let Expr::FnCall(call) = root.value.expr() else {
        panic!("expected a call");
    };
    assert_eq!(call.value.len(), 3);
}

#[test]
fn test_parse_strings() {
    let root = parse_source(r#""hello ${"world"}!""#).unwrap();

    let world = SubExpr::new(Expr::String(StringNode {
        multiline: false,
        value: vec![StringPart::Literal("world".to_string())],
    }));
    let expected = StringNode {
        multiline: false,
        value: vec![
            StringPart::Literal("hello ".to_string()),
            StringPart::Interp(Interp { value: world }),
            StringPart::Literal("!".to_string()),
        ],
    };

    assert_eq!(*root.value.expr(), Expr::String(expected));
    assert_eq!(root.to_string(), r#""hello ${"world"}!""#);
}

#[test]
fn test_parse_multiline_strings() {
    let root = parse_source("''\n\thello, world!\n''").unwrap();

    assert_eq!(
        *root.value.expr(),
        Expr::String(StringNode {
            multiline: true,
            value: vec![StringPart::Literal("\n\thello, world!\n".to_string())],
        })
    );
}

#[test]
fn test_parse_lists() {
    let root = parse_source("[\n#before\n 1 true \"three\"\n#after\n]").unwrap();

    let Expr::List(list) = root.value.expr() else {
        panic!("expected a list");
    };
    assert_eq!(list.value.len(), 3);
    assert_eq!(list.value[0].comments.before, comments(&["before"]));
    assert_eq!(list.comments, comments(&["after"]));
}

#[test]
fn test_parse_list_comment_interleaving() {
    let root = parse_source("[#one\na\n#two\nb]").unwrap();

    let Expr::List(list) = root.value.expr() else {
        panic!("expected a list");
    };
    assert_eq!(list.value.len(), 2);
    assert_eq!(list.value[0].comments.before, comments(&["one"]));
    assert_eq!(list.value[1].comments.before, comments(&["two"]));
    assert!(list.comments.is_empty());
}

#[test]
fn test_parse_list_with_nested_function() {
    let root = parse_source("[#one\n1\n#two\n { x = y: 4; }\n#three\n]").unwrap();

    let Expr::List(list) = root.value.expr() else {
        panic!("expected a list");
    };
    assert_eq!(list.value.len(), 2);
    assert_eq!(list.value[1].comments.before, comments(&["two"]));
    assert_eq!(list.value[1].value.to_string(), "{ x = (y: 4); }");
    assert_eq!(list.comments, comments(&["three"]));
}

#[test]
fn test_parse_list_elements_are_not_applied() {
    let root = parse_source("[ f x -1 ]").unwrap();

    let Expr::List(list) = root.value.expr() else {
        panic!("expected a list");
    };
    assert_eq!(list.value.len(), 3);
    assert_eq!(list.value[2].to_string(), "-1");
}

#[test]
fn test_parse_attrs() {
    assert_eq!(pretty("{ x.y = true; }"), "{ x.y = true; }");
    assert_eq!(pretty("{ }"), "{}");
    assert_eq!(pretty("rec { a = 1; b = a; }"), "rec { a = 1; b = a; }");

    let root = parse_source("rec { }").unwrap();
    let Expr::Attrs(attrs) = root.value.expr() else {
        panic!("expected attrs");
    };
    assert!(attrs.recursive);
}

#[test]
fn test_parse_attr_names() {
    let root = parse_source(r#"{ "a b" = 1; ${x} = 2; a.${b}."c" = 3; }"#).unwrap();

    let Expr::Attrs(attrs) = root.value.expr() else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.value.len(), 3);

    let Attr::Binding { name, .. } = &attrs.value[2] else {
        panic!("expected a binding");
    };
    assert_eq!(name.value.len(), 3);
    assert_eq!(name.value[0], IdentifierPart::Name("a".to_string()));
    assert!(matches!(name.value[1], IdentifierPart::Interp(_)));
    assert!(matches!(name.value[2], IdentifierPart::String(_)));
}

#[test]
fn test_parse_inherit() {
    let root = parse_source("{ inherit a b; inherit (pkgs) c; }").unwrap();

    let Expr::Attrs(attrs) = root.value.expr() else {
        panic!("expected attrs");
    };
    assert!(attrs.value.iter().all(|attr| attr.is_inherit()));

    let Attr::Inherit { from, value, .. } = &attrs.value[0] else {
        panic!("expected inherit");
    };
    assert!(from.is_none());
    assert_eq!(value.len(), 2);
    assert_eq!(value[1].as_name(), Some("b"));

    let Attr::Inherit { from, .. } = &attrs.value[1] else {
        panic!("expected inherit");
    };
    assert_eq!(from.as_ref().map(|from| from.to_string()), Some("pkgs".to_string()));
}

#[test]
fn test_parse_let_in() {
    assert_eq!(
        pretty("let x = 4; y = 2; inherit (a) b; in x + y"),
        "(let x = 4; y = 2; inherit (a) b; in (x + y))"
    );
}

#[test]
fn test_parse_legacy_let_rejected() {
    let error = parse_source("let { a = 1; body = a; }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_parse_identifier_args() {
    assert_eq!(pretty("x: x"), "(x: x)");
    assert_eq!(pretty("x: y: x + y"), "(x: (y: (x + y)))");
}

#[test]
fn test_parse_destructured_args() {
    assert_eq!(pretty("{ a ? true, b }: a"), "({ a ? true, b }: a)");
    assert_eq!(pretty("{ a, ... }: a"), "({ a, ... }: a)");
    assert_eq!(pretty("{ ... }: 1"), "({ ... }: 1)");
    assert_eq!(pretty("{ }: 1"), "({ }: 1)");
    assert_eq!(pretty("{ a }: a"), "({ a }: a)");
}

#[test]
fn test_parse_alias_normalization() {
    let prefix = parse_source("x @ { a ? true, b }: x").unwrap();
    let suffix = parse_source("{ a ? true, b } @ x: x").unwrap();

    assert_eq!(prefix, suffix);
    assert_eq!(prefix.to_string(), "(x @ { a ? true, b }: x)");

    let Expr::Fn(function) = prefix.value.expr() else {
        panic!("expected a function");
    };
    assert!(function.args.is_destructured());
    let FnParams::Destructured { alias, value, .. } = &function.args else {
        panic!("expected destructured params");
    };
    assert_eq!(alias.as_ref().and_then(|alias| alias.as_name()), Some("x"));
    assert!(value[0].default.is_some());
    assert!(value[1].default.is_none());
}

#[test]
fn test_parse_double_alias_rejected() {
    let error = parse_source("x @ { a } @ y: x").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_fallbacks() {
    assert_eq!(pretty("x.y or 4"), "(x.y or 4)");
    assert_eq!(pretty("f a.b or c"), "((f a.b) or c)");

    let options = ParserOptions {
        fallback: FallbackPrecedence::Select,
        ..Default::default()
    };
    let root = parse_with("f a.b or c", options).unwrap();
    assert_eq!(root.to_string(), "(f (a.b or c))");
}

#[test]
fn test_parse_has_attr_and_select() {
    assert_eq!(pretty("x ? a.b"), "(x ? a.b)");
    assert_eq!(pretty("(f x).a.b"), "(f x).a.b");
    assert_eq!(pretty("{ a = 1; }.a"), "{ a = 1; }.a");

    let root = parse_source("x ? a").unwrap();
    let Expr::Binary(binary) = root.value.expr() else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.op, BinaryOperator::HasAttr);
}

#[test]
fn test_parse_imports() {
    assert_eq!(pretty("import ./x/y/z"), "(import ./x/y/z)");
    assert_eq!(pretty("import ./x/y/z {}"), "((import ./x/y/z) {})");

    let root = parse_source("import ./x/y/z {}").unwrap();
    let Expr::FnCall(call) = root.value.expr() else {
        panic!("expected a call");
    };
    assert!(matches!(call.name.expr(), Expr::Import(_)));
}

#[test]
fn test_parse_conditional() {
    assert_eq!(pretty("if a then b else c"), "(if a then b else c)");
    assert_eq!(
        pretty("if a then if b then 1 else 2 else 3"),
        "(if a then (if b then 1 else 2) else 3)"
    );
}

#[test]
fn test_parse_conditional_missing_else() {
    let error = parse_source("if x then 1").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::SyntaxError);
    assert_eq!(error.expected(), &[TokenKind::Else]);
    assert!(error.to_string().contains("`else`"));
}

#[test]
fn test_parse_conditional_missing_then() {
    let error = parse_source("if x else 1").unwrap_err();

    assert_eq!(error.expected(), &[TokenKind::Then]);
    assert_eq!(error.get_position().0, 5);
}

#[test]
fn test_parse_modifiers() {
    let root = parse_source("with pkgs; assert x; [ hello ]").unwrap();

    let actions: Vec<ModifierAction> = root
        .value
        .modifiers
        .iter()
        .map(|modifier| modifier.action)
        .collect();
    assert_eq!(actions, vec![ModifierAction::With, ModifierAction::Assert]);
    assert!(matches!(root.value.expr(), Expr::List(_)));
    assert_eq!(root.to_string(), "(with pkgs; assert x; [ hello ])");
}

#[test]
fn test_parse_modifier_inside_call() {
    assert_eq!(pretty("(with x; y) z"), "((with x; y) z)");
}

#[test]
fn test_attr_comments() {
    let root =
        parse_source("{\n  # the answer\n  a = 42; # inline\n  # dangling\n}").unwrap();

    let Expr::Attrs(attrs) = root.value.expr() else {
        panic!("expected attrs");
    };
    let Attr::Binding {
        value, comments: before, ..
    } = &attrs.value[0]
    else {
        panic!("expected a binding");
    };
    assert_eq!(*before, comments(&[" the answer"]));
    assert_eq!(value.comments.after, comments(&[" inline"]));
    assert_eq!(attrs.comments, comments(&[" dangling"]));
}

#[test]
fn test_let_comments() {
    let root = parse_source("let\n  a = 1;\n  # before in\nin a").unwrap();

    let Expr::LetIn(let_in) = root.value.expr() else {
        panic!("expected let");
    };
    assert_eq!(let_in.comments, comments(&[" before in"]));
}

#[test]
fn test_fn_param_comments() {
    let root = parse_source("{\n  # first\n  a ? 1, # after a\n  b\n  # end\n}: a").unwrap();

    let Expr::Fn(function) = root.value.expr() else {
        panic!("expected a function");
    };
    let FnParams::Destructured {
        value, comments: dangling, ..
    } = &function.args
    else {
        panic!("expected destructured params");
    };
    assert_eq!(value[0].comments.before, comments(&[" first"]));
    assert_eq!(value[0].comments.after, comments(&[" after a"]));
    assert!(value[1].comments.is_empty());
    assert_eq!(*dangling, comments(&[" end"]));
}

#[test]
fn test_operator_comments() {
    let root = parse_source("a # left\n+ b").unwrap();
    let Expr::Binary(binary) = root.value.expr() else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.left.comments.after, comments(&[" left"]));

    let root = parse_source("a\n# above plus\n+ # right\nb").unwrap();
    let Expr::Binary(binary) = root.value.expr() else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.left.comments.after, comments(&[" above plus"]));
    assert_eq!(binary.right.comments.before, comments(&[" right"]));
}

#[test]
fn test_root_comments() {
    let root = parse_source("# header\n\n# doc\na # trailing\n# footer").unwrap();

    assert_eq!(root.before, comments(&[" header"]));
    assert_eq!(root.value.comments.before, comments(&[" doc"]));
    assert_eq!(root.value.comments.after, comments(&[" trailing"]));
    assert_eq!(root.after, comments(&[" footer"]));
    assert_eq!(root.comments().len(), 4);
}

#[test]
fn test_block_comment_attachment() {
    let root = parse_source("f /* first */ x /* second */").unwrap();

    let Expr::FnCall(call) = root.value.expr() else {
        panic!("expected a call");
    };
    assert_eq!(call.name.comments.after[0].value, " first ");
    assert_eq!(call.value[0].comments.after[0].value, " second ");
}

#[test]
fn test_numeric_literal_errors() {
    let error = parse_source("99999999999999999999").unwrap_err();
    assert_eq!(error.category(), ErrorCategory::NumericLiteralError);

    let error = parse_source("[ 1e999 ]").unwrap_err();
    assert_eq!(error.category(), ErrorCategory::NumericLiteralError);
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_recursion_limit() {
    let source = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
    let error = parse_source(&source).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::RecursionLimitError);

    let source = format!("{}{}", "[".repeat(140), "]".repeat(140));
    assert!(parse_source(&source).is_err());

    let options = ParserOptions {
        max_depth: 200,
        ..Default::default()
    };
    assert!(parse_with(&source, options).is_ok());
}

#[test]
fn test_unexpected_token_reports_position() {
    let error = parse_source("{ a = 1 }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.expected(), &[TokenKind::Semicolon]);
    assert_eq!(error.get_position().0, 8);
    assert_eq!(error.get_position().1.as_str(), "test.nix");
}

#[test]
fn test_unexpected_trailing_input() {
    let error = parse_source("a )").unwrap_err();

    assert_eq!(error.expected(), &[TokenKind::EOF]);
}

#[test]
fn test_empty_input() {
    let error = parse_source("# only a comment").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::SyntaxError);
    assert!(error.expected().contains(&TokenKind::Identifier));
}

#[test]
fn test_unterminated_list() {
    let error = parse_source("[ 1 2").unwrap_err();

    assert_eq!(error.expected(), &[TokenKind::CloseBracket]);
}

#[test]
fn test_parse_tokens_without_eof() {
    let mut tokens = tokenize("a + 1", None).unwrap();
    tokens.pop();

    let root = parse(tokens, ParserOptions::default()).unwrap();
    assert_eq!(root.to_string(), "(a + 1)");
}

#[test]
fn test_reparse_is_stable() {
    let source = "let f = { a ? 1, ... } @ args: a; in with f; [ (f {}) (x.y or null) ]";
    let first = parse_source(source).unwrap();
    let second = parse_source(&first.to_string()).unwrap();

    assert_eq!(first, second);
}

fn assert_reprint_matches(source: &str) {
    let first = parse_source(source).unwrap();
    let printed = first.to_string();
    let second = parse_source(&printed).unwrap();

    assert_eq!(first, second, "{:?} printed as {:?}", source, printed);
}

#[test]
fn test_reprint_keeps_comment_owners() {
    let sources = [
        "{\n  # the answer\n  a = 42; # inline\n  # dangling\n}",
        "let\n  a = 1; # t\n  # before in\nin a",
        "{ a = 1 # x\n  # y\n  ; }",
        "{ inherit a # why\n  b; # done\n}",
        "a\n# above plus\n+ # right\nb",
        "# header\n\n# doc\na # trailing\n# footer",
        "{\n  # first\n  a ? 1, # after a\n  b\n  # end\n}: a",
        "{ a # x\n  , b }: a",
        "f /* first */ x /* second */",
        "[ (a # x\n  # y\n  ) b ]",
        "[ (-a) # negated\n]",
        "with pkgs; # scope\n[ hello ]",
        "# doc\n({ a = 1; }.a)",
        "if a # cond\nthen b # yes\nelse c # no\n",
    ];

    for source in sources {
        assert_reprint_matches(source);
    }
}

#[test]
fn test_reprint_keeps_grouping() {
    assert_eq!(pretty("(x).a"), "(x).a");
    assert_eq!(pretty("f (-1)"), "(f (-1))");
    assert_eq!(pretty("(!a) + b"), "((!a) + b)");
    assert_eq!(pretty("(!f) x"), "((!f) x)");

    for source in ["(x).a", "f (-1) (!b)", "(!a) + b", "(!f) x", "(-a) or b"] {
        assert_reprint_matches(source);
    }
}

#[test]
fn test_long_operator_chain_hits_recursion_limit() {
    let source = format!("{}1", "1 + ".repeat(20_000));
    let error = parse_source(&source).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::RecursionLimitError);

    let source = format!("{}1", "a ++ ".repeat(20_000));
    let error = parse_source(&source).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::RecursionLimitError);

    let source = format!("{}1", "1 + ".repeat(100));
    assert!(parse_source(&source).is_ok());
}

#[test]
fn test_parse_inherit_requires_a_name() {
    let error = parse_source("{ inherit; }").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::SyntaxError);
    assert_eq!(
        error.expected(),
        &[
            TokenKind::Identifier,
            TokenKind::InterpStart,
            TokenKind::StringStart
        ]
    );
    assert_eq!(error.get_position().0, 9);

    assert!(parse_source("{ inherit (pkgs); }").is_err());
}
