//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public entry points from source text through
//! tokenization and parsing, and check the properties a consumer of the
//! tree relies on.

use std::thread;

use nixparse::{
    ast::{
        ast::{Comment, Expr},
        bindings::{Attr, FnParams},
    },
    display_error,
    errors::errors::ErrorCategory,
    lexer::lexer::tokenize,
    parse, parse_tokens,
    parser::config::ParserOptions,
};

const MODULE: &str = r#"# Network configuration module.

# Arguments come from the module system.
{ config, lib, pkgs, ... }:

let
  # Interfaces to configure
  interfaces = [ "eth0" "wlan0" ]; # wired first
  cfg = config.networking; /* shorthand */
in
{
  networking = {
    hostName = "quartz";
    # Open ports
    firewall.allowedTCPPorts = [
      22 # ssh
      80
      443
    ];
    nameservers = cfg.nameservers or [ "1.1.1.1" ];
  };

  environment.systemPackages = with pkgs; [
    curl
    # debugging
    tcpdump
  ];

  services.openssh.enable = lib.mkDefault true;
  # end of services
}
# trailing footer
"#;

fn options() -> ParserOptions {
    ParserOptions {
        file: "module.nix".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_parse_module_sample() {
    let root = parse(MODULE, options()).unwrap();

    assert_eq!(root.before, vec![Comment::line(" Network configuration module.")]);
    assert_eq!(root.after, vec![Comment::line(" trailing footer")]);
    assert_eq!(
        root.value.comments.before,
        vec![Comment::line(" Arguments come from the module system.")]
    );

    let Expr::Fn(function) = root.value.expr() else {
        panic!("expected a function");
    };
    let FnParams::Destructured { value, extra, .. } = &function.args else {
        panic!("expected destructured params");
    };
    assert_eq!(value.len(), 3);
    assert!(*extra);

    let Expr::LetIn(let_in) = function.body.expr() else {
        panic!("expected let");
    };
    assert_eq!(let_in.bindings.len(), 2);
    assert!(let_in.bindings.iter().all(|attr| attr.is_binding()));

    let Expr::Attrs(attrs) = let_in.body.expr() else {
        panic!("expected attrs");
    };
    assert_eq!(attrs.value.len(), 3);
    assert_eq!(attrs.comments, vec![Comment::line(" end of services")]);
}

#[test]
fn test_every_comment_attached_once() {
    let root = parse(MODULE, options()).unwrap();
    let comments = root.comments();

    assert_eq!(comments.len(), 10);

    let mut values: Vec<&str> = comments.iter().map(|comment| comment.value.as_str()).collect();
    values.sort();
    values.dedup();
    assert_eq!(values.len(), 10);
}

#[test]
fn test_reprinted_module_parses_to_the_same_tree() {
    let root = parse(MODULE, options()).unwrap();
    let printed = root.to_string();
    let reprinted = parse(&printed, options()).unwrap();

    assert_eq!(reprinted.comments().len(), root.comments().len());
    assert_eq!(reprinted, root, "printed as:\n{}", printed);
}

#[test]
fn test_long_chain_fails_cleanly() {
    let source = format!("{}1", "1 + ".repeat(20_000));
    let error = parse(&source, options()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::RecursionLimitError);
}

#[test]
fn test_binding_trailing_comments() {
    let root = parse(MODULE, options()).unwrap();

    let Expr::Fn(function) = root.value.expr() else {
        panic!("expected a function");
    };
    let Expr::LetIn(let_in) = function.body.expr() else {
        panic!("expected let");
    };

    let Attr::Binding {
        value, comments, ..
    } = &let_in.bindings[0]
    else {
        panic!("expected a binding");
    };
    assert_eq!(*comments, vec![Comment::line(" Interfaces to configure")]);
    assert_eq!(value.comments.after, vec![Comment::line(" wired first")]);

    let Attr::Binding { value, .. } = &let_in.bindings[1] else {
        panic!("expected a binding");
    };
    assert_eq!(value.comments.after[0].value, " shorthand ");
}

#[test]
fn test_precedence_properties() {
    let cases = [
        (
            "1 + 2 * 3 * 4 - 5 / 6 - -7.8",
            "(((1 + (2 * (3 * 4))) - (5 / 6)) - -7.8)",
        ),
        ("true && false || true", "((true && false) || true)"),
        ("true || false && true", "(true || (false && true))"),
        ("builtins.length x != 3", "((builtins.length x) != 3)"),
        ("import ./x/y/z {}", "((import ./x/y/z) {})"),
        ("x.y or 4", "(x.y or 4)"),
    ];

    for (source, expected) in cases {
        let root = parse(source, ParserOptions::default()).unwrap();
        assert_eq!(root.to_string(), expected, "parsing {:?}", source);
    }
}

#[test]
fn test_alias_order_is_normalized() {
    let prefix = parse("x @ { a ? true, b }: x", ParserOptions::default()).unwrap();
    let suffix = parse("{ a ? true, b } @ x: x", ParserOptions::default()).unwrap();

    assert_eq!(prefix, suffix);
}

#[test]
fn test_missing_else_is_reported() {
    let source = "let a = 1; in\nif a == 1\n  then \"one\"\n";
    let error = parse(source, options()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::SyntaxError);

    let rendered = display_error(&error, source);
    assert!(rendered.contains("expected `else`"));
    assert!(rendered.contains("-> module.nix"));
}

#[test]
fn test_two_stage_parse_matches_source_parse() {
    let tokens = tokenize(MODULE, Some("module.nix".to_string())).unwrap();

    assert_eq!(
        parse_tokens(tokens, options()).unwrap(),
        parse(MODULE, options()).unwrap()
    );
}

#[test]
fn test_parallel_parses_agree() {
    let expected = parse(MODULE, options()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| parse(MODULE, options())))
        .collect();

    for handle in handles {
        let root = handle.join().unwrap().unwrap();
        assert_eq!(root, expected);
    }
}
