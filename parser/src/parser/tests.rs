use super::*;
use crate::dump::dump;
use pretty_assertions::assert_eq;
use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

pub(super) fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}

fn parse(src: &str) -> Result<Program, Error> {
  Parser::new_str(src).parse()
}

fn dumped(src: &str) -> String {
  dump(&parse(src).unwrap())
}

/// Dump with the `:line:col` suffixes stripped, keeping kinds and nesting.
fn kinds_only(src: &str) -> String {
  dumped(src)
    .lines()
    .map(|line| line.trim_end_matches(|c: char| c.is_ascii_digit() || c == ':'))
    .collect::<Vec<_>>()
    .join("\n")
}

fn first_kind(program: &Program) -> &ExpressionKind {
  program.expressions()[0].kind()
}

fn syntax_error(src: &str) -> ParseError {
  match parse(src) {
    Err(Error::Parse(err)) => err,
    other => panic!("expected a syntax error for {src:?}, got {other:?}"),
  }
}

#[test]
fn accepts_r_sources() {
  let cases = [
    // assignments
    "foo = bar;",
    "foo := bar;",
    "foo <- bar;",
    "bar -> foo;",
    "foo <<- bar",
    "bar ->> foo",
    // comments
    "# I'm a comment",
    // calls
    "foo(1,2,3,4)",
    "foo(0, 1^(2:3))",
    "foo(, 0, 1)",
    r#"foo("<" = , ">" = , "==" = , "!=" = , ">=" = TRUE, FALSE)"#,
    "foo(, 0, 1)[1L:bar, ]",
    "foo(, , )",
    "foo(0,\n1)",
    "foo() {\n  list(    a,\n    b\n  )}",
    // constants
    "2i",
    "1e2L",
    "0x10L",
    "Inf",
    "12345L",
    "NaN",
    "NA",
    "NA_character_",
    "12345",
    "NULL",
    "TRUE",
    "FALSE",
    "\"cat\"",
    "'cat'",
    "\"# I'm not a comment.\"",
    r#"foo("\\", "\\\\")"#,
    r#"foo("help(\"%s\")")"#,
    r"foo('\'bar\'')",
    // for loops
    "for(i in 1:10) {\n  foo[i] <- bar[i]*bar[i]\n}",
    "for(i in 1:10) {\n  for(j in 1:10) {\n    foo[i] <- bar[i]*bar[j]\n  }\n}",
    // functions
    "function(foo=bar) foo*foo",
    "function(foo=bar,\nfoo2=bar2) foo*foo2",
    "function(foo=bar,foo2\n=bar2) foo*foo2",
    "function(foo) foo*bar",
    "function(foo)\n{\n  foo();}",
    "function(foo) {foo*bar}",
    "function(x, ...) NULL",
    // identifiers
    "foo.",
    "foo.2",
    "foo2",
    "foo_",
    ".",
    "f",
    "`if`",
    "foo",
    ".foo",
    "..foo",
    // if
    "if (foo == bar) {\n  print(\"Well done!\");\n}",
    "if (foo == bar) {\n  foo <- bar()[0]# I'm a comment\n  bar <- bar + 1\n}",
    "if (foo == bar||\n  foo == bar + 1) {\n  print(\"Well done!\");\n}",
    "if (foo == bar\n  || foo == bar + 1) {\n  print(\"Well done!\");\n}",
    "if (foo == bar) {\n  print(\"Well done!\");\n} else {\n  print(\"Fail!\");\n}",
    "{\n  if (a) b\n  else c\n}",
    // operators
    "foo & bar",
    "foo && bar",
    "foo / bar",
    "foo == bar",
    "foo^bar",
    "foo ** bar",
    "foo >= bar",
    "foo > bar",
    "foo %/% bar",
    "foo %x% bar",
    "foo %*% bar",
    "foo %in% bar",
    "foo - bar",
    "foo * bar",
    "foo %% bar",
    "!foo",
    "foo != bar",
    "foo$bar",
    "foo@bar",
    "foo <= bar",
    "foo < bar",
    "foo | bar",
    "foo || bar",
    "foo %o% bar",
    "foo + bar",
    "foo : bar",
    "foo ~ bar",
    "~ bar",
    "foo %customOp% bar",
    "foo %||% bar",
    "?foo",
    // other
    "foo[[\"bar\"]]",
    "1/foo\nfoo",
    "\u{c}",
    "foo[,,bar]",
    "",
    "\n\n;;\n",
    // loops
    "repeat {\n  foo <- foo + 1\n  break\n}",
    "while(foo < bar) {\n  foo <- foo + 1\n}",
    "while(foo < bar) {\n  while(foo + 1 < bar) {\n    foo <- foo + 1\n  }\n}",
    "while (TRUE) next",
  ];
  for src in cases {
    if let Err(err) = parse(src) {
      panic!("failed to parse {src:?}: {err}");
    }
  }
}

#[test]
fn rejects_malformed_tokens() {
  let cases = [
    ("2iL", 1, 1),
    ("2Li", 1, 1),
    ("2foo", 1, 1),
    (".2foo", 1, 1),
    ("_foo", 1, 1),
    ("x <- 2foo", 1, 6),
    ("f(\n  _foo)", 2, 3),
  ];
  for (src, line, col) in cases {
    match parse(src) {
      Err(Error::Lex(err)) => assert_eq!(err.loc(), SrcLoc::new(line, col), "{src:?}"),
      other => panic!("expected a lexical fault for {src:?}, got {other:?}"),
    }
  }
}

#[test]
fn rejects_invalid_utf8() {
  let Err(err) = Parser::new(b"x <- \xff") else {
    panic!("expected invalid utf-8 to be rejected");
  };
  assert_eq!(err, LexError::InvalidUtf8 { loc: SrcLoc::new(1, 6) });
}

#[test]
fn rejects_malformed_syntax() {
  let cases = [
    ("foo(", 1, 5, vec![Expected::Expression]),
    (")", 1, 1, vec![Expected::Expression]),
    ("1 +", 1, 4, vec![Expected::Expression]),
    ("foo[[1]", 1, 8, vec![Expected::Token(T::RBracket)]),
    ("x[[1] ]", 1, 7, vec![Expected::Token(T::RBracket)]),
    ("x[[1]\n]", 2, 1, vec![Expected::Token(T::RBracket)]),
    ("function(1) x", 1, 10, vec![Expected::Identifier]),
    ("function(a,) x", 1, 12, vec![Expected::Identifier]),
    ("f(a b)", 1, 5, vec![Expected::Token(T::Comma), Expected::Token(T::RParen)]),
    ("a )", 1, 3, vec![Expected::StatementEnd]),
    ("{ a ]", 1, 5, vec![Expected::StatementEnd, Expected::Token(T::RBrace)]),
    ("{ a", 1, 4, vec![Expected::Token(T::RBrace)]),
    ("for (i 1:3) i", 1, 8, vec![Expected::Token(T::In)]),
    ("if (a) b\nelse c", 2, 1, vec![Expected::Expression]),
  ];
  for (src, line, col, expected) in cases {
    let err = syntax_error(src);
    assert_eq!(err.loc, SrcLoc::new(line, col), "{src:?}");
    assert_eq!(err.expected, expected, "{src:?}");
  }
}

#[test]
fn syntax_error_messages() {
  assert_eq!(
    syntax_error("f(a b)").to_string(),
    "unexpected identifier `b` at 1:5, expected one of `,`, `)`"
  );
  assert_eq!(
    syntax_error("1 +").to_string(),
    "unexpected end of input at 1:4, expected one of expression"
  );
  assert_eq!(
    syntax_error("a %op% ]").to_string(),
    "unexpected `]` at 1:8, expected one of expression"
  );
}

#[test]
fn elided_arguments() {
  let program = parse("foo(, , )").unwrap();
  let Some(term) = program.expressions()[0].as_term() else {
    panic!("expected a term");
  };
  let Some(sub_list) = term.sub_list() else {
    panic!("expected a call");
  };
  let sub = &sub_list.subs()[0];
  assert_eq!(sub.kind(), SubKind::Call);
  assert_eq!(sub.arity(), 3);
  let SubContent::Arguments(args) = sub.content() else {
    panic!("expected arguments");
  };
  assert_eq!(args.slots(), &[Argument::Empty, Argument::Empty, Argument::Empty]);
  assert_eq!(
    dumped("foo(, , )"),
    "Program:1:1\n Expression:1:1\n  Identifier:1:1\n  SubList:1:5\n   Sub:1:5\n    Arguments:1:5\n"
  );
}

#[test]
fn sub_contents() {
  let program = parse("f()[1][[\"a\", 2]](x = )").unwrap();
  let Some(sub_list) = program.expressions()[0].as_term().and_then(Term::sub_list) else {
    panic!("expected a sub list");
  };
  let subs = sub_list.subs();
  assert_eq!(
    subs.iter().map(Sub::kind).collect::<Vec<_>>(),
    vec![SubKind::Call, SubKind::Index, SubKind::DoubleIndex, SubKind::Call]
  );
  assert_eq!(subs[0].content(), &SubContent::Empty);
  assert!(matches!(subs[1].content(), SubContent::Expression(_)));
  assert_eq!(subs[2].arity(), 2);
  let SubContent::Arguments(args) = subs[3].content() else {
    panic!("expected a named argument");
  };
  let [Argument::Named { name: ArgName::Identifier(name), value: None }] = args.slots() else {
    panic!("expected an elided named argument, got {:?}", args.slots());
  };
  assert_eq!(name.name(), "x");
}

#[test]
fn left_associative_operators() {
  assert_eq!(
    dumped("a - b - c"),
    "Program:1:1\n Expression:1:1\n  Expression:1:1\n   Identifier:1:1\n   Identifier:1:5\n  Identifier:1:9\n"
  );
  let program = parse("a < b == c").unwrap();
  let ExpressionKind::Binary { op: BinaryOp::Eq, lhs, .. } = first_kind(&program) else {
    panic!("expected `==` at the root");
  };
  assert!(matches!(lhs.operand(), Operand::Expression(_)));
}

#[test]
fn right_associative_operators() {
  assert_eq!(
    dumped("2^3^4"),
    "Program:1:1\n Expression:1:1\n  Constant:1:1\n  Expression:1:3\n   Constant:1:3\n   Constant:1:5\n"
  );
  let program = parse("a <- b <- c").unwrap();
  let ExpressionKind::Assign { lhs, assignment } = first_kind(&program) else {
    panic!("expected an assignment");
  };
  assert!(matches!(lhs.operand(), Operand::Identifier(ident) if ident.name() == "a"));
  assert_eq!(assignment.op(), AssignOp::Left);
  assert!(matches!(assignment.value().kind(), ExpressionKind::Assign { .. }));
}

#[test]
fn operator_precedence() {
  let program = parse("a + b * c").unwrap();
  let ExpressionKind::Binary { op: BinaryOp::Add, rhs, .. } = first_kind(&program) else {
    panic!("expected `+` at the root");
  };
  let Operand::Expression(product) = rhs.operand() else {
    panic!("expected a nested product");
  };
  assert!(matches!(product.kind(), ExpressionKind::Binary { op: BinaryOp::Mul, .. }));

  let program = parse("-a^b").unwrap();
  let ExpressionKind::Unary { op: UnaryOp::Minus, operand } = first_kind(&program) else {
    panic!("expected unary minus at the root");
  };
  assert!(matches!(operand.operand(), Operand::Expression(_)));

  let program = parse("-a * b").unwrap();
  assert!(matches!(first_kind(&program), ExpressionKind::Binary { op: BinaryOp::Mul, .. }));

  let program = parse("!a == b").unwrap();
  assert!(matches!(first_kind(&program), ExpressionKind::Unary { op: UnaryOp::Not, .. }));

  let program = parse("1:n - 1").unwrap();
  assert!(matches!(first_kind(&program), ExpressionKind::Binary { op: BinaryOp::Sub, .. }));

  let program = parse("a %in% b:c").unwrap();
  assert!(matches!(first_kind(&program), ExpressionKind::Binary { op: BinaryOp::Match, .. }));

  let program = parse("y ~ a | b").unwrap();
  assert!(matches!(first_kind(&program), ExpressionKind::Binary { op: BinaryOp::Formula, .. }));

  let program = parse("x %between% y").unwrap();
  let ExpressionKind::Binary { op, .. } = first_kind(&program) else {
    panic!("expected a binary expression");
  };
  assert_eq!(op, &BinaryOp::Special("%between%".to_string()));
}

#[test]
fn right_assignment_direction() {
  let program = parse("1 -> x").unwrap();
  let ExpressionKind::Assign { assignment, .. } = first_kind(&program) else {
    panic!("expected an assignment");
  };
  assert_eq!(assignment.direction(), Direction::LeftToRight);
  assert_eq!(assignment.loc(), SrcLoc::new(1, 3));
}

#[test]
fn member_access_then_call() {
  assert_eq!(
    dumped("x$f(1)"),
    "\
Program:1:1
 Expression:1:1
  Expression:1:1
   Identifier:1:1
   Identifier:1:3
  SubList:1:5
   Sub:1:5
    Expression:1:5
     Constant:1:5
"
  );
}

#[test]
fn help_covers_assignment() {
  assert_eq!(
    dumped("?a <- b"),
    "\
Program:1:1
 Expression:1:1
  Help:1:1
   Expression:1:2
    Identifier:1:2
    Assignment:1:4
     Expression:1:7
      Identifier:1:7
"
  );
}

#[test]
fn statements_and_separators() {
  let program = parse("\n\na; b\n\nc d").unwrap();
  assert_eq!(program.loc(), SrcLoc::new(3, 1));
  let locs = program.expressions().iter().map(Expression::loc).collect::<Vec<_>>();
  assert_eq!(
    locs,
    vec![SrcLoc::new(3, 1), SrcLoc::new(3, 4), SrcLoc::new(5, 1), SrcLoc::new(5, 3)]
  );
  assert_eq!(parse("").unwrap().loc(), SrcLoc::new(1, 1));
  assert_eq!(parse("# nothing\n").unwrap().expressions().len(), 0);
}

#[test]
fn juxtaposed_block() {
  let program = parse("foo() {\n  list(    a,\n    b\n  )}").unwrap();
  assert_eq!(program.expressions().len(), 2);
  let Operand::Block(block) = program.expressions()[1].as_term().unwrap().operand() else {
    panic!("expected a block");
  };
  assert_eq!(block.loc(), SrcLoc::new(1, 7));
  assert_eq!(block.list().loc(), SrcLoc::new(2, 3));
}

#[test]
fn empty_block_positions() {
  let program = parse("{\n\n}").unwrap();
  let Operand::Block(block) = program.expressions()[0].as_term().unwrap().operand() else {
    panic!("expected a block");
  };
  assert!(block.list().expressions().is_empty());
  assert_eq!(block.list().loc(), SrcLoc::new(3, 1));
}

#[test]
fn else_on_next_line_inside_braces() {
  let program = parse("{\n  if (a) b\n  else c\n}").unwrap();
  let Operand::Block(block) = program.expressions()[0].as_term().unwrap().operand() else {
    panic!("expected a block");
  };
  let exprs = block.list().expressions();
  assert_eq!(exprs.len(), 1);
  let Operand::If(node) = exprs[0].as_term().unwrap().operand() else {
    panic!("expected an if");
  };
  assert_eq!(node.else_branch().map(Expression::loc), Some(SrcLoc::new(3, 8)));
}

#[test]
fn control_flow_nodes() {
  let program = parse("for (`my var` in xs) next\nrepeat break").unwrap();
  let Operand::For(node) = program.expressions()[0].as_term().unwrap().operand() else {
    panic!("expected a for loop");
  };
  assert_eq!(node.var().name(), "my var");
  assert!(node.var().is_quoted());
  let Operand::Identifier(body) = node.body().as_term().unwrap().operand() else {
    panic!("expected `next` as an identifier");
  };
  assert_eq!(body.name(), "next");

  let program = parse("function() NULL").unwrap();
  let Operand::Function(function) = program.expressions()[0].as_term().unwrap().operand() else {
    panic!("expected a function");
  };
  assert!(function.formals().is_none());

  let program = parse("function(a, b = 2, ...) a").unwrap();
  let Operand::Function(function) = program.expressions()[0].as_term().unwrap().operand() else {
    panic!("expected a function");
  };
  let formals = function.formals().unwrap();
  let names = formals.formals().iter().map(|f| f.name().name()).collect::<Vec<_>>();
  assert_eq!(names, vec!["a", "b", "..."]);
  assert!(formals.formals()[1].default().is_some());
  assert_eq!(formals.loc(), SrcLoc::new(1, 10));
}

#[test]
fn constants_keep_their_spelling() {
  let program = parse("c(0x1F, 1e-3, 2i, 'x', NA_real_)").unwrap();
  let sub = &program.expressions()[0].as_term().unwrap().sub_list().unwrap().subs()[0];
  let SubContent::Arguments(args) = sub.content() else {
    panic!("expected arguments");
  };
  let constants = args
    .slots()
    .iter()
    .filter_map(|slot| match slot {
      Argument::Value(expr) => match expr.as_term()?.operand() {
        Operand::Constant(constant) => Some((constant.kind(), constant.text().to_string())),
        _ => None,
      },
      _ => None,
    })
    .collect::<Vec<_>>();
  assert_eq!(
    constants,
    vec![
      (ConstantKind::Hex, "0x1F".to_string()),
      (ConstantKind::Float, "1e-3".to_string()),
      (ConstantKind::Complex, "2i".to_string()),
      (ConstantKind::String, "'x'".to_string()),
      (ConstantKind::Na, "NA_real_".to_string()),
    ]
  );
}

#[test]
fn parses_from_independent_threads() {
  let sources = ["a <- 1", "f(x)[[2]]", "function(a) { a + 1 }"];
  let dumps = std::thread::scope(|scope| {
    let handles = sources
      .iter()
      .map(|src| scope.spawn(move || dumped(src)))
      .collect::<Vec<_>>();
    handles
      .into_iter()
      .map(|handle| handle.join().unwrap())
      .collect::<Vec<_>>()
  });
  let sequential = sources.iter().map(|src| dumped(src)).collect::<Vec<_>>();
  assert_eq!(dumps, sequential);
}

#[test]
fn line_breaks_inside_expressions_keep_the_tree() {
  let pairs = [
    ("if (a ==b||\n c) x", "if (a == b || c) x"),
    ("function(a=b,c\n=d) e", "function(a = b, c = d) e"),
    ("x <-\n a +\n b", "x <- a + b"),
    ("f(a,\n  b)[\n1\n]", "f(a, b)[1]"),
    ("{\n  if (a) b\n  else c\n}", "{ if (a) b else c }"),
  ];
  for (multi_line, single_line) in pairs {
    assert_eq!(kinds_only(multi_line), kinds_only(single_line), "{multi_line:?}");
  }
}

#[test]
fn nesting_up_to_the_limit() {
  let depth = MAX_DEPTH - 4;
  let parens = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
  let else_ifs = format!("{}x", "if (a) x else ".repeat(depth / 2));
  let calls = format!("{}x{}", "f(".repeat(depth), ")".repeat(depth));
  for src in [parens, else_ifs, calls] {
    assert!(parse(&src).is_ok(), "{src:?}");
  }
}

#[test]
fn deep_nesting_is_refused() {
  let parens = format!("{}x{}", "(".repeat(500), ")".repeat(500));
  assert_eq!(parse(&parens), Err(Error::TooDeep { loc: SrcLoc::new(1, MAX_DEPTH as u32 + 1) }));

  let deep = [
    format!("{}x", "if (a) x else ".repeat(500)),
    format!("{}x{}", "{".repeat(500), "}".repeat(500)),
    format!("{}x{}", "f(".repeat(500), ")".repeat(500)),
    format!("{}x", "-".repeat(500)),
    format!("x{}", " ^ x".repeat(500)),
  ];
  for src in deep {
    let err = parse(&src).unwrap_err();
    assert!(matches!(err, Error::TooDeep { .. }), "{err:?}");
    assert!(!err.is_lexical());
    assert_eq!(err.to_string(), format!("expression nested too deeply at {}", err.loc()));
  }
}
