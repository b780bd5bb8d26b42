use crate::internal::{TokenKind as T, *};
use std::fmt;
use stream::{NewlineMode, TokenStream};
use thiserror::Error;

mod control;
mod stream;
mod subs;

#[cfg(test)]
mod tests;

type PResult<T> = Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {} at {loc}, expected one of {}", found_text(.found_kind, .found), expected_text(.expected))]
pub struct ParseError {
  pub found_kind: TokenKind,
  pub found: String,
  pub loc: SrcLoc,
  pub expected: Vec<Expected>,
}

/// A continuation the parser would have accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
  Token(TokenKind),
  Expression,
  Identifier,
  StatementEnd,
}

impl fmt::Display for Expected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expected::Token(kind) => write!(f, "{kind}"),
      Expected::Expression => f.write_str("expression"),
      Expected::Identifier => f.write_str("identifier"),
      Expected::StatementEnd => f.write_str("newline or `;`"),
    }
  }
}

fn found_text(kind: &TokenKind, lexeme: &str) -> String {
  match kind.class() {
    TokenClass::Identifier
    | TokenClass::QuotedIdentifier
    | TokenClass::Numeric(_)
    | TokenClass::String => format!("{kind} `{lexeme}`"),
    _ if *kind == T::Special => format!("`{lexeme}`"),
    _ => kind.to_string(),
  }
}

fn expected_text(expected: &[Expected]) -> String {
  expected
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

/// Binding power of an infix operator. Higher binds tighter; the side with
/// the larger value decides associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BindingPower {
  left: u8,
  right: u8,
}

impl BindingPower {
  const fn left_assoc(precedence: u8) -> Self {
    BindingPower { left: precedence, right: precedence + 1 }
  }

  const fn right_assoc(precedence: u8) -> Self {
    BindingPower { left: precedence + 1, right: precedence }
  }
}

// Lowest to highest. `?` and the prefix forms sit outside the table.
const HELP_TARGET: u8 = 10;
const ASSIGN: u8 = 10;
const RIGHT_ASSIGN: u8 = 15;
const TILDE: u8 = 20;
const OR: u8 = 30;
const AND: u8 = 40;
const NOT: u8 = 50;
const COMPARE: u8 = 60;
const ADD: u8 = 70;
const MUL: u8 = 80;
const SPECIAL: u8 = 90;
const RANGE: u8 = 100;
const SIGN: u8 = 110;
const POW: u8 = 120;
const SUBSET: u8 = 130;

/// Deepest expression nesting accepted. Deeper sources fail with
/// [`Error::TooDeep`].
pub const MAX_DEPTH: usize = 64;

const fn infix_binding_power(kind: TokenKind) -> Option<BindingPower> {
  let bp = match kind {
    T::LeftAssign | T::SuperLeftAssign | T::EqAssign | T::ColonAssign => {
      BindingPower::right_assoc(ASSIGN)
    }
    T::RightAssign | T::SuperRightAssign => BindingPower::left_assoc(RIGHT_ASSIGN),
    T::Tilde => BindingPower::left_assoc(TILDE),
    T::Or | T::OrOr => BindingPower::left_assoc(OR),
    T::And | T::AndAnd => BindingPower::left_assoc(AND),
    T::Eq | T::NotEq | T::Lt | T::LtEq | T::Gt | T::GtEq => BindingPower::left_assoc(COMPARE),
    T::Plus | T::Minus => BindingPower::left_assoc(ADD),
    T::Star | T::Slash => BindingPower::left_assoc(MUL),
    T::Special => BindingPower::left_assoc(SPECIAL),
    T::Colon => BindingPower::left_assoc(RANGE),
    T::Caret => BindingPower::right_assoc(POW),
    T::Dollar | T::At => BindingPower::left_assoc(SUBSET),
    _ => return None,
  };
  Some(bp)
}

/// Minimum binding power of a prefix operator's operand.
const fn prefix_binding_power(op: UnaryOp) -> u8 {
  match op {
    UnaryOp::Formula => TILDE + 1,
    UnaryOp::Not => NOT + 1,
    UnaryOp::Minus | UnaryOp::Plus => SIGN + 1,
  }
}

/// Tokens that may begin an expression, so also a juxtaposed statement.
const fn can_start_expression(kind: TokenKind) -> bool {
  matches!(
    kind,
    T::Ident
      | T::QuotedIdent
      | T::Num(_)
      | T::Str
      | T::True
      | T::False
      | T::Null
      | T::Inf
      | T::NaN
      | T::Na
      | T::If
      | T::Repeat
      | T::While
      | T::Function
      | T::For
      | T::Next
      | T::Break
      | T::LParen
      | T::LBrace
      | T::Minus
      | T::Plus
      | T::Not
      | T::Tilde
      | T::Question
  )
}

const fn sub_kind(kind: TokenKind) -> Option<SubKind> {
  match kind {
    T::LParen => Some(SubKind::Call),
    T::LBracket => Some(SubKind::Index),
    T::LBB => Some(SubKind::DoubleIndex),
    _ => None,
  }
}

#[derive(Debug)]
pub struct Parser<'a> {
  tokens: TokenStream<'a>,
  depth: usize,
}

impl<'a> Parser<'a> {
  pub fn new(src: &'a [u8]) -> Result<Self, LexError> {
    Ok(Parser::from_lexer(Lexer::new(src)?))
  }

  pub fn new_str(src: &'a str) -> Self {
    Parser::from_lexer(Lexer::new_str(src))
  }

  fn from_lexer(lexer: Lexer<'a>) -> Self {
    #[cfg(test)]
    tests::configure_test_tracing();

    Parser { tokens: TokenStream::new(lexer), depth: 0 }
  }

  /// Whole-source parse. Stops at the first fault.
  #[instrument(skip_all)]
  pub fn parse(mut self) -> Result<Program, Error> {
    match self.parse_program() {
      Ok(program) => {
        debug!(statements = program.exprs.len(), "parsed program");
        Ok(program)
      }
      Err(err) => {
        debug!(%err, "parse failed");
        Err(err)
      }
    }
  }

  fn parse_program(&mut self) -> PResult<Program> {
    let exprs = self.parse_statements(T::Eof)?;
    let loc = exprs.first().map_or(SrcLoc::start(), Expression::loc);
    Ok(Program { loc, exprs })
  }

  /// Statements up to, not including, `end`.
  fn parse_statements(&mut self, end: TokenKind) -> PResult<Vec<Expression>> {
    let mut exprs = Vec::new();
    loop {
      let token = self.tokens.peek()?;
      match token.kind {
        T::Newline | T::Semicolon => {
          self.tokens.advance()?;
        }
        kind if kind == end => return Ok(exprs),
        T::Eof => return Err(self.unexpected(token, vec![Expected::Token(end)])),
        _ => {
          exprs.push(self.parse_expr(0)?);
          let next = self.tokens.peek()?;
          let ends_statement = matches!(next.kind, T::Newline | T::Semicolon | T::Eof);
          if !ends_statement && next.kind != end && !can_start_expression(next.kind) {
            let expected = if end == T::Eof {
              vec![Expected::StatementEnd]
            } else {
              vec![Expected::StatementEnd, Expected::Token(end)]
            };
            return Err(self.unexpected(next, expected));
          }
        }
      }
    }
  }

  /// Every nested expression passes through here, so this is where nesting
  /// depth is counted.
  fn parse_expr(&mut self, min_bp: u8) -> PResult<Expression> {
    if self.depth >= MAX_DEPTH {
      let token = self.tokens.peek()?;
      trace!(depth = self.depth, loc = %token.loc, "nesting limit reached");
      return Err(Error::TooDeep { loc: token.loc });
    }
    self.depth += 1;
    let expr = self.parse_binding(min_bp);
    self.depth -= 1;
    expr
  }

  fn parse_binding(&mut self, min_bp: u8) -> PResult<Expression> {
    let start = self.tokens.peek()?;
    let mut lhs = self.parse_prefix(start)?;
    loop {
      let op = self.tokens.peek()?;
      if sub_kind(op.kind).is_some() {
        // only reachable after `$` or `@`, whose right side takes no subs
        let sub_list = self.parse_sub_list()?;
        lhs = Expression {
          loc: start.loc,
          kind: ExpressionKind::Term(Term {
            operand: Operand::Expression(Box::new(lhs)),
            sub_list,
          }),
        };
        continue;
      }
      let Some(bp) = infix_binding_power(op.kind) else {
        break;
      };
      if bp.left < min_bp {
        break;
      }
      self.tokens.advance()?;
      self.tokens.skip_newlines()?;
      let rhs = if matches!(op.kind, T::Dollar | T::At) {
        let first = self.tokens.peek()?;
        let operand = self.parse_operand()?;
        Expression {
          loc: first.loc,
          kind: ExpressionKind::Term(Term { operand, sub_list: None }),
        }
      } else {
        self.parse_expr(bp.right)?
      };
      lhs = self.combine(start.loc, lhs, op, rhs)?;
    }
    Ok(lhs)
  }

  fn parse_prefix(&mut self, start: Token<'a>) -> PResult<Expression> {
    if let Some(op) = UnaryOp::from_token(start.kind) {
      self.tokens.advance()?;
      self.tokens.skip_newlines()?;
      let operand = self.parse_expr(prefix_binding_power(op))?;
      return Ok(Expression {
        loc: start.loc,
        kind: ExpressionKind::Unary { op, operand: Term::from(operand) },
      });
    }
    if start.kind == T::Question {
      self.tokens.advance()?;
      self.tokens.skip_newlines()?;
      let target = self.parse_expr(HELP_TARGET)?;
      let help = Help { loc: start.loc, target: Box::new(target) };
      return Ok(Expression {
        loc: start.loc,
        kind: ExpressionKind::Term(Term { operand: Operand::Help(help), sub_list: None }),
      });
    }
    let term = self.parse_term()?;
    Ok(Expression { loc: start.loc, kind: ExpressionKind::Term(term) })
  }

  fn parse_term(&mut self) -> PResult<Term> {
    let operand = self.parse_operand()?;
    let sub_list = self.parse_sub_list()?;
    Ok(Term { operand, sub_list })
  }

  fn parse_operand(&mut self) -> PResult<Operand> {
    let token = self.tokens.peek()?;
    if let Some(constant) = constant(token) {
      self.tokens.advance()?;
      return Ok(Operand::Constant(constant));
    }
    let operand = match token.kind {
      T::Ident | T::QuotedIdent | T::Next | T::Break => {
        self.tokens.advance()?;
        Operand::Identifier(identifier(token))
      }
      T::LParen => {
        self.tokens.advance()?;
        self.tokens.push_mode(NewlineMode::Ignored);
        let inner = self.parse_expr(0)?;
        self.expect(T::RParen)?;
        self.tokens.pop_mode();
        Operand::Parenthesized(Box::new(inner))
      }
      T::LBrace => Operand::Block(self.parse_block()?),
      T::Function => Operand::Function(self.parse_function()?),
      T::If => Operand::If(self.parse_if()?),
      T::For => Operand::For(self.parse_for()?),
      T::While => Operand::While(self.parse_while()?),
      T::Repeat => Operand::Repeat(self.parse_repeat()?),
      _ => return Err(self.unexpected(token, vec![Expected::Expression])),
    };
    Ok(operand)
  }

  fn combine(
    &self,
    loc: SrcLoc,
    lhs: Expression,
    op: Token<'_>,
    rhs: Expression,
  ) -> PResult<Expression> {
    if let Some(op_kind) = AssignOp::from_token(op.kind) {
      let assignment = Assignment { loc: op.loc, op: op_kind, value: Box::new(rhs) };
      return Ok(Expression {
        loc,
        kind: ExpressionKind::Assign { lhs: Term::from(lhs), assignment },
      });
    }
    let Some(op_kind) = BinaryOp::from_token(&op) else {
      return Err(self.unexpected(op, vec![Expected::StatementEnd]));
    };
    Ok(Expression {
      loc,
      kind: ExpressionKind::Binary {
        op: op_kind,
        lhs: Term::from(lhs),
        rhs: Term::from(rhs),
      },
    })
  }

  /// Consumes `kind` or fails naming it as the only continuation.
  fn expect(&mut self, kind: TokenKind) -> PResult<Token<'a>> {
    let token = self.tokens.peek()?;
    if token.kind != kind {
      return Err(self.unexpected(token, vec![Expected::Token(kind)]));
    }
    Ok(self.tokens.advance()?)
  }

  fn unexpected(&self, token: Token<'_>, expected: Vec<Expected>) -> Error {
    Error::Parse(ParseError {
      found_kind: token.kind,
      found: token.lexeme.to_string(),
      loc: token.loc,
      expected,
    })
  }
}

fn identifier(token: Token<'_>) -> Identifier {
  let quoted = token.kind == T::QuotedIdent;
  let name = if quoted {
    token
      .lexeme
      .strip_prefix('`')
      .and_then(|name| name.strip_suffix('`'))
      .unwrap_or(token.lexeme)
  } else {
    token.lexeme
  };
  Identifier { loc: token.loc, name: name.to_string(), quoted }
}

fn constant(token: Token<'_>) -> Option<Constant> {
  ConstantKind::from_token(token.kind).map(|kind| Constant {
    loc: token.loc,
    kind,
    text: token.lexeme.to_string(),
  })
}
