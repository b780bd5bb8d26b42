use crate::src_loc::SrcLoc;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumKind {
  Integer,
  Float,
  Hex,
  Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Ident,
  QuotedIdent,
  Num(NumKind),
  Str,
  // keywords
  If,
  Else,
  Repeat,
  While,
  Function,
  For,
  In,
  Next,
  Break,
  // constant keywords
  True,
  False,
  Null,
  Inf,
  NaN,
  Na,
  // assignment
  LeftAssign,
  SuperLeftAssign,
  RightAssign,
  SuperRightAssign,
  EqAssign,
  ColonAssign,
  // operators
  Eq,
  NotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  And,
  AndAnd,
  Or,
  OrOr,
  Not,
  Plus,
  Minus,
  Star,
  Slash,
  Caret,
  Colon,
  Tilde,
  Question,
  Dollar,
  At,
  Special,
  // punctuation
  LParen,
  RParen,
  LBrace,
  RBrace,
  LBracket,
  LBB,
  RBracket,
  Comma,
  Semicolon,
  Newline,
  Comment,
  Eof,
}

/// The coarse token categories of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
  Identifier,
  QuotedIdentifier,
  Numeric(NumKind),
  String,
  Keyword,
  Operator,
  Punctuation,
  Comment,
  EndOfInput,
}

impl TokenKind {
  pub const fn class(self) -> TokenClass {
    use TokenKind as T;
    match self {
      T::Ident => TokenClass::Identifier,
      T::QuotedIdent => TokenClass::QuotedIdentifier,
      T::Num(kind) => TokenClass::Numeric(kind),
      T::Str => TokenClass::String,
      T::If
      | T::Else
      | T::Repeat
      | T::While
      | T::Function
      | T::For
      | T::In
      | T::Next
      | T::Break
      | T::True
      | T::False
      | T::Null
      | T::Inf
      | T::NaN
      | T::Na => TokenClass::Keyword,
      T::LeftAssign
      | T::SuperLeftAssign
      | T::RightAssign
      | T::SuperRightAssign
      | T::EqAssign
      | T::ColonAssign
      | T::Eq
      | T::NotEq
      | T::Lt
      | T::LtEq
      | T::Gt
      | T::GtEq
      | T::And
      | T::AndAnd
      | T::Or
      | T::OrOr
      | T::Not
      | T::Plus
      | T::Minus
      | T::Star
      | T::Slash
      | T::Caret
      | T::Colon
      | T::Tilde
      | T::Question
      | T::Dollar
      | T::At
      | T::Special => TokenClass::Operator,
      T::LParen
      | T::RParen
      | T::LBrace
      | T::RBrace
      | T::LBracket
      | T::LBB
      | T::RBracket
      | T::Comma
      | T::Semicolon
      | T::Newline => TokenClass::Punctuation,
      T::Comment => TokenClass::Comment,
      T::Eof => TokenClass::EndOfInput,
    }
  }

  /// Fixed spelling, or a label for kinds with free-form lexemes.
  pub const fn describe(self) -> &'static str {
    use TokenKind as T;
    match self {
      T::Ident => "identifier",
      T::QuotedIdent => "quoted identifier",
      T::Num(_) => "numeric constant",
      T::Str => "string constant",
      T::If => "if",
      T::Else => "else",
      T::Repeat => "repeat",
      T::While => "while",
      T::Function => "function",
      T::For => "for",
      T::In => "in",
      T::Next => "next",
      T::Break => "break",
      T::True => "TRUE",
      T::False => "FALSE",
      T::Null => "NULL",
      T::Inf => "Inf",
      T::NaN => "NaN",
      T::Na => "NA",
      T::LeftAssign => "<-",
      T::SuperLeftAssign => "<<-",
      T::RightAssign => "->",
      T::SuperRightAssign => "->>",
      T::EqAssign => "=",
      T::ColonAssign => ":=",
      T::Eq => "==",
      T::NotEq => "!=",
      T::Lt => "<",
      T::LtEq => "<=",
      T::Gt => ">",
      T::GtEq => ">=",
      T::And => "&",
      T::AndAnd => "&&",
      T::Or => "|",
      T::OrOr => "||",
      T::Not => "!",
      T::Plus => "+",
      T::Minus => "-",
      T::Star => "*",
      T::Slash => "/",
      T::Caret => "^",
      T::Colon => ":",
      T::Tilde => "~",
      T::Question => "?",
      T::Dollar => "$",
      T::At => "@",
      T::Special => "special operator",
      T::LParen => "(",
      T::RParen => ")",
      T::LBrace => "{",
      T::RBrace => "}",
      T::LBracket => "[",
      T::LBB => "[[",
      T::RBracket => "]",
      T::Comma => ",",
      T::Semicolon => ";",
      T::Newline => "newline",
      T::Comment => "comment",
      T::Eof => "end of input",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.class() {
      TokenClass::Operator | TokenClass::Keyword | TokenClass::Punctuation
        if !matches!(self, TokenKind::Special | TokenKind::Newline) =>
      {
        write!(f, "`{}`", self.describe())
      }
      _ => f.write_str(self.describe()),
    }
  }
}

/// A classified slice of the source. Borrows its lexeme from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub lexeme: &'a str,
  pub loc: SrcLoc,
  /// Byte offset of the lexeme's first byte.
  pub offset: usize,
}

impl<'a> Token<'a> {
  pub const fn new(kind: TokenKind, lexeme: &'a str, loc: SrcLoc, offset: usize) -> Self {
    Token { kind, lexeme, loc, offset }
  }
}
