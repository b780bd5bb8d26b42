use crate::internal::{TokenKind as T, *};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
  #[error("unexpected character {ch:?} at {loc}")]
  UnexpectedChar { ch: char, loc: SrcLoc },
  #[error("invalid identifier `{lexeme}` at {loc}")]
  InvalidIdentifier { lexeme: String, loc: SrcLoc },
  #[error("invalid numeric constant `{lexeme}` at {loc}")]
  InvalidNumber { lexeme: String, loc: SrcLoc },
  #[error("unterminated string constant starting at {loc}")]
  UnterminatedString { loc: SrcLoc },
  #[error("unterminated quoted identifier starting at {loc}")]
  UnterminatedQuotedIdent { loc: SrcLoc },
  #[error("unterminated special operator starting at {loc}")]
  UnterminatedSpecialOp { loc: SrcLoc },
  #[error("invalid utf-8 at {loc}")]
  InvalidUtf8 { loc: SrcLoc },
}

impl LexError {
  pub const fn loc(&self) -> SrcLoc {
    match self {
      LexError::UnexpectedChar { loc, .. }
      | LexError::InvalidIdentifier { loc, .. }
      | LexError::InvalidNumber { loc, .. }
      | LexError::UnterminatedString { loc }
      | LexError::UnterminatedQuotedIdent { loc }
      | LexError::UnterminatedSpecialOp { loc }
      | LexError::InvalidUtf8 { loc } => *loc,
    }
  }
}

/// A resumable position in the source. Tokenizing from a cursor yields the
/// token and the cursor just past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
  pub offset: usize,
  pub loc: SrcLoc,
}

impl Cursor {
  pub const fn start() -> Self {
    Cursor { offset: 0, loc: SrcLoc::start() }
  }
}

#[derive(Debug)]
pub struct Lexer<'a> {
  src: &'a str,
  cursor: Cursor,
}

impl<'a> Lexer<'a> {
  pub fn new(src: &'a [u8]) -> Result<Self, LexError> {
    let src = std::str::from_utf8(src).map_err(|err| LexError::InvalidUtf8 {
      loc: SrcLoc::of_offset(src, err.valid_up_to()),
    })?;
    Ok(Self::new_str(src))
  }

  pub const fn new_str(src: &'a str) -> Self {
    Lexer { src, cursor: Cursor::start() }
  }

  pub const fn cursor(&self) -> Cursor {
    self.cursor
  }

  /// Every token up to and including `Eof`, comments and newlines included.
  pub fn lex(mut self) -> Result<Vec<Token<'a>>, LexError> {
    let mut tokens = Vec::with_capacity(64);
    loop {
      let token = self.next_token()?;
      tokens.push(token);
      if token.kind == T::Eof {
        return Ok(tokens);
      }
    }
  }

  pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
    let (token, next) = self.token_at(self.cursor)?;
    self.cursor = next;
    Ok(token)
  }

  /// Tokenizes at `cursor` without touching the lexer's own cursor.
  pub fn token_at(&self, cursor: Cursor) -> Result<(Token<'a>, Cursor), LexError> {
    let mut scan = Scan { src: self.src, cursor, start: cursor };
    scan.skip_blanks();
    scan.start = scan.cursor;
    let kind = scan.token()?;
    let start = scan.start;
    let lexeme = &self.src[start.offset..scan.cursor.offset];
    Ok((Token::new(kind, lexeme, start.loc, start.offset), scan.cursor))
  }
}

struct Scan<'a> {
  src: &'a str,
  cursor: Cursor,
  start: Cursor,
}

impl Scan<'_> {
  fn token(&mut self) -> Result<TokenKind, LexError> {
    let Some(ch) = self.peek() else {
      return Ok(T::Eof);
    };
    let kind = match ch {
      '\n' => self.single(T::Newline),
      '#' => {
        self.eat_while(|c| c != '\n');
        T::Comment
      }
      '"' | '\'' => self.string(ch)?,
      '`' => self.quoted_ident()?,
      '%' => self.special()?,
      '0'..='9' => self.number()?,
      '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.number()?,
      c if is_ident_start(c) => self.ident(),
      '_' => {
        self.eat_while(is_ident_char);
        return Err(self.invalid_identifier());
      }
      '<' => self.op(&[("<<-", T::SuperLeftAssign), ("<-", T::LeftAssign), ("<=", T::LtEq)], T::Lt),
      '-' => self.op(&[("->>", T::SuperRightAssign), ("->", T::RightAssign)], T::Minus),
      ':' => self.op(&[(":=", T::ColonAssign)], T::Colon),
      '=' => self.op(&[("==", T::Eq)], T::EqAssign),
      '!' => self.op(&[("!=", T::NotEq)], T::Not),
      '>' => self.op(&[(">=", T::GtEq)], T::Gt),
      '&' => self.op(&[("&&", T::AndAnd)], T::And),
      '|' => self.op(&[("||", T::OrOr)], T::Or),
      '*' => self.op(&[("**", T::Caret)], T::Star),
      '[' => self.op(&[("[[", T::LBB)], T::LBracket),
      '+' => self.single(T::Plus),
      '/' => self.single(T::Slash),
      '^' => self.single(T::Caret),
      '~' => self.single(T::Tilde),
      '?' => self.single(T::Question),
      '$' => self.single(T::Dollar),
      '@' => self.single(T::At),
      '(' => self.single(T::LParen),
      ')' => self.single(T::RParen),
      '{' => self.single(T::LBrace),
      '}' => self.single(T::RBrace),
      ']' => self.single(T::RBracket),
      ',' => self.single(T::Comma),
      ';' => self.single(T::Semicolon),
      ch => return Err(LexError::UnexpectedChar { ch, loc: self.start.loc }),
    };
    Ok(kind)
  }

  fn single(&mut self, kind: TokenKind) -> TokenKind {
    self.bump();
    kind
  }

  /// Longest spelling first; falls back to the one-char operator.
  fn op(&mut self, spellings: &[(&str, TokenKind)], fallback: TokenKind) -> TokenKind {
    for &(spelling, kind) in spellings {
      if self.rest().starts_with(spelling) {
        for _ in spelling.chars() {
          self.bump();
        }
        return kind;
      }
    }
    self.single(fallback)
  }

  fn string(&mut self, quote: char) -> Result<TokenKind, LexError> {
    self.bump();
    loop {
      match self.bump() {
        None => return Err(LexError::UnterminatedString { loc: self.start.loc }),
        Some('\\') => {
          if self.bump().is_none() {
            return Err(LexError::UnterminatedString { loc: self.start.loc });
          }
        }
        Some(c) if c == quote => return Ok(T::Str),
        Some(_) => {}
      }
    }
  }

  fn quoted_ident(&mut self) -> Result<TokenKind, LexError> {
    self.bump();
    loop {
      match self.bump() {
        None => return Err(LexError::UnterminatedQuotedIdent { loc: self.start.loc }),
        Some('\\') => {
          if self.bump().is_none() {
            return Err(LexError::UnterminatedQuotedIdent { loc: self.start.loc });
          }
        }
        Some('`') => return Ok(T::QuotedIdent),
        Some(_) => {}
      }
    }
  }

  // `%...%` never spans lines
  fn special(&mut self) -> Result<TokenKind, LexError> {
    self.bump();
    loop {
      match self.peek() {
        None | Some('\n') => return Err(LexError::UnterminatedSpecialOp { loc: self.start.loc }),
        Some('%') => {
          self.bump();
          return Ok(T::Special);
        }
        Some(_) => {
          self.bump();
        }
      }
    }
  }

  fn number(&mut self) -> Result<TokenKind, LexError> {
    let mut kind = NumKind::Integer;
    if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
      self.bump();
      self.bump();
      if self.eat_while(|c| c.is_ascii_hexdigit()) == 0 {
        self.eat_while(is_ident_char);
        return Err(self.invalid_number());
      }
      kind = NumKind::Hex;
    } else {
      self.eat_while(|c| c.is_ascii_digit());
      if self.peek() == Some('.') {
        self.bump();
        self.eat_while(|c| c.is_ascii_digit());
        kind = NumKind::Float;
      }
      if matches!(self.peek(), Some('e' | 'E')) {
        let signed = matches!(self.peek_at(1), Some('+' | '-'));
        let first_digit = if signed { 2 } else { 1 };
        if self.peek_at(first_digit).is_some_and(|c| c.is_ascii_digit()) {
          self.bump();
          if signed {
            self.bump();
          }
          self.eat_while(|c| c.is_ascii_digit());
          kind = NumKind::Float;
        }
      }
    }

    // `L` and `i` exclude each other in either order
    match (self.peek(), self.peek_at(1)) {
      (Some('L'), Some('i')) | (Some('i'), Some('L')) => {
        self.eat_while(is_ident_char);
        return Err(self.invalid_number());
      }
      (Some('L'), _) => {
        self.bump();
      }
      (Some('i'), _) => {
        self.bump();
        kind = NumKind::Complex;
      }
      _ => {}
    }

    // `2foo`, `.2foo`: a name can't start with a digit
    if self.peek().is_some_and(is_ident_char) {
      self.eat_while(is_ident_char);
      return Err(self.invalid_identifier());
    }
    Ok(T::Num(kind))
  }

  fn ident(&mut self) -> TokenKind {
    self.eat_while(is_ident_char);
    match self.lexeme() {
      "if" => T::If,
      "else" => T::Else,
      "repeat" => T::Repeat,
      "while" => T::While,
      "function" => T::Function,
      "for" => T::For,
      "in" => T::In,
      "next" => T::Next,
      "break" => T::Break,
      "TRUE" => T::True,
      "FALSE" => T::False,
      "NULL" => T::Null,
      "Inf" => T::Inf,
      "NaN" => T::NaN,
      "NA" | "NA_integer_" | "NA_real_" | "NA_character_" | "NA_complex_" => T::Na,
      _ => T::Ident,
    }
  }

  fn invalid_identifier(&self) -> LexError {
    LexError::InvalidIdentifier {
      lexeme: self.lexeme().to_string(),
      loc: self.start.loc,
    }
  }

  fn invalid_number(&self) -> LexError {
    LexError::InvalidNumber {
      lexeme: self.lexeme().to_string(),
      loc: self.start.loc,
    }
  }

  fn skip_blanks(&mut self) {
    // form feed and friends are blanks, newlines are tokens
    self.eat_while(|c| c != '\n' && c.is_whitespace());
  }

  fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
    let mut count = 0;
    while self.peek().is_some_and(&pred) {
      self.bump();
      count += 1;
    }
    count
  }

  fn bump(&mut self) -> Option<char> {
    let ch = self.peek()?;
    self.cursor.offset += ch.len_utf8();
    if ch == '\n' {
      self.cursor.loc.line += 1;
      self.cursor.loc.col = 1;
    } else {
      self.cursor.loc.col += 1;
    }
    Some(ch)
  }

  fn rest(&self) -> &str {
    &self.src[self.cursor.offset..]
  }

  fn lexeme(&self) -> &str {
    &self.src[self.start.offset..self.cursor.offset]
  }

  fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn peek_at(&self, n: usize) -> Option<char> {
    self.rest().chars().nth(n)
  }
}

fn is_ident_start(c: char) -> bool {
  c.is_alphabetic() || c == '.'
}

fn is_ident_char(c: char) -> bool {
  c.is_alphanumeric() || c == '.' || c == '_'
}
