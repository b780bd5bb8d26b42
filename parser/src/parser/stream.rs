use crate::internal::{TokenKind as T, *};
use std::collections::VecDeque;

/// Whether line breaks end statements in the current bracket context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NewlineMode {
  /// Inside `{ }` and at top level.
  Significant,
  /// Inside `( )`, `[ ]` and `[[ ]]`.
  Ignored,
}

/// Parser view of the lexer: comments dropped, newlines hidden while the
/// innermost bracket ignores them, tokens pulled lazily.
#[derive(Debug)]
pub(super) struct TokenStream<'a> {
  lexer: Lexer<'a>,
  buffer: VecDeque<Token<'a>>,
  modes: Vec<NewlineMode>,
  eof: Option<Token<'a>>,
}

impl<'a> TokenStream<'a> {
  pub fn new(lexer: Lexer<'a>) -> Self {
    TokenStream {
      lexer,
      buffer: VecDeque::with_capacity(8),
      modes: Vec::with_capacity(16),
      eof: None,
    }
  }

  pub fn peek(&mut self) -> Result<Token<'a>, LexError> {
    self.peek_nth(0)
  }

  pub fn peek_kind(&mut self) -> Result<TokenKind, LexError> {
    Ok(self.peek()?.kind)
  }

  /// The `n`th visible token ahead, zero-based.
  pub fn peek_nth(&mut self, n: usize) -> Result<Token<'a>, LexError> {
    let skip_newlines = self.newlines_ignored();
    let mut seen = 0;
    let mut idx = 0;
    loop {
      let token = self.buffered(idx)?;
      if token.kind == T::Eof || !(skip_newlines && token.kind == T::Newline) {
        if seen == n || token.kind == T::Eof {
          return Ok(token);
        }
        seen += 1;
      }
      idx += 1;
    }
  }

  pub fn advance(&mut self) -> Result<Token<'a>, LexError> {
    if self.newlines_ignored() {
      self.drop_newlines()?;
    }
    let token = self.buffered(0)?;
    if token.kind != T::Eof {
      self.buffer.pop_front();
    }
    Ok(token)
  }

  pub fn skip_newlines(&mut self) -> Result<(), LexError> {
    self.drop_newlines()
  }

  /// Kind of the next token that is not a newline, whatever the mode.
  pub fn peek_past_newlines(&mut self) -> Result<TokenKind, LexError> {
    let mut idx = 0;
    loop {
      let token = self.buffered(idx)?;
      if token.kind != T::Newline {
        return Ok(token.kind);
      }
      idx += 1;
    }
  }

  pub fn push_mode(&mut self, mode: NewlineMode) {
    self.modes.push(mode);
  }

  pub fn pop_mode(&mut self) {
    self.modes.pop();
  }

  /// True when inside any bracket at all.
  pub fn is_nested(&self) -> bool {
    !self.modes.is_empty()
  }

  fn newlines_ignored(&self) -> bool {
    self.modes.last() == Some(&NewlineMode::Ignored)
  }

  fn drop_newlines(&mut self) -> Result<(), LexError> {
    while self.buffered(0)?.kind == T::Newline {
      self.buffer.pop_front();
    }
    Ok(())
  }

  fn buffered(&mut self, idx: usize) -> Result<Token<'a>, LexError> {
    while self.buffer.len() <= idx {
      if let Some(eof) = self.eof {
        return Ok(eof);
      }
      let token = self.pull()?;
      self.buffer.push_back(token);
    }
    Ok(self.buffer[idx])
  }

  fn pull(&mut self) -> Result<Token<'a>, LexError> {
    loop {
      let token = self.lexer.next_token()?;
      trace!(kind = ?token.kind, lexeme = token.lexeme, line = token.loc.line, col = token.loc.col);
      match token.kind {
        T::Comment => continue,
        T::Eof => {
          self.eof = Some(token);
          return Ok(token);
        }
        _ => return Ok(token),
      }
    }
  }
}
