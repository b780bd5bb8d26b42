use super::stream::NewlineMode;
use super::{constant, identifier, sub_kind, PResult, Parser};
use crate::internal::{TokenKind as T, *};

impl<'a> Parser<'a> {
  /// Calls and subscripts trailing an operand, if any.
  pub(super) fn parse_sub_list(&mut self) -> PResult<Option<SubList>> {
    let mut subs = Vec::new();
    while let Some(kind) = sub_kind(self.tokens.peek_kind()?) {
      subs.push(self.parse_sub(kind)?);
    }
    let Some(first) = subs.first() else {
      return Ok(None);
    };
    Ok(Some(SubList { loc: first.loc, subs }))
  }

  fn parse_sub(&mut self, kind: SubKind) -> PResult<Sub> {
    self.tokens.advance()?;
    self.tokens.push_mode(NewlineMode::Ignored);
    let close = match kind {
      SubKind::Call => T::RParen,
      SubKind::Index | SubKind::DoubleIndex => T::RBracket,
    };
    let loc = self.tokens.peek()?.loc;
    let slots = self.parse_arguments(close)?;
    let closed = self.expect(close)?;
    if kind == SubKind::DoubleIndex {
      // `]]` closes only as two adjacent brackets
      let second = self.tokens.peek()?;
      if second.kind != T::RBracket || second.offset != closed.offset + 1 {
        return Err(self.unexpected(second, vec![Expected::Token(T::RBracket)]));
      }
      self.tokens.advance()?;
    }
    self.tokens.pop_mode();

    let content = match <[Argument; 1]>::try_from(slots) {
      Ok([Argument::Value(expr)]) => SubContent::Expression(expr),
      Ok([slot]) => SubContent::Arguments(Arguments { loc, slots: vec![slot] }),
      Err(slots) if slots.is_empty() => SubContent::Empty,
      Err(slots) => SubContent::Arguments(Arguments { loc, slots }),
    };
    Ok(Sub { loc, kind, content })
  }

  /// Comma-separated slots, up to but not including `close`. A comma always
  /// separates two slots, either of which may be elided.
  fn parse_arguments(&mut self, close: TokenKind) -> PResult<Vec<Argument>> {
    let mut slots = Vec::new();
    loop {
      let token = self.tokens.peek()?;
      if token.kind == close {
        if !slots.is_empty() {
          slots.push(Argument::Empty);
        }
        break;
      }
      let slot = if token.kind == T::Comma {
        Argument::Empty
      } else {
        self.parse_argument(close)?
      };
      slots.push(slot);

      let next = self.tokens.peek()?;
      match next.kind {
        T::Comma => {
          self.tokens.advance()?;
        }
        kind if kind == close => break,
        _ => {
          let expected = vec![Expected::Token(T::Comma), Expected::Token(close)];
          return Err(self.unexpected(next, expected));
        }
      }
    }
    Ok(slots)
  }

  fn parse_argument(&mut self, close: TokenKind) -> PResult<Argument> {
    let token = self.tokens.peek()?;
    if let Some(name) = arg_name(token) {
      if self.tokens.peek_nth(1)?.kind == T::EqAssign {
        self.tokens.advance()?;
        self.tokens.advance()?;
        let next = self.tokens.peek_kind()?;
        let value = if next == T::Comma || next == close {
          None
        } else {
          Some(self.parse_expr(0)?)
        };
        return Ok(Argument::Named { name, value });
      }
    }
    Ok(Argument::Value(self.parse_expr(0)?))
  }
}

fn arg_name(token: Token<'_>) -> Option<ArgName> {
  match token.kind {
    T::Ident | T::QuotedIdent => Some(ArgName::Identifier(identifier(token))),
    T::Str | T::Null => constant(token).map(ArgName::Constant),
    _ => None,
  }
}
