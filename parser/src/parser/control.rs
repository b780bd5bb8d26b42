use super::stream::NewlineMode;
use super::{identifier, PResult, Parser};
use crate::internal::{TokenKind as T, *};

impl<'a> Parser<'a> {
  #[instrument(skip_all)]
  pub(super) fn parse_block(&mut self) -> PResult<Block> {
    let open = self.expect(T::LBrace)?;
    self.tokens.push_mode(NewlineMode::Significant);
    let exprs = self.parse_statements(T::RBrace)?;
    let close = self.expect(T::RBrace)?;
    self.tokens.pop_mode();
    let loc = exprs.first().map_or(close.loc, Expression::loc);
    Ok(Block { loc: open.loc, list: ExpressionList { loc, exprs } })
  }

  #[instrument(skip_all)]
  pub(super) fn parse_function(&mut self) -> PResult<Function> {
    let keyword = self.expect(T::Function)?;
    self.expect(T::LParen)?;
    self.tokens.push_mode(NewlineMode::Ignored);
    let forms = self.parse_form_list()?;
    self.expect(T::RParen)?;
    self.tokens.pop_mode();
    self.tokens.skip_newlines()?;
    let body = self.parse_expr(0)?;
    Ok(Function { loc: keyword.loc, forms, body: Box::new(body) })
  }

  /// Formals up to the closing paren; `None` when there are none.
  fn parse_form_list(&mut self) -> PResult<Option<FormList>> {
    if self.tokens.peek_kind()? == T::RParen {
      return Ok(None);
    }
    let mut forms = Vec::new();
    loop {
      let name = self.expect_name()?;
      let default = if self.tokens.peek_kind()? == T::EqAssign {
        self.tokens.advance()?;
        Some(self.parse_expr(0)?)
      } else {
        None
      };
      forms.push(Formal { name, default });
      let next = self.tokens.peek()?;
      match next.kind {
        T::Comma => {
          self.tokens.advance()?;
        }
        T::RParen => break,
        _ => {
          let expected = vec![Expected::Token(T::Comma), Expected::Token(T::RParen)];
          return Err(self.unexpected(next, expected));
        }
      }
    }
    let loc = forms.first().map_or(SrcLoc::start(), |formal| formal.name.loc);
    Ok(Some(FormList { loc, forms }))
  }

  #[instrument(skip_all)]
  pub(super) fn parse_if(&mut self) -> PResult<If> {
    let keyword = self.expect(T::If)?;
    let cond = self.parse_condition()?;
    self.tokens.skip_newlines()?;
    let then = self.parse_expr(0)?;

    // a line break before `else` ends the statement unless inside brackets
    let has_else = if self.tokens.is_nested() {
      self.tokens.peek_past_newlines()? == T::Else
    } else {
      self.tokens.peek_kind()? == T::Else
    };
    let otherwise = if has_else {
      self.tokens.skip_newlines()?;
      self.expect(T::Else)?;
      self.tokens.skip_newlines()?;
      Some(Box::new(self.parse_expr(0)?))
    } else {
      None
    };
    Ok(If { loc: keyword.loc, cond, then: Box::new(then), otherwise })
  }

  #[instrument(skip_all)]
  pub(super) fn parse_for(&mut self) -> PResult<For> {
    let keyword = self.expect(T::For)?;
    self.expect(T::LParen)?;
    self.tokens.push_mode(NewlineMode::Ignored);
    let var = self.expect_name()?;
    self.expect(T::In)?;
    let seq = self.parse_expr(0)?;
    self.expect(T::RParen)?;
    self.tokens.pop_mode();
    self.tokens.skip_newlines()?;
    let body = self.parse_expr(0)?;
    Ok(For {
      loc: keyword.loc,
      var,
      seq: Box::new(seq),
      body: Box::new(body),
    })
  }

  #[instrument(skip_all)]
  pub(super) fn parse_while(&mut self) -> PResult<While> {
    let keyword = self.expect(T::While)?;
    let cond = self.parse_condition()?;
    self.tokens.skip_newlines()?;
    let body = self.parse_expr(0)?;
    Ok(While { loc: keyword.loc, cond, body: Box::new(body) })
  }

  #[instrument(skip_all)]
  pub(super) fn parse_repeat(&mut self) -> PResult<Repeat> {
    let keyword = self.expect(T::Repeat)?;
    self.tokens.skip_newlines()?;
    let body = self.parse_expr(0)?;
    Ok(Repeat { loc: keyword.loc, body: Box::new(body) })
  }

  /// `( expr )` of an `if` or `while`.
  fn parse_condition(&mut self) -> PResult<Condition> {
    self.expect(T::LParen)?;
    self.tokens.push_mode(NewlineMode::Ignored);
    let first = self.tokens.peek()?;
    let expr = self.parse_expr(0)?;
    self.expect(T::RParen)?;
    self.tokens.pop_mode();
    Ok(Condition { loc: first.loc, expr: Box::new(expr) })
  }

  fn expect_name(&mut self) -> PResult<Identifier> {
    let token = self.tokens.peek()?;
    if !matches!(token.kind, T::Ident | T::QuotedIdent) {
      return Err(self.unexpected(token, vec![Expected::Identifier]));
    }
    self.tokens.advance()?;
    Ok(identifier(token))
  }
}
