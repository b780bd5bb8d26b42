use crate::internal::*;
use thiserror::Error;

/// Why a parse failed. Lexical and syntactic faults stay distinct, and so does
/// a source nested deeper than the parser accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Lex(#[from] LexError),
  #[error(transparent)]
  Parse(#[from] ParseError),
  #[error("expression nested too deeply at {loc}")]
  TooDeep { loc: SrcLoc },
}

impl Error {
  pub const fn loc(&self) -> SrcLoc {
    match self {
      Error::Lex(err) => err.loc(),
      Error::Parse(err) => err.loc,
      Error::TooDeep { loc } => *loc,
    }
  }

  pub const fn is_lexical(&self) -> bool {
    matches!(self, Error::Lex(_))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub line: u32,
  pub col: u32,
  pub width: u32,
  pub msg: String,
}

impl From<&Error> for Diagnostic {
  fn from(err: &Error) -> Self {
    let loc = err.loc();
    let width = match err {
      Error::Lex(LexError::InvalidIdentifier { lexeme, .. })
      | Error::Lex(LexError::InvalidNumber { lexeme, .. }) => lexeme.chars().count(),
      Error::Lex(_) | Error::TooDeep { .. } => 1,
      Error::Parse(err) => err.found.chars().count(),
    };
    Diagnostic {
      line: loc.line,
      col: loc.col,
      width: width.max(1) as u32,
      msg: err.to_string(),
    }
  }
}
