use crate::internal::{TokenKind as T, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
  /// `<-`
  Left,
  /// `<<-`
  SuperLeft,
  /// `->`
  Right,
  /// `->>`
  SuperRight,
  /// `=`
  Equals,
  /// `:=`
  Colon,
}

/// Which operand receives the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  /// `target <- value`
  RightToLeft,
  /// `value -> target`
  LeftToRight,
}

impl AssignOp {
  pub const fn from_token(kind: TokenKind) -> Option<Self> {
    match kind {
      T::LeftAssign => Some(AssignOp::Left),
      T::SuperLeftAssign => Some(AssignOp::SuperLeft),
      T::RightAssign => Some(AssignOp::Right),
      T::SuperRightAssign => Some(AssignOp::SuperRight),
      T::EqAssign => Some(AssignOp::Equals),
      T::ColonAssign => Some(AssignOp::Colon),
      _ => None,
    }
  }

  pub const fn direction(self) -> Direction {
    match self {
      AssignOp::Right | AssignOp::SuperRight => Direction::LeftToRight,
      AssignOp::Left | AssignOp::SuperLeft | AssignOp::Equals | AssignOp::Colon => {
        Direction::RightToLeft
      }
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      AssignOp::Left => "<-",
      AssignOp::SuperLeft => "<<-",
      AssignOp::Right => "->",
      AssignOp::SuperRight => "->>",
      AssignOp::Equals => "=",
      AssignOp::Colon => ":=",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Formula,
  Or,
  OrOr,
  And,
  AndAnd,
  Eq,
  NotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  Add,
  Sub,
  Mul,
  Div,
  /// `%%`
  Modulo,
  /// `%/%`
  IntDiv,
  /// `%*%`
  MatMul,
  /// `%o%`
  Outer,
  /// `%x%`
  Kronecker,
  /// `%in%`
  Match,
  /// Any other `%name%`, holding the full spelling.
  Special(String),
  Range,
  Pow,
  ListSubset,
  Slot,
}

impl BinaryOp {
  pub fn from_token(token: &Token<'_>) -> Option<Self> {
    let op = match token.kind {
      T::Tilde => BinaryOp::Formula,
      T::Or => BinaryOp::Or,
      T::OrOr => BinaryOp::OrOr,
      T::And => BinaryOp::And,
      T::AndAnd => BinaryOp::AndAnd,
      T::Eq => BinaryOp::Eq,
      T::NotEq => BinaryOp::NotEq,
      T::Lt => BinaryOp::Lt,
      T::LtEq => BinaryOp::LtEq,
      T::Gt => BinaryOp::Gt,
      T::GtEq => BinaryOp::GtEq,
      T::Plus => BinaryOp::Add,
      T::Minus => BinaryOp::Sub,
      T::Star => BinaryOp::Mul,
      T::Slash => BinaryOp::Div,
      T::Special => match token.lexeme {
        "%%" => BinaryOp::Modulo,
        "%/%" => BinaryOp::IntDiv,
        "%*%" => BinaryOp::MatMul,
        "%o%" => BinaryOp::Outer,
        "%x%" => BinaryOp::Kronecker,
        "%in%" => BinaryOp::Match,
        other => BinaryOp::Special(other.to_string()),
      },
      T::Colon => BinaryOp::Range,
      T::Caret => BinaryOp::Pow,
      T::Dollar => BinaryOp::ListSubset,
      T::At => BinaryOp::Slot,
      _ => return None,
    };
    Some(op)
  }

  pub fn as_str(&self) -> &str {
    match self {
      BinaryOp::Formula => "~",
      BinaryOp::Or => "|",
      BinaryOp::OrOr => "||",
      BinaryOp::And => "&",
      BinaryOp::AndAnd => "&&",
      BinaryOp::Eq => "==",
      BinaryOp::NotEq => "!=",
      BinaryOp::Lt => "<",
      BinaryOp::LtEq => "<=",
      BinaryOp::Gt => ">",
      BinaryOp::GtEq => ">=",
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Modulo => "%%",
      BinaryOp::IntDiv => "%/%",
      BinaryOp::MatMul => "%*%",
      BinaryOp::Outer => "%o%",
      BinaryOp::Kronecker => "%x%",
      BinaryOp::Match => "%in%",
      BinaryOp::Special(spelling) => spelling,
      BinaryOp::Range => ":",
      BinaryOp::Pow => "^",
      BinaryOp::ListSubset => "$",
      BinaryOp::Slot => "@",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
  Not,
  Minus,
  Plus,
  Formula,
}

impl UnaryOp {
  pub const fn from_token(kind: TokenKind) -> Option<Self> {
    match kind {
      T::Not => Some(UnaryOp::Not),
      T::Minus => Some(UnaryOp::Minus),
      T::Plus => Some(UnaryOp::Plus),
      T::Tilde => Some(UnaryOp::Formula),
      _ => None,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      UnaryOp::Not => "!",
      UnaryOp::Minus => "-",
      UnaryOp::Plus => "+",
      UnaryOp::Formula => "~",
    }
  }
}
