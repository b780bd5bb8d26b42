pub mod ast;
pub mod diag;
pub mod dump;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod src_loc;
pub mod token;
pub mod visitor;

pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::dump::*;
  pub use crate::lexer::*;
  pub use crate::node::*;
  pub use crate::parser::*;
  pub use crate::src_loc::*;
  pub use crate::token::*;
  pub use crate::visitor::*;
  pub use tracing::{debug, instrument, trace};
}

pub use diag::{Diagnostic, Error};
pub use lexer::{LexError, Lexer};
pub use node::Node;
pub use parser::{ParseError, Parser};
pub use src_loc::SrcLoc;
pub use visitor::Visitor;

/// Parses a complete R source. The result owns no borrow of `src`.
pub fn parse(src: impl AsRef<[u8]>) -> Result<ast::Program, Error> {
  Parser::new(src.as_ref())?.parse()
}
