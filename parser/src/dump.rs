use crate::internal::*;
use std::io;

/// Pre-order dump, one `<Kind>:<line>:<col>` line per node, indented one
/// space per level.
#[derive(Debug)]
pub struct Dumper<W: io::Write> {
  out: W,
}

impl<W: io::Write> Dumper<W> {
  pub const fn new(out: W) -> Self {
    Dumper { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: io::Write> Visitor for Dumper<W> {
  type Data = usize;
  type Output = io::Result<()>;

  fn visit_node(&mut self, node: Node<'_>, depth: usize) -> io::Result<()> {
    let loc = node.loc();
    writeln!(self.out, "{:depth$}{}:{}:{}", "", node.kind_name(), loc.line, loc.col)?;
    for child in node.children() {
      child.accept(self, depth + 1)?;
    }
    Ok(())
  }
}

pub fn dump<'a>(node: impl Into<Node<'a>>) -> String {
  let mut dumper = Dumper::new(Vec::new());
  // writing into a Vec can't fail
  let _ = node.into().accept(&mut dumper, 0);
  String::from_utf8_lossy(&dumper.into_inner()).into_owned()
}
