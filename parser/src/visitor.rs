use crate::internal::*;

/// One handler per node kind. Every handler defaults to [`Visitor::visit_node`],
/// so a visitor only overrides the kinds it cares about.
///
/// Handlers decide whether and in what order to recurse, by calling `accept`
/// on the children they want. `Data` is threaded through untouched by the tree.
pub trait Visitor {
  type Data;
  type Output;

  fn visit_node(&mut self, node: Node<'_>, data: Self::Data) -> Self::Output;

  fn visit_program(&mut self, node: &Program, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Program(node), data)
  }

  fn visit_expression(&mut self, node: &Expression, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Expression(node), data)
  }

  fn visit_condition(&mut self, node: &Condition, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Condition(node), data)
  }

  fn visit_expression_list(&mut self, node: &ExpressionList, data: Self::Data) -> Self::Output {
    self.visit_node(Node::ExpressionList(node), data)
  }

  fn visit_sub_list(&mut self, node: &SubList, data: Self::Data) -> Self::Output {
    self.visit_node(Node::SubList(node), data)
  }

  fn visit_sub(&mut self, node: &Sub, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Sub(node), data)
  }

  fn visit_form_list(&mut self, node: &FormList, data: Self::Data) -> Self::Output {
    self.visit_node(Node::FormList(node), data)
  }

  fn visit_arguments(&mut self, node: &Arguments, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Arguments(node), data)
  }

  fn visit_assignment(&mut self, node: &Assignment, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Assignment(node), data)
  }

  fn visit_block(&mut self, node: &Block, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Block(node), data)
  }

  fn visit_constant(&mut self, node: &Constant, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Constant(node), data)
  }

  fn visit_for(&mut self, node: &For, data: Self::Data) -> Self::Output {
    self.visit_node(Node::For(node), data)
  }

  fn visit_function(&mut self, node: &Function, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Function(node), data)
  }

  fn visit_help(&mut self, node: &Help, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Help(node), data)
  }

  fn visit_identifier(&mut self, node: &Identifier, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Identifier(node), data)
  }

  fn visit_if(&mut self, node: &If, data: Self::Data) -> Self::Output {
    self.visit_node(Node::If(node), data)
  }

  fn visit_repeat(&mut self, node: &Repeat, data: Self::Data) -> Self::Output {
    self.visit_node(Node::Repeat(node), data)
  }

  fn visit_while(&mut self, node: &While, data: Self::Data) -> Self::Output {
    self.visit_node(Node::While(node), data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  /// Collects identifier names, skipping function bodies.
  struct Names {
    names: Vec<String>,
  }

  impl Visitor for Names {
    type Data = ();
    type Output = ();

    fn visit_node(&mut self, node: Node<'_>, _: ()) {
      for child in node.children() {
        child.accept(self, ());
      }
    }

    fn visit_identifier(&mut self, node: &Identifier, _: ()) {
      self.names.push(node.name().to_string());
    }

    fn visit_function(&mut self, _: &Function, _: ()) {}
  }

  /// Post-order kind names, with the depth threaded through `Data`.
  struct PostOrder;

  impl Visitor for PostOrder {
    type Data = usize;
    type Output = Vec<String>;

    fn visit_node(&mut self, node: Node<'_>, depth: usize) -> Vec<String> {
      let mut out = Vec::new();
      for child in node.children() {
        out.extend(child.accept(self, depth + 1));
      }
      out.push(format!("{}@{depth}", node.kind_name()));
      out
    }
  }

  #[test]
  fn pruned_traversal() {
    let program = crate::parse("x <- y + `z w`; f <- function(a) inner").unwrap();
    let mut names = Names { names: vec![] };
    program.accept(&mut names, ());
    assert_eq!(names.names, vec!["x", "y", "z w", "f"]);
  }

  #[test]
  fn post_order_traversal() {
    let program = crate::parse("a + 1").unwrap();
    assert_eq!(
      program.accept(&mut PostOrder, 0),
      vec!["Identifier@2", "Constant@2", "Expression@1", "Program@0"]
    );
  }

  #[test]
  fn sub_tree_traversal() {
    let program = crate::parse("if (ok) go()").unwrap();
    let ExpressionKind::Term(term) = program.expressions()[0].kind() else {
      panic!("expected a term");
    };
    let Operand::If(node) = term.operand() else {
      panic!("expected an if");
    };
    assert_eq!(
      node.condition().accept(&mut PostOrder, 0),
      vec!["Identifier@2", "Expression@1", "Condition@0"]
    );
  }
}
