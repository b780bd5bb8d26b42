use crate::internal::*;

/// A borrowed view of any tree node, tagged by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
  Program(&'a Program),
  Expression(&'a Expression),
  Condition(&'a Condition),
  ExpressionList(&'a ExpressionList),
  SubList(&'a SubList),
  Sub(&'a Sub),
  FormList(&'a FormList),
  Arguments(&'a Arguments),
  Assignment(&'a Assignment),
  Block(&'a Block),
  Constant(&'a Constant),
  For(&'a For),
  Function(&'a Function),
  Help(&'a Help),
  Identifier(&'a Identifier),
  If(&'a If),
  Repeat(&'a Repeat),
  While(&'a While),
}

impl<'a> Node<'a> {
  pub const fn kind_name(&self) -> &'static str {
    match self {
      Node::Program(_) => "Program",
      Node::Expression(_) => "Expression",
      Node::Condition(_) => "Condition",
      Node::ExpressionList(_) => "ExpressionList",
      Node::SubList(_) => "SubList",
      Node::Sub(_) => "Sub",
      Node::FormList(_) => "FormList",
      Node::Arguments(_) => "Arguments",
      Node::Assignment(_) => "Assignment",
      Node::Block(_) => "Block",
      Node::Constant(_) => "Constant",
      Node::For(_) => "For",
      Node::Function(_) => "Function",
      Node::Help(_) => "Help",
      Node::Identifier(_) => "Identifier",
      Node::If(_) => "If",
      Node::Repeat(_) => "Repeat",
      Node::While(_) => "While",
    }
  }

  pub const fn loc(&self) -> SrcLoc {
    match self {
      Node::Program(node) => node.loc,
      Node::Expression(node) => node.loc,
      Node::Condition(node) => node.loc,
      Node::ExpressionList(node) => node.loc,
      Node::SubList(node) => node.loc,
      Node::Sub(node) => node.loc,
      Node::FormList(node) => node.loc,
      Node::Arguments(node) => node.loc,
      Node::Assignment(node) => node.loc,
      Node::Block(node) => node.loc,
      Node::Constant(node) => node.loc,
      Node::For(node) => node.loc,
      Node::Function(node) => node.loc,
      Node::Help(node) => node.loc,
      Node::Identifier(node) => node.loc,
      Node::If(node) => node.loc,
      Node::Repeat(node) => node.loc,
      Node::While(node) => node.loc,
    }
  }

  /// Runs the visitor handler for this node's kind.
  pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V, data: V::Data) -> V::Output {
    match self {
      Node::Program(node) => visitor.visit_program(node, data),
      Node::Expression(node) => visitor.visit_expression(node, data),
      Node::Condition(node) => visitor.visit_condition(node, data),
      Node::ExpressionList(node) => visitor.visit_expression_list(node, data),
      Node::SubList(node) => visitor.visit_sub_list(node, data),
      Node::Sub(node) => visitor.visit_sub(node, data),
      Node::FormList(node) => visitor.visit_form_list(node, data),
      Node::Arguments(node) => visitor.visit_arguments(node, data),
      Node::Assignment(node) => visitor.visit_assignment(node, data),
      Node::Block(node) => visitor.visit_block(node, data),
      Node::Constant(node) => visitor.visit_constant(node, data),
      Node::For(node) => visitor.visit_for(node, data),
      Node::Function(node) => visitor.visit_function(node, data),
      Node::Help(node) => visitor.visit_help(node, data),
      Node::Identifier(node) => visitor.visit_identifier(node, data),
      Node::If(node) => visitor.visit_if(node, data),
      Node::Repeat(node) => visitor.visit_repeat(node, data),
      Node::While(node) => visitor.visit_while(node, data),
    }
  }

  /// Direct children in source order.
  pub fn children(&self) -> Vec<Node<'a>> {
    let mut children = Vec::new();
    match *self {
      Node::Program(node) => children.extend(node.exprs.iter().map(Node::Expression)),
      Node::Expression(node) => match &node.kind {
        ExpressionKind::Term(term) | ExpressionKind::Unary { operand: term, .. } => {
          push_term(&mut children, term)
        }
        ExpressionKind::Binary { lhs, rhs, .. } => {
          push_term(&mut children, lhs);
          push_term(&mut children, rhs);
        }
        ExpressionKind::Assign { lhs, assignment } => {
          push_term(&mut children, lhs);
          children.push(Node::Assignment(assignment));
        }
      },
      Node::Condition(node) => children.push(Node::Expression(&node.expr)),
      Node::ExpressionList(node) => children.extend(node.exprs.iter().map(Node::Expression)),
      Node::SubList(node) => children.extend(node.subs.iter().map(Node::Sub)),
      Node::Sub(node) => match &node.content {
        SubContent::Empty => {}
        SubContent::Expression(expr) => children.push(Node::Expression(expr)),
        SubContent::Arguments(args) => children.push(Node::Arguments(args)),
      },
      Node::FormList(node) => {
        for formal in &node.forms {
          children.push(Node::Identifier(&formal.name));
          if let Some(default) = &formal.default {
            children.push(Node::Expression(default));
          }
        }
      }
      Node::Arguments(node) => {
        for slot in &node.slots {
          match slot {
            Argument::Empty => {}
            Argument::Value(expr) => children.push(Node::Expression(expr)),
            Argument::Named { name, value } => {
              children.push(match name {
                ArgName::Identifier(ident) => Node::Identifier(ident),
                ArgName::Constant(constant) => Node::Constant(constant),
              });
              if let Some(value) = value {
                children.push(Node::Expression(value));
              }
            }
          }
        }
      }
      Node::Assignment(node) => children.push(Node::Expression(&node.value)),
      Node::Block(node) => children.push(Node::ExpressionList(&node.list)),
      Node::Constant(_) | Node::Identifier(_) => {}
      Node::For(node) => {
        children.push(Node::Identifier(&node.var));
        children.push(Node::Expression(&node.seq));
        children.push(Node::Expression(&node.body));
      }
      Node::Function(node) => {
        if let Some(forms) = &node.forms {
          children.push(Node::FormList(forms));
        }
        children.push(Node::Expression(&node.body));
      }
      Node::Help(node) => children.push(Node::Expression(&node.target)),
      Node::If(node) => {
        children.push(Node::Condition(&node.cond));
        children.push(Node::Expression(&node.then));
        if let Some(otherwise) = &node.otherwise {
          children.push(Node::Expression(otherwise));
        }
      }
      Node::Repeat(node) => children.push(Node::Expression(&node.body)),
      Node::While(node) => {
        children.push(Node::Condition(&node.cond));
        children.push(Node::Expression(&node.body));
      }
    }
    children
  }
}

fn push_term<'a>(children: &mut Vec<Node<'a>>, term: &'a Term) {
  children.push(Node::from(&term.operand));
  if let Some(sub_list) = &term.sub_list {
    children.push(Node::SubList(sub_list));
  }
}

impl<'a> From<&'a Operand> for Node<'a> {
  fn from(operand: &'a Operand) -> Self {
    match operand {
      Operand::Identifier(node) => Node::Identifier(node),
      Operand::Constant(node) => Node::Constant(node),
      Operand::Block(node) => Node::Block(node),
      Operand::Function(node) => Node::Function(node),
      Operand::If(node) => Node::If(node),
      Operand::For(node) => Node::For(node),
      Operand::While(node) => Node::While(node),
      Operand::Repeat(node) => Node::Repeat(node),
      Operand::Help(node) => Node::Help(node),
      Operand::Parenthesized(node) | Operand::Expression(node) => Node::Expression(node),
    }
  }
}

macro_rules! node_impl_for {
  ($($type:ident => $visit:ident),* $(,)?) => {
    $(
      impl $type {
        /// Dispatches to the visitor's handler for this node kind.
        pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V, data: V::Data) -> V::Output {
          visitor.$visit(self, data)
        }
      }

      impl<'a> From<&'a $type> for Node<'a> {
        fn from(node: &'a $type) -> Self {
          Node::$type(node)
        }
      }
    )*
  };
}

node_impl_for!(
  Program => visit_program,
  Expression => visit_expression,
  Condition => visit_condition,
  ExpressionList => visit_expression_list,
  SubList => visit_sub_list,
  Sub => visit_sub,
  FormList => visit_form_list,
  Arguments => visit_arguments,
  Assignment => visit_assignment,
  Block => visit_block,
  Constant => visit_constant,
  For => visit_for,
  Function => visit_function,
  Help => visit_help,
  Identifier => visit_identifier,
  If => visit_if,
  Repeat => visit_repeat,
  While => visit_while,
);
