mod ops;
pub use ops::{AssignOp, BinaryOp, Direction, UnaryOp};

use crate::internal::*;

// Nodes are built only by the parser; everything outside the crate reads them
// through the accessors below.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub(crate) loc: SrcLoc,
  pub(crate) exprs: Vec<Expression>,
}

impl Program {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn expressions(&self) -> &[Expression] {
    &self.exprs
  }
}

/// One evaluable unit. Operands that are plain primaries are held directly as
/// a [`Term`]; composite operands are nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
  pub(crate) loc: SrcLoc,
  pub(crate) kind: ExpressionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
  Term(Term),
  Unary { op: UnaryOp, operand: Term },
  Binary { op: BinaryOp, lhs: Term, rhs: Term },
  /// The left operand is held here, the operator and right operand by the
  /// [`Assignment`].
  Assign { lhs: Term, assignment: Assignment },
}

impl Expression {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn kind(&self) -> &ExpressionKind {
    &self.kind
  }

  /// The sole term of an operator-free expression.
  pub const fn as_term(&self) -> Option<&Term> {
    match &self.kind {
      ExpressionKind::Term(term) => Some(term),
      _ => None,
    }
  }
}

/// A primary with its optional call/subscript chain. Not a node of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
  pub(crate) operand: Operand,
  pub(crate) sub_list: Option<SubList>,
}

impl Term {
  pub const fn operand(&self) -> &Operand {
    &self.operand
  }

  pub const fn sub_list(&self) -> Option<&SubList> {
    self.sub_list.as_ref()
  }

  pub fn loc(&self) -> SrcLoc {
    self.operand.loc()
  }
}

impl From<Expression> for Term {
  fn from(expr: Expression) -> Self {
    match expr.kind {
      ExpressionKind::Term(term) => term,
      _ => Term {
        operand: Operand::Expression(Box::new(expr)),
        sub_list: None,
      },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
  Identifier(Identifier),
  Constant(Constant),
  Block(Block),
  Function(Function),
  If(If),
  For(For),
  While(While),
  Repeat(Repeat),
  Help(Help),
  /// `( expr )`
  Parenthesized(Box<Expression>),
  /// A composite operand of an operator.
  Expression(Box<Expression>),
}

impl Operand {
  pub fn loc(&self) -> SrcLoc {
    match self {
      Operand::Identifier(node) => node.loc,
      Operand::Constant(node) => node.loc,
      Operand::Block(node) => node.loc,
      Operand::Function(node) => node.loc,
      Operand::If(node) => node.loc,
      Operand::For(node) => node.loc,
      Operand::While(node) => node.loc,
      Operand::Repeat(node) => node.loc,
      Operand::Help(node) => node.loc,
      Operand::Parenthesized(node) | Operand::Expression(node) => node.loc,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
  pub(crate) loc: SrcLoc,
  pub(crate) expr: Box<Expression>,
}

impl Condition {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn expression(&self) -> &Expression {
    &self.expr
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionList {
  pub(crate) loc: SrcLoc,
  pub(crate) exprs: Vec<Expression>,
}

impl ExpressionList {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn expressions(&self) -> &[Expression] {
    &self.exprs
  }
}

/// Calls and subscripts applied left to right, e.g. `(1)[2][[3]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubList {
  pub(crate) loc: SrcLoc,
  pub(crate) subs: Vec<Sub>,
}

impl SubList {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn subs(&self) -> &[Sub] {
    &self.subs
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubKind {
  /// `( )`
  Call,
  /// `[ ]`
  Index,
  /// `[[ ]]`
  DoubleIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sub {
  pub(crate) loc: SrcLoc,
  pub(crate) kind: SubKind,
  pub(crate) content: SubContent,
}

impl Sub {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn kind(&self) -> SubKind {
    self.kind
  }

  pub const fn content(&self) -> &SubContent {
    &self.content
  }

  /// Number of positional slots, elided ones included.
  pub fn arity(&self) -> usize {
    match &self.content {
      SubContent::Empty => 0,
      SubContent::Expression(_) => 1,
      SubContent::Arguments(args) => args.slots.len(),
    }
  }
}

/// `()` is empty, `(x)` a single expression, anything else an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubContent {
  Empty,
  Expression(Expression),
  Arguments(Arguments),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormList {
  pub(crate) loc: SrcLoc,
  pub(crate) forms: Vec<Formal>,
}

impl FormList {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn formals(&self) -> &[Formal] {
    &self.forms
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formal {
  pub(crate) name: Identifier,
  pub(crate) default: Option<Expression>,
}

impl Formal {
  pub const fn name(&self) -> &Identifier {
    &self.name
  }

  pub const fn default(&self) -> Option<&Expression> {
    self.default.as_ref()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
  pub(crate) loc: SrcLoc,
  pub(crate) slots: Vec<Argument>,
}

impl Arguments {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn slots(&self) -> &[Argument] {
    &self.slots
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
  /// Nothing between two delimiters, e.g. the first slot of `foo(, 1)`.
  Empty,
  Value(Expression),
  /// `name = value`; the value itself may be elided, as in `"<" = ,`.
  Named { name: ArgName, value: Option<Expression> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgName {
  Identifier(Identifier),
  /// A string or `NULL` used as a name.
  Constant(Constant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
  pub(crate) loc: SrcLoc,
  pub(crate) op: AssignOp,
  pub(crate) value: Box<Expression>,
}

impl Assignment {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn op(&self) -> AssignOp {
    self.op
  }

  pub const fn direction(&self) -> Direction {
    self.op.direction()
  }

  /// Right-hand operand.
  pub fn value(&self) -> &Expression {
    &self.value
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  pub(crate) loc: SrcLoc,
  pub(crate) list: ExpressionList,
}

impl Block {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn list(&self) -> &ExpressionList {
    &self.list
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
  Integer,
  Float,
  Hex,
  Complex,
  String,
  Logical,
  Null,
  Inf,
  NaN,
  Na,
}

impl ConstantKind {
  pub const fn from_token(kind: TokenKind) -> Option<Self> {
    use TokenKind as T;
    match kind {
      T::Num(NumKind::Integer) => Some(ConstantKind::Integer),
      T::Num(NumKind::Float) => Some(ConstantKind::Float),
      T::Num(NumKind::Hex) => Some(ConstantKind::Hex),
      T::Num(NumKind::Complex) => Some(ConstantKind::Complex),
      T::Str => Some(ConstantKind::String),
      T::True | T::False => Some(ConstantKind::Logical),
      T::Null => Some(ConstantKind::Null),
      T::Inf => Some(ConstantKind::Inf),
      T::NaN => Some(ConstantKind::NaN),
      T::Na => Some(ConstantKind::Na),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
  pub(crate) loc: SrcLoc,
  pub(crate) kind: ConstantKind,
  pub(crate) text: String,
}

impl Constant {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn kind(&self) -> ConstantKind {
    self.kind
  }

  /// Source spelling, quotes and suffixes included.
  pub fn text(&self) -> &str {
    &self.text
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct For {
  pub(crate) loc: SrcLoc,
  pub(crate) var: Identifier,
  pub(crate) seq: Box<Expression>,
  pub(crate) body: Box<Expression>,
}

impl For {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn var(&self) -> &Identifier {
    &self.var
  }

  pub fn seq(&self) -> &Expression {
    &self.seq
  }

  pub fn body(&self) -> &Expression {
    &self.body
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
  pub(crate) loc: SrcLoc,
  pub(crate) forms: Option<FormList>,
  pub(crate) body: Box<Expression>,
}

impl Function {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  /// `None` for `function()`.
  pub const fn formals(&self) -> Option<&FormList> {
    self.forms.as_ref()
  }

  pub fn body(&self) -> &Expression {
    &self.body
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Help {
  pub(crate) loc: SrcLoc,
  pub(crate) target: Box<Expression>,
}

impl Help {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn target(&self) -> &Expression {
    &self.target
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
  pub(crate) loc: SrcLoc,
  pub(crate) name: String,
  pub(crate) quoted: bool,
}

impl Identifier {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  /// The name without backticks.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub const fn is_quoted(&self) -> bool {
    self.quoted
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
  pub(crate) loc: SrcLoc,
  pub(crate) cond: Condition,
  pub(crate) then: Box<Expression>,
  pub(crate) otherwise: Option<Box<Expression>>,
}

impl If {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn condition(&self) -> &Condition {
    &self.cond
  }

  pub fn then_branch(&self) -> &Expression {
    &self.then
  }

  pub fn else_branch(&self) -> Option<&Expression> {
    self.otherwise.as_deref()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
  pub(crate) loc: SrcLoc,
  pub(crate) body: Box<Expression>,
}

impl Repeat {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub fn body(&self) -> &Expression {
    &self.body
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
  pub(crate) loc: SrcLoc,
  pub(crate) cond: Condition,
  pub(crate) body: Box<Expression>,
}

impl While {
  pub const fn loc(&self) -> SrcLoc {
    self.loc
  }

  pub const fn condition(&self) -> &Condition {
    &self.cond
  }

  pub fn body(&self) -> &Expression {
    &self.body
  }
}
