//! Expression AST nodes
//!
//! This module defines all expression types in the Quill language,
//! including literals, operators, calls, member access, object
//! construction, and the anonymous-record forms.

use super::*;
use crate::token::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal: 42
    IntLiteral(IntLiteral),

    /// Float literal: 3.14
    FloatLiteral(FloatLiteral),

    /// String literal: "hello"
    StringLiteral(StringLiteral),

    /// Boolean literal: true, false
    BooleanLiteral(BooleanLiteral),

    /// Null literal
    NullLiteral(Span),

    /// Identifier
    Identifier(Identifier),

    /// This expression: this
    This(Span),

    /// Array literal: [1, 2, 3]
    Array(ArrayExpression),

    /// Unary expression: !x, -y
    Unary(UnaryExpression),

    /// Binary expression: x + y, a < b
    Binary(BinaryExpression),

    /// Logical expression: x && y, a || b
    Logical(LogicalExpression),

    /// Assignment: x = 42
    Assignment(AssignmentExpression),

    /// Ternary: x ? y : z
    Conditional(ConditionalExpression),

    /// Function or method call: foo(1, 2)
    Call(CallExpression),

    /// Member access: obj.prop
    Member(MemberExpression),

    /// Index access: arr[0]
    Index(IndexExpression),

    /// New expression: new Point(1, 10)
    New(NewExpression),

    /// Anonymous record: new record(name: "Timm", age: 44) { }
    ///
    /// Produced by the parser; replaced by `NewClass` once the record
    /// has been desugared.
    NewRecord(NewRecordExpression),

    /// Inline class definition plus instantiation.
    ///
    /// Never produced by the parser; this is the desugared form of
    /// `NewRecord`.
    NewClass(NewClassExpression),

    /// InstanceOf expression: expr instanceof ClassName
    InstanceOf(InstanceOfExpression),

    /// Parenthesized: (expr)
    Parenthesized(ParenthesizedExpression),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::IntLiteral(e) => &e.span,
            Expression::FloatLiteral(e) => &e.span,
            Expression::StringLiteral(e) => &e.span,
            Expression::BooleanLiteral(e) => &e.span,
            Expression::NullLiteral(span) => span,
            Expression::Identifier(e) => &e.span,
            Expression::This(span) => span,
            Expression::Array(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::Logical(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Conditional(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::Member(e) => &e.span,
            Expression::Index(e) => &e.span,
            Expression::New(e) => &e.span,
            Expression::NewRecord(e) => &e.span,
            Expression::NewClass(e) => &e.span,
            Expression::InstanceOf(e) => &e.span,
            Expression::Parenthesized(e) => &e.span,
        }
    }

    /// Check if this expression is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::IntLiteral(_)
                | Expression::FloatLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::BooleanLiteral(_)
                | Expression::NullLiteral(_)
                | Expression::Array(_)
        )
    }

    /// Check if this expression can appear on the left side of an
    /// assignment
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Expression::Identifier(_) | Expression::Member(_) | Expression::Index(_)
        )
    }
}

// ============================================================================
// Literal Expressions
// ============================================================================

/// Integer literal: 42
#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub span: Span,
}

/// Float literal: 3.14
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

/// String literal: "hello"
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: Symbol,
    pub span: Span,
}

/// Boolean literal: true, false
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

/// Array literal: [1, 2, 3]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
    pub span: Span,
}

// ============================================================================
// Unary & Binary Expressions
// ============================================================================

/// Unary expression: !x, -y
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus, // -x
    Not,   // !x
}

/// Binary expression: x + y, a < b
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %

    // Comparison
    Equal,        // ==
    NotEqual,     // !=
    LessThan,     // <
    LessEqual,    // <=
    GreaterThan,  // >
    GreaterEqual, // >=
}

/// Logical expression: x && y, a || b
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And, // &&
    Or,  // ||
}

/// Assignment expression: x = 42, this.x = x
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

// ============================================================================
// Complex Expressions
// ============================================================================

/// Conditional (ternary): x ? y : z
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
    pub span: Span,
}

/// Function call: foo(1, 2, 3)
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Member access: obj.prop
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Identifier,
    pub span: Span,
}

/// Index access: arr[0]
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub object: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// New expression: new Point(1, 10)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub class: QualifiedName,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Anonymous record expression: new record(name: "Timm", age: 44) { }
///
/// The definition is a synthetic record declaration whose components
/// were derived from the named arguments, one untyped component per
/// argument, in call-site order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecordExpression {
    pub definition: Box<RecordDecl>,
    pub arguments: Vec<NamedArgument>,
    pub span: Span,
}

/// A named call-site argument: `age: 44`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// Inline class definition plus instantiation, the desugared form of an
/// anonymous record: defines the class and constructs one instance with
/// the original call arguments, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClassExpression {
    pub definition: Box<ClassDecl>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// InstanceOf expression: expr instanceof ClassName
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOfExpression {
    /// The expression to check
    pub object: Box<Expression>,
    /// The type to check against
    pub type_name: TypeAnnotation,
    pub span: Span,
}

/// Parenthesized expression: (expr)
#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}
