//! Statement AST nodes
//!
//! This module defines all statement types in the Quill language,
//! including variable declarations, class declarations, control flow
//! statements, and the members of class bodies. Record declarations live
//! in the sibling `record` module.

use super::*;
use crate::token::Span;

/// Top-level or block-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration: let/const
    VariableDecl(VariableDecl),

    /// Class declaration
    ClassDecl(ClassDecl),

    /// Record declaration (desugared into a class at expansion time)
    RecordDecl(RecordDecl),

    /// Expression statement (e.g., function call)
    Expression(ExpressionStatement),

    /// If statement
    If(IfStatement),

    /// While loop
    While(WhileStatement),

    /// Return statement
    Return(ReturnStatement),

    /// Throw statement
    Throw(ThrowStatement),

    /// Block statement; only used as function bodies and control-flow
    /// bodies, never produced at statement level
    Block(BlockStatement),

    /// Empty statement (;)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::VariableDecl(s) => &s.span,
            Statement::ClassDecl(s) => &s.span,
            Statement::RecordDecl(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::Block(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }

    /// Check if this statement is a declaration
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Statement::VariableDecl(_) | Statement::ClassDecl(_) | Statement::RecordDecl(_)
        )
    }
}

// ============================================================================
// Variable Declaration
// ============================================================================

/// Variable declaration: let x = 42; or const y = 10;
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// let or const
    pub kind: VariableKind,

    pub name: Identifier,

    /// Initializer expression (required for const)
    pub initializer: Option<Expression>,

    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Let,
    Const,
}

// ============================================================================
// Class Declaration
// ============================================================================

/// Class declaration.
///
/// Parsed classes are never final; the record desugar transform produces
/// final classes. An anonymous class (the desugared form of an anonymous
/// record) has no name.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Compiler annotations (//@@tag)
    pub annotations: Vec<Annotation>,

    /// Doc comment, if one preceded the declaration
    pub comment: Option<Symbol>,

    pub is_final: bool,
    pub name: Option<QualifiedName>,
    pub extends: Option<TypeAnnotation>,
    pub implements: Vec<TypeAnnotation>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

impl ClassMember {
    /// Get the span of this member
    pub fn span(&self) -> &Span {
        match self {
            ClassMember::Field(m) => &m.span,
            ClassMember::Method(m) => &m.span,
            ClassMember::Constructor(m) => &m.span,
        }
    }
}

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Private - only accessible within the same class
    Private,
    /// Protected - accessible within the same class and subclasses
    Protected,
    /// Public - accessible from anywhere (default)
    #[default]
    Public,
}

/// Field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub annotations: Vec<Annotation>,
    pub visibility: Visibility,
    pub is_readonly: bool,
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub annotations: Vec<Annotation>,
    pub visibility: Visibility,
    pub name: Identifier,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
    pub span: Span,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params: Vec<Parameter>,
    pub body: BlockStatement,
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    /// Default value for the parameter (e.g., `?string middle = null`)
    pub default_value: Option<Expression>,
    /// Rest parameter (`int... members`)
    pub variadic: bool,
    pub span: Span,
}

// ============================================================================
// Control Flow Statements
// ============================================================================

/// If statement
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// While loop
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

/// Return statement
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub value: Expression,
    pub span: Span,
}

/// Block statement - a sequence of statements wrapped in { }.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Expression statement
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}
