//! Abstract Syntax Tree (AST) for the Quill programming language.
//!
//! This module defines the complete AST structure for Quill, including:
//! - Module and program structure
//! - Statements (declarations, control flow, etc.)
//! - Expressions (literals, operators, function calls, etc.)
//! - Type annotations
//! - Record declarations and their ordered body map
//!
//! Every AST node includes a `Span` for precise source location tracking.

use crate::interner::{Interner, Symbol};
use crate::token::Span;

// Re-export submodules
pub mod expression;
pub mod record;
pub mod statement;
pub mod types;

pub use expression::*;
pub use record::*;
pub use statement::*;
pub use types::*;

/// Root node: a Quill source file (module)
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Top-level statements (declarations, expressions)
    pub statements: Vec<Statement>,

    /// Span covering the entire module
    pub span: Span,
}

impl Module {
    /// Create a new module
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Check if the module is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Get the number of top-level statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Identifier
///
/// Represents a name for a variable, component, method, class, etc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: Symbol,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: Symbol, span: Span) -> Self {
        Self { name, span }
    }
}

/// A possibly namespace-qualified name: `Point` or `geo::Point`.
///
/// An optional leading `::` anchors the name in the global namespace; it
/// is consumed but carries no meaning beyond display normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// True if the name was written with a leading `::`
    pub leading: bool,

    /// Name segments, at least one
    pub segments: Vec<Identifier>,

    pub span: Span,
}

impl QualifiedName {
    pub fn new(leading: bool, segments: Vec<Identifier>, span: Span) -> Self {
        debug_assert!(!segments.is_empty());
        Self {
            leading,
            segments,
            span,
        }
    }

    /// Build a simple (single-segment) name.
    pub fn simple(name: Identifier) -> Self {
        let span = name.span;
        Self {
            leading: false,
            segments: vec![name],
            span,
        }
    }

    /// True if the name has exactly one segment and no leading anchor.
    pub fn is_simple(&self) -> bool {
        !self.leading && self.segments.len() == 1
    }

    /// The last segment of the name.
    pub fn last(&self) -> &Identifier {
        self.segments.last().expect("qualified name has segments")
    }

    /// The display form: leading anchor dropped, `::` separators
    /// converted to dots (`geo::Point` renders as `geo.Point`).
    pub fn display_name(&self, interner: &Interner) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(interner.resolve(seg.name));
        }
        out
    }
}

/// Compiler annotation attached to a declaration: `//@@tag value`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Symbol,
    pub value: Option<Symbol>,
    pub span: Span,
}
