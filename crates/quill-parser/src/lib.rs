//! Quill Language Parser
//!
//! Lexer and parser for the Quill programming language.
//!
//! Quill is a small class-based language whose distinguishing feature is
//! the `record` declaration: a compact product-type syntax expanded into
//! a full value-object class by the `quill-expand` crate. This crate
//! provides lexical analysis (tokenization) and syntactic analysis
//! (parsing), including the record grammar, the reserved `init { }`
//! body construct, and the anonymous `new record(...) { }` expression.
//!
//! # Example
//!
//! ```
//! use quill_parser::ast::Statement;
//!
//! let source = r#"
//!     record Point(int x, int y) { }
//! "#;
//!
//! let parsed = quill_parser::parse(source).unwrap();
//! assert!(matches!(parsed.module.statements[0], Statement::RecordDecl(_)));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod interner;
pub mod lexer;
pub mod parser;
pub mod token;

// Re-exports for convenience
pub use interner::{Interner, Symbol};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseWarning, Parsed, Parser};
pub use token::{Span, Token};

/// Error returned by the [`parse`] convenience entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("lexical analysis failed with {} error(s)", .0.len())]
    Lex(Vec<LexError>),

    #[error("parsing failed with {} error(s)", .0.len())]
    Parse(Vec<ParseError>),
}

/// Tokenize and parse a source string in one step.
pub fn parse(source: &str) -> Result<Parsed, Error> {
    let parser = Parser::new(source).map_err(Error::Lex)?;
    parser.parse().map_err(Error::Parse)
}
