//! Quill record expansion
//!
//! Desugars `record` declarations into final value-object classes: one
//! field and accessor per component, a constructor that assigns every
//! component before running the `init { }` block, and injected string
//! form, identity hash, ordered comparison, and decomposition members.
//! Anonymous records (`new record(...) { }`) route through the same
//! transform and come back as inline class definitions plus an
//! instantiation.
//!
//! # Example
//!
//! ```
//! use quill_parser::ast::Statement;
//! use quill_expand::Expander;
//!
//! let parsed = quill_parser::parse("record Point(int x, int y) { }").unwrap();
//! let mut interner = parsed.interner;
//!
//! let expanded = Expander::new(&mut interner).expand_module(&parsed.module);
//! match &expanded.statements[0] {
//!     Statement::ClassDecl(class) => assert!(class.is_final),
//!     other => panic!("expected a class, got {:?}", other),
//! }
//! ```

mod expand;
mod synth;

pub use expand::Expander;
