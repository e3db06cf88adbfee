//! Record declaration AST nodes
//!
//! A record is a compact product-type declaration: an ordered list of
//! components from which fields, accessors, a constructor, and
//! value-object members are synthesized at expansion time. This module
//! holds the declaration node itself and the ordered body map the
//! expansion merges into.
//!
//! The declaration is built once during parsing, held immutably, and
//! consumed by `quill-expand`; it carries no behavior beyond exposing
//! its parts.

use super::*;
use crate::interner::{Interner, Symbol};
use crate::token::Span;
use rustc_hash::FxHashMap;

/// One record component: a named, optionally typed, optionally
/// defaulted, optionally variadic constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Explicit modifier list; `None` means the default single modifier
    /// (`private`) applies to the synthesized field
    pub modifiers: Option<Vec<Modifier>>,

    /// Declared type; variadic storage becomes an array of this
    pub ty: Option<TypeAnnotation>,

    /// Rest component (`int... members`); at most one, always last
    pub variadic: bool,

    pub name: Identifier,

    /// Constructor-parameter default (`?string middle = null`)
    pub default_value: Option<Expression>,

    pub span: Span,
}

/// Component / field modifier keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Readonly,
}

/// Record name: declared, or the anonymous placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordName {
    Named(QualifiedName),
    Anonymous(Span),
}

impl RecordName {
    /// Display form used in the synthesized string representation and
    /// hash seed. The anonymous placeholder renders as `record`.
    pub fn display_name(&self, interner: &Interner) -> String {
        match self {
            RecordName::Named(name) => name.display_name(interner),
            RecordName::Anonymous(_) => "record".to_string(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            RecordName::Named(name) => name.span,
            RecordName::Anonymous(span) => *span,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, RecordName::Anonymous(_))
    }
}

/// Record declaration: the parsed shape consumed by the desugar
/// transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    /// Compiler annotations (//@@tag)
    pub annotations: Vec<Annotation>,

    /// Doc comment, if one preceded the declaration
    pub comment: Option<Symbol>,

    pub name: RecordName,

    /// Type-parameter placeholders (`record Box<T>(T value)`); consumed
    /// syntactically, never bound
    pub type_params: Option<Vec<Identifier>>,

    /// Ordered components; names are unique, a variadic component is
    /// last
    pub components: Vec<Component>,

    pub extends: Option<TypeAnnotation>,
    pub implements: Vec<TypeAnnotation>,
    pub body: RecordBody,
    pub span: Span,
}

// ============================================================================
// Ordered body map
// ============================================================================

/// Key of one record-body member.
///
/// Methods are keyed by name and declared arity; the constructor and the
/// initializer block occupy reserved keys distinct from any method key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKey {
    Property(Symbol),
    Method(Symbol, usize),
    Constructor,
    Initializer,
}

/// A record-body member.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordMember {
    Property(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(Vec<Statement>),
}

/// Ordered association from member key to member.
///
/// Insertion order is preserved; replacing an existing key keeps its
/// original position. This is the structure the desugar transform's
/// insert-if-absent injection rule operates on.
#[derive(Debug, Clone, Default)]
pub struct RecordBody {
    entries: Vec<(MemberKey, RecordMember)>,
    index: FxHashMap<MemberKey, usize>,
}

impl RecordBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &MemberKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &MemberKey) -> Option<&RecordMember> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Insert a member, replacing any existing member under the same key
    /// in place (its position is preserved). Returns the replaced
    /// member, if any.
    pub fn insert(&mut self, key: MemberKey, member: RecordMember) -> Option<RecordMember> {
        if let Some(&i) = self.index.get(&key) {
            Some(std::mem::replace(&mut self.entries[i].1, member))
        } else {
            self.index.insert(key, self.entries.len());
            self.entries.push((key, member));
            None
        }
    }

    /// Insert a member only if no member occupies the key. Returns true
    /// if the member was inserted.
    pub fn insert_if_absent(&mut self, key: MemberKey, member: RecordMember) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push((key, member));
        true
    }

    /// Remove and return the member under a key, preserving the order of
    /// the remaining members.
    pub fn remove(&mut self, key: &MemberKey) -> Option<RecordMember> {
        let i = self.index.remove(key)?;
        let (_, member) = self.entries.remove(i);
        for idx in self.index.values_mut() {
            if *idx > i {
                *idx -= 1;
            }
        }
        Some(member)
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberKey, &RecordMember)> {
        self.entries.iter().map(|(k, m)| (k, m))
    }

    /// Consume the body, yielding members in insertion order.
    pub fn into_entries(self) -> Vec<(MemberKey, RecordMember)> {
        self.entries
    }
}

impl PartialEq for RecordBody {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    fn field(interner: &mut Interner, name: &str) -> (MemberKey, RecordMember) {
        let sym = interner.intern(name);
        let span = Span::new(0, 0, 1, 1);
        (
            MemberKey::Property(sym),
            RecordMember::Property(FieldDecl {
                annotations: Vec::new(),
                visibility: Visibility::Private,
                is_readonly: false,
                name: Identifier::new(sym, span),
                type_annotation: None,
                initializer: None,
                span,
            }),
        )
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut interner = Interner::new();
        let mut body = RecordBody::new();

        for name in ["a", "b", "c"] {
            let (key, member) = field(&mut interner, name);
            body.insert(key, member);
        }

        let names: Vec<_> = body
            .iter()
            .map(|(k, _)| match k {
                MemberKey::Property(sym) => interner.resolve(*sym).to_string(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut interner = Interner::new();
        let mut body = RecordBody::new();

        let (ka, ma) = field(&mut interner, "a");
        let (kb, mb) = field(&mut interner, "b");
        body.insert(ka, ma);
        body.insert(kb, mb);

        let (ka2, ma2) = field(&mut interner, "a");
        let replaced = body.insert(ka2, ma2);
        assert!(replaced.is_some());
        assert_eq!(body.len(), 2);
        assert!(matches!(body.iter().next().unwrap().0, MemberKey::Property(_)));
    }

    #[test]
    fn test_insert_if_absent() {
        let mut interner = Interner::new();
        let mut body = RecordBody::new();

        let (key, member) = field(&mut interner, "a");
        assert!(body.insert_if_absent(key, member.clone()));
        assert!(!body.insert_if_absent(key, member));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut interner = Interner::new();
        let mut body = RecordBody::new();

        for name in ["a", "b", "c"] {
            let (key, member) = field(&mut interner, name);
            body.insert(key, member);
        }

        let b = MemberKey::Property(interner.intern("b"));
        assert!(body.remove(&b).is_some());
        assert!(!body.contains(&b));

        let c = MemberKey::Property(interner.intern("c"));
        assert!(body.get(&c).is_some());
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_reserved_keys_distinct() {
        assert_ne!(MemberKey::Constructor, MemberKey::Initializer);
    }
}
