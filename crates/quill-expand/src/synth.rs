//! Builders for synthesized AST nodes
//!
//! The desugar transform emits structured nodes, never code-as-text.
//! This module is the closed set of shapes it can emit: runtime
//! collaborator calls (describe / combineHashes / contentHash /
//! compare), tuple literals, concatenation chains, field assignments,
//! and accessor methods.

use quill_parser::ast::*;
use quill_parser::interner::{Interner, Symbol};
use quill_parser::token::Span;

/// Symbols for every name the transform synthesizes, interned once per
/// expander.
pub(crate) struct WellKnown {
    /// Runtime support namespace addressed by generated code
    pub values: Symbol,
    pub describe: Symbol,
    pub combine_hashes: Symbol,
    pub content_hash: Symbol,
    pub compare: Symbol,

    /// Injected member names
    pub to_string: Symbol,
    pub hash_code: Symbol,
    pub compare_to: Symbol,
    pub invoke: Symbol,

    /// Parameter names of injected members
    pub value_param: Symbol,
    pub map_param: Symbol,

    /// Reserved type names resolved by the host
    pub self_type: Symbol,
    pub value_interface: Symbol,
}

impl WellKnown {
    pub fn new(interner: &mut Interner) -> Self {
        Self {
            values: interner.intern("Values"),
            describe: interner.intern("describe"),
            combine_hashes: interner.intern("combineHashes"),
            content_hash: interner.intern("contentHash"),
            compare: interner.intern("compare"),
            to_string: interner.intern("toString"),
            hash_code: interner.intern("hashCode"),
            compare_to: interner.intern("compareTo"),
            invoke: interner.intern("invoke"),
            value_param: interner.intern("value"),
            map_param: interner.intern("map"),
            self_type: interner.intern("Self"),
            value_interface: interner.intern("Value"),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

pub(crate) fn ident(name: Symbol, span: Span) -> Expression {
    Expression::Identifier(Identifier::new(name, span))
}

pub(crate) fn string_literal(value: Symbol, span: Span) -> Expression {
    Expression::StringLiteral(StringLiteral { value, span })
}

pub(crate) fn int_literal(value: i64, span: Span) -> Expression {
    Expression::IntLiteral(IntLiteral { value, span })
}

/// `this.<name>`
pub(crate) fn this_member(name: Symbol, span: Span) -> Expression {
    Expression::Member(MemberExpression {
        object: Box::new(Expression::This(span)),
        property: Identifier::new(name, span),
        span,
    })
}

/// `<object>.<name>`
pub(crate) fn member(object: Expression, name: Symbol, span: Span) -> Expression {
    Expression::Member(MemberExpression {
        object: Box::new(object),
        property: Identifier::new(name, span),
        span,
    })
}

pub(crate) fn call(callee: Expression, arguments: Vec<Expression>, span: Span) -> Expression {
    Expression::Call(CallExpression {
        callee: Box::new(callee),
        arguments,
        span,
    })
}

/// A call into the runtime support namespace: `Values.<method>(args)`
pub(crate) fn values_call(
    names: &WellKnown,
    method: Symbol,
    arguments: Vec<Expression>,
    span: Span,
) -> Expression {
    call(member(ident(names.values, span), method, span), arguments, span)
}

/// `[e1, e2, ...]` - the ordered component tuple
pub(crate) fn tuple(elements: Vec<Expression>, span: Span) -> Expression {
    Expression::Array(ArrayExpression { elements, span })
}

/// Left-folded string concatenation: `p1 + p2 + ... + pn`
pub(crate) fn concat(parts: Vec<Expression>, span: Span) -> Expression {
    let mut iter = parts.into_iter();
    let first = iter.next().expect("concat of at least one part");
    iter.fold(first, |left, right| {
        Expression::Binary(BinaryExpression {
            operator: BinaryOperator::Add,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    })
}

/// `<object> instanceof Self`
pub(crate) fn instanceof_self(names: &WellKnown, object: Expression, span: Span) -> Expression {
    Expression::InstanceOf(InstanceOfExpression {
        object: Box::new(object),
        type_name: self_type(names, span),
        span,
    })
}

// ============================================================================
// Types
// ============================================================================

pub(crate) fn primitive_type(primitive: PrimitiveType, span: Span) -> TypeAnnotation {
    TypeAnnotation {
        ty: Type::Primitive(primitive),
        span,
    }
}

/// The reserved `Self` type reference, resolved by the host to the
/// enclosing class.
pub(crate) fn self_type(names: &WellKnown, span: Span) -> TypeAnnotation {
    TypeAnnotation {
        ty: Type::Reference(TypeReference::simple(QualifiedName::simple(
            Identifier::new(names.self_type, span),
        ))),
        span,
    }
}

/// The value-object capability marker interface every expanded record
/// implements.
pub(crate) fn value_interface(names: &WellKnown, span: Span) -> TypeAnnotation {
    TypeAnnotation {
        ty: Type::Reference(TypeReference::simple(QualifiedName::simple(
            Identifier::new(names.value_interface, span),
        ))),
        span,
    }
}

/// `?callable` - the type of the optional decomposition mapper
pub(crate) fn nullable_callable(span: Span) -> TypeAnnotation {
    TypeAnnotation {
        ty: Type::Nullable(Box::new(primitive_type(PrimitiveType::Callable, span))),
        span,
    }
}

// ============================================================================
// Statements and members
// ============================================================================

pub(crate) fn return_stmt(value: Expression, span: Span) -> Statement {
    Statement::Return(ReturnStatement {
        value: Some(value),
        span,
    })
}

/// `this.<name> = <name>;` - one constructor assignment
pub(crate) fn field_assignment(name: Symbol, span: Span) -> Statement {
    Statement::Expression(ExpressionStatement {
        expression: Expression::Assignment(AssignmentExpression {
            target: Box::new(this_member(name, span)),
            value: Box::new(ident(name, span)),
            span,
        }),
        span,
    })
}

/// A synthesized public method with a single-return body.
pub(crate) fn public_method(
    name: Symbol,
    params: Vec<Parameter>,
    return_type: Option<TypeAnnotation>,
    body: Vec<Statement>,
    span: Span,
) -> MethodDecl {
    MethodDecl {
        annotations: Vec::new(),
        visibility: Visibility::Public,
        name: Identifier::new(name, span),
        params,
        return_type,
        body: BlockStatement {
            statements: body,
            span,
        },
        span,
    }
}

/// The zero-argument accessor of one component: `name(): T { return
/// this.name; }`
pub(crate) fn accessor(name: Symbol, storage: Option<TypeAnnotation>, span: Span) -> MethodDecl {
    public_method(
        name,
        Vec::new(),
        storage,
        vec![return_stmt(this_member(name, span), span)],
        span,
    )
}

/// An untyped parameter without default, as used by `compareTo(value)`.
pub(crate) fn untyped_parameter(name: Symbol, span: Span) -> Parameter {
    Parameter {
        name: Identifier::new(name, span),
        type_annotation: None,
        default_value: None,
        variadic: false,
        span,
    }
}

/// The optional mapper parameter of the decomposition member:
/// `map: ?callable = null`.
pub(crate) fn mapper_parameter(names: &WellKnown, span: Span) -> Parameter {
    Parameter {
        name: Identifier::new(names.map_param, span),
        type_annotation: Some(nullable_callable(span)),
        default_value: Some(Expression::NullLiteral(span)),
        variadic: false,
        span,
    }
}
