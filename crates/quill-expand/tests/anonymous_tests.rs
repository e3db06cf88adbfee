//! Tests for the anonymous-record adapter

use quill_expand::Expander;
use quill_parser::ast::*;
use quill_parser::interner::Interner;

/// Parse a module, expand it, and return the first statement.
fn expand_statements(source: &str) -> (Vec<Statement>, Interner) {
    let parsed = quill_parser::parse(source).expect("parse failed");
    let mut interner = parsed.interner;
    let module = Expander::new(&mut interner).expand_module(&parsed.module);
    (module.statements, interner)
}

fn new_class(statement: &Statement) -> &NewClassExpression {
    match statement {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::NewClass(expr) => expr,
            other => panic!("expected expanded anonymous record, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_anonymous_record_becomes_inline_class() {
    let (statements, interner) =
        expand_statements(r#"new record(name: "Timm", age: 44) { };"#);
    let expr = new_class(&statements[0]);
    let class = &expr.definition;

    // Anonymous: no name, but the same final value-object shape
    assert!(class.name.is_none());
    assert!(class.is_final);
    assert_eq!(class.implements.len(), 1);
    match &class.implements[0].ty {
        Type::Reference(reference) => {
            assert_eq!(reference.name.display_name(&interner), "Value");
        }
        other => panic!("expected marker interface, got {:?}", other),
    }

    // field/accessor pairs for both synthesized components, the
    // constructor, and the four injected members
    assert_eq!(class.members.len(), 9);
}

#[test]
fn test_call_arguments_preserved_in_order() {
    let (statements, _interner) =
        expand_statements(r#"new record(name: "Timm", age: 44) { };"#);
    let expr = new_class(&statements[0]);

    assert_eq!(expr.arguments.len(), 2);
    assert!(matches!(expr.arguments[0], Expression::StringLiteral(_)));
    assert!(matches!(
        expr.arguments[1],
        Expression::IntLiteral(IntLiteral { value: 44, .. })
    ));
}

#[test]
fn test_components_are_untyped_and_ordered() {
    let (statements, interner) =
        expand_statements(r#"new record(name: "Timm", age: 44) { };"#);
    let expr = new_class(&statements[0]);
    let class = &expr.definition;

    // Constructor parameters mirror the named arguments, untyped
    let ctor = class
        .members
        .iter()
        .find_map(|member| match member {
            ClassMember::Constructor(ctor) => Some(ctor),
            _ => None,
        })
        .expect("constructor");
    assert_eq!(ctor.params.len(), 2);
    assert!(ctor.params.iter().all(|p| p.type_annotation.is_none()));
    assert_eq!(interner.resolve(ctor.params[0].name.name), "name");
    assert_eq!(interner.resolve(ctor.params[1].name.name), "age");
}

#[test]
fn test_placeholder_renders_as_record() {
    let (statements, interner) = expand_statements(r#"new record(v: 1) { };"#);
    let expr = new_class(&statements[0]);

    let to_string = expr
        .definition
        .members
        .iter()
        .find_map(|member| match member {
            ClassMember::Method(method)
                if interner.resolve(method.name.name) == "toString" =>
            {
                Some(method)
            }
            _ => None,
        })
        .expect("toString");

    // The leading display literal uses the anonymous placeholder
    fn leftmost<'a>(expr: &'a Expression) -> &'a Expression {
        match expr {
            Expression::Binary(binary) => leftmost(&binary.left),
            other => other,
        }
    }
    match &to_string.body.statements[0] {
        Statement::Return(ret) => match leftmost(ret.value.as_ref().expect("value")) {
            Expression::StringLiteral(lit) => {
                assert_eq!(interner.resolve(lit.value), "record(v: ");
            }
            other => panic!("expected leading literal, got {:?}", other),
        },
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_user_body_members_survive() {
    let (statements, interner) = expand_statements(
        r#"new record(name: "Timm") { greeting(): string { return this.name; } };"#,
    );
    let expr = new_class(&statements[0]);

    let greeting = expr
        .definition
        .members
        .iter()
        .any(|member| matches!(member, ClassMember::Method(method)
            if interner.resolve(method.name.name) == "greeting"));
    assert!(greeting);
}

#[test]
fn test_nested_anonymous_record_in_record_method() {
    let (statements, interner) = expand_statements(
        r#"
        record Outer(int x) {
            pair(): Value { return new record(v: this.x) { }; }
        }
        "#,
    );

    // The outer record became a class, and the anonymous record inside
    // its method body was expanded too
    let class = match &statements[0] {
        Statement::ClassDecl(class) => class,
        other => panic!("expected class, got {:?}", other),
    };

    let pair = class
        .members
        .iter()
        .find_map(|member| match member {
            ClassMember::Method(method) if interner.resolve(method.name.name) == "pair" => {
                Some(method)
            }
            _ => None,
        })
        .expect("pair method");

    match &pair.body.statements[0] {
        Statement::Return(ret) => match ret.value.as_ref().expect("value") {
            Expression::NewClass(inner) => {
                assert!(inner.definition.name.is_none());
                assert!(inner.definition.is_final);
            }
            other => panic!("expected expanded anonymous record, got {:?}", other),
        },
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_anonymous_record_in_let_initializer() {
    let (statements, _interner) = expand_statements(r#"let timm = new record(age: 44) { };"#);
    match &statements[0] {
        Statement::VariableDecl(decl) => match decl.initializer.as_ref().expect("initializer") {
            Expression::NewClass(_) => {}
            other => panic!("expected expanded anonymous record, got {:?}", other),
        },
        other => panic!("expected variable declaration, got {:?}", other),
    }
}
