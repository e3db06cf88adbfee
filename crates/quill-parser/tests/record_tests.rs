//! Tests for record declaration parsing

use quill_parser::ast::*;
use quill_parser::parser::{ParseErrorKind, Parser};
use quill_parser::{Error, Parsed};

fn parse(source: &str) -> Parsed {
    quill_parser::parse(source).expect("parse failed")
}

fn parse_errors(source: &str) -> Vec<quill_parser::ParseError> {
    match quill_parser::parse(source) {
        Err(Error::Parse(errors)) => errors,
        Err(Error::Lex(errors)) => panic!("unexpected lex errors: {:?}", errors),
        Ok(_) => panic!("expected parse errors for: {}", source),
    }
}

fn record(parsed: &Parsed) -> &RecordDecl {
    match &parsed.module.statements[0] {
        Statement::RecordDecl(decl) => decl,
        other => panic!("expected record declaration, got {:?}", other),
    }
}

// ============================================================================
// Header and components
// ============================================================================

#[test]
fn test_parse_point_record() {
    let parsed = parse("record Point(int x, int y) { }");
    let decl = record(&parsed);

    assert_eq!(decl.name.display_name(&parsed.interner), "Point");
    assert_eq!(decl.components.len(), 2);
    assert!(decl.body.is_empty());
    assert!(decl.extends.is_none());
    assert!(decl.implements.is_empty());

    let x = &decl.components[0];
    assert_eq!(parsed.interner.resolve(x.name.name), "x");
    assert!(x.modifiers.is_none());
    assert!(!x.variadic);
    assert!(x.default_value.is_none());
    match &x.ty {
        Some(ty) => assert_eq!(ty.ty.as_primitive(), Some(PrimitiveType::Int)),
        None => panic!("expected declared type"),
    }
}

#[test]
fn test_qualified_record_name() {
    let parsed = parse("record geo::Point(int x, int y) { }");
    let decl = record(&parsed);

    assert_eq!(decl.name.display_name(&parsed.interner), "geo.Point");
}

#[test]
fn test_component_modifiers() {
    let parsed = parse("record Tagged(public readonly string id) { }");
    let decl = record(&parsed);

    let id = &decl.components[0];
    assert_eq!(
        id.modifiers,
        Some(vec![Modifier::Public, Modifier::Readonly])
    );
    match &id.ty {
        Some(ty) => assert_eq!(ty.ty.as_primitive(), Some(PrimitiveType::String)),
        None => panic!("expected declared type"),
    }
}

#[test]
fn test_component_default_value() {
    let parsed = parse(r#"record Name(string first, string last, ?string middle = null) { }"#);
    let decl = record(&parsed);

    assert_eq!(decl.components.len(), 3);
    let middle = &decl.components[2];
    assert!(matches!(
        middle.default_value,
        Some(Expression::NullLiteral(_))
    ));
    match &middle.ty {
        Some(ty) => assert!(matches!(ty.ty, Type::Nullable(_))),
        None => panic!("expected nullable type"),
    }
}

#[test]
fn test_variadic_component() {
    let parsed = parse("record Bag(int... members) { }");
    let decl = record(&parsed);

    let members = &decl.components[0];
    assert!(members.variadic);
    assert_eq!(parsed.interner.resolve(members.name.name), "members");
    // The declared type stays the element type; storage becomes an
    // array only at expansion time
    match &members.ty {
        Some(ty) => assert_eq!(ty.ty.as_primitive(), Some(PrimitiveType::Int)),
        None => panic!("expected declared type"),
    }
}

#[test]
fn test_untyped_variadic_component() {
    let parsed = parse("record Bag(... members) { }");
    let decl = record(&parsed);

    let members = &decl.components[0];
    assert!(members.variadic);
    assert!(members.ty.is_none());
}

#[test]
fn test_variadic_must_be_last() {
    let errors = parse_errors("record Bad(int... xs, int y) { }");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::InvalidSyntax { .. }
    ));
}

#[test]
fn test_duplicate_component_names() {
    let errors = parse_errors("record Bad(int x, string x) { }");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::DuplicateComponent { .. }
    ));
}

#[test]
fn test_type_parameter_placeholder() {
    let parsed = parse("record Box<T>(T value) { }");
    let decl = record(&parsed);

    let params = decl.type_params.as_ref().expect("type params");
    assert_eq!(params.len(), 1);
    assert_eq!(parsed.interner.resolve(params[0].name), "T");

    // The component type is an unresolved reference to the placeholder
    match &decl.components[0].ty {
        Some(TypeAnnotation {
            ty: Type::Reference(reference),
            ..
        }) => {
            assert_eq!(reference.name.display_name(&parsed.interner), "T");
        }
        other => panic!("expected type reference, got {:?}", other),
    }
}

// ============================================================================
// Heritage
// ============================================================================

#[test]
fn test_extends_and_implements() {
    let parsed = parse("record Child(int x) extends Base implements A, B { }");
    let decl = record(&parsed);

    assert!(decl.extends.is_some());
    assert_eq!(decl.implements.len(), 2);
}

#[test]
fn test_malformed_interface_list() {
    let errors = parse_errors("record Bad(int x) implements A B { }");
    match &errors[0].kind {
        ParseErrorKind::UnexpectedToken { expected, .. } => {
            assert!(expected.contains(&quill_parser::Token::Comma));
            assert!(expected.contains(&quill_parser::Token::LeftBrace));
        }
        other => panic!("expected unexpected-token error, got {:?}", other),
    }
}

#[test]
fn test_missing_component_parens() {
    let errors = parse_errors("record Bad { }");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::UnexpectedToken { .. }
    ));
    // Errors are attributed to the originating source line
    assert_eq!(errors[0].span.line, 1);
}

// ============================================================================
// Body members
// ============================================================================

#[test]
fn test_body_members_keyed_by_name_and_arity() {
    let parsed = parse(
        r#"
        record Point(int x, int y) {
            private int cached;
            length(): int { return 0; }
            scaled(int factor): Point { return this; }
        }
        "#,
    );
    let decl = record(&parsed);

    let mut interner = parsed.interner.clone();
    let cached = interner.intern("cached");
    let length = interner.intern("length");
    let scaled = interner.intern("scaled");

    assert!(decl.body.contains(&MemberKey::Property(cached)));
    assert!(decl.body.contains(&MemberKey::Method(length, 0)));
    assert!(decl.body.contains(&MemberKey::Method(scaled, 1)));
    assert!(!decl.body.contains(&MemberKey::Method(scaled, 0)));
}

#[test]
fn test_user_tostring_override_stored() {
    let parsed = parse(
        r#"
        record Point(int x, int y) {
            toString(): string { return "custom"; }
        }
        "#,
    );
    let decl = record(&parsed);

    let mut interner = parsed.interner.clone();
    let to_string = interner.intern("toString");
    assert!(decl.body.contains(&MemberKey::Method(to_string, 0)));
}

#[test]
fn test_explicit_constructor_rejected() {
    for source in [
        "record Point(int x, int y) { constructor(int x, int y) { } }",
        "record Unit() { constructor() { } }",
        "record Tagged(public readonly string id) { length(): int { return 0; } constructor() { } }",
    ] {
        let errors = parse_errors(source);
        assert!(
            matches!(errors[0].kind, ParseErrorKind::RecordConstructor),
            "expected record-constructor error for: {}",
            source
        );
    }
}

#[test]
fn test_constructor_allowed_in_plain_class() {
    let parsed = parse("class Point { constructor(int x) { this.x = x; } }");
    match &parsed.module.statements[0] {
        Statement::ClassDecl(class) => {
            assert!(matches!(class.members[0], ClassMember::Constructor(_)));
        }
        other => panic!("expected class declaration, got {:?}", other),
    }
}

// ============================================================================
// Initializer blocks
// ============================================================================

#[test]
fn test_init_block_stored_under_reserved_key() {
    let parsed = parse(
        r#"
        record Range(int lo, int hi) {
            init { if (lo > hi) fail("lo > hi!"); }
        }
        "#,
    );
    let decl = record(&parsed);

    match decl.body.get(&MemberKey::Initializer) {
        Some(RecordMember::Initializer(statements)) => {
            assert_eq!(statements.len(), 1);
            assert!(matches!(statements[0], Statement::If(_)));
        }
        other => panic!("expected initializer entry, got {:?}", other),
    }
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_duplicate_init_first_wins() {
    let parsed = parse(
        r#"
        record Range(int lo, int hi) {
            init { first(); }
            init { second(); third(); }
        }
        "#,
    );
    let decl = record(&parsed);

    match decl.body.get(&MemberKey::Initializer) {
        Some(RecordMember::Initializer(statements)) => assert_eq!(statements.len(), 1),
        other => panic!("expected initializer entry, got {:?}", other),
    }
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].message.contains("first one wins"));
}

#[test]
fn test_legacy_init_normalized_with_warning() {
    let parsed = parse(
        r#"
        record Range(int lo, int hi) {
            __init() { check(); }
        }
        "#,
    );
    let decl = record(&parsed);

    match decl.body.get(&MemberKey::Initializer) {
        Some(RecordMember::Initializer(statements)) => assert_eq!(statements.len(), 1),
        other => panic!("expected initializer entry, got {:?}", other),
    }

    // The deprecated method must not survive as an ordinary member
    let mut interner = parsed.interner.clone();
    let legacy = interner.intern("__init");
    assert!(!decl.body.contains(&MemberKey::Method(legacy, 0)));

    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].message.contains("deprecated"));
}

#[test]
fn test_modern_init_supersedes_legacy() {
    let parsed = parse(
        r#"
        record Range(int lo, int hi) {
            __init() { old(); }
            init { fresh(); also(); }
        }
        "#,
    );
    let decl = record(&parsed);

    match decl.body.get(&MemberKey::Initializer) {
        Some(RecordMember::Initializer(statements)) => assert_eq!(statements.len(), 2),
        other => panic!("expected initializer entry, got {:?}", other),
    }
    // One warning for the deprecation, one for the replacement
    assert_eq!(parsed.warnings.len(), 2);
}

#[test]
fn test_legacy_init_ignored_when_block_present() {
    let parsed = parse(
        r#"
        record Range(int lo, int hi) {
            init { fresh(); }
            __init() { old(); }
        }
        "#,
    );
    let decl = record(&parsed);

    match decl.body.get(&MemberKey::Initializer) {
        Some(RecordMember::Initializer(statements)) => assert_eq!(statements.len(), 1),
        other => panic!("expected initializer entry, got {:?}", other),
    }
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].message.contains("ignored"));
}

// ============================================================================
// Doc comments and annotations
// ============================================================================

#[test]
fn test_doc_comment_and_annotations_captured() {
    let parsed = parse(
        "/** A point in 2D space. */\n//@@serialize json\nrecord Point(int x, int y) { }",
    );
    let decl = record(&parsed);

    let comment = decl.comment.expect("doc comment");
    assert_eq!(parsed.interner.resolve(comment), "A point in 2D space.");

    assert_eq!(decl.annotations.len(), 1);
    assert_eq!(
        parsed.interner.resolve(decl.annotations[0].name),
        "serialize"
    );
    assert_eq!(
        decl.annotations[0]
            .value
            .map(|v| parsed.interner.resolve(v).to_string()),
        Some("json".to_string())
    );
}

#[test]
fn test_pending_comment_consumed_once() {
    let parsed = parse("/** doc */\nrecord A(int x) { }\nrecord B(int y) { }");
    match (&parsed.module.statements[0], &parsed.module.statements[1]) {
        (Statement::RecordDecl(a), Statement::RecordDecl(b)) => {
            assert!(a.comment.is_some());
            assert!(b.comment.is_none());
        }
        other => panic!("expected two records, got {:?}", other),
    }
}

// ============================================================================
// Anonymous records
// ============================================================================

#[test]
fn test_anonymous_record_parses() {
    let parsed = parse(r#"new record(name: "Timm", age: 44) { };"#);

    let expr = match &parsed.module.statements[0] {
        Statement::Expression(stmt) => &stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    };

    match expr {
        Expression::NewRecord(new_record) => {
            assert_eq!(new_record.arguments.len(), 2);
            assert_eq!(
                parsed.interner.resolve(new_record.arguments[0].name.name),
                "name"
            );
            assert_eq!(
                parsed.interner.resolve(new_record.arguments[1].name.name),
                "age"
            );

            let definition = &new_record.definition;
            assert!(definition.name.is_anonymous());
            assert_eq!(definition.name.display_name(&parsed.interner), "record");
            assert_eq!(definition.components.len(), 2);
            // Components are synthesized untyped, in call-site order
            assert!(definition.components.iter().all(|c| c.ty.is_none()));
            assert_eq!(
                parsed.interner.resolve(definition.components[1].name.name),
                "age"
            );
        }
        other => panic!("expected anonymous record, got {:?}", other),
    }
}

#[test]
fn test_anonymous_record_with_body() {
    let parsed = parse(
        r#"new record(name: "Timm") { greeting(): string { return this.name; } };"#,
    );

    match &parsed.module.statements[0] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::NewRecord(new_record) => {
                assert_eq!(new_record.definition.body.len(), 1);
            }
            other => panic!("expected anonymous record, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_anonymous_record_requires_named_arguments() {
    let errors = parse_errors("new record(44) { };");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::InvalidSyntax { .. }
    ));
}

#[test]
fn test_anonymous_record_duplicate_names() {
    let errors = parse_errors("new record(a: 1, a: 2) { };");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::DuplicateComponent { .. }
    ));
}

#[test]
fn test_anonymous_record_requires_body() {
    let errors = parse_errors("new record(a: 1);");
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_error_aborts_offending_declaration_only() {
    // The parser accumulates the error and resynchronizes; both errors
    // are reported in one pass
    let mut parser_errors =
        parse_errors("record Bad(int x, string x) { }\nrecord Worse(int... xs, int y) { }");
    assert_eq!(parser_errors.len(), 2);
    let second = parser_errors.pop().unwrap();
    assert!(matches!(second.kind, ParseErrorKind::InvalidSyntax { .. }));
}

#[test]
fn test_valid_record_after_error_still_parses() {
    let parser = Parser::new("record Bad( { }\nrecord Fine(int x) { }").unwrap();
    let errors = parser.parse().err().expect("expected errors");
    // Only the malformed declaration errored
    assert_eq!(errors.len(), 1);
}
