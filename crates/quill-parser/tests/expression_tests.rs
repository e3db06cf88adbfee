//! Tests for expression parsing

use quill_parser::ast::*;
use quill_parser::parser::ParseErrorKind;
use quill_parser::{Error, Parsed};

fn parse(source: &str) -> Parsed {
    quill_parser::parse(source).expect("parse failed")
}

fn expression(parsed: &Parsed) -> &Expression {
    match &parsed.module.statements[0] {
        Statement::Expression(stmt) => &stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_precedence_multiplication_binds_tighter() {
    let parsed = parse("1 + 2 * 3;");
    match expression(&parsed) {
        Expression::Binary(add) => {
            assert_eq!(add.operator, BinaryOperator::Add);
            assert!(matches!(*add.left, Expression::IntLiteral(_)));
            match add.right.as_ref() {
                Expression::Binary(mul) => assert_eq!(mul.operator, BinaryOperator::Multiply),
                other => panic!("expected multiplication, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_comparison_and_logical() {
    let parsed = parse("lo > hi && lo != 0;");
    match expression(&parsed) {
        Expression::Logical(and) => {
            assert_eq!(and.operator, LogicalOperator::And);
            assert!(matches!(*and.left, Expression::Binary(_)));
            assert!(matches!(*and.right, Expression::Binary(_)));
        }
        other => panic!("expected logical expression, got {:?}", other),
    }
}

#[test]
fn test_ternary() {
    let parsed = parse("x == null ? fallback : x;");
    match expression(&parsed) {
        Expression::Conditional(cond) => {
            assert!(matches!(*cond.test, Expression::Binary(_)));
        }
        other => panic!("expected conditional, got {:?}", other),
    }
}

#[test]
fn test_unary() {
    let parsed = parse("!done;");
    match expression(&parsed) {
        Expression::Unary(unary) => assert_eq!(unary.operator, UnaryOperator::Not),
        other => panic!("expected unary expression, got {:?}", other),
    }
}

#[test]
fn test_call_member_index_chain() {
    let parsed = parse("points[0].scaled(2).x();");
    // Outermost: call of .x
    match expression(&parsed) {
        Expression::Call(outer) => {
            assert!(outer.arguments.is_empty());
            match outer.callee.as_ref() {
                Expression::Member(member) => {
                    assert_eq!(parsed.interner.resolve(member.property.name), "x");
                    assert!(matches!(*member.object, Expression::Call(_)));
                }
                other => panic!("expected member access, got {:?}", other),
            }
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_new_expression() {
    let parsed = parse("new Point(1, 10);");
    match expression(&parsed) {
        Expression::New(new) => {
            assert_eq!(new.class.display_name(&parsed.interner), "Point");
            assert_eq!(new.arguments.len(), 2);
        }
        other => panic!("expected new expression, got {:?}", other),
    }
}

#[test]
fn test_new_with_qualified_name() {
    let parsed = parse("new geo::Point(1, 10);");
    match expression(&parsed) {
        Expression::New(new) => {
            assert_eq!(new.class.display_name(&parsed.interner), "geo.Point");
        }
        other => panic!("expected new expression, got {:?}", other),
    }
}

#[test]
fn test_instanceof() {
    let parsed = parse("value instanceof Point;");
    match expression(&parsed) {
        Expression::InstanceOf(expr) => {
            assert!(matches!(*expr.object, Expression::Identifier(_)));
            assert!(matches!(expr.type_name.ty, Type::Reference(_)));
        }
        other => panic!("expected instanceof, got {:?}", other),
    }
}

#[test]
fn test_array_literal() {
    let parsed = parse("[1, 2, 3];");
    match expression(&parsed) {
        Expression::Array(array) => assert_eq!(array.elements.len(), 3),
        other => panic!("expected array literal, got {:?}", other),
    }
}

#[test]
fn test_assignment_to_member() {
    let parsed = parse("this.x = x;");
    match expression(&parsed) {
        Expression::Assignment(assignment) => {
            assert!(matches!(*assignment.target, Expression::Member(_)));
            assert!(matches!(*assignment.value, Expression::Identifier(_)));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_invalid_assignment_target() {
    match quill_parser::parse("1 = 2;") {
        Err(Error::Parse(errors)) => {
            assert!(matches!(
                errors[0].kind,
                ParseErrorKind::InvalidSyntax { .. }
            ));
        }
        other => panic!("expected parse error, got ok={}", other.is_ok()),
    }
}

#[test]
fn test_parenthesized() {
    let parsed = parse("(1 + 2) * 3;");
    match expression(&parsed) {
        Expression::Binary(mul) => {
            assert_eq!(mul.operator, BinaryOperator::Multiply);
            assert!(matches!(*mul.left, Expression::Parenthesized(_)));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}
