//! Type annotation parsing

use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse a possibly-qualified name: `Point`, `geo::Point`, `::geo::Point`.
pub fn parse_qualified_name(parser: &mut Parser) -> Result<QualifiedName, ParseError> {
    let start_span = parser.current_span();

    let leading = if parser.check(&Token::ColonColon) {
        parser.advance();
        true
    } else {
        false
    };

    let mut segments = vec![parser.expect_identifier()?];
    while parser.check(&Token::ColonColon) {
        parser.advance();
        segments.push(parser.expect_identifier()?);
    }

    let end_span = segments.last().map(|s| s.span).unwrap_or(start_span);
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(QualifiedName::new(leading, segments, span))
}

/// Parse a type annotation: `int`, `?string`, `geo::Shape`, `Box<T>`,
/// `int[]`.
pub fn parse_type_annotation(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();

    // Nullable prefix wraps the whole remaining type
    if parser.check(&Token::Question) {
        parser.advance();
        let inner = parse_type_annotation(parser)?;
        let span = parser.combine_spans(&start_span, &inner.span);
        return Ok(TypeAnnotation {
            ty: Type::Nullable(Box::new(inner)),
            span,
        });
    }

    let name = parse_qualified_name(parser)?;

    // Primitives are plain identifiers with well-known names
    let base = if name.is_simple() {
        let text = parser.resolve(name.last().name).to_string();
        match PrimitiveType::from_name(&text) {
            Some(primitive) => Type::Primitive(primitive),
            None => Type::Reference(parse_reference(parser, name)?),
        }
    } else {
        Type::Reference(parse_reference(parser, name)?)
    };

    let end_span = parser.prev_span();
    let mut annotation = TypeAnnotation {
        span: parser.combine_spans(&start_span, &end_span),
        ty: base,
    };

    // Array suffixes: T[], T[][]
    while parser.check(&Token::LeftBracket) && parser.peek() == Some(&Token::RightBracket) {
        parser.advance();
        let end_span = parser.current_span();
        parser.expect(Token::RightBracket)?;
        let span = parser.combine_spans(&start_span, &end_span);
        annotation = TypeAnnotation {
            ty: Type::Array(ArrayType::of(annotation)),
            span,
        };
    }

    Ok(annotation)
}

/// Parse the optional type-argument list of a reference. The arguments
/// are consumed syntactically but never bound.
fn parse_reference(parser: &mut Parser, name: QualifiedName) -> Result<TypeReference, ParseError> {
    if !parser.check(&Token::Less) {
        return Ok(TypeReference::simple(name));
    }
    parser.advance();

    let mut args = Vec::new();
    let mut guard = super::guards::LoopGuard::new("type_arguments");
    while !parser.check(&Token::Greater) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        args.push(parse_type_annotation(parser)?);
        if !parser.check(&Token::Greater) {
            parser.expect(Token::Comma)?;
        }
    }
    parser.expect(Token::Greater)?;

    Ok(TypeReference {
        name,
        type_args: Some(args),
    })
}
