//! Record declaration parsing
//!
//! The grammar rule handler for the `record` extension: the named
//! declaration form, the component list, the reserved `init { }` body
//! construct, and the anonymous `new record(...) { }` expression.
//!
//! A record body must not declare an explicit constructor; that is a
//! semantic error raised here, before the desugar transform runs. The
//! deprecated `__init()` method form is normalized into the initializer
//! slot immediately, with a warning.

use super::error::ParseWarning;
use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};
use rustc_hash::FxHashSet;

/// Parse a record declaration:
/// `record Name(components) extends P implements I1, I2 { body }`
pub fn parse_record_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let comment = parser.take_comment();
    let annotations = parser.take_annotations();

    parser.expect(Token::Record)?;

    let name = super::types::parse_qualified_name(parser)?;

    // Type-parameter placeholders are consumed but never bound
    let type_params = if parser.check(&Token::Less) {
        parser.advance();
        let mut params = Vec::new();
        let mut guard = super::guards::LoopGuard::new("record_type_params");
        while !parser.check(&Token::Greater) && !parser.at_eof() {
            guard.check(parser.current_span())?;
            params.push(parser.expect_identifier()?);
            if !parser.check(&Token::Greater) {
                parser.expect(Token::Comma)?;
            }
        }
        parser.expect(Token::Greater)?;
        Some(params)
    } else {
        None
    };

    parser.expect(Token::LeftParen)?;
    let components = parse_components(parser)?;
    parser.expect(Token::RightParen)?;

    let (extends, implements) = super::stmt::parse_heritage(parser)?;

    parser.expect(Token::LeftBrace)?;
    let body = parse_record_body(parser)?;
    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::RecordDecl(RecordDecl {
        annotations,
        comment,
        name: RecordName::Named(name),
        type_params,
        components,
        extends,
        implements,
        body,
        span,
    }))
}

// ============================================================================
// Components
// ============================================================================

/// Parse the component list. Component names must be unique and a
/// variadic component must be the last one.
fn parse_components(parser: &mut Parser) -> Result<Vec<Component>, ParseError> {
    let mut components: Vec<Component> = Vec::new();
    let mut seen: FxHashSet<crate::interner::Symbol> = FxHashSet::default();
    let mut guard = super::guards::LoopGuard::new("record_components");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let component = parse_component(parser)?;

        if let Some(prev) = components.last() {
            if prev.variadic {
                return Err(ParseError::invalid_syntax(
                    "a variadic component must be the last one",
                    component.span,
                ));
            }
        }
        if !seen.insert(component.name.name) {
            let name = parser.resolve(component.name.name).to_string();
            return Err(ParseError::duplicate_component(name, component.name.span));
        }

        components.push(component);

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(components)
}

/// Parse a single component: optional modifiers, optional type,
/// optional `...`, name, optional `= default`.
fn parse_component(parser: &mut Parser) -> Result<Component, ParseError> {
    let start_span = parser.current_span();

    let mut modifiers = Vec::new();
    loop {
        let modifier = match parser.current() {
            Token::Public => Modifier::Public,
            Token::Protected => Modifier::Protected,
            Token::Private => Modifier::Private,
            Token::Readonly => Modifier::Readonly,
            _ => break,
        };
        parser.advance();
        modifiers.push(modifier);
    }
    let modifiers = if modifiers.is_empty() {
        None
    } else {
        Some(modifiers)
    };

    let param = super::stmt::parse_parameter(parser)?;
    let span = parser.combine_spans(&start_span, &param.span);

    Ok(Component {
        modifiers,
        ty: param.type_annotation,
        variadic: param.variadic,
        name: param.name,
        default_value: param.default_value,
        span,
    })
}

// ============================================================================
// Record body
// ============================================================================

/// Parse a record body into the ordered member map. Recognizes the
/// reserved `init { }` construct, normalizes the deprecated `__init()`
/// form, and rejects explicit constructors.
fn parse_record_body(parser: &mut Parser) -> Result<RecordBody, ParseError> {
    let mut body = RecordBody::new();
    // True while the initializer slot holds the deprecated form; the
    // modern block replaces it
    let mut legacy_init = false;
    let mut guard = super::guards::LoopGuard::new("record_body");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;

        // Trivia before an init block would otherwise reach the member
        // parser, which expects a name next
        loop {
            match parser.current() {
                Token::DocComment(sym) => {
                    let sym = *sym;
                    parser.advance();
                    parser.note_comment(sym);
                }
                Token::Annotation(sym) => {
                    let sym = *sym;
                    let span = parser.current_span();
                    parser.advance();
                    parser.note_annotation(sym, span);
                }
                _ => break,
            }
        }
        if parser.check(&Token::RightBrace) {
            break;
        }

        if parser.check(&Token::Init) {
            let init_span = parser.current_span();
            parser.advance();

            parser.expect(Token::LeftBrace)?;
            let block = super::stmt::parse_block_statement(parser)?;
            let statements = block.statements;

            if !body.contains(&MemberKey::Initializer) {
                body.insert(MemberKey::Initializer, RecordMember::Initializer(statements));
            } else if legacy_init {
                body.insert(MemberKey::Initializer, RecordMember::Initializer(statements));
                legacy_init = false;
                parser.warn(ParseWarning::new(
                    "init { } supersedes the deprecated __init() method",
                    init_span,
                ));
            } else {
                parser.warn(ParseWarning::new(
                    "Duplicate init block ignored; the first one wins",
                    init_span,
                ));
            }
            continue;
        }

        match super::stmt::parse_class_member(parser)? {
            ClassMember::Constructor(ctor) => {
                return Err(ParseError::record_constructor(ctor.span));
            }
            ClassMember::Method(method)
                if parser.resolve(method.name.name) == "__init" && method.params.is_empty() =>
            {
                if body.contains(&MemberKey::Initializer) {
                    parser.warn(ParseWarning::new(
                        "__init() is deprecated and ignored because an initializer is already present; use an init { } block",
                        method.span,
                    ));
                } else {
                    parser.warn(ParseWarning::new(
                        "__init() is deprecated, use an init { } block",
                        method.span,
                    ));
                    body.insert(
                        MemberKey::Initializer,
                        RecordMember::Initializer(method.body.statements),
                    );
                    legacy_init = true;
                }
            }
            ClassMember::Method(method) => {
                let key = MemberKey::Method(method.name.name, method.params.len());
                body.insert(key, RecordMember::Method(method));
            }
            ClassMember::Field(field) => {
                let key = MemberKey::Property(field.name.name);
                body.insert(key, RecordMember::Property(field));
            }
        }
    }

    Ok(body)
}

// ============================================================================
// Anonymous records
// ============================================================================

/// Parse the anonymous-record form. The `new` keyword has been
/// consumed; the current token is `record`.
///
/// `new record(name: "Timm", age: 44) { }` synthesizes one untyped
/// component per named argument, in call-site order, and wraps the
/// resulting declaration together with the arguments.
pub(super) fn parse_anonymous_record(
    parser: &mut Parser,
    new_span: Span,
) -> Result<Expression, ParseError> {
    let record_span = parser.current_span();
    parser.expect(Token::Record)?;

    parser.expect(Token::LeftParen)?;
    let arguments = parse_named_arguments(parser)?;
    parser.expect(Token::RightParen)?;

    parser.expect(Token::LeftBrace)?;
    let body = parse_record_body(parser)?;
    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let components = arguments
        .iter()
        .map(|arg| Component {
            modifiers: None,
            ty: None,
            variadic: false,
            name: arg.name.clone(),
            default_value: None,
            span: arg.span,
        })
        .collect();

    let span = parser.combine_spans(&new_span, &end_span);

    let definition = RecordDecl {
        annotations: Vec::new(),
        comment: None,
        name: RecordName::Anonymous(record_span),
        type_params: None,
        components,
        extends: None,
        implements: Vec::new(),
        body,
        span,
    };

    Ok(Expression::NewRecord(NewRecordExpression {
        definition: Box::new(definition),
        arguments,
        span,
    }))
}

/// Parse the named argument list of an anonymous record. Every argument
/// must be named, and names must be unique (they become components).
fn parse_named_arguments(parser: &mut Parser) -> Result<Vec<NamedArgument>, ParseError> {
    let mut arguments: Vec<NamedArgument> = Vec::new();
    let mut seen: FxHashSet<crate::interner::Symbol> = FxHashSet::default();
    let mut guard = super::guards::LoopGuard::new("anonymous_record_arguments");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check(parser.current_span())?;

        let named = matches!(parser.current(), Token::Identifier(_))
            && parser.peek() == Some(&Token::Colon);
        if !named {
            return Err(ParseError::invalid_syntax(
                "anonymous record arguments must be named",
                parser.current_span(),
            ));
        }

        let name = parser.expect_identifier()?;
        parser.expect(Token::Colon)?;
        let value = super::expr::parse_expression(parser)?;

        if !seen.insert(name.name) {
            let text = parser.resolve(name.name).to_string();
            return Err(ParseError::duplicate_component(text, name.span));
        }

        let span = parser.combine_spans(&name.span, value.span());
        arguments.push(NamedArgument { name, value, span });

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(arguments)
}
