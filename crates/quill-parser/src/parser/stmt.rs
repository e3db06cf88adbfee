//! Statement parsing

use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    // Check depth before entering
    parser.depth += 1;
    if parser.depth > super::guards::MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::parser_limit_exceeded(
            format!(
                "Maximum nesting depth ({}) exceeded in statement",
                super::guards::MAX_PARSE_DEPTH
            ),
            parser.current_span(),
        ));
    }

    // Use inner function so `?` can be used freely while ensuring depth
    // is always decremented
    let result = parse_statement_inner(parser);

    parser.depth -= 1;
    result
}

/// Inner statement parsing logic - allows use of `?` operator
fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    // Doc comments and annotations attach to the declaration that
    // follows them
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

    // A file can end on trailing trivia
    if parser.at_eof() {
        return Ok(Statement::Empty(parser.current_span()));
    }

    match parser.current() {
        Token::Let | Token::Const => parse_variable_declaration(parser),
        Token::Record => super::record::parse_record_declaration(parser),
        Token::Class => parse_class_declaration(parser),
        Token::If => parse_if_statement(parser),
        Token::While => parse_while_statement(parser),
        Token::Return => parse_return_statement(parser),
        Token::Throw => parse_throw_statement(parser),
        Token::Semicolon => {
            let span = parser.current_span();
            parser.advance();
            Ok(Statement::Empty(span))
        }
        _ => {
            // Parse expression statement
            let start_span = parser.current_span();
            let expression = super::expr::parse_expression(parser)?;

            // Optional semicolon
            if parser.check(&Token::Semicolon) {
                parser.advance();
            }

            let span = parser.combine_spans(&start_span, expression.span());

            Ok(Statement::Expression(ExpressionStatement {
                expression,
                span,
            }))
        }
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

/// Parse variable declaration: let x = 1; or const y = 2;
fn parse_variable_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    // Parse let or const
    let kind = match parser.current() {
        Token::Let => VariableKind::Let,
        Token::Const => VariableKind::Const,
        _ => unreachable!(),
    };
    parser.advance();

    let name = parser.expect_identifier()?;

    // Initializer (required for const, optional for let)
    let initializer = if parser.check(&Token::Equal) {
        parser.advance();
        Some(super::expr::parse_expression(parser)?)
    } else {
        if kind == VariableKind::Const {
            return Err(ParseError::invalid_syntax(
                "const declarations must have an initializer",
                start_span,
            )
            .with_suggestion("Add an initializer: const x = value;"));
        }
        None
    };

    // Optional semicolon
    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = if let Some(ref init) = initializer {
        parser.combine_spans(&start_span, init.span())
    } else {
        parser.combine_spans(&start_span, &name.span)
    };

    Ok(Statement::VariableDecl(VariableDecl {
        kind,
        name,
        initializer,
        span,
    }))
}

// ============================================================================
// Class Declarations
// ============================================================================

/// Parse class declaration
fn parse_class_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let comment = parser.take_comment();
    let annotations = parser.take_annotations();

    parser.expect(Token::Class)?;
    let name = super::types::parse_qualified_name(parser)?;

    let (extends, implements) = parse_heritage(parser)?;

    parser.expect(Token::LeftBrace)?;
    let members = parse_class_members(parser)?;
    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::ClassDecl(ClassDecl {
        annotations,
        comment,
        is_final: false,
        name: Some(name),
        extends,
        implements,
        members,
        span,
    }))
}

/// Parse the optional `extends` and `implements` clauses shared by
/// classes and records. After each implemented type the parser expects
/// `,` or `{`.
pub(super) fn parse_heritage(
    parser: &mut Parser,
) -> Result<(Option<TypeAnnotation>, Vec<TypeAnnotation>), ParseError> {
    let extends = if parser.check(&Token::Extends) {
        parser.advance();
        Some(super::types::parse_type_annotation(parser)?)
    } else {
        None
    };

    let mut implements = Vec::new();
    if parser.check(&Token::Implements) {
        parser.advance();
        let mut guard = super::guards::LoopGuard::new("implements_clause");
        loop {
            guard.check(parser.current_span())?;
            implements.push(super::types::parse_type_annotation(parser)?);
            if parser.check(&Token::Comma) {
                parser.advance();
            } else if parser.check(&Token::LeftBrace) {
                break;
            } else {
                return Err(parser.unexpected_token(&[Token::Comma, Token::LeftBrace]));
            }
        }
    }

    Ok((extends, implements))
}

/// Parse class members (fields, methods, constructor)
fn parse_class_members(parser: &mut Parser) -> Result<Vec<ClassMember>, ParseError> {
    let mut members = Vec::new();
    let mut guard = super::guards::LoopGuard::new("class_members");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        consume_member_trivia(parser);
        if parser.check(&Token::RightBrace) {
            break;
        }
        members.push(parse_class_member(parser)?);
    }

    Ok(members)
}

/// Stash member-level doc comments and annotations onto the parser's
/// pending state.
pub(super) fn consume_member_trivia(parser: &mut Parser) {
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
}

/// Parse a single class member. Pending trivia has been consumed by the
/// enclosing body loop.
///
/// Also used for record bodies; the record grammar rejects the
/// constructor case afterwards.
pub(super) fn parse_class_member(parser: &mut Parser) -> Result<ClassMember, ParseError> {
    let annotations = parser.take_annotations();
    // Members do not carry doc comments; drop any pending one so it
    // cannot leak onto a later declaration
    let _ = parser.take_comment();

    let start_span = parser.current_span();

    // Parse visibility modifier (private/protected/public)
    let visibility = match parser.current() {
        Token::Private => {
            parser.advance();
            Visibility::Private
        }
        Token::Protected => {
            parser.advance();
            Visibility::Protected
        }
        Token::Public => {
            parser.advance();
            Visibility::Public
        }
        _ => Visibility::Public, // Default is public
    };

    let is_readonly = if parser.check(&Token::Readonly) {
        parser.advance();
        true
    } else {
        false
    };

    // Decide between a method (name followed by parens) and a
    // type-first or untyped field
    let type_first = match parser.current() {
        Token::Question | Token::ColonColon => true,
        Token::Identifier(_) => matches!(
            parser.peek(),
            Some(Token::Identifier(_))
                | Some(Token::ColonColon)
                | Some(Token::Less)
                | Some(Token::LeftBracket)
        ),
        _ => return Err(parser.unexpected_token(&[Token::Identifier(crate::interner::Symbol::dummy())])),
    };

    if type_first {
        // Field with declared type: `private int count = 0;`
        let type_annotation = Some(super::types::parse_type_annotation(parser)?);
        let name = parser.expect_identifier()?;
        return finish_field(parser, annotations, visibility, is_readonly, name, type_annotation, start_span);
    }

    let name = parser.expect_identifier()?;

    if parser.check(&Token::LeftParen) {
        // Constructor (member named "constructor") or ordinary method
        if parser.resolve(name.name) == "constructor" {
            return parse_constructor(parser, start_span);
        }

        parser.expect(Token::LeftParen)?;
        let params = parse_parameters(parser)?;
        parser.expect(Token::RightParen)?;

        let return_type = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        parser.expect(Token::LeftBrace)?;
        let body = parse_block_statement(parser)?;

        let span = parser.combine_spans(&start_span, &body.span);

        return Ok(ClassMember::Method(MethodDecl {
            annotations,
            visibility,
            name,
            params,
            return_type,
            body,
            span,
        }));
    }

    // Untyped field: `private cache;`
    finish_field(parser, annotations, visibility, is_readonly, name, None, start_span)
}

fn finish_field(
    parser: &mut Parser,
    annotations: Vec<Annotation>,
    visibility: Visibility,
    is_readonly: bool,
    name: Identifier,
    type_annotation: Option<TypeAnnotation>,
    start_span: crate::token::Span,
) -> Result<ClassMember, ParseError> {
    let initializer = if parser.check(&Token::Equal) {
        parser.advance();
        Some(super::expr::parse_expression(parser)?)
    } else {
        None
    };

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let end_span = if let Some(ref init) = initializer {
        *init.span()
    } else {
        name.span
    };
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(ClassMember::Field(FieldDecl {
        annotations,
        visibility,
        is_readonly,
        name,
        type_annotation,
        initializer,
        span,
    }))
}

/// Parse constructor
fn parse_constructor(
    parser: &mut Parser,
    start_span: crate::token::Span,
) -> Result<ClassMember, ParseError> {
    parser.expect(Token::LeftParen)?;
    let params = parse_parameters(parser)?;
    parser.expect(Token::RightParen)?;

    parser.expect(Token::LeftBrace)?;
    let body = parse_block_statement(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);

    Ok(ClassMember::Constructor(ConstructorDecl {
        params,
        body,
        span,
    }))
}

// ============================================================================
// Parameters
// ============================================================================

/// Parse a comma-separated parameter list (the parens are handled by
/// the caller). Parameters use the same type-first shape as record
/// components: `int factor`, `?string label = null`, `int... rest`.
pub(super) fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, ParseError> {
    let mut params: Vec<Parameter> = Vec::new();
    let mut guard = super::guards::LoopGuard::new("parameters");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let param = parse_parameter(parser)?;
        if params.last().is_some_and(|prev| prev.variadic) {
            return Err(ParseError::invalid_syntax(
                "a variadic parameter must be the last one",
                param.span,
            ));
        }
        params.push(param);

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(params)
}

/// Parse a single parameter: optional type, optional `...`, name,
/// optional `= default`.
pub(super) fn parse_parameter(parser: &mut Parser) -> Result<Parameter, ParseError> {
    let start_span = parser.current_span();

    let mut variadic = false;
    let mut type_annotation = None;

    if parser.check(&Token::DotDotDot) {
        // Untyped variadic: `... rest`
        parser.advance();
        variadic = true;
    } else {
        // A leading `?` or `::` always starts a type; a leading
        // identifier starts a type only if the token after it can
        // continue one or begin the parameter name
        let type_first = match parser.current() {
            Token::Question | Token::ColonColon => true,
            Token::Identifier(_) => matches!(
                parser.peek(),
                Some(Token::Identifier(_))
                    | Some(Token::DotDotDot)
                    | Some(Token::ColonColon)
                    | Some(Token::Less)
                    | Some(Token::LeftBracket)
            ),
            _ => false,
        };

        if type_first {
            type_annotation = Some(super::types::parse_type_annotation(parser)?);
            if parser.check(&Token::DotDotDot) {
                parser.advance();
                variadic = true;
            }
        }
    }

    let name = parser.expect_identifier()?;

    let default_value = if parser.check(&Token::Equal) {
        parser.advance();
        Some(super::expr::parse_expression(parser)?)
    } else {
        None
    };

    let end_span = if let Some(ref default) = default_value {
        *default.span()
    } else {
        name.span
    };
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Parameter {
        name,
        type_annotation,
        default_value,
        variadic,
        span,
    })
}

// ============================================================================
// Control Flow Statements
// ============================================================================

/// Parse a block or a single statement for use as a control flow body.
/// Supports both `if (x) { ... }` and `if (x) return y;` syntax.
fn parse_block_or_statement(parser: &mut Parser) -> Result<Box<Statement>, ParseError> {
    if parser.check(&Token::LeftBrace) {
        parser.advance(); // consume '{'
        let block = parse_block_statement(parser)?;
        Ok(Box::new(Statement::Block(block)))
    } else {
        Ok(Box::new(parse_statement(parser)?))
    }
}

/// Parse if statement
fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::If)?;

    parser.expect(Token::LeftParen)?;
    let condition = super::expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;

    let then_branch = parse_block_or_statement(parser)?;

    let else_branch = if parser.check(&Token::Else) {
        parser.advance();
        Some(parse_block_or_statement(parser)?)
    } else {
        None
    };

    let end_span = else_branch
        .as_ref()
        .map(|b| *b.span())
        .unwrap_or(*then_branch.span());
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
        span,
    }))
}

/// Parse while statement
fn parse_while_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::While)?;

    parser.expect(Token::LeftParen)?;
    let condition = super::expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;

    let body = parse_block_or_statement(parser)?;

    let span = parser.combine_spans(&start_span, body.span());

    Ok(Statement::While(WhileStatement {
        condition,
        body,
        span,
    }))
}

/// Parse return statement
fn parse_return_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Return)?;

    let value = if parser.check(&Token::Semicolon) || parser.check(&Token::RightBrace) {
        None
    } else {
        Some(super::expr::parse_expression(parser)?)
    };

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let end_span = value.as_ref().map(|v| *v.span()).unwrap_or(start_span);
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::Return(ReturnStatement { value, span }))
}

/// Parse throw statement
fn parse_throw_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Throw)?;

    let value = super::expr::parse_expression(parser)?;

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = parser.combine_spans(&start_span, value.span());

    Ok(Statement::Throw(ThrowStatement { value, span }))
}

/// Parse block statement (sequence of statements in { }); the opening
/// brace has been consumed.
pub(super) fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let start_span = parser.current_span();
    let mut statements = Vec::new();
    let mut guard = super::guards::LoopGuard::new("block_statements");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check(parser.current_span())?;
        let stmt = parse_statement(parser)?;
        statements.push(stmt);
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;
    let span = parser.combine_spans(&start_span, &end_span);

    Ok(BlockStatement { statements, span })
}
