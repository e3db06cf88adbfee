//! Lexer for the Quill programming language.
//!
//! This module implements a lexer using the logos library. It converts
//! source code into a stream of tokens with precise source location
//! information.
//!
//! Doc comments (`/** ... */`) and compiler annotations (`//@@tag`) are
//! captured as tokens rather than skipped, because the parser attaches
//! them to the following declaration. Ordinary comments are skipped in a
//! manual pre-scan so the doc-comment opener can be detected before logos
//! runs.

use crate::interner::Interner;
use crate::token::{Span, Token};
use logos::Logos;
use std::fmt;

/// Internal logos token.
///
/// Fixed-spelling tokens map straight to their public [`Token`] form via
/// the per-pattern callbacks; only value-carrying tokens need a
/// conversion step (their text is interned there). Exact keyword
/// matches take priority over the identifier regex.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Normally consumed by the manual pre-scan, kept as a fallback
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    // Compiler annotations: //@@tag or //@@tag value
    #[regex(r"//@@[a-zA-Z_][a-zA-Z0-9_]*( [^\n]*)?", trim_annotation)]
    Annotation(String),

    #[token("record", |_| Token::Record)]
    #[token("class", |_| Token::Class)]
    #[token("init", |_| Token::Init)]
    #[token("let", |_| Token::Let)]
    #[token("const", |_| Token::Const)]
    #[token("if", |_| Token::If)]
    #[token("else", |_| Token::Else)]
    #[token("while", |_| Token::While)]
    #[token("return", |_| Token::Return)]
    #[token("throw", |_| Token::Throw)]
    #[token("new", |_| Token::New)]
    #[token("this", |_| Token::This)]
    #[token("extends", |_| Token::Extends)]
    #[token("implements", |_| Token::Implements)]
    #[token("instanceof", |_| Token::Instanceof)]
    #[token("public", |_| Token::Public)]
    #[token("protected", |_| Token::Protected)]
    #[token("private", |_| Token::Private)]
    #[token("readonly", |_| Token::Readonly)]
    #[token("true", |_| Token::True)]
    #[token("false", |_| Token::False)]
    #[token("null", |_| Token::Null)]
    #[token("...", |_| Token::DotDotDot)]
    #[token("==", |_| Token::EqualEqual)]
    #[token("!=", |_| Token::BangEqual)]
    #[token("<=", |_| Token::LessEqual)]
    #[token(">=", |_| Token::GreaterEqual)]
    #[token("&&", |_| Token::AmpAmp)]
    #[token("||", |_| Token::PipePipe)]
    #[token("::", |_| Token::ColonColon)]
    #[token("+", |_| Token::Plus)]
    #[token("-", |_| Token::Minus)]
    #[token("*", |_| Token::Star)]
    #[token("/", |_| Token::Slash)]
    #[token("%", |_| Token::Percent)]
    #[token("!", |_| Token::Bang)]
    #[token("<", |_| Token::Less)]
    #[token(">", |_| Token::Greater)]
    #[token("=", |_| Token::Equal)]
    #[token("?", |_| Token::Question)]
    #[token(".", |_| Token::Dot)]
    #[token(":", |_| Token::Colon)]
    #[token("(", |_| Token::LeftParen)]
    #[token(")", |_| Token::RightParen)]
    #[token("{", |_| Token::LeftBrace)]
    #[token("}", |_| Token::RightBrace)]
    #[token("[", |_| Token::LeftBracket)]
    #[token("]", |_| Token::RightBracket)]
    #[token(";", |_| Token::Semicolon)]
    #[token(",", |_| Token::Comma)]
    Fixed(Token),

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Numbers, with numeric-separator support
    #[regex(r"[0-9]+(_[0-9]+)*", |lex| lex.slice().replace('_', "").parse().ok())]
    IntLiteral(i64),

    #[regex(r"[0-9]+(_[0-9]+)*\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+)?", |lex| lex.slice().replace('_', "").parse().ok())]
    #[regex(r"[0-9]+(_[0-9]+)*[eE][+-]?[0-9]+", |lex| lex.slice().replace('_', "").parse().ok())]
    FloatLiteral(f64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'([^'\\]|\\.)*'", |lex| unquote(lex.slice()))]
    StringLiteral(String),
}

/// Drop the `//@@` opener; the tag and optional value stay.
fn trim_annotation(lex: &mut logos::Lexer<LogosToken>) -> Option<String> {
    Some(lex.slice()[4..].trim_end().to_string())
}

/// Strip the quotes from a string literal and process escapes.
fn unquote(quoted: &str) -> Option<String> {
    let body = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            // \\, \", \' and any unknown escape keep the escaped char
            Some(other) => out.push(other),
            None => break,
        }
    }

    Some(out)
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
    interner: Interner,
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnexpectedCharacter { char: char, span: Span },
    UnterminatedComment { span: Span },
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { char, span } => write!(
                f,
                "Unexpected character '{}' at {}:{}",
                char, span.line, span.column
            ),
            LexError::UnterminatedComment { span } => {
                write!(f, "Unterminated comment at {}:{}", span.line, span.column)
            }
            LexError::InvalidNumber { text, span } => write!(
                f,
                "Invalid number literal '{}' at {}:{}",
                text, span.line, span.column
            ),
        }
    }
}

impl std::error::Error for LexError {}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            interner: Interner::with_capacity(256), // Preallocate for typical file
        }
    }

    pub fn tokenize(mut self) -> Result<(Vec<(Token, Span)>, Interner), Vec<LexError>> {
        let mut pos = 0;
        let mut line = 1u32;
        let mut column = 1u32;

        while pos < self.source.len() {
            // Skip whitespace and plain comments manually before handing
            // over to logos. This is needed because doc comments (`/**`)
            // and annotations (`//@@`) must be captured, not skipped, and
            // logos cannot distinguish them from plain comments without
            // backtracking.
            let bytes = self.source.as_bytes();
            while pos < bytes.len() {
                let ch = bytes[pos];
                match ch {
                    b' ' | b'\t' | b'\r' => {
                        column += 1;
                        pos += 1;
                    }
                    b'\n' => {
                        line += 1;
                        column = 1;
                        pos += 1;
                    }
                    b'/' if pos + 1 < bytes.len() => {
                        match bytes[pos + 1] {
                            b'/' => {
                                // Check for //@@annotation - let logos tokenize it
                                if pos + 3 < bytes.len()
                                    && bytes[pos + 2] == b'@'
                                    && bytes[pos + 3] == b'@'
                                {
                                    break;
                                }
                                // Line comment - skip to end of line
                                pos += 2;
                                column += 2;
                                while pos < bytes.len() && bytes[pos] != b'\n' {
                                    pos += 1;
                                    column += 1;
                                }
                            }
                            b'*' => {
                                // Doc comment `/**` (but not the empty block
                                // comment `/**/`) is captured below, outside
                                // the skip loop
                                if pos + 2 < bytes.len()
                                    && bytes[pos + 2] == b'*'
                                    && bytes.get(pos + 3) != Some(&b'/')
                                {
                                    break;
                                }
                                // Block comment - skip to */
                                let start_span = Span::new(pos, pos + 2, line, column);
                                pos += 2;
                                column += 2;
                                let mut closed = false;
                                while pos + 1 < bytes.len() {
                                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                                        pos += 2;
                                        column += 2;
                                        closed = true;
                                        break;
                                    }
                                    if bytes[pos] == b'\n' {
                                        line += 1;
                                        column = 1;
                                    } else {
                                        column += 1;
                                    }
                                    pos += 1;
                                }
                                if !closed {
                                    pos = bytes.len();
                                    self.errors
                                        .push(LexError::UnterminatedComment { span: start_span });
                                }
                            }
                            _ => break, // Not a comment, stop skipping
                        }
                    }
                    _ => break, // Not whitespace, stop skipping
                }
            }

            // Check if we reached the end after skipping whitespace
            if pos >= self.source.len() {
                break;
            }

            // Capture a doc comment: /** ... */
            if self.source[pos..].starts_with("/**") && !self.source[pos..].starts_with("/**/") {
                let start_span = Span::new(pos, pos + 3, line, column);
                let body_start = pos + 3;

                match self.source[body_start..].find("*/") {
                    Some(rel_end) => {
                        let body_end = body_start + rel_end;
                        let content = self.source[body_start..body_end].trim();
                        let sym = self.interner.intern(content);
                        let token_span =
                            Span::new(pos, body_end + 2, line, column);
                        self.tokens.push((Token::DocComment(sym), token_span));

                        for c in self.source[pos..body_end + 2].chars() {
                            if c == '\n' {
                                line += 1;
                                column = 1;
                            } else {
                                column += 1;
                            }
                        }
                        pos = body_end + 2;
                        continue;
                    }
                    None => {
                        self.errors
                            .push(LexError::UnterminatedComment { span: start_span });
                        break;
                    }
                }
            }

            // Use logos for regular tokens
            let mut logos_lexer = LogosToken::lexer(&self.source[pos..]);

            if let Some(token_result) = logos_lexer.next() {
                let range = logos_lexer.span();
                let abs_start = pos + range.start;
                let abs_end = pos + range.end;

                let span = Span::new(abs_start, abs_end, line, column);

                match token_result {
                    Ok(logos_token) => {
                        let token = self.convert(logos_token);
                        self.tokens.push((token, span));
                    }
                    Err(_) => {
                        let char = self.source[abs_start..].chars().next().unwrap_or('\0');
                        self.errors.push(LexError::UnexpectedCharacter { char, span });
                    }
                }

                // Update line and column
                for c in self.source[abs_start..abs_end].chars() {
                    if c == '\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                }

                pos = abs_end;
            } else {
                break;
            }
        }

        // Add EOF token
        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok((self.tokens, self.interner))
        } else {
            Err(self.errors)
        }
    }

    /// Map an internal token to the public form, interning any captured
    /// text.
    fn convert(&mut self, token: LogosToken) -> Token {
        match token {
            LogosToken::Fixed(token) => token,
            LogosToken::Identifier(text) => Token::Identifier(self.interner.intern(&text)),
            LogosToken::IntLiteral(value) => Token::IntLiteral(value),
            LogosToken::FloatLiteral(value) => Token::FloatLiteral(value),
            LogosToken::StringLiteral(text) => Token::StringLiteral(self.interner.intern(&text)),
            LogosToken::Annotation(text) => Token::Annotation(self.interner.intern(&text)),
            LogosToken::Whitespace => {
                unreachable!("Whitespace should be skipped")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> (Vec<Token>, Interner) {
        let (tokens, interner) = Lexer::new(source).tokenize().unwrap();
        (tokens.into_iter().map(|(t, _)| t).collect(), interner)
    }

    #[test]
    fn test_keywords() {
        let (tokens, _) = lex("record class init extends implements readonly");
        assert_eq!(
            tokens,
            vec![
                Token::Record,
                Token::Class,
                Token::Init,
                Token::Extends,
                Token::Implements,
                Token::Readonly,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_variadic_marker() {
        let (tokens, interner) = lex("int... members");
        match &tokens[..] {
            [Token::Identifier(ty), Token::DotDotDot, Token::Identifier(name), Token::Eof] => {
                assert_eq!(interner.resolve(*ty), "int");
                assert_eq!(interner.resolve(*name), "members");
            }
            other => panic!("unexpected tokens: {:?}", other),
        }
    }

    #[test]
    fn test_qualified_name() {
        let (tokens, _) = lex("geo::Point");
        assert!(matches!(
            &tokens[..],
            [Token::Identifier(_), Token::ColonColon, Token::Identifier(_), Token::Eof]
        ));
    }

    #[test]
    fn test_comments_skipped() {
        let (tokens, _) = lex("// line\n/* block */ 42");
        assert_eq!(tokens, vec![Token::IntLiteral(42), Token::Eof]);
    }

    #[test]
    fn test_doc_comment_captured() {
        let (tokens, interner) = lex("/** A point in 2D space. */ record");
        match &tokens[..] {
            [Token::DocComment(sym), Token::Record, Token::Eof] => {
                assert_eq!(interner.resolve(*sym), "A point in 2D space.");
            }
            other => panic!("unexpected tokens: {:?}", other),
        }
    }

    #[test]
    fn test_empty_block_comment() {
        let (tokens, _) = lex("/**/ 1");
        assert_eq!(tokens, vec![Token::IntLiteral(1), Token::Eof]);
    }

    #[test]
    fn test_annotation_captured() {
        let (tokens, interner) = lex("//@@deprecated use init\nrecord");
        match &tokens[..] {
            [Token::Annotation(sym), Token::Record, Token::Eof] => {
                assert_eq!(interner.resolve(*sym), "deprecated use init");
            }
            other => panic!("unexpected tokens: {:?}", other),
        }
    }

    #[test]
    fn test_string_escapes() {
        let (tokens, interner) = lex(r#""lo > hi!\n""#);
        match &tokens[..] {
            [Token::StringLiteral(sym), Token::Eof] => {
                assert_eq!(interner.resolve(*sym), "lo > hi!\n");
            }
            other => panic!("unexpected tokens: {:?}", other),
        }
    }

    #[test]
    fn test_numbers() {
        let (tokens, _) = lex("44 1_000 3.14");
        assert_eq!(
            tokens,
            vec![
                Token::IntLiteral(44),
                Token::IntLiteral(1000),
                Token::FloatLiteral(3.14),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let result = Lexer::new("record #").tokenize();
        assert!(result.is_err());
    }

    #[test]
    fn test_spans_track_lines() {
        let (tokens, _) = Lexer::new("record\nPoint").tokenize().unwrap();
        assert_eq!(tokens[0].1.line, 1);
        assert_eq!(tokens[1].1.line, 2);
        assert_eq!(tokens[1].1.column, 1);
    }
}
