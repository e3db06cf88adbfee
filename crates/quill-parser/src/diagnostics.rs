//! Diagnostic rendering for lexer and parser output
//!
//! Converts `LexError`, `ParseError`, and `ParseWarning` values into
//! codespan-reporting diagnostics and emits them to the terminal with
//! source context.

use crate::lexer::LexError;
use crate::parser::{ParseError, ParseWarning};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config};

/// Convert a parse error into a renderable diagnostic.
pub fn parse_error_diagnostic(error: &ParseError) -> Diagnostic<()> {
    let mut label = Label::primary((), error.span.start..error.span.end);
    if let Some(suggestion) = &error.suggestion {
        label = label.with_message(suggestion.clone());
    }
    Diagnostic::error()
        .with_message(error.message.clone())
        .with_labels(vec![label])
}

/// Convert a lex error into a renderable diagnostic.
pub fn lex_error_diagnostic(error: &LexError) -> Diagnostic<()> {
    let span = error.span();
    Diagnostic::error()
        .with_message(error.to_string())
        .with_labels(vec![Label::primary((), span.start..span.end)])
}

/// Convert a parser warning into a renderable diagnostic.
pub fn warning_diagnostic(warning: &ParseWarning) -> Diagnostic<()> {
    Diagnostic::warning()
        .with_message(warning.message.clone())
        .with_labels(vec![Label::primary(
            (),
            warning.span.start..warning.span.end,
        )])
}

/// Emit diagnostics for one source file to stderr.
pub fn emit(
    name: &str,
    source: &str,
    diagnostics: &[Diagnostic<()>],
) -> Result<(), codespan_reporting::files::Error> {
    let file = SimpleFile::new(name, source);
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = Config::default();

    for diagnostic in diagnostics {
        term::emit(&mut writer.lock(), &config, &file, diagnostic)?;
    }

    Ok(())
}
