//! Quill command-line front-end
//!
//! `quill check` parses a source file and reports diagnostics;
//! `quill expand` additionally runs the record desugar transform and
//! summarizes (or dumps) the result.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quill_expand::Expander;
use quill_parser::ast::Statement;
use quill_parser::diagnostics;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill language front-end", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report diagnostics
    Check {
        /// Input file
        file: PathBuf,
    },

    /// Parse a file and expand its record declarations
    Expand {
        /// Input file
        file: PathBuf,
        /// Dump the expanded AST
        #[arg(long)]
        ast: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check(&file).map(|_| ()),
        Commands::Expand { file, ast } => expand(&file, ast),
    }
}

/// Parse one file, printing every diagnostic; returns the parse result.
fn check(file: &PathBuf) -> Result<(String, quill_parser::Parsed)> {
    let name = file.display().to_string();
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", name))?;

    let parser = match quill_parser::Parser::new(&source) {
        Ok(parser) => parser,
        Err(errors) => {
            let rendered: Vec<_> = errors
                .iter()
                .map(diagnostics::lex_error_diagnostic)
                .collect();
            diagnostics::emit(&name, &source, &rendered)?;
            bail!("{}: {} lex error(s)", name, errors.len());
        }
    };

    match parser.parse() {
        Ok(parsed) => {
            let rendered: Vec<_> = parsed
                .warnings
                .iter()
                .map(diagnostics::warning_diagnostic)
                .collect();
            diagnostics::emit(&name, &source, &rendered)?;
            Ok((source, parsed))
        }
        Err(errors) => {
            let rendered: Vec<_> = errors
                .iter()
                .map(diagnostics::parse_error_diagnostic)
                .collect();
            diagnostics::emit(&name, &source, &rendered)?;
            bail!("{}: {} parse error(s)", name, errors.len());
        }
    }
}

/// Parse and expand one file, then summarize what was synthesized.
fn expand(file: &PathBuf, dump_ast: bool) -> Result<()> {
    let (_, parsed) = check(file)?;
    let mut interner = parsed.interner;

    let records = parsed
        .module
        .statements
        .iter()
        .filter(|stmt| matches!(stmt, Statement::RecordDecl(_)))
        .count();

    let expanded = Expander::new(&mut interner).expand_module(&parsed.module);

    if dump_ast {
        println!("{:#?}", expanded);
        return Ok(());
    }

    for stmt in &expanded.statements {
        if let Statement::ClassDecl(class) = stmt {
            let name = class
                .name
                .as_ref()
                .map(|n| n.display_name(&interner))
                .unwrap_or_else(|| "<anonymous>".to_string());
            println!("class {} ({} members)", name, class.members.len());
        }
    }
    println!("{} record(s) expanded", records);

    Ok(())
}
