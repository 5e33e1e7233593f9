//! Lexical and syntactic front end for a small imperative language.
//!
//! A program is a single `void main()` procedure made of integer declarations, assignments,
//! compound assignments, `if`/`while`/`do`/`for` statements and `cout` output. This crate turns
//! source text into tokens and tokens into a syntax tree; symbol storage, type checking and code
//! generation are left to later passes.
//!
//! ```
//! use simple_compiler::semantic::SymbolTable;
//!
//! let mut symbols = SymbolTable::new();
//! let start = simple_compiler::parse_str("void main() { int x = 1; }", &mut symbols).unwrap();
//!
//! assert_eq!(
//!     start.to_string(),
//!     "Start(Program(Block(StatementGroup[DeclarationAssignment(x, 1)])))"
//! );
//! assert!(symbols.contains("x"));
//! ```

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod semantic;
pub mod syntax;

use std::{path::Path, sync::Arc};

use base::{source_file::SourceFile, FileProvider, Handler, Result};
use lexical::{lexer::Lexer, token_stream::TokenStream};
use semantic::SymbolResolver;
use syntax::{error::ParseResult, parser::Parser, syntax_tree::program::Start};

use crate::base::Error;

/// Converts the given source file to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
pub fn tokenize(provider: &impl FileProvider, path: &Path) -> Result<TokenStream> {
    let source_file = SourceFile::load(path, provider)?;

    Ok(TokenStream::tokenize(&source_file))
}

/// Parses an already loaded source file.
///
/// # Errors
/// - On the first token that does not fit the grammar.
pub fn parse_source(
    source_file: &Arc<SourceFile>,
    symbols: impl SymbolResolver,
) -> ParseResult<Start> {
    let mut parser = Parser::new(Lexer::new(source_file), symbols);
    parser.parse_start()
}

/// Parses the given source code held in memory.
///
/// # Errors
/// - On the first token that does not fit the grammar.
pub fn parse_str(source: &str, symbols: impl SymbolResolver) -> ParseResult<Start> {
    let source_file = SourceFile::new("<memory>", source);
    parse_source(&source_file, symbols)
}

/// Parses the given source file, reporting the failure to `handler`.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while parsing the source code.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn parse(
    handler: &impl Handler<Error>,
    provider: &impl FileProvider,
    path: &Path,
    symbols: impl SymbolResolver,
) -> Result<Start> {
    let source_file = SourceFile::load(path, provider).inspect_err(|err| {
        handler.receive(err.clone());
    })?;

    parse_source(&source_file, symbols).map_err(|err| {
        let err = Error::from(err);
        handler.receive(err.clone());
        err
    })
}

/// Parses the file at `path`, terminating the process on the first error.
///
/// The diagnostic is printed to stderr and the process exits with status `1`, both when the file
/// cannot be opened and when the source does not fit the grammar.
#[cfg(feature = "fs_access")]
pub fn parse_or_exit(path: &Path, symbols: impl SymbolResolver) -> Start {
    let handler = base::PrintHandler::new();

    parse(&handler, &base::FsProvider::default(), path, symbols).unwrap_or_else(|_| {
        tracing::error!("Aborting after the first error");
        std::process::exit(1)
    })
}
