//! The program nodes of the syntax tree.

use std::fmt::Display;

use getset::Getters;

use crate::{
    lexical::token::TokenKind,
    semantic::SymbolResolver,
    syntax::{error::ParseResult, parser::Parser},
};

use super::statement::Block;

/// The root of the syntax tree: a program followed by the end of the file.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// Start:
///     Program EOF ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Start {
    /// The program.
    #[get = "pub"]
    program: Program,
}

impl Start {
    /// Dissolves the [`Start`] node into its program.
    #[must_use]
    pub fn dissolve(self) -> Program {
        self.program
    }
}

impl Display for Start {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Start({})", self.program)
    }
}

/// The single `main` procedure of a source file.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// Program:
///     'void' 'main' '(' ')' Block ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Program {
    /// The body of `main`.
    #[get = "pub"]
    block: Block,
}

impl Program {
    /// Dissolves the [`Program`] into its block.
    #[must_use]
    pub fn dissolve(self) -> Block {
        self.block
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Program({})", self.block)
    }
}

impl<'a, S: SymbolResolver> Parser<'a, S> {
    /// Parses a complete source file into its [`Start`] node.
    ///
    /// # Errors
    /// - On the first token that does not fit the grammar.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_start(&mut self) -> ParseResult<Start> {
        tracing::debug!("Parsing program");

        let program = self.parse_program()?;
        self.match_token(TokenKind::EndOfFile)?;

        Ok(Start { program })
    }

    /// Parses a [`Program`].
    ///
    /// # Errors
    /// - If the tokens do not form a program.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        self.match_token(TokenKind::Void)?;
        self.match_token(TokenKind::Main)?;
        self.match_token(TokenKind::LeftParen)?;
        self.match_token(TokenKind::RightParen)?;

        let block = self.parse_block()?;

        tracing::debug!(
            statements = block.statement_group().statements().len(),
            "Parsed main"
        );

        Ok(Program { block })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        base::source_file::SourceFile, lexical::lexer::Lexer, semantic::SymbolTable,
        syntax::error::Error,
    };

    fn parse(source: &str) -> ParseResult<Start> {
        let file = SourceFile::new("test.sic", source);
        let mut parser = Parser::new(Lexer::new(&file), SymbolTable::new());
        parser.parse_start()
    }

    #[test]
    fn test_empty_main() {
        assert_eq!(
            parse("void main() {}").unwrap().to_string(),
            "Start(Program(Block(StatementGroup[])))"
        );
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse("void main() {} x").unwrap_err();

        assert!(matches!(&err, Error::UnexpectedSyntax(_)));
        assert_eq!(err.token().lexeme(), "x");
    }

    #[test]
    fn test_missing_main() {
        let err = parse("void foo() {}").unwrap_err();

        assert!(err.token().is(TokenKind::Identifier));
        assert_eq!(err.token().line(), 1);
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("void main() {\n  int x;\n").unwrap_err();

        assert!(err.token().is(TokenKind::EndOfFile));
        assert_eq!(err.token().line(), 3);
    }
}
