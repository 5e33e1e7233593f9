//! Provides the [`Parser`] core: token access and the `match` primitive the grammar is built on.
//!
//! The grammar rules themselves live next to the syntax tree nodes they produce, in the modules
//! of [`syntax_tree`](super::syntax_tree).

use crate::{
    lexical::{
        lexer::Lexer,
        token::{Token, TokenKind},
    },
    semantic::SymbolResolver,
};

use super::error::{Error, NestingTooDeep, ParseResult, SyntaxKind, UnexpectedSyntax};

/// How deep blocks and parenthesized expressions may be nested, counted together.
pub const MAX_NESTING_DEPTH: usize = 100;

/// A recursive-descent parser pulling tokens from a [`Lexer`].
///
/// Every decision between grammar alternatives is made on a single token of lookahead. Comment
/// tokens are skipped before any token is looked at.
#[derive(Debug)]
pub struct Parser<'a, S> {
    lexer: Lexer<'a>,
    symbols: S,
    depth: usize,
}

impl<'a, S: SymbolResolver> Parser<'a, S> {
    /// Creates a new parser that resolves identifiers through `symbols`.
    #[must_use]
    pub fn new(lexer: Lexer<'a>, symbols: S) -> Self {
        Self {
            lexer,
            symbols,
            depth: 0,
        }
    }

    /// Get the symbol resolver of the parser.
    #[must_use]
    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    /// Dissolves the parser into its lexer and symbol resolver.
    #[must_use]
    pub fn dissolve(self) -> (Lexer<'a>, S) {
        (self.lexer, self.symbols)
    }

    fn skip_comments(&mut self) {
        while self.lexer.peek_token().kind().is_comment() {
            let comment = self.lexer.next_token();
            tracing::trace!(line = comment.line(), "Skipping comment");
        }
    }

    /// Returns the next significant token without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.skip_comments();
        self.lexer.peek_token()
    }

    /// Returns the kind of the next significant token without consuming it.
    pub fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind()
    }

    /// Consumes and returns the next significant token.
    pub fn next_token(&mut self) -> Token {
        self.skip_comments();
        self.lexer.next_token()
    }

    /// Consumes the next token, which must be of the `expected` kind.
    ///
    /// # Errors
    /// - [`Error::UnexpectedSyntax`] if the consumed token is of any other kind.
    pub fn match_token(&mut self, expected: TokenKind) -> ParseResult<Token> {
        let token = self.next_token();

        if token.is(expected) {
            tracing::trace!(lexeme = %token.lexeme(), kind = %token.kind(), "Matched");
            Ok(token)
        } else {
            tracing::debug!(%expected, found = %token, "Token mismatch");
            Err(UnexpectedSyntax {
                expected: SyntaxKind::Token(expected),
                found: token,
            }
            .into())
        }
    }

    /// Consumes the next token and reports it as not being the `expected` syntax.
    pub(crate) fn unexpected(&mut self, expected: SyntaxKind) -> Error {
        let found = self.next_token();
        tracing::debug!(found = %found, "Unexpected syntax");

        UnexpectedSyntax { expected, found }.into()
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Once [`MAX_NESTING_DEPTH`] is reached the next token is consumed and reported instead.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.next_token();
            tracing::debug!(found = %token, "Nesting too deep");

            return Err(NestingTooDeep {
                token,
                limit: MAX_NESTING_DEPTH,
            }
            .into());
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    /// Resolves an identifier name through the symbol resolver.
    pub(crate) fn resolve_symbol(&mut self, name: &str) -> crate::semantic::SymbolId {
        self.symbols.resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{base::source_file::SourceFile, semantic::SymbolTable};

    #[test]
    fn test_match_token() {
        let file = SourceFile::new("test.sic", "void main");
        let mut parser = Parser::new(Lexer::new(&file), SymbolTable::new());

        let void = parser.match_token(TokenKind::Void).unwrap();
        assert_eq!(void.lexeme(), "void");

        let err = parser.match_token(TokenKind::LeftParen).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Token(TokenKind::LeftParen),
                ref found,
            }) if found.is(TokenKind::Main)
        ));
    }

    #[test]
    fn test_comments_are_skipped() {
        let file = SourceFile::new("test.sic", "// header\nint /* inline */ x");
        let mut parser = Parser::new(Lexer::new(&file), SymbolTable::new());

        assert_eq!(parser.peek_kind(), TokenKind::Int);
        assert!(parser.match_token(TokenKind::Int).is_ok());
        assert_eq!(parser.next_token().lexeme(), "x");
        assert_eq!(parser.peek_kind(), TokenKind::EndOfFile);
    }

    #[test]
    fn test_borrowed_symbol_table() {
        let file = SourceFile::new("test.sic", "");
        let mut table = SymbolTable::new();

        {
            let mut parser = Parser::new(Lexer::new(&file), &mut table);
            parser.resolve_symbol("counter");
        }

        assert!(table.contains("counter"));
    }
}
