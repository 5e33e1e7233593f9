//! Contains the error types that can occur while parsing the syntax of the language.

use std::fmt::Display;

use itertools::Itertools as _;

use crate::{
    base::{
        log::{Message, Severity, SourceCodeDisplay},
        source_file::SourceElement as _,
    },
    lexical::token::{Token, TokenKind},
};

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, Error>;

/// An enumeration containing all kinds of syntactic errors that can occur while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedSyntax(#[from] UnexpectedSyntax),
    #[error(transparent)]
    InvalidInteger(#[from] InvalidInteger),
    #[error(transparent)]
    NestingTooDeep(#[from] NestingTooDeep),
}

impl Error {
    /// Get the token the error was reported at.
    #[must_use]
    pub fn token(&self) -> &Token {
        match self {
            Self::UnexpectedSyntax(err) => &err.found,
            Self::InvalidInteger(err) => &err.token,
            Self::NestingTooDeep(err) => &err.token,
        }
    }
}

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Either(&'static [SyntaxKind]),
    Token(TokenKind),
    Statement,
}

impl SyntaxKind {
    fn expected_binding_str(&self) -> String {
        match self {
            Self::Either(variants) => match variants {
                [] => "end of file".to_string(),
                [single] => single.expected_binding_str(),
                [init @ .., last] => format!(
                    "{}, or {}",
                    init.iter().map(Self::expected_binding_str).join(", "),
                    last.expected_binding_str()
                ),
            },
            Self::Token(kind) => kind.describe(),
            Self::Statement => "a statement".to_string(),
        }
    }

    /// Collects the token kinds this syntax kind stands for.
    fn token_kinds(&self) -> Vec<TokenKind> {
        match self {
            Self::Either(variants) => variants.iter().flat_map(Self::token_kinds).collect(),
            Self::Token(kind) => vec![*kind],
            Self::Statement => Vec::new(),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Token,
}

impl UnexpectedSyntax {
    /// Suggests expected keywords that the found identifier is a likely misspelling of.
    fn suggestions(&self) -> Vec<&'static str> {
        if !self.found.is(TokenKind::Identifier) {
            return Vec::new();
        }

        let found = self.found.lexeme().as_str();
        self.expected
            .token_kinds()
            .into_iter()
            .filter_map(TokenKind::keyword_str)
            .filter_map(|keyword| {
                let normalized_distance = strsim::normalized_damerau_levenshtein(found, keyword);
                (normalized_distance > 0.5).then_some((normalized_distance, keyword))
            })
            .sorted_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, keyword)| keyword)
            .dedup()
            .collect()
    }
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected_binding = self.expected.expected_binding_str();
        let found_binding = match self.found.kind() {
            TokenKind::EndOfFile => "end of file".to_string(),
            kind => format!("{} `{}`", kind.describe(), self.found.lexeme()),
        };

        let message = format!("expected {expected_binding}, but found {found_binding}");

        write!(f, "{}", Message::new(Severity::Error, message))?;

        let suggestions = self.suggestions();
        let help = (!suggestions.is_empty()).then(|| {
            format!(
                "did you mean {}?",
                suggestions
                    .iter()
                    .map(|keyword| format!("`{keyword}`"))
                    .join(" or ")
            )
        });

        write!(f, "\n{}", SourceCodeDisplay::new(&self.found.span(), help))
    }
}

impl std::error::Error for UnexpectedSyntax {}

/// An integer literal does not fit into the integer type of the language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidInteger {
    /// The integer literal token.
    pub token: Token,
}

impl Display for InvalidInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!(
            "integer literal `{}` does not fit into a 32-bit integer",
            self.token.lexeme()
        );

        write!(f, "{}", Message::new(Severity::Error, message))?;
        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(&self.token.span(), Option::<u8>::None)
        )
    }
}

impl std::error::Error for InvalidInteger {}

/// Blocks or parenthesized expressions are nested deeper than the parser allows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestingTooDeep {
    /// The token that would have opened one level too many.
    pub token: Token,

    /// The maximum nesting depth.
    pub limit: usize,
}

impl Display for NestingTooDeep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("nesting exceeds the limit of {} levels", self.limit);

        write!(f, "{}", Message::new(Severity::Error, message))?;
        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(&self.token.span(), Option::<u8>::None)
        )
    }
}

impl std::error::Error for NestingTooDeep {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::source_file::{SourceFile, Span};

    fn token(kind: TokenKind, source: &str) -> Token {
        let file = SourceFile::new("test.sic", source);
        Token::new(kind, Span::new(file, 0, source.len()).unwrap(), 1)
    }

    #[test]
    fn test_expected_binding_str() {
        assert_eq!(
            SyntaxKind::Token(TokenKind::Semicolon).expected_binding_str(),
            "a `;` token"
        );
        assert_eq!(
            SyntaxKind::Either(&[
                SyntaxKind::Token(TokenKind::Identifier),
                SyntaxKind::Token(TokenKind::Integer),
                SyntaxKind::Token(TokenKind::LeftParen),
            ])
            .expected_binding_str(),
            "an identifier, an integer literal, or a `(` token"
        );
    }

    #[test]
    fn test_unexpected_syntax_message() {
        colored::control::set_override(false);

        let err = UnexpectedSyntax {
            expected: SyntaxKind::Token(TokenKind::RightParen),
            found: token(TokenKind::Semicolon, ";"),
        };
        let rendered = err.to_string();

        assert!(rendered.starts_with("[error]: expected a `)` token, but found a `;` token `;`"));
        assert!(rendered.contains("test.sic:1:1"));
    }

    #[test]
    fn test_keyword_suggestion() {
        colored::control::set_override(false);

        let err = UnexpectedSyntax {
            expected: SyntaxKind::Token(TokenKind::While),
            found: token(TokenKind::Identifier, "whlie"),
        };

        assert_eq!(err.suggestions(), vec!["while"]);
        assert!(err.to_string().ends_with("did you mean `while`?"));
    }

    #[test]
    fn test_no_suggestion_for_unrelated_identifier() {
        let err = UnexpectedSyntax {
            expected: SyntaxKind::Token(TokenKind::Void),
            found: token(TokenKind::Identifier, "counter"),
        };

        assert!(err.suggestions().is_empty());
    }
}
