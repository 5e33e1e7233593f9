//! Contains the [`Token`] struct and its related types.

use std::{collections::HashMap, fmt::Display, path::Path, str::FromStr, sync::OnceLock};

use getset::{CopyGetters, Getters};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::base::source_file::{SourceElement, Span};

/// Is an enumeration containing all kinds of tokens of the language.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum TokenKind {
    // reserved words
    Void,
    Main,
    Int,
    Const,
    If,
    Else,
    While,
    For,
    Do,
    Cout,
    Endl,
    AndWord,
    OrWord,

    Identifier,
    Integer,

    // punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    Ellipsis,
    Arrow,
    Hash,

    // operators
    Assignment,
    Plus,
    Increment,
    PlusEquals,
    Minus,
    Decrement,
    MinusEquals,
    Multiply,
    MultiplyEquals,
    MultiplyBy,
    Divide,
    DivideEquals,
    Modulus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LeftShift,
    RightShift,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    FormatInt,
    FormatFloat,

    LineComment,
    BlockComment,

    EndOfFile,
    Unrecognized,
}

/// Is an error that is returned when a string is not a reserved word in [`FromStr`]
/// trait implementation of [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of reserved word.")]
pub struct KeywordParseError;

impl FromStr for TokenKind {
    type Err = KeywordParseError;

    /// Looks up the reserved word spelled by `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            Self::iter()
                .filter_map(|kind| kind.keyword_str().map(|word| (word, kind)))
                .collect()
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl TokenKind {
    /// Gets the spelling of the kind if it is a reserved word.
    #[must_use]
    pub fn keyword_str(self) -> Option<&'static str> {
        Some(match self {
            Self::Void => "void",
            Self::Main => "main",
            Self::Int => "int",
            Self::Const => "const",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Do => "do",
            Self::Cout => "cout",
            Self::Endl => "endl",
            Self::AndWord => "and",
            Self::OrWord => "or",
            _ => return None,
        })
    }

    /// Whether the kind is a reserved word.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        self.keyword_str().is_some()
    }

    /// Whether tokens of this kind are comments.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Gets the human readable name of the kind used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        if let Some(word) = self.keyword_str() {
            return word;
        }

        match self {
            Self::Identifier => "identifier",
            Self::Integer => "integer literal",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Ellipsis => "...",
            Self::Arrow => "->",
            Self::Hash => "#",
            Self::Assignment => "=",
            Self::Plus => "+",
            Self::Increment => "++",
            Self::PlusEquals => "+=",
            Self::Minus => "-",
            Self::Decrement => "--",
            Self::MinusEquals => "-=",
            Self::Multiply => "*",
            Self::MultiplyEquals => "*=",
            Self::MultiplyBy => "=*",
            Self::Divide => "/",
            Self::DivideEquals => "/=",
            Self::Modulus => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalNot => "!",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseNot => "~",
            Self::FormatInt => "%d",
            Self::FormatFloat => "%f",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::EndOfFile => "end of file",
            Self::Unrecognized => "unrecognized character",
            _ => unreachable!("reserved words are handled above"),
        }
    }

    /// Describes the kind with an article, e.g. "a `;` token" or "an identifier".
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Identifier => "an identifier".to_string(),
            Self::Integer => "an integer literal".to_string(),
            Self::LineComment => "a line comment".to_string(),
            Self::BlockComment => "a block comment".to_string(),
            Self::EndOfFile => "end of file".to_string(),
            Self::Unrecognized => "an unrecognized character".to_string(),
            kind if kind.is_keyword() => format!("the keyword `{}`", kind.name()),
            kind => format!("a `{}` token", kind.name()),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit of the source code.
///
/// Two tokens are equal when their kind, lexeme, source file path and line are equal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Token {
    /// Get the category of the token.
    #[get_copy = "pub"]
    kind: TokenKind,
    /// Get the exact source text of the token.
    #[get = "pub"]
    lexeme: String,
    /// Get the line the token starts on (starts at 1).
    #[get_copy = "pub"]
    line: usize,
    span: Span,
}

impl Token {
    /// Creates a token covering the given span.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, line: usize) -> Self {
        Self {
            kind,
            lexeme: span.str().to_string(),
            line,
            span,
        }
    }

    /// Get the path of the source file the token was read from.
    #[must_use]
    pub fn source_file(&self) -> &Path {
        self.span.source_file().path()
    }

    /// Whether the token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.lexeme == other.lexeme
            && self.line == other.line
            && self.source_file() == other.source_file()
    }
}

impl Eq for Token {}

impl std::hash::Hash for Token {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.lexeme.hash(state);
        self.line.hash(state);
        self.source_file().hash(state);
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} at {}:{}",
            self.kind.name(),
            self.lexeme,
            self.span.source_file().display_path(),
            self.line
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::source_file::SourceFile;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::from_str("void"), Ok(TokenKind::Void));
        assert_eq!(TokenKind::from_str("cout"), Ok(TokenKind::Cout));
        assert_eq!(TokenKind::from_str("or"), Ok(TokenKind::OrWord));
        assert_eq!(TokenKind::from_str("Void"), Err(KeywordParseError));
        assert_eq!(TokenKind::from_str("x"), Err(KeywordParseError));
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for kind in TokenKind::iter().filter(|kind| kind.is_keyword()) {
            let word = kind.keyword_str().unwrap();
            assert_eq!(TokenKind::from_str(word), Ok(kind));
            assert_eq!(kind.name(), word);
        }
    }

    #[test]
    fn test_every_kind_has_a_name() {
        for kind in TokenKind::iter() {
            assert!(!kind.name().is_empty());
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::Semicolon.describe(), "a `;` token");
        assert_eq!(TokenKind::While.describe(), "the keyword `while`");
        assert_eq!(TokenKind::Identifier.describe(), "an identifier");
    }

    #[test]
    fn test_token_display() {
        let file = SourceFile::new("main.sic", "int x;");
        let token = Token::new(
            TokenKind::Identifier,
            Span::new(file, 4, 5).unwrap(),
            1,
        );

        assert_eq!(token.lexeme(), "x");
        assert_eq!(token.source_file(), Path::new("main.sic"));
        assert_eq!(token.to_string(), "identifier \"x\" at main.sic:1");
    }

    #[test]
    fn test_tokens_equal_by_value() {
        use crate::lexical::lexer::Lexer;
        use std::collections::HashSet;

        let first = Lexer::new(&SourceFile::new("a.sic", "x")).next_token();
        let second = Lexer::new(&SourceFile::new("a.sic", "x")).next_token();
        let elsewhere = Lexer::new(&SourceFile::new("b.sic", "x")).next_token();
        let next_line = Lexer::new(&SourceFile::new("a.sic", "\nx")).next_token();

        assert_eq!(first, second);
        assert_ne!(first, elsewhere);
        assert_ne!(first, next_line);
        assert_eq!(HashSet::from([first, second]).len(), 1);
    }
}
