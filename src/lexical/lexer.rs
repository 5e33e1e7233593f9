//! Contains the [`Lexer`], which produces [`Token`]s from a source file on demand.

use std::{str::FromStr, sync::Arc};

use crate::base::source_file::{SourceFile, SourceIterator, Span};

use super::token::{Token, TokenKind};

/// Converts the characters of a source file into [`Token`]s, one at a time.
///
/// The lexer keeps a single token of lookahead: [`Lexer::peek_token`] scans the next token into
/// a buffer and [`Lexer::next_token`] hands out the buffered token before scanning further. The
/// line counter reported by [`Lexer::line`] only advances when a token is consumed.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    iter: SourceIterator<'a>,
    line: usize,
    /// The peeked token together with the line counter after scanning it.
    lookahead: Option<(Token, usize)>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of the source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            iter: source_file.iter(),
            line: 1,
            lookahead: None,
        }
    }

    /// Get the source file the lexer reads from.
    #[must_use]
    pub fn source_file(&self) -> &'a Arc<SourceFile> {
        self.iter.source_file()
    }

    /// Get the current line number (starts at 1).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Consumes and returns the next token.
    ///
    /// Once the end of the source is reached, every call returns an
    /// [`TokenKind::EndOfFile`] token.
    pub fn next_token(&mut self) -> Token {
        let (token, line) = match self.lookahead.take() {
            Some(buffered) => buffered,
            None => self.scan(),
        };
        self.line = line;

        tracing::trace!(kind = %token.kind(), lexeme = %token.lexeme(), line = token.line(), "token");

        token
    }

    /// Returns the token the next call to [`Lexer::next_token`] will return, without consuming it.
    pub fn peek_token(&mut self) -> &Token {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.scan());
        }

        match &self.lookahead {
            Some((token, _)) => token,
            None => unreachable!("lookahead was filled above"),
        }
    }

    /// Scans the next token from the source, starting at the committed line counter.
    ///
    /// Returns the token and the line counter after the token.
    fn scan(&mut self) -> (Token, usize) {
        let mut line = self.line;

        // skip white spaces
        let (start, character) = loop {
            match self.iter.next() {
                None => {
                    let span = Span::end_of(self.source_file().clone());
                    return (Token::new(TokenKind::EndOfFile, span, line), line);
                }
                Some((_, '\n')) => line += 1,
                Some((_, character)) if character.is_whitespace() => {}
                Some(item) => break item,
            }
        };

        let token_line = line;

        let kind = if character.is_ascii_alphabetic() {
            self.walk(|c| c.is_ascii_alphanumeric() || c == '_');
            let end = self.iter.position();
            let word = &self.source_file().content()[start..end];

            TokenKind::from_str(word).unwrap_or(TokenKind::Identifier)
        } else if character.is_ascii_digit() {
            self.walk(|c| c.is_ascii_digit());

            TokenKind::Integer
        } else {
            self.scan_operator(character, &mut line)
        };

        let span = Span::new(self.source_file().clone(), start, self.iter.position())
            .unwrap_or_else(|| Span::end_of(self.source_file().clone()));

        (Token::new(kind, span, token_line), line)
    }

    /// Advances the iterator while the predicate holds for the next character.
    fn walk(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = self.iter.peek() {
            if !predicate(character) {
                break;
            }

            self.iter.next();
        }
    }

    /// Picks the kind of the first alternative whose character follows, consuming it.
    fn extend(&mut self, alternatives: &[(char, TokenKind)], default: TokenKind) -> TokenKind {
        alternatives
            .iter()
            .find(|(next, _)| self.iter.next_if_eq(*next))
            .map_or(default, |(_, kind)| *kind)
    }

    /// Classifies punctuation and operators using maximal munch.
    fn scan_operator(&mut self, character: char, line: &mut usize) -> TokenKind {
        match character {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '#' => TokenKind::Hash,
            '^' => TokenKind::BitwiseXor,
            '~' => TokenKind::BitwiseNot,
            '.' => {
                if !self.iter.next_if_eq('.') {
                    TokenKind::Dot
                } else if self.iter.next_if_eq('.') {
                    TokenKind::Ellipsis
                } else {
                    // `..` is not a token of the language
                    TokenKind::Unrecognized
                }
            }
            '+' => self.extend(
                &[('+', TokenKind::Increment), ('=', TokenKind::PlusEquals)],
                TokenKind::Plus,
            ),
            '-' => self.extend(
                &[
                    ('-', TokenKind::Decrement),
                    ('=', TokenKind::MinusEquals),
                    ('>', TokenKind::Arrow),
                ],
                TokenKind::Minus,
            ),
            '*' => self.extend(&[('=', TokenKind::MultiplyEquals)], TokenKind::Multiply),
            '/' => {
                if self.iter.next_if_eq('/') {
                    self.walk(|c| c != '\n');
                    TokenKind::LineComment
                } else if self.iter.next_if_eq('*') {
                    self.scan_block_comment(line)
                } else {
                    self.extend(&[('=', TokenKind::DivideEquals)], TokenKind::Divide)
                }
            }
            '=' => self.extend(
                &[('=', TokenKind::Equal), ('*', TokenKind::MultiplyBy)],
                TokenKind::Assignment,
            ),
            '&' => self.extend(&[('&', TokenKind::LogicalAnd)], TokenKind::BitwiseAnd),
            '|' => self.extend(&[('|', TokenKind::LogicalOr)], TokenKind::BitwiseOr),
            '!' => self.extend(&[('=', TokenKind::NotEqual)], TokenKind::LogicalNot),
            '<' => self.extend(
                &[('<', TokenKind::LeftShift), ('=', TokenKind::LessEqual)],
                TokenKind::Less,
            ),
            '>' => self.extend(
                &[('>', TokenKind::RightShift), ('=', TokenKind::GreaterEqual)],
                TokenKind::Greater,
            ),
            '%' => self.extend(
                &[('d', TokenKind::FormatInt), ('f', TokenKind::FormatFloat)],
                TokenKind::Modulus,
            ),
            _ => TokenKind::Unrecognized,
        }
    }

    /// Consumes the rest of a `/* ... */` comment whose opening has already been read.
    fn scan_block_comment(&mut self, line: &mut usize) -> TokenKind {
        while let Some((_, character)) = self.iter.next() {
            match character {
                '\n' => *line += 1,
                '*' if self.iter.next_if_eq('/') => return TokenKind::BlockComment,
                _ => {}
            }
        }

        tracing::debug!("unterminated block comment reaches the end of the file");

        TokenKind::Unrecognized
    }
}
