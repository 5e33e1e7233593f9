//! Contains the [`TokenStream`] struct, the fully tokenized form of a source file.

use std::{fmt::Debug, sync::Arc};

use derive_more::Deref;

use crate::base::source_file::SourceFile;

use super::{
    lexer::Lexer,
    token::{Token, TokenKind},
};

/// Is a list of all [`Token`]s of a source file, ending with the end of file token.
///
/// The parser pulls tokens from a [`Lexer`] directly; this struct exists for token dumps and
/// for inspecting the lexical output as a whole.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// Calls [`Lexer::next_token`] repeatedly until the end of file token has been produced.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.path().display()))]
    pub fn tokenize(source_file: &Arc<SourceFile>) -> Self {
        let mut lexer = Lexer::new(source_file);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let is_end = token.is(TokenKind::EndOfFile);
            tokens.push(token);

            if is_end {
                break;
            }
        }

        tracing::debug!(count = tokens.len(), "Tokenized source file");

        Self { tokens }
    }

    /// Iterates over the tokens whose kind is [`TokenKind::Unrecognized`].
    pub fn unrecognized(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|token| token.is(TokenKind::Unrecognized))
    }

    /// Dissolves this struct into its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> {
        self.tokens
    }
}
