//! The lexical module is responsible for converting raw text into tokens that the parser can understand.
//!
//! Lexing never fails: characters that do not start any known token are returned as
//! [`TokenKind::Unrecognized`](token::TokenKind::Unrecognized) tokens and only become an error
//! when the parser requires a different kind at that position.

pub mod lexer;
pub mod token;
pub mod token_stream;
