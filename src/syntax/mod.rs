//! This module contains the syntax tree and the recursive-descent parser of the language.

pub mod error;
pub mod parser;
#[allow(clippy::module_name_repetitions)]
pub mod syntax_tree;
