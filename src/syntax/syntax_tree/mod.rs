//! Contains the syntax tree nodes of the language.
//!
//! Every node exclusively owns its children. Nodes are only built by the
//! [`Parser`](super::parser::Parser) and never changed afterwards; the [`Display`](std::fmt::Display)
//! implementations render a tree in a compact nested notation such as
//! `Start(Program(Block(StatementGroup[Declaration(x)])))`.

pub mod expression;
pub mod program;
pub mod statement;
