//! Syntax tree nodes for statements.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use itertools::Itertools as _;

use crate::{
    lexical::token::TokenKind,
    semantic::SymbolResolver,
    syntax::{
        error::{ParseResult, SyntaxKind},
        parser::Parser,
    },
};

use super::expression::{Expression, Identifier};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Block:
///     '{' StatementGroup '}'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Block {
    /// The statements within the block.
    #[get = "pub"]
    statement_group: StatementGroup,
}

impl Block {
    /// Dissolves the [`Block`] into its statement group.
    #[must_use]
    pub fn dissolve(self) -> StatementGroup {
        self.statement_group
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block({})", self.statement_group)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// StatementGroup:
///     Statement*
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Getters)]
pub struct StatementGroup {
    /// The statements in source order.
    #[get = "pub"]
    statements: Vec<Statement>,
}

impl StatementGroup {
    /// Dissolves the [`StatementGroup`] into its statements.
    #[must_use]
    pub fn dissolve(self) -> Vec<Statement> {
        self.statements
    }
}

impl Display for StatementGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StatementGroup[{}]", self.statements.iter().join(", "))
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Statement:
///     Declaration
///     | DeclarationAssignment
///     | Assignment
///     | CompoundAssignment
///     | If
///     | While
///     | Do
///     | For
///     | Cout
///     ;
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, From, EnumAsInner)]
pub enum Statement {
    Declaration(Declaration),
    DeclarationAssignment(DeclarationAssignment),
    Assignment(Assignment),
    CompoundAssignment(CompoundAssignment),
    If(If),
    While(While),
    Do(Do),
    For(For),
    Cout(Cout),
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Declaration(statement) => statement.fmt(f),
            Self::DeclarationAssignment(statement) => statement.fmt(f),
            Self::Assignment(statement) => statement.fmt(f),
            Self::CompoundAssignment(statement) => statement.fmt(f),
            Self::If(statement) => statement.fmt(f),
            Self::While(statement) => statement.fmt(f),
            Self::Do(statement) => statement.fmt(f),
            Self::For(statement) => statement.fmt(f),
            Self::Cout(statement) => statement.fmt(f),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Declaration:
///     'int' Identifier ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Declaration {
    /// The declared variable.
    #[get = "pub"]
    identifier: Identifier,
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Declaration({})", self.identifier)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// DeclarationAssignment:
///     'int' Identifier '=' Expression ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct DeclarationAssignment {
    /// The declared variable.
    #[get = "pub"]
    identifier: Identifier,
    /// The initial value.
    #[get = "pub"]
    expression: Expression,
}

impl Display for DeclarationAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeclarationAssignment({}, {})",
            self.identifier, self.expression
        )
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Assignment:
///     Identifier '=' Expression ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Assignment {
    /// The assigned variable.
    #[get = "pub"]
    identifier: Identifier,
    /// The assigned value.
    #[get = "pub"]
    expression: Expression,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assignment({}, {})", self.identifier, self.expression)
    }
}

/// The operators of compound assignments.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompoundOperator {
    /// `+=`
    PlusEquals,
    /// `-=`
    MinusEquals,
    /// `*=`
    MultiplyEquals,
    /// `=*`, the reversed spelling of `*=`
    MultiplyBy,
    /// `/=`
    DivideEquals,
}

impl CompoundOperator {
    /// Gets the operator for a token kind, if it is a compound assignment operator.
    #[must_use]
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusEquals => Some(Self::PlusEquals),
            TokenKind::MinusEquals => Some(Self::MinusEquals),
            TokenKind::MultiplyEquals => Some(Self::MultiplyEquals),
            TokenKind::MultiplyBy => Some(Self::MultiplyBy),
            TokenKind::DivideEquals => Some(Self::DivideEquals),
            _ => None,
        }
    }

    /// Gets the source spelling of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlusEquals => "+=",
            Self::MinusEquals => "-=",
            Self::MultiplyEquals => "*=",
            Self::MultiplyBy => "=*",
            Self::DivideEquals => "/=",
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// CompoundAssignment:
///     Identifier ('+=' | '-=' | '*=' | '=*' | '/=') Expression ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct CompoundAssignment {
    /// The compound operator.
    #[get_copy = "pub"]
    operator: CompoundOperator,
    /// The updated variable.
    #[get = "pub"]
    identifier: Identifier,
    /// The right hand side.
    #[get = "pub"]
    expression: Expression,
}

impl Display for CompoundAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CompoundAssignment({}, {}, {})",
            self.operator.as_str(),
            self.identifier,
            self.expression
        )
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// If:
///     'if' '(' Expression ')' Block
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct If {
    /// The condition.
    #[get = "pub"]
    condition: Expression,
    /// The block executed when the condition holds.
    #[get = "pub"]
    block: Block,
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "If({}, {})", self.condition, self.block)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// While:
///     'while' '(' Expression ')' Block
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct While {
    /// The loop condition.
    #[get = "pub"]
    condition: Expression,
    /// The loop body.
    #[get = "pub"]
    block: Block,
}

impl Display for While {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "While({}, {})", self.condition, self.block)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Do:
///     'do' Block 'while' '(' Expression ')' ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Do {
    /// The loop condition, checked after each run of the body.
    #[get = "pub"]
    condition: Expression,
    /// The loop body.
    #[get = "pub"]
    block: Block,
}

impl Display for Do {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Do({}, {})", self.condition, self.block)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// For:
///     'for' '(' Statement Expression ';' Identifier '=' Expression ')' Block
///     ;
/// ```
///
/// The initializer is a complete statement and brings its own `;`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct For {
    /// The statement run before the loop.
    #[get = "pub"]
    initializer: Box<Statement>,
    /// The loop condition.
    #[get = "pub"]
    condition: Expression,
    /// The assignment run after each iteration.
    #[get = "pub"]
    increment: Assignment,
    /// The loop body.
    #[get = "pub"]
    block: Block,
}

impl Display for For {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "For({}, {}, {}, {})",
            self.initializer, self.condition, self.increment, self.block
        )
    }
}

/// One item written by a [`Cout`] statement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner)]
pub enum CoutItem {
    /// The value of an expression.
    Expression(Expression),
    /// The end-of-line marker `endl`.
    EndLine,
}

impl Display for CoutItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(expression) => expression.fmt(f),
            Self::EndLine => f.write_str("endl"),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Cout:
///     'cout' ('<<' (Expression | 'endl'))+ ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Cout {
    /// The written items in source order.
    #[get = "pub"]
    items: Vec<CoutItem>,
}

impl Display for Cout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cout([{}])", self.items.iter().join(", "))
    }
}

const DECLARATION_TAIL: SyntaxKind = SyntaxKind::Either(&[
    SyntaxKind::Token(TokenKind::Semicolon),
    SyntaxKind::Token(TokenKind::Assignment),
]);

const ASSIGNMENT_OPERATOR: SyntaxKind = SyntaxKind::Either(&[
    SyntaxKind::Token(TokenKind::Assignment),
    SyntaxKind::Token(TokenKind::PlusEquals),
    SyntaxKind::Token(TokenKind::MinusEquals),
    SyntaxKind::Token(TokenKind::MultiplyEquals),
    SyntaxKind::Token(TokenKind::MultiplyBy),
    SyntaxKind::Token(TokenKind::DivideEquals),
]);

impl<'a, S: SymbolResolver> Parser<'a, S> {
    /// Parses a [`Block`].
    ///
    /// # Errors
    /// - If the tokens do not form a block.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(|parser| {
            parser.match_token(TokenKind::LeftBrace)?;
            let statement_group = parser.parse_statement_group()?;
            parser.match_token(TokenKind::RightBrace)?;

            Ok(Block { statement_group })
        })
    }

    /// Parses statements until the next token starts none.
    ///
    /// # Errors
    /// - If a started statement is malformed.
    pub fn parse_statement_group(&mut self) -> ParseResult<StatementGroup> {
        let mut statements = Vec::new();

        while let Some(statement) = self.parse_statement()? {
            statements.push(statement);
        }

        Ok(StatementGroup { statements })
    }

    /// Parses a [`Statement`], choosing the rule by the next token.
    ///
    /// Returns `None` without consuming anything if the next token does not start a statement.
    ///
    /// # Errors
    /// - If a started statement is malformed.
    pub fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let statement = match self.peek_kind() {
            TokenKind::Int => self.parse_declaration()?,
            TokenKind::Identifier => self.parse_assignment()?,
            TokenKind::If => self.parse_if()?.into(),
            TokenKind::While => self.parse_while()?.into(),
            TokenKind::For => self.parse_for()?.into(),
            TokenKind::Cout => self.parse_cout()?.into(),
            TokenKind::Do => self.parse_do()?.into(),
            _ => return Ok(None),
        };

        Ok(Some(statement))
    }

    /// Parses a [`Declaration`] or a [`DeclarationAssignment`].
    ///
    /// # Errors
    /// - If the tokens do not form a declaration.
    pub fn parse_declaration(&mut self) -> ParseResult<Statement> {
        self.match_token(TokenKind::Int)?;
        let identifier = self.parse_identifier()?;

        match self.peek_kind() {
            TokenKind::Semicolon => {
                self.match_token(TokenKind::Semicolon)?;

                Ok(Declaration { identifier }.into())
            }
            TokenKind::Assignment => {
                self.match_token(TokenKind::Assignment)?;
                let expression = self.parse_expression()?;
                self.match_token(TokenKind::Semicolon)?;

                Ok(DeclarationAssignment {
                    identifier,
                    expression,
                }
                .into())
            }
            _ => Err(self.unexpected(DECLARATION_TAIL)),
        }
    }

    /// Parses an [`Assignment`] or a [`CompoundAssignment`].
    ///
    /// # Errors
    /// - If the tokens do not form an assignment.
    pub fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let identifier = self.parse_identifier()?;

        let kind = self.peek_kind();
        let operator = match kind {
            TokenKind::Assignment => None,
            kind => match CompoundOperator::from_token_kind(kind) {
                Some(operator) => Some(operator),
                None => return Err(self.unexpected(ASSIGNMENT_OPERATOR)),
            },
        };

        self.match_token(kind)?;
        let expression = self.parse_expression()?;
        self.match_token(TokenKind::Semicolon)?;

        Ok(match operator {
            None => Assignment {
                identifier,
                expression,
            }
            .into(),
            Some(operator) => CompoundAssignment {
                operator,
                identifier,
                expression,
            }
            .into(),
        })
    }

    /// Parses a parenthesized condition.
    fn parse_condition(&mut self) -> ParseResult<Expression> {
        self.match_token(TokenKind::LeftParen)?;
        let condition = self.parse_expression()?;
        self.match_token(TokenKind::RightParen)?;

        Ok(condition)
    }

    /// Parses an [`If`] statement.
    ///
    /// # Errors
    /// - If the tokens do not form an if statement.
    pub fn parse_if(&mut self) -> ParseResult<If> {
        self.match_token(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let block = self.parse_block()?;

        Ok(If { condition, block })
    }

    /// Parses a [`While`] statement.
    ///
    /// # Errors
    /// - If the tokens do not form a while statement.
    pub fn parse_while(&mut self) -> ParseResult<While> {
        self.match_token(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let block = self.parse_block()?;

        Ok(While { condition, block })
    }

    /// Parses a [`Do`] statement.
    ///
    /// # Errors
    /// - If the tokens do not form a do-while statement.
    pub fn parse_do(&mut self) -> ParseResult<Do> {
        self.match_token(TokenKind::Do)?;
        let block = self.parse_block()?;
        self.match_token(TokenKind::While)?;
        let condition = self.parse_condition()?;
        self.match_token(TokenKind::Semicolon)?;

        Ok(Do { condition, block })
    }

    /// Parses a [`For`] statement.
    ///
    /// # Errors
    /// - If the tokens do not form a for statement.
    pub fn parse_for(&mut self) -> ParseResult<For> {
        self.match_token(TokenKind::For)?;
        self.match_token(TokenKind::LeftParen)?;

        let Some(initializer) = self.parse_statement()? else {
            return Err(self.unexpected(SyntaxKind::Statement));
        };

        let condition = self.parse_expression()?;
        self.match_token(TokenKind::Semicolon)?;

        let identifier = self.parse_identifier()?;
        self.match_token(TokenKind::Assignment)?;
        let expression = self.parse_expression()?;
        let increment = Assignment {
            identifier,
            expression,
        };

        self.match_token(TokenKind::RightParen)?;
        let block = self.parse_block()?;

        Ok(For {
            initializer: Box::new(initializer),
            condition,
            increment,
            block,
        })
    }

    /// Parses a [`Cout`] statement.
    ///
    /// # Errors
    /// - If the tokens do not form a cout statement.
    pub fn parse_cout(&mut self) -> ParseResult<Cout> {
        self.match_token(TokenKind::Cout)?;

        let mut items = Vec::new();
        loop {
            self.match_token(TokenKind::LeftShift)?;

            if self.peek_kind() == TokenKind::Endl {
                self.match_token(TokenKind::Endl)?;
                items.push(CoutItem::EndLine);
            } else {
                items.push(CoutItem::Expression(self.parse_expression()?));
            }

            if self.peek_kind() == TokenKind::Semicolon {
                break;
            }
        }

        self.match_token(TokenKind::Semicolon)?;

        Ok(Cout { items })
    }
}
