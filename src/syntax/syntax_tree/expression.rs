//! Syntax tree nodes for expressions.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};

use crate::{
    lexical::token::TokenKind,
    semantic::{SymbolId, SymbolResolver},
    syntax::{
        error::{InvalidInteger, ParseResult, SyntaxKind},
        parser::Parser,
    },
};

/// Syntax Synopsis:
///
/// ```ebnf
/// Expression:
///     Binary
///     | Identifier
///     | Integer
///     ;
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, From, EnumAsInner)]
pub enum Expression {
    Binary(Binary),
    Identifier(Identifier),
    Integer(Integer),
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary(binary) => binary.fmt(f),
            Self::Identifier(identifier) => identifier.fmt(f),
            Self::Integer(integer) => integer.fmt(f),
        }
    }
}

/// The operators of binary expressions, from the loosest to the tightest binding.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BitwiseAnd,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOperator {
    /// Gets the node name of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "Or",
            Self::And => "And",
            Self::BitwiseAnd => "BitwiseAnd",
            Self::Less => "Less",
            Self::LessEqual => "LessEqual",
            Self::Greater => "Greater",
            Self::GreaterEqual => "GreaterEqual",
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Times => "Times",
            Self::Divide => "Divide",
        }
    }
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Binary:
///     Expression BinaryOperator Expression
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct Binary {
    /// The operator of the expression.
    #[get_copy = "pub"]
    operator: BinaryOperator,
    /// The left operand.
    #[get = "pub"]
    left: Box<Expression>,
    /// The right operand.
    #[get = "pub"]
    right: Box<Expression>,
}

impl Binary {
    fn new(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Dissolves the [`Binary`] into its components.
    #[must_use]
    pub fn dissolve(self) -> (BinaryOperator, Expression, Expression) {
        (self.operator, *self.left, *self.right)
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.operator.as_str(), self.left, self.right)
    }
}

/// A variable reference, resolved against the symbol table when it is parsed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct Identifier {
    /// The name of the identifier.
    #[get = "pub"]
    name: String,
    /// The symbol the name resolved to.
    #[get_copy = "pub"]
    symbol: SymbolId,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// An integer literal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CopyGetters)]
pub struct Integer {
    /// The value of the literal.
    #[get_copy = "pub"]
    value: i32,
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

type OperandParser<'a, S> = fn(&mut Parser<'a, S>) -> ParseResult<Expression>;

const OR_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::LogicalOr, BinaryOperator::Or),
    (TokenKind::OrWord, BinaryOperator::Or),
];

const AND_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::LogicalAnd, BinaryOperator::And),
    (TokenKind::AndWord, BinaryOperator::And),
];

const BITWISE_AND_OPERATORS: &[(TokenKind, BinaryOperator)] =
    &[(TokenKind::BitwiseAnd, BinaryOperator::BitwiseAnd)];

const RELATIONAL_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Less, BinaryOperator::Less),
    (TokenKind::LessEqual, BinaryOperator::LessEqual),
    (TokenKind::Greater, BinaryOperator::Greater),
    (TokenKind::GreaterEqual, BinaryOperator::GreaterEqual),
    (TokenKind::Equal, BinaryOperator::Equal),
    (TokenKind::NotEqual, BinaryOperator::NotEqual),
];

const PLUS_MINUS_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Plus, BinaryOperator::Plus),
    (TokenKind::Minus, BinaryOperator::Minus),
];

const TIMES_DIVIDE_OPERATORS: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Multiply, BinaryOperator::Times),
    (TokenKind::Divide, BinaryOperator::Divide),
];

const FACTOR_START: SyntaxKind = SyntaxKind::Either(&[
    SyntaxKind::Token(TokenKind::Identifier),
    SyntaxKind::Token(TokenKind::Integer),
    SyntaxKind::Token(TokenKind::LeftParen),
]);

fn find_operator(
    operators: &[(TokenKind, BinaryOperator)],
    kind: TokenKind,
) -> Option<BinaryOperator> {
    operators
        .iter()
        .find(|(token_kind, _)| *token_kind == kind)
        .map(|(_, operator)| *operator)
}

impl<'a, S: SymbolResolver> Parser<'a, S> {
    /// Parses an [`Expression`].
    ///
    /// ```ebnf
    /// Expression: Or ;
    /// Or:         And (('||' | 'or') And)? ;
    /// And:        BitwiseAnd (('&&' | 'and') BitwiseAnd)? ;
    /// BitwiseAnd: Relational ('&' Relational)? ;
    /// Relational: PlusMinus (('<' | '<=' | '>' | '>=' | '==' | '!=') PlusMinus)? ;
    /// PlusMinus:  TimesDivide (('+' | '-') TimesDivide)* ;
    /// TimesDivide: Factor (('*' | '/') Factor)* ;
    /// ```
    ///
    /// The logical, bitwise and relational levels combine at most two operands: in `a || b || c`
    /// only `a || b` is parsed and the second `||` is left for the enclosing rule.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or()
    }

    /// Parses the `||` level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_or(&mut self) -> ParseResult<Expression> {
        self.parse_single_binary(Self::parse_and, OR_OPERATORS)
    }

    /// Parses the `&&` level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_and(&mut self) -> ParseResult<Expression> {
        self.parse_single_binary(Self::parse_bitwise_and, AND_OPERATORS)
    }

    /// Parses the `&` level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_bitwise_and(&mut self) -> ParseResult<Expression> {
        self.parse_single_binary(Self::parse_relational, BITWISE_AND_OPERATORS)
    }

    /// Parses the comparison level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_relational(&mut self) -> ParseResult<Expression> {
        self.parse_single_binary(Self::parse_plus_minus, RELATIONAL_OPERATORS)
    }

    /// Parses the `+`/`-` level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_plus_minus(&mut self) -> ParseResult<Expression> {
        self.parse_repeated_binary(Self::parse_times_divide, PLUS_MINUS_OPERATORS)
    }

    /// Parses the `*`/`/` level of an expression.
    ///
    /// # Errors
    /// - If the tokens do not form an expression.
    pub fn parse_times_divide(&mut self) -> ParseResult<Expression> {
        self.parse_repeated_binary(Self::parse_factor, TIMES_DIVIDE_OPERATORS)
    }

    /// Parses an operand followed by at most one operator and a second operand.
    fn parse_single_binary(
        &mut self,
        operand: OperandParser<'a, S>,
        operators: &[(TokenKind, BinaryOperator)],
    ) -> ParseResult<Expression> {
        let left = operand(self)?;

        let kind = self.peek_kind();
        let Some(operator) = find_operator(operators, kind) else {
            return Ok(left);
        };

        self.match_token(kind)?;
        let right = operand(self)?;

        Ok(Binary::new(operator, left, right).into())
    }

    /// Parses a left-associative chain of operands.
    fn parse_repeated_binary(
        &mut self,
        operand: OperandParser<'a, S>,
        operators: &[(TokenKind, BinaryOperator)],
    ) -> ParseResult<Expression> {
        let mut expression = operand(self)?;

        loop {
            let kind = self.peek_kind();
            let Some(operator) = find_operator(operators, kind) else {
                return Ok(expression);
            };

            self.match_token(kind)?;
            let right = operand(self)?;

            expression = Binary::new(operator, expression, right).into();
        }
    }

    /// Parses a factor: an identifier, an integer or a parenthesized expression.
    ///
    /// # Errors
    /// - If the next token starts none of them.
    pub fn parse_factor(&mut self) -> ParseResult<Expression> {
        match self.peek_kind() {
            TokenKind::Identifier => Ok(Expression::Identifier(self.parse_identifier()?)),
            TokenKind::Integer => Ok(Expression::Integer(self.parse_integer()?)),
            TokenKind::LeftParen => self.nested(|parser| {
                parser.match_token(TokenKind::LeftParen)?;
                let expression = parser.parse_expression()?;
                parser.match_token(TokenKind::RightParen)?;

                Ok(expression)
            }),
            _ => Err(self.unexpected(FACTOR_START)),
        }
    }

    /// Parses an [`Identifier`] and resolves it in the symbol table.
    ///
    /// # Errors
    /// - If the next token is not an identifier.
    pub fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.match_token(TokenKind::Identifier)?;
        let symbol = self.resolve_symbol(token.lexeme());

        Ok(Identifier {
            name: token.lexeme().clone(),
            symbol,
        })
    }

    /// Parses an [`Integer`].
    ///
    /// # Errors
    /// - If the next token is not an integer literal.
    /// - If the literal does not fit into an `i32`.
    pub fn parse_integer(&mut self) -> ParseResult<Integer> {
        let token = self.match_token(TokenKind::Integer)?;
        let parsed = token.lexeme().parse::<i32>();

        match parsed {
            Ok(value) => Ok(Integer { value }),
            Err(_) => Err(InvalidInteger { token }.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        base::source_file::{SourceElement as _, SourceFile},
        lexical::lexer::Lexer,
        semantic::SymbolTable,
        syntax::{error::Error, parser::MAX_NESTING_DEPTH},
    };

    fn parse(source: &str) -> (ParseResult<Expression>, TokenKind) {
        let file = SourceFile::new("test.sic", source);
        let mut parser = Parser::new(Lexer::new(&file), SymbolTable::new());
        let expression = parser.parse_expression();
        let rest = parser.peek_kind();
        (expression, rest)
    }

    fn parse_complete(source: &str) -> String {
        let (expression, rest) = parse(source);
        assert_eq!(rest, TokenKind::EndOfFile, "unconsumed input in `{source}`");
        expression.unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse_complete("1 + 2 * 3"), "Plus(1, Times(2, 3))");
        assert_eq!(parse_complete("(1 + 2) * 3"), "Times(Plus(1, 2), 3)");
        assert_eq!(
            parse_complete("a < b + 1 && c"),
            "And(Less(a, Plus(b, 1)), c)"
        );
        assert_eq!(
            parse_complete("a & b || c and d"),
            "Or(BitwiseAnd(a, b), And(c, d))"
        );
        assert_eq!(parse_complete("x != 0 or y == 1"), "Or(NotEqual(x, 0), Equal(y, 1))");
    }

    #[test]
    fn test_left_associative_chains() {
        assert_eq!(parse_complete("a - b - c"), "Minus(Minus(a, b), c)");
        assert_eq!(parse_complete("a / b * c"), "Times(Divide(a, b), c)");
        assert_eq!(
            parse_complete("1 + 2 - 3 + 4"),
            "Plus(Minus(Plus(1, 2), 3), 4)"
        );
    }

    #[test]
    fn test_single_repetition_levels() {
        for (source, parsed, rest) in [
            ("a || b || c", "Or(a, b)", TokenKind::LogicalOr),
            ("a && b and c", "And(a, b)", TokenKind::AndWord),
            ("a & b & c", "BitwiseAnd(a, b)", TokenKind::BitwiseAnd),
            ("a < b < c", "Less(a, b)", TokenKind::Less),
            ("a == b != c", "Equal(a, b)", TokenKind::NotEqual),
        ] {
            let (expression, next) = parse(source);
            assert_eq!(expression.unwrap().to_string(), parsed);
            assert_eq!(next, rest);
        }
    }

    #[test]
    fn test_identifiers_are_resolved() {
        let file = SourceFile::new("test.sic", "x + y * x");
        let mut parser = Parser::new(Lexer::new(&file), SymbolTable::new());
        let expression = parser.parse_expression().unwrap();

        let (_, left, right) = expression.into_binary().unwrap().dissolve();
        let x = left.into_identifier().unwrap();
        let (_, y, second_x) = right.into_binary().unwrap().dissolve();

        assert_eq!(x.name(), "x");
        assert_eq!(second_x.into_identifier().unwrap().symbol(), x.symbol());
        assert_ne!(y.into_identifier().unwrap().symbol(), x.symbol());
        assert_eq!(parser.symbols().len(), 2);
    }

    #[test]
    fn test_factor_error() {
        let (expression, _) = parse("+ 1");
        let err = expression.unwrap_err();

        assert!(matches!(
            &err,
            Error::UnexpectedSyntax(unexpected)
                if unexpected.expected == FACTOR_START && unexpected.found.is(TokenKind::Plus)
        ));
    }

    #[test]
    fn test_missing_closing_parenthesis() {
        let (expression, _) = parse("(1 + 2");

        assert_eq!(expression.unwrap_err().token().kind(), TokenKind::EndOfFile);
    }

    #[test]
    fn test_integer_out_of_range() {
        let (expression, _) = parse("2147483648");
        assert!(matches!(expression, Err(Error::InvalidInteger(_))));

        assert_eq!(parse_complete("2147483647"), "2147483647");
    }

    #[test]
    fn test_parenthesis_nesting_limit() {
        let depth = MAX_NESTING_DEPTH / 2;
        let nested = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse_complete(&nested), "x");

        let depth = MAX_NESTING_DEPTH * 2;
        let too_deep = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let (expression, _) = parse(&too_deep);

        let Err(Error::NestingTooDeep(err)) = expression else {
            panic!("Expected a nesting error");
        };
        assert!(err.token.is(TokenKind::LeftParen));
        assert_eq!(err.token.span().start(), MAX_NESTING_DEPTH);
        assert_eq!(err.limit, MAX_NESTING_DEPTH);
    }
}
