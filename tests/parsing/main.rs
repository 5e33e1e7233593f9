use std::path::Path;

use simple_compiler::{
    base::{Error, MemoryProvider, SilentHandler, VoidHandler},
    lexical::token::TokenKind,
    semantic::SymbolTable,
    syntax::{
        error::{Error as SyntaxError, SyntaxKind},
        syntax_tree::statement::{CompoundOperator, CoutItem, Statement},
    },
};

fn provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_file("round_trip.sic", include_str!("./round_trip.sic"));
    provider.add_file("loops.sic", include_str!("./loops.sic"));
    provider.add_file("chained_or.sic", include_str!("./chained_or.sic"));
    provider.add_file("garbage.sic", include_str!("./garbage.sic"));
    provider.add_file("latin1.sic", include_bytes!("./latin1.sic").as_slice());
    provider.add_file(
        "stray_byte.sic",
        b"void main() {\n  int x;\n  x = \xFF;\n}\n".as_slice(),
    );
    provider
}

#[test]
fn parsing_round_trip() {
    let mut symbols = SymbolTable::new();
    let parsed = simple_compiler::parse(
        &VoidHandler,
        &provider(),
        Path::new("round_trip.sic"),
        &mut symbols,
    )
    .expect("Failed to parse");

    assert_eq!(
        parsed.to_string(),
        "Start(Program(Block(StatementGroup[DeclarationAssignment(x, 1), \
         CompoundAssignment(+=, x, 2), \
         If(Greater(x, 1), Block(StatementGroup[Cout([x, endl])]))])))"
    );

    let statements = parsed.program().block().statement_group().statements();
    assert_eq!(statements.len(), 3);

    let Statement::CompoundAssignment(plus_equals) = &statements[1] else {
        panic!("Expected compound assignment");
    };
    assert_eq!(plus_equals.operator(), CompoundOperator::PlusEquals);

    let Statement::If(if_statement) = &statements[2] else {
        panic!("Expected if statement");
    };
    let Statement::Cout(cout) = &if_statement.block().statement_group().statements()[0] else {
        panic!("Expected cout statement");
    };
    assert!(matches!(cout.items()[1], CoutItem::EndLine));

    assert_eq!(symbols.len(), 1);
    assert_eq!(
        plus_equals.identifier().symbol(),
        symbols.get("x").unwrap()
    );
}

#[test]
fn parsing_loops_with_comments() {
    let mut symbols = SymbolTable::new();
    let parsed = simple_compiler::parse(
        &VoidHandler,
        &provider(),
        Path::new("loops.sic"),
        &mut symbols,
    )
    .expect("Failed to parse");

    let statements = parsed.program().block().statement_group().statements();
    assert_eq!(statements.len(), 7);

    assert_eq!(
        statements[2].to_string(),
        "For(DeclarationAssignment(j, 0), Less(j, 10), Assignment(j, Plus(j, 1)), \
         Block(StatementGroup[CompoundAssignment(+=, sum, j)]))"
    );
    assert!(statements[4].is_while());
    assert_eq!(
        statements[5].as_do().unwrap().condition().to_string(),
        "And(Greater(i, 0), NotEqual(sum, 0))"
    );

    assert_eq!(
        symbols.iter().map(|(_, name)| name).collect::<Vec<_>>(),
        vec!["sum", "i", "j"]
    );
}

#[test]
fn parsing_chained_or_stops_after_two_operands() {
    let handler = SilentHandler::new();
    let err = simple_compiler::parse(
        &handler,
        &provider(),
        Path::new("chained_or.sic"),
        SymbolTable::new(),
    )
    .expect_err("Expecting parsing failure");

    let Error::ParseError(SyntaxError::UnexpectedSyntax(unexpected)) = &err else {
        panic!("Expected a syntax error, got {err:?}");
    };
    assert_eq!(unexpected.expected, SyntaxKind::Token(TokenKind::RightParen));
    assert!(unexpected.found.is(TokenKind::LogicalOr));
    assert_eq!(unexpected.found.line(), 3);

    assert_eq!(handler.dissolve(), vec![err]);
}

#[test]
fn parsing_unrecognized_character() {
    let err = simple_compiler::parse(
        &VoidHandler,
        &provider(),
        Path::new("garbage.sic"),
        SymbolTable::new(),
    )
    .expect_err("Expecting parsing failure");

    let Error::ParseError(syntax_error) = err else {
        panic!("Expected a syntax error");
    };
    assert!(syntax_error.token().is(TokenKind::Unrecognized));
    assert_eq!(syntax_error.token().lexeme(), "@");
    assert_eq!(syntax_error.token().line(), 3);
    assert_eq!(syntax_error.token().source_file(), Path::new("garbage.sic"));
}

#[test]
fn parsing_invalid_utf8_in_comment() {
    let parsed = simple_compiler::parse(
        &VoidHandler,
        &provider(),
        Path::new("latin1.sic"),
        SymbolTable::new(),
    )
    .expect("Failed to parse");

    assert_eq!(
        parsed.to_string(),
        "Start(Program(Block(StatementGroup[DeclarationAssignment(x, 1), Cout([x, endl])])))"
    );
}

#[test]
fn parsing_invalid_utf8_in_code() {
    let err = simple_compiler::parse(
        &VoidHandler,
        &provider(),
        Path::new("stray_byte.sic"),
        SymbolTable::new(),
    )
    .expect_err("Expecting parsing failure");

    let Error::ParseError(SyntaxError::UnexpectedSyntax(unexpected)) = err else {
        panic!("Expected a syntax error");
    };
    assert!(unexpected.found.is(TokenKind::Unrecognized));
    assert_eq!(unexpected.found.lexeme(), "\u{FFFD}");
    assert_eq!(unexpected.found.line(), 3);
}

#[test]
fn parsing_missing_file() {
    let handler = SilentHandler::new();
    let err = simple_compiler::parse(
        &handler,
        &provider(),
        Path::new("missing.sic"),
        SymbolTable::new(),
    )
    .expect_err("Expecting missing file");

    assert!(matches!(err, Error::IoError { .. }));
    assert_eq!(handler.dissolve().len(), 1);
}

#[test]
fn parsing_error_message() {
    colored::control::set_override(false);

    let err = simple_compiler::parse_str("void main() { int x = 1 }", SymbolTable::new())
        .expect_err("Expecting parsing failure");
    let message = err.to_string();

    assert!(message.starts_with("[error]: expected a `;` token, but found a `}` token `}`"));
    assert!(message.contains("<memory>:1:25"));
}

#[test]
fn parsing_keyword_suggestion() {
    colored::control::set_override(false);

    let err = simple_compiler::parse_str("viod main() { }", SymbolTable::new())
        .expect_err("Expecting parsing failure");

    assert!(err.to_string().ends_with("did you mean `void`?"));
}

#[test]
fn tokenizing_file() {
    let tokens = simple_compiler::tokenize(&provider(), Path::new("round_trip.sic"))
        .expect("Failed to tokenize");

    assert_eq!(tokens.first().map(|token| token.kind()), Some(TokenKind::Void));
    assert_eq!(
        tokens.last().map(|token| token.kind()),
        Some(TokenKind::EndOfFile)
    );
    assert_eq!(
        tokens
            .iter()
            .filter(|token| token.is(TokenKind::PlusEquals))
            .count(),
        1
    );
    assert_eq!(tokens.unrecognized().count(), 0);
}
