#![allow(dead_code)]

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tsql_parser::ast::{
    AlterDatabaseSetStatement, AlterTableAddStatement, AlterTableDropStatement,
    CreateTableStatement, DropIndexStatement, DropObjectsStatement, InsertStatement,
    SelectStatement, Statement, UpdateStatement,
};
use tsql_parser::{Lexer, ParseError, Parser, ParserOptions};

static TRACING: Once = Once::new();

/// Routes parser events to the test output; run with `--nocapture` to see them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .without_time()
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Parses a script that must produce no diagnostics.
pub fn parse_all(sql: &str) -> Vec<Statement> {
    let (statements, diagnostics) = parse_lenient(sql);
    assert!(
        diagnostics.is_empty(),
        "Failed to parse: {sql}\nErrors: {diagnostics:?}"
    );
    statements
}

/// Parses a script that must hold exactly one statement.
pub fn parse_one(sql: &str) -> Statement {
    let mut statements = parse_all(sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

/// Parses a script leniently and returns the forest with every diagnostic.
pub fn parse_lenient(sql: &str) -> (Vec<Statement>, Vec<ParseError>) {
    init_tracing();
    let tokens = Lexer::new(sql)
        .tokenize()
        .unwrap_or_else(|e| panic!("Failed to tokenize: {sql}\nError: {e}"));
    let mut parser = Parser::new(tokens, ParserOptions::default());
    let statements = parser.parse_script();
    (statements, parser.diagnostics().to_vec())
}

/// Tags of every statement, in order.
pub fn tags(statements: &[Statement]) -> Vec<&'static str> {
    statements.iter().map(Statement::tag).collect()
}

pub fn parse_create_table(sql: &str) -> CreateTableStatement {
    match parse_one(sql) {
        Statement::CreateTable(s) => s,
        other => panic!("Expected CreateTable, got {}", other.tag()),
    }
}

pub fn parse_alter_table_add(sql: &str) -> AlterTableAddStatement {
    match parse_one(sql) {
        Statement::AlterTableAdd(s) => s,
        other => panic!("Expected AlterTableAdd, got {}", other.tag()),
    }
}

pub fn parse_alter_table_drop(sql: &str) -> AlterTableDropStatement {
    match parse_one(sql) {
        Statement::AlterTableDrop(s) => s,
        other => panic!("Expected AlterTableDrop, got {}", other.tag()),
    }
}

pub fn parse_alter_database_set(sql: &str) -> AlterDatabaseSetStatement {
    match parse_one(sql) {
        Statement::AlterDatabaseSet(s) => s,
        other => panic!("Expected AlterDatabaseSet, got {}", other.tag()),
    }
}

pub fn parse_drop_table(sql: &str) -> DropObjectsStatement {
    match parse_one(sql) {
        Statement::DropTable(s) => s,
        other => panic!("Expected DropTable, got {}", other.tag()),
    }
}

pub fn parse_drop_index(sql: &str) -> DropIndexStatement {
    match parse_one(sql) {
        Statement::DropIndex(s) => s,
        other => panic!("Expected DropIndex, got {}", other.tag()),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse_one(sql) {
        Statement::Insert(s) => s,
        other => panic!("Expected Insert, got {}", other.tag()),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse_one(sql) {
        Statement::Update(s) => s,
        other => panic!("Expected Update, got {}", other.tag()),
    }
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse_one(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected Select, got {}", other.tag()),
    }
}
