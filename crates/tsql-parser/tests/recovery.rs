mod common;

use common::*;
use tsql_parser::ast::Statement;
use tsql_parser::{parse, parse_strict, parse_with_options, Error, ParserOptions};

#[test]
fn bad_statement_does_not_stop_the_script() {
    let (statements, diagnostics) = parse_lenient(
        "CREATE TABLE t (id INT NOT NULL PRIMARY KEY;\n\
         INSERT INTO t VALUES (1);\n\
         SELECT * FROM t",
    );
    assert_eq!(tags(&statements), ["CreateTable", "Insert", "Select"]);
    assert_eq!(diagnostics.len(), 1);
    let Statement::CreateTable(table) = &statements[0] else {
        unreachable!()
    };
    assert_eq!(table.name.base_name(), "t");
}

#[test]
fn unknown_leading_words_are_reported_once() {
    let (statements, diagnostics) =
        parse_lenient("FROBNICATE everything now; CREATE WIDGET w; DROP GADGET g; PRINT 1");
    assert_eq!(tags(&statements), ["Print"]);
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics[0].location.line, 1);
    assert_eq!(diagnostics[0].location.column, 1);
}

#[test]
fn diagnostics_name_what_was_expected() {
    let (_, diagnostics) = parse_lenient("SELECT a FROM");
    let [error] = diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {diagnostics:?}");
    };
    assert!(error.expected.is_some());
    assert!(error.message.contains("end of input"), "{}", error.message);
}

#[test]
fn alter_table_with_an_unknown_action() {
    let (statements, diagnostics) = parse_lenient(
        "ALTER TABLE sales.orders FROBNICATE; \
         CREATE AGGREGATE dbo.Concat (@x NVARCHAR(100)) RETURNS NVARCHAR(MAX) \
         EXTERNAL NAME util.Concat",
    );
    assert_eq!(tags(&statements), ["AlterTable", "CreateAggregate"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].found.as_deref(), Some("FROBNICATE"));
    let Statement::AlterTable(alter) = &statements[0] else {
        unreachable!()
    };
    assert_eq!(alter.name.to_string(), "sales.orders");
}

#[test]
fn lenient_parse_hides_errors_strict_parse_reports_them() {
    let sql = "UPDATE t SET WHERE id = 1; SELECT 1";

    let lenient = parse(sql).unwrap();
    assert!(lenient.error.is_none());
    assert_eq!(lenient.statements.len(), 2);

    let strict = parse_with_options(sql, &ParserOptions::strict()).unwrap();
    assert_eq!(strict.statements, lenient.statements);
    let error = strict.error.unwrap();
    assert_eq!(error.found.as_deref(), Some("WHERE"));

    match parse_strict(sql) {
        Err(Error::Parse(e)) => assert_eq!(e, error),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn lexer_failures_are_hard_errors() {
    for sql in ["SELECT 'unterminated", "SELECT [open", "/* never closed", "SELECT \u{1}"] {
        assert!(matches!(parse(sql), Err(Error::Lex(_))), "{sql:?}");
    }
}

#[test]
fn strict_parse_of_valid_scripts() {
    let statements = parse_strict(
        "BEGIN TRY\n\
             BEGIN TRAN;\n\
             UPDATE accounts SET balance -= 10 WHERE id = 1;\n\
             COMMIT;\n\
         END TRY\n\
         BEGIN CATCH\n\
             ROLLBACK;\n\
             THROW;\n\
         END CATCH",
    )
    .unwrap();
    let [Statement::TryCatch(block)] = statements.as_slice() else {
        panic!("expected one TRY/CATCH block");
    };
    assert_eq!(
        tags(&block.try_statements),
        ["BeginTransaction", "Update", "CommitTransaction"]
    );
    assert_eq!(
        tags(&block.catch_statements),
        ["RollbackTransaction", "Throw"]
    );
}

#[test]
fn nesting_limit_is_an_error_not_a_crash() {
    let sql = format!("SELECT {}1{}; PRINT 'after'", "(".repeat(100), ")".repeat(100));
    let options = ParserOptions::default().with_max_depth(32);
    let script = parse_with_options(&sql, &options).unwrap();
    assert_eq!(tags(&script.statements), ["Select", "Print"]);

    let strict = parse_with_options(&sql, &ParserOptions::strict().with_max_depth(32)).unwrap();
    assert!(strict.error.is_some());
}
