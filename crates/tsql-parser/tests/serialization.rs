mod common;

use common::*;
use serde_json::{json, Value};
use tsql_parser::ast::{Statement, StatementFamily};

fn to_json(statement: &Statement) -> Value {
    serde_json::to_value(statement).unwrap()
}

#[test]
fn statements_serialize_under_their_tag() {
    let statements = parse_all(
        "CREATE TABLE dbo.t (id INT);\
         ALTER DATABASE db SET QUERY_STORE CLEAR;\
         DROP INDEX ix ON t;\
         INSERT t VALUES (1);\
         SELECT 1",
    );
    for statement in &statements {
        let value = to_json(statement);
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key(statement.tag()), "{value}");
    }
}

#[test]
fn names_keep_their_parts() {
    let value = to_json(&parse_one("CREATE TABLE [sales].[order lines] (id INT)"));
    let name = &value["CreateTable"]["name"];
    assert_eq!(name["count"], json!(2));
    assert_eq!(name["schema"]["value"], json!("sales"));
    assert_eq!(name["base"]["value"], json!("order lines"));
    assert_eq!(name["base"]["quote_kind"], json!("Bracketed"));
}

#[test]
fn option_nodes_carry_pascal_case_kinds() {
    let value = to_json(&parse_one(
        "ALTER DATABASE db SET QUERY_STORE (OPERATION_MODE = READ_ONLY), \
         AUTO_UPDATE_STATISTICS_ASYNC ON",
    ));
    let options = &value["AlterDatabaseSet"]["options"];
    assert_eq!(
        options[0]["QueryStore"]["settings"][0],
        json!({ "OperationMode": "ReadOnly" })
    );
    assert_eq!(
        options[1]["OnOff"]["option_kind"],
        json!("AutoUpdateStatisticsAsync")
    );
}

#[test]
fn families_group_tags() {
    let statements = parse_all(
        "CREATE VIEW v AS SELECT 1 AS one;\
         ALTER TABLE t DROP COLUMN c;\
         DROP VIEW v;\
         DELETE FROM t;\
         SELECT 1;\
         WHILE 1 = 1 BREAK;\
         GRANT SELECT ON t TO u;\
         USE master",
    );
    let families: Vec<_> = statements.iter().map(Statement::family).collect();
    assert_eq!(
        families,
        [
            StatementFamily::Create,
            StatementFamily::Alter,
            StatementFamily::Drop,
            StatementFamily::Dml,
            StatementFamily::Query,
            StatementFamily::ControlFlow,
            StatementFamily::Security,
            StatementFamily::Other,
        ]
    );
}
