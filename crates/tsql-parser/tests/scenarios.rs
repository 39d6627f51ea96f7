mod common;

use common::*;
use tsql_parser::ast::{
    AbortAfterWait, BinaryOperator, BooleanExpression, ColumnReference, ComparisonOperator,
    ConstraintKind, DataType, DatabaseOption, ForeignKeyAction, IndexOption, InsertOption,
    InsertSource, Literal, LowPriorityLockWaitOption, Nullability, OptionState, QueryStoreSetting,
    QueryStoreState, ScalarExpression, SetClause, SqlDataTypeKind, Unit,
};

#[test]
fn create_table_with_typed_columns() {
    let table = parse_create_table(
        "CREATE TABLE dbo.t(id INT NOT NULL PRIMARY KEY, name NVARCHAR(100) NULL)",
    );
    assert_eq!(table.name.schema_name(), Some("dbo"));
    assert_eq!(table.name.base_name(), "t");
    assert_eq!(table.name.count, 2);

    let [id, name] = table.definition.columns.as_slice() else {
        panic!("expected two columns");
    };
    assert_eq!(id.name.value, "id");
    assert_eq!(
        id.data_type,
        Some(DataType::Sql {
            kind: SqlDataTypeKind::Int,
            parameters: vec![],
        })
    );
    assert_eq!(id.nullable, Some(Nullability::NotNull));
    assert_eq!(id.constraints.len(), 1);
    assert!(matches!(id.constraints[0].kind, ConstraintKind::PrimaryKey(_)));

    assert_eq!(name.name.value, "name");
    assert_eq!(
        name.data_type,
        Some(DataType::Sql {
            kind: SqlDataTypeKind::NVarChar,
            parameters: vec![Literal::Integer("100".into())],
        })
    );
    assert_eq!(name.nullable, Some(Nullability::Null));
    assert!(name.constraints.is_empty());
}

#[test]
fn alter_database_query_store() {
    let stmt = parse_alter_database_set(
        "ALTER DATABASE [SalesDb] SET QUERY_STORE = ON (OPERATION_MODE = READ_WRITE, \
         CLEANUP_POLICY = (STALE_QUERY_THRESHOLD_DAYS = 30), DATA_FLUSH_INTERVAL_SECONDS = 900, \
         MAX_STORAGE_SIZE_MB = 1024, QUERY_CAPTURE_MODE = AUTO) WITH NO_WAIT",
    );
    assert_eq!(stmt.name.value, "SalesDb");
    let [DatabaseOption::QueryStore(query_store)] = stmt.options.as_slice() else {
        panic!("expected a single QueryStore option, got {:?}", stmt.options);
    };
    assert_eq!(query_store.state, OptionState::On);
    assert_eq!(query_store.operation_mode(), Some(QueryStoreState::ReadWrite));
    assert_eq!(
        query_store.stale_query_threshold(),
        Some(&ScalarExpression::integer("30"))
    );
    assert_eq!(
        query_store.max_storage_size(),
        Some(&ScalarExpression::integer("1024"))
    );
    assert!(query_store
        .settings
        .iter()
        .any(|s| matches!(s, QueryStoreSetting::DataFlushInterval(_))));
    let kinds: Vec<_> = query_store.settings.iter().map(QueryStoreSetting::option_kind).collect();
    assert_eq!(
        kinds,
        [
            "OperationMode",
            "CleanupPolicy",
            "DataFlushInterval",
            "MaxStorageSize",
            "QueryCaptureMode"
        ]
    );
    assert!(stmt.termination.as_ref().is_some_and(|t| t.no_wait));
}

#[test]
fn insert_two_rows() {
    let insert = parse_insert("INSERT INTO dbo.people (id, name) VALUES (1, N'Ann'), (2, N'Bo');");
    assert_eq!(insert.insert_option, InsertOption::Into);
    assert_eq!(insert.target.as_named().unwrap().name.base_name(), "people");
    let columns: Vec<_> = insert.columns.iter().map(ColumnReference::column_name).collect();
    assert_eq!(columns, ["id", "name"]);
    let Some(InsertSource::Values(rows)) = &insert.source else {
        panic!("expected a VALUES source");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].values[0], ScalarExpression::integer("1"));
    assert_eq!(rows[1].values[0], ScalarExpression::integer("2"));
    let names: Vec<_> = rows
        .iter()
        .map(|row| match &row.values[1] {
            ScalarExpression::Literal(Literal::String { value, national }) => {
                assert!(*national);
                value.as_str()
            }
            other => panic!("expected a national string, got {other:?}"),
        })
        .collect();
    assert_eq!(names, ["Ann", "Bo"]);
}

#[test]
fn drop_index_waiting_at_low_priority() {
    let drop = parse_drop_index(
        "DROP INDEX ix ON schema.t WITH (ONLINE = ON (WAIT_AT_LOW_PRIORITY \
         (MAX_DURATION = 5 MINUTES, ABORT_AFTER_WAIT = BLOCKERS)))",
    );
    assert!(!drop.if_exists);
    let [clause] = drop.clauses.as_slice() else {
        panic!("expected one clause");
    };
    assert_eq!(clause.index.value, "ix");
    let object = clause.object.as_ref().unwrap();
    assert_eq!(object.schema_name(), Some("schema"));
    assert_eq!(object.base_name(), "t");
    let [IndexOption::Online {
        state: OptionState::On,
        low_priority: Some(wait),
    }] = clause.options.as_slice()
    else {
        panic!("expected ONLINE = ON with a low-priority wait, got {:?}", clause.options);
    };
    assert_eq!(
        wait.as_slice(),
        [
            LowPriorityLockWaitOption::MaxDuration {
                value: ScalarExpression::integer("5"),
                unit: Some(Unit::Minutes),
            },
            LowPriorityLockWaitOption::AbortAfterWait(AbortAfterWait::Blockers),
        ]
    );
}

#[test]
fn update_with_compound_assignment() {
    let update = parse_update("UPDATE t SET @v = col = col + 1 WHERE id = 7");
    assert_eq!(update.target.as_named().unwrap().name.base_name(), "t");
    let [SetClause::Assignment(clause)] = update.set_clauses.as_slice() else {
        panic!("expected one assignment");
    };
    assert_eq!(clause.variable.as_deref(), Some("@v"));
    assert_eq!(
        clause.column.as_ref().map(ColumnReference::column_name),
        Some("col")
    );
    let Some(ScalarExpression::Binary { op, left, right }) = &clause.new_value else {
        panic!("expected col + 1");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert!(matches!(**left, ScalarExpression::ColumnReference(_)));
    assert_eq!(**right, ScalarExpression::integer("1"));

    let Some(BooleanExpression::Comparison { op, right, .. }) =
        update.where_clause.and_then(|w| w.search_condition)
    else {
        panic!("expected id = 7");
    };
    assert_eq!(op, ComparisonOperator::Equals);
    assert_eq!(right, ScalarExpression::integer("7"));
}

#[test]
fn alter_table_add_foreign_key() {
    let add = parse_alter_table_add(
        "ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a,b) REFERENCES u(x,y) \
         ON DELETE CASCADE NOT FOR REPLICATION",
    );
    assert_eq!(add.name.base_name(), "t");
    assert!(add.columns.is_empty());
    let [constraint] = add.constraints.as_slice() else {
        panic!("expected one constraint");
    };
    assert_eq!(constraint.name.as_ref().map(|n| n.value.as_str()), Some("fk"));
    let ConstraintKind::ForeignKey(fk) = &constraint.kind else {
        panic!("expected a foreign key, got {}", constraint.kind.as_str());
    };
    let columns: Vec<_> = fk.columns.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(columns, ["a", "b"]);
    assert_eq!(fk.referenced_table.base_name(), "u");
    let referenced: Vec<_> = fk.referenced_columns.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(referenced, ["x", "y"]);
    assert_eq!(fk.delete_action, ForeignKeyAction::Cascade);
    assert_eq!(fk.update_action, ForeignKeyAction::NotSpecified);
    assert!(fk.not_for_replication);
}
