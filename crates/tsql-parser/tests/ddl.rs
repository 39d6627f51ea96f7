mod common;

use common::*;
use tsql_parser::ast::{Statement, StatementFamily};

const DEPLOYMENT: &str = r"
CREATE SCHEMA sales AUTHORIZATION dbo
GO
CREATE PARTITION FUNCTION pf_year (DATE) AS RANGE RIGHT FOR VALUES ('2023-01-01', '2024-01-01');
CREATE PARTITION SCHEME ps_year AS PARTITION pf_year ALL TO ([PRIMARY]);
CREATE SEQUENCE sales.order_no AS BIGINT START WITH 1000 INCREMENT BY 1 CACHE 50;
CREATE TABLE sales.orders (
    id BIGINT NOT NULL CONSTRAINT pk_orders PRIMARY KEY CLUSTERED,
    customer_id INT NOT NULL,
    placed_at DATE NOT NULL DEFAULT (GETDATE()),
    total DECIMAL(18, 2) NULL,
    status TINYINT NOT NULL
);
CREATE UNIQUE NONCLUSTERED INDEX ix_orders ON sales.orders (customer_id, placed_at DESC)
    INCLUDE (total) WHERE status = 1 WITH (FILLFACTOR = 80, ONLINE = ON);
ALTER TABLE sales.orders ADD CONSTRAINT ck_total CHECK (total >= 0);
ALTER TABLE sales.orders ALTER COLUMN total DECIMAL(19, 4) NULL;
ALTER TABLE sales.orders REBUILD PARTITION = ALL WITH (DATA_COMPRESSION = PAGE);
CREATE SYNONYM dbo.orders FOR sales.orders;
GO
CREATE OR ALTER PROCEDURE sales.usp_place @customer INT, @total DECIMAL(18, 2)
AS
    INSERT INTO sales.orders (id, customer_id, placed_at, total, status)
    VALUES (NEXT VALUE FOR sales.order_no, @customer, GETDATE(), @total, 1);
GO
CREATE TRIGGER ddl_guard ON DATABASE FOR DROP_TABLE, ALTER_TABLE AS ROLLBACK
GO
GRANT EXECUTE ON SCHEMA::sales TO app_role;
ALTER DATABASE CURRENT SET RECOVERY SIMPLE, AUTO_UPDATE_STATISTICS_ASYNC ON;
ALTER DATABASE SCOPED CONFIGURATION SET LEGACY_CARDINALITY_ESTIMATION = ON;
DROP SYNONYM IF EXISTS dbo.orders;
DROP INDEX IF EXISTS ix_orders ON sales.orders;
DROP TABLE IF EXISTS sales.orders_staging, sales.orders_archive;
";

#[test]
fn deployment_script_parses_cleanly() {
    let statements = parse_all(DEPLOYMENT);
    assert_eq!(
        tags(&statements),
        [
            "CreateSchema",
            "CreatePartitionFunction",
            "CreatePartitionScheme",
            "CreateSequence",
            "CreateTable",
            "CreateIndex",
            "AlterTableAdd",
            "AlterTableAlterColumn",
            "AlterTableRebuild",
            "CreateSynonym",
            "CreateProcedure",
            "CreateTrigger",
            "Grant",
            "AlterDatabaseSet",
            "AlterDatabaseScopedConfigurationSet",
            "DropSynonym",
            "DropIndex",
            "DropTable",
        ]
    );
}

#[test]
fn deployment_script_families() {
    let statements = parse_all(DEPLOYMENT);
    let count = |family| statements.iter().filter(|s| s.family() == family).count();
    assert_eq!(count(StatementFamily::Create), 9);
    assert_eq!(count(StatementFamily::Alter), 5);
    assert_eq!(count(StatementFamily::Drop), 3);
    assert_eq!(count(StatementFamily::Security), 1);
}

#[test]
fn procedure_body_stops_at_the_batch_separator() {
    let statements = parse_all(DEPLOYMENT);
    let Some(Statement::CreateProcedure(proc)) = statements
        .iter()
        .find(|s| matches!(s, Statement::CreateProcedure(_)))
    else {
        panic!("expected a procedure");
    };
    assert!(proc.or_alter);
    assert_eq!(proc.name.schema_name(), Some("sales"));
    assert_eq!(proc.parameters.len(), 2);
    assert_eq!(tags(&proc.body), ["Insert"]);
}

#[test]
fn table_columns_survive_the_script() {
    let statements = parse_all(DEPLOYMENT);
    let Some(Statement::CreateTable(table)) = statements
        .iter()
        .find(|s| matches!(s, Statement::CreateTable(_)))
    else {
        panic!("expected a table");
    };
    let names: Vec<_> = table
        .definition
        .columns
        .iter()
        .map(|c| c.name.value.as_str())
        .collect();
    assert_eq!(names, ["id", "customer_id", "placed_at", "total", "status"]);
}

#[test]
fn maintenance_and_data_movement() {
    let statements = parse_all(
        "BACKUP DATABASE sales TO DISK = 'd:\\sales.bak' WITH COMPRESSION;\n\
         BULK INSERT dbo.t FROM 'c:\\data.csv' WITH (FIELDTERMINATOR = ',', FIRSTROW = 2);\n\
         TRUNCATE TABLE dbo.t;\n\
         MERGE INTO dbo.target AS t USING dbo.src AS s ON t.id = s.id \
         WHEN MATCHED THEN UPDATE SET t.v = s.v \
         WHEN NOT MATCHED THEN INSERT (id, v) VALUES (s.id, s.v);\n\
         EXEC dbo.report @day = '2024-01-01';\n\
         CHECKPOINT;\n\
         RECONFIGURE WITH OVERRIDE",
    );
    assert_eq!(
        tags(&statements),
        [
            "Backup",
            "BulkInsert",
            "TruncateTable",
            "Merge",
            "Execute",
            "Checkpoint",
            "Reconfigure",
        ]
    );
}

#[test]
fn principals_and_permissions() {
    let statements = parse_all(
        "CREATE LOGIN app_login WITH PASSWORD = 'secret';\n\
         CREATE USER app_reader FOR LOGIN app_login WITH DEFAULT_SCHEMA = sales;\n\
         CREATE ROLE auditors AUTHORIZATION dbo;\n\
         ALTER ROLE auditors ADD MEMBER app_reader;\n\
         DENY DELETE ON sales.orders TO auditors;\n\
         REVOKE EXECUTE ON OBJECT::sales.usp_place FROM app_role;\n\
         DROP USER IF EXISTS app_reader;\n\
         DROP LOGIN app_login",
    );
    assert_eq!(
        tags(&statements),
        [
            "CreateLogin",
            "CreateUser",
            "CreateRole",
            "AlterRole",
            "Deny",
            "Revoke",
            "DropUser",
            "DropLogin",
        ]
    );
}
