//! The `DROP` family.

use tracing::trace;

use super::cursor::Parser;
use super::error::PResult;
use super::objects::is_nameless_kind;
use super::options::{GENERIC_OPTIONS, INDEX_OPTIONS};
use crate::ast::{
    DropIndexClause, DropIndexStatement, DropObjectsStatement, DropTriggerStatement, OptionBag,
    Statement, TriggerTarget,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `DROP kind [IF EXISTS] name, ... [clauses]`, plus the dedicated forms
    /// for indexes, triggers, signatures and sensitivity classifications.
    pub(crate) fn parse_drop_statement(&mut self) -> Option<Statement> {
        if self.peek_is_word("SIGNATURE") || self.peek_is_word("COUNTER") {
            return Some(Statement::DropSignature(self.lenient(Self::fill_signature)));
        }
        if self.peek_is_word("SENSITIVITY") {
            return Some(Statement::DropSensitivityClassification(
                self.lenient(Self::fill_sensitivity_classification),
            ));
        }
        self.advance();
        let kind = self.parse_object_kind()?;
        trace!(kind, "drop statement");
        let statement = match kind {
            "Index" => Statement::DropIndex(self.lenient(Self::fill_drop_index)),
            "Trigger" => Statement::DropTrigger(self.lenient(Self::fill_drop_trigger)),
            _ => {
                let wrap = drop_variant(kind)?;
                let named = !is_nameless_kind(kind) && kind != "DatabaseEncryptionKey";
                let on_table = kind == "FullTextIndex";
                wrap(self.lenient(|p, stmt: &mut DropObjectsStatement| {
                    p.fill_drop_objects(stmt, named, on_table)
                }))
            }
        };
        Some(statement)
    }

    /// `IF EXISTS`, if present.
    pub(crate) fn eat_if_exists(&mut self) -> PResult<bool> {
        if self.check_keyword(Keyword::If) && self.peek_keyword(Keyword::Exists) {
            self.advance();
            self.advance();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `[IF EXISTS] name, ... [clauses]`. `DROP FULLTEXT INDEX` names its
    /// table after `ON`.
    fn fill_drop_objects(
        &mut self,
        stmt: &mut DropObjectsStatement,
        named: bool,
        on_table: bool,
    ) -> PResult<()> {
        stmt.if_exists = self.eat_if_exists()?;
        if on_table {
            self.expect_keyword(Keyword::On)?;
        }
        if named {
            stmt.objects = self.parse_schema_object_names()?;
        }
        self.parse_drop_clauses(&mut stmt.options)
    }

    /// Trailing clauses such as `WITH NO_DEPENDENTS`, `ON SERVER` or
    /// `REMOVE PROVIDER KEY`, kept as named options.
    fn parse_drop_clauses(&mut self, options: &mut OptionBag) -> PResult<()> {
        while !self.at_statement_end() {
            if self.eat(TokenKind::Comma) || self.eat_keyword(Keyword::With) {
                continue;
            }
            if self.check(TokenKind::LeftParen) {
                options.extend(self.parse_option_list(&GENERIC_OPTIONS)?);
            } else {
                options.push(self.parse_object_clause()?);
            }
        }
        Ok(())
    }

    /// Each clause is `index ON object [WITH (...)]` or the legacy
    /// `object.index`. A clause is kept once its index name is read.
    fn fill_drop_index(&mut self, stmt: &mut DropIndexStatement) -> PResult<()> {
        stmt.if_exists = self.eat_if_exists()?;
        loop {
            self.parse_drop_index_clause(&mut stmt.clauses)?;
            if !self.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_drop_index_clause(&mut self, clauses: &mut Vec<DropIndexClause>) -> PResult<()> {
        let start = self.current().clone();
        let mut parts = self.parse_name_parts()?.parts;
        let index = parts.pop().unwrap_or_default();
        let object = (!parts.is_empty()).then(|| self.schema_object_name(parts, &start));
        clauses.push(DropIndexClause {
            index,
            object,
            options: Vec::new(),
        });
        if !self.eat_keyword(Keyword::On) {
            return Ok(());
        }
        let object = self.parse_schema_object_name()?;
        if let Some(clause) = clauses.last_mut() {
            clause.object = Some(object);
        }
        let options = self.parse_with_option_list(&INDEX_OPTIONS)?;
        if let Some(clause) = clauses.last_mut() {
            clause.options = options;
        }
        Ok(())
    }

    /// `[IF EXISTS] name, ... [ON DATABASE | ON ALL SERVER]`
    fn fill_drop_trigger(&mut self, stmt: &mut DropTriggerStatement) -> PResult<()> {
        stmt.if_exists = self.eat_if_exists()?;
        stmt.objects = self.parse_schema_object_names()?;
        if self.eat_keyword(Keyword::On) {
            stmt.scope = Some(if self.eat_keyword(Keyword::Database) {
                TriggerTarget::Database
            } else {
                self.expect_keyword(Keyword::All)?;
                self.expect_word("SERVER")?;
                TriggerTarget::AllServer
            });
        }
        Ok(())
    }
}

/// The statement variant for a kind that drops through [`DropObjectsStatement`].
fn drop_variant(kind: &str) -> Option<fn(DropObjectsStatement) -> Statement> {
    let wrap: fn(DropObjectsStatement) -> Statement = match kind {
        "Table" => Statement::DropTable,
        "View" => Statement::DropView,
        "Procedure" => Statement::DropProcedure,
        "Function" => Statement::DropFunction,
        "Sequence" => Statement::DropSequence,
        "Type" => Statement::DropType,
        "Schema" => Statement::DropSchema,
        "Synonym" => Statement::DropSynonym,
        "Default" => Statement::DropDefault,
        "Rule" => Statement::DropRule,
        "Database" => Statement::DropDatabase,
        "User" => Statement::DropUser,
        "Role" => Statement::DropRole,
        "ServerRole" => Statement::DropServerRole,
        "ApplicationRole" => Statement::DropApplicationRole,
        "Login" => Statement::DropLogin,
        "Assembly" => Statement::DropAssembly,
        "Certificate" => Statement::DropCertificate,
        "SymmetricKey" => Statement::DropSymmetricKey,
        "AsymmetricKey" => Statement::DropAsymmetricKey,
        "MasterKey" => Statement::DropMasterKey,
        "Credential" => Statement::DropCredential,
        "DatabaseScopedCredential" => Statement::DropDatabaseScopedCredential,
        "Queue" => Statement::DropQueue,
        "Service" => Statement::DropService,
        "Contract" => Statement::DropContract,
        "MessageType" => Statement::DropMessageType,
        "Route" => Statement::DropRoute,
        "RemoteServiceBinding" => Statement::DropRemoteServiceBinding,
        "BrokerPriority" => Statement::DropBrokerPriority,
        "Endpoint" => Statement::DropEndpoint,
        "EventNotification" => Statement::DropEventNotification,
        "FullTextCatalog" => Statement::DropFullTextCatalog,
        "FullTextIndex" => Statement::DropFullTextIndex,
        "FullTextStopList" => Statement::DropFullTextStopList,
        "SearchPropertyList" => Statement::DropSearchPropertyList,
        "WorkloadGroup" => Statement::DropWorkloadGroup,
        "WorkloadClassifier" => Statement::DropWorkloadClassifier,
        "ResourcePool" => Statement::DropResourcePool,
        "ExternalDataSource" => Statement::DropExternalDataSource,
        "ExternalFileFormat" => Statement::DropExternalFileFormat,
        "ExternalTable" => Statement::DropExternalTable,
        "ExternalLanguage" => Statement::DropExternalLanguage,
        "ExternalLibrary" => Statement::DropExternalLibrary,
        "ExternalResourcePool" => Statement::DropExternalResourcePool,
        "ExternalModel" => Statement::DropExternalModel,
        "XmlSchemaCollection" => Statement::DropXmlSchemaCollection,
        "PartitionFunction" => Statement::DropPartitionFunction,
        "PartitionScheme" => Statement::DropPartitionScheme,
        "AvailabilityGroup" => Statement::DropAvailabilityGroup,
        "ServerAudit" => Statement::DropServerAudit,
        "ServerAuditSpecification" => Statement::DropServerAuditSpecification,
        "DatabaseAuditSpecification" => Statement::DropDatabaseAuditSpecification,
        "DatabaseEncryptionKey" => Statement::DropDatabaseEncryptionKey,
        "SecurityPolicy" => Statement::DropSecurityPolicy,
        "ColumnEncryptionKey" => Statement::DropColumnEncryptionKey,
        "ColumnMasterKey" => Statement::DropColumnMasterKey,
        "EventSession" => Statement::DropEventSession,
        "Statistics" => Statement::DropStatistics,
        "Aggregate" => Statement::DropAggregate,
        _ => return None,
    };
    Some(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AbortAfterWait, IndexOption, LowPriorityLockWaitOption, OptionState, SchemaObjectName, Unit,
    };
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (Vec<Statement>, usize) {
        let mut p = Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default());
        let statements = p.parse_script();
        (statements, p.diagnostics().len())
    }

    fn single(sql: &str) -> Statement {
        let (mut statements, errors) = parse(sql);
        assert_eq!(errors, 0, "{sql}");
        assert_eq!(statements.len(), 1, "{sql}");
        statements.remove(0)
    }

    #[test]
    fn drop_table_list() {
        let Statement::DropTable(drop) = single("DROP TABLE IF EXISTS a, b, c;") else {
            panic!("expected DropTable");
        };
        assert!(drop.if_exists);
        let names: Vec<_> = drop.objects.iter().map(SchemaObjectName::base_name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn drop_index_with_low_priority_wait() {
        let Statement::DropIndex(drop) = single(
            "DROP INDEX ix ON schema.t WITH (ONLINE = ON (WAIT_AT_LOW_PRIORITY \
             (MAX_DURATION = 5 MINUTES, ABORT_AFTER_WAIT = BLOCKERS)))",
        ) else {
            panic!("expected DropIndex");
        };
        assert_eq!(drop.clauses.len(), 1);
        let clause = &drop.clauses[0];
        assert_eq!(clause.index.value, "ix");
        let object = clause.object.as_ref().unwrap();
        assert_eq!(object.schema.as_ref().unwrap().value, "schema");
        assert_eq!(object.base_name(), "t");
        let IndexOption::Online {
            state,
            low_priority: Some(wait),
        } = &clause.options[0]
        else {
            panic!("expected ONLINE with a low-priority wait");
        };
        assert_eq!(*state, OptionState::On);
        assert!(matches!(
            wait[0],
            LowPriorityLockWaitOption::MaxDuration {
                unit: Some(Unit::Minutes),
                ..
            }
        ));
        assert_eq!(
            wait[1],
            LowPriorityLockWaitOption::AbortAfterWait(AbortAfterWait::Blockers)
        );
    }

    #[test]
    fn legacy_drop_index() {
        let Statement::DropIndex(drop) = single("DROP INDEX dbo.orders.ix_date, ix_b ON t") else {
            panic!("expected DropIndex");
        };
        assert_eq!(drop.clauses[0].index.value, "ix_date");
        assert_eq!(drop.clauses[0].object.as_ref().unwrap().count, 2);
        assert_eq!(drop.clauses[1].object.as_ref().unwrap().base_name(), "t");
    }

    #[test]
    fn drop_index_keeps_a_clause_with_a_broken_tail() {
        let (statements, errors) = parse("DROP INDEX ix_a ON dbo.t WITH (ONLINE = ; SELECT 1");
        assert_eq!(errors, 1);
        let Statement::DropIndex(drop) = &statements[0] else {
            panic!("expected DropIndex");
        };
        assert_eq!(drop.clauses.len(), 1);
        assert_eq!(drop.clauses[0].index.value, "ix_a");
        assert_eq!(drop.clauses[0].object.as_ref().unwrap().base_name(), "t");
        assert!(matches!(statements[1], Statement::Select(_)));
    }

    #[test]
    fn five_part_name_is_reported() {
        let (statements, errors) = parse("DROP TABLE a.b.c.d.e");
        assert_eq!(errors, 1);
        let Statement::DropTable(drop) = &statements[0] else {
            panic!("expected DropTable");
        };
        assert_eq!(drop.objects[0].count, 4);
        assert_eq!(drop.objects[0].server.as_ref().unwrap().value, "b");
    }

    #[test]
    fn drop_trigger_scopes() {
        let Statement::DropTrigger(drop) = single("DROP TRIGGER IF EXISTS audit_ddl ON DATABASE")
        else {
            panic!("expected DropTrigger");
        };
        assert!(drop.if_exists);
        assert_eq!(drop.scope, Some(TriggerTarget::Database));

        let Statement::DropTrigger(drop) = single("DROP TRIGGER logon_limit ON ALL SERVER") else {
            panic!("expected DropTrigger");
        };
        assert_eq!(drop.scope, Some(TriggerTarget::AllServer));
    }

    #[test]
    fn multi_word_kinds_and_clauses() {
        let (statements, errors) = parse(
            "DROP EXTERNAL DATA SOURCE lake;\
             DROP FULLTEXT INDEX ON dbo.docs;\
             DROP SERVER AUDIT SPECIFICATION spec;\
             DROP DATABASE SCOPED CREDENTIAL cred;\
             DROP MASTER KEY;\
             DROP EVENT SESSION trace_all ON SERVER;\
             DROP ASSEMBLY util WITH NO_DEPENDENTS;\
             DROP PARTITION SCHEME ps",
        );
        assert_eq!(errors, 0);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(
            tags,
            [
                "DropExternalDataSource",
                "DropFullTextIndex",
                "DropServerAuditSpecification",
                "DropDatabaseScopedCredential",
                "DropMasterKey",
                "DropEventSession",
                "DropAssembly",
                "DropPartitionScheme",
            ]
        );
        let Statement::DropAssembly(assembly) = &statements[6] else {
            unreachable!()
        };
        assert_eq!(assembly.options[0].option_kind, "NoDependents");
        let Statement::DropMasterKey(key) = &statements[4] else {
            unreachable!()
        };
        assert!(key.objects.is_empty());
    }

    #[test]
    fn signatures_and_classifications() {
        let (statements, errors) = parse(
            "DROP COUNTER SIGNATURE FROM dbo.p BY CERTIFICATE signer;\
             DROP SENSITIVITY CLASSIFICATION FROM dbo.people.ssn, dbo.people.email",
        );
        assert_eq!(errors, 0);
        let Statement::DropSignature(signature) = &statements[0] else {
            panic!("expected DropSignature");
        };
        assert!(signature.counter);
        let Statement::DropSensitivityClassification(classification) = &statements[1] else {
            panic!("expected DropSensitivityClassification");
        };
        assert_eq!(classification.columns.len(), 2);
    }

    #[test]
    fn unknown_kind_is_reported() {
        let (statements, errors) = parse("DROP WIDGET w; DROP VIEW v");
        assert_eq!(errors, 1);
        assert_eq!(statements.len(), 1);
    }
}
