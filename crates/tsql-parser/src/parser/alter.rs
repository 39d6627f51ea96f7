//! The `ALTER` family. Tables and databases have their own modules; this
//! one dispatches on the object kind and reads the small bodies.

use tracing::trace;

use super::cursor::Parser;
use super::error::PResult;
use super::objects::is_nameless_kind;
use crate::ast::{
    AlterPartitionFunctionStatement, AlterPartitionSchemeStatement, ObjectStatement, Statement,
    XmlSchemaCollectionStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `ALTER kind ...`. Returns `None` for kinds that cannot be altered.
    pub(crate) fn parse_alter_statement(&mut self) -> Option<Statement> {
        self.advance();
        let kind = self.parse_object_kind()?;
        trace!(kind, "alter statement");
        let statement = match kind {
            "Table" => self.parse_alter_table_statement(),
            "Database" => self.parse_alter_database_statement(),
            "Procedure" | "Function" | "Trigger" | "View" => {
                return self.parse_routine(kind, false, true);
            }
            "Index" => Statement::AlterIndex(self.lenient(Self::fill_alter_index)),
            "Sequence" => Statement::AlterSequence(self.lenient(Self::fill_sequence)),
            "Schema" => Statement::AlterSchema(self.lenient(Self::fill_alter_schema)),
            "Role" => Statement::AlterRole(self.lenient(Self::fill_alter_role)),
            "ServerRole" => Statement::AlterServerRole(self.lenient(Self::fill_alter_role)),
            "User" => Statement::AlterUser(self.lenient(Self::fill_alter_user)),
            "Login" => Statement::AlterLogin(self.lenient(Self::fill_alter_login)),
            "Authorization" => {
                Statement::AlterAuthorization(self.lenient(Self::fill_alter_authorization))
            }
            "DatabaseEncryptionKey" => Statement::AlterDatabaseEncryptionKey(
                self.lenient(Self::fill_database_encryption_key),
            ),
            "PartitionFunction" => Statement::AlterPartitionFunction(
                self.lenient(Self::fill_alter_partition_function),
            ),
            "PartitionScheme" => {
                Statement::AlterPartitionScheme(self.lenient(Self::fill_alter_partition_scheme))
            }
            "MessageType" => Statement::AlterMessageType(self.lenient(Self::fill_message_type)),
            "Service" => Statement::AlterService(self.lenient(Self::fill_service)),
            "SecurityPolicy" => {
                Statement::AlterSecurityPolicy(self.lenient(Self::fill_security_policy))
            }
            "XmlSchemaCollection" => Statement::AlterXmlSchemaCollection(
                self.lenient(|p, s: &mut XmlSchemaCollectionStatement| {
                    p.fill_xml_schema_collection(s, Keyword::Add)
                }),
            ),
            _ => return self.parse_alter_object(kind),
        };
        Some(statement)
    }

    /// Long-tail kinds that share [`ObjectStatement`]. `ALTER FULLTEXT INDEX`
    /// names its table after `ON`.
    fn parse_alter_object(&mut self, kind: &'static str) -> Option<Statement> {
        let wrap: fn(ObjectStatement) -> Statement = match kind {
            "DatabaseScopedCredential" => Statement::AlterDatabaseScopedCredential,
            "DatabaseAuditSpecification" => Statement::AlterDatabaseAuditSpecification,
            "ServerConfiguration" => Statement::AlterServerConfiguration,
            "ResourceGovernor" => Statement::AlterResourceGovernor,
            "ApplicationRole" => Statement::AlterApplicationRole,
            "Assembly" => Statement::AlterAssembly,
            "Certificate" => Statement::AlterCertificate,
            "SymmetricKey" => Statement::AlterSymmetricKey,
            "AsymmetricKey" => Statement::AlterAsymmetricKey,
            "MasterKey" => Statement::AlterMasterKey,
            "ServiceMasterKey" => Statement::AlterServiceMasterKey,
            "Credential" => Statement::AlterCredential,
            "Queue" => Statement::AlterQueue,
            "Route" => Statement::AlterRoute,
            "RemoteServiceBinding" => Statement::AlterRemoteServiceBinding,
            "BrokerPriority" => Statement::AlterBrokerPriority,
            "Endpoint" => Statement::AlterEndpoint,
            "FullTextCatalog" => Statement::AlterFullTextCatalog,
            "FullTextIndex" => Statement::AlterFullTextIndex,
            "FullTextStopList" => Statement::AlterFullTextStopList,
            "SearchPropertyList" => Statement::AlterSearchPropertyList,
            "WorkloadGroup" => Statement::AlterWorkloadGroup,
            "ResourcePool" => Statement::AlterResourcePool,
            "ExternalDataSource" => Statement::AlterExternalDataSource,
            "ExternalLanguage" => Statement::AlterExternalLanguage,
            "ExternalLibrary" => Statement::AlterExternalLibrary,
            "ExternalResourcePool" => Statement::AlterExternalResourcePool,
            "AvailabilityGroup" => Statement::AlterAvailabilityGroup,
            "ServerAudit" => Statement::AlterServerAudit,
            "ServerAuditSpecification" => Statement::AlterServerAuditSpecification,
            "ColumnEncryptionKey" => Statement::AlterColumnEncryptionKey,
            "EventSession" => Statement::AlterEventSession,
            _ => return None,
        };
        let named = !is_nameless_kind(kind);
        let on_table = kind == "FullTextIndex";
        Some(wrap(self.lenient(|p, stmt: &mut ObjectStatement| {
            if on_table {
                p.expect_keyword(Keyword::On)?;
            }
            p.fill_object(stmt, named)
        })))
    }

    /// After `PARTITION FUNCTION`: `name () {SPLIT | MERGE} RANGE (value)`
    fn fill_alter_partition_function(
        &mut self,
        stmt: &mut AlterPartitionFunctionStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect(TokenKind::LeftParen)?;
        self.expect(TokenKind::RightParen)?;
        stmt.split = if self.eat_word("SPLIT") {
            true
        } else {
            self.expect_word("MERGE")?;
            false
        };
        self.expect_word("RANGE")?;
        stmt.boundary = Some(self.parenthesized(Self::parse_scalar_expression)?);
        Ok(())
    }

    /// After `PARTITION SCHEME`: `name NEXT USED [filegroup]`
    fn fill_alter_partition_scheme(
        &mut self,
        stmt: &mut AlterPartitionSchemeStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_word("NEXT")?;
        self.expect_word("USED")?;
        if !self.at_statement_end() {
            stmt.next_used = Some(self.expect_identifier()?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AlterRoleAction, Identifier, ScalarExpression};
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
    fn dispatches_by_kind() {
        let (statements, errors) = parse(
            "ALTER TABLE t SET (LOCK_ESCALATION = AUTO);\
             ALTER DATABASE SCOPED CONFIGURATION SET MAXDOP = 4;\
             ALTER VIEW v AS SELECT 1 AS one;\
             ALTER INDEX ALL ON dbo.t REBUILD;\
             ALTER SEQUENCE s RESTART WITH 10;\
             ALTER SCHEMA sales TRANSFER dbo.orders;\
             ALTER SERVER ROLE ops ADD MEMBER alice;\
             ALTER LOGIN bob DISABLE;\
             ALTER AUTHORIZATION ON SCHEMA::sales TO dbo;\
             ALTER DATABASE ENCRYPTION KEY REGENERATE WITH ALGORITHM = AES_256",
        );
        assert_eq!(errors, 0);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(
            tags,
            [
                "AlterTableSet",
                "AlterDatabaseScopedConfigurationSet",
                "AlterView",
                "AlterIndex",
                "AlterSequence",
                "AlterSchema",
                "AlterServerRole",
                "AlterLogin",
                "AlterAuthorization",
                "AlterDatabaseEncryptionKey",
            ]
        );
        let Statement::AlterServerRole(role) = &statements[6] else {
            unreachable!()
        };
        assert_eq!(
            role.action,
            Some(AlterRoleAction::AddMember(Identifier::new("alice")))
        );
    }

    #[test]
    fn partition_function_and_scheme() {
        let Statement::AlterPartitionFunction(function) =
            single("ALTER PARTITION FUNCTION pf_date() SPLIT RANGE (100)")
        else {
            panic!("expected AlterPartitionFunction");
        };
        assert!(function.split);
        assert_eq!(function.boundary, Some(ScalarExpression::integer("100")));

        let Statement::AlterPartitionScheme(scheme) =
            single("ALTER PARTITION SCHEME ps_date NEXT USED fg_2024")
        else {
            panic!("expected AlterPartitionScheme");
        };
        assert_eq!(scheme.next_used.unwrap().value, "fg_2024");

        let Statement::AlterPartitionScheme(scheme) = single("ALTER PARTITION SCHEME ps NEXT USED")
        else {
            panic!("expected AlterPartitionScheme");
        };
        assert!(scheme.next_used.is_none());
    }

    #[test]
    fn object_kinds_keep_their_clauses() {
        let Statement::AlterMasterKey(key) =
            single("ALTER MASTER KEY REGENERATE WITH ENCRYPTION BY PASSWORD = 'x'")
        else {
            panic!("expected AlterMasterKey");
        };
        assert!(key.name.is_empty());
        assert!(!key.options.is_empty());

        let Statement::AlterFullTextIndex(index) = single("ALTER FULLTEXT INDEX ON dbo.docs ENABLE")
        else {
            panic!("expected AlterFullTextIndex");
        };
        assert_eq!(index.name.base_name(), "docs");
    }

    #[test]
    fn xml_schema_collection_adds() {
        let Statement::AlterXmlSchemaCollection(collection) =
            single("ALTER XML SCHEMA COLLECTION dbo.orders ADD N'<xsd:schema/>'")
        else {
            panic!("expected AlterXmlSchemaCollection");
        };
        assert_eq!(collection.name.base_name(), "orders");
    }

    #[test]
    fn unalterable_kind_is_reported() {
        let (statements, errors) = parse("ALTER SYNONYM s; SELECT 1");
        assert_eq!(errors, 1);
        assert_eq!(statements.len(), 1);
    }
}
