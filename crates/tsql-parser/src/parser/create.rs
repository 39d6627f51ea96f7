//! The `CREATE` family: dispatch on the object kind, plus the bodies of
//! tables, sequences, types, schemas, synonyms, partitions, defaults and
//! rules.

use tracing::trace;

use super::cursor::Parser;
use super::error::PResult;
use super::objects::is_nameless_kind;
use super::options::TABLE_OPTIONS;
use crate::ast::{
    CreateDefaultStatement, CreatePartitionFunctionStatement, CreatePartitionSchemeStatement,
    CreateRuleStatement, CreateSchemaStatement, CreateSynonymStatement, CreateTableStatement,
    CreateTypeStatement, ObjectStatement, PartitionRangeKind, SelectStatement, SequenceOption,
    SequenceStatement, Statement, TypeDefinition, XmlSchemaCollectionStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `CREATE [OR ALTER] kind ...`. Returns `None` for kinds that have no
    /// statement record; the caller reports and skips those.
    pub(crate) fn parse_create_statement(&mut self) -> Option<Statement> {
        self.advance();
        let or_alter = self.check_keyword(Keyword::Or) && self.peek_keyword(Keyword::Alter);
        if or_alter {
            self.advance();
            self.advance();
        }
        if self.at_index_prefix() {
            return Some(self.parse_create_index_statement());
        }
        let kind = self.parse_object_kind()?;
        trace!(kind, or_alter, "create statement");
        let statement = match kind {
            "Procedure" | "Function" | "Trigger" | "View" => {
                return self.parse_routine(kind, or_alter, false);
            }
            "Table" => Statement::CreateTable(self.lenient(Self::fill_create_table)),
            "Aggregate" => Statement::CreateAggregate(self.lenient(Self::fill_create_aggregate)),
            "Statistics" => Statement::CreateStatistics(self.lenient(Self::fill_create_statistics)),
            "Sequence" => Statement::CreateSequence(self.lenient(Self::fill_sequence)),
            "Type" => Statement::CreateType(self.lenient(Self::fill_create_type)),
            "Schema" => Statement::CreateSchema(self.lenient(Self::fill_create_schema)),
            "Synonym" => Statement::CreateSynonym(self.lenient(Self::fill_create_synonym)),
            "Default" => Statement::CreateDefault(self.lenient(Self::fill_create_default)),
            "Rule" => Statement::CreateRule(self.lenient(Self::fill_create_rule)),
            "XmlSchemaCollection" => Statement::CreateXmlSchemaCollection(
                self.lenient(|p, s: &mut XmlSchemaCollectionStatement| {
                    p.fill_xml_schema_collection(s, Keyword::As)
                }),
            ),
            "PartitionFunction" => Statement::CreatePartitionFunction(
                self.lenient(Self::fill_create_partition_function),
            ),
            "PartitionScheme" => {
                Statement::CreatePartitionScheme(self.lenient(Self::fill_create_partition_scheme))
            }
            "Database" => Statement::CreateDatabase(self.lenient(Self::fill_create_database)),
            "DatabaseEncryptionKey" => Statement::CreateDatabaseEncryptionKey(
                self.lenient(Self::fill_database_encryption_key),
            ),
            "User" => Statement::CreateUser(self.lenient(Self::fill_create_user)),
            "Login" => Statement::CreateLogin(self.lenient(Self::fill_create_login)),
            "Role" => Statement::CreateRole(self.lenient(Self::fill_create_role)),
            "ServerRole" => Statement::CreateServerRole(self.lenient(Self::fill_create_role)),
            "Service" => Statement::CreateService(self.lenient(Self::fill_service)),
            "Contract" => Statement::CreateContract(self.lenient(Self::fill_contract)),
            "MessageType" => Statement::CreateMessageType(self.lenient(Self::fill_message_type)),
            "EventNotification" => {
                Statement::CreateEventNotification(self.lenient(Self::fill_event_notification))
            }
            "SecurityPolicy" => {
                Statement::CreateSecurityPolicy(self.lenient(Self::fill_security_policy))
            }
            "FullTextIndex" => {
                Statement::CreateFullTextIndex(self.lenient(Self::fill_create_fulltext_index))
            }
            _ => return self.parse_create_object(kind),
        };
        Some(statement)
    }

    /// Long-tail kinds that share [`ObjectStatement`].
    fn parse_create_object(&mut self, kind: &'static str) -> Option<Statement> {
        let wrap: fn(ObjectStatement) -> Statement = match kind {
            "ApplicationRole" => Statement::CreateApplicationRole,
            "Assembly" => Statement::CreateAssembly,
            "Certificate" => Statement::CreateCertificate,
            "SymmetricKey" => Statement::CreateSymmetricKey,
            "AsymmetricKey" => Statement::CreateAsymmetricKey,
            "MasterKey" => Statement::CreateMasterKey,
            "Credential" => Statement::CreateCredential,
            "DatabaseScopedCredential" => Statement::CreateDatabaseScopedCredential,
            "Queue" => Statement::CreateQueue,
            "Route" => Statement::CreateRoute,
            "RemoteServiceBinding" => Statement::CreateRemoteServiceBinding,
            "BrokerPriority" => Statement::CreateBrokerPriority,
            "Endpoint" => Statement::CreateEndpoint,
            "FullTextCatalog" => Statement::CreateFullTextCatalog,
            "FullTextStopList" => Statement::CreateFullTextStopList,
            "SearchPropertyList" => Statement::CreateSearchPropertyList,
            "WorkloadGroup" => Statement::CreateWorkloadGroup,
            "WorkloadClassifier" => Statement::CreateWorkloadClassifier,
            "ResourcePool" => Statement::CreateResourcePool,
            "ExternalDataSource" => Statement::CreateExternalDataSource,
            "ExternalFileFormat" => Statement::CreateExternalFileFormat,
            "ExternalTable" => Statement::CreateExternalTable,
            "ExternalLanguage" => Statement::CreateExternalLanguage,
            "ExternalLibrary" => Statement::CreateExternalLibrary,
            "ExternalResourcePool" => Statement::CreateExternalResourcePool,
            "ExternalModel" => Statement::CreateExternalModel,
            "AvailabilityGroup" => Statement::CreateAvailabilityGroup,
            "ServerAudit" => Statement::CreateServerAudit,
            "ServerAuditSpecification" => Statement::CreateServerAuditSpecification,
            "DatabaseAuditSpecification" => Statement::CreateDatabaseAuditSpecification,
            "ColumnEncryptionKey" => Statement::CreateColumnEncryptionKey,
            "ColumnMasterKey" => Statement::CreateColumnMasterKey,
            "EventSession" => Statement::CreateEventSession,
            _ => return None,
        };
        let named = !is_nameless_kind(kind);
        Some(wrap(self.lenient(|p, stmt: &mut ObjectStatement| p.fill_object(stmt, named))))
    }

    /// `name {(elements) | AS FILETABLE} [AS NODE | AS EDGE] [ON fg]
    /// [TEXTIMAGE_ON fg] [FILESTREAM_ON fg] [WITH (options)] [AS SELECT ...]`
    pub(crate) fn fill_create_table(&mut self, stmt: &mut CreateTableStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            stmt.definition = self.parse_table_definition()?;
        } else if !self.check_keyword(Keyword::As) && !self.check_keyword(Keyword::With) {
            return Err(self.error_here("("));
        }
        loop {
            if self.eat_keyword(Keyword::As) {
                if self.eat_word("NODE") {
                    stmt.as_node = true;
                } else if self.eat_word("EDGE") {
                    stmt.as_edge = true;
                } else if self.eat_word("FILETABLE") {
                    stmt.as_file_table = true;
                } else {
                    let mut select = SelectStatement::default();
                    self.fill_select(&mut select)?;
                    stmt.select = Some(Box::new(select));
                }
            } else if self.eat_keyword(Keyword::On) {
                stmt.on = Some(self.parse_filegroup_or_partition_scheme()?);
            } else if self.eat_word("TEXTIMAGE_ON") {
                stmt.text_image_on = Some(self.parse_filegroup_name()?);
            } else if self.eat_word("FILESTREAM_ON") {
                stmt.filestream_on = Some(self.parse_filegroup_name()?);
            } else if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen
            {
                stmt.options = self.parse_with_option_list(&TABLE_OPTIONS)?;
            } else {
                return Ok(());
            }
        }
    }

    /// `name [option ...]` for both `CREATE SEQUENCE` and `ALTER SEQUENCE`.
    pub(crate) fn fill_sequence(&mut self, stmt: &mut SequenceStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        while let Some(option) = self.parse_sequence_option()? {
            stmt.options.push(option);
        }
        Ok(())
    }

    fn parse_sequence_option(&mut self) -> PResult<Option<SequenceOption>> {
        let option = if self.eat_keyword(Keyword::As) {
            SequenceOption::As(self.parse_data_type()?)
        } else if self.eat_word("START") {
            self.expect_keyword(Keyword::With)?;
            SequenceOption::StartWith(self.parse_scalar_expression()?)
        } else if self.eat_word("RESTART") {
            let value = if self.eat_keyword(Keyword::With) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            SequenceOption::Restart(value)
        } else if self.eat_word("INCREMENT") {
            self.expect_keyword(Keyword::By)?;
            SequenceOption::IncrementBy(self.parse_scalar_expression()?)
        } else if self.eat_word("MINVALUE") {
            SequenceOption::MinValue(Some(self.parse_scalar_expression()?))
        } else if self.eat_word("MAXVALUE") {
            SequenceOption::MaxValue(Some(self.parse_scalar_expression()?))
        } else if self.eat_word("CYCLE") {
            SequenceOption::Cycle(true)
        } else if self.eat_word("CACHE") {
            let size = if self.check(TokenKind::Integer) {
                Some(self.parse_primary()?)
            } else {
                None
            };
            SequenceOption::Cache {
                enabled: true,
                size,
            }
        } else if self.eat_word("NO") {
            match self.expect_any_word()?.as_str() {
                "MINVALUE" => SequenceOption::MinValue(None),
                "MAXVALUE" => SequenceOption::MaxValue(None),
                "CYCLE" => SequenceOption::Cycle(false),
                "CACHE" => SequenceOption::Cache {
                    enabled: false,
                    size: None,
                },
                _ => return Err(self.error_message("expected MINVALUE, MAXVALUE, CYCLE or CACHE")),
            }
        } else {
            return Ok(None);
        };
        Ok(Some(option))
    }

    /// `name {FROM type [NULL | NOT NULL] | AS TABLE (...) [WITH (...)] |
    /// EXTERNAL NAME assembly.class}`
    fn fill_create_type(&mut self, stmt: &mut CreateTypeStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        stmt.definition = Some(if self.eat_keyword(Keyword::From) {
            let data_type = self.parse_data_type()?;
            TypeDefinition::Alias {
                data_type,
                nullable: self.parse_nullability(),
            }
        } else if self.check_keyword(Keyword::External) {
            TypeDefinition::External(self.parse_external_name()?)
        } else {
            self.expect_keyword(Keyword::As)?;
            self.expect_keyword(Keyword::Table)?;
            let definition = self.parse_table_definition()?;
            TypeDefinition::Table {
                definition,
                options: self.parse_with_option_list(&TABLE_OPTIONS)?,
            }
        });
        Ok(())
    }

    /// `{name [AUTHORIZATION owner] | AUTHORIZATION owner} [element ...]`.
    /// Elements are `CREATE`, `GRANT`, `DENY` and `REVOKE` statements that
    /// follow without a separating `;`.
    fn fill_create_schema(&mut self, stmt: &mut CreateSchemaStatement) -> PResult<()> {
        if !self.check_keyword(Keyword::Authorization) {
            stmt.name = self.expect_identifier()?;
        }
        if self.eat_keyword(Keyword::Authorization) {
            stmt.authorization = Some(self.expect_identifier()?);
        }
        loop {
            let element = match self.kind() {
                TokenKind::Keyword(Keyword::Create) => self.parse_create_statement(),
                TokenKind::Keyword(Keyword::Grant) => {
                    Some(Statement::Grant(self.lenient(Self::fill_grant)))
                }
                TokenKind::Keyword(Keyword::Deny) => {
                    Some(Statement::Deny(self.lenient(Self::fill_deny)))
                }
                TokenKind::Keyword(Keyword::Revoke) => {
                    Some(Statement::Revoke(self.lenient(Self::fill_revoke)))
                }
                _ => return Ok(()),
            };
            match element {
                Some(element) => stmt.elements.push(element),
                None => return Err(self.error_here("schema element")),
            }
        }
    }

    /// `name FOR target`
    fn fill_create_synonym(&mut self, stmt: &mut CreateSynonymStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::For)?;
        stmt.for_name = self.parse_schema_object_name()?;
        Ok(())
    }

    fn fill_create_default(&mut self, stmt: &mut CreateDefaultStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::As)?;
        stmt.expression = self.parse_scalar_expression()?;
        Ok(())
    }

    fn fill_create_rule(&mut self, stmt: &mut CreateRuleStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::As)?;
        stmt.condition = Some(self.parse_boolean_expression()?);
        Ok(())
    }

    /// `name AS expr` on create, `name ADD expr` on alter.
    pub(crate) fn fill_xml_schema_collection(
        &mut self,
        stmt: &mut XmlSchemaCollectionStatement,
        keyword: Keyword,
    ) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        self.expect_keyword(keyword)?;
        stmt.expression = self.parse_scalar_expression()?;
        Ok(())
    }

    /// `name (type) AS RANGE [LEFT | RIGHT] FOR VALUES (v, ...)`
    fn fill_create_partition_function(
        &mut self,
        stmt: &mut CreatePartitionFunctionStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        stmt.parameter_type = Some(self.parenthesized(Self::parse_data_type)?);
        self.expect_keyword(Keyword::As)?;
        self.expect_word("RANGE")?;
        stmt.range = if self.eat_keyword(Keyword::Left) {
            PartitionRangeKind::Left
        } else if self.eat_keyword(Keyword::Right) {
            PartitionRangeKind::Right
        } else {
            PartitionRangeKind::NotSpecified
        };
        self.expect_keyword(Keyword::For)?;
        self.expect_keyword(Keyword::Values)?;
        stmt.boundary_values = self.parenthesized_list(Self::parse_scalar_expression)?;
        Ok(())
    }

    /// `name AS PARTITION fn [ALL] TO (fg, ...)`
    fn fill_create_partition_scheme(
        &mut self,
        stmt: &mut CreatePartitionSchemeStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::As)?;
        self.expect_word("PARTITION")?;
        stmt.function = self.expect_identifier()?;
        stmt.all = self.eat_keyword(Keyword::All);
        self.expect_keyword(Keyword::To)?;
        stmt.file_groups = self.parenthesized_list(Self::parse_filegroup_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ConstraintKind, DataType, Nullability, ScalarExpression, SqlDataTypeKind, TableOption,
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
    fn table_with_columns() {
        let Statement::CreateTable(table) = single(
            "CREATE TABLE dbo.t(id INT NOT NULL PRIMARY KEY, name NVARCHAR(100) NULL)",
        ) else {
            panic!("expected CreateTable");
        };
        assert_eq!(table.name.schema.as_ref().unwrap().value, "dbo");
        assert_eq!(table.name.base_name(), "t");
        let columns = &table.definition.columns;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name.value, "id");
        assert_eq!(
            columns[0].data_type.as_ref().and_then(DataType::sql_kind),
            Some(SqlDataTypeKind::Int)
        );
        assert_eq!(columns[0].nullable, Some(Nullability::NotNull));
        assert!(matches!(
            columns[0].constraints[0].kind,
            ConstraintKind::PrimaryKey(_)
        ));
        assert_eq!(
            columns[1].data_type.as_ref().and_then(DataType::sql_kind),
            Some(SqlDataTypeKind::NVarChar)
        );
        assert_eq!(columns[1].nullable, Some(Nullability::Null));
    }

    #[test]
    fn empty_table_body() {
        let Statement::CreateTable(table) = single("CREATE TABLE t ()") else {
            panic!("expected CreateTable");
        };
        assert!(table.definition.columns.is_empty());
        assert!(table.definition.constraints.is_empty());
    }

    #[test]
    fn table_storage_clauses() {
        let Statement::CreateTable(table) = single(
            "CREATE TABLE t (id INT) ON ps_date(id) TEXTIMAGE_ON [LOB] \
             WITH (DATA_COMPRESSION = PAGE, MEMORY_OPTIMIZED = ON)",
        ) else {
            panic!("expected CreateTable");
        };
        let on = table.on.unwrap();
        assert_eq!(on.name.value, "ps_date");
        assert_eq!(on.columns.len(), 1);
        assert_eq!(table.text_image_on.unwrap().value, "LOB");
        assert_eq!(table.options.len(), 2);
        assert!(matches!(table.options[1], TableOption::MemoryOptimized(_)));

        let Statement::CreateTable(table) = single("CREATE TABLE docs AS FILETABLE") else {
            panic!("expected CreateTable");
        };
        assert!(table.as_file_table);

        let Statement::CreateTable(table) = single("CREATE TABLE person (id INT) AS NODE") else {
            panic!("expected CreateTable");
        };
        assert!(table.as_node);
    }

    #[test]
    fn or_alter_and_index_prefixes() {
        let (statements, errors) = parse(
            "CREATE OR ALTER PROCEDURE p AS SELECT 1\nGO\n\
             CREATE UNIQUE NONCLUSTERED INDEX ix ON t (a)\n\
             CREATE PRIMARY XML INDEX px ON t (doc)",
        );
        assert_eq!(errors, 0);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(tags, ["CreateProcedure", "CreateIndex", "CreateXmlIndex"]);
        let Statement::CreateProcedure(proc) = &statements[0] else {
            unreachable!()
        };
        assert!(proc.or_alter);
    }

    #[test]
    fn sequences() {
        let Statement::CreateSequence(seq) = single(
            "CREATE SEQUENCE dbo.order_no AS BIGINT START WITH 1000 INCREMENT BY -5 \
             MINVALUE 0 NO MAXVALUE CYCLE CACHE 50",
        ) else {
            panic!("expected CreateSequence");
        };
        let kinds: Vec<_> = seq.options.iter().map(SequenceOption::option_kind).collect();
        assert_eq!(
            kinds,
            ["As", "StartWith", "IncrementBy", "MinValue", "MaxValue", "Cycle", "Cache"]
        );
        assert_eq!(seq.options[4], SequenceOption::MaxValue(None));
        assert_eq!(
            seq.options[6],
            SequenceOption::Cache {
                enabled: true,
                size: Some(ScalarExpression::integer("50")),
            }
        );

        let Statement::CreateSequence(seq) = single("CREATE SEQUENCE s NO CACHE") else {
            panic!("expected CreateSequence");
        };
        assert_eq!(
            seq.options,
            [SequenceOption::Cache {
                enabled: false,
                size: None
            }]
        );
    }

    #[test]
    fn types() {
        let Statement::CreateType(ty) = single("CREATE TYPE dbo.ssn FROM VARCHAR(11) NOT NULL")
        else {
            panic!("expected CreateType");
        };
        assert!(matches!(
            ty.definition,
            Some(TypeDefinition::Alias {
                nullable: Some(Nullability::NotNull),
                ..
            })
        ));

        let Statement::CreateType(ty) = single(
            "CREATE TYPE dbo.id_list AS TABLE (id INT PRIMARY KEY NONCLUSTERED) \
             WITH (MEMORY_OPTIMIZED = ON)",
        ) else {
            panic!("expected CreateType");
        };
        let Some(TypeDefinition::Table {
            definition,
            options,
        }) = ty.definition
        else {
            panic!("expected a table type");
        };
        assert_eq!(definition.columns.len(), 1);
        assert_eq!(options.len(), 1);

        let Statement::CreateType(ty) = single("CREATE TYPE dbo.point EXTERNAL NAME geo.[Point]")
        else {
            panic!("expected CreateType");
        };
        assert!(matches!(ty.definition, Some(TypeDefinition::External(_))));
    }

    #[test]
    fn schema_with_elements() {
        let (statements, errors) = parse(
            "CREATE SCHEMA sales AUTHORIZATION dbo\n\
             CREATE TABLE orders (id INT)\n\
             GRANT SELECT ON orders TO reader;\n\
             SELECT 1",
        );
        assert_eq!(errors, 0);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(tags, ["CreateSchema", "Select"]);
        let Statement::CreateSchema(schema) = &statements[0] else {
            unreachable!()
        };
        assert_eq!(schema.name.value, "sales");
        assert_eq!(schema.authorization.as_ref().unwrap().value, "dbo");
        let elements: Vec<_> = schema.elements.iter().map(Statement::tag).collect();
        assert_eq!(elements, ["CreateTable", "Grant"]);

        let Statement::CreateSchema(schema) = single("CREATE SCHEMA AUTHORIZATION app") else {
            panic!("expected CreateSchema");
        };
        assert!(schema.name.value.is_empty());
    }

    #[test]
    fn synonyms_defaults_rules() {
        let Statement::CreateSynonym(syn) = single("CREATE SYNONYM dbo.emp FOR hr.dbo.employees")
        else {
            panic!("expected CreateSynonym");
        };
        assert_eq!(syn.for_name.count, 3);

        let Statement::CreateDefault(default) = single("CREATE DEFAULT zero AS 0") else {
            panic!("expected CreateDefault");
        };
        assert_eq!(default.expression, ScalarExpression::integer("0"));

        let Statement::CreateRule(rule) = single("CREATE RULE positive AS @value > 0") else {
            panic!("expected CreateRule");
        };
        assert!(rule.condition.is_some());

        let Statement::CreateXmlSchemaCollection(xml) =
            single("CREATE XML SCHEMA COLLECTION dbo.docs AS N'<xsd:schema/>'")
        else {
            panic!("expected CreateXmlSchemaCollection");
        };
        assert_eq!(xml.name.base_name(), "docs");
    }

    #[test]
    fn partitions() {
        let Statement::CreatePartitionFunction(pf) = single(
            "CREATE PARTITION FUNCTION pf_year (DATE) AS RANGE RIGHT \
             FOR VALUES ('2023-01-01', '2024-01-01')",
        ) else {
            panic!("expected CreatePartitionFunction");
        };
        assert_eq!(pf.range, PartitionRangeKind::Right);
        assert_eq!(pf.boundary_values.len(), 2);

        let Statement::CreatePartitionScheme(ps) = single(
            "CREATE PARTITION SCHEME ps_year AS PARTITION pf_year ALL TO ([PRIMARY])",
        ) else {
            panic!("expected CreatePartitionScheme");
        };
        assert!(ps.all);
        assert_eq!(ps.function.value, "pf_year");
        assert_eq!(ps.file_groups[0].value, "PRIMARY");
    }

    #[test]
    fn object_kinds_share_a_record() {
        let Statement::CreateCertificate(cert) = single(
            "CREATE CERTIFICATE signer AUTHORIZATION dbo \
             ENCRYPTION BY PASSWORD = 'pw' WITH SUBJECT = 'Signing'",
        ) else {
            panic!("expected CreateCertificate");
        };
        assert_eq!(cert.name.base_name(), "signer");
        assert!(cert.option("EncryptionByPassword").is_some());
        assert!(cert.option("Subject").is_some());

        let Statement::CreateMasterKey(key) =
            single("CREATE MASTER KEY ENCRYPTION BY PASSWORD = 'pw'")
        else {
            panic!("expected CreateMasterKey");
        };
        assert_eq!(key.name.count, 0);
    }

    #[test]
    fn unsupported_kind_is_reported() {
        let (statements, errors) = parse("CREATE FROBNICATOR x; SELECT 1");
        assert_eq!(statements.len(), 1);
        assert_eq!(errors, 1);
    }
}
