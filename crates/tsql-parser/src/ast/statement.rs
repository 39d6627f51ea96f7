//! The statement sum type.
//!
//! Variants are grouped by [`StatementFamily`]; the variant name is the
//! statement's stable discriminator tag, which is also what serde emits.

use serde::Serialize;

use super::{
    AlterAuthorizationStatement, AlterDatabaseAddFileGroupStatement, AlterDatabaseAddFileStatement,
    AlterDatabaseCollateStatement, AlterDatabaseModifyFileGroupStatement,
    AlterDatabaseModifyFileStatement, AlterDatabaseModifyNameStatement,
    AlterDatabaseRebuildLogStatement, AlterDatabaseRemoveStatement,
    AlterDatabaseScopedConfigurationClearStatement, AlterDatabaseScopedConfigurationSetStatement,
    AlterDatabaseSetStatement, AlterIndexStatement, AlterLoginStatement,
    AlterPartitionFunctionStatement, AlterPartitionSchemeStatement, AlterRoleStatement,
    AlterSchemaStatement, AlterTableAddStatement, AlterTableAlterColumnStatement,
    AlterTableAlterIndexStatement, AlterTableChangeTrackingStatement,
    AlterTableConstraintModificationStatement, AlterTableDropStatement,
    AlterTableFileTableNamespaceStatement, AlterTableRebuildStatement, AlterTableSetStatement,
    AlterTableSwitchStatement, AlterTableTriggerModificationStatement, AlterUserStatement,
    BackupStatement, BeginEndBlockStatement, BeginTransactionStatement, BreakStatement,
    BulkInsertStatement, CheckpointStatement, CommitTransactionStatement, ContinueStatement,
    CreateAggregateStatement, CreateContractStatement, CreateDatabaseStatement,
    CreateDefaultStatement, CreateEventNotificationStatement, CreateFullTextIndexStatement,
    CreateIndexStatement, CreateLoginStatement, CreatePartitionFunctionStatement,
    CreatePartitionSchemeStatement, CreateRoleStatement, CreateRuleStatement, CreateSchemaStatement,
    CreateSpatialIndexStatement, CreateStatisticsStatement, CreateSynonymStatement,
    CreateTableStatement, CreateTypeStatement, CreateUserStatement, CreateXmlIndexStatement,
    CursorStatement, DatabaseEncryptionKeyStatement, DeclareCursorStatement,
    DeclareTableVariableStatement, DeclareVariableStatement, DeleteStatement, DenyStatement,
    DropIndexStatement, DropObjectsStatement, DropTriggerStatement, ExecuteAsStatement,
    ExecuteStatement, FetchCursorStatement, FunctionStatement, GeneralSetStatement, GotoStatement,
    GrantStatement, IfStatement, InsertBulkStatement, InsertStatement, KillStatement,
    LabelStatement, MergeStatement, MessageTypeStatement, ObjectStatement, PredicateSetStatement,
    PrintStatement, ProcedureStatement, RaiseErrorStatement, ReconfigureStatement, RestoreStatement,
    ReturnStatement, RevertStatement, RevokeStatement, SecurityPolicyStatement, SelectStatement,
    SensitivityClassificationStatement, SequenceStatement, ServiceStatement,
    SetIdentityInsertStatement, SetTransactionIsolationLevelStatement, SetVariableStatement,
    SignatureStatement, ThrowStatement, TransactionNameStatement, TriggerStatement,
    TruncateTableStatement, TryCatchStatement, UpdateStatement, UseStatement, ViewStatement,
    WaitForStatement, WhileStatement, XmlSchemaCollectionStatement,
};

/// Coarse grouping of statement tags, following the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementFamily {
    /// `CREATE ...`
    Create,
    /// `ALTER ...`
    Alter,
    /// `DROP ...`
    Drop,
    /// `INSERT`, `UPDATE`, `DELETE`, `MERGE`, bulk loads, `TRUNCATE`.
    Dml,
    /// `SELECT` and `WITH ... SELECT`.
    Query,
    /// Procedural statements.
    ControlFlow,
    /// Permissions and impersonation.
    Security,
    /// Everything else.
    Other,
}

impl StatementFamily {
    /// Returns the family name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Alter => "Alter",
            Self::Drop => "Drop",
            Self::Dml => "Dml",
            Self::Query => "Query",
            Self::ControlFlow => "ControlFlow",
            Self::Security => "Security",
            Self::Other => "Other",
        }
    }
}

macro_rules! statement_kinds {
    ($( $family:ident { $( $variant:ident($ty:ty), )* } )*) => {
        /// A parsed T-SQL statement.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[allow(clippy::large_enum_variant)]
        pub enum Statement {
            $( $( $variant($ty), )* )*
        }

        impl Statement {
            /// The pascal-case discriminator tag, e.g. `CreateTable`.
            #[must_use]
            pub const fn tag(&self) -> &'static str {
                match self {
                    $( $( Self::$variant(_) => stringify!($variant), )* )*
                }
            }

            /// The family the statement's leading keyword selected.
            #[must_use]
            pub const fn family(&self) -> StatementFamily {
                match self {
                    $( $( Self::$variant(_) => StatementFamily::$family, )* )*
                }
            }

            /// Every tag the parser can produce, in declaration order.
            pub const TAGS: &'static [&'static str] = &[
                $( $( stringify!($variant), )* )*
            ];
        }
    };
}

statement_kinds! {
    Query {
        Select(SelectStatement),
    }
    Dml {
        Insert(InsertStatement),
        InsertBulk(InsertBulkStatement),
        BulkInsert(BulkInsertStatement),
        Update(UpdateStatement),
        Delete(DeleteStatement),
        Merge(MergeStatement),
        TruncateTable(TruncateTableStatement),
    }
    Other {
        Execute(ExecuteStatement),
        Use(UseStatement),
        Checkpoint(CheckpointStatement),
        Reconfigure(ReconfigureStatement),
        Kill(KillStatement),
        Backup(BackupStatement),
        Restore(RestoreStatement),
    }
    Create {
        CreateTable(CreateTableStatement),
        CreateView(ViewStatement),
        CreateIndex(CreateIndexStatement),
        CreateXmlIndex(CreateXmlIndexStatement),
        CreateSpatialIndex(CreateSpatialIndexStatement),
        CreateStatistics(CreateStatisticsStatement),
        CreateProcedure(ProcedureStatement),
        CreateFunction(FunctionStatement),
        CreateTrigger(TriggerStatement),
        CreateSequence(SequenceStatement),
        CreateType(CreateTypeStatement),
        CreateSchema(CreateSchemaStatement),
        CreateSynonym(CreateSynonymStatement),
        CreateDatabase(CreateDatabaseStatement),
        CreateUser(CreateUserStatement),
        CreateRole(CreateRoleStatement),
        CreateServerRole(CreateRoleStatement),
        CreateApplicationRole(ObjectStatement),
        CreateLogin(CreateLoginStatement),
        CreatePartitionFunction(CreatePartitionFunctionStatement),
        CreatePartitionScheme(CreatePartitionSchemeStatement),
        CreateFullTextIndex(CreateFullTextIndexStatement),
        CreateXmlSchemaCollection(XmlSchemaCollectionStatement),
        CreateDefault(CreateDefaultStatement),
        CreateRule(CreateRuleStatement),
        CreateService(ServiceStatement),
        CreateContract(CreateContractStatement),
        CreateMessageType(MessageTypeStatement),
        CreateEventNotification(CreateEventNotificationStatement),
        CreateSecurityPolicy(SecurityPolicyStatement),
        CreateDatabaseEncryptionKey(DatabaseEncryptionKeyStatement),
        CreateAssembly(ObjectStatement),
        CreateCertificate(ObjectStatement),
        CreateSymmetricKey(ObjectStatement),
        CreateAsymmetricKey(ObjectStatement),
        CreateMasterKey(ObjectStatement),
        CreateCredential(ObjectStatement),
        CreateDatabaseScopedCredential(ObjectStatement),
        CreateQueue(ObjectStatement),
        CreateRoute(ObjectStatement),
        CreateRemoteServiceBinding(ObjectStatement),
        CreateBrokerPriority(ObjectStatement),
        CreateEndpoint(ObjectStatement),
        CreateFullTextCatalog(ObjectStatement),
        CreateFullTextStopList(ObjectStatement),
        CreateSearchPropertyList(ObjectStatement),
        CreateWorkloadGroup(ObjectStatement),
        CreateWorkloadClassifier(ObjectStatement),
        CreateResourcePool(ObjectStatement),
        CreateExternalDataSource(ObjectStatement),
        CreateExternalFileFormat(ObjectStatement),
        CreateExternalTable(ObjectStatement),
        CreateExternalLanguage(ObjectStatement),
        CreateExternalLibrary(ObjectStatement),
        CreateExternalResourcePool(ObjectStatement),
        CreateExternalModel(ObjectStatement),
        CreateAvailabilityGroup(ObjectStatement),
        CreateServerAudit(ObjectStatement),
        CreateServerAuditSpecification(ObjectStatement),
        CreateDatabaseAuditSpecification(ObjectStatement),
        CreateColumnEncryptionKey(ObjectStatement),
        CreateColumnMasterKey(ObjectStatement),
        CreateEventSession(ObjectStatement),
        CreateAggregate(CreateAggregateStatement),
    }
    Alter {
        AlterTableDrop(AlterTableDropStatement),
        AlterTableAdd(AlterTableAddStatement),
        AlterTableAlterColumn(AlterTableAlterColumnStatement),
        AlterTableAlterIndex(AlterTableAlterIndexStatement),
        AlterTableTriggerModification(AlterTableTriggerModificationStatement),
        AlterTableFileTableNamespace(AlterTableFileTableNamespaceStatement),
        AlterTableChangeTracking(AlterTableChangeTrackingStatement),
        AlterTableSwitch(AlterTableSwitchStatement),
        AlterTableConstraintModification(AlterTableConstraintModificationStatement),
        AlterTableSet(AlterTableSetStatement),
        AlterTableRebuild(AlterTableRebuildStatement),
        AlterTable(ObjectStatement),
        AlterDatabaseSet(AlterDatabaseSetStatement),
        AlterDatabaseAddFile(AlterDatabaseAddFileStatement),
        AlterDatabaseAddFileGroup(AlterDatabaseAddFileGroupStatement),
        AlterDatabaseModifyFile(AlterDatabaseModifyFileStatement),
        AlterDatabaseModifyFileGroup(AlterDatabaseModifyFileGroupStatement),
        AlterDatabaseModifyName(AlterDatabaseModifyNameStatement),
        AlterDatabaseRemoveFile(AlterDatabaseRemoveStatement),
        AlterDatabaseRemoveFileGroup(AlterDatabaseRemoveStatement),
        AlterDatabaseRebuildLog(AlterDatabaseRebuildLogStatement),
        AlterDatabaseCollate(AlterDatabaseCollateStatement),
        AlterDatabaseEncryptionKey(DatabaseEncryptionKeyStatement),
        AlterDatabaseScopedConfigurationSet(AlterDatabaseScopedConfigurationSetStatement),
        AlterDatabaseScopedConfigurationClear(AlterDatabaseScopedConfigurationClearStatement),
        AlterDatabaseScopedCredential(ObjectStatement),
        AlterDatabaseAuditSpecification(ObjectStatement),
        AlterView(ViewStatement),
        AlterProcedure(ProcedureStatement),
        AlterFunction(FunctionStatement),
        AlterTrigger(TriggerStatement),
        AlterIndex(AlterIndexStatement),
        AlterSequence(SequenceStatement),
        AlterSchema(AlterSchemaStatement),
        AlterRole(AlterRoleStatement),
        AlterServerRole(AlterRoleStatement),
        AlterUser(AlterUserStatement),
        AlterLogin(AlterLoginStatement),
        AlterAuthorization(AlterAuthorizationStatement),
        AlterPartitionFunction(AlterPartitionFunctionStatement),
        AlterPartitionScheme(AlterPartitionSchemeStatement),
        AlterMessageType(MessageTypeStatement),
        AlterService(ServiceStatement),
        AlterSecurityPolicy(SecurityPolicyStatement),
        AlterXmlSchemaCollection(XmlSchemaCollectionStatement),
        AlterServerConfiguration(ObjectStatement),
        AlterResourceGovernor(ObjectStatement),
        AlterApplicationRole(ObjectStatement),
        AlterAssembly(ObjectStatement),
        AlterCertificate(ObjectStatement),
        AlterSymmetricKey(ObjectStatement),
        AlterAsymmetricKey(ObjectStatement),
        AlterMasterKey(ObjectStatement),
        AlterServiceMasterKey(ObjectStatement),
        AlterCredential(ObjectStatement),
        AlterQueue(ObjectStatement),
        AlterRoute(ObjectStatement),
        AlterRemoteServiceBinding(ObjectStatement),
        AlterBrokerPriority(ObjectStatement),
        AlterEndpoint(ObjectStatement),
        AlterFullTextCatalog(ObjectStatement),
        AlterFullTextIndex(ObjectStatement),
        AlterFullTextStopList(ObjectStatement),
        AlterSearchPropertyList(ObjectStatement),
        AlterWorkloadGroup(ObjectStatement),
        AlterResourcePool(ObjectStatement),
        AlterExternalDataSource(ObjectStatement),
        AlterExternalLanguage(ObjectStatement),
        AlterExternalLibrary(ObjectStatement),
        AlterExternalResourcePool(ObjectStatement),
        AlterAvailabilityGroup(ObjectStatement),
        AlterServerAudit(ObjectStatement),
        AlterServerAuditSpecification(ObjectStatement),
        AlterColumnEncryptionKey(ObjectStatement),
        AlterEventSession(ObjectStatement),
    }
    Drop {
        DropTable(DropObjectsStatement),
        DropView(DropObjectsStatement),
        DropProcedure(DropObjectsStatement),
        DropFunction(DropObjectsStatement),
        DropSequence(DropObjectsStatement),
        DropType(DropObjectsStatement),
        DropSchema(DropObjectsStatement),
        DropSynonym(DropObjectsStatement),
        DropDefault(DropObjectsStatement),
        DropRule(DropObjectsStatement),
        DropDatabase(DropObjectsStatement),
        DropUser(DropObjectsStatement),
        DropRole(DropObjectsStatement),
        DropServerRole(DropObjectsStatement),
        DropApplicationRole(DropObjectsStatement),
        DropLogin(DropObjectsStatement),
        DropAssembly(DropObjectsStatement),
        DropCertificate(DropObjectsStatement),
        DropSymmetricKey(DropObjectsStatement),
        DropAsymmetricKey(DropObjectsStatement),
        DropMasterKey(DropObjectsStatement),
        DropCredential(DropObjectsStatement),
        DropDatabaseScopedCredential(DropObjectsStatement),
        DropQueue(DropObjectsStatement),
        DropService(DropObjectsStatement),
        DropContract(DropObjectsStatement),
        DropMessageType(DropObjectsStatement),
        DropRoute(DropObjectsStatement),
        DropRemoteServiceBinding(DropObjectsStatement),
        DropBrokerPriority(DropObjectsStatement),
        DropEndpoint(DropObjectsStatement),
        DropEventNotification(DropObjectsStatement),
        DropFullTextCatalog(DropObjectsStatement),
        DropFullTextIndex(DropObjectsStatement),
        DropFullTextStopList(DropObjectsStatement),
        DropSearchPropertyList(DropObjectsStatement),
        DropWorkloadGroup(DropObjectsStatement),
        DropWorkloadClassifier(DropObjectsStatement),
        DropResourcePool(DropObjectsStatement),
        DropExternalDataSource(DropObjectsStatement),
        DropExternalFileFormat(DropObjectsStatement),
        DropExternalTable(DropObjectsStatement),
        DropExternalLanguage(DropObjectsStatement),
        DropExternalLibrary(DropObjectsStatement),
        DropExternalResourcePool(DropObjectsStatement),
        DropExternalModel(DropObjectsStatement),
        DropXmlSchemaCollection(DropObjectsStatement),
        DropPartitionFunction(DropObjectsStatement),
        DropPartitionScheme(DropObjectsStatement),
        DropAvailabilityGroup(DropObjectsStatement),
        DropServerAudit(DropObjectsStatement),
        DropServerAuditSpecification(DropObjectsStatement),
        DropDatabaseAuditSpecification(DropObjectsStatement),
        DropDatabaseEncryptionKey(DropObjectsStatement),
        DropSecurityPolicy(DropObjectsStatement),
        DropColumnEncryptionKey(DropObjectsStatement),
        DropColumnMasterKey(DropObjectsStatement),
        DropEventSession(DropObjectsStatement),
        DropStatistics(DropObjectsStatement),
        DropAggregate(DropObjectsStatement),
        DropIndex(DropIndexStatement),
        DropTrigger(DropTriggerStatement),
        DropSignature(SignatureStatement),
        DropSensitivityClassification(SensitivityClassificationStatement),
    }
    ControlFlow {
        DeclareVariable(DeclareVariableStatement),
        DeclareTableVariable(DeclareTableVariableStatement),
        DeclareCursor(DeclareCursorStatement),
        SetVariable(SetVariableStatement),
        PredicateSet(PredicateSetStatement),
        GeneralSet(GeneralSetStatement),
        SetTransactionIsolationLevel(SetTransactionIsolationLevelStatement),
        SetIdentityInsert(SetIdentityInsertStatement),
        If(IfStatement),
        While(WhileStatement),
        BeginEndBlock(BeginEndBlockStatement),
        TryCatch(TryCatchStatement),
        BeginTransaction(BeginTransactionStatement),
        CommitTransaction(CommitTransactionStatement),
        RollbackTransaction(TransactionNameStatement),
        SaveTransaction(TransactionNameStatement),
        Return(ReturnStatement),
        Break(BreakStatement),
        Continue(ContinueStatement),
        Goto(GotoStatement),
        Label(LabelStatement),
        Print(PrintStatement),
        Throw(ThrowStatement),
        RaiseError(RaiseErrorStatement),
        WaitFor(WaitForStatement),
        OpenCursor(CursorStatement),
        CloseCursor(CursorStatement),
        DeallocateCursor(CursorStatement),
        FetchCursor(FetchCursorStatement),
    }
    Security {
        Grant(GrantStatement),
        Deny(DenyStatement),
        Revoke(RevokeStatement),
        Revert(RevertStatement),
        ExecuteAs(ExecuteAsStatement),
        AddSignature(SignatureStatement),
        AddSensitivityClassification(SensitivityClassificationStatement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DropObjectsStatement, SchemaObjectName};

    #[test]
    fn tag_matches_variant_name() {
        let stmt = Statement::DropTable(DropObjectsStatement {
            if_exists: true,
            objects: vec![SchemaObjectName::single("a")],
            options: vec![],
        });
        assert_eq!(stmt.tag(), "DropTable");
        assert_eq!(stmt.family(), StatementFamily::Drop);
    }

    #[test]
    fn families_of_unit_statements() {
        assert_eq!(
            Statement::Break(BreakStatement).family(),
            StatementFamily::ControlFlow
        );
        assert_eq!(
            Statement::Select(SelectStatement::default()).family(),
            StatementFamily::Query
        );
        assert_eq!(
            Statement::Revert(RevertStatement::default()).family(),
            StatementFamily::Security
        );
    }

    #[test]
    fn tags_are_unique() {
        let mut tags = Statement::TAGS.to_vec();
        let total = tags.len();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), total);
        assert!(Statement::TAGS.contains(&"AlterDatabaseSet"));
    }
}
