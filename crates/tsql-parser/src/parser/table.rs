//! Table bodies shared by `CREATE TABLE`, `ALTER TABLE ... ADD`,
//! `DECLARE @t TABLE` and `CREATE TYPE ... AS TABLE`.

use super::cursor::Parser;
use super::error::PResult;
use super::options::INDEX_OPTIONS;
use crate::ast::{
    option_kind_from_name, CheckConstraint, ColumnDefault, ColumnDefinition, ColumnEncryption,
    ComputedColumn, ConnectionConstraint, ConstraintDefinition, ConstraintKind, DefaultConstraint,
    ForeignKeyAction, ForeignKeyConstraint, GeneratedAlwaysKind, Identifier, IdentityOptions,
    IndexDefinition, IndexOption, KeyConstraint, ScalarExpression, SparseKind, SystemTimePeriod,
    TableDefinition,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `( element [, element ...] )`; `()` gives an empty definition.
    pub(crate) fn parse_table_definition(&mut self) -> PResult<TableDefinition> {
        let mut definition = TableDefinition::default();
        self.parenthesized(|p| {
            if p.check(TokenKind::RightParen) {
                return Ok(());
            }
            loop {
                p.parse_table_element(&mut definition)?;
                if !p.eat(TokenKind::Comma) || p.check(TokenKind::RightParen) {
                    return Ok(());
                }
            }
        })?;
        Ok(definition)
    }

    /// One element of a table body: a column, a table constraint, an index
    /// or the system-time period.
    pub(crate) fn parse_table_element(&mut self, definition: &mut TableDefinition) -> PResult<()> {
        if self.at_table_constraint() {
            definition.constraints.push(self.parse_constraint()?);
        } else if self.eat_keyword(Keyword::Index) {
            definition.indexes.push(self.parse_index_definition()?);
        } else if self.is_word("PERIOD") && self.peek_keyword(Keyword::For) {
            self.advance();
            self.advance();
            self.expect_word("SYSTEM_TIME")?;
            let (start, end) = self.parenthesized(|p| {
                let start = p.expect_identifier()?;
                p.expect(TokenKind::Comma)?;
                Ok((start, p.expect_identifier()?))
            })?;
            definition.system_time_period = Some(SystemTimePeriod { start, end });
        } else {
            definition.columns.push(self.parse_column_definition()?);
        }
        Ok(())
    }

    fn at_table_constraint(&self) -> bool {
        match self.kind() {
            TokenKind::Keyword(
                Keyword::Constraint
                | Keyword::Primary
                | Keyword::Unique
                | Keyword::Foreign
                | Keyword::Check,
            ) => true,
            TokenKind::Identifier => {
                self.is_word("CONNECTION") && self.peek().kind == TokenKind::LeftParen
            }
            _ => false,
        }
    }

    /// `name {type | AS expr [PERSISTED [NOT NULL]]} [modifier ...]`
    pub(crate) fn parse_column_definition(&mut self) -> PResult<ColumnDefinition> {
        let mut column = ColumnDefinition {
            name: self.expect_identifier()?,
            ..ColumnDefinition::default()
        };
        if self.eat_keyword(Keyword::As) {
            let expression = self.parse_scalar_expression()?;
            let persisted = self.eat_word("PERSISTED");
            column.computed = Some(ComputedColumn {
                expression,
                persisted,
            });
        } else {
            column.data_type = Some(self.parse_data_type()?);
        }
        while self.parse_column_modifier(&mut column)? {}
        Ok(column)
    }

    /// Parses one column modifier into `column`; false if none follows.
    fn parse_column_modifier(&mut self, column: &mut ColumnDefinition) -> PResult<bool> {
        match self.kind() {
            TokenKind::Keyword(Keyword::Collate) => {
                self.advance();
                column.collation = Some(self.expect_identifier()?);
            }
            TokenKind::Keyword(Keyword::Null) | TokenKind::Keyword(Keyword::Not)
                if self.check_keyword(Keyword::Null) || self.peek_keyword(Keyword::Null) =>
            {
                column.nullable = self.parse_nullability();
            }
            TokenKind::Keyword(Keyword::Identity) => {
                self.advance();
                column.identity = Some(self.parse_identity_options()?);
            }
            TokenKind::Keyword(Keyword::RowGuidCol) => {
                self.advance();
                column.row_guid_col = true;
            }
            TokenKind::Keyword(Keyword::Index) => {
                self.advance();
                column.index = Some(self.parse_index_definition()?);
            }
            TokenKind::Keyword(Keyword::Default) => {
                column.default = Some(self.parse_column_default(None)?);
            }
            TokenKind::Keyword(Keyword::Constraint) => {
                self.advance();
                let name = Some(self.parse_identifier());
                if self.check_keyword(Keyword::Default) {
                    column.default = Some(self.parse_column_default(name)?);
                } else {
                    let kind = self.parse_constraint_kind()?;
                    column.constraints.push(ConstraintDefinition { name, kind });
                }
            }
            TokenKind::Keyword(
                Keyword::Primary
                | Keyword::Unique
                | Keyword::Foreign
                | Keyword::References
                | Keyword::Check,
            ) => column.constraints.push(self.parse_constraint()?),
            TokenKind::Identifier => return self.parse_column_word_modifier(column),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Unreserved column modifiers such as `SPARSE` or `MASKED WITH (...)`.
    fn parse_column_word_modifier(&mut self, column: &mut ColumnDefinition) -> PResult<bool> {
        match self.literal_upper().as_str() {
            "FILESTREAM" => {
                self.advance();
                column.filestream = true;
            }
            "SPARSE" => {
                self.advance();
                column.sparse = SparseKind::Sparse;
            }
            "COLUMN_SET" => {
                self.advance();
                self.expect_keyword(Keyword::For)?;
                self.expect_word("ALL_SPARSE_COLUMNS")?;
                column.sparse = SparseKind::ColumnSetForAllSparseColumns;
            }
            "HIDDEN" => {
                self.advance();
                column.hidden = true;
            }
            "PERSISTED" => {
                self.advance();
                if let Some(computed) = column.computed.as_mut() {
                    computed.persisted = true;
                }
            }
            "GENERATED" => {
                self.advance();
                column.generated_always = Some(self.parse_generated_always()?);
            }
            "MASKED" => {
                self.advance();
                column.masking_function = Some(self.parse_masking_function()?);
            }
            "ENCRYPTED" => {
                self.advance();
                column.encryption = Some(self.parse_column_encryption()?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// `DEFAULT expr [WITH VALUES]`
    fn parse_column_default(&mut self, name: Option<Identifier>) -> PResult<ColumnDefault> {
        self.expect_keyword(Keyword::Default)?;
        let expression = self.parse_scalar_expression()?;
        let with_values = self.eat_with_values();
        Ok(ColumnDefault {
            name,
            expression,
            with_values,
        })
    }

    fn eat_with_values(&mut self) -> bool {
        if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Values) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// `[(seed, increment)] [NOT FOR REPLICATION]` after `IDENTITY`.
    fn parse_identity_options(&mut self) -> PResult<IdentityOptions> {
        let mut identity = IdentityOptions::default();
        if self.check(TokenKind::LeftParen) {
            self.parenthesized(|p| {
                identity.seed = Some(p.parse_scalar_expression()?);
                if p.eat(TokenKind::Comma) {
                    identity.increment = Some(p.parse_scalar_expression()?);
                }
                Ok(())
            })?;
        }
        identity.not_for_replication = self.eat_not_for_replication()?;
        Ok(identity)
    }

    pub(crate) fn eat_not_for_replication(&mut self) -> PResult<bool> {
        if self.check_keyword(Keyword::Not) && self.peek_keyword(Keyword::For) {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Replication)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `ALWAYS AS {ROW|TRANSACTION_ID|SEQUENCE_NUMBER} {START|END} [HIDDEN]`
    fn parse_generated_always(&mut self) -> PResult<GeneratedAlwaysKind> {
        self.expect_word("ALWAYS")?;
        self.expect_keyword(Keyword::As)?;
        let what = self.expect_any_word()?;
        let start = if self.eat_keyword(Keyword::End) {
            false
        } else {
            self.expect_word("START")?;
            true
        };
        let kind = match (what.as_str(), start) {
            ("ROW", true) => GeneratedAlwaysKind::RowStart,
            ("ROW", false) => GeneratedAlwaysKind::RowEnd,
            ("TRANSACTION_ID", true) => GeneratedAlwaysKind::TransactionIdStart,
            ("TRANSACTION_ID", false) => GeneratedAlwaysKind::TransactionIdEnd,
            ("SEQUENCE_NUMBER", true) => GeneratedAlwaysKind::SequenceNumberStart,
            ("SEQUENCE_NUMBER", false) => GeneratedAlwaysKind::SequenceNumberEnd,
            _ => return Err(self.error_message(format!("unknown GENERATED ALWAYS kind {what}"))),
        };
        Ok(kind)
    }

    /// `WITH (FUNCTION = 'partial(1, "x", 0)')` after `MASKED`.
    pub(crate) fn parse_masking_function(&mut self) -> PResult<ScalarExpression> {
        self.expect_keyword(Keyword::With)?;
        self.parenthesized(|p| {
            p.expect_keyword(Keyword::Function)?;
            p.expect(TokenKind::Eq)?;
            p.parse_primary()
        })
    }

    /// `WITH (COLUMN_ENCRYPTION_KEY = k, ENCRYPTION_TYPE = t, ALGORITHM = 'a')`
    pub(crate) fn parse_column_encryption(&mut self) -> PResult<ColumnEncryption> {
        self.expect_keyword(Keyword::With)?;
        let mut encryption = ColumnEncryption::default();
        self.parenthesized_list(|p| {
            let name = p.expect_any_word()?;
            p.expect(TokenKind::Eq)?;
            match name.as_str() {
                "COLUMN_ENCRYPTION_KEY" => encryption.key = Some(p.expect_identifier()?),
                "ENCRYPTION_TYPE" => {
                    encryption.encryption_type = Some(option_kind_from_name(&p.expect_any_word()?));
                }
                "ALGORITHM" => encryption.algorithm = Some(p.expect_string()?),
                _ => p.skip_option_value(),
            }
            Ok(())
        })?;
        Ok(encryption)
    }

    /// `[CONSTRAINT name] {PRIMARY KEY | UNIQUE | [FOREIGN KEY] REFERENCES |
    /// CHECK | DEFAULT | CONNECTION} ...`. A missing name after `CONSTRAINT`
    /// reads as an empty identifier.
    pub(crate) fn parse_constraint(&mut self) -> PResult<ConstraintDefinition> {
        let name = self
            .eat_keyword(Keyword::Constraint)
            .then(|| self.parse_identifier());
        let kind = self.parse_constraint_kind()?;
        Ok(ConstraintDefinition { name, kind })
    }

    fn parse_constraint_kind(&mut self) -> PResult<ConstraintKind> {
        let kind = match self.kind() {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintKind::PrimaryKey(self.parse_key_constraint()?)
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                ConstraintKind::Unique(self.parse_key_constraint()?)
            }
            TokenKind::Keyword(Keyword::Foreign | Keyword::References) => {
                ConstraintKind::ForeignKey(self.parse_foreign_key()?)
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.advance();
                let not_for_replication = self.eat_not_for_replication()?;
                let condition = Some(self.parenthesized(Self::parse_boolean_expression)?);
                ConstraintKind::Check(CheckConstraint {
                    condition,
                    not_for_replication,
                })
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                let expression = self.parse_scalar_expression()?;
                let column = if self.eat_keyword(Keyword::For) {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                let with_values = self.eat_with_values();
                ConstraintKind::Default(DefaultConstraint {
                    expression,
                    column,
                    with_values,
                })
            }
            TokenKind::Identifier if self.is_word("CONNECTION") => {
                self.advance();
                ConstraintKind::Connection(self.parse_connection_constraint()?)
            }
            _ => return Err(self.error_here("constraint body")),
        };
        Ok(kind)
    }

    /// The rest of `PRIMARY KEY` / `UNIQUE`.
    fn parse_key_constraint(&mut self) -> PResult<KeyConstraint> {
        let mut key = KeyConstraint {
            clustered: self.parse_clustered(),
            ..KeyConstraint::default()
        };
        key.hash = self.eat_word("HASH");
        if self.check(TokenKind::LeftParen) {
            key.columns = self.parse_sorted_column_list()?;
        }
        if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::FillFactor) {
            self.advance();
            self.advance();
            self.expect(TokenKind::Eq)?;
            key.options.push(IndexOption::Expression {
                option_kind: option_kind_from_name("FILLFACTOR"),
                value: self.parse_scalar_expression()?,
            });
        } else {
            key.options = self.parse_with_option_list(&INDEX_OPTIONS)?;
        }
        key.on = self.parse_optional_on_filegroup()?;
        if self.check_keyword(Keyword::Not) && self.peek_is_word("ENFORCED") {
            self.advance();
            self.advance();
            key.not_enforced = true;
        }
        Ok(key)
    }

    /// `[CLUSTERED | NONCLUSTERED]`
    pub(crate) fn parse_clustered(&mut self) -> Option<bool> {
        if self.eat_keyword(Keyword::Clustered) {
            Some(true)
        } else if self.eat_keyword(Keyword::NonClustered) {
            Some(false)
        } else {
            None
        }
    }

    /// `[FOREIGN KEY (cols)] REFERENCES t [(cols)] [ON DELETE act]
    /// [ON UPDATE act] [NOT FOR REPLICATION]`
    fn parse_foreign_key(&mut self) -> PResult<ForeignKeyConstraint> {
        let mut fk = ForeignKeyConstraint::default();
        if self.eat_keyword(Keyword::Foreign) {
            self.expect_keyword(Keyword::Key)?;
            if self.check(TokenKind::LeftParen) {
                fk.columns = self.parse_identifier_list()?;
            }
        }
        self.expect_keyword(Keyword::References)?;
        fk.referenced_table = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            fk.referenced_columns = self.parse_identifier_list()?;
        }
        while self.check_keyword(Keyword::On) {
            self.advance();
            if self.eat_keyword(Keyword::Delete) {
                fk.delete_action = self.parse_foreign_key_action()?;
            } else {
                self.expect_keyword(Keyword::Update)?;
                fk.update_action = self.parse_foreign_key_action()?;
            }
        }
        fk.not_for_replication = self.eat_not_for_replication()?;
        Ok(fk)
    }

    fn parse_foreign_key_action(&mut self) -> PResult<ForeignKeyAction> {
        if self.eat_keyword(Keyword::Cascade) {
            return Ok(ForeignKeyAction::Cascade);
        }
        if self.eat_word("NO") {
            self.expect_word("ACTION")?;
            return Ok(ForeignKeyAction::NoAction);
        }
        self.expect_keyword(Keyword::Set)?;
        if self.eat_keyword(Keyword::Null) {
            Ok(ForeignKeyAction::SetNull)
        } else {
            self.expect_keyword(Keyword::Default)?;
            Ok(ForeignKeyAction::SetDefault)
        }
    }

    /// `(from TO to, ...) [ON DELETE CASCADE]` after `CONNECTION`.
    fn parse_connection_constraint(&mut self) -> PResult<ConnectionConstraint> {
        let connections = self.parenthesized_list(|p| {
            let from = p.parse_schema_object_name()?;
            p.expect_keyword(Keyword::To)?;
            Ok((from, p.parse_schema_object_name()?))
        })?;
        let on_delete_cascade = if self.check_keyword(Keyword::On) {
            self.advance();
            self.expect_keyword(Keyword::Delete)?;
            self.expect_keyword(Keyword::Cascade)?;
            true
        } else {
            false
        };
        Ok(ConnectionConstraint {
            connections,
            on_delete_cascade,
        })
    }

    /// An inline index after `INDEX`: `name [UNIQUE] [CLUSTERED|NONCLUSTERED]
    /// [HASH] [COLUMNSTORE] [(cols)] [INCLUDE (cols)] [WHERE filter]
    /// [WITH (...)] [ON fg] [FILESTREAM_ON fg]`.
    pub(crate) fn parse_index_definition(&mut self) -> PResult<IndexDefinition> {
        let mut index = IndexDefinition {
            name: self.expect_identifier()?,
            unique: self.eat_keyword(Keyword::Unique),
            ..IndexDefinition::default()
        };
        index.clustered = self.parse_clustered();
        index.hash = self.eat_word("HASH");
        index.columnstore = self.eat_word("COLUMNSTORE");
        if self.check(TokenKind::LeftParen) {
            index.columns = self.parse_sorted_column_list()?;
        }
        if self.eat_word("INCLUDE") {
            index.include = self.parse_identifier_list()?;
        }
        if self.eat_keyword(Keyword::Where) {
            index.filter = Some(self.parse_boolean_expression()?);
        }
        index.options = self.parse_with_option_list(&INDEX_OPTIONS)?;
        index.on = self.parse_optional_on_filegroup()?;
        if self.eat_word("FILESTREAM_ON") {
            index.filestream_on = Some(self.parse_filegroup_name()?);
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Nullability, SortOrder, SqlDataTypeKind};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn table(sql: &str) -> TableDefinition {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let definition = p.parse_table_definition().unwrap();
        assert!(p.at_eof(), "trailing input after {sql}");
        definition
    }

    #[test]
    fn columns_with_inline_constraints() {
        let def = table("(id INT NOT NULL PRIMARY KEY, name NVARCHAR(100) NULL)");
        assert_eq!(def.columns.len(), 2);
        let id = &def.columns[0];
        assert!(id.identity.is_none());
        assert_eq!(id.nullable, Some(Nullability::NotNull));
        assert!(matches!(
            id.constraints.as_slice(),
            [ConstraintDefinition {
                kind: ConstraintKind::PrimaryKey(_),
                ..
            }]
        ));
        let name = &def.columns[1];
        assert_eq!(
            name.data_type.as_ref().and_then(|t| t.sql_kind()),
            Some(SqlDataTypeKind::NVarChar)
        );
        assert_eq!(name.nullable, Some(Nullability::Null));
    }

    #[test]
    fn empty_body() {
        let def = table("()");
        assert!(def.columns.is_empty());
        assert!(def.constraints.is_empty());
    }

    #[test]
    fn column_modifiers() {
        let def = table(
            "(id INT IDENTITY(1, 1) NOT FOR REPLICATION CONSTRAINT df_id DEFAULT (0), \
             total AS price * qty PERSISTED, \
             code VARCHAR(10) COLLATE Latin1_General_CI_AS SPARSE NULL, \
             email VARCHAR(100) MASKED WITH (FUNCTION = 'email()') NULL, \
             ssn CHAR(11) ENCRYPTED WITH (COLUMN_ENCRYPTION_KEY = cek, \
             ENCRYPTION_TYPE = DETERMINISTIC, ALGORITHM = 'AEAD_AES_256_CBC_HMAC_SHA_256'), \
             valid_from DATETIME2 GENERATED ALWAYS AS ROW START HIDDEN NOT NULL, \
             valid_to DATETIME2 GENERATED ALWAYS AS ROW END NOT NULL, \
             PERIOD FOR SYSTEM_TIME (valid_from, valid_to))",
        );
        let id = &def.columns[0];
        let identity = id.identity.as_ref().unwrap();
        assert!(identity.not_for_replication);
        assert_eq!(identity.increment, Some(ScalarExpression::integer("1")));
        assert_eq!(id.default.as_ref().unwrap().name.as_ref().unwrap().value, "df_id");

        assert!(def.columns[1].computed.as_ref().unwrap().persisted);
        assert_eq!(def.columns[2].sparse, SparseKind::Sparse);
        assert!(def.columns[2].collation.is_some());
        assert!(def.columns[3].masking_function.is_some());
        let encryption = def.columns[4].encryption.as_ref().unwrap();
        assert_eq!(encryption.encryption_type.as_deref(), Some("Deterministic"));
        assert_eq!(def.columns[5].generated_always, Some(GeneratedAlwaysKind::RowStart));
        assert!(def.columns[5].hidden);
        assert_eq!(def.columns[6].generated_always, Some(GeneratedAlwaysKind::RowEnd));
        assert_eq!(def.system_time_period.unwrap().end.value, "valid_to");
    }

    #[test]
    fn table_constraints_and_indexes() {
        let def = table(
            "(a INT, b INT, \
             CONSTRAINT pk PRIMARY KEY CLUSTERED (a ASC, b DESC) \
             WITH (FILLFACTOR = 80) ON [PRIMARY], \
             CONSTRAINT fk FOREIGN KEY (b) REFERENCES dbo.other (id) \
             ON UPDATE NO ACTION ON DELETE SET NULL, \
             CHECK NOT FOR REPLICATION (a > 0), \
             INDEX ix_b NONCLUSTERED (b) INCLUDE (a) WHERE b IS NOT NULL)",
        );
        assert_eq!(def.constraints.len(), 3);
        let ConstraintKind::PrimaryKey(pk) = &def.constraints[0].kind else {
            panic!("expected primary key");
        };
        assert_eq!(pk.clustered, Some(true));
        assert_eq!(pk.columns[1].sort_order, SortOrder::Descending);
        assert_eq!(pk.options[0].option_kind(), "FillFactor");
        assert_eq!(pk.on.as_ref().unwrap().name.value, "PRIMARY");

        let ConstraintKind::ForeignKey(fk) = &def.constraints[1].kind else {
            panic!("expected foreign key");
        };
        assert_eq!(fk.update_action, ForeignKeyAction::NoAction);
        assert_eq!(fk.delete_action, ForeignKeyAction::SetNull);

        let ConstraintKind::Check(check) = &def.constraints[2].kind else {
            panic!("expected check");
        };
        assert!(check.not_for_replication);

        let index = &def.indexes[0];
        assert_eq!(index.clustered, Some(false));
        assert_eq!(index.include.len(), 1);
        assert!(index.filter.is_some());
    }

    #[test]
    fn unnamed_constraint_keyword() {
        let def = table("(a INT CONSTRAINT DEFAULT (0), b INT, CONSTRAINT UNIQUE (b))");
        let default = def.columns[0].default.as_ref().unwrap();
        assert!(default.name.as_ref().unwrap().is_empty());
        let [constraint] = def.constraints.as_slice() else {
            panic!("expected one table constraint");
        };
        assert!(constraint.name.as_ref().unwrap().is_empty());
        assert!(matches!(constraint.kind, ConstraintKind::Unique(_)));
    }

    #[test]
    fn graph_connection_and_memory_optimized_keys() {
        let def = table(
            "(id INT NOT NULL PRIMARY KEY NONCLUSTERED HASH WITH (BUCKET_COUNT = 1024), \
             CONSTRAINT ec CONNECTION (Person TO City) ON DELETE CASCADE)",
        );
        let ConstraintKind::PrimaryKey(pk) = &def.columns[0].constraints[0].kind else {
            panic!("expected primary key");
        };
        assert!(pk.hash);
        assert_eq!(pk.options[0].option_kind(), "BucketCount");
        let ConstraintKind::Connection(conn) = &def.constraints[0].kind else {
            panic!("expected connection");
        };
        assert!(conn.on_delete_cascade);
        assert_eq!(conn.connections.len(), 1);
    }

    #[test]
    fn column_level_references() {
        let def = table("(owner INT REFERENCES users(id) ON DELETE CASCADE)");
        let ConstraintKind::ForeignKey(fk) = &def.columns[0].constraints[0].kind else {
            panic!("expected foreign key");
        };
        assert!(fk.columns.is_empty());
        assert_eq!(fk.referenced_table.base_name(), "users");
        assert_eq!(fk.delete_action, ForeignKeyAction::Cascade);
    }
}
