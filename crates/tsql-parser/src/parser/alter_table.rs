//! `ALTER TABLE`: the table name, then one action chosen by the next word.

use super::cursor::Parser;
use super::error::PResult;
use super::options::{OptionTable, INDEX_OPTIONS, TABLE_OPTIONS};
use crate::ast::{
    AlterColumnFlag, AlterTableAddStatement, AlterTableAlterColumnStatement,
    AlterTableAlterIndexStatement, AlterTableChangeTrackingStatement,
    AlterTableConstraintModificationStatement, AlterTableDropElement, AlterTableDropStatement,
    AlterTableFileTableNamespaceStatement, AlterTableRebuildStatement, AlterTableSetStatement,
    AlterTableSwitchStatement, AlterTableTriggerModificationStatement, DropElementKind,
    ObjectStatement, SchemaObjectName, SparseKind, Statement, SwitchOption, TableDefinition,
};
use crate::lexer::{Keyword, TokenKind};

const SWITCH_OPTIONS: OptionTable<SwitchOption> = OptionTable {
    entries: &[
        ("TRUNCATE_TARGET", truncate_target_option),
        ("WAIT_AT_LOW_PRIORITY", switch_low_priority_option),
    ],
    fallback: None,
};

fn truncate_target_option(p: &mut Parser, _: &str) -> PResult<SwitchOption> {
    p.expect(TokenKind::Eq)?;
    Ok(SwitchOption::TruncateTarget(p.parse_option_state()?))
}

fn switch_low_priority_option(p: &mut Parser, _: &str) -> PResult<SwitchOption> {
    Ok(SwitchOption::WaitAtLowPriority(p.parse_low_priority_options()?))
}

impl Parser {
    /// Everything after `ALTER TABLE`. An unknown action still yields an
    /// [`Statement::AlterTable`] node holding the table name.
    pub(crate) fn parse_alter_table_statement(&mut self) -> Statement {
        let name = match self.parse_schema_object_name() {
            Ok(name) => name,
            Err(error) => {
                self.recover(error);
                return Statement::AlterTable(ObjectStatement::default());
            }
        };
        let with_check = self.parse_with_check();
        match self.kind() {
            TokenKind::Keyword(Keyword::Add) => {
                Statement::AlterTableAdd(self.lenient(|p, stmt: &mut AlterTableAddStatement| {
                    stmt.name = name;
                    stmt.with_check = with_check;
                    p.fill_alter_table_add(stmt)
                }))
            }
            TokenKind::Keyword(Keyword::Check | Keyword::NoCheck) => {
                Statement::AlterTableConstraintModification(self.lenient(
                    |p, stmt: &mut AlterTableConstraintModificationStatement| {
                        stmt.name = name;
                        stmt.with_check = with_check;
                        p.fill_constraint_modification(stmt)
                    },
                ))
            }
            _ if with_check.is_some() => self.unknown_alter_table_action(name),
            TokenKind::Keyword(Keyword::Drop) => {
                Statement::AlterTableDrop(self.lenient(|p, stmt: &mut AlterTableDropStatement| {
                    stmt.name = name;
                    p.advance();
                    stmt.elements = p.comma_separated(Self::parse_drop_element)?;
                    Ok(())
                }))
            }
            TokenKind::Keyword(Keyword::Alter) if self.peek_keyword(Keyword::Column) => {
                Statement::AlterTableAlterColumn(self.lenient(
                    |p, stmt: &mut AlterTableAlterColumnStatement| {
                        stmt.name = name;
                        p.advance();
                        p.advance();
                        p.fill_alter_column(stmt)
                    },
                ))
            }
            TokenKind::Keyword(Keyword::Alter) if self.peek_keyword(Keyword::Index) => {
                Statement::AlterTableAlterIndex(self.lenient(
                    |p, stmt: &mut AlterTableAlterIndexStatement| {
                        stmt.name = name;
                        p.advance();
                        p.advance();
                        stmt.index = p.expect_identifier()?;
                        stmt.action = match p.expect_any_word()?.as_str() {
                            "REBUILD" => "Rebuild",
                            "DISABLE" => "Disable",
                            "REORGANIZE" => "Reorganize",
                            _ => return Err(p.error_here("REBUILD, DISABLE or REORGANIZE")),
                        }
                        .to_string();
                        stmt.options = p.parse_with_option_list(&INDEX_OPTIONS)?;
                        Ok(())
                    },
                ))
            }
            TokenKind::Keyword(Keyword::Set) => {
                Statement::AlterTableSet(self.lenient(|p, stmt: &mut AlterTableSetStatement| {
                    stmt.name = name;
                    p.advance();
                    stmt.options = p.parse_option_list(&TABLE_OPTIONS)?;
                    Ok(())
                }))
            }
            TokenKind::Identifier => self.parse_alter_table_word_action(name),
            _ => self.unknown_alter_table_action(name),
        }
    }

    fn unknown_alter_table_action(&mut self, name: SchemaObjectName) -> Statement {
        let error = self.error_here("ALTER TABLE action");
        self.recover(error);
        Statement::AlterTable(ObjectStatement {
            name,
            ..ObjectStatement::default()
        })
    }

    /// Actions led by unreserved words.
    fn parse_alter_table_word_action(&mut self, name: SchemaObjectName) -> Statement {
        let word = self.literal_upper();
        match word.as_str() {
            "ENABLE" | "DISABLE" => {
                let enable = word == "ENABLE";
                if self.peek_keyword(Keyword::Trigger) {
                    Statement::AlterTableTriggerModification(self.lenient(
                        |p, stmt: &mut AlterTableTriggerModificationStatement| {
                            stmt.name = name;
                            stmt.enable = enable;
                            p.advance();
                            p.advance();
                            if p.eat_keyword(Keyword::All) {
                                stmt.all = true;
                            } else {
                                stmt.triggers = p.comma_separated(Self::expect_identifier)?;
                            }
                            Ok(())
                        },
                    ))
                } else if self.peek_is_word("FILETABLE_NAMESPACE") {
                    self.advance();
                    self.advance();
                    Statement::AlterTableFileTableNamespace(AlterTableFileTableNamespaceStatement {
                        name,
                        enable,
                    })
                } else if self.peek_is_word("CHANGE_TRACKING") {
                    Statement::AlterTableChangeTracking(self.lenient(
                        |p, stmt: &mut AlterTableChangeTrackingStatement| {
                            stmt.name = name;
                            stmt.enable = enable;
                            p.advance();
                            p.advance();
                            p.fill_change_tracking(stmt)
                        },
                    ))
                } else {
                    self.unknown_alter_table_action(name)
                }
            }
            "SWITCH" => {
                Statement::AlterTableSwitch(self.lenient(|p, stmt: &mut AlterTableSwitchStatement| {
                    stmt.name = name;
                    p.advance();
                    p.fill_switch(stmt)
                }))
            }
            "REBUILD" => Statement::AlterTableRebuild(self.lenient(
                |p, stmt: &mut AlterTableRebuildStatement| {
                    stmt.name = name;
                    p.advance();
                    let (partition, all_partitions) = p.parse_partition_selector()?;
                    stmt.partition = partition;
                    stmt.all_partitions = all_partitions;
                    stmt.options = p.parse_with_option_list(&INDEX_OPTIONS)?;
                    Ok(())
                },
            )),
            _ => self.unknown_alter_table_action(name),
        }
    }

    /// `WITH CHECK` / `WITH NOCHECK` before `ADD` or a constraint toggle.
    fn parse_with_check(&mut self) -> Option<bool> {
        if !self.check_keyword(Keyword::With) {
            return None;
        }
        if self.peek_keyword(Keyword::Check) {
            self.advance();
            self.advance();
            Some(true)
        } else if self.peek_keyword(Keyword::NoCheck) {
            self.advance();
            self.advance();
            Some(false)
        } else {
            None
        }
    }

    /// `ADD element, ...` where an element is a column, a table constraint,
    /// an index or `PERIOD FOR SYSTEM_TIME`. Elements parsed before an error
    /// are kept.
    fn fill_alter_table_add(&mut self, stmt: &mut AlterTableAddStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Add)?;
        let mut definition = TableDefinition::default();
        let result = self.parse_added_elements(&mut definition);
        stmt.columns = definition.columns;
        stmt.constraints = definition.constraints;
        stmt.indexes = definition.indexes;
        stmt.system_time_period = definition.system_time_period;
        result
    }

    fn parse_added_elements(&mut self, definition: &mut TableDefinition) -> PResult<()> {
        loop {
            if self.check_keyword(Keyword::Default) {
                definition.constraints.push(self.parse_constraint()?);
            } else {
                self.parse_table_element(definition)?;
            }
            if !self.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// `[COLUMN | CONSTRAINT | INDEX] [IF EXISTS] name [WITH (...)]`. The
    /// kind applies to this element only.
    fn parse_drop_element(&mut self) -> PResult<AlterTableDropElement> {
        let kind = if self.eat_keyword(Keyword::Column) {
            DropElementKind::Column
        } else if self.eat_keyword(Keyword::Constraint) {
            DropElementKind::Constraint
        } else if self.eat_keyword(Keyword::Index) {
            DropElementKind::Index
        } else {
            DropElementKind::NotSpecified
        };
        let mut if_exists = self.eat_if_exists()?;
        let name = self.expect_identifier()?;
        if !if_exists {
            if_exists = self.eat_if_exists()?;
        }
        Ok(AlterTableDropElement {
            kind,
            name,
            if_exists,
            options: self.parse_with_option_list(&INDEX_OPTIONS)?,
        })
    }

    /// After `ALTER COLUMN`: `name {ADD | DROP} flag` or `name type
    /// [COLLATE c] [modifiers] [NULL | NOT NULL] [WITH (...)]`.
    fn fill_alter_column(&mut self, stmt: &mut AlterTableAlterColumnStatement) -> PResult<()> {
        stmt.column = self.expect_identifier()?;
        if self.eat_keyword(Keyword::Add) {
            let flag = self.parse_alter_column_flag()?;
            if flag == AlterColumnFlag::Masked {
                stmt.masking_function = Some(self.parse_masking_function()?);
            }
            stmt.add_flag = Some(flag);
            return Ok(());
        }
        if self.eat_keyword(Keyword::Drop) {
            stmt.drop_flag = Some(self.parse_alter_column_flag()?);
            return Ok(());
        }
        stmt.data_type = Some(self.parse_data_type()?);
        loop {
            if self.eat_keyword(Keyword::Collate) {
                stmt.collation = Some(self.expect_identifier()?);
            } else if let Some(nullable) = self.parse_nullability() {
                stmt.nullable = Some(nullable);
            } else if self.eat_word("SPARSE") {
                stmt.sparse = SparseKind::Sparse;
            } else if self.eat_word("COLUMN_SET") {
                self.expect_keyword(Keyword::For)?;
                self.expect_word("ALL_SPARSE_COLUMNS")?;
                stmt.sparse = SparseKind::ColumnSetForAllSparseColumns;
            } else if self.eat_word("FILESTREAM") {
                stmt.filestream = true;
            } else if self.eat_word("HIDDEN") {
                stmt.hidden = true;
            } else if self.eat_word("ENCRYPTED") {
                stmt.encryption = Some(self.parse_column_encryption()?);
            } else if self.eat_word("MASKED") {
                stmt.masking_function = Some(self.parse_masking_function()?);
            } else {
                break;
            }
        }
        stmt.options = self.parse_with_option_list(&INDEX_OPTIONS)?;
        Ok(())
    }

    fn parse_alter_column_flag(&mut self) -> PResult<AlterColumnFlag> {
        if self.eat_keyword(Keyword::RowGuidCol) {
            return Ok(AlterColumnFlag::RowGuidCol);
        }
        if self.eat_not_for_replication()? {
            return Ok(AlterColumnFlag::NotForReplication);
        }
        let flag = match self.literal_upper().as_str() {
            "PERSISTED" => AlterColumnFlag::Persisted,
            "SPARSE" => AlterColumnFlag::Sparse,
            "HIDDEN" => AlterColumnFlag::Hidden,
            "MASKED" => AlterColumnFlag::Masked,
            _ => return Err(self.error_here("column flag")),
        };
        self.advance();
        Ok(flag)
    }

    /// `[WITH (TRACK_COLUMNS_UPDATED = ON|OFF)]`
    fn fill_change_tracking(
        &mut self,
        stmt: &mut AlterTableChangeTrackingStatement,
    ) -> PResult<()> {
        if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
            self.advance();
            self.parenthesized(|p| {
                p.expect_word("TRACK_COLUMNS_UPDATED")?;
                p.expect(TokenKind::Eq)?;
                stmt.track_columns_updated = p.parse_option_state()?;
                Ok(())
            })?;
        }
        Ok(())
    }

    /// After `SWITCH`: `[PARTITION n] TO target [PARTITION m] [WITH (...)]`
    fn fill_switch(&mut self, stmt: &mut AlterTableSwitchStatement) -> PResult<()> {
        if self.eat_word("PARTITION") {
            stmt.source_partition = Some(self.parse_scalar_expression()?);
        }
        self.expect_keyword(Keyword::To)?;
        stmt.target = self.parse_schema_object_name()?;
        if self.eat_word("PARTITION") {
            stmt.target_partition = Some(self.parse_scalar_expression()?);
        }
        stmt.options = self.parse_with_option_list(&SWITCH_OPTIONS)?;
        Ok(())
    }

    /// `{CHECK | NOCHECK} CONSTRAINT {ALL | name, ...}`
    fn fill_constraint_modification(
        &mut self,
        stmt: &mut AlterTableConstraintModificationStatement,
    ) -> PResult<()> {
        stmt.enable = self.eat_keyword(Keyword::Check);
        if !stmt.enable {
            self.expect_keyword(Keyword::NoCheck)?;
        }
        self.expect_keyword(Keyword::Constraint)?;
        if self.eat_keyword(Keyword::All) {
            stmt.all = true;
        } else {
            stmt.constraints = self.comma_separated(Self::expect_identifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ConstraintKind, ForeignKeyAction, IndexOption, Nullability, OptionState, TableOption,
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
    fn add_foreign_key() {
        let Statement::AlterTableAdd(add) = single(
            "ALTER TABLE t ADD CONSTRAINT fk FOREIGN KEY (a, b) REFERENCES u(x, y) \
             ON DELETE CASCADE NOT FOR REPLICATION;",
        ) else {
            panic!("expected AlterTableAdd");
        };
        assert_eq!(add.name.base_name(), "t");
        assert_eq!(add.constraints.len(), 1);
        let constraint = &add.constraints[0];
        assert_eq!(constraint.name.as_ref().unwrap().value, "fk");
        let ConstraintKind::ForeignKey(fk) = &constraint.kind else {
            panic!("expected a foreign key");
        };
        let columns: Vec<_> = fk.columns.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(columns, ["a", "b"]);
        assert_eq!(fk.referenced_table.base_name(), "u");
        let referenced: Vec<_> = fk.referenced_columns.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(referenced, ["x", "y"]);
        assert_eq!(fk.delete_action, ForeignKeyAction::Cascade);
        assert!(fk.not_for_replication);
    }

    #[test]
    fn add_mixed_elements_with_nocheck() {
        let Statement::AlterTableAdd(add) = single(
            "ALTER TABLE dbo.t WITH NOCHECK ADD c INT NULL, \
             CONSTRAINT ck CHECK (c > 0), DEFAULT 0 FOR c, INDEX ix (c)",
        ) else {
            panic!("expected AlterTableAdd");
        };
        assert_eq!(add.with_check, Some(false));
        assert_eq!(add.columns.len(), 1);
        assert_eq!(add.constraints.len(), 2);
        assert_eq!(add.indexes.len(), 1);
    }

    #[test]
    fn add_without_constraint_body_keeps_the_statement() {
        let (statements, errors) = parse("ALTER TABLE t ADD CONSTRAINT pk; SELECT 1");
        assert_eq!(errors, 1);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(tags, ["AlterTableAdd", "Select"]);
    }

    #[test]
    fn drop_element_kinds() {
        let Statement::AlterTableDrop(drop) =
            single("ALTER TABLE t DROP COLUMN a, CONSTRAINT c, INDEX i;")
        else {
            panic!("expected AlterTableDrop");
        };
        let kinds: Vec<_> = drop.elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                DropElementKind::Column,
                DropElementKind::Constraint,
                DropElementKind::Index
            ]
        );

        let Statement::AlterTableDrop(drop) = single(
            "ALTER TABLE t DROP COLUMN IF EXISTS a, pk_t WITH (ONLINE = ON, MAXDOP = 2)",
        ) else {
            panic!("expected AlterTableDrop");
        };
        assert!(drop.elements[0].if_exists);
        assert_eq!(drop.elements[1].kind, DropElementKind::NotSpecified);
        assert_eq!(drop.elements[1].options.len(), 2);
    }

    #[test]
    fn alter_column_forms() {
        let Statement::AlterTableAlterColumn(column) = single(
            "ALTER TABLE t ALTER COLUMN name NVARCHAR(200) COLLATE Latin1_General_CI_AS NOT NULL \
             WITH (ONLINE = ON)",
        ) else {
            panic!("expected AlterTableAlterColumn");
        };
        assert_eq!(column.column.value, "name");
        assert_eq!(column.collation.unwrap().value, "Latin1_General_CI_AS");
        assert_eq!(column.nullable, Some(Nullability::NotNull));
        assert_eq!(column.options.len(), 1);

        let Statement::AlterTableAlterColumn(column) =
            single("ALTER TABLE t ALTER COLUMN id ADD ROWGUIDCOL")
        else {
            panic!("expected AlterTableAlterColumn");
        };
        assert_eq!(column.add_flag, Some(AlterColumnFlag::RowGuidCol));

        let Statement::AlterTableAlterColumn(column) =
            single("ALTER TABLE t ALTER COLUMN id DROP NOT FOR REPLICATION")
        else {
            panic!("expected AlterTableAlterColumn");
        };
        assert_eq!(column.drop_flag, Some(AlterColumnFlag::NotForReplication));

        let Statement::AlterTableAlterColumn(column) = single(
            "ALTER TABLE t ALTER COLUMN email ADD MASKED WITH (FUNCTION = 'email()')",
        ) else {
            panic!("expected AlterTableAlterColumn");
        };
        assert!(column.masking_function.is_some());
    }

    #[test]
    fn toggles() {
        let (statements, errors) = parse(
            "ALTER TABLE t DISABLE TRIGGER ALL;\
             ALTER TABLE t ENABLE TRIGGER tr_a, tr_b;\
             ALTER TABLE t ENABLE FILETABLE_NAMESPACE;\
             ALTER TABLE t ENABLE CHANGE_TRACKING WITH (TRACK_COLUMNS_UPDATED = ON);\
             ALTER TABLE t WITH CHECK CHECK CONSTRAINT ALL;\
             ALTER TABLE t NOCHECK CONSTRAINT fk_a, fk_b;",
        );
        assert_eq!(errors, 0);
        let tags: Vec<_> = statements.iter().map(Statement::tag).collect();
        assert_eq!(
            tags,
            [
                "AlterTableTriggerModification",
                "AlterTableTriggerModification",
                "AlterTableFileTableNamespace",
                "AlterTableChangeTracking",
                "AlterTableConstraintModification",
                "AlterTableConstraintModification",
            ]
        );
        let Statement::AlterTableTriggerModification(triggers) = &statements[1] else {
            unreachable!()
        };
        assert!(triggers.enable);
        assert_eq!(triggers.triggers.len(), 2);
        let Statement::AlterTableChangeTracking(tracking) = &statements[3] else {
            unreachable!()
        };
        assert_eq!(tracking.track_columns_updated, OptionState::On);
        let Statement::AlterTableConstraintModification(check) = &statements[4] else {
            unreachable!()
        };
        assert_eq!(check.with_check, Some(true));
        assert!(check.enable && check.all);
        let Statement::AlterTableConstraintModification(nocheck) = &statements[5] else {
            unreachable!()
        };
        assert!(!nocheck.enable);
        assert_eq!(nocheck.constraints.len(), 2);
    }

    #[test]
    fn switch_set_rebuild_alter_index() {
        let Statement::AlterTableSwitch(switch) = single(
            "ALTER TABLE staging SWITCH PARTITION 2 TO dbo.facts PARTITION 2 \
             WITH (TRUNCATE_TARGET = ON, WAIT_AT_LOW_PRIORITY (MAX_DURATION = 1 MINUTES, \
             ABORT_AFTER_WAIT = SELF))",
        ) else {
            panic!("expected AlterTableSwitch");
        };
        assert_eq!(switch.target.base_name(), "facts");
        assert!(switch.source_partition.is_some() && switch.target_partition.is_some());
        assert_eq!(switch.options.len(), 2);
        assert_eq!(switch.options[0], SwitchOption::TruncateTarget(OptionState::On));

        let Statement::AlterTableSet(set) =
            single("ALTER TABLE t SET (LOCK_ESCALATION = AUTO, FILETABLE_DIRECTORY = 'docs')")
        else {
            panic!("expected AlterTableSet");
        };
        assert_eq!(set.options.len(), 2);
        assert!(matches!(set.options[0], TableOption::LockEscalation(_)));

        let Statement::AlterTableRebuild(rebuild) =
            single("ALTER TABLE t REBUILD PARTITION = ALL WITH (DATA_COMPRESSION = PAGE)")
        else {
            panic!("expected AlterTableRebuild");
        };
        assert!(rebuild.all_partitions);
        assert!(matches!(rebuild.options[0], IndexOption::DataCompression { .. }));

        let Statement::AlterTableAlterIndex(index) =
            single("ALTER TABLE t ALTER INDEX ix_a REBUILD WITH (FILLFACTOR = 90)")
        else {
            panic!("expected AlterTableAlterIndex");
        };
        assert_eq!(index.action, "Rebuild");
        assert_eq!(index.index.value, "ix_a");
    }

    #[test]
    fn unknown_action_keeps_the_table_name() {
        let (statements, errors) = parse("ALTER TABLE dbo.t FROB x; SELECT 1");
        assert_eq!(errors, 1);
        assert_eq!(statements.len(), 2);
        let Statement::AlterTable(alter) = &statements[0] else {
            panic!("expected AlterTable, got {:?}", statements[0]);
        };
        assert_eq!(alter.name.schema_name(), Some("dbo"));
        assert_eq!(alter.name.base_name(), "t");
        assert!(matches!(statements[1], Statement::Select(_)));

        let (statements, errors) = parse("ALTER TABLE t WITH CHECK SET (LOCK_ESCALATION = AUTO)");
        assert_eq!(errors, 1);
        assert_eq!(statements[0].tag(), "AlterTable");
    }
}
