//! Index statements: `CREATE [UNIQUE] [CLUSTERED|NONCLUSTERED] [COLUMNSTORE]
//! INDEX`, XML and spatial indexes, statistics, full-text indexes and
//! `ALTER INDEX`.

use super::cursor::Parser;
use super::error::PResult;
use super::options::{OptionTable, GENERIC_OPTIONS, INDEX_OPTIONS};
use crate::ast::{
    option_kind_from_name, AlterIndexAction, AlterIndexStatement, CreateFullTextIndexStatement,
    CreateIndexStatement, CreateSpatialIndexStatement, CreateStatisticsStatement,
    CreateXmlIndexStatement, FullTextIndexColumn, GenericOption, IndexOption, OptionBag,
    OptionValue, ScalarExpression, SecondaryXmlIndexKind, Statement,
};
use crate::lexer::{Keyword, TokenKind};

const SPATIAL_OPTIONS: OptionTable<GenericOption> = OptionTable {
    entries: &[("BOUNDING_BOX", positional_list_option)],
    fallback: Some(spatial_generic_option),
};

fn spatial_generic_option(p: &mut Parser, name: &str) -> PResult<GenericOption> {
    p.eat(TokenKind::Eq);
    let value = if p.check(TokenKind::LeftParen) {
        Some(OptionValue::List(p.parse_positional_list()?))
    } else {
        Some(p.parse_option_value()?)
    };
    Ok(GenericOption {
        option_kind: option_kind_from_name(name),
        value,
    })
}

/// `BOUNDING_BOX = (xmin, ymin, xmax, ymax)` or the named form.
fn positional_list_option(p: &mut Parser, name: &str) -> PResult<GenericOption> {
    p.expect(TokenKind::Eq)?;
    Ok(GenericOption {
        option_kind: option_kind_from_name(name),
        value: Some(OptionValue::List(p.parse_positional_list()?)),
    })
}

impl Parser {
    /// True at the first word of a `CREATE ... INDEX` form handled here.
    pub(crate) fn at_index_prefix(&self) -> bool {
        match self.kind() {
            TokenKind::Keyword(
                Keyword::Unique | Keyword::Clustered | Keyword::NonClustered | Keyword::Index,
            ) => true,
            TokenKind::Keyword(Keyword::Primary) => self.peek_is_word("XML"),
            _ => {
                self.is_word("COLUMNSTORE")
                    || self.is_word("SPATIAL")
                    || (self.is_word("XML") && self.peek_keyword(Keyword::Index))
            }
        }
    }

    /// Dispatches on the prefix [`Parser::at_index_prefix`] accepted.
    pub(crate) fn parse_create_index_statement(&mut self) -> Statement {
        if self.check_keyword(Keyword::Primary) || self.is_word("XML") {
            Statement::CreateXmlIndex(self.lenient(Self::fill_create_xml_index))
        } else if self.eat_word("SPATIAL") {
            Statement::CreateSpatialIndex(self.lenient(Self::fill_create_spatial_index))
        } else {
            Statement::CreateIndex(self.lenient(Self::fill_create_index))
        }
    }

    /// `[UNIQUE] [CLUSTERED|NONCLUSTERED] [COLUMNSTORE] INDEX name ON object
    /// [(cols)] [INCLUDE (cols)] [WHERE filter] [WITH options] [ON fg]
    /// [FILESTREAM_ON fg]`
    pub(crate) fn fill_create_index(&mut self, stmt: &mut CreateIndexStatement) -> PResult<()> {
        stmt.unique = self.eat_keyword(Keyword::Unique);
        stmt.clustered = self.parse_clustered();
        stmt.columnstore = self.eat_word("COLUMNSTORE");
        self.expect_keyword(Keyword::Index)?;
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            stmt.columns = self.parse_sorted_column_list()?;
        }
        if self.eat_word("INCLUDE") {
            stmt.include = self.parse_identifier_list()?;
        }
        if self.eat_keyword(Keyword::Where) {
            stmt.filter = Some(self.parse_boolean_expression()?);
        }
        stmt.options = self.parse_index_with_options()?;
        stmt.on = self.parse_optional_on_filegroup()?;
        if self.eat_word("FILESTREAM_ON") {
            stmt.filestream_on = Some(self.parse_filegroup_name()?);
        }
        Ok(())
    }

    /// `WITH (opt, ...)` or the legacy unparenthesized `WITH opt, ...`.
    fn parse_index_with_options(&mut self) -> PResult<Vec<IndexOption>> {
        if !self.check_keyword(Keyword::With) {
            return Ok(Vec::new());
        }
        if self.peek().kind == TokenKind::LeftParen {
            return self.parse_with_option_list(&INDEX_OPTIONS);
        }
        self.advance();
        let options = self.comma_separated(|p| p.parse_option_entry(&INDEX_OPTIONS))?;
        Ok(options.into_iter().flatten().collect())
    }

    /// `[PRIMARY] XML INDEX name ON table (column) [USING XML INDEX name
    /// [FOR {VALUE|PATH|PROPERTY}]] [WITH (...)]`
    pub(crate) fn fill_create_xml_index(
        &mut self,
        stmt: &mut CreateXmlIndexStatement,
    ) -> PResult<()> {
        stmt.primary = self.eat_keyword(Keyword::Primary);
        self.expect_word("XML")?;
        self.expect_keyword(Keyword::Index)?;
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        stmt.column = self.parenthesized(Self::expect_identifier)?;
        if self.eat_word("USING") {
            self.expect_word("XML")?;
            self.expect_keyword(Keyword::Index)?;
            stmt.using_index = Some(self.expect_identifier()?);
            if self.eat_keyword(Keyword::For) {
                stmt.secondary_kind = Some(match self.expect_any_word()?.as_str() {
                    "VALUE" => SecondaryXmlIndexKind::Value,
                    "PATH" => SecondaryXmlIndexKind::Path,
                    "PROPERTY" => SecondaryXmlIndexKind::Property,
                    _ => return Err(self.error_message("expected VALUE, PATH or PROPERTY")),
                });
            }
        }
        stmt.options = self.parse_with_option_list(&INDEX_OPTIONS)?;
        Ok(())
    }

    /// After `SPATIAL`: `INDEX name ON table (column) [USING tessellation]
    /// [WITH (...)] [ON fg]`
    pub(crate) fn fill_create_spatial_index(
        &mut self,
        stmt: &mut CreateSpatialIndexStatement,
    ) -> PResult<()> {
        self.expect_keyword(Keyword::Index)?;
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        stmt.column = self.parenthesized(Self::expect_identifier)?;
        if self.eat_word("USING") {
            stmt.using = Some(self.expect_identifier()?);
        }
        stmt.options = self.parse_with_option_list(&SPATIAL_OPTIONS)?;
        stmt.on = self.parse_optional_on_filegroup()?;
        Ok(())
    }

    /// `( value | name = value, ... )` where bare values get the kind
    /// `Value`.
    fn parse_positional_list(&mut self) -> PResult<OptionBag> {
        self.parenthesized_list(|p| {
            if p.at_word() && p.peek().kind == TokenKind::Eq {
                let name = p.expect_any_word()?;
                p.advance();
                return Ok(GenericOption {
                    option_kind: option_kind_from_name(&name),
                    value: Some(p.parse_option_value()?),
                });
            }
            Ok(GenericOption {
                option_kind: "Value".to_string(),
                value: Some(p.parse_option_value()?),
            })
        })
    }

    /// After `STATISTICS`: `name ON object (cols) [WHERE filter]
    /// [WITH FULLSCAN | SAMPLE n {PERCENT|ROWS} | NORECOMPUTE | ...]`
    pub(crate) fn fill_create_statistics(
        &mut self,
        stmt: &mut CreateStatisticsStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        stmt.columns = self.parse_identifier_list()?;
        if self.eat_keyword(Keyword::Where) {
            stmt.filter = Some(self.parse_boolean_expression()?);
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(|p| {
                let option = p.parse_generic_option()?;
                p.eat_word("ROWS");
                Ok(option)
            })?;
        }
        Ok(())
    }

    /// After `FULLTEXT INDEX`: `ON table (col [TYPE COLUMN c] [LANGUAGE l]
    /// [STATISTICAL_SEMANTICS], ...) KEY INDEX ix [ON catalog | ON (catalog,
    /// FILEGROUP fg)] [WITH options]`
    pub(crate) fn fill_create_fulltext_index(
        &mut self,
        stmt: &mut CreateFullTextIndexStatement,
    ) -> PResult<()> {
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            stmt.columns = self.parenthesized_list(Self::parse_fulltext_column)?;
        }
        self.expect_keyword(Keyword::Key)?;
        self.expect_keyword(Keyword::Index)?;
        stmt.key_index = Some(self.expect_identifier()?);
        if self.eat_keyword(Keyword::On) {
            if self.check(TokenKind::LeftParen) {
                stmt.catalog_and_file_group = self.parenthesized_list(|p| {
                    p.eat_word("FILEGROUP");
                    p.parse_filegroup_name()
                })?;
            } else {
                stmt.catalog_and_file_group = vec![self.parse_filegroup_name()?];
            }
        }
        if self.check_keyword(Keyword::With) {
            if self.peek().kind == TokenKind::LeftParen {
                stmt.options = self.parse_with_option_list(&GENERIC_OPTIONS)?;
            } else {
                self.advance();
                stmt.options = self.comma_separated(Self::parse_generic_option)?;
            }
        }
        Ok(())
    }

    fn parse_fulltext_column(&mut self) -> PResult<FullTextIndexColumn> {
        let mut column = FullTextIndexColumn {
            name: self.expect_identifier()?,
            ..FullTextIndexColumn::default()
        };
        loop {
            if self.eat_word("TYPE") {
                self.expect_keyword(Keyword::Column)?;
                column.type_column = Some(self.expect_identifier()?);
            } else if self.eat_word("LANGUAGE") {
                column.language = Some(self.parse_primary()?);
            } else if self.eat_word("STATISTICAL_SEMANTICS") {
                column.statistical_semantics = true;
            } else {
                return Ok(column);
            }
        }
    }

    /// After `ALTER INDEX`: `{name | ALL} ON object action`
    pub(crate) fn fill_alter_index(&mut self, stmt: &mut AlterIndexStatement) -> PResult<()> {
        stmt.name = if self.eat_keyword(Keyword::All) {
            None
        } else {
            Some(self.expect_identifier()?)
        };
        self.expect_keyword(Keyword::On)?;
        stmt.on_name = self.parse_schema_object_name()?;
        stmt.action = match self.expect_any_word()?.as_str() {
            "REBUILD" => {
                let (partition, all_partitions) = self.parse_partition_selector()?;
                AlterIndexAction::Rebuild {
                    partition,
                    all_partitions,
                    options: self.parse_index_with_options()?,
                }
            }
            "REORGANIZE" => {
                let (partition, _) = self.parse_partition_selector()?;
                AlterIndexAction::Reorganize {
                    partition,
                    options: self.parse_with_option_list(&INDEX_OPTIONS)?,
                }
            }
            "DISABLE" => AlterIndexAction::Disable,
            "SET" => AlterIndexAction::Set(self.parse_option_list(&INDEX_OPTIONS)?),
            "RESUME" => AlterIndexAction::Resume(self.parse_with_option_list(&INDEX_OPTIONS)?),
            "PAUSE" => AlterIndexAction::Pause,
            "ABORT" => AlterIndexAction::Abort,
            _ => return Err(self.error_message("unknown ALTER INDEX action")),
        };
        Ok(())
    }

    /// `[PARTITION = {n | ALL}]`
    pub(crate) fn parse_partition_selector(
        &mut self,
    ) -> PResult<(Option<ScalarExpression>, bool)> {
        if !self.eat_word("PARTITION") {
            return Ok((None, false));
        }
        self.expect(TokenKind::Eq)?;
        if self.eat_keyword(Keyword::All) {
            return Ok((None, true));
        }
        Ok((Some(self.parse_scalar_expression()?), false))
    }
}
