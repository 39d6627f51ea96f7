//! Option blocks: `WITH ( opt [= value], ... )` and its relatives.
//!
//! Each option family is described by an [`OptionTable`]: a list of option
//! names with the routine that parses the rest of the entry, plus an optional
//! fallback for names the table does not list. The list routine consumes the
//! option name and hands the upper-cased name to the entry's routine, which
//! then reads an optional `=` and the value.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{
    option_kind_from_name, AbortAfterWait, BulkInsertOption, ColumnWithSortOrder,
    DataCompressionLevel, DurabilityKind, FileGroupOrPartitionScheme, GenericOption, Identifier,
    IndexOption, LockEscalationKind, LowPriorityLockWaitOption, OptionState, OptionValue,
    PartitionRange, RetentionPeriod, SchemaObjectName, TableOption, Unit,
};
use crate::lexer::{Keyword, TokenKind};

/// Parses the remainder of one option entry after its name.
pub(crate) type OptionParser<T> = fn(&mut Parser, &str) -> PResult<T>;

/// Dispatch table for one option family.
pub(crate) struct OptionTable<T: 'static> {
    pub(crate) entries: &'static [(&'static str, OptionParser<T>)],
    /// Used for names missing from `entries`. Without one, unknown entries
    /// are skipped up to the next `,` or `)`.
    pub(crate) fallback: Option<OptionParser<T>>,
}

impl<T: 'static> OptionTable<T> {
    fn lookup(&self, name: &str) -> Option<OptionParser<T>> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, parse)| *parse)
            .or(self.fallback)
    }
}

pub(crate) const GENERIC_OPTIONS: OptionTable<GenericOption> = OptionTable {
    entries: &[],
    fallback: Some(generic_option_body),
};

pub(crate) const INDEX_OPTIONS: OptionTable<IndexOption> = OptionTable {
    entries: &[
        ("ONLINE", online_option),
        ("WAIT_AT_LOW_PRIORITY", wait_at_low_priority_option),
        ("DATA_COMPRESSION", index_data_compression_option),
        ("XML_COMPRESSION", xml_compression_option),
        ("MOVE", move_to_option),
        ("FILESTREAM_ON", index_filestream_on_option),
        ("MAX_DURATION", max_duration_option),
    ],
    fallback: Some(index_state_or_value),
};

pub(crate) const TABLE_OPTIONS: OptionTable<TableOption> = OptionTable {
    entries: &[
        ("DATA_COMPRESSION", table_data_compression_option),
        ("SYSTEM_VERSIONING", system_versioning_option),
        ("MEMORY_OPTIMIZED", memory_optimized_option),
        ("DURABILITY", durability_option),
        ("LOCK_ESCALATION", lock_escalation_option),
        ("FILESTREAM_ON", table_filestream_on_option),
        ("REMOTE_DATA_ARCHIVE", remote_data_archive_option),
    ],
    fallback: Some(generic_table_option),
};

fn generic_option_body(p: &mut Parser, name: &str) -> PResult<GenericOption> {
    let value = if p.eat(TokenKind::Eq) {
        Some(p.parse_option_value()?)
    } else if p.check(TokenKind::LeftParen) {
        Some(OptionValue::List(p.parse_option_list(&GENERIC_OPTIONS)?))
    } else if p.check_keyword(Keyword::On) || p.check_keyword(Keyword::Off) {
        Some(OptionValue::State(p.parse_option_state()?))
    } else if matches!(
        p.kind(),
        TokenKind::Integer | TokenKind::Numeric | TokenKind::String | TokenKind::NationalString
    ) {
        Some(p.parse_option_value()?)
    } else {
        None
    };
    Ok(GenericOption {
        option_kind: option_kind_from_name(name),
        value,
    })
}

fn wait_at_low_priority_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    Ok(IndexOption::WaitAtLowPriority(p.parse_low_priority_options()?))
}

fn index_data_compression_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    let (level, partitions) = p.parse_data_compression()?;
    Ok(IndexOption::DataCompression { level, partitions })
}

fn xml_compression_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    p.eat(TokenKind::Eq);
    let state = p.parse_option_state()?;
    let partitions = p.parse_on_partitions()?;
    Ok(IndexOption::XmlCompression { state, partitions })
}

fn move_to_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    p.expect_keyword(Keyword::To)?;
    Ok(IndexOption::MoveTo(p.parse_filegroup_or_partition_scheme()?))
}

fn index_filestream_on_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    p.eat(TokenKind::Eq);
    Ok(IndexOption::FileStreamOn(p.parse_filegroup_name()?))
}

fn max_duration_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    p.eat(TokenKind::Eq);
    let value = p.parse_scalar_expression()?;
    let unit = p.parse_optional_unit();
    Ok(IndexOption::MaxDuration { value, unit })
}

fn table_data_compression_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    let (level, partitions) = p.parse_data_compression()?;
    Ok(TableOption::DataCompression { level, partitions })
}

fn memory_optimized_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.eat(TokenKind::Eq);
    Ok(TableOption::MemoryOptimized(p.parse_option_state()?))
}

fn durability_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.expect(TokenKind::Eq)?;
    let kind = match p.expect_any_word()?.as_str() {
        "SCHEMA_ONLY" => DurabilityKind::SchemaOnly,
        "SCHEMA_AND_DATA" => DurabilityKind::SchemaAndData,
        _ => return Err(p.error_message("expected SCHEMA_ONLY or SCHEMA_AND_DATA")),
    };
    Ok(TableOption::Durability(kind))
}

fn lock_escalation_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.expect(TokenKind::Eq)?;
    let kind = match p.expect_any_word()?.as_str() {
        "AUTO" => LockEscalationKind::Auto,
        "TABLE" => LockEscalationKind::Table,
        "DISABLE" => LockEscalationKind::Disable,
        _ => return Err(p.error_message("expected AUTO, TABLE or DISABLE")),
    };
    Ok(TableOption::LockEscalation(kind))
}

fn table_filestream_on_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.eat(TokenKind::Eq);
    Ok(TableOption::FileStreamOn(p.parse_filegroup_name()?))
}

fn remote_data_archive_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.eat(TokenKind::Eq);
    let state = p.parse_option_state()?;
    let settings = if p.check(TokenKind::LeftParen) {
        p.parse_option_list(&GENERIC_OPTIONS)?
    } else {
        Vec::new()
    };
    Ok(TableOption::RemoteDataArchive { state, settings })
}

fn generic_table_option(p: &mut Parser, name: &str) -> PResult<TableOption> {
    Ok(TableOption::Generic(generic_option_body(p, name)?))
}

fn online_option(p: &mut Parser, _: &str) -> PResult<IndexOption> {
    p.eat(TokenKind::Eq);
    let state = p.parse_option_state()?;
    let low_priority = if p.check(TokenKind::LeftParen) {
        Some(p.parenthesized(|p| {
            p.expect_word("WAIT_AT_LOW_PRIORITY")?;
            p.parse_low_priority_options()
        })?)
    } else {
        None
    };
    Ok(IndexOption::Online {
        state,
        low_priority,
    })
}

fn index_state_or_value(p: &mut Parser, name: &str) -> PResult<IndexOption> {
    let option_kind = option_kind_from_name(name);
    if !p.eat(TokenKind::Eq) {
        if p.check_keyword(Keyword::On) || p.check_keyword(Keyword::Off) {
            let state = p.parse_option_state()?;
            return Ok(IndexOption::State { option_kind, state });
        }
        return Ok(IndexOption::Generic(GenericOption {
            option_kind,
            value: None,
        }));
    }
    if p.check_keyword(Keyword::On) || p.check_keyword(Keyword::Off) {
        let state = p.parse_option_state()?;
        return Ok(IndexOption::State { option_kind, state });
    }
    if p.can_start_expression() && !p.at_word() {
        return Ok(IndexOption::Expression {
            option_kind,
            value: p.parse_scalar_expression()?,
        });
    }
    Ok(IndexOption::Generic(GenericOption {
        option_kind,
        value: Some(p.parse_option_value()?),
    }))
}

fn system_versioning_option(p: &mut Parser, _: &str) -> PResult<TableOption> {
    p.eat(TokenKind::Eq);
    let state = p.parse_option_state()?;
    let mut history_table = None;
    let mut data_consistency_check = None;
    let mut history_retention = None;
    if p.check(TokenKind::LeftParen) {
        p.parenthesized(|p| {
            loop {
                match p.expect_any_word()?.as_str() {
                    "HISTORY_TABLE" => {
                        p.expect(TokenKind::Eq)?;
                        history_table = Some(p.parse_schema_object_name()?);
                    }
                    "DATA_CONSISTENCY_CHECK" => {
                        p.expect(TokenKind::Eq)?;
                        data_consistency_check = Some(p.parse_option_state()?);
                    }
                    "HISTORY_RETENTION_PERIOD" => {
                        p.expect(TokenKind::Eq)?;
                        history_retention = Some(p.parse_retention_period()?);
                    }
                    _ => p.skip_option_value(),
                }
                if !p.eat(TokenKind::Comma) {
                    return Ok(());
                }
            }
        })?;
    }
    Ok(TableOption::SystemVersioning {
        state,
        history_table,
        data_consistency_check,
        history_retention,
    })
}

impl Parser {
    /// `( entry [, entry ...] )` dispatched through `table`. An empty list is
    /// allowed.
    pub(crate) fn parse_option_list<T>(&mut self, table: &OptionTable<T>) -> PResult<Vec<T>> {
        self.parenthesized(|p| {
            let mut options = Vec::new();
            while !p.check(TokenKind::RightParen) && !p.at_eof() {
                if let Some(option) = p.parse_option_entry(table)? {
                    options.push(option);
                }
                p.skip_option_value();
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            Ok(options)
        })
    }

    /// `WITH ( entry, ... )` if present, otherwise an empty list.
    pub(crate) fn parse_with_option_list<T>(
        &mut self,
        table: &OptionTable<T>,
    ) -> PResult<Vec<T>> {
        if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
            self.advance();
            self.parse_option_list(table)
        } else {
            Ok(Vec::new())
        }
    }

    /// One entry: the option name and whatever its routine reads. Returns
    /// `None` for a name the table neither lists nor falls back on; only the
    /// name is consumed then.
    pub(crate) fn parse_option_entry<T>(
        &mut self,
        table: &OptionTable<T>,
    ) -> PResult<Option<T>> {
        let name = if self.at_word() {
            self.advance().literal.to_ascii_uppercase()
        } else if self.at_identifier() {
            self.take_identifier().value.to_ascii_uppercase()
        } else {
            return Err(self.error_here("option name"));
        };
        match table.lookup(&name) {
            Some(parse) => parse(self, &name).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn parse_generic_option(&mut self) -> PResult<GenericOption> {
        let name = self.expect_any_word()?;
        generic_option_body(self, &name)
    }

    /// The value side of a generic option: a state, a nested list, a number
    /// with an optional unit, an expression or a bare word.
    pub(crate) fn parse_option_value(&mut self) -> PResult<OptionValue> {
        if self.check_keyword(Keyword::On) || self.check_keyword(Keyword::Off) {
            return Ok(OptionValue::State(self.parse_option_state()?));
        }
        if self.check(TokenKind::LeftParen) {
            return Ok(OptionValue::List(self.parse_option_list(&GENERIC_OPTIONS)?));
        }
        if matches!(self.kind(), TokenKind::Integer | TokenKind::Numeric) {
            let value = self.parse_primary()?;
            return Ok(match self.parse_optional_unit() {
                Some(unit) => OptionValue::Unit { value, unit },
                None => OptionValue::Expression(value),
            });
        }
        if self.at_identifier() {
            return Ok(OptionValue::Identifier(self.parse_schema_object_name()?));
        }
        if matches!(self.kind(), TokenKind::Keyword(k) if k != Keyword::Null) {
            let word = self.advance().literal;
            return Ok(OptionValue::Identifier(SchemaObjectName::single(word)));
        }
        Ok(OptionValue::Expression(self.parse_scalar_expression()?))
    }

    /// `ON` or `OFF`.
    pub(crate) fn parse_option_state(&mut self) -> PResult<OptionState> {
        if self.eat_keyword(Keyword::On) {
            Ok(OptionState::On)
        } else if self.eat_keyword(Keyword::Off) {
            Ok(OptionState::Off)
        } else {
            Err(self.error_here("ON or OFF"))
        }
    }

    /// A unit word such as `MINUTES` or `MB`, or `%`, if one follows.
    pub(crate) fn parse_optional_unit(&mut self) -> Option<Unit> {
        if self.eat(TokenKind::Percent) {
            return Some(Unit::Percent);
        }
        if !self.at_word() {
            return None;
        }
        let unit = Unit::from_word(&self.current().literal)?;
        self.advance();
        Some(unit)
    }

    /// `( MAX_DURATION = n [MINUTES], ABORT_AFTER_WAIT = NONE|SELF|BLOCKERS )`
    pub(crate) fn parse_low_priority_options(
        &mut self,
    ) -> PResult<Vec<LowPriorityLockWaitOption>> {
        self.parenthesized_list(|p| match p.expect_any_word()?.as_str() {
            "MAX_DURATION" => {
                p.expect(TokenKind::Eq)?;
                let value = p.parse_scalar_expression()?;
                let unit = p.parse_optional_unit();
                Ok(LowPriorityLockWaitOption::MaxDuration { value, unit })
            }
            "ABORT_AFTER_WAIT" => {
                p.expect(TokenKind::Eq)?;
                let target = match p.expect_any_word()?.as_str() {
                    "NONE" => AbortAfterWait::None,
                    "SELF" => AbortAfterWait::SelfSession,
                    "BLOCKERS" => AbortAfterWait::Blockers,
                    _ => return Err(p.error_message("expected NONE, SELF or BLOCKERS")),
                };
                Ok(LowPriorityLockWaitOption::AbortAfterWait(target))
            }
            _ => Err(p.error_message("expected MAX_DURATION or ABORT_AFTER_WAIT")),
        })
    }

    /// `= level [ON PARTITIONS (...)]`
    fn parse_data_compression(&mut self) -> PResult<(DataCompressionLevel, Vec<PartitionRange>)> {
        self.eat(TokenKind::Eq);
        let level = match self.expect_any_word()?.as_str() {
            "NONE" => DataCompressionLevel::None,
            "ROW" => DataCompressionLevel::Row,
            "PAGE" => DataCompressionLevel::Page,
            "COLUMNSTORE" => DataCompressionLevel::ColumnStore,
            "COLUMNSTORE_ARCHIVE" => DataCompressionLevel::ColumnStoreArchive,
            _ => return Err(self.error_message("unknown compression level")),
        };
        Ok((level, self.parse_on_partitions()?))
    }

    /// `[ON PARTITIONS ( n [TO m], ... )]`
    pub(crate) fn parse_on_partitions(&mut self) -> PResult<Vec<PartitionRange>> {
        if !(self.check_keyword(Keyword::On) && self.peek_is_word("PARTITIONS")) {
            return Ok(Vec::new());
        }
        self.advance();
        self.advance();
        self.parse_partition_ranges()
    }

    /// `( n [TO m], ... )`
    pub(crate) fn parse_partition_ranges(&mut self) -> PResult<Vec<PartitionRange>> {
        self.parenthesized_list(|p| {
            let from = p.parse_scalar_expression()?;
            let to = if p.eat_keyword(Keyword::To) {
                Some(p.parse_scalar_expression()?)
            } else {
                None
            };
            Ok(PartitionRange { from, to })
        })
    }

    /// `n {DAY|WEEK|MONTH|YEAR}[S]` or `INFINITE`.
    fn parse_retention_period(&mut self) -> PResult<RetentionPeriod> {
        if self.eat_word("INFINITE") {
            return Ok(RetentionPeriod::default());
        }
        let value = Some(self.parse_scalar_expression()?);
        let unit = self.parse_optional_unit();
        Ok(RetentionPeriod { value, unit })
    }

    /// A filegroup name; `"default"`, `[default]` and `'default'` all count.
    pub(crate) fn parse_filegroup_name(&mut self) -> PResult<Identifier> {
        match self.kind() {
            TokenKind::String | TokenKind::NationalString => {
                Ok(Identifier::new(self.expect_string()?))
            }
            TokenKind::Keyword(Keyword::Default) | TokenKind::Keyword(Keyword::Primary) => {
                Ok(self.take_identifier())
            }
            _ => self.expect_identifier(),
        }
    }

    /// `filegroup` or `scheme ( column [, ...] )`.
    pub(crate) fn parse_filegroup_or_partition_scheme(
        &mut self,
    ) -> PResult<FileGroupOrPartitionScheme> {
        let name = self.parse_filegroup_name()?;
        let columns = if self.check(TokenKind::LeftParen) {
            self.parse_identifier_list()?
        } else {
            Vec::new()
        };
        Ok(FileGroupOrPartitionScheme { name, columns })
    }

    /// `[ON filegroup | scheme(col)]`
    pub(crate) fn parse_optional_on_filegroup(
        &mut self,
    ) -> PResult<Option<FileGroupOrPartitionScheme>> {
        if self.eat_keyword(Keyword::On) {
            Ok(Some(self.parse_filegroup_or_partition_scheme()?))
        } else {
            Ok(None)
        }
    }

    /// `( col [ASC|DESC], ... )`
    pub(crate) fn parse_sorted_column_list(&mut self) -> PResult<Vec<ColumnWithSortOrder>> {
        self.parenthesized_list(|p| {
            let column = p.parse_column_reference()?;
            let sort_order = p.parse_sort_order();
            Ok(ColumnWithSortOrder { column, sort_order })
        })
    }

    /// One option of `BULK INSERT`, `INSERT BULK` or `OPENROWSET(BULK ...)`.
    pub(crate) fn parse_bulk_option(&mut self) -> PResult<BulkInsertOption> {
        if self.eat_keyword(Keyword::Order) {
            let columns = self.parse_sorted_column_list()?;
            let unique = self.eat_keyword(Keyword::Unique);
            return Ok(BulkInsertOption::Order { columns, unique });
        }
        let option_kind = option_kind_from_name(&self.expect_any_word()?);
        if self.eat(TokenKind::Eq) {
            let value = self.parse_scalar_expression()?;
            return Ok(BulkInsertOption::Value { option_kind, value });
        }
        Ok(BulkInsertOption::Flag { option_kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, ScalarExpression};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn online_with_low_priority_wait() {
        let options = parser(
            "(ONLINE = ON (WAIT_AT_LOW_PRIORITY (MAX_DURATION = 5 MINUTES, \
             ABORT_AFTER_WAIT = BLOCKERS)))",
        )
        .parse_option_list(&INDEX_OPTIONS)
        .unwrap();
        let [IndexOption::Online {
            state,
            low_priority: Some(waits),
        }] = options.as_slice()
        else {
            panic!("expected one ONLINE option, got {options:?}");
        };
        assert_eq!(*state, OptionState::On);
        assert_eq!(
            waits[0],
            LowPriorityLockWaitOption::MaxDuration {
                value: ScalarExpression::integer("5"),
                unit: Some(Unit::Minutes),
            }
        );
        assert_eq!(
            waits[1],
            LowPriorityLockWaitOption::AbortAfterWait(AbortAfterWait::Blockers)
        );
    }

    #[test]
    fn index_option_shapes() {
        let options = parser(
            "(PAD_INDEX = ON, FILLFACTOR = 80, DATA_COMPRESSION = PAGE ON PARTITIONS \
             (1, 3 TO 5), MOVE TO ps(id), SORT_IN_TEMPDB)",
        )
        .parse_option_list(&INDEX_OPTIONS)
        .unwrap();
        let kinds: Vec<_> = options.iter().map(IndexOption::option_kind).collect();
        assert_eq!(
            kinds,
            ["PadIndex", "FillFactor", "DataCompression", "MoveTo", "SortInTempdb"]
        );
        assert!(matches!(
            &options[1],
            IndexOption::Expression { value, .. }
                if value.as_literal() == Some(&Literal::Integer("80".into()))
        ));
        let IndexOption::DataCompression { level, partitions } = &options[2] else {
            panic!("expected DATA_COMPRESSION");
        };
        assert_eq!(*level, DataCompressionLevel::Page);
        assert!(partitions[1].to.is_some());
    }

    #[test]
    fn table_options() {
        let options = parser(
            "(SYSTEM_VERSIONING = ON (HISTORY_TABLE = dbo.h, \
             HISTORY_RETENTION_PERIOD = 6 MONTHS), MEMORY_OPTIMIZED = ON, \
             DURABILITY = SCHEMA_ONLY, LOCK_ESCALATION = AUTO, \
             LEDGER = ON)",
        )
        .parse_option_list(&TABLE_OPTIONS)
        .unwrap();
        let TableOption::SystemVersioning {
            history_table,
            history_retention,
            ..
        } = &options[0]
        else {
            panic!("expected SYSTEM_VERSIONING");
        };
        assert_eq!(history_table.as_ref().map(|t| t.base_name()), Some("h"));
        assert_eq!(
            history_retention.as_ref().and_then(|r| r.unit),
            Some(Unit::Months)
        );
        assert_eq!(options[2], TableOption::Durability(DurabilityKind::SchemaOnly));
        assert_eq!(options[4].option_kind(), "Ledger");
    }

    #[test]
    fn generic_values_and_unknown_entries() {
        let options =
            parser("(SIZE = 10 MB, FILEGROWTH = 10%, NAME = logical, NESTED (A = 1), FLAG)")
                .parse_option_list(&GENERIC_OPTIONS)
                .unwrap();
        assert!(matches!(
            options[0].value,
            Some(OptionValue::Unit {
                unit: Unit::Megabytes,
                ..
            })
        ));
        assert!(matches!(
            options[1].value,
            Some(OptionValue::Unit {
                unit: Unit::Percent,
                ..
            })
        ));
        assert!(matches!(options[2].value, Some(OptionValue::Identifier(_))));
        assert!(matches!(&options[3].value, Some(OptionValue::List(l)) if l.len() == 1));
        assert!(options[4].value.is_none());

        const STRICT: OptionTable<IndexOption> = OptionTable {
            entries: &[("ONLINE", online_option)],
            fallback: None,
        };
        let mut p = parser("(BOGUS = (1, 2) x, ONLINE = OFF)");
        let options = p.parse_option_list(&STRICT).unwrap();
        assert_eq!(options.len(), 1);
        assert!(p.at_eof());
    }

    #[test]
    fn bulk_options() {
        let mut p = parser("TABLOCK, FIELDTERMINATOR = ',', ORDER (id ASC, name) UNIQUE");
        let options = p.comma_separated(Parser::parse_bulk_option).unwrap();
        assert_eq!(
            options[0],
            BulkInsertOption::Flag {
                option_kind: "TabLock".into()
            }
        );
        assert_eq!(options[1].option_kind(), "FieldTerminator");
        assert!(matches!(
            &options[2],
            BulkInsertOption::Order { columns, unique: true } if columns.len() == 2
        ));
    }
}
