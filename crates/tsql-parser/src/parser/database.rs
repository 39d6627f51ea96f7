//! `CREATE DATABASE`, the `ALTER DATABASE` family and the database option
//! vocabulary shared by both.

use super::cursor::Parser;
use super::error::PResult;
use super::options::{OptionTable, GENERIC_OPTIONS};
use crate::ast::{
    option_kind_from_name, AlterDatabaseAddFileGroupStatement, AlterDatabaseAddFileStatement,
    AlterDatabaseCollateStatement, AlterDatabaseModifyFileGroupStatement,
    AlterDatabaseModifyFileStatement, AlterDatabaseModifyNameStatement,
    AlterDatabaseRebuildLogStatement, AlterDatabaseRemoveStatement,
    AlterDatabaseScopedConfigurationClearStatement, AlterDatabaseScopedConfigurationSetStatement,
    AlterDatabaseSetStatement, AttachMode, AutomaticTuningSetting, AutomaticTuningState,
    ChangeTrackingSetting, Containment, CreateDatabaseStatement, CursorDefault,
    DatabaseEncryptionKeyStatement, DatabaseOption, DatabaseTermination, DelayedDurability,
    FileDeclaration, FileDeclarationOption, FileGroupDefinition, FileStreamSetting, GenericOption,
    HadrOption, Identifier, ModifyFileGroupAction, NonTransactedAccess, OnOffPrimary, OptionState,
    PageVerify, Parameterization, PartnerOption, QueryCaptureMode, QueryStoreOption,
    QueryStoreSetting, QueryStoreState, RecoveryModel, RemoteDataArchiveSetting,
    ScopedConfigurationOption, SizeBasedCleanupMode, SizeValue, Statement, WitnessOption,
};
use crate::lexer::{Keyword, TokenKind};

pub(crate) const DATABASE_OPTIONS: OptionTable<DatabaseOption> = OptionTable {
    entries: &[
        ("RECOVERY", recovery_option),
        ("CURSOR_DEFAULT", cursor_default_option),
        ("PAGE_VERIFY", page_verify_option),
        ("PARAMETERIZATION", parameterization_option),
        ("CONTAINMENT", containment_option),
        ("DELAYED_DURABILITY", delayed_durability_option),
        ("COMPATIBILITY_LEVEL", compatibility_level_option),
        ("TARGET_RECOVERY_TIME", target_recovery_time_option),
        ("ACCELERATED_DATABASE_RECOVERY", accelerated_recovery_option),
        ("TEMPORAL_HISTORY_RETENTION", temporal_history_retention_option),
        ("AUTOMATIC_TUNING", automatic_tuning_option),
        ("AUTO_CREATE_STATISTICS", auto_create_statistics_option),
        ("REMOTE_DATA_ARCHIVE", remote_data_archive_option),
        ("CHANGE_TRACKING", change_tracking_option),
        ("PARTNER", partner_option),
        ("WITNESS", witness_option),
        ("DEFAULT_LANGUAGE", language_option),
        ("DEFAULT_FULLTEXT_LANGUAGE", language_option),
        ("HADR", hadr_option),
        ("FILESTREAM", filestream_option),
        ("QUERY_STORE", query_store_option),
    ],
    fallback: Some(generic_database_option),
};

const QUERY_STORE_SETTINGS: OptionTable<QueryStoreSetting> = OptionTable {
    entries: &[
        ("OPERATION_MODE", operation_mode_setting),
        ("DESIRED_STATE", desired_state_setting),
        ("CLEANUP_POLICY", cleanup_policy_setting),
        ("DATA_FLUSH_INTERVAL_SECONDS", data_flush_interval_setting),
        ("INTERVAL_LENGTH_MINUTES", interval_length_setting),
        ("MAX_STORAGE_SIZE_MB", max_storage_size_setting),
        ("MAX_PLANS_PER_QUERY", max_plans_per_query_setting),
        ("QUERY_CAPTURE_MODE", query_capture_mode_setting),
        ("SIZE_BASED_CLEANUP_MODE", size_based_cleanup_mode_setting),
        ("WAIT_STATS_CAPTURE_MODE", wait_stats_capture_mode_setting),
        ("QUERY_CAPTURE_POLICY", query_capture_policy_setting),
    ],
    fallback: Some(generic_query_store_setting),
};

/// Consumes one of `choices` at the current word.
fn choose<T: Copy>(p: &mut Parser, choices: &[(&str, T)], expected: &str) -> PResult<T> {
    if p.at_word() {
        let word = p.literal_upper();
        if let Some((_, value)) = choices.iter().find(|(name, _)| *name == word) {
            p.advance();
            return Ok(*value);
        }
    }
    Err(p.error_here(expected))
}

fn recovery_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    let model = choose(
        p,
        &[
            ("FULL", RecoveryModel::Full),
            ("BULK_LOGGED", RecoveryModel::BulkLogged),
            ("SIMPLE", RecoveryModel::Simple),
        ],
        "FULL, BULK_LOGGED or SIMPLE",
    )?;
    Ok(DatabaseOption::Recovery(model))
}

fn cursor_default_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    let value = choose(
        p,
        &[("LOCAL", CursorDefault::Local), ("GLOBAL", CursorDefault::Global)],
        "LOCAL or GLOBAL",
    )?;
    Ok(DatabaseOption::CursorDefault(value))
}

fn page_verify_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    let value = choose(
        p,
        &[
            ("CHECKSUM", PageVerify::Checksum),
            ("NONE", PageVerify::None),
            ("TORN_PAGE_DETECTION", PageVerify::TornPageDetection),
        ],
        "CHECKSUM, NONE or TORN_PAGE_DETECTION",
    )?;
    Ok(DatabaseOption::PageVerify(value))
}

fn parameterization_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    let value = choose(
        p,
        &[
            ("SIMPLE", Parameterization::Simple),
            ("FORCED", Parameterization::Forced),
        ],
        "SIMPLE or FORCED",
    )?;
    Ok(DatabaseOption::Parameterization(value))
}

fn containment_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    Ok(DatabaseOption::Containment(p.parse_containment_value()?))
}

fn delayed_durability_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    let value = choose(
        p,
        &[
            ("DISABLED", DelayedDurability::Disabled),
            ("ALLOWED", DelayedDurability::Allowed),
            ("FORCED", DelayedDurability::Forced),
        ],
        "DISABLED, ALLOWED or FORCED",
    )?;
    Ok(DatabaseOption::DelayedDurability(value))
}

fn compatibility_level_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    Ok(DatabaseOption::CompatibilityLevel(p.parse_scalar_expression()?))
}

fn target_recovery_time_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    let value = p.parse_scalar_expression()?;
    let unit = p.parse_optional_unit();
    Ok(DatabaseOption::TargetRecoveryTime { value, unit })
}

fn accelerated_recovery_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    let state = p.parse_option_state()?;
    let mut version_store_file_group = None;
    if p.check(TokenKind::LeftParen) {
        p.parenthesized(|p| {
            p.expect_word("PERSISTENT_VERSION_STORE_FILEGROUP")?;
            p.expect(TokenKind::Eq)?;
            version_store_file_group = Some(p.parse_filegroup_name()?);
            Ok(())
        })?;
    }
    Ok(DatabaseOption::AcceleratedDatabaseRecovery {
        state,
        version_store_file_group,
    })
}

fn temporal_history_retention_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    Ok(DatabaseOption::TemporalHistoryRetention(p.parse_option_state()?))
}

/// `AUTOMATIC_TUNING = INHERIT|CUSTOM|AUTO` or `AUTOMATIC_TUNING (FORCE_LAST_GOOD_PLAN = ON, ...)`.
fn automatic_tuning_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    let state = if p.eat(TokenKind::Eq) {
        choose(
            p,
            &[
                ("INHERIT", AutomaticTuningState::Inherit),
                ("CUSTOM", AutomaticTuningState::Custom),
                ("AUTO", AutomaticTuningState::Auto),
            ],
            "INHERIT, CUSTOM or AUTO",
        )?
    } else {
        AutomaticTuningState::NotSet
    };
    let settings = if p.check(TokenKind::LeftParen) {
        p.parenthesized_list(|p| {
            let option_kind = option_kind_from_name(&p.expect_any_word()?);
            p.expect(TokenKind::Eq)?;
            let state = if p.eat_keyword(Keyword::Default) {
                OptionState::NotSet
            } else {
                p.parse_option_state()?
            };
            Ok(AutomaticTuningSetting { option_kind, state })
        })?
    } else {
        Vec::new()
    };
    Ok(DatabaseOption::AutomaticTuning { state, settings })
}

fn auto_create_statistics_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.eat(TokenKind::Eq);
    let state = p.parse_option_state()?;
    let mut incremental = None;
    if p.check(TokenKind::LeftParen) {
        p.parenthesized(|p| {
            p.expect_word("INCREMENTAL")?;
            p.expect(TokenKind::Eq)?;
            incremental = Some(p.parse_option_state()?);
            Ok(())
        })?;
    }
    Ok(DatabaseOption::AutoCreateStatistics { state, incremental })
}

fn remote_data_archive_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    let state = p.parse_option_state()?;
    let settings = if p.check(TokenKind::LeftParen) {
        p.parenthesized_list(|p| match p.expect_any_word()?.as_str() {
            "SERVER" => {
                p.expect(TokenKind::Eq)?;
                Ok(RemoteDataArchiveSetting::Server(p.parse_scalar_expression()?))
            }
            "CREDENTIAL" => {
                p.expect(TokenKind::Eq)?;
                Ok(RemoteDataArchiveSetting::Credential(p.expect_identifier()?))
            }
            "FEDERATED_SERVICE_ACCOUNT" => {
                p.expect(TokenKind::Eq)?;
                Ok(RemoteDataArchiveSetting::FederatedServiceAccount(
                    p.parse_option_state()?,
                ))
            }
            _ => Err(p.error_message(
                "expected SERVER, CREDENTIAL or FEDERATED_SERVICE_ACCOUNT",
            )),
        })?
    } else {
        Vec::new()
    };
    Ok(DatabaseOption::RemoteDataArchive { state, settings })
}

/// `CHANGE_TRACKING [= ON|OFF] [(AUTO_CLEANUP = ON, CHANGE_RETENTION = n DAYS)]`
fn change_tracking_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    let state = if p.eat(TokenKind::Eq) {
        p.parse_option_state()?
    } else {
        OptionState::NotSet
    };
    let settings = if p.check(TokenKind::LeftParen) {
        p.parenthesized_list(|p| match p.expect_any_word()?.as_str() {
            "AUTO_CLEANUP" => {
                p.expect(TokenKind::Eq)?;
                Ok(ChangeTrackingSetting::AutoCleanup(p.parse_option_state()?))
            }
            "CHANGE_RETENTION" => {
                p.expect(TokenKind::Eq)?;
                let value = p.parse_scalar_expression()?;
                let unit = p.parse_optional_unit();
                Ok(ChangeTrackingSetting::ChangeRetention { value, unit })
            }
            _ => Err(p.error_message("expected AUTO_CLEANUP or CHANGE_RETENTION")),
        })?
    } else {
        Vec::new()
    };
    Ok(DatabaseOption::ChangeTracking { state, settings })
}

fn partner_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    if p.eat(TokenKind::Eq) {
        return Ok(DatabaseOption::Partner(PartnerOption::Server(
            p.parse_scalar_expression()?,
        )));
    }
    let option = match p.expect_any_word()?.as_str() {
        "FAILOVER" => PartnerOption::Failover,
        "FORCE_SERVICE_ALLOW_DATA_LOSS" => PartnerOption::ForceServiceAllowDataLoss,
        "OFF" => PartnerOption::Off,
        "RESUME" => PartnerOption::Resume,
        "SUSPEND" => PartnerOption::Suspend,
        "SAFETY" => match p.expect_any_word()?.as_str() {
            "FULL" => PartnerOption::Safety(true),
            "OFF" => PartnerOption::Safety(false),
            _ => return Err(p.error_message("expected FULL or OFF")),
        },
        "TIMEOUT" => PartnerOption::Timeout(p.parse_scalar_expression()?),
        _ => return Err(p.error_message("unknown PARTNER option")),
    };
    Ok(DatabaseOption::Partner(option))
}

fn witness_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    if p.eat(TokenKind::Eq) {
        return Ok(DatabaseOption::Witness(WitnessOption::Server(
            p.parse_scalar_expression()?,
        )));
    }
    p.expect_keyword(Keyword::Off)?;
    Ok(DatabaseOption::Witness(WitnessOption::Off))
}

fn language_option(p: &mut Parser, name: &str) -> PResult<DatabaseOption> {
    p.expect(TokenKind::Eq)?;
    Ok(DatabaseOption::Language {
        option_kind: option_kind_from_name(name),
        value: p.parse_identifier_or_value()?,
    })
}

fn hadr_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    let option = match p.expect_any_word()?.as_str() {
        "SUSPEND" => HadrOption::Suspend,
        "RESUME" => HadrOption::Resume,
        "OFF" => HadrOption::Off,
        "AVAILABILITY" => {
            p.expect_word("GROUP")?;
            p.expect(TokenKind::Eq)?;
            HadrOption::AvailabilityGroup(p.expect_identifier()?)
        }
        _ => return Err(p.error_message("expected SUSPEND, RESUME, OFF or AVAILABILITY GROUP")),
    };
    Ok(DatabaseOption::Hadr(option))
}

fn filestream_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    let settings = p.parenthesized_list(|p| match p.expect_any_word()?.as_str() {
        "NON_TRANSACTED_ACCESS" => {
            p.expect(TokenKind::Eq)?;
            let access = choose(
                p,
                &[
                    ("OFF", NonTransactedAccess::Off),
                    ("READ_ONLY", NonTransactedAccess::ReadOnly),
                    ("FULL", NonTransactedAccess::Full),
                ],
                "OFF, READ_ONLY or FULL",
            )?;
            Ok(FileStreamSetting::NonTransactedAccess(access))
        }
        "DIRECTORY_NAME" => {
            p.expect(TokenKind::Eq)?;
            Ok(FileStreamSetting::DirectoryName(p.parse_scalar_expression()?))
        }
        _ => Err(p.error_message("expected NON_TRANSACTED_ACCESS or DIRECTORY_NAME")),
    })?;
    Ok(DatabaseOption::FileStream(settings))
}

/// `QUERY_STORE [= ON|OFF] [(settings)]` or `QUERY_STORE CLEAR [ALL]`.
fn query_store_option(p: &mut Parser, _: &str) -> PResult<DatabaseOption> {
    let mut option = QueryStoreOption::default();
    if p.eat_word("CLEAR") {
        option.clear = true;
        option.clear_all = p.eat_keyword(Keyword::All);
        return Ok(DatabaseOption::QueryStore(option));
    }
    if p.eat(TokenKind::Eq) {
        option.state = p.parse_option_state()?;
    }
    if p.check(TokenKind::LeftParen) {
        option.settings = p.parse_option_list(&QUERY_STORE_SETTINGS)?;
    }
    Ok(DatabaseOption::QueryStore(option))
}

fn query_store_state(p: &mut Parser) -> PResult<QueryStoreState> {
    p.expect(TokenKind::Eq)?;
    choose(
        p,
        &[
            ("OFF", QueryStoreState::Off),
            ("READ_ONLY", QueryStoreState::ReadOnly),
            ("READ_WRITE", QueryStoreState::ReadWrite),
        ],
        "OFF, READ_ONLY or READ_WRITE",
    )
}

fn operation_mode_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    Ok(QueryStoreSetting::OperationMode(query_store_state(p)?))
}

fn desired_state_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    Ok(QueryStoreSetting::DesiredState(query_store_state(p)?))
}

fn cleanup_policy_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    let mut stale_query_threshold = None;
    p.parenthesized(|p| {
        p.expect_word("STALE_QUERY_THRESHOLD_DAYS")?;
        p.expect(TokenKind::Eq)?;
        stale_query_threshold = Some(p.parse_scalar_expression()?);
        Ok(())
    })?;
    Ok(QueryStoreSetting::CleanupPolicy {
        stale_query_threshold,
    })
}

fn data_flush_interval_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::DataFlushInterval(p.parse_scalar_expression()?))
}

fn interval_length_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::IntervalLength(p.parse_scalar_expression()?))
}

fn max_storage_size_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::MaxStorageSize(p.parse_scalar_expression()?))
}

fn max_plans_per_query_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::MaxPlansPerQuery(p.parse_scalar_expression()?))
}

fn query_capture_mode_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    let mode = choose(
        p,
        &[
            ("ALL", QueryCaptureMode::All),
            ("AUTO", QueryCaptureMode::Auto),
            ("NONE", QueryCaptureMode::None),
            ("CUSTOM", QueryCaptureMode::Custom),
        ],
        "ALL, AUTO, NONE or CUSTOM",
    )?;
    Ok(QueryStoreSetting::QueryCaptureMode(mode))
}

fn size_based_cleanup_mode_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    let mode = choose(
        p,
        &[
            ("AUTO", SizeBasedCleanupMode::Auto),
            ("OFF", SizeBasedCleanupMode::Off),
        ],
        "AUTO or OFF",
    )?;
    Ok(QueryStoreSetting::SizeBasedCleanupMode(mode))
}

fn wait_stats_capture_mode_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::WaitStatsCaptureMode(p.parse_option_state()?))
}

fn query_capture_policy_setting(p: &mut Parser, _: &str) -> PResult<QueryStoreSetting> {
    p.expect(TokenKind::Eq)?;
    Ok(QueryStoreSetting::QueryCapturePolicy(
        p.parse_option_list(&GENERIC_OPTIONS)?,
    ))
}

fn generic_query_store_setting(p: &mut Parser, name: &str) -> PResult<QueryStoreSetting> {
    Ok(QueryStoreSetting::Generic(generic_option(p, name)?))
}

fn generic_option(p: &mut Parser, name: &str) -> PResult<GenericOption> {
    let value = if p.eat(TokenKind::Eq) {
        Some(p.parse_option_value()?)
    } else {
        None
    };
    Ok(GenericOption {
        option_kind: option_kind_from_name(name),
        value,
    })
}

/// Bare words (`SINGLE_USER`), switches (`DB_CHAINING ON`, `ANSI_NULLS = OFF`)
/// and anything else of the form `NAME = value`.
fn generic_database_option(p: &mut Parser, name: &str) -> PResult<DatabaseOption> {
    let option_kind = option_kind_from_name(name);
    let had_eq = p.eat(TokenKind::Eq);
    if p.check_keyword(Keyword::On) || p.check_keyword(Keyword::Off) {
        let state = p.parse_option_state()?;
        return Ok(DatabaseOption::OnOff { option_kind, state });
    }
    if !had_eq {
        return Ok(DatabaseOption::Simple { option_kind });
    }
    Ok(DatabaseOption::Generic(GenericOption {
        option_kind,
        value: Some(p.parse_option_value()?),
    }))
}

impl Parser {
    /// `opt [, opt ...]` without parentheses, as after `ALTER DATABASE ... SET`.
    pub(crate) fn parse_database_options(&mut self) -> PResult<Vec<DatabaseOption>> {
        let mut options = Vec::new();
        loop {
            if let Some(option) = self.parse_option_entry(&DATABASE_OPTIONS)? {
                options.push(option);
            }
            if !self.eat(TokenKind::Comma) {
                return Ok(options);
            }
        }
    }

    fn parse_containment_value(&mut self) -> PResult<Containment> {
        choose(
            self,
            &[("NONE", Containment::None), ("PARTIAL", Containment::Partial)],
            "NONE or PARTIAL",
        )
    }

    /// `WITH NO_WAIT | ROLLBACK IMMEDIATE | ROLLBACK AFTER n [SECONDS]`, if present.
    fn parse_termination(&mut self) -> PResult<Option<DatabaseTermination>> {
        if !self.check_keyword(Keyword::With) {
            return Ok(None);
        }
        self.advance();
        let mut termination = DatabaseTermination::default();
        if self.eat_word("NO_WAIT") {
            termination.no_wait = true;
        } else {
            self.expect_keyword(Keyword::Rollback)?;
            if self.eat_word("IMMEDIATE") {
                termination.rollback_immediate = true;
            } else {
                self.expect_word("AFTER")?;
                termination.rollback_after = Some(self.parse_scalar_expression()?);
                self.eat_word("SECONDS");
            }
        }
        Ok(Some(termination))
    }

    /// `( NAME = n, FILENAME = 'f', SIZE = 10 MB, MAXSIZE = UNLIMITED, FILEGROWTH = 10% )`
    pub(crate) fn parse_file_declaration(&mut self) -> PResult<FileDeclaration> {
        let options = self.parenthesized_list(|p| {
            let word = p.expect_any_word()?;
            if word == "OFFLINE" {
                return Ok(FileDeclarationOption::Offline);
            }
            p.expect(TokenKind::Eq)?;
            Ok(match word.as_str() {
                "NAME" => FileDeclarationOption::Name(p.parse_identifier_or_value()?),
                "NEWNAME" => FileDeclarationOption::NewName(p.parse_identifier_or_value()?),
                "FILENAME" => FileDeclarationOption::FileName(p.parse_scalar_expression()?),
                "SIZE" => FileDeclarationOption::Size(p.parse_size_value()?),
                "MAXSIZE" if p.eat_word("UNLIMITED") => FileDeclarationOption::MaxSize(None),
                "MAXSIZE" => FileDeclarationOption::MaxSize(Some(p.parse_size_value()?)),
                "FILEGROWTH" => FileDeclarationOption::FileGrowth(p.parse_size_value()?),
                _ => return Err(p.error_message(format!("unknown file option {word}"))),
            })
        })?;
        Ok(FileDeclaration {
            is_primary: false,
            options,
        })
    }

    fn parse_size_value(&mut self) -> PResult<SizeValue> {
        let value = self.parse_primary()?;
        let unit = self.parse_optional_unit();
        Ok(SizeValue { value, unit })
    }

    /// `filespec [, filespec ...]` where each is `[PRIMARY] ( ... )`.
    fn parse_file_declarations(&mut self) -> PResult<Vec<FileDeclaration>> {
        self.comma_separated(|p| {
            let is_primary = p.eat_keyword(Keyword::Primary);
            let mut file = p.parse_file_declaration()?;
            file.is_primary = is_primary;
            Ok(file)
        })
    }

    /// A database name; `CURRENT` is accepted.
    fn parse_database_name(&mut self) -> PResult<Identifier> {
        if self.check_keyword(Keyword::Current) {
            return Ok(self.take_identifier());
        }
        self.expect_identifier()
    }

    /// `CREATE DATABASE name [CONTAINMENT = ...] [ON ...] [LOG ON ...]
    /// [COLLATE c] [FOR ATTACH] [WITH ...] [AS SNAPSHOT OF db | AS COPY OF db]`
    pub(crate) fn fill_create_database(
        &mut self,
        stmt: &mut CreateDatabaseStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_word("CONTAINMENT") {
            self.expect(TokenKind::Eq)?;
            stmt.containment = Some(self.parse_containment_value()?);
        }
        if self.eat_keyword(Keyword::On) {
            stmt.file_groups = self.parse_file_groups()?;
        }
        if self.eat_word("LOG") {
            self.expect_keyword(Keyword::On)?;
            stmt.log_on = self.parse_file_declarations()?;
        }
        if self.eat_keyword(Keyword::Collate) {
            stmt.collation = Some(self.expect_identifier()?);
        }
        if self.eat_keyword(Keyword::For) {
            stmt.attach_mode = Some(match self.expect_any_word()?.as_str() {
                "ATTACH" => AttachMode::Attach,
                "ATTACH_REBUILD_LOG" => AttachMode::AttachRebuildLog,
                _ => return Err(self.error_message("expected ATTACH or ATTACH_REBUILD_LOG")),
            });
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parse_database_options()?;
        }
        if self.eat_keyword(Keyword::As) {
            if self.eat_word("SNAPSHOT") {
                self.expect_keyword(Keyword::Of)?;
                stmt.as_snapshot_of = Some(self.expect_identifier()?);
            } else {
                self.expect_word("COPY")?;
                self.expect_keyword(Keyword::Of)?;
                stmt.as_copy_of = Some(self.parse_multi_part_identifier()?);
            }
        }
        Ok(())
    }

    /// The `ON` list of `CREATE DATABASE`: files of the primary group, then
    /// `FILEGROUP name [CONTAINS ...] [DEFAULT] files` groups.
    fn parse_file_groups(&mut self) -> PResult<Vec<FileGroupDefinition>> {
        let mut groups = vec![FileGroupDefinition::default()];
        loop {
            if self.eat_word("FILEGROUP") {
                let mut group = FileGroupDefinition {
                    name: Some(self.expect_identifier()?),
                    ..FileGroupDefinition::default()
                };
                if self.eat_keyword(Keyword::Contains) {
                    match self.expect_any_word()?.as_str() {
                        "FILESTREAM" => group.contains_filestream = true,
                        "MEMORY_OPTIMIZED_DATA" => group.contains_memory_optimized_data = true,
                        _ => {
                            return Err(self
                                .error_message("expected FILESTREAM or MEMORY_OPTIMIZED_DATA"));
                        }
                    }
                }
                group.is_default = self.eat_keyword(Keyword::Default);
                groups.push(group);
            }
            let is_primary = self.eat_keyword(Keyword::Primary);
            let mut file = self.parse_file_declaration()?;
            file.is_primary = is_primary;
            if let Some(group) = groups.last_mut() {
                group.files.push(file);
            }
            if !self.eat(TokenKind::Comma) {
                return Ok(groups);
            }
        }
    }

    /// Everything after `ALTER DATABASE`.
    pub(crate) fn parse_alter_database_statement(&mut self) -> Statement {
        if self.is_word("SCOPED") && self.peek_is_word("CONFIGURATION") {
            self.advance();
            return self.parse_scoped_configuration();
        }
        let name = match self.parse_database_name() {
            Ok(name) => name,
            Err(error) => {
                self.recover(error);
                return Statement::AlterDatabaseSet(AlterDatabaseSetStatement::default());
            }
        };
        match self.literal_upper().as_str() {
            "ADD" if self.peek_is_word("FILEGROUP") => Statement::AlterDatabaseAddFileGroup(
                self.lenient(|p, stmt: &mut AlterDatabaseAddFileGroupStatement| {
                    stmt.name = name;
                    p.advance();
                    p.advance();
                    stmt.file_group = p.expect_identifier()?;
                    if p.eat_keyword(Keyword::Contains) {
                        match p.expect_any_word()?.as_str() {
                            "FILESTREAM" => stmt.contains_filestream = true,
                            _ => stmt.contains_memory_optimized_data = true,
                        }
                    }
                    Ok(())
                }),
            ),
            "ADD" => Statement::AlterDatabaseAddFile(self.lenient(
                |p, stmt: &mut AlterDatabaseAddFileStatement| {
                    stmt.name = name;
                    p.advance();
                    stmt.is_log = p.eat_word("LOG");
                    p.expect_keyword(Keyword::File)?;
                    stmt.files = p.parse_file_declarations()?;
                    if p.eat_keyword(Keyword::To) {
                        p.expect_word("FILEGROUP")?;
                        stmt.file_group = Some(p.parse_filegroup_name()?);
                    }
                    Ok(())
                },
            )),
            "MODIFY" if self.peek_keyword(Keyword::File) => Statement::AlterDatabaseModifyFile(
                self.lenient(|p, stmt: &mut AlterDatabaseModifyFileStatement| {
                    stmt.name = name;
                    p.advance();
                    p.advance();
                    stmt.file = p.parse_file_declaration()?;
                    Ok(())
                }),
            ),
            "MODIFY" if self.peek_is_word("FILEGROUP") => Statement::AlterDatabaseModifyFileGroup(
                self.lenient(|p, stmt: &mut AlterDatabaseModifyFileGroupStatement| {
                    stmt.name = name;
                    p.advance();
                    p.advance();
                    stmt.file_group = p.parse_filegroup_name()?;
                    stmt.action = Some(p.parse_modify_file_group_action()?);
                    stmt.termination = p.parse_termination()?;
                    Ok(())
                }),
            ),
            "MODIFY" => Statement::AlterDatabaseModifyName(self.lenient(
                |p, stmt: &mut AlterDatabaseModifyNameStatement| {
                    stmt.name = name;
                    p.advance();
                    p.expect_word("NAME")?;
                    p.expect(TokenKind::Eq)?;
                    stmt.new_name = p.expect_identifier()?;
                    Ok(())
                },
            )),
            "REMOVE" if self.peek_is_word("FILEGROUP") => {
                Statement::AlterDatabaseRemoveFileGroup(self.lenient(
                    |p, stmt: &mut AlterDatabaseRemoveStatement| {
                        stmt.name = name;
                        p.advance();
                        p.advance();
                        stmt.target = p.expect_identifier()?;
                        Ok(())
                    },
                ))
            }
            "REMOVE" => Statement::AlterDatabaseRemoveFile(self.lenient(
                |p, stmt: &mut AlterDatabaseRemoveStatement| {
                    stmt.name = name;
                    p.advance();
                    p.expect_keyword(Keyword::File)?;
                    stmt.target = p.expect_identifier()?;
                    Ok(())
                },
            )),
            "REBUILD" => Statement::AlterDatabaseRebuildLog(self.lenient(
                |p, stmt: &mut AlterDatabaseRebuildLogStatement| {
                    stmt.name = name;
                    p.advance();
                    p.expect_word("LOG")?;
                    if p.eat_keyword(Keyword::On) {
                        stmt.file = Some(p.parse_file_declaration()?);
                    }
                    Ok(())
                },
            )),
            "COLLATE" => Statement::AlterDatabaseCollate(self.lenient(
                |p, stmt: &mut AlterDatabaseCollateStatement| {
                    stmt.name = name;
                    p.advance();
                    stmt.collation = p.expect_identifier()?;
                    Ok(())
                },
            )),
            _ => Statement::AlterDatabaseSet(self.lenient(
                |p, stmt: &mut AlterDatabaseSetStatement| {
                    stmt.name = name;
                    p.expect_keyword(Keyword::Set)?;
                    stmt.options = p.parse_database_options()?;
                    stmt.termination = p.parse_termination()?;
                    Ok(())
                },
            )),
        }
    }

    fn parse_modify_file_group_action(&mut self) -> PResult<ModifyFileGroupAction> {
        if self.eat_keyword(Keyword::Default) {
            return Ok(ModifyFileGroupAction::Default);
        }
        let word = self.expect_any_word()?;
        Ok(match word.as_str() {
            "READ_ONLY" | "READONLY" => ModifyFileGroupAction::ReadOnly,
            "READ_WRITE" | "READWRITE" => ModifyFileGroupAction::ReadWrite,
            "AUTOGROW_ALL_FILES" => ModifyFileGroupAction::AutogrowAllFiles,
            "AUTOGROW_SINGLE_FILE" => ModifyFileGroupAction::AutogrowSingleFile,
            "NAME" => {
                self.expect(TokenKind::Eq)?;
                ModifyFileGroupAction::NewName(self.expect_identifier()?)
            }
            _ => return Err(self.error_message(format!("unknown filegroup property {word}"))),
        })
    }

    /// `SCOPED CONFIGURATION [FOR SECONDARY] {SET option | CLEAR PROCEDURE_CACHE [handle]}`
    fn parse_scoped_configuration(&mut self) -> Statement {
        self.eat_word("CONFIGURATION");
        let secondary = self.eat_keyword(Keyword::For);
        if secondary {
            self.eat_word("SECONDARY");
        }
        if self.is_word("CLEAR") {
            return Statement::AlterDatabaseScopedConfigurationClear(self.lenient(
                |p, stmt: &mut AlterDatabaseScopedConfigurationClearStatement| {
                    stmt.secondary = secondary;
                    p.advance();
                    p.expect_word("PROCEDURE_CACHE")?;
                    if p.can_start_expression() {
                        stmt.plan_handle = Some(p.parse_scalar_expression()?);
                    }
                    Ok(())
                },
            ));
        }
        Statement::AlterDatabaseScopedConfigurationSet(self.lenient(
            |p, stmt: &mut AlterDatabaseScopedConfigurationSetStatement| {
                stmt.secondary = secondary;
                p.expect_keyword(Keyword::Set)?;
                stmt.option = Some(p.parse_scoped_configuration_option()?);
                Ok(())
            },
        ))
    }

    fn parse_scoped_configuration_option(&mut self) -> PResult<ScopedConfigurationOption> {
        let name = self.expect_any_word()?;
        self.expect(TokenKind::Eq)?;
        match name.as_str() {
            "MAXDOP" => {
                if self.eat_keyword(Keyword::Primary) {
                    Ok(ScopedConfigurationOption::MaxDop(None))
                } else {
                    Ok(ScopedConfigurationOption::MaxDop(Some(
                        self.parse_scalar_expression()?,
                    )))
                }
            }
            "LEGACY_CARDINALITY_ESTIMATION" | "PARAMETER_SNIFFING" | "QUERY_OPTIMIZER_HOTFIXES" => {
                let value = if self.eat_keyword(Keyword::Primary) {
                    OnOffPrimary::Primary
                } else if self.parse_option_state()? == OptionState::On {
                    OnOffPrimary::On
                } else {
                    OnOffPrimary::Off
                };
                Ok(ScopedConfigurationOption::OnOffPrimary {
                    option_kind: option_kind_from_name(&name),
                    value,
                })
            }
            _ => Ok(ScopedConfigurationOption::Generic(GenericOption {
                option_kind: option_kind_from_name(&name),
                value: Some(self.parse_option_value()?),
            })),
        }
    }

    /// The body of `{CREATE | ALTER} DATABASE ENCRYPTION KEY`:
    /// `[REGENERATE] WITH ALGORITHM = alg` and/or
    /// `ENCRYPTION BY SERVER {CERTIFICATE | ASYMMETRIC KEY} name`.
    pub(crate) fn fill_database_encryption_key(
        &mut self,
        stmt: &mut DatabaseEncryptionKeyStatement,
    ) -> PResult<()> {
        stmt.regenerate = self.eat_word("REGENERATE");
        if self.eat_keyword(Keyword::With) {
            self.expect_word("ALGORITHM")?;
            self.expect(TokenKind::Eq)?;
            stmt.algorithm = Some(self.expect_any_word()?);
        }
        if self.eat_word("ENCRYPTION") {
            self.expect_keyword(Keyword::By)?;
            self.expect_word("SERVER")?;
            stmt.encryptor_kind = Some(match self.expect_any_word()?.as_str() {
                "CERTIFICATE" => "Certificate".to_string(),
                "ASYMMETRIC" => {
                    self.expect_keyword(Keyword::Key)?;
                    "AsymmetricKey".to_string()
                }
                _ => return Err(self.error_message("expected CERTIFICATE or ASYMMETRIC KEY")),
            });
            stmt.encryptor = Some(self.expect_identifier()?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ScalarExpression, Unit};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parse(sql: &str) -> (Statement, Parser) {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        p.expect_keyword(Keyword::Alter).unwrap();
        p.expect_keyword(Keyword::Database).unwrap();
        let statement = p.parse_alter_database_statement();
        (statement, p)
    }

    fn alter_set(sql: &str) -> AlterDatabaseSetStatement {
        let (statement, p) = parse(sql);
        assert!(p.diagnostics().is_empty(), "{:?}", p.diagnostics());
        match statement {
            Statement::AlterDatabaseSet(stmt) => stmt,
            other => panic!("expected AlterDatabaseSet, got {}", other.tag()),
        }
    }

    #[test]
    fn query_store_settings() {
        let stmt = alter_set(
            "ALTER DATABASE [db] SET QUERY_STORE (OPERATION_MODE = READ_WRITE, \
             MAX_STORAGE_SIZE_MB = 1024, CLEANUP_POLICY = (STALE_QUERY_THRESHOLD_DAYS = 30)) \
             WITH NO_WAIT",
        );
        assert_eq!(stmt.name.value, "db");
        let [DatabaseOption::QueryStore(query_store)] = stmt.options.as_slice() else {
            panic!("expected one QueryStore option");
        };
        assert_eq!(query_store.operation_mode(), Some(QueryStoreState::ReadWrite));
        assert_eq!(
            query_store.max_storage_size(),
            Some(&ScalarExpression::integer("1024"))
        );
        assert_eq!(
            query_store.stale_query_threshold(),
            Some(&ScalarExpression::integer("30"))
        );
        assert!(stmt.termination.unwrap().no_wait);
    }

    #[test]
    fn option_vocabulary() {
        let stmt = alter_set(
            "ALTER DATABASE CURRENT SET SINGLE_USER, RECOVERY BULK_LOGGED, ANSI_NULLS ON, \
             COMPATIBILITY_LEVEL = 150, TARGET_RECOVERY_TIME = 60 SECONDS, \
             CHANGE_TRACKING = ON (AUTO_CLEANUP = ON, CHANGE_RETENTION = 2 DAYS), \
             HADR AVAILABILITY GROUP = ag1, DB_CHAINING OFF, PARTNER SAFETY FULL \
             WITH ROLLBACK AFTER 30 SECONDS",
        );
        let kinds: Vec<_> = stmt.options.iter().map(DatabaseOption::option_kind).collect();
        assert_eq!(
            kinds,
            [
                "SingleUser",
                "Recovery",
                "AnsiNulls",
                "CompatibilityLevel",
                "TargetRecoveryTime",
                "ChangeTracking",
                "Hadr",
                "DBChaining",
                "Partner"
            ]
        );
        assert_eq!(stmt.options[1], DatabaseOption::Recovery(RecoveryModel::BulkLogged));
        let DatabaseOption::TargetRecoveryTime { unit, .. } = &stmt.options[4] else {
            unreachable!()
        };
        assert_eq!(*unit, Some(Unit::Seconds));
        let DatabaseOption::ChangeTracking { state, settings } = &stmt.options[5] else {
            unreachable!()
        };
        assert_eq!(*state, OptionState::On);
        assert_eq!(settings.len(), 2);
        assert_eq!(
            stmt.options[8],
            DatabaseOption::Partner(PartnerOption::Safety(true))
        );
        let termination = stmt.termination.unwrap();
        assert_eq!(termination.rollback_after, Some(ScalarExpression::integer("30")));
    }

    #[test]
    fn files_and_filegroups() {
        let (statement, p) = parse(
            "ALTER DATABASE sales ADD FILE (NAME = data2, FILENAME = 'd:\\data2.ndf', \
             SIZE = 10 MB, MAXSIZE = UNLIMITED, FILEGROWTH = 10%) TO FILEGROUP fg1",
        );
        assert!(p.diagnostics().is_empty());
        let Statement::AlterDatabaseAddFile(add) = statement else {
            panic!("expected AlterDatabaseAddFile");
        };
        assert_eq!(add.files[0].options.len(), 5);
        assert_eq!(add.files[0].options[4], FileDeclarationOption::FileGrowth(SizeValue {
            value: ScalarExpression::integer("10"),
            unit: Some(Unit::Percent),
        }));
        assert_eq!(add.file_group.unwrap().value, "fg1");

        let (statement, _) = parse("ALTER DATABASE sales MODIFY FILEGROUP fg1 READ_ONLY");
        let Statement::AlterDatabaseModifyFileGroup(modify) = statement else {
            panic!("expected AlterDatabaseModifyFileGroup");
        };
        assert_eq!(modify.action, Some(ModifyFileGroupAction::ReadOnly));

        let (statement, _) = parse("ALTER DATABASE sales REMOVE FILEGROUP fg1");
        assert_eq!(statement.tag(), "AlterDatabaseRemoveFileGroup");
        let (statement, _) = parse("ALTER DATABASE sales MODIFY NAME = sales2");
        assert_eq!(statement.tag(), "AlterDatabaseModifyName");
        let (statement, _) = parse("ALTER DATABASE sales COLLATE Latin1_General_CI_AS");
        assert_eq!(statement.tag(), "AlterDatabaseCollate");
    }

    #[test]
    fn scoped_configuration() {
        let (statement, _) =
            parse("ALTER DATABASE SCOPED CONFIGURATION FOR SECONDARY SET MAXDOP = PRIMARY");
        let Statement::AlterDatabaseScopedConfigurationSet(set) = statement else {
            panic!("expected scoped configuration set");
        };
        assert!(set.secondary);
        assert_eq!(set.option, Some(ScopedConfigurationOption::MaxDop(None)));

        let (statement, _) = parse(
            "ALTER DATABASE SCOPED CONFIGURATION SET LEGACY_CARDINALITY_ESTIMATION = ON",
        );
        let Statement::AlterDatabaseScopedConfigurationSet(set) = statement else {
            panic!("expected scoped configuration set");
        };
        assert_eq!(set.option.unwrap().option_kind(), "LegacyCardinalityEstimation");

        let (statement, _) =
            parse("ALTER DATABASE SCOPED CONFIGURATION CLEAR PROCEDURE_CACHE 0x0600");
        let Statement::AlterDatabaseScopedConfigurationClear(clear) = statement else {
            panic!("expected scoped configuration clear");
        };
        assert!(clear.plan_handle.is_some());
    }

    #[test]
    fn encryption_key() {
        let tokens = Lexer::new("REGENERATE WITH ALGORITHM = AES_256").tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let mut key = DatabaseEncryptionKeyStatement::default();
        p.fill_database_encryption_key(&mut key).unwrap();
        assert!(key.regenerate);
        assert_eq!(key.algorithm.as_deref(), Some("AES_256"));

        let tokens =
            Lexer::new("WITH ALGORITHM = AES_128 ENCRYPTION BY SERVER CERTIFICATE tde_cert")
                .tokenize()
                .unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let mut key = DatabaseEncryptionKeyStatement::default();
        p.fill_database_encryption_key(&mut key).unwrap();
        assert_eq!(key.encryptor_kind.as_deref(), Some("Certificate"));
        assert_eq!(key.encryptor.unwrap().value, "tde_cert");
    }

    #[test]
    fn create_database_with_filegroups() {
        let tokens = Lexer::new(
            "sales ON PRIMARY (NAME = s1, FILENAME = 's1.mdf'), \
             FILEGROUP fs CONTAINS FILESTREAM (NAME = s2, FILENAME = 'fs') \
             LOG ON (NAME = slog, FILENAME = 's.ldf') COLLATE Latin1_General_CI_AS \
             WITH TRUSTWORTHY ON, DB_CHAINING OFF",
        )
        .tokenize()
        .unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let mut stmt = CreateDatabaseStatement::default();
        p.fill_create_database(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.file_groups.len(), 2);
        assert!(stmt.file_groups[0].files[0].is_primary);
        assert!(stmt.file_groups[1].contains_filestream);
        assert_eq!(stmt.log_on.len(), 1);
        assert_eq!(stmt.options.len(), 2);
    }
}
