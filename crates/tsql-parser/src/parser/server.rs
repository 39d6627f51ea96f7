//! Server-level commands: `USE`, `CHECKPOINT`, `RECONFIGURE`, `KILL`,
//! `BACKUP` and `RESTORE`.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{
    option_kind_from_name, BackupDevice, BackupKind, BackupStatement, CheckpointStatement,
    KillStatement, OptionBag, ReconfigureStatement, RestoreStatement, UseStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    pub(crate) fn fill_use(&mut self, stmt: &mut UseStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Use)?;
        stmt.database = self.expect_identifier()?;
        Ok(())
    }

    pub(crate) fn fill_checkpoint(&mut self, stmt: &mut CheckpointStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Checkpoint)?;
        if self.can_start_expression() {
            stmt.duration = Some(self.parse_scalar_expression()?);
        }
        Ok(())
    }

    pub(crate) fn fill_reconfigure(&mut self, stmt: &mut ReconfigureStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Reconfigure)?;
        if self.eat_keyword(Keyword::With) {
            self.expect_word("OVERRIDE")?;
            stmt.with_override = true;
        }
        Ok(())
    }

    /// `KILL session [WITH STATUSONLY]`
    pub(crate) fn fill_kill(&mut self, stmt: &mut KillStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Kill)?;
        stmt.parameter = self.parse_scalar_expression()?;
        if self.eat_keyword(Keyword::With) {
            self.expect_word("STATUSONLY")?;
            stmt.status_only = true;
        }
        Ok(())
    }

    /// `BACKUP {DATABASE | LOG} db [files] TO devices [MIRROR TO devices ...] [WITH ...]`
    pub(crate) fn fill_backup(&mut self, stmt: &mut BackupStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Backup)?;
        stmt.kind = if self.eat_keyword(Keyword::Database) {
            BackupKind::Database
        } else if self.eat_word("LOG") {
            BackupKind::Log
        } else {
            return Err(self.error_here("DATABASE or LOG"));
        };
        stmt.database = self.parse_identifier_or_variable()?;
        if !self.check_keyword(Keyword::To) {
            stmt.files = self.parse_unbracketed_options()?;
        }
        self.expect_keyword(Keyword::To)?;
        stmt.devices = self.comma_separated(Self::parse_backup_device)?;
        while self.eat_word("MIRROR") {
            self.expect_keyword(Keyword::To)?;
            stmt.mirror_devices
                .extend(self.comma_separated(Self::parse_backup_device)?);
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parse_unbracketed_options()?;
        }
        Ok(())
    }

    /// `RESTORE kind [db] [files] [FROM devices] [WITH ...]`. Kinds other than
    /// `DATABASE` and `LOG` take no database name.
    pub(crate) fn fill_restore(&mut self, stmt: &mut RestoreStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Restore)?;
        let kind = self.expect_any_word()?;
        stmt.kind = restore_kind(&kind)
            .ok_or_else(|| self.error_message(format!("unknown RESTORE kind {kind}")))?;
        if kind == "DATABASE" || kind == "LOG" {
            stmt.database = Some(self.parse_identifier_or_variable()?);
            if !self.check_keyword(Keyword::From) && !self.at_statement_end() {
                stmt.files = self.parse_unbracketed_options()?;
            }
        }
        if self.eat_keyword(Keyword::From) {
            stmt.devices = self.comma_separated(Self::parse_backup_device)?;
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parse_unbracketed_options()?;
        }
        Ok(())
    }

    /// `{DISK | TAPE | URL} = value` or a logical device name.
    fn parse_backup_device(&mut self) -> PResult<BackupDevice> {
        if self.is_any_word(&["DISK", "TAPE", "URL"]) && self.peek().kind == TokenKind::Eq {
            let device_type = option_kind_from_name(&self.advance().literal);
            self.advance();
            return Ok(BackupDevice {
                device_type: Some(device_type),
                name: self.parse_identifier_or_value()?,
            });
        }
        Ok(BackupDevice {
            device_type: None,
            name: self.parse_identifier_or_value()?,
        })
    }

    /// A comma list of options without surrounding parentheses. Words an
    /// option does not understand (`MOVE 'a' TO 'b'`) are skipped up to the
    /// next comma.
    fn parse_unbracketed_options(&mut self) -> PResult<OptionBag> {
        self.comma_separated(|p| {
            let option = p.parse_generic_option()?;
            p.skip_to_option_end();
            Ok(option)
        })
    }

    fn skip_to_option_end(&mut self) {
        while !self.check(TokenKind::Comma)
            && !self.check(TokenKind::RightParen)
            && !self.can_start_statement()
        {
            if self.check(TokenKind::LeftParen) {
                self.skip_parenthesized();
            } else {
                self.advance();
            }
        }
    }
}

fn restore_kind(word: &str) -> Option<String> {
    let kind = match word {
        "DATABASE" => "Database",
        "LOG" => "Log",
        "FILELISTONLY" => "FileListOnly",
        "HEADERONLY" => "HeaderOnly",
        "LABELONLY" => "LabelOnly",
        "VERIFYONLY" => "VerifyOnly",
        "REWINDONLY" => "RewindOnly",
        _ => return None,
    };
    Some(kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{IdentifierOrValue, IdentifierOrVariable, ScalarExpression};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn small_commands() {
        let mut p = parser("USE [master]");
        let mut use_stmt = UseStatement::default();
        p.fill_use(&mut use_stmt).unwrap();
        assert_eq!(use_stmt.database.value, "master");

        let mut p = parser("KILL 53 WITH STATUSONLY");
        let mut kill = KillStatement::default();
        p.fill_kill(&mut kill).unwrap();
        assert_eq!(kill.parameter, ScalarExpression::integer("53"));
        assert!(kill.status_only);

        let mut p = parser("RECONFIGURE WITH OVERRIDE");
        let mut reconfigure = ReconfigureStatement::default();
        p.fill_reconfigure(&mut reconfigure).unwrap();
        assert!(reconfigure.with_override);

        let mut p = parser("CHECKPOINT 10");
        let mut checkpoint = CheckpointStatement::default();
        p.fill_checkpoint(&mut checkpoint).unwrap();
        assert!(checkpoint.duration.is_some());
    }

    #[test]
    fn backup_with_mirror_and_options() {
        let mut p = parser(
            "BACKUP DATABASE sales TO DISK = 'a.bak', DISK = 'b.bak' \
             MIRROR TO URL = 'https://x/c.bak' WITH COMPRESSION, STATS = 10, NAME = N'full'",
        );
        let mut stmt = BackupStatement::default();
        p.fill_backup(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.kind, BackupKind::Database);
        assert_eq!(
            stmt.database,
            IdentifierOrVariable::Identifier(crate::ast::Identifier::new("sales"))
        );
        assert_eq!(stmt.devices.len(), 2);
        assert_eq!(stmt.devices[0].device_type.as_deref(), Some("Disk"));
        assert_eq!(stmt.mirror_devices[0].device_type.as_deref(), Some("Url"));
        let kinds: Vec<_> = stmt.options.iter().map(|o| o.option_kind.as_str()).collect();
        assert_eq!(kinds, ["Compression", "Stats", "Name"]);
    }

    #[test]
    fn backup_log_to_logical_device() {
        let mut p = parser("BACKUP LOG @db TO nightly");
        let mut stmt = BackupStatement::default();
        p.fill_backup(&mut stmt).unwrap();
        assert_eq!(stmt.kind, BackupKind::Log);
        assert_eq!(stmt.database, IdentifierOrVariable::Variable("@db".into()));
        assert!(matches!(stmt.devices[0].name, IdentifierOrValue::Identifier(_)));
    }

    #[test]
    fn restore_with_move() {
        let mut p = parser(
            "RESTORE DATABASE sales FROM DISK = 'a.bak' \
             WITH MOVE 'sales' TO 'd:\\sales.mdf', REPLACE, RECOVERY; SELECT 1",
        );
        let mut stmt = RestoreStatement::default();
        p.fill_restore(&mut stmt).unwrap();
        assert_eq!(stmt.kind, "Database");
        let kinds: Vec<_> = stmt.options.iter().map(|o| o.option_kind.as_str()).collect();
        assert_eq!(kinds, ["Move", "Replace", "Recovery"]);
        assert!(p.check(TokenKind::Semicolon));

        let mut p = parser("RESTORE FILELISTONLY FROM DISK = 'a.bak'");
        let mut stmt = RestoreStatement::default();
        p.fill_restore(&mut stmt).unwrap();
        assert_eq!(stmt.kind, "FileListOnly");
        assert!(stmt.database.is_none());
    }
}
