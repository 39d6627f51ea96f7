//! Users, logins, roles and ownership changes.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{
    option_kind_from_name, AlterAuthorizationStatement, AlterLoginAction, AlterLoginStatement,
    AlterRoleAction, AlterRoleStatement, AlterSchemaStatement, AlterUserStatement,
    CreateLoginStatement, CreateRoleStatement, CreateUserStatement, LoginSource, OptionBag,
    UserLoginKind,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// After `USER`: `name [{FOR|FROM} {LOGIN l | CERTIFICATE c | ASYMMETRIC
    /// KEY k} | WITHOUT LOGIN | FROM EXTERNAL PROVIDER] [WITH options]`
    pub(crate) fn fill_create_user(&mut self, stmt: &mut CreateUserStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_word("WITHOUT") {
            self.expect_word("LOGIN")?;
            stmt.login = UserLoginKind::WithoutLogin;
        } else if self.eat_keyword(Keyword::For) || self.eat_keyword(Keyword::From) {
            stmt.login = match self.expect_any_word()?.as_str() {
                "LOGIN" => UserLoginKind::Login(self.expect_identifier()?),
                "CERTIFICATE" => UserLoginKind::Certificate(self.expect_identifier()?),
                "ASYMMETRIC" => {
                    self.expect_keyword(Keyword::Key)?;
                    UserLoginKind::AsymmetricKey(self.expect_identifier()?)
                }
                "EXTERNAL" => {
                    self.expect_word("PROVIDER")?;
                    UserLoginKind::ExternalProvider
                }
                _ => {
                    return Err(
                        self.error_message("expected LOGIN, CERTIFICATE or ASYMMETRIC KEY")
                    );
                }
            };
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parse_principal_options()?;
        }
        Ok(())
    }

    /// After `LOGIN`: `name {WITH PASSWORD = p [HASHED] [MUST_CHANGE] [, options]
    /// | FROM {WINDOWS [WITH options] | CERTIFICATE c | ASYMMETRIC KEY k |
    /// EXTERNAL PROVIDER}}`
    pub(crate) fn fill_create_login(&mut self, stmt: &mut CreateLoginStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_keyword(Keyword::From) {
            stmt.source = match self.expect_any_word()?.as_str() {
                "WINDOWS" => LoginSource::Windows,
                "CERTIFICATE" => LoginSource::Certificate(self.expect_identifier()?),
                "ASYMMETRIC" => {
                    self.expect_keyword(Keyword::Key)?;
                    LoginSource::AsymmetricKey(self.expect_identifier()?)
                }
                "EXTERNAL" => {
                    self.expect_word("PROVIDER")?;
                    LoginSource::ExternalProvider
                }
                _ => {
                    return Err(
                        self.error_message("expected WINDOWS, CERTIFICATE or ASYMMETRIC KEY")
                    );
                }
            };
            if self.eat_keyword(Keyword::With) {
                stmt.options = self.parse_principal_options()?;
            }
            return Ok(());
        }
        self.expect_keyword(Keyword::With)?;
        if self.eat_word("PASSWORD") {
            self.expect(TokenKind::Eq)?;
            let password = self.parse_primary()?;
            let mut hashed = false;
            let mut must_change = false;
            loop {
                if self.eat_word("HASHED") {
                    hashed = true;
                } else if self.eat_word("MUST_CHANGE") {
                    must_change = true;
                } else {
                    break;
                }
            }
            stmt.source = LoginSource::Password {
                password,
                hashed,
                must_change,
            };
            if !self.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
        stmt.options = self.parse_principal_options()?;
        Ok(())
    }

    /// `name = value, ...` where flag words such as `MUST_CHANGE` or
    /// `UNLOCK` may follow a value without a comma.
    fn parse_principal_options(&mut self) -> PResult<OptionBag> {
        let mut options = Vec::new();
        loop {
            options.push(self.parse_generic_option()?);
            if self.eat(TokenKind::Comma) {
                continue;
            }
            if !self.at_word() || self.at_statement_end() || self.can_start_statement() {
                return Ok(options);
            }
        }
    }

    /// After `ROLE` or `SERVER ROLE`: `name [AUTHORIZATION owner]`
    pub(crate) fn fill_create_role(&mut self, stmt: &mut CreateRoleStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_keyword(Keyword::Authorization) {
            stmt.authorization = Some(self.expect_identifier()?);
        }
        Ok(())
    }

    /// After `ROLE` or `SERVER ROLE`: `name {ADD MEMBER m | DROP MEMBER m |
    /// WITH NAME = new}`
    pub(crate) fn fill_alter_role(&mut self, stmt: &mut AlterRoleStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        stmt.action = Some(if self.eat_keyword(Keyword::Add) {
            self.expect_word("MEMBER")?;
            AlterRoleAction::AddMember(self.expect_identifier()?)
        } else if self.eat_keyword(Keyword::Drop) {
            self.expect_word("MEMBER")?;
            AlterRoleAction::DropMember(self.expect_identifier()?)
        } else {
            self.expect_keyword(Keyword::With)?;
            self.expect_word("NAME")?;
            self.expect(TokenKind::Eq)?;
            AlterRoleAction::Rename(self.expect_identifier()?)
        });
        Ok(())
    }

    /// After `USER`: `name WITH options`
    pub(crate) fn fill_alter_user(&mut self, stmt: &mut AlterUserStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::With)?;
        stmt.options = self.parse_principal_options()?;
        Ok(())
    }

    /// After `LOGIN`: `name {ENABLE | DISABLE | WITH options | {ADD|DROP}
    /// CREDENTIAL c}`
    pub(crate) fn fill_alter_login(&mut self, stmt: &mut AlterLoginStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        stmt.action = Some(if self.eat_word("ENABLE") {
            AlterLoginAction::Enable
        } else if self.eat_word("DISABLE") {
            AlterLoginAction::Disable
        } else if self.eat_keyword(Keyword::Add) {
            self.expect_word("CREDENTIAL")?;
            AlterLoginAction::AddCredential(self.expect_identifier()?)
        } else if self.eat_keyword(Keyword::Drop) {
            self.expect_word("CREDENTIAL")?;
            AlterLoginAction::DropCredential(self.expect_identifier()?)
        } else {
            self.expect_keyword(Keyword::With)?;
            AlterLoginAction::Options(self.parse_principal_options()?)
        });
        Ok(())
    }

    /// After `AUTHORIZATION`: `ON [class::]entity TO {principal | SCHEMA OWNER}`
    pub(crate) fn fill_alter_authorization(
        &mut self,
        stmt: &mut AlterAuthorizationStatement,
    ) -> PResult<()> {
        self.expect_keyword(Keyword::On)?;
        let (class, entity) = self.parse_class_qualified_name()?;
        stmt.class = class.as_deref().map(option_kind_from_name);
        stmt.entity = entity;
        self.expect_keyword(Keyword::To)?;
        if self.check_keyword(Keyword::Schema) && self.peek_is_word("OWNER") {
            self.advance();
            self.advance();
            stmt.principal = None;
        } else {
            stmt.principal = Some(self.expect_identifier()?);
        }
        Ok(())
    }

    /// After `SCHEMA`: `name TRANSFER [class::]object`
    pub(crate) fn fill_alter_schema(&mut self, stmt: &mut AlterSchemaStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_word("TRANSFER")?;
        let (class, object) = self.parse_class_qualified_name()?;
        stmt.class = class.as_deref().map(option_kind_from_name);
        stmt.object = object;
        Ok(())
    }
}
