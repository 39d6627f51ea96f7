//! Permission statements, impersonation, module signing and sensitivity
//! classification.

use super::cursor::Parser;
use super::error::PResult;
use super::options::GENERIC_OPTIONS;
use crate::ast::{
    option_kind_from_name, CryptoMechanism, DenyStatement, ExecuteAsStatement, GrantStatement,
    Identifier, Permission, RevertStatement, RevokeStatement, SecurityTarget,
    SensitivityClassificationStatement, SignatureStatement,
};
use crate::lexer::{Keyword, TokenKind};

/// The parts shared by `GRANT`, `DENY` and `REVOKE`.
#[derive(Default)]
struct PermissionClause {
    permissions: Vec<Permission>,
    all: bool,
    target: Option<SecurityTarget>,
}

impl Parser {
    pub(crate) fn fill_grant(&mut self, stmt: &mut GrantStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Grant)?;
        let clause = self.parse_permission_clause()?;
        stmt.permissions = clause.permissions;
        stmt.all = clause.all;
        stmt.target = clause.target;
        self.expect_keyword(Keyword::To)?;
        stmt.principals = self.parse_principals()?;
        if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Grant) {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Option)?;
            stmt.with_grant_option = true;
        }
        stmt.as_principal = self.parse_as_principal()?;
        Ok(())
    }

    pub(crate) fn fill_deny(&mut self, stmt: &mut DenyStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Deny)?;
        let clause = self.parse_permission_clause()?;
        stmt.permissions = clause.permissions;
        stmt.all = clause.all;
        stmt.target = clause.target;
        self.expect_keyword(Keyword::To)?;
        stmt.principals = self.parse_principals()?;
        stmt.cascade = self.eat_keyword(Keyword::Cascade);
        stmt.as_principal = self.parse_as_principal()?;
        Ok(())
    }

    pub(crate) fn fill_revoke(&mut self, stmt: &mut RevokeStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Revoke)?;
        if self.check_keyword(Keyword::Grant) && self.peek_keyword(Keyword::Option) {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::For)?;
            stmt.grant_option_for = true;
        }
        let clause = self.parse_permission_clause()?;
        stmt.permissions = clause.permissions;
        stmt.all = clause.all;
        stmt.target = clause.target;
        if !self.eat_keyword(Keyword::To) {
            self.expect_keyword(Keyword::From)?;
        }
        stmt.principals = self.parse_principals()?;
        stmt.cascade = self.eat_keyword(Keyword::Cascade);
        stmt.as_principal = self.parse_as_principal()?;
        Ok(())
    }

    /// `{ALL [PRIVILEGES] | perm [(cols)], ...} [ON [class ::] name [(cols)]]`
    fn parse_permission_clause(&mut self) -> PResult<PermissionClause> {
        let mut clause = PermissionClause::default();
        if self.eat_keyword(Keyword::All) {
            clause.all = true;
            self.eat_word("PRIVILEGES");
        } else {
            clause.permissions = self.comma_separated(Self::parse_permission)?;
        }
        if self.eat_keyword(Keyword::On) {
            let (class, name) = self.parse_class_qualified_name()?;
            let columns = if self.check(TokenKind::LeftParen) {
                self.parse_identifier_list()?
            } else {
                Vec::new()
            };
            clause.target = Some(SecurityTarget {
                object_kind: class.as_deref().map(option_kind_from_name),
                name,
                columns,
            });
        }
        Ok(clause)
    }

    /// Permission words such as `ALTER ANY USER`, then an optional column list.
    fn parse_permission(&mut self) -> PResult<Permission> {
        let mut permission = Permission::default();
        while self.at_word()
            && !self.check_keyword(Keyword::On)
            && !self.check_keyword(Keyword::To)
            && !self.check_keyword(Keyword::From)
        {
            permission.identifiers.push(self.take_identifier());
        }
        if permission.identifiers.is_empty() {
            return Err(self.error_here("permission"));
        }
        if self.check(TokenKind::LeftParen) {
            permission.columns = self.parse_identifier_list()?;
        }
        Ok(permission)
    }

    fn parse_principals(&mut self) -> PResult<Vec<Identifier>> {
        self.comma_separated(Self::expect_identifier_or_keyword)
    }

    fn parse_as_principal(&mut self) -> PResult<Option<Identifier>> {
        if self.eat_keyword(Keyword::As) {
            Ok(Some(self.expect_identifier_or_keyword()?))
        } else {
            Ok(None)
        }
    }

    /// `REVERT [WITH COOKIE = @cookie]`
    pub(crate) fn fill_revert(&mut self, stmt: &mut RevertStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Revert)?;
        if self.eat_keyword(Keyword::With) {
            self.expect_word("COOKIE")?;
            self.expect(TokenKind::Eq)?;
            stmt.cookie = Some(self.parse_scalar_expression()?);
        }
        Ok(())
    }

    /// `EXEC[UTE] AS principal [WITH {NO REVERT | COOKIE INTO @v}]`
    pub(crate) fn fill_execute_as(&mut self, stmt: &mut ExecuteAsStatement) -> PResult<()> {
        if !self.eat_keyword(Keyword::Exec) {
            self.expect_keyword(Keyword::Execute)?;
        }
        self.expect_keyword(Keyword::As)?;
        stmt.clause = self.parse_execute_as_clause()?;
        if self.eat_keyword(Keyword::With) {
            if self.eat_word("NO") {
                self.expect_keyword(Keyword::Revert)?;
                stmt.no_revert = true;
            } else {
                self.expect_word("COOKIE")?;
                self.expect_keyword(Keyword::Into)?;
                stmt.cookie = Some(self.expect(TokenKind::Variable)?.literal);
            }
        }
        Ok(())
    }

    /// `{ADD | DROP} [COUNTER] SIGNATURE {TO | FROM} [class ::] module BY crypto, ...`
    pub(crate) fn fill_signature(&mut self, stmt: &mut SignatureStatement) -> PResult<()> {
        self.advance();
        stmt.counter = self.eat_word("COUNTER");
        self.expect_word("SIGNATURE")?;
        if !self.eat_keyword(Keyword::To) {
            self.expect_keyword(Keyword::From)?;
        }
        let (class, element) = self.parse_class_qualified_name()?;
        stmt.element_kind = class.as_deref().map(option_kind_from_name);
        stmt.element = element;
        self.expect_keyword(Keyword::By)?;
        stmt.cryptos = self.comma_separated(Self::parse_crypto_mechanism)?;
        Ok(())
    }

    /// `CERTIFICATE c | ASYMMETRIC KEY k | PASSWORD = 'p'`, each with an
    /// optional `WITH {PASSWORD | SIGNATURE} = value`.
    fn parse_crypto_mechanism(&mut self) -> PResult<CryptoMechanism> {
        let mut crypto = CryptoMechanism::default();
        match self.expect_any_word()?.as_str() {
            "CERTIFICATE" => {
                crypto.kind = "Certificate".into();
                crypto.name = Some(self.expect_identifier()?);
            }
            "ASYMMETRIC" => {
                self.expect_word("KEY")?;
                crypto.kind = "AsymmetricKey".into();
                crypto.name = Some(self.expect_identifier()?);
            }
            "PASSWORD" => {
                crypto.kind = "Password".into();
                self.expect(TokenKind::Eq)?;
                crypto.password = Some(self.parse_scalar_expression()?);
                return Ok(crypto);
            }
            _ => return Err(self.error_message("expected CERTIFICATE, ASYMMETRIC KEY or PASSWORD")),
        }
        if self.eat_keyword(Keyword::With) {
            let word = self.expect_any_word()?;
            self.expect(TokenKind::Eq)?;
            let value = self.parse_scalar_expression()?;
            match word.as_str() {
                "PASSWORD" => crypto.password = Some(value),
                "SIGNATURE" => crypto.signature = Some(value),
                _ => return Err(self.error_message("expected PASSWORD or SIGNATURE")),
            }
        }
        Ok(crypto)
    }

    /// `{ADD | DROP} SENSITIVITY CLASSIFICATION {TO | FROM} cols [WITH (...)]`
    pub(crate) fn fill_sensitivity_classification(
        &mut self,
        stmt: &mut SensitivityClassificationStatement,
    ) -> PResult<()> {
        self.advance();
        self.expect_word("SENSITIVITY")?;
        self.expect_word("CLASSIFICATION")?;
        if !self.eat_keyword(Keyword::To) {
            self.expect_keyword(Keyword::From)?;
        }
        stmt.columns = self.comma_separated(Self::parse_column_reference)?;
        stmt.options = self.parse_with_option_list(&GENERIC_OPTIONS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExecuteAsKind, ScalarExpression};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn grant_with_columns_and_class() {
        let mut p = parser(
            "GRANT SELECT (a, b), VIEW DEFINITION ON SCHEMA::sales TO analyst, [report user] \
             WITH GRANT OPTION AS dbo",
        );
        let mut stmt = GrantStatement::default();
        p.fill_grant(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.permissions.len(), 2);
        assert_eq!(stmt.permissions[0].name(), "SELECT");
        assert_eq!(stmt.permissions[0].columns.len(), 2);
        assert_eq!(stmt.permissions[1].name(), "VIEW DEFINITION");
        let target = stmt.target.unwrap();
        assert_eq!(target.object_kind.as_deref(), Some("Schema"));
        assert_eq!(target.name.base_name(), "sales");
        assert_eq!(stmt.principals.len(), 2);
        assert!(stmt.with_grant_option);
        assert_eq!(stmt.as_principal.unwrap().value, "dbo");
    }

    #[test]
    fn database_level_grant_and_deny() {
        let mut p = parser("GRANT CREATE TABLE, ALTER ANY USER TO dev");
        let mut stmt = GrantStatement::default();
        p.fill_grant(&mut stmt).unwrap();
        assert!(stmt.target.is_none());
        assert_eq!(stmt.permissions[1].name(), "ALTER ANY USER");

        let mut p = parser("DENY ALL PRIVILEGES ON dbo.t TO guest CASCADE");
        let mut stmt = DenyStatement::default();
        p.fill_deny(&mut stmt).unwrap();
        assert!(stmt.all);
        assert!(stmt.cascade);
        assert!(stmt.target.unwrap().object_kind.is_none());
    }

    #[test]
    fn revoke_grant_option() {
        let mut p = parser("REVOKE GRANT OPTION FOR EXECUTE ON OBJECT::dbo.p FROM app CASCADE");
        let mut stmt = RevokeStatement::default();
        p.fill_revoke(&mut stmt).unwrap();
        assert!(stmt.grant_option_for);
        assert_eq!(stmt.permissions[0].name(), "EXECUTE");
        assert_eq!(
            stmt.target.unwrap().object_kind.as_deref(),
            Some("Object")
        );
        assert!(stmt.cascade);
    }

    #[test]
    fn impersonation() {
        let mut p = parser("EXECUTE AS USER = 'bob' WITH COOKIE INTO @cookie");
        let mut stmt = ExecuteAsStatement::default();
        p.fill_execute_as(&mut stmt).unwrap();
        assert_eq!(stmt.clause.kind, ExecuteAsKind::User);
        assert_eq!(stmt.cookie.as_deref(), Some("@cookie"));

        let mut p = parser("EXEC AS CALLER WITH NO REVERT");
        let mut stmt = ExecuteAsStatement::default();
        p.fill_execute_as(&mut stmt).unwrap();
        assert_eq!(stmt.clause.kind, ExecuteAsKind::Caller);
        assert!(stmt.no_revert);

        let mut p = parser("REVERT WITH COOKIE = @cookie");
        let mut stmt = RevertStatement::default();
        p.fill_revert(&mut stmt).unwrap();
        assert_eq!(stmt.cookie, Some(ScalarExpression::Variable("@cookie".into())));
    }

    #[test]
    fn signatures() {
        let mut p = parser(
            "ADD COUNTER SIGNATURE TO dbo.p BY CERTIFICATE signer WITH PASSWORD = 'pw', \
             ASYMMETRIC KEY k",
        );
        let mut stmt = SignatureStatement::default();
        p.fill_signature(&mut stmt).unwrap();
        assert!(stmt.counter);
        assert_eq!(stmt.element.base_name(), "p");
        assert_eq!(stmt.cryptos.len(), 2);
        assert_eq!(stmt.cryptos[0].kind, "Certificate");
        assert!(stmt.cryptos[0].password.is_some());
        assert_eq!(stmt.cryptos[1].kind, "AsymmetricKey");
    }

    #[test]
    fn unqualified_signature_elements() {
        let mut p = parser("ADD SIGNATURE TO Proc_A BY CERTIFICATE signer");
        let mut stmt = SignatureStatement::default();
        p.fill_signature(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert!(!stmt.counter);
        assert!(stmt.element_kind.is_none());
        assert_eq!(stmt.element.base_name(), "Proc_A");
        assert_eq!(stmt.cryptos.len(), 1);
        assert_eq!(stmt.cryptos[0].name.as_ref().unwrap().value, "signer");

        let mut p = parser("DROP SIGNATURE FROM OBJECT::p BY ASYMMETRIC KEY k");
        let mut stmt = SignatureStatement::default();
        p.fill_signature(&mut stmt).unwrap();
        assert_eq!(stmt.element_kind.as_deref(), Some("Object"));
        assert_eq!(stmt.element.base_name(), "p");
        assert_eq!(stmt.cryptos[0].kind, "AsymmetricKey");

        let mut p = parser("DROP COUNTER SIGNATURE FROM p BY PASSWORD = 'pw'");
        let mut stmt = SignatureStatement::default();
        p.fill_signature(&mut stmt).unwrap();
        assert!(stmt.counter);
        assert_eq!(stmt.element.base_name(), "p");
        assert_eq!(stmt.cryptos[0].kind, "Password");
    }

    #[test]
    fn sensitivity_classification() {
        let mut p = parser(
            "ADD SENSITIVITY CLASSIFICATION TO dbo.people.email, dbo.people.phone \
             WITH (LABEL = 'PII', INFORMATION_TYPE = 'Contact', RANK = MEDIUM)",
        );
        let mut stmt = SensitivityClassificationStatement::default();
        p.fill_sensitivity_classification(&mut stmt).unwrap();
        assert_eq!(stmt.columns.len(), 2);
        let kinds: Vec<_> = stmt.options.iter().map(|o| o.option_kind.as_str()).collect();
        assert_eq!(kinds, ["Label", "InformationType", "Rank"]);

        let mut p = parser("DROP SENSITIVITY CLASSIFICATION FROM dbo.people.email");
        let mut stmt = SensitivityClassificationStatement::default();
        p.fill_sensitivity_classification(&mut stmt).unwrap();
        assert!(stmt.options.is_empty());
    }
}
