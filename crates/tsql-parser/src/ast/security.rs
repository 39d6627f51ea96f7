//! Permissions, impersonation, signatures and sensitivity classification.

use serde::Serialize;

use super::{
    ColumnReference, ExecuteAsClause, Identifier, OptionBag, ScalarExpression, SchemaObjectName,
};

/// One permission in a `GRANT`/`DENY`/`REVOKE` list, e.g. `VIEW DEFINITION` or `SELECT (a, b)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Permission {
    /// The words of the permission name.
    pub identifiers: Vec<Identifier>,
    /// Column list.
    pub columns: Vec<Identifier>,
}

impl Permission {
    /// The permission words joined by spaces, upper-cased.
    #[must_use]
    pub fn name(&self) -> String {
        self.identifiers
            .iter()
            .map(|i| i.value.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `ON [class ::] securable [(cols)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SecurityTarget {
    /// Pascal-case securable class, e.g. `Schema`, `Object`, `Database`.
    pub object_kind: Option<String>,
    /// Securable name.
    pub name: SchemaObjectName,
    /// Column list.
    pub columns: Vec<Identifier>,
}

/// `GRANT perms [ON target] TO principals [WITH GRANT OPTION] [AS principal]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GrantStatement {
    /// Permissions.
    pub permissions: Vec<Permission>,
    /// `ALL [PRIVILEGES]`.
    pub all: bool,
    /// Securable.
    pub target: Option<SecurityTarget>,
    /// Grantees.
    pub principals: Vec<Identifier>,
    /// `WITH GRANT OPTION`.
    pub with_grant_option: bool,
    /// `AS principal`.
    pub as_principal: Option<Identifier>,
}

/// `DENY perms [ON target] TO principals [CASCADE] [AS principal]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DenyStatement {
    /// Permissions.
    pub permissions: Vec<Permission>,
    /// `ALL [PRIVILEGES]`.
    pub all: bool,
    /// Securable.
    pub target: Option<SecurityTarget>,
    /// Principals.
    pub principals: Vec<Identifier>,
    /// `CASCADE`.
    pub cascade: bool,
    /// `AS principal`.
    pub as_principal: Option<Identifier>,
}

/// `REVOKE [GRANT OPTION FOR] perms [ON target] {TO|FROM} principals [CASCADE] [AS principal]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RevokeStatement {
    /// `GRANT OPTION FOR`.
    pub grant_option_for: bool,
    /// Permissions.
    pub permissions: Vec<Permission>,
    /// `ALL [PRIVILEGES]`.
    pub all: bool,
    /// Securable.
    pub target: Option<SecurityTarget>,
    /// Principals.
    pub principals: Vec<Identifier>,
    /// `CASCADE`.
    pub cascade: bool,
    /// `AS principal`.
    pub as_principal: Option<Identifier>,
}

/// `REVERT [WITH COOKIE = @cookie]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RevertStatement {
    /// The cookie.
    pub cookie: Option<ScalarExpression>,
}

/// `EXECUTE AS ... [WITH NO REVERT | COOKIE INTO @v]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecuteAsStatement {
    /// Principal.
    pub clause: ExecuteAsClause,
    /// `WITH NO REVERT`.
    pub no_revert: bool,
    /// `WITH COOKIE INTO @v`.
    pub cookie: Option<String>,
}

/// `BY CERTIFICATE c [WITH PASSWORD = '...' | SIGNATURE = 0x...]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CryptoMechanism {
    /// `Certificate`, `AsymmetricKey` or `Password`.
    pub kind: String,
    /// Certificate or key name.
    pub name: Option<Identifier>,
    /// `PASSWORD = ...`.
    pub password: Option<ScalarExpression>,
    /// `SIGNATURE = ...`.
    pub signature: Option<ScalarExpression>,
}

/// `{ADD|DROP} [COUNTER] SIGNATURE TO|FROM [class::]module BY crypto, ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SignatureStatement {
    /// `COUNTER`.
    pub counter: bool,
    /// Pascal-case module class, e.g. `Object`.
    pub element_kind: Option<String>,
    /// Signed module.
    pub element: SchemaObjectName,
    /// Signers.
    pub cryptos: Vec<CryptoMechanism>,
}

/// `{ADD|DROP} SENSITIVITY CLASSIFICATION {TO|FROM} cols [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SensitivityClassificationStatement {
    /// Classified columns.
    pub columns: Vec<ColumnReference>,
    /// `LABEL`, `LABEL_ID`, `INFORMATION_TYPE`, `INFORMATION_TYPE_ID`, `RANK`.
    pub options: OptionBag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_name_joins_words() {
        let p = Permission {
            identifiers: vec![Identifier::new("view"), Identifier::new("Definition")],
            columns: vec![],
        };
        assert_eq!(p.name(), "VIEW DEFINITION");
    }
}
