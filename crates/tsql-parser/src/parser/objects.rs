//! Object kind recognition for the `CREATE`, `ALTER` and `DROP` families, and
//! the clause bag used for objects without a dedicated record.

use super::cursor::Parser;
use super::error::PResult;
use super::names::identifier_from_token;
use super::options::GENERIC_OPTIONS;
use crate::ast::{
    option_kind_from_name, GenericOption, ObjectStatement, OptionValue, SchemaObjectName,
};
use crate::lexer::{Keyword, TokenKind};

/// Object kinds by their leading words. Kinds sharing a prefix are told
/// apart with one token of lookahead.
const OBJECT_KINDS: &[(&[&str], &str)] = &[
    (&["TABLE"], "Table"),
    (&["VIEW"], "View"),
    (&["PROC"], "Procedure"),
    (&["PROCEDURE"], "Procedure"),
    (&["FUNCTION"], "Function"),
    (&["TRIGGER"], "Trigger"),
    (&["INDEX"], "Index"),
    (&["STATISTICS"], "Statistics"),
    (&["SEQUENCE"], "Sequence"),
    (&["TYPE"], "Type"),
    (&["SCHEMA"], "Schema"),
    (&["SYNONYM"], "Synonym"),
    (&["DEFAULT"], "Default"),
    (&["RULE"], "Rule"),
    (&["AGGREGATE"], "Aggregate"),
    (&["AUTHORIZATION"], "Authorization"),
    (&["DATABASE"], "Database"),
    (&["DATABASE", "SCOPED", "CREDENTIAL"], "DatabaseScopedCredential"),
    (&["DATABASE", "AUDIT", "SPECIFICATION"], "DatabaseAuditSpecification"),
    (&["DATABASE", "ENCRYPTION", "KEY"], "DatabaseEncryptionKey"),
    (&["USER"], "User"),
    (&["LOGIN"], "Login"),
    (&["ROLE"], "Role"),
    (&["SERVER", "ROLE"], "ServerRole"),
    (&["APPLICATION", "ROLE"], "ApplicationRole"),
    (&["ASSEMBLY"], "Assembly"),
    (&["CERTIFICATE"], "Certificate"),
    (&["SYMMETRIC", "KEY"], "SymmetricKey"),
    (&["ASYMMETRIC", "KEY"], "AsymmetricKey"),
    (&["MASTER", "KEY"], "MasterKey"),
    (&["SERVICE", "MASTER", "KEY"], "ServiceMasterKey"),
    (&["CREDENTIAL"], "Credential"),
    (&["QUEUE"], "Queue"),
    (&["SERVICE"], "Service"),
    (&["CONTRACT"], "Contract"),
    (&["MESSAGE", "TYPE"], "MessageType"),
    (&["ROUTE"], "Route"),
    (&["REMOTE", "SERVICE", "BINDING"], "RemoteServiceBinding"),
    (&["BROKER", "PRIORITY"], "BrokerPriority"),
    (&["ENDPOINT"], "Endpoint"),
    (&["EVENT", "NOTIFICATION"], "EventNotification"),
    (&["EVENT", "SESSION"], "EventSession"),
    (&["FULLTEXT", "CATALOG"], "FullTextCatalog"),
    (&["FULLTEXT", "INDEX"], "FullTextIndex"),
    (&["FULLTEXT", "STOPLIST"], "FullTextStopList"),
    (&["SEARCH", "PROPERTY", "LIST"], "SearchPropertyList"),
    (&["WORKLOAD", "GROUP"], "WorkloadGroup"),
    (&["WORKLOAD", "CLASSIFIER"], "WorkloadClassifier"),
    (&["RESOURCE", "POOL"], "ResourcePool"),
    (&["RESOURCE", "GOVERNOR"], "ResourceGovernor"),
    (&["EXTERNAL", "DATA", "SOURCE"], "ExternalDataSource"),
    (&["EXTERNAL", "FILE", "FORMAT"], "ExternalFileFormat"),
    (&["EXTERNAL", "TABLE"], "ExternalTable"),
    (&["EXTERNAL", "LANGUAGE"], "ExternalLanguage"),
    (&["EXTERNAL", "LIBRARY"], "ExternalLibrary"),
    (&["EXTERNAL", "RESOURCE", "POOL"], "ExternalResourcePool"),
    (&["EXTERNAL", "MODEL"], "ExternalModel"),
    (&["XML", "SCHEMA", "COLLECTION"], "XmlSchemaCollection"),
    (&["PARTITION", "FUNCTION"], "PartitionFunction"),
    (&["PARTITION", "SCHEME"], "PartitionScheme"),
    (&["AVAILABILITY", "GROUP"], "AvailabilityGroup"),
    (&["SERVER", "AUDIT"], "ServerAudit"),
    (&["SERVER", "AUDIT", "SPECIFICATION"], "ServerAuditSpecification"),
    (&["SERVER", "CONFIGURATION"], "ServerConfiguration"),
    (&["SECURITY", "POLICY"], "SecurityPolicy"),
    (&["COLUMN", "ENCRYPTION", "KEY"], "ColumnEncryptionKey"),
    (&["COLUMN", "MASTER", "KEY"], "ColumnMasterKey"),
];

/// Kinds whose statements carry no object name.
const NAMELESS_KINDS: &[&str] = &[
    "MasterKey",
    "ServiceMasterKey",
    "ServerConfiguration",
    "ResourceGovernor",
];

fn extends(words: &[&str], matched: &[String], word: &str) -> bool {
    words.len() > matched.len()
        && words.iter().zip(matched).all(|(a, b)| *a == b)
        && words[matched.len()] == word
}

pub(crate) fn is_nameless_kind(kind: &str) -> bool {
    NAMELESS_KINDS.contains(&kind)
}

impl Parser {
    /// Consumes the words naming an object kind and returns the kind.
    /// Returns `None` when the words match no kind; the cursor may then sit
    /// past a partial match.
    pub(crate) fn parse_object_kind(&mut self) -> Option<&'static str> {
        let mut matched: Vec<String> = Vec::new();
        let mut kind = None;
        let mut partial = false;
        while self.at_word() {
            let word = self.literal_upper();
            let depth = matched.len();
            let complete = OBJECT_KINDS
                .iter()
                .find(|(words, _)| words.len() == depth + 1 && extends(words, &matched, &word));
            let continues = OBJECT_KINDS.iter().any(|(words, _)| {
                words.len() > depth + 1
                    && extends(words, &matched, &word)
                    && self.peek_is_word(words[depth + 1])
            });
            if complete.is_none() && !continues {
                break;
            }
            self.advance();
            matched.push(word);
            match complete {
                Some((_, name)) => {
                    kind = Some(*name);
                    partial = false;
                }
                None => partial = true,
            }
            if !continues {
                break;
            }
        }
        if partial { None } else { kind }
    }

    /// Fills an [`ObjectStatement`]: an optional name, then clauses up to the
    /// end of the statement. `AUTHORIZATION owner` is kept apart; parenthesized
    /// lists are flattened into the bag and every other clause becomes one
    /// option named after its leading words.
    pub(crate) fn fill_object(&mut self, stmt: &mut ObjectStatement, named: bool) -> PResult<()> {
        if named {
            stmt.name = self.parse_schema_object_name()?;
        }
        while !self.at_statement_end() {
            if self.eat(TokenKind::Comma) || self.eat_keyword(Keyword::With) {
                continue;
            }
            if self.eat_keyword(Keyword::Authorization) {
                stmt.authorization = Some(self.expect_identifier()?);
            } else if self.check(TokenKind::LeftParen) {
                stmt.options.extend(self.parse_option_list(&GENERIC_OPTIONS)?);
            } else {
                stmt.options.push(self.parse_object_clause()?);
            }
        }
        Ok(())
    }

    /// `WORD [WORD ...] [= value | (list) | value]`
    pub(crate) fn parse_object_clause(&mut self) -> PResult<GenericOption> {
        let mut words = Vec::new();
        let value = loop {
            match self.kind() {
                TokenKind::Eq => {
                    self.advance();
                    break Some(self.parse_option_value()?);
                }
                TokenKind::LeftParen if !words.is_empty() => {
                    break Some(OptionValue::List(self.parse_option_list(&GENERIC_OPTIONS)?));
                }
                TokenKind::Integer
                | TokenKind::Numeric
                | TokenKind::String
                | TokenKind::NationalString
                | TokenKind::Binary
                | TokenKind::Variable => break Some(self.parse_option_value()?),
                TokenKind::QuotedIdentifier | TokenKind::BracketedIdentifier => {
                    break Some(OptionValue::Identifier(self.parse_schema_object_name()?));
                }
                TokenKind::Keyword(Keyword::On | Keyword::Off)
                    if !words.is_empty()
                        && matches!(
                            self.peek().kind,
                            TokenKind::Comma
                                | TokenKind::RightParen
                                | TokenKind::Semicolon
                                | TokenKind::Eof
                        ) =>
                {
                    break Some(OptionValue::State(self.parse_option_state()?));
                }
                TokenKind::Keyword(Keyword::With | Keyword::Authorization)
                    if !words.is_empty() =>
                {
                    break None;
                }
                _ if self.at_word() && !self.at_statement_end() => {
                    if !words.is_empty() && self.peek().kind == TokenKind::Dot {
                        break Some(OptionValue::Identifier(self.parse_schema_object_name()?));
                    }
                    words.push(self.advance());
                }
                _ => break None,
            }
        };
        if words.is_empty() && value.is_none() {
            return Err(self.error_here("clause"));
        }
        let mut value = value;
        if value.is_none() && words.len() >= 2 {
            if let Some(last) = words.pop() {
                let name = identifier_from_token(&last);
                value = Some(OptionValue::Identifier(SchemaObjectName::from_parts(vec![name])));
            }
        }
        let name: Vec<String> = words
            .iter()
            .map(|token| token.literal.to_ascii_uppercase())
            .collect();
        let option_kind = if name.is_empty() {
            "Value".to_string()
        } else {
            option_kind_from_name(&name.join("_"))
        };
        Ok(GenericOption { option_kind, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ScalarExpression;
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    fn kind(sql: &str) -> (Option<&'static str>, String) {
        let mut p = parser(sql);
        let kind = p.parse_object_kind();
        (kind, p.current().literal.clone())
    }

    #[test]
    fn kinds_by_leading_words() {
        assert_eq!(kind("TABLE t"), (Some("Table"), "t".into()));
        assert_eq!(kind("PROC p"), (Some("Procedure"), "p".into()));
        assert_eq!(kind("SERVER ROLE r"), (Some("ServerRole"), "r".into()));
        assert_eq!(kind("SERVER AUDIT a"), (Some("ServerAudit"), "a".into()));
        assert_eq!(
            kind("SERVER AUDIT SPECIFICATION s"),
            (Some("ServerAuditSpecification"), "s".into())
        );
        assert_eq!(
            kind("SERVICE MASTER KEY REGENERATE"),
            (Some("ServiceMasterKey"), "REGENERATE".into())
        );
        assert_eq!(kind("SERVICE svc"), (Some("Service"), "svc".into()));
        assert_eq!(
            kind("EXTERNAL RESOURCE POOL p"),
            (Some("ExternalResourcePool"), "p".into())
        );
    }

    #[test]
    fn prefix_of_a_longer_kind_stops_at_the_name() {
        assert_eq!(kind("DATABASE audit"), (Some("Database"), "audit".into()));
        assert_eq!(
            kind("DATABASE SCOPED CONFIGURATION"),
            (Some("Database"), "SCOPED".into())
        );
        assert_eq!(kind("WIDGET w").0, None);
        assert_eq!(kind("EXTERNAL WIDGET w").0, None);
    }

    #[test]
    fn clauses_become_named_options() {
        let mut p = parser(
            "c AUTHORIZATION dbo ENCRYPTION BY PASSWORD = 'pw' \
             WITH SUBJECT = 'Signing', EXPIRY_DATE = '20301031'",
        );
        let mut stmt = ObjectStatement::default();
        p.fill_object(&mut stmt, true).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.name.base_name(), "c");
        assert_eq!(stmt.authorization.unwrap().value, "dbo");
        let kinds: Vec<_> = stmt.options.iter().map(|o| o.option_kind.as_str()).collect();
        assert_eq!(kinds, ["EncryptionByPassword", "Subject", "ExpiryDate"]);
        assert_eq!(
            stmt.options[0].expression(),
            Some(&ScalarExpression::string("pw"))
        );
    }

    #[test]
    fn trailing_word_is_the_value() {
        let mut p = parser("WITH ALGORITHM = AES_256 ENCRYPTION BY CERTIFICATE signer; SELECT 1");
        let mut stmt = ObjectStatement::default();
        p.fill_object(&mut stmt, false).unwrap();
        assert!(p.check(TokenKind::Semicolon));
        assert_eq!(stmt.options.len(), 2);
        let cert = stmt.option("EncryptionByCertificate").unwrap();
        assert_eq!(
            cert.value,
            Some(OptionValue::Identifier(SchemaObjectName::single("signer")))
        );
    }

    #[test]
    fn lists_and_dotted_names() {
        let mut p = parser(
            "s ON SERVER ADD EVENT sqlserver.rpc_completed (ACTION (sqlserver.sql_text)) \
             WITH (MAX_MEMORY = 4 MB, STARTUP_STATE = ON)",
        );
        let mut stmt = ObjectStatement::default();
        p.fill_object(&mut stmt, true).unwrap();
        assert!(p.at_eof());
        let kinds: Vec<_> = stmt.options.iter().map(|o| o.option_kind.as_str()).collect();
        assert_eq!(kinds, ["OnServerAddEvent", "Action", "MaxMemory", "StartupState"]);
    }
}
