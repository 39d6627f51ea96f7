//! Service broker objects, event notifications and row-level security
//! policies.

use super::cursor::Parser;
use super::error::PResult;
use super::options::GENERIC_OPTIONS;
use crate::ast::{
    option_kind_from_name, ContractMessage, CreateContractStatement,
    CreateEventNotificationStatement, EventNotificationScope, FunctionCall, MessageTypeStatement,
    MultiPartIdentifier, SecurityPolicyStatement, SecurityPredicateAction,
    SecurityPredicateActionKind, ServiceStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// After `SERVICE`: `name [AUTHORIZATION o] [ON QUEUE q] [(contract, ...)]`.
    /// `ALTER SERVICE` lists `ADD|DROP CONTRACT c` items; only the names are
    /// kept.
    pub(crate) fn fill_service(&mut self, stmt: &mut ServiceStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_keyword(Keyword::Authorization) {
            stmt.authorization = Some(self.expect_identifier()?);
        }
        if self.eat_keyword(Keyword::On) {
            self.expect_word("QUEUE")?;
            stmt.queue = Some(self.parse_schema_object_name()?);
        }
        if self.check(TokenKind::LeftParen) {
            stmt.contracts = self.parenthesized_list(|p| {
                if p.eat_keyword(Keyword::Add) || p.eat_keyword(Keyword::Drop) {
                    p.expect_word("CONTRACT")?;
                }
                p.expect_identifier_or_keyword()
            })?;
        }
        Ok(())
    }

    /// After `CONTRACT`: `name [AUTHORIZATION o] (msg SENT BY {INITIATOR |
    /// TARGET | ANY}, ...)`
    pub(crate) fn fill_contract(&mut self, stmt: &mut CreateContractStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_keyword(Keyword::Authorization) {
            stmt.authorization = Some(self.expect_identifier()?);
        }
        stmt.messages = self.parenthesized_list(|p| {
            let name = p.expect_identifier_or_keyword()?;
            p.expect_word("SENT")?;
            p.expect_keyword(Keyword::By)?;
            let sent_by = match p.expect_any_word()?.as_str() {
                "INITIATOR" => "Initiator",
                "TARGET" => "Target",
                "ANY" => "Any",
                _ => return Err(p.error_message("expected INITIATOR, TARGET or ANY")),
            };
            Ok(ContractMessage {
                name,
                sent_by: sent_by.to_string(),
            })
        })?;
        Ok(())
    }

    /// After `MESSAGE TYPE`: `name [AUTHORIZATION o] [VALIDATION = {NONE |
    /// EMPTY | WELL_FORMED_XML | VALID_XML WITH SCHEMA COLLECTION c}]`
    pub(crate) fn fill_message_type(&mut self, stmt: &mut MessageTypeStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        if self.eat_keyword(Keyword::Authorization) {
            stmt.authorization = Some(self.expect_identifier()?);
        }
        if self.eat_word("VALIDATION") {
            self.expect(TokenKind::Eq)?;
            let method = self.expect_any_word()?;
            if method == "VALID_XML" {
                self.expect_keyword(Keyword::With)?;
                self.expect_keyword(Keyword::Schema)?;
                self.expect_word("COLLECTION")?;
                stmt.schema_collection = Some(self.parse_schema_object_name()?);
            }
            stmt.validation = Some(option_kind_from_name(&method));
        }
        Ok(())
    }

    /// After `EVENT NOTIFICATION`: `name ON {SERVER | DATABASE | QUEUE q}
    /// [WITH FAN_IN] FOR event, ... TO SERVICE 'svc', 'instance'`
    pub(crate) fn fill_event_notification(
        &mut self,
        stmt: &mut CreateEventNotificationStatement,
    ) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;
        stmt.scope = if self.eat_keyword(Keyword::Database) {
            EventNotificationScope::Database
        } else if self.eat_word("QUEUE") {
            EventNotificationScope::Queue(self.parse_schema_object_name()?)
        } else {
            self.expect_word("SERVER")?;
            EventNotificationScope::Server
        };
        if self.check_keyword(Keyword::With) && self.peek_is_word("FAN_IN") {
            self.advance();
            self.advance();
            stmt.with_fan_in = true;
        }
        self.expect_keyword(Keyword::For)?;
        stmt.events = self.comma_separated(Self::expect_identifier)?;
        self.expect_keyword(Keyword::To)?;
        self.expect_word("SERVICE")?;
        stmt.broker_service = Some(self.parse_primary()?);
        self.expect(TokenKind::Comma)?;
        stmt.broker_instance = Some(self.parse_primary()?);
        Ok(())
    }

    /// After `SECURITY POLICY`: `name {ADD|DROP|ALTER} predicate, ...
    /// [WITH (options)] [NOT FOR REPLICATION]`
    pub(crate) fn fill_security_policy(
        &mut self,
        stmt: &mut SecurityPolicyStatement,
    ) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        if self.check_keyword(Keyword::Add)
            || self.check_keyword(Keyword::Drop)
            || self.check_keyword(Keyword::Alter)
        {
            stmt.predicates = self.comma_separated(Self::parse_security_predicate)?;
        }
        stmt.options = self.parse_with_option_list(&GENERIC_OPTIONS)?;
        stmt.not_for_replication = self.eat_not_for_replication()?;
        Ok(())
    }

    /// `{ADD|ALTER} {FILTER|BLOCK} PREDICATE fn(args) ON table [operation]`
    /// or `DROP {FILTER|BLOCK} PREDICATE ON table [operation]`.
    fn parse_security_predicate(&mut self) -> PResult<SecurityPredicateAction> {
        let action = match self.kind() {
            TokenKind::Keyword(Keyword::Add) => SecurityPredicateActionKind::Add,
            TokenKind::Keyword(Keyword::Drop) => SecurityPredicateActionKind::Drop,
            TokenKind::Keyword(Keyword::Alter) => SecurityPredicateActionKind::Alter,
            _ => return Err(self.error_here("ADD, DROP or ALTER")),
        };
        self.advance();
        let block = if self.eat_word("BLOCK") {
            true
        } else {
            self.expect_word("FILTER")?;
            false
        };
        self.expect_word("PREDICATE")?;
        let function = if action == SecurityPredicateActionKind::Drop {
            None
        } else {
            Some(self.parse_predicate_function()?)
        };
        self.expect_keyword(Keyword::On)?;
        let target = self.parse_schema_object_name()?;
        let operation = self.parse_block_operation()?;
        Ok(SecurityPredicateAction {
            action,
            block,
            function,
            target,
            operation,
        })
    }

    fn parse_predicate_function(&mut self) -> PResult<FunctionCall> {
        let mut parts = self.parse_name_parts()?.parts;
        let name = parts.pop().unwrap_or_default();
        let call_target = (!parts.is_empty()).then(|| MultiPartIdentifier::new(parts));
        self.parse_function_call(call_target, name)
    }

    /// `[AFTER {INSERT|UPDATE} | BEFORE {UPDATE|DELETE}]`
    fn parse_block_operation(&mut self) -> PResult<Option<String>> {
        let when = if self.eat_word("AFTER") {
            "After"
        } else if self.eat_word("BEFORE") {
            "Before"
        } else {
            return Ok(None);
        };
        let what = match self.kind() {
            TokenKind::Keyword(Keyword::Insert) => "Insert",
            TokenKind::Keyword(Keyword::Update) => "Update",
            TokenKind::Keyword(Keyword::Delete) => "Delete",
            _ => return Err(self.error_here("INSERT, UPDATE or DELETE")),
        };
        self.advance();
        Ok(Some(format!("{when}{what}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{OptionValue, ScalarExpression};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn services_and_contracts() {
        let mut p = parser(
            "[//orders/svc] AUTHORIZATION dbo ON QUEUE dbo.order_queue ([//orders/contract])",
        );
        let mut stmt = ServiceStatement::default();
        p.fill_service(&mut stmt).unwrap();
        assert_eq!(stmt.name.value, "//orders/svc");
        assert_eq!(stmt.queue.unwrap().base_name(), "order_queue");
        assert_eq!(stmt.contracts.len(), 1);

        let mut p = parser("svc (ADD CONTRACT c1, DROP CONTRACT c2)");
        let mut stmt = ServiceStatement::default();
        p.fill_service(&mut stmt).unwrap();
        assert_eq!(stmt.contracts.len(), 2);

        let mut p = parser("[//c] ([//req] SENT BY INITIATOR, [DEFAULT] SENT BY ANY)");
        let mut stmt = CreateContractStatement::default();
        p.fill_contract(&mut stmt).unwrap();
        let senders: Vec<_> = stmt.messages.iter().map(|m| m.sent_by.as_str()).collect();
        assert_eq!(senders, ["Initiator", "Any"]);
    }

    #[test]
    fn message_types() {
        let mut p = parser("[//req] VALIDATION = WELL_FORMED_XML");
        let mut stmt = MessageTypeStatement::default();
        p.fill_message_type(&mut stmt).unwrap();
        assert_eq!(stmt.validation.as_deref(), Some("WellFormedXml"));

        let mut p = parser("[//doc] VALIDATION = VALID_XML WITH SCHEMA COLLECTION dbo.docs");
        let mut stmt = MessageTypeStatement::default();
        p.fill_message_type(&mut stmt).unwrap();
        assert_eq!(stmt.validation.as_deref(), Some("ValidXml"));
        assert_eq!(stmt.schema_collection.unwrap().base_name(), "docs");
    }

    #[test]
    fn event_notification() {
        let mut p = parser(
            "log_ddl ON DATABASE WITH FAN_IN FOR DDL_TABLE_EVENTS, ALTER_PROCEDURE \
             TO SERVICE 'audit_svc', 'current database'",
        );
        let mut stmt = CreateEventNotificationStatement::default();
        p.fill_event_notification(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.scope, EventNotificationScope::Database);
        assert!(stmt.with_fan_in);
        assert_eq!(stmt.events.len(), 2);
        assert_eq!(stmt.broker_service, Some(ScalarExpression::string("audit_svc")));
    }

    #[test]
    fn security_policy() {
        let mut p = parser(
            "rls.tenant_policy \
             ADD FILTER PREDICATE rls.fn_tenant(tenant_id) ON dbo.orders, \
             ADD BLOCK PREDICATE rls.fn_tenant(tenant_id) ON dbo.orders AFTER INSERT \
             WITH (STATE = ON) NOT FOR REPLICATION",
        );
        let mut stmt = SecurityPolicyStatement::default();
        p.fill_security_policy(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.predicates.len(), 2);
        let filter = &stmt.predicates[0];
        assert!(!filter.block);
        let function = filter.function.as_ref().unwrap();
        assert_eq!(function.name.value, "fn_tenant");
        assert_eq!(function.parameters.len(), 1);
        assert_eq!(stmt.predicates[1].operation.as_deref(), Some("AfterInsert"));
        assert!(matches!(stmt.options[0].value, Some(OptionValue::State(_))));
        assert!(stmt.not_for_replication);

        let mut p = parser("rls.tenant_policy DROP FILTER PREDICATE ON dbo.orders");
        let mut stmt = SecurityPolicyStatement::default();
        p.fill_security_policy(&mut stmt).unwrap();
        assert!(stmt.predicates[0].function.is_none());
    }
}
