//! Token types for the T-SQL lexer.

use serde::Serialize;

use super::{Location, Span};

macro_rules! reserved_keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// T-SQL reserved keywords.
        ///
        /// Only words on the server's reserved list get their own token kind.
        /// Contextual words such as `SEQUENCE`, `ONLINE` or `GO` arrive as
        /// [`TokenKind::Identifier`] and are matched by their literal text.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            /// Every reserved keyword, in declaration order.
            pub const RESERVED: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as it is spelled in source.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

reserved_keywords! {
    Add => "ADD",
    All => "ALL",
    Alter => "ALTER",
    And => "AND",
    Any => "ANY",
    As => "AS",
    Asc => "ASC",
    Authorization => "AUTHORIZATION",
    Backup => "BACKUP",
    Begin => "BEGIN",
    Between => "BETWEEN",
    Break => "BREAK",
    Browse => "BROWSE",
    Bulk => "BULK",
    By => "BY",
    Cascade => "CASCADE",
    Case => "CASE",
    Check => "CHECK",
    Checkpoint => "CHECKPOINT",
    Close => "CLOSE",
    Clustered => "CLUSTERED",
    Coalesce => "COALESCE",
    Collate => "COLLATE",
    Column => "COLUMN",
    Commit => "COMMIT",
    Compute => "COMPUTE",
    Constraint => "CONSTRAINT",
    Contains => "CONTAINS",
    ContainsTable => "CONTAINSTABLE",
    Continue => "CONTINUE",
    Convert => "CONVERT",
    Create => "CREATE",
    Cross => "CROSS",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    CurrentUser => "CURRENT_USER",
    Cursor => "CURSOR",
    Database => "DATABASE",
    Dbcc => "DBCC",
    Deallocate => "DEALLOCATE",
    Declare => "DECLARE",
    Default => "DEFAULT",
    Delete => "DELETE",
    Deny => "DENY",
    Desc => "DESC",
    Disk => "DISK",
    Distinct => "DISTINCT",
    Distributed => "DISTRIBUTED",
    Double => "DOUBLE",
    Drop => "DROP",
    Dump => "DUMP",
    Else => "ELSE",
    End => "END",
    Errlvl => "ERRLVL",
    Escape => "ESCAPE",
    Except => "EXCEPT",
    Exec => "EXEC",
    Execute => "EXECUTE",
    Exists => "EXISTS",
    Exit => "EXIT",
    External => "EXTERNAL",
    Fetch => "FETCH",
    File => "FILE",
    FillFactor => "FILLFACTOR",
    For => "FOR",
    Foreign => "FOREIGN",
    FreeText => "FREETEXT",
    FreeTextTable => "FREETEXTTABLE",
    From => "FROM",
    Full => "FULL",
    Function => "FUNCTION",
    Goto => "GOTO",
    Grant => "GRANT",
    Group => "GROUP",
    Having => "HAVING",
    HoldLock => "HOLDLOCK",
    Identity => "IDENTITY",
    IdentityInsert => "IDENTITY_INSERT",
    IdentityCol => "IDENTITYCOL",
    If => "IF",
    In => "IN",
    Index => "INDEX",
    Inner => "INNER",
    Insert => "INSERT",
    Intersect => "INTERSECT",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Kill => "KILL",
    Left => "LEFT",
    Like => "LIKE",
    LineNo => "LINENO",
    Load => "LOAD",
    Merge => "MERGE",
    National => "NATIONAL",
    NoCheck => "NOCHECK",
    NonClustered => "NONCLUSTERED",
    Not => "NOT",
    Null => "NULL",
    NullIf => "NULLIF",
    Of => "OF",
    Off => "OFF",
    Offsets => "OFFSETS",
    On => "ON",
    Open => "OPEN",
    OpenDataSource => "OPENDATASOURCE",
    OpenQuery => "OPENQUERY",
    OpenRowset => "OPENROWSET",
    OpenXml => "OPENXML",
    Option => "OPTION",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Over => "OVER",
    Percent => "PERCENT",
    Pivot => "PIVOT",
    Plan => "PLAN",
    Precision => "PRECISION",
    Primary => "PRIMARY",
    Print => "PRINT",
    Proc => "PROC",
    Procedure => "PROCEDURE",
    Public => "PUBLIC",
    RaisError => "RAISERROR",
    Read => "READ",
    ReadText => "READTEXT",
    Reconfigure => "RECONFIGURE",
    References => "REFERENCES",
    Replication => "REPLICATION",
    Restore => "RESTORE",
    Restrict => "RESTRICT",
    Return => "RETURN",
    Revert => "REVERT",
    Revoke => "REVOKE",
    Right => "RIGHT",
    Rollback => "ROLLBACK",
    RowCount => "ROWCOUNT",
    RowGuidCol => "ROWGUIDCOL",
    Rule => "RULE",
    Save => "SAVE",
    Schema => "SCHEMA",
    SecurityAudit => "SECURITYAUDIT",
    Select => "SELECT",
    SemanticKeyPhraseTable => "SEMANTICKEYPHRASETABLE",
    SemanticSimilarityDetailsTable => "SEMANTICSIMILARITYDETAILSTABLE",
    SemanticSimilarityTable => "SEMANTICSIMILARITYTABLE",
    SessionUser => "SESSION_USER",
    Set => "SET",
    SetUser => "SETUSER",
    Shutdown => "SHUTDOWN",
    Some => "SOME",
    Statistics => "STATISTICS",
    SystemUser => "SYSTEM_USER",
    Table => "TABLE",
    TableSample => "TABLESAMPLE",
    TextSize => "TEXTSIZE",
    Then => "THEN",
    To => "TO",
    Top => "TOP",
    Tran => "TRAN",
    Transaction => "TRANSACTION",
    Trigger => "TRIGGER",
    Truncate => "TRUNCATE",
    TryConvert => "TRY_CONVERT",
    TsEqual => "TSEQUAL",
    Union => "UNION",
    Unique => "UNIQUE",
    Unpivot => "UNPIVOT",
    Update => "UPDATE",
    UpdateText => "UPDATETEXT",
    Use => "USE",
    User => "USER",
    Values => "VALUES",
    Varying => "VARYING",
    View => "VIEW",
    WaitFor => "WAITFOR",
    When => "WHEN",
    Where => "WHERE",
    While => "WHILE",
    With => "WITH",
    WriteText => "WRITETEXT",
}

impl Keyword {
    /// Returns true if this keyword can begin a statement.
    ///
    /// This is the stop set used when recovering from a malformed statement.
    #[must_use]
    pub const fn starts_statement(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Alter
                | Self::Drop
                | Self::Select
                | Self::Insert
                | Self::Update
                | Self::Delete
                | Self::Declare
                | Self::Exec
                | Self::Execute
                | Self::If
                | Self::While
                | Self::Begin
                | Self::End
                | Self::Print
                | Self::Grant
                | Self::Revoke
                | Self::Return
                | Self::Break
                | Self::Continue
                | Self::Goto
                | Self::WaitFor
                | Self::Backup
                | Self::Restore
                | Self::Use
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A reserved keyword.
    Keyword(Keyword),
    /// Plain identifier, including contextual keywords and `#temp` names.
    Identifier,
    /// `"double quoted"` identifier.
    QuotedIdentifier,
    /// `[bracketed]` identifier.
    BracketedIdentifier,
    /// `@local` or `@@global` variable.
    Variable,
    /// Integer literal.
    Integer,
    /// Decimal literal with a fractional part.
    Numeric,
    /// Literal with an exponent.
    Real,
    /// `$` prefixed money literal.
    Money,
    /// `'string'` literal.
    String,
    /// `N'string'` literal.
    NationalString,
    /// `0x` binary literal.
    Binary,

    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// <> or !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// !<
    NotLt,
    /// !>
    NotGt,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// +=
    PlusEq,
    /// -=
    MinusEq,
    /// *=
    StarEq,
    /// /=
    SlashEq,
    /// %=
    PercentEq,
    /// &=
    AndEq,
    /// |=
    OrEq,
    /// ^=
    XorEq,

    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns a short human-readable description used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Keyword(kw) => kw.as_str(),
            Self::Identifier => "identifier",
            Self::QuotedIdentifier => "quoted identifier",
            Self::BracketedIdentifier => "bracketed identifier",
            Self::Variable => "variable",
            Self::Integer => "integer",
            Self::Numeric => "numeric literal",
            Self::Real => "real literal",
            Self::Money => "money literal",
            Self::String => "string",
            Self::NationalString => "national string",
            Self::Binary => "binary literal",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NotEq => "'<>'",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::NotLt => "'!<'",
            Self::NotGt => "'!>'",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitXor => "'^'",
            Self::BitNot => "'~'",
            Self::PlusEq => "'+='",
            Self::MinusEq => "'-='",
            Self::StarEq => "'*='",
            Self::SlashEq => "'/='",
            Self::PercentEq => "'%='",
            Self::AndEq => "'&='",
            Self::OrEq => "'|='",
            Self::XorEq => "'^='",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Eof => "end of input",
        }
    }

    /// Returns true for the three identifier token kinds.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::QuotedIdentifier | Self::BracketedIdentifier
        )
    }

    /// Returns true for `=` and the compound assignment operators.
    #[must_use]
    pub const fn is_assignment(&self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::PlusEq
                | Self::MinusEq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::AndEq
                | Self::OrEq
                | Self::XorEq
        )
    }
}

/// A token with its verbatim text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Verbatim source text, quotes and brackets included.
    pub literal: String,
    /// Byte range in the source.
    pub span: Span,
    /// Line/column of the first character.
    pub location: Location,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        span: Span,
        location: Location,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
            location,
        }
    }

    /// Creates the end-of-input sentinel at the given offset.
    #[must_use]
    pub fn eof(offset: usize, location: Location) -> Self {
        Self::new(TokenKind::Eof, String::new(), Span::new(offset, offset), location)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_is_case_insensitive() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("Identity_Insert"), Some(Keyword::IdentityInsert));
        assert_eq!(Keyword::from_str("sequence"), None);
        assert_eq!(Keyword::from_str("GO"), None);
    }

    #[test]
    fn keyword_round_trips_through_text() {
        for kw in Keyword::RESERVED {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw));
        }
    }

    #[test]
    fn statement_starters() {
        assert!(Keyword::Create.starts_statement());
        assert!(Keyword::Use.starts_statement());
        assert!(!Keyword::Set.starts_statement());
        assert!(!Keyword::With.starts_statement());
    }

    #[test]
    fn token_as_keyword() {
        let select = Token::new(
            TokenKind::Keyword(Keyword::Select),
            "select",
            Span::new(0, 6),
            Location::default(),
        );
        let plus = Token::new(TokenKind::Plus, "+", Span::new(0, 1), Location::default());
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
        assert!(Token::eof(6, Location::default()).is_eof());
    }

    #[test]
    fn assignment_kinds() {
        assert!(TokenKind::Eq.is_assignment());
        assert!(TokenKind::XorEq.is_assignment());
        assert!(!TokenKind::NotEq.is_assignment());
    }
}
