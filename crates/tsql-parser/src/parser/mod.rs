//! T-SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Every sub-parser advances one shared cursor; errors inside a statement are
//! recorded and the cursor skips to the next statement boundary.

mod cursor;
mod error;
mod recovery;

mod boolean;
mod data_type;
mod expression;
mod hints;
mod names;
mod options;
mod pratt;
mod query;

mod control_flow;
mod dml;
mod execute;
mod script;
mod security;
mod server;

mod alter;
mod alter_table;
mod broker;
mod create;
mod database;
mod drop;
mod index;
mod objects;
mod principals;
mod routines;
mod table;

pub use cursor::Parser;
pub use error::{PResult, ParseError};
