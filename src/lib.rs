pub mod ast;
pub mod cli;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinOp, Directive, DirectiveKind, Target, Token, UnaryOp};
pub use compiler::{Dataquery, SQLITE_MAX_LIMIT};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser, parse_directive, parse_query};
pub use value::Value;
