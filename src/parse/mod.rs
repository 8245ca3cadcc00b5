mod context;
mod error;
mod lex;
mod parser;

pub use error::{LexError, ParseError};
pub use lex::{lex, Lexed};
pub use parser::{parse, Parsed};
