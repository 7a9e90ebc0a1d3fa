pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{FormParser, ParseError, Rule, parse};
