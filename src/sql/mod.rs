//! SQL front end
//!
//! Lexer, token definitions, AST and parser for the statement grammar.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Statement;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Keyword, Token};

/// Parse a single statement
pub fn parse(sql: &str) -> crate::error::Result<Statement> {
    Parser::new(sql)?.parse()
}
