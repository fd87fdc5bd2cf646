//! SQL Token definitions
//!
//! This module defines all tokens that can appear in LiteDB statements.

use std::fmt;

/// Grammar keywords
///
/// Keywords are not reserved: the lexer emits every bare word as
/// [`Token::Identifier`], and the parser treats a word as a keyword only
/// where the grammar expects one. `key`, `on` or `values` remain valid
/// table names, column names and bare-word literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Create,
    Table,
    Primary,
    Key,
    Insert,
    Into,
    Values,
    Select,
    From,
    Join,
    On,
    Where,
    Delete,
}

impl Keyword {
    /// Try to parse a keyword from a word (case-insensitive)
    pub fn from_word(s: &str) -> Option<Keyword> {
        match s.to_uppercase().as_str() {
            "CREATE" => Some(Keyword::Create),
            "TABLE" => Some(Keyword::Table),
            "PRIMARY" => Some(Keyword::Primary),
            "KEY" => Some(Keyword::Key),
            "INSERT" => Some(Keyword::Insert),
            "INTO" => Some(Keyword::Into),
            "VALUES" => Some(Keyword::Values),
            "SELECT" => Some(Keyword::Select),
            "FROM" => Some(Keyword::From),
            "JOIN" => Some(Keyword::Join),
            "ON" => Some(Keyword::On),
            "WHERE" => Some(Keyword::Where),
            "DELETE" => Some(Keyword::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Join => "JOIN",
            Keyword::On => "ON",
            Keyword::Where => "WHERE",
            Keyword::Delete => "DELETE",
        };
        write!(f, "{}", word)
    }
}

/// SQL Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // ========== Literals ==========
    /// Numeric literal, kept as written (e.g. `42`, `-5`, `3.14`)
    Number(String),
    /// String literal (single- or double-quoted), quotes stripped
    StringLiteral(String),
    /// Bare word as written: identifier, keyword, type name or literal
    Identifier(String),

    // ========== Operators ==========
    /// =
    Eq,
    /// *
    Asterisk,

    // ========== Delimiters ==========
    /// (
    LParen,
    /// )
    RParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // ========== Special ==========
    /// End of input
    Eof,
}

impl Token {
    /// The keyword this token spells, if it is a word naming one
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Identifier(word) => Keyword::from_word(word),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::StringLiteral(s) => write!(f, "'{}'", s),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Eq => write!(f, "="),
            Token::Asterisk => write!(f, "*"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Dot => write!(f, "."),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_parsing() {
        assert_eq!(Keyword::from_word("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("unknown"), None);
    }

    #[test]
    fn test_words_spell_keywords() {
        assert_eq!(Token::Identifier("on".to_string()).keyword(), Some(Keyword::On));
        assert_eq!(Token::Identifier("users".to_string()).keyword(), None);
        assert_eq!(Token::StringLiteral("KEY".to_string()).keyword(), None);
        assert_eq!(Keyword::Primary.to_string(), "PRIMARY");
    }
}
