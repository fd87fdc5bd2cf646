//! SQL Lexer (Tokenizer)
//!
//! This module converts statement strings into a stream of tokens.

use super::token::Token;
use crate::error::{Error, Result};

/// SQL Lexer
pub struct Lexer {
    /// Input characters
    input: Vec<char>,
    /// Current position in input
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let ch = self.current_char();

        // Single character tokens
        let token = match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '.' => Some(Token::Dot),
            '=' => Some(Token::Eq),
            '*' => Some(Token::Asterisk),
            _ => None,
        };

        if let Some(token) = token {
            self.advance();
            return Ok(token);
        }

        match ch {
            '\'' | '"' => self.read_string(ch),
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier()),
            c => Err(Error::UnexpectedCharacter(c, self.position)),
        }
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get the current character
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Peek at the next character
    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Read a string literal delimited by `quote`; a doubled quote escapes it
    fn read_string(&mut self, quote: char) -> Result<Token> {
        let start_pos = self.position;
        self.advance(); // skip opening quote

        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();

            if ch == quote {
                if self.peek_char() == Some(quote) {
                    value.push(quote);
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // skip closing quote
                    return Ok(Token::StringLiteral(value));
                }
            } else {
                value.push(ch);
                self.advance();
            }
        }

        Err(Error::UnterminatedString(start_pos))
    }

    /// Read a number: optional sign, digits, optional fraction
    fn read_number(&mut self) -> Result<Token> {
        let mut value = String::new();

        if self.current_char() == '-' {
            value.push('-');
            self.advance();
        }

        let mut seen_dot = false;
        while !self.is_at_end() {
            let ch = self.current_char();

            if ch.is_ascii_digit() {
                value.push(ch);
                self.advance();
            } else if ch == '.'
                && !seen_dot
                && self.peek_char().is_some_and(|c| c.is_ascii_digit())
            {
                seen_dot = true;
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Ok(Token::Number(value))
    }

    /// Read a bare word; keywords are recognized by the parser
    fn read_identifier(&mut self) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();

            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Identifier(value)
    }
}
