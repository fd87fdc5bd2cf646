//! SQL Abstract Syntax Tree (AST)
//!
//! This module defines the AST nodes for the four statement shapes LiteDB
//! understands.

use crate::catalog::DataType;
use crate::storage::Value;

/// A SQL statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE statement
    CreateTable(CreateTableStatement),
    /// INSERT statement
    Insert(InsertStatement),
    /// SELECT statement
    Select(SelectStatement),
    /// DELETE statement
    Delete(DeleteStatement),
}

impl Statement {
    /// Short statement kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::Insert(_) => "INSERT",
            Statement::Select(_) => "SELECT",
            Statement::Delete(_) => "DELETE",
        }
    }

    /// Name of the table the statement targets
    pub fn table_name(&self) -> &str {
        match self {
            Statement::CreateTable(s) => &s.table_name,
            Statement::Insert(s) => &s.table_name,
            Statement::Select(s) => &s.table_name,
            Statement::Delete(s) => &s.table_name,
        }
    }
}

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub table_name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Option<String>,
}

/// Column definition
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table_name: String,
    /// Values bound positionally to the table's columns
    pub values: Vec<Literal>,
}

/// SELECT * statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table_name: String,
    pub join: Option<JoinClause>,
    pub filter: Option<Condition>,
}

/// `JOIN <table> ON <left>=<right>`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Table to join
    pub table_name: String,
    /// Column of the base table
    pub left: ColumnRef,
    /// Column of the joined table
    pub right: ColumnRef,
}

/// Qualified column reference (`table.column`)
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

/// Equality condition `<column>=<literal>`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub value: Literal,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table_name: String,
    pub filter: Condition,
}

/// Literal value as written in a statement
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unquoted number (`42`, `-5`, `3.14`)
    Number(String),
    /// Quoted string, quotes stripped
    String(String),
    /// Unquoted bare word
    Word(String),
}

impl Literal {
    /// Literal text with quotes stripped
    pub fn text(&self) -> &str {
        match self {
            Literal::Number(s) | Literal::String(s) | Literal::Word(s) => s,
        }
    }

    /// Coerce to a stored value
    pub fn to_value(&self) -> Value {
        Value::from_literal(self.text())
    }
}
