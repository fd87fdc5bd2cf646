//! SQL Parser
//!
//! A recursive-descent parser over the token stream. It accepts exactly
//! four statement shapes:
//!
//! ```text
//! CREATE TABLE <name> (<col> <type>, ...) [PRIMARY KEY <col>]
//! INSERT INTO <name> VALUES (<v1>, <v2>, ...)
//! SELECT * FROM <name> [JOIN <name2> ON <name>.<col>=<name2>.<col>] [WHERE <col>=<literal>]
//! DELETE FROM <name> WHERE <col>=<literal>
//! ```
//!
//! Keywords are contextual: a word is only read as a keyword where the
//! grammar expects one, so names and bare-word values may reuse them.
//! Parsing is purely syntactic; table and column existence is checked at
//! execution time.

use super::ast::*;
use super::lexer::Lexer;
use super::token::{Keyword, Token};
use crate::catalog::DataType;
use crate::error::{Error, Result};

/// SQL Parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser from a SQL string
    pub fn new(sql: &str) -> Result<Self> {
        let mut lexer = Lexer::new(sql);
        let tokens = lexer.tokenize()?;

        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse exactly one statement, with an optional trailing semicolon
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = self.parse_statement()?;

        if self.check(&Token::Semicolon) {
            self.advance();
        }
        self.expect(&Token::Eof)?;

        Ok(stmt)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current().keyword() {
            Some(Keyword::Create) => self.parse_create_table().map(Statement::CreateTable),
            Some(Keyword::Insert) => self.parse_insert().map(Statement::Insert),
            Some(Keyword::Select) => self.parse_select().map(Statement::Select),
            Some(Keyword::Delete) => self.parse_delete().map(Statement::Delete),
            _ => Err(Error::UnexpectedToken {
                expected: "CREATE, INSERT, SELECT, or DELETE".to_string(),
                found: format!("{}", self.current()),
            }),
        }
    }

    // ========== CREATE TABLE Statement ==========

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;

        let table_name = self.expect_identifier()?;

        self.expect(&Token::LParen)?;
        let mut columns = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let data_type = self.parse_data_type()?;
            columns.push(ColumnDef { name, data_type });

            if !self.check(&Token::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&Token::RParen)?;

        let primary_key = if self.check_keyword(Keyword::Primary) {
            self.advance();
            self.expect_keyword(Keyword::Key)?;
            Some(self.expect_identifier()?)
        } else {
            None
        };

        Ok(CreateTableStatement {
            table_name,
            columns,
            primary_key,
        })
    }

    fn parse_data_type(&mut self) -> Result<DataType> {
        let name = self.expect_identifier()?;
        DataType::from_name(&name).ok_or(Error::UnknownType(name))
    }

    // ========== INSERT Statement ==========

    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let table_name = self.expect_identifier()?;

        self.expect_keyword(Keyword::Values)?;
        self.expect(&Token::LParen)?;
        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);

            if !self.check(&Token::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&Token::RParen)?;

        Ok(InsertStatement { table_name, values })
    }

    // ========== SELECT Statement ==========

    fn parse_select(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;
        self.expect(&Token::Asterisk)?;
        self.expect_keyword(Keyword::From)?;

        let table_name = self.expect_identifier()?;

        let join = if self.check_keyword(Keyword::Join) {
            Some(self.parse_join()?)
        } else {
            None
        };

        let filter = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_condition()?)
        } else {
            None
        };

        Ok(SelectStatement {
            table_name,
            join,
            filter,
        })
    }

    fn parse_join(&mut self) -> Result<JoinClause> {
        self.expect_keyword(Keyword::Join)?;
        let table_name = self.expect_identifier()?;
        self.expect_keyword(Keyword::On)?;

        let left = self.parse_column_ref()?;
        self.expect(&Token::Eq)?;
        let right = self.parse_column_ref()?;

        Ok(JoinClause {
            table_name,
            left,
            right,
        })
    }

    fn parse_column_ref(&mut self) -> Result<ColumnRef> {
        let table = self.expect_identifier()?;
        self.expect(&Token::Dot)?;
        let column = self.expect_identifier()?;
        Ok(ColumnRef { table, column })
    }

    // ========== DELETE Statement ==========

    fn parse_delete(&mut self) -> Result<DeleteStatement> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let table_name = self.expect_identifier()?;

        self.expect_keyword(Keyword::Where)?;
        let filter = self.parse_condition()?;

        Ok(DeleteStatement { table_name, filter })
    }

    // ========== Helper functions ==========

    fn parse_condition(&mut self) -> Result<Condition> {
        let column = self.expect_identifier()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_literal()?;
        Ok(Condition { column, value })
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let literal = match self.current() {
            Token::Number(n) => Literal::Number(n.clone()),
            Token::StringLiteral(s) => Literal::String(s.clone()),
            Token::Identifier(w) => Literal::Word(w.clone()),
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "literal".to_string(),
                    found: format!("{}", self.current()),
                })
            }
        };
        self.advance();
        Ok(literal)
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: format!("{}", token),
                found: format!("{}", self.current()),
            })
        }
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().keyword() == Some(keyword)
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: format!("{}", keyword),
                found: format!("{}", self.current()),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current().clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(Error::UnexpectedToken {
                expected: "identifier".to_string(),
                found: format!("{}", self.current()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Result<Statement> {
        Parser::new(sql)?.parse()
    }

    #[test]
    fn test_parse_create_table() {
        let stmt = parse("CREATE TABLE employees (id int, name str, dept str) PRIMARY KEY id").unwrap();

        match stmt {
            Statement::CreateTable(ct) => {
                assert_eq!(ct.table_name, "employees");
                assert_eq!(ct.columns.len(), 3);
                assert_eq!(ct.columns[0].data_type, DataType::Integer);
                assert_eq!(ct.columns[2].name, "dept");
                assert_eq!(ct.columns[2].data_type, DataType::Text);
                assert_eq!(ct.primary_key.as_deref(), Some("id"));
            }
            _ => panic!("Expected CREATE TABLE statement"),
        }
    }

    #[test]
    fn test_parse_create_table_without_key() {
        let stmt = parse("create table log (msg text);").unwrap();

        match stmt {
            Statement::CreateTable(ct) => {
                assert_eq!(ct.columns.len(), 1);
                assert!(ct.primary_key.is_none());
            }
            _ => panic!("Expected CREATE TABLE statement"),
        }
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse("INSERT INTO departments VALUES ('Engineering', \"Building A\", 3, HR)").unwrap();

        match stmt {
            Statement::Insert(i) => {
                assert_eq!(i.table_name, "departments");
                assert_eq!(
                    i.values,
                    vec![
                        Literal::String("Engineering".to_string()),
                        Literal::String("Building A".to_string()),
                        Literal::Number("3".to_string()),
                        Literal::Word("HR".to_string()),
                    ]
                );
            }
            _ => panic!("Expected INSERT statement"),
        }
    }

    #[test]
    fn test_parse_select_join_where() {
        let stmt = parse(
            "SELECT * FROM employees JOIN departments ON employees.dept=departments.name WHERE id=1",
        )
        .unwrap();

        match stmt {
            Statement::Select(s) => {
                assert_eq!(s.table_name, "employees");
                let join = s.join.unwrap();
                assert_eq!(join.table_name, "departments");
                assert_eq!(join.left.column, "dept");
                assert_eq!(join.right.table, "departments");
                assert_eq!(join.right.column, "name");
                let filter = s.filter.unwrap();
                assert_eq!(filter.column, "id");
                assert_eq!(filter.value, Literal::Number("1".to_string()));
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let stmt = parse("DELETE FROM users WHERE name='Bob'").unwrap();

        match stmt {
            Statement::Delete(d) => {
                assert_eq!(d.table_name, "users");
                assert_eq!(d.filter.column, "name");
                assert_eq!(d.filter.value.text(), "Bob");
            }
            _ => panic!("Expected DELETE statement"),
        }
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let stmt = parse("select * from Users where Name='x'").unwrap();
        assert_eq!(stmt.table_name(), "Users");
    }

    #[test]
    fn test_keywords_as_names_and_values() {
        let stmt = parse("CREATE TABLE kv (key text, value text) PRIMARY KEY key").unwrap();
        match stmt {
            Statement::CreateTable(ct) => {
                assert_eq!(ct.columns[0].name, "key");
                assert_eq!(ct.columns[1].name, "value");
                assert_eq!(ct.primary_key.as_deref(), Some("key"));
            }
            _ => panic!("Expected CREATE TABLE statement"),
        }

        let stmt = parse("INSERT INTO values VALUES (On, 'x')").unwrap();
        match stmt {
            Statement::Insert(i) => {
                assert_eq!(i.table_name, "values");
                assert_eq!(i.values[0], Literal::Word("On".to_string()));
            }
            _ => panic!("Expected INSERT statement"),
        }

        let stmt = parse("SELECT * FROM join JOIN on ON join.table=on.key WHERE where=from").unwrap();
        match stmt {
            Statement::Select(s) => {
                assert_eq!(s.table_name, "join");
                let join = s.join.unwrap();
                assert_eq!(join.table_name, "on");
                assert_eq!(join.left.column, "table");
                assert_eq!(join.right.column, "key");
                let filter = s.filter.unwrap();
                assert_eq!(filter.column, "where");
                assert_eq!(filter.value, Literal::Word("from".to_string()));
            }
            _ => panic!("Expected SELECT statement"),
        }

        let stmt = parse("delete from t where dept=on").unwrap();
        assert_eq!(stmt.kind(), "DELETE");
    }

    #[test]
    fn test_rejects_other_shapes() {
        for sql in [
            "",
            "UPDATE users SET a=1",
            "SELECT id FROM users",
            "DELETE FROM users",
            "CREATE TABLE t (id blob)",
            "CREATE TABLE t ()",
            "INSERT INTO t VALUES ()",
            "SELECT * FROM a JOIN b ON id=id",
            "SELECT * FROM users WHERE id=1 extra",
            "SELECT * FROM users;;",
        ] {
            assert!(parse(sql).is_err(), "expected rejection of {:?}", sql);
        }
    }
}
