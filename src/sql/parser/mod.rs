use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{Clause, Statement};
use crate::sql::parser::lexer::tokenize;

pub mod ast;
mod lexer;

pub const CREATE_TABLE_USAGE: &str = "create_table <table> <column:type> [<column:type> ...]";
pub const DROP_TABLE_USAGE: &str = "drop_table <table>";
pub const INSERT_USAGE: &str = "insert into <table> values (<value1>, <value2>, ...)";
pub const SELECT_USAGE: &str = "select from <table> [where <column> = <value>]";
pub const UPDATE_USAGE: &str = "update <table> set <column> = <value> where <column> = <value>";
pub const DELETE_USAGE: &str = "delete from <table> where <column> = <value>";
pub const INFO_USAGE: &str = "info <table>";

/// Command parser - turns one input line into a Statement
pub struct Parser {
    tokens: Vec<String>,
}

impl Parser {
    /// Tokenizes the line; quoting errors surface here
    pub fn new(line: &str) -> Result<Self> {
        Ok(Parser { tokens: tokenize(line)? })
    }

    /// Parses the line, None for a blank line
    pub fn parse(&self) -> Result<Option<Statement>> {
        let Some(command) = self.tokens.first() else {
            return Ok(None);
        };
        let tokens = &self.tokens[..];

        Ok(Some(match command.to_lowercase().as_str() {
            "help" => Statement::Help,
            "exit" => Statement::Exit,
            "list_tables" => Statement::ListTables,
            "create_table" => {
                if tokens.len() < 3 {
                    return Err(usage(CREATE_TABLE_USAGE));
                }
                Statement::CreateTable {
                    name: tokens[1].clone(),
                    columns: tokens[2..].to_vec(),
                }
            }
            "drop_table" => {
                if tokens.len() != 2 {
                    return Err(usage(DROP_TABLE_USAGE));
                }
                Statement::DropTable { name: tokens[1].clone() }
            }
            "insert" => self.parse_insert()?,
            "select" => self.parse_select()?,
            "update" => self.parse_update()?,
            "delete" => self.parse_delete()?,
            "info" => {
                if tokens.len() != 2 {
                    return Err(usage(INFO_USAGE));
                }
                Statement::Info { table_name: tokens[1].clone() }
            }
            _ => Statement::Unknown(command.clone()),
        }))
    }

    fn parse_insert(&self) -> Result<Statement> {
        let tokens = &self.tokens;
        if tokens.len() < 5 || !is_keyword(&tokens[1], "into") {
            return Err(usage(INSERT_USAGE));
        }
        if !is_keyword(&tokens[3], "values") {
            return Err(Error::Syntax(format!("expected 'values', got '{}'", tokens[3])));
        }
        Ok(Statement::Insert {
            table_name: tokens[2].clone(),
            values: extract_values(&tokens[4..]),
        })
    }

    fn parse_select(&self) -> Result<Statement> {
        let tokens = &self.tokens;
        if tokens.len() < 3 || !is_keyword(&tokens[1], "from") {
            return Err(usage(SELECT_USAGE));
        }
        let where_clause = if tokens.len() > 3 {
            let (clause, rest) = parse_where(&tokens[3..])?;
            expect_end(rest)?;
            Some(clause)
        } else {
            None
        };
        Ok(Statement::Select { table_name: tokens[2].clone(), where_clause })
    }

    fn parse_update(&self) -> Result<Statement> {
        let tokens = &self.tokens;
        if tokens.len() < 3 {
            return Err(usage(UPDATE_USAGE));
        }
        let (set_clause, rest) = parse_set(&tokens[2..])?;
        let (where_clause, rest) = parse_where(rest)?;
        expect_end(rest)?;
        Ok(Statement::Update {
            table_name: tokens[1].clone(),
            set_clause,
            where_clause,
        })
    }

    fn parse_delete(&self) -> Result<Statement> {
        let tokens = &self.tokens;
        if tokens.len() < 5 || !is_keyword(&tokens[1], "from") {
            return Err(usage(DELETE_USAGE));
        }
        let (where_clause, rest) = parse_where(&tokens[3..])?;
        expect_end(rest)?;
        Ok(Statement::Delete { table_name: tokens[2].clone(), where_clause })
    }
}

/// Parses `where <column> = <value>` from the front of the tokens
pub fn parse_where(tokens: &[String]) -> Result<(Clause<String>, &[String])> {
    parse_clause("where", tokens)
}

/// Parses `set <column> = <value>` from the front of the tokens
pub fn parse_set(tokens: &[String]) -> Result<(Clause<String>, &[String])> {
    parse_clause("set", tokens)
}

fn parse_clause<'a>(keyword: &str, tokens: &'a [String]) -> Result<(Clause<String>, &'a [String])> {
    if tokens.len() < 4 || !is_keyword(&tokens[0], keyword) {
        return Err(Error::Syntax(format!(
            "expected '{} <column> = <value>'",
            keyword
        )));
    }
    if tokens[2] != "=" {
        return Err(Error::Syntax(format!("expected '=', got '{}'", tokens[2])));
    }
    let clause = BTreeMap::from([(tokens[1].clone(), tokens[3].clone())]);
    Ok((clause, &tokens[4..]))
}

/// Drops the `(`, `)` and `,` tokens around a value list
pub fn extract_values(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !matches!(t.as_str(), "(" | ")" | ","))
        .cloned()
        .collect()
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

fn expect_end(rest: &[String]) -> Result<()> {
    match rest.first() {
        Some(token) => Err(Error::Syntax(format!("unexpected token '{}'", token))),
        None => Ok(()),
    }
}

fn usage(usage: &str) -> Error {
    Error::Syntax(format!("usage: {}", usage))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{extract_values, parse_set, parse_where, Parser};
    use crate::{
        error::{Error, Result},
        sql::parser::ast::{Clause, Statement},
    };

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn parse(line: &str) -> Result<Option<Statement>> {
        Parser::new(line)?.parse()
    }

    fn clause(col: &str, val: &str) -> Clause<String> {
        BTreeMap::from([(col.to_string(), val.to_string())])
    }

    #[test]
    fn test_parse_where() -> Result<()> {
        let input = tokens(&["WHERE", "age", "=", "30", "tail"]);
        let (where_clause, rest) = parse_where(&input)?;
        assert_eq!(where_clause, clause("age", "30"));
        assert_eq!(rest, &tokens(&["tail"])[..]);

        assert!(matches!(parse_where(&tokens(&["where", "age", "="])), Err(Error::Syntax(_))));
        assert!(matches!(parse_where(&tokens(&["where", "age", "==", "1"])), Err(Error::Syntax(_))));
        assert!(matches!(parse_where(&tokens(&["set", "age", "=", "1"])), Err(Error::Syntax(_))));
        assert!(parse_where(&[]).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_set() -> Result<()> {
        let input = tokens(&["set", "age", "=", "31", "where", "name", "=", "Ann"]);
        let (set_clause, rest) = parse_set(&input)?;
        assert_eq!(set_clause, clause("age", "31"));
        assert_eq!(rest.len(), 4);
        assert!(parse_set(&tokens(&["where", "age", "=", "31"])).is_err());
        Ok(())
    }

    #[test]
    fn test_extract_values() {
        assert_eq!(
            extract_values(&tokens(&["(", "Ann", ",", "30", ")"])),
            tokens(&["Ann", "30"])
        );
        assert_eq!(extract_values(&tokens(&["Ann", "30"])), tokens(&["Ann", "30"]));
        assert!(extract_values(&tokens(&["(", ")"])).is_empty());
    }

    #[test]
    fn test_parser_commands() -> Result<()> {
        assert_eq!(parse("   ")?, None);
        assert_eq!(parse("HELP")?, Some(Statement::Help));
        assert_eq!(parse("exit")?, Some(Statement::Exit));
        assert_eq!(parse("list_tables")?, Some(Statement::ListTables));
        assert_eq!(parse("frobnicate x")?, Some(Statement::Unknown("frobnicate".into())));

        assert_eq!(
            parse("create_table users name:str age:int")?,
            Some(Statement::CreateTable {
                name: "users".into(),
                columns: tokens(&["name:str", "age:int"]),
            })
        );
        assert_eq!(parse("drop_table users")?, Some(Statement::DropTable { name: "users".into() }));
        assert_eq!(parse("info users")?, Some(Statement::Info { table_name: "users".into() }));
        Ok(())
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let expected = Some(Statement::Insert {
            table_name: "users".into(),
            values: tokens(&["Ann", "30"]),
        });
        assert_eq!(parse("insert into users values (\"Ann\", 30)")?, expected);
        assert_eq!(parse("INSERT INTO users VALUES Ann 30")?, expected);

        assert!(matches!(parse("insert users values (1)"), Err(Error::Syntax(_))));
        assert!(matches!(parse("insert into users (1)"), Err(Error::Syntax(_))));
        assert!(matches!(parse("insert into users values"), Err(Error::Syntax(_))));
        Ok(())
    }

    #[test]
    fn test_parser_select() -> Result<()> {
        assert_eq!(
            parse("select from users")?,
            Some(Statement::Select { table_name: "users".into(), where_clause: None })
        );
        assert_eq!(
            parse("select from users where age = 30")?,
            Some(Statement::Select {
                table_name: "users".into(),
                where_clause: Some(clause("age", "30")),
            })
        );
        assert!(parse("select users").is_err());
        assert!(parse("select from users limit 3").is_err());
        assert!(parse("select from users where age = 30 and name = Ann").is_err());
        Ok(())
    }

    #[test]
    fn test_parser_update_delete() -> Result<()> {
        assert_eq!(
            parse("update users set age = 31 where name = \"Ann\"")?,
            Some(Statement::Update {
                table_name: "users".into(),
                set_clause: clause("age", "31"),
                where_clause: clause("name", "Ann"),
            })
        );
        assert!(parse("update users set age = 31").is_err());
        assert!(parse("update users age = 31 where name = Ann").is_err());

        assert_eq!(
            parse("delete from users where name = Ann")?,
            Some(Statement::Delete {
                table_name: "users".into(),
                where_clause: clause("name", "Ann"),
            })
        );
        assert!(parse("delete from users").is_err());
        assert!(parse("delete from users name = Ann").is_err());
        Ok(())
    }
}
