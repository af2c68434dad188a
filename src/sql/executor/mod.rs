use crate::{
    error::{Error, Result},
    sql::{
        executor::{
            mutation::{Delete, Insert, Update},
            query::Select,
            schema::{CreateTable, DropTable, Info, ListTables},
        },
        parser::ast::Statement,
        schema::{Column, Table},
        types::Record,
    },
    storage::engine::Engine,
};

pub mod mutation;
pub mod query;
pub mod schema;

/// Command executor
///
/// Each executor loads what it needs from storage, runs the record engine
/// operation in memory and persists only once that operation succeeded.
pub trait Executor<E: Engine> {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet>;
}

impl<E: Engine + 'static> dyn Executor<E> {
    /// Builds the executor for a parsed statement
    pub fn build(stmt: Statement) -> Result<Box<dyn Executor<E>>> {
        let executor: Box<dyn Executor<E>> = match stmt {
            Statement::Help => Box::new(Reply(ResultSet::Help)),
            Statement::Exit => Box::new(Reply(ResultSet::Exit)),
            Statement::CreateTable { name, columns } => CreateTable::new(name, columns),
            Statement::DropTable { name } => DropTable::new(name),
            Statement::ListTables => Box::new(ListTables),
            Statement::Insert { table_name, values } => Insert::new(table_name, values),
            Statement::Select { table_name, where_clause } => Select::new(table_name, where_clause),
            Statement::Update {
                table_name,
                set_clause,
                where_clause,
            } => Update::new(table_name, set_clause, where_clause),
            Statement::Delete { table_name, where_clause } => Delete::new(table_name, where_clause),
            Statement::Info { table_name } => Info::new(table_name),
            Statement::Unknown(command) => {
                return Err(Error::Syntax(format!(
                    "unknown command '{}', type help for the list of commands",
                    command
                )))
            }
        };
        Ok(executor)
    }
}

/// Commands answered without touching storage
struct Reply(ResultSet);

impl<E: Engine> Executor<E> for Reply {
    fn execute(self: Box<Self>, _eng: &mut E) -> Result<ResultSet> {
        Ok(self.0)
    }
}

/// Summary of a table for `info`
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<Column>,
    pub count: usize,
}

/// Execution result set
#[derive(Debug, PartialEq)]
pub enum ResultSet {
    CreateTable { table: Table },
    DropTable { table_name: String },
    ListTables { tables: Vec<String> },
    Insert { table_name: String, id: i64 },
    Scan { columns: Vec<String>, rows: Vec<Record> },
    Update { count: usize },
    Delete { count: usize },
    Info(TableInfo),
    Help,
    Exit,
}
