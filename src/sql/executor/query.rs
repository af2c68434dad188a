use crate::{
    error::{Error, Result},
    sql::{
        executor::{Executor, ResultSet},
        parser::ast::Clause,
        schema::{Table, ID_COLUMN},
        types::{Record, Value},
    },
    storage::engine::Engine,
};

/// Coerces each clause literal to the declared type of its column
pub fn resolve_clause(table: &Table, clause: &Clause<String>) -> Result<Clause<Value>> {
    clause
        .iter()
        .map(|(col, literal)| -> Result<(String, Value)> {
            let column = table.get_column(col)?;
            let value = Value::convert(literal, column.datatype).map_err(|e| e.in_column(col))?;
            Ok((col.clone(), value))
        })
        .collect()
}

/// Like `resolve_clause`, but the synthetic ID column cannot be assigned
pub fn resolve_set(table: &Table, clause: &Clause<String>) -> Result<Clause<Value>> {
    if clause.contains_key(ID_COLUMN) {
        return Err(Error::Schema(format!("column {} cannot be updated", ID_COLUMN)));
    }
    resolve_clause(table, clause)
}

/// True when every clause entry equals the record's stored value
pub fn matches(record: &Record, clause: &Clause<Value>) -> bool {
    clause.iter().all(|(col, value)| record.get(col) == Some(value))
}

/// Returns the records matching the clause, all of them without one
pub fn select(records: Vec<Record>, where_clause: Option<&Clause<Value>>) -> Vec<Record> {
    match where_clause {
        None => records,
        Some(clause) => records.into_iter().filter(|r| matches(r, clause)).collect(),
    }
}

/// SELECT executor
pub struct Select {
    table_name: String,
    filter: Option<Clause<String>>,
}

impl Select {
    pub fn new(table_name: String, filter: Option<Clause<String>>) -> Box<Self> {
        Box::new(Self { table_name, filter })
    }
}

impl<E: Engine> Executor<E> for Select {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        let table = catalog.must_get_table(&self.table_name)?;
        let filter = self
            .filter
            .as_ref()
            .map(|clause| resolve_clause(table, clause))
            .transpose()?;

        let rows = select(eng.load_table(&self.table_name), filter.as_ref());
        Ok(ResultSet::Scan {
            columns: table.column_names(),
            rows,
        })
    }
}
