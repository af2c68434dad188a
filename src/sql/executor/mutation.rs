use crate::{
    error::{Error, Result},
    sql::{
        executor::{
            query::{matches, resolve_clause, resolve_set},
            Executor, ResultSet,
        },
        parser::ast::Clause,
        schema::{Catalog, Table, ID_COLUMN},
        types::{Record, Value},
    },
    storage::engine::Engine,
};

/// Checks the value count and converts each literal to its column type.
/// The synthetic ID column takes no value.
pub fn validate_values(catalog: &Catalog, table_name: &str, literals: &[String]) -> Result<Vec<Value>> {
    convert_values(catalog.must_get_table(table_name)?, literals)
}

fn convert_values(table: &Table, literals: &[String]) -> Result<Vec<Value>> {
    let columns = table.user_columns();
    if literals.len() != columns.len() {
        return Err(Error::Validation(format!(
            "wrong number of values, expected {}, got {}",
            columns.len(),
            literals.len()
        )));
    }

    columns
        .iter()
        .zip(literals)
        .map(|(col, literal)| Value::convert(literal, col.datatype).map_err(|e| e.in_column(&col.name)))
        .collect()
}

/// Next identifier: one past the largest in use, 1 for an empty table
pub fn next_id(records: &[Record]) -> i64 {
    records
        .iter()
        .filter_map(|r| match r.get(ID_COLUMN) {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        })
        .max()
        .map_or(1, |max| max + 1)
}

/// Appends a new record built from the literals, returning the whole collection
pub fn insert(
    catalog: &Catalog,
    table_name: &str,
    literals: &[String],
    mut records: Vec<Record>,
) -> Result<Vec<Record>> {
    let table = catalog.must_get_table(table_name)?;
    let values = convert_values(table, literals)?;

    let mut record = Record::new();
    record.insert(ID_COLUMN.to_string(), Value::Integer(next_id(&records)));
    for (col, value) in table.user_columns().iter().zip(values) {
        record.insert(col.name.clone(), value);
    }
    records.push(record);
    Ok(records)
}

/// Assigns the set clause on every matching record
pub fn update(
    mut records: Vec<Record>,
    set_clause: &Clause<Value>,
    where_clause: &Clause<Value>,
) -> (Vec<Record>, usize) {
    let mut count = 0;
    for record in records.iter_mut().filter(|r| matches(r, where_clause)) {
        for (col, value) in set_clause {
            record.insert(col.clone(), value.clone());
        }
        count += 1;
    }
    (records, count)
}

/// Removes matching records, survivors keep their order
pub fn delete(records: Vec<Record>, where_clause: &Clause<Value>) -> (Vec<Record>, usize) {
    let (deleted, kept): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| matches(r, where_clause));
    (kept, deleted.len())
}

/// INSERT executor
pub struct Insert {
    table_name: String,
    values: Vec<String>,
}

impl Insert {
    pub fn new(table_name: String, values: Vec<String>) -> Box<Self> {
        Box::new(Self { table_name, values })
    }
}

impl<E: Engine> Executor<E> for Insert {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        let records = insert(&catalog, &self.table_name, &self.values, eng.load_table(&self.table_name))?;
        let id = match records.last().and_then(|r| r.get(ID_COLUMN)) {
            Some(Value::Integer(id)) => *id,
            _ => return Err(Error::Validation("inserted record has no ID".into())),
        };
        eng.save_table(&self.table_name, &records)?;
        Ok(ResultSet::Insert { table_name: self.table_name, id })
    }
}

/// UPDATE executor
pub struct Update {
    table_name: String,
    columns: Clause<String>,
    filter: Clause<String>,
}

impl Update {
    pub fn new(table_name: String, columns: Clause<String>, filter: Clause<String>) -> Box<Self> {
        Box::new(Self { table_name, columns, filter })
    }
}

impl<E: Engine> Executor<E> for Update {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        let table = catalog.must_get_table(&self.table_name)?;
        let set_clause = resolve_set(table, &self.columns)?;
        let where_clause = resolve_clause(table, &self.filter)?;

        let (records, count) = update(eng.load_table(&self.table_name), &set_clause, &where_clause);
        if count > 0 {
            eng.save_table(&self.table_name, &records)?;
        }
        Ok(ResultSet::Update { count })
    }
}

/// DELETE executor
pub struct Delete {
    table_name: String,
    filter: Clause<String>,
}

impl Delete {
    pub fn new(table_name: String, filter: Clause<String>) -> Box<Self> {
        Box::new(Self { table_name, filter })
    }
}

impl<E: Engine> Executor<E> for Delete {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        let table = catalog.must_get_table(&self.table_name)?;
        let where_clause = resolve_clause(table, &self.filter)?;

        let (records, count) = delete(eng.load_table(&self.table_name), &where_clause);
        if count > 0 {
            eng.save_table(&self.table_name, &records)?;
        }
        Ok(ResultSet::Delete { count })
    }
}
