use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::{Error, Result}, sql::types::DataType};

/// Name of the synthetic identifier column every table starts with
pub const ID_COLUMN: &str = "ID";

/// Table names become file names, so they may not leave the data directory
fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Schema("table name cannot be empty".to_string()));
    }
    if name.contains(['/', '\\', '\0']) || name.contains("..") {
        return Err(Error::Schema(format!("invalid table name {:?}", name)));
    }
    Ok(())
}

/// Table schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from `name:type` specs, prepending the `ID:int` column
    pub fn from_specs(name: &str, specs: &[String]) -> Result<Table> {
        validate_table_name(name)?;
        let mut columns = vec![Column::new(ID_COLUMN, DataType::Integer)];
        for spec in specs {
            columns.push(Column::from_spec(spec)?);
        }
        let table = Table { name: name.to_string(), columns };
        table.validate()?;
        Ok(table)
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        if self.columns.len() < 2 {
            return Err(Error::Schema(format!(
                "table {} needs at least one column",
                self.name
            )));
        }

        for (i, col) in self.columns.iter().enumerate().skip(1) {
            if col.name == ID_COLUMN {
                return Err(Error::Schema(format!(
                    "column {} is reserved",
                    ID_COLUMN
                )));
            }
            if self.columns[..i].iter().any(|c| c.name == col.name) {
                return Err(Error::Schema(format!(
                    "duplicate column {} in table {}",
                    col.name, self.name
                )));
            }
        }

        Ok(())
    }

    /// Columns the user supplies values for, in schema order
    pub fn user_columns(&self) -> &[Column] {
        &self.columns[1..]
    }

    /// Returns the column with the given name
    pub fn get_column(&self, col_name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == col_name)
            .ok_or(Error::Schema(format!(
                "column {} does not exist in table {}",
                col_name, self.name
            )))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    pub fn new(name: &str, datatype: DataType) -> Self {
        Self { name: name.to_string(), datatype }
    }

    /// Parses a `name:type` spec; only the first `:` separates
    pub fn from_spec(spec: &str) -> Result<Column> {
        let (name, datatype) = spec.split_once(':').ok_or(Error::Schema(format!(
            "invalid column spec {}, expected name:type",
            spec
        )))?;
        if name.is_empty() {
            return Err(Error::Schema(format!("invalid column spec {}, empty name", spec)));
        }
        let datatype = DataType::from_name(datatype).ok_or(Error::Schema(format!(
            "invalid column spec {}, type must be int, str or bool",
            spec
        )))?;
        Ok(Column::new(name, datatype))
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.datatype)
    }
}

/// Table name to schema, in creation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    tables: IndexMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Returns the table, or a schema error if it does not exist
    pub fn must_get_table(&self, name: &str) -> Result<&Table> {
        self.get_table(name)
            .ok_or(Error::Schema(format!("table {} does not exist", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Removes a table, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.shift_remove(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
