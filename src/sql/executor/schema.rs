use crate::{
    error::{Error, Result},
    sql::{
        executor::{Executor, ResultSet, TableInfo},
        schema::{Catalog, Table},
        types::Record,
    },
    storage::engine::Engine,
};

/// Adds a table built from `name:type` specs; the catalog is untouched on error
pub fn create_table(catalog: &mut Catalog, name: &str, specs: &[String]) -> Result<Table> {
    if catalog.contains(name) {
        return Err(Error::Schema(format!("table {} already exists", name)));
    }
    let table = Table::from_specs(name, specs)?;
    catalog.insert(table.clone());
    Ok(table)
}

/// Removes a table; the caller discards its records
pub fn drop_table(catalog: &mut Catalog, name: &str) -> Result<Table> {
    catalog
        .remove(name)
        .ok_or(Error::Schema(format!("table {} does not exist", name)))
}

pub fn list_tables(catalog: &Catalog) -> Vec<String> {
    catalog.table_names().map(String::from).collect()
}

pub fn info(catalog: &Catalog, name: &str, records: &[Record]) -> Result<TableInfo> {
    let table = catalog.must_get_table(name)?;
    Ok(TableInfo {
        name: table.name.clone(),
        columns: table.columns.clone(),
        count: records.len(),
    })
}

/// CREATE TABLE executor
pub struct CreateTable {
    name: String,
    columns: Vec<String>,
}

impl CreateTable {
    pub fn new(name: String, columns: Vec<String>) -> Box<Self> {
        Box::new(Self { name, columns })
    }
}

impl<E: Engine> Executor<E> for CreateTable {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let mut catalog = eng.load_catalog();
        let table = create_table(&mut catalog, &self.name, &self.columns)?;
        eng.save_catalog(&catalog)?;
        Ok(ResultSet::CreateTable { table })
    }
}

/// DROP TABLE executor
pub struct DropTable {
    name: String,
}

impl DropTable {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl<E: Engine> Executor<E> for DropTable {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let mut catalog = eng.load_catalog();
        let table = drop_table(&mut catalog, &self.name)?;
        eng.save_catalog(&catalog)?;
        eng.delete_table(&table.name)?;
        Ok(ResultSet::DropTable { table_name: table.name })
    }
}

/// LIST TABLES executor
pub struct ListTables;

impl<E: Engine> Executor<E> for ListTables {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        Ok(ResultSet::ListTables { tables: list_tables(&catalog) })
    }
}

/// INFO executor
pub struct Info {
    table_name: String,
}

impl Info {
    pub fn new(table_name: String) -> Box<Self> {
        Box::new(Self { table_name })
    }
}

impl<E: Engine> Executor<E> for Info {
    fn execute(self: Box<Self>, eng: &mut E) -> Result<ResultSet> {
        let catalog = eng.load_catalog();
        catalog.must_get_table(&self.table_name)?;
        let records = eng.load_table(&self.table_name);
        Ok(ResultSet::Info(info(&catalog, &self.table_name, &records)?))
    }
}
