use crate::{
    error::Result,
    sql::{executor::{Executor, ResultSet}, parser::Parser},
    storage::engine::Engine,
};

/// Command session over a storage engine
///
/// Nothing is cached between commands: every command reloads the catalog and
/// the table it touches, so the storage engine is the only state.
pub struct Session<E: Engine> {
    engine: E,
}

impl<E: Engine + 'static> Session<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Executes one command line, None for a blank line
    pub fn execute(&mut self, line: &str) -> Result<Option<ResultSet>> {
        let Some(stmt) = Parser::new(line)?.parse()? else {
            return Ok(None);
        };
        tracing::debug!(?stmt, "executing command");
        let result = <dyn Executor<E>>::build(stmt)?.execute(&mut self.engine);
        if let Err(err) = &result {
            tracing::debug!(%err, "command failed, nothing persisted");
        }
        result.map(Some)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::{
        error::{Error, Result},
        sql::{executor::ResultSet, types::Value},
        storage::{engine::Engine, file::FileEngine, memory::MemoryEngine, Key},
    };

    fn rows<E: Engine + 'static>(s: &mut Session<E>, line: &str) -> Result<Vec<Vec<Value>>> {
        match s.execute(line)? {
            Some(ResultSet::Scan { rows, .. }) => {
                Ok(rows.into_iter().map(|r| r.into_values().collect()).collect())
            }
            other => panic!("expected scan, got {:?}", other),
        }
    }

    fn ann(id: i64, age: i64) -> Vec<Value> {
        vec![Value::Integer(id), Value::String("Ann".into()), Value::Integer(age)]
    }

    #[test]
    fn test_blank_and_control() -> Result<()> {
        let mut s = Session::new(MemoryEngine::new());
        assert_eq!(s.execute("   ")?, None);
        assert_eq!(s.execute("Help")?, Some(ResultSet::Help));
        assert_eq!(s.execute("EXIT")?, Some(ResultSet::Exit));
        assert!(matches!(s.execute("frobnicate"), Err(Error::Syntax(_))));
        assert!(matches!(s.execute("select from 'users"), Err(Error::Syntax(_))));
        assert!(s.engine().is_empty());
        Ok(())
    }

    #[test]
    fn test_create_table() -> Result<()> {
        let mut s = Session::new(MemoryEngine::new());
        s.execute("create_table t1 a:int b:str c:bool")?;
        s.execute("insert into t1 values (1, 'a', true)")?;
        s.execute("insert into t1 values 2 b no")?;

        match s.execute("select from t1")? {
            Some(ResultSet::Scan { columns, rows }) => {
                assert_eq!(columns, vec!["ID", "a", "b", "c"]);
                assert_eq!(rows.len(), 2);
            }
            other => panic!("unexpected result {:?}", other),
        }

        let before = s.engine().len();
        assert!(matches!(s.execute("create_table t1 x:int"), Err(Error::Schema(_))));
        assert!(matches!(s.execute("create_table t2 x:float"), Err(Error::Schema(_))));
        assert_eq!(s.execute("list_tables")?, Some(ResultSet::ListTables { tables: vec!["t1".into()] }));
        assert_eq!(s.engine().len(), before);
        Ok(())
    }

    fn lifecycle<E: Engine + 'static>(s: &mut Session<E>) -> Result<()> {
        s.execute("create_table users name:str age:int")?;
        assert_eq!(
            s.execute("insert into users values (\"Ann\", 30)")?,
            Some(ResultSet::Insert { table_name: "users".into(), id: 1 })
        );
        assert_eq!(rows(s, "select from users")?, vec![ann(1, 30)]);

        assert_eq!(
            s.execute("update users set age = 31 where name = \"Ann\"")?,
            Some(ResultSet::Update { count: 1 })
        );
        assert_eq!(rows(s, "select from users where age = 31")?, vec![ann(1, 31)]);

        assert_eq!(
            s.execute("delete from users where name = \"Ann\"")?,
            Some(ResultSet::Delete { count: 1 })
        );
        assert!(rows(s, "select from users")?.is_empty());
        assert_eq!(
            s.execute("insert into users values Ann 30")?,
            Some(ResultSet::Insert { table_name: "users".into(), id: 1 })
        );
        Ok(())
    }

    #[test]
    fn test_lifecycle_memory() -> Result<()> {
        lifecycle(&mut Session::new(MemoryEngine::new()))
    }

    #[test]
    fn test_lifecycle_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let engine = FileEngine::new(dir.path().join("data"), "db_meta.bin");
        lifecycle(&mut Session::new(engine))?;

        // a fresh session sees everything the previous one persisted
        let mut s = Session::new(FileEngine::new(dir.path().join("data"), "db_meta.bin"));
        assert_eq!(rows(&mut s, "select from users")?, vec![ann(1, 30)]);

        s.execute("drop_table users")?;
        assert!(!dir.path().join("data").join("users.tbl").exists());
        assert_eq!(s.execute("list_tables")?, Some(ResultSet::ListTables { tables: vec![] }));
        assert!(matches!(s.execute("select from users"), Err(Error::Schema(_))));
        Ok(())
    }

    #[test]
    fn test_table_names_stay_in_data_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut s = Session::new(FileEngine::new(dir.path().join("data"), "db_meta.bin"));

        for line in [
            "create_table a/b x:int",
            "create_table ../escape x:int",
            "create_table 'a\\b' x:int",
            "create_table \"\" x:int",
        ] {
            assert!(matches!(s.execute(line), Err(Error::Schema(_))), "{} accepted", line);
        }
        assert!(matches!(s.execute("insert into ../escape values 1"), Err(Error::Schema(_))));

        assert_eq!(s.execute("list_tables")?, Some(ResultSet::ListTables { tables: vec![] }));
        assert!(!dir.path().join("escape.tbl").exists());
        assert!(!dir.path().join("data").exists());
        Ok(())
    }

    #[test]
    fn test_failed_commands_persist_nothing() -> Result<()> {
        let mut s = Session::new(MemoryEngine::new());
        s.execute("create_table users name:str age:int")?;
        s.execute("insert into users values Ann 30")?;
        let table = s.engine_mut().read(&Key::Table("users".into()))?;

        assert!(matches!(s.execute("insert into users values Bob old"), Err(Error::Validation(_))));
        assert!(matches!(s.execute("insert into users values Bob"), Err(Error::Validation(_))));
        assert!(matches!(s.execute("update users set ID = 5 where name = Ann"), Err(Error::Schema(_))));
        assert!(matches!(s.execute("update users set age = x where name = Ann"), Err(Error::Validation(_))));
        assert!(matches!(s.execute("delete from users where height = 1"), Err(Error::Schema(_))));
        assert_eq!(s.execute("delete from users where name = Bob")?, Some(ResultSet::Delete { count: 0 }));

        assert_eq!(s.engine_mut().read(&Key::Table("users".into()))?, table);
        Ok(())
    }

    #[test]
    fn test_ids_and_coercion() -> Result<()> {
        let mut s = Session::new(MemoryEngine::new());
        s.execute("create_table flags label:str on:bool")?;
        for (i, flag) in ["yes", "no", "1", "да", "false"].iter().enumerate() {
            let result = s.execute(&format!("insert into flags values f{} {}", i, flag))?;
            assert_eq!(result, Some(ResultSet::Insert { table_name: "flags".into(), id: i as i64 + 1 }));
        }

        assert_eq!(rows(&mut s, "select from flags where on = true")?.len(), 3);
        assert_eq!(rows(&mut s, "select from flags where ID = \"1\"")?.len(), 1);
        assert_eq!(
            s.execute("update flags set on = нет where on = TRUE")?,
            Some(ResultSet::Update { count: 3 })
        );
        assert!(rows(&mut s, "select from flags where on = yes")?.is_empty());

        match s.execute("info flags")? {
            Some(ResultSet::Info(info)) => {
                assert_eq!(info.count, 5);
                assert_eq!(info.columns.len(), 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_corrupt_table_loads_empty() -> Result<()> {
        let mut s = Session::new(MemoryEngine::new());
        s.execute("create_table users name:str")?;
        s.execute("insert into users values Ann")?;
        s.engine_mut().write(&Key::Table("users".into()), vec![0xff; 3])?;

        assert!(rows(&mut s, "select from users")?.is_empty());
        assert_eq!(
            s.execute("insert into users values Bob")?,
            Some(ResultSet::Insert { table_name: "users".into(), id: 1 })
        );
        Ok(())
    }
}
