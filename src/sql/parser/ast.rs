use std::collections::BTreeMap;

/// Column to value predicate or assignment. The parser only ever produces a
/// single entry, the engine matches all entries.
pub type Clause<V> = BTreeMap<String, V>;

/// A parsed command line
#[derive(Debug, PartialEq)]
pub enum Statement {
    Help,
    Exit,
    /// create_table <name> <col:type> ...
    CreateTable {
        name: String,
        /// Raw `name:type` specs, validated by the engine
        columns: Vec<String>,
    },
    DropTable {
        name: String,
    },
    ListTables,
    /// insert into <name> values (...)
    Insert {
        table_name: String,
        /// Literal values without parentheses and commas
        values: Vec<String>,
    },
    /// select from <name> [where <col> = <v>]
    Select {
        table_name: String,
        where_clause: Option<Clause<String>>,
    },
    /// update <name> set <col> = <v> where <col> = <v>
    Update {
        table_name: String,
        set_clause: Clause<String>,
        where_clause: Clause<String>,
    },
    /// delete from <name> where <col> = <v>
    Delete {
        table_name: String,
        where_clause: Clause<String>,
    },
    Info {
        table_name: String,
    },
    /// Command word that matched nothing, kept for the error message
    Unknown(String),
}
