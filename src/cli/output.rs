//! Text rendering of command results

use crate::sql::{
    executor::{ResultSet, TableInfo},
    parser::{
        CREATE_TABLE_USAGE, DELETE_USAGE, DROP_TABLE_USAGE, INFO_USAGE, INSERT_USAGE,
        SELECT_USAGE, UPDATE_USAGE,
    },
};

use super::table::TableFormatter;

pub fn help_text() -> String {
    let commands = [
        (CREATE_TABLE_USAGE, "create a table"),
        (DROP_TABLE_USAGE, "drop a table and its records"),
        ("list_tables", "list all tables"),
        (INSERT_USAGE, "add a record"),
        (SELECT_USAGE, "read records"),
        (UPDATE_USAGE, "change records"),
        (DELETE_USAGE, "remove records"),
        (INFO_USAGE, "show columns and record count"),
        ("help", "show this message"),
        ("exit", "leave the shell"),
    ];

    let mut text = String::from("Commands:\n");
    for (usage, about) in commands {
        text.push_str(&format!("  {}\n      {}\n", usage, about));
    }
    text.push_str("\nColumn types: int, str, bool. Every table gets an ID:int column.");
    text
}

/// Text printed for a successful command, None for `exit`
pub fn render(result: &ResultSet) -> Option<String> {
    Some(match result {
        ResultSet::CreateTable { table } => format!(
            "Table \"{}\" created with columns: {}",
            table.name,
            table
                .columns
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ResultSet::DropTable { table_name } => format!("Table \"{}\" dropped.", table_name),
        ResultSet::ListTables { tables } if tables.is_empty() => "No tables.".to_string(),
        ResultSet::ListTables { tables } => tables
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n"),
        ResultSet::Insert { table_name, id } => {
            format!("Record with ID={} added to table \"{}\".", id, table_name)
        }
        ResultSet::Scan { rows, .. } if rows.is_empty() => "No records.".to_string(),
        ResultSet::Scan { columns, rows } => {
            let formatter = TableFormatter::new(columns.clone(), rows);
            format!("{}{} row(s) in set", formatter.render(), formatter.row_count())
        }
        ResultSet::Update { count } => affected(*count, "updated"),
        ResultSet::Delete { count } => affected(*count, "deleted"),
        ResultSet::Info(info) => render_info(info),
        ResultSet::Help => help_text(),
        ResultSet::Exit => return None,
    })
}

fn affected(count: usize, verb: &str) -> String {
    if count == 0 {
        "No matching records.".to_string()
    } else {
        format!("{} {}", count, verb)
    }
}

fn render_info(info: &TableInfo) -> String {
    let columns = info
        .columns
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Table: {}\nColumns: {}\nRecords: {}",
        info.name, columns, info.count
    )
}
