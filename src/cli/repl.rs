//! Read loop of the interactive shell
//!
//! Reads one line at a time with rustyline, hands it to the session and
//! prints the rendered result. Command errors go to stderr and never end
//! the loop; only `exit`, Ctrl-C, end of input or a terminal failure do.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    cli::output::render,
    sql::{engine::Session, executor::ResultSet},
    storage::engine::Engine,
};

const PROMPT: &str = "primdb> ";

/// Outcome of one read from the line editor
#[derive(Debug)]
enum Input {
    Line(String),
    /// Ctrl-C or Ctrl-D: leave the shell cleanly
    Closed,
    Failed(ReadlineError),
}

impl From<std::result::Result<String, ReadlineError>> for Input {
    fn from(read: std::result::Result<String, ReadlineError>) -> Self {
        match read {
            Ok(line) => Input::Line(line),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Input::Closed,
            Err(err) => Input::Failed(err),
        }
    }
}

pub struct Repl<E: Engine> {
    session: Session<E>,
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl<E: Engine + 'static> Repl<E> {
    pub fn new(session: Session<E>, history: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(path) = &history {
            // A missing history file is expected on first start.
            let _ = editor.load_history(path);
        }

        Ok(Self { session, editor, history })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("primdb {}. Type help for the list of commands.", env!("CARGO_PKG_VERSION"));

        loop {
            match Input::from(self.editor.readline(PROMPT)) {
                Input::Line(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Input::Closed => break,
                Input::Failed(err) => {
                    self.save_history();
                    return Err(err).wrap_err("failed to read input");
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Runs one line, false once the shell should stop
    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }
        self.editor.add_history_entry(trimmed).ok();

        match self.session.execute(trimmed) {
            Ok(Some(ResultSet::Exit)) => false,
            Ok(Some(result)) => {
                if let Some(text) = render(&result) {
                    println!("{}", text);
                }
                true
            }
            Ok(None) => true,
            Err(err) => {
                eprintln!("Error: {}", err);
                true
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history {
            if let Err(err) = self.editor.save_history(path) {
                tracing::warn!(path = %path.display(), %err, "failed to save history");
            }
        }
    }
}
