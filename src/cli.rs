use crate::commands::{MetaCommand, MetaOutcome, QueryExecutor};
use crate::completion::{CompletionEngine, KeywordSet, SqliteHelper};
use crate::config::Config;
use crate::database::Connection;
use crate::session::Session;
use crate::statement::{Input, StatementAccumulator};
use anyhow::{anyhow, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::{history::DefaultHistory, CompletionType, Config as EditorConfig, Editor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Whether the read loop keeps going after an input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Cli {
    session: Arc<Mutex<Session>>,
    editor: Editor<SqliteHelper, DefaultHistory>,
    accumulator: StatementAccumulator,
    query_executor: QueryExecutor,
    history_file: Option<PathBuf>,
}

impl Cli {
    pub fn new(config: &Config) -> Result<Self> {
        let connection = Connection::open(&config.database)
            .with_context(|| format!("connection failure: {}", config.database.display()))?;
        info!(database = connection.path(), "session started");

        let session = Arc::new(Mutex::new(Session::new(
            Box::new(connection),
            &config.database,
            config.timing,
        )));

        let editor_config = EditorConfig::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .edit_mode(rustyline::EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        let helper = SqliteHelper::new(CompletionEngine::new(KeywordSet::sqlite()), session.clone());
        editor.set_helper(Some(helper));

        if let Some(path) = &config.history_file {
            if let Err(e) = editor.load_history(path) {
                warn!(path = %path.display(), error = %e, "could not load history");
            }
        }

        Ok(Self {
            session,
            editor,
            accumulator: StatementAccumulator::new(),
            query_executor: QueryExecutor::new(),
            history_file: config.history_file.clone(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let input = match self.read() {
                Ok(input) => input,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    println!();
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            if self.evaluate(input)? == Flow::Quit {
                break;
            }
        }

        self.save_history();
        info!("session ended");
        Ok(())
    }

    /// Read lines until the accumulator yields one complete input.
    /// Interrupt or end of input discards the partial statement.
    fn read(&mut self) -> Result<Input, ReadlineError> {
        debug_assert!(self.accumulator.is_empty());

        let primary = match self.session.lock() {
            Ok(session) => session.prompt(),
            Err(_) => "=> ".to_string(),
        };

        loop {
            let prompt = self.accumulator.prompt(&primary);
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Some(input) = self.accumulator.push_line(&line) {
                        return Ok(input);
                    }
                }
                Err(err) => {
                    self.accumulator.reset();
                    return Err(err);
                }
            }
        }
    }

    fn evaluate(&mut self, input: Input) -> Result<Flow> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("session state poisoned"))?;
        let mut stdout = io::stdout().lock();
        evaluate(&mut session, &self.query_executor, input, &mut stdout)
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }
}

/// Run one complete input against the session and write what the user
/// sees. Only `\q` ends the session; failures are reported and the loop
/// carries on.
fn evaluate(
    session: &mut Session,
    query_executor: &QueryExecutor,
    input: Input,
    out: &mut impl Write,
) -> Result<Flow> {
    let number = session.next_statement();
    debug!(number, input = input.text(), "evaluating");

    match input {
        Input::MetaCommand(text) => {
            let started = Instant::now();
            let outcome = MetaCommand::parse(&text).dispatch(session);
            let elapsed = started.elapsed();

            match outcome {
                Ok(MetaOutcome::Rows(result)) => {
                    write!(
                        out,
                        "{}",
                        query_executor.render(Some(&result), elapsed, session.timing())
                    )?;
                }
                Ok(MetaOutcome::Message(message)) => {
                    writeln!(out, "{}", message)?;
                    write!(out, "{}", query_executor.render(None, elapsed, session.timing()))?;
                }
                Ok(MetaOutcome::Quit) => return Ok(Flow::Quit),
                Ok(MetaOutcome::UnknownMetaCommand(raw)) => {
                    writeln!(out, "Unknown meta command '{}'.", raw)?;
                    writeln!(out)?;
                }
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    writeln!(out)?;
                }
            }
        }
        Input::Statement(sql) => match query_executor.execute(session.db(), &sql) {
            Ok((result, elapsed)) => {
                write!(
                    out,
                    "{}",
                    query_executor.render(Some(&result), elapsed, session.timing())
                )?;
            }
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                writeln!(out)?;
            }
        },
    }

    out.flush()?;
    Ok(Flow::Continue)
}
