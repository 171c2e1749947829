//! Terminal host for the to-do list.
//!
//! # Responsibility
//! - Parse host settings from command-line flags.
//! - Translate stdin lines into `UiEvent`s and repaint after each one.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tasklist_core::{
    core_version, init_logging, AppConfig, EventEffect, MemoryStorage, SlotTaskRepository,
    SqliteStorage, StorageResult, StorageSlot, TaskStore, TimestampIdGenerator, TodoApp, UiEvent,
};

const HELP_TEXT: &str = "\
type text + Enter   add a task
:toggle N           toggle the N-th visible task
:delete N           delete the N-th visible task
:filter VALUE       show all | active | completed
:help               show this help
:quit               exit";

/// Interactive terminal to-do list.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about = "Interactive terminal to-do list", long_about = None)]
struct Cli {
    /// Directory holding the task database and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Storage slot key for the task collection
    #[arg(long)]
    key: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files (defaults to <data-dir>/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is written to disk
    #[arg(long)]
    memory: bool,
}

impl Cli {
    fn to_config(&self) -> AppConfig {
        let mut config = match &self.data_dir {
            Some(dir) => AppConfig::rooted_at(dir),
            None => AppConfig::default(),
        };
        if let Some(key) = &self.key {
            config = config.with_storage_key(key.as_str());
        }
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level.as_str());
        }
        if let Some(log_dir) = &self.log_dir {
            config = config.with_log_dir(log_dir);
        }
        config
    }
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Submit(String),
    Toggle(usize),
    Delete(usize),
    Filter(String),
    Help,
    Quit,
}

/// Slot backend chosen for this session.
enum SessionStorage {
    Sqlite(SqliteStorage),
    Memory(MemoryStorage),
}

impl StorageSlot for SessionStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Self::Sqlite(storage) => storage.get(key),
            Self::Memory(storage) => storage.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Self::Sqlite(storage) => storage.set(key, value),
            Self::Memory(storage) => storage.set(key, value),
        }
    }
}

/// Opens the task database at `db_path`, or memory-only storage when no
/// path is given. An unopenable database degrades to memory with a warning.
fn open_session_storage(db_path: Option<&Path>) -> (SessionStorage, Option<String>) {
    let Some(db_path) = db_path else {
        return (SessionStorage::Memory(MemoryStorage::new()), None);
    };

    match SqliteStorage::open(db_path) {
        Ok(storage) => (SessionStorage::Sqlite(storage), None),
        Err(err) => {
            warn!(
                "event=storage_open module=cli status=degraded path={} error={}",
                db_path.display(),
                err
            );
            let warning = format!(
                "cannot open task database `{}` ({err}); changes will not be kept after exit",
                db_path.display()
            );
            (SessionStorage::Memory(MemoryStorage::new()), Some(warning))
        }
    }
}

fn parse_command(line: &str) -> Result<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Submit(line.to_string()));
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("toggle" | "t", Some(position)) => Ok(Command::Toggle(parse_position(position)?)),
        ("delete" | "d", Some(position)) => Ok(Command::Delete(parse_position(position)?)),
        ("filter" | "f", Some(value)) => Ok(Command::Filter(value.to_string())),
        ("help" | "h", None) => Ok(Command::Help),
        ("quit" | "q", None) => Ok(Command::Quit),
        _ => Err(anyhow!("unrecognized command `{line}`; try :help")),
    }
}

fn parse_position(value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .with_context(|| format!("`{value}` is not a row number"))
}

fn run<S: StorageSlot>(app: &mut TodoApp<SlotTaskRepository<S>, TimestampIdGenerator>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    paint(&mut stdout, app)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_command(line.trim_end()) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        let effect = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP_TEXT}")?;
                continue;
            }
            Command::Submit(text) => {
                app.handle(UiEvent::InputChanged(text));
                app.handle(UiEvent::AddClicked)
            }
            Command::Filter(value) => app.handle(UiEvent::FilterClicked(value)),
            Command::Toggle(position) | Command::Delete(position) => {
                let Some(row) = app.view().row(position) else {
                    writeln!(stdout, "no visible task at row {position}")?;
                    continue;
                };
                let action = match command {
                    Command::Toggle(_) => row.toggle.clone(),
                    _ => row.delete.clone(),
                };
                app.activate(action)
            }
        };

        if effect == EventEffect::Repainted {
            if let Some(outcome) = app.store().last_persist().filter(|outcome| !outcome.is_saved()) {
                writeln!(stdout, "warning: changes not saved ({outcome:?})")?;
            }
            paint(&mut stdout, app)?;
        }
    }

    Ok(())
}

fn paint<S: StorageSlot>(
    out: &mut impl Write,
    app: &TodoApp<SlotTaskRepository<S>, TimestampIdGenerator>,
) -> Result<()> {
    write!(out, "\n{}> ", app.view().to_text())?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={} memory={}",
        core_version(),
        cli.memory
    );

    let db_path = (!cli.memory).then(|| config.db_path());
    let (storage, warning) = open_session_storage(db_path.as_deref());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
    let repo = SlotTaskRepository::with_key(storage, config.storage_key.as_str());
    let mut app = TodoApp::new(TaskStore::open(repo, TimestampIdGenerator::new()));
    run(&mut app)
}
