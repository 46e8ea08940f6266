//! CLI smoke and demo entry point.
//!
//! # Responsibility
//! - Verify `nudgelist_core` linkage without the Flutter runtime.
//! - Offer `list|add|remove|remind` against a database file for manual checks.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use nudgelist_core::{CoreConfig, IntervalOutcome, SqliteKvStore, TodoSession};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// NudgeList: to-do list with periodic reminders.
///
/// Without a subcommand, prints the core ping and version.
#[derive(Parser, Debug)]
#[command(name = "nudgelist", version, about)]
struct Cli {
    /// SQLite file holding the task list; created when missing.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print every task as `<id>\t<text>`.
    List,
    /// Add a task; words are joined with single spaces.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a task by id.
    Remove { id: String },
    /// Set the interval, then wait for `count` reminders and print them.
    Remind {
        /// Interval in seconds; invalid values keep the current interval.
        seconds: String,
        count: u32,
    },
}

type Session = TodoSession<SqliteKvStore>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("nudgelist_core ping={}", nudgelist_core::ping());
        println!("nudgelist_core version={}", nudgelist_core::core_version());
        return ExitCode::SUCCESS;
    };
    let Some(db) = cli.db else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "`--db <PATH>` is required when running a subcommand",
            )
            .exit();
    };

    match run(&db, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(db: &Path, command: Command) -> Result<(), String> {
    let storage = SqliteKvStore::open(db).map_err(|err| err.to_string())?;
    let mut session = TodoSession::open(storage, &CoreConfig::default(), Instant::now());

    match command {
        Command::List => {
            print_tasks(&session);
            Ok(())
        }
        Command::Add { text } => {
            match session.add_task(&text.join(" "), Instant::now()) {
                Some(id) => println!("added {id}"),
                None => println!("ignored blank task"),
            }
            surface_persist_error(&session)
        }
        Command::Remove { id } => {
            if session.remove_task(&id, Instant::now()) {
                println!("removed {id}");
            } else {
                println!("no task with id {id}");
            }
            surface_persist_error(&session)
        }
        Command::Remind { seconds, count } => {
            remind(&mut session, &seconds, count);
            Ok(())
        }
    }
}

/// Sleeps through `count` reminder periods, printing each fired task.
fn remind(session: &mut Session, secs: &str, count: u32) {
    session.set_pending_interval(secs);
    if session.confirm_interval(Instant::now()) == IntervalOutcome::Rejected {
        println!(
            "invalid interval `{secs}`, keeping {}s",
            session.scheduler().pending_text()
        );
    }

    let mut shown = 0;
    while shown < count {
        let now = Instant::now();
        if let Some(reminder) = session.tick(now) {
            println!("Reminder [{}]: {}", reminder.index, reminder.task.text);
            session.dismiss_reminder();
            shown += 1;
            continue;
        }
        if session.tasks().is_empty() {
            println!("no tasks to remind about");
            return;
        }
        if let Some(wait) = session.next_reminder_in(now) {
            std::thread::sleep(wait);
        }
    }
}

fn print_tasks(session: &Session) {
    if session.tasks().is_empty() {
        println!("(no tasks)");
        return;
    }
    for task in session.tasks() {
        println!("{}\t{}", task.id, task.text);
    }
}

fn surface_persist_error(session: &Session) -> Result<(), String> {
    match session.store().last_persist_error() {
        Some(message) => Err(format!("saved in memory only: {message}")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Cli, Command};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["nudgelist"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.db.is_none());
    }

    #[test]
    fn add_collects_all_words() {
        let cli = Cli::try_parse_from(["nudgelist", "--db", "t.db", "add", "Buy", "milk"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("t.db")));
        assert_eq!(
            cli.command,
            Some(Command::Add {
                text: vec!["Buy".to_string(), "milk".to_string()]
            })
        );
    }

    #[test]
    fn remind_parses_raw_seconds_and_count() {
        let cli = Cli::try_parse_from(["nudgelist", "--db", "t.db", "remind", "abc", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Remind {
                seconds: "abc".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn help_and_bad_input_are_reported_by_clap() {
        let help = Cli::try_parse_from(["nudgelist", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let sub_help = Cli::try_parse_from(["nudgelist", "--db", "t.db", "--help"]).unwrap_err();
        assert_eq!(sub_help.kind(), ErrorKind::DisplayHelp);

        let missing_text = Cli::try_parse_from(["nudgelist", "--db", "t.db", "add"]).unwrap_err();
        assert_eq!(missing_text.kind(), ErrorKind::MissingRequiredArgument);

        let bad_count =
            Cli::try_parse_from(["nudgelist", "--db", "t.db", "remind", "5", "many"]).unwrap_err();
        assert_eq!(bad_count.kind(), ErrorKind::ValueValidation);

        let unknown = Cli::try_parse_from(["nudgelist", "--db", "t.db", "frobnicate"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn add_then_list_and_remove_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");

        run(
            &db,
            Command::Add {
                text: vec!["Walk".to_string(), "dog".to_string()],
            },
        )
        .unwrap();
        run(&db, Command::List).unwrap();
        run(
            &db,
            Command::Remove {
                id: "missing".to_string(),
            },
        )
        .unwrap();
    }
}
