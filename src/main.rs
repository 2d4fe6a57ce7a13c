#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # labgrade
//!
//! Command line driver for the lab grading core: run a submission against a
//! set of test cases, ask for a hint, or manage saved notes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use labgrade::{
    Language, TestCase, config,
    grade::{Evaluator, RunSummary, hint_text, render_report},
    notes::Notebook,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Notes subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NotesCmd {
    /// List saved notes
    List,
    /// Print one note
    Show(String),
    /// Save a new note
    Save(String, String),
    /// Delete a note by id
    Delete(String),
}

/// Top-level CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cmd {
    /// Evaluate a code file against test cases
    Run {
        /// Language of the submission
        lang:  String,
        /// Path to the code file
        code:  PathBuf,
        /// Path to a JSON array of test cases
        cases: PathBuf,
    },
    /// Print the hint for a mismatched output
    Hint(String, String),
    /// Notes operations
    Notes(NotesCmd),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    parser().run()
}

/// Builds the command line parser
fn parser() -> OptionParser<Cmd> {
    /// parses the language tag
    fn l() -> impl Parser<String> {
        long("lang")
            .short('l')
            .help("Language of the submission (python, java, cpp, javascript, sql)")
            .argument::<String>("LANG")
            .fallback("python".to_string())
    }

    /// parses the code file path
    fn c() -> impl Parser<PathBuf> {
        positional("CODE").help("Path to the submitted code")
    }

    /// parses the test cases file path
    fn t() -> impl Parser<PathBuf> {
        positional("CASES").help("Path to a JSON array of test cases")
    }

    let lang = l();
    let code = c();
    let cases = t();
    let run = construct!(Cmd::Run { lang, code, cases })
        .to_options()
        .command("run")
        .help("Evaluate a submission against test cases");

    let actual = positional::<String>("ACTUAL").help("Output the submission produced");
    let expected = positional::<String>("EXPECTED").help("Output the test case expects");
    let hint = construct!(Cmd::Hint(actual, expected))
        .to_options()
        .command("hint")
        .help("Explain why an output does not match");

    let notes_list = pure(NotesCmd::List)
        .to_options()
        .command("list")
        .help("List saved notes, newest first");

    let key = positional::<String>("KEY").help("Storage key of the note");
    let notes_show = construct!(NotesCmd::Show(key))
        .to_options()
        .command("show")
        .help("Print a note");

    let title = positional::<String>("TITLE").help("Title of the note");
    let text = positional::<String>("TEXT").help("Body of the note");
    let notes_save = construct!(NotesCmd::Save(title, text))
        .to_options()
        .command("save")
        .help("Save a new note");

    let id = positional::<String>("ID").help("Id of the note");
    let notes_delete = construct!(NotesCmd::Delete(id))
        .to_options()
        .command("delete")
        .help("Delete a note");

    let notes = construct!([notes_list, notes_show, notes_save, notes_delete])
        .to_options()
        .command("notes")
        .help("Manage saved notes")
        .map(Cmd::Notes);

    let cmd = construct!([run, hint, notes]);

    cmd.to_options()
        .descr("Mock grading and notes for lab submissions")
}

/// Evaluates a code file and prints the report.
async fn run(lang: &str, code: &Path, cases: &Path) -> Result<()> {
    let source = std::fs::read_to_string(code)
        .with_context(|| format!("Could not read code file {}", code.display()))?;
    let cases: Vec<TestCase> = serde_json::from_str(
        &std::fs::read_to_string(cases)
            .with_context(|| format!("Could not read test cases {}", cases.display()))?,
    )
    .context("Test cases must be a JSON array of {input, output, isHidden?}")?;

    if source.trim().is_empty() {
        anyhow::bail!("{} is empty; write some code before running it", code.display());
    }

    let language = Language::from(lang);
    tokio::time::sleep(config::simulated_latency()).await;

    let results = Evaluator::new(config::evaluator()).evaluate(&source, &cases, &language);
    println!("{}", render_report(&results));

    let summary = RunSummary::from_results(&results);
    let verdict = if summary.all_passed() {
        "All test cases passed".green().bold()
    } else {
        format!("{} of {} test cases failed", summary.failed, summary.total)
            .red()
            .bold()
    };
    eprintln!("{verdict} ({})", summary.grade(100.0));
    Ok(())
}

/// Dispatches a notes subcommand against the configured store.
fn notes(cmd: NotesCmd) -> Result<()> {
    let mut notebook = Notebook::new(config::notes_store());

    match cmd {
        NotesCmd::List => {
            let notes = notebook.list()?;
            if notes.is_empty() {
                eprintln!("No saved notes.");
            }
            for note in notes {
                println!(
                    "{}  {}  {}",
                    note.key().bold(),
                    note.saved_at.format("%Y-%m-%d %H:%M"),
                    note.title
                );
            }
        }
        NotesCmd::Show(key) => match notebook.load(&key)? {
            Some(note) => println!("{}", serde_json::to_string_pretty(&note)?),
            None => anyhow::bail!("No note stored under `{key}`"),
        },
        NotesCmd::Save(title, text) => {
            let note = notebook.save(title, "", text)?;
            println!("Saved {}", note.key());
        }
        NotesCmd::Delete(id) => {
            if notebook.delete(&id)? {
                println!("Deleted note {id}");
            } else {
                anyhow::bail!("No note with id `{id}`");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    config::ensure_initialized()?;

    match options() {
        Cmd::Run { lang, code, cases } => run(&lang, &code, &cases).await?,
        Cmd::Hint(actual, expected) => {
            if actual.trim() == expected.trim() {
                println!("Outputs match; no hint needed.");
            } else {
                println!("{}", hint_text(&actual, &expected));
            }
        }
        Cmd::Notes(cmd) => notes(cmd)?,
    }

    Ok(())
}
