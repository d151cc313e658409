use clap::Parser;
use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use tutorsql::{ExecutionOutcome, QueryResult, Session, SessionConfig};

/// TutorSQL interactive shell
#[derive(Parser, Debug)]
#[command(name = "tutorsql")]
#[command(about = "Run SELECT, CREATE TABLE and INSERT against an in-memory tutorial catalog", long_about = None)]
struct Args {
    /// Config file (defaults to ./tutorsql.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with an empty catalog instead of the starter tables
    #[arg(long)]
    no_seed: bool,

    /// Print outcomes as JSON ({columns, rows, message} or {error})
    #[arg(long)]
    json: bool,

    /// Run one statement and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Print the catalog (columns and row count per table) and exit
    #[arg(long)]
    describe: bool,
}

fn format_result(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return format!("{}\n", result.message);
    }

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(result.columns.iter().map(Cell::new));
    for row in &result.rows {
        table.add_row(row.iter().map(Cell::new));
    }

    format!("{table}\n({})\n", result.message)
}

fn print_outcome(outcome: &ExecutionOutcome, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }
    match outcome {
        ExecutionOutcome::Success(result) => print!("{}", format_result(result)),
        ExecutionOutcome::Failure { error } => eprintln!("Error: {error}"),
    }
    Ok(())
}

fn print_tables(session: &Session, json: bool) -> Result<(), serde_json::Error> {
    let tables = session.describe();
    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["table", "columns", "rows"]);
    for (name, summary) in &tables {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(summary.columns.join(", ")),
            Cell::new(summary.row_count),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn repl(session: &mut Session, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;

    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".tutorsql_history");
        p
    });
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // Missing on first run
    }

    println!("TutorSQL - type a statement, or .tables, .history, .exit\n");

    loop {
        match rl.readline("tutorsql> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    ".exit" | ".quit" => break,
                    ".tables" => print_tables(session, json)?,
                    ".history" => {
                        for (i, statement) in session.history().iter().enumerate() {
                            println!("{:>4}  {statement}", i + 1);
                        }
                    }
                    _ if line.starts_with('.') => {
                        println!("Unknown command: {line}. Use .tables, .history or .exit");
                    }
                    _ => {
                        let outcome = session.execute(line);
                        print_outcome(&outcome, json)?;
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err:?}");
                return Err(err.into());
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = SessionConfig::load(args.config.as_deref())?;
    if args.no_seed {
        config.seed = false;
    }
    let mut session = Session::new(&config);

    if args.describe {
        print_tables(&session, args.json)?;
        return Ok(());
    }

    if let Some(sql) = args.command {
        let outcome = session.execute(&sql);
        print_outcome(&outcome, args.json)?;
        if !outcome.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    repl(&mut session, args.json)
}
