//! LiteDB - CLI Client

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use litedb::{Database, DatabaseConfig, QueryResult, Row};

const HISTORY_FILE: &str = ".litedb_history";

/// Print welcome banner
fn print_banner() {
    println!(
        r#"
 _     _ _       ____  ____
| |   (_) |_ ___|  _ \| __ )
| |   | | __/ _ \ | | |  _ \
| |___| | ||  __/ |_| | |_) |
|_____|_|\__\___|____/|____/

 A minimal embedded relational data store in Rust
 Type '.help' for help, '.quit' to exit
"#
    );
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  .help              Show this help message
  .quit              Exit LiteDB
  .tables            List all tables
  .schema [table]    Show table schema

SQL Commands:
  CREATE TABLE ...   Create a new table
  INSERT INTO ...    Insert one row
  SELECT * FROM ...  Query data, with optional JOIN and WHERE
  DELETE FROM ...    Delete rows

Examples:
  CREATE TABLE users (id int, name text) PRIMARY KEY id;
  INSERT INTO users VALUES (1, 'Alice');
  SELECT * FROM users WHERE id=1;
"#
    );
}

fn print_usage() {
    println!("Usage: litedb-cli [--db <path>]");
    println!();
    println!("Options:");
    println!("  -d, --db <path>   Checkpoint file (default: $LITEDB_PATH or db_meta.json)");
    println!("  -h, --help        Show this message");
}

/// Format query results as a table
fn format_results(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return "No results.\n".to_string();
    };
    let columns: Vec<&String> = first.keys().collect();

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in rows {
        for (i, col) in columns.iter().enumerate() {
            let value_len = row.get(*col).map(|v| v.to_string().len()).unwrap_or(0);
            widths[i] = widths[i].max(value_len);
        }
    }

    let mut output = String::new();

    let separator: String = widths
        .iter()
        .map(|w| "-".repeat(*w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+\n", separator);

    // Header
    output.push_str(&separator);
    let header: String = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!(" {:^width$} ", c, width = *w))
        .collect::<Vec<_>>()
        .join("|");
    output.push_str(&format!("|{}|\n", header));
    output.push_str(&separator);

    // Rows
    for row in rows {
        let row_str: String = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| {
                let value = row.get(*c).map(|v| v.to_string()).unwrap_or_default();
                format!(" {:>width$} ", value, width = *w)
            })
            .collect::<Vec<_>>()
            .join("|");
        output.push_str(&format!("|{}|\n", row_str));
    }
    output.push_str(&separator);

    output.push_str(&format!("{} row(s) returned\n", rows.len()));
    output
}

/// Execute a SQL statement and print its result
fn execute_sql(db: &mut Database, sql: &str) {
    let sql = sql.trim();
    if sql.is_empty() {
        return;
    }

    match db.execute(sql) {
        Ok(QueryResult::Rows(rows)) => print!("{}", format_results(&rows)),
        Ok(QueryResult::Status {
            message,
            success: true,
        }) => println!("{}", message),
        Ok(QueryResult::Status {
            message,
            success: false,
        }) => eprintln!("{}", message),
        Err(e) => eprintln!("Fatal: {}", e),
    }
}

/// Handle dot commands. Returns false when the REPL should exit.
fn handle_special_command(cmd: &str, db: &Database) -> bool {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    match parts.first().copied() {
        Some(".help") => print_help(),
        Some(".quit") | Some(".exit") => return false,
        Some(".tables") => {
            let tables = db.table_names();
            if tables.is_empty() {
                println!("No tables found.");
            } else {
                println!("Tables:");
                for table in tables {
                    println!("  {}", table);
                }
            }
        }
        Some(".schema") => {
            let names = match parts.get(1) {
                Some(name) => vec![name.to_string()],
                None => db.table_names(),
            };
            for name in names {
                match db.describe(&name) {
                    Ok(info) => println!("{}", info),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Type '.help' for available commands.");
        }
        None => {}
    }
    true
}

/// Main REPL loop
fn run_repl(db: &mut Database) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
    let _ = editor.load_history(HISTORY_FILE);

    print_banner();

    let mut input_buffer = String::new();

    loop {
        let prompt = if input_buffer.is_empty() {
            "litedb> "
        } else {
            "   ...> "
        };

        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                input_buffer.clear();
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read input"),
        };
        let trimmed = line.trim();

        // Handle special commands
        if input_buffer.is_empty() && trimmed.starts_with('.') {
            let _ = editor.add_history_entry(trimmed);
            if !handle_special_command(trimmed, db) {
                break;
            }
            continue;
        }

        // Empty line in multiline mode - execute the buffer
        if trimmed.is_empty() {
            if !input_buffer.is_empty() {
                let sql = std::mem::take(&mut input_buffer);
                let _ = editor.add_history_entry(sql.trim());
                execute_sql(db, &sql);
            }
            continue;
        }

        if !input_buffer.is_empty() {
            input_buffer.push(' ');
        }
        input_buffer.push_str(trimmed);

        // Check if statement is complete (ends with semicolon)
        if trimmed.ends_with(';') {
            let sql = std::mem::take(&mut input_buffer);
            let _ = editor.add_history_entry(sql.as_str());
            execute_sql(db, &sql);
        }
    }

    let _ = editor.save_history(HISTORY_FILE);
    println!("Goodbye!");
    Ok(())
}

/// Resolve the configuration from the environment and command-line flags
fn parse_args() -> Result<Option<DatabaseConfig>> {
    let mut config = DatabaseConfig::from_env();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--db" => {
                let path = args.next().context("--db requires a path")?;
                config = config.checkpoint_path(PathBuf::from(path));
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            other => bail!("unknown argument '{}'", other),
        }
    }

    Ok(Some(config))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(config) = parse_args()? else {
        return Ok(());
    };

    let path = config.checkpoint_path.clone();
    let mut db = Database::open(config)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    run_repl(&mut db)
}
