//! `veil` - command-line access to the veiltext engine
//!
//! Reads marker text from a file or stdin and inspects or rewrites it, or
//! manages a directory-backed document store.
//!
//! # Usage
//!
//! ```bash
//! echo 'The {{capital}} of France' | veil inspect
//! veil hide 0 4 7 notes.txt
//! veil --store ~/.veil --session s1 list
//! veil --store ~/.veil --session s1 export ~/backups
//! ```

use chrono::Utc;
use serde::Serialize;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use veiltext::store::transfer;
use veiltext::{DocumentStore, FsStore, Namespace, SessionId, marker};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "veil - hide and reveal words in plain text

USAGE:
    veil [OPTIONS] <COMMAND> [ARGS] [FILE]

COMMANDS:
    inspect                 Print the segment structure as JSON
    strip                   Print the text with all markers removed
    stats                   Print line, segment and hidden counts
    hide <LINE> <START> <END>
                            Hide chars START..END of LINE (0-based) and
                            print the resulting marker text
    list                    List stored files (requires --store)
    export [DIR]            Print stored files as a JSON array, or write them
                            to a dated backup file in DIR (requires --store)
    import                  Import a JSON array of files (requires --store)

OPTIONS:
    -h, --help              Print this help message and exit
    --store <DIR>           Document store directory
    --session <ID>          Session owning the documents (default: generated)
    --user <ID>             Use the user's namespace instead of the session's

FILE defaults to stdin; `-` also means stdin.
";

/// Subcommand to run.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Inspect,
    Strip,
    Stats,
    Hide { line: usize, start: usize, end: usize },
    List,
    Export,
    Import,
}

impl Command {
    fn needs_store(&self) -> bool {
        matches!(self, Self::List | Self::Export | Self::Import)
    }
}

/// Configuration parsed from command-line arguments.
#[derive(Clone, Debug)]
struct Config {
    command: Command,
    input: Option<PathBuf>,
    store: Option<PathBuf>,
    session: Option<String>,
    user: Option<String>,
}

/// Result of parsing command-line arguments.
#[derive(Debug)]
enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

fn parse_number(name: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("hide requires <{name}>"))?;
    value
        .parse()
        .map_err(|_| format!("Invalid <{name}>: {value} (must be a non-negative integer)"))
}

impl Config {
    fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();
        let mut store = None;
        let mut session = None;
        let mut user = None;
        let mut positional = Vec::new();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy().to_string();
            match arg_str.as_str() {
                "-h" | "--help" => return ParseResult::Help,
                "--store" | "--session" | "--user" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error(format!("{arg_str} requires a value"));
                    };
                    let value = value.to_string_lossy().to_string();
                    match arg_str.as_str() {
                        "--store" => store = Some(PathBuf::from(value)),
                        "--session" => session = Some(value),
                        _ => user = Some(value),
                    }
                }
                "-" => positional.push(arg_str),
                other if other.starts_with('-') => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }
                _ => positional.push(arg_str),
            }
        }

        let mut positional = positional.into_iter();
        let Some(name) = positional.next() else {
            return ParseResult::Error("missing <COMMAND>".to_string());
        };
        let command = match name.as_str() {
            "inspect" => Command::Inspect,
            "strip" => Command::Strip,
            "stats" => Command::Stats,
            "list" => Command::List,
            "export" => Command::Export,
            "import" => Command::Import,
            "hide" => {
                let nums: Vec<String> = positional.by_ref().take(3).collect();
                let parsed = parse_number("LINE", nums.first()).and_then(|line| {
                    let start = parse_number("START", nums.get(1))?;
                    let end = parse_number("END", nums.get(2))?;
                    Ok(Command::Hide { line, start, end })
                });
                match parsed {
                    Ok(command) => command,
                    Err(msg) => return ParseResult::Error(msg),
                }
            }
            other => return ParseResult::Error(format!("Unknown command: {other}")),
        };

        let input = positional
            .next()
            .filter(|path| path != "-")
            .map(PathBuf::from);
        if let Some(extra) = positional.next() {
            return ParseResult::Error(format!("Unexpected argument: {extra}"));
        }
        if command.needs_store() && store.is_none() {
            return ParseResult::Error(format!("{name} requires --store <DIR>"));
        }

        ParseResult::Config(Self {
            command,
            input,
            store,
            session,
            user,
        })
    }

    fn namespace(&self) -> Namespace {
        let session = self
            .session
            .as_ref()
            .map_or_else(SessionId::generate, SessionId::new);
        Namespace::resolve(&session, self.user.as_deref())
    }
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Serialize)]
struct SegmentView<'a> {
    text: &'a str,
    hidden: bool,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(config: &Config, out: &mut impl Write) -> CliResult {
    if let Some(root) = &config.store {
        return run_store(config, FsStore::new(root), out);
    }

    let text = read_input(config.input.as_ref())?;
    let mut doc = marker::parse(&text);

    match config.command {
        Command::Inspect => {
            let lines: Vec<Vec<SegmentView<'_>>> = doc
                .lines
                .iter()
                .map(|line| {
                    line.segments
                        .iter()
                        .map(|s| SegmentView {
                            text: &s.text,
                            hidden: s.hidden,
                        })
                        .collect()
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string(&lines)?)?;
        }
        Command::Strip => write!(out, "{}", doc.plain_text())?,
        Command::Stats => {
            let segments: usize = doc.lines.iter().map(|l| l.segments.len()).sum();
            writeln!(out, "lines: {}", doc.line_count())?;
            writeln!(out, "segments: {segments}")?;
            writeln!(out, "hidden: {}", doc.hidden_count())?;
        }
        Command::Hide { line, start, end } => {
            let count = doc.line_count();
            let Some(target) = doc.lines.get_mut(line) else {
                return Err(format!("line {line} out of range (document has {count} lines)").into());
            };
            if target.hide_range(start..end) {
                doc.touch();
            }
            write!(out, "{}", marker::serialize(&doc))?;
        }
        Command::List | Command::Export | Command::Import => {
            return Err("this command requires --store <DIR>".into());
        }
    }
    Ok(())
}

fn run_store(config: &Config, mut store: FsStore, out: &mut impl Write) -> CliResult {
    let namespace = config.namespace();
    match config.command {
        Command::List => {
            for item in store.list(&namespace)? {
                writeln!(out, "{}\t{}\t{}", item.id, item.updated_at, item.name)?;
            }
        }
        Command::Export => {
            let json = transfer::export_json(&store, &namespace)?;
            match &config.input {
                Some(dir) => {
                    let path = dir.join(transfer::backup_file_name(Utc::now().date_naive()));
                    std::fs::write(&path, json)?;
                    writeln!(out, "{}", path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Import => {
            let json = read_input(config.input.as_ref())?;
            let added = transfer::import_json(&mut store, &namespace, &json)?;
            writeln!(out, "imported {added} file(s) into {namespace}")?;
        }
        _ => return Err("--store only applies to list, export and import".into()),
    }
    Ok(())
}

fn main() {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = run(&config, &mut out) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        ParseResult::Help => print!("{HELP_TEXT}"),
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(2);
        }
    }
}
