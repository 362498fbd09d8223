use std::io::{self, BufRead, Write};
use std::process;

use clap::{ArgAction, Parser};
use log::{LevelFilter, debug};
use time_id::{DateInput, TimeIdError, TimeIdReport, generate_time_id, parse_time_id};

const BANNER: &str = "Time-Based ID Generator";
const RULE: &str = "======================";
const DATE_PROMPT: &str = "Enter date and time (YYYY-MM-DD HH:MM:SS or YYYY-MM-DD): ";

#[derive(Parser, Debug)]
#[command(
    name = "time-id",
    version,
    about = "Generate a time-based ID in the format YYYYMMDDHHMM",
    long_about = None
)]
struct Cli {
    /// Date and time (ISO format or YYYY-MM-DD HH:MM:SS)
    #[arg(short, long, conflicts_with_all = ["now", "interactive", "parse"])]
    date: Option<String>,

    /// Use current time (default)
    #[arg(short, long, conflicts_with_all = ["interactive", "parse"])]
    now: bool,

    /// Run in interactive mode
    #[arg(short, long, conflicts_with_all = ["parse", "json"])]
    interactive: bool,

    /// Decode a time ID back into its date and time
    #[arg(short, long, value_name = "TIME_ID", conflicts_with = "json")]
    parse: Option<String>,

    /// Print a JSON report instead of the bare ID
    #[arg(long)]
    json: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    // Builder::new() skips RUST_LOG; the command line is the only knob.
    let _ = env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

// An empty --date means the clock, same as leaving the flag out.
fn requested_date(cli: &Cli) -> Option<&str> {
    cli.date.as_deref().filter(|d| !d.is_empty())
}

fn run_generate(date: Option<&str>, json_out: bool) -> Result<(), String> {
    let report = TimeIdReport::generate(date).map_err(|e| e.to_string())?;
    debug!("generated {} via {}", report.time_id, report.pattern);

    if json_out {
        println!(
            "{}",
            serde_json::to_string(&report).map_err(|e| e.to_string())?
        );
    } else {
        println!("{}", report.time_id);
    }
    Ok(())
}

fn run_parse(id: &str) -> Result<(), String> {
    let at = parse_time_id(id).map_err(|e| e.to_string())?;
    println!("{}", at.format("%Y-%m-%d %H:%M"));
    Ok(())
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_outcome<W: Write>(out: &mut W, outcome: Result<String, TimeIdError>) -> io::Result<()> {
    match outcome {
        Ok(id) => writeln!(out, "\nTime ID: {id}"),
        Err(err) => writeln!(out, "Error: {err}"),
    }
}

/// One pass of the menu. Resolver failures and bad choices are reported on
/// `out`; only I/O failures surface as errors.
fn run_interactive<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "1. Generate ID for current time")?;
    writeln!(out, "2. Generate ID for custom date/time")?;
    write!(out, "Choose an option (1-2): ")?;
    out.flush()?;

    let choice = read_answer(input)?;
    debug!("interactive choice {choice:?}");

    match choice.as_str() {
        "1" => write_outcome(out, generate_time_id(DateInput::Now)),
        "2" => {
            write!(out, "{DATE_PROMPT}")?;
            out.flush()?;
            let text = read_answer(input)?;
            write_outcome(out, generate_time_id(text.as_str()))
        }
        _ => writeln!(out, "Invalid choice"),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let res = if cli.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_interactive(&mut stdin.lock(), &mut stdout.lock()).map_err(|e| e.to_string())
    } else if let Some(id) = cli.parse.as_deref() {
        run_parse(id)
    } else {
        run_generate(requested_date(&cli), cli.json)
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
