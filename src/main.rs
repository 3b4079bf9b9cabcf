use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use deskcalc::calculator::{Calculator, parse_keys};
use deskcalc::config::Config;
use deskcalc::logging;
use deskcalc::readout::Readout;

/// Drive the calculator engine from the command line.
#[derive(Debug, Parser)]
#[command(name = "deskcalc", version, about)]
struct Args {
    /// Keys to press, e.g. `7 + 3 =` or `MC 5 M+ MR`.
    /// Without keys, sequences are read line by line from stdin.
    /// Put keys that start with `--` after a `--` separator.
    #[arg(allow_negative_numbers = true)]
    keys: Vec<String>,

    /// Print the display after every key.
    #[arg(long)]
    trace: bool,

    /// Print the final state as JSON instead of the bare display.
    #[arg(long)]
    json: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    logging::init(&config.logging.filter);

    let mut calc = Calculator::with_settings(config.display);
    let mut out = io::stdout().lock();

    if args.keys.is_empty() {
        return run_interactive(&mut calc, &args, &mut out);
    }

    let input = args.keys.join(" ");
    replay(&mut calc, &input, args.trace, &mut out)?;
    print_state(&calc, args.json, &mut out)
}

/// Apply every key in `input`, optionally echoing each step.
fn replay(calc: &mut Calculator, input: &str, trace: bool, out: &mut impl Write) -> Result<()> {
    let keys = parse_keys(input).with_context(|| format!("invalid key sequence `{}`", input))?;
    for key in keys {
        let display = calc.press(key);
        if trace {
            writeln!(out, "{:>4} -> {}", key.label(), display)?;
        }
    }
    Ok(())
}

fn print_state(calc: &Calculator, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let readout = Readout::from(calc);
        writeln!(out, "{}", serde_json::to_string(&readout)?)?;
    } else {
        writeln!(out, "{}", calc.display())?;
    }
    Ok(())
}

/// Read key sequences from stdin, one per line, against a single engine.
fn run_interactive(calc: &mut Calculator, args: &Args, out: &mut impl Write) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match replay(calc, line, args.trace, out) {
            Ok(()) => print_state(calc, args.json, out)?,
            Err(err) => {
                tracing::warn!(input = line, "rejected key sequence");
                eprintln!("error: {:#}", err);
            }
        }
    }
    Ok(())
}
