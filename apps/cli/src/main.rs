#![deny(warnings)]

//! Terminal front end for Tariff Showdown.
//!
//! Plays one session, reading moves from stdin or from `--moves`, and prints
//! the dashboard after every round.

mod chart;

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tariff_core::{Outcome, TariffCommand};
use tariff_runtime::{RoundController, RoundView};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: tariff-showdown [--seed <u64>] [--moves <+-...>] [--json]

  --seed <u64>    seed for random events (default: system clock)
  --moves <str>   play a scripted game, '+' raises and '-' lowers the tariff
  --json          print the final state as JSON

interactive commands: + / up / i, - / down / d, q / quit";

#[derive(Debug, Default, PartialEq)]
struct Args {
    seed: Option<u64>,
    moves: Option<String>,
    json: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                out.seed = Some(v.parse().with_context(|| format!("invalid seed: {v}"))?);
            }
            "--moves" => out.moves = Some(it.next().context("--moves needs a value")?),
            "--json" => out.json = true,
            "-h" | "--help" => out.help = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(out)
}

#[derive(Debug, PartialEq)]
enum Input {
    Move(TariffCommand),
    Quit,
    Unknown(String),
}

/// Interpret one line of interactive input. Blank lines yield `None`.
fn parse_command(line: &str) -> Option<Input> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return None,
        "+" | "up" | "i" | "increase" => Input::Move(TariffCommand::Increase),
        "-" | "down" | "d" | "decrease" => Input::Move(TariffCommand::Decrease),
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    };
    Some(input)
}

fn scripted_moves(script: &str) -> Result<Vec<TariffCommand>> {
    let mut moves = Vec::with_capacity(script.len());
    for c in script.chars() {
        match c {
            '+' => moves.push(TariffCommand::Increase),
            '-' => moves.push(TariffCommand::Decrease),
            ',' => {}
            c if c.is_whitespace() => {}
            other => bail!("invalid move '{other}' in --moves (use '+' or '-')"),
        }
    }
    Ok(moves)
}

fn render_dashboard(view: &RoundView) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "========== Round {} / {} ==========\n",
        view.round_count, view.max_rounds
    ));
    s.push_str(&format!("Tariff:    {:.1}%\n", view.tariff_rate * 100.0));
    s.push_str(&format!("GDP:       {:.0} (100M USD)\n", view.gdp));
    s.push_str(&format!("Services:  {:.1}/100\n", view.services));
    s.push_str(&format!("Support:   {:.1}%\n", view.support));
    s.push_str("Latest news:\n");
    for m in &view.messages {
        s.push_str(&format!("  {m}\n"));
    }
    s.push_str(&chart::trend_line("GDP trend", &view.gdp_history, 0));
    s.push('\n');
    s.push_str(&chart::trend_line("Support trend", &view.support_history, 1));
    s.push('\n');
    s
}

fn render_ending(view: &RoundView) -> Option<String> {
    let summary = view.summary?;
    let rule = match summary.outcome {
        Outcome::DecisiveReelection => "**********",
        Outcome::NarrowSurvival => "----------",
        Outcome::Removed => "xxxxxxxxxx",
    };
    Some(format!(
        "{rule} Game over {rule}\nTotal score: {}\n{}\n",
        summary.score as i64,
        summary.outcome.headline()
    ))
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

fn play_scripted(ctl: &mut RoundController, script: &str, out: &mut impl Write) -> Result<()> {
    let moves = scripted_moves(script)?;
    let total = moves.len();
    for (i, cmd) in moves.into_iter().enumerate() {
        if ctl.is_terminal() {
            warn!(ignored = total - i, "game over; ignoring remaining moves");
            break;
        }
        ctl.advance(cmd)?;
        write!(out, "{}", render_dashboard(&ctl.view()))?;
    }
    Ok(())
}

fn play_interactive(ctl: &mut RoundController, out: &mut impl Write) -> Result<()> {
    let stdin = io::stdin();
    write!(out, "> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse_command(&line) {
            Some(Input::Move(cmd)) => {
                ctl.advance(cmd)?;
                write!(out, "{}", render_dashboard(&ctl.view()))?;
                if ctl.is_terminal() {
                    break;
                }
            }
            Some(Input::Quit) => break,
            Some(Input::Unknown(word)) => {
                writeln!(out, "unknown command '{word}' (use +, - or q)")?;
            }
            None => {}
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so the dashboard owns stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    let seed = args.seed.unwrap_or_else(seed_from_clock);
    info!(seed, scripted = args.moves.is_some(), "starting session");

    let mut ctl = RoundController::seeded(seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render_dashboard(&ctl.view()))?;

    match args.moves.as_deref() {
        Some(script) => play_scripted(&mut ctl, script, &mut out)?,
        None => play_interactive(&mut ctl, &mut out)?,
    }

    let view = ctl.view();
    match render_ending(&view) {
        Some(ending) => write!(out, "\n{ending}")?,
        None => writeln!(
            out,
            "\nSession ended at round {} of {}.",
            view.round_count, view.max_rounds
        )?,
    }
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    }
    Ok(())
}
