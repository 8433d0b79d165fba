mod driver;
mod input;
mod loader;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use dragonquest_game::{Ending, GameEngine, Snapshot};
use input::Prompter;
use loader::FileLoader;
use render::Narrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Console,
    /// Final snapshot as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "dragonquest", version = "0.1.0")]
#[command(about = "The Dragon's Quest: gear up, hunt minions, slay the dragon")]
struct Args {
    /// Adventurer name; prompted for when omitted
    #[arg(long)]
    name: Option<String>,

    /// JSON file overriding starting health and gold
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON item catalog replacing the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Format of the end-of-game report
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report to instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose logging (debug level unless RUST_LOG says otherwise)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), stdout());
    let ending = run(&args, &mut prompter)?;
    log::info!("game over: {}", ending.as_str());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run<R: BufRead, W: Write>(args: &Args, prompter: &mut Prompter<R, W>) -> Result<Ending> {
    let engine = GameEngine::new(FileLoader {
        catalog: args.catalog.clone(),
        config: args.config.clone(),
    });

    render::banner(prompter.output())?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompter
            .ask("\nWhat is your name, brave adventurer? ")
            .context("failed to read the adventurer's name")?
            .unwrap_or_default(),
    };

    let mut session = engine
        .create_session(&name)
        .context("failed to start a new game")?;
    let narrator = Narrator::new(session.catalog());
    render::welcome(prompter.output(), &session.snapshot())?;

    let ending = driver::play(&mut session, prompter, &narrator)?;

    let mut sink = report_sink(args.output.as_deref())?;
    write_report(&mut sink, args.report, &session.snapshot())?;
    sink.flush().context("failed to write the report")?;
    Ok(ending)
}

fn write_report(out: &mut impl Write, format: ReportFormat, snapshot: &Snapshot) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, snapshot)
                .context("failed to serialize the final snapshot")?;
            writeln!(out)?;
        }
        ReportFormat::Console => {
            let outcome = match snapshot.ending {
                Some(Ending::Victory { gold }) => format!("Victory with {gold} gold").green(),
                Some(Ending::Defeat) => "Defeated".red(),
                Some(Ending::Quit) | None => "Left the quest".yellow(),
            };
            writeln!(out, "\n{}", "📜 Final Report".bright_cyan().bold())?;
            writeln!(out, "{}", "================================".cyan())?;
            writeln!(out, "Adventurer: {}", snapshot.name)?;
            writeln!(out, "Outcome:    {outcome}")?;
            writeln!(out, "Health:     {}", snapshot.health)?;
            writeln!(out, "Gold:       {}", snapshot.gold)?;
            writeln!(out, "Items:      {}", snapshot.inventory.len())?;
            writeln!(out, "Turns:      {}", snapshot.turns)?;
        }
    }
    Ok(())
}

/// Where the end-of-game report goes: the `--output` file, or stdout.
fn report_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(stdout())));
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    log::debug!("writing the report to {}", path.display());
    Ok(Box::new(BufWriter::new(file)))
}
