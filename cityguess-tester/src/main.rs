mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use cityguess_game::{PromptSet, decode_to_seed, encode_friendly};
use policy::GuessStrategy;
use reports::{generate_console_report, generate_json_report, generate_markdown_report};
use simulation::{SessionReport, SimulationConfig, run_session};

#[derive(Debug, Parser)]
#[command(name = "cityguess-tester", version)]
#[command(about = "Automated QA for CityGuess - plays deterministic sessions against the game core")]
struct Args {
    /// Seeds to run (comma-separated numbers or GG- share codes)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of sessions per seed (each run offsets the seed)
    #[arg(long, default_value_t = 1)]
    iterations: u64,

    /// Bot guess strategy
    #[arg(long, value_enum, default_value_t = GuessStrategy::Mixed)]
    strategy: GuessStrategy,

    /// Countdown seconds the bot spends thinking per round
    #[arg(long, default_value_t = 2)]
    think_seconds: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional prompt deck JSON (defaults to the bundled deck)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    let start_time = Instant::now();
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let deck = load_deck(args.data.as_deref())?;

    let mut session_reports: Vec<SessionReport> = Vec::new();
    for &seed in &seeds {
        for iteration in 0..args.iterations {
            let run_seed = seed.wrapping_add(iteration);
            let config = SimulationConfig::new(run_seed, args.strategy)
                .with_think_seconds(args.think_seconds);
            let report = run_session(config, deck.clone())?;
            if args.verbose {
                println!(
                    "✅ seed {} ({}) — {} | score {}",
                    run_seed,
                    encode_friendly(run_seed),
                    report.end_reason,
                    report.score
                );
            }
            session_reports.push(report);
        }
    }

    write_reports(&args, &session_reports, start_time)
}

fn announce_banner() {
    println!("{}", "🗺️  CityGuess Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Accepts plain numbers ("1337") and share codes ("GG-PARIS42").
fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(seed) = decode_to_seed(token) {
            seeds.push(seed);
        } else if let Ok(seed) = token.parse::<u64>() {
            seeds.push(seed);
        } else {
            bail!("invalid seed or share code: {token}");
        }
    }
    if seeds.is_empty() {
        bail!("no seeds provided");
    }
    Ok(seeds)
}

fn load_deck(path: Option<&std::path::Path>) -> Result<PromptSet> {
    let mut deck = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            PromptSet::from_json(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => PromptSet::load_from_static(),
    };
    deck.normalize_poster_paths();
    Ok(deck)
}

fn write_reports(args: &Args, reports: &[SessionReport], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, reports)?,
        "markdown" => generate_markdown_report(&mut output_target, reports)?,
        _ => generate_console_report(&mut output_target, reports, start_time.elapsed())?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
