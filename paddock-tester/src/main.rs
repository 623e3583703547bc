mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use paddock_engine::{CharacterId, MemoryStore, PlannerEngine, UserId, balance_plan};
use report::{
    AnalysisReport, generate_console_report, generate_json_report, generate_markdown_report,
};

/// Bundled sample data covering a full graded season plus one character's
/// scenario bindings.
const DEFAULT_FIXTURE: &str = include_str!("../fixtures/default.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Analysis {
    /// Calendar plan generation
    Plans,
    /// Career count estimation
    Breeding,
    /// Remaining-race summary
    Summary,
    /// Scenario recommendation
    Recommend,
    /// Run every analysis
    All,
}

impl Analysis {
    const fn covers(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

#[derive(Debug, Parser)]
#[command(name = "paddock-tester", version = "0.1.0")]
#[command(about = "Planning analysis for the Paddock career engine over a JSON fixture")]
struct Args {
    /// Fixture file to load (bundled sample data when omitted)
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// User id owning the run records
    #[arg(long, default_value_t = 1)]
    user: u32,

    /// Character id to plan for
    #[arg(long, default_value_t = 1)]
    character: u32,

    /// Requested number of plans (clamped by the engine)
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Analysis to run
    #[arg(long, value_enum, default_value_t = Analysis::All)]
    analysis: Analysis,

    /// Spread long consecutive race runs in each generated plan
    #[arg(long)]
    balance: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output (per-slot listings and planner logs)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == "console" && args.output.is_none() {
        announce_banner();
    }

    let start_time = Instant::now();
    let store = load_store(&args)?;
    let engine = PlannerEngine::new(store);
    let report = run_analyses(&args, &engine)?;
    write_report(&args, &report, start_time)
}

fn announce_banner() {
    println!("{}", "🏇 Paddock Planning Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_store(args: &Args) -> Result<MemoryStore> {
    match &args.fixture {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            info!("loaded fixture from {}", path.display());
            MemoryStore::from_json(&json)
                .with_context(|| format!("invalid fixture {}", path.display()))
        }
        None => {
            info!("using bundled fixture");
            MemoryStore::from_json(DEFAULT_FIXTURE).context("bundled fixture is invalid")
        }
    }
}

fn run_analyses(args: &Args, engine: &PlannerEngine<MemoryStore>) -> Result<AnalysisReport> {
    let user = UserId(args.user);
    let character = CharacterId(args.character);
    let mut report = AnalysisReport::empty();

    if args.analysis.covers(Analysis::Plans) {
        let mut set = engine.plan_calendars(args.count, user, character)?;
        if args.balance {
            for plan in &mut set.plans {
                balance_plan(plan);
            }
        }
        info!("generated {} plans", set.plans.len());
        report.record_plans(set);
    }
    if args.analysis.covers(Analysis::Breeding) {
        report.breeding_count = Some(engine.estimate_breeding_count(user, character)?);
    }
    if args.analysis.covers(Analysis::Summary) {
        report.summary = Some(engine.remaining_summary(user, character)?);
    }
    if args.analysis.covers(Analysis::Recommend) {
        report.recommendation = Some(engine.recommend_scenario(user, character)?);
    }
    Ok(report)
}

fn write_report(args: &Args, report: &AnalysisReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => generate_json_report(&mut output_target, report)?,
        "markdown" => generate_markdown_report(&mut output_target, report)?,
        _ => {
            generate_console_report(&mut output_target, report, args.verbose)?;
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
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
