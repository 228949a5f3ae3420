//! RV32 verification harness CLI.
//!
//! This binary runs the bundled suites against the reference circuits. It performs:
//! 1. **Run:** Executes one suite (or all of them), stopping at the first failing check,
//!    and exits with status 0 on a full pass and 1 otherwise.
//! 2. **List:** Prints every suite with its scenario names.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rv32tb_core::scenario::suites::RunOptions;
use rv32tb_core::scenario::Suite;
use rv32tb_core::sim::{MemoryImage, RunOutcome, print_outcome};
use rv32tb_core::stats::RunStats;
use rv32tb_core::{Config, HarnessError, HarnessResult};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(
    name = "rv32tb",
    author,
    version,
    about = "Cycle-accurate verification harness for an RV32IM core",
    long_about = "Drive the bundled verification suites against the reference core, RAM, and system models.\n\nExamples:\n  rv32tb run\n  rv32tb run --suite instructions --only bxx\n  rv32tb run --suite system --image build/test.dhex\n  rv32tb list"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run suites until the first failing check.
    Run(RunArgs),

    /// List suites and their scenarios.
    List,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Suite to run.
    #[arg(short, long, value_enum, default_value_t = SuiteArg::All)]
    suite: SuiteArg,

    /// Run only the named scenario.
    #[arg(long)]
    only: Option<String>,

    /// Program image for the system suite (`.dhex` word image or `.hex` Intel HEX).
    #[arg(long)]
    image: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Waveform output path.
    #[arg(long, conflicts_with = "no_trace")]
    trace: Option<PathBuf>,

    /// Do not write a waveform.
    #[arg(long)]
    no_trace: bool,

    /// Print the banner without color.
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SuiteArg {
    Instructions,
    Ram,
    System,
    All,
}

impl SuiteArg {
    fn suites(self) -> Vec<Suite> {
        match self {
            Self::Instructions => vec![Suite::Instructions],
            Self::Ram => vec![Suite::Ram],
            Self::System => vec![Suite::System],
            Self::All => Suite::ALL.to_vec(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::List => {
            cmd_list();
            0
        }
    };
    process::exit(code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the requested suites in order and returns the process exit status.
fn cmd_run(args: &RunArgs) -> i32 {
    let config = match build_config(args) {
        Ok(config) => config,
        Err(err) => return setup_failure(&err, !args.no_color),
    };
    let color = config.general.color;

    let (suites, options) = match plan(args) {
        Ok(plan) => plan,
        Err(err) => return setup_failure(&err, color),
    };

    let mut total: Option<RunStats> = None;
    for &suite in &suites {
        let mut options = options.clone();
        if suites.len() > 1 {
            options.trace_path = Some(per_suite_trace(&config.general.trace_path, suite));
        }

        let outcome = match suite.run(&config, &options) {
            Ok(outcome) => outcome,
            Err(err) => return setup_failure(&err, color),
        };
        if !outcome.passed() {
            print_outcome(&outcome, color);
            return outcome.exit_code();
        }
        match &mut total {
            Some(stats) => stats.absorb(&outcome.stats),
            None => total = Some(outcome.stats),
        }
    }

    let outcome = RunOutcome {
        error: None,
        stats: total.unwrap_or_default(),
    };
    print_outcome(&outcome, color);
    outcome.exit_code()
}

fn cmd_list() {
    for suite in Suite::ALL {
        println!("{suite}");
        for name in suite.scenario_names() {
            println!("  {name}");
        }
    }
}

/// Loads the configuration file (if any) and applies the command-line overrides.
fn build_config(args: &RunArgs) -> HarnessResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = &args.trace {
        config.general.trace = true;
        config.general.trace_path.clone_from(path);
    }
    if args.no_trace {
        config.general.trace = false;
    }
    if args.no_color {
        config.general.color = false;
    }
    Ok(config)
}

/// Picks the suites to run and the options they share.
fn plan(args: &RunArgs) -> HarnessResult<(Vec<Suite>, RunOptions)> {
    let mut suites = args.suite.suites();
    if let Some(name) = &args.only {
        suites.retain(|suite| suite.scenario_names().contains(&name.as_str()));
        if suites.is_empty() {
            return Err(HarnessError::UnknownSuite(name.clone()));
        }
    }

    let image = match &args.image {
        Some(path) => Some(MemoryImage::load(path)?),
        None => None,
    };
    info!(suites = suites.len(), "run planned");
    Ok((
        suites,
        RunOptions {
            only: args.only.clone(),
            image,
            trace_path: None,
        },
    ))
}

/// `simx.vcd` becomes `simx.<suite>.vcd` when several suites share one run.
fn per_suite_trace(base: &Path, suite: Suite) -> PathBuf {
    let ext = base
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("vcd");
    base.with_extension(format!("{suite}.{ext}"))
}

/// Reports an error raised before any scenario ran.
fn setup_failure(err: &HarnessError, color: bool) -> i32 {
    error!("{err}");
    if color {
        eprintln!("{RED}{err}{RESET}");
    } else {
        eprintln!("{err}");
    }
    1
}
