//! Command line driver for the discipline classifier.
//!
//! # Usage
//!
//! ```bash
//! # Classify traces from stdin, one label per line
//! gds < traces.txt
//!
//! # Classify a file, with full JSON reports and explanations on stderr
//! gds classify traces.txt --format json --explain
//!
//! # Emit 10 priority-queue traces, 10% of removes corrupted
//! gds generate --seed 7 --count 10 --discipline "priority queue" --corrupt 0.1
//!
//! # Self-check the classifier against generated traces
//! GDS_SEED=12345 gds simulate --preset thorough
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gds_cli::{
    log_directive, open_input, run_classify, run_generate, run_simulate, write_explanations,
    ClassifyConfig, DriverError, OutputFormat, LOG_ENV,
};
use gds_core::{Discipline, PriorityOrder};
use gds_dst::{
    get_or_generate_seed, iterations_from_env, GeneratorConfig, MutationConfig, SimulationConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gds",
    version,
    about = "Guess which data structure produced an insert/remove trace"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `classify` on stdin
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify traces and print one label per trace
    Classify(ClassifyArgs),
    /// Generate traces in the input format
    Generate(GenerateArgs),
    /// Run the seeded classifier self-check
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    /// Trace file; stdin when omitted
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Priority queue key order: `min` or `max`
    #[arg(long, default_value = "min")]
    priority_order: PriorityOrder,

    /// Reject coordinates outside [1, 100]
    #[arg(long)]
    enforce_bounds: bool,

    /// Explain each label on stderr
    #[arg(long)]
    explain: bool,
}

impl Default for ClassifyArgs {
    fn default() -> Self {
        Self {
            input: None,
            format: OutputFormat::Text,
            priority_order: PriorityOrder::MinKey,
            enforce_bounds: false,
            explain: false,
        }
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Seed; falls back to GDS_SEED, then a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of traces
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// `stack`, `queue` or `priority queue`
    #[arg(long, default_value = "stack")]
    discipline: Discipline,

    /// Operations per trace
    #[arg(long)]
    operations: Option<usize>,

    /// Probability that a step inserts rather than removes
    #[arg(long)]
    insert_probability: Option<f64>,

    /// Largest coordinate value
    #[arg(long)]
    coordinate_max: Option<i32>,

    /// Probability that a remove names the wrong point
    #[arg(long)]
    corrupt: Option<f64>,

    #[arg(long, default_value = "min")]
    priority_order: PriorityOrder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Fast,
    Default,
    Thorough,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Seed; falls back to GDS_SEED, then a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Iterations; falls back to GDS_ITERATIONS, then the preset
    #[arg(long)]
    iterations: Option<u64>,

    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Override the corruption probability of the preset
    #[arg(long)]
    corrupt: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => classify(ClassifyArgs::default()),
        Some(Command::Classify(args)) => classify(args),
        Some(Command::Generate(args)) => generate(args),
        Some(Command::Simulate(args)) => simulate(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let directive = log_directive(verbosity, std::env::var(LOG_ENV).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn classify(args: ClassifyArgs) -> Result<ExitCode, DriverError> {
    let config = ClassifyConfig {
        priority_order: args.priority_order,
        enforce_bounds: args.enforce_bounds,
        format: args.format,
        explain: args.explain,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = match &args.input {
        Some(path) => run_classify(open_input(path)?, &mut out, &config)?,
        None => run_classify(io::stdin().lock(), &mut out, &config)?,
    };

    if config.explain {
        let mut err = io::stderr().lock();
        write_explanations(&mut err, &reports)?;
        err.flush()?;
    }
    Ok(ExitCode::SUCCESS)
}

fn generate(args: GenerateArgs) -> Result<ExitCode, DriverError> {
    let seed = match args.seed {
        Some(seed) => seed,
        None => get_or_generate_seed()?,
    };

    let mut config = GeneratorConfig::default().with_discipline(args.discipline);
    config.priority_order = args.priority_order;
    if let Some(operations) = args.operations {
        config.operations_count = operations;
    }
    if let Some(p) = args.insert_probability {
        config.insert_probability = p;
    }
    if let Some(max) = args.coordinate_max {
        config.coordinate_max = max;
    }
    if let Some(p) = args.corrupt {
        config = config.with_mutation(MutationConfig::with_probability(p));
    }

    let stdout = io::stdout();
    run_generate(&mut stdout.lock(), seed, args.count, config)?;
    Ok(ExitCode::SUCCESS)
}

fn simulate(args: SimulateArgs) -> Result<ExitCode, DriverError> {
    let seed = match args.seed {
        Some(seed) => seed,
        None => get_or_generate_seed()?,
    };

    let mut config = match args.preset {
        Preset::Fast => SimulationConfig::fast(),
        Preset::Default => SimulationConfig::default(),
        Preset::Thorough => SimulationConfig::thorough(),
    };
    config.iterations = match args.iterations {
        Some(iterations) => iterations,
        None => iterations_from_env(config.iterations)?,
    };
    if let Some(p) = args.corrupt {
        config.generator.mutation = MutationConfig::with_probability(p);
    }

    let summary = run_simulate(seed, &config)?;
    println!("{summary}");

    if summary.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("reproduce with {}", summary.format_seed());
        Ok(ExitCode::FAILURE)
    }
}
