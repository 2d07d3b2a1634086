use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use grover_qsim::config::{SearchConfig, SweepConfig, TargetChoice};
use grover_qsim::report::{plot_iterations, plot_success_rates, print_table};
use grover_qsim::search::{build_search_circuit, IterationSchedule, DEFAULT_SHOTS};
use grover_qsim::simulator::DEFAULT_MAX_QUBITS;
use grover_qsim::sweep::run_sweep;

#[derive(Parser, Debug)]
#[command(name = "grover-qsim")]
#[command(about = "Grover's search on a state-vector simulator")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Samples drawn from the final state
    #[arg(long, default_value_t = DEFAULT_SHOTS, env = "GROVER_SHOTS")]
    shots: usize,

    /// Sampler seed (random if omitted)
    #[arg(long, env = "GROVER_SEED")]
    seed: Option<u64>,

    /// Iteration count formula
    #[arg(long, value_enum, default_value_t = Schedule::Rounded, env = "GROVER_SCHEDULE")]
    schedule: Schedule,

    /// Largest register the simulator accepts
    #[arg(long, default_value_t = DEFAULT_MAX_QUBITS, env = "GROVER_MAX_QUBITS")]
    capacity: usize,
}

impl From<&SearchArgs> for SearchConfig {
    fn from(args: &SearchArgs) -> Self {
        SearchConfig {
            shots: args.shots,
            seed: args.seed,
            max_qubits: args.capacity,
            schedule: args.schedule.into(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for one target index
    Search {
        /// Number of qubits (search space size = 2^n)
        #[arg(short = 'n', long, default_value = "3")]
        qubits: usize,

        /// Index to search for (0 to 2^n - 1)
        #[arg(short, long, default_value = "5")]
        target: usize,

        /// Print the generated circuit
        #[arg(long)]
        show_circuit: bool,

        /// Print every observed outcome
        #[arg(long)]
        show_counts: bool,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Run the search over a range of sizes and plot the success rate
    Sweep {
        #[arg(long, default_value = "2")]
        min_qubits: usize,

        #[arg(long, default_value = "10")]
        max_qubits: usize,

        /// Search for this index at every size instead of a random one
        #[arg(short, long)]
        target: Option<usize>,

        /// Success rate plot
        #[arg(short, long, default_value = "grover_success.png")]
        output: PathBuf,

        /// Iteration count plot
        #[arg(long, default_value = "grover_iterations.png")]
        iterations_output: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Schedule {
    Rounded,
    Floor,
    Optimal,
}

impl From<Schedule> for IterationSchedule {
    fn from(schedule: Schedule) -> Self {
        match schedule {
            Schedule::Rounded => IterationSchedule::Rounded,
            Schedule::Floor => IterationSchedule::Floor,
            Schedule::Optimal => IterationSchedule::Optimal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Search {
            qubits,
            target,
            show_circuit,
            show_counts,
            search,
        } => run_search(qubits, target, show_circuit, show_counts, &search),
        Commands::Sweep {
            min_qubits,
            max_qubits,
            target,
            output,
            iterations_output,
            search,
        } => {
            let config = SweepConfig {
                search: SearchConfig::from(&search),
                min_qubits,
                max_qubits,
                target: target.map_or(TargetChoice::Random, TargetChoice::Fixed),
            };
            run_sweep_and_plot(&config, &output, &iterations_output)
        }
    }
}

fn run_search(
    qubits: usize,
    target: usize,
    show_circuit: bool,
    show_counts: bool,
    args: &SearchArgs,
) -> Result<()> {
    let config = SearchConfig::from(args);
    let mut runner = config.runner();
    let outcome = runner.run(qubits, target, config.shots)?;

    if show_circuit {
        let circuit = build_search_circuit(qubits, target, outcome.iterations)?;
        println!("Circuit:\n{}", circuit);
    }
    if show_counts {
        println!("Counts:\n{}", outcome.counts);
    }

    println!("Search space size:   {}", 1_usize << qubits);
    println!("Target index:        {}", target);
    println!("Grover iterations:   {}", outcome.iterations);
    println!("Found index:         {}", outcome.found_index);
    println!(
        "Success probability: {:.4} ({} of {} shots)",
        outcome.success_probability,
        outcome.counts.get(target),
        outcome.shots
    );
    println!(
        "Theoretical:         {:.4}",
        outcome.theoretical_probability
    );

    Ok(())
}

fn run_sweep_and_plot(
    config: &SweepConfig,
    output: &Path,
    iterations_output: &Path,
) -> Result<()> {
    let points = run_sweep(config)?;

    print_table(&points, &mut std::io::stdout().lock())?;

    plot_success_rates(&points, output)?;
    plot_iterations(&points, iterations_output)?;
    println!(
        "Plots saved to '{}' and '{}'.",
        output.display(),
        iterations_output.display()
    );

    Ok(())
}
