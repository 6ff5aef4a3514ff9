//! Alsvid Command-Line Interface
//!
//! The main entry point for the Alsvid CLI tool: qubit placement and
//! swap/bridge routing experiments over coupling-constrained devices.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compare, generate, route, version};

/// Alsvid - qubit mapping and routing for coupling-constrained devices
#[derive(Parser)]
#[command(name = "alsvid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Routing policy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyChoice {
    /// Plain swap-chain routing
    Swap,
    /// Swap routing with bridge substitution
    Bridge,
    /// Bridge routing with pinned sites
    Pinned,
}

/// Placement frequency strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Count only control operands
    ControlOnly,
    /// Count both operands
    BothOperands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route an operation sequence on a device with one policy
    Route {
        /// Topology file (adjacency lists, -1 sentinels)
        #[arg(short, long)]
        topology: Option<String>,

        /// Named built-in device (ring4, ring8, linear5, star5, qx4, ...)
        #[arg(long, conflicts_with = "topology")]
        device: Option<String>,

        /// Treat topology edges as directed
        #[arg(long)]
        directed: bool,

        /// Sequence file (integer pairs; -1-led pairs are barriers)
        #[arg(short, long)]
        sequence: Option<String>,

        /// Generate a random sequence of this length instead
        #[arg(long, conflicts_with = "sequence")]
        random: Option<usize>,

        /// Seed for random sequence generation
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Routing policy
        #[arg(short, long, value_enum, default_value = "swap")]
        policy: PolicyChoice,

        /// Pinned physical sites (pinned policy only, repeatable)
        #[arg(long = "pin")]
        pins: Vec<u32>,

        /// Cost-model JSON file (missing fields keep defaults)
        #[arg(long)]
        cost_model: Option<String>,

        /// Placement frequency strategy
        #[arg(long, value_enum, default_value = "control-only")]
        strategy: StrategyChoice,

        /// Print the mapping after every operation
        #[arg(long)]
        trace: bool,

        /// Write a JSON report to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Run every applicable policy and compare costs
    Compare {
        /// Topology file (adjacency lists, -1 sentinels)
        #[arg(short, long)]
        topology: Option<String>,

        /// Named built-in device (ring4, ring8, linear5, star5, qx4, ...)
        #[arg(long, conflicts_with = "topology")]
        device: Option<String>,

        /// Treat topology edges as directed
        #[arg(long)]
        directed: bool,

        /// Sequence file (integer pairs; -1-led pairs are barriers)
        #[arg(short, long)]
        sequence: Option<String>,

        /// Directory of .seq files for a batch experiment
        #[arg(long, conflicts_with = "sequence")]
        dir: Option<String>,

        /// Generate a random sequence of this length instead
        #[arg(long, conflicts_with_all = ["sequence", "dir"])]
        random: Option<usize>,

        /// Seed for random sequence generation
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Pinned physical sites (enables the pinned policy, repeatable)
        #[arg(long = "pin")]
        pins: Vec<u32>,

        /// Cost-model JSON file (missing fields keep defaults)
        #[arg(long)]
        cost_model: Option<String>,

        /// Placement frequency strategy
        #[arg(long, value_enum, default_value = "control-only")]
        strategy: StrategyChoice,
    },

    /// Generate a random operation sequence file
    Generate {
        /// Number of logical qubits
        #[arg(short, long)]
        qubits: u32,

        /// Number of operations
        #[arg(short, long)]
        length: usize,

        /// Generator seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        output: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Route {
            topology,
            device,
            directed,
            sequence,
            random,
            seed,
            policy,
            pins,
            cost_model,
            strategy,
            trace,
            export,
        } => route::execute(&route::RouteArgs {
            topology,
            device,
            directed,
            sequence,
            random,
            seed,
            policy,
            pins,
            cost_model,
            strategy,
            trace,
            export,
        }),

        Commands::Compare {
            topology,
            device,
            directed,
            sequence,
            dir,
            random,
            seed,
            pins,
            cost_model,
            strategy,
        } => compare::execute(&compare::CompareArgs {
            topology,
            device,
            directed,
            sequence,
            dir,
            random,
            seed,
            pins,
            cost_model,
            strategy,
        }),

        Commands::Generate {
            qubits,
            length,
            seed,
            output,
        } => generate::execute(qubits, length, seed, &output),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
