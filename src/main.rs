//! Mastermind Solver - CLI
//!
//! Breaks Mastermind-style codes with heuristic strategies or an
//! exhaustive optimal-strategy search.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use mastermind_solver::{
    commands::{SolveConfig, build_tree, run_benchmark, solve_secret},
    core::{Codeword, Rules},
    output::{print_benchmark_result, print_solve_result, print_tree_report},
    solver::{CodeBreaker, STRATEGY_NAMES, create_breaker},
};

#[derive(Parser)]
#[command(
    name = "mastermind_solver",
    about = "Mastermind codebreaker with heuristic and optimal strategies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strategy: simple, minmax, minavg, entropy (default), maxparts, optimal
    #[arg(short, long, global = true, default_value = "entropy")]
    strategy: String,

    /// Number of peg positions in a codeword (1-9)
    #[arg(short, long, global = true, default_value = "4")]
    pegs: u8,

    /// Number of colors (1-10)
    #[arg(short, long, global = true, default_value = "6")]
    colors: u8,

    /// Forbid repeated colors within a codeword
    #[arg(short, long, global = true)]
    unique: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Break a specific secret and show the guess trace
    Solve {
        /// The secret codeword, one digit per peg (e.g. 1122)
        secret: String,

        /// Show verbose output with possibility counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Precompute a full decision tree and summarize it
    Tree {
        /// Force the opening guess instead of letting the strategy choose
        #[arg(short, long)]
        first_guess: Option<String>,

        /// Print every edge of the tree
        #[arg(short, long)]
        dump: bool,
    },

    /// Benchmark a strategy over sampled secrets
    Benchmark {
        /// Number of random secrets to test (default: the whole universe)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Force the opening guess
        #[arg(short, long)]
        first_guess: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rules = Rules::new(cli.pegs, cli.colors, !cli.unique)?;
    let mut breaker = make_breaker(&cli.strategy, rules)?;

    match cli.command {
        Commands::Solve { secret, verbose } => {
            let config = SolveConfig::new(secret);
            let result = solve_secret(config, breaker.as_mut()).map_err(|e| anyhow!(e))?;
            print_solve_result(&result, rules.pegs(), verbose);
        }
        Commands::Tree { first_guess, dump } => {
            let report =
                build_tree(breaker.as_mut(), first_guess.as_deref()).map_err(|e| anyhow!(e))?;
            print_tree_report(&report, dump);
        }
        Commands::Benchmark { count, first_guess } => {
            let forced = first_guess
                .map(|text| Codeword::parse(rules, &text))
                .transpose()
                .map_err(|e| anyhow!("Invalid first guess: {e}"))?;
            let result = run_benchmark(breaker.as_mut(), count, forced.as_ref());
            print_benchmark_result(&result);
        }
    }

    Ok(())
}

fn make_breaker(strategy: &str, rules: Rules) -> Result<Box<dyn CodeBreaker>> {
    create_breaker(strategy, rules).ok_or_else(|| {
        anyhow!(
            "Unknown strategy '{strategy}' (available: {})",
            STRATEGY_NAMES.join(", ")
        )
    })
}
