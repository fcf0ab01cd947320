//! Display functions for command results

use super::formatters::{create_progress_bar, feedback_pegs};
use crate::commands::{BenchmarkResult, SolveResult, TreeReport};
use colored::Colorize;

/// Print the trace of a solved game
pub fn print_solve_result(result: &SolveResult, pegs: usize, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!("Secret: {}", result.secret.bright_yellow().bold());
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.rounds.iter().enumerate() {
        println!(
            "\nRound {}: {}  {}  {}",
            i + 1,
            step.guess.bold(),
            step.feedback,
            feedback_pegs(step.feedback, pegs)
        );

        if verbose {
            println!(
                "  Possibilities: {} → {}",
                step.possibilities_before, step.possibilities_after
            );
            if step.possibilities_after > 0 {
                let reduction = step.possibilities_before as f64 / step.possibilities_after as f64;
                println!("  Reduction:     {reduction:.1}x");
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Broken in {} guesses!", result.rounds.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not broken within {} guesses", result.rounds.len())
                .red()
                .bold()
        );
    }
}

/// Print a strategy tree summary, with the full edge dump when asked
pub fn print_tree_report(report: &TreeReport, dump: bool) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "STRATEGY TREE:".bright_cyan().bold(),
        report.strategy.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n   Opening guess:    {}",
        report.tree.node(report.tree.root()).guess().to_string().bold()
    );
    println!("   Secrets covered:  {}", report.secrets_covered);
    println!("   Decision nodes:   {}", report.node_count);
    println!(
        "   Average rounds:   {}",
        format!("{:.4}", report.average_rounds).bright_yellow().bold()
    );
    println!("   Total guesses:    {}", report.info.total_steps);
    println!("   Build time:       {:.2}s", report.duration.as_secs_f64());

    println!("\n   {}", "Rounds histogram:".bright_cyan().bold());
    let peak = report.info.histogram.iter().copied().max().unwrap_or(0);
    for (depth, &count) in report.info.histogram.iter().enumerate().skip(1) {
        if count == 0 {
            continue;
        }
        let bar = create_progress_bar(count as f64, peak as f64, 30);
        println!("   {depth:>2} | {} {count}", bar.green());
    }

    if dump {
        println!("\n   {}", "Edges:".bright_cyan().bold());
        report.tree.for_each_edge(|edge| {
            let indent = "  ".repeat(edge.depth);
            match edge.guess {
                Some(guess) => println!(
                    "   {indent}{} → {} ({} possibilities)",
                    edge.feedback, guess, edge.possibility_count
                ),
                None => println!("   {indent}{} → solved", edge.feedback),
            }
        });
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Secrets tested:   {}", result.total_secrets);
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Secrets/second:   {:.1}", result.secrets_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let peak = result.distribution.values().copied().max().unwrap_or(0);
    let mut counts: Vec<(usize, usize)> = result
        .distribution
        .iter()
        .map(|(&guesses, &count)| (guesses, count))
        .collect();
    counts.sort_unstable();
    for (guesses, count) in counts {
        let bar = create_progress_bar(count as f64, peak as f64, 30);
        println!("   {guesses:>2} | {} {count}", bar.green());
    }
}
