//! Benchmark command
//!
//! Plays full games against sampled secrets and aggregates statistics.

use crate::core::{Codeword, compare, generate};
use crate::solver::{CodeBreaker, Phase};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Hard stop so a degenerate breaker cannot loop forever
const BENCHMARK_ROUND_CAP: usize = 16;

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_secrets: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: HashMap<usize, usize>,
    pub duration: Duration,
    pub secrets_per_second: f64,
}

/// Run the breaker against `count` secrets sampled from the universe
///
/// `count` of `None` (or larger than the universe) plays every secret.
/// If `forced_first` is provided it is used as the opening guess.
pub fn run_benchmark(
    breaker: &mut dyn CodeBreaker,
    count: Option<usize>,
    forced_first: Option<&Codeword>,
) -> BenchmarkResult {
    let rules = breaker.rules();
    let universe = generate(rules);
    let secrets = sample_secrets(&universe, count);

    let pb = ProgressBar::new(secrets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: HashMap<usize, usize> = HashMap::new();

    for secret in &secrets {
        breaker.reset();
        let mut guesses = 0;

        loop {
            guesses += 1;
            let guess = if let (1, Some(forced)) = (guesses, forced_first) {
                *forced
            } else {
                match breaker.make_guess() {
                    Ok(g) => g,
                    Err(_) => break,
                }
            };

            let feedback = compare(rules, &guess, secret);
            if breaker.add_feedback(&guess, feedback).is_err() {
                break;
            }
            if breaker.phase() == Phase::Done || guesses >= BENCHMARK_ROUND_CAP {
                break;
            }
        }

        total_guesses += guesses;
        min_guesses = min_guesses.min(guesses);
        max_guesses = max_guesses.max(guesses);
        *distribution.entry(guesses).or_insert(0) += 1;

        pb.set_message(format!("{secret}: {guesses}"));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_secrets = secrets.len();

    BenchmarkResult {
        total_secrets,
        total_guesses,
        average_guesses: total_guesses as f64 / total_secrets.max(1) as f64,
        min_guesses: if total_secrets == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        duration,
        secrets_per_second: total_secrets as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

/// Pick `count` distinct secrets uniformly, or the whole universe
fn sample_secrets(universe: &[Codeword], count: Option<usize>) -> Vec<Codeword> {
    match count {
        Some(n) if n < universe.len() => {
            rand::seq::index::sample(&mut rand::rng(), universe.len(), n)
                .iter()
                .map(|index| universe[index])
                .collect()
        }
        _ => universe.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rules;
    use crate::solver::create_breaker;

    fn rules() -> Rules {
        Rules::new(3, 4, true).unwrap()
    }

    #[test]
    fn benchmark_runs_full_universe() {
        let mut breaker = create_breaker("minmax", rules()).unwrap();
        let result = run_benchmark(breaker.as_mut(), None, None);

        assert_eq!(result.total_secrets, 64);
        assert!(result.total_guesses >= 64);
        assert!(result.average_guesses >= 1.0);
        assert!(result.min_guesses >= 1);
        assert!(result.max_guesses < BENCHMARK_ROUND_CAP);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let mut breaker = create_breaker("entropy", rules()).unwrap();
        let result = run_benchmark(breaker.as_mut(), Some(10), None);

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, 10);
        assert_eq!(result.total_secrets, 10);
    }

    #[test]
    fn benchmark_with_forced_first_guess() {
        let rules = rules();
        let forced = Codeword::parse(rules, "011").unwrap();
        let mut breaker = create_breaker("minavg", rules).unwrap();

        let result = run_benchmark(breaker.as_mut(), Some(5), Some(&forced));

        assert_eq!(result.total_secrets, 5);
        assert!(result.average_guesses >= 1.0);
    }

    #[test]
    fn benchmark_oversized_sample_plays_everything() {
        let mut breaker = create_breaker("simple", rules()).unwrap();
        let result = run_benchmark(breaker.as_mut(), Some(10_000), None);

        assert_eq!(result.total_secrets, 64);
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let mut breaker = create_breaker("minmax", rules()).unwrap();
        let result = run_benchmark(breaker.as_mut(), Some(10), None);

        assert!(result.average_guesses >= result.min_guesses as f64);
        assert!(result.average_guesses <= result.max_guesses as f64);
        for &guesses in result.distribution.keys() {
            assert!((1..=BENCHMARK_ROUND_CAP).contains(&guesses));
        }
    }
}
