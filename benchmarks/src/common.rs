use std::time::{Duration, Instant};

/// Result of a timed integration
#[derive(Debug)]
pub struct BenchmarkResult {
    pub duration: Duration,
    pub value: f64,
}

/// Runs `job` once and records how long it took.
pub fn time<J>(job: J) -> BenchmarkResult
where
    J: FnOnce() -> f64,
{
    let start = Instant::now();
    let value = job();
    BenchmarkResult {
        duration: start.elapsed(),
        value,
    }
}

/// Ratio of two durations, as printed next to each timing.
pub fn ratio(numerator: Duration, denominator: Duration) -> f64 {
    numerator.as_secs_f64() / denominator.as_secs_f64()
}

/// Integration limits and tuning shared by every benchmark.
#[derive(Clone, Debug)]
pub struct Options {
    pub from: f64,
    pub to: f64,
    pub epsilon: f64,
    pub threads: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            from: 0.0001,
            to: 0.1,
            epsilon: 1e-8,
            threads: 10,
        }
    }
}

pub fn sin_inv(x: f64) -> f64 {
    (1.0 / x).sin()
}
