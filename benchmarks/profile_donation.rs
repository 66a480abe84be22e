use std::time::Instant;

use integral::{Integrator, WorkerStats};
use tracing_subscriber::EnvFilter;

const FROM: f64 = 0.0001;
const TO: f64 = 0.1;
const EPSILON: f64 = 1e-8;
const THREADS: usize = 10;

fn sin_inv(x: f64) -> f64 {
    (1.0 / x).sin()
}

fn print_workers(workers: &[WorkerStats]) {
    println!("  worker  acquired  accepted    splits  donations   donated  partial");
    for worker in workers {
        println!(
            "  {:>6}  {:>8}  {:>8}  {:>8}  {:>9}  {:>8}  {:+.6e}",
            worker.worker,
            worker.acquired,
            worker.accepted,
            worker.splits,
            worker.donations,
            worker.donated,
            worker.partial
        );
    }
}

fn profile_threshold(threshold: usize) {
    let integrator = Integrator::new(sin_inv, EPSILON)
        .expect("epsilon should be valid")
        .with_threads(THREADS)
        .with_donation_threshold(threshold);

    let start = Instant::now();
    let report = integrator
        .integrate_with_report(FROM, TO)
        .expect("limits should be finite");
    let elapsed = start.elapsed();

    println!("--- donation threshold {threshold} ---");
    println!("  time: {:?}", elapsed);
    println!("  value: {:.17e}", report.value);
    println!(
        "  shared pushes: {}, refinements: {}, evaluations <= {}",
        report.shared_pushes,
        report.refinements(),
        report.evaluations_upper_bound()
    );
    print_workers(&report.workers);
    println!();
}

fn main() {
    // worker summaries are logged at debug level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("integral=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Donation profiling ===");
    println!();
    println!("System info:");
    println!("  Available parallelism: {:?}", std::thread::available_parallelism());
    println!("  Interval: [{FROM}, {TO}], epsilon {EPSILON:e}, {THREADS} threads");
    println!();

    for threshold in [1, 10, 100] {
        profile_threshold(threshold);
    }
}
