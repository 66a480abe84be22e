use integral::Integrator;

use crate::common::{Options, ratio, sin_inv, time};

const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8, 16, 32];

/// Benchmark: the pooled integrator at increasing thread counts
/// Reports how evenly the accepted segments end up spread over the workers.
pub fn run_scaling_benchmark(options: &Options) {
    println!("== Thread scaling benchmark ==");
    println!("interval: [{}, {}]", options.from, options.to);
    println!("epsilon: {:e}", options.epsilon);

    let counts: Vec<usize> = THREAD_COUNTS
        .iter()
        .copied()
        .filter(|&threads| threads <= options.threads.max(1) * 2)
        .collect();

    let mut single = None;
    for threads in counts {
        let integrator = Integrator::new(sin_inv, options.epsilon)
            .expect("epsilon should be valid")
            .with_threads(threads);
        let mut report = None;
        let result = time(|| {
            let outcome = integrator
                .integrate_with_report(options.from, options.to)
                .expect("limits should be finite");
            let value = outcome.value;
            report = Some(outcome);
            value
        });
        let report = report.expect("report should be recorded");
        let baseline = *single.get_or_insert(result.duration);

        let busiest = report
            .workers
            .iter()
            .map(|worker| worker.accepted)
            .max()
            .unwrap_or(0);
        let balance = if busiest == 0 {
            0.0
        } else {
            report.accepted() as f64 / (busiest * threads) as f64
        };

        println!(
            "  {threads:>2} threads: {:?} (speedup {:.2}x, balance {:.2}, handoffs {})",
            result.duration,
            ratio(baseline, result.duration),
            balance,
            report.acquired()
        );
    }
}
