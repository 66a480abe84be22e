use integral::Integrator;
use rand::Rng;
use rand::rngs::StdRng;

use crate::common::{Options, sin_inv, time};

const DONATION_THRESHOLDS: &[usize] = &[0, 1, 2, 5, 10, 20, 50, 100, 1_000];
const INTERVAL_COUNT: usize = 8;

/// Benchmark: donation threshold against handoff traffic and wall time
/// Integrates over random sub-intervals of the configured limits so the tree
/// shape changes from one interval to the next.
pub fn run_donation_benchmark(rng: &mut StdRng, options: &Options) {
    if options.from >= options.to {
        eprintln!("Skipping donation benchmark: needs --from below --to");
        return;
    }

    let intervals: Vec<(f64, f64)> = (0..INTERVAL_COUNT)
        .map(|_| {
            let a = rng.gen_range(options.from..options.to);
            let b = rng.gen_range(a..=options.to);
            (a, b)
        })
        .collect();

    println!("== Donation threshold benchmark ==");
    println!("intervals: {INTERVAL_COUNT} random sub-intervals of [{}, {}]", options.from, options.to);
    println!("threads: {}", options.threads);

    for &threshold in DONATION_THRESHOLDS {
        let integrator = Integrator::new(sin_inv, options.epsilon)
            .expect("epsilon should be valid")
            .with_threads(options.threads)
            .with_donation_threshold(threshold);

        let mut donations = 0;
        let mut donated = 0;
        let result = time(|| {
            intervals
                .iter()
                .map(|&(a, b)| {
                    let report = integrator
                        .integrate_with_report(a, b)
                        .expect("limits should be finite");
                    donations += report
                        .workers
                        .iter()
                        .map(|worker| worker.donations)
                        .sum::<usize>();
                    donated += report.donated();
                    report.value
                })
                .sum()
        });

        println!(
            "  threshold {threshold:>5}: {:?} (donations {donations}, segments donated {donated}, total {:.12e})",
            result.duration, result.value
        );
    }
}
