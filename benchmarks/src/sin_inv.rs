use integral::integrate;
use integral::sequential::{integrate_recursive, integrate_with_stack};
use rayon::ThreadPoolBuilder;

use crate::common::{Options, ratio, sin_inv, time};
use crate::fork_join::integrate_fork_join;

/// Benchmark: sin(1/x) with every integrator the crate offers
/// The interval near zero oscillates fast enough that refinement depth varies
/// wildly across it, which is what the shared stack has to balance.
pub fn run_sin_inv_benchmark(options: &Options) {
    let Options {
        from,
        to,
        epsilon,
        threads,
    } = *options;

    let stack = time(|| integrate_with_stack(sin_inv, from, to, epsilon));
    let recursive = time(|| integrate_recursive(sin_inv, from, to, epsilon));
    let pooled = time(|| integrate(sin_inv, from, to, epsilon, threads));

    let rayon_pool = ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .expect("rayon pool should build");
    let fork_join = time(|| rayon_pool.install(|| integrate_fork_join(&sin_inv, from, to, epsilon)));

    println!("== sin(1/x) benchmark ==");
    println!("interval: [{from}, {to}]");
    println!("epsilon: {epsilon:e}");
    println!("threads: {threads}");
    println!("stack time:      {:?}", stack.duration);
    println!("recursive time:  {:?}", recursive.duration);
    println!("pooled time:     {:?}", pooled.duration);
    println!("fork-join time:  {:?}", fork_join.duration);
    println!("stack value:     {:.17e}", stack.value);
    println!("recursive value: {:.17e}", recursive.value);
    println!("pooled value:    {:.17e}", pooled.value);
    println!("fork-join value: {:.17e}", fork_join.value);
    println!(
        "pooled vs stack difference: {:e}",
        (pooled.value - stack.value).abs()
    );
    println!(
        "pooled speedup: {:.2}x",
        ratio(stack.duration, pooled.duration)
    );
    println!(
        "fork-join speedup: {:.2}x",
        ratio(stack.duration, fork_join.duration)
    );
}
