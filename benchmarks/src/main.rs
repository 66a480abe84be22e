use std::collections::HashSet;
use std::env;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod common;
mod donation;
mod fork_join;
mod scaling;
mod sin_inv;

use common::Options;
use donation::run_donation_benchmark;
use scaling::run_scaling_benchmark;
use sin_inv::run_sin_inv_benchmark;

/// Available benchmark names
const BENCHMARK_NAMES: &[&str] = &["sin-inv", "scaling", "donation"];

fn print_usage() {
    let defaults = Options::default();
    println!("Usage: benchmarks [OPTIONS] [BENCHMARK...]");
    println!();
    println!("Time the adaptive trapezoidal integrators on sin(1/x).");
    println!();
    println!("Options:");
    println!("  --from <A>       Lower limit (default {})", defaults.from);
    println!("  --to <B>         Upper limit (default {})", defaults.to);
    println!("  --epsilon <E>    Relative tolerance (default {:e})", defaults.epsilon);
    println!("  --threads <N>    Worker threads (default {})", defaults.threads);
    println!("  --help, -h       Show this help message");
    println!("  --list, -l       List available benchmarks");
    println!();
    println!("Arguments:");
    println!("  BENCHMARK        Benchmark(s) to run, by name or index (0-based)");
    println!("                   If no benchmarks specified, runs all benchmarks.");
    println!();
    println!("Logging is controlled by RUST_LOG, e.g. RUST_LOG=integral=debug.");
    println!();
    println!("Examples:");
    println!("  benchmarks                          # Run all benchmarks");
    println!("  benchmarks sin-inv                  # Run only 'sin-inv'");
    println!("  benchmarks 0 2                      # Run benchmarks 0 and 2");
    println!("  benchmarks --threads 4 scaling      # Scale up to 8 threads");
}

fn print_benchmark_list() {
    println!("Available benchmarks:");
    for (i, name) in BENCHMARK_NAMES.iter().enumerate() {
        println!("  {}: {}", i, name);
    }
}

fn parse_benchmark_selection(args: &[String]) -> HashSet<usize> {
    let mut selected = HashSet::new();

    for arg in args {
        // Try parsing as index first
        if let Ok(index) = arg.parse::<usize>() {
            if index < BENCHMARK_NAMES.len() {
                selected.insert(index);
            } else {
                eprintln!(
                    "Warning: benchmark index {} out of range (0-{})",
                    index,
                    BENCHMARK_NAMES.len() - 1
                );
            }
        } else if let Some(index) = BENCHMARK_NAMES.iter().position(|&name| name == arg) {
            selected.insert(index);
        } else {
            eprintln!("Warning: unknown benchmark '{}'", arg);
        }
    }

    selected
}

enum Command {
    Help,
    List,
    Run {
        options: Options,
        benchmarks: Vec<String>,
    },
}

fn parse_value<T: std::str::FromStr>(
    flag: &str,
    value: Option<String>,
) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value '{value}' for {flag}"))
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let mut options = Options::default();
    let mut benchmarks = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--list" | "-l" => return Ok(Command::List),
            "--from" => options.from = parse_value(&arg, args.next())?,
            "--to" => options.to = parse_value(&arg, args.next())?,
            "--epsilon" => options.epsilon = parse_value(&arg, args.next())?,
            "--threads" => options.threads = parse_value(&arg, args.next())?,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            _ => benchmarks.push(arg),
        }
    }

    if !options.from.is_finite() || !options.to.is_finite() {
        return Err("limits must be finite".to_string());
    }
    if !options.epsilon.is_finite() || options.epsilon < 0.0 {
        return Err("epsilon must be finite and non-negative".to_string());
    }

    Ok(Command::Run {
        options,
        benchmarks,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let (options, benchmark_args) = match parse_args(args) {
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::List) => {
            print_benchmark_list();
            return;
        }
        Ok(Command::Run {
            options,
            benchmarks,
        }) => (options, benchmarks),
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Use --help for usage.");
            std::process::exit(2);
        }
    };

    let selected = if benchmark_args.is_empty() {
        // Run all benchmarks if none specified
        (0..BENCHMARK_NAMES.len()).collect()
    } else {
        parse_benchmark_selection(&benchmark_args)
    };

    if selected.is_empty() {
        eprintln!("No valid benchmarks selected. Use --list to see available benchmarks.");
        return;
    }

    let mut rng = StdRng::seed_from_u64(7);
    let mut first = true;

    for i in 0..BENCHMARK_NAMES.len() {
        if selected.contains(&i) {
            if !first {
                println!();
            }
            first = false;

            info!(benchmark = BENCHMARK_NAMES[i], ?options, "starting benchmark");
            match i {
                0 => run_sin_inv_benchmark(&options),
                1 => run_scaling_benchmark(&options),
                2 => run_donation_benchmark(&mut rng, &options),
                _ => unreachable!(),
            }
        }
    }
}
