#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Adaptive trapezoidal integration on a pool of threads.
//!
//! An integral is computed by repeatedly bisecting `[a, b]` until the
//! trapezoidal estimate over each piece agrees with the estimate over its two
//! halves to a relative tolerance. The pieces are spread over worker threads
//! through a single shared stack: a busy worker hands surplus pieces over
//! whenever that stack runs dry, idle workers sleep until something arrives, and
//! the last worker to finish with an empty stack shuts everyone down.
//!
//! ```
//! use integral::sequential::integrate_recursive;
//!
//! let sin_inv = |x: f64| (1.0 / x).sin();
//! let value = integral::integrate(sin_inv, 0.01, 0.1, 1e-8, 4);
//! let reference = integrate_recursive(sin_inv, 0.01, 0.1, 1e-8);
//! assert!((value - reference).abs() <= 1e-10);
//! ```

mod concurrency;
mod error;
mod integrator;
mod kernel;
mod pool;
mod segment;
pub mod sequential;
mod stats;
#[cfg(test)]
mod test_utils;
mod worker;

pub use error::IntegralError;
pub use integrator::{DEFAULT_DONATION_THRESHOLD, Integrator, integrate};
pub use kernel::{Refinement, refine};
pub use segment::{Segment, trapezoid};
pub use stats::{IntegrationReport, WorkerStats};
