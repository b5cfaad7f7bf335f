//! Cross-language micro-benchmarks.
//!
//! This crate times three fixed workloads (recursive Fibonacci, sorting a
//! reversed sequence, a prime sieve) and reports the results as JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use polybench_benchmarks::{io, run_native_benchmarks};
//!
//! let results = run_native_benchmarks();
//! io::write_json_line(&results, std::io::stdout().lock())?;
//! # Ok::<(), polybench_benchmarks::BenchmarkError>(())
//! ```
//!
//! # Modules
//!
//! - [`workloads`] - The timed computations
//! - [`harness`] - Sequential timing of each workload
//! - [`result`] - The `BenchmarkResult` record
//! - [`io`] - JSON output and report files
//! - [`markdown`] - Markdown report generation
//! - [`external`] - Runners for other language implementations

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod external;
pub mod harness;
pub mod io;
pub mod markdown;
pub mod result;
pub mod workloads;

pub use error::{BenchmarkError, Result};
pub use harness::{run_native_benchmarks, Workload};
pub use result::{BenchmarkResponse, BenchmarkResult};

use external::ExternalRunner;
use tracing::info;

/// Run the native workloads followed by `runners`.
///
/// Native results always come first, in workload order. Failing runners are
/// skipped.
pub fn run_all_benchmarks(runners: &[ExternalRunner]) -> Vec<BenchmarkResult> {
    let mut results = run_native_benchmarks();
    info!(count = results.len(), "native benchmarks finished");
    results.extend(external::run_external_benchmarks(runners));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_benchmarks_without_runners() {
        let results = run_all_benchmarks(&[]);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.language == result::LANGUAGE));
    }
}
