// Copyright 2025 polybench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sequential timing harness for the native workloads.
//!
//! Each workload is timed with the monotonic clock, wrapped in a `debug`
//! span, and turned into a [`BenchmarkResult`] as soon as it returns.

use crate::result::BenchmarkResult;
use crate::workloads::{self, FIBONACCI_N, SIEVE_LIMIT, SORT_LEN};
use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span};

/// The registered workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Recursive Fibonacci of [`FIBONACCI_N`].
    Fibonacci,
    /// Build and sort [`SORT_LEN`] descending integers.
    Sort,
    /// Sieve of Eratosthenes up to [`SIEVE_LIMIT`].
    Primes,
}

impl Workload {
    /// Execution order, which is also output order.
    pub const ALL: [Workload; 3] = [Workload::Fibonacci, Workload::Sort, Workload::Primes];

    /// Label written to `test_name`.
    pub fn test_name(self) -> &'static str {
        match self {
            Workload::Fibonacci => "Fibonacci(40)",
            Workload::Sort => "Sort 100k integers",
            Workload::Primes => "Primes up to 100k",
        }
    }

    /// Units of work used for throughput. Fibonacci counts as a single unit.
    pub fn size(self) -> u64 {
        match self {
            Workload::Fibonacci => 1,
            Workload::Sort => SORT_LEN as u64,
            Workload::Primes => SIEVE_LIMIT as u64,
        }
    }

    /// Run the workload once and return how long it took.
    pub fn time(self) -> Duration {
        let start = Instant::now();
        match self {
            Workload::Fibonacci => {
                black_box(workloads::fibonacci(black_box(FIBONACCI_N)));
            }
            Workload::Sort => {
                black_box(workloads::sort_reversed(black_box(SORT_LEN)));
            }
            Workload::Primes => {
                black_box(workloads::sieve_of_eratosthenes(black_box(SIEVE_LIMIT)));
            }
        }
        start.elapsed()
    }

    /// Time the workload and record the result.
    pub fn measure(self) -> BenchmarkResult {
        let span = debug_span!("workload", test_name = self.test_name());
        let _enter = span.enter();

        let elapsed = self.time();
        let result = BenchmarkResult::from_elapsed(self.test_name(), self.size(), elapsed);
        debug!(
            duration_ms = result.duration_ms,
            operations_per_second = result.operations_per_second,
            "workload finished"
        );
        result
    }
}

/// Run every native workload in order.
pub fn run_native_benchmarks() -> Vec<BenchmarkResult> {
    Workload::ALL.iter().map(|workload| workload.measure()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_order_and_labels() {
        let names: Vec<_> = Workload::ALL.iter().map(|w| w.test_name()).collect();
        assert_eq!(names, ["Fibonacci(40)", "Sort 100k integers", "Primes up to 100k"]);
    }

    #[test]
    fn test_workload_sizes() {
        assert_eq!(Workload::Fibonacci.size(), 1);
        assert_eq!(Workload::Sort.size(), 100_000);
        assert_eq!(Workload::Primes.size(), 100_000);
    }

    #[test]
    fn test_measure_sort() {
        let result = Workload::Sort.measure();
        assert_eq!(result.language, "Rust");
        assert_eq!(result.test_name, "Sort 100k integers");
        assert!(result.duration_ms >= 0.0);
        assert!(result.operations_per_second.is_finite());
    }

    #[test]
    fn test_run_native_benchmarks() {
        let results = run_native_benchmarks();
        assert_eq!(results.len(), 3);
        for (result, workload) in results.iter().zip(Workload::ALL) {
            assert_eq!(result.test_name, workload.test_name());
            assert!(result.duration_ms >= 0.0);
            assert!(result.validate().is_ok());
        }
    }
}
