// Copyright 2025 polybench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The computational workloads being timed.
//!
//! Every function here is pure. Sizes are fixed by the harness, not by callers
//! of the binary.

/// Argument passed to [`fibonacci`] by the harness.
pub const FIBONACCI_N: u32 = 40;

/// Number of integers built and sorted by [`sort_reversed`].
pub const SORT_LEN: i32 = 100_000;

/// Upper bound handed to [`sieve_of_eratosthenes`].
pub const SIEVE_LIMIT: usize = 100_000;

/// Naive doubly recursive Fibonacci.
///
/// Exponential on purpose: the workload measures function call overhead, so it
/// must stay unmemoized.
pub fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

/// Builds `len, len - 1, ..., 1` and sorts it ascending in place.
pub fn sort_reversed(len: i32) -> Vec<i32> {
    let mut values: Vec<i32> = (1..=len).rev().collect();
    values.sort();
    values
}

/// All primes `<= limit`, ascending.
pub fn sieve_of_eratosthenes(limit: usize) -> Vec<usize> {
    if limit < 2 {
        return Vec::new();
    }

    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut i = 2;
    while i * i <= limit {
        if is_prime[i] {
            for multiple in (i * i..=limit).step_by(i) {
                is_prime[multiple] = false;
            }
        }
        i += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter_map(|(n, &prime)| prime.then_some(n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_base_cases() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
        assert_eq!(fibonacci(10), 55);
    }

    #[test]
    fn test_fibonacci_harness_input() {
        assert_eq!(fibonacci(FIBONACCI_N), 102_334_155);
    }

    #[test]
    fn test_sort_reversed_is_ascending_permutation() {
        let sorted = sort_reversed(SORT_LEN);
        assert_eq!(sorted.len(), SORT_LEN as usize);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        // 1..=len sorted is exactly the input multiset
        assert!(sorted.iter().copied().eq(1..=SORT_LEN));
    }

    #[test]
    fn test_sort_reversed_empty() {
        assert!(sort_reversed(0).is_empty());
    }

    #[test]
    fn test_sieve_small_limits() {
        assert_eq!(sieve_of_eratosthenes(0), Vec::<usize>::new());
        assert_eq!(sieve_of_eratosthenes(1), Vec::<usize>::new());
        assert_eq!(sieve_of_eratosthenes(2), vec![2]);
        assert_eq!(sieve_of_eratosthenes(10), vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_sieve_perfect_square_limit() {
        assert_eq!(sieve_of_eratosthenes(25), vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
        assert_eq!(sieve_of_eratosthenes(49).last(), Some(&47));
    }

    #[test]
    fn test_sieve_harness_limit() {
        let primes = sieve_of_eratosthenes(SIEVE_LIMIT);
        assert_eq!(primes.len(), 9592);
        assert_eq!(primes.last(), Some(&99_991));
    }
}
