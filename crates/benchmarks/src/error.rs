// Copyright 2025 polybench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the benchmark crate.

use thiserror::Error;

/// Errors that can occur while producing or reading benchmark results.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// Reading or writing results failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A metric cannot be represented as a JSON number
    #[error("Non-finite {field} in result '{test_name}'")]
    NonFiniteMetric {
        /// Test the metric belongs to.
        test_name: String,
        /// Name of the offending field.
        field: &'static str,
    },

    /// An external language runner failed
    #[error("{language} runner failed: {message}")]
    External {
        /// Language of the runner.
        language: String,
        /// What went wrong.
        message: String,
    },
}

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchmarkError>;
