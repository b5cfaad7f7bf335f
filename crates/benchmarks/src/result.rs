//! Benchmark result types.
//!
//! This module provides the `BenchmarkResult` record shared by the native
//! harness and the external language runners.

use crate::error::{BenchmarkError, Result};
use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::time::Duration;
use tracing::warn;

/// Language tag carried by every natively measured result.
pub const LANGUAGE: &str = "Rust";

/// One timed workload.
///
/// Metrics are written with exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Implementation that produced the measurement.
    pub language: String,
    /// Human-readable workload label.
    pub test_name: String,
    /// Elapsed wall-clock time in milliseconds.
    #[serde(
        serialize_with = "serialize_metric",
        deserialize_with = "deserialize_metric"
    )]
    pub duration_ms: f64,
    /// Workload units per elapsed second.
    #[serde(
        serialize_with = "serialize_metric",
        deserialize_with = "deserialize_metric"
    )]
    pub operations_per_second: f64,
}

impl BenchmarkResult {
    /// Create a new BenchmarkResult.
    pub fn new(
        language: impl Into<String>,
        test_name: impl Into<String>,
        duration_ms: f64,
        operations_per_second: f64,
    ) -> Self {
        Self {
            language: language.into(),
            test_name: test_name.into(),
            duration_ms,
            operations_per_second,
        }
    }

    /// Build a native result from a measured duration and the workload size.
    pub fn from_elapsed(test_name: impl Into<String>, workload_size: u64, elapsed: Duration) -> Self {
        let test_name = test_name.into();
        let operations_per_second = operations_per_second(workload_size, elapsed);
        if elapsed.is_zero() {
            warn!(test_name = %test_name, "elapsed time below clock resolution, reporting zero throughput");
        }
        Self {
            language: LANGUAGE.to_string(),
            test_name,
            duration_ms: elapsed.as_secs_f64() * 1000.0,
            operations_per_second,
        }
    }

    /// Check that both metrics can be written as JSON numbers.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("duration_ms", self.duration_ms),
            ("operations_per_second", self.operations_per_second),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(BenchmarkError::NonFiniteMetric {
                    test_name: self.test_name.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Results of one run together with the time they were collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResponse {
    /// Results in execution order.
    pub results: Vec<BenchmarkResult>,
    /// When the run finished, RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl BenchmarkResponse {
    /// Wrap `results`, stamped with the current time.
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        Self {
            results,
            timestamp: Utc::now(),
        }
    }
}

/// Throughput in units per second.
///
/// A zero elapsed time yields `0.0` instead of infinity.
pub fn operations_per_second(workload_size: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds == 0.0 {
        return 0.0;
    }
    workload_size as f64 / seconds
}

fn serialize_metric<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("cannot serialize non-finite metric {value}")));
    }
    let raw = RawValue::from_string(format!("{value:.2}")).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

// JavaScript runners emit `null` where they divided by zero.
fn deserialize_metric<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_throughput() {
        assert_eq!(operations_per_second(100_000, Duration::from_secs(2)), 50_000.0);
        assert_eq!(operations_per_second(1, Duration::from_millis(500)), 2.0);
    }

    #[test]
    fn test_zero_elapsed_reports_zero_throughput() {
        assert_eq!(operations_per_second(100_000, Duration::ZERO), 0.0);

        let result = BenchmarkResult::from_elapsed("Primes up to 100k", 100_000, Duration::ZERO);
        assert_eq!(result.duration_ms, 0.0);
        assert_eq!(result.operations_per_second, 0.0);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_from_elapsed_keeps_sub_millisecond_precision() {
        let result = BenchmarkResult::from_elapsed("Sort 100k integers", 100_000, Duration::from_micros(2_500));
        assert_eq!(result.language, LANGUAGE);
        assert!((result.duration_ms - 2.5).abs() < 1e-9);
        assert!((result.operations_per_second - 40_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_metrics_serialize_with_two_decimals() {
        let result = BenchmarkResult::new("Rust", "Fibonacci(40)", 412.0, 2.427184);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"language":"Rust","test_name":"Fibonacci(40)","duration_ms":412.00,"operations_per_second":2.43}"#
        );
    }

    #[test]
    fn test_non_finite_metric_rejected() {
        let result = BenchmarkResult::new("Java", "Sort 100k integers", 0.0, f64::INFINITY);
        assert!(matches!(
            result.validate(),
            Err(BenchmarkError::NonFiniteMetric { field: "operations_per_second", .. })
        ));
        assert!(serde_json::to_string(&result).is_err());
    }

    #[test]
    fn test_null_metric_reads_as_zero() {
        let json = r#"{"language":"JavaScript","test_name":"Sort 100k integers","duration_ms":0,"operations_per_second":null}"#;
        let result: BenchmarkResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.language, "JavaScript");
        assert_eq!(result.operations_per_second, 0.0);
    }

    #[test]
    fn test_response_envelope() {
        let response = BenchmarkResponse::new(vec![BenchmarkResult::new("Rust", "Fibonacci(40)", 1.0, 1.0)]);
        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();

        assert_eq!(value["results"].as_array().unwrap().len(), 1);
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(response.timestamp <= Utc::now());
    }

    #[test]
    fn test_special_characters_escaped() {
        let result = BenchmarkResult::new("C\"Sharp", "tab\there", 1.0, 1.0);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""language":"C\"Sharp""#));
        assert!(json.contains(r#""test_name":"tab\there""#));
        let back: BenchmarkResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
