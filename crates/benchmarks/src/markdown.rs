//! Markdown output generation for benchmark results.
//!
//! This module renders the results table and the per-test language
//! comparison written by `polybench run`.

use crate::result::BenchmarkResult;
use std::fmt::Write;

/// Generate a markdown summary from benchmark results.
pub fn generate_summary(results: &[BenchmarkResult]) -> String {
    let mut output = String::new();

    writeln!(output, "# Benchmark Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Results").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Language | Test | Duration (ms) | Ops/sec |").unwrap();
    writeln!(output, "|----------|------|---------------|---------|").unwrap();

    for result in results {
        writeln!(
            output,
            "| {} | {} | {:.2} | {:.2} |",
            escape_cell(&result.language),
            escape_cell(&result.test_name),
            result.duration_ms,
            result.operations_per_second
        ).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total benchmarks: {}", results.len()).unwrap();

    output
}

/// Generate a per-test comparison, languages ranked fastest first.
pub fn generate_comparison(results: &[BenchmarkResult]) -> String {
    let mut output = String::new();

    writeln!(output, "# Language Comparison").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    for (test_name, mut group) in group_by_test(results) {
        group.sort_by(|a, b| a.duration_ms.total_cmp(&b.duration_ms));
        let fastest = group.first().map(|r| r.duration_ms).unwrap_or_default();

        writeln!(output, "## {}", test_name).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Rank | Language | Duration (ms) | Relative |").unwrap();
        writeln!(output, "|------|----------|---------------|----------|").unwrap();
        for (rank, result) in group.iter().enumerate() {
            writeln!(
                output,
                "| {} | {} | {:.2} | {} |",
                rank + 1,
                escape_cell(&result.language),
                result.duration_ms,
                relative(result.duration_ms, fastest)
            ).unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

/// Results grouped by test name, in first-seen order.
fn group_by_test(results: &[BenchmarkResult]) -> Vec<(&str, Vec<&BenchmarkResult>)> {
    let mut groups: Vec<(&str, Vec<&BenchmarkResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(name, _)| *name == result.test_name) {
            Some((_, group)) => group.push(result),
            None => groups.push((result.test_name.as_str(), vec![result])),
        }
    }
    groups
}

fn relative(duration_ms: f64, fastest_ms: f64) -> String {
    if fastest_ms > 0.0 {
        format!("{:.2}x", duration_ms / fastest_ms)
    } else if duration_ms > 0.0 {
        "n/a".to_string()
    } else {
        "1.00x".to_string()
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
