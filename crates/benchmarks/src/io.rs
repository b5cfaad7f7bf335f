//! I/O operations for benchmark results.
//!
//! This module writes the stdout JSON line and the on-disk report set, and
//! reads result files back.

use crate::error::Result;
use crate::markdown;
use crate::result::BenchmarkResult;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output directory path.
pub const DEFAULT_OUTPUT_DIR: &str = "benchmarks/output";

/// Raw results subdirectory.
pub const RAW_DIR: &str = "raw";

/// Combined JSON file name.
pub const ALL_RESULTS_FILE: &str = "all_results.json";

/// Summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Per-test comparison file name.
pub const COMPARISON_FILE: &str = "comparison.md";

/// Compact JSON array terminated by a single newline.
pub fn to_json_line(results: &[BenchmarkResult]) -> Result<String> {
    for result in results {
        result.validate()?;
    }
    let mut line = serde_json::to_string(results)?;
    line.push('\n');
    Ok(line)
}

/// Write the compact JSON line to `writer` and flush it.
pub fn write_json_line<W: Write>(results: &[BenchmarkResult], mut writer: W) -> Result<()> {
    let line = to_json_line(results)?;
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write benchmark results to a pretty JSON file.
pub fn write_results_json(results: &[BenchmarkResult], path: impl AsRef<Path>) -> Result<()> {
    for result in results {
        result.validate()?;
    }
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read results from JSON file.
pub fn read_results_json(path: impl AsRef<Path>) -> Result<Vec<BenchmarkResult>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Filesystem-safe name for a result: `<language>_<test name>`, lowercased.
pub fn slug(result: &BenchmarkResult) -> String {
    let mut slug = String::new();
    for c in format!("{}_{}", result.language, result.test_name).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

/// Slugs for every result, suffixed `_2`, `_3`, ... where they collide.
pub fn unique_slugs(results: &[BenchmarkResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .map(|result| {
            let base = slug(result);
            let mut candidate = base.clone();
            let mut n = 1;
            while !seen.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{base}_{n}");
            }
            candidate
        })
        .collect()
}

/// Writes report files under one output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Create a writer rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory all reports are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure output directories exist.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(RAW_DIR))?;
        Ok(())
    }

    /// Write one JSON file per result plus the combined file.
    pub fn write_json(&self, results: &[BenchmarkResult]) -> Result<()> {
        self.ensure_output_dirs()?;

        for (result, name) in results.iter().zip(unique_slugs(results)) {
            let path = self.root.join(RAW_DIR).join(format!("{name}.json"));
            debug!(path = %path.display(), "writing raw result");
            result.validate()?;
            fs::write(path, serde_json::to_string_pretty(result)?)?;
        }

        write_results_json(results, self.root.join(ALL_RESULTS_FILE))
    }

    /// Write the markdown summary and comparison.
    pub fn write_markdown(&self, results: &[BenchmarkResult]) -> Result<()> {
        self.ensure_output_dirs()?;
        fs::write(self.root.join(SUMMARY_FILE), markdown::generate_summary(results))?;
        fs::write(self.root.join(COMPARISON_FILE), markdown::generate_comparison(results))?;
        Ok(())
    }

    /// Write all benchmark outputs (raw JSON and markdown).
    pub fn write_all(&self, results: &[BenchmarkResult]) -> Result<()> {
        self.write_json(results)?;
        self.write_markdown(results)
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
