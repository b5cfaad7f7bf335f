// Copyright 2025 polybench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runners for the same workloads implemented in other languages.
//!
//! A runner is a program whose stdout is a JSON array of
//! [`BenchmarkResult`]. Some runners need a preparation step (compiling the
//! Java sources, for example) before they can be executed.
//!
//! # Example
//!
//! ```no_run
//! use polybench_benchmarks::external::{builtin_runners, run_external_benchmarks};
//!
//! let runners = builtin_runners("benchmarks");
//! let results = run_external_benchmarks(&runners);
//! println!("{} external results", results.len());
//! ```

use crate::error::{BenchmarkError, Result};
use crate::result::BenchmarkResult;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// A single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to spawn.
    pub program: String,
    /// Arguments passed to it.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn output(&self) -> std::io::Result<Output> {
        Command::new(&self.program).args(&self.args).output()
    }
}

/// Benchmark program for another language.
#[derive(Debug, Clone)]
pub struct ExternalRunner {
    /// Language the program measures.
    pub language: String,
    /// Optional step run before `command`.
    pub prepare: Option<CommandSpec>,
    /// Command whose stdout holds the results.
    pub command: CommandSpec,
}

impl ExternalRunner {
    /// Create a runner without a preparation step.
    pub fn new(language: impl Into<String>, command: CommandSpec) -> Self {
        Self {
            language: language.into(),
            prepare: None,
            command,
        }
    }

    /// Run `prepare` before the main command.
    pub fn with_prepare(mut self, prepare: CommandSpec) -> Self {
        self.prepare = Some(prepare);
        self
    }

    /// Execute the runner and parse its results.
    pub fn run(&self) -> Result<Vec<BenchmarkResult>> {
        if let Some(prepare) = &self.prepare {
            debug!(language = %self.language, program = %prepare.program, "preparing runner");
            let output = prepare.output().map_err(|e| self.error(format!("{}: {e}", prepare.program)))?;
            self.check_status(&output)?;
        }

        debug!(language = %self.language, program = %self.command.program, "spawning runner");
        let output = self
            .command
            .output()
            .map_err(|e| self.error(format!("{}: {e}", self.command.program)))?;
        self.check_status(&output)?;

        let stdout = String::from_utf8(output.stdout).map_err(|e| self.error(e.to_string()))?;
        parse_runner_output(&stdout).map_err(|e| self.error(format!("invalid output: {e}")))
    }

    fn check_status(&self, output: &Output) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(self.error(format!("exited with {}: {}", output.status, stderr.trim())))
    }

    fn error(&self, message: String) -> BenchmarkError {
        BenchmarkError::External {
            language: self.language.clone(),
            message,
        }
    }
}

/// Parse a runner's stdout.
///
/// Bare `Infinity`, `-Infinity` and `NaN` tokens (what `printf("%.2f")`
/// prints after a division by zero) are read as `null`, which the result
/// reader turns into a zero metric.
pub fn parse_runner_output(stdout: &str) -> serde_json::Result<Vec<BenchmarkResult>> {
    serde_json::from_str(&null_non_finite(stdout.trim()))
}

fn null_non_finite(text: &str) -> String {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut in_string = false;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if c == '\\' {
                let escaped: String = rest.chars().take(2).collect();
                out.push_str(&escaped);
                rest = &rest[escaped.len()..];
                continue;
            }
            in_string = c != '"';
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Python, JavaScript and Java runners under `scripts_dir`.
///
/// `Benchmark.java` imports `com.google.gson.Gson`, so the gson jar has to be
/// reachable through `CLASSPATH` for the `javac` step to succeed. Without it
/// the Java runner is skipped like any other failing runner.
pub fn builtin_runners(scripts_dir: impl AsRef<Path>) -> Vec<ExternalRunner> {
    let dir = scripts_dir.as_ref();
    let path = |relative: &str| dir.join(relative).display().to_string();

    vec![
        ExternalRunner::new(
            "Python",
            CommandSpec::new("python3", [path("python/benchmark.py")]),
        ),
        ExternalRunner::new(
            "JavaScript",
            CommandSpec::new("node", [path("javascript/benchmark.js")]),
        ),
        ExternalRunner::new(
            "Java",
            CommandSpec::new("java", ["-cp".to_string(), path("java"), "Benchmark".to_string()]),
        )
        .with_prepare(CommandSpec::new("javac", [path("java/Benchmark.java")])),
    ]
}

/// Run every runner in order, skipping the ones that fail.
pub fn run_external_benchmarks(runners: &[ExternalRunner]) -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    for runner in runners {
        match runner.run() {
            Ok(found) => {
                info!(language = %runner.language, count = found.len(), "external runner finished");
                results.extend(found);
            }
            Err(e) => warn!(language = %runner.language, error = %e, "skipping external runner"),
        }
    }
    results
}
