//! CLI for polybench.
//!
//! Running the binary without arguments times the native workloads and
//! prints one JSON line. The `run` subcommand additionally writes report
//! files and can merge results from other language runners, and `serve`
//! exposes the same run over HTTP.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod server;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use polybench_benchmarks::external::builtin_runners;
use polybench_benchmarks::io::{self, OutputWriter, DEFAULT_OUTPUT_DIR};
use polybench_benchmarks::{run_all_benchmarks, run_native_benchmarks, Workload};
use server::{ServerConfig, DEFAULT_ADDR, DEFAULT_STATIC_DIR};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// polybench CLI.
#[derive(Parser, Debug)]
#[command(name = "polybench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run. Without one, native results are printed.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Report formats written by `run`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw and combined JSON files.
    Json,
    /// Summary and comparison markdown.
    Markdown,
    /// Everything.
    Both,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmarks, print the JSON line and write reports.
    ///
    /// Reports land in the output directory:
    /// - raw/ - Individual JSON files per result
    /// - all_results.json - Combined JSON file
    /// - summary.md and comparison.md - Markdown reports
    Run {
        /// Output directory.
        #[arg(short, long, env = "POLYBENCH_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Which reports to write.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,

        /// Directory holding the python/, javascript/ and java/ runners.
        #[arg(short, long)]
        external: Option<PathBuf>,

        /// Verbose output.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Serve `GET /api/benchmark` and the static frontend over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,

        /// Directory served for non-API paths.
        #[arg(short, long, default_value = DEFAULT_STATIC_DIR)]
        static_dir: PathBuf,

        /// Directory holding the python/, javascript/ and java/ runners.
        #[arg(short, long)]
        external: Option<PathBuf>,
    },

    /// Show registered workloads and output locations.
    Status {
        /// Output directory to report.
        #[arg(short, long, env = "POLYBENCH_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Show detailed status information.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Run the CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Some(Commands::Run { verbose: true, .. }));
    init_tracing(verbose);

    let stdout = std::io::stdout();
    execute(cli, stdout.lock())
}

/// Install the stderr log subscriber. `RUST_LOG` wins unless `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute a parsed command, writing user-facing output to `out`.
pub fn execute<W: Write>(cli: Cli, mut out: W) -> anyhow::Result<()> {
    match cli.command {
        None => {
            let results = run_native_benchmarks();
            io::write_json_line(&results, out).context("failed to print results")?;
            Ok(())
        }
        Some(Commands::Run {
            output,
            format,
            external,
            verbose: _,
        }) => {
            let runners = external.map(builtin_runners).unwrap_or_default();
            let results = run_all_benchmarks(&runners);
            io::write_json_line(&results, &mut out).context("failed to print results")?;

            let writer = OutputWriter::new(output);
            match format {
                OutputFormat::Json => writer.write_json(&results),
                OutputFormat::Markdown => writer.write_markdown(&results),
                OutputFormat::Both => writer.write_all(&results),
            }
            .with_context(|| format!("failed to write reports to {}", writer.root().display()))?;

            info!(count = results.len(), dir = %writer.root().display(), "reports written");
            Ok(())
        }
        Some(Commands::Serve {
            addr,
            static_dir,
            external,
        }) => {
            let config = ServerConfig {
                addr,
                static_dir,
                runners: external.map(builtin_runners).unwrap_or_default(),
            };
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?
                .block_on(server::serve(config))
                .context("server failed")
        }
        Some(Commands::Status { output, detailed }) => {
            writeln!(out, "polybench")?;
            writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "\nWorkloads:")?;
            for workload in Workload::ALL {
                writeln!(out, "  - {} (size {})", workload.test_name(), workload.size())?;
            }

            if detailed {
                writeln!(out, "\nOutput directories:")?;
                writeln!(out, "  - {}", output.display())?;
                writeln!(out, "  - {}", output.join(io::RAW_DIR).display())?;
                writeln!(out, "\nOutput files:")?;
                for file in [io::ALL_RESULTS_FILE, io::SUMMARY_FILE, io::COMPARISON_FILE] {
                    writeln!(out, "  - {}", output.join(file).display())?;
                }
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_arguments_means_no_subcommand() {
        assert!(parse(&["polybench"]).command.is_none());
    }

    #[test]
    fn test_run_defaults() {
        match parse(&["polybench", "run"]).command {
            Some(Commands::Run { format, external, verbose, .. }) => {
                assert_eq!(format, OutputFormat::Both);
                assert!(external.is_none());
                assert!(!verbose);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["polybench", "run", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_status_lists_workloads() {
        let mut out = Vec::new();
        execute(parse(&["polybench", "status", "--detailed"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Fibonacci(40) (size 1)"));
        assert!(text.contains("Sort 100k integers (size 100000)"));
        assert!(text.contains("summary.md"));
    }

    #[test]
    fn test_status_reports_chosen_output_dir() {
        let mut out = Vec::new();
        execute(parse(&["polybench", "status", "-d", "-o", "reports/nightly"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = PathBuf::from("reports/nightly").join(io::SUMMARY_FILE);
        assert!(text.contains(&expected.display().to_string()));
        assert!(!text.contains(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_serve_defaults() {
        match parse(&["polybench", "serve"]).command {
            Some(Commands::Serve { addr, static_dir, external }) => {
                assert_eq!(addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
                assert_eq!(static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
                assert!(external.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["polybench", "serve", "--addr", "not-an-address"]).is_err());
    }

    #[test]
    fn test_default_prints_single_json_line() {
        let mut out = Vec::new();
        execute(parse(&["polybench"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[{\"language\":\"Rust\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn test_run_writes_json_reports_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().to_str().unwrap();
        let mut out = Vec::new();
        execute(parse(&["polybench", "run", "-o", output, "-f", "json"]), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
        assert!(dir.path().join(io::ALL_RESULTS_FILE).exists());
        assert!(dir.path().join(io::RAW_DIR).join("rust_primes_up_to_100k.json").exists());
        assert!(!dir.path().join(io::SUMMARY_FILE).exists());

        let back = io::read_results_json(dir.path().join(io::ALL_RESULTS_FILE)).unwrap();
        assert_eq!(back.len(), 3);
    }
}
