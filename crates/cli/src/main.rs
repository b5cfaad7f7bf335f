//! polybench CLI entry point.

fn main() {
    if let Err(e) = polybench_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
