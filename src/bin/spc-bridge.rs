//! Command-line bridge: `spc-bridge <analysis_type> <json>`.
//!
//! Writes one JSON document to stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use serde_json::json;
use tracing::error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: spc-bridge <analysis_type> <json_data>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--version") {
        println!("spc-bridge {}", u_spc::VERSION);
        return ExitCode::SUCCESS;
    }
    let [kind, input] = args.as_slice() else {
        return fail(USAGE);
    };

    let encoded = u_spc::bridge::run(kind, input).and_then(|r| r.to_json_pretty());
    match encoded {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = %kind, "request rejected: {e}");
            fail(&e.to_string())
        }
    }
}

fn fail(message: &str) -> ExitCode {
    println!("{}", json!({ "error": message }));
    ExitCode::FAILURE
}
