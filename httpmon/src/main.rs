use clap::error::ErrorKind;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use httpmon::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use httpmon::signals::forward_termination_signals;
use httpmon::{Monitor, MonitorConfig};
use httpmon_client::HttpProber;

#[derive(Parser, Debug)]
#[command(name = "httpmon", about = "Real-time monitor of a HTTP server's throughput and latency")]
struct Args {
    /// URL to request
    #[arg(long)]
    url: String,

    /// Number of HTTP client threads
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY as u32, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: u32,

    /// HTTP client timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

fn main() {
    // --help starts no workers and exits with status 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            e.print().ok();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_tracing();

    let config = MonitorConfig {
        url: args.url,
        concurrency: args.concurrency as usize,
        timeout: Duration::from_secs(args.timeout),
    };

    if let Err(e) = config.validate() {
        eprintln!("error: {e}\n\nFor more information, try '--help'.");
        process::exit(2);
    }

    let (signal_tx, signal_rx) = mpsc::channel();
    if let Err(e) = forward_termination_signals(signal_tx) {
        eprintln!("httpmon failed: {e}");
        process::exit(3);
    }

    let url = config.url.clone();
    let timeout = config.timeout;
    let mut stderr = io::stderr();

    match Monitor::new(config).run(|_| HttpProber::new(&url, timeout), &signal_rx, &mut stderr) {
        Ok(summary) => {
            tracing::info!(
                reports = summary.totals.reports,
                requests = summary.totals.requests,
                errors = summary.totals.errors,
                "monitor finished"
            );
        }
        Err(e) => {
            eprintln!("httpmon failed: {e}");
            process::exit(3);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
