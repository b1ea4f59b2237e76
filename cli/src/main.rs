//! hearth server binary: `.env` + environment settings in, HTTP server out.
//!
//! A missing credential is fatal here and only here; once the server is up,
//! configuration never changes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(about = "hearth — cached weather/calendar backend for a small home display")]
struct Args {
    /// Bind address (overrides BIND_ADDR; default 127.0.0.1:8000)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,

    /// Debug-level logging (an explicit RUST_LOG still wins)
    #[arg(short, long)]
    verbose: bool,

    /// Do not spawn background refreshers; caches refresh on request only
    #[arg(long)]
    no_refresh: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // .env before logging so RUST_LOG from the file applies; the load result
    // is reported once the subscriber exists.
    let dotenv = config::load_and_apply(None);
    init_logging(args.verbose);
    if let Err(e) = dotenv {
        tracing::warn!("unable to load .env file: {e}");
    }

    let mut settings = match config::Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(addr) = args.addr {
        settings.bind_addr = addr;
    }
    if args.no_refresh {
        settings.refresh = false;
    }

    if let Err(e) = serve::run_serve(settings).await {
        tracing::error!("server: {e}");
        std::process::exit(1);
    }
}
