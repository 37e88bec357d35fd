//! `userlist` command-line trigger.
//!
//! Runs one filtered query and prints the echo region followed by the result
//! region on stdout. Logs go to stderr and honour `RUST_LOG`.

mod args;

use anyhow::Context as _;
use args::Args;
use clap::Parser;
use std::io::Write as _;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use userlist_client::{Dispatcher, OutputRegion, UsersClient, ECHO_REGION_ID, RESULT_REGION_ID};
use userlist_core::highlight::pretty_print;

/// Region that prints every write on its own line of stdout.
struct StdoutRegion {
    id: &'static str,
}

impl OutputRegion for StdoutRegion {
    fn id(&self) -> &str {
        self.id
    }

    fn write(&self, content: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout has nowhere left to report to.
        let _ = writeln!(stdout, "{content}");
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    run(&args).await
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.config().context("invalid configuration")?;
    let client = UsersClient::from_config(&config).context("failed to build client")?;
    let form = args.form();

    if args.plain {
        let request = client.request_url(&form);
        let payload = client
            .fetch_json(&request)
            .await
            .with_context(|| format!("GET {request} failed"))?;
        println!("{request}");
        println!("{}", pretty_print(&payload)?);
        return Ok(());
    }

    let dispatcher = Dispatcher::new(
        Arc::new(client),
        Arc::new(StdoutRegion { id: ECHO_REGION_ID }),
        Arc::new(StdoutRegion {
            id: RESULT_REGION_ID,
        }),
    )
    .with_api_path(config.api_path.as_str());

    dispatcher
        .run(&form)
        .await
        .context("failed to fetch users")?;
    Ok(())
}
