//! ao-dispatch
//!
//! Signs one message with a local Arweave wallet and sends it to an ao
//! process through the messenger unit.
//!
//! ```text
//!   CLI args ──┐
//!              ├─▶ config ─▶ intent ─▶ wallet/signer ─▶ dispatcher ─▶ MU
//!   config.toml┘                                          │
//!                                       stdout: message id │ stderr: error
//! ```
//!
//! Exit status is 0 when the message was accepted and 1 otherwise.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ao_dispatch::ao::MuClient;
use ao_dispatch::config::{load_config, validate_config, ConfigError, DispatchConfig};
use ao_dispatch::dispatch::{self, DispatchOutcome, Invocation};
use ao_dispatch::message::{IntentCatalog, IntentSelection, Tag};
use ao_dispatch::observability::init_logging;

#[derive(Parser)]
#[command(name = "ao-dispatch")]
#[command(about = "Sign and send one message to an ao process", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Arweave JWK wallet file
    #[arg(short, long)]
    wallet: Option<PathBuf>,

    /// Target process id
    #[arg(short, long)]
    process: Option<String>,

    /// Intent to send (see --list-intents)
    #[arg(short, long)]
    intent: Option<String>,

    /// Extra tag appended after the intent's tags; repeatable
    #[arg(short, long = "tag", value_name = "NAME=VALUE")]
    tags: Vec<Tag>,

    /// Message data, replacing the intent's data
    #[arg(short, long)]
    data: Option<String>,

    /// 32-byte message anchor
    #[arg(long)]
    anchor: Option<String>,

    /// Messenger unit URL
    #[arg(long)]
    mu_url: Option<String>,

    /// Compute unit URL
    #[arg(long)]
    cu_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Fetch and print the evaluation result after sending
    #[arg(long)]
    result: bool,

    /// Print the available intents and exit
    #[arg(long)]
    list_intents: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file or default configuration.
    fn apply(&self, config: &mut DispatchConfig) {
        if let Some(wallet) = &self.wallet {
            config.wallet_path = wallet.clone();
        }
        if let Some(process) = &self.process {
            config.process = process.clone();
        }
        if let Some(intent) = &self.intent {
            config.intent = intent.clone();
        }
        if let Some(anchor) = &self.anchor {
            config.anchor = Some(anchor.clone());
        }
        if let Some(mu_url) = &self.mu_url {
            config.network.mu_url = mu_url.clone();
        }
        if let Some(cu_url) = &self.cu_url {
            config.network.cu_url = cu_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeouts.request_secs = timeout;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            report_abort(e.as_ref(), &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Print a pre-dispatch failure. The error text goes only to `err`.
fn report_abort<E: Write>(e: &dyn std::error::Error, err: &mut E) {
    tracing::error!("Aborted before dispatch");
    let _ = writeln!(err, "Error: {}", e);
}

async fn run(cli: Cli) -> Result<u8, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DispatchConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    let catalog = IntentCatalog::with_custom(&config.intents);
    if cli.list_intents {
        for (name, intent) in catalog.iter() {
            let tags: Vec<String> = intent.tags.iter().map(ToString::to_string).collect();
            println!("{:<18} {}", name, tags.join(" "));
        }
        return Ok(0);
    }

    let intent = catalog.resolve(&IntentSelection {
        name: config.intent.clone(),
        extra_tags: cli.tags.clone(),
        data: cli.data.clone(),
    })?;

    tracing::info!(
        intent = %intent.name,
        process = %config.process,
        mu_url = %config.network.mu_url,
        "ao-dispatch starting"
    );

    let invocation = Invocation {
        wallet_path: config.wallet_path.clone(),
        process: config.process.clone(),
        intent,
        anchor: config.anchor.clone(),
    };

    let client = MuClient::new(&config)?;
    let outcome = dispatch::run(&invocation, &client).await?;
    let mut code = dispatch::report(&outcome, &mut io::stdout().lock(), &mut io::stderr().lock())?;

    if let (true, DispatchOutcome::Delivered(id)) = (cli.result, &outcome) {
        match client.result(id, &config.process).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => {
                eprintln!("{}", e);
                code = 1;
            }
        }
    }

    Ok(code)
}
