//! BGEO airdrop CLI: wallet session management and batch sends.

mod config;

use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bgeo_airdrop::{
    run_airdrop, AirdropReport, BatchOutcome, CancelController, PollProgress, PollerConfig,
    WalletSession,
};
use bgeo_gateway::GatewayClient;
use bgeo_utils::format_duration;
use bgeo_vault::FileCredentialStore;
use clap::Parser;
use tokio::sync::watch;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "bgeo", about = "BGEO batch airdrop tool")]
struct Cli {
    /// Gateway base URL.
    #[arg(long, env = "BGEO_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// API key forwarded on gateway passthrough calls.
    #[arg(long, env = "BGEO_API_KEY")]
    api_key: Option<String>,

    /// Directory the encrypted wallet record is stored in.
    #[arg(long, env = "BGEO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, env = "BGEO_LOG_JSON")]
    log_json: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Derive a wallet from a mnemonic and store it encrypted.
    Connect {
        /// Mnemonic phrase; prompted for when omitted.
        #[arg(long)]
        mnemonic: Option<String>,
    },
    /// Show the stored wallet and refresh its balance.
    Status,
    /// Refresh and print the wallet balance.
    Balance,
    /// Submit one recipient batch and wait for on-chain confirmation.
    Send {
        /// File of "address,amount" lines; "-" reads stdin.
        #[arg(long)]
        recipients: PathBuf,
        /// Seconds to wait for confirmation before giving up.
        #[arg(long, default_value_t = 300)]
        timeout: u32,
    },
    /// Remove the stored wallet.
    Disconnect,
    /// Forward a raw JSON-RPC method through the gateway.
    Gateway {
        /// Method name, e.g. "chain_getInfo".
        method: String,
        /// Parameters as a JSON value.
        #[arg(default_value = "null")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        bgeo_utils::init_tracing_json();
    } else {
        bgeo_utils::init_tracing();
    }

    let config = config::load(
        cli.config.as_deref(),
        config::Overrides {
            gateway_url: cli.gateway_url.clone(),
            api_key: cli.api_key.clone(),
            data_dir: cli.data_dir.clone(),
        },
    );

    let client = Arc::new(GatewayClient::new(
        config.gateway_url.as_str(),
        config.api_key.clone(),
    )?);
    let store = Arc::new(FileCredentialStore::new(&config.data_dir)?);
    let session = WalletSession::new(store, client.clone(), client.clone());

    // Pick up any wallet stored by an earlier run.
    session.restore().await?;

    match cli.command {
        Command::Connect { mnemonic } => connect(&session, mnemonic).await,
        Command::Status => status(&session).await,
        Command::Balance => balance(&session).await,
        Command::Send {
            recipients,
            timeout,
        } => send(&session, &recipients, timeout).await,
        Command::Disconnect => disconnect(&session).await,
        Command::Gateway { method, params } => gateway(&client, &method, &params).await,
    }
}

async fn connect(session: &WalletSession, mnemonic: Option<String>) -> anyhow::Result<()> {
    if session.is_connected().await {
        tracing::info!("replacing the stored wallet");
    }
    let mnemonic = obtain_mnemonic(mnemonic)?;
    let password = obtain_password("Password: ")?;
    session.connect(mnemonic.trim(), &password).await?;

    let address = session
        .address()
        .await
        .context("no address after connect")?;
    println!("Connected: {address}");
    println!("Balance:   {} BGEO", session.balance().await);
    Ok(())
}

async fn status(session: &WalletSession) -> anyhow::Result<()> {
    match session.address().await {
        Some(address) => {
            session.update_balance().await;
            println!("Address: {address}");
            println!("Balance: {} BGEO", session.balance().await);
        }
        None => println!("No wallet connected."),
    }
    Ok(())
}

async fn balance(session: &WalletSession) -> anyhow::Result<()> {
    anyhow::ensure!(
        session.is_connected().await,
        "no wallet connected; run `bgeo connect` first"
    );
    session.update_balance().await;
    println!("{} BGEO", session.balance().await);
    Ok(())
}

async fn send(session: &WalletSession, recipients_path: &Path, timeout: u32) -> anyhow::Result<()> {
    anyhow::ensure!(
        session.is_connected().await,
        "no wallet connected; run `bgeo connect` first"
    );

    let text = read_recipients(recipients_path)?;
    let parsed = bgeo_recipients::parse(&text);
    if !parsed.skipped.is_empty() {
        tracing::warn!(
            "skipped {} malformed line(s): {:?}",
            parsed.skipped.len(),
            parsed.skipped
        );
    }
    let recipients = parsed.set;
    anyhow::ensure!(
        !recipients.is_empty(),
        "no valid recipients in {}",
        recipients_path.display()
    );

    println!(
        "Sending {} BGEO to {} recipient(s).",
        recipients.total(),
        recipients.len()
    );
    let password = obtain_password("Wallet password: ")?;

    let cancel = Arc::new(CancelController::new());
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move { cancel.cancel_on_ctrl_c().await });
    }

    let poller_config = PollerConfig {
        max_attempts: timeout,
        interval: Duration::from_secs(1),
    };
    let (progress_tx, progress_rx) = watch::channel(PollProgress::start(poller_config.max_attempts));
    let printer = tokio::spawn(print_progress(progress_rx));

    let report = run_airdrop(
        session,
        &recipients,
        &password,
        poller_config,
        &cancel,
        &progress_tx,
    )
    .await?;

    drop(progress_tx);
    let _ = printer.await;

    render_report(&report, timeout);
    if let BatchOutcome::Rejected { .. } = report.outcome {
        anyhow::bail!("batch submission rejected");
    }
    Ok(())
}

async fn disconnect(session: &WalletSession) -> anyhow::Result<()> {
    if !session.is_connected().await {
        println!("No wallet connected.");
        return Ok(());
    }
    session.disconnect().await?;
    println!("Wallet disconnected.");
    Ok(())
}

async fn gateway(client: &GatewayClient, method: &str, params: &str) -> anyhow::Result<()> {
    let params: serde_json::Value = serde_json::from_str(params)
        .with_context(|| format!("parameters are not valid JSON: {params}"))?;
    let result = client.rpc(method, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn print_progress(mut rx: watch::Receiver<PollProgress>) {
    while rx.changed().await.is_ok() {
        let progress = *rx.borrow();
        print!(
            "\rWaiting for confirmation... {:>3.0}% ({}/{})",
            progress.percent(),
            progress.attempts,
            progress.max_attempts
        );
        let _ = std::io::stdout().flush();
    }
    println!();
}

fn render_report(report: &AirdropReport, timeout: u32) {
    match &report.outcome {
        BatchOutcome::Confirmed { attempts } => {
            println!("Confirmed: balance delta observed after {attempts} check(s).");
        }
        BatchOutcome::TimedOut => {
            println!(
                "No confirmation within {}; the batch may still settle. Check the explorer before resending.",
                format_duration(u64::from(timeout))
            );
        }
        BatchOutcome::Rejected { message } => {
            println!("Submission failed: {message}");
        }
        BatchOutcome::Cancelled => {
            println!("Cancelled. An already-submitted batch may still settle on chain.");
        }
        BatchOutcome::Superseded => {
            println!("The wallet session changed while waiting; the result was discarded.");
        }
    }

    if let Some(tx) = &report.transaction {
        println!(
            "Transaction: {} ({})",
            tx.tx_hash.short(),
            tx.tx_hash.explorer_url()
        );
    }

    println!();
    println!("{:<44} {:>16} {:>9}", "Recipient", "Amount", "Status");
    for outcome in &report.recipients {
        println!(
            "{:<44} {:>16} {:>9}",
            outcome.address, outcome.amount, outcome.status
        );
    }
}

fn obtain_mnemonic(provided: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    if let Some(mnemonic) = provided {
        return Ok(Zeroizing::new(mnemonic));
    }
    if let Ok(mnemonic) = std::env::var("BGEO_MNEMONIC") {
        return Ok(Zeroizing::new(mnemonic));
    }
    if atty::is(atty::Stream::Stdin) {
        let mnemonic =
            rpassword::prompt_password("Mnemonic: ").context("failed to read mnemonic")?;
        return Ok(Zeroizing::new(mnemonic));
    }
    anyhow::bail!("BGEO_MNEMONIC is required in non-interactive mode")
}

fn obtain_password(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(password) = std::env::var("BGEO_WALLET_PASSWORD") {
        return Ok(Zeroizing::new(password));
    }
    if atty::is(atty::Stream::Stdin) {
        let password = rpassword::prompt_password(prompt).context("failed to read password")?;
        return Ok(Zeroizing::new(password));
    }
    anyhow::bail!("BGEO_WALLET_PASSWORD is required in non-interactive mode")
}

fn read_recipients(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read recipients from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read recipients file {}", path.display()))
}
