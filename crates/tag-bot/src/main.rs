use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{CommandDispatcher, CommandListener, TagStore};
use domain::{GroupRoster, RegistryRepository, ReplySender};
use infrastructure::config::BotConfig;
use infrastructure::messaging::read_messages;
use infrastructure::{JsonLineReplySender, JsonRegistryRepository, StaticGroupRoster};

/// Inbound messages waiting for the dispatcher
const INBOUND_BUFFER: usize = 100;
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the registry data file
    #[arg(long)]
    data_file: Option<String>,

    /// Override the roster lookup timeout in seconds (0 disables it)
    #[arg(long)]
    collaborator_timeout_secs: Option<u64>,
}

async fn run() -> Result<()> {
    dotenv().ok();

    // Logs go to stderr, stdout carries the reply stream
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tag_bot=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // 1. Load Configuration
    info!(config_dir = %args.config_dir, "Loading configuration...");
    let mut config = BotConfig::load(&args.config_dir)?;

    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }
    if let Some(secs) = args.collaborator_timeout_secs {
        config.collaborator_timeout_secs = Some(secs);
    }

    info!("🤖 {} starting...", config.bot_name);
    info!("🆔 Process ID: {}", std::process::id());

    // 2. Tag registry
    info!("💾 Registry file: {}", config.storage.data_file);
    let repository: Arc<dyn RegistryRepository> =
        Arc::new(JsonRegistryRepository::new(&config.storage.data_file));
    let store = TagStore::open(repository).await;

    // 3. Group roster
    let roster = StaticGroupRoster::from_config(&config.groups);
    if roster.group_count() == 0 {
        warn!("No groups configured, every command will be refused");
    } else {
        info!(groups = roster.group_count(), "✅ Loaded group rosters");
    }
    let roster: Arc<dyn GroupRoster> = Arc::new(roster);

    // 4. Dispatcher and transport
    let dispatcher = Arc::new(CommandDispatcher::new(
        store,
        roster,
        config.collaborator_timeout(),
    ));
    let sender: Arc<dyn ReplySender> = Arc::new(JsonLineReplySender::stdout());

    let cancel_token = CancellationToken::new();
    let (tx, rx) = mpsc::channel(INBOUND_BUFFER);

    let reader_token = cancel_token.clone();
    let reader_handle = tokio::spawn(async move {
        if let Err(e) = read_messages(BufReader::new(tokio::io::stdin()), tx, reader_token).await {
            error!(error = %e, "Console reader failed");
        }
    });

    let listener = CommandListener::new(dispatcher, sender, cancel_token.clone());
    info!("✅ Bot is running, reading messages from stdin");

    tokio::select! {
        _ = listener.start(rx) => {}
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => info!("🛑 Shutting down..."),
            Err(err) => warn!(error = %err, "Unable to listen for shutdown signal"),
        },
    }

    cancel_token.cancel();
    reader_handle.abort();

    info!("👋 Good bye!");
    Ok(())
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start async runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(run());
    // A pending stdin read holds a blocking thread that never returns on its own
    rt.shutdown_timeout(SHUTDOWN_GRACE);

    if let Err(e) = result {
        eprintln!("\n❌ CRITICAL ERROR: {:?}", e);
        eprintln!("--------------------------------------------------");
        eprintln!("The bot stopped because of a fatal error.");
        std::process::exit(1);
    }
}
