//! Homework status relay binary.
//!
//! Start the relay with:
//! ```bash
//! PRACTICUM_TOKEN=xxx TELEGRAM_TOKEN=yyy TELEGRAM_CHAT_ID=123 cargo run -p hwbot-telegram
//! ```

use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use hwbot_api::ApiClient;
use hwbot_telegram::{Config, StatusPoller, TelegramNotifier};

/// How many rotated log files to keep before the oldest is pruned.
const MAX_LOG_FILES: usize = 5;

/// Relay homework review status changes to a Telegram chat.
#[derive(Parser, Debug)]
#[command(name = "hwbot")]
#[command(about = "Polls the homework review API and notifies a Telegram chat")]
struct Args {
    /// Seconds between poll cycles
    #[arg(short, long, default_value = "600")]
    interval: u64,

    /// Start the query window at the Unix epoch instead of now
    #[arg(short, long)]
    backfill: bool,

    /// Directory for the rolling log file
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity: console plus a daily-rolled file.
    let filter = match args.verbose {
        0 => "hwbot_telegram=info,hwbot_api=info",
        1 => "hwbot_telegram=debug,hwbot_api=debug",
        2 => "hwbot_telegram=trace,hwbot_api=trace,teloxide=debug",
        _ => "trace",
    };

    let file_appender = build_file_appender(&args.log_dir)?;
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    // Missing credentials are the only fatal condition; the bot cannot even
    // be constructed without its token, so no notification is attempted.
    let config = match Config::from_env() {
        Ok(config) => config.with_poll_interval(Duration::from_secs(args.interval)),
        Err(e) => {
            tracing::error!(error = %e, "startup configuration is incomplete");
            return Err(e.into());
        }
    };

    let client = ApiClient::new(&config.practicum_token);
    let notifier = TelegramNotifier::new(&config);

    let cursor = if args.backfill {
        0
    } else {
        chrono::Utc::now().timestamp()
    };

    tracing::info!(
        cursor,
        interval_s = args.interval,
        chat_id = %config.chat_id,
        "relay starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut poller = StatusPoller::new(
        client,
        notifier,
        cursor,
        config.poll_interval,
        shutdown_rx,
    );

    let handle = tokio::spawn(async move {
        poller.run().await;
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");

    let _ = shutdown_tx.send(true);
    let _ = handle.await;

    Ok(())
}

/// Daily-rolled log file with a bounded backup count; once `MAX_LOG_FILES`
/// exist, the oldest is pruned on rotation.
fn build_file_appender(
    log_dir: &str,
) -> Result<tracing_appender::rolling::RollingFileAppender, tracing_appender::rolling::InitError> {
    tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("hwbot")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
}
