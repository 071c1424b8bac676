mod api;
mod i18n;
mod ivr;
mod responder;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use vaani_core::config::{self, VaaniConfig};
use vaani_core::language;
use vaani_core::traits::ChatProvider;
use vaani_providers::build_provider;

use crate::responder::Responder;

#[derive(Parser)]
#[command(
    name = "vaani",
    version,
    about = "Vaani: multilingual voice IVR backed by a chat model"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Show configuration and check provider availability.
    Status,
    /// Send one utterance through the responder, as a caller would.
    Ask {
        /// Language code (en, hi, kn).
        #[arg(short, long, default_value = "en")]
        lang: String,
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _guard = init_logging(&cfg.vaani)?;
    match &cfg.source {
        Some(path) => tracing::debug!("config loaded from {}", path.display()),
        None => tracing::info!("config file not found at {}, using defaults", cli.config),
    }

    match cli.command {
        Commands::Serve => {
            let provider = build_provider(&cfg.provider)?;

            if provider.requires_api_key() && cfg.provider.api_key.trim().is_empty() {
                anyhow::bail!(
                    "provider '{}' needs an API key. Set provider.api_key in {} \
                     or the VAANI_API_KEY / GROQ_API_KEY env var.",
                    provider.name(),
                    cli.config
                );
            }

            if !provider.is_available().await {
                tracing::warn!(
                    "provider '{}' did not answer the availability probe; \
                     callers will hear the apology until it recovers",
                    provider.name()
                );
            }

            tracing::info!(
                "{} starting with {} ({})",
                cfg.vaani.name,
                provider.name(),
                provider.model()
            );

            let state = api::AppState::new(
                Responder::new(provider),
                cfg.telephony.clone(),
                &cfg.server,
            )?;
            api::serve(&cfg.server, state).await?;
        }
        Commands::Status => {
            println!("{}: Status Check\n", cfg.vaani.name);
            println!("Config: {}", cli.config);
            println!("Listen: {}", cfg.server.bind_addr());
            println!(
                "Callback base: {}",
                if cfg.telephony.callback_base_url.is_empty() {
                    "(relative)"
                } else {
                    cfg.telephony.callback_base_url.as_str()
                }
            );
            println!(
                "Languages: {}",
                language::LANGUAGE_OPTIONS
                    .iter()
                    .map(|o| format!("{}={}", o.digit, o.code))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!();

            let provider = build_provider(&cfg.provider)?;
            let key_state = if cfg.provider.api_key.trim().is_empty() {
                "missing"
            } else {
                "set"
            };
            println!("  provider: {} ({})", provider.name(), provider.model());
            println!("  api key: {key_state}");
            let available = provider.is_available().await;
            println!(
                "  reachable: {}",
                if available { "yes" } else { "no" }
            );
        }
        Commands::Ask { lang, message } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: vaani ask [--lang hi] <message>");
            }
            if !language::is_supported(&lang) {
                tracing::warn!("unsupported language '{lang}', answering with the generic prompt");
            }

            let prompt = message.join(" ");
            let provider: Arc<dyn ChatProvider> = build_provider(&cfg.provider)?;
            let reply = Responder::new(provider).respond(&prompt, &lang).await;

            println!("{}", reply.text);
            if let Some(e) = reply.failure() {
                eprintln!("(fallback reply, {}: {e})", e.kind());
            }
        }
    }

    Ok(())
}

/// Initialize tracing. With `log_dir` set, also writes a daily-rolled file;
/// the returned guard must live until exit to flush it.
fn init_logging(cfg: &VaaniConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match cfg.log_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            let dir = config::shellexpand(dir);
            std::fs::create_dir_all(&dir)
                .map_err(|e| anyhow::anyhow!("failed to create log dir {dir}: {e}"))?;
            let appender = tracing_appender::rolling::daily(&dir, "vaani.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            use tracing_subscriber::{fmt, prelude::*};
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            Ok(None)
        }
    }
}
