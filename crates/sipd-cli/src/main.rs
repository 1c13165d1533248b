use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod menu;
mod prompt;

#[derive(Parser)]
#[command(name = "sipd")]
#[command(author, version)]
#[command(
    about = "Interactive helper for the SIPD-RI penatausahaan portal",
    long_about = "Drives a real Chrome window against SIPD-RI: one interactive login kept \
                  alive through a cookie file, then batch report downloads and journal \
                  posting that the portal only offers one click at a time."
)]
struct Cli {
    /// Development mode: console logs at debug level and the
    /// env-credential login (SIPD_USERNAME / SIPD_PASSWORD)
    #[arg(long)]
    dev: bool,

    /// Run Chrome headless; only useful with a previously saved session,
    /// the interactive login needs a visible window
    #[arg(long)]
    headless: bool,

    /// Chrome executable to launch, auto-detected when omitted
    #[arg(long, value_name = "PATH")]
    chrome: Option<PathBuf>,

    /// Cookie file that keeps the login alive between runs
    #[arg(long, value_name = "FILE", default_value = sipd_core::session::DEFAULT_SESSION_FILE)]
    session: PathBuf,

    /// Root directory where dated report folders are created
    #[arg(long, value_name = "DIR", default_value = ".")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The guard flushes buffered log lines on exit; keep it for the whole run.
    let _log_guard = init_logging(cli.dev)?;
    tracing::info!("sipd {} starting (dev: {})", env!("CARGO_PKG_VERSION"), cli.dev);

    let ctx = commands::RunContext {
        dev: cli.dev,
        headless: cli.headless,
        chrome: cli.chrome,
        session: cli.session,
        output: cli.output,
    };
    menu::run(&ctx)
}

/// Logging always goes to a daily file under `logs/`; the console gets a
/// copy only in dev mode, so normal runs show just the menu and the
/// command status lines.
fn init_logging(dev: bool) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter = if dev {
        EnvFilter::new("sipd=debug,sipd_core=debug,sipd_browser=debug,sipd_bot=debug")
    } else {
        EnvFilter::new("sipd=info,sipd_core=info,sipd_browser=info,sipd_bot=info")
    };

    std::fs::create_dir_all("logs")?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily("logs", "sipd.log"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if dev {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .without_time(),
            )
            .init();
    } else {
        registry.init();
    }
    Ok(guard)
}
