use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::LogCfg;

/// Log to stdout and to a daily-rotated file under `cfg.dir`.
/// Keep the returned guard alive for the lifetime of the process.
pub fn init_tracing_to_file(cfg: &LogCfg) -> WorkerGuard {
    let (writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&cfg.dir, "certify-server.log"));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    guard
}
