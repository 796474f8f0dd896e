pub mod bridge;
pub mod config;
pub mod device;
pub mod enumerate;
pub mod error;
pub mod etf;
pub mod framing;
pub mod proto;

mod fdio;

pub use bridge::Bridge;
pub use error::{Error, Result};

pub fn run(cfg: config::Config) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    let level = match cfg.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // stdout carries the event stream, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();

    if cfg.device == config::ENUMERATE_MODE {
        enumerate::run(std::io::stdout())?;
        return Ok(());
    }

    tracing::info!(device = %cfg.device, "Starting hidraw bridge");
    let device = device::Handle::open(std::path::Path::new(&cfg.device))?;
    Bridge::new(std::io::stdin(), device, std::io::stdout()).run()?;
    Ok(())
}
