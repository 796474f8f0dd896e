use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cfg = hidport::config::Config::parse();
    hidport::run(cfg)
}
