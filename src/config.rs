/// Argument value that selects enumeration mode instead of bridging.
pub const ENUMERATE_MODE: &str = "enumerate";

#[derive(clap::Parser, Debug, Clone)]
pub struct Config {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// hidraw device node to bridge, or the literal `enumerate` to
    /// list candidate nodes and exit.
    pub device: String,
}
