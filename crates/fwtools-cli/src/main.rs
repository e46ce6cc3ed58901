// crates/fwtools-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "fwtools-cli")]
#[command(about = "Firmware dump toolbox: cut, merge and swap raw binary images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cut per-page metadata out of one or more dumps
    Cut(cmd::cut::CutArgs),

    /// Merge equal-length dumps by interleaving bits/bytes/words/dwords
    Merge(cmd::merge::MergeArgs),

    /// Swap bits in bytes, bytes in words, words in dwords, ...
    Swap(cmd::swap::SwapArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Cut(args) => cmd::cut::run(args),
        Commands::Merge(args) => cmd::merge::run(args),
        Commands::Swap(args) => cmd::swap::run(args),
    }
}
