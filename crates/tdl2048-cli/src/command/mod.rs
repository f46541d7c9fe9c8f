use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{play::PlayArg, train::TrainArg};
use crate::util;

mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log every episode
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play episodes and update the player's value network
    Train(#[clap(flatten)] TrainArg),
    /// Play episodes without learning or saving weights
    Play(#[clap(flatten)] PlayArg),
}

/// Options shared by every episode-running command.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1000)]
    total: usize,
    /// Episodes per statistics block
    #[arg(long, default_value_t = 1000)]
    block: usize,
    /// Player configuration, e.g. "name=learner alpha=0.1 save=weights.bin"
    #[arg(long, default_value = "")]
    play: String,
    /// Environment configuration, e.g. "seed=42"
    #[arg(long, default_value = "")]
    evil: String,
    /// Write a JSON run summary to this path (`-` for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_logger(args.verbose)?;
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}
