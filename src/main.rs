use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod canvas;
mod cli;
mod layout;
mod pac;
mod resolve;
mod workflow;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::RootArgs::parse();
    match args.command {
        cli::Command::Pull(args) => workflow::run_pull(args),
        cli::Command::List(args) => workflow::run_list(args),
    }
}
