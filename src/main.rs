mod app;
mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    question_bank::init_tracing();
    let cli = cli::Cli::parse();
    app::run(&cli)
}
