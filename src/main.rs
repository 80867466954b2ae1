use anyhow::Result;
use clap::Parser;
use screentime::cli::{run_cli, Args};

fn main() -> Result<()> {
    run_cli(Args::parse())
}
