//! quire command-line inspector
//!
//! Loads a CMS config and prints how paths resolve against it.
//!
//! Usage:
//!   quire --config cms.json resolve products/123/reviews
//!   quire --config cms.json top-nav

use anyhow::Result;
use clap::Parser;
use quire_cli::{Args, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&args).await?;
    println!("{output}");
    Ok(())
}
