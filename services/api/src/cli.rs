use crate::demo::{run_demo, run_scan, DemoArgs, ScanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dutyflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DutyFlow",
    about = "Analyze import/export records for duty drawback refunds",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze import (and optionally export) CSV files from disk
    Scan(ScanArgs),
    /// Run the full pipeline against a built-in sample dataset
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scan(args) => run_scan(args),
        Command::Demo(args) => run_demo(args),
    }
}
