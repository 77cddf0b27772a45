use clap::Parser;
use opts::{DerrickCli, DerrickSubcommand};

mod cmd;
mod opts;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = DerrickCli::parse();

    match args.cmd {
        DerrickSubcommand::Deploy(cmd) => cmd.run().await,
        DerrickSubcommand::Inspect(cmd) => cmd.run().await,
    }
}
