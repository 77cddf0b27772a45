use crate::cmd::{deploy::DeployArgs, inspect::InspectArgs};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "derrick")]
#[command(version, about = "One-shot EVM contract deployments", long_about = None)]
pub struct DerrickCli {
    #[command(subcommand)]
    pub cmd: DerrickSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DerrickSubcommand {
    /// Deploy a compiled contract and wait for confirmations
    Deploy(DeployArgs),

    /// Show constructor signature and bytecode size of an artifact
    Inspect(InspectArgs),
}
