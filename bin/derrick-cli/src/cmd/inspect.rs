use std::path::PathBuf;

use alloy::json_abi::StateMutability;
use clap::Parser;
use derrick_deploy::ArtifactStore;
use eyre::Result;

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Contract name matching a compiled artifact
    contract: String,

    /// Directory holding compiled artifacts
    #[arg(long, default_value = "out")]
    artifacts: PathBuf,
}

impl InspectArgs {
    pub async fn run(self) -> Result<()> {
        let artifact = ArtifactStore::new(&self.artifacts).get(&self.contract)?;

        println!("Artifact: {}", artifact.name);
        println!("Creation bytecode: {} bytes", artifact.bytecode.len());

        match artifact.abi.constructor() {
            Some(constructor) if !constructor.inputs.is_empty() => {
                let payable = matches!(constructor.state_mutability, StateMutability::Payable);
                println!(
                    "Constructor{}:",
                    if payable { " (payable)" } else { "" }
                );
                for input in &constructor.inputs {
                    println!("  {}: {}", input.name, input.ty);
                }
            }
            _ => println!("Constructor: none (zero-argument deploy)"),
        }

        Ok(())
    }
}
