//! Deployment provenance reporting.

use alloy::primitives::{Address, B256};
use serde::Serialize;
use tracing::info;

/// Read-only snapshot of a confirmed deployment: which address deployed
/// what, to which network, at which contract address.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub contract: String,
    pub network: String,
    pub deployer: Address,
    pub address: Address,
    pub transaction_hash: B256,
    /// Block the creation transaction was included in. `None` when the
    /// deployment ran at confirmation depth 0.
    pub block_number: Option<u64>,
    /// Confirmation depth the deployment waited for.
    pub confirmations: u64,
}

impl DeployReport {
    /// Human-readable record of the deployment.
    pub fn summary(&self) -> String {
        format!(
            "deployed `{}` to network '{}' at {} (deployer: {}, tx: {})",
            self.contract, self.network, self.address, self.deployer, self.transaction_hash
        )
    }

    /// Emits the summary through the tracing pipeline. Nothing is persisted
    /// beyond the process lifetime.
    pub fn log(&self) {
        info!(
            contract = %self.contract,
            network = %self.network,
            address = %self.address,
            deployer = %self.deployer,
            tx_hash = %self.transaction_hash,
            "contract deployed"
        );
    }
}

impl std::fmt::Display for DeployReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
