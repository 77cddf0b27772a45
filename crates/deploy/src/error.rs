//! Failure taxonomy for one-shot deployments.

use std::path::PathBuf;

use alloy::{primitives::B256, transports::TransportError};

/// Everything that can go wrong between "deploy this artifact" and a
/// confirmed on-chain address. No variant is retried by this crate;
/// deployment is an at-most-once operation and recovery is the caller's
/// decision.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The environment exposes zero accounts capable of signing.
    #[error("no signer available; configure a private key or mnemonic")]
    NoSignerAvailable,

    /// Signer material was configured but could not be turned into a key.
    #[error("invalid signer configuration: {reason}")]
    InvalidSigner { reason: String },

    /// No compiled artifact matches the requested contract name.
    #[error("no artifact named `{name}` under {}; run the build or check the name", .dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },

    /// The artifact exists but its build output is unusable.
    #[error("artifact `{name}` is unusable: {reason}")]
    InvalidArtifact { name: String, reason: String },

    /// Caller-supplied constructor arguments disagree with the ABI.
    /// Raised before anything is submitted to the network.
    #[error("constructor arguments do not match `{name}`: {reason}")]
    ConstructorArgMismatch { name: String, reason: String },

    /// The creation transaction was submitted but never reached the
    /// configured confirmation depth. Carries the last-known status so the
    /// caller can investigate out of band.
    #[error("deployment {tx_hash} not confirmed: {status}")]
    NotConfirmed { tx_hash: B256, status: TxStatus },

    #[error(transparent)]
    Rpc(#[from] TransportError),
}

/// Last-known status of a submitted creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// No receipt observed within the wait window.
    Pending,
    /// Mined, but execution reverted.
    Reverted { gas_used: u64 },
    /// A receipt exists but carries no contract address.
    Dropped,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "still pending after the configured timeout"),
            Self::Reverted { gas_used } => write!(f, "reverted (gas used: {gas_used})"),
            Self::Dropped => write!(f, "mined without a contract address"),
        }
    }
}
