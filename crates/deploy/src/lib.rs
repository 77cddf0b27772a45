//! One-shot EVM contract deployment orchestration.
//!
//! Given a compiled artifact and a wallet-backed network connection, this
//! crate resolves the artifact by name, validates and encodes constructor
//! arguments locally, submits the creation transaction, waits for the
//! configured confirmation depth and hands back a typed handle to the
//! deployed instance together with a provenance report.
//!
//! It deploys one contract, once, per call: no migration tracking, no
//! deployment registry, no automatic retries.

pub mod artifact;
pub mod deploy;
pub mod error;
pub mod factory;
pub mod report;
pub mod signer;

pub use artifact::{Artifact, ArtifactStore};
pub use deploy::{ContractHandle, DeployOptions, Deployed, Deployer, Network, RawContract};
pub use error::{DeployError, TxStatus};
pub use factory::ContractFactory;
pub use report::DeployReport;
pub use signer::{SignerConfig, first_signer, resolve_signers};
