//! One-shot deployment orchestration: submit the creation transaction,
//! wait for confirmations, hand back a typed contract instance.

use std::time::Duration;

use alloy::{
    dyn_abi::DynSolValue,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, B256, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
};
use tracing::debug;

use crate::{
    artifact::ArtifactStore,
    error::{DeployError, TxStatus},
    factory::ContractFactory,
    report::DeployReport,
};

/// The chain a deployment targets. Immutable for the duration of a
/// deployment call; concurrent deployments may share one `Network` since
/// nothing in it is mutated.
#[derive(Debug, Clone)]
pub struct Network {
    name: String,
    chain_id: u64,
    deployer: Address,
    provider: DynProvider,
}

impl Network {
    /// Connects a wallet-backed provider to `rpc_url` and pins the chain id.
    /// The signer stays inside the provider's wallet layer; this type only
    /// ever borrows its signing capability.
    pub async fn connect(
        name: impl Into<String>,
        rpc_url: &str,
        signer: PrivateKeySigner,
    ) -> Result<Self, DeployError> {
        let name = name.into();
        let deployer = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(rpc_url)
            .await?
            .erased();
        let chain_id = provider.get_chain_id().await?;
        debug!(network = %name, chain_id, %deployer, "connected");

        Ok(Self {
            name,
            chain_id,
            deployer,
            provider,
        })
    }

    /// Wraps a pre-built provider. The caller is responsible for attaching
    /// a wallet for `deployer`.
    pub fn new(
        name: impl Into<String>,
        chain_id: u64,
        deployer: Address,
        provider: DynProvider,
    ) -> Self {
        Self {
            name: name.into(),
            chain_id,
            deployer,
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The account that signs and pays for deployments.
    pub fn deployer(&self) -> Address {
        self.deployer
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

/// Knobs for a single deployment. Unset fields are filled from the chain
/// right before submission.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Blocks required on top of inclusion before the handle is released.
    /// Depth 0 skips the wait entirely.
    pub confirmations: u64,
    /// Upper bound on the confirmation wait.
    pub timeout: Duration,
    pub nonce: Option<u64>,
    pub gas_limit: Option<u64>,
    /// Use pre-EIP-1559 gas pricing.
    pub legacy: bool,
    /// Gas price in wei (legacy transactions only).
    pub gas_price: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    /// Value sent along with the creation (payable constructors).
    pub value: Option<U256>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Duration::from_secs(60),
            nonce: None,
            gas_limit: None,
            legacy: false,
            gas_price: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            value: None,
        }
    }
}

/// Typed view over a deployed contract. Instances are created only after
/// the creation transaction reached the configured confirmation depth, so
/// a partially-confirmed handle is never observable.
pub trait ContractHandle: Sized {
    fn at(address: Address, provider: DynProvider) -> Self;
}

/// Untyped handle: a bare address bound to the connected provider. Used
/// when no `sol!`-generated instance type is available.
#[derive(Debug, Clone)]
pub struct RawContract {
    address: Address,
    provider: DynProvider,
}

impl RawContract {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

impl ContractHandle for RawContract {
    fn at(address: Address, provider: DynProvider) -> Self {
        Self { address, provider }
    }
}

/// A confirmed deployment: the typed handle plus its provenance.
#[derive(Debug, Clone)]
pub struct Deployed<T> {
    pub contract: T,
    pub report: DeployReport,
}

/// Orchestrates one-shot deployments against a single network.
///
/// Each `deploy` call is independent: one creation transaction, at most
/// once, never retried. Failures surface to the caller with the error
/// taxonomy in [`DeployError`].
#[derive(Debug, Clone)]
pub struct Deployer {
    network: Network,
    artifacts: ArtifactStore,
    options: DeployOptions,
}

impl Deployer {
    pub fn new(network: Network, artifacts: ArtifactStore) -> Self {
        Self {
            network,
            artifacts,
            options: DeployOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DeployOptions) -> Self {
        self.options = options;
        self
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Deploys the named artifact and returns a typed handle to it.
    ///
    /// Artifact resolution and constructor-argument validation happen
    /// before anything touches the network; once the transaction is
    /// submitted the call suspends until the configured confirmation depth
    /// is observed or the timeout elapses.
    pub async fn deploy<T: ContractHandle>(
        &self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<Deployed<T>, DeployError> {
        let artifact = self.artifacts.get(name)?;
        let factory = ContractFactory::new(artifact);
        // Local validation and encoding; nothing submitted yet.
        let mut tx = factory.deploy_tx(args)?;

        let provider = self.network.provider();
        let deployer = self.network.deployer();
        tx.set_from(deployer);
        tx.set_chain_id(self.network.chain_id());

        let nonce = match self.options.nonce {
            Some(nonce) => nonce,
            None => provider.get_transaction_count(deployer).await?,
        };
        tx.set_nonce(nonce);

        if let Some(value) = self.options.value {
            tx.set_value(value);
        }

        let gas_limit = match self.options.gas_limit {
            Some(gas_limit) => gas_limit,
            None => provider.estimate_gas(tx.clone()).await?,
        };
        tx.set_gas_limit(gas_limit);

        if self.options.legacy {
            let gas_price = match self.options.gas_price {
                Some(gas_price) => gas_price,
                None => provider.get_gas_price().await?,
            };
            tx.set_gas_price(gas_price);
        } else {
            let (max_fee, priority_fee) = match (
                self.options.max_fee_per_gas,
                self.options.max_priority_fee_per_gas,
            ) {
                (Some(max_fee), Some(priority_fee)) => (max_fee, priority_fee),
                (max_fee, priority_fee) => {
                    let estimate = provider.estimate_eip1559_fees().await?;
                    (
                        max_fee.unwrap_or(estimate.max_fee_per_gas),
                        priority_fee.unwrap_or(estimate.max_priority_fee_per_gas),
                    )
                }
            };
            tx.set_max_fee_per_gas(max_fee);
            tx.set_max_priority_fee_per_gas(priority_fee);
        }

        debug!(contract = %name, %deployer, nonce, gas_limit, "submitting creation transaction");
        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();

        let (address, block_number) = if self.options.confirmations == 0 {
            // No wait: the CREATE address is a pure function of the sender
            // and nonce, fixed at submission time.
            (deployer.create(nonce), None)
        } else {
            let receipt = pending
                .with_required_confirmations(self.options.confirmations)
                .with_timeout(Some(self.options.timeout))
                .get_receipt()
                .await
                .map_err(|err| {
                    debug!(%tx_hash, %err, "confirmation wait failed");
                    DeployError::NotConfirmed {
                        tx_hash,
                        status: TxStatus::Pending,
                    }
                })?;
            finalize(tx_hash, &receipt)?
        };

        let report = DeployReport {
            contract: name.to_string(),
            network: self.network.name().to_string(),
            deployer,
            address,
            transaction_hash: tx_hash,
            block_number,
            confirmations: self.options.confirmations,
        };
        report.log();

        Ok(Deployed {
            contract: T::at(address, provider.clone()),
            report,
        })
    }
}

/// Extracts the deployed address out of a confirmed receipt, mapping the
/// failure modes onto the last-known transaction status.
fn finalize(
    tx_hash: B256,
    receipt: &TransactionReceipt,
) -> Result<(Address, Option<u64>), DeployError> {
    if !receipt.status() {
        return Err(DeployError::NotConfirmed {
            tx_hash,
            status: TxStatus::Reverted {
                gas_used: receipt.gas_used,
            },
        });
    }
    let address = receipt.contract_address.ok_or(DeployError::NotConfirmed {
        tx_hash,
        status: TxStatus::Dropped,
    })?;
    Ok((address, receipt.block_number))
}
