use std::{path::PathBuf, time::Duration};

use alloy::{
    dyn_abi::{DynSolValue, Specifier},
    primitives::U256,
};
use clap::Parser;
use derrick_deploy::{
    Artifact, ArtifactStore, DeployOptions, Deployer, Network, RawContract, SignerConfig,
    first_signer,
};
use eyre::{Result, WrapErr, eyre};

#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Contract name matching a compiled artifact
    contract: String,

    /// Constructor arguments, in ABI order
    #[arg(long, num_args(1..), allow_hyphen_values = true, value_name = "ARGS")]
    constructor_args: Vec<String>,

    /// RPC endpoint of the target network
    #[arg(long, env = "ETH_RPC_URL", default_value = "http://localhost:8545")]
    rpc_url: String,

    /// Network label used when reporting the deployment
    #[arg(long, default_value = "local")]
    network: String,

    /// Raw private key of the deployer
    #[arg(long, env = "ETH_PRIVATE_KEY")]
    private_key: Option<String>,

    /// BIP-39 mnemonic of the deployer
    #[arg(long, env = "ETH_MNEMONIC", conflicts_with = "private_key")]
    mnemonic: Option<String>,

    /// Derivation index used with --mnemonic
    #[arg(long, default_value_t = 0)]
    mnemonic_index: u32,

    /// Directory holding compiled artifacts
    #[arg(long, default_value = "out")]
    artifacts: PathBuf,

    /// Blocks required on top of inclusion before the address is final
    #[arg(long, default_value_t = 1)]
    confirmations: u64,

    /// Upper bound on the confirmation wait, in seconds
    #[arg(long, env = "ETH_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Value to send with the creation, in wei (payable constructors)
    #[arg(long)]
    value: Option<U256>,

    /// Gas limit for the creation transaction
    #[arg(long)]
    gas_limit: Option<u64>,

    /// Transaction nonce
    #[arg(long)]
    nonce: Option<u64>,

    /// Use pre-EIP-1559 gas pricing
    #[arg(long)]
    legacy: bool,

    /// Gas price in wei (requires --legacy)
    #[arg(long, requires = "legacy")]
    gas_price: Option<u128>,

    /// Max fee per gas in wei
    #[arg(long, conflicts_with = "legacy")]
    max_fee: Option<u128>,

    /// Max priority fee per gas in wei
    #[arg(long, conflicts_with = "legacy")]
    priority_fee: Option<u128>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl DeployArgs {
    pub async fn run(self) -> Result<()> {
        let config = SignerConfig {
            private_keys: self.private_key.clone().into_iter().collect(),
            mnemonic: self.mnemonic.clone(),
            mnemonic_index: self.mnemonic_index,
        };
        let signer = first_signer(&config)?;

        // Resolve the artifact and parse arguments before touching the
        // network, so misconfigurations fail without a connection.
        let store = ArtifactStore::new(&self.artifacts);
        let artifact = store.get(&self.contract)?;
        let args = parse_constructor_args(&artifact, &self.constructor_args)?;

        let network = Network::connect(&self.network, &self.rpc_url, signer).await?;
        let options = DeployOptions {
            confirmations: self.confirmations,
            timeout: Duration::from_secs(self.timeout),
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            legacy: self.legacy,
            gas_price: self.gas_price,
            max_fee_per_gas: self.max_fee,
            max_priority_fee_per_gas: self.priority_fee,
            value: self.value,
        };
        let deployer = Deployer::new(network, store).with_options(options);

        let deployed = deployer
            .deploy::<RawContract>(&self.contract, &args)
            .await?;
        let report = &deployed.report;

        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("Network: {}", report.network);
            println!("Deployer: {}", report.deployer);
            println!("Deployed to: {}", report.address);
            println!("Transaction hash: {}", report.transaction_hash);
            if let Some(block) = report.block_number {
                println!("Included in block: {block}");
            }
        }

        Ok(())
    }
}

/// Parses raw argument strings against the artifact's constructor inputs.
fn parse_constructor_args(artifact: &Artifact, raw: &[String]) -> Result<Vec<DynSolValue>> {
    let Some(constructor) = artifact.abi.constructor() else {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        return Err(eyre!(
            "`{}` has no constructor but arguments were given",
            artifact.name
        ));
    };

    if constructor.inputs.len() != raw.len() {
        return Err(eyre!(
            "`{}` constructor takes {} argument(s), got {}",
            artifact.name,
            constructor.inputs.len(),
            raw.len()
        ));
    }

    constructor
        .inputs
        .iter()
        .zip(raw)
        .map(|(input, arg)| {
            let ty = input.resolve().wrap_err_with(|| {
                format!("could not resolve constructor input `{}`", input.name)
            })?;
            ty.coerce_str(arg).wrap_err_with(|| {
                format!(
                    "invalid value for `{}` (expected {})",
                    input.name,
                    ty.sol_type_name()
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    const WITH_CONSTRUCTOR: &str = r#"{
        "abi": [
            {
                "type": "constructor",
                "inputs": [
                    { "name": "cap", "type": "uint256", "internalType": "uint256" },
                    { "name": "owner", "type": "address", "internalType": "address" }
                ],
                "stateMutability": "nonpayable"
            }
        ],
        "bytecode": { "object": "0x6080" }
    }"#;

    #[test]
    fn can_parse_deploy() {
        let args = DeployArgs::parse_from([
            "derrick",
            "Vault",
            "--constructor-args",
            "1000",
            "0x0000000000000000000000000000000000000001",
            "--confirmations",
            "3",
            "--timeout",
            "120",
        ]);
        assert_eq!(args.contract, "Vault");
        assert_eq!(args.constructor_args.len(), 2);
        assert_eq!(args.confirmations, 3);
        assert_eq!(args.timeout, 120);
        assert!(!args.json);
    }

    #[test]
    fn coerces_constructor_args() {
        let artifact = Artifact::from_json("Vault", WITH_CONSTRUCTOR).unwrap();
        let values = parse_constructor_args(
            &artifact,
            &[
                "1000".to_string(),
                "0x4242424242424242424242424242424242424242".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(values[0], DynSolValue::Uint(U256::from(1000), 256));
        assert_eq!(
            values[1],
            DynSolValue::Address(Address::repeat_byte(0x42))
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let artifact = Artifact::from_json("Vault", WITH_CONSTRUCTOR).unwrap();
        let err = parse_constructor_args(&artifact, &["1000".to_string()]).unwrap_err();
        assert!(err.to_string().contains("takes 2 argument(s)"));
    }

    #[test]
    fn rejects_uncoercible_value() {
        let artifact = Artifact::from_json("Vault", WITH_CONSTRUCTOR).unwrap();
        let err = parse_constructor_args(
            &artifact,
            &["not-a-number".to_string(), "0x00".to_string()],
        )
        .unwrap_err();
        assert!(err.to_string().contains("`cap`"));
    }
}
