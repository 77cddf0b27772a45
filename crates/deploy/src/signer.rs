//! Resolution of the account that signs and pays for the deployment.

use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English};

use crate::error::DeployError;

/// Locally-configured signing accounts: raw private keys and/or a BIP-39
/// mnemonic. Key material never leaves the resulting signer.
#[derive(Debug, Clone, Default)]
pub struct SignerConfig {
    /// Raw private keys, hex encoded (with or without `0x`).
    pub private_keys: Vec<String>,
    /// BIP-39 mnemonic phrase.
    pub mnemonic: Option<String>,
    /// Derivation index used with the mnemonic.
    pub mnemonic_index: u32,
}

/// Materializes every configured signer, private keys first.
/// Read-only; never touches the network.
pub fn resolve_signers(config: &SignerConfig) -> Result<Vec<PrivateKeySigner>, DeployError> {
    let invalid = |err: &dyn std::fmt::Display| DeployError::InvalidSigner {
        reason: err.to_string(),
    };

    let mut signers = Vec::new();
    for key in &config.private_keys {
        let signer: PrivateKeySigner = key
            .trim_start_matches("0x")
            .parse()
            .map_err(|err| invalid(&err))?;
        signers.push(signer);
    }

    if let Some(phrase) = &config.mnemonic {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.clone())
            .index(config.mnemonic_index)
            .map_err(|err| invalid(&err))?
            .build()
            .map_err(|err| invalid(&err))?;
        signers.push(signer);
    }

    Ok(signers)
}

/// The signer that will authorize the deployment: the first resolved
/// account. Fails with [`DeployError::NoSignerAvailable`] when the
/// environment exposes zero accounts.
pub fn first_signer(config: &SignerConfig) -> Result<PrivateKeySigner, DeployError> {
    resolve_signers(config)?
        .into_iter()
        .next()
        .ok_or(DeployError::NoSignerAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    // Account 0 of the well-known anvil/hardhat test mnemonic.
    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn expected_address() -> Address {
        TEST_ADDRESS.parse().unwrap()
    }

    #[test]
    fn empty_config_has_no_signer() {
        let err = first_signer(&SignerConfig::default()).unwrap_err();
        assert!(matches!(err, DeployError::NoSignerAvailable));
    }

    #[test]
    fn resolves_raw_private_key() {
        let config = SignerConfig {
            private_keys: vec![TEST_KEY.to_string()],
            ..Default::default()
        };
        let signer = first_signer(&config).unwrap();
        assert_eq!(signer.address(), expected_address());
    }

    #[test]
    fn resolves_mnemonic_at_index() {
        let config = SignerConfig {
            mnemonic: Some(TEST_MNEMONIC.to_string()),
            mnemonic_index: 0,
            ..Default::default()
        };
        let signer = first_signer(&config).unwrap();
        assert_eq!(signer.address(), expected_address());
    }

    #[test]
    fn private_keys_take_precedence_over_mnemonic() {
        let config = SignerConfig {
            private_keys: vec![TEST_KEY.to_string()],
            mnemonic: Some(TEST_MNEMONIC.to_string()),
            mnemonic_index: 3,
        };
        let signers = resolve_signers(&config).unwrap();
        assert_eq!(signers.len(), 2);
        assert_eq!(signers[0].address(), expected_address());
        assert_ne!(signers[1].address(), expected_address());
    }

    #[test]
    fn garbage_key_is_rejected() {
        let config = SignerConfig {
            private_keys: vec!["0xnothex".to_string()],
            ..Default::default()
        };
        let err = first_signer(&config).unwrap_err();
        assert!(matches!(err, DeployError::InvalidSigner { .. }));
    }
}
