//! Creation-transaction assembly for a compiled artifact.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    network::TransactionBuilder,
    primitives::Bytes,
    rpc::types::TransactionRequest,
};

use crate::{artifact::Artifact, error::DeployError};

/// Produces contract-creation transactions for a single artifact.
///
/// Everything here is local computation: constructor arguments are
/// validated against the ABI and encoded into the creation payload before
/// any network round-trip happens.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: Artifact,
}

impl ContractFactory {
    pub fn new(artifact: Artifact) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Validates `args` against the constructor and assembles the creation
    /// request (`to = create`, input = bytecode ++ encoded args). Nothing is
    /// submitted here.
    pub fn deploy_tx(&self, args: &[DynSolValue]) -> Result<TransactionRequest, DeployError> {
        let code = self.creation_code(args)?;
        Ok(TransactionRequest::default().with_deploy_code(code))
    }

    fn creation_code(&self, args: &[DynSolValue]) -> Result<Bytes, DeployError> {
        let mismatch = |reason: String| DeployError::ConstructorArgMismatch {
            name: self.artifact.name.clone(),
            reason,
        };

        let constructor = match (self.artifact.abi.constructor(), args.is_empty()) {
            (None, true) => return Ok(self.artifact.bytecode.clone()),
            (None, false) => {
                return Err(mismatch(format!(
                    "contract has no constructor but {} argument(s) were given",
                    args.len()
                )));
            }
            (Some(constructor), _) => constructor,
        };

        if constructor.inputs.len() != args.len() {
            return Err(mismatch(format!(
                "constructor takes {} argument(s), got {}",
                constructor.inputs.len(),
                args.len()
            )));
        }

        for (input, value) in constructor.inputs.iter().zip(args) {
            let ty = input.resolve().map_err(|err| {
                mismatch(format!(
                    "cannot resolve constructor input `{}`: {err}",
                    input.name
                ))
            })?;
            if !ty.matches(value) {
                return Err(mismatch(format!(
                    "argument for `{}` is not a `{}`",
                    input.name,
                    ty.sol_type_name()
                )));
            }
        }

        let encoded = constructor
            .abi_encode_input(args)
            .map_err(|err| mismatch(err.to_string()))?;

        Ok(self
            .artifact
            .bytecode
            .iter()
            .copied()
            .chain(encoded)
            .collect())
    }
}
