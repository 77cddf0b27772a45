//! Compiled contract artifacts and their on-disk resolution.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::error::DeployError;

/// Compiled bytecode plus interface description for a named contract.
/// Immutable once loaded; resolved once per deployment call.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub abi: JsonAbi,
    /// Creation (init) bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: RawBytecode,
}

/// Foundry wraps the creation code in an object, Hardhat emits it as a
/// plain hex string. Both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Plain(String),
    Object { object: String },
}

impl Artifact {
    /// Parses a compiler artifact (Foundry or Hardhat layout).
    pub fn from_json(name: &str, json: &str) -> Result<Self, DeployError> {
        let invalid = |reason: String| DeployError::InvalidArtifact {
            name: name.to_string(),
            reason,
        };

        let raw: RawArtifact = serde_json::from_str(json).map_err(|err| invalid(err.to_string()))?;
        let object = match raw.bytecode {
            RawBytecode::Plain(object) | RawBytecode::Object { object } => object,
        };

        // Unlinked libraries leave `__$...$__` placeholders in the creation
        // code. A one-shot deployer cannot resolve them.
        if object.contains("__") {
            return Err(invalid(
                "bytecode contains unresolved link references; deploy and link libraries first"
                    .to_string(),
            ));
        }

        let bytecode: Bytes = const_hex::decode(&object)
            .map_err(|err| invalid(format!("bytecode is not valid hex: {err}")))?
            .into();
        if bytecode.is_empty() {
            return Err(invalid(
                "artifact has no creation bytecode (interface or abstract contract?)".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            abi: raw.abi,
            bytecode,
        })
    }
}

/// Resolves artifacts by contract name from a build output directory.
/// Purely local; never touches the network.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks the contract up in the Foundry `out/` layout
    /// (`Name.sol/Name.json`) first, then as a flat `Name.json`.
    pub fn get(&self, name: &str) -> Result<Artifact, DeployError> {
        let candidates = [
            self.root.join(format!("{name}.sol")).join(format!("{name}.json")),
            self.root.join(format!("{name}.json")),
        ];

        for path in candidates {
            if path.is_file() {
                let json = fs::read_to_string(&path).map_err(|err| DeployError::InvalidArtifact {
                    name: name.to_string(),
                    reason: format!("failed to read {}: {err}", path.display()),
                })?;
                return Artifact::from_json(name, &json);
            }
        }

        Err(DeployError::ArtifactNotFound {
            name: name.to_string(),
            dir: self.root.clone(),
        })
    }
}
