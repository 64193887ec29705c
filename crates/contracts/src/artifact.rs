//! Hardhat style build artifacts. Only the fields needed to deploy a contract
//! are read, everything else in the file is ignored.

use {
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        json_abi::JsonAbi,
        primitives::Bytes,
    },
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::path::Path,
};

#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode.
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    abi: JsonAbi,
    bytecode: String,
}

impl Artifact {
    /// Reads `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{name}.json"));
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read artifact {path:?}"))?;
        let artifact = Self::from_json(&json).with_context(|| format!("invalid artifact {path:?}"))?;
        ensure!(
            artifact.contract_name == name,
            "artifact {path:?} contains contract {:?}",
            artifact.contract_name
        );
        Ok(artifact)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        // The compiler leaves `__$<hash>$__` placeholders where library
        // addresses have to be linked in.
        ensure!(
            !raw.bytecode.contains("__"),
            "bytecode of {} has unlinked library references",
            raw.contract_name
        );
        let bytecode = Bytes::from(const_hex::decode(raw.bytecode.trim())?);
        ensure!(
            !bytecode.is_empty(),
            "{} has no creation bytecode (abstract contract or interface?)",
            raw.contract_name
        );

        Ok(Self {
            contract_name: raw.contract_name,
            abi: raw.abi,
            bytecode,
        })
    }

    /// Creation bytecode followed by the ABI encoded constructor arguments.
    /// The arguments are type checked against the constructor in the ABI.
    pub fn init_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let encoded_args = match self.abi.constructor() {
            Some(constructor) => constructor
                .abi_encode_input(args)
                .with_context(|| format!("bad constructor arguments for {}", self.contract_name))?,
            None => {
                ensure!(
                    args.is_empty(),
                    "{} has no constructor but {} arguments were given",
                    self.contract_name,
                    args.len()
                );
                Vec::new()
            }
        };

        let mut init_code = self.bytecode.to_vec();
        init_code.extend(encoded_args);
        Ok(init_code.into())
    }
}
