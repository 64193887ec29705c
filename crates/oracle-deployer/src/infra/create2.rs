//! Deterministic deployments through a CREATE2 proxy.
//!
//! The proxy takes `salt ++ init_code` as calldata and deploys the init code
//! with CREATE2, so the resulting address only depends on the proxy, the salt
//! and the init code (creation bytecode followed by the encoded constructor
//! arguments).

use {
    crate::{
        deployments::{Deployment, Deployments},
        error::{Error, Result},
        traits::DeterministicDeployer,
    },
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256, Bytes},
        providers::{DynProvider, Provider},
        rpc::types::TransactionRequest,
    },
    contracts::Artifact,
    std::path::PathBuf,
};

pub struct Create2Deployer {
    provider: DynProvider,
    proxy: Address,
    artifacts_dir: PathBuf,
    deployments: Deployments,
}

impl Create2Deployer {
    pub fn new(
        provider: DynProvider,
        proxy: Address,
        artifacts_dir: PathBuf,
        deployments: Deployments,
    ) -> Self {
        Self {
            provider,
            proxy,
            artifacts_dir,
            deployments,
        }
    }
}

/// Address the proxy deploys `init_code` to.
pub fn create2_address(proxy: Address, salt: B256, init_code: &[u8]) -> Address {
    proxy.create2_from_code(salt, init_code)
}

fn calldata(salt: B256, init_code: &[u8]) -> Bytes {
    [salt.as_slice(), init_code].concat().into()
}

#[async_trait::async_trait]
impl DeterministicDeployer for Create2Deployer {
    async fn deploy(
        &self,
        name: &str,
        from: Address,
        salt: B256,
        args: Vec<DynSolValue>,
    ) -> Result<Deployment> {
        let artifact = Artifact::load(&self.artifacts_dir, name)?;
        let init_code = artifact.init_code(&args)?;
        let address = create2_address(self.proxy, salt, &init_code);

        let transaction_hash = if self.provider.get_code_at(address).await?.is_empty() {
            if self.provider.get_code_at(self.proxy).await?.is_empty() {
                return Err(Error::Config(format!(
                    "no CREATE2 proxy deployed at {}",
                    self.proxy
                )));
            }
            let tx = TransactionRequest::default()
                .from(from)
                .to(self.proxy)
                .input(calldata(salt, &init_code).into());
            let pending = self.provider.send_transaction(tx).await?;
            tracing::debug!(contract = name, tx = ?pending.tx_hash(), "sent deployment");
            Some(*pending.tx_hash())
        } else {
            tracing::debug!(contract = name, ?address, "reusing existing deployment");
            None
        };

        let deployment = Deployment {
            name: name.to_string(),
            address,
            transaction_hash,
        };
        self.deployments.save(&deployment).await?;
        Ok(deployment)
    }
}
