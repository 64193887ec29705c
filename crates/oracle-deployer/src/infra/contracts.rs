//! Contract handles backed by the generated bindings.

use {
    crate::{
        deployments::Deployments,
        error::{Error, Result},
        traits::{ContractClients, OracleFactory, PriceOracleRegistry},
    },
    alloy::{
        primitives::{Address, TxHash},
        providers::DynProvider,
    },
    contracts::alloy::{MasterPriceOracle, UniswapTwapPriceOracleV2Factory},
};

/// Looks up contract addresses in the deployments store.
pub struct AlloyContracts {
    provider: DynProvider,
    deployments: Deployments,
    /// Takes precedence over the store's `MasterPriceOracle` record.
    master_price_oracle: Option<Address>,
}

impl AlloyContracts {
    pub fn new(
        provider: DynProvider,
        deployments: Deployments,
        master_price_oracle: Option<Address>,
    ) -> Self {
        Self {
            provider,
            deployments,
            master_price_oracle,
        }
    }
}

#[async_trait::async_trait]
impl ContractClients for AlloyContracts {
    async fn oracle_factory(&self, signer: Address) -> Result<Box<dyn OracleFactory>> {
        let address = self
            .deployments
            .address(UniswapTwapPriceOracleV2Factory::NAME)
            .await?;
        Ok(Box::new(AlloyOracleFactory {
            instance: UniswapTwapPriceOracleV2Factory::Instance::new(
                address,
                self.provider.clone(),
            ),
            signer,
        }))
    }

    async fn price_oracle_registry(&self, signer: Address) -> Result<Box<dyn PriceOracleRegistry>> {
        let address = match self.master_price_oracle {
            Some(address) => address,
            None => self.deployments.address(MasterPriceOracle::NAME).await?,
        };
        Ok(Box::new(AlloyPriceOracleRegistry {
            instance: MasterPriceOracle::Instance::new(address, self.provider.clone()),
            signer,
        }))
    }
}

struct AlloyOracleFactory {
    instance: UniswapTwapPriceOracleV2Factory::Instance,
    signer: Address,
}

#[async_trait::async_trait]
impl OracleFactory for AlloyOracleFactory {
    async fn oracles(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<Address> {
        Ok(self
            .instance
            .oracles(uniswap_v2_factory, base_token)
            .call()
            .await?)
    }

    async fn deploy(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<TxHash> {
        let pending = self
            .instance
            .deploy_call(uniswap_v2_factory, base_token)
            .from(self.signer)
            .send()
            .await?;
        tracing::debug!(tx = ?pending.tx_hash(), "sent pair oracle deployment");
        Ok(*pending.tx_hash())
    }
}

struct AlloyPriceOracleRegistry {
    instance: MasterPriceOracle::Instance,
    signer: Address,
}

#[async_trait::async_trait]
impl PriceOracleRegistry for AlloyPriceOracleRegistry {
    async fn oracles(&self, underlying: Address) -> Result<Address> {
        Ok(self.instance.oracles(underlying).call().await?)
    }

    async fn add(&self, underlyings: Vec<Address>, oracles: Vec<Address>) -> Result<TxHash> {
        if underlyings.len() != oracles.len() {
            return Err(Error::Config(format!(
                "{} underlyings but {} oracles",
                underlyings.len(),
                oracles.len()
            )));
        }
        let pending = self
            .instance
            .add(underlyings, oracles)
            .from(self.signer)
            .send()
            .await?;
        tracing::debug!(tx = ?pending.tx_hash(), "sent oracle registration");
        Ok(*pending.tx_hash())
    }
}
