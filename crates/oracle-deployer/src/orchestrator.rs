//! The deployment procedure. Every step is awaited (including transaction
//! confirmation) before the next one starts because later steps use the
//! addresses resolved by earlier ones.

use {
    crate::{
        config::DeployParameters,
        deployments::Deployment,
        error::{Error, Result},
        traits::{
            AccountResolver,
            ContractClients,
            DeterministicDeployer,
            PriceOracleRegistry,
            TransactionWaiter,
        },
    },
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256},
    },
    std::sync::Arc,
};

pub const ORACLE_ROOT: &str = "UniswapTwapPriceOracleV2Root";
pub const ORACLE_IMPLEMENTATION: &str = "UniswapTwapPriceOracleV2";
pub const ORACLE_FACTORY: &str = contracts::alloy::UniswapTwapPriceOracleV2Factory::NAME;

/// Addresses resolved by a run and what it changed on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub root: Address,
    pub implementation: Address,
    pub factory: Address,
    pub oracle: Address,
    /// Whether this run deployed the pair oracle.
    pub oracle_deployed: bool,
    /// Tokens this run registered with the oracle.
    pub registered: Vec<Address>,
}

pub struct Orchestrator {
    accounts: Arc<dyn AccountResolver>,
    deployer: Arc<dyn DeterministicDeployer>,
    waiter: Arc<dyn TransactionWaiter>,
    contracts: Arc<dyn ContractClients>,
}

impl Orchestrator {
    pub fn new(
        accounts: Arc<dyn AccountResolver>,
        deployer: Arc<dyn DeterministicDeployer>,
        waiter: Arc<dyn TransactionWaiter>,
        contracts: Arc<dyn ContractClients>,
    ) -> Self {
        Self {
            accounts,
            deployer,
            waiter,
            contracts,
        }
    }

    pub async fn run(&self, params: &DeployParameters) -> Result<DeploymentReport> {
        let deployer = self.accounts.deployer();
        tracing::info!(?deployer, "deploying uniswap twap price oracle");

        let root = self
            .deploy(
                ORACLE_ROOT,
                deployer,
                params.salt,
                vec![DynSolValue::Address(params.wtoken)],
            )
            .await?;
        let implementation = self
            .deploy(ORACLE_IMPLEMENTATION, deployer, params.salt, vec![])
            .await?;
        let factory = self
            .deploy(
                ORACLE_FACTORY,
                deployer,
                params.salt,
                vec![
                    DynSolValue::Address(root.address),
                    DynSolValue::Address(implementation.address),
                    DynSolValue::Address(params.wtoken),
                ],
            )
            .await?;

        let oracle_factory = self.contracts.oracle_factory(deployer).await?;
        let existing = oracle_factory
            .oracles(params.uniswap_v2_factory, params.wtoken)
            .await?;
        let oracle_deployed = existing.is_zero();
        if oracle_deployed {
            let tx = oracle_factory
                .deploy(params.uniswap_v2_factory, params.wtoken)
                .await?;
            self.waiter.wait_for_confirmation(tx).await?;
        } else {
            tracing::info!(oracle = ?existing, "UniswapTwapPriceOracleV2 already deployed");
        }

        let oracle = oracle_factory
            .oracles(params.uniswap_v2_factory, params.wtoken)
            .await?;
        if oracle.is_zero() {
            return Err(Error::UnexpectedZeroAddress("pair oracle"));
        }
        tracing::info!(?oracle, base_token = ?params.wtoken, "resolved pair oracle");

        let registry = self.contracts.price_oracle_registry(deployer).await?;
        let registered = self
            .register_missing(registry.as_ref(), &params.underlyings, oracle)
            .await?;

        Ok(DeploymentReport {
            root: root.address,
            implementation: implementation.address,
            factory: factory.address,
            oracle,
            oracle_deployed,
            registered,
        })
    }

    async fn deploy(
        &self,
        name: &str,
        from: Address,
        salt: B256,
        args: Vec<DynSolValue>,
    ) -> Result<Deployment> {
        let deployment = self.deployer.deploy(name, from, salt, args).await?;
        tracing::info!(contract = name, address = ?deployment.address, "resolved deployment");
        if let Some(tx) = deployment.transaction_hash {
            self.waiter.wait_for_confirmation(tx).await?;
        }
        Ok(deployment)
    }

    /// Registers `oracle` for every token the registry has no oracle for yet
    /// and returns those tokens.
    async fn register_missing(
        &self,
        registry: &dyn PriceOracleRegistry,
        underlyings: &[Address],
        oracle: Address,
    ) -> Result<Vec<Address>> {
        let mut missing = Vec::new();
        for underlying in underlyings {
            if registry.oracles(*underlying).await?.is_zero() {
                missing.push(*underlying);
            }
        }
        if missing.is_empty() {
            tracing::info!(tokens = underlyings.len(), "all tokens already registered");
            return Ok(missing);
        }

        let oracles = oracle_list(missing.len(), oracle);
        let tx = registry.add(missing.clone(), oracles).await?;
        self.waiter.wait_for_confirmation(tx).await?;
        tracing::info!(tokens = ?missing, ?oracle, "master price oracle updated");
        Ok(missing)
    }
}

/// Oracle list submitted alongside `len` underlyings. All underlyings share
/// the one pair oracle, so every position holds the same address.
fn oracle_list(len: usize, oracle: Address) -> Vec<Address> {
    vec![oracle; len]
}
