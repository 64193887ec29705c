//! Trait definitions for external system boundaries.
//!
//! These traits abstract the deployment framework and the deployed contracts
//! so the orchestration can be unit tested with mocks and an in-memory chain.

use {
    crate::{deployments::Deployment, error::Result},
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256, TxHash},
    },
};

/// Resolves the accounts the deployment acts as.
#[cfg_attr(test, mockall::automock)]
pub trait AccountResolver: Send + Sync {
    /// The account that sends every deployment and configuration transaction.
    fn deployer(&self) -> Address;
}

/// Deploys contracts to addresses derived from the salt, the bytecode and the
/// constructor arguments.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeterministicDeployer: Send + Sync {
    /// Resolves the deterministic address of contract `name` and deploys it
    /// if there is no code at that address yet.
    ///
    /// Calling this twice with the same `(name, salt, args)` yields the same
    /// address and sends at most one transaction. The returned transaction
    /// hash is only set if a transaction was sent; it is not awaited.
    async fn deploy(
        &self,
        name: &str,
        from: Address,
        salt: B256,
        args: Vec<DynSolValue>,
    ) -> Result<Deployment>;
}

/// Blocks until a transaction is final enough to build on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TransactionWaiter: Send + Sync {
    /// Fails if the transaction reverted or is not confirmed in time.
    async fn wait_for_confirmation(&self, tx: TxHash) -> Result<()>;
}

/// The `UniswapTwapPriceOracleV2Factory` contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OracleFactory: Send + Sync {
    /// Oracle for the pair, or [`Address::ZERO`] if none was deployed.
    async fn oracles(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<Address>;

    /// Sends the transaction deploying the oracle for the pair.
    async fn deploy(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<TxHash>;
}

/// The `MasterPriceOracle` registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PriceOracleRegistry: Send + Sync {
    /// Oracle registered for `underlying`, or [`Address::ZERO`].
    async fn oracles(&self, underlying: Address) -> Result<Address>;

    /// Sends the transaction registering `oracles[i]` for `underlyings[i]`.
    /// Both lists must have the same length.
    async fn add(&self, underlyings: Vec<Address>, oracles: Vec<Address>) -> Result<TxHash>;
}

/// Hands out contract handles by name, acting as `signer` for state changing
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContractClients: Send + Sync {
    async fn oracle_factory(&self, signer: Address) -> Result<Box<dyn OracleFactory>>;

    async fn price_oracle_registry(&self, signer: Address) -> Result<Box<dyn PriceOracleRegistry>>;
}
