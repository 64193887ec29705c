//! In-memory chain implementing every boundary trait. Contracts exist as soon
//! as the transaction creating them is sent; the waiter only records which
//! transactions were awaited.

use {
    crate::{
        deployments::Deployment,
        error::{Error, Result},
        infra::SignerAccounts,
        orchestrator::Orchestrator,
        traits::{
            ContractClients,
            DeterministicDeployer,
            OracleFactory,
            PriceOracleRegistry,
            TransactionWaiter,
        },
    },
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256, TxHash, keccak256},
    },
    std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    },
};

#[derive(Default)]
struct State {
    code: HashSet<Address>,
    sent: Vec<TxHash>,
    confirmed: HashSet<TxHash>,
    deployments_sent: usize,
    pair_oracles: HashMap<(Address, Address), Address>,
    oracle_deploy_calls: usize,
    registered: HashMap<Address, Address>,
    add_calls: Vec<(Vec<Address>, Vec<Address>)>,
}

impl State {
    fn send(&mut self) -> TxHash {
        let tx = keccak256((self.sent.len() as u64).to_be_bytes());
        self.sent.push(tx);
        tx
    }
}

#[derive(Clone)]
pub struct FakeChain {
    /// Address the factory deploys pair oracles to.
    oracle: Address,
    state: Arc<Mutex<State>>,
}

impl FakeChain {
    pub fn new(oracle: Address) -> Self {
        Self {
            oracle,
            state: Default::default(),
        }
    }

    pub fn orchestrator(&self, deployer: Address) -> Orchestrator {
        Orchestrator::new(
            Arc::new(SignerAccounts::new(deployer)),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
        )
    }

    pub fn deployments_sent(&self) -> usize {
        self.state.lock().unwrap().deployments_sent
    }

    pub fn oracle_deploy_calls(&self) -> usize {
        self.state.lock().unwrap().oracle_deploy_calls
    }

    pub fn registry_add_calls(&self) -> Vec<(Vec<Address>, Vec<Address>)> {
        self.state.lock().unwrap().add_calls.clone()
    }

    pub fn all_transactions_confirmed(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.sent.iter().all(|tx| state.confirmed.contains(tx))
    }
}

#[async_trait::async_trait]
impl DeterministicDeployer for FakeChain {
    async fn deploy(
        &self,
        name: &str,
        _: Address,
        salt: B256,
        args: Vec<DynSolValue>,
    ) -> Result<Deployment> {
        let encoded_args = DynSolValue::Tuple(args).abi_encode_params();
        let address = Address::from_word(keccak256(
            [name.as_bytes(), salt.as_slice(), &encoded_args].concat(),
        ));

        let mut state = self.state.lock().unwrap();
        let transaction_hash = if state.code.insert(address) {
            state.deployments_sent += 1;
            Some(state.send())
        } else {
            None
        };
        Ok(Deployment {
            name: name.to_string(),
            address,
            transaction_hash,
        })
    }
}

#[async_trait::async_trait]
impl TransactionWaiter for FakeChain {
    async fn wait_for_confirmation(&self, tx: TxHash) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.sent.contains(&tx) {
            return Err(Error::Node(anyhow::anyhow!("unknown transaction {tx}")));
        }
        state.confirmed.insert(tx);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContractClients for FakeChain {
    async fn oracle_factory(&self, _: Address) -> Result<Box<dyn OracleFactory>> {
        Ok(Box::new(self.clone()))
    }

    async fn price_oracle_registry(&self, _: Address) -> Result<Box<dyn PriceOracleRegistry>> {
        Ok(Box::new(FakeRegistry(self.clone())))
    }
}

#[async_trait::async_trait]
impl OracleFactory for FakeChain {
    async fn oracles(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<Address> {
        let state = self.state.lock().unwrap();
        Ok(state
            .pair_oracles
            .get(&(uniswap_v2_factory, base_token))
            .copied()
            .unwrap_or_default())
    }

    async fn deploy(&self, uniswap_v2_factory: Address, base_token: Address) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        if state
            .pair_oracles
            .insert((uniswap_v2_factory, base_token), self.oracle)
            .is_some()
        {
            return Err(Error::Reverted("oracle already deployed".into()));
        }
        state.oracle_deploy_calls += 1;
        Ok(state.send())
    }
}

/// Wrapper so the registry's `oracles` does not clash with the factory's.
struct FakeRegistry(FakeChain);

#[async_trait::async_trait]
impl PriceOracleRegistry for FakeRegistry {
    async fn oracles(&self, underlying: Address) -> Result<Address> {
        let state = self.0.state.lock().unwrap();
        Ok(state
            .registered
            .get(&underlying)
            .copied()
            .unwrap_or_default())
    }

    async fn add(&self, underlyings: Vec<Address>, oracles: Vec<Address>) -> Result<TxHash> {
        if underlyings.len() != oracles.len() {
            return Err(Error::Reverted("lengths do not match".into()));
        }
        let mut state = self.0.state.lock().unwrap();
        state
            .registered
            .extend(underlyings.iter().copied().zip(oracles.iter().copied()));
        state.add_calls.push((underlyings, oracles));
        Ok(state.send())
    }
}
