//! Deploy configuration file. The file describes what to deploy on one chain;
//! how to reach the chain and who signs comes from the command line.

use {
    crate::error::{Error, Result},
    alloy::primitives::{Address, B256, address, keccak256},
    contracts::alloy::networks::{BNB, MAINNET, POLYGON},
    serde::Deserialize,
    std::{collections::HashSet, path::Path},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Optionally specify the chain ID the file is meant for. The deployer
    /// exits if the connected node reports a different chain.
    chain_id: Option<u64>,

    /// Hashed into the CREATE2 salt of every contract deployed by this run.
    salt: String,

    /// Wrapped native token, used as base token of the oracle. Defaults to the
    /// chain's preset.
    wtoken: Option<Address>,

    /// Override the `MasterPriceOracle` address recorded in the deployments
    /// store.
    master_price_oracle: Option<Address>,

    #[serde(default)]
    uniswap: UniswapConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct UniswapConfig {
    /// Uniswap V2 style factory whose pairs the oracle reads. Defaults to the
    /// chain's preset.
    uniswap_v2_factory: Option<Address>,

    /// Tokens registered with the new oracle in the `MasterPriceOracle`.
    #[serde(default)]
    initial_deploy_tokens: Vec<Address>,
}

/// Everything a deployment run needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployParameters {
    pub salt: B256,
    pub wtoken: Address,
    pub uniswap_v2_factory: Address,
    pub master_price_oracle: Option<Address>,
    pub underlyings: Vec<Address>,
}

/// Addresses the config file may omit on well known chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub wtoken: Address,
    pub uniswap_v2_factory: Address,
}

impl Preset {
    pub fn for_chain(chain_id: u64) -> Option<Self> {
        match chain_id {
            MAINNET => Some(Self {
                // WETH, Uniswap V2
                wtoken: address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
                uniswap_v2_factory: address!("0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f"),
            }),
            BNB => Some(Self {
                // WBNB, PancakeSwap V2
                wtoken: address!("0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"),
                uniswap_v2_factory: address!("0xca143ce32fe78f1f7019d7d551a6402fc5350c73"),
            }),
            POLYGON => Some(Self {
                // WMATIC, QuickSwap
                wtoken: address!("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
                uniswap_v2_factory: address!("0x5757371414417b8c6caad45baef941abc7d3ab32"),
            }),
            _ => None,
        }
    }
}

/// CREATE2 salt used for every contract: `keccak256` of the UTF-8 bytes.
pub fn salt(value: &str) -> B256 {
    keccak256(value.as_bytes())
}

/// Load the deploy configuration from a TOML file.
pub async fn load(path: &Path) -> Result<Config> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::Config(format!("I/O error while reading {path:?}: {err}")))?;
    Config::from_toml(&data).map_err(|err| match err {
        Error::Config(msg) => Error::Config(format!("{path:?}: {msg}")),
        err => err,
    })
}

impl Config {
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::de::from_str(data).map_err(|err| Error::Config(err.to_string()))
    }

    /// Validates the file against the chain the node is connected to and fills
    /// in preset addresses.
    pub fn resolve(self, chain_id: u64) -> Result<DeployParameters> {
        if let Some(expected) = self.chain_id {
            if expected != chain_id {
                return Err(Error::Config(format!(
                    "config is for chain {expected} but the node is on chain {chain_id}"
                )));
            }
        }
        if self.salt.is_empty() {
            return Err(Error::Config("salt must not be empty".into()));
        }

        let preset = Preset::for_chain(chain_id);
        let wtoken = self
            .wtoken
            .or(preset.map(|preset| preset.wtoken))
            .ok_or_else(|| Error::Config(format!("no wtoken configured for chain {chain_id}")))?;
        let uniswap_v2_factory = self
            .uniswap
            .uniswap_v2_factory
            .or(preset.map(|preset| preset.uniswap_v2_factory))
            .ok_or_else(|| {
                Error::Config(format!("no uniswap-v2-factory configured for chain {chain_id}"))
            })?;
        if wtoken.is_zero() || uniswap_v2_factory.is_zero() {
            return Err(Error::Config(
                "wtoken and uniswap-v2-factory must not be the zero address".into(),
            ));
        }

        let mut seen = HashSet::new();
        for token in &self.uniswap.initial_deploy_tokens {
            if token.is_zero() {
                return Err(Error::Config("initial-deploy-tokens contains the zero address".into()));
            }
            if !seen.insert(token) {
                return Err(Error::Config(format!(
                    "initial-deploy-tokens lists {token} more than once"
                )));
            }
        }

        Ok(DeployParameters {
            salt: salt(&self.salt),
            wtoken,
            uniswap_v2_factory,
            master_price_oracle: self.master_price_oracle,
            underlyings: self.uniswap.initial_deploy_tokens,
        })
    }
}
