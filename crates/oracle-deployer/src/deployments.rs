//! Per chain store of resolved deployments. Each contract gets a
//! `<ContractName>.json` file so later runs (and other tooling) can find
//! contracts by name.

use {
    alloy::primitives::{Address, TxHash},
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// A contract the deterministic deployer resolved, either by deploying it or
/// by finding its code already on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub address: Address,
    /// Set when this run sent the deployment transaction.
    pub transaction_hash: Option<TxHash>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_hash: Option<TxHash>,
}

#[derive(Debug, Clone)]
pub struct Deployments {
    dir: PathBuf,
}

impl Deployments {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Writes the record, replacing an older record of the same contract.
    pub async fn save(&self, deployment: &Deployment) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create {:?}", self.dir))?;
        let record = Record {
            address: deployment.address,
            transaction_hash: deployment.transaction_hash,
        };
        let path = self.path(&deployment.name);
        tokio::fs::write(&path, serde_json::to_string_pretty(&record)?)
            .await
            .with_context(|| format!("failed to write {path:?}"))?;
        tracing::debug!(?path, name = %deployment.name, "saved deployment record");
        Ok(())
    }

    pub async fn get(&self, name: &str) -> Result<Option<Deployment>> {
        let path = self.path(name);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("failed to read {path:?}")),
        };
        let record: Record =
            serde_json::from_str(&json).with_context(|| format!("malformed record {path:?}"))?;
        Ok(Some(Deployment {
            name: name.to_string(),
            address: record.address,
            transaction_hash: record.transaction_hash,
        }))
    }

    /// Address of a previously recorded contract.
    pub async fn address(&self, name: &str) -> Result<Address> {
        self.get(name)
            .await?
            .map(|deployment| deployment.address)
            .with_context(|| format!("no deployment of {name} recorded in {:?}", self.dir))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[tokio::test]
    async fn records_round_trip_through_directory() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = Deployments::new(dir.path().join("56"));
        let factory = Deployment {
            name: "UniswapTwapPriceOracleV2Factory".to_string(),
            address: address!("0x1111111111111111111111111111111111111111"),
            transaction_hash: Some(TxHash::repeat_byte(0xab)),
        };

        assert_eq!(deployments.get(&factory.name).await.unwrap(), None);
        deployments.save(&factory).await.unwrap();

        assert_eq!(deployments.get(&factory.name).await.unwrap(), Some(factory.clone()));
        assert_eq!(deployments.address(&factory.name).await.unwrap(), factory.address);
    }

    #[tokio::test]
    async fn later_records_replace_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let deployments = Deployments::new(dir.path());
        let first = Deployment {
            name: "UniswapTwapPriceOracleV2".to_string(),
            address: Address::repeat_byte(1),
            transaction_hash: Some(TxHash::repeat_byte(1)),
        };
        let second = Deployment {
            transaction_hash: None,
            ..first.clone()
        };

        deployments.save(&first).await.unwrap();
        deployments.save(&second).await.unwrap();

        assert_eq!(deployments.get(&first.name).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn reads_records_written_by_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("MasterPriceOracle.json"),
            r#"{
                "address": "0x2222222222222222222222222222222222222222",
                "abi": [],
                "receipt": { "status": 1 }
            }"#,
        )
        .unwrap();

        let deployments = Deployments::new(dir.path());
        assert_eq!(
            deployments.address("MasterPriceOracle").await.unwrap(),
            address!("0x2222222222222222222222222222222222222222")
        );
    }

    #[tokio::test]
    async fn missing_record_names_the_contract() {
        let dir = tempfile::tempdir().unwrap();
        let err = Deployments::new(dir.path())
            .address("MasterPriceOracle")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("MasterPriceOracle"));
    }
}
