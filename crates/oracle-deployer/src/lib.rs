pub mod arguments;
pub mod config;
pub mod deployments;
pub mod error;
pub mod infra;
pub mod orchestrator;
#[cfg(test)]
mod testing;
pub mod traits;

use {
    crate::{
        arguments::Arguments,
        deployments::Deployments,
        infra::{AlloyContracts, Create2Deployer, ReceiptWaiter, SignerAccounts},
        orchestrator::{DeploymentReport, Orchestrator},
    },
    alloy::{providers::Provider, signers::local::PrivateKeySigner},
    anyhow::{Context, Result},
    ethrpc::alloy::wallet,
    std::sync::Arc,
};

fn signer(args: &Arguments) -> Result<PrivateKeySigner> {
    match (&args.deployer_private_key, &args.mnemonic) {
        (Some(key), _) => wallet::signer_from_private_key(key),
        (None, Some(mnemonic)) => wallet::signer_from_mnemonic(mnemonic, args.deployer_index),
        (None, None) => {
            anyhow::bail!("inconsistent arguments: no deployer private key or mnemonic")
        }
    }
}

/// Runs one deployment against the node in `args`.
pub async fn run(args: Arguments) -> Result<DeploymentReport> {
    let signer = signer(&args).context("invalid deployer account")?;
    let deployer = signer.address();
    let provider = ethrpc::alloy::provider_with_signer(&args.node_url, "oracle_deployer", signer);

    let chain_id = provider
        .get_chain_id()
        .await
        .context("failed to get chain id")?;
    let params = config::load(&args.config).await?.resolve(chain_id)?;
    let deployments = Deployments::new(args.deployments_dir.join(chain_id.to_string()));
    tracing::info!(chain_id, ?deployer, store = ?deployments.dir(), "resolved deployment target");

    let orchestrator = Orchestrator::new(
        Arc::new(SignerAccounts::new(deployer)),
        Arc::new(Create2Deployer::new(
            provider.clone(),
            args.create2_proxy,
            args.artifacts_dir.clone(),
            deployments.clone(),
        )),
        Arc::new(ReceiptWaiter::new(
            provider.clone(),
            args.confirmations,
            args.confirmation_timeout,
        )),
        Arc::new(AlloyContracts::new(
            provider,
            deployments,
            params.master_price_oracle,
        )),
    );
    Ok(orchestrator.run(&params).await?)
}
