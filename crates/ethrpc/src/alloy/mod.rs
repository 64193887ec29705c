pub mod errors;
mod instrumentation;
pub mod wallet;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::{ClientBuilder, RpcClient},
        signers::local::PrivateKeySigner,
    },
    instrumentation::{InstrumentationLayer, LabelingLayer},
    url::Url,
};

fn rpc_client(url: &Url, label: &str) -> RpcClient {
    ClientBuilder::default()
        .layer(LabelingLayer {
            label: label.into(),
        })
        .layer(InstrumentationLayer)
        .http(url.clone())
}

/// Provider that fills and signs transactions with `signer`, which also
/// becomes the default sender.
pub fn provider_with_signer(url: &Url, label: &str, signer: PrivateKeySigner) -> AlloyProvider {
    let wallet = EthereumWallet::new(signer);
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_client(rpc_client(url, label))
        .erased()
}

/// Provider backed by a mocked transport without any queued responses. Useful
/// for code paths that must not reach the node.
#[cfg(any(test, feature = "test-util"))]
pub fn dummy_provider() -> AlloyProvider {
    mocked_provider(mock::Asserter::new())
}

/// Provider answering requests with the responses queued on `asserter`, in
/// order. No fillers are installed so every call maps to exactly one request.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider(asserter: mock::Asserter) -> AlloyProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
        .erased()
}
