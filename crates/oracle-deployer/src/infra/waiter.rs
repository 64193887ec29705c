use {
    crate::{
        error::{Error, Result},
        traits::TransactionWaiter,
    },
    alloy::{
        primitives::TxHash,
        providers::{DynProvider, PendingTransactionBuilder, Provider},
        rpc::types::TransactionReceipt,
    },
    std::time::Duration,
};

/// Waits for transaction receipts by polling the node.
pub struct ReceiptWaiter {
    provider: DynProvider,
    confirmations: u64,
    timeout: Duration,
}

impl ReceiptWaiter {
    pub fn new(provider: DynProvider, confirmations: u64, timeout: Duration) -> Self {
        Self {
            provider,
            confirmations,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl TransactionWaiter for ReceiptWaiter {
    async fn wait_for_confirmation(&self, tx: TxHash) -> Result<()> {
        tracing::debug!(?tx, confirmations = self.confirmations, "waiting for transaction");
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx)
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.timeout))
            .get_receipt()
            .await
            .map_err(|err| Error::from_pending(err, tx, self.timeout))?;
        check_status(tx, &receipt)
    }
}

fn check_status(tx: TxHash, receipt: &TransactionReceipt) -> Result<()> {
    if !receipt.status() {
        return Err(Error::Reverted(format!(
            "transaction {tx} reverted in block {:?}",
            receipt.block_number
        )));
    }
    tracing::debug!(?tx, block = ?receipt.block_number, "transaction confirmed");
    Ok(())
}
