use {
    alloy::{
        contract::Error as ContractError,
        primitives::TxHash,
        providers::{PendingTransactionError, WatchTxError},
        transports::TransportError,
    },
    ethrpc::alloy::errors::ContractErrorExt,
    std::time::Duration,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors of a deployment run. None of them are recovered from.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node could not be reached or answered with something other than a
    /// revert.
    #[error("node error: {0:#}")]
    Node(anyhow::Error),
    /// A call or transaction was reverted by the EVM.
    #[error("reverted: {0}")]
    Reverted(String),
    /// A lookup that must produce a contract returned the zero address.
    #[error("{0} resolved to the zero address")]
    UnexpectedZeroAddress(&'static str),
    #[error("transaction {0} was not confirmed within {1:?}")]
    Timeout(TxHash, Duration),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ContractError> for Error {
    fn from(err: ContractError) -> Self {
        if err.is_node_error() {
            return Self::Node(err.into());
        }
        Self::Reverted(err.revert_reason().unwrap_or_else(|| err.to_string()))
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err.revert_reason() {
            Some(reason) => Self::Reverted(reason),
            None => Self::Node(err.into()),
        }
    }
}

impl Error {
    pub(crate) fn from_pending(err: PendingTransactionError, tx: TxHash, timeout: Duration) -> Self {
        match err {
            PendingTransactionError::TxWatcher(WatchTxError::Timeout) => Self::Timeout(tx, timeout),
            PendingTransactionError::TransportError(err) => err.into(),
            err => Self::Node(anyhow::Error::new(err).context(format!("waiting for {tx}"))),
        }
    }
}
