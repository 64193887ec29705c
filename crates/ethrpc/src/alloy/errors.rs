use alloy::{
    contract::Error as ContractError,
    sol_types::decode_revert_reason,
    transports::{RpcError, TransportError},
};

pub trait ContractErrorExt {
    /// Returns whether a given error is a contract error, this is considered to
    /// be all errors except the transport error where there is no revert data.
    fn is_contract_error(&self) -> bool;

    /// Returns whether a given error is a node error.
    fn is_node_error(&self) -> bool;

    /// Best effort human readable revert reason. `None` for node errors.
    fn revert_reason(&self) -> Option<String>;
}

impl ContractErrorExt for TransportError {
    fn is_contract_error(&self) -> bool {
        !self.is_node_error()
    }

    fn is_node_error(&self) -> bool {
        match self {
            // Reverts surface as error responses carrying revert data. Empty revert
            // data (e.g. calling a missing function) still counts as revert data,
            // so look at its presence rather than trying to decode it.
            RpcError::ErrorResp(err) => {
                let no_revert_data = err.as_revert_data().is_none();
                tracing::debug!(?err, %no_revert_data, "transport rpc error");
                no_revert_data
            }
            _ => true,
        }
    }

    fn revert_reason(&self) -> Option<String> {
        match self {
            RpcError::ErrorResp(err) if !self.is_node_error() => Some(
                err.as_revert_data()
                    .and_then(|data| decode_revert_reason(&data))
                    .unwrap_or_else(|| err.message.to_string()),
            ),
            _ => None,
        }
    }
}

impl ContractErrorExt for ContractError {
    fn is_contract_error(&self) -> bool {
        !self.is_node_error()
    }

    fn is_node_error(&self) -> bool {
        match self {
            ContractError::TransportError(err) => err.is_node_error(),
            _ => false,
        }
    }

    fn revert_reason(&self) -> Option<String> {
        match self {
            ContractError::TransportError(err) => err.revert_reason(),
            _ if self.is_contract_error() => Some(self.to_string()),
            _ => None,
        }
    }
}

/// Create an arbitrary alloy error that will convert into a "contract" error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_contract_error() -> ContractError {
    ContractError::NotADeploymentTransaction
}

/// Create an arbitrary alloy error that will convert into a "node" error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_node_error() -> ContractError {
    ContractError::TransportError(TransportError::ErrorResp(
        alloy::rpc::json_rpc::ErrorPayload::internal_error(),
    ))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::Bytes,
            rpc::json_rpc::ErrorPayload,
            sol_types::{Revert, SolError},
        },
    };

    #[test]
    fn test_contract_error() {
        assert!(testing_alloy_contract_error().is_contract_error());
        assert!(!testing_alloy_node_error().is_contract_error());
    }

    #[test]
    fn test_node_error() {
        assert!(!testing_alloy_contract_error().is_node_error());
        assert!(testing_alloy_node_error().is_node_error());
        assert_eq!(testing_alloy_node_error().revert_reason(), None);
    }

    #[test]
    fn decodes_revert_reason_from_error_response() {
        let data = Bytes::from(Revert {
            reason: "!owner".into(),
        }
        .abi_encode());
        let payload = ErrorPayload {
            code: 3,
            message: "execution reverted: !owner".into(),
            data: Some(serde_json::value::to_raw_value(&data).unwrap()),
        };
        let err = TransportError::ErrorResp(payload);

        assert!(err.is_contract_error());
        assert!(err.revert_reason().unwrap().contains("!owner"));
    }
}
