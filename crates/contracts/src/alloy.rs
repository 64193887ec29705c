pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const BNB: u64 = 56;
    pub const POLYGON: u64 = 137;
}

crate::bindings!(
    /// Deploys and indexes one TWAP oracle per (Uniswap V2 factory, base
    /// token) pair.
    UniswapTwapPriceOracleV2Factory {
        function oracles(address uniswapV2Factory, address baseToken) external view returns (address);
        function deploy(address uniswapV2Factory, address baseToken) external returns (address);
    }
);

crate::bindings!(
    /// Registry mapping underlying tokens to the oracle that prices them.
    MasterPriceOracle {
        function oracles(address underlying) external view returns (address);
        function add(address[] calldata underlyings, address[] calldata _oracles) external;
    }
);

/// Generates RPC bindings for the listed functions of a contract. Only the
/// functions a caller actually needs are declared so the bindings do not
/// depend on build artifacts.
#[macro_export]
macro_rules! bindings {
    ($(#[$attr:meta])* $contract:ident { $($body:tt)* }) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol!(
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($body)*
                    }
                );
            }

            $(#[$attr])*
            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::*;
                pub type Instance = $contract::[<$contract Instance>]<DynProvider>;

                /// Name of the contract's build artifact and deployment record.
                pub const NAME: &str = stringify!($contract);
            }
        }
    };
}
