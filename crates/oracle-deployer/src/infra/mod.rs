//! Node backed implementations of the traits in [`crate::traits`].

pub mod accounts;
pub mod contracts;
pub mod create2;
pub mod waiter;

pub use {
    accounts::SignerAccounts,
    contracts::AlloyContracts,
    create2::Create2Deployer,
    waiter::ReceiptWaiter,
};
