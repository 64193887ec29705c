use {crate::traits::AccountResolver, alloy::primitives::Address};

/// Named accounts resolved once from the configured signer.
#[derive(Debug, Clone, Copy)]
pub struct SignerAccounts {
    deployer: Address,
}

impl SignerAccounts {
    pub fn new(deployer: Address) -> Self {
        Self { deployer }
    }
}

impl AccountResolver for SignerAccounts {
    fn deployer(&self) -> Address {
        self.deployer
    }
}
