//! Builder for assembling instruction account lists.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

/// Accumulates `(address, is_signer, is_writable)` tuples in program order
/// and pairs them with the payload bytes.
pub struct HypeInstructionBuilder {
    accounts: Vec<AccountMeta>,
    data: Vec<u8>,
}

impl HypeInstructionBuilder {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Add a writable signer account
    pub fn add_signer(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new(pubkey, true));
        self
    }

    /// Add a writable non-signer account
    pub fn add_writable(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new(pubkey, false));
        self
    }

    /// Add a readonly account
    pub fn add_readonly(mut self, pubkey: Pubkey) -> Self {
        self.accounts.push(AccountMeta::new_readonly(pubkey, false));
        self
    }

    /// Set the instruction data
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Build the final instruction
    pub fn build(self, program_id: Pubkey) -> Instruction {
        Instruction {
            program_id,
            accounts: self.accounts,
            data: self.data,
        }
    }
}

impl Default for HypeInstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
