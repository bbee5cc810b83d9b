//! Deployment defaults and the explicit call context.

use solana_sdk::pubkey::Pubkey;

use crate::accounts::RootSnapshot;

/// Program ID of the Hype protocol mainnet deployment.
pub const PROGRAM_ID: &str = "HYPExvaQRQHrkCNc1DAHJoByUeBqFvkJyhtpFdacLcdH";

/// Contract version baked into PDA seeds.
pub const PROTOCOL_VERSION: u32 = 0;

/// RPC endpoint operated by the protocol team, for callers that need a
/// default transport target. The SDK itself never opens connections.
pub const DEFAULT_RPC_URL: &str = "https://rpc-mainnet.hype.vote";

/// Get the default program ID as a Pubkey.
pub fn program_id() -> Pubkey {
    PROGRAM_ID.parse().unwrap()
}

/// Everything the decoders and instruction builders need to target one
/// deployment. Constructed once from a fetched root account and passed
/// explicitly; there is no "initialize the SDK first" global to forget.
#[derive(Clone, Debug)]
pub struct SdkContext {
    pub program_id: Pubkey,
    pub version: u32,
    pub root: RootSnapshot,
}

impl SdkContext {
    pub fn new(program_id: Pubkey, version: u32, root: RootSnapshot) -> Self {
        Self {
            program_id,
            version,
            root,
        }
    }

    /// Context for the default mainnet deployment.
    pub fn mainnet(root: RootSnapshot) -> Self {
        Self::new(program_id(), PROTOCOL_VERSION, root)
    }
}
