//! Deterministic program-owned addresses.
//!
//! Seed construction must match the on-chain program byte for byte: a
//! drifted seed derives a different address and every dependent lookup
//! silently comes back "account not found".

use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{seeds, AccountTag, TOKEN_SEED_ADDRESS_LEN};

/// Program-wide authority address.
pub fn find_authority_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[seeds::AUTHORITY], program_id).0
}

fn tagged_seed(version: u32, tag: AccountTag) -> [u8; 8] {
    let mut seed = [0u8; 8];
    seed[..4].copy_from_slice(&version.to_le_bytes());
    seed[4..].copy_from_slice(&tag.as_u32().to_le_bytes());
    seed
}

/// Address of the root singleton for a contract version.
pub fn find_root_address(program_id: &Pubkey, version: u32) -> Pubkey {
    let seed = tagged_seed(version, AccountTag::Root);
    let authority = find_authority_address(program_id);
    Pubkey::find_program_address(&[&seed, authority.as_ref()], program_id).0
}

/// Address of the client record for a wallet.
pub fn find_client_address(program_id: &Pubkey, wallet: &Pubkey, version: u32) -> Pubkey {
    let seed = tagged_seed(version, AccountTag::Client);
    Pubkey::find_program_address(&[&seed, wallet.as_ref()], program_id).0
}

/// Address of the token record for a network id and address text.
///
/// The address text enters the seed lowercased and truncated to the 24
/// bytes the seed buffer reserves for it, exactly as the program builds it.
pub fn find_token_address(
    program_id: &Pubkey,
    network_id: u32,
    address: &str,
    version: u32,
) -> Pubkey {
    let mut seed = [0u8; 32];
    let lowered = address.to_lowercase();
    let bytes = lowered.as_bytes();
    let text_len = bytes.len().min(TOKEN_SEED_ADDRESS_LEN);
    seed[..text_len].copy_from_slice(&bytes[..text_len]);
    seed[24..28].copy_from_slice(&network_id.to_le_bytes());
    seed[28..].copy_from_slice(&version.to_le_bytes());
    let authority = find_authority_address(program_id);
    Pubkey::find_program_address(&[&seed, authority.as_ref()], program_id).0
}
