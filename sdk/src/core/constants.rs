//! Protocol constants shared by decoders, address derivation, and encoders.

/// Seeds for program-derived addresses
pub mod seeds {
    pub const AUTHORITY: &[u8] = b"hypewtch";
}

/// Tags distinguishing program-owned account kinds. The tag is the leading
/// field of every account and of the root/client PDA seed buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AccountTag {
    Root = 1,
    Client = 2,
    Token = 3,
}

impl AccountTag {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Width of client nickname text fields
pub const NICKNAME_LEN: usize = 32;
/// Width of token address and network descriptor text fields
pub const NETWORK_STRING_LEN: usize = 32;
/// Width of a network's validation bitmask text field
pub const MASK_STRING_LEN: usize = 64;
/// Portion of the token PDA seed reserved for the address text
pub const TOKEN_SEED_ADDRESS_LEN: usize = 24;
