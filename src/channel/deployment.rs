//! Parameters and identifier of a freshly deployed channel.

use sha3::{Digest, Keccak256};

use super::ChannelId;
use crate::packed::types::Address;

/// Five days.
pub const DEFAULT_DURATION: u64 = 5 * 24 * 60 * 60;

/// What the sender supplies when deploying a channel, besides the attached
/// initial deposit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeployParams {
    pub recipient: Address,
    /// Seconds from deployment until the sender may reclaim the balance.
    pub duration: u64,
}

impl DeployParams {
    pub fn new(recipient: Address) -> Self {
        Self {
            recipient,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }
}

/// Address of the contract `deployer` creates with its `nonce`-th
/// transaction: `keccak256(rlp([deployer, nonce]))[12..]`.
///
/// The channel id is what the sender signs over, so it has to be exactly what
/// the ledger assigns.
pub fn channel_address(deployer: Address, nonce: u64) -> ChannelId {
    // rlp(nonce): 0 is the empty string, 1..=0x7f encode as themselves,
    // everything else is a short string of the big-endian bytes without
    // leading zeros.
    let be = nonce.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let digits = &be[skip..];
    let mut nonce_rlp = [0u8; 9];
    let nonce_rlp: &[u8] = match digits {
        [] => &[0x80],
        [b] if *b < 0x80 => digits,
        _ => {
            nonce_rlp[0] = 0x80 + digits.len() as u8;
            nonce_rlp[1..=digits.len()].copy_from_slice(digits);
            &nonce_rlp[..=digits.len()]
        }
    };

    // Both items are short strings, so the list payload stays below 56 bytes.
    let payload_len = 1 + deployer.0.len() + nonce_rlp.len();

    let mut hasher = Keccak256::new();
    hasher.update([0xc0 + payload_len as u8]);
    hasher.update([0x80 + deployer.0.len() as u8]);
    hasher.update(deployer.0);
    hasher.update(nonce_rlp);
    let hash: [u8; 32] = hasher.finalize().into();

    let mut addr = Address::default();
    addr.0.copy_from_slice(&hash[32 - 20..]);
    addr
}
