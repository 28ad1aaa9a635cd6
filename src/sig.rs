//! Handles the creation and verification of (Ethereum) Signatures.
//!
//! Both backends implement the same free function [recover_signer] and the
//! same [Signer] type. If both features are enabled `secp256k1` is used, the
//! `k256` module is then only compiled for tests so the two can be checked
//! against each other.

use crate::packed::types::{Hash, Signature};
use sha3::{Digest, Keccak256};
use thiserror::Error;

#[cfg(feature = "secp256k1")]
mod secp256k1;
#[cfg(feature = "secp256k1")]
pub use self::secp256k1::{recover_signer, Signer};

#[cfg(all(feature = "k256", any(test, not(feature = "secp256k1"))))]
mod k256;
#[cfg(all(feature = "k256", not(feature = "secp256k1")))]
pub use self::k256::{recover_signer, Signer};

#[cfg(not(any(feature = "k256", feature = "secp256k1")))]
compile_error!("enable one of the signature backends: `k256` or `secp256k1`");


/// `n / 2` of secp256k1, big-endian. Larger `s` values are the malleated
/// twin of a valid signature.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// EVM offset added to the recovery id (yParity).
const V_OFFSET: u8 = 27;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("recovery byte must be 27 or 28, got {0}")]
    InvalidRecoveryId(u8),
    #[error("s is in the upper half of the curve order")]
    NonCanonicalS,
    #[error("curve backend could not create or recover the signature")]
    Backend,
}

/// Add the `\x19Ethereum Signed Message:\n<length>` prefix to hash.
///
/// This is the format `eth_sign` and OpenZeppelin's `toEthSignedMessageHash`
/// use, so a signature over it can never be a valid transaction signature.
pub fn hash_to_eth_signed_msg_hash(hash: Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(b"\x19Ethereum Signed Message:\n32");
    hasher.update(hash.0);
    Hash(hasher.finalize().into())
}

/// Split an EVM signature into `r ‖ s` and the raw recovery id (0 or 1),
/// rejecting everything `ecrecover` callers usually reject.
fn split_eth_sig(sig: &Signature) -> Result<([u8; 64], u8), Error> {
    let recid = match sig.v() {
        v @ (27 | 28) => v - V_OFFSET,
        v => return Err(Error::InvalidRecoveryId(v)),
    };
    // Lexicographic order of big-endian bytes is numeric order.
    if sig.s() > SECP256K1_HALF_ORDER {
        return Err(Error::NonCanonicalS);
    }

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&sig.0[..64]);
    Ok((rs, recid))
}
