//! Signer using the k256 Rust crate (implementation of ecdsa in Rust).

use crate::packed::types::{Address, Hash, Signature};
use ::k256::{
    ecdsa::{
        recoverable,
        signature::{hazmat::PrehashSigner, Signature as k256Signature},
        SigningKey, VerifyingKey,
    },
    elliptic_curve::sec1::ToEncodedPoint,
};
use sha3::{Digest, Keccak256};

use super::{hash_to_eth_signed_msg_hash, split_eth_sig, Error, V_OFFSET};

#[derive(Debug)]
pub struct Signer {
    key: SigningKey,
    addr: Address,
}

impl From<VerifyingKey> for Address {
    fn from(key: VerifyingKey) -> Self {
        // Uncompressed SEC1 point: one tag byte, then x and y. Only x ‖ y is
        // hashed.
        let point = key.to_encoded_point(false);
        let hash: [u8; 32] = Keccak256::digest(&point.as_bytes()[1..]).into();

        let mut addr = Address([0; 20]);
        addr.0.copy_from_slice(&hash[32 - 20..]);
        addr
    }
}

impl Signer {
    pub fn new<R: rand::Rng + rand::CryptoRng>(rng: &mut R) -> Self {
        let key = SigningKey::random(rng);
        let addr = key.verifying_key().into();
        Self { key, addr }
    }

    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self, Error> {
        let key = SigningKey::from_bytes(secret).map_err(|_| Error::Backend)?;
        let addr = key.verifying_key().into();
        Ok(Self { key, addr })
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn sign_eth(&self, msg: Hash) -> Result<Signature, Error> {
        let hash = hash_to_eth_signed_msg_hash(msg);

        let sig: recoverable::Signature = self
            .key
            .sign_prehash(&hash.0)
            .map_err(|_| Error::Backend)?;

        // Already r ‖ s ‖ v, v still has to be moved into the EVM range.
        let mut sig_bytes = [0u8; 65];
        sig_bytes.copy_from_slice(sig.as_bytes());
        debug_assert!(sig_bytes[32] & 0x80 == 0);
        sig_bytes[64] += V_OFFSET;

        Ok(Signature(sig_bytes))
    }
}

/// Recover the address that signed `msg` (without the `Ethereum Signed
/// Message` prefix, it is added here).
pub fn recover_signer(msg: Hash, eth_sig: Signature) -> Result<Address, Error> {
    let hash = hash_to_eth_signed_msg_hash(msg);
    let (rs, recid) = split_eth_sig(&eth_sig)?;

    let mut sig_bytes = [0u8; 65];
    sig_bytes[..64].copy_from_slice(&rs);
    sig_bytes[64] = recid;

    let sig = recoverable::Signature::from_bytes(&sig_bytes).map_err(|_| Error::Backend)?;
    let verifying_key = sig
        .recover_verifying_key_from_digest_bytes(&hash.0.into())
        .map_err(|_| Error::Backend)?;
    Ok(verifying_key.into())
}
