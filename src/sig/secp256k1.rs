//! Signer using the libsecp256k1 bindings.

use crate::packed::types::{Address, Hash, Signature};
use ::secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1, SecretKey,
};

use super::{hash_to_eth_signed_msg_hash, split_eth_sig, Error, V_OFFSET};

pub struct Signer {
    secp: Secp256k1<All>,
    sk: SecretKey,
    addr: Address,
}

// Never print the secret key.
impl core::fmt::Debug for Signer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signer").field("addr", &self.addr).finish()
    }
}

impl Signer {
    pub fn new<R: rand::Rng + rand::CryptoRng>(rng: &mut R) -> Self {
        let secp = Secp256k1::new();
        let sk = SecretKey::new(rng);
        let addr = PublicKey::from_secret_key(&secp, &sk).into();
        Self { secp, sk, addr }
    }

    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self, Error> {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(secret).map_err(|_| Error::Backend)?;
        let addr = PublicKey::from_secret_key(&secp, &sk).into();
        Ok(Self { secp, sk, addr })
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    /// Sign a hash using a Ethereum 65-byte recoverable signature.
    ///
    /// Note that this differs from transaction signatures: there is no
    /// EIP-155 chain id in v, and no EIP-2098 compact form.
    pub fn sign_eth(&self, msg: Hash) -> Result<Signature, Error> {
        let hash = hash_to_eth_signed_msg_hash(msg);

        // Recoverable, so the verifier can get the address back (v).
        let sig = self
            .secp
            .sign_ecdsa_recoverable(&Message::from(hash), &self.sk);
        let (v, rs) = sig.serialize_compact();

        // libsecp256k1 only produces low-s signatures (EIP-2).
        debug_assert!(rs[32] & 0x80 == 0);

        Ok(Signature::new(&rs, V_OFFSET + v.to_i32() as u8))
    }
}

/// Recover the address that signed `msg` (without the `Ethereum Signed
/// Message` prefix, it is added here).
pub fn recover_signer(msg: Hash, eth_sig: Signature) -> Result<Address, Error> {
    let hash = hash_to_eth_signed_msg_hash(msg);
    let (rs, recid) = split_eth_sig(&eth_sig)?;

    let recid = RecoveryId::from_i32(recid.into()).map_err(|_| Error::Backend)?;
    let sig = RecoverableSignature::from_compact(&rs, recid).map_err(|_| Error::Backend)?;

    let secp = Secp256k1::verification_only();
    let pk = secp
        .recover_ecdsa(&Message::from(hash), &sig)
        .map_err(|_| Error::Backend)?;

    Ok(pk.into())
}
