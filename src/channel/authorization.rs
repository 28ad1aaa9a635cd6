//! The off-channel payment artifact: a channel id bound to a cumulative
//! amount, signed by the sender.

use serde::Serialize;
use thiserror::Error;

use super::{AuthorizeError, ChannelError, ChannelId};
use crate::{
    packed::{
        self,
        types::{Address, Hash, Signature, U256},
    },
    sig::{self, Signer},
};

/// The signed payload, `keccak256(abi.encodePacked(channel, amount))`.
///
/// Both fields have a fixed width (20 and 32 bytes), so the packed encoding
/// has no field-boundary ambiguity.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub channel_id: ChannelId,
    pub cumulative_amount: U256,
}

impl Authorization {
    pub fn new(channel_id: ChannelId, cumulative_amount: U256) -> Self {
        Self {
            channel_id,
            cumulative_amount,
        }
    }

    pub fn hash(&self) -> Hash {
        packed::to_hash(self)
            .expect("should be impossible to get an encoding-error for an Authorization")
    }

    pub fn sign(self, signer: &Signer) -> Result<SignedAuthorization, sig::Error> {
        let sig = signer.sign_eth(self.hash())?;
        Ok(SignedAuthorization {
            channel_id: self.channel_id,
            cumulative_amount: self.cumulative_amount,
            sig,
        })
    }
}

/// What the sender hands to the recipient, by whatever medium.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SignedAuthorization {
    pub channel_id: ChannelId,
    pub cumulative_amount: U256,
    pub sig: Signature,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} bytes, got {actual}")]
pub struct ByteLengthMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl SignedAuthorization {
    /// `channel_id (20) ‖ cumulative_amount (32, big-endian) ‖ r ‖ s ‖ v`.
    pub const ENCODED_LEN: usize = 20 + 32 + 65;

    pub fn authorization(&self) -> Authorization {
        Authorization::new(self.channel_id, self.cumulative_amount)
    }

    /// Recover who signed this artifact, see [verify].
    pub fn signer(&self) -> Result<Address, ChannelError> {
        verify(self.channel_id, self.cumulative_amount, self.sig)
    }

    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut buf = [0u8; Self::ENCODED_LEN];
        buf[..20].copy_from_slice(&self.channel_id.0);
        buf[20..52].copy_from_slice(&self.cumulative_amount.to_be_bytes());
        buf[52..].copy_from_slice(&self.sig.0);
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ByteLengthMismatch> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(ByteLengthMismatch {
                expected: Self::ENCODED_LEN,
                actual: bytes.len(),
            });
        }

        let mut channel_id = Address::default();
        channel_id.0.copy_from_slice(&bytes[..20]);
        let mut sig = Signature::default();
        sig.0.copy_from_slice(&bytes[52..]);

        Ok(Self {
            channel_id,
            cumulative_amount: U256::from_big_endian(&bytes[20..52]),
            sig,
        })
    }
}

/// Recover the identity that authorized `cumulative_amount` on `channel_id`.
///
/// This does not check that the identity is allowed to authorize anything,
/// the caller has to compare it with the channel's sender.
pub fn verify(
    channel_id: ChannelId,
    cumulative_amount: U256,
    sig: Signature,
) -> Result<Address, ChannelError> {
    let hash = Authorization::new(channel_id, cumulative_amount).hash();
    sig::recover_signer(hash, sig).map_err(|_| ChannelError::InvalidSignature)
}

/// Sender side of the channel: remembers the highest amount it has signed so
/// every new authorization supersedes the previous one.
#[derive(Debug)]
pub struct Payer<'s> {
    signer: &'s Signer,
    channel_id: ChannelId,
    authorized: U256,
}

impl<'s> Payer<'s> {
    pub fn new(signer: &'s Signer, channel_id: ChannelId) -> Self {
        Self {
            signer,
            channel_id,
            authorized: U256::zero(),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Highest cumulative amount signed so far.
    pub fn authorized(&self) -> U256 {
        self.authorized
    }

    /// Sign a new cumulative total. Re-signing the current total is allowed.
    pub fn authorize(
        &mut self,
        cumulative_amount: U256,
    ) -> Result<SignedAuthorization, AuthorizeError> {
        if cumulative_amount < self.authorized {
            return Err(AuthorizeError::Decreasing);
        }
        let signed = Authorization::new(self.channel_id, cumulative_amount).sign(self.signer)?;
        self.authorized = cumulative_amount;
        Ok(signed)
    }

    /// Pay `amount` on top of everything authorized so far.
    pub fn pay(&mut self, amount: U256) -> Result<SignedAuthorization, AuthorizeError> {
        let total = self
            .authorized
            .checked_add(amount)
            .ok_or(AuthorizeError::Overflow)?;
        self.authorize(total)
    }
}
