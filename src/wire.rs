//! Transport encoding of [SignedAuthorization] for whatever medium carries it
//! from sender to recipient.
//!
//! Messages are protobuf, prefixed with their length as a big-endian u16
//! rather than the LEB128 prefix of `encode_length_delimited`.

use alloc::vec::Vec;
use prost::{bytes::BufMut, Message};
use thiserror::Error;

use crate::{
    channel::SignedAuthorization,
    packed::types::{Address, Signature},
    U256,
};

#[derive(Clone, PartialEq, Message)]
pub struct AuthorizationMsg {
    #[prost(bytes = "vec", tag = "1")]
    pub channel_id: Vec<u8>,
    /// Big-endian, leading zero bytes may be stripped.
    #[prost(bytes = "vec", tag = "2")]
    pub cumulative_amount: Vec<u8>,
    /// `r ‖ s ‖ v`
    #[prost(bytes = "vec", tag = "3")]
    pub sig: Vec<u8>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("frame shorter than its length prefix")]
    Truncated,
    #[error("trailing bytes after the message")]
    TrailingBytes,
    #[error("malformed protobuf message")]
    Protobuf,
    #[error("field {0} has the wrong length")]
    ByteLengthMismatch(&'static str),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("message is too large for a u16 length prefix")]
    TooLarge,
    #[error("buffer too small: {required} bytes required, {remaining} remaining")]
    BufferTooSmall { required: usize, remaining: usize },
    #[error("protobuf encoding failed: {0}")]
    Protobuf(#[from] prost::EncodeError),
}

impl From<SignedAuthorization> for AuthorizationMsg {
    fn from(value: SignedAuthorization) -> Self {
        Self {
            channel_id: value.channel_id.0.to_vec(),
            cumulative_amount: value.cumulative_amount.to_be_bytes().to_vec(),
            sig: value.sig.0.to_vec(),
        }
    }
}

impl TryFrom<AuthorizationMsg> for SignedAuthorization {
    type Error = ConversionError;

    fn try_from(value: AuthorizationMsg) -> Result<Self, Self::Error> {
        let channel_id = Address(
            value
                .channel_id
                .try_into()
                .or(Err(ConversionError::ByteLengthMismatch("channel_id")))?,
        );
        if value.cumulative_amount.len() > 32 {
            return Err(ConversionError::ByteLengthMismatch("cumulative_amount"));
        }
        let sig = Signature(
            value
                .sig
                .try_into()
                .or(Err(ConversionError::ByteLengthMismatch("sig")))?,
        );

        Ok(Self {
            channel_id,
            cumulative_amount: U256::from_big_endian(&value.cumulative_amount),
            sig,
        })
    }
}

/// Write the framed message into `buf`, which must have room for all of it.
pub fn encode_to<B: BufMut>(auth: &SignedAuthorization, buf: &mut B) -> Result<(), EncodeError> {
    let msg = AuthorizationMsg::from(*auth);
    let len = u16::try_from(msg.encoded_len()).map_err(|_| EncodeError::TooLarge)?;

    let required = 2 + len as usize;
    if buf.remaining_mut() < required {
        return Err(EncodeError::BufferTooSmall {
            required,
            remaining: buf.remaining_mut(),
        });
    }
    buf.put_u16(len);
    msg.encode(buf)?;
    Ok(())
}

pub fn encode(auth: &SignedAuthorization) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    encode_to(auth, &mut buf)?;
    Ok(buf)
}

pub fn decode(buf: &[u8]) -> Result<SignedAuthorization, ConversionError> {
    if buf.len() < 2 {
        return Err(ConversionError::Truncated);
    }
    let len = u16::from_be_bytes([buf[0], buf[1]]) as usize;
    let body = &buf[2..];
    if body.len() < len {
        return Err(ConversionError::Truncated);
    }
    if body.len() > len {
        return Err(ConversionError::TrailingBytes);
    }

    AuthorizationMsg::decode(body)
        .map_err(|_| ConversionError::Protobuf)?
        .try_into()
}
