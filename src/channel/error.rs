use thiserror::Error;

use crate::sig;

/// Why a channel operation was rejected. A rejected operation never changes
/// the channel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// Wrong caller for the attempted role.
    #[error("caller is not allowed to perform this operation")]
    Unauthorized,
    #[error("channel is closed")]
    ChannelClosed,
    /// Malformed signature, or one not made by the channel's sender.
    #[error("authorization is not signed by the channel sender")]
    InvalidSignature,
    /// Below (or, for withdraw, equal to) what has already been released.
    #[error("authorization is not above the amount already released")]
    StaleAuthorization,
    /// More than was ever deposited.
    #[error("authorized amount exceeds the deposited funds")]
    InsufficientFunds,
    #[error("channel has not expired yet")]
    NotYetExpired,
    #[error("deposit would overflow the channel balance")]
    BalanceOverflow,
}

/// Invalid parameters when opening a channel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OpenError {
    #[error("duration must be greater than zero")]
    ZeroDuration,
    #[error("sender and recipient must differ")]
    SelfPayment,
    #[error("expiration does not fit into a timestamp")]
    ExpirationOverflow,
}

/// Why a [Payer](super::Payer) refused to sign.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeError {
    /// Authorizations are cumulative, signing a lower amount would only
    /// create an unusable (and confusing) artifact.
    #[error("cumulative amount is below the amount already authorized")]
    Decreasing,
    #[error("cumulative amount overflows")]
    Overflow,
    #[error("signing failed: {0}")]
    Signing(#[from] sig::Error),
}
