mod authorization;
mod deployment;
mod error;
mod hosted;
mod state;

use crate::packed::types::Address;

pub use authorization::{verify, Authorization, ByteLengthMismatch, Payer, SignedAuthorization};
pub use deployment::{channel_address, DeployParams, DEFAULT_DURATION};
pub use error::{AuthorizeError, ChannelError, OpenError};
pub use hosted::PaymentChannel;
pub use state::{ChannelState, Settlement};

/// The deployed instance's address. It is part of every signed payload, which
/// keeps an authorization for one channel from being redeemed on another.
pub type ChannelId = Address;

/// Seconds, as reported by the host ledger.
pub type Timestamp = u64;
