use core::fmt::Debug;

use crate::{channel::Timestamp, packed::types::Address, U256};

/// The execution environment hosting a channel.
///
/// The ledger orders calls (one at a time per channel), provides a clock
/// neither party can manipulate and moves value out of the channel's custody.
/// Transfers are only requested after a transition has fully succeeded.
pub trait Ledger: Debug {
    fn now(&self) -> Timestamp;
    fn transfer(&self, to: Address, amount: U256);
}
