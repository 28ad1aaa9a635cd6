#![cfg_attr(not(feature = "std"), no_std)]

//! Unidirectional off-chain payment channel.
//!
//! A sender locks funds for a fixed duration and pays a single recipient by
//! signing increasing cumulative amounts off-chain
//! ([channel::Payer], [channel::SignedAuthorization]). The recipient redeems
//! the latest one on the ledger, either keeping the channel open
//! ([channel::PaymentChannel::withdraw]) or closing it
//! ([channel::PaymentChannel::close]). After expiration the sender can take
//! back whatever is left ([channel::PaymentChannel::timeout]).

extern crate alloc;

pub mod packed;
pub mod sig;

pub mod channel;
pub mod ledger;
pub mod wire;

pub use packed::types::{Address, Hash, Signature, U256};
