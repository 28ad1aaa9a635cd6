use super::{authorization::verify, ChannelError, ChannelId, OpenError, Timestamp};
use crate::packed::types::{Address, Signature, U256};

/// Funds leaving the channel as the result of a redemption or timeout.
///
/// The host (see [Ledger](crate::ledger::Ledger)) turns this into transfers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub to_recipient: U256,
    pub to_sender: U256,
}

/// The custodial record of a single unidirectional channel.
///
/// Fields are private: the record only changes through the transition
/// methods below, and every one of them checks all preconditions before
/// touching anything, so an `Err` leaves the state exactly as it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChannelState {
    id: ChannelId,
    sender: Address,
    recipient: Address,
    expiration: Timestamp,
    balance: U256,
    total_released: U256,
    total_deposited: U256,
    is_open: bool,
}

impl ChannelState {
    pub fn open(
        id: ChannelId,
        sender: Address,
        recipient: Address,
        duration: u64,
        initial_deposit: U256,
        now: Timestamp,
    ) -> Result<Self, OpenError> {
        if duration == 0 {
            return Err(OpenError::ZeroDuration);
        }
        if sender == recipient {
            return Err(OpenError::SelfPayment);
        }
        let expiration = now
            .checked_add(duration)
            .ok_or(OpenError::ExpirationOverflow)?;

        Ok(Self {
            id,
            sender,
            recipient,
            expiration,
            balance: initial_deposit,
            total_released: U256::zero(),
            total_deposited: initial_deposit,
            is_open: true,
        })
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }
    pub fn sender(&self) -> Address {
        self.sender
    }
    pub fn recipient(&self) -> Address {
        self.recipient
    }
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }
    pub fn balance(&self) -> U256 {
        self.balance
    }
    pub fn total_released(&self) -> U256 {
        self.total_released
    }
    pub fn total_deposited(&self) -> U256 {
        self.total_deposited
    }
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expiration
    }

    pub fn add_deposit(&mut self, caller: Address, amount: U256) -> Result<(), ChannelError> {
        if caller != self.sender {
            return Err(ChannelError::Unauthorized);
        }
        if !self.is_open {
            return Err(ChannelError::ChannelClosed);
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(ChannelError::BalanceOverflow)?;
        // total_deposited >= balance, so this overflows first.
        let total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(ChannelError::BalanceOverflow)?;

        self.balance = balance;
        self.total_deposited = total_deposited;
        Ok(())
    }

    /// Pay the recipient up to `cumulative_amount` and keep the channel open.
    ///
    /// Redeeming the amount that was already released is a replay and
    /// rejected as stale.
    pub fn withdraw(
        &mut self,
        caller: Address,
        cumulative_amount: U256,
        sig: Signature,
    ) -> Result<Settlement, ChannelError> {
        let delta = self.check_redeem(caller, cumulative_amount, sig)?;
        if delta.is_zero() {
            return Err(ChannelError::StaleAuthorization);
        }

        self.release(cumulative_amount, delta);
        Ok(Settlement {
            to_recipient: delta,
            to_sender: U256::zero(),
        })
    }

    /// Pay the recipient up to `cumulative_amount`, refund the rest to the
    /// sender and close the channel.
    ///
    /// Unlike [withdraw](Self::withdraw), closing with exactly the released
    /// amount is accepted: the recipient gets nothing more, the sender gets
    /// the remaining balance.
    pub fn close(
        &mut self,
        caller: Address,
        cumulative_amount: U256,
        sig: Signature,
    ) -> Result<Settlement, ChannelError> {
        let delta = self.check_redeem(caller, cumulative_amount, sig)?;

        self.release(cumulative_amount, delta);
        let refund = self.balance;
        self.balance = U256::zero();
        self.is_open = false;
        Ok(Settlement {
            to_recipient: delta,
            to_sender: refund,
        })
    }

    /// Return everything left to the sender once the channel expired. Anyone
    /// may trigger this, the funds can only go to the sender.
    pub fn timeout(&mut self, now: Timestamp) -> Result<Settlement, ChannelError> {
        if !self.is_open {
            return Err(ChannelError::ChannelClosed);
        }
        if !self.is_expired(now) {
            return Err(ChannelError::NotYetExpired);
        }

        let refund = self.balance;
        self.balance = U256::zero();
        self.is_open = false;
        Ok(Settlement {
            to_recipient: U256::zero(),
            to_sender: refund,
        })
    }

    /// Shared precondition checks of withdraw and close. Returns how much
    /// more the recipient is owed.
    fn check_redeem(
        &self,
        caller: Address,
        cumulative_amount: U256,
        sig: Signature,
    ) -> Result<U256, ChannelError> {
        if caller != self.recipient {
            return Err(ChannelError::Unauthorized);
        }
        if !self.is_open {
            return Err(ChannelError::ChannelClosed);
        }
        if verify(self.id, cumulative_amount, sig)? != self.sender {
            return Err(ChannelError::InvalidSignature);
        }
        if cumulative_amount < self.total_released {
            return Err(ChannelError::StaleAuthorization);
        }
        let delta = cumulative_amount - self.total_released;
        if delta > self.balance {
            return Err(ChannelError::InsufficientFunds);
        }
        Ok(delta)
    }

    fn release(&mut self, cumulative_amount: U256, delta: U256) {
        self.total_released = cumulative_amount;
        self.balance -= delta;
    }
}
