use tracing::{debug, info, warn};

use super::{
    channel_address, ChannelError, ChannelId, ChannelState, DeployParams, OpenError, Settlement,
};
use crate::{
    ledger::Ledger,
    packed::types::{Address, Signature, U256},
};

/// A channel running on a [Ledger]: the calls actors make on-chain.
///
/// Every call either commits its whole effect (state change and payouts) or
/// returns an error without changing anything.
#[derive(Debug)]
pub struct PaymentChannel<'l, L: Ledger> {
    ledger: &'l L,
    state: ChannelState,
}

impl<'l, L: Ledger> PaymentChannel<'l, L> {
    /// Deploy a new channel from `sender`'s `nonce`-th transaction, with
    /// `value` attached as initial deposit.
    pub fn deploy(
        ledger: &'l L,
        sender: Address,
        nonce: u64,
        params: DeployParams,
        value: U256,
    ) -> Result<Self, OpenError> {
        let id = channel_address(sender, nonce);
        let state = ChannelState::open(
            id,
            sender,
            params.recipient,
            params.duration,
            value,
            ledger.now(),
        )
        .map_err(|e| {
            warn!(?sender, recipient = ?params.recipient, error = %e, "channel deployment rejected");
            e
        })?;

        info!(
            channel = ?id,
            ?sender,
            recipient = ?params.recipient,
            expiration = state.expiration(),
            deposit = %value,
            "channel opened"
        );
        Ok(Self { ledger, state })
    }

    pub fn id(&self) -> ChannelId {
        self.state.id()
    }

    /// Read-only view, e.g. for displaying the channel.
    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state.is_expired(self.ledger.now())
    }

    pub fn add_deposit(&mut self, caller: Address, amount: U256) -> Result<(), ChannelError> {
        self.state
            .add_deposit(caller, amount)
            .map_err(|e| self.rejected("add_deposit", caller, e))?;

        debug!(
            channel = ?self.id(),
            amount = %amount,
            balance = %self.state.balance(),
            "deposit added"
        );
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        caller: Address,
        cumulative_amount: U256,
        sig: Signature,
    ) -> Result<Settlement, ChannelError> {
        let settlement = self
            .state
            .withdraw(caller, cumulative_amount, sig)
            .map_err(|e| self.rejected("withdraw", caller, e))?;

        info!(
            channel = ?self.id(),
            cumulative_amount = %cumulative_amount,
            paid = %settlement.to_recipient,
            balance = %self.state.balance(),
            "withdrawal redeemed"
        );
        self.pay_out(settlement);
        Ok(settlement)
    }

    pub fn close(
        &mut self,
        caller: Address,
        cumulative_amount: U256,
        sig: Signature,
    ) -> Result<Settlement, ChannelError> {
        let settlement = self
            .state
            .close(caller, cumulative_amount, sig)
            .map_err(|e| self.rejected("close", caller, e))?;

        info!(
            channel = ?self.id(),
            cumulative_amount = %cumulative_amount,
            to_recipient = %settlement.to_recipient,
            to_sender = %settlement.to_sender,
            "channel closed"
        );
        self.pay_out(settlement);
        Ok(settlement)
    }

    /// `caller` is only logged: once expired anybody may trigger the refund.
    pub fn timeout(&mut self, caller: Address) -> Result<Settlement, ChannelError> {
        let now = self.ledger.now();
        let settlement = self
            .state
            .timeout(now)
            .map_err(|e| self.rejected("timeout", caller, e))?;

        info!(
            channel = ?self.id(),
            ?caller,
            now,
            refunded = %settlement.to_sender,
            "channel timed out"
        );
        self.pay_out(settlement);
        Ok(settlement)
    }

    fn pay_out(&self, settlement: Settlement) {
        if !settlement.to_recipient.is_zero() {
            self.ledger
                .transfer(self.state.recipient(), settlement.to_recipient);
        }
        if !settlement.to_sender.is_zero() {
            self.ledger.transfer(self.state.sender(), settlement.to_sender);
        }
    }

    fn rejected(&self, op: &'static str, caller: Address, e: ChannelError) -> ChannelError {
        warn!(channel = ?self.id(), op, ?caller, error = %e, "call rejected");
        e
    }
}
