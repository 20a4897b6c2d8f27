//! The one business rule of the demo: moving money from the current user to someone else.
//!
//! [`transfer`] is a pure function from a state to its successor. It either returns a complete
//! new state, with both balances updated and the new transaction at the head of the history,
//! or an [`Error`] saying why nothing happened. There is no partially applied outcome.

use thiserror::Error;

use crate::cents::Cents;
use crate::state::State;
use crate::transaction::{self, Transaction};
use crate::user;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("sender {0:?} does not exist")]
    UnknownSender(user::Id),
    #[error("recipient {0:?} does not exist")]
    UnknownRecipient(user::Id),
    #[error("cannot transfer money to yourself")]
    SelfTransfer,
    #[error("amount must be positive, got {0:?}")]
    InvalidAmount(Cents),
    #[error("insufficient balance")]
    InsufficientBalance { balance: Cents, amount: Cents },
    #[error("recipient balance would overflow")]
    BalanceOverflow,
}

/// Pays `amount` from the current user to `recipient_id`, attaching `note` if it is not blank.
pub fn transfer(
    state: &State,
    recipient_id: &user::Id,
    amount: Cents,
    note: Option<&str>,
) -> Result<State, Error> {
    let sender = state
        .current_user()
        .ok_or_else(|| Error::UnknownSender(state.current_user_id.clone()))?;
    let recipient = user::find(&state.users, recipient_id)
        .ok_or_else(|| Error::UnknownRecipient(recipient_id.clone()))?;
    if sender.id == recipient.id {
        return Err(Error::SelfTransfer);
    }
    if !amount.is_positive() {
        return Err(Error::InvalidAmount(amount));
    }
    let debited = sender
        .balance
        .checked_sub(amount)
        .filter(|balance| balance.0 >= 0)
        .ok_or(Error::InsufficientBalance {
            balance: sender.balance,
            amount,
        })?;
    let credited = recipient
        .balance
        .checked_add(amount)
        .ok_or(Error::BalanceOverflow)?;

    let tx = Transaction::new(
        sender.id.clone(),
        recipient.id.clone(),
        amount,
        transaction::normalize_note(note),
    );
    let mut next = state.clone();
    for user in next.users.iter_mut() {
        if user.id == tx.from {
            user.balance = debited;
        } else if user.id == tx.to {
            user.balance = credited;
        }
    }
    next.transactions.insert(0, tx);
    Ok(next)
}
