use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cents::Cents;
use crate::transaction::{self, Transaction};
use crate::user::{self, User};

/// Everything the demo knows: users in display order, transactions newest first, and whose
/// perspective the interface renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub users: Vec<User>,
    pub transactions: Vec<Transaction>,
    pub current_user_id: user::Id,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidState {
    #[error("current user {0:?} does not exist")]
    UnknownCurrentUser(user::Id),
    #[error("user id {0:?} is used more than once")]
    DuplicateUser(user::Id),
    #[error("handle {0:?} is used more than once")]
    DuplicateHandle(String),
    #[error("user {0:?} has a negative balance")]
    NegativeBalance(user::Id),
    #[error("balances add up to more than can be represented")]
    BalanceOverflow,
    #[error("transaction id {0:?} is used more than once")]
    DuplicateTransaction(transaction::Id),
    #[error("transaction {0:?} does not move a positive amount between two users")]
    MalformedTransaction(transaction::Id),
}

impl State {
    pub fn current_user(&self) -> Option<&User> {
        user::find(&self.users, &self.current_user_id)
    }

    /// Sum of all balances, or `None` if it does not fit. Transfers never change it.
    pub fn total_balance(&self) -> Option<Cents> {
        self.users
            .iter()
            .try_fold(Cents::default(), |total, user| total.checked_add(user.balance))
    }

    /// Checks the invariants every reachable state satisfies. Used to vet records read back
    /// from storage.
    pub fn validate(&self) -> Result<(), InvalidState> {
        let mut ids = HashSet::new();
        let mut handles = HashSet::new();
        for user in &self.users {
            if !ids.insert(&user.id) {
                return Err(InvalidState::DuplicateUser(user.id.clone()));
            }
            if !handles.insert(user.handle.as_str()) {
                return Err(InvalidState::DuplicateHandle(user.handle.clone()));
            }
            if user.balance.0 < 0 {
                return Err(InvalidState::NegativeBalance(user.id.clone()));
            }
        }
        if self.total_balance().is_none() {
            return Err(InvalidState::BalanceOverflow);
        }
        if self.current_user().is_none() {
            return Err(InvalidState::UnknownCurrentUser(
                self.current_user_id.clone(),
            ));
        }

        let mut transaction_ids = HashSet::new();
        for tx in &self.transactions {
            if !transaction_ids.insert(tx.id) {
                return Err(InvalidState::DuplicateTransaction(tx.id));
            }
            if !tx.amount.is_positive() || tx.from == tx.to {
                return Err(InvalidState::MalformedTransaction(tx.id));
            }
        }
        Ok(())
    }
}
