use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cents::Cents;
use crate::user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub Uuid);

/// A completed transfer. Transactions are never edited once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub from: user::Id,
    pub to: user::Id,
    pub amount: Cents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// How a transaction relates to a given user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The user paid.
    Outgoing,
    /// The user was paid.
    Incoming,
    /// The user is on neither side.
    Unrelated,
}

impl Transaction {
    /// Creates a transaction stamped with a fresh id and the current time.
    pub fn new(from: user::Id, to: user::Id, amount: Cents, note: Option<String>) -> Self {
        Self {
            id: Id(Uuid::new_v4()),
            from,
            to,
            amount,
            note,
            timestamp: Utc::now(),
        }
    }

    pub fn direction(&self, user_id: &user::Id) -> Direction {
        if &self.from == user_id {
            Direction::Outgoing
        } else if &self.to == user_id {
            Direction::Incoming
        } else {
            Direction::Unrelated
        }
    }

    /// The amount as seen by `user_id`: negative when they paid.
    pub fn signed_amount(&self, user_id: &user::Id) -> Cents {
        match self.direction(user_id) {
            Direction::Outgoing => Cents(-self.amount.0),
            Direction::Incoming | Direction::Unrelated => self.amount,
        }
    }
}
