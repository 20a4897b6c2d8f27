//! The fixed starting point of the demo, used on first run and on every reset.

use chrono::{Duration, Utc};

use crate::cents::Cents;
use crate::state::State;
use crate::transaction::Transaction;
use crate::user::{self, User};

pub const CURRENT_USER_ID: &str = "u1";

const USERS: [(&str, &str, &str, i64); 5] = [
    ("u1", "Alex Morgan", "@alexmorgan", 12_500),
    ("u2", "Jamie Chen", "@jamiechen", 8_650),
    ("u3", "Priya Patel", "@priyap", 23_040),
    ("u4", "Sam Rivera", "@samrivera", 4_210),
    ("u5", "Taylor Kim", "@tkim", 15_775),
];

/// Past transfers as (from, to, cents, note, hours ago), newest first. They are history only;
/// the balances above already account for them.
const TRANSACTIONS: [(&str, &str, i64, &str, i64); 3] = [
    ("u2", "u1", 1_850, "Dinner split", 2),
    ("u1", "u3", 4_200, "Concert tickets", 26),
    ("u4", "u1", 950, "Coffee", 74),
];

/// Builds a fresh seed state. Transaction ids and timestamps are regenerated on every call.
pub fn state() -> State {
    let now = Utc::now();
    State {
        users: USERS
            .iter()
            .map(|&(id, name, handle, balance)| User {
                id: user::Id::new(id),
                name: name.to_owned(),
                handle: handle.to_owned(),
                avatar: format!("https://i.pravatar.cc/150?u={}", id),
                balance: Cents(balance),
            })
            .collect(),
        transactions: TRANSACTIONS
            .iter()
            .map(|&(from, to, amount, note, hours_ago)| Transaction {
                timestamp: now - Duration::hours(hours_ago),
                ..Transaction::new(
                    user::Id::new(from),
                    user::Id::new(to),
                    Cents(amount),
                    Some(note.to_owned()),
                )
            })
            .collect(),
        current_user_id: user::Id::new(CURRENT_USER_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_valid() {
        assert_eq!(state().validate(), Ok(()));
    }

    #[test]
    fn seed_renders_from_the_first_user() {
        let seed = state();
        let current = seed.current_user().unwrap();
        assert_eq!(current.name, "Alex Morgan");
        assert_eq!(current.balance, Cents(12_500));
        assert_eq!(seed.users[1].balance, Cents(8_650));
    }

    #[test]
    fn seed_transactions_are_newest_first() {
        let seed = state();
        assert_eq!(seed.transactions.len(), 3);
        assert!(seed
            .transactions
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[test]
    fn reseeding_keeps_structure_but_not_ids() {
        let (a, b) = (state(), state());
        assert_eq!(a.users, b.users);
        assert_eq!(a.current_user_id, b.current_user_id);
        for (x, y) in a.transactions.iter().zip(&b.transactions) {
            assert_ne!(x.id, y.id);
            assert_eq!((&x.from, &x.to, x.amount, &x.note), (&y.from, &y.to, y.amount, &y.note));
        }
    }
}
