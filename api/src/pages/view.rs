//! Turns the domain state into what the page template renders, seen from the current user.

use app::locale::Formatter;
use app::transaction::{Direction, Transaction};
use app::user::{self, User};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Page {
    pub lang: &'static str,
    pub me: Header,
    pub contacts: Vec<Contact>,
    pub transactions: Vec<Row>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Header {
    pub name: String,
    pub handle: String,
    pub avatar: String,
    pub balance: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Contact {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub avatar: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Row {
    pub label: String,
    pub amount: String,
    pub outgoing: bool,
    pub note: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Notice {
    pub kind: String,
    pub message: String,
}

impl Page {
    /// Builds the page for the state's current user, or `None` if that user does not exist.
    pub fn build(
        state: &app::State,
        formatter: &Formatter,
        selected: Option<&user::Id>,
        notice: Option<Notice>,
    ) -> Option<Self> {
        let me = state.current_user()?;
        Some(Self {
            lang: formatter.locale.tag(),
            me: Header {
                name: me.name.clone(),
                handle: me.handle.clone(),
                avatar: me.avatar.clone(),
                balance: formatter.amount(me.balance),
            },
            contacts: user::contacts(&state.users, &me.id)
                .map(|contact| Contact::new(contact, selected))
                .collect(),
            transactions: state
                .transactions
                .iter()
                .map(|tx| Row::new(tx, &state.users, me, formatter))
                .collect(),
            notice,
        })
    }
}

impl Contact {
    fn new(user: &User, selected: Option<&user::Id>) -> Self {
        Self {
            id: user.id.0.clone(),
            name: user.name.clone(),
            handle: user.handle.clone(),
            avatar: user.avatar.clone(),
            selected: selected == Some(&user.id),
        }
    }
}

impl Row {
    fn new(tx: &Transaction, users: &[User], me: &User, formatter: &Formatter) -> Self {
        let direction = tx.direction(&me.id);
        let label = match direction {
            Direction::Outgoing => format!("Paid to {}", user::display_name(users, &tx.to)),
            Direction::Incoming => format!("Paid by {}", user::display_name(users, &tx.from)),
            Direction::Unrelated => format!(
                "{} paid {}",
                user::display_name(users, &tx.from),
                user::display_name(users, &tx.to)
            ),
        };
        let amount = match direction {
            Direction::Unrelated => formatter.amount(tx.amount),
            Direction::Outgoing | Direction::Incoming => {
                formatter.signed_amount(tx.signed_amount(&me.id))
            }
        };
        Self {
            label,
            amount,
            outgoing: direction == Direction::Outgoing,
            note: tx.note.clone(),
            timestamp: formatter.timestamp(&tx.timestamp),
        }
    }
}
