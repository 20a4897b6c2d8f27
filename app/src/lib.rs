//! Domain layer of the peer-to-peer transfer demo: users, transactions, the transfer rule, and
//! the state container that persists everything to a key-value store.

pub mod cents;
pub mod locale;
pub mod seed;
pub mod state;
pub mod store;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use cents::Cents;
pub use state::{Container, State};
