//! The single application state value and the container that owns it.

mod container;
mod entities;

pub use container::Container;
pub use entities::{InvalidState, State};
