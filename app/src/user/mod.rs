//! Users of the demo. The set is fixed at seed time; only balances change afterwards.

mod entities;

pub use entities::{Id, User};

pub fn find<'a>(users: &'a [User], id: &Id) -> Option<&'a User> {
    users.iter().find(|user| &user.id == id)
}

/// Everyone except `current`, in display order.
pub fn contacts<'a>(users: &'a [User], current: &'a Id) -> impl Iterator<Item = &'a User> {
    users.iter().filter(move |user| &user.id != current)
}

/// Display name for `id`, falling back to the raw id for users that no longer exist.
pub fn display_name<'a>(users: &'a [User], id: &'a Id) -> &'a str {
    find(users, id).map_or(id.as_str(), |user| user.name.as_str())
}
