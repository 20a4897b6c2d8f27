mod entities;

pub use entities::{Direction, Id, Transaction};

/// Normalizes a free-text note: surrounding whitespace is dropped and blank notes become `None`.
pub fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_owned)
}
