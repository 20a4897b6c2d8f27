use std::sync::{Mutex, MutexGuard, PoisonError};

use super::State;
use crate::seed;
use crate::store::{self, Store};

/// Owns the one [`State`] value and keeps the store in step with it.
///
/// Every replacement happens under a single lock: the updater sees the full prior state, the
/// result is persisted, and only then does it become visible to readers.
pub struct Container {
    state: Mutex<State>,
    store: Box<dyn Store>,
    key: String,
}

impl Container {
    /// Restores the state saved under `key`, falling back to a fresh seed when nothing usable is
    /// stored. The restored state is written back straight away.
    pub fn load(store: Box<dyn Store>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = restore(store.as_ref(), &key);
        let container = Self {
            state: Mutex::new(state),
            store,
            key,
        };
        container.persist(&container.lock());
        container
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> State {
        self.lock().clone()
    }

    /// Replaces the state with whatever `updater` derives from it, and persists the result.
    pub fn replace(&self, updater: impl FnOnce(&State) -> State) -> State {
        match self.try_replace(|state| Ok::<_, std::convert::Infallible>(updater(state))) {
            Ok(state) => state,
            Err(infallible) => match infallible {},
        }
    }

    /// Like [`Container::replace`], but an updater error leaves both memory and storage as they
    /// were.
    pub fn try_replace<E>(
        &self,
        updater: impl FnOnce(&State) -> Result<State, E>,
    ) -> Result<State, E> {
        let mut state = self.lock();
        let next = updater(&state)?;
        // Blocks the calling worker thread, lock held, until the store has synced the write.
        self.persist(&next);
        *state = next.clone();
        Ok(next)
    }

    /// Throws away all changes and starts over from a freshly generated seed.
    pub fn reset(&self) -> State {
        log::info!("resetting state to seed");
        self.replace(|_| seed::state())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &State) {
        // Write failures are only logged; memory stays authoritative.
        if let Err(e) = store::save(self.store.as_ref(), &self.key, state) {
            log::error!("failed to persist state: {:#}", anyhow::Error::from(e));
        }
    }
}

fn restore(store: &dyn Store, key: &str) -> State {
    let state = store::load(store, key, seed::state);
    match state.validate() {
        Ok(()) => state,
        Err(e) => {
            log::warn!("stored state is invalid ({}), starting from seed", e);
            seed::state()
        }
    }
}
