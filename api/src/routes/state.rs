//! Routes for reading and resetting the whole state.

use rocket::{get, post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::Serialize;

use super::StateModel;
use crate::state::RocketState;

#[derive(Debug, Serialize, JsonSchema)]
pub(super) struct StateResponse {
    state: StateModel,
}

impl StateResponse {
    pub(super) fn new(state: &app::State) -> Self {
        Self {
            state: StateModel::from_entity(state),
        }
    }
}

/// Get the current state: users, transaction history and the current user.
#[openapi(tag = "State")]
#[get("/state")]
pub(super) fn get(state: &State<RocketState>) -> Json<StateResponse> {
    Json(StateResponse::new(&state.container.get()))
}

/// Discard all changes and start over from the seed data.
#[openapi(tag = "State")]
#[post("/reset")]
pub(super) fn reset(state: &State<RocketState>) -> Json<StateResponse> {
    Json(StateResponse::new(&state.container.reset()))
}
