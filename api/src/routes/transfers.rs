use app::{transfer, user, Cents};
use rocket::{post, serde::json::Json, State};
use rocket_okapi::openapi;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::state::StateResponse;
use crate::{
    error::{self, JsonResult},
    state::RocketState,
};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransferRequest {
    /// User to pay. Must differ from the current user.
    recipient_id: String,
    /// Amount to send, in cents.
    amount_cents: i64,
    /// Optional free-text note. Blank notes are dropped.
    note: Option<String>,
}

/// Error during transfer.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum Error {
    /// The current user no longer exists. Resetting the state fixes this.
    UnknownSender,
    /// No user has the given recipient id.
    UnknownRecipient,
    /// The recipient is the current user.
    SelfTransfer,
    /// The amount is zero or negative.
    InvalidAmount,
    /// The current user does not have enough money.
    InsufficientBalance,
    /// The recipient balance cannot hold the amount.
    BalanceOverflow,
}

/// Send money from the current user to someone else. The new transaction is returned at the
/// head of the resulting state's transaction list.
#[openapi(tag = "Transfers")]
#[post("/transfers", data = "<req>")]
pub(super) fn post(
    state: &State<RocketState>,
    req: Json<TransferRequest>,
) -> JsonResult<StateResponse, Error> {
    let recipient = user::Id::new(req.recipient_id.as_str());
    state
        .container
        .try_replace(|current| {
            transfer::transfer(
                current,
                &recipient,
                Cents(req.amount_cents),
                req.note.as_deref(),
            )
        })
        .map(|next| {
            log::info!(
                "transferred {} cents to {:?}",
                req.amount_cents,
                recipient
            );
            Json(StateResponse::new(&next))
        })
        .map_err(|e| {
            log::warn!("rejected transfer to {:?}: {}", recipient, e);
            let description = e.to_string();
            match e {
                transfer::Error::UnknownSender(_) => {
                    error::bad_request(Error::UnknownSender, description)
                }
                transfer::Error::UnknownRecipient(_) => {
                    error::bad_request(Error::UnknownRecipient, description)
                }
                transfer::Error::SelfTransfer => {
                    error::bad_request(Error::SelfTransfer, description)
                }
                transfer::Error::InvalidAmount(_) => {
                    error::bad_request(Error::InvalidAmount, description)
                }
                transfer::Error::InsufficientBalance { .. } => {
                    error::bad_request(Error::InsufficientBalance, description)
                }
                transfer::Error::BalanceOverflow => {
                    error::bad_request(Error::BalanceOverflow, description)
                }
            }
        })
}
