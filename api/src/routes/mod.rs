//! JSON API. Add top-level routes as submodules here.

use app::transaction::Transaction;
use app::user::User;
use chrono::{DateTime, Utc};
use rocket::{Build, Rocket};
use rocket_okapi::{
    openapi_get_routes,
    swagger_ui::{make_swagger_ui, DefaultModelRendering, SwaggerUIConfig},
};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

mod state;
mod transfers;

const VERSION: &str = "/v0";

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct UserModel {
    /// Opaque user identifier.
    id: String,
    /// Display name.
    name: String,
    /// Cosmetic handle, e.g. `@alexmorgan`.
    handle: String,
    /// Avatar image URI.
    avatar: String,
    /// Current balance in cents.
    balance: i64,
}

impl UserModel {
    fn from_entity(user: &User) -> Self {
        Self {
            id: user.id.0.clone(),
            name: user.name.clone(),
            handle: user.handle.clone(),
            avatar: user.avatar.clone(),
            balance: user.balance.0,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct TransactionModel {
    /// Unique transaction identifier.
    id: Uuid,
    /// Sender user id.
    from: String,
    /// Recipient user id.
    to: String,
    /// Amount moved, in cents.
    amount: i64,
    /// Free-text note attached by the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    /// Creation time.
    timestamp: DateTime<Utc>,
}

impl TransactionModel {
    fn from_entity(tx: &Transaction) -> Self {
        Self {
            id: tx.id.0,
            from: tx.from.0.clone(),
            to: tx.to.0.clone(),
            amount: tx.amount.0,
            note: tx.note.clone(),
            timestamp: tx.timestamp,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct StateModel {
    /// All users, in display order.
    users: Vec<UserModel>,
    /// All transactions, newest first.
    transactions: Vec<TransactionModel>,
    /// The user whose perspective the interface renders. Every transfer is sent by this user.
    current_user_id: String,
}

impl StateModel {
    fn from_entity(state: &app::State) -> Self {
        Self {
            users: state.users.iter().map(UserModel::from_entity).collect(),
            transactions: state
                .transactions
                .iter()
                .map(TransactionModel::from_entity)
                .collect(),
            current_user_id: state.current_user_id.0.clone(),
        }
    }
}

pub fn register(rocket: Rocket<Build>) -> Rocket<Build> {
    let rocket = rocket.mount(
        VERSION,
        openapi_get_routes![state::get, state::reset, transfers::post],
    );
    mount_swagger(rocket)
}

pub fn mount_swagger(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount(
        format!("{}/swagger", VERSION),
        make_swagger_ui(&SwaggerUIConfig {
            url: "../openapi.json".to_owned(),
            default_model_rendering: DefaultModelRendering::Model,
            show_extensions: true,
            ..Default::default()
        }),
    )
}
