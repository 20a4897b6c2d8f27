//! Server-rendered pages. Every request reads the state afresh; every form post funnels through
//! the state container and redirects back to the main page.

use app::locale::Formatter;
use app::{transfer, user, Cents};
use minijinja::Environment;
use rocket::{
    form::Form,
    get,
    http::Status,
    post,
    request::FlashMessage,
    response::{content::RawHtml, Flash, Redirect},
    routes, Build, FromForm, Rocket, State,
};
use serde::Serialize;

use crate::state::RocketState;

mod view;

use view::{Notice, Page};

const INDEX: &str = "index.html";

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    fn render(&self, name: &str, context: impl Serialize) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

pub fn register(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/", routes![index, submit_transfer, reset])
}

/// Fields of the transfer form. Everything is optional so that a half-filled form reaches the
/// handler instead of being rejected by the form parser.
#[derive(Debug, FromForm)]
struct TransferForm {
    recipient: Option<String>,
    amount: Option<String>,
    note: Option<String>,
}

/// The main page. `to` preselects a recipient in the transfer form.
#[get("/?<to>")]
fn index(
    state: &State<RocketState>,
    to: Option<String>,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Status> {
    let selected = to.map(user::Id::new);
    let notice = flash.map(|flash| Notice {
        kind: flash.kind().to_owned(),
        message: flash.message().to_owned(),
    });
    let current = state.container.get();
    let page = Page::build(&current, &state.formatter, selected.as_ref(), notice).ok_or_else(
        || {
            log::error!(
                "current user {:?} does not exist",
                current.current_user_id
            );
            Status::InternalServerError
        },
    )?;
    state
        .templates
        .render(INDEX, &page)
        .map(RawHtml)
        .map_err(|e| {
            log::error!("failed to render {}: {:#}", INDEX, e);
            Status::InternalServerError
        })
}

/// Applies a transfer from the form. The redirect always lands on a fresh, empty form,
/// whether or not the transfer went through; the outcome is reported as a flash message.
#[post("/transfer", data = "<form>")]
fn submit_transfer(state: &State<RocketState>, form: Form<TransferForm>) -> Flash<Redirect> {
    let back = || Redirect::to("/");
    let recipient = match form.recipient.as_deref().map(str::trim) {
        Some(recipient) if !recipient.is_empty() => user::Id::new(recipient),
        _ => return Flash::error(back(), "Choose who to pay."),
    };
    let amount = match Cents::parse(form.amount.as_deref().unwrap_or_default()) {
        Ok(amount) => amount,
        Err(e) => {
            log::warn!("rejected transfer form: {}", e);
            return Flash::error(back(), format!("Enter a valid amount ({}).", e));
        }
    };

    let result = state.container.try_replace(|current| {
        transfer::transfer(current, &recipient, amount, form.note.as_deref())
    });
    match result {
        Ok(next) => {
            let name = user::display_name(&next.users, &recipient);
            log::info!("transferred {:?} to {:?}", amount, recipient);
            Flash::success(
                back(),
                format!("Sent {} to {}.", state.formatter.amount(amount), name),
            )
        }
        Err(e) => {
            log::warn!("rejected transfer to {:?}: {}", recipient, e);
            Flash::error(back(), rejection_message(&e, &state.formatter))
        }
    }
}

#[post("/reset")]
fn reset(state: &State<RocketState>) -> Flash<Redirect> {
    state.container.reset();
    Flash::success(Redirect::to("/"), "Demo data has been reset.")
}

fn rejection_message(e: &transfer::Error, formatter: &Formatter) -> String {
    match e {
        transfer::Error::UnknownSender(_) => {
            "Your account could not be found. Try resetting the demo.".to_owned()
        }
        transfer::Error::UnknownRecipient(_) => "That recipient does not exist.".to_owned(),
        transfer::Error::SelfTransfer => "You cannot send money to yourself.".to_owned(),
        transfer::Error::InvalidAmount(_) => "The amount must be greater than zero.".to_owned(),
        transfer::Error::InsufficientBalance { balance, amount } => format!(
            "Insufficient balance: you tried to send {} but have {}.",
            formatter.amount(*amount),
            formatter.amount(*balance)
        ),
        transfer::Error::BalanceOverflow => "The recipient cannot accept that amount.".to_owned(),
    }
}
