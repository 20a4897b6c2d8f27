//! This library contains definitions for the presentation layer: the HTML pages a browser
//! interacts with, and a small JSON API over the same state.

use app::{locale::Formatter, Container};
use rocket::{Build, Rocket};
use state::RocketState;
use thiserror::Error;

mod error;
mod pages;
mod routes;
mod state;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to compile page templates")]
    Templates(#[from] minijinja::Error),
}

pub fn register(
    rocket: Rocket<Build>,
    container: Container,
    formatter: Formatter,
) -> Result<Rocket<Build>, Error> {
    let templates = pages::Templates::new()?;
    let state = RocketState {
        container,
        formatter,
        templates,
    };
    Ok(pages::register(routes::register(rocket.manage(state))))
}
