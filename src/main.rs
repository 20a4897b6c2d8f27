use std::path::PathBuf;

use anyhow::Context;
use app::locale::{Currency, Formatter, Locale};
use app::store::{FileStore, MemoryStore, Store};
use app::Container;
use rocket::{Build, Rocket};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
struct StorageConfig {
    /// Where state is kept between runs. Without it, state lasts only as long as the process.
    directory: Option<PathBuf>,
    #[serde(default = "StorageConfig::default_key")]
    key: String,
}

impl StorageConfig {
    fn default_key() -> String {
        "p2p-demo-state".to_owned()
    }

    fn into_store(self) -> anyhow::Result<(Box<dyn Store>, String)> {
        let store: Box<dyn Store> = match self.directory {
            Some(directory) => {
                log::info!("keeping state in {:?}", directory);
                Box::new(
                    FileStore::open(&directory)
                        .with_context(|| format!("cannot open storage at {:?}", directory))?,
                )
            }
            None => {
                log::warn!("no storage directory configured, state will not survive restarts");
                Box::new(MemoryStore::new())
            }
        };
        Ok((store, self.key))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            key: Self::default_key(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DisplayConfig {
    #[serde(default)]
    locale: Locale,
    #[serde(default)]
    currency: Currency,
}

impl DisplayConfig {
    fn into_formatter(self) -> Formatter {
        Formatter::new(self.locale, self.currency)
    }
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let rocket = build_server()?;
    let _rocket = rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("server failed: {}", e))?;
    Ok(())
}

fn build_server() -> anyhow::Result<Rocket<Build>> {
    let rocket = rocket::build();
    let config: Config = rocket
        .figment()
        .extract()
        .context("invalid configuration")?;

    let (store, key) = config.storage.into_store()?;
    let container = Container::load(store, key);
    let state = container.get();
    log::info!(
        "serving {} users and {} transactions from {:?}",
        state.users.len(),
        state.transactions.len(),
        container.key()
    );

    Ok(api::register(
        rocket,
        container,
        config.display.into_formatter(),
    )?)
}
