//! ecsctl: manage Aliyun ECS accounts and instances from the terminal.

mod menu;
mod store;

use std::env;

use store::{AccountStore, JsonFileRepository};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The account store lives next to the tool by default; point
    // ECSCTL_ACCOUNTS_FILE elsewhere to share one between checkouts.
    let path = env::var("ECSCTL_ACCOUNTS_FILE").unwrap_or_else(|_| "access.json".to_string());
    log::debug!("using account store at {path}");

    let store = AccountStore::new(JsonFileRepository::new(path));
    menu::run(&store)
}
