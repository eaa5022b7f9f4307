//! The interactive menu shell.
//!
//! A plain state machine: each function is one menu level, each selected
//! option a transition. API failures are printed and control returns to the
//! menu; nothing is retried.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, Select};
use log::debug;

use ecsctl_aliyun_ecs::{EcsClient, Image, Instance, Region};

use crate::store::{Account, AccountRepository, AccountStore};

/// Run the main menu loop until the operator exits.
pub fn run<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    loop {
        let items = ["Manage Accounts", "List Images", "Manage Instances", "Exit"];
        let selection = Select::new()
            .with_prompt("Main Menu")
            .items(&items)
            .default(0)
            .interact()?;

        match selection {
            0 => account_menu(store)?,
            1 => list_images(store)?,
            2 => instance_menu(store)?,
            _ => break,
        }
    }
    Ok(())
}

fn account_menu<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let items = [
        "Add New Account",
        "Remove Account",
        "Show All Accounts",
        "Go Back",
    ];
    let selection = Select::new()
        .with_prompt("Account Management")
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => add_account(store)?,
        1 => remove_account(store)?,
        2 => show_accounts(store)?,
        _ => {}
    }
    Ok(())
}

fn add_account<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let date: String = Input::new().with_prompt("Date").interact_text()?;
    let access_key_id: String = Input::new().with_prompt("Access key id").interact_text()?;
    let access_key_secret: String = Password::new()
        .with_prompt("Access key secret")
        .interact()?;

    let labels: Vec<String> = Region::ALL
        .iter()
        .map(|r| format!("{} ({})", r.as_str(), r.label()))
        .collect();
    let region = Region::ALL[Select::new()
        .with_prompt("Region")
        .items(&labels)
        .default(2)
        .interact()?];

    match store.add(name, date, access_key_id, access_key_secret, region) {
        Ok(account) => println!(
            "New account added: ID {}, Name {}",
            account.id, account.name
        ),
        Err(e) => println!("Failed to add account: {e}"),
    }
    Ok(())
}

fn remove_account<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let id: String = Input::new()
        .with_prompt("ID of the account to remove")
        .interact_text()?;
    match store.remove(id.trim()) {
        Ok(0) => println!("No account with ID {}.", id.trim()),
        Ok(n) => println!("Removed {n} account(s) with ID {}.", id.trim()),
        Err(e) => println!("Failed to remove account: {e}"),
    }
    Ok(())
}

fn show_accounts<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let accounts = store.list()?;
    if accounts.is_empty() {
        println!("No accounts stored yet.");
        return Ok(());
    }
    println!("Existing Accounts:");
    for account in &accounts {
        println!(
            "{}. {} (Region: {}, created: {})",
            account.id,
            account.name,
            account.region_id.label(),
            account.date
        );
    }
    Ok(())
}

/// Let the operator pick one of the stored accounts. `None` when the store
/// is empty.
fn select_account(accounts: &[Account]) -> Result<Option<&Account>> {
    if accounts.is_empty() {
        println!("No accounts stored yet. Add one first.");
        return Ok(None);
    }
    let labels: Vec<String> = accounts
        .iter()
        .map(|a| format!("{} (Region: {})", a.name, a.region_id.label()))
        .collect();
    let selection = Select::new()
        .with_prompt("Account")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(accounts.get(selection))
}

fn client_for(account: &Account) -> Result<EcsClient> {
    debug!("creating client for account {}", account.id);
    Ok(EcsClient::new(account.credential(), account.region_id)?)
}

fn list_images<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let accounts = store.list()?;
    let Some(account) = select_account(&accounts)? else {
        return Ok(());
    };

    println!(
        "Listing images for account: {} (Region: {})",
        account.name,
        account.region_id.as_str()
    );
    let mut images: Vec<Image> = match client_for(account)?.describe_images() {
        Ok(images) => images,
        Err(e) => {
            println!("Error fetching images: {e}");
            return Ok(());
        }
    };
    if images.is_empty() {
        println!(
            "No images available in region: {}",
            account.region_id.as_str()
        );
        return Ok(());
    }

    images.sort_by_key(|i| i.image_name.to_lowercase());
    println!(
        "Available Images in Region {} (Sorted by Name):",
        account.region_id.as_str()
    );
    for image in &images {
        let os_name = image.os_name.as_deref().unwrap_or("N/A");
        println!("OS Name: {}", style(os_name).red());
        println!("Image ID: {}", style(&image.image_id).green());
    }
    Ok(())
}

fn instance_menu<R: AccountRepository>(store: &AccountStore<R>) -> Result<()> {
    let accounts = store.list()?;
    let Some(account) = select_account(&accounts)? else {
        return Ok(());
    };
    let client = client_for(account)?;

    let instances: Vec<Instance> = match client.describe_instances() {
        Ok(instances) => instances,
        Err(e) => {
            println!("Error fetching instances: {e}");
            return Ok(());
        }
    };
    if instances.is_empty() {
        println!("No instances found.");
        return Ok(());
    }

    let labels: Vec<String> = instances
        .iter()
        .map(|i| format!("{} (ID: {}, Status: {})", i.instance_name, i.instance_id, i.status))
        .collect();
    let selection = Select::new()
        .with_prompt("Instance")
        .items(&labels)
        .default(0)
        .interact()?;
    let instance_id = instances[selection].instance_id.clone();

    let actions = [
        "Rebuild Instance",
        "Reset Password & Reboot",
        "Reboot Instance",
        "Go Back",
    ];
    let action = Select::new()
        .with_prompt("Instance Management")
        .items(&actions)
        .default(0)
        .interact()?;

    match action {
        0 => {
            let image_id: String = Input::new()
                .with_prompt("Image ID to rebuild with")
                .interact_text()?;
            let password: String = Password::new().with_prompt("New root password").interact()?;
            report(
                "Rebuild instance",
                client.replace_system_disk(&instance_id, &image_id, &password),
            );
        }
        1 => {
            let password: String = Password::new().with_prompt("New root password").interact()?;
            report(
                "Password reset",
                client.modify_instance_attribute(&instance_id, &password),
            );
            report("Reboot", client.reboot_instance(&instance_id));
        }
        2 => report("Reboot", client.reboot_instance(&instance_id)),
        _ => {}
    }
    Ok(())
}

/// Print an operation's raw JSON response, or its error, and move on.
fn report(what: &str, outcome: ecsctl_core::Result<serde_json::Value>) {
    match outcome {
        Ok(body) => match serde_json::to_string_pretty(&body) {
            Ok(pretty) => println!("{what}: {pretty}"),
            Err(_) => println!("{what}: {body}"),
        },
        Err(e) => println!("{what} failed: {e}"),
    }
}
