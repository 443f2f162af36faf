//! # Reset Wallet Utility
//!
//! Deletes the persisted wallet record, returning the service to its
//! first-launch state.
//!
//! **WARNING**: The wallet and its recovery phrase cannot be restored afterwards.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package reset-wallet --bin reset_wallet
//! ```
//!
//! The program will:
//! 1. Open the database named by `DATABASE_URL`
//! 2. Show the stored wallet, if any
//! 3. Ask for confirmation
//! 4. Remove the record if confirmed

use lib_core::model::store::{persisted, STORAGE_KEY};
use lib_core::{create_pool, Config, KeyValueStore, SqliteKvStore, WalletStore};
use std::io::{self, Write};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("============================================");
    println!("  Reset Wallet Utility");
    println!("============================================");
    println!();
    println!("WARNING: This will delete the stored wallet and its transaction log!");
    println!("Make sure the recovery phrase is backed up.");
    println!();

    let config = Config::load().map_err(|e| anyhow::anyhow!(e))?;

    println!("Opening {}...", config.database_url);
    let pool = create_pool(&config.database_url).await?;
    let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(pool).await?);
    println!("Connected successfully.");
    println!();

    let Some(raw) = kv.get(STORAGE_KEY).await? else {
        println!("No wallet record found.");
        println!("Nothing to delete.");
        return Ok(());
    };

    match persisted::decode(&raw) {
        Ok(state) => {
            match &state.current_wallet {
                Some(w) => println!("Found wallet \"{}\" ({}) on {}.", w.name, w.address, w.network),
                None => println!("Found a record with no wallet."),
            }
            println!("{} transaction(s) recorded.", state.transactions.len());
        }
        Err(e) => println!("Found an unreadable record ({}).", e),
    }
    println!();

    print!("Are you sure you want to delete it? (yes/no): ");
    io::stdout().flush()?;

    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    let confirmation = confirmation.trim().to_lowercase();

    if confirmation != "yes" && confirmation != "y" {
        println!("Operation cancelled.");
        return Ok(());
    }

    println!();
    println!("Deleting wallet record...");

    let store = WalletStore::new(kv, config.simulated_delay());
    store.reset().await?;

    println!("Wallet record deleted.");

    Ok(())
}
