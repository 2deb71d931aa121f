//! CLI `seed` command: create and populate the employee store.

use anyhow::Result;

use orgbot::config::OrgbotConfig;
use orgbot::error::StoreError;
use orgbot::{db, directory};

pub fn seed(config: &OrgbotConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let mut conn = db::open_database(&db_path)?;

    match directory::seed(&mut conn) {
        Ok(()) => {
            println!("Database created and tables populated successfully.");
            println!("Database: {}", db_path.display());
            Ok(())
        }
        Err(e @ StoreError::AlreadySeeded { .. }) => {
            println!("Nothing to do: {e}");
            println!("Database: {}", db_path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
