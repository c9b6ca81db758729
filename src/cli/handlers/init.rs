use crate::config::{CONFIG_FILE_NAME, ShelfConfig};
use crate::error::ShelfError;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        let existing = config_path.display().to_string();
        return Err(ShelfError::AlreadyInitialized(existing).into());
    }

    let config = ShelfConfig::default();
    config.save(&config_path)?;

    println!(
        "{} bookshelf project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", cwd.join(&config.database.path).display());
    println!("  Endpoint: {}", config.client.endpoint);

    Ok(())
}
