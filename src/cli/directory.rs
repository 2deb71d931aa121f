//! CLI `directory` command: print what `get_employees` returns.

use anyhow::Result;

use orgbot::app;
use orgbot::config::OrgbotConfig;
use orgbot::tools::DirectoryTool;

pub fn directory(config: &OrgbotConfig, json: bool) -> Result<()> {
    let db_path = app::prepare_store(config)?;
    let listing = DirectoryTool::new(db_path).list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{:<4} {:<10} {:<26} {}", "ID", "NAME", "DESIGNATION", "MANAGER");
    for (id, record) in &listing {
        println!(
            "{:<4} {:<10} {:<26} {}",
            id,
            record.name,
            record.designation,
            record.manager_name.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
