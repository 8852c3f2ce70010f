//! `config` command

use anyhow::Result;
use colored::*;

use crate::config::Config;

pub fn handle_config_command(config: &Config) -> Result<()> {
    match Config::config_path() {
        Some(path) if path.exists() => {
            println!("Config file: {}", path.display().to_string().cyan())
        }
        Some(path) => println!(
            "Config file: {} {}",
            path.display().to_string().cyan(),
            "(not present, using defaults)".dimmed()
        ),
        None => println!("Config file: {}", "no config directory on this platform".dimmed()),
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
