use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());

    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    println!();
    print_value("defaults.theme", defaults.theme.as_deref(), "light");
    print_value("defaults.viz", defaults.viz.as_deref(), "chord");
    print_value("defaults.order", defaults.order.as_deref(), "department");
    let autoplay = defaults.autoplay.map(|a| a.to_string());
    print_value("defaults.autoplay", autoplay.as_deref(), "true");

    Ok(())
}

fn print_value(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {key} = {}", v.green()),
        None => println!("  {key} = {} {}", default.dimmed(), "(default)".dimmed()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}
