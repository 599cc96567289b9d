//! Config command - create and inspect the user config file

use super::{Cli, Settings};
use anyhow::Result;
use console::style;
use tps::config::{UserConfig, ENV_DATA, ENV_GRAPH_DIR, ENV_SEPARATE_ROOMS};

pub fn init() -> Result<()> {
    let path = UserConfig::init_user_config()?;
    println!(
        "{} Config file at {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

pub fn show(cli: &Cli, config: &UserConfig) -> Result<()> {
    let settings = Settings::resolve(cli, config)?;

    println!("\n{}\n", style("Two Point Science settings").bold());
    match UserConfig::user_config_path() {
        Some(path) if path.exists() => println!("  config file:    {}", path.display()),
        Some(path) => println!("  config file:    {} (not created)", path.display()),
        None => println!("  config file:    (no config directory)"),
    }
    let data_source = cli
        .data
        .as_deref()
        .or(config.data_file())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    println!("  data:           {}", data_source);
    println!("  separate_rooms: {}", settings.separate_rooms);
    println!("  graph_dir:      {}", settings.graph_dir.display());
    println!("  engine:         {}", settings.engine);
    println!("  image_format:   {}", settings.image_format);
    println!("  strategy:       {}", settings.strategy);

    println!(
        "\n{}",
        style(format!(
            "Environment overrides: {}, {}, {}",
            ENV_SEPARATE_ROOMS, ENV_GRAPH_DIR, ENV_DATA
        ))
        .dim()
    );
    Ok(())
}
