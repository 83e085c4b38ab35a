//! Configuration management commands.

use serde_json::json;

use docwords::config::{Config, Settings};

/// Print the effective settings and the config file they came from as JSON.
///
/// `source` is null when no config file was found.
pub fn cmd_config_show(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&show_json(settings, config))?);
    Ok(())
}

fn show_json(settings: &Settings, config: &Config) -> serde_json::Value {
    json!({
        "source": config.source_path.as_ref().map(|p| p.display().to_string()),
        "settings": settings,
    })
}
