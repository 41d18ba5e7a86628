//! Resolved-config display command

use anyhow::{Context, Result};
use snowfall_particles::SnowfallConfig;
use std::path::Path;

pub fn run(config: Option<&Path>, format: &str) -> Result<()> {
    let config = SnowfallConfig::load(config).context("Failed to load snowfall config")?;
    println!("{}", format_config(&config, format)?);
    Ok(())
}

fn format_config(config: &SnowfallConfig, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        _ => Ok(config.to_toml_string()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_has_every_key() {
        let text = format_config(&SnowfallConfig::default(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["snowflakes_num"], 300);
        assert_eq!(value["fading_enabled"], false);
        assert!(value.get("image").is_none());
    }

    #[test]
    fn toml_output_is_default_layout() {
        let text = format_config(&SnowfallConfig::default(), "toml").unwrap();
        assert!(text.contains("snowflakes_num = 300"));
        assert!(text.contains("angle_max = 10"));
    }
}
