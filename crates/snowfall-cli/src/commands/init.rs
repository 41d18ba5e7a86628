//! Default config scaffolding command

use anyhow::{Context, Result};
use snowfall_particles::SnowfallConfig;
use std::fs;
use std::path::Path;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let body = SnowfallConfig::default().to_toml_string()?;
    let content = format!(
        "# Snowfall overlay configuration\n\
         # Sizes are density-independent pixels; set `image` to draw a sprite instead of circles.\n\n{}",
        body
    );
    fs::write(path, content).context(format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("snowfall_init_test_{}", uuid::Uuid::new_v4()))
            .join("snowfall.toml")
    }

    #[test]
    fn writes_loadable_defaults() {
        let path = temp_path();
        run(&path, false).unwrap();
        let config = SnowfallConfig::load_from_file(&path).unwrap();
        assert_eq!(config.snowflakes_num, SnowfallConfig::default().snowflakes_num);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let path = temp_path();
        run(&path, false).unwrap();
        assert!(run(&path, false).is_err());
        assert!(run(&path, true).is_ok());
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
