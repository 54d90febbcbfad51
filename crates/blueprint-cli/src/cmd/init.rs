use anyhow::Context;
use blueprint_core::config::{Config, WarnLevel, DEFAULT_OWNER};
use blueprint_core::paths;
use std::path::Path;

pub fn run(root: &Path, owner: Option<&str>) -> anyhow::Result<()> {
    println!("Initializing blueprint in: {}", root.display());

    for dir in [paths::blueprint_dir(root), paths::projects_dir(root)] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        let cfg = Config::load(root).context("failed to read config.yaml")?;
        for w in cfg.validate() {
            let tag = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("  {tag}: {}", w.message);
        }
    } else {
        let cfg = Config::new(owner.unwrap_or(DEFAULT_OWNER));
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    println!("\nNext: blueprint project create <name>");
    Ok(())
}
