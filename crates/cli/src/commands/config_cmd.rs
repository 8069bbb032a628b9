//! `strata config`: Configuration management commands.

use strata_config::AppConfig;

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub async fn init(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_path();
    if config_path.exists() && !force {
        println!("⚠️  Config already exists at {}", config_path.display());
        println!("   Use --force to overwrite it.");
        return Ok(());
    }

    std::fs::create_dir_all(AppConfig::config_dir())?;
    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Wrote default config to {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = strata_config::AppConfig::config_path();
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn default_toml_parses_back() {
        let rendered = strata_config::AppConfig::default_toml();
        let parsed: strata_config::AppConfig = toml::from_str(&rendered).unwrap();
        assert!(parsed.catalog.builtin);
    }
}
