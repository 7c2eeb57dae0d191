use anyhow::Result;

use reelscroll_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = AppConfig::config_path();
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        AppConfig::default().save()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
