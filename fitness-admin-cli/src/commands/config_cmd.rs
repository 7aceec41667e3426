use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use fitness_admin::config::Config;

use crate::ui;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set the API base URL
    SetUrl { url: String },
}

impl ConfigCommand {
    pub fn execute(self, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => show_config(config_path),
            ConfigCommand::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigCommand::Init { force } => init_config(config_path, force),
            ConfigCommand::SetUrl { url } => set_url(config_path, url),
        }
    }
}

fn show_config(config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    if config.is_authenticated() {
        config.auth.token = "********".to_string();
    }
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(config_path)?;

    ui::success(format!("Configuration initialized at: {}", config_path.display()));

    Ok(())
}

fn set_url(config_path: &Path, url: String) -> Result<()> {
    let url = url.trim().to_string();
    check_scheme(&url)?;

    let mut config = Config::load_stored(config_path)?;
    config.api.base_url = url;
    config.save_to(config_path)?;

    ui::success(format!("API base URL set to {}", config.base_url()));
    Ok(())
}

fn check_scheme(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("API base URL must start with http:// or https://");
    }
    Ok(())
}
