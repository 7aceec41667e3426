use anyhow::{Context as _, Result};
use clap::Args;
use dialoguer::Password;
use std::path::Path;

use fitness_admin::auth::{ConfigTokenStore, TokenStore};
use fitness_admin::config::Config;

use crate::ui;

#[derive(Args)]
pub struct LoginCommand {
    /// Bearer token issued by the platform; prompted for when omitted
    #[arg(long, env = "FITNESS_ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl LoginCommand {
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let token = match self.token {
            Some(token) => token,
            None => Password::new().with_prompt("API token").interact()?,
        };
        let token = token.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("Token cannot be empty");
        }

        let config = Config::load_from(config_path)?;
        let tokens = ConfigTokenStore::new(config_path.to_path_buf(), config);
        tokens
            .set_token(token)
            .with_context(|| format!("Failed to save token to {}", config_path.display()))?;

        ui::success("Token saved.");
        Ok(())
    }
}
