use anyhow::Result;
use clap::Args;
use std::path::Path;

use fitness_admin::config::Config;

use crate::ui;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let mut config = Config::load_stored(config_path)?;

        if !config.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        config.clear_token();
        config.save_to(config_path)?;

        ui::success("Logged out successfully!");

        Ok(())
    }
}
