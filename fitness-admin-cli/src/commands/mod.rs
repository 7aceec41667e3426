mod config_cmd;
mod groups;
mod login;
mod logout;
mod stats;
mod trainers;
mod users;
mod workouts;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use fitness_admin::api::ApiClient;
use fitness_admin::auth::{ConfigTokenStore, TokenStore};
use fitness_admin::config::{Config, API_URL_ENV, CONFIG_PATH_ENV};
use fitness_admin::StoreError;

pub use config_cmd::ConfigCommand;
pub use groups::GroupsCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use stats::StatsCommand;
pub use trainers::TrainersCommand;
pub use users::UsersCommand;
pub use workouts::WorkoutsCommand;

#[derive(Parser)]
#[command(name = "fitness-admin")]
#[command(about = "Admin console for the fitness platform", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage groups and their members
    #[command(subcommand)]
    Groups(GroupsCommand),

    /// Manage workouts
    Workouts(WorkoutsCommand),

    /// List trainers and the workouts they created
    Trainers(TrainersCommand),

    /// Show dashboard statistics
    Stats(StatsCommand),

    /// Store an API token
    Login(LoginCommand),

    /// Forget the stored API token
    Logout(LogoutCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file()?,
        };

        match self.command {
            Commands::Users(cmd) => cmd.execute(&Context::load(config_path, self.api_url)?).await,
            Commands::Groups(cmd) => cmd.execute(&Context::load(config_path, self.api_url)?).await,
            Commands::Workouts(cmd) => cmd.execute(&Context::load(config_path, self.api_url)?).await,
            Commands::Trainers(cmd) => cmd.execute(&Context::load(config_path, self.api_url)?).await,
            Commands::Stats(cmd) => cmd.execute(&Context::load(config_path, self.api_url)?).await,
            Commands::Login(cmd) => cmd.execute(&config_path),
            Commands::Logout(cmd) => cmd.execute(&config_path),
            Commands::Config(cmd) => cmd.execute(&config_path),
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// What every data command needs: the shared client and the token it uses
pub struct Context {
    pub api: Arc<ApiClient>,
    tokens: Arc<ConfigTokenStore>,
    had_token: bool,
}

impl Context {
    fn load(config_path: PathBuf, api_url: Option<String>) -> Result<Self> {
        let mut config = Config::load_from(&config_path)?;
        if let Some(url) = api_url {
            config.api.base_url = url;
        }
        tracing::debug!("Using API at {}", config.base_url());

        let tokens = Arc::new(ConfigTokenStore::new(config_path, config.clone()));
        let api = Arc::new(ApiClient::new(&config, tokens.clone())?);

        Ok(Self {
            api,
            had_token: tokens.token().is_some(),
            tokens,
        })
    }

    /// Convert a store failure for `main`, hinting at re-login when the token was rejected
    pub fn fail(&self, error: StoreError) -> anyhow::Error {
        if self.had_token && self.tokens.token().is_none() {
            eprintln!(
                "{}",
                "Your session has expired. Run `fitness-admin login` to sign in again.".yellow()
            );
        }
        error.into()
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
