use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Confirm, Input, Password};

use fitness_admin::models::{AccountStatus, Role, User, UserDraft, UserQuery};
use fitness_admin::store::UserStore;

use super::Context;
use crate::ui;

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        /// Match against name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by role (admin, user, trainer, group-admin)
        #[arg(short, long)]
        role: Option<Role>,

        /// Filter by account status
        #[arg(long)]
        status: Option<AccountStatus>,
    },

    /// Show user details
    Show {
        /// User ID
        id: String,
    },

    /// Create a user; missing fields are prompted for
    Create {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, default_value = "user")]
        role: Role,

        /// Prompt for an initial password
        #[arg(long)]
        with_password: bool,
    },

    /// Change a user's role
    Role {
        /// User ID
        id: String,

        /// New role
        role: Role,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl UsersCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut store = UserStore::new(ctx.api.clone());

        match self {
            UsersCommand::List {
                search,
                role,
                status,
            } => {
                let query = UserQuery {
                    search,
                    role,
                    account_status: status,
                };
                load(&mut store, ctx, &query).await?;

                // Sample data is never filtered server-side
                let users: Vec<&User> = store
                    .items()
                    .iter()
                    .filter(|u| !store.is_offline() || query.matches(u))
                    .collect();
                print_users(&users);
                Ok(())
            }
            UsersCommand::Show { id } => {
                load(&mut store, ctx, &UserQuery::default()).await?;
                let user = ui::loading("Loading user…", store.fetch_by_id(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                print_user(&user);
                Ok(())
            }
            UsersCommand::Create {
                name,
                email,
                role,
                with_password,
            } => {
                let name = match name {
                    Some(name) => name,
                    None => Input::new().with_prompt("Name").interact_text()?,
                };
                let email = match email {
                    Some(email) => email,
                    None => Input::new().with_prompt("Email").interact_text()?,
                };
                let mut draft = UserDraft::new(name, email, role);
                if with_password {
                    draft.password = Some(
                        Password::new()
                            .with_prompt("Password")
                            .with_confirmation("Confirm password", "Passwords do not match")
                            .interact()?,
                    );
                }

                load(&mut store, ctx, &UserQuery::default()).await?;
                let user = ui::loading("Creating user…", store.create(draft))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Created {} ({})", user.name, user.id));
                Ok(())
            }
            UsersCommand::Role { id, role } => {
                load(&mut store, ctx, &UserQuery::default()).await?;
                let user = ui::loading("Updating role…", store.change_role(&id, role))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("{} is now {}", user.name, user.role));
                Ok(())
            }
            UsersCommand::Delete { id, force } => {
                load(&mut store, ctx, &UserQuery::default()).await?;

                let label = store
                    .state()
                    .find(&id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| id.clone());
                if !force
                    && !Confirm::new()
                        .with_prompt(format!("Delete user {}?", label))
                        .default(false)
                        .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }

                ui::loading("Deleting user…", store.delete(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Deleted {}", label));
                Ok(())
            }
        }
    }
}

/// Initial fetch every user view starts with
async fn load(store: &mut UserStore, ctx: &Context, query: &UserQuery) -> Result<()> {
    ui::loading("Loading users…", store.fetch_all(query))
        .await
        .map_err(|e| ctx.fail(e))?;
    ui::render_status(&*store);
    Ok(())
}

fn print_users(users: &[&User]) {
    ui::heading("Users");
    if users.is_empty() {
        ui::empty("users");
        return;
    }

    println!(
        "{:<26} {:<22} {:<28} {:<12} {}",
        "ID".bold(),
        "NAME".bold(),
        "EMAIL".bold(),
        "ROLE".bold(),
        "STATUS".bold()
    );
    for user in users {
        println!(
            "{:<26} {:<22} {:<28} {:<12} {}",
            ui::clip(&user.id, 26),
            ui::clip(&user.name, 22),
            ui::clip(&user.email, 28),
            user.role.to_string(),
            status_label(user.account_status)
        );
    }
    println!();
    println!("{} user(s)", users.len());
}

fn status_label(status: Option<AccountStatus>) -> String {
    match status {
        Some(AccountStatus::Active) => "Active".green().to_string(),
        Some(AccountStatus::Suspended) => "Suspended".red().to_string(),
        Some(other) => other.to_string().yellow().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn print_user(user: &User) {
    ui::heading(&user.name);
    println!("ID:       {}", user.id);
    println!("Email:    {}", user.email);
    println!("Role:     {}", user.role);
    println!("Status:   {}", status_label(user.account_status));
    if let Some(ref sports) = user.favorite_sports {
        let sports: Vec<String> = sports.iter().map(|s| s.to_string()).collect();
        println!("Sports:   {}", sports.join(", "));
    }
    if let Some(created) = user.created_at {
        println!("Joined:   {}", created.format("%Y-%m-%d"));
    }
}
