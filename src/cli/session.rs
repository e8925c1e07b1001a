use anyhow::Result;
use clap::Subcommand;

use crate::store::entities::Role;

use super::AppContext;

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    #[command(about = "Log in with one of the sample accounts")]
    Login {
        #[arg(long, help = "developer@example.com or manager@example.com")]
        email: String,
        #[arg(long, default_value = "", help = "Accepted but not checked")]
        password: String,
    },
    #[command(about = "Create an account and log into it")]
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, value_enum, default_value_t = Role::Developer)]
        role: Role,
    },
    #[command(about = "Forget the current session")]
    Logout {},
    #[command(about = "Show who is logged in")]
    Whoami {},
}

pub async fn process_session_command(context: &AppContext, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Login { email, password } => {
            let user = context.auth.login(&email, &password).await?;
            println!("Logged in as {} ({})", user.name, user.role);
        }
        SessionCommand::Signup {
            name,
            email,
            password,
            role,
        } => {
            let user = context.auth.signup(&name, &email, &password, role).await?;
            println!("Created {} for {} ({})", user.id, user.name, user.role);
        }
        SessionCommand::Logout {} => {
            context.auth.logout().await?;
            println!("Logged out");
        }
        SessionCommand::Whoami {} => match context.auth.current_user().await? {
            Some(user) => {
                let team = user
                    .team
                    .as_deref()
                    .map(|team| format!(", {team}"))
                    .unwrap_or_default();
                println!("{} <{}> ({}{team})", user.name, user.email, user.role);
            }
            None => println!("Not logged in"),
        },
    }
    Ok(())
}
