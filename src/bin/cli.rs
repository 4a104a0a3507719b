use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use schooldesk::cli::create_user;
use schooldesk_config::DatabaseConfig;
use schooldesk_core::Role;
use schooldesk_db::{PgCredentialStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "schooldesk-cli")]
#[command(about = "SchoolDesk CLI - Administrative tools for SchoolDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sign-in account for any role
    CreateUser {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// admin, teacher, student or parent
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env()?)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            username,
            role,
            password,
        } => {
            run_migrations(&pool).await?;
            handle_create_user(PgCredentialStore::new(pool), username, role, password).await
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
    }
}

async fn handle_create_user(
    store: PgCredentialStore,
    username: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) -> anyhow::Result<()> {
    // Use provided values or prompt interactively
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let index = Select::new()
                .with_prompt("Role")
                .items(&Role::ALL.map(|role| role.as_str()))
                .default(0)
                .interact()?;
            Role::ALL[index]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    match create_user(&store, &username, &password, role).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Username: {}", user.username);
            println!("   Role: {}", user.role);
            println!("   ID: {}", user.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e.error);
            std::process::exit(1);
        }
    }
}
