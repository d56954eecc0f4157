//! Checklist CLI
//!
//! Command-line front-end for the checklist backend:
//! - Log in, register, log out
//! - List checklists
//! - Create and delete checklists
//! - Add, delete and toggle items

use anyhow::Context;
use checklist::config::generate_default_config;
use checklist::logging::init_logging;
use checklist::{
    Action, Checklist, Config, Dashboard, FileTokenStore, HttpChecklistClient, LoginForm, Notice,
    RegisterForm, Session, SessionError,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "checklist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage your checklists from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and CHECKLIST_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/checklist/config.toml or ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the issued token
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        username: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Password confirmation (prompted when omitted)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show whether a token is stored
    Status,

    /// List all checklists
    List,

    /// Create a checklist
    New { name: String },

    /// Delete a checklist
    Remove { checklist_id: String },

    /// Add an item to a checklist
    AddItem {
        checklist_id: String,
        item_name: String,
    },

    /// Delete an item
    RemoveItem {
        checklist_id: String,
        item_id: String,
    },

    /// Toggle an item's completion
    Toggle {
        checklist_id: String,
        item_id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Using backend {}", config.api.base_url);

    let api = Arc::new(HttpChecklistClient::new(config.api.client_config())?);
    let tokens = Arc::new(FileTokenStore::new(config.storage.resolved_token_path()));
    let session = Session::new(api, tokens.clone());

    match cli.command {
        Commands::Login { username, password } => {
            if session.auth_page_redirect().is_some() {
                println!("Already logged in. Run `checklist logout` first to switch accounts.");
                return Ok(());
            }

            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };

            match session.login(&LoginForm::new(username, password)).await {
                Ok(_) => println!("Logged in."),
                Err(e) => fail(&e.login_notice()),
            }
        }

        Commands::Register {
            username,
            email,
            password,
            confirm,
        } => {
            if session.auth_page_redirect().is_some() {
                println!("Already logged in.");
                return Ok(());
            }

            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };
            let re_enter_password = match confirm {
                Some(confirm) => confirm,
                None => prompt("Re-enter password: ")?,
            };

            let form = RegisterForm {
                username,
                email,
                password,
                re_enter_password,
            };

            match session.register(&form).await {
                Ok(_) => {
                    println!("{}", Notice::success(checklist::session::REGISTERED));
                    println!("Log in with: checklist login {}", form.username);
                }
                Err(e) => fail(&e.register_notice()),
            }
        }

        Commands::Logout => {
            session.logout()?;
            println!("Logged out.");
        }

        Commands::Status => {
            if session.is_authenticated() {
                let since = tokens
                    .saved_at()?
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                println!("Logged in (token saved {})", since);
                println!("Token file: {}", tokens.path().display());
            } else {
                println!("Not logged in.");
            }
            println!("Backend: {}", config.api.base_url);
        }

        Commands::List => {
            let dashboard = open_dashboard(session).await?;
            render(dashboard.checklists(), &cli.format)?;
        }

        Commands::New { name } => {
            run_action(session, Action::CreateChecklist { name }, &cli.format).await?;
        }

        Commands::Remove { checklist_id } => {
            run_action(session, Action::DeleteChecklist { checklist_id }, &cli.format).await?;
        }

        Commands::AddItem {
            checklist_id,
            item_name,
        } => {
            run_action(
                session,
                Action::AddItem {
                    checklist_id,
                    item_name,
                },
                &cli.format,
            )
            .await?;
        }

        Commands::RemoveItem {
            checklist_id,
            item_id,
        } => {
            run_action(
                session,
                Action::DeleteItem {
                    checklist_id,
                    item_id,
                },
                &cli.format,
            )
            .await?;
        }

        Commands::Toggle {
            checklist_id,
            item_id,
        } => {
            run_action(
                session,
                Action::ToggleItem {
                    checklist_id,
                    item_id,
                },
                &cli.format,
            )
            .await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Open the dashboard, or exit when no token is stored
async fn open_dashboard(session: Session) -> anyhow::Result<Dashboard> {
    match Dashboard::open(session).await {
        Ok((dashboard, notice)) => {
            if let Some(notice) = notice {
                fail(&notice);
            }
            Ok(dashboard)
        }
        Err(SessionError::NotAuthenticated) => not_logged_in(),
        Err(e) => Err(e.into()),
    }
}

fn not_logged_in() -> ! {
    eprintln!("Not logged in. Run `checklist login <username>` first.");
    std::process::exit(1);
}

/// Apply one action and print the re-fetched collection
///
/// Skips the initial fetch; the action's own re-fetch supplies the listing.
async fn run_action(session: Session, action: Action, format: &str) -> anyhow::Result<()> {
    let mut dashboard = match Dashboard::connect(session) {
        Ok(dashboard) => dashboard,
        Err(SessionError::NotAuthenticated) => not_logged_in(),
        Err(e) => return Err(e.into()),
    };

    match dashboard.apply(action).await? {
        Some(notice) if notice.is_error() => fail(&notice),
        Some(notice) => eprintln!("{}", notice),
        None => {
            eprintln!("Nothing to do: name is empty.");
            dashboard.refresh().await?;
        }
    }

    render(dashboard.checklists(), format)
}

fn render(checklists: &[Checklist], format: &str) -> anyhow::Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(checklists)?);
        return Ok(());
    }

    if checklists.is_empty() {
        println!("No checklists yet.");
        println!();
        println!("Create one with:");
        println!("  checklist new \"Groceries\"");
        return Ok(());
    }

    println!("Checklist:");
    for checklist in checklists {
        println!();
        println!(
            "{} [{}]  (id {})",
            checklist.name,
            checklist.status_label(),
            checklist.id
        );
        for item in checklist.items() {
            let mark = if item.item_completion_status { "x" } else { " " };
            println!("  [{}] {:<40} (id {})", mark, item.name, item.id);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn fail(notice: &Notice) -> ! {
    eprintln!("{}", notice);
    std::process::exit(1);
}
