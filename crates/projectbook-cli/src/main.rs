//! projectbook - command-line front-end for the projectbook backend.
//!
//! The token lives in the cache directory, so a `login` in one invocation
//! authenticates the following ones until the server rejects it.

mod terminal;

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use projectbook_core::models::Project;
use projectbook_core::{ApiClient, ClientConfig, FileStore, HistoryRouter, LOGIN_ROUTE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terminal::TerminalNotifier;

const USAGE: &str = "\
Usage: projectbook <command>

Commands:
  login <username>   Sign in and store the access token
  logout             Forget the stored token
  status             Show whether a token is stored
  projects           List projects
  delete <id>        Delete a project";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = ClientConfig::from_env()?;
    let store = Arc::new(FileStore::in_cache_dir()?);
    let router = Arc::new(HistoryRouter::new());
    let client = ApiClient::builder()
        .config(config)
        .store(store)
        .notifier(Arc::new(TerminalNotifier))
        .navigator(router.clone())
        .build()
        .context("Failed to create API client")?;
    info!(base_url = client.base_url(), "projectbook starting");

    let result = run(&client, command, &args[1..]).await;

    if router.current().as_deref() == Some(LOGIN_ROUTE) {
        eprintln!("Run `projectbook login <username>` to sign in again.");
    }

    result
}

async fn run(client: &ApiClient, command: &str, args: &[String]) -> Result<()> {
    match command {
        "login" => {
            let username = args.first().context("login requires a username")?;
            let password = rpassword::prompt_password("Password: ")
                .context("Failed to read password")?;
            client
                .login(username, &password)
                .await
                .context("Login failed")?;
            println!("✓ Logged in as {}", username);
        }
        "logout" => {
            client.logout()?;
            println!("✓ Logged out");
        }
        "status" => {
            if client.has_token()? {
                println!("Token stored for {}", client.base_url());
            } else {
                println!("Not logged in");
            }
        }
        "projects" => {
            let projects = client
                .list_projects()
                .await
                .context("Failed to fetch projects")?;
            print_projects(&projects);
        }
        "delete" => {
            let id: i64 = args
                .first()
                .context("delete requires a project id")?
                .parse()
                .context("Project id must be a number")?;
            let response = client
                .delete_project(id)
                .await
                .with_context(|| format!("Failed to delete project {}", id))?;
            println!("✓ {}", response.message);
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    }
    Ok(())
}

fn print_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects");
        return;
    }
    println!(
        "{:>5}  {:<24} {:<20} {:<12} {:>12} {:<10}",
        "ID", "PROJECT", "COMPANY", "SHOT", "MARGIN", "STATUS"
    );
    for project in projects {
        let p = &project.fields;
        println!(
            "{:>5}  {:<24} {:<20} {:<12} {:>12.2} {:<10}",
            project.id,
            truncate(&p.proj, 24),
            truncate(&p.company, 20),
            truncate(&p.shot, 12),
            project.margin(),
            p.tag
        );
    }
}

/// Truncate to `max` characters, ending with "..." when shortened
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
