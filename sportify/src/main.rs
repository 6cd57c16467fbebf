//! sportify - Browse sports teams and manage favourites
//!
//! Command-line front end over libsportify. Each invocation restores the
//! saved session and favourites, runs one command, and exits.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};

use libsportify::logging::LoggingConfig;
use libsportify::navigation::{Navigator, Route};
use libsportify::store::selectors;
use libsportify::{Config, Credentials, SportifyError, SportifyService, Team, UserProfile};

#[derive(Parser, Debug)]
#[command(name = "sportify")]
#[command(version)]
#[command(about = "Browse sports teams and manage favourites")]
#[command(long_about = "\
sportify - Browse sports teams and manage favourites

DESCRIPTION:
    sportify signs you in against the demo auth service, lists teams from
    TheSportsDB and keeps a list of favourite teams on disk. The session and
    favourites survive between invocations.

USAGE EXAMPLES:
    # Sign in (prompts for anything not given)
    sportify login -u emilys

    # List teams, optionally filtered by name
    sportify teams --filter kings

    # Team details
    sportify show 140082

    # Manage favourites
    sportify fav add 140082
    sportify fav list --format json

    # Sign out and wipe local data
    sportify logout

CONFIGURATION:
    Configuration file: ~/.config/sportify/config.toml
    Storage location:   ~/.local/share/sportify/storage.db

    Override with environment variables:
        SPORTIFY_CONFIG       - Path to config file
        SPORTIFY_STORAGE_PATH - Path to storage file
        SPORTIFY_LOG_FORMAT   - text, json or pretty
        SPORTIFY_LOG_LEVEL    - Log filter (default: warn)

EXIT CODES:
    0 - Success
    1 - Operation failed (network, storage, configuration)
    2 - Not logged in or authentication failed
    3 - Invalid input
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and remember the session
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and clear all local data
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show session and favourites summary
    Status,

    /// List teams
    Teams {
        /// League to show
        #[arg(short, long)]
        league: Option<String>,

        /// Only teams whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search teams by name
    Search {
        name: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show details for one team
    Show {
        team_id: String,
    },

    /// Manage favourite teams
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },
}

#[derive(Subcommand, Debug)]
enum FavCommands {
    /// Add a team to favourites
    Add { team_id: String },

    /// Remove a team from favourites
    Remove { team_id: String },

    /// List favourites
    List {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Remove every favourite
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> libsportify::Result<Self> {
        match format {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SportifyError::InvalidInput(format!(
                "Invalid format '{}'. Must be 'text' or 'json'",
                other
            ))),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<SportifyError>()
            .map(SportifyError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default().context("Failed to load configuration")?;
    let default_league = config.teams.default_league.clone();

    let service = SportifyService::from_config(config).await?;
    let restored = service.bootstrap().await;
    tracing::debug!(restored, "Session bootstrap complete");

    match cli.command {
        Commands::Login { username, password } => cmd_login(&service, username, password).await,
        Commands::Logout => cmd_logout(&service).await,
        Commands::Whoami => cmd_whoami(&service),
        Commands::Status => cmd_status(&service),
        Commands::Teams {
            league,
            filter,
            format,
        } => {
            let format = OutputFormat::parse(&format)?;
            let league = league.unwrap_or(default_league);
            cmd_teams(&service, &league, filter.as_deref(), format).await
        }
        Commands::Search { name, format } => {
            let format = OutputFormat::parse(&format)?;
            cmd_search(&service, &name, format).await
        }
        Commands::Show { team_id } => cmd_show(&service, &team_id).await,
        Commands::Fav { command } => match command {
            FavCommands::Add { team_id } => cmd_fav_add(&service, &team_id).await,
            FavCommands::Remove { team_id } => cmd_fav_remove(&service, &team_id).await,
            FavCommands::List { format } => {
                let format = OutputFormat::parse(&format)?;
                cmd_fav_list(&service, format)
            }
            FavCommands::Clear => cmd_fav_clear(&service).await,
        },
    }
}

/// Gate a command on the session, the way a front end picks its first screen
fn require_login(service: &SportifyService) -> libsportify::Result<UserProfile> {
    let state = service.store().state();
    if Navigator::new().sync(&state) == Route::Login {
        return Err(SportifyError::NotAuthenticated);
    }
    state.auth.user.ok_or(SportifyError::NotAuthenticated)
}

async fn cmd_login(
    service: &SportifyService,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt_line("Username: ").context("Failed to read username")?,
    };
    let password = match password {
        Some(password) => password,
        None => {
            if !io::stdin().is_terminal() {
                return Err(SportifyError::InvalidInput(
                    "Password required. Pass --password or run from a terminal.".to_string(),
                )
                .into());
            }
            rpassword::prompt_password("Password: ").context("Failed to read password")?
        }
    };

    let credentials = Credentials::new(username.trim(), password);
    credentials.validate()?;

    let user = service.auth().login(&credentials).await?;
    println!("✓ Logged in as {} ({})", user.display_name(), user.username);
    Ok(())
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn cmd_logout(service: &SportifyService) -> anyhow::Result<()> {
    if !service.store().state().is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    service.auth().sign_out().await;
    println!("✓ Logged out");
    Ok(())
}

fn cmd_whoami(service: &SportifyService) -> anyhow::Result<()> {
    let user = require_login(service)?;

    println!("{}", user.display_name());
    println!("  Username: {}", user.username);
    if let Some(email) = &user.email {
        println!("  Email:    {}", email);
    }
    Ok(())
}

fn cmd_status(service: &SportifyService) -> anyhow::Result<()> {
    let state = service.store().state();

    match &state.auth.user {
        Some(user) => println!("Logged in as {} ({})", user.display_name(), user.username),
        None => println!("Not logged in"),
    }
    println!("Favourites: {}", selectors::favourites_count(&state));
    Ok(())
}

async fn cmd_teams(
    service: &SportifyService,
    league: &str,
    filter: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    require_login(service)?;

    service.teams().set_selected_league(league);
    let teams = service.teams().get_teams(Some(league)).await?;
    let shown = selectors::filter_teams(&teams, filter.unwrap_or(""));

    print_teams(service, &shown, format)
}

async fn cmd_search(
    service: &SportifyService,
    name: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    require_login(service)?;

    let teams = service.teams().search_teams(name).await?;
    let shown: Vec<&Team> = teams.iter().collect();
    print_teams(service, &shown, format)
}

async fn cmd_show(service: &SportifyService, team_id: &str) -> anyhow::Result<()> {
    require_login(service)?;

    let team = find_team(service, team_id).await?;
    service.teams().set_selected_team(team.clone());

    let favourite = service.favourites().is_favourite(&team.id);
    println!("{}{}", team.name, if favourite { " ★" } else { "" });
    print_field("League", Some(team.league_label()));
    print_field("Sport", team.sport.as_deref());
    print_field("Country", team.country.as_deref());
    print_field("Stadium", team.stadium.as_deref());
    print_field("Location", team.location.as_deref());
    print_field("Capacity", team.stadium_capacity.as_deref());
    print_field("Founded", team.formed_year.as_deref());
    print_field("Website", team.website_url().as_deref());
    for (name, link) in team.social_links() {
        print_field(name, Some(&link));
    }
    if let Some(description) = team.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!();
        println!("{}", description.trim());
    }

    service.teams().clear_selected_team();
    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        println!("  {:<10} {}", format!("{}:", label), value);
    }
}

async fn cmd_fav_add(service: &SportifyService, team_id: &str) -> anyhow::Result<()> {
    require_login(service)?;

    if service.favourites().is_favourite(team_id) {
        println!("Already a favourite: {}", team_id);
        return Ok(());
    }

    let team = find_team(service, team_id).await?;
    let name = team.name.clone();
    service.favourites().add_and_save(team).await;
    println!("★ Added {} to favourites", name);
    Ok(())
}

async fn cmd_fav_remove(service: &SportifyService, team_id: &str) -> anyhow::Result<()> {
    require_login(service)?;

    let favourites = service.favourites().favourites();
    let Some(team) = favourites.iter().find(|team| team.id == team_id) else {
        return Err(SportifyError::InvalidInput(format!("Not a favourite: {}", team_id)).into());
    };

    service.favourites().remove_and_save(team_id).await;
    println!("✓ Removed {} from favourites", team.name);
    Ok(())
}

fn cmd_fav_list(service: &SportifyService, format: OutputFormat) -> anyhow::Result<()> {
    require_login(service)?;

    let favourites = service.favourites().favourites();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&favourites)?),
        OutputFormat::Text => {
            if favourites.is_empty() {
                println!("No favourites yet. Add one with `sportify fav add <TEAM_ID>`.");
            }
            for team in &favourites {
                println!("{} | {} | {}", team.id, team.name, team.league_label());
            }
        }
    }
    Ok(())
}

async fn cmd_fav_clear(service: &SportifyService) -> anyhow::Result<()> {
    require_login(service)?;

    let count = service.favourites().clear_and_save().await;
    println!("✓ Cleared {} favourite{}", count, if count == 1 { "" } else { "s" });
    Ok(())
}

/// Resolve a team id: favourites first, then the league list, then a lookup
async fn find_team(service: &SportifyService, team_id: &str) -> libsportify::Result<Team> {
    if let Some(team) = service
        .favourites()
        .favourites()
        .into_iter()
        .find(|team| team.id == team_id)
    {
        return Ok(team);
    }

    let teams = service.teams().get_teams(None).await?;
    if let Some(team) = teams.into_iter().find(|team| team.id == team_id) {
        return Ok(team);
    }

    service
        .teams()
        .team_details(team_id)
        .await?
        .ok_or_else(|| SportifyError::InvalidInput(format!("Team not found: {}", team_id)))
}

fn print_teams(
    service: &SportifyService,
    teams: &[&Team],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(teams)?),
        OutputFormat::Text => {
            let state = service.store().state();
            for team in teams {
                let marker = if selectors::is_favourite(&state.favourites, &team.id) {
                    "★"
                } else {
                    " "
                };
                println!("{} {} | {} | {}", marker, team.id, team.name, team.league_label());
            }
        }
    }
    Ok(())
}
