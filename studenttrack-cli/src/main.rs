//! StudentTrack CLI - Command-line front end for the session and permission model
//!
//! The session user is kept in the data directory, so each invocation picks up
//! where the previous one left off.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studenttrack_auth::{
    auth::{can_manage_users, can_view_reports, features_for},
    nav_links, Action, AuthError, Entity, Feature, FileStorage, Notice, Notifier, SeedDirectory,
    SessionConfig, SessionStore, SignUpForm, TracingNotifier,
};
use studenttrack_core::{
    config_error, init_logging, log_operation_error, LoggingConfig, ProfileUpdate, TrackConfig,
    TrackResult,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "studenttrack")]
#[command(about = "Role-based sessions and permissions for StudentTrack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommand),

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Sign in with one of the known accounts
    Login {
        /// Account email
        email: String,

        /// Password (any non-empty value)
        #[arg(short, long)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Register an administrator account and sign into it
    Signup {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        institution: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Update profile fields of the signed-in user
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        profile_picture: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        linkedin_url: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },

    /// Check access to a feature for the current role
    Access {
        /// Feature name, e.g. attendance or leave-requests
        feature: String,
    },

    /// Check whether the current role may perform an action on an entity
    Can {
        /// Action, e.g. view, approve
        action: String,

        /// Entity, e.g. leave, resources
        entity: String,
    },

    /// Show the dashboard and navigation for the current role
    Dashboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Config {
            show,
            init,
            validate,
        } => {
            // The file may be missing or broken here, so it is not loaded up front
            let logging_config = if cli.verbose {
                LoggingConfig::verbose()
            } else {
                LoggingConfig::default()
            };
            init_logging(&logging_config)
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

            return handle_config(show, init, validate, cli.config.as_deref());
        }
        Commands::Session(command) => command,
    };

    let config = load_config(cli.config.as_deref())?;

    let logging_config = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        config.logging.clone()
    };
    init_logging(&logging_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting StudentTrack CLI v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    let data_dir = config.storage.resolved_data_dir();
    debug!(data_dir = %data_dir.display(), "Opening session storage");
    let storage = FileStorage::new(&data_dir)?;

    let store = SessionStore::open(
        Arc::new(storage),
        Arc::new(SeedDirectory::new()),
        SessionConfig::from_config(&config.storage, &config.auth),
    );
    let notifier = TracingNotifier;

    let outcome = run(command, &store, &notifier).await;

    if let Err(e) = &outcome {
        if let Some(auth_error) = e.downcast_ref::<AuthError>() {
            notifier.notify(auth_error.notice());
        }
    }

    outcome
}

async fn run(
    command: SessionCommand,
    store: &SessionStore,
    notifier: &dyn Notifier,
) -> anyhow::Result<()> {
    match command {
        SessionCommand::Login { email, password } => {
            let user = store.login(&email, &password).await.map_err(|e| {
                log_operation_error!("login", e, email = %email);
                e
            })?;

            notifier.notify(Notice::success(
                "Signed in",
                format!("Welcome back, {}", user.display_name()),
            ));
            println!(
                "Signed in as {} <{}> ({})",
                user.display_name(),
                user.email,
                user.role
            );
            println!("Dashboard: {}", store.session().await.dashboard_path());
        }

        SessionCommand::Logout => {
            store.logout().await;
            notifier.notify(Notice::success("Signed out", ""));
            println!("Signed out");
        }

        SessionCommand::Signup {
            first_name,
            last_name,
            institution,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                first_name,
                last_name,
                institution,
                email,
                password,
                confirm_password,
            };
            let request = form.validate()?;
            let user = store.sign_up(request).await?;

            notifier.notify(Notice::success(
                "Account created successfully!",
                "Welcome to StudentTrack.",
            ));
            println!("Created {} account {} for {}", user.role, user.id, user.email);
            println!("Dashboard: {}", store.session().await.dashboard_path());
        }

        SessionCommand::Whoami => {
            let session = store.session().await;
            match session.user() {
                Some(user) => {
                    println!("{}", serde_json::to_string_pretty(user)?);
                    println!("{}", session.summary());
                }
                None => println!("Not signed in"),
            }
        }

        SessionCommand::Profile {
            first_name,
            last_name,
            email,
            profile_picture,
            github_url,
            linkedin_url,
            phone_number,
            address,
            bio,
            department,
            position,
            website,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                email,
                profile_picture,
                github_url,
                linkedin_url,
                phone_number,
                address,
                bio,
                department,
                position,
                website,
            };
            if update.is_empty() {
                bail!("Nothing to update; pass at least one field, e.g. --bio");
            }

            let user = store.update_profile(update).await?;
            notifier.notify(Notice::success(
                "Profile updated",
                "Your changes have been saved.",
            ));
            println!("{}", serde_json::to_string_pretty(&user)?);
        }

        SessionCommand::Access { feature } => {
            let feature: Feature = feature.parse().map_err(anyhow::Error::msg)?;
            let session = store.session().await;
            print_decision(session.has_feature_access(feature));
        }

        SessionCommand::Can { action, entity } => {
            let action: Action = action.parse().map_err(anyhow::Error::msg)?;
            let entity: Entity = entity.parse().map_err(anyhow::Error::msg)?;
            let session = store.session().await;
            print_decision(session.can_perform_action(action, entity));
        }

        SessionCommand::Dashboard => {
            let session = store.session().await;
            println!("Dashboard: {}", session.dashboard_path());

            if let Some(role) = session.role() {
                println!("Navigation:");
                for link in nav_links(role) {
                    println!("  {:<16} {}", link.label, link.href);
                }

                let features: Vec<&str> = features_for(role).iter().map(|f| f.as_str()).collect();
                println!("Features: {}", features.join(", "));
                println!("Manage users: {}", can_manage_users(Some(role)));
                println!("View reports: {}", can_view_reports(Some(role)));
            }
        }
    }

    Ok(())
}

fn print_decision(allowed: bool) {
    println!("{}", if allowed { "allowed" } else { "denied" });
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<TrackConfig> {
    if let Some(path) = config_path {
        return Ok(TrackConfig::from_file(path)?);
    }

    // Try to load from default locations
    let default_paths = [
        dirs::config_dir().map(|d| d.join("studenttrack").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".studenttrack").join("config.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            return Ok(TrackConfig::from_file(path)?);
        }
    }

    Ok(TrackConfig::default())
}

fn handle_config(
    show: bool,
    init: bool,
    validate: bool,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    if init {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        TrackConfig::default().save_to_file(&path)?;
        println!("✅ Configuration initialized at: {}", path.display());
    }

    if show {
        let config = load_config(config_path)?;
        println!("{}", toml::to_string_pretty(&config)?);
    }

    if validate {
        let config = load_config(config_path)?;
        config.validate().context("Configuration validation failed")?;
        println!("✅ Configuration is valid");
    }

    Ok(())
}

/// Get the default configuration file path
fn default_config_path() -> TrackResult<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .map(|d| d.join("studenttrack").join("config.toml"))
        .ok_or_else(|| config_error!("Could not determine a configuration directory", "cli"))
}
