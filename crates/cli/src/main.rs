//! Samaritan CLI - invoke the Samaritan backend functions.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use samaritan_calls::{OrgCalls, SnapshotKind, SnapshotStore, UserCalls};
use samaritan_core::{Credentials, NewTask, OrgId, TaskId, UserId};
use samaritan_invoke::{InvocationResponse, Invoker, InvokerConfig, LambdaHttpInvoker, ScriptedInvoker};
use samaritan_tasks::{BasicTaskManager, TaskManager, TaskOutcome};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "samaritan")]
#[command(about = "Invoke Samaritan backend functions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the function invoke API
    #[arg(long, global = true, env = "SAMARITAN_LAMBDA_ENDPOINT", default_value = "http://localhost:3001")]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SAMARITAN_LAMBDA_TIMEOUT_SECS", default_value = "60")]
    timeout_secs: u64,

    /// Function version or alias to invoke
    #[arg(long, global = true, env = "SAMARITAN_LAMBDA_QUALIFIER")]
    qualifier: Option<String>,

    /// Directory receiving user.json / org.json
    #[arg(long, global = true, env = "SAMARITAN_SNAPSHOT_DIR", default_value = ".")]
    snapshot_dir: PathBuf,

    /// Answer every call locally with `{}` instead of contacting the backend
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a user's login and snapshot the profile
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Check an organization's login and snapshot the profile
    OrgLogin {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Register a new user
    SignUp {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Create a task
    CreateTask {
        /// Task title
        #[arg(long)]
        title: String,
        /// Task description
        #[arg(long)]
        description: String,
        /// Latitude of the task location
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude of the task location
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// Rating awarded on completion
        #[arg(long)]
        elo: i64,
        /// Owning organization
        #[arg(long)]
        org_id: String,
        /// When the task takes place (defaults to now, RFC 3339)
        #[arg(long)]
        time: Option<String>,
    },
    /// Remove a task
    RemoveTask {
        /// Task ID
        task_id: String,
    },
    /// Mark a task as completed
    CompleteTask {
        /// Task ID
        task_id: String,
    },
    /// List tasks open to a user
    AvailableTasks {
        /// User ID
        #[arg(long)]
        user_id: String,
    },
    /// List a user's tasks around a location
    UserTasks {
        /// User ID
        #[arg(long)]
        user_id: String,
        /// Latitude of the user
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude of the user
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Show a stored profile snapshot
    Snapshot {
        /// Which snapshot to show
        #[arg(value_enum)]
        kind: SnapshotArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SnapshotArg {
    User,
    Org,
}

impl From<SnapshotArg> for SnapshotKind {
    fn from(arg: SnapshotArg) -> Self {
        match arg {
            SnapshotArg::User => SnapshotKind::User,
            SnapshotArg::Org => SnapshotKind::Org,
        }
    }
}

fn init_logging() {
    // stdout carries the JSON results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn build_invoker(cli: &Cli) -> Result<Arc<dyn Invoker>> {
    if cli.dry_run {
        info!("Dry run: no remote calls will be made");
        let answer = InvocationResponse::json(&serde_json::json!({}));
        return Ok(Arc::new(ScriptedInvoker::answering_all(answer)));
    }

    let config = InvokerConfig {
        endpoint: cli.endpoint.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
        qualifier: cli.qualifier.clone(),
    };
    debug!("Using invoke endpoint {}", config.endpoint);
    Ok(Arc::new(LambdaHttpInvoker::new(config)?))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(outcome: &TaskOutcome) -> Result<ExitCode> {
    print_json(outcome)?;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();

    let snapshots = SnapshotStore::new(&cli.snapshot_dir);
    let invoker = build_invoker(&cli)?;
    let users = UserCalls::new(invoker.clone()).with_snapshots(snapshots.clone());
    let orgs = OrgCalls::new(invoker).with_snapshots(snapshots.clone());

    match cli.command {
        Commands::Login { email, password } => {
            let outcome = users.check_login(&Credentials::new(email, password)).await?;
            print_json(&outcome)?;
        }
        Commands::OrgLogin { email, password } => {
            let outcome = orgs.check_org_login(&Credentials::new(email, password)).await?;
            print_json(&outcome)?;
        }
        Commands::SignUp { email, password } => {
            let response = users.sign_up(&Credentials::new(email, password)).await?;
            print_json(&response)?;
        }
        Commands::CreateTask {
            title,
            description,
            latitude,
            longitude,
            elo,
            org_id,
            time,
        } => {
            let task = NewTask {
                title,
                description,
                latitude,
                longitude,
                elo,
                org_id: OrgId::new(org_id),
                time: time.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            };
            let manager = BasicTaskManager::new(orgs);
            return report(&manager.create_task(task).await);
        }
        Commands::RemoveTask { task_id } => {
            let manager = BasicTaskManager::new(orgs);
            return report(&manager.remove_task(TaskId::new(task_id)).await);
        }
        Commands::CompleteTask { task_id } => {
            let manager = BasicTaskManager::new(orgs);
            return report(&manager.complete_task(TaskId::new(task_id)).await);
        }
        Commands::AvailableTasks { user_id } => {
            let tasks = users.get_available_tasks(&UserId::new(user_id)).await?;
            print_json(&tasks)?;
        }
        Commands::UserTasks {
            user_id,
            latitude,
            longitude,
        } => {
            let tasks = users
                .get_user_tasks(&UserId::new(user_id), longitude, latitude)
                .await?;
            print_json(&tasks)?;
        }
        Commands::Snapshot { kind } => {
            let kind = SnapshotKind::from(kind);
            match snapshots.load(kind).await? {
                Some(profile) => print_json(&profile)?,
                None => {
                    eprintln!("No snapshot at {}", snapshots.path(kind).display());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
