//! vellum-console - publishing console for on-chain work registration
//!
//! Thin CLI over the publishing API and chain service: work and contributor
//! management, royalty split tooling, and the orchestrated registration
//! flow with live status polling.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use vellum_common::config::{ConsoleConfig, TomlConfig};
use vellum_common::model::{
    AddContributorRequest, ApprovalRequest, ContributorRole, CreateWorkRequest, OverrideRequest,
    UpdateAttributionRequest, UpdateWorkRequest, UserSearchParams, WorkListParams, WorkStatus,
};
use vellum_common::splits;
use vellum_console::api::{ApiClient, AuthClient, ChainClient, ContributorsClient, WorksClient};
use vellum_console::registration::{ensure_submittable, RegistrationOrchestrator};

mod interactive;

#[derive(Parser)]
#[command(
    name = "vellum-console",
    version,
    about = "Publishing console: register collaboratively-authored works on-chain"
)]
struct Cli {
    /// Publishing API base URL (overrides env and config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Chain service base URL (overrides env and config file)
    #[arg(long, global = true)]
    chain_url: Option<String>,

    /// Bearer access token (overrides env and config file)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage works
    Works {
        #[command(subcommand)]
        command: WorksCommand,
    },
    /// Manage contributors and royalty splits
    Contributors {
        #[command(subcommand)]
        command: ContributorsCommand,
    },
    /// Submit a work and register it on-chain, then watch the transaction.
    /// Re-running for an already-submitted work retries the chain step alone.
    Register {
        work_id: Uuid,
        /// Print the receipt and exit without polling
        #[arg(long)]
        no_watch: bool,
    },
    /// One-shot chain transaction status
    Status { transaction_id: String },
    /// On-chain record for a work, if any
    Record { work_id: Uuid },
    /// Interactive five-step registration wizard
    Wizard,
    /// Obtain an access token
    Login { email: String },
    /// Invalidate the current session server-side
    Logout,
    /// Show the authenticated user
    Whoami,
}

#[derive(Subcommand)]
enum WorksCommand {
    /// List works, optionally filtered
    List(ListWorksArgs),
    /// Show a single work
    Show { id: Uuid },
    /// Create a new draft work
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        summary: String,
    },
    /// Update title and/or summary
    Update {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Delete a work
    Delete { id: Uuid },
    /// Submit a draft for registration (draft -> pending_approval)
    Submit { id: Uuid },
}

#[derive(Args)]
struct ListWorksArgs {
    /// Filter by status (draft, pending_approval, approved, registered, rejected)
    #[arg(long)]
    status: Option<WorkStatus>,
    /// Full-text search over title and summary
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Subcommand)]
enum ContributorsCommand {
    /// List contributors on a work
    List { work_id: Uuid },
    /// Add a contributor by user id or invite email
    Add {
        #[arg(long)]
        work_id: Uuid,
        #[arg(long)]
        user_id: Option<Uuid>,
        #[arg(long)]
        email: Option<String>,
        /// primary_author, co_author, illustrator, editor, moderator, publisher
        #[arg(long)]
        role: ContributorRole,
        #[arg(long)]
        split: f64,
    },
    /// Update a contributor's role or split
    Update {
        id: Uuid,
        #[arg(long)]
        role: Option<ContributorRole>,
        #[arg(long)]
        split: Option<f64>,
    },
    /// Remove a contributor
    Remove { id: Uuid },
    /// Submit your approval decision for a work
    Approve {
        #[arg(long)]
        work_id: Uuid,
        /// Record a rejection instead of an approval
        #[arg(long)]
        reject: bool,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Override a non-responsive contributor
    Override {
        #[arg(long)]
        work_id: Uuid,
        #[arg(long)]
        target_user_id: Uuid,
        #[arg(long)]
        justification: String,
    },
    /// Server-side split validation for a work
    Validate { work_id: Uuid },
    /// Distribute splits evenly across current contributors and save
    Distribute { work_id: Uuid },
    /// Search users to add as contributors
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let toml_config = TomlConfig::load_default();
    let config = ConsoleConfig::resolve(
        cli.api_url.as_deref(),
        cli.chain_url.as_deref(),
        cli.token.as_deref(),
        &toml_config,
    );

    let api = ApiClient::new(&config.api_base_url, config.access_token.as_deref())?;
    let works = WorksClient::new(api.clone());
    let contributors = ContributorsClient::new(api.clone());
    let auth = AuthClient::new(api);
    let chain = ChainClient::new(&config.chain_base_url, config.access_token.as_deref())?;

    match cli.command {
        Command::Works { command } => run_works(command, &works).await?,
        Command::Contributors { command } => {
            run_contributors(command, &contributors).await?
        }
        Command::Register { work_id, no_watch } => {
            run_register(work_id, no_watch, works, chain).await?
        }
        Command::Status { transaction_id } => {
            let status = chain.status(&transaction_id).await?;
            print_json(&status)?;
        }
        Command::Record { work_id } => match chain.record(work_id).await? {
            Some(receipt) => print_json(&receipt)?,
            None => println!("No on-chain record for work {}", work_id),
        },
        Command::Wizard => {
            interactive::run_wizard(works, contributors, chain).await?;
        }
        Command::Login { email } => {
            let password = interactive::prompt("Password: ")?;
            let session = auth.login(&email, &password).await?;
            info!(user = %session.user.name, "Logged in");
            println!("{}", session.access_token);
            eprintln!(
                "Export VELLUM_ACCESS_TOKEN or add access_token to the config file to persist it."
            );
        }
        Command::Logout => {
            auth.logout().await?;
            println!("Logged out.");
        }
        Command::Whoami => print_json(&auth.current_user().await?)?,
    }

    Ok(())
}

async fn run_works(command: WorksCommand, works: &WorksClient) -> Result<()> {
    match command {
        WorksCommand::List(args) => {
            let params = WorkListParams {
                status: args.status,
                search: args.search,
                page: args.page,
                page_size: args.page_size,
            };
            let page = works.list(&params).await?;
            print_json(&page)?;
        }
        WorksCommand::Show { id } => print_json(&works.get(id).await?)?,
        WorksCommand::Create { title, summary } => {
            let work = works.create(&CreateWorkRequest { title, summary }).await?;
            print_json(&work)?;
        }
        WorksCommand::Update { id, title, summary } => {
            let work = works
                .update(id, &UpdateWorkRequest { title, summary })
                .await?;
            print_json(&work)?;
        }
        WorksCommand::Delete { id } => {
            works.delete(id).await?;
            println!("Deleted work {}", id);
        }
        WorksCommand::Submit { id } => {
            // UI-level gate; the server re-validates and stays authoritative
            let work = works.get(id).await?;
            ensure_submittable(&work)?;
            let submitted = works.submit_for_registration(id).await?;
            print_json(&submitted)?;
        }
    }
    Ok(())
}

async fn run_contributors(
    command: ContributorsCommand,
    contributors: &ContributorsClient,
) -> Result<()> {
    match command {
        ContributorsCommand::List { work_id } => {
            print_json(&contributors.list_for_work(work_id).await?)?
        }
        ContributorsCommand::Add {
            work_id,
            user_id,
            email,
            role,
            split,
        } => {
            let attribution = contributors
                .add(&AddContributorRequest {
                    work_id,
                    user_id,
                    email,
                    role,
                    split,
                })
                .await?;
            print_json(&attribution)?;
        }
        ContributorsCommand::Update { id, role, split } => {
            let attribution = contributors
                .update(id, &UpdateAttributionRequest { role, split })
                .await?;
            print_json(&attribution)?;
        }
        ContributorsCommand::Remove { id } => {
            contributors.remove(id).await?;
            println!("Removed contributor {}", id);
        }
        ContributorsCommand::Approve {
            work_id,
            reject,
            comment,
        } => {
            let attribution = contributors
                .approve(&ApprovalRequest {
                    work_id,
                    approved: !reject,
                    comment,
                })
                .await?;
            print_json(&attribution)?;
        }
        ContributorsCommand::Override {
            work_id,
            target_user_id,
            justification,
        } => {
            let attribution = contributors
                .override_approval(&OverrideRequest {
                    work_id,
                    target_user_id,
                    justification,
                })
                .await?;
            print_json(&attribution)?;
        }
        ContributorsCommand::Validate { work_id } => {
            print_json(&contributors.validate_splits(work_id).await?)?
        }
        ContributorsCommand::Distribute { work_id } => {
            distribute_evenly(contributors, work_id).await?;
        }
        ContributorsCommand::Search { query, limit } => {
            let users = contributors
                .search_users(&UserSearchParams { query, limit })
                .await?;
            print_json(&users)?;
        }
    }
    Ok(())
}

/// Apply the even-split policy to a work's contributors and persist each split
async fn distribute_evenly(contributors: &ContributorsClient, work_id: Uuid) -> Result<()> {
    let existing = contributors.list_for_work(work_id).await?;
    if existing.is_empty() {
        warn!(work_id = %work_id, "Work has no contributors to distribute over");
        println!("Work {} has no contributors.", work_id);
        return Ok(());
    }

    let new_splits = splits::distribute_evenly(existing.len());
    for (attribution, split) in existing.iter().zip(new_splits) {
        contributors
            .update(
                attribution.id,
                &UpdateAttributionRequest {
                    role: None,
                    split: Some(split),
                },
            )
            .await?;
        println!("{} -> {}%", attribution.user_id, split);
    }
    Ok(())
}

async fn run_register(
    work_id: Uuid,
    no_watch: bool,
    works: WorksClient,
    chain: ChainClient,
) -> Result<()> {
    let orchestrator = RegistrationOrchestrator::new(works, chain);
    let receipt = orchestrator.register(work_id).await?;
    print_json(&receipt)?;

    if no_watch || receipt.status.is_terminal() {
        return Ok(());
    }

    // Ctrl-C cancels the watch without killing the process mid-print
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    println!("Waiting for confirmation (Ctrl-C to stop watching)...");
    let final_status = orchestrator.watch(&receipt, cancel).await?;
    print_json(&final_status)?;

    if !final_status.status.is_terminal() {
        println!(
            "Stopped watching; check later with: vellum-console status {}",
            final_status.transaction_id
        );
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
