//! Interactive registration wizard
//!
//! Terminal front-end over [`vellum_console::wizard::Wizard`]. Each step
//! renders its state, reads one command from stdin, and applies the
//! wizard's navigation rules; the final step hands off to the registration
//! orchestrator and watches the transaction until terminal or Ctrl-C.

use anyhow::Result;
use std::io::{self, Write};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use vellum_common::model::{UpdateAttributionRequest, WorkListParams};
use vellum_common::splits;
use vellum_console::api::{ChainClient, ContributorsClient, WorksClient};
use vellum_console::registration::RegistrationOrchestrator;
use vellum_console::wizard::{Wizard, WizardStep};

/// Read one trimmed line from stdin after printing a prompt
pub fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Run the five-step wizard loop
pub async fn run_wizard(
    works: WorksClient,
    contributors: ContributorsClient,
    chain: ChainClient,
) -> Result<()> {
    let mut wizard = Wizard::new();

    loop {
        let step = wizard.current_step();
        println!("\n== Step {}: {} ==", step_number(step), step.label());

        match step {
            WizardStep::Select => {
                if !select_step(&mut wizard, &works).await? {
                    return Ok(());
                }
            }
            WizardStep::Contributors => {
                contributors_step(&mut wizard, &works, &contributors).await?;
            }
            WizardStep::Splits => {
                splits_step(&mut wizard, &works, &contributors).await?;
            }
            WizardStep::Review => {
                if !review_step(&mut wizard)? {
                    return Ok(());
                }
            }
            WizardStep::Register => {
                register_step(&wizard, works, chain).await?;
                return Ok(());
            }
        }
    }
}

fn step_number(step: WizardStep) -> usize {
    WizardStep::ALL.iter().position(|&s| s == step).unwrap_or(0) + 1
}

/// Returns false when the user quits
async fn select_step(wizard: &mut Wizard, works: &WorksClient) -> Result<bool> {
    println!("Choose a draft work to register.");
    let input = prompt("work id ('list' to browse, 'quit' to exit): ")?;

    match input.as_str() {
        "quit" | "q" => return Ok(false),
        "list" => {
            let page = works
                .list(&WorkListParams {
                    status: Some(vellum_common::model::WorkStatus::Draft),
                    ..Default::default()
                })
                .await?;
            for work in &page.items {
                println!("  {}  {}", work.id, work.title);
            }
        }
        raw => match raw.parse::<Uuid>() {
            Ok(id) => match works.get(id).await {
                Ok(work) => {
                    println!("Selected \"{}\"", work.title);
                    wizard.select_work(work);
                    wizard.advance();
                }
                Err(e) => println!("Could not load work: {}", e),
            },
            Err(_) => println!("Not a work id."),
        },
    }
    Ok(true)
}

async fn contributors_step(
    wizard: &mut Wizard,
    works: &WorksClient,
    contributors: &ContributorsClient,
) -> Result<()> {
    // Contributor edits happen through the `contributors` subcommands;
    // here we show the current list and let the user refresh after edits.
    if let Some(work) = wizard.selected_work() {
        let list = contributors.list_for_work(work.id).await?;
        if list.is_empty() {
            println!("No contributors yet. Add some with `vellum-console contributors add`.");
        }
        for attribution in &list {
            println!(
                "  {}  {}  {}%  [{}]",
                attribution.user_id, attribution.role, attribution.split,
                attribution.approval_status
            );
        }
    }

    match prompt("[next/back/refresh]: ")?.as_str() {
        "back" | "b" => {
            wizard.back();
        }
        "refresh" | "r" => {
            refresh(wizard, works).await?;
        }
        _ => {
            wizard.advance();
        }
    }
    Ok(())
}

async fn splits_step(
    wizard: &mut Wizard,
    works: &WorksClient,
    contributors: &ContributorsClient,
) -> Result<()> {
    if let Some(work) = wizard.selected_work() {
        for contributor in &work.contributors {
            println!("  {}  {}%", contributor.user_name, contributor.split);
        }
        println!("  total: {}%", work.total_split());
    }
    if let Some(warning) = wizard.split_warning() {
        println!("  warning: {}", warning);
    }

    match prompt("[next/back/distribute]: ")?.as_str() {
        "back" | "b" => {
            wizard.back();
        }
        "distribute" | "d" => {
            if let Some(work) = wizard.selected_work() {
                let work_id = work.id;
                let existing = contributors.list_for_work(work_id).await?;
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
                }
                refresh(wizard, works).await?;
            }
        }
        _ => {
            wizard.advance();
        }
    }
    Ok(())
}

/// Returns false when the user quits
fn review_step(wizard: &mut Wizard) -> Result<bool> {
    if let Some(work) = wizard.selected_work() {
        println!("{}", work.title);
        println!("{}", work.summary);
        println!("Contributors:");
        for contributor in &work.contributors {
            println!(
                "  {} - {} ({}%)",
                contributor.user_name, contributor.role, contributor.split
            );
        }
    }
    for blocker in wizard.registration_blockers() {
        println!("  blocker: {}", blocker);
    }

    match prompt("[register/back/quit]: ")?.as_str() {
        "back" | "b" => {
            wizard.back();
            Ok(true)
        }
        "quit" | "q" => Ok(false),
        "register" => {
            if wizard.can_register() {
                wizard.advance();
            } else {
                println!("Resolve the blockers above first.");
            }
            Ok(true)
        }
        _ => Ok(true),
    }
}

async fn register_step(wizard: &Wizard, works: WorksClient, chain: ChainClient) -> Result<()> {
    let Some(work) = wizard.selected_work() else {
        return Ok(());
    };

    let orchestrator = RegistrationOrchestrator::new(works, chain);
    let receipt = orchestrator.register(work.id).await?;
    println!("Transaction {} ({})", receipt.transaction_id, receipt.status);

    if receipt.status.is_terminal() {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    println!("Waiting for confirmation (Ctrl-C to stop watching)...");
    let status = orchestrator.watch(&receipt, cancel).await?;
    println!(
        "Registration {}: confirmations {}, block {:?}",
        status.status, status.confirmations, status.block_number
    );
    if let Some(message) = status.error_message {
        println!("Chain error: {}", message);
    }
    Ok(())
}

async fn refresh(wizard: &mut Wizard, works: &WorksClient) -> Result<()> {
    if let Some(work) = wizard.selected_work() {
        let fresh = works.get(work.id).await?;
        wizard.refresh_work(fresh);
    }
    Ok(())
}
