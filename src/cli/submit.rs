//! Submit command - upload a document, confirm and publish it

use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use blogcheck::catalog::read_time_minutes;
use blogcheck::config::ClientConfig;
use blogcheck::draft::FieldUpdate;
use blogcheck::error::{Result, StateFault};
use blogcheck::gateway::create_gateway;
use blogcheck::types::{Category, DocumentFile, MIN_WORD_COUNT, UploadResult};
use blogcheck::workflow::{Workflow, WorkflowState, outcome_fault};
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

/// Form values collected from the command line
pub struct SubmitForm {
    /// Author's full name
    pub name: String,
    /// Author's email address
    pub email: String,
    /// Blog category
    pub category: Category,
    /// Blog title
    pub title: String,
    /// Document to upload
    pub file: PathBuf,
}

/// Run the submit command
pub async fn run_submit(api_url: Option<&str>, form: SubmitForm, assume_yes: bool) -> Result<()> {
    let config = ClientConfig::from_env(api_url)?;
    let gateway = create_gateway(&config)?;
    let workflow = Workflow::with_progress(
        gateway,
        config.workflow_timing(),
        Arc::new(CliProgress::new()),
    );

    let document = DocumentFile::from_path(&form.file).await?;

    workflow.set_field(FieldUpdate::FullName(form.name))?;
    workflow.set_field(FieldUpdate::Email(form.email))?;
    workflow.set_field(FieldUpdate::Category(Some(form.category)))?;
    workflow.set_field(FieldUpdate::Title(form.title))?;
    workflow.set_field(FieldUpdate::File(Some(document)))?;

    let result = workflow.upload().await?;
    print_analysis(&result);

    if !assume_yes {
        let publish = Confirm::new()
            .with_prompt("Publish this blog?")
            .default(true)
            .interact()
            .map_err(|e| match e {
                dialoguer::Error::IO(e) => e,
            })?;
        if !publish {
            workflow.abandon().await;
            println!("{}", "Submission discarded".muted());
            return Ok(());
        }
    }

    if workflow.confirm().await? == WorkflowState::Review {
        workflow.wait_while(WorkflowState::Review).await;
    }

    let snapshot = workflow.snapshot();
    if let Some(outcome) = snapshot.review.filter(|o| !o.passed) {
        if let Some(fault) = outcome_fault(&outcome, result.word_count) {
            return Err(fault.into());
        }
    }
    if let Some(notice) = &snapshot.notice {
        println!("{} {}", arrow(), notice.warn().for_stdout());
    }
    if snapshot.notice.is_some() || snapshot.draft.public_url.is_none() {
        return Err(StateFault::NotPublished.into());
    }

    Ok(())
}

fn print_analysis(result: &UploadResult) {
    let words = format!("{} words", result.word_count);
    let words = if result.word_count >= MIN_WORD_COUNT {
        words.accent().to_string()
    } else {
        words.warn().for_stdout().to_string()
    };
    println!(
        "  {} {}",
        words,
        format!("(~{} min read)", read_time_minutes(result.word_count)).muted()
    );

    if result.is_plagiarized {
        println!("  {}", "Plagiarism detected".warn().for_stdout());
    } else {
        println!("  {}", "Original content".success());
    }
}
