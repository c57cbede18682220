use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{info, instrument};

use cleanse_client::{HealthStatus, ProcessingClient};
use cleanse_core::{Pipeline, PipelineError, Session};
use cleanse_ingest::candidate_from_path;
use cleanse_report::DirectoryTarget;

use cleanse_cli::settings::Settings;

use crate::cli::{FileArgs, ProcessArgs};
use crate::progress::WaitingSpinner;
use crate::summary::{print_file_info, print_health, print_results};

/// Check a file against the intake policy without reading it.
pub fn run_validate(args: &FileArgs, settings: &Settings) -> Result<()> {
    let candidate = candidate_from_path(&args.file, args.media_type.as_deref())
        .map_err(PipelineError::from)?;
    let file = settings
        .intake
        .policy()
        .validate(candidate)
        .into_result()
        .map_err(PipelineError::from)?;
    print_file_info(&file);
    println!("Accepted for processing");
    Ok(())
}

#[instrument(skip_all, fields(file = %args.file.file.display()))]
pub async fn run_process(args: &ProcessArgs, settings: &Settings, log_data: bool) -> Result<()> {
    let mut pipeline = Pipeline::connect(settings.service.to_config(log_data))?
        .with_policy(settings.intake.policy())
        .with_renderer(settings.preview.renderer());

    // Informational only; processing is attempted either way.
    pipeline.check_health().await;

    let mut session = Session::new();
    let file = pipeline.intake(
        &mut session,
        &args.file.file,
        args.file.media_type.as_deref(),
    )?;
    print_file_info(&file);

    let rendered = {
        let _spinner = WaitingSpinner::new("Processing...");
        pipeline.process(&mut session).await?
    };
    print_results(&rendered);

    if let Some(path) = &args.html {
        let document = rendered.to_html_document(&file.name)?;
        std::fs::write(path, document)
            .with_context(|| format!("write HTML report {}", path.display()))?;
        info!(path = %path.display(), "wrote HTML report");
        println!("HTML report: {}", path.display());
    }

    if args.export {
        let dir = export_dir(args, settings);
        let path = pipeline.export(&session, &DirectoryTarget::new(dir))?;
        println!("Exported: {}", path.display());
    }
    Ok(())
}

pub async fn run_health(settings: &Settings, log_data: bool) -> Result<()> {
    let client = ProcessingClient::new(settings.service.to_config(log_data))?;
    let url = client.health_url();
    let status = client.check_health().await;
    print_health(&url, &status);
    match status {
        HealthStatus::Available => Ok(()),
        HealthStatus::Unavailable(reason) => Err(anyhow!("processing service unavailable: {reason}")),
    }
}

/// Flag first, then settings, then the current folder.
fn export_dir(args: &ProcessArgs, settings: &Settings) -> PathBuf {
    args.output_dir
        .clone()
        .or_else(|| settings.export.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}
