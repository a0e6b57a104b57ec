mod args;
mod progress;

use crate::args::{Args, BulkCommands, Commands, PreviewCommands, UploadArgs};
use crate::progress::ProgressIndicator;

use clap::Parser;
use email_validation::{api::EmailValidationClient, upload::FileSource};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Args {
        connection,
        command,
    } = Args::parse();
    let config = connection.config()?;
    log::debug!("Using {config:?}");

    if config.api_key.is_none() {
        eprintln!("[WARNING] No API key provided, the service will reject the request");
    }

    let client = EmailValidationClient::new(&config)?;

    match command {
        Commands::Validate(args) => print(
            &client.validate(args.address.as_ref(), !args.no_provider_lookup)?,
        ),
        Commands::Bulk(command) => bulk(&client, command),
        Commands::Preview(command) => preview(&client, command),
    }
}

fn bulk(client: &EmailValidationClient, command: BulkCommands) -> anyhow::Result<()> {
    match command {
        BulkCommands::Create { list_id, upload } => {
            let source = source(&upload);
            let spinner = ProgressIndicator::new_spinner(&format!("Uploading list {list_id}"));
            let job = client.create_bulk_job(list_id.as_ref(), source);
            spinner.finish_and_clear();
            print(&job?)
        }
        BulkCommands::Get { list_id } => print(&client.get_bulk_job(list_id.as_ref())?),
        BulkCommands::List { limit } => {
            print(&client.get_bulk_jobs(i64::try_from(limit.get())?)?)
        }
        BulkCommands::Delete { list_id } => print(&client.delete_bulk_job(list_id.as_ref())?),
    }
}

fn preview(client: &EmailValidationClient, command: PreviewCommands) -> anyhow::Result<()> {
    match command {
        PreviewCommands::Create { preview_id, upload } => {
            let source = source(&upload);
            let spinner =
                ProgressIndicator::new_spinner(&format!("Uploading preview {preview_id}"));
            let preview = client.create_bulk_preview(preview_id.as_ref(), source);
            spinner.finish_and_clear();
            print(&preview?)
        }
        PreviewCommands::Get { preview_id } => {
            print(&client.get_bulk_preview(preview_id.as_ref())?)
        }
        PreviewCommands::List { limit } => {
            print(&client.get_bulk_previews(i64::try_from(limit.get())?)?)
        }
        PreviewCommands::Delete { preview_id } => {
            let deleted = client.delete_bulk_preview(preview_id.as_ref())?;
            print(&serde_json::json!({ "id": preview_id.as_ref(), "deleted": deleted }))
        }
        PreviewCommands::Promote { preview_id } => {
            print(&client.promote_bulk_preview(preview_id.as_ref())?)
        }
    }
}

fn source(upload: &UploadArgs) -> FileSource {
    let source = FileSource::infer(&upload.file);
    if !source.is_path_backed() {
        log::info!(
            "--file does not name a file, uploading {} bytes of content",
            upload.file.len()
        );
    }
    source
}

fn print(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
