use crate::configuration::Settings;
use crate::domain::{InvalidDate, QueryWindow};
use crate::error::error_chain_fmt;
use crate::output::{WriteError, write_summary, write_tags_to_file};
use crate::stack_exchange::FetchError;
use std::path::PathBuf;

pub const USAGE: &str = concat!("Usage: ", env!("CARGO_PKG_NAME"), " <fromDate> <toDate>");

/// Positional arguments of the command line, dates still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub from_date: String,
    pub to_date: String,
}

impl CliArgs {
    /// Takes the arguments that follow the program name. Returns `None` if
    /// fewer than two were given; extra arguments are ignored.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut args = args.into_iter();
        let from_date = args.next()?;
        let to_date = args.next()?;
        Some(Self { from_date, to_date })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved { path: PathBuf, count: usize },
    /// The API reported no tags in the window, so no file was written.
    NoTags,
}

#[derive(thiserror::Error)]
pub enum RunError {
    #[error("Invalid query window")]
    InvalidInput(#[from] InvalidDate),
    #[error("Failed to build the HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("Failed to fetch the most popular tags")]
    Fetch(#[from] FetchError),
    #[error("Failed to save the most popular tags")]
    Write(#[from] WriteError),
}

impl std::fmt::Debug for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Process exit status for the result of a run: 0 unless the run failed.
pub fn exit_status(result: &Result<RunOutcome, RunError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[tracing::instrument(
    name = "Collecting the most popular tags",
    skip(settings, args),
    fields(from = %args.from_date, to = %args.to_date)
)]
pub async fn run(settings: &Settings, args: &CliArgs) -> Result<RunOutcome, RunError> {
    let window = QueryWindow::parse(&args.from_date, &args.to_date)?;
    let client = settings.api.client().map_err(RunError::Client)?;
    let tags = client.fetch_popular_tags(&window).await?;

    if let Err(e) = write_summary(&tags, &mut std::io::stdout().lock()) {
        tracing::warn!("Failed to print the tag summary: {}", e);
    }

    if tags.is_empty() {
        tracing::info!(
            "No tags reported between {} and {}, nothing to save",
            window.from_date,
            window.to_date
        );
        return Ok(RunOutcome::NoTags);
    }

    let path = &settings.output.path;
    write_tags_to_file(&tags, path).await?;
    Ok(RunOutcome::Saved {
        path: path.clone(),
        count: tags.len(),
    })
}
