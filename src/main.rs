use anyhow::Context;
use popular_tags::configuration::get_configuration;
use popular_tags::startup::{CliArgs, RunOutcome, USAGE, exit_status, run};
use popular_tags::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Example usage: popular-tags 2023-01-01 2023-01-31
    let Some(args) = CliArgs::parse(std::env::args().skip(1)) else {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };

    let configuration = get_configuration().context("Failed to read configuration.")?;

    // Logs go to stderr; stdout is reserved for the tag summary.
    let subscriber = get_subscriber(
        env!("CARGO_PKG_NAME").into(),
        configuration.telemetry.level.clone(),
        configuration.telemetry.format,
        std::io::stderr,
    );
    init_subscriber(subscriber);

    let result = run(&configuration, &args).await;
    match &result {
        Ok(RunOutcome::Saved { path, count }) => {
            tracing::info!("Tags saved to {} ({} tags)", path.display(), count);
        }
        Ok(RunOutcome::NoTags) => {}
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "An error occurred");
        }
    }
    Ok(ExitCode::from(exit_status(&result)))
}
