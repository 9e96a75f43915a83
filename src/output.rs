use crate::domain::TagRecord;
use crate::error::error_chain_fmt;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File formats supported for the saved tags, chosen by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, WriteError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(WriteError::UnsupportedFormat(path.to_owned())),
        }
    }
}

#[derive(thiserror::Error)]
pub enum WriteError {
    #[error("Failed to serialize the tags as JSON")]
    Json(#[source] serde_json::Error),
    #[error("Failed to serialize the tags as CSV")]
    Csv(#[source] csv::Error),
    #[error("Failed to write to {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid or missing filename extension in {0:?}, expected .json or .csv")]
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Debug for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, WriteError> {
    serde_json::to_vec_pretty(value).map_err(WriteError::Json)
}

fn to_csv<T: Serialize>(values: &[T]) -> Result<Vec<u8>, WriteError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    values
        .iter()
        .try_for_each(|val| writer.serialize(val))
        .map_err(WriteError::Csv)?;
    writer
        .into_inner()
        .map_err(|e| WriteError::Csv(e.into_error().into()))
}

/// Saves the tags to `path`, replacing whatever the file held before.
#[tracing::instrument(
    name = "Saving tags to file",
    skip(tags, path),
    fields(path = %path.display(), tags = tags.len())
)]
pub async fn write_tags_to_file(tags: &[TagRecord], path: &Path) -> Result<(), WriteError> {
    let contents = match OutputFormat::from_path(path)? {
        OutputFormat::Json => to_json(tags)?,
        OutputFormat::Csv => to_csv(tags)?,
    };
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| WriteError::Io {
            path: path.to_owned(),
            source,
        })?;
    tracing::info!("Successfully wrote {} tags to {:?}", tags.len(), path);
    Ok(())
}

/// Prints a ranked, human-readable table of the tags.
pub fn write_summary(tags: &[TagRecord], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Most Popular Tags:")?;
    if tags.is_empty() {
        return writeln!(out, "  (none)");
    }
    for (rank, tag) in tags.iter().enumerate() {
        writeln!(
            out,
            "{:>4}. {:<24} {:>10}  {}",
            rank + 1,
            tag.name,
            tag.count,
            tag.link
        )?;
    }
    Ok(())
}
