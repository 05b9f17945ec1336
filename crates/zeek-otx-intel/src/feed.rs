//! Staged feed writing: stream pulses to a temp file, then promote it.

use futures::stream::{Stream, StreamExt};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zeek_otx_types::{OtxError, Pulse};

use crate::writer::IntelWriter;

/// Errors that can occur while writing the intel feed.
#[derive(Error, Debug)]
pub enum IntelError {
    /// I/O error on the staging file or the final rename.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The pulse stream failed mid-run.
    #[error(transparent)]
    Fetch(#[from] OtxError),
}

/// Counters for a completed feed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedSummary {
    /// Pulses consumed from the stream.
    pub pulses: u64,
    /// Intel records written to the file.
    pub records: u64,
}

/// Streams pulses into `<output>.tmp` and atomically renames it over
/// `output` once the stream completes.
///
/// Readers of `output` only ever observe the previous complete feed or the
/// new complete feed. If the stream or any write fails, the rename never
/// happens: the previous feed stays untouched and the staging file is
/// removed on a best-effort basis.
///
/// # Errors
///
/// Returns an error if the staging file cannot be written, the stream
/// yields a fetch error, or the final rename fails.
pub async fn write_feed<S>(
    output: &Path,
    do_notice: &str,
    pulses: S,
) -> Result<FeedSummary, IntelError>
where
    S: Stream<Item = Result<Pulse, OtxError>>,
{
    let staging = staging_path(output);

    match stream_to_file(&staging, do_notice, pulses).await {
        Ok(summary) => {
            fs::rename(&staging, output)?;
            Ok(summary)
        }
        Err(e) => {
            let _ = fs::remove_file(&staging);
            Err(e)
        }
    }
}

/// Returns the staging path for an output path: `<output>.tmp`.
fn staging_path(output: &Path) -> PathBuf {
    let mut staged = output.as_os_str().to_os_string();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Writes the header and all streamed pulses to `staging`.
async fn stream_to_file<S>(
    staging: &Path,
    do_notice: &str,
    pulses: S,
) -> Result<FeedSummary, IntelError>
where
    S: Stream<Item = Result<Pulse, OtxError>>,
{
    let file = BufWriter::new(File::create(staging)?);
    let mut writer = IntelWriter::new(file, do_notice)?;
    let mut summary = FeedSummary::default();

    futures::pin_mut!(pulses);
    while let Some(pulse) = pulses.next().await {
        let pulse = pulse?;
        summary.records += writer.write_pulse(&pulse)?;
        summary.pulses += 1;
    }

    writer.finish()?.into_inner().map_err(|e| e.into_error())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::INTEL_HEADER;
    use futures::stream;
    use zeek_otx_types::Indicator;

    fn scenario_pulse() -> Pulse {
        Pulse::new(
            "P1".to_string(),
            "42".to_string(),
            "A".to_string(),
            Vec::new(),
            vec![
                Indicator::new("1.2.3.4".to_string(), "IPv4".to_string()),
                Indicator::new("badtype".to_string(), "Unknown".to_string()),
            ],
        )
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("otx.dat");

        let pulses = stream::iter(vec![Ok(scenario_pulse())]);
        let summary = write_feed(&output, "T", pulses).await.unwrap();

        assert_eq!(summary.pulses, 1);
        assert_eq!(summary.records, 1);

        let contents = fs::read_to_string(&output).unwrap();
        let expected = format!(
            "{INTEL_HEADER}1.2.3.4\tIntel::ADDR\tAlienVault OTXv2 - P1 ID: 42 Author: A\thttps://otx.alienvault.com\tT\t-\n"
        );
        assert_eq!(contents, expected);

        // Staging file is gone after promotion
        assert!(!output.with_extension("dat.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_run_leaves_previous_feed_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("otx.dat");
        fs::write(&output, "previous complete feed\n").unwrap();

        let pulses = stream::iter(vec![
            Ok(scenario_pulse()),
            Err(OtxError::Authentication),
            Ok(scenario_pulse()),
        ]);
        let err = write_feed(&output, "T", pulses).await.unwrap_err();

        assert!(matches!(err, IntelError::Fetch(OtxError::Authentication)));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "previous complete feed\n"
        );
        assert!(!staging_path(&output).exists());
    }

    #[tokio::test]
    async fn test_existing_feed_replaced_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("otx.dat");
        fs::write(&output, "stale feed\n").unwrap();

        let pulses = stream::iter(vec![Ok(scenario_pulse())]);
        write_feed(&output, "T", pulses).await.unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        assert!(contents.starts_with(INTEL_HEADER));
        assert!(!contents.contains("stale"));
    }

    #[tokio::test]
    async fn test_empty_stream_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("otx.dat");

        let pulses = stream::iter(Vec::<Result<Pulse, OtxError>>::new());
        let summary = write_feed(&output, "T", pulses).await.unwrap();

        assert_eq!(summary, FeedSummary::default());
        assert_eq!(fs::read_to_string(&output).unwrap(), INTEL_HEADER);
    }

    #[tokio::test]
    async fn test_runs_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("otx.dat");

        write_feed(&output, "T", stream::iter(vec![Ok(scenario_pulse())]))
            .await
            .unwrap();
        let first = fs::read(&output).unwrap();

        write_feed(&output, "T", stream::iter(vec![Ok(scenario_pulse())]))
            .await
            .unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("/var/zeek/otx.dat")),
            PathBuf::from("/var/zeek/otx.dat.tmp")
        );
    }
}
