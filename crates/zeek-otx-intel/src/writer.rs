//! Pulse-to-record expansion over an arbitrary writer.

use std::io::{self, Write};
use zeek_otx_types::{Pulse, map_indicator_type};

use crate::record::{FALLBACK_URL, INTEL_HEADER, IntelRecord, SOURCE_NAME};

/// Writes a Zeek Intel file: one header line, then one record per
/// supported indicator of every pulse fed to it.
#[derive(Debug)]
pub struct IntelWriter<W: Write> {
    writer: W,
    do_notice: String,
    records_written: u64,
}

impl<W: Write> IntelWriter<W> {
    /// Creates a writer and emits the header line.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut writer: W, do_notice: &str) -> io::Result<Self> {
        writer.write_all(INTEL_HEADER.as_bytes())?;
        Ok(Self {
            writer,
            do_notice: do_notice.to_string(),
            records_written: 0,
        })
    }

    /// Expands one pulse into intel records.
    ///
    /// Indicators whose type code has no Zeek counterpart are skipped
    /// silently; that is a deliberate exclusion, not an error. Returns the
    /// number of records written for this pulse.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_pulse(&mut self, pulse: &Pulse) -> io::Result<u64> {
        let description = format!(
            "{SOURCE_NAME} - {} ID: {} Author: {}",
            pulse.name, pulse.id, pulse.author_name
        );
        let url = pulse.first_reference().unwrap_or(FALLBACK_URL);

        let mut written = 0;
        for indicator in &pulse.indicators {
            let Some(intel_type) = map_indicator_type(&indicator.kind) else {
                continue;
            };

            let record = IntelRecord::new(
                &indicator.indicator,
                intel_type,
                &description,
                url,
                &self.do_notice,
            );
            record.write_to(&mut self.writer)?;
            written += 1;
        }

        self.records_written += written;
        Ok(written)
    }

    /// Returns the total number of records written so far.
    #[must_use]
    pub const fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flushes the underlying writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
